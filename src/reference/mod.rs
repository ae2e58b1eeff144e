// Reference data module - static lookup tables for call sign analysis
// Source: ITU phonetic alphabet, International Morse Code, FCC ULS code
// definitions and the ARRL list of call signs unavailable to vanity applicants.
//
// Tables are compile-time constants shared read-only by every lookup.

pub mod codes;
pub mod morse;
pub mod phonetic;
pub mod syllables;
pub mod vanity;

use crate::error::{Error, Result};

/// A per-character table covering the supported call sign alphabet
#[derive(Debug, Clone, Copy)]
pub struct CharTable<T: 'static> {
    /// Table name reported in `UnsupportedCharacter` errors
    pub name: &'static str,
    pub entries: &'static [(char, T)],
}

impl<T: Copy> CharTable<T> {
    pub const fn new(name: &'static str, entries: &'static [(char, T)]) -> Self {
        Self { name, entries }
    }

    /// Value for `c`, if the table covers it
    pub fn get(&self, c: char) -> Option<T> {
        self.entries
            .iter()
            .find(|(key, _)| *key == c)
            .map(|(_, value)| *value)
    }

    /// Value for `c`, or `UnsupportedCharacter` naming this table
    pub fn lookup(&self, c: char) -> Result<T> {
        self.get(c).ok_or(Error::UnsupportedCharacter {
            character: c,
            table: self.name,
        })
    }

    pub fn contains(&self, c: char) -> bool {
        self.get(c).is_some()
    }
}

pub use morse::MORSE_CODE;
pub use phonetic::PHONETIC_WORDS;
pub use syllables::SYLLABLE_LENGTHS;
