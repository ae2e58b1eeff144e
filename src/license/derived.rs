//! Derived call sign analysis.
//!
//! These are pure functions of the call sign text. `LicenseRecord` exposes
//! them as methods; they are never stored on the record.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Result;
use crate::reference::{CharTable, MORSE_CODE, PHONETIC_WORDS, SYLLABLE_LENGTHS};

const FCC_ULS_LICENSE_URL: &str = "https://wireless2.fcc.gov/UlsApp/UlsSearch/license.jsp?licKey=";
const QRZ_CALL_SIGN_URL: &str = "https://www.qrz.com/db/";

lazy_static! {
    static ref FORMAT_PATTERN: Regex =
        Regex::new(r"^([A-Z]+)\d([A-Z]+)$").expect("call sign format pattern is valid");
}

/// Space-separated Morse pattern per character
pub fn morse(call_sign: &str) -> Result<String> {
    let patterns = call_sign
        .chars()
        .map(|c| MORSE_CODE.lookup(c))
        .collect::<Result<Vec<_>>>()?;
    Ok(patterns.join(" "))
}

/// (dits, dahs) in a Morse rendering
pub fn count_elements(morse: &str) -> (usize, usize) {
    morse.chars().fold((0, 0), |(dits, dahs), c| match c {
        '.' => (dits + 1, dahs),
        '-' => (dits, dahs + 1),
        _ => (dits, dahs),
    })
}

pub fn phonetic(call_sign: &str) -> Result<String> {
    let words = call_sign
        .chars()
        .map(|c| PHONETIC_WORDS.lookup(c))
        .collect::<Result<Vec<_>>>()?;
    Ok(words.join(" "))
}

pub fn syllable_length(call_sign: &str) -> Result<u32> {
    syllable_length_with(call_sign, &SYLLABLE_LENGTHS)
}

/// Syllable count against a caller-supplied table
pub fn syllable_length_with(call_sign: &str, table: &CharTable<u32>) -> Result<u32> {
    call_sign
        .chars()
        .try_fold(0u32, |total, c| -> Result<u32> { Ok(total + table.lookup(c)?) })
}

/// "{prefix letters}x{suffix letters}" for `<letters><digit><letters>` call
/// signs; anything else (e.g. 2x1 with a digit suffix) yields an empty string.
pub fn format(call_sign: &str) -> String {
    match FORMAT_PATTERN.captures(call_sign) {
        Some(caps) => format!("{}x{}", caps[1].len(), caps[2].len()),
        None => String::new(),
    }
}

pub fn fcc_uls_link(system_identifier: &str) -> String {
    format!("{}{}", FCC_ULS_LICENSE_URL, system_identifier)
}

pub fn qrz_call_sign_link(call_sign: &str) -> String {
    format!("{}{}", QRZ_CALL_SIGN_URL, call_sign)
}
