// Spoken syllable count of each phonetic word

use super::CharTable;

pub const SYLLABLE_LENGTHS: CharTable<u32> = CharTable::new(
    "syllables",
    &[
        ('A', 2),
        ('B', 2),
        ('C', 2),
        ('D', 2),
        ('E', 2),
        ('F', 2),
        ('G', 1),
        ('H', 2),
        ('I', 3),
        ('J', 3),
        ('K', 2),
        ('L', 2),
        ('M', 1),
        ('N', 3),
        ('O', 2),
        ('P', 2),
        ('Q', 2),
        ('R', 3),
        ('S', 3),
        ('T', 2),
        ('U', 3),
        ('V', 2),
        ('W', 2),
        ('X', 2),
        ('Y', 2),
        ('Z', 2),
        ('0', 2),
        ('1', 1),
        ('2', 1),
        ('3', 1),
        ('4', 1),
        ('5', 1),
        ('6', 1),
        ('7', 2),
        ('8', 1),
        // "Niner"; plain "nine" would be a single syllable
        ('9', 2),
    ],
);
