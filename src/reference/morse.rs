// International Morse Code for letters and digits

use super::CharTable;

pub const MORSE_CODE: CharTable<&str> = CharTable::new(
    "morse",
    &[
        ('A', ".-"),
        ('B', "-..."),
        ('C', "-.-."),
        ('D', "-.."),
        ('E', "."),
        ('F', "..-."),
        ('G', "--."),
        ('H', "...."),
        ('I', ".."),
        ('J', ".---"),
        ('K', "-.-"),
        ('L', ".-.."),
        ('M', "--"),
        ('N', "-."),
        ('O', "---"),
        ('P', ".--."),
        ('Q', "--.-"),
        ('R', ".-."),
        ('S', "..."),
        ('T', "-"),
        ('U', "..-"),
        ('V', "...-"),
        ('W', ".--"),
        ('X', "-..-"),
        ('Y', "-.--"),
        ('Z', "--.."),
        ('0', "-----"),
        ('1', ".----"),
        ('2', "..---"),
        ('3', "...--"),
        ('4', "....-"),
        ('5', "....."),
        ('6', "-...."),
        ('7', "--..."),
        ('8', "---.."),
        ('9', "----."),
    ],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_only_use_dits_and_dahs() {
        for (c, pattern) in MORSE_CODE.entries {
            assert!(!pattern.is_empty(), "{} has empty pattern", c);
            assert!(pattern.chars().all(|s| s == '.' || s == '-'), "{} -> {}", c, pattern);
        }
    }

    #[test]
    fn test_digits_are_five_elements() {
        for d in '0'..='9' {
            assert_eq!(MORSE_CODE.get(d).map(str::len), Some(5));
        }
    }
}
