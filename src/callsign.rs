// Call sign input normalization
//
// User input is filtered down to ASCII letters and digits and uppercased.
// Characters outside [A-Za-z0-9] are dropped, never transliterated.

/// Normalize raw user input into a lookup key.
///
/// An empty result means there is nothing to look up and the caller should
/// not start a lookup at all.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// True when `call_sign` is non-empty and only holds uppercase ASCII letters and digits
pub fn is_normalized(call_sign: &str) -> bool {
    !call_sign.is_empty()
        && call_sign
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}
