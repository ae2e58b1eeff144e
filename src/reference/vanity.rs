// Call signs unavailable to vanity applicants
// Source: "Call Sign Choices Not Available", http://www.arrl.org/vanity-call-signs
//
// Rules are evaluated in list order and the first match wins. Input must
// already be normalized (uppercase), matching is case-sensitive.

use lazy_static::lazy_static;
use regex::Regex;

/// One FCC-reserved call sign shape
#[derive(Debug, Clone)]
pub struct ReservedRule {
    pub pattern: &'static str,
    pub description: &'static str,
}

pub const RESERVED_RULES: &[ReservedRule] = &[
    // 1. KA2AA-KA9ZZ, KC4AAA-KC4AAF, KC4USA-KC4USZ, KG4AA-KG4ZZ, KC6AA-KC6ZZ,
    //    KL9KAA-KL9KHZ, KX6AA-KX6ZZ
    ReservedRule { pattern: r"^KA[2-9][A-Z][A-Z]$", description: "KA2AA-KA9ZZ block" },
    ReservedRule { pattern: r"^KC4AA[A-F]$", description: "KC4AAA-KC4AAF block" },
    ReservedRule { pattern: r"^KC4US[A-Z]$", description: "KC4USA-KC4USZ block" },
    ReservedRule { pattern: r"^KG4[A-Z][A-Z]$", description: "KG4AA-KG4ZZ block" },
    ReservedRule { pattern: r"^KC6[A-Z][A-Z]$", description: "KC6AA-KC6ZZ block" },
    ReservedRule { pattern: r"^KL9K[A-H][A-Z]$", description: "KL9KAA-KL9KHZ block" },
    ReservedRule { pattern: r"^KX6[A-Z][A-Z]$", description: "KX6AA-KX6ZZ block" },
    // 2.
    ReservedRule {
        pattern: r"[A-Z]{1,2}\d(?:SOS|Q[R-U][A-Z])$",
        description: "SOS or QRA-QUZ suffix",
    },
    // 3.
    ReservedRule { pattern: r"^A[M-Z]\d[A-Z]+$", description: "AM-AZ prefix" },
    // 4.
    ReservedRule {
        pattern: r"^[A-Z]{2}\dX[A-Z]{2}$",
        description: "2x3 with X as first suffix letter",
    },
    // 5.
    ReservedRule {
        pattern: r"^[AKNW]F\dEMA$",
        description: "2x3 with AF, KF, NF or WF prefix and EMA suffix",
    },
    // 6.
    ReservedRule { pattern: r"^A[A-L]\d[A-Z]{3}$", description: "2x3 with AA-AL prefix" },
    // 7.
    ReservedRule { pattern: r"^N[A-Z]\d[A-Z]{3}$", description: "2x3 with NA-NZ prefix" },
    // 8. Group X
    ReservedRule {
        pattern: r"^W[CKMRT]\d[A-Z]{3}$",
        description: "2x3 with WC, WK, WM, WR or WT prefix",
    },
    // 9-11. 2x3, 2x2 and 2x1
    ReservedRule {
        pattern: r"^[KNW]P[06789][A-Z]{1,3}$",
        description: "KP, NP or WP prefix with numeral 0, 6, 7, 8 or 9",
    },
    // 12.
    ReservedRule {
        pattern: r"^[KNW]\d[A-Z]$",
        description: "1x1 with K, N or W prefix",
    },
];

lazy_static! {
    static ref COMPILED_RULES: Vec<Regex> = RESERVED_RULES
        .iter()
        .map(|rule| Regex::new(rule.pattern).expect("reserved call sign pattern is valid"))
        .collect();
}

fn compiled_rules() -> &'static [Regex] {
    &COMPILED_RULES
}

/// The first reserved rule matching `call_sign`, if any
pub fn matching_rule(call_sign: &str) -> Option<&'static ReservedRule> {
    compiled_rules()
        .iter()
        .position(|re| re.is_match(call_sign))
        .map(|i| &RESERVED_RULES[i])
}

/// True if `call_sign` falls in an FCC-reserved shape
pub fn is_reserved(call_sign: &str) -> bool {
    matching_rule(call_sign).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_reserved(calls: &[&str], expected_rule: &str) {
        for call in calls {
            let rule = matching_rule(call);
            assert!(rule.is_some(), "{} should be reserved", call);
            assert_eq!(rule.unwrap().description, expected_rule, "rule for {}", call);
        }
    }

    fn assert_available(calls: &[&str]) {
        for call in calls {
            assert!(
                !is_reserved(call),
                "{} should be available, matched {:?}",
                call,
                matching_rule(call)
            );
        }
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(compiled_rules().len(), RESERVED_RULES.len());
    }

    #[test]
    fn test_spot_checks() {
        assert!(is_reserved("KA2AA"));
        assert!(!is_reserved("KK7LHM"));
        assert!(!is_reserved("W1AW"));
    }

    #[test]
    fn test_special_blocks() {
        assert_reserved(&["KA2AA", "KA5MM", "KA9ZZ"], "KA2AA-KA9ZZ block");
        assert_reserved(&["KC4AAA", "KC4AAF"], "KC4AAA-KC4AAF block");
        assert_reserved(&["KC4USA", "KC4USZ"], "KC4USA-KC4USZ block");
        assert_reserved(&["KG4AA", "KG4ZZ"], "KG4AA-KG4ZZ block");
        assert_reserved(&["KC6AA", "KC6ZZ"], "KC6AA-KC6ZZ block");
        assert_reserved(&["KL9KAA", "KL9KHZ"], "KL9KAA-KL9KHZ block");
        assert_reserved(&["KX6AA", "KX6ZZ"], "KX6AA-KX6ZZ block");

        assert_available(&["KA1AA", "KA2AAA", "KC4AAG", "KC4UTA", "KG4ABC", "KL9KIA", "KX6ABC"]);
    }

    #[test]
    fn test_distress_and_q_signal_suffixes() {
        assert_reserved(&["W1SOS", "KK7SOS", "K1QRA", "KK7QSL", "N0QUZ"], "SOS or QRA-QUZ suffix");
        assert_available(&["K1QAA", "K1QVA", "KK7SOT"]);
    }

    #[test]
    fn test_am_az_prefix() {
        assert_reserved(&["AM1A", "AN2AB", "AZ9ZZZ"], "AM-AZ prefix");
        assert_available(&["AL7AB"]);
    }

    #[test]
    fn test_x_suffix_2x3() {
        assert_reserved(&["KK7XAB", "WB2XYZ"], "2x3 with X as first suffix letter");
        assert_available(&["KK7XA", "K7XAB"]);
    }

    #[test]
    fn test_ema_suffix() {
        assert_reserved(&["KF2EMA", "NF3EMA", "WF4EMA"], "2x3 with AF, KF, NF or WF prefix and EMA suffix");
        // AF is also an AA-AL prefix, which takes the later rule for other suffixes
        assert!(is_reserved("AF1EMA"));
        assert_available(&["KF4EMB", "WF4EMB", "KE4EMA"]);
    }

    #[test]
    fn test_aa_al_prefix_2x3() {
        assert_reserved(&["AA0ZZZ", "AE7ABC", "AL7ABC"], "2x3 with AA-AL prefix");
        assert_available(&["AA0ZZ", "AA0Z"]);
    }

    #[test]
    fn test_na_nz_prefix_2x3() {
        assert_reserved(&["NA1ABC", "NZ9ZZZ"], "2x3 with NA-NZ prefix");
        assert_available(&["NA1AB", "N1ABC"]);
    }

    #[test]
    fn test_group_x_prefixes() {
        assert_reserved(
            &["WC1ABC", "WK2ABC", "WM3ABC", "WR4ABC", "WT5ABC"],
            "2x3 with WC, WK, WM, WR or WT prefix",
        );
        assert_available(&["WA1ABC", "WC1AB"]);
    }

    #[test]
    fn test_caribbean_prefixes_with_reserved_numerals() {
        assert_reserved(
            &["KP0ABC", "NP6AB", "WP7A", "KP8AB", "KP9ABC"],
            "KP, NP or WP prefix with numeral 0, 6, 7, 8 or 9",
        );
        assert_available(&["KP4ABC", "KP2A", "NP3AB"]);
    }

    #[test]
    fn test_1x1_calls() {
        assert_reserved(&["K1A", "N0Z", "W9X"], "1x1 with K, N or W prefix");
        assert_available(&["K1AB", "A1A"]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(is_reserved("KA2AA"));
        assert!(!is_reserved("ka2aa"));
    }
}
