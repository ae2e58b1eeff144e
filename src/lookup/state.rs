// =============================================================================
// Lookup State Machine - States and Outcomes
// =============================================================================

use serde::Serialize;

use super::registry::RegistryLicense;
use crate::license::{current_record, LicenseRecord};

/// The current state of a lookup
///
/// ```text
/// Idle -> CacheCheck -> Succeeded(Cached)
///                    -> PrimaryFetch -> Succeeded(Fetched)
///                                    -> Failed(NotFound) -> FallbackFetch -> Succeeded(Registry)
///                                                                         -> Failed(FallbackNotFound)
/// ```
///
/// The fallback is only entered when the caller asks for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LookupState {
    Idle,
    CacheCheck { call_sign: String },
    PrimaryFetch { call_sign: String },
    FallbackFetch { call_sign: String },
    Succeeded { call_sign: String, outcome: LookupOutcome },
    Failed { call_sign: String, failure: LookupFailure, detail: String },
}

impl LookupState {
    pub fn name(&self) -> &'static str {
        match self {
            LookupState::Idle => "Idle",
            LookupState::CacheCheck { .. } => "CacheCheck",
            LookupState::PrimaryFetch { .. } => "PrimaryFetch",
            LookupState::FallbackFetch { .. } => "FallbackFetch",
            LookupState::Succeeded { .. } => "Succeeded",
            LookupState::Failed { .. } => "Failed",
        }
    }

    pub fn call_sign(&self) -> Option<&str> {
        match self {
            LookupState::Idle => None,
            LookupState::CacheCheck { call_sign }
            | LookupState::PrimaryFetch { call_sign }
            | LookupState::FallbackFetch { call_sign }
            | LookupState::Succeeded { call_sign, .. }
            | LookupState::Failed { call_sign, .. } => Some(call_sign),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, LookupState::Succeeded { .. } | LookupState::Failed { .. })
    }

    /// True when a registry fallback may be requested
    pub fn awaits_fallback(&self) -> bool {
        matches!(
            self,
            LookupState::Failed { failure: LookupFailure::NotFound, .. }
        )
    }
}

/// What a successful lookup produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LookupOutcome {
    /// Served from the cache, no network request
    Cached(Vec<LicenseRecord>),
    /// Fetched from the primary service, now cached and in history
    Fetched(Vec<LicenseRecord>),
    /// Registry fallback result; neither cached nor in history
    Registry(RegistryLicense),
}

impl LookupOutcome {
    /// License records, empty for a registry result
    pub fn records(&self) -> &[LicenseRecord] {
        match self {
            LookupOutcome::Cached(records) | LookupOutcome::Fetched(records) => records,
            LookupOutcome::Registry(_) => &[],
        }
    }

    pub fn current_record(&self) -> Option<&LicenseRecord> {
        current_record(self.records())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LookupFailure {
    NotFound,
    FallbackNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license::tests::sample_record;

    #[test]
    fn test_state_helpers() {
        assert_eq!(LookupState::Idle.name(), "Idle");
        assert_eq!(LookupState::Idle.call_sign(), None);
        assert!(!LookupState::Idle.is_terminal());

        let failed = LookupState::Failed {
            call_sign: "ZZ9ZZZ".to_string(),
            failure: LookupFailure::NotFound,
            detail: "HTTP 404".to_string(),
        };
        assert!(failed.is_terminal());
        assert!(failed.awaits_fallback());
        assert_eq!(failed.call_sign(), Some("ZZ9ZZZ"));

        let fallback_failed = LookupState::Failed {
            call_sign: "ZZ9ZZZ".to_string(),
            failure: LookupFailure::FallbackNotFound,
            detail: String::new(),
        };
        assert!(!fallback_failed.awaits_fallback());
    }

    #[test]
    fn test_outcome_current_record() {
        let outcome = LookupOutcome::Fetched(vec![
            sample_record("KK7LHM", "John"),
            sample_record("KK7LHM", "Jane"),
        ]);
        assert_eq!(
            outcome.current_record().and_then(|r| r.first_name.as_deref()),
            Some("Jane")
        );
        assert!(LookupOutcome::Registry(RegistryLicense::default())
            .current_record()
            .is_none());
    }
}
