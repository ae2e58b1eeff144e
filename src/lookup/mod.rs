// Call sign lookup workflow
//
// Cache first, then the primary lookup service. A primary miss can be
// followed by an explicit registry fallback, whose result is shown but
// neither cached nor added to history. Nothing is retried automatically.

pub mod client;
pub mod registry;
pub mod state;

pub use client::{CallsignsClient, LicenseViewClient};
pub use registry::{select_registry_license, FallbackMatch, RegistryLicense};
pub use state::{LookupFailure, LookupOutcome, LookupState};

use serde_json::Value;

use crate::cache::LookupCache;
use crate::callsign::normalize;
use crate::db::KeyValueStore;
use crate::error::{Error, Result};
use crate::history::HistoryLedger;
use crate::license::{parse_records, LicenseRecord};

/// Raw primary service response
#[derive(Debug, Clone, Default)]
pub struct PrimaryResponse {
    pub records: Vec<Value>,
    /// `expires` response header, passed through opaquely
    pub expires: Option<String>,
}

/// The callsigns lookup service
#[allow(async_fn_in_trait)]
pub trait PrimaryService {
    /// `Error::NotFound` for any non-200 answer or unreadable body,
    /// `Error::Transport` when the request itself fails
    async fn fetch(&self, call_sign: &str) -> Result<PrimaryResponse>;
}

/// The FCC License View registry search
#[allow(async_fn_in_trait)]
pub trait RegistryService {
    async fn search(&self, call_sign: &str) -> Result<Value>;
}

/// Drives one lookup at a time through the cache, the primary service and
/// the optional registry fallback.
///
/// Taking `&mut self` serializes lookups and cache writes per orchestrator.
pub struct LookupOrchestrator<S, P, R> {
    cache: LookupCache<S>,
    history: HistoryLedger,
    primary: P,
    registry: R,
    fallback_match: FallbackMatch,
    state: LookupState,
}

impl<S, P, R> LookupOrchestrator<S, P, R>
where
    S: KeyValueStore,
    P: PrimaryService,
    R: RegistryService,
{
    pub fn new(cache: LookupCache<S>, history: HistoryLedger, primary: P, registry: R) -> Self {
        Self {
            cache,
            history,
            primary,
            registry,
            fallback_match: FallbackMatch::default(),
            state: LookupState::Idle,
        }
    }

    /// Build with history rehydrated from the cache
    pub async fn start(cache: LookupCache<S>, primary: P, registry: R) -> Result<Self> {
        let history = HistoryLedger::rehydrate(&cache).await?;
        Ok(Self::new(cache, history, primary, registry))
    }

    pub fn with_fallback_match(mut self, policy: FallbackMatch) -> Self {
        self.fallback_match = policy;
        self
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    pub fn cache(&self) -> &LookupCache<S> {
        &self.cache
    }

    pub fn fallback_match(&self) -> FallbackMatch {
        self.fallback_match
    }

    fn transition(&mut self, next: LookupState) {
        log::debug!(
            "lookup {}: {} -> {}",
            next.call_sign().or(self.state.call_sign()).unwrap_or("-"),
            self.state.name(),
            next.name()
        );
        self.state = next;
    }

    /// Look up `raw_call_sign`, normalizing it first.
    ///
    /// Lookup misses end in `Failed`; `Err` is reserved for local faults
    /// such as a store write failing. Input that normalizes to nothing
    /// leaves the orchestrator `Idle`.
    pub async fn lookup(&mut self, raw_call_sign: &str) -> Result<&LookupState> {
        let call_sign = normalize(raw_call_sign);
        if call_sign.is_empty() {
            log::debug!("Ignoring lookup for empty call sign {:?}", raw_call_sign);
            self.transition(LookupState::Idle);
            return Ok(&self.state);
        }

        self.transition(LookupState::CacheCheck { call_sign: call_sign.clone() });
        let cached = match self.cache.get(&call_sign).await {
            Ok(cached) => cached,
            // An unreadable row is a miss; the fetch below replaces it
            Err(e @ (Error::MalformedRecord(_) | Error::Serialization(_))) => {
                log::warn!("Ignoring unreadable cache entry for {}: {}", call_sign, e);
                None
            }
            Err(e) => {
                self.transition(LookupState::Idle);
                return Err(e);
            }
        };
        if let Some(entry) = cached {
            log::info!("{} served from cache ({} records)", call_sign, entry.records.len());
            self.history.append(&call_sign, entry.records.clone());
            self.transition(LookupState::Succeeded {
                call_sign,
                outcome: LookupOutcome::Cached(entry.records),
            });
            return Ok(&self.state);
        }

        self.transition(LookupState::PrimaryFetch { call_sign: call_sign.clone() });
        let response = match self.primary.fetch(&call_sign).await {
            Ok(response) => response,
            Err(e) => {
                log::info!("Primary lookup for {} failed: {}", call_sign, e);
                self.transition(LookupState::Failed {
                    call_sign,
                    failure: LookupFailure::NotFound,
                    detail: e.to_string(),
                });
                return Ok(&self.state);
            }
        };

        let (records, skipped) = parse_records(&response.records);
        if records.is_empty() {
            let detail = format!("no usable records ({} malformed)", skipped);
            log::info!("Primary lookup for {} returned {}", call_sign, detail);
            self.transition(LookupState::Failed {
                call_sign,
                failure: LookupFailure::NotFound,
                detail,
            });
            return Ok(&self.state);
        }

        if let Err(e) = self
            .cache
            .put(&call_sign, records.clone(), response.expires)
            .await
        {
            log::error!("Failed to cache {}: {}", call_sign, e);
            self.transition(LookupState::Idle);
            return Err(e);
        }
        self.history.append(&call_sign, records.clone());
        log::info!("{} fetched ({} records)", call_sign, records.len());
        self.transition(LookupState::Succeeded {
            call_sign,
            outcome: LookupOutcome::Fetched(records),
        });
        Ok(&self.state)
    }

    /// Query the registry for the call sign of the last failed lookup.
    ///
    /// Only valid from `Failed(NotFound)`; otherwise `Error::NoPendingFallback`.
    pub async fn fallback_lookup(&mut self) -> Result<&LookupState> {
        let call_sign = match &self.state {
            LookupState::Failed { call_sign, failure: LookupFailure::NotFound, .. } => call_sign.clone(),
            _ => return Err(Error::NoPendingFallback),
        };

        self.transition(LookupState::FallbackFetch { call_sign: call_sign.clone() });
        let result = match self.registry.search(&call_sign).await {
            Ok(response) => select_registry_license(&response, &call_sign, self.fallback_match),
            Err(e) => Err(e),
        };

        match result {
            Ok(license) => {
                if license.call_sign != call_sign {
                    log::warn!(
                        "Registry fallback for {} returned {} (unverified first match)",
                        call_sign,
                        license.call_sign
                    );
                }
                self.transition(LookupState::Succeeded {
                    call_sign,
                    outcome: LookupOutcome::Registry(license),
                });
            }
            Err(e) => {
                log::info!("Registry fallback for {} failed: {}", call_sign, e);
                self.transition(LookupState::Failed {
                    call_sign,
                    failure: LookupFailure::FallbackNotFound,
                    detail: e.to_string(),
                });
            }
        }
        Ok(&self.state)
    }

    /// Store records obtained elsewhere (bulk import) as if fetched
    pub async fn import_records(&mut self, call_sign: &str, records: Vec<LicenseRecord>) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        self.cache.put(call_sign, records.clone(), None).await?;
        self.history.append(call_sign, records);
        Ok(())
    }
}
