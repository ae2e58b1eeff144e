// Lookup history
//
// One entry per successful lookup, in the order they completed. Rebuilt
// at startup by replaying the cache in storage order.

use serde::Serialize;

use crate::cache::LookupCache;
use crate::db::KeyValueStore;
use crate::error::Result;
use crate::license::{current_record, LicenseRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub call_sign: String,
    pub display_name: String,
    pub records: Vec<LicenseRecord>,
}

#[derive(Debug, Default, Clone)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay every cache entry, in storage order
    pub async fn rehydrate<S: KeyValueStore>(cache: &LookupCache<S>) -> Result<Self> {
        let mut ledger = Self::new();
        for (call_sign, entry) in cache.all().await? {
            ledger.append(&call_sign, entry.records);
        }
        log::info!("Rehydrated {} history entries", ledger.len());
        Ok(ledger)
    }

    pub fn append(&mut self, call_sign: &str, records: Vec<LicenseRecord>) {
        let display_name = current_record(&records)
            .map(LicenseRecord::display_name)
            .unwrap_or_default();
        self.entries.push(HistoryEntry {
            call_sign: call_sign.to_string(),
            display_name,
            records,
        });
    }

    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
