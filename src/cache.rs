// Lookup cache
//
// Call sign -> {records, expires}, persisted through a KeyValueStore as
// `{"data": [...], "expires": ...}`. Entries are replaced wholesale and
// never evicted; `expires` is stored for callers and ignored here.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::db::KeyValueStore;
use crate::error::{Error, Result};
use crate::license::{parse_records, LicenseRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub records: Vec<LicenseRecord>,
    /// HTTP `expires` header as received, passed through opaquely
    pub expires: Option<String>,
}

impl CacheEntry {
    pub fn new(records: Vec<LicenseRecord>, expires: Option<String>) -> Self {
        Self { records, expires }
    }

    /// Serialize to the persisted form, derived attributes included
    pub fn to_json(&self) -> Result<String> {
        let data = self
            .records
            .iter()
            .map(|r| r.to_value(true))
            .collect::<Result<Vec<_>>>()?;
        Ok(json!({ "data": data, "expires": self.expires }).to_string())
    }

    /// Parse the persisted form. Malformed records are skipped.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let data = value
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::MalformedRecord("cache entry has no data array".to_string()))?;
        let (records, _skipped) = parse_records(data);
        let expires = value
            .get("expires")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(Self { records, expires })
    }

    /// True when `expires` is a parseable HTTP date at or before `now`.
    ///
    /// Advisory only, the cache itself never consults it.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires
            .as_deref()
            .and_then(|e| DateTime::parse_from_rfc2822(e).ok())
            .map(|expires| expires.with_timezone(&Utc) <= now)
            .unwrap_or(false)
    }
}

pub struct LookupCache<S> {
    store: S,
}

impl<S: KeyValueStore> LookupCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn get(&self, call_sign: &str) -> Result<Option<CacheEntry>> {
        match self.store.get(call_sign).await? {
            Some(text) => Ok(Some(CacheEntry::from_json(&text)?)),
            None => Ok(None),
        }
    }

    pub async fn put(
        &mut self,
        call_sign: &str,
        records: Vec<LicenseRecord>,
        expires: Option<String>,
    ) -> Result<()> {
        let entry = CacheEntry::new(records, expires);
        self.store.put(call_sign, entry.to_json()?).await?;
        log::debug!("Cached {} ({} records)", call_sign, entry.records.len());
        Ok(())
    }

    pub async fn exists(&self, call_sign: &str) -> Result<bool> {
        self.store.exists(call_sign).await
    }

    /// Every entry in storage order. Unreadable entries are skipped.
    pub async fn all(&self) -> Result<Vec<(String, CacheEntry)>> {
        let mut entries = Vec::new();
        for (call_sign, text) in self.store.entries().await? {
            match CacheEntry::from_json(&text) {
                Ok(entry) => entries.push((call_sign, entry)),
                Err(e) => log::warn!("Skipping unreadable cache entry {}: {}", call_sign, e),
            }
        }
        Ok(entries)
    }
}
