// Application context
//
// Owns the configuration and the lookup orchestrator (which in turn owns
// the cache, history and HTTP clients). Built once by the binary and
// passed down explicitly.

use std::path::Path;

use crate::cache::LookupCache;
use crate::config::AppConfig;
use crate::db::{KeyValueStore, SqliteStore};
use crate::error::Result;
use crate::fcc::{self, BulkRecords};
use crate::lookup::{
    CallsignsClient, LicenseViewClient, LookupOrchestrator, PrimaryService, RegistryService,
};

pub struct AppContext<S = SqliteStore, P = CallsignsClient, R = LicenseViewClient> {
    pub config: AppConfig,
    pub lookups: LookupOrchestrator<S, P, R>,
}

impl AppContext {
    /// Open the database, rehydrate history and build the HTTP clients
    pub async fn init(config: AppConfig) -> Result<Self> {
        let store = SqliteStore::open(&config.database_path).await?;
        let primary = CallsignsClient::new(&config)?;
        let registry = LicenseViewClient::new(&config)?;
        let lookups = LookupOrchestrator::start(LookupCache::new(store), primary, registry)
            .await?
            .with_fallback_match(config.fallback_match);
        Ok(Self { config, lookups })
    }
}

impl<S, P, R> AppContext<S, P, R>
where
    S: KeyValueStore,
    P: PrimaryService,
    R: RegistryService,
{
    pub fn new(config: AppConfig, lookups: LookupOrchestrator<S, P, R>) -> Self {
        let lookups = lookups.with_fallback_match(config.fallback_match);
        Self { config, lookups }
    }

    /// Import bulk records for `call_signs` from unpacked AM/HD/EN files.
    ///
    /// Returns the number of call signs stored.
    pub async fn import_bulk(&mut self, dir: &Path, call_signs: &[String]) -> Result<usize> {
        let dir = dir.to_path_buf();
        let wanted = call_signs.to_vec();
        let records = tokio::task::spawn_blocking(move || fcc::load_directory(&dir, Some(wanted.as_slice())))
            .await
            .map_err(|e| crate::error::Error::Io(std::io::Error::other(e)))??;
        self.store_bulk(records).await
    }

    /// Download and unpack the bulk archive, then import `call_signs` from it.
    ///
    /// With no call signs the files are only unpacked, for a later `import_bulk`.
    pub async fn sync(&mut self, call_signs: &[String]) -> Result<usize> {
        let data_dir = self.config.data_dir();
        if call_signs.is_empty() {
            let fcc_dir = fcc::download_bulk_database(&self.config, &data_dir).await?;
            log::info!("FCC bulk files unpacked to {}", fcc_dir.display());
            return Ok(0);
        }
        let records = fcc::sync_bulk_database(&self.config, &data_dir, Some(call_signs)).await?;
        self.store_bulk(records).await
    }

    async fn store_bulk(&mut self, records: BulkRecords) -> Result<usize> {
        if records.skipped > 0 {
            log::warn!("Bulk import skipped {} malformed records", records.skipped);
        }
        let count = records.by_call_sign.len();
        for (call_sign, licenses) in records.by_call_sign {
            self.lookups.import_records(&call_sign, licenses).await?;
        }
        log::info!("Imported {} call signs from bulk data", count);
        Ok(count)
    }
}
