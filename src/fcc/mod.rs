// FCC Amateur License Database Module
//
// Downloads and reads the FCC ULS amateur license database for offline
// call sign lookups when the primary service is unreachable.
//
// Data source: https://data.fcc.gov/download/pub/uls/complete/l_amat.zip

mod download;
mod parser;

use std::path::Path;

pub use download::{download_bulk_database, extract_bulk_files};
pub use parser::{load_directory, BulkImport, BulkRecords, BULK_FILES};

use crate::config::AppConfig;
use crate::error::Result;

/// Download the bulk archive and read the records for `call_signs`
/// (every call sign in the archive when `None`)
pub async fn sync_bulk_database(
    config: &AppConfig,
    data_dir: &Path,
    call_signs: Option<&[String]>,
) -> Result<BulkRecords> {
    let fcc_dir = download_bulk_database(config, data_dir).await?;

    let dir = fcc_dir.clone();
    let wanted = call_signs.map(|calls| calls.to_vec());
    let records = tokio::task::spawn_blocking(move || load_directory(&dir, wanted.as_deref()))
        .await
        .map_err(|e| crate::error::Error::Io(std::io::Error::other(e)))??;

    log::info!(
        "FCC sync complete: {} records for {} call signs from {}",
        records.record_count(),
        records.by_call_sign.len(),
        fcc_dir.display()
    );
    Ok(records)
}
