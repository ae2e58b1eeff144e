// FCC Bulk Database Download Module
//
// Downloads the FCC ULS amateur license database (l_amat.zip)
// and extracts the AM, HD and EN record files for offline import.

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use reqwest::Client;
use tokio::fs;
use zip::ZipArchive;

use super::parser::BULK_FILES;
use crate::config::AppConfig;
use crate::error::{Error, Result};

/// Download the FCC amateur license archive into `data_dir/fcc_cache`
///
/// Returns the directory holding the extracted .dat files
pub async fn download_bulk_database(config: &AppConfig, data_dir: &Path) -> Result<PathBuf> {
    log::info!("Starting FCC database download from {}", config.bulk_archive_url);

    let fcc_dir = data_dir.join("fcc_cache");
    fs::create_dir_all(&fcc_dir).await?;

    // The archive is large; allow far longer than a single lookup
    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(std::time::Duration::from_secs(300))
        .build()
        .map_err(|e| Error::Transport(format!("failed to create HTTP client: {}", e)))?;

    let response = client
        .get(&config.bulk_archive_url)
        .send()
        .await
        .map_err(|e| Error::Transport(format!("failed to download FCC database: {}", e)))?;

    if !response.status().is_success() {
        return Err(Error::Transport(format!(
            "FCC download failed with status: {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Transport(format!("failed to read FCC database response: {}", e)))?;

    log::info!("Downloaded {} bytes, extracting...", bytes.len());

    // Extract synchronously using spawn_blocking since zip types aren't Send
    let fcc_dir_clone = fcc_dir.clone();
    let bytes_vec = bytes.to_vec();
    tokio::task::spawn_blocking(move || extract_bulk_files(&bytes_vec, &fcc_dir_clone))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))??;

    Ok(fcc_dir)
}

/// Extract the AM/HD/EN .dat files from an l_amat.zip archive
pub fn extract_bulk_files(bytes: &[u8], fcc_dir: &Path) -> Result<()> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut found: Vec<&str> = Vec::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let name = file.name().to_uppercase();

        let Some(target) = BULK_FILES.iter().copied().find(|f| f.to_uppercase() == name) else {
            continue;
        };

        log::info!("Extracting {} ({} bytes compressed)", target, file.compressed_size());
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        std::fs::write(fcc_dir.join(target), &contents)?;
        log::info!("Extracted {}: {} bytes", target, contents.len());
        found.push(target);
    }

    let missing: Vec<&str> = BULK_FILES
        .iter()
        .copied()
        .filter(|f| !found.contains(f))
        .collect();
    if !missing.is_empty() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found in FCC archive", missing.join(", ")),
        )));
    }

    Ok(())
}
