// FCC ULS Bulk Data Parser
//
// Parses the AM.dat, HD.dat and EN.dat files of the ULS amateur database.
// All three are pipe-delimited (|) and keyed by Unique System Identifier.
// REF: https://www.fcc.gov/sites/default/files/public_access_database_definitions_v9_0.pdf
//
// AM (Amateur) columns used:
// 1:  Unique System Identifier
// 4:  Call Sign
// 5:  Operator Class
// 6:  Group Code
// 7:  Region Code
// 8:  Trustee Call Sign
// 12: Systematic Call Sign Change
// 13: Vanity Call Sign Change
// 15: Previous Call Sign
// 17: Trustee Name
//
// HD (License Header) columns used:
// 1:  Unique System Identifier
// 4:  Call Sign
// 5:  License Status
// 7:  Grant Date
// 8:  Expired Date
// 9:  Cancellation Date
//
// EN (Entity) columns used, licensee (entity type L) rows only:
// 1:  Unique System Identifier
// 4:  Call Sign
// 5:  Entity Type
// 8:  First Name
// 9:  MI
// 10: Last Name
// 15: Street Address
// 16: City
// 17: State
// 18: Zip Code
// 19: PO Box
// 20: Attention Line
// 22: FCC Registration Number (FRN)

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::license::LicenseRecord;

/// Bulk files read by `load_directory`, in join order
pub const BULK_FILES: &[&str] = &["HD.dat", "AM.dat", "EN.dat"];

/// Raw fields collected for one Unique System Identifier
#[derive(Debug, Clone, Default)]
struct PartialLicense {
    has_header: bool,
    fields: Map<String, Value>,
}

impl PartialLicense {
    fn set(&mut self, key: &str, value: Option<&&str>) {
        if let Some(v) = non_empty_string(value) {
            self.fields.insert(key.to_string(), Value::String(v));
        }
    }
}

/// Joins AM/HD/EN rows into license records
#[derive(Debug, Default)]
pub struct BulkImport {
    /// Only rows for these call signs are kept; `None` keeps everything
    wanted: Option<HashSet<String>>,
    /// Unique System Identifiers in first-seen order
    order: Vec<String>,
    partial: HashMap<String, PartialLicense>,
    skipped: usize,
}

/// Records joined from bulk rows
#[derive(Debug, Default)]
pub struct BulkRecords {
    /// Records grouped per call sign, both in first-appearance order
    pub by_call_sign: Vec<(String, Vec<LicenseRecord>)>,
    /// Rows or joined records that could not be used
    pub skipped: usize,
}

impl BulkRecords {
    pub fn record_count(&self) -> usize {
        self.by_call_sign.iter().map(|(_, records)| records.len()).sum()
    }
}

impl BulkImport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the import to the given (normalized) call signs
    pub fn for_call_signs<I, S>(call_signs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            wanted: Some(call_signs.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Feed one pipe-delimited line of any of the three record types
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return;
        }

        let fields: Vec<&str> = line.split('|').collect();
        let record_type = fields[0].trim();
        if !matches!(record_type, "AM" | "HD" | "EN") {
            return;
        }

        // Record type, identifier, file number, EBF number, call sign
        if fields.len() < 5 {
            self.skipped += 1;
            return;
        }

        let call = fields[4].trim().to_uppercase();
        if let Some(wanted) = &self.wanted {
            if !wanted.contains(&call) {
                return;
            }
        }

        let usi = fields[1].trim();
        if usi.is_empty() {
            self.skipped += 1;
            return;
        }

        if record_type == "EN" && fields.get(5).map(|t| t.trim()) != Some("L") {
            return;
        }

        let partial = self.entry(usi);
        partial.set("system_identifier", Some(&usi));
        partial.set("call_sign", Some(&call.as_str()));

        match record_type {
            "AM" => {
                partial.set("operator_class", fields.get(5));
                partial.set("group_code", fields.get(6));
                partial.set("region_code", fields.get(7));
                partial.set("trustee_call_sign", fields.get(8));
                partial.set("systematic", fields.get(12));
                partial.set("vanity", fields.get(13));
                partial.set("previous_call_sign", fields.get(15));
                partial.set("trustee_name", fields.get(17));
            }
            "HD" => {
                partial.has_header = true;
                partial.set("status", fields.get(5));
                partial.set("grant_date", fields.get(7));
                partial.set("expired_date", fields.get(8));
                partial.set("cancellation_date", fields.get(9));
            }
            _ => {
                partial.set("first_name", fields.get(8));
                partial.set("middle_initial", fields.get(9));
                partial.set("last_name", fields.get(10));
                partial.set("street_address", fields.get(15));
                partial.set("city", fields.get(16));
                partial.set("state", fields.get(17));
                partial.set("zip_code", fields.get(18));
                partial.set("po_box", fields.get(19));
                partial.set("attn_line", fields.get(20));
                partial.set("frn", fields.get(22));
            }
        }
    }

    fn entry(&mut self, usi: &str) -> &mut PartialLicense {
        if !self.partial.contains_key(usi) {
            self.order.push(usi.to_string());
        }
        self.partial.entry(usi.to_string()).or_default()
    }

    /// Feed every line of a .dat file.
    ///
    /// Returns the number of lines read.
    pub fn read_dat<R: BufRead>(&mut self, reader: R) -> usize {
        let mut line_count = 0;
        for line in reader.split(b'\n') {
            line_count += 1;
            match line {
                // ULS files are not guaranteed to be valid UTF-8
                Ok(bytes) => self.push_line(&String::from_utf8_lossy(&bytes)),
                Err(_) => self.skipped += 1,
            }
        }
        line_count
    }

    /// Join the collected rows into records grouped by call sign
    pub fn finish(self) -> BulkRecords {
        let mut skipped = self.skipped;
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut by_call_sign: Vec<(String, Vec<LicenseRecord>)> = Vec::new();
        let mut partial = self.partial;

        for usi in &self.order {
            let Some(license) = partial.remove(usi) else {
                continue;
            };
            let record = if license.has_header {
                LicenseRecord::parse(&license.fields)
            } else {
                Err(Error::MalformedRecord(format!(
                    "system identifier {} has no HD record",
                    usi
                )))
            };

            match record {
                Ok(record) => {
                    let slot = *positions.entry(record.call_sign.clone()).or_insert_with(|| {
                        by_call_sign.push((record.call_sign.clone(), Vec::new()));
                        by_call_sign.len() - 1
                    });
                    by_call_sign[slot].1.push(record);
                }
                Err(e) => {
                    log::warn!("Skipping bulk license {}: {}", usi, e);
                    skipped += 1;
                }
            }
        }

        BulkRecords { by_call_sign, skipped }
    }
}

/// Parse the unpacked AM/HD/EN files in `dir`.
///
/// When `call_signs` is given only those call signs are kept.
pub fn load_directory(dir: &Path, call_signs: Option<&[String]>) -> Result<BulkRecords> {
    let mut import = match call_signs {
        Some(calls) => BulkImport::for_call_signs(calls.iter().cloned()),
        None => BulkImport::new(),
    };

    for name in BULK_FILES {
        let path = dir.join(name);
        log::info!("Parsing FCC bulk file: {:?}", path);
        let file = File::open(&path)?;
        let lines = import.read_dat(BufReader::new(file));
        log::info!("Read {} lines from {}", lines, name);
    }

    let records = import.finish();
    log::info!(
        "Joined {} bulk records for {} call signs, {} skipped",
        records.record_count(),
        records.by_call_sign.len(),
        records.skipped
    );
    Ok(records)
}

/// Helper to convert empty strings to None
fn non_empty_string(s: Option<&&str>) -> Option<String> {
    s.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
