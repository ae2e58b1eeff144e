// FCC Amateur License Record
//
// One licensee entry as served by the callsigns lookup service, read back
// from the lookup cache, or assembled from ULS bulk AM/HD/EN rows.
// Derived analysis (Morse, phonetic, format, syllables, links) is computed
// on demand from the call sign and never stored on the record.

pub mod derived;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::callsign::is_normalized;
use crate::error::{Error, Result};
use crate::reference::codes::{LicenseStatus, OperatorClass};
use crate::reference::CharTable;

/// Represents one FCC amateur license entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LicenseRecord {
    pub call_sign: String,
    pub status: LicenseStatus,
    pub frn: Option<String>,
    pub system_identifier: String,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub street_address: Option<String>,
    pub attn_line: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub po_box: Option<String>,
    pub grant_date: Option<String>,
    pub expired_date: Option<String>,
    pub cancellation_date: Option<String>,
    pub operator_class: Option<OperatorClass>,
    pub group_code: Option<String>,
    pub trustee_call_sign: Option<String>,
    pub trustee_name: Option<String>,
    pub previous_call_sign: Option<String>,
    pub region_code: Option<String>,
    pub vanity: Option<bool>,
    pub systematic: Option<bool>,
}

impl LicenseRecord {
    /// Build a record from a flat field map.
    ///
    /// Accepts the lookup service JSON shape and the cached shape (derived
    /// keys in the map are ignored). Only `call_sign` is required.
    pub fn parse(fields: &Map<String, Value>) -> Result<Self> {
        let call_sign = text(fields, "call_sign")
            .ok_or_else(|| Error::MalformedRecord("missing call_sign".to_string()))?
            .to_ascii_uppercase();
        if !is_normalized(&call_sign) {
            return Err(Error::MalformedRecord(format!(
                "call_sign {:?} is not uppercase alphanumeric",
                call_sign
            )));
        }

        Ok(Self {
            status: LicenseStatus::from_code(&text(fields, "status").unwrap_or_default()),
            frn: text(fields, "frn"),
            system_identifier: text(fields, "system_identifier").unwrap_or_default(),
            first_name: text(fields, "first_name"),
            middle_initial: text(fields, "middle_initial"),
            last_name: text(fields, "last_name"),
            street_address: text(fields, "street_address"),
            attn_line: text(fields, "attn_line"),
            city: text(fields, "city"),
            state: text(fields, "state"),
            zip_code: text(fields, "zip_code"),
            po_box: text(fields, "po_box"),
            grant_date: text(fields, "grant_date"),
            expired_date: text(fields, "expired_date"),
            cancellation_date: text(fields, "cancellation_date"),
            operator_class: text(fields, "operator_class").map(|c| OperatorClass::from_code(&c)),
            group_code: text(fields, "group_code"),
            trustee_call_sign: text(fields, "trustee_call_sign"),
            trustee_name: text(fields, "trustee_name"),
            previous_call_sign: text(fields, "previous_call_sign"),
            region_code: text(fields, "region_code"),
            vanity: flag(fields, "vanity"),
            systematic: flag(fields, "systematic"),
            call_sign,
        })
    }

    /// Parse a JSON value, which must be an object
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Self::parse(fields),
            other => Err(Error::MalformedRecord(format!(
                "expected an object, got {}",
                json_type(other)
            ))),
        }
    }

    /// Flat field map, with the derived attributes added when `include_derived`.
    ///
    /// Derived values that cannot be computed are left out.
    pub fn to_value(&self, include_derived: bool) -> Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if include_derived {
            if let Value::Object(map) = &mut value {
                self.insert_derived(map);
            }
        }
        Ok(value)
    }

    fn insert_derived(&self, map: &mut Map<String, Value>) {
        match self.call_sign_morse() {
            Ok(morse) => {
                let (dits, dahs) = derived::count_elements(&morse);
                map.insert("call_sign_morse".into(), Value::from(morse));
                map.insert("morse_dits".into(), Value::from(dits));
                map.insert("morse_dahs".into(), Value::from(dahs));
            }
            Err(e) => log::warn!("Skipping Morse for {}: {}", self.call_sign, e),
        }
        map.insert("format".into(), Value::from(self.format()));
        match self.phonetic() {
            Ok(phonetic) => {
                map.insert("phonetic".into(), Value::from(phonetic));
            }
            Err(e) => log::warn!("Skipping phonetic for {}: {}", self.call_sign, e),
        }
        if let Ok(syllables) = self.syllable_length() {
            map.insert("syllable_length".into(), Value::from(syllables));
        }
        map.insert("fcc_uls_link".into(), Value::from(self.fcc_uls_link()));
        map.insert("qrz_call_sign_link".into(), Value::from(self.qrz_call_sign_link()));
    }

    // ------------------------------------------------------------------------
    // Derived attributes
    // ------------------------------------------------------------------------

    pub fn call_sign_morse(&self) -> Result<String> {
        derived::morse(&self.call_sign)
    }

    pub fn morse_dits(&self) -> Result<usize> {
        Ok(derived::count_elements(&self.call_sign_morse()?).0)
    }

    pub fn morse_dahs(&self) -> Result<usize> {
        Ok(derived::count_elements(&self.call_sign_morse()?).1)
    }

    /// "2x3" style format, or empty when the call sign is not letters-digit-letters
    pub fn format(&self) -> String {
        derived::format(&self.call_sign)
    }

    pub fn phonetic(&self) -> Result<String> {
        derived::phonetic(&self.call_sign)
    }

    pub fn syllable_length(&self) -> Result<u32> {
        derived::syllable_length(&self.call_sign)
    }

    pub fn syllable_length_with(&self, table: &CharTable<u32>) -> Result<u32> {
        derived::syllable_length_with(&self.call_sign, table)
    }

    pub fn fcc_uls_link(&self) -> String {
        derived::fcc_uls_link(&self.system_identifier)
    }

    pub fn qrz_call_sign_link(&self) -> String {
        derived::qrz_call_sign_link(&self.call_sign)
    }

    pub fn is_reserved_shape(&self) -> bool {
        crate::reference::vanity::is_reserved(&self.call_sign)
    }

    // ------------------------------------------------------------------------
    // Presentation helpers
    // ------------------------------------------------------------------------

    /// Call sign line, marked when the call was a vanity request
    pub fn heading(&self) -> String {
        if self.vanity == Some(true) {
            format!("{} (vanity)", self.call_sign)
        } else {
            self.call_sign.clone()
        }
    }

    /// Licensee name from the non-empty name parts
    pub fn display_name(&self) -> String {
        [&self.first_name, &self.middle_initial, &self.last_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Mailing address block, one line per non-empty part
    pub fn mailing_address(&self) -> String {
        let name = self.display_name();
        let po_box = self.po_box.as_ref().map(|b| format!("PO Box {}", b));
        let state_zip = [&self.state, &self.zip_code]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        let locality = [self.city.clone().unwrap_or_default(), state_zip]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        [
            Some(name),
            self.street_address.clone(),
            self.attn_line.clone(),
            po_box,
            Some(locality),
        ]
        .into_iter()
        .flatten()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// The record to display for a lookup: the sole entry, or else the most recent (last)
pub fn current_record(records: &[LicenseRecord]) -> Option<&LicenseRecord> {
    match records {
        [only] => Some(only),
        _ => records.last(),
    }
}

/// Parse a sequence of raw records, skipping malformed entries.
///
/// Returns the parsed records and the number skipped.
pub fn parse_records(raw: &[Value]) -> (Vec<LicenseRecord>, usize) {
    let mut records = Vec::with_capacity(raw.len());
    let mut skipped = 0;
    for (i, value) in raw.iter().enumerate() {
        match LicenseRecord::from_value(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                log::warn!("Skipping license record {}: {}", i, e);
                skipped += 1;
            }
        }
    }
    (records, skipped)
}

/// String field, treating null and blank as absent
fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Boolean-like field: JSON booleans, ULS "Y"/"N" indicators, 1/0
fn flag(fields: &Map<String, Value>, key: &str) -> Option<bool> {
    match fields.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|v| v != 0),
        Value::String(s) => match s.trim().to_ascii_uppercase().as_str() {
            "Y" | "YES" | "T" | "TRUE" | "1" => Some(true),
            "N" | "NO" | "F" | "FALSE" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
