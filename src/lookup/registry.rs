// FCC License View registry results
// See: https://www.fcc.gov/reports-research/developers/license-view-api
//
// Success: {"status": "OK", "Licenses": {"License": [{...}, ...]}}
// Failure: {"status": "FAIL", "Errors": {"Err": [{"code": ..., "msg": ...}]}}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One license entry from the registry search.
///
/// Registry-native fields only; this is not a `LicenseRecord`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryLicense {
    #[serde(rename = "licName", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub frn: String,
    #[serde(rename = "callsign", default, deserialize_with = "null_as_empty")]
    pub call_sign: String,
    #[serde(rename = "categoryDesc", default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(rename = "serviceDesc", default, deserialize_with = "null_as_empty")]
    pub service: String,
    #[serde(rename = "statusDesc", default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(rename = "expiredDate", default, deserialize_with = "null_as_empty")]
    pub expired_date: String,
    #[serde(rename = "licenseID", default, deserialize_with = "null_as_empty")]
    pub license_id: String,
    #[serde(rename = "licDetailURL", default, deserialize_with = "null_as_empty")]
    pub detail_url: String,
}

/// Registry fields may be `null` or bare numbers; read both as text
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// How to choose among registry search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackMatch {
    /// First entry, whatever its call sign. The search matches substrings,
    /// so this may be a different station.
    #[default]
    #[serde(rename = "first")]
    First,
    /// First entry whose call sign equals the request
    #[serde(rename = "exact")]
    ExactCallSign,
}

/// Pick the license for `call_sign` from a registry search response
pub fn select_registry_license(
    response: &Value,
    call_sign: &str,
    policy: FallbackMatch,
) -> Result<RegistryLicense> {
    let not_found = |detail: String| Error::FallbackNotFound {
        call_sign: call_sign.to_string(),
        detail,
    };

    if let Some(errors) = response.get("Errors") {
        return Err(not_found(error_message(errors)));
    }

    let licenses = response
        .get("Licenses")
        .and_then(|l| l.get("License"))
        .and_then(Value::as_array)
        .ok_or_else(|| not_found("response has no license list".to_string()))?;

    let chosen = match policy {
        FallbackMatch::First => licenses.first(),
        FallbackMatch::ExactCallSign => licenses.iter().find(|license| {
            license
                .get("callsign")
                .and_then(Value::as_str)
                .is_some_and(|c| c.eq_ignore_ascii_case(call_sign))
        }),
    }
    .ok_or_else(|| not_found(format!("{} license entries, none usable", licenses.len())))?;

    RegistryLicense::deserialize(chosen).map_err(|e| not_found(format!("unreadable license entry: {}", e)))
}

fn error_message(errors: &Value) -> String {
    errors
        .get("Err")
        .and_then(Value::as_array)
        .and_then(|errs| errs.first())
        .and_then(|err| err.get("msg"))
        .and_then(Value::as_str)
        .unwrap_or("registry returned an error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search_response() -> Value {
        json!({
            "status": "OK",
            "Licenses": {
                "page": "1",
                "rowPerPage": "100",
                "totalRows": "2",
                "lastUpdate": "Apr 7, 2023",
                "License": [
                    {
                        "licName": "Last, First I",
                        "frn": "0012345678",
                        "callsign": "AA0ZZZZ",
                        "categoryDesc": "Personal Use",
                        "serviceDesc": "Amateur",
                        "statusDesc": "Active",
                        "expiredDate": "01/01/2033",
                        "licenseID": "1234567",
                        "licDetailURL": "http://wireless2.fcc.gov/UlsApp/UlsSearch/license.jsp?__newWindow=false&licKey=1234567"
                    },
                    {
                        "licName": "Other, Second",
                        "frn": "0087654321",
                        "callsign": "AA0ZZ",
                        "categoryDesc": "Personal Use",
                        "serviceDesc": "Amateur",
                        "statusDesc": "Expired",
                        "expiredDate": "01/01/2020",
                        "licenseID": "7654321",
                        "licDetailURL": "http://wireless2.fcc.gov/UlsApp/UlsSearch/license.jsp?__newWindow=false&licKey=7654321"
                    }
                ]
            }
        })
    }

    #[test]
    fn test_first_entry_is_unverified() {
        let license = select_registry_license(&search_response(), "AA0ZZ", FallbackMatch::First).unwrap();
        assert_eq!(license.call_sign, "AA0ZZZZ");
        assert_eq!(license.name, "Last, First I");
        assert_eq!(license.status, "Active");
        assert_eq!(license.license_id, "1234567");
    }

    #[test]
    fn test_exact_match_policy() {
        let license =
            select_registry_license(&search_response(), "AA0ZZ", FallbackMatch::ExactCallSign).unwrap();
        assert_eq!(license.call_sign, "AA0ZZ");
        assert_eq!(license.frn, "0087654321");

        let err = select_registry_license(&search_response(), "K7A", FallbackMatch::ExactCallSign)
            .unwrap_err();
        assert!(matches!(err, Error::FallbackNotFound { .. }));
    }

    #[test]
    fn test_errors_payload() {
        let response = json!({
            "status": "FAIL",
            "Errors": { "Err": [{ "code": "110", "msg": "No license found." }] }
        });
        match select_registry_license(&response, "ZZ9ZZZ", FallbackMatch::First) {
            Err(Error::FallbackNotFound { call_sign, detail }) => {
                assert_eq!(call_sign, "ZZ9ZZZ");
                assert_eq!(detail, "No license found.");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_or_empty_license_list() {
        for response in [json!({ "status": "OK" }), json!({ "Licenses": { "License": [] } })] {
            assert!(matches!(
                select_registry_license(&response, "W1AW", FallbackMatch::First),
                Err(Error::FallbackNotFound { .. })
            ));
        }
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let response = json!({
            "status": "OK",
            "Licenses": { "License": [{
                "licName": "Last, First I",
                "frn": null,
                "callsign": "W1AW",
                "categoryDesc": null,
                "statusDesc": "Active",
                "expiredDate": null,
                "licenseID": 1234567
            }]}
        });
        let license = select_registry_license(&response, "W1AW", FallbackMatch::First).unwrap();
        assert_eq!(license.call_sign, "W1AW");
        assert_eq!(license.frn, "");
        assert_eq!(license.category, "");
        assert_eq!(license.expired_date, "");
        assert_eq!(license.license_id, "1234567");
        assert_eq!(license.detail_url, "");
    }

    #[test]
    fn test_policy_config_names() {
        let policy: FallbackMatch = serde_json::from_str("\"exact\"").unwrap();
        assert_eq!(policy, FallbackMatch::ExactCallSign);
        assert_eq!(serde_json::to_string(&FallbackMatch::First).unwrap(), "\"first\"");
    }
}
