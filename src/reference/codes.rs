// FCC ULS code definitions
// Source: https://www.fcc.gov/wireless/data/public-access-files-database-downloads
// (ULS Code Definitions file)
//
// Unknown codes are carried through untouched so records survive new codes.

use std::fmt;

use serde::{Serialize, Serializer};

/// License status (HD record "License Status")
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseStatus {
    Active,
    Canceled,
    Expired,
    PendingLegalStatus,
    ParentStationCanceled,
    Terminated,
    TermPending,
    /// Raw code with no known meaning
    Other(String),
}

impl LicenseStatus {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "A" => LicenseStatus::Active,
            "C" => LicenseStatus::Canceled,
            "E" => LicenseStatus::Expired,
            "L" => LicenseStatus::PendingLegalStatus,
            "P" => LicenseStatus::ParentStationCanceled,
            "T" => LicenseStatus::Terminated,
            "X" => LicenseStatus::TermPending,
            other => LicenseStatus::Other(other.to_string()),
        }
    }

    /// The single-letter ULS code (or the raw passthrough value)
    pub fn code(&self) -> &str {
        match self {
            LicenseStatus::Active => "A",
            LicenseStatus::Canceled => "C",
            LicenseStatus::Expired => "E",
            LicenseStatus::PendingLegalStatus => "L",
            LicenseStatus::ParentStationCanceled => "P",
            LicenseStatus::Terminated => "T",
            LicenseStatus::TermPending => "X",
            LicenseStatus::Other(code) => code,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            LicenseStatus::Active => "Active",
            LicenseStatus::Canceled => "Canceled",
            LicenseStatus::Expired => "Expired",
            LicenseStatus::PendingLegalStatus => "Pending Legal Status",
            LicenseStatus::ParentStationCanceled => "Parent Station Canceled",
            LicenseStatus::Terminated => "Terminated",
            LicenseStatus::TermPending => "Term Pending",
            LicenseStatus::Other(code) => code,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, LicenseStatus::Active)
    }
}

impl fmt::Display for LicenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl Serialize for LicenseStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Amateur operator class (AM record "Operator Class")
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorClass {
    Advanced,
    AmateurExtra,
    General,
    Novice,
    TechnicianPlus,
    Technician,
    Other(String),
}

impl OperatorClass {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "A" => OperatorClass::Advanced,
            "E" => OperatorClass::AmateurExtra,
            "G" => OperatorClass::General,
            "N" => OperatorClass::Novice,
            "P" => OperatorClass::TechnicianPlus,
            "T" => OperatorClass::Technician,
            other => OperatorClass::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            OperatorClass::Advanced => "A",
            OperatorClass::AmateurExtra => "E",
            OperatorClass::General => "G",
            OperatorClass::Novice => "N",
            OperatorClass::TechnicianPlus => "P",
            OperatorClass::Technician => "T",
            OperatorClass::Other(code) => code,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            OperatorClass::Advanced => "Advanced",
            OperatorClass::AmateurExtra => "Amateur Extra",
            OperatorClass::General => "General",
            OperatorClass::Novice => "Novice",
            OperatorClass::TechnicianPlus => "Technician Plus",
            OperatorClass::Technician => "Technician",
            OperatorClass::Other(code) => code,
        }
    }
}

impl fmt::Display for OperatorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl Serialize for OperatorClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
