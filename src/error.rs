//! Error taxonomy shared by parsing, derivation, storage and lookups.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A record could not be built from its raw fields.
    #[error("malformed license record: {0}")]
    MalformedRecord(String),

    /// A call sign character has no entry in one of the reference tables.
    #[error("character {character:?} is not covered by the {table} table")]
    UnsupportedCharacter { character: char, table: &'static str },

    /// The primary lookup service had no data for the call sign.
    #[error("call sign {call_sign} not found: {detail}")]
    NotFound { call_sign: String, detail: String },

    /// The FCC license-view registry had no usable data for the call sign.
    #[error("FCC registry has no usable data for {call_sign}: {detail}")]
    FallbackNotFound { call_sign: String, detail: String },

    /// Network or connection failure, including request timeouts.
    #[error("transport error: {0}")]
    Transport(String),

    /// A fallback lookup was requested but no primary lookup is waiting for one.
    #[error("no failed lookup is awaiting a registry fallback")]
    NoPendingFallback,

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl Error {
    /// True for the failures a lookup can end in, as opposed to local faults.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            Error::NotFound { .. } | Error::FallbackNotFound { .. } | Error::Transport(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_miss_classification() {
        assert!(Error::Transport("timed out".into()).is_lookup_miss());
        assert!(Error::NotFound { call_sign: "ZZ9ZZZ".into(), detail: "HTTP 404".into() }.is_lookup_miss());
        assert!(!Error::MalformedRecord("missing call_sign".into()).is_lookup_miss());
        assert!(!Error::NoPendingFallback.is_lookup_miss());
    }

    #[test]
    fn test_unsupported_character_message() {
        let err = Error::UnsupportedCharacter { character: '/', table: "morse" };
        assert_eq!(err.to_string(), "character '/' is not covered by the morse table");
    }
}
