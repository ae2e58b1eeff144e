/// SQL migration for the lookup cache
///
/// - One row per call sign, keyed by the normalized call sign
/// - `value` holds the serialized cache entry as JSON text
/// - rowid order is storage order; upserts keep the original rowid
pub const MIGRATION_001: &str = r#"
-- =============================================================================
-- Lookup cache
-- =============================================================================
CREATE TABLE IF NOT EXISTS lookup_cache (
    key             TEXT PRIMARY KEY NOT NULL,
    value           TEXT NOT NULL,
    updated_at      TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
