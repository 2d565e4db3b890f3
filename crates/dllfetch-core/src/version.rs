/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema version for the JSON report.
/// Bump this when changing the report shape.
pub const REPORT_SCHEMA_VERSION: u32 = 1;
