/// Application-level constants
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum accepted input file size: 25 MiB.
pub const MAX_FILE_SIZE_BYTES: u64 = 25 * 1024 * 1024;

/// File extensions the intake accepts (lowercase, with dot).
pub const ALLOWED_EXTENSIONS: [&str; 2] = [".pdf", ".txt"];

/// Declared MIME types the intake accepts.
pub const ALLOWED_MIME_TYPES: [&str; 2] = ["application/pdf", "text/plain"];

/// Claims below this estimated damage qualify for fast-track routing.
pub const FAST_TRACK_DAMAGE_CEILING: f64 = 25_000.0;

/// Two damage estimates differing by more than this fraction of the
/// estimated damage are flagged as inconsistent.
pub const ESTIMATE_MISMATCH_RATIO: f64 = 0.2;

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "fnol_triage=info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_cap_is_25_mib() {
        assert_eq!(MAX_FILE_SIZE_BYTES, 26_214_400);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
