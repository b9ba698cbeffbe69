//! FNOL intake pipeline.
//!
//! Takes one First-Notice-of-Loss document (PDF or plain text) and derives a
//! structured claim record, a validation report, and a routing decision
//! through seven strictly sequential stages:
//!
//! `validate-file → parse → normalize → extract → validate-fields → route → format`
//!
//! The pipeline is a pure, single-shot, best-effort extraction function: it
//! keeps no state between runs and produces a partial result rather than
//! failing on missing data. Only an invalid input file or an unreadable
//! document aborts a run. Presentation of the [`ProcessingResult`] is the
//! caller's concern.

pub mod config;
pub mod input;
pub mod pipeline;

pub use input::InputFile;
pub use pipeline::{
    process_document, ExtractedFields, FieldKey, PipelineError, ProcessingResult,
    RoutingDecision, RoutingResult, ValidationResult,
};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binary or test callers.
///
/// Honors `RUST_LOG` when set, otherwise falls back to
/// [`config::default_log_filter`].
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
    tracing::info!(version = config::APP_VERSION, "tracing initialized");
}
