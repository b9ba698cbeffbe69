//! Stage 1: file admission control.
//!
//! Every check runs; errors aggregate rather than short-circuit, so a
//! rejected upload reports all of its problems at once. Extension is the
//! primary signal, declared MIME type the secondary one, and a mismatch
//! between the two is a hard rejection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ALLOWED_EXTENSIONS, ALLOWED_MIME_TYPES, MAX_FILE_SIZE_BYTES};
use crate::input::InputFile;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Check extension, declared MIME type, size bounds, and
/// extension/MIME-type agreement.
pub fn validate_file(file: &InputFile) -> FileValidation {
    let mut errors = Vec::new();

    let extension = file.extension().unwrap_or_default();
    let mime_type = file.mime_type.as_deref().unwrap_or_default();
    debug!(
        name = %file.name,
        mime = %mime_type,
        size = file.size(),
        "validating file"
    );

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        errors.push(format!(
            "Invalid file extension: \"{extension}\". Only PDF (.pdf) and TXT (.txt) files are allowed."
        ));
    }

    if !mime_type.is_empty() && !ALLOWED_MIME_TYPES.contains(&mime_type) {
        errors.push(format!(
            "Invalid file type: \"{mime_type}\". Only PDF and TXT files are allowed."
        ));
    }

    if file.size() > MAX_FILE_SIZE_BYTES {
        let size_mb = file.size() as f64 / (1024.0 * 1024.0);
        errors.push(format!(
            "File size ({size_mb:.2}MB) exceeds the maximum allowed size of 25MB."
        ));
    }

    if file.size() == 0 {
        errors.push("File is empty.".to_string());
    }

    if extension == ".pdf" && !mime_type.is_empty() && !mime_type.contains("pdf") {
        errors.push(format!(
            "File has .pdf extension but MIME type is \"{mime_type}\". Please ensure this is a valid PDF file."
        ));
    }
    if extension == ".txt" && !mime_type.is_empty() && !mime_type.contains("text") {
        errors.push(format!(
            "File has .txt extension but MIME type is \"{mime_type}\". Please ensure this is a valid text file."
        ));
    }

    FileValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}
