//! Caller-supplied file handle for the pipeline.

use std::path::Path;

/// One submitted FNOL document: name, declared type, and full content.
///
/// The pipeline never touches the filesystem itself; callers that hold a
/// path can use [`InputFile::from_path`], callers that receive an upload
/// build one directly with [`InputFile::new`].
#[derive(Debug, Clone)]
pub struct InputFile {
    /// Original file name, including extension.
    pub name: String,
    /// Declared MIME type, when the transport provides one.
    pub mime_type: Option<String>,
    /// Full byte content.
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            bytes,
        }
    }

    /// Read a document from disk, guessing the MIME type from the path.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        let mime_type = mime_guess::from_path(path).first_raw().map(String::from);
        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lowercased extension including the dot, if the name has one.
    pub fn extension(&self) -> Option<String> {
        self.name.rfind('.').map(|i| self.name[i..].to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn extension_is_lowercased() {
        let file = InputFile::new("Claim.PDF", None, vec![1]);
        assert_eq!(file.extension().as_deref(), Some(".pdf"));
    }

    #[test]
    fn missing_extension_is_none() {
        let file = InputFile::new("claim", None, vec![1]);
        assert_eq!(file.extension(), None);
    }

    #[test]
    fn from_path_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fnol.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"Policy Number: POL-1").unwrap();

        let file = InputFile::from_path(&path).unwrap();
        assert_eq!(file.name, "fnol.txt");
        assert_eq!(file.mime_type.as_deref(), Some("text/plain"));
        assert_eq!(file.size(), 20);
    }
}
