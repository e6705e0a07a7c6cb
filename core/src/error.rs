use dicom_core::Tag;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for dcmpeek operations
pub type Result<T> = std::result::Result<T, DcmpeekError>;

/// Error types for dcmpeek operations
///
/// Errors are contained at the level where they happen: tag and frame
/// errors never leave the file being processed, decode errors never leave
/// the file walk, and only configuration errors abort a whole run.
#[derive(Error, Debug)]
pub enum DcmpeekError {
    /// Invalid run configuration (search pattern, output directory)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The DICOM decoder could not read a file
    #[error("DICOM error in {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    /// A tag present in a dataset has no registry entry
    #[error("Unknown tag {0}")]
    TagResolution(Tag),

    /// A pixel data frame could not be written to disk
    #[error("Cannot write frame {index} to {}: {source}", path.display())]
    ExtractionWrite {
        index: usize,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DcmpeekError {
    /// Whether this error must abort the whole run instead of a single file
    pub fn is_fatal(&self) -> bool {
        matches!(self, DcmpeekError::Configuration(_))
    }

    /// Wraps a decoder failure for the given file
    pub fn decode(path: impl Into<PathBuf>, e: impl std::fmt::Display) -> Self {
        DcmpeekError::Decode {
            path: path.into(),
            message: e.to_string(),
        }
    }
}

impl From<regex::Error> for DcmpeekError {
    fn from(e: regex::Error) -> Self {
        DcmpeekError::Configuration(format!("invalid search pattern: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_configuration_is_fatal() {
        assert!(DcmpeekError::Configuration("bad".into()).is_fatal());
        assert!(!DcmpeekError::decode("a.dcm", "truncated").is_fatal());
        assert!(!DcmpeekError::TagResolution(Tag(0x0009, 0x1001)).is_fatal());
    }

    #[test]
    fn test_regex_error_is_configuration() {
        let err: DcmpeekError = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, DcmpeekError::Configuration(_)));
        assert!(err.to_string().contains("invalid search pattern"));
    }

    #[test]
    fn test_decode_message_names_file() {
        let err = DcmpeekError::decode("/tmp/broken.dcm", "unexpected end of file");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/broken.dcm"));
        assert!(msg.contains("unexpected end of file"));
    }
}
