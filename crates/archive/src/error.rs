use thiserror::Error;

use crate::format::ArchiveFormat;

/// Result type for archive operations
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while encoding or decoding archives
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Unknown format name on the command line
    #[error("Unknown archive format: {0}")]
    UnknownFormat(String),

    /// Input stream is malformed for the declared format. Fatal for the
    /// whole decode call; no partial entry list is returned.
    #[error("Malformed {format} input ({detail}): {fragment}")]
    Decode {
        format: ArchiveFormat,
        detail: String,
        fragment: String,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ArchiveError {
    pub(crate) fn decode(format: ArchiveFormat, detail: impl Into<String>, fragment: &str) -> Self {
        Self::Decode {
            format,
            detail: detail.into(),
            fragment: clip(fragment),
        }
    }
}

/// Path does not satisfy the required basedir prefix. Recoverable: the
/// caller warns and skips the entry, it never aborts a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{path} does not have prefix {prefix}")]
pub struct PathRejected {
    pub path: String,
    pub prefix: String,
}

/// Keep diagnostics readable when the offending fragment is a whole file.
fn clip(fragment: &str) -> String {
    const MAX: usize = 200;
    if fragment.len() <= MAX {
        return fragment.to_string();
    }
    let mut end = MAX;
    while !fragment.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &fragment[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_clips_long_fragments() {
        let long = "x".repeat(500);
        let err = ArchiveError::decode(ArchiveFormat::Jsonl, "not JSON", &long);
        let rendered = err.to_string();
        assert!(rendered.contains("jsonl"));
        assert!(rendered.len() < 300);
        assert!(rendered.ends_with("..."));
    }

    #[test]
    fn path_rejected_names_path_and_prefix() {
        let err = PathRejected {
            path: "c.txt".into(),
            prefix: "a/".into(),
        };
        assert_eq!(err.to_string(), "c.txt does not have prefix a/");
    }
}
