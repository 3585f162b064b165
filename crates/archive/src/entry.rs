use serde::{Deserialize, Serialize};

/// One (path, content) pair within an archive.
///
/// The content is opaque to the codec: it is never parsed, only escaped
/// and unescaped for the XML-family formats. Paths are not required to be
/// unique; decoding keeps duplicates and extraction resolves them
/// last-in-order wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub path: String,
    pub content: String,
}

impl Entry {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}
