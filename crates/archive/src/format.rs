use std::fmt;
use std::str::FromStr;

use crate::error::ArchiveError;

/// The closed set of wire formats the codec understands.
///
/// The set is fixed and small, so formats are a plain enum rather than
/// any open-ended dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// One `{"path","content"}` JSON object per line.
    Jsonl,
    /// Single JSON object keyed by path. Key order is not guaranteed to
    /// survive a round-trip.
    Json,
    /// JSON array of content strings. Paths are not recoverable; decode
    /// synthesizes `item_{i}` identifiers.
    JsonArr,
    /// One element per entry, XML-entity-escaped content.
    Xml,
    /// Like `xml` but content is written verbatim. Write-only: content
    /// containing a closing-tag sequence will not round-trip.
    Xmlish,
}

impl ArchiveFormat {
    pub const ALL: [ArchiveFormat; 5] = [
        ArchiveFormat::Jsonl,
        ArchiveFormat::Json,
        ArchiveFormat::JsonArr,
        ArchiveFormat::Xml,
        ArchiveFormat::Xmlish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jsonl => "jsonl",
            Self::Json => "json",
            Self::JsonArr => "jsonarr",
            Self::Xml => "xml",
            Self::Xmlish => "xmlish",
        }
    }

    /// Formats that are valid for mapper input/output (the XML family is
    /// archive-only).
    pub fn is_map_format(&self) -> bool {
        matches!(self, Self::Jsonl | Self::Json | Self::JsonArr)
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveFormat {
    type Err = ArchiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jsonl" => Ok(Self::Jsonl),
            "json" => Ok(Self::Json),
            "jsonarr" => Ok(Self::JsonArr),
            "xml" => Ok(Self::Xml),
            "xmlish" => Ok(Self::Xmlish),
            other => Err(ArchiveError::UnknownFormat(other.to_string())),
        }
    }
}
