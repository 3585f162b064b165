//! # Promptmap Archive
//!
//! Bidirectional codec for ordered (path, content) collections.
//!
//! ## Pipeline
//!
//! ```text
//! Files / stdin
//!     │
//!     ├──> Path Normalizer (basename / basedir policies)
//!     │      └─> accepted entry paths (rejects are skipped with a warning)
//!     │
//!     └──> Codec (jsonl | json | jsonarr | xml | xmlish)
//!            └─> archive stream
//! ```
//!
//! Round-trip guarantees vary per format: `jsonl` and `xml` preserve
//! identifiers and content, `jsonarr` preserves content and order only
//! (identifiers are synthesized on decode), `json` may reorder keys, and
//! `xmlish` is a write-only format for human/model consumption.
//!
//! ## Example
//!
//! ```
//! use promptmap_archive::{decode, encode, ArchiveFormat, Entry};
//!
//! let entries = vec![Entry::new("a.txt", "hello")];
//! let stream = encode(&entries, ArchiveFormat::Jsonl);
//! assert_eq!(decode(&stream, ArchiveFormat::Jsonl).unwrap(), entries);
//! ```

mod codec;
mod entry;
mod error;
mod format;
mod normalize;

pub use codec::{decode, encode};
pub use entry::Entry;
pub use error::{ArchiveError, PathRejected, Result};
pub use format::ArchiveFormat;
pub use normalize::{normalize, PathPolicy};
