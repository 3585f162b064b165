//! # Promptmap Mapper
//!
//! Applies a slow external transform (a language-model call) to every
//! entry of an archive, with bounded concurrency and per-item failure
//! isolation.
//!
//! ## Pipeline
//!
//! ```text
//! Entries
//!     │
//!     ├──> Branch Expander (optional, N copies per entry)
//!     │
//!     ├──> Prompt Templater ({item} substitution)
//!     │
//!     └──> Concurrent Mapper (semaphore-gated workers)
//!            └─> Outcomes in input order, success or error per item
//! ```
//!
//! Output order is always input order, regardless of which transform
//! finishes first; a single failing item degrades only its own outcome.

mod branch;
mod error;
mod llm;
mod mapper;
mod template;
mod transform;

pub use branch::expand;
pub use error::{Result, TransformError};
pub use llm::{LlmClient, LlmOptions, DEFAULT_MODEL};
pub use mapper::{items_from_entries, map_items, MapItem, MapOptions, MapOutcome};
pub use template::render;
pub use transform::Transform;
