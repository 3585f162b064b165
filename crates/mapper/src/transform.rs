use async_trait::async_trait;

use crate::error::Result;

/// The external, slow, potentially failing operation applied per item.
///
/// Implementations must be safely callable concurrently; the mapper holds
/// one shared instance behind an `Arc` and invokes it from many workers
/// at once. What happens inside a call (auth, retries, request shape) is
/// the implementation's business.
#[async_trait]
pub trait Transform: Send + Sync {
    async fn apply(&self, path: &str, prompt: &str) -> Result<String>;
}
