//! Seam for the documentation-search fallback consulted by the remote tier.

use async_trait::async_trait;

/// External search collaborator invoked only after every local rule missed.
///
/// Implementations must not fail: any internal error is logged and reported as
/// `None`, and the classifier moves on to its default tier.
#[async_trait]
pub trait RemoteLookup: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Returns a response for `query` (the raw, un-normalized text) or `None`.
    async fn lookup(&self, query: &str) -> Option<String>;
}
