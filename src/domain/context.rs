use crate::utils::error::{EnrichError, Result};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Per-call execution context handed to every collaborator.
#[derive(Debug, Clone)]
pub struct EnrichContext {
    /// Cancellation token for cooperative cancellation
    pub cancel_token: CancellationToken,

    /// Optional deadline for the whole call
    pub deadline: Option<Instant>,

    /// Unique identifier for tracing and correlation
    pub request_id: String,
}

impl EnrichContext {
    pub fn new(cancel_token: CancellationToken, deadline: Option<Instant>) -> Self {
        Self {
            cancel_token,
            deadline,
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(CancellationToken::new(), Some(Instant::now() + timeout))
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Fails with `Cancelled` or `DeadlineExceeded` once the context is done.
    pub fn check(&self) -> Result<()> {
        if self.cancel_token.is_cancelled() {
            return Err(EnrichError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(EnrichError::DeadlineExceeded);
            }
        }
        Ok(())
    }
}

impl Default for EnrichContext {
    fn default() -> Self {
        Self::new(CancellationToken::new(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context_passes() {
        let ctx = EnrichContext::default();
        assert!(ctx.check().is_ok());
        assert!(!ctx.request_id.is_empty());
    }

    #[test]
    fn test_cancelled_context_fails() {
        let ctx = EnrichContext::default();
        ctx.cancel_token.cancel();
        assert!(ctx.is_cancelled());
        assert!(matches!(ctx.check(), Err(EnrichError::Cancelled)));
    }

    #[test]
    fn test_expired_deadline_fails() {
        let ctx = EnrichContext::new(CancellationToken::new(), Some(Instant::now()));
        assert!(matches!(ctx.check(), Err(EnrichError::DeadlineExceeded)));
    }

    #[test]
    fn test_clones_share_cancellation() {
        let ctx = EnrichContext::with_timeout(Duration::from_secs(60));
        let child = ctx.clone();
        ctx.cancel_token.cancel();
        assert!(child.check().is_err());
    }
}
