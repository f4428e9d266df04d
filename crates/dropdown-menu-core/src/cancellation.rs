//! Cooperative cancellation for background work.
//!
//! A [`CancellationToken`] is shared between the code that submits a job and
//! the job itself. Long-running jobs poll [`CancellationToken::is_cancelled`]
//! and return early once it flips.
//!
//! ```
//! use dropdown_menu_core::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let job_token = token.clone();
//!
//! token.cancel();
//! assert!(job_token.is_cancelled());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cancellation token for cooperative task cancellation.
///
/// Clones share the same flag. Cancellation is one-way for a given token;
/// submit new work with a fresh token.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Acquire)
    }

    /// Request cancellation.
    ///
    /// Returns `true` if this call flipped the flag, `false` if the token was
    /// already cancelled.
    pub fn cancel(&self) -> bool {
        !self.inner.swap(true, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_flips_once() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(token.cancel());
        assert!(!token.cancel());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_clones_share_state() {
        let token = CancellationToken::new();
        let other = token.clone();
        other.cancel();
        assert!(token.is_cancelled());
    }
}
