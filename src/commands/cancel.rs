//! Cooperative cancellation for long runs
//!
//! Checked between answers only, so every answer a run reports on was fully
//! resolved.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared stop flag with an optional wall-clock deadline
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// A token that only stops when cancelled explicitly
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that also stops once `limit` has elapsed from now
    #[must_use]
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            flag: Arc::default(),
            deadline: Some(Instant::now() + limit),
        }
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        if self.flag.load(Ordering::Relaxed) {
            return true;
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.cancel();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn zero_time_limit_expires_immediately() {
        let token = CancelToken::with_time_limit(Duration::ZERO);
        assert!(token.is_cancelled());
    }

    #[test]
    fn generous_time_limit_does_not_expire() {
        let token = CancelToken::with_time_limit(Duration::from_secs(3600));
        assert!(!token.is_cancelled());
    }
}
