//! Cooperative cancellation for long-running queries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::SemanticError;

/// Shared flag a caller sets to stop work in progress.
///
/// Clones share the flag. Work polls [`CancellationToken::check`] between
/// steps and stops with [`SemanticError::Cancelled`]; nothing is rolled back.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<(), SemanticError> {
        if self.is_cancelled() {
            Err(SemanticError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let worker = token.clone();
        assert_eq!(worker.check(), Ok(()));
        token.cancel();
        assert!(worker.is_cancelled());
        assert_eq!(worker.check(), Err(SemanticError::Cancelled));
    }

    #[test]
    fn cancel_from_another_thread() {
        let token = CancellationToken::new();
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel())
            .join()
            .expect("thread finished");
        assert!(token.is_cancelled());
    }
}
