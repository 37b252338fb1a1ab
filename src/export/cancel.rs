//! Cooperative cancellation for batch exports

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cancellation signal shared between an export and whoever may stop it
///
/// The exporter checks the token between batch items; clones observe the
/// same state.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; idempotent
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Clear a request so the token can stop a later export
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Release);
    }
}
