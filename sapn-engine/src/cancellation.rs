//! A cheaply-cloned cancellation handle for long-running searches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A handle that can be handed to a signal handler, a UI thread, or a
/// deadline watchdog to ask a running synthesis to stop early.
///
/// The search driver polls [`CancellationToken::is_cancelled`] once per
/// outer-loop iteration, never inside the inner expansion subroutine: an
/// in-progress expansion always runs to completion before cancellation is
/// observed, so a cancelled run still returns a consistent, minimality-
/// filtered `Discovered` set rather than a half-expanded one.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
