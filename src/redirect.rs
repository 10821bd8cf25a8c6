//! Redirect-back collaborator.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Issues the framework's redirect-to-referrer response.
///
/// A real implementation ends the current request; the validator signals
/// this to its caller by yielding a `Redirected` outcome after the call.
pub trait Redirector: Send + Sync {
    /// Redirect the client back to the page the form was submitted from.
    fn redirect_back(&self);
}

/// Redirector that only counts invocations (for development/testing).
#[derive(Debug, Default)]
pub struct RecordingRedirector {
    calls: AtomicUsize,
}

impl RecordingRedirector {
    /// Create a redirector with zero recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a redirect was issued at least once.
    pub fn fired(&self) -> bool {
        self.count() > 0
    }

    /// Number of redirects issued.
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Redirector for RecordingRedirector {
    fn redirect_back(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}
