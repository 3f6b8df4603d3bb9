use futures::future::{AbortHandle, AbortRegistration};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// Cancellation handle for one issued request.
///
/// Cancelling aborts the request future at its next poll and marks the token,
/// so a result that was already produced is still recognised as stale.
#[derive(Debug, Clone)]
pub struct CancelToken {
    id: Uuid,
    cancelled: Arc<AtomicBool>,
    abort: AbortHandle,
}

impl CancelToken {
    /// New token plus the registration for wrapping the request future in
    /// `futures::future::Abortable`
    pub fn new() -> (Self, AbortRegistration) {
        let (abort, registration) = AbortHandle::new_pair();
        let token = Self {
            id: Uuid::now_v7(),
            cancelled: Arc::new(AtomicBool::new(false)),
            abort,
        };
        (token, registration)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.abort.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
