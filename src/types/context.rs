//! Request context carried alongside every batch.
//!
//! A [`Context`] is a cheap handle to shared cancellation state and an
//! optional deadline. Cloning a context yields another handle to the same
//! state, so cancelling any clone cancels them all. Pipeline stages pass
//! the context they received to the next stage untouched.

use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::Instant;

use crate::HeimdallError;

/// Cancellation and deadline scope for one consume call.
#[derive(Debug, Clone, Default)]
pub struct Context {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    deadline: Option<Instant>,
    notify: Notify,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            inner: Arc::new(Inner {
                deadline: Some(deadline),
                ..Inner::default()
            }),
        }
    }

    /// A context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Cancel the context and wake every task waiting in [`cancelled()`](Self::cancelled).
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.notify.notify_waiters();
    }

    /// Whether [`cancel()`](Self::cancel) has been called on any handle.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// The deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Whether the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.inner
            .deadline
            .is_some_and(|deadline| deadline <= Instant::now())
    }

    /// The reason this context is done, or `None` while it is still live.
    ///
    /// Cancellation takes precedence over an expired deadline.
    pub fn err(&self) -> Option<HeimdallError> {
        if self.is_cancelled() {
            Some(HeimdallError::Cancelled)
        } else if self.is_expired() {
            Some(HeimdallError::DeadlineExceeded)
        } else {
            None
        }
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn cancelled(&self) {
        let mut notified = pin!(self.inner.notify.notified());
        // Register before checking the flag so a concurrent cancel is not lost.
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        match self.inner.deadline {
            Some(deadline) => {
                let _ = tokio::time::timeout_at(deadline, notified).await;
            }
            None => notified.await,
        }
    }

    /// Whether both handles refer to the same context.
    pub fn same_as(&self, other: &Context) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
