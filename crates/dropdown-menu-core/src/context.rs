//! The single-threaded UI context.
//!
//! All display state changes happen while the host pumps a [`UiContext`].
//! Background threads never touch that state directly; they hold a cloneable
//! [`UiProxy`] and post closures that the context runs on its own thread, in
//! submission order, the next time [`UiContext::process_events`] is called.
//!
//! # Example
//!
//! ```
//! use dropdown_menu_core::UiContext;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let ctx = UiContext::new();
//! let proxy = ctx.proxy();
//! let ran = Arc::new(AtomicBool::new(false));
//!
//! let ran_clone = ran.clone();
//! std::thread::spawn(move || {
//!     proxy.post(move || ran_clone.store(true, Ordering::SeqCst)).unwrap();
//! })
//! .join()
//! .unwrap();
//!
//! assert!(!ran.load(Ordering::SeqCst));
//! ctx.process_events();
//! assert!(ran.load(Ordering::SeqCst));
//! ```

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, unbounded};

use crate::error::{CoreError, Result};
use crate::invocation::QueuedInvocation;
use crate::logging::targets;
use crate::thread_check::ThreadAffinity;

/// Owner of the UI event queue.
///
/// Create one per UI thread. The context is bound to the thread that created
/// it; pumping it from anywhere else panics in debug builds.
#[derive(Debug)]
pub struct UiContext {
    sender: Sender<QueuedInvocation>,
    receiver: Receiver<QueuedInvocation>,
    affinity: ThreadAffinity,
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}

impl UiContext {
    /// Create a context bound to the current thread.
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            affinity: ThreadAffinity::current(),
        }
    }

    /// A cloneable, thread-safe handle for posting work to this context.
    pub fn proxy(&self) -> UiProxy {
        UiProxy {
            sender: self.sender.clone(),
        }
    }

    /// Whether the caller is on the thread that owns this context.
    pub fn is_ui_thread(&self) -> bool {
        self.affinity.is_same_thread()
    }

    /// Number of invocations waiting to run.
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Run every invocation that was queued when this call started.
    ///
    /// Invocations posted by the ones being run are left for the next call,
    /// so a handler that re-posts itself cannot starve the host.
    ///
    /// Returns the number of invocations executed.
    pub fn process_events(&self) -> usize {
        self.affinity.debug_assert_same_thread();
        let _span = tracing::trace_span!(crate::logging::span_names::PROCESS_EVENTS).entered();

        let budget = self.receiver.len();
        let mut processed = 0;
        while processed < budget {
            match self.receiver.try_recv() {
                Ok(invocation) => {
                    tracing::trace!(target: targets::CONTEXT, id = invocation.id(), "running invocation");
                    invocation.execute();
                    processed += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        processed
    }

    /// Pump the queue until `done` returns `true` or `timeout` elapses.
    ///
    /// Blocks while the queue is empty instead of spinning. Returns whether
    /// `done` was satisfied.
    pub fn process_events_until(&self, timeout: Duration, mut done: impl FnMut() -> bool) -> bool {
        self.affinity.debug_assert_same_thread();
        let deadline = Instant::now() + timeout;

        loop {
            self.process_events();
            if done() {
                return true;
            }

            let now = Instant::now();
            if now >= deadline {
                return false;
            }

            // Poll at a short interval so `done` also sees state changed by
            // threads that never post to this context.
            let wait = (deadline - now).min(Duration::from_millis(5));
            match self.receiver.recv_timeout(wait) {
                Ok(invocation) => invocation.execute(),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return done(),
            }
        }
    }
}

/// Thread-safe handle for posting work onto a [`UiContext`].
#[derive(Debug, Clone)]
pub struct UiProxy {
    sender: Sender<QueuedInvocation>,
}

impl UiProxy {
    /// Queue `f` to run on the UI context.
    ///
    /// Fails with [`CoreError::ContextClosed`] once the context is dropped.
    pub fn post<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let invocation = QueuedInvocation::new(f);
        tracing::trace!(target: targets::CONTEXT, id = invocation.id(), "posting invocation");
        self.sender
            .send(invocation)
            .map_err(|_| CoreError::ContextClosed)
    }
}

static_assertions::assert_impl_all!(UiProxy: Send, Sync, Clone);
