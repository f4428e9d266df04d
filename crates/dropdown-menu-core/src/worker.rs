//! Single-slot background worker.
//!
//! [`SlotWorker`] owns one dedicated thread and a queue that holds at most one
//! job. Submitting a job while another is still waiting replaces the waiting
//! one: the replaced job never runs and its [`CancellationToken`] is
//! cancelled. A job that is already running is asked to stop through its
//! token, and whatever it produces is expected to be discarded by the caller.
//! At most one job executes at any time and jobs start in submission order,
//! which is what an interactive search box needs: only the latest query
//! matters.
//!
//! # Example
//!
//! ```
//! use dropdown_menu_core::worker::SlotWorker;
//! use dropdown_menu_core::UiContext;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::time::Duration;
//!
//! let ctx = UiContext::new();
//! let proxy = ctx.proxy();
//! let worker = SlotWorker::new().unwrap();
//! let result = Arc::new(AtomicUsize::new(0));
//!
//! let result_clone = result.clone();
//! worker
//!     .submit(move |token| {
//!         let value = 6 * 7;
//!         if !token.is_cancelled() {
//!             let _ = proxy.post(move || result_clone.store(value, Ordering::SeqCst));
//!         }
//!     })
//!     .unwrap();
//!
//! ctx.process_events_until(Duration::from_secs(5), || result.load(Ordering::SeqCst) == 42);
//! worker.stop_and_join();
//! ```

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};

use crate::cancellation::CancellationToken;
use crate::error::WorkerError;
use crate::logging::targets;

/// Configuration for creating a [`SlotWorker`].
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Name for the worker thread.
    pub name: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            name: "dropdown-menu-worker".to_string(),
        }
    }
}

impl WorkerConfig {
    /// Create a new configuration with the given thread name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
        }
    }
}

type JobFn = Box<dyn FnOnce(&CancellationToken) + Send>;

struct Job {
    token: CancellationToken,
    run: JobFn,
}

/// Counters describing what the worker has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Jobs accepted by `submit`.
    pub submitted: u64,
    /// Jobs replaced while still waiting; they never ran.
    pub superseded: u64,
    /// Jobs that ran to completion (cancelled or not).
    pub completed: u64,
}

#[derive(Default)]
struct SlotState {
    pending: Option<Job>,
    running: Option<CancellationToken>,
    stopped: bool,
    stats: WorkerStats,
}

struct Shared {
    state: Mutex<SlotState>,
    wake: Condvar,
    idle: Condvar,
}

/// A dedicated worker thread with a single-slot, latest-wins job queue.
pub struct SlotWorker {
    shared: Arc<Shared>,
    handle: Mutex<Option<JoinHandle<()>>>,
    name: String,
}

impl std::fmt::Debug for SlotWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotWorker")
            .field("name", &self.name)
            .field("stats", &self.stats())
            .finish()
    }
}

impl SlotWorker {
    /// Start a worker with the default configuration.
    pub fn new() -> Result<Self, WorkerError> {
        Self::with_config(WorkerConfig::default())
    }

    /// Start a worker with a custom configuration.
    pub fn with_config(config: WorkerConfig) -> Result<Self, WorkerError> {
        let shared = Arc::new(Shared {
            state: Mutex::new(SlotState::default()),
            wake: Condvar::new(),
            idle: Condvar::new(),
        });

        let thread_shared = shared.clone();
        let handle = thread::Builder::new()
            .name(config.name.clone())
            .spawn(move || worker_loop(&thread_shared))
            .map_err(|e| WorkerError::Spawn(e.to_string()))?;

        tracing::debug!(target: targets::WORKER, name = %config.name, "worker started");

        Ok(Self {
            shared,
            handle: Mutex::new(Some(handle)),
            name: config.name,
        })
    }

    /// Submit a job, replacing any job that has not started yet.
    ///
    /// The running job (if any) has its token cancelled. Returns the token
    /// handed to the new job.
    pub fn submit<F>(&self, job: F) -> Result<CancellationToken, WorkerError>
    where
        F: FnOnce(&CancellationToken) + Send + 'static,
    {
        let mut state = self.shared.state.lock();
        if state.stopped {
            return Err(WorkerError::Stopped);
        }

        if let Some(replaced) = state.pending.take() {
            replaced.token.cancel();
            state.stats.superseded += 1;
            tracing::trace!(target: targets::WORKER, "pending job superseded");
        }
        if let Some(running) = &state.running {
            running.cancel();
        }

        let token = CancellationToken::new();
        state.pending = Some(Job {
            token: token.clone(),
            run: Box::new(job),
        });
        state.stats.submitted += 1;
        drop(state);

        self.shared.wake.notify_one();
        Ok(token)
    }

    /// Whether no job is waiting or running.
    pub fn is_idle(&self) -> bool {
        let state = self.shared.state.lock();
        state.pending.is_none() && state.running.is_none()
    }

    /// Whether the worker still accepts jobs.
    pub fn is_running(&self) -> bool {
        !self.shared.state.lock().stopped
    }

    /// Snapshot of the worker counters.
    pub fn stats(&self) -> WorkerStats {
        self.shared.state.lock().stats
    }

    /// Block until the worker is idle or `timeout` elapses.
    ///
    /// Returns `true` if the worker went idle.
    pub fn wait_idle(&self, timeout: std::time::Duration) -> bool {
        let mut state = self.shared.state.lock();
        let deadline = std::time::Instant::now() + timeout;
        while state.pending.is_some() || state.running.is_some() {
            if self.shared.idle.wait_until(&mut state, deadline).timed_out() {
                return state.pending.is_none() && state.running.is_none();
            }
        }
        true
    }

    /// Stop accepting jobs, drop the waiting job and cancel the running one.
    ///
    /// Non-blocking; call [`join`](Self::join) to wait for the thread.
    pub fn stop(&self) {
        let mut state = self.shared.state.lock();
        if state.stopped {
            return;
        }
        state.stopped = true;
        if let Some(job) = state.pending.take() {
            job.token.cancel();
        }
        if let Some(running) = &state.running {
            running.cancel();
        }
        drop(state);

        self.shared.wake.notify_all();
        tracing::debug!(target: targets::WORKER, name = %self.name, "worker stopping");
    }

    /// Wait for the worker thread to exit.
    ///
    /// Returns `true` if the thread was joined, `false` if it was already
    /// joined or panicked.
    pub fn join(&self) -> bool {
        match self.handle.lock().take() {
            Some(handle) => handle.join().is_ok(),
            None => false,
        }
    }

    /// Stop the worker and wait for it to finish.
    pub fn stop_and_join(&self) -> bool {
        self.stop();
        self.join()
    }
}

impl Drop for SlotWorker {
    fn drop(&mut self) {
        // Request shutdown without blocking in drop.
        self.stop();
    }
}

fn worker_loop(shared: &Shared) {
    loop {
        let job = {
            let mut state = shared.state.lock();
            loop {
                if state.stopped {
                    shared.idle.notify_all();
                    return;
                }
                if let Some(job) = state.pending.take() {
                    state.running = Some(job.token.clone());
                    break job;
                }
                shared.wake.wait(&mut state);
            }
        };

        if job.token.is_cancelled() {
            tracing::trace!(target: targets::WORKER, "skipping cancelled job");
        } else {
            (job.run)(&job.token);
        }

        let mut state = shared.state.lock();
        state.running = None;
        state.stats.completed += 1;
        if state.pending.is_none() {
            shared.idle.notify_all();
        }
    }
}

static_assertions::assert_impl_all!(SlotWorker: Send, Sync);
