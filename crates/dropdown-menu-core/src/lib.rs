//! Core runtime for the dropdown menu widget.
//!
//! This crate provides the threading and notification plumbing the widget
//! crate builds on:
//!
//! - **UI Context**: A per-thread queue that the host pumps; background work
//!   reaches display state only through it
//! - **Signal/Slot System**: Type-safe callbacks for selection notifications
//! - **Slot Worker**: A single background thread with a latest-wins job slot
//! - **Cancellation**: Cooperative tokens shared between submitter and job
//!
//! # Signal/Slot Example
//!
//! ```
//! use dropdown_menu_core::Signal;
//!
//! let item_selected = Signal::<(String, usize)>::new();
//!
//! let conn_id = item_selected.connect(|(item, index)| {
//!     println!("Selected {item} at {index}");
//! });
//!
//! item_selected.emit(("Work".to_string(), 1));
//! item_selected.disconnect(conn_id);
//! ```
//!
//! # Background Work Example
//!
//! ```
//! use dropdown_menu_core::{SlotWorker, UiContext};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::time::Duration;
//!
//! let ctx = UiContext::new();
//! let proxy = ctx.proxy();
//! let worker = SlotWorker::new().unwrap();
//! let applied = Arc::new(AtomicBool::new(false));
//!
//! let applied_clone = applied.clone();
//! worker
//!     .submit(move |token| {
//!         if !token.is_cancelled() {
//!             let _ = proxy.post(move || applied_clone.store(true, Ordering::SeqCst));
//!         }
//!     })
//!     .unwrap();
//!
//! assert!(ctx.process_events_until(Duration::from_secs(5), || applied.load(Ordering::SeqCst)));
//! ```

pub mod cancellation;
mod context;
mod error;
pub mod invocation;
pub mod logging;
pub mod signal;
pub mod thread_check;
pub mod worker;

pub use cancellation::CancellationToken;
pub use context::{UiContext, UiProxy};
pub use error::{CoreError, Result, WorkerError};
pub use signal::{ConnectionId, Signal};
pub use worker::{SlotWorker, WorkerConfig, WorkerStats};
