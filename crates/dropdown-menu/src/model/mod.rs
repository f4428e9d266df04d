//! List model for the dropdown menu.
//!
//! - [`filter_items`]: the two-tier (prefix, then substring) matching rule
//! - [`FilterEngine`]: master list plus a background-filtered view
//! - [`ListDataProvider`]: the sectioned data contract a renderer consumes
//!
//! ```text
//! set_query ──> SlotWorker ──> UiProxy::post ──> FilterEngine (generation check)
//!                                                     │
//!                                               rows_changed
//!                                                     │
//!                                                     v
//!                                        ListDataProvider ──> renderer
//! ```

mod filter;
mod traits;

pub use filter::{FilterEngine, filter_items, filter_items_cancellable};
pub use traits::{ListDataProvider, ListSection, RowContent};
