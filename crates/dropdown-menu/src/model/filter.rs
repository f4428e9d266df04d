//! Filterable item list.
//!
//! [`filter_items`] is the matching rule: case-insensitive, prefix matches
//! first, then the remaining substring matches, each group in original order.
//!
//! [`FilterEngine`] owns the master list and the filtered view. Query changes
//! are matched on a [`SlotWorker`] and the result is posted back to the UI
//! context. Every request carries a generation number; a result is applied
//! only if its generation is still the latest one submitted, so a slow,
//! superseded query can never overwrite a newer one.
//!
//! # Example
//!
//! ```
//! use dropdown_menu::model::filter_items;
//!
//! let items: Vec<String> = ["Apple", "Pineapple", "apple"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! assert_eq!(filter_items(&items, "apple"), vec!["Apple", "apple", "Pineapple"]);
//! ```

use std::sync::{Arc, Weak};

use dropdown_menu_core::{
    CancellationToken, Signal, SlotWorker, UiContext, UiProxy, WorkerConfig, WorkerError,
};
use parking_lot::Mutex;

use crate::logging::{span_names, targets};

/// How many items are matched between cancellation checks.
const CANCEL_CHECK_INTERVAL: usize = 256;

// ============================================================================
// Matching
// ============================================================================

/// Filter `items` by `query`.
///
/// Leading and trailing whitespace in `query` is ignored; an empty query
/// returns every item.
pub fn filter_items(items: &[String], query: &str) -> Vec<String> {
    filter_items_cancellable(items, query, &CancellationToken::new()).unwrap_or_default()
}

/// Filter `items` by `query`, giving up early once `token` is cancelled.
///
/// Returns `None` if cancelled.
pub fn filter_items_cancellable(
    items: &[String],
    query: &str,
    token: &CancellationToken,
) -> Option<Vec<String>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Some(items.to_vec());
    }

    let mut prefix_matches = Vec::new();
    let mut substring_matches = Vec::new();

    for (i, item) in items.iter().enumerate() {
        if i % CANCEL_CHECK_INTERVAL == 0 && token.is_cancelled() {
            return None;
        }

        let haystack = item.to_lowercase();
        if haystack.starts_with(&needle) {
            prefix_matches.push(item.clone());
        } else if haystack.contains(&needle) {
            substring_matches.push(item.clone());
        }
    }

    prefix_matches.append(&mut substring_matches);
    Some(prefix_matches)
}

// ============================================================================
// Filter Engine
// ============================================================================

#[derive(Debug)]
struct FilterState {
    items: Arc<[String]>,
    query: String,
    filtered: Vec<String>,
    /// Generation of the latest request.
    generation: u64,
    /// Generation of the request whose result is in `filtered`.
    applied_generation: u64,
    last_applied_query: String,
}

impl FilterState {
    fn apply(&mut self, generation: u64, query: String, filtered: Vec<String>) -> Option<usize> {
        if generation != self.generation {
            tracing::trace!(
                target: targets::FILTER,
                generation,
                latest = self.generation,
                "discarding stale filter result"
            );
            return None;
        }

        self.filtered = filtered;
        self.applied_generation = generation;
        self.last_applied_query = query;
        Some(self.filtered.len())
    }
}

/// Master item list plus a background-filtered view of it.
pub struct FilterEngine {
    state: Arc<Mutex<FilterState>>,
    worker: Option<SlotWorker>,
    proxy: UiProxy,
    /// Emitted on the UI context with the new row count whenever the
    /// filtered view changes.
    pub rows_changed: Arc<Signal<usize>>,
}

impl std::fmt::Debug for FilterEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("FilterEngine")
            .field("items", &state.items.len())
            .field("query", &state.query)
            .field("filtered", &state.filtered.len())
            .field("generation", &state.generation)
            .finish()
    }
}

impl FilterEngine {
    /// Create an engine whose results are delivered on `ctx`.
    ///
    /// The filtered view starts out equal to `items`.
    pub fn new(items: Vec<String>, ctx: &UiContext) -> Self {
        let worker = match SlotWorker::with_config(WorkerConfig::with_name("dropdown-menu-filter")) {
            Ok(worker) => Some(worker),
            Err(err) => {
                tracing::error!(target: targets::FILTER, %err, "filter worker unavailable, matching inline");
                None
            }
        };

        Self {
            state: Arc::new(Mutex::new(FilterState {
                filtered: items.clone(),
                items: items.into(),
                query: String::new(),
                generation: 0,
                applied_generation: 0,
                last_applied_query: String::new(),
            })),
            worker,
            proxy: ctx.proxy(),
            rows_changed: Arc::new(Signal::new()),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The master item list.
    pub fn items(&self) -> Vec<String> {
        self.state.lock().items.to_vec()
    }

    /// The current (trimmed) query.
    pub fn query(&self) -> String {
        self.state.lock().query.clone()
    }

    /// The query whose result is currently displayed.
    pub fn last_applied_query(&self) -> String {
        self.state.lock().last_applied_query.clone()
    }

    /// Snapshot of the filtered view.
    pub fn filtered_items(&self) -> Vec<String> {
        self.state.lock().filtered.clone()
    }

    /// Number of rows in the filtered view.
    pub fn row_count(&self) -> usize {
        self.state.lock().filtered.len()
    }

    /// The filtered item at `row`, if any.
    pub fn item_at(&self, row: usize) -> Option<String> {
        self.state.lock().filtered.get(row).cloned()
    }

    /// Whether a submitted query has not been applied yet.
    pub fn is_pending(&self) -> bool {
        let state = self.state.lock();
        state.generation != state.applied_generation
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Replace the master list and re-apply the current query.
    ///
    /// With an empty query the full list is applied immediately and any
    /// in-flight result is invalidated.
    pub fn set_items(&self, items: Vec<String>) {
        let mut state = self.state.lock();
        state.items = items.into();

        if !state.query.is_empty() {
            let query = state.query.clone();
            drop(state);
            self.set_query(&query);
            return;
        }

        state.generation += 1;
        let generation = state.generation;
        let filtered = state.items.to_vec();
        let applied = state.apply(generation, String::new(), filtered);
        drop(state);

        tracing::debug!(target: targets::FILTER, generation, "items replaced");
        if let Some(count) = applied {
            self.rows_changed.emit(count);
        }
    }

    /// Change the query and schedule a new match.
    ///
    /// Any in-flight match is cancelled. The result is applied on the UI
    /// context the next time it is pumped.
    pub fn set_query(&self, text: &str) {
        let query = text.trim().to_string();
        let (generation, items) = {
            let mut state = self.state.lock();
            state.query = query.clone();
            state.generation += 1;
            (state.generation, state.items.clone())
        };

        tracing::debug!(target: targets::FILTER, generation, query = %query, "query changed");

        let submitted = match &self.worker {
            Some(worker) => self.submit(worker, generation, query.clone(), items.clone()),
            None => Err(WorkerError::Stopped),
        };

        if let Err(err) = submitted {
            tracing::warn!(target: targets::FILTER, %err, "matching inline");
            let filtered = filter_items(&items, &query);
            apply_result(&self.state, &self.rows_changed, generation, query, filtered);
        }
    }

    fn submit(
        &self,
        worker: &SlotWorker,
        generation: u64,
        query: String,
        items: Arc<[String]>,
    ) -> Result<CancellationToken, WorkerError> {
        let state = Arc::downgrade(&self.state);
        let rows_changed = Arc::downgrade(&self.rows_changed);
        let proxy = self.proxy.clone();

        worker.submit(move |token| {
            let _span = tracing::trace_span!(span_names::FILTER_RUN, generation).entered();

            let Some(filtered) = filter_items_cancellable(&items, &query, token) else {
                tracing::trace!(target: targets::FILTER, generation, "filter run cancelled");
                return;
            };
            if token.is_cancelled() {
                return;
            }

            let posted = proxy.post(move || {
                deliver(&state, &rows_changed, generation, query, filtered);
            });
            if posted.is_err() {
                tracing::debug!(target: targets::FILTER, generation, "UI context closed, dropping result");
            }
        })
    }
}

static_assertions::assert_impl_all!(FilterEngine: Send, Sync);

fn deliver(
    state: &Weak<Mutex<FilterState>>,
    rows_changed: &Weak<Signal<usize>>,
    generation: u64,
    query: String,
    filtered: Vec<String>,
) {
    let (Some(state), Some(rows_changed)) = (state.upgrade(), rows_changed.upgrade()) else {
        return;
    };
    apply_result(&state, &rows_changed, generation, query, filtered);
}

fn apply_result(
    state: &Mutex<FilterState>,
    rows_changed: &Signal<usize>,
    generation: u64,
    query: String,
    filtered: Vec<String>,
) {
    let applied = state.lock().apply(generation, query, filtered);
    if let Some(count) = applied {
        tracing::debug!(target: targets::FILTER, generation, rows = count, "filter result applied");
        rows_changed.emit(count);
    }
}
