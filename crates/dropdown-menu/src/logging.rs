//! Logging for the widget crate.
//!
//! Targets and span names are shared with `dropdown-menu-core`; see
//! [`dropdown_menu_core::logging`] for how to install a subscriber.

pub use dropdown_menu_core::logging::{span_names, targets};

/// Install a compact `tracing` subscriber for tests.
///
/// Honors `RUST_LOG`; repeated calls are harmless.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
