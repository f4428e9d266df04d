//! Logging facilities for the dropdown menu.
//!
//! The runtime and widget crates use the `tracing` crate for instrumentation.
//! To see logs, install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("dropdown_menu=debug,dropdown_menu_core=info")
//!         .init();
//! }
//! ```
//!
//! Every event carries one of the [`targets`] below so subsystems can be
//! filtered independently.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core runtime target.
    pub const CORE: &str = "dropdown_menu_core";
    /// UI context (posted invocations, event pumping).
    pub const CONTEXT: &str = "dropdown_menu_core::context";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "dropdown_menu_core::signal";
    /// Single-slot background worker target.
    pub const WORKER: &str = "dropdown_menu_core::worker";
    /// Widget crate target.
    pub const MENU: &str = "dropdown_menu::menu";
    /// Filter engine target.
    pub const FILTER: &str = "dropdown_menu::filter";
    /// Animation target.
    pub const ANIMATION: &str = "dropdown_menu::animation";
    /// Navigation container and attachment slot target.
    pub const CONTAINER: &str = "dropdown_menu::container";
    /// Configuration loading target.
    pub const CONFIG: &str = "dropdown_menu::config";
}

/// Span names used for tracing.
pub mod span_names {
    /// Draining the UI context queue.
    pub const PROCESS_EVENTS: &str = "dropdown_menu::process_events";
    /// Running one filter job on the worker.
    pub const FILTER_RUN: &str = "dropdown_menu::filter_run";
}

/// Install a compact `tracing` subscriber for tests and examples.
///
/// Honors `RUST_LOG`; repeated calls are harmless.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
