//! Widgets provided by this crate.
//!
//! - [`DropdownMenu`]: Sliding, filterable menu beneath a navigation bar
//! - [`NavigationContainer`]: Host screen with a single dropdown menu slot

mod dropdown_menu;
mod navigation_container;

pub use dropdown_menu::{DropdownMenu, HostMetrics, PanelGeometry, PresentationState};
pub use navigation_container::{AttachError, NavigationContainer};
