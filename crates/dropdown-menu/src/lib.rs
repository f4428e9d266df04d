//! Dropdown Menu - a sliding, filterable overlay menu for navigation UIs.
//!
//! This is the widget crate; it re-exports the runtime from
//! `dropdown-menu-core`.
//!
//! # Example
//!
//! ```
//! use dropdown_menu::prelude::*;
//! use std::time::Duration;
//!
//! let ctx = UiContext::new();
//! let mut container = NavigationContainer::new(Rect::new(0.0, 0.0, 390.0, 844.0), 64.0);
//!
//! let items = ["Julianne", "Eddie", "Patricia", "J.K.", "Alejandro"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let menu = DropdownMenu::new(items, &ctx).with_search_enabled(true);
//! container.set_dropdown_menu(Some(menu));
//!
//! let menu = container.dropdown_menu_mut().unwrap();
//! menu.show();
//! menu.set_query("j");
//!
//! // Host frame loop: deliver background results, then animate.
//! ctx.process_events_until(Duration::from_secs(5), || !menu.is_filter_pending());
//! while menu.is_animating() {
//!     menu.advance(Duration::from_millis(16));
//! }
//!
//! assert_eq!(menu.filtered_items(), vec!["Julianne", "J.K."]);
//! assert_eq!(menu.state(), PresentationState::Shown);
//! ```

pub use dropdown_menu_core::*;

pub mod config;
pub mod geometry;
pub mod logging;
pub mod model;
pub mod prelude;
pub mod widget;

pub use config::{ConfigError, ConfigResult, MenuConfig};
pub use geometry::{Color, ParseColorError, Point, Rect, Size};
pub use widget::widgets::{
    AttachError, DropdownMenu, HostMetrics, NavigationContainer, PanelGeometry, PresentationState,
};
