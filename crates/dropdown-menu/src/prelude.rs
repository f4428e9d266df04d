//! Prelude module for the dropdown menu.
//!
//! ```
//! use dropdown_menu::prelude::*;
//! ```
//!
//! This provides access to:
//! - Runtime (`UiContext`, `UiProxy`, `Signal`)
//! - The widgets (`DropdownMenu`, `NavigationContainer`)
//! - List data (`ListDataProvider`, `ListSection`, `RowContent`)
//! - Configuration and geometry (`MenuConfig`, `Rect`, `Color`)

// ============================================================================
// Runtime
// ============================================================================

pub use crate::{ConnectionId, Signal, UiContext, UiProxy};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::widgets::{
    AttachError, DropdownMenu, HostMetrics, NavigationContainer, PanelGeometry, PresentationState,
};

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{ListDataProvider, ListSection, RowContent};

// ============================================================================
// Configuration and Geometry
// ============================================================================

pub use crate::config::MenuConfig;
pub use crate::geometry::{Color, Point, Rect, Size};
pub use crate::widget::animation::{AnimationOutcome, Easing};
