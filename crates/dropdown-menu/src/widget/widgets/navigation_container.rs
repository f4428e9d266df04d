//! Navigation container with a dropdown menu slot.
//!
//! A [`NavigationContainer`] describes a host screen: its content region and
//! the height of the navigation bar across the top. Each container has a
//! single slot for a [`DropdownMenu`]; attaching a menu records the host
//! geometry on it so it can lay itself out beneath the bar.
//!
//! # Example
//!
//! ```
//! use dropdown_menu::prelude::*;
//!
//! let ctx = UiContext::new();
//! let mut container = NavigationContainer::new(Rect::new(0.0, 0.0, 390.0, 844.0), 64.0);
//!
//! let first = DropdownMenu::new(vec!["1".into(), "2".into()], &ctx);
//! assert!(container.set_dropdown_menu(Some(first)).is_none());
//!
//! // The checked variant refuses to replace an attached menu.
//! let second = DropdownMenu::new(vec!["3".into()], &ctx);
//! let err = container.try_set_dropdown_menu(second).unwrap_err();
//! assert_eq!(err.into_menu().items(), vec!["3".to_string()]);
//!
//! let detached = container.take_dropdown_menu().unwrap();
//! assert!(!detached.is_attached());
//! ```

use crate::geometry::Rect;
use crate::logging::targets;

use super::dropdown_menu::{DropdownMenu, HostMetrics};

/// Error returned by [`NavigationContainer::try_set_dropdown_menu`].
#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    /// The container already has a menu; the rejected menu is handed back.
    #[error("navigation container already has a dropdown menu attached")]
    SlotOccupied(Box<DropdownMenu>),
}

impl AttachError {
    /// Recover the menu that could not be attached.
    pub fn into_menu(self) -> DropdownMenu {
        match self {
            AttachError::SlotOccupied(menu) => *menu,
        }
    }
}

/// A host screen with a navigation bar and a dropdown menu slot.
#[derive(Debug)]
pub struct NavigationContainer {
    content_bounds: Rect,
    navigation_bar_height: f32,
    dropdown_menu: Option<DropdownMenu>,
}

impl NavigationContainer {
    /// Create a container with the given content region and navigation bar
    /// height. The bar sits at the top of the content region.
    pub fn new(content_bounds: Rect, navigation_bar_height: f32) -> Self {
        Self {
            content_bounds,
            navigation_bar_height: navigation_bar_height.max(0.0),
            dropdown_menu: None,
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// The content region.
    pub fn content_bounds(&self) -> Rect {
        self.content_bounds
    }

    /// Set the content region, e.g. after a rotation.
    pub fn set_content_bounds(&mut self, bounds: Rect) {
        self.content_bounds = bounds;
        self.propagate_metrics();
    }

    /// Height of the navigation bar.
    pub fn navigation_bar_height(&self) -> f32 {
        self.navigation_bar_height
    }

    /// Set the navigation bar height.
    pub fn set_navigation_bar_height(&mut self, height: f32) {
        self.navigation_bar_height = height.max(0.0);
        self.propagate_metrics();
    }

    /// Geometry handed to an attached menu.
    pub fn host_metrics(&self) -> HostMetrics {
        HostMetrics {
            content_bounds: self.content_bounds,
            navigation_bar_bottom: self.content_bounds.top() + self.navigation_bar_height,
        }
    }

    fn propagate_metrics(&mut self) {
        let metrics = self.host_metrics();
        if let Some(menu) = self.dropdown_menu.as_mut() {
            menu.update_host_metrics(metrics);
        }
    }

    // =========================================================================
    // Dropdown Menu Slot
    // =========================================================================

    /// The attached menu, if any.
    pub fn dropdown_menu(&self) -> Option<&DropdownMenu> {
        self.dropdown_menu.as_ref()
    }

    /// Mutable access to the attached menu, if any.
    pub fn dropdown_menu_mut(&mut self) -> Option<&mut DropdownMenu> {
        self.dropdown_menu.as_mut()
    }

    /// Whether a menu is attached.
    pub fn has_dropdown_menu(&self) -> bool {
        self.dropdown_menu.is_some()
    }

    /// Attach `menu`, or clear the slot with `None`.
    ///
    /// A menu already in the slot is detached and returned.
    pub fn set_dropdown_menu(&mut self, menu: Option<DropdownMenu>) -> Option<DropdownMenu> {
        let previous = self.take_dropdown_menu();
        if previous.is_some() {
            tracing::debug!(target: targets::CONTAINER, "replacing attached dropdown menu");
        }

        if let Some(mut menu) = menu {
            menu.attach(self.host_metrics());
            self.dropdown_menu = Some(menu);
        }
        previous
    }

    /// Attach `menu` only if the slot is empty.
    pub fn try_set_dropdown_menu(&mut self, menu: DropdownMenu) -> Result<(), AttachError> {
        if self.dropdown_menu.is_some() {
            tracing::warn!(target: targets::CONTAINER, "dropdown menu slot already occupied");
            return Err(AttachError::SlotOccupied(Box::new(menu)));
        }
        self.set_dropdown_menu(Some(menu));
        Ok(())
    }

    /// Detach and return the attached menu.
    pub fn take_dropdown_menu(&mut self) -> Option<DropdownMenu> {
        let mut menu = self.dropdown_menu.take()?;
        menu.detach();
        Some(menu)
    }
}
