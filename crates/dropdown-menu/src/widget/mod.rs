//! Widget layer of the dropdown menu.
//!
//! Widgets here hold presentation state only. They never draw: a renderer
//! pumps the [`UiContext`](dropdown_menu_core::UiContext), calls
//! [`DropdownMenu::advance`](widgets::DropdownMenu::advance) once per frame,
//! and then reads frames, opacities and rows back out.
//!
//! - [`animation`]: Easing curves and frame-driven transitions
//! - [`widgets`]: The dropdown menu and its navigation container

pub mod animation;
pub mod widgets;
