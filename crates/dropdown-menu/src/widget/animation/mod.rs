//! Animation support for the dropdown menu.
//!
//! This module provides easing curves (including a damped spring) and a
//! frame-driven [`Transition`] for animating presentation values.
//!
//! # Example
//!
//! ```
//! use dropdown_menu::widget::animation::{AnimationOutcome, Easing, Transition};
//! use std::time::Duration;
//!
//! let mut opacity = Transition::new(0.0_f32)
//!     .with_easing(Easing::spring(0.7, 0.5))
//!     .with_duration(Duration::from_millis(500));
//!
//! opacity.animate_to(0.3);
//! let mut outcome = None;
//! while outcome.is_none() {
//!     outcome = opacity.advance(Duration::from_millis(16));
//! }
//! assert_eq!(outcome, Some(AnimationOutcome::Finished));
//! assert_eq!(opacity.value(), 0.3);
//! ```

mod easing;
mod transition;

pub use easing::{Easing, ease};
pub use transition::{AnimationOutcome, Interpolate, Transition};
