//! Value transitions driven by explicit frame ticks.
//!
//! A [`Transition`] animates a value of any [`Interpolate`] type from where it
//! currently is toward a target. The host advances it with the elapsed frame
//! time; nothing here reads a clock, so runs are fully deterministic.

use std::time::Duration;

use super::easing::{Easing, ease};
use crate::logging::targets;

/// Values that can be blended between two endpoints.
pub trait Interpolate: Copy {
    /// Blend from `self` to `to`; `t` is eased progress and may leave 0..=1
    /// for overshooting curves.
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

/// How a transition run ended.
///
/// Every run started with [`Transition::animate_to`] ends with exactly one
/// outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// The value reached its target.
    Finished,
    /// A newer run replaced this one before it finished.
    Retargeted,
}

/// An animation controller for a single value.
#[derive(Debug, Clone)]
pub struct Transition<T: Interpolate> {
    easing: Easing,
    duration: Duration,
    /// Value when the current run started.
    from: T,
    /// Value the current run heads toward.
    to: T,
    /// Current animated value.
    value: T,
    elapsed: Duration,
    running: bool,
}

impl<T: Interpolate> Transition<T> {
    /// Create an idle transition resting at `value`.
    pub fn new(value: T) -> Self {
        Self {
            easing: Easing::default(),
            duration: Duration::from_millis(250),
            from: value,
            to: value,
            value,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    /// Set the easing curve (builder pattern).
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the duration (builder pattern).
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Get the easing curve.
    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Set the easing curve. Applies to runs started afterwards.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Get the duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Set the duration. Applies to runs started afterwards.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// The current animated value.
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    /// The value the current (or last) run heads toward.
    #[inline]
    pub fn target(&self) -> T {
        self.to
    }

    /// Check if a run is in progress.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Jump to `value` without animating.
    ///
    /// Any run in progress is abandoned; returns its outcome
    /// ([`AnimationOutcome::Retargeted`]) if there was one.
    pub fn set_value(&mut self, value: T) -> Option<AnimationOutcome> {
        let superseded = self.running.then_some(AnimationOutcome::Retargeted);
        self.from = value;
        self.to = value;
        self.value = value;
        self.elapsed = Duration::ZERO;
        self.running = false;
        superseded
    }

    /// Start a run from the current value toward `target`.
    ///
    /// If a run was already in progress it ends here and its outcome
    /// ([`AnimationOutcome::Retargeted`]) is returned; the new run continues
    /// from the value the old one had reached.
    pub fn animate_to(&mut self, target: T) -> Option<AnimationOutcome> {
        let superseded = self.running.then_some(AnimationOutcome::Retargeted);
        if superseded.is_some() {
            tracing::trace!(target: targets::ANIMATION, "transition retargeted");
        }
        self.from = self.value;
        self.to = target;
        self.elapsed = Duration::ZERO;
        self.running = true;
        superseded
    }

    /// Advance the run by `dt`.
    ///
    /// Returns [`AnimationOutcome::Finished`] on the tick that completes the
    /// run and `None` otherwise (including when idle). A zero-length run
    /// completes on its first tick.
    pub fn advance(&mut self, dt: Duration) -> Option<AnimationOutcome> {
        if !self.running {
            return None;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        let progress = self.linear_progress();

        if progress >= 1.0 {
            self.value = self.to;
            self.running = false;
            tracing::trace!(target: targets::ANIMATION, "transition finished");
            return Some(AnimationOutcome::Finished);
        }

        self.value = self.from.interpolate(&self.to, ease(self.easing, progress));
        None
    }

    fn linear_progress(&self) -> f32 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }
}

impl<T: Interpolate + Default> Default for Transition<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
