//! Easing curves for menu transitions.
//!
//! An easing curve maps linear progress (0.0 to 1.0) to eased progress. All
//! curves return exactly 0.0 at the start and 1.0 at the end; in between the
//! spring curve may overshoot past 1.0.

/// Envelope decay reached by the spring at the end of its duration: the
/// remaining oscillation is 1/1000 of the travelled distance.
const SPRING_SETTLE_LN: f32 = 6.907_755; // ln(1000)

/// Smallest damping ratio the spring accepts.
const MIN_DAMPING: f32 = 0.01;

/// Available easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    #[default]
    Linear,
    /// Damped spring settling within the animation duration.
    ///
    /// `damping` is the damping ratio: values below 1.0 oscillate around the
    /// target before settling, 1.0 and above approach it without overshoot.
    /// `velocity` is the initial velocity in units of total distance per
    /// animation duration.
    Spring {
        damping: f32,
        velocity: f32,
    },
}

impl Easing {
    /// Spring curve with the given damping ratio and initial velocity.
    pub fn spring(damping: f32, velocity: f32) -> Self {
        Self::Spring { damping, velocity }
    }
}

/// Apply an easing curve to a progress value.
///
/// # Example
///
/// ```
/// use dropdown_menu::widget::animation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.5), 0.5);
/// assert!(ease(Easing::spring(1.0, 0.0), 0.5) > 0.5);
/// assert_eq!(ease(Easing::spring(0.7, 0.5), 1.0), 1.0);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        Easing::Linear => t,
        Easing::Spring { damping, velocity } => spring(damping, velocity, t),
    }
}

// =============================================================================
// Spring
// =============================================================================

/// Displacement of a unit step response of a damped harmonic oscillator.
///
/// The natural frequency is chosen so the envelope has decayed to
/// `1 / 1000` at `t == 1`; the curve snaps to 1.0 there.
fn spring(damping: f32, velocity: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let zeta = damping.max(MIN_DAMPING);
    if zeta < 1.0 {
        let omega = SPRING_SETTLE_LN / zeta;
        let decay = zeta * omega;
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let envelope = (-decay * t).exp();
        1.0 - envelope * ((omega_d * t).cos() + ((decay - velocity) / omega_d) * (omega_d * t).sin())
    } else {
        let omega = SPRING_SETTLE_LN;
        1.0 - (-omega * t).exp() * (1.0 + (omega - velocity) * t)
    }
}
