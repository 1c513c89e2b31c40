// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-driven transitions between presented sheet geometries.
//!
//! A [`Transition`] interpolates a [`Presentation`] from a start value to a
//! target over a fixed duration. The sheet owns at most one transition at a
//! time and the host advances it by calling
//! [`SheetController::advance`](crate::SheetController::advance) once per
//! frame with the elapsed time.
//!
//! Starting a transition while another one is in flight cancels the old one
//! and restarts from whatever is currently presented, so the card never jumps.
//! Cancelled transitions never complete, so their completion notification is
//! never delivered.

use core::time::Duration;

/// The values a host needs to draw the sheet.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Presentation {
    /// Card height.
    pub height: f64,
    /// How far the card is pushed below its resting position. `0` when fully
    /// shown; equal to `height` when fully hidden.
    pub offset: f64,
    /// Overlay opacity.
    pub overlay_alpha: f32,
}

impl Presentation {
    /// Interpolates between `self` and `other`.
    ///
    /// `t` may leave `[0, 1]` for overshooting curves; the overlay alpha is
    /// clamped to `[0, 1]` regardless.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "Alpha interpolation does not need f64 precision"
        )]
        let alpha_t = t as f32;
        let alpha = self.overlay_alpha + (other.overlay_alpha - self.overlay_alpha) * alpha_t;
        Self {
            height: self.height + (other.height - self.height) * t,
            offset: self.offset + (other.offset - self.offset) * t,
            overlay_alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Returns `true` if the card is pushed completely out of view.
    #[must_use]
    pub fn is_fully_hidden(&self) -> bool {
        self.offset >= self.height
    }
}

/// Overshoot of the classic "back out" curve, used at the reference damping.
const BACK_OVERSHOOT: f64 = 1.70158;
/// Damping at which the spring curve reproduces [`BACK_OVERSHOOT`].
const REFERENCE_DAMPING: f64 = 0.7;

/// Timing curve of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quadratic ease in and out.
    #[default]
    EaseInOut,
    /// Spring-like settle with a small overshoot.
    ///
    /// `damping` in `(0, 1]`; lower values overshoot more, `1.0` settles
    /// without overshoot.
    Spring {
        /// Damping ratio.
        damping: f32,
    },
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress.
    ///
    /// The result is `0` at `t = 0` and `1` at `t = 1`; spring curves may
    /// exceed `1` in between.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::Spring { damping } => {
                let damping = f64::from(damping).clamp(0.0, 1.0);
                let c1 = BACK_OVERSHOOT * (1.0 - damping) / (1.0 - REFERENCE_DAMPING);
                let c3 = c1 + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u * u * u + c1 * u * u
            }
        }
    }
}

/// Identifier of a started transition.
///
/// Every transition a sheet starts gets a fresh id, which lets hosts tell a
/// restarted transition apart from the one it replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(pub(crate) u64);

impl TransitionId {
    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// What a transition is for, which decides the notification on completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Sheet slides in; completes with a visibility notification.
    Show,
    /// Sheet slides out; completes with a visibility notification.
    Hide,
    /// Height settles on a state; completes with a state notification.
    Resize,
    /// Height follows a content or layout change; completes silently.
    Relayout,
}

/// An in-flight interpolation between two presentations.
#[derive(Clone, Debug)]
pub struct Transition {
    id: TransitionId,
    kind: TransitionKind,
    from: Presentation,
    to: Presentation,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl Transition {
    pub(crate) fn new(
        id: TransitionId,
        kind: TransitionKind,
        from: Presentation,
        to: Presentation,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            id,
            kind,
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Returns the transition's id.
    #[must_use]
    pub fn id(&self) -> TransitionId {
        self.id
    }

    /// Returns what the transition is for.
    #[must_use]
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Returns the presentation the transition started from.
    #[must_use]
    pub fn from(&self) -> Presentation {
        self.from
    }

    /// Returns the presentation the transition ends at.
    #[must_use]
    pub fn target(&self) -> Presentation {
        self.to
    }

    /// Returns the total duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the timing curve.
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Linear progress in `[0, 1]`. Zero-length transitions report `1`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Returns `true` once the full duration has elapsed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Presentation at the current progress.
    #[must_use]
    pub fn sample(&self) -> Presentation {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(self.progress()))
    }

    /// Moves the transition forward by `dt` and returns the new presentation.
    pub(crate) fn advance(&mut self, dt: Duration) -> Presentation {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn transition(duration_ms: u64, easing: Easing) -> Transition {
        Transition::new(
            TransitionId(1),
            TransitionKind::Resize,
            Presentation {
                height: 300.0,
                offset: 0.0,
                overlay_alpha: 0.5,
            },
            Presentation {
                height: 600.0,
                offset: 0.0,
                overlay_alpha: 0.5,
            },
            Duration::from_millis(duration_ms),
            easing,
        )
    }

    #[test]
    fn easings_hit_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseInOut,
            Easing::Spring { damping: 0.7 },
            Easing::Spring { damping: 1.0 },
        ] {
            assert!(approx(easing.apply(0.0), 0.0), "{easing:?} at 0");
            assert!(approx(easing.apply(1.0), 1.0), "{easing:?} at 1");
        }
    }

    #[test]
    fn ease_in_out_is_symmetric_at_midpoint() {
        assert!(approx(Easing::EaseInOut.apply(0.5), 0.5));
        assert!(Easing::EaseInOut.apply(0.25) < 0.25);
        assert!(Easing::EaseInOut.apply(0.75) > 0.75);
    }

    #[test]
    fn spring_overshoots_only_when_underdamped() {
        let peak = |damping: f32| {
            (1..100)
                .map(|i| Easing::Spring { damping }.apply(f64::from(i) / 100.0))
                .fold(0.0_f64, f64::max)
        };
        assert!(peak(0.6) > 1.0);
        assert!(peak(0.6) > peak(0.7));
        assert!(peak(1.0) <= 1.0);
    }

    #[test]
    fn advance_interpolates_and_finishes() {
        let mut t = transition(100, Easing::Linear);
        assert!(!t.is_finished());

        let mid = t.advance(Duration::from_millis(50));
        assert!(approx(mid.height, 450.0));
        assert!(approx(t.progress(), 0.5));

        let end = t.advance(Duration::from_millis(80));
        assert!(t.is_finished());
        assert_eq!(end, t.target());
    }

    #[test]
    fn zero_duration_is_finished_immediately() {
        let mut t = transition(0, Easing::EaseInOut);
        assert!(t.is_finished());
        assert_eq!(t.progress(), 1.0);
        assert_eq!(t.advance(Duration::ZERO), t.target());
    }

    #[test]
    fn lerp_clamps_alpha() {
        let a = Presentation {
            height: 0.0,
            offset: 0.0,
            overlay_alpha: 0.0,
        };
        let b = Presentation {
            height: 100.0,
            offset: 0.0,
            overlay_alpha: 1.0,
        };
        assert_eq!(a.lerp(b, 1.2).overlay_alpha, 1.0);
        assert!(approx(a.lerp(b, 1.2).height, 120.0));
    }

    #[test]
    fn fully_hidden_when_offset_covers_height() {
        let p = Presentation {
            height: 300.0,
            offset: 300.0,
            overlay_alpha: 0.0,
        };
        assert!(p.is_fully_hidden());
        assert!(!Presentation { offset: 10.0, ..p }.is_fully_hidden());
    }
}
