// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Height bounds, target heights and the snap-distance rule.
//!
//! Everything here is a pure function of the container height, the
//! configuration and the content measurement, so the controller can recompute
//! eagerly whenever one of them changes.
//!
//! ```
//! use understory_sheet::{CardState, SheetBounds, SizingMode, nearest_state};
//!
//! let states = [CardState::SMALL, CardState::MIDDLE, CardState::LARGE];
//! let bounds = SheetBounds::compute(SizingMode::Discrete, &states, 1000.0, None, 0.0);
//! assert_eq!(bounds.min, 150.0);
//! assert_eq!(bounds.max, 950.0);
//!
//! // 750 is 150 away from `middle` and 200 away from `large`.
//! let (index, state) = nearest_state(&states, 1000.0, 750.0).unwrap();
//! assert_eq!((index, state), (1, CardState::MIDDLE));
//! ```

use crate::state::CardState;

/// How the sheet derives its heights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SizingMode {
    /// Heights come from the configured stop states.
    #[default]
    Discrete,
    /// Heights come from the content's intrinsic height.
    AdaptiveToContent,
}

/// Which rule currently owns the card height.
///
/// In adaptive mode the height normally follows the content. While the user
/// drags the header the controller holds the height itself so the card can be
/// stretched past the content height, then hands it back on release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SizingRule {
    /// Height follows the content measurement.
    #[default]
    FollowContent,
    /// Height is held by the controller.
    Fixed,
}

/// Minimum and maximum card heights.
///
/// Dragging below `min` dismisses the sheet; dragging above `max` is
/// rubber-banded.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SheetBounds {
    /// Dismissal threshold.
    pub min: f64,
    /// Upper bound for resting heights.
    pub max: f64,
}

impl SheetBounds {
    /// Computes bounds for the given mode.
    ///
    /// - Discrete: `min` is half of the first state's height, `max` is the
    ///   last state's height.
    /// - Adaptive: `min` is half of the content height, `max` is the content
    ///   height plus `header_height`. Unmeasured content yields `min = 0` and
    ///   `max = container_height`.
    ///
    /// Callers pass `header_height = 0.0` when the header is hidden.
    #[must_use]
    pub fn compute(
        mode: SizingMode,
        states: &[CardState],
        container_height: f64,
        content_height: Option<f64>,
        header_height: f64,
    ) -> Self {
        match mode {
            SizingMode::Discrete => {
                let min = states
                    .first()
                    .map_or(0.0, |s| container_height / 2.0 * s.fraction());
                let max = states
                    .last()
                    .map_or(container_height, |s| s.height_in(container_height));
                Self { min, max }
            }
            SizingMode::AdaptiveToContent => match content_height {
                Some(content) => Self {
                    min: content / 2.0,
                    max: content + header_height,
                },
                None => Self {
                    min: 0.0,
                    max: container_height,
                },
            },
        }
    }

    /// Resting height for `state` under these bounds.
    #[must_use]
    pub fn target_height(&self, mode: SizingMode, state: CardState, container_height: f64) -> f64 {
        match mode {
            SizingMode::Discrete => state.height_in(container_height),
            SizingMode::AdaptiveToContent => self.max,
        }
    }
}

/// Finds the state whose resolved height is closest to `height`.
///
/// Ties go to the earlier state. Returns `None` when `states` is empty.
#[must_use]
pub fn nearest_state(
    states: &[CardState],
    container_height: f64,
    height: f64,
) -> Option<(usize, CardState)> {
    let mut best: Option<(usize, CardState, f64)> = None;
    for (index, state) in states.iter().copied().enumerate() {
        let distance = (state.height_in(container_height) - height).abs();
        match best {
            Some((_, _, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, state, distance)),
        }
    }
    best.map(|(index, state, _)| (index, state))
}
