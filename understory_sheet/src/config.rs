// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sheet configuration and validation.

use core::fmt;
use core::time::Duration;

use kurbo::Size;
use peniko::Color;
use smallvec::{SmallVec, smallvec};

use crate::state::CardState;

/// Ordered list of stop states.
pub type StateList = SmallVec<[CardState; 4]>;

/// Tunables for a sheet, fixed once the sheet is constructed.
///
/// Only a handful of fields drive the state machine: the state list, the
/// sizing mode, the gesture switches, the two durations, `header_height`
/// (adaptive max height) and the drag constants. The colors and header line
/// metrics are carried through for hosts and consumed by
/// [`SheetFrame`](crate::SheetFrame) only.
#[derive(Clone, Debug)]
pub struct SheetConfig {
    /// Stop states in increasing order; the first is the entry state.
    pub available_states: StateList,
    /// Size the sheet from the content's intrinsic height instead of states.
    pub is_adaptive_by_content: bool,
    /// Dismiss the sheet when the overlay is tapped or swiped.
    pub is_hide_on_background_tap: bool,
    /// Allow the header drag gesture to resize and dismiss the sheet.
    pub is_resizable_by_swipe: bool,
    /// Reserve space for the header above the content.
    pub is_header_visible: bool,
    /// Dim the host with the overlay while the sheet is shown.
    pub is_overlay_visible: bool,
    /// Height of the header strip holding the grabber line.
    pub header_height: f64,
    /// Duration of show/hide transitions.
    pub visible_animation_duration: Duration,
    /// Duration of resize and settle transitions.
    pub resize_animation_duration: Duration,
    /// Overlay opacity while shown, in `[0, 1]`.
    pub overlay_alpha: f32,
    /// Overlay fill.
    pub overlay_color: Color,
    /// Card background fill.
    pub card_color: Color,
    /// Grabber line fill.
    pub header_line_color: Color,
    /// Corner radius of the card's top edge.
    pub card_corner_radius: f64,
    /// Size of the grabber line.
    pub header_line_size: Size,
    /// Distance from the top of the card to the grabber line.
    pub header_line_top: f64,
    /// Scale applied to the drag velocity on each change sample.
    pub velocity_damping: f64,
    /// Divisor applied to the drag translation when stretching past the max height.
    pub rubber_band_divisor: f64,
    /// Largest overscroll allowed past the max height.
    pub rubber_band_limit: f64,
    /// Spring damping used when settling after a drag, in `(0, 1]`.
    pub settle_damping: f32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            available_states: smallvec![CardState::SMALL, CardState::MIDDLE, CardState::LARGE],
            is_adaptive_by_content: false,
            is_hide_on_background_tap: true,
            is_resizable_by_swipe: true,
            is_header_visible: true,
            is_overlay_visible: true,
            header_height: 20.0,
            visible_animation_duration: Duration::from_millis(300),
            resize_animation_duration: Duration::from_millis(300),
            overlay_alpha: 0.5,
            overlay_color: Color::from_rgba8(211, 211, 211, 255),
            card_color: Color::WHITE,
            header_line_color: Color::from_rgba8(199, 199, 204, 255),
            card_corner_radius: 6.0,
            header_line_size: Size::new(60.0, 6.0),
            header_line_top: 7.0,
            velocity_damping: 0.014,
            rubber_band_divisor: 5.0,
            rubber_band_limit: 60.0,
            settle_damping: 0.7,
        }
    }
}

impl SheetConfig {
    /// Creates a configuration with the given stop states and default tunables.
    #[must_use]
    pub fn with_states(states: impl IntoIterator<Item = CardState>) -> Self {
        Self {
            available_states: states.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Creates a content-adaptive configuration.
    ///
    /// The default state list is kept so the sheet can still report the
    /// nearest state while dragging.
    #[must_use]
    pub fn adaptive() -> Self {
        Self {
            is_adaptive_by_content: true,
            ..Self::default()
        }
    }

    /// Returns the entry state, if any.
    #[must_use]
    pub fn first_state(&self) -> Option<CardState> {
        self.available_states.first().copied()
    }

    /// Returns the fully expanded state, if any.
    #[must_use]
    pub fn last_state(&self) -> Option<CardState> {
        self.available_states.last().copied()
    }

    /// Checks the configuration for values the state machine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.available_states.is_empty() && !self.is_adaptive_by_content {
            return Err(ConfigError::NoStates);
        }
        let mut previous: Option<CardState> = None;
        for (index, state) in self.available_states.iter().copied().enumerate() {
            let fraction = state.fraction();
            if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
                return Err(ConfigError::FractionOutOfRange { index, fraction });
            }
            if let Some(prev) = previous {
                if fraction <= prev.fraction() {
                    return Err(ConfigError::StatesNotIncreasing { index });
                }
            }
            previous = Some(state);
        }
        if !self.overlay_alpha.is_finite() || !(0.0..=1.0).contains(&self.overlay_alpha) {
            return Err(ConfigError::OverlayAlphaOutOfRange(self.overlay_alpha));
        }
        if !self.header_height.is_finite() || self.header_height < 0.0 {
            return Err(ConfigError::InvalidTunable("header_height"));
        }
        if !self.velocity_damping.is_finite() || self.velocity_damping <= 0.0 {
            return Err(ConfigError::InvalidTunable("velocity_damping"));
        }
        if !self.rubber_band_divisor.is_finite() || self.rubber_band_divisor <= 0.0 {
            return Err(ConfigError::InvalidTunable("rubber_band_divisor"));
        }
        if !self.rubber_band_limit.is_finite() || self.rubber_band_limit < 0.0 {
            return Err(ConfigError::InvalidTunable("rubber_band_limit"));
        }
        if !self.settle_damping.is_finite()
            || self.settle_damping <= 0.0
            || self.settle_damping > 1.0
        {
            return Err(ConfigError::InvalidTunable("settle_damping"));
        }
        Ok(())
    }
}

/// Reasons a [`SheetConfig`] is rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Discrete sizing was requested without any stop states.
    NoStates,
    /// A state fraction is not in `(0, 1]`.
    FractionOutOfRange {
        /// Position of the offending state.
        index: usize,
        /// The rejected fraction.
        fraction: f64,
    },
    /// A state is not strictly larger than the one before it.
    StatesNotIncreasing {
        /// Position of the offending state.
        index: usize,
    },
    /// The overlay alpha is not in `[0, 1]`.
    OverlayAlphaOutOfRange(f32),
    /// A numeric tunable is negative, zero where it must be positive, or not finite.
    InvalidTunable(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStates => write!(f, "discrete sizing needs at least one state"),
            Self::FractionOutOfRange { index, fraction } => {
                write!(f, "state {index} has fraction {fraction}, expected (0, 1]")
            }
            Self::StatesNotIncreasing { index } => {
                write!(f, "state {index} is not larger than the state before it")
            }
            Self::OverlayAlphaOutOfRange(alpha) => {
                write!(f, "overlay alpha {alpha} is outside [0, 1]")
            }
            Self::InvalidTunable(name) => write!(f, "invalid value for `{name}`"),
        }
    }
}

impl core::error::Error for ConfigError {}
