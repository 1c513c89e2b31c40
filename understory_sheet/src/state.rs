// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete stop states a sheet can snap to.

use core::fmt;

/// A named stop height, expressed as a fraction of the container height.
///
/// States are plain values. A sheet is configured with an ordered list of
/// them; the first entry is the collapsed/entry state and the last one is the
/// fully expanded bound. Fractions are expected to lie in `(0, 1]` and to
/// increase along the list, which [`SheetConfig::validate`] enforces.
///
/// [`SheetConfig::validate`]: crate::SheetConfig::validate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardState {
    name: &'static str,
    fraction: f64,
}

impl CardState {
    /// Roughly a third of the container.
    pub const SMALL: Self = Self::new("small", 0.3);
    /// Slightly more than half of the container.
    pub const MIDDLE: Self = Self::new("middle", 0.6);
    /// Nearly the whole container, leaving a sliver of the host visible.
    pub const LARGE: Self = Self::new("large", 0.95);

    /// Creates a caller-defined state.
    #[must_use]
    pub const fn new(name: &'static str, fraction: f64) -> Self {
        Self { name, fraction }
    }

    /// Returns the state's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Returns the fraction of the container height this state occupies.
    #[must_use]
    pub const fn fraction(self) -> f64 {
        self.fraction
    }

    /// Resolves the state against a concrete container height.
    #[must_use]
    pub fn height_in(self, container_height: f64) -> f64 {
        container_height * self.fraction
    }
}

impl fmt::Display for CardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_states_increase() {
        assert!(CardState::SMALL.fraction() < CardState::MIDDLE.fraction());
        assert!(CardState::MIDDLE.fraction() < CardState::LARGE.fraction());
    }

    #[test]
    fn height_in_scales_by_fraction() {
        assert_eq!(CardState::MIDDLE.height_in(1000.0), 600.0);
        assert_eq!(CardState::new("half", 0.5).height_in(300.0), 150.0);
    }

    #[test]
    fn equality_includes_name() {
        assert_ne!(CardState::new("a", 0.5), CardState::new("b", 0.5));
        assert_eq!(CardState::SMALL, CardState::new("small", 0.3));
    }
}
