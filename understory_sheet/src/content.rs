// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content adapter: wraps caller content for embedding in a sheet.
//!
//! The sheet never looks inside the content. It only needs the content's
//! measured intrinsic height (for adaptive sizing) and a way to hand the
//! content back to the host for rendering.
//!
//! Content comes either from a view the caller already has, or from a named
//! layout resource resolved through a [`LayoutResolver`]:
//!
//! ```
//! use understory_sheet::{LayoutResolver, SheetContent};
//!
//! struct Layouts;
//!
//! impl LayoutResolver<&'static str> for Layouts {
//!     fn resolve(&self, name: &str) -> Option<&'static str> {
//!         (name == "Details").then_some("details-view")
//!     }
//! }
//!
//! let content = SheetContent::from_layout("Details", &Layouts).unwrap();
//! assert_eq!(*content.view(), "details-view");
//! assert!(SheetContent::from_layout("Missing", &Layouts).is_err());
//! ```

use alloc::string::String;
use core::fmt;

/// Resolves named layout resources into views.
pub trait LayoutResolver<V> {
    /// Instantiates the layout called `name`, or `None` if it does not exist
    /// or cannot be turned into a view.
    fn resolve(&self, name: &str) -> Option<V>;
}

/// Caller content plus its measured intrinsic height.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetContent<V> {
    view: V,
    intrinsic_height: Option<f64>,
}

impl<V> SheetContent<V> {
    /// Wraps an existing view. The intrinsic height is unknown until measured.
    #[must_use]
    pub fn new(view: V) -> Self {
        Self {
            view,
            intrinsic_height: None,
        }
    }

    /// Wraps an existing view whose height is already known.
    #[must_use]
    pub fn with_intrinsic_height(view: V, height: f64) -> Self {
        Self {
            view,
            intrinsic_height: sanitize(Some(height)),
        }
    }

    /// Instantiates a named layout resource.
    ///
    /// A missing layout is a packaging mistake rather than a runtime
    /// condition; hosts usually treat the error as fatal.
    pub fn from_layout<R>(name: &str, resolver: &R) -> Result<Self, ContentError>
    where
        R: LayoutResolver<V> + ?Sized,
    {
        match resolver.resolve(name) {
            Some(view) => Ok(Self::new(view)),
            None => Err(ContentError::UnresolvedLayout {
                name: String::from(name),
            }),
        }
    }

    /// Returns the wrapped view.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Returns the wrapped view mutably.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Unwraps the view.
    #[must_use]
    pub fn into_view(self) -> V {
        self.view
    }

    /// Returns the measured intrinsic height, if any.
    #[must_use]
    pub fn intrinsic_height(&self) -> Option<f64> {
        self.intrinsic_height
    }

    /// Records a new measurement. Negative and non-finite values clear it.
    pub fn set_intrinsic_height(&mut self, height: Option<f64>) {
        self.intrinsic_height = sanitize(height);
    }
}

fn sanitize(height: Option<f64>) -> Option<f64> {
    height.filter(|h| h.is_finite() && *h >= 0.0)
}

/// Content could not be produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentError {
    /// No layout resource with this name could be turned into a view.
    UnresolvedLayout {
        /// The requested layout name.
        name: String,
    },
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedLayout { name } => {
                write!(f, "layout `{name}` could not be resolved to a view")
            }
        }
    }
}

impl core::error::Error for ContentError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    struct OnlyFoo;

    impl LayoutResolver<u32> for OnlyFoo {
        fn resolve(&self, name: &str) -> Option<u32> {
            (name == "foo").then_some(7)
        }
    }

    #[test]
    fn new_content_is_unmeasured() {
        let content = SheetContent::new(1_u8);
        assert_eq!(content.intrinsic_height(), None);
        assert_eq!(*content.view(), 1);
    }

    #[test]
    fn measurements_are_sanitized() {
        let mut content = SheetContent::with_intrinsic_height((), 120.0);
        assert_eq!(content.intrinsic_height(), Some(120.0));

        content.set_intrinsic_height(Some(-3.0));
        assert_eq!(content.intrinsic_height(), None);

        content.set_intrinsic_height(Some(f64::NAN));
        assert_eq!(content.intrinsic_height(), None);

        content.set_intrinsic_height(Some(0.0));
        assert_eq!(content.intrinsic_height(), Some(0.0));
    }

    #[test]
    fn from_layout_resolves_or_reports_name() {
        let content = SheetContent::from_layout("foo", &OnlyFoo).unwrap();
        assert_eq!(content.into_view(), 7);

        let err = SheetContent::<u32>::from_layout("bar", &OnlyFoo).unwrap_err();
        assert_eq!(
            err,
            ContentError::UnresolvedLayout {
                name: "bar".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "layout `bar` could not be resolved to a view"
        );
    }
}
