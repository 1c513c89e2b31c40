// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangles for drawing a sheet.
//!
//! [`SheetFrame`] turns the presented height/offset into container-space
//! rectangles: the overlay spans the container, the card hangs from the
//! bottom edge, the header sits on top of the card with the grabber line
//! centered inside it, and the content fills the rest of the card.

use kurbo::{Rect, Size};

use crate::config::SheetConfig;
use crate::transition::Presentation;

/// Container-space rectangles for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetFrame {
    /// Dimming overlay, covering the whole container.
    pub overlay: Rect,
    /// Overlay opacity, taken from the presentation.
    pub overlay_alpha: f32,
    /// The card surface.
    pub card: Rect,
    /// Corner radius for the card's top corners.
    pub card_corner_radius: f64,
    /// Header strip, if the header is visible.
    pub header: Option<Rect>,
    /// Grabber line inside the header, if the header is visible.
    pub header_line: Option<Rect>,
    /// Area available to the content.
    pub content: Rect,
}

impl SheetFrame {
    /// Lays out the sheet for a container of `container` size.
    #[must_use]
    pub fn compute(container: Size, presentation: Presentation, config: &SheetConfig) -> Self {
        let bottom = container.height + presentation.offset;
        let top = bottom - presentation.height.max(0.0);
        let card = Rect::new(0.0, top, container.width, bottom);

        let header_height = if config.is_header_visible {
            config.header_height.min(card.height())
        } else {
            0.0
        };
        let header = config
            .is_header_visible
            .then(|| Rect::new(card.x0, card.y0, card.x1, card.y0 + header_height));
        let header_line = header.map(|header| {
            let line = config.header_line_size;
            let x0 = header.center().x - line.width / 2.0;
            let y0 = header.y0 + config.header_line_top;
            Rect::new(x0, y0, x0 + line.width, y0 + line.height)
        });
        let content = Rect::new(card.x0, card.y0 + header_height, card.x1, card.y1);

        Self {
            overlay: container.to_rect(),
            overlay_alpha: presentation.overlay_alpha,
            card,
            card_corner_radius: config.card_corner_radius,
            header,
            header_line,
            content,
        }
    }

    /// Returns `true` if `y` (container space) lies on the visible card.
    #[must_use]
    pub fn card_contains_y(&self, y: f64, container: Size) -> bool {
        y >= self.card.y0 && y < self.card.y1.min(container.height)
    }
}
