// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sheet --heading-base-level=0

//! Understory Sheet: a headless bottom sheet state machine.
//!
//! A bottom sheet is a card that slides up from the bottom of a container,
//! dims the container behind an overlay, and hosts caller content. This crate
//! owns the sheet's behavior and nothing else:
//!
//! - **Stop states** ([`CardState`]): named fractions of the container height
//!   the card snaps to, such as small / middle / large.
//! - **Sizing** ([`SheetBounds`], [`SizingMode`]): min/max heights derived
//!   either from the stop states or from the content's intrinsic height.
//! - **Dragging** ([`SheetController::handle_drag`], [`DragTracker`]):
//!   velocity-weighted resizing with rubber-band overscroll, snapping to the
//!   nearest state, and drag-to-dismiss.
//! - **Visibility** ([`SheetController::show`], [`SheetController::hide`]):
//!   animated transitions with explicit cancel-and-restart semantics.
//! - **Notifications** ([`SheetObserver`]): will/did visibility changes and
//!   settled state changes.
//!
//! It does **not** render anything or own a view hierarchy. Callers are
//! expected to:
//! - Report the container size at construction and on every change
//!   (rotation, window resize).
//! - Forward header drags, overlay taps and frame ticks.
//! - Draw the [`SheetFrame`] returned by [`SheetController::frame`] with
//!   their own toolkit, placing the content view inside `content`.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::Size;
//! use understory_sheet::{CardState, SheetConfig, SheetContent, SheetController};
//!
//! let container = Size::new(390.0, 844.0);
//! let mut sheet =
//!     SheetController::new(&container, SheetConfig::default(), SheetContent::new("details"))
//!         .unwrap();
//!
//! assert!(!sheet.is_visible());
//! assert_eq!(sheet.current_state(), CardState::SMALL);
//!
//! sheet.show();
//! while sheet.advance(Duration::from_millis(16)) {
//!     let _frame = sheet.frame();
//!     // draw frame.overlay, frame.card, frame.header_line, frame.content ...
//! }
//! assert_eq!(sheet.presentation().offset, 0.0);
//! ```
//!
//! ## Observing the sheet
//!
//! Observers are held weakly, so the sheet never keeps its host alive:
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use core::time::Duration;
//! use kurbo::Size;
//! use understory_sheet::{SheetConfig, SheetContent, SheetController, SheetObserver};
//!
//! #[derive(Default)]
//! struct Log(RefCell<Vec<String>>);
//!
//! impl SheetObserver for Log {
//!     fn on_did_change_visibility(&self, visible: bool) {
//!         self.0.borrow_mut().push(format!("visible={visible}"));
//!     }
//! }
//!
//! let log = Rc::new(Log::default());
//! let mut sheet = SheetController::new(
//!     &Size::new(400.0, 800.0),
//!     SheetConfig::default(),
//!     SheetContent::new(()),
//! )
//! .unwrap();
//! sheet.set_observer(&log);
//!
//! sheet.toggle();
//! sheet.advance(Duration::from_secs(1));
//! assert_eq!(log.0.borrow().as_slice(), ["visible=true"]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards `std` to Kurbo and Peniko.
//! - `libm`: forwards `libm` to Kurbo and Peniko for `no_std` builds.
//!
//! Diagnostics go through the [`log`] facade at `debug` and `trace` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bounds;
mod config;
mod content;
mod controller;
mod frame;
mod gesture;
mod observer;
mod state;
mod transition;

pub use bounds::{SheetBounds, SizingMode, SizingRule, nearest_state};
pub use config::{ConfigError, SheetConfig, StateList};
pub use content::{ContentError, LayoutResolver, SheetContent};
pub use controller::{SheetController, SheetError, SheetHost};
pub use frame::SheetFrame;
pub use gesture::{DragPhase, DragSample, DragTracker};
pub use observer::SheetObserver;
pub use state::CardState;
pub use transition::{Easing, Presentation, Transition, TransitionId, TransitionKind};
