// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sheet controller: visibility, stop states, drag-to-resize and transitions.
//!
//! ## Usage
//!
//! 1) Build a [`SheetConfig`] and a [`SheetContent`], then construct a
//!    [`SheetController`] against anything implementing [`SheetHost`].
//! 2) Drive it with [`show`](SheetController::show) /
//!    [`hide`](SheetController::hide), header drags through
//!    [`handle_drag`](SheetController::handle_drag), overlay taps through
//!    [`on_overlay_tap`](SheetController::on_overlay_tap) and container
//!    changes through [`on_container_resized`](SheetController::on_container_resized).
//! 3) Once per frame, call [`advance`](SheetController::advance) with the
//!    elapsed time and draw [`frame`](SheetController::frame).
//!
//! ```
//! use core::time::Duration;
//! use kurbo::{Size, Vec2};
//! use understory_sheet::{
//!     CardState, DragPhase, DragSample, SheetConfig, SheetContent, SheetController,
//! };
//!
//! let container = Size::new(400.0, 1000.0);
//! let config = SheetConfig {
//!     velocity_damping: 1.0,
//!     ..SheetConfig::default()
//! };
//! let mut sheet = SheetController::new(&container, config, SheetContent::new("body")).unwrap();
//! assert_eq!(sheet.min_height(), 150.0);
//! assert_eq!(sheet.max_height(), 950.0);
//!
//! sheet.show();
//! assert_eq!(sheet.target_height(), 300.0);
//! sheet.advance(Duration::from_millis(300));
//!
//! // Drag the header up by 250 units.
//! sheet.handle_drag(DragPhase::Began, DragSample::default());
//! sheet.handle_drag(
//!     DragPhase::Changed,
//!     DragSample::new(Vec2::new(0.0, -250.0), Vec2::new(0.0, -250.0)),
//! );
//! assert_eq!(sheet.requested_height(), 550.0);
//! assert_eq!(sheet.current_state(), CardState::MIDDLE);
//!
//! // Releasing settles on the nearest state.
//! sheet.handle_drag(DragPhase::Ended, DragSample::default());
//! sheet.advance(Duration::from_millis(300));
//! assert_eq!(sheet.presentation().height, 600.0);
//! ```

use alloc::rc::{Rc, Weak};
use core::fmt;
use core::mem;
use core::time::Duration;

use kurbo::Size;
use log::{debug, trace};

use crate::bounds::{SheetBounds, SizingMode, SizingRule, nearest_state};
use crate::config::{ConfigError, SheetConfig};
use crate::content::{ContentError, LayoutResolver, SheetContent};
use crate::frame::SheetFrame;
use crate::gesture::{DragPhase, DragSample};
use crate::observer::SheetObserver;
use crate::state::CardState;
use crate::transition::{Easing, Presentation, Transition, TransitionId, TransitionKind};

/// Supplies the size of the container a sheet is presented in.
///
/// The sheet reads the size once at construction and is told about later
/// changes through [`SheetController::on_container_resized`]; it never keeps a
/// reference to the host.
pub trait SheetHost {
    /// Current size of the container.
    fn container_size(&self) -> Size;
}

impl SheetHost for Size {
    fn container_size(&self) -> Size {
        *self
    }
}

/// Errors from constructing a [`SheetController`].
#[derive(Clone, Debug, PartialEq)]
pub enum SheetError {
    /// The configuration was rejected.
    Config(ConfigError),
    /// The content could not be produced.
    Content(ContentError),
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid sheet configuration: {err}"),
            Self::Content(err) => write!(f, "invalid sheet content: {err}"),
        }
    }
}

impl core::error::Error for SheetError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Content(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SheetError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ContentError> for SheetError {
    fn from(err: ContentError) -> Self {
        Self::Content(err)
    }
}

/// A bottom sheet hosting content of type `V`.
///
/// See the [module documentation](self) for the overall flow.
pub struct SheetController<V> {
    config: SheetConfig,
    mode: SizingMode,
    content: SheetContent<V>,
    container: Size,
    is_visible: bool,
    current_state: CardState,
    bounds: SheetBounds,
    requested_height: f64,
    sizing_rule: SizingRule,
    dragging: bool,
    /// Drag translation where the live height first went past `bounds.max`.
    overshoot_origin: Option<f64>,
    presented: Presentation,
    transition: Option<Transition>,
    next_transition: u64,
    observer: Option<Weak<dyn SheetObserver>>,
}

impl<V> fmt::Debug for SheetController<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetController")
            .field("mode", &self.mode)
            .field("container", &self.container)
            .field("is_visible", &self.is_visible)
            .field("current_state", &self.current_state)
            .field("bounds", &self.bounds)
            .field("requested_height", &self.requested_height)
            .field("sizing_rule", &self.sizing_rule)
            .field("dragging", &self.dragging)
            .field("presented", &self.presented)
            .field("transition", &self.transition)
            .finish_non_exhaustive()
    }
}

impl<V> SheetController<V> {
    /// Creates a hidden sheet in its entry state.
    ///
    /// Fails if `config` does not pass [`SheetConfig::validate`].
    pub fn new<H>(
        host: &H,
        config: SheetConfig,
        content: SheetContent<V>,
    ) -> Result<Self, SheetError>
    where
        H: SheetHost + ?Sized,
    {
        config.validate()?;
        let mode = if config.is_adaptive_by_content {
            SizingMode::AdaptiveToContent
        } else {
            SizingMode::Discrete
        };
        let current_state = config.first_state().unwrap_or(CardState::SMALL);
        let mut sheet = Self {
            config,
            mode,
            content,
            container: host.container_size(),
            is_visible: false,
            current_state,
            bounds: SheetBounds::default(),
            requested_height: 0.0,
            sizing_rule: SizingRule::FollowContent,
            dragging: false,
            overshoot_origin: None,
            presented: Presentation::default(),
            transition: None,
            next_transition: 0,
            observer: None,
        };
        sheet.recompute_bounds();
        let target = sheet.target_height();
        sheet.requested_height = target;
        sheet.presented = hidden_at(target);
        Ok(sheet)
    }

    /// Creates a sheet whose content is the named layout resource.
    pub fn from_layout<H, R>(
        host: &H,
        config: SheetConfig,
        name: &str,
        resolver: &R,
    ) -> Result<Self, SheetError>
    where
        H: SheetHost + ?Sized,
        R: LayoutResolver<V> + ?Sized,
    {
        let content = SheetContent::from_layout(name, resolver)?;
        Self::new(host, config, content)
    }

    /// Registers the observer. Only a weak reference is kept.
    pub fn set_observer<O: SheetObserver + 'static>(&mut self, observer: &Rc<O>) {
        let weak: Weak<O> = Rc::downgrade(observer);
        self.observer = Some(weak);
    }

    /// Removes the observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    // --- Queries ---

    /// Returns `true` if the sheet is logically shown.
    ///
    /// This flips as soon as [`show`](Self::show) or [`hide`](Self::hide) is
    /// called, before the transition finishes.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// Returns `true` if the sheet should receive pointer input.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.is_visible
    }

    /// Returns the current stop state.
    #[must_use]
    pub fn current_state(&self) -> CardState {
        self.current_state
    }

    /// Returns the dismissal threshold.
    #[must_use]
    pub fn min_height(&self) -> f64 {
        self.bounds.min
    }

    /// Returns the upper bound for resting heights.
    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.bounds.max
    }

    /// Returns both bounds.
    #[must_use]
    pub fn bounds(&self) -> SheetBounds {
        self.bounds
    }

    /// Returns the height the sheet currently asks for.
    ///
    /// While dragging this is the live drag height; otherwise it is the
    /// resting height of the current state.
    #[must_use]
    pub fn requested_height(&self) -> f64 {
        self.requested_height
    }

    /// Returns the resting height for the current state.
    #[must_use]
    pub fn target_height(&self) -> f64 {
        self.bounds.target_height(self.mode, self.current_state, self.container.height)
    }

    /// Returns the values to draw this frame.
    #[must_use]
    pub fn presentation(&self) -> Presentation {
        self.presented
    }

    /// Returns container-space rectangles for this frame.
    #[must_use]
    pub fn frame(&self) -> SheetFrame {
        SheetFrame::compute(self.container, self.presented, &self.config)
    }

    /// Returns the hosted content.
    #[must_use]
    pub fn content(&self) -> &SheetContent<V> {
        &self.content
    }

    /// Returns the hosted view mutably.
    ///
    /// Report measurement changes through
    /// [`set_content_height`](Self::set_content_height).
    pub fn content_view_mut(&mut self) -> &mut V {
        self.content.view_mut()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    /// Returns the sizing mode derived from the configuration.
    #[must_use]
    pub fn sizing_mode(&self) -> SizingMode {
        self.mode
    }

    /// Returns which rule currently owns the height.
    #[must_use]
    pub fn sizing_rule(&self) -> SizingRule {
        self.sizing_rule
    }

    /// Returns the last known container size.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container
    }

    /// Returns `true` while a header drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns the in-flight transition, if any.
    #[must_use]
    pub fn active_transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    // --- Visibility ---

    /// Slides the sheet in. Does nothing if it is already visible.
    pub fn show(&mut self) {
        if self.is_visible {
            return;
        }
        self.is_visible = true;
        debug!("sheet: show in state {}", self.current_state);
        self.notify(|o| o.on_will_change_visibility(true));

        let target = self.target_height();
        self.requested_height = target;
        if self.presented.is_fully_hidden() {
            // Slide in at the final height rather than growing on the way up.
            self.presented = Presentation {
                overlay_alpha: self.presented.overlay_alpha,
                ..hidden_at(target)
            };
        }
        let to = self.shown_at(target);
        self.start_transition(
            TransitionKind::Show,
            to,
            self.config.visible_animation_duration,
            Easing::EaseInOut,
        );
    }

    /// Slides the sheet out. Does nothing if it is already hidden.
    ///
    /// The current state resets to the entry state without a
    /// [`on_did_change_state`](SheetObserver::on_did_change_state)
    /// notification.
    pub fn hide(&mut self) {
        if !self.is_visible {
            return;
        }
        self.is_visible = false;
        if self.dragging {
            self.dragging = false;
            self.sizing_rule = SizingRule::FollowContent;
        }
        debug!("sheet: hide from state {}", self.current_state);
        self.notify(|o| o.on_will_change_visibility(false));

        let to = hidden_at(self.presented.height);
        self.start_transition(
            TransitionKind::Hide,
            to,
            self.config.visible_animation_duration,
            Easing::EaseInOut,
        );

        if let Some(initial) = self.config.first_state() {
            if self.current_state != initial {
                debug!("sheet: reset state {} -> {}", self.current_state, initial);
                self.current_state = initial;
            }
        }
        self.requested_height = self.target_height();
    }

    /// Hides the sheet if visible, shows it otherwise.
    pub fn toggle(&mut self) {
        if self.is_visible {
            self.hide();
        } else {
            self.show();
        }
    }

    // --- Content and container changes ---

    /// Swaps in new content and returns the old one.
    ///
    /// Bounds are recomputed and a visible sheet animates to its new resting
    /// height. Visibility is unchanged, so no visibility notification fires.
    pub fn replace_content(&mut self, content: SheetContent<V>) -> SheetContent<V> {
        let old = mem::replace(&mut self.content, content);
        debug!("sheet: content replaced");
        self.recompute_bounds();
        self.relayout();
        old
    }

    /// Records a new intrinsic height for the installed content.
    pub fn set_content_height(&mut self, height: Option<f64>) {
        self.content.set_intrinsic_height(height);
        if self.mode == SizingMode::AdaptiveToContent {
            self.recompute_bounds();
            if self.sizing_rule == SizingRule::FollowContent {
                self.relayout();
            }
        }
    }

    /// Reacts to a new container size, for example after a rotation.
    ///
    /// Bounds are recomputed right away. A visible sheet animates to the
    /// resting height of its current state and reports the state when done;
    /// a hidden one just moves its off-screen geometry.
    pub fn on_container_resized(&mut self, size: Size) {
        if size == self.container {
            return;
        }
        debug!("sheet: container resized to {size:?}");
        self.container = size;
        self.recompute_bounds();
        if self.dragging {
            return;
        }
        let target = self.target_height();
        self.requested_height = target;
        if self.is_visible {
            let to = self.shown_at(target);
            let kind = self.retarget_kind(TransitionKind::Resize);
            self.start_transition(
                kind,
                to,
                self.config.resize_animation_duration,
                Easing::EaseInOut,
            );
        } else if self.transition.is_none() {
            self.presented = hidden_at(target);
        }
    }

    // --- Input ---

    /// Feeds one header drag event.
    ///
    /// - `Began` arms the drag if swipe resizing is enabled and the sheet is
    ///   visible.
    /// - `Changed` moves the live height by the damped velocity, rubber-bands
    ///   past the max height, dismisses below the min height, and tracks the
    ///   nearest state without notifying.
    /// - `Ended`/`Cancelled` settle on the current state.
    pub fn handle_drag(&mut self, phase: DragPhase, sample: DragSample) {
        match phase {
            DragPhase::Began => self.begin_drag(),
            DragPhase::Changed => self.change_drag(sample),
            DragPhase::Ended | DragPhase::Cancelled => self.end_drag(),
        }
    }

    /// Handles a tap on the overlay.
    pub fn on_overlay_tap(&mut self) {
        self.dismiss_from_background();
    }

    /// Handles a swipe on the overlay.
    pub fn on_overlay_swipe(&mut self) {
        self.dismiss_from_background();
    }

    /// Moves the in-flight transition forward by `dt`.
    ///
    /// Completion notifications are delivered from here. Returns `true` while
    /// a transition is still running.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        self.presented = transition.advance(dt);
        if !transition.is_finished() {
            return true;
        }
        let kind = transition.kind();
        self.transition = None;
        trace!("sheet: {kind:?} transition finished");
        match kind {
            TransitionKind::Show => self.notify(|o| o.on_did_change_visibility(true)),
            TransitionKind::Hide => self.notify(|o| o.on_did_change_visibility(false)),
            TransitionKind::Resize => {
                let state = self.current_state;
                self.notify(|o| o.on_did_change_state(state));
            }
            TransitionKind::Relayout => {}
        }
        false
    }

    // --- Internals ---

    fn dismiss_from_background(&mut self) {
        if self.config.is_hide_on_background_tap {
            self.hide();
        }
    }

    fn begin_drag(&mut self) {
        if !self.config.is_resizable_by_swipe || !self.is_visible {
            trace!("sheet: drag ignored");
            return;
        }
        if let Some(transition) = self.transition.take() {
            if transition.kind() == TransitionKind::Show {
                // The drag takes over the height; finish the slide-in now.
                self.presented.offset = 0.0;
                self.presented.overlay_alpha = self.overlay_target();
                self.notify(|o| o.on_did_change_visibility(true));
            } else {
                debug!("sheet: {:?} transition cancelled by drag", transition.kind());
            }
        }
        self.dragging = true;
        self.overshoot_origin = None;
        self.requested_height = self.presented.height;
        if self.mode == SizingMode::AdaptiveToContent {
            self.sizing_rule = SizingRule::Fixed;
        }
        trace!("sheet: drag began at height {}", self.requested_height);
    }

    fn change_drag(&mut self, sample: DragSample) {
        if !self.dragging {
            return;
        }
        let candidate = self.requested_height - sample.velocity.y * self.config.velocity_damping;
        let height = if candidate > self.bounds.max {
            let origin = *self.overshoot_origin.get_or_insert(sample.translation.y);
            let overshoot = (-(sample.translation.y - origin) / self.config.rubber_band_divisor)
                .clamp(0.0, self.config.rubber_band_limit);
            self.bounds.max + overshoot
        } else if candidate < self.bounds.min {
            debug!("sheet: dragged below {}, dismissing", self.bounds.min);
            self.hide();
            return;
        } else {
            self.overshoot_origin = None;
            candidate
        };
        self.requested_height = height;
        self.presented.height = height;
        trace!("sheet: drag height {height}");

        if let Some((_, state)) = nearest_state(
            &self.config.available_states,
            self.container.height,
            height,
        ) {
            if state != self.current_state {
                debug!("sheet: tracking state {} -> {}", self.current_state, state);
                self.current_state = state;
            }
        }
    }

    fn end_drag(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        self.sizing_rule = SizingRule::FollowContent;
        let target = self.target_height();
        self.requested_height = target;
        debug!("sheet: settling on {} at {target}", self.current_state);
        let to = self.shown_at(target);
        self.start_transition(
            TransitionKind::Resize,
            to,
            self.config.resize_animation_duration,
            Easing::Spring {
                damping: self.config.settle_damping,
            },
        );
    }

    /// Re-applies the resting height after a content change.
    fn relayout(&mut self) {
        if self.dragging {
            return;
        }
        let target = self.target_height();
        self.requested_height = target;
        if self.is_visible {
            let to = self.shown_at(target);
            if self.transition.is_none() && self.presented == to {
                return;
            }
            let kind = self.retarget_kind(TransitionKind::Relayout);
            self.start_transition(
                kind,
                to,
                self.config.visible_animation_duration,
                Easing::EaseInOut,
            );
        } else if self.transition.is_none() {
            self.presented = hidden_at(target);
        }
    }

    fn recompute_bounds(&mut self) {
        let header = if self.config.is_header_visible {
            self.config.header_height
        } else {
            0.0
        };
        self.bounds = SheetBounds::compute(
            self.mode,
            &self.config.available_states,
            self.container.height,
            self.content.intrinsic_height(),
            header,
        );
        trace!("sheet: bounds {:?}", self.bounds);
    }

    fn overlay_target(&self) -> f32 {
        if self.config.is_overlay_visible {
            self.config.overlay_alpha
        } else {
            0.0
        }
    }

    fn shown_at(&self, height: f64) -> Presentation {
        Presentation {
            height,
            offset: 0.0,
            overlay_alpha: self.overlay_target(),
        }
    }

    /// Keeps the kind of an in-flight transition whose notification is still
    /// owed, so retargeting it does not swallow that notification.
    fn retarget_kind(&self, fallback: TransitionKind) -> TransitionKind {
        match self.transition.as_ref().map(Transition::kind) {
            Some(kind @ (TransitionKind::Show | TransitionKind::Resize)) => kind,
            _ => fallback,
        }
    }

    fn start_transition(
        &mut self,
        kind: TransitionKind,
        to: Presentation,
        duration: Duration,
        easing: Easing,
    ) {
        if let Some(old) = self.transition.take() {
            debug!(
                "sheet: {:?} transition {} cancelled by {kind:?}",
                old.kind(),
                old.id().get()
            );
        }
        self.next_transition += 1;
        let id = TransitionId(self.next_transition);
        self.transition = Some(Transition::new(id, kind, self.presented, to, duration, easing));
    }

    fn notify(&self, f: impl FnOnce(&dyn SheetObserver)) {
        if let Some(observer) = self.observer.as_ref().and_then(Weak::upgrade) {
            f(&*observer);
        }
    }
}

fn hidden_at(height: f64) -> Presentation {
    Presentation {
        height,
        offset: height,
        overlay_alpha: 0.0,
    }
}
