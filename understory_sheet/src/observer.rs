// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle notifications.

use crate::state::CardState;

/// Receives sheet lifecycle notifications.
///
/// The sheet only holds a weak reference to its observer, so an observer
/// never keeps its host alive through the sheet. All methods default to doing
/// nothing.
///
/// Notifications are delivered synchronously from inside sheet calls. The
/// sheet is mutably borrowed at that point, so observers that want to react
/// by driving the sheet should record the request and act on it afterwards.
pub trait SheetObserver {
    /// The sheet is about to show (`true`) or hide (`false`).
    fn on_will_change_visibility(&self, visible: bool) {
        let _ = visible;
    }

    /// A show (`true`) or hide (`false`) transition completed.
    fn on_did_change_visibility(&self, visible: bool) {
        let _ = visible;
    }

    /// A resize settled on `state`.
    fn on_did_change_state(&self, state: CardState) {
        let _ = state;
    }
}
