//! Per-frame snapshot of joystick states.
//!
//! [`Snapshot`] is an **owned**, read-only view of every joystick's readings at a
//! point in time (typically "this frame"). It is produced by
//! [`Manager::snapshot`](crate::manager::Manager::snapshot) and is cheap to clone
//! for fan-out to multiple consumers.
//!
//! # Semantics
//! - Keys are [`JoystickId`]s, iterated in ascending order.
//! - Values are the current (post-deadzone) axes and buttons of the last poll.
//! - A snapshot is **immutable** and does **not** poll; call `poll()` on the
//!   manager and request a new one to refresh.
//!
//! # Examples
//! ```
//! use stickpoll::backends::virtual_input::VirtualEnvironment;
//! use stickpoll::Manager;
//!
//! let env = VirtualEnvironment::new().with_joystick(0, "Pad", 2, 4);
//! let mut mgr = Manager::new(env);
//! mgr.enable();
//! mgr.poll();
//!
//! let snap = mgr.snapshot();
//! for (id, state) in snap.iter() {
//!     println!("{id} {}: x={:.2} pressed0={}", state.name, state.axis(0), state.is_pressed(0));
//! }
//! assert_eq!(snap.get(0).map(|s| s.axes.len()), Some(2));
//! ```

use crate::device::Joystick;
use crate::event::{ButtonState, JoystickId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Readings of one joystick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JoystickState {
    pub name: String,
    pub axes: Vec<f32>,
    pub buttons: Vec<ButtonState>,
}

impl JoystickState {
    /// Value of an axis (0.0 if missing).
    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    /// State of a button (`Released` if missing).
    pub fn button(&self, index: usize) -> ButtonState {
        self.buttons.get(index).copied().unwrap_or_default()
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        self.button(index).is_down()
    }
}

impl From<&Joystick> for JoystickState {
    fn from(js: &Joystick) -> Self {
        Self {
            name: js.name().to_string(),
            axes: js.axes().to_vec(),
            buttons: js.buttons().to_vec(),
        }
    }
}

/// Owned snapshot of current joystick states (`id → JoystickState`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot(pub BTreeMap<JoystickId, JoystickState>);

impl Snapshot {
    pub fn capture<'a>(joysticks: impl IntoIterator<Item = &'a Joystick>) -> Self {
        Snapshot(
            joysticks
                .into_iter()
                .map(|js| (js.id(), JoystickState::from(js)))
                .collect(),
        )
    }

    /// Get the state for a specific joystick.
    #[inline]
    pub fn get(&self, id: JoystickId) -> Option<&JoystickState> {
        self.0.get(&id)
    }

    /// Iterate `(id, state)` pairs in ascending id order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&JoystickId, &JoystickState)> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the snapshot and return the inner map.
    #[inline]
    pub fn into_inner(self) -> BTreeMap<JoystickId, JoystickState> {
        self.0
    }

    /// Serialize to a JSON object keyed by joystick id.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
