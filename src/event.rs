//! Events and channel states.
//!
//! StickPoll reports joystick changes as small, device-agnostic values
//! ([`JoystickEvent`]) that are produced by [`Joystick::poll`](crate::device::Joystick::poll)
//! and fanned out by the [`Manager`](crate::manager::Manager) to callbacks and listeners.
//!
//! ## Value conventions
//! - **Axes:** whatever range the environment reports (usually `[-1.0, 1.0]`), with
//!   readings below the global deadzone stored as exactly `0.0`.
//! - **Buttons:** discrete [`ButtonState`] values. `Repeating` is passed through when
//!   the environment reports it.
//!
//! ### Edge rules
//! - A button event fires only when the discrete state changed between two polls.
//! - An axis event fires whenever either the previous or the current value is
//!   non-neutral. A held stick therefore reports every frame, and a stick returning
//!   into the deadzone reports its final `x -> 0.0` transition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a joystick slot, as handed out by the environment.
///
/// Stable for the lifetime of one connection. Ids may be reused after a disconnect.
pub type JoystickId = u32;

/// Discrete button state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    #[default]
    Released,
    Pressed,
    /// Held long enough for the environment to report key repeat.
    Repeating,
}

impl ButtonState {
    /// `true` for `Pressed` and `Repeating`.
    #[inline]
    pub fn is_down(self) -> bool {
        !matches!(self, ButtonState::Released)
    }
}

impl From<bool> for ButtonState {
    fn from(pressed: bool) -> Self {
        if pressed {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }
}

impl fmt::Display for ButtonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ButtonState::Released => "released",
            ButtonState::Pressed => "pressed",
            ButtonState::Repeating => "repeating",
        };
        f.write_str(s)
    }
}

/// Connection-level state of a joystick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// Connection notification delivered by an [`Environment`](crate::backends::Environment).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectionEvent {
    pub id: JoystickId,
    pub state: ConnectionState,
}

impl ConnectionEvent {
    pub fn connected(id: JoystickId) -> Self {
        Self {
            id,
            state: ConnectionState::Connected,
        }
    }

    pub fn disconnected(id: JoystickId) -> Self {
        Self {
            id,
            state: ConnectionState::Disconnected,
        }
    }
}

/// Per-joystick change delivered to callbacks and listeners.
///
/// Indices are device-local positions in the joystick's axis/button arrays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JoystickEvent {
    /// The joystick was connected or disconnected.
    Connection(ConnectionState),

    /// A button changed its discrete state.
    Button {
        index: usize,
        previous: ButtonState,
        current: ButtonState,
    },

    /// An axis was non-neutral in the previous or the current poll.
    Axis {
        index: usize,
        previous: f32,
        current: f32,
    },
}

impl JoystickEvent {
    #[inline]
    pub fn is_axis(&self) -> bool {
        matches!(self, JoystickEvent::Axis { .. })
    }

    #[inline]
    pub fn is_button(&self) -> bool {
        matches!(self, JoystickEvent::Button { .. })
    }

    #[inline]
    pub fn is_connection(&self) -> bool {
        matches!(self, JoystickEvent::Connection(_))
    }
}
