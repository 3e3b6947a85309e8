//! Input backends for `stickpoll`.
//!
//! A backend implements [`Environment`]: the small slice of a windowing/input
//! library the joystick registry needs. The registry never talks to a native
//! library directly.
//!
//! # Feature flags
//! - **`gilrs`**: enables [`gilrs_env::GilrsEnvironment`], backed by the `gilrs` crate.
//!
//! [`virtual_input::VirtualEnvironment`] is always available. It is a scripted,
//! in-memory environment used by tests, demos, and replay tooling.

use crate::event::{ButtonState, ConnectionEvent, JoystickId};

#[cfg(feature = "gilrs")]
#[cfg_attr(docsrs, doc(cfg(feature = "gilrs")))]
pub mod gilrs_env;
pub mod virtual_input;

/// The windowing/input library as seen by the joystick registry.
///
/// Reads return `None` when the device cannot be queried (removed mid-frame,
/// platform error). The registry treats that as "all neutral" for the frame.
pub trait Environment {
    /// Whether a joystick is currently present at `id`.
    fn is_present(&self, id: JoystickId) -> bool;

    /// Human-readable device name, if the environment knows one.
    fn name(&self, id: JoystickId) -> Option<String>;

    /// Latest raw axis values for `id`.
    fn axes(&mut self, id: JoystickId) -> Option<&[f32]>;

    /// Latest raw button states for `id`.
    fn buttons(&mut self, id: JoystickId) -> Option<&[ButtonState]>;

    /// Turn connection notifications on or off.
    ///
    /// Called with `true` when joystick support is enabled and `false` when it is
    /// disabled. While off, [`poll_connection_events`](Self::poll_connection_events)
    /// should return nothing.
    fn watch_connections(&mut self, _enabled: bool) {}

    /// Drain connection notifications raised since the last call.
    ///
    /// This is the "poll events" boundary: notifications are delivered here, on the
    /// thread driving the frame loop, and nowhere else.
    fn poll_connection_events(&mut self) -> Vec<ConnectionEvent>;
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn is_present(&self, id: JoystickId) -> bool {
        (**self).is_present(id)
    }

    fn name(&self, id: JoystickId) -> Option<String> {
        (**self).name(id)
    }

    fn axes(&mut self, id: JoystickId) -> Option<&[f32]> {
        (**self).axes(id)
    }

    fn buttons(&mut self, id: JoystickId) -> Option<&[ButtonState]> {
        (**self).buttons(id)
    }

    fn watch_connections(&mut self, enabled: bool) {
        (**self).watch_connections(enabled)
    }

    fn poll_connection_events(&mut self) -> Vec<ConnectionEvent> {
        (**self).poll_connection_events()
    }
}
