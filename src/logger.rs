//! Listener that writes every joystick event to `tracing`.

use crate::device::Joystick;
use crate::event::{ConnectionState, JoystickEvent};
use crate::eventbus::JoystickListener;
use tracing::{debug, info};

/// Logs connections at `info` and edges at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl TracingListener {
    pub fn new() -> Self {
        TracingListener
    }
}

impl JoystickListener for TracingListener {
    fn on_event(&mut self, joystick: &Joystick, event: &JoystickEvent) {
        let id = joystick.id();
        let name = joystick.name();
        match *event {
            JoystickEvent::Connection(ConnectionState::Connected) => {
                info!(joystick = id, name, "joystick connected");
            }
            JoystickEvent::Connection(ConnectionState::Disconnected) => {
                info!(joystick = id, name, "joystick disconnected");
            }
            JoystickEvent::Button {
                index,
                previous,
                current,
            } => {
                debug!(joystick = id, index, %previous, %current, "[Input] button");
            }
            JoystickEvent::Axis {
                index,
                previous,
                current,
            } => {
                debug!(joystick = id, index, previous, current, "[Input] axis");
            }
        }
    }
}
