//! `gilrs`-backed environment.
//!
//! Maps gilrs gamepads onto joystick ids using gilrs' own gamepad index, and
//! exposes every gamepad through a fixed axis/button layout so array indices are
//! stable across controllers.
//!
//! ## Axes (8)
//! `0` LeftStickX, `1` LeftStickY, `2` LeftZ, `3` RightStickX, `4` RightStickY,
//! `5` RightZ, `6` DPadX, `7` DPadY.
//!
//! ## Buttons (19)
//! South, East, North, West, C, Z, LeftTrigger, LeftTrigger2, RightTrigger,
//! RightTrigger2, Select, Start, Mode, LeftThumb, RightThumb, DPadUp, DPadDown,
//! DPadLeft, DPadRight, in that order.
//!
//! gilrs only updates gamepad state while its event queue is drained, which
//! happens in [`Environment::poll_connection_events`]. Call
//! [`Manager::poll_events`](crate::Manager::poll_events) before
//! [`Manager::poll`](crate::Manager::poll) every frame.

use super::Environment;
use crate::error::{Error, Result};
use crate::event::{ButtonState, ConnectionEvent, JoystickId};
use gilrs::{Axis, Button, Event, EventType, Gamepad, GamepadId, Gilrs};
use std::collections::HashMap;
use tracing::{debug, warn};

pub const AXES: [Axis; 8] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::LeftZ,
    Axis::RightStickX,
    Axis::RightStickY,
    Axis::RightZ,
    Axis::DPadX,
    Axis::DPadY,
];

pub const BUTTONS: [Button; 19] = [
    Button::South,
    Button::East,
    Button::North,
    Button::West,
    Button::C,
    Button::Z,
    Button::LeftTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::Mode,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
];

#[derive(Default)]
struct ReadBuffers {
    axes: Vec<f32>,
    buttons: Vec<ButtonState>,
}

pub struct GilrsEnvironment {
    gilrs: Gilrs,
    buffers: HashMap<JoystickId, ReadBuffers>,
    watching: bool,
}

impl GilrsEnvironment {
    pub fn new() -> Result<Self> {
        let gilrs = Gilrs::new().map_err(|e| {
            warn!("Failed to initialize GilRs: {e}");
            Error::Backend(e.to_string())
        })?;
        Ok(Self {
            gilrs,
            buffers: HashMap::new(),
            watching: false,
        })
    }

    fn gamepad(&self, id: JoystickId) -> Option<Gamepad<'_>> {
        let (_, gamepad) = self
            .gilrs
            .gamepads()
            .find(|(gid, _)| joystick_id(*gid) == id)?;
        gamepad.is_connected().then_some(gamepad)
    }
}

fn joystick_id(id: GamepadId) -> JoystickId {
    usize::from(id) as JoystickId
}

impl Environment for GilrsEnvironment {
    fn is_present(&self, id: JoystickId) -> bool {
        self.gamepad(id).is_some()
    }

    fn name(&self, id: JoystickId) -> Option<String> {
        self.gamepad(id).map(|gp| gp.name().to_string())
    }

    fn axes(&mut self, id: JoystickId) -> Option<&[f32]> {
        let values: Vec<f32> = {
            let gamepad = self.gamepad(id)?;
            AXES.iter().map(|&axis| gamepad.value(axis)).collect()
        };
        let buf = self.buffers.entry(id).or_default();
        buf.axes = values;
        Some(&buf.axes)
    }

    fn buttons(&mut self, id: JoystickId) -> Option<&[ButtonState]> {
        let states: Vec<ButtonState> = {
            let gamepad = self.gamepad(id)?;
            BUTTONS
                .iter()
                .map(|&button| ButtonState::from(gamepad.is_pressed(button)))
                .collect()
        };
        let buf = self.buffers.entry(id).or_default();
        buf.buttons = states;
        Some(&buf.buttons)
    }

    fn watch_connections(&mut self, enabled: bool) {
        self.watching = enabled;
    }

    fn poll_connection_events(&mut self) -> Vec<ConnectionEvent> {
        let mut out = Vec::new();
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            let id = joystick_id(id);
            match event {
                EventType::Connected => {
                    debug!(joystick = id, "gilrs connected");
                    if self.watching {
                        out.push(ConnectionEvent::connected(id));
                    }
                }
                EventType::Disconnected => {
                    debug!(joystick = id, "gilrs disconnected");
                    self.buffers.remove(&id);
                    if self.watching {
                        out.push(ConnectionEvent::disconnected(id));
                    }
                }
                _ => {}
            }
        }
        out
    }
}
