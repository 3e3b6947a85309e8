//! Scripted in-memory environment.
//!
//! [`VirtualEnvironment`] holds a set of fake joysticks whose axis and button
//! arrays are set by the caller. Plugging and unplugging queue connection
//! notifications exactly like a native library would, so the registry can be
//! driven frame by frame without hardware.

use super::Environment;
use crate::event::{ButtonState, ConnectionEvent, JoystickId};
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
struct VirtualJoystick {
    name: String,
    axes: Vec<f32>,
    buttons: Vec<ButtonState>,
    readable: bool,
}

#[derive(Debug, Default)]
pub struct VirtualEnvironment {
    slots: BTreeMap<JoystickId, VirtualJoystick>,
    pending: Vec<ConnectionEvent>,
    watching: bool,
}

impl VirtualEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert) for devices present before startup.
    pub fn with_joystick(
        mut self,
        id: JoystickId,
        name: &str,
        axis_count: usize,
        button_count: usize,
    ) -> Self {
        self.insert(id, name, axis_count, button_count);
        self
    }

    /// Make a device present without raising a notification.
    pub fn insert(&mut self, id: JoystickId, name: &str, axis_count: usize, button_count: usize) {
        self.slots.insert(
            id,
            VirtualJoystick {
                name: name.to_string(),
                axes: vec![0.0; axis_count],
                buttons: vec![ButtonState::Released; button_count],
                readable: true,
            },
        );
    }

    /// Hot-plug a device and queue a `Connected` notification.
    pub fn plug(&mut self, id: JoystickId, name: &str, axis_count: usize, button_count: usize) {
        self.insert(id, name, axis_count, button_count);
        self.notify(ConnectionEvent::connected(id));
    }

    /// Remove a device and queue a `Disconnected` notification.
    pub fn unplug(&mut self, id: JoystickId) {
        if self.slots.remove(&id).is_some() {
            self.notify(ConnectionEvent::disconnected(id));
        }
    }

    /// Queue an arbitrary notification, whether or not it matches a known device.
    pub fn notify(&mut self, event: ConnectionEvent) {
        if self.watching {
            self.pending.push(event);
        }
    }

    /// Replace the whole axis array. A different length changes the reported count.
    pub fn set_axes(&mut self, id: JoystickId, values: &[f32]) {
        if let Some(js) = self.slots.get_mut(&id) {
            js.axes.clear();
            js.axes.extend_from_slice(values);
        }
    }

    /// Set one axis, growing the array with zeros if `index` is past the end.
    pub fn set_axis(&mut self, id: JoystickId, index: usize, value: f32) {
        if let Some(js) = self.slots.get_mut(&id) {
            if index >= js.axes.len() {
                js.axes.resize(index + 1, 0.0);
            }
            js.axes[index] = value;
        }
    }

    /// Replace the whole button array.
    pub fn set_buttons(&mut self, id: JoystickId, states: &[ButtonState]) {
        if let Some(js) = self.slots.get_mut(&id) {
            js.buttons.clear();
            js.buttons.extend_from_slice(states);
        }
    }

    /// Set one button, growing the array with `Released` if `index` is past the end.
    pub fn set_button(&mut self, id: JoystickId, index: usize, state: ButtonState) {
        if let Some(js) = self.slots.get_mut(&id) {
            if index >= js.buttons.len() {
                js.buttons.resize(index + 1, ButtonState::Released);
            }
            js.buttons[index] = state;
        }
    }

    pub fn press_button(&mut self, id: JoystickId, index: usize) {
        self.set_button(id, index, ButtonState::Pressed);
    }

    pub fn release_button(&mut self, id: JoystickId, index: usize) {
        self.set_button(id, index, ButtonState::Released);
    }

    /// Make reads for `id` fail (or succeed again) while the device stays present.
    pub fn set_readable(&mut self, id: JoystickId, readable: bool) {
        if let Some(js) = self.slots.get_mut(&id) {
            js.readable = readable;
        }
    }

    pub fn is_watching(&self) -> bool {
        self.watching
    }

    fn readable(&self, id: JoystickId) -> Option<&VirtualJoystick> {
        self.slots.get(&id).filter(|js| js.readable)
    }
}

impl Environment for VirtualEnvironment {
    fn is_present(&self, id: JoystickId) -> bool {
        self.slots.contains_key(&id)
    }

    fn name(&self, id: JoystickId) -> Option<String> {
        self.slots.get(&id).map(|js| js.name.clone())
    }

    fn axes(&mut self, id: JoystickId) -> Option<&[f32]> {
        self.readable(id).map(|js| js.axes.as_slice())
    }

    fn buttons(&mut self, id: JoystickId) -> Option<&[ButtonState]> {
        self.readable(id).map(|js| js.buttons.as_slice())
    }

    fn watch_connections(&mut self, enabled: bool) {
        self.watching = enabled;
        if !enabled {
            self.pending.clear();
        }
    }

    fn poll_connection_events(&mut self) -> Vec<ConnectionEvent> {
        std::mem::take(&mut self.pending)
    }
}
