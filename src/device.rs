//! A single joystick and its double-buffered readings.
//!
//! Each [`Joystick`] keeps the values of the current poll next to the values of
//! the poll before it. [`Joystick::poll`] refreshes both and reports the edges
//! between them; it never fails. A read the environment cannot serve leaves the
//! arrays at their current length and neutral values.

use crate::backends::Environment;
use crate::event::{ButtonState, JoystickEvent, JoystickId};
use tracing::{debug, trace};

#[derive(Clone, Debug)]
pub struct Joystick {
    id: JoystickId,
    name: String,
    axes: Vec<f32>,
    previous_axes: Vec<f32>,
    buttons: Vec<ButtonState>,
    previous_buttons: Vec<ButtonState>,
}

impl Joystick {
    /// Create an empty joystick. Array sizes are learned on the first poll.
    pub fn new(id: JoystickId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            axes: Vec::new(),
            previous_axes: Vec::new(),
            buttons: Vec::new(),
            previous_buttons: Vec::new(),
        }
    }

    /// Create a joystick named by the environment.
    pub fn open<E: Environment + ?Sized>(env: &E, id: JoystickId) -> Self {
        let name = env.name(id).unwrap_or_default();
        Self::new(id, name)
    }

    #[inline]
    pub fn id(&self) -> JoystickId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Axis values from the latest poll, deadzone applied.
    #[inline]
    pub fn axes(&self) -> &[f32] {
        &self.axes
    }

    #[inline]
    pub fn previous_axes(&self) -> &[f32] {
        &self.previous_axes
    }

    /// Button states from the latest poll.
    #[inline]
    pub fn buttons(&self) -> &[ButtonState] {
        &self.buttons
    }

    #[inline]
    pub fn previous_buttons(&self) -> &[ButtonState] {
        &self.previous_buttons
    }

    /// Value of one axis (`0.0` if out of range).
    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    /// State of one button (`Released` if out of range).
    pub fn button(&self, index: usize) -> ButtonState {
        self.buttons.get(index).copied().unwrap_or_default()
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        self.button(index).is_down()
    }

    /// Forget all readings, as after a fresh connection.
    pub(crate) fn reset(&mut self, name: String) {
        self.name = name;
        self.axes.clear();
        self.previous_axes.clear();
        self.buttons.clear();
        self.previous_buttons.clear();
    }

    /// Refresh from the environment and report the edges of this frame.
    ///
    /// Axis events are emitted before the buttons are refreshed. `emit` receives
    /// the joystick in its post-refresh state for the channel being reported.
    pub fn poll<E, F>(&mut self, env: &mut E, threshold: f32, mut emit: F)
    where
        E: Environment + ?Sized,
        F: FnMut(&Joystick, JoystickEvent),
    {
        self.refresh_axes(env, threshold);
        for index in 0..self.axes.len() {
            let previous = self.previous_axes[index];
            let current = self.axes[index];
            if current.abs() > 0.0 || previous.abs() > 0.0 {
                trace!(joystick = self.id, index, previous, current, "axis");
                emit(
                    &*self,
                    JoystickEvent::Axis {
                        index,
                        previous,
                        current,
                    },
                );
            }
        }

        self.refresh_buttons(env);
        for index in 0..self.buttons.len() {
            let previous = self.previous_buttons[index];
            let current = self.buttons[index];
            if previous != current {
                trace!(joystick = self.id, index, %previous, %current, "button");
                emit(
                    &*self,
                    JoystickEvent::Button {
                        index,
                        previous,
                        current,
                    },
                );
            }
        }
    }

    fn refresh_axes<E: Environment + ?Sized>(&mut self, env: &mut E, threshold: f32) {
        self.previous_axes.clone_from(&self.axes);
        match env.axes(self.id) {
            Some(raw) => {
                if raw.len() != self.axes.len() {
                    debug!(
                        joystick = self.id,
                        from = self.axes.len(),
                        to = raw.len(),
                        "axis count changed"
                    );
                    self.axes.clear();
                    self.axes.resize(raw.len(), 0.0);
                    self.previous_axes.clone_from(&self.axes);
                }
                self.axes.copy_from_slice(raw);
                for value in &mut self.axes {
                    if value.abs() < threshold {
                        *value = 0.0;
                    }
                }
            }
            None => self.axes.fill(0.0),
        }
        debug_assert_eq!(self.previous_axes.len(), self.axes.len());
    }

    fn refresh_buttons<E: Environment + ?Sized>(&mut self, env: &mut E) {
        self.previous_buttons.clone_from(&self.buttons);
        match env.buttons(self.id) {
            Some(raw) => {
                if raw.len() != self.buttons.len() {
                    debug!(
                        joystick = self.id,
                        from = self.buttons.len(),
                        to = raw.len(),
                        "button count changed"
                    );
                    self.buttons.clear();
                    self.buttons.resize(raw.len(), ButtonState::Released);
                    self.previous_buttons.clone_from(&self.buttons);
                }
                self.buttons.copy_from_slice(raw);
            }
            None => self.buttons.fill(ButtonState::Released),
        }
        debug_assert_eq!(self.previous_buttons.len(), self.buttons.len());
    }
}
