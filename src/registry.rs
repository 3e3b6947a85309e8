//! The set of known joysticks while joystick support is enabled.
//!
//! [`JoystickRegistry`] owns every [`Joystick`], reacts to connection
//! notifications, runs the per-frame poll and fans edge events out to the
//! aggregate callbacks and the listener bus. It is created by
//! [`Manager::enable`](crate::Manager::enable) and dropped by
//! [`Manager::disable`](crate::Manager::disable); callbacks live and die with it.

use crate::backends::Environment;
use crate::device::Joystick;
use crate::event::{ButtonState, ConnectionState, JoystickEvent, JoystickId};
use crate::eventbus::EventBus;
use tracing::debug;

/// Connect/disconnect notification target.
pub type StateCallback = Box<dyn FnMut(&Joystick, ConnectionState)>;
/// Button edge target: `(joystick, index, previous, current)`.
pub type ButtonCallback = Box<dyn FnMut(&Joystick, usize, ButtonState, ButtonState)>;
/// Axis edge target: `(joystick, index, previous, current)`.
pub type AxisCallback = Box<dyn FnMut(&Joystick, usize, f32, f32)>;

#[derive(Default)]
struct Callbacks {
    state: Option<StateCallback>,
    button: Option<ButtonCallback>,
    axis: Option<AxisCallback>,
}

impl Callbacks {
    /// Callback first, then the bus.
    fn dispatch(&mut self, bus: &mut EventBus, joystick: &Joystick, event: JoystickEvent) {
        match event {
            JoystickEvent::Connection(state) => {
                if let Some(cb) = self.state.as_mut() {
                    cb(joystick, state);
                }
            }
            JoystickEvent::Button {
                index,
                previous,
                current,
            } => {
                if let Some(cb) = self.button.as_mut() {
                    cb(joystick, index, previous, current);
                }
            }
            JoystickEvent::Axis {
                index,
                previous,
                current,
            } => {
                if let Some(cb) = self.axis.as_mut() {
                    cb(joystick, index, previous, current);
                }
            }
        }
        bus.emit(joystick, &event);
    }
}

pub struct JoystickRegistry {
    joysticks: Vec<Joystick>,
    callbacks: Callbacks,
    retain_disconnected: bool,
}

impl JoystickRegistry {
    /// Enumerate the joysticks already present.
    ///
    /// Ids are probed upward from 0 and enumeration stops at the first id the
    /// environment reports absent, or at `probe_limit`. Each device found is
    /// announced as `Connected` on the bus.
    pub fn discover<E: Environment + ?Sized>(
        env: &mut E,
        bus: &mut EventBus,
        probe_limit: u32,
        retain_disconnected: bool,
    ) -> Self {
        let mut registry = Self {
            joysticks: Vec::new(),
            callbacks: Callbacks::default(),
            retain_disconnected,
        };

        for id in 0..probe_limit {
            if !env.is_present(id) {
                break;
            }
            registry.attach(env, bus, id);
        }
        debug!(count = registry.joysticks.len(), "joysticks discovered");
        registry
    }

    pub fn joysticks(&self) -> &[Joystick] {
        &self.joysticks
    }

    pub fn get(&self, id: JoystickId) -> Option<&Joystick> {
        self.joysticks.iter().find(|js| js.id() == id)
    }

    pub fn len(&self) -> usize {
        self.joysticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joysticks.is_empty()
    }

    /// Refresh every joystick in connection order.
    pub fn poll<E: Environment + ?Sized>(&mut self, env: &mut E, bus: &mut EventBus, threshold: f32) {
        let Self {
            joysticks,
            callbacks,
            ..
        } = self;
        for joystick in joysticks.iter_mut() {
            joystick.poll(env, threshold, |js, event| callbacks.dispatch(bus, js, event));
        }
    }

    /// Apply one connection notification from the environment.
    pub fn handle_connection<E: Environment + ?Sized>(
        &mut self,
        env: &mut E,
        bus: &mut EventBus,
        id: JoystickId,
        state: ConnectionState,
    ) {
        match state {
            ConnectionState::Connected => self.attach(env, bus, id),
            ConnectionState::Disconnected => self.detach(bus, id),
        }
    }

    /// Replace the state callback and replay `Connected` for every known joystick.
    pub fn set_state_callback(&mut self, callback: Option<StateCallback>) {
        self.callbacks.state = callback;
        if let Some(cb) = self.callbacks.state.as_mut() {
            for joystick in &self.joysticks {
                cb(joystick, ConnectionState::Connected);
            }
        }
    }

    pub fn set_button_callback(&mut self, callback: Option<ButtonCallback>) {
        self.callbacks.button = callback;
    }

    pub fn set_axis_callback(&mut self, callback: Option<AxisCallback>) {
        self.callbacks.axis = callback;
    }

    fn attach<E: Environment + ?Sized>(&mut self, env: &mut E, bus: &mut EventBus, id: JoystickId) {
        let name = env.name(id).unwrap_or_default();
        let index = match self.joysticks.iter().position(|js| js.id() == id) {
            Some(index) => {
                debug!(joystick = id, %name, "joystick reconnected");
                self.joysticks[index].reset(name);
                index
            }
            None => {
                debug!(joystick = id, %name, "joystick connected");
                self.joysticks.push(Joystick::new(id, name));
                self.joysticks.len() - 1
            }
        };
        self.callbacks.dispatch(
            bus,
            &self.joysticks[index],
            JoystickEvent::Connection(ConnectionState::Connected),
        );
    }

    fn detach(&mut self, bus: &mut EventBus, id: JoystickId) {
        let Some(index) = self.joysticks.iter().position(|js| js.id() == id) else {
            debug!(joystick = id, "disconnect for unknown joystick ignored");
            return;
        };
        debug!(joystick = id, name = self.joysticks[index].name(), "joystick disconnected");
        self.callbacks.dispatch(
            bus,
            &self.joysticks[index],
            JoystickEvent::Connection(ConnectionState::Disconnected),
        );
        if !self.retain_disconnected {
            self.joysticks.remove(index);
        }
    }
}

impl std::fmt::Debug for JoystickRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoystickRegistry")
            .field("joysticks", &self.joysticks)
            .field("retain_disconnected", &self.retain_disconnected)
            .finish_non_exhaustive()
    }
}
