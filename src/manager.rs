//! Joystick support service.
//!
//! [`Manager`] owns an [`Environment`], the global axis deadzone, a persistent
//! [`EventBus`], and, while joystick support is enabled, a [`JoystickRegistry`].
//! Nothing here is global: construct one manager per environment and drive it
//! from the thread that runs the frame loop.
//!
//! ```text
//!            enable()                 disable()
//! Disabled ───────────▶ Enabled ───────────────▶ Disabled
//! ```
//!
//! Per frame:
//! 1. [`Manager::poll_events`] drains connection notifications from the environment.
//! 2. [`Manager::poll`] refreshes every joystick and emits edge events.
//!
//! Every registry operation is a silent no-op while disabled.

use crate::backends::Environment;
use crate::config::{validate_threshold, JoystickConfig, DEFAULT_PROBE_LIMIT};
use crate::device::Joystick;
use crate::error::Result;
use crate::event::{ButtonState, ConnectionState, JoystickId};
use crate::eventbus::{EventBus, EventFilter, JoystickListener, ListenerId};
use crate::registry::{AxisCallback, ButtonCallback, JoystickRegistry, StateCallback};
use crate::snapshot::Snapshot;
use tracing::info;

pub struct Manager<E: Environment> {
    env: E,
    registry: Option<JoystickRegistry>,
    bus: EventBus,
    axis_threshold: f32,
    retain_disconnected: bool,
    probe_limit: u32,
}

impl<E: Environment> Manager<E> {
    /// Wrap an environment with joystick support disabled and no deadzone.
    pub fn new(env: E) -> Self {
        Self {
            env,
            registry: None,
            bus: EventBus::new(),
            axis_threshold: 0.0,
            retain_disconnected: false,
            probe_limit: DEFAULT_PROBE_LIMIT,
        }
    }

    /// Wrap an environment and apply `config`, enabling support if requested.
    pub fn with_config(env: E, config: &JoystickConfig) -> Result<Self> {
        config.validate()?;
        let mut manager = Self::new(env);
        manager.axis_threshold = config.axis_threshold;
        manager.retain_disconnected = config.retain_disconnected;
        manager.probe_limit = config.probe_limit;
        if config.enabled {
            manager.enable();
        }
        Ok(manager)
    }

    /// Turn joystick support on. Does nothing if already enabled.
    pub fn enable(&mut self) {
        if self.registry.is_some() {
            return;
        }
        self.env.watch_connections(true);
        let registry = JoystickRegistry::discover(
            &mut self.env,
            &mut self.bus,
            self.probe_limit,
            self.retain_disconnected,
        );
        info!(joysticks = registry.len(), "joystick support enabled");
        self.registry = Some(registry);
    }

    /// Turn joystick support off, dropping every joystick and callback.
    pub fn disable(&mut self) {
        if let Some(registry) = self.registry.take() {
            self.env.watch_connections(false);
            info!(joysticks = registry.len(), "joystick support disabled");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.registry.is_some()
    }

    /// Alias for [`disable`](Self::disable), run on drop.
    pub fn shutdown(&mut self) {
        self.disable();
    }

    /// Drain and apply connection notifications from the environment.
    pub fn poll_events(&mut self) {
        let Some(registry) = self.registry.as_mut() else {
            return;
        };
        for event in self.env.poll_connection_events() {
            registry.handle_connection(&mut self.env, &mut self.bus, event.id, event.state);
        }
    }

    /// Apply a single connection notification.
    pub fn handle_connection(&mut self, id: JoystickId, state: ConnectionState) {
        if let Some(registry) = self.registry.as_mut() {
            registry.handle_connection(&mut self.env, &mut self.bus, id, state);
        }
    }

    /// Refresh every joystick once. Call once per frame.
    pub fn poll(&mut self) {
        if let Some(registry) = self.registry.as_mut() {
            registry.poll(&mut self.env, &mut self.bus, self.axis_threshold);
        }
    }

    /// Replace the connect/disconnect callback.
    ///
    /// A new callback is immediately called with `Connected` for each joystick
    /// already known, in connection order. `None` clears it.
    pub fn set_state_callback(&mut self, callback: Option<StateCallback>) {
        if let Some(registry) = self.registry.as_mut() {
            registry.set_state_callback(callback);
        }
    }

    pub fn set_button_callback(&mut self, callback: Option<ButtonCallback>) {
        if let Some(registry) = self.registry.as_mut() {
            registry.set_button_callback(callback);
        }
    }

    pub fn set_axis_callback(&mut self, callback: Option<AxisCallback>) {
        if let Some(registry) = self.registry.as_mut() {
            registry.set_axis_callback(callback);
        }
    }

    /// Registers a listener on the bus. Listeners survive enable/disable cycles.
    pub fn add_listener(
        &mut self,
        listener: impl JoystickListener + 'static,
        filter: EventFilter,
        tag: Option<JoystickId>,
    ) -> ListenerId {
        self.bus.add_listener(listener, filter, tag)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.bus.remove_listener(id)
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Known joysticks in connection order (empty while disabled).
    pub fn joysticks(&self) -> &[Joystick] {
        self.registry
            .as_ref()
            .map(JoystickRegistry::joysticks)
            .unwrap_or(&[])
    }

    pub fn joystick(&self, id: JoystickId) -> Option<&Joystick> {
        self.registry.as_ref()?.get(id)
    }

    /// Name of the joystick at registry position `index`.
    pub fn joystick_name(&self, index: usize) -> Option<&str> {
        self.joysticks().get(index).map(Joystick::name)
    }

    /// Axes of the joystick at registry position `index` (empty if out of range).
    pub fn joystick_axes(&self, index: usize) -> &[f32] {
        self.joysticks().get(index).map(Joystick::axes).unwrap_or(&[])
    }

    /// Buttons of the joystick at registry position `index` (empty if out of range).
    pub fn joystick_buttons(&self, index: usize) -> &[ButtonState] {
        self.joysticks()
            .get(index)
            .map(Joystick::buttons)
            .unwrap_or(&[])
    }

    pub fn axis_threshold(&self) -> f32 {
        self.axis_threshold
    }

    /// Set the global deadzone. Applies from the next poll on.
    pub fn set_axis_threshold(&mut self, threshold: f32) -> Result<()> {
        validate_threshold(threshold)?;
        self.axis_threshold = threshold;
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.joysticks())
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }
}

impl<E: Environment> Drop for Manager<E> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<E: Environment> std::fmt::Debug for Manager<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("registry", &self.registry)
            .field("bus", &self.bus)
            .field("axis_threshold", &self.axis_threshold)
            .field("retain_disconnected", &self.retain_disconnected)
            .field("probe_limit", &self.probe_limit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::virtual_input::VirtualEnvironment;
    use crate::error::Error;

    fn manager() -> Manager<VirtualEnvironment> {
        Manager::new(VirtualEnvironment::new().with_joystick(0, "Pad", 2, 2))
    }

    #[test]
    fn enable_is_idempotent() {
        let mut mgr = manager();
        assert!(!mgr.is_enabled());
        mgr.enable();
        mgr.env_mut().set_axes(0, &[0.5, 0.0]);
        mgr.poll();
        mgr.enable();
        assert_eq!(mgr.joysticks().len(), 1);
        assert_eq!(mgr.joystick_axes(0), &[0.5, 0.0]);
    }

    #[test]
    fn disable_tears_down_and_stops_watching() {
        let mut mgr = manager();
        mgr.enable();
        assert!(mgr.env().is_watching());
        mgr.disable();
        mgr.disable();
        assert!(!mgr.is_enabled());
        assert!(!mgr.env().is_watching());
        assert!(mgr.joysticks().is_empty());
        assert_eq!(mgr.joystick_name(0), None);
        assert!(mgr.joystick_buttons(0).is_empty());
    }

    #[test]
    fn operations_while_disabled_are_noops() {
        let mut mgr = manager();
        mgr.set_state_callback(Some(Box::new(|_: &Joystick, _: ConnectionState| {
            panic!("callback must not be stored while disabled")
        })));
        mgr.poll();
        mgr.poll_events();
        mgr.handle_connection(0, ConnectionState::Connected);
        assert!(mgr.snapshot().is_empty());

        // Callbacks registered while disabled are dropped, so enabling does not replay.
        mgr.enable();
        mgr.poll();
    }

    #[test]
    fn threshold_validation_and_persistence() {
        let mut mgr = manager();
        assert!(matches!(
            mgr.set_axis_threshold(f32::NAN),
            Err(Error::InvalidThreshold(_))
        ));
        mgr.set_axis_threshold(0.25).unwrap();
        mgr.enable();
        mgr.disable();
        assert_eq!(mgr.axis_threshold(), 0.25);
    }

    #[test]
    fn with_config_applies_settings() {
        let config = JoystickConfig {
            enabled: true,
            axis_threshold: 0.1,
            retain_disconnected: true,
            probe_limit: 8,
        };
        let mut mgr = Manager::with_config(manager_env(), &config).unwrap();
        assert!(mgr.is_enabled());
        assert_eq!(mgr.axis_threshold(), 0.1);

        mgr.env_mut().unplug(0);
        mgr.poll_events();
        assert_eq!(mgr.joysticks().len(), 1);
    }

    fn manager_env() -> VirtualEnvironment {
        VirtualEnvironment::new().with_joystick(0, "Pad", 1, 1)
    }
}
