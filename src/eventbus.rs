use crate::device::Joystick;
use crate::event::{JoystickEvent, JoystickId};
use std::collections::BTreeMap;

/// Trait for reacting to joystick events from any device.
pub trait JoystickListener {
    fn on_event(&mut self, joystick: &Joystick, event: &JoystickEvent);
}

impl<F> JoystickListener for F
where
    F: FnMut(&Joystick, &JoystickEvent),
{
    fn on_event(&mut self, joystick: &Joystick, event: &JoystickEvent) {
        self(joystick, event)
    }
}

/// Determines which kinds of events a listener wants to receive.
#[derive(Debug, Clone, Copy)]
pub enum EventFilter {
    All,
    AxesOnly,
    ButtonsOnly,
    ConnectionsOnly,
    Custom(fn(&Joystick, &JoystickEvent) -> bool),
}

impl EventFilter {
    fn accepts(&self, joystick: &Joystick, event: &JoystickEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::AxesOnly => event.is_axis(),
            EventFilter::ButtonsOnly => event.is_button(),
            EventFilter::ConnectionsOnly => event.is_connection(),
            EventFilter::Custom(f) => f(joystick, event),
        }
    }
}

/// Handle returned by [`EventBus::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Metadata-wrapped listener with filters and control flags.
struct ListenerEntry {
    listener: Box<dyn JoystickListener>,
    enabled: bool,
    filter: EventFilter,
    tag: Option<JoystickId>, // only events from this joystick
}

/// Observer list for joystick events.
///
/// Listeners are called in registration order.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: BTreeMap<ListenerId, ListenerEntry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener with optional filtering and joystick tag.
    pub fn add_listener(
        &mut self,
        listener: impl JoystickListener + 'static,
        filter: EventFilter,
        tag: Option<JoystickId>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
                filter,
                tag,
            },
        );
        self.next_id += 1;
        id
    }

    /// Enables a previously registered listener.
    pub fn enable(&mut self, id: ListenerId) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Disables (mutes) a listener without removing it.
    pub fn disable(&mut self, id: ListenerId) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a listener entirely. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Emits one event to all active and matching listeners.
    pub fn emit(&mut self, joystick: &Joystick, event: &JoystickEvent) {
        for entry in self.listeners.values_mut() {
            if !entry.enabled {
                continue;
            }

            if let Some(wanted) = entry.tag {
                if joystick.id() != wanted {
                    continue;
                }
            }

            if entry.filter.accepts(joystick, event) {
                entry.listener.on_event(joystick, event);
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
