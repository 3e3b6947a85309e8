use crate::device::Joystick;
use crate::event::JoystickEvent;
use crate::eventbus::JoystickListener;

/// Wraps a listener and filters events based on a user-supplied predicate.
pub struct FilteredListener {
    predicate: Box<dyn Fn(&Joystick, &JoystickEvent) -> bool>,
    inner: Box<dyn JoystickListener>,
}

impl FilteredListener {
    pub fn new(
        predicate: impl Fn(&Joystick, &JoystickEvent) -> bool + 'static,
        inner: impl JoystickListener + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner: Box::new(inner),
        }
    }
}

impl JoystickListener for FilteredListener {
    fn on_event(&mut self, joystick: &Joystick, event: &JoystickEvent) {
        if (self.predicate)(joystick, event) {
            self.inner.on_event(joystick, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn forwards_only_matching_events() {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let mut listener = FilteredListener::new(
            |_: &Joystick, ev: &JoystickEvent| {
                matches!(ev, JoystickEvent::Axis { current, .. } if current.abs() > 0.5)
            },
            move |_: &Joystick, _: &JoystickEvent| counter.set(counter.get() + 1),
        );

        let js = Joystick::new(0, "Pad");
        for value in [0.1, 0.9, -0.7, 0.5] {
            listener.on_event(
                &js,
                &JoystickEvent::Axis {
                    index: 0,
                    previous: 0.0,
                    current: value,
                },
            );
        }
        assert_eq!(hits.get(), 2);
    }
}
