use std::cell::RefCell;
use std::rc::Rc;

use stickpoll::backends::virtual_input::VirtualEnvironment;
use stickpoll::{
    ButtonState, ConnectionEvent, ConnectionState, EventFilter, Joystick, JoystickConfig,
    JoystickEvent, Manager,
};

type Log<T> = Rc<RefCell<Vec<T>>>;

fn log<T>() -> Log<T> {
    Rc::new(RefCell::new(Vec::new()))
}

fn record_axes(mgr: &mut Manager<VirtualEnvironment>) -> Log<(u32, usize, f32, f32)> {
    let out = log();
    let sink = out.clone();
    mgr.set_axis_callback(Some(Box::new(
        move |js: &Joystick, index: usize, previous: f32, current: f32| {
            sink.borrow_mut().push((js.id(), index, previous, current));
        },
    )));
    out
}

fn record_buttons(
    mgr: &mut Manager<VirtualEnvironment>,
) -> Log<(u32, usize, ButtonState, ButtonState)> {
    let out = log();
    let sink = out.clone();
    mgr.set_button_callback(Some(Box::new(
        move |js: &Joystick, index: usize, previous: ButtonState, current: ButtonState| {
            sink.borrow_mut().push((js.id(), index, previous, current));
        },
    )));
    out
}

fn record_states(mgr: &mut Manager<VirtualEnvironment>) -> Log<(u32, ConnectionState)> {
    let out = log();
    let sink = out.clone();
    mgr.set_state_callback(Some(Box::new(
        move |js: &Joystick, state: ConnectionState| {
            sink.borrow_mut().push((js.id(), state));
        },
    )));
    out
}

#[test]
fn deadzone_sequence_over_three_polls() {
    let mut mgr = Manager::new(VirtualEnvironment::new().with_joystick(0, "Pad", 1, 0));
    mgr.set_axis_threshold(0.1).unwrap();
    mgr.enable();
    let axes = record_axes(&mut mgr);

    let mut stored = Vec::new();
    for raw in [0.05, 0.3, 0.02] {
        mgr.env_mut().set_axes(0, &[raw]);
        mgr.poll();
        stored.push(mgr.joystick_axes(0)[0]);
    }

    assert_eq!(stored, vec![0.0, 0.3, 0.0]);
    assert_eq!(*axes.borrow(), vec![(0, 0, 0.0, 0.3), (0, 0, 0.3, 0.0)]);
}

#[test]
fn failing_reads_release_everything() {
    let mut mgr = Manager::new(VirtualEnvironment::new().with_joystick(0, "Pad", 2, 4));
    mgr.enable();
    mgr.env_mut().set_axes(0, &[0.6, -0.2]);
    mgr.env_mut().set_buttons(
        0,
        &[
            ButtonState::Pressed,
            ButtonState::Released,
            ButtonState::Released,
            ButtonState::Repeating,
        ],
    );
    mgr.poll();

    let buttons = record_buttons(&mut mgr);
    mgr.env_mut().set_readable(0, false);
    mgr.poll();

    assert_eq!(mgr.joystick_axes(0), &[0.0, 0.0]);
    assert_eq!(mgr.joystick_buttons(0), &[ButtonState::Released; 4]);
    assert_eq!(
        *buttons.borrow(),
        vec![
            (0, 0, ButtonState::Pressed, ButtonState::Released),
            (0, 3, ButtonState::Repeating, ButtonState::Released),
        ]
    );

    // Reads come back on the next frame without any intervention.
    mgr.env_mut().set_readable(0, true);
    mgr.poll();
    assert_eq!(mgr.joystick_axes(0), &[0.6, -0.2]);
}

#[test]
fn growing_axis_count_reports_nothing_for_neutral_new_axes() {
    let mut mgr = Manager::new(VirtualEnvironment::new().with_joystick(0, "Pad", 2, 0));
    mgr.enable();
    mgr.poll();
    let axes = record_axes(&mut mgr);

    mgr.env_mut().set_axes(0, &[0.0, 0.0, 0.0, 0.0]);
    mgr.poll();
    assert!(axes.borrow().is_empty());
    assert_eq!(mgr.joystick_axes(0).len(), 4);
    assert_eq!(mgr.joysticks()[0].previous_axes().len(), 4);
}

#[test]
fn state_callback_syncs_existing_joysticks() {
    let env = VirtualEnvironment::new()
        .with_joystick(0, "First", 0, 0)
        .with_joystick(1, "Second", 0, 0)
        .with_joystick(2, "Third", 0, 0);
    let mut mgr = Manager::new(env);
    mgr.enable();

    let states = record_states(&mut mgr);
    assert_eq!(
        *states.borrow(),
        vec![
            (0, ConnectionState::Connected),
            (1, ConnectionState::Connected),
            (2, ConnectionState::Connected),
        ]
    );

    // Button and axis callbacks never replay.
    let buttons = record_buttons(&mut mgr);
    let axes = record_axes(&mut mgr);
    assert!(buttons.borrow().is_empty());
    assert!(axes.borrow().is_empty());
}

#[test]
fn hot_plug_round_trip() {
    let mut mgr = Manager::new(VirtualEnvironment::new());
    mgr.enable();
    let states = record_states(&mut mgr);
    assert!(states.borrow().is_empty());

    mgr.env_mut().plug(5, "Arcade Stick", 2, 8);
    mgr.poll_events();
    assert_eq!(mgr.joystick_name(0), Some("Arcade Stick"));

    mgr.env_mut().unplug(5);
    mgr.poll_events();
    assert!(mgr.joysticks().is_empty());

    assert_eq!(
        *states.borrow(),
        vec![
            (5, ConnectionState::Connected),
            (5, ConnectionState::Disconnected)
        ]
    );
}

#[test]
fn retained_joystick_lingers_until_disable() {
    let config = JoystickConfig {
        enabled: true,
        retain_disconnected: true,
        ..JoystickConfig::default()
    };
    let env = VirtualEnvironment::new().with_joystick(0, "Pad", 1, 1);
    let mut mgr = Manager::with_config(env, &config).unwrap();
    mgr.env_mut().set_axes(0, &[0.9]);
    mgr.poll();

    mgr.env_mut().unplug(0);
    mgr.poll_events();
    assert_eq!(mgr.joysticks().len(), 1);

    // The lingering entry reads neutral.
    mgr.poll();
    assert_eq!(mgr.joystick_axes(0), &[0.0]);

    mgr.disable();
    assert!(mgr.joysticks().is_empty());
}

#[test]
fn unknown_disconnect_is_silent() {
    let mut mgr = Manager::new(VirtualEnvironment::new().with_joystick(0, "Pad", 0, 0));
    mgr.enable();
    let states = record_states(&mut mgr);
    states.borrow_mut().clear();

    mgr.env_mut().notify(ConnectionEvent::disconnected(9));
    mgr.poll_events();
    assert!(states.borrow().is_empty());
    assert_eq!(mgr.joysticks().len(), 1);
}

#[test]
fn notifications_while_disabled_are_lost() {
    let mut mgr = Manager::new(VirtualEnvironment::new());
    mgr.env_mut().plug(0, "Pad", 0, 0);
    mgr.poll_events();
    assert!(mgr.joysticks().is_empty());

    // Enumeration on enable still finds it.
    mgr.enable();
    assert_eq!(mgr.joysticks().len(), 1);
}

#[test]
fn listeners_see_callback_events_and_survive_disable() {
    let mut mgr = Manager::new(VirtualEnvironment::new().with_joystick(0, "Pad", 1, 1));
    let seen: Log<JoystickEvent> = log();
    let sink = seen.clone();
    mgr.add_listener(
        move |_: &Joystick, ev: &JoystickEvent| sink.borrow_mut().push(*ev),
        EventFilter::All,
        None,
    );

    mgr.enable();
    mgr.env_mut().press_button(0, 0);
    mgr.poll();
    mgr.disable();
    mgr.enable();

    assert_eq!(
        *seen.borrow(),
        vec![
            JoystickEvent::Connection(ConnectionState::Connected),
            JoystickEvent::Button {
                index: 0,
                previous: ButtonState::Released,
                current: ButtonState::Pressed,
            },
            JoystickEvent::Connection(ConnectionState::Connected),
        ]
    );
}

#[test]
fn polling_follows_connection_order() {
    let mut mgr = Manager::new(VirtualEnvironment::new());
    mgr.enable();
    for id in [3, 1, 2] {
        mgr.env_mut().plug(id, "Pad", 1, 0);
    }
    mgr.poll_events();
    let axes = record_axes(&mut mgr);

    for id in [1, 2, 3] {
        mgr.env_mut().set_axes(id, &[1.0]);
    }
    mgr.poll();
    let order: Vec<u32> = axes.borrow().iter().map(|(id, ..)| *id).collect();
    assert_eq!(order, vec![3, 1, 2]);
}

#[test]
fn snapshot_reflects_last_poll() {
    let mut mgr = Manager::new(VirtualEnvironment::new().with_joystick(0, "Pad", 1, 2));
    mgr.enable();
    mgr.env_mut().set_axes(0, &[-0.5]);
    mgr.env_mut().press_button(0, 1);
    mgr.poll();

    let snap = mgr.snapshot();
    let state = snap.get(0).unwrap();
    assert_eq!(state.axes, vec![-0.5]);
    assert_eq!(state.buttons, vec![ButtonState::Released, ButtonState::Pressed]);

    mgr.disable();
    assert!(mgr.snapshot().is_empty());
}
