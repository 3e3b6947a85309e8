use stickpoll::backends::virtual_input::VirtualEnvironment;
use stickpoll::{
    ButtonState, ConnectionState, EventFilter, Joystick, Manager, TracingListener,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    // A scripted device standing in for real hardware
    let env = VirtualEnvironment::new().with_joystick(0, "Demo Virtual Pad", 2, 4);
    let mut mgr = Manager::new(env);
    mgr.set_axis_threshold(0.1).expect("valid threshold");
    mgr.add_listener(TracingListener::new(), EventFilter::ConnectionsOnly, None);
    mgr.enable();

    mgr.set_state_callback(Some(Box::new(|js: &Joystick, state: ConnectionState| {
        println!("(Virtual) {} [{}] {:?}", js.name(), js.id(), state);
    })));
    mgr.set_axis_callback(Some(Box::new(|js: &Joystick, axis: usize, old: f32, new: f32| {
        println!("(Virtual) {} axis {} {:.2} -> {:.2}", js.name(), axis, old, new);
    })));
    mgr.set_button_callback(Some(Box::new(
        |js: &Joystick, button: usize, old: ButtonState, new: ButtonState| {
            println!("(Virtual) {} button {} {} -> {}", js.name(), button, old, new);
        },
    )));

    let script: [(&[f32], Option<usize>); 4] = [
        (&[0.05, 0.0], None),
        (&[0.75, 0.0], Some(1)),
        (&[0.75, -0.4], Some(1)),
        (&[0.02, 0.0], None),
    ];

    for (frame, (axes, pressed)) in script.iter().enumerate() {
        println!("-- frame {frame}");
        let env = mgr.env_mut();
        env.set_axes(0, axes);
        env.set_buttons(0, &[ButtonState::Released; 4]);
        if let Some(button) = pressed {
            env.press_button(0, *button);
        }
        mgr.poll_events();
        mgr.poll();
    }

    // Hot-plug a second device mid-run
    mgr.env_mut().plug(1, "Late Joystick", 1, 1);
    mgr.poll_events();

    println!("{}", mgr.snapshot().to_json().expect("serialize snapshot"));
}
