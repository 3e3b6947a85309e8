use stickpoll::backends::gilrs_env::GilrsEnvironment;
use stickpoll::{EventFilter, JoystickConfig, Manager, TracingListener};
use tracing_subscriber::EnvFilter;

fn main() -> stickpoll::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => JoystickConfig::load(path)?,
        None => JoystickConfig {
            enabled: true,
            axis_threshold: 0.15,
            ..JoystickConfig::default()
        },
    };

    let mut mgr = Manager::with_config(GilrsEnvironment::new()?, &config)?;
    mgr.enable();
    mgr.add_listener(TracingListener::new(), EventFilter::All, None);

    println!("Joysticks:");
    for js in mgr.joysticks() {
        println!("- {} ({})", js.name(), js.id());
    }
    loop {
        mgr.poll_events();
        mgr.poll();
        // Sleep a touch to avoid pegging the CPU in the demo
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
}
