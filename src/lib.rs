//! StickPoll: frame-polled joystick registry for Rust.
//!
//! Tracks connected joysticks behind a pluggable [`Environment`](backends::Environment),
//! keeps a previous/current snapshot of every axis and button, and reports exactly
//! the transitions of each frame to callbacks and listeners.
//!
//! ```
//! use stickpoll::backends::virtual_input::VirtualEnvironment;
//! use stickpoll::{ButtonState, Joystick, Manager};
//!
//! let env = VirtualEnvironment::new().with_joystick(0, "Pad", 2, 4);
//! let mut mgr = Manager::new(env);
//! mgr.set_axis_threshold(0.1).unwrap();
//! mgr.enable();
//! mgr.set_button_callback(Some(Box::new(
//!     |js: &Joystick, index: usize, previous: ButtonState, current: ButtonState| {
//!         println!("{} button {index}: {previous} -> {current}", js.name());
//!     },
//! )));
//!
//! mgr.env_mut().press_button(0, 2);
//! mgr.poll_events();
//! mgr.poll();
//! assert!(mgr.joysticks()[0].is_pressed(2));
//! ```

pub mod backends;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod filtered_listener;
pub mod logger;
pub mod manager;
pub mod registry;
pub mod snapshot;

pub use config::*;
pub use device::*;
pub use error::{Error, Result};
pub use event::*;
pub use eventbus::*;
pub use filtered_listener::FilteredListener;
pub use logger::TracingListener;
pub use manager::*;
pub use registry::{AxisCallback, ButtonCallback, JoystickRegistry, StateCallback};
pub use snapshot::*;
