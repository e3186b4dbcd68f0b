//! Runtime orchestration for a Palaver chat client.
//!
//! The protocol core in `palaver-client` is a pure state machine; this
//! crate supplies the loop that drives it. [`Runtime`] round-robins user
//! input, inbound channel messages, and the periodic directory refresh on
//! a cooperative tick, executing the actions the client emits against a
//! platform [`Driver`] and a [`ChatSurface`].
//!
//! # Components
//!
//! - [`Driver`]: trait for platform-specific I/O (directory lookup, message
//!   channel, user input)
//! - [`ChatSurface`]: trait for the user-facing display collaborator
//! - [`SystemEnv`]: production environment (real clock, OS RNG)
//! - [`Runtime`]: generic orchestration loop

mod driver;
mod event;
mod runtime;
mod surface;
mod system_env;

pub use driver::Driver;
pub use event::UserEvent;
pub use runtime::{MANAGER_LOOKUP_INTERVAL, Runtime, TICK_INTERVAL};
pub use surface::ChatSurface;
pub use system_env::SystemEnv;
