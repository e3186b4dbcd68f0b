//! Deterministic simulation harness for Palaver protocol testing.
//!
//! In-memory implementations of the app-layer collaborators so the whole
//! client, protocol core plus runtime loop, runs reproducibly with no real
//! network, directory service, or display:
//!
//! - [`SimEnv`]: seeded randomness with immediate sleeps
//! - [`SimNetwork`]: per-participant FIFO inboxes plus a capability
//!   directory with transient-failure injection
//! - [`SimDriver`]: the app [`Driver`](palaver_app::Driver) over a
//!   `SimNetwork` endpoint
//! - [`RecordingSurface`]: display surface that records every notification
//!   for assertions

pub mod network;
pub mod recording_surface;
pub mod sim_driver;
pub mod sim_env;

pub use network::{SimError, SimNetwork};
pub use recording_surface::RecordingSurface;
pub use sim_driver::{SimDriver, UserEvents};
pub use sim_env::SimEnv;
