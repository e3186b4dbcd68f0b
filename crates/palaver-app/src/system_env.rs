//! Production Environment implementation using system time and RNG.
//!
//! `SystemEnv` runs the client against real resources: monotonic system
//! time, tokio async sleep, and OS cryptographic randomness. Production
//! behavior is therefore non-deterministic; the simulation harness
//! substitutes a seeded environment for reproducible runs.

use std::time::Duration;

use palaver_client::Environment;

/// Production environment using system time and cryptographic RNG.
///
/// # Panics
///
/// Panics if the OS RNG fails. This is intentional: RNG failure indicates
/// OS-level problems and manager failover selection must not silently
/// degrade to a fixed choice.
#[derive(Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }

    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer).expect("invariant: OS RNG failure is unrecoverable");
    }
}
