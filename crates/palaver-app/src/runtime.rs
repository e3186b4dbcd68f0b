//! Generic runtime for client orchestration.
//!
//! The runtime drives the protocol core on a cooperative periodic tick
//! (the poll-or-tick scheduling model): each cycle polls user input, drains
//! a bounded batch of inbound messages, and refreshes the manager directory
//! when its interval has elapsed. Every piece of work yields between
//! cycles, so no concern starves another, and all client state is mutated
//! from this single task.

use std::time::Duration;

use palaver_client::{Client, ClientAction, ClientEvent, ClientIdentity, Environment};

use crate::{ChatSurface, Driver, UserEvent};

/// Delay between scheduler cycles.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Minimum delay between directory lookups.
pub const MANAGER_LOOKUP_INTERVAL: Duration = Duration::from_secs(5);

/// Most inbound messages drained in one cycle, so a noisy peer cannot
/// starve user input or directory refresh.
const INBOUND_BATCH_LIMIT: usize = 32;

/// Generic runtime that orchestrates Client, Driver, and surface.
///
/// # Type Parameters
///
/// - `D`: platform-specific I/O driver
/// - `S`: user-facing display surface
/// - `E`: environment for randomness and timing
pub struct Runtime<D, S, E>
where
    D: Driver,
    S: ChatSurface,
    E: Environment,
{
    driver: D,
    surface: S,
    env: E,
    client: Client<E>,
    lookup_interval: Duration,
    last_lookup: Option<D::Instant>,
}

impl<D, S, E> Runtime<D, S, E>
where
    D: Driver<Instant = E::Instant>,
    S: ChatSurface,
    E: Environment,
{
    /// Create a new runtime for the given identity.
    pub fn new(driver: D, surface: S, env: E, identity: ClientIdentity) -> Self {
        let client = Client::new(env.clone(), identity);
        Self {
            driver,
            surface,
            env,
            client,
            lookup_interval: MANAGER_LOOKUP_INTERVAL,
            last_lookup: None,
        }
    }

    /// Override the directory refresh interval.
    ///
    /// Tests use a zero interval to force a lookup on every cycle.
    #[must_use]
    pub fn with_lookup_interval(mut self, interval: Duration) -> Self {
        self.lookup_interval = interval;
        self
    }

    /// Announce the initial subscription.
    ///
    /// Sends the subscribe request that has no addressee yet; [`run`]
    /// performs this once before entering the loop.
    ///
    /// [`run`]: Runtime::run
    pub async fn start(&mut self) {
        let actions = self.client.start();
        self.execute(actions).await;
    }

    /// Run the main event loop until the user quits or input fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver's input source fails. Directory and
    /// send failures are logged and never end the loop.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.start().await;

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
            self.env.sleep(TICK_INTERVAL).await;
        }

        Ok(())
    }

    /// Process one scheduler cycle.
    ///
    /// Returns `true` if the client should quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver's input source fails.
    pub async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        if let Some(event) = self.driver.poll_user().await? {
            match event {
                UserEvent::Quit => return Ok(true),
                UserEvent::Speak(sentence) => self.handle_spoken(sentence).await,
            }
        }

        for _ in 0..INBOUND_BATCH_LIMIT {
            let Some(msg) = self.driver.poll_inbound() else {
                break;
            };
            let actions = self.client.handle(ClientEvent::MessageReceived(msg));
            self.execute(actions).await;
        }

        if self.lookup_due() {
            self.last_lookup = Some(self.driver.now());
            match self.driver.lookup_managers().await {
                Ok(candidates) => {
                    let actions = self.client.handle(ClientEvent::DirectoryUpdate { candidates });
                    self.execute(actions).await;
                },
                Err(e) => {
                    tracing::warn!(error = %e, "directory lookup failed, retrying next cycle");
                },
            }
        }

        Ok(false)
    }

    /// Inbound call from the display surface: the user typed a sentence.
    pub async fn handle_spoken(&mut self, sentence: String) {
        let actions = self.client.handle(ClientEvent::Speak { sentence });
        self.execute(actions).await;
    }

    /// The protocol core, for state inspection.
    pub fn client(&self) -> &Client<E> {
        &self.client
    }

    /// The display surface, for state inspection.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn lookup_due(&self) -> bool {
        match self.last_lookup {
            None => true,
            Some(at) => self.driver.now() - at >= self.lookup_interval,
        }
    }

    async fn execute(&mut self, actions: Vec<ClientAction>) {
        for action in actions {
            match action {
                ClientAction::Send(msg) => {
                    if let Err(e) = self.driver.send_message(msg).await {
                        // At-most-once per send: surfaced here, never retried.
                        tracing::warn!(error = %e, "send failed");
                    }
                },
                ClientAction::ParticipantsChanged { names } => {
                    self.surface.notify_participants_changed(&names);
                },
                ClientAction::Spoken { speaker, sentence } => {
                    self.surface.notify_spoken(&speaker, &sentence);
                },
            }
        }
    }
}
