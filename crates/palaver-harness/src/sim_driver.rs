//! Simulated app driver over a [`SimNetwork`] endpoint.

use std::{
    collections::VecDeque,
    future::Future,
    sync::{Arc, Mutex, PoisonError},
};

use palaver_app::{Driver, UserEvent};
use palaver_proto::{AclMessage, MANAGER_CAPABILITY, ParticipantId};

use crate::network::{SimError, SimNetwork};

/// Handle for injecting user events into a running [`SimDriver`].
#[derive(Clone, Default)]
pub struct UserEvents {
    queue: Arc<Mutex<VecDeque<UserEvent>>>,
}

impl UserEvents {
    /// Queue a user event for the next runtime cycle.
    pub fn push(&self, event: UserEvent) {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).push_back(event);
    }

    fn pop(&self) -> Option<UserEvent> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).pop_front()
    }
}

/// In-memory driver: directory lookups and message I/O against a
/// [`SimNetwork`], user input from a shared [`UserEvents`] queue.
pub struct SimDriver {
    network: SimNetwork,
    me: ParticipantId,
    user_events: UserEvents,
}

impl SimDriver {
    /// Create a driver for the given participant on the network.
    pub fn new(network: SimNetwork, me: ParticipantId) -> Self {
        Self { network, me, user_events: UserEvents::default() }
    }

    /// Handle for injecting user events after the driver moves into the
    /// runtime.
    pub fn user_events(&self) -> UserEvents {
        self.user_events.clone()
    }
}

impl Driver for SimDriver {
    type Error = SimError;
    type Instant = std::time::Instant;

    fn lookup_managers(
        &mut self,
    ) -> impl Future<Output = Result<Vec<ParticipantId>, Self::Error>> + Send {
        std::future::ready(self.network.lookup(MANAGER_CAPABILITY))
    }

    fn send_message(
        &mut self,
        msg: AclMessage,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        self.network.deliver(msg);
        std::future::ready(Ok(()))
    }

    fn poll_inbound(&mut self) -> Option<AclMessage> {
        self.network.next_message(&self.me)
    }

    fn poll_user(&mut self) -> impl Future<Output = Result<Option<UserEvent>, Self::Error>> + Send {
        std::future::ready(Ok(self.user_events.pop()))
    }

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }
}
