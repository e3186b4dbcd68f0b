//! Display surface trait.
//!
//! The display surface is an external collaborator: rendering the
//! participant list and spoken lines is terminal-dependent and out of scope
//! for the protocol core. The runtime pushes notifications through this
//! trait; the frontend feeds typed sentences back in as
//! [`UserEvent::Speak`](crate::UserEvent::Speak).

/// Outbound calls from the runtime to the user-facing display.
pub trait ChatSurface: Send {
    /// The participant roster changed. Names arrive in sorted order.
    fn notify_participants_changed(&mut self, names: &[String]);

    /// A sentence was spoken, by a peer or as the local echo.
    fn notify_spoken(&mut self, speaker: &str, sentence: &str);
}
