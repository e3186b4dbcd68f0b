//! User input events.

/// Events originating from the user-facing frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    /// The user typed a sentence to broadcast.
    Speak(String),

    /// The user asked to quit.
    Quit,
}
