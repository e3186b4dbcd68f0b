//! Recording display surface for assertions.

use palaver_app::ChatSurface;

/// Display surface that records every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Every roster notification, oldest first.
    pub participant_updates: Vec<Vec<String>>,
    /// Every spoken line as `(speaker, sentence)`, oldest first.
    pub spoken: Vec<(String, String)>,
}

impl RecordingSurface {
    /// Create an empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent roster notification, if any.
    pub fn latest_participants(&self) -> Option<&[String]> {
        self.participant_updates.last().map(Vec::as_slice)
    }
}

impl ChatSurface for RecordingSurface {
    fn notify_participants_changed(&mut self, names: &[String]) {
        self.participant_updates.push(names.to_vec());
    }

    fn notify_spoken(&mut self, speaker: &str, sentence: &str) {
        self.spoken.push((speaker.to_string(), sentence.to_string()));
    }
}
