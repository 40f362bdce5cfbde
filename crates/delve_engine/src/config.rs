//! Engine configuration.

/// Default maximum sentence length, in characters.
pub const DEFAULT_MAX_SENTENCE_LENGTH: usize = 256;

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Longest sentence accepted, in characters.
    pub max_sentence_length: usize,

    /// Write `source` snapshots for every object the actor holds.
    pub snapshot_held_objects: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_sentence_length: DEFAULT_MAX_SENTENCE_LENGTH,
            snapshot_held_objects: true,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the maximum sentence length.
    #[must_use]
    pub fn with_max_sentence_length(mut self, length: usize) -> Self {
        self.max_sentence_length = length;
        self
    }

    /// Builder method to enable/disable held object snapshots.
    #[must_use]
    pub fn with_snapshot_held_objects(mut self, enabled: bool) -> Self {
        self.snapshot_held_objects = enabled;
        self
    }
}
