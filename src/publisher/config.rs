//! Publisher Configuration

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::observer::history::DEFAULT_HISTORY_LENGTH;

/// Subscriber slots reserved the first time an event gains a subscriber
pub const DEFAULT_INITIAL_CAPACITY: usize = 4;

/// Tunables for a [`Publisher`](crate::publisher::Publisher) and the
/// built-in observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PublisherConfig {
    /// Expected subscribers per event, reserved on first attach
    pub initial_capacity: usize,

    /// Values retained per event by history-keeping observers
    pub history_length: usize,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            history_length: DEFAULT_HISTORY_LENGTH,
        }
    }
}

impl PublisherConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.history_length == 0 {
            return Err(ConfigError::InvalidHistoryLength(self.history_length));
        }
        Ok(())
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_history_length(mut self, history_length: usize) -> Self {
        self.history_length = history_length;
        self
    }
}
