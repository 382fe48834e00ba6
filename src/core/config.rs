//! Chain configuration.

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Chain store configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Seal a still-open tail before appending a new block
    pub seal_open_tail_on_append: bool,
    /// Buffered change events per subscriber
    pub event_capacity: usize,
}

impl ChainConfig {
    /// Parse a JSON config, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the event channel capacity.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Set whether append seals an open tail.
    pub fn with_seal_on_append(mut self, seal: bool) -> Self {
        self.seal_open_tail_on_append = seal;
        self
    }

    /// Check the config for values the store cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.event_capacity == 0 {
            return Err(Error::InvalidConfig(
                "event_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            seal_open_tail_on_append: true,
            event_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ChainConfig::default();
        assert!(config.seal_open_tail_on_append);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ChainConfig::from_json(r#"{"event_capacity": 8}"#).unwrap();
        assert_eq!(config.event_capacity, 8);
        assert!(config.seal_open_tail_on_append);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = ChainConfig::from_json(r#"{"event_capacity": 0}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
