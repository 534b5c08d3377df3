//! Game configuration loaded from TOML.

use crate::games::simon::{FlashTiming, RngSource, SequenceGenerator, SymbolSet, Timing};
use rand::rngs::StdRng;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Tunable parameters of a game.
///
/// Every key is optional in the file; missing keys take the classic values.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Ordered symbol names (at least 2, distinct).
    symbols: Vec<String>,

    /// Pause after a correct round, in milliseconds.
    settle_delay_ms: u64,

    /// Pause before the restart message, in milliseconds.
    restart_delay_ms: u64,

    /// Flash length for a presented symbol, in milliseconds.
    flash_ms: u64,

    /// Flash length for success/failure styling, in milliseconds.
    feedback_flash_ms: u64,

    /// Fixed RNG seed; random when absent.
    seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbols: SymbolSet::classic()
                .iter()
                .map(|s| s.name().to_string())
                .collect(),
            settle_delay_ms: 1000,
            restart_delay_ms: 1500,
            flash_ms: 100,
            feedback_flash_ms: 200,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(symbols = config.symbols.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that delays are positive and the symbols form a valid set.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("settle_delay_ms", self.settle_delay_ms),
            ("restart_delay_ms", self.restart_delay_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::new(format!("{} must be greater than 0", name)));
            }
        }
        self.symbol_set()?;
        Ok(())
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Builds the symbol set.
    pub fn symbol_set(&self) -> Result<SymbolSet, ConfigError> {
        SymbolSet::new(self.symbols.iter().map(|s| s.trim()))
            .map_err(|e| ConfigError::new(format!("Invalid symbols: {}", e)))
    }

    /// Symbol generator, seeded from `seed` or the operating system.
    pub fn generator(&self) -> SequenceGenerator<RngSource<StdRng>> {
        let source = match self.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_os(),
        };
        SequenceGenerator::new(source)
    }

    /// Delays for the round controller.
    pub fn timing(&self) -> Timing {
        Timing {
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            restart_delay: Duration::from_millis(self.restart_delay_ms),
        }
    }

    /// Flash lengths for visual collaborators.
    pub fn flash_timing(&self) -> FlashTiming {
        FlashTiming {
            symbol: Duration::from_millis(self.flash_ms),
            feedback: Duration::from_millis(self.feedback_flash_ms),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_classic_values() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.timing(), Timing::default());
        assert_eq!(config.symbol_set().unwrap(), SymbolSet::classic());
    }

    #[test]
    fn test_zero_settle_delay_rejected() {
        let err = GameConfig::from_toml("settle_delay_ms = 0").unwrap_err();
        assert!(err.message.contains("settle_delay_ms"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(GameConfig::from_toml("colours = 4").is_err());
    }

    #[test]
    fn test_seed_override_keeps_file_seed_when_absent() {
        let config = GameConfig::from_toml("seed = 9").unwrap();
        assert_eq!(*config.clone().with_seed(None).seed(), Some(9));
        assert_eq!(*config.with_seed(Some(3)).seed(), Some(3));
    }
}
