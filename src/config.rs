use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::board::Player;
use crate::error::Result;

pub const CONFIG_ENV: &str = "TICTACTOE_CONFIG";

/// Session settings, read from a RON file such as:
///
/// ```ron
/// (human: O, min_thinking_time_ms: 250)
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub human: Player,
    pub min_thinking_time_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            human: Player::X,
            min_thinking_time_ms: 500,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Loads the file named by `TICTACTOE_CONFIG`, or the defaults when it is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                log::info!("loading config from {}", Path::new(&path).display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn min_thinking_time(&self) -> Duration {
        Duration::from_millis(self.min_thinking_time_ms)
    }
}
