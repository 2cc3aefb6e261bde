//! Presentation and timing settings handed to the page host.
//!
//! The engine never reads these. They travel with it so every host draws
//! the same marks and waits the same amount before the opponent moves.

use serde::{Deserialize, Serialize};

use crate::Owner;

/// Glyph and text colour for one party's marks.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Mark {
    pub glyph: char,
    pub colour: String,
}

impl Mark {
    fn new(glyph: char, colour: &str) -> Mark {
        Mark {
            glyph,
            colour: colour.to_string(),
        }
    }
}

/// Settings the host uses to render and pace a match.
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Pause before the opponent's move is requested.
    pub thinking_delay_ms: u32,
    /// Pause before the game-over notice, so the last mark is drawn first.
    pub outcome_delay_ms: u32,
    pub human: Mark,
    pub opponent: Mark,
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig {
            thinking_delay_ms: 250,
            outcome_delay_ms: 1,
            human: Mark::new('X', "gold"),
            opponent: Mark::new('O', "lightsalmon"),
        }
    }
}

impl HostConfig {
    /// Parse settings from JSON, filling gaps with defaults.
    pub fn from_json(json: &str) -> Result<HostConfig, ConfigError> {
        let config = serde_json::from_str(json)?;
        tracing::debug!(?config, "loaded host config");
        Ok(config)
    }

    /// The mark drawn for `owner`.
    pub fn mark(&self, owner: Owner) -> &Mark {
        match owner {
            Owner::Human => &self.human,
            Owner::Opponent => &self.opponent,
        }
    }
}

/// Host settings could not be read.
#[derive(Debug, derive_more::Display)]
#[display("invalid host config: {_0}")]
pub struct ConfigError(serde_json::Error);

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError(err)
    }
}
