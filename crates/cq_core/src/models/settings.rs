use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Game lengths the leaderboard accepts, in seconds
pub const ALLOWED_DURATIONS: [u32; 2] = [60, 180];

/// Default game length
pub const DEFAULT_DURATION_SECS: u32 = 180;

/// Region filter value meaning "no filter"
pub const REGION_ALL: &str = "all";

/// Per-game configuration chosen by the player before starting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub player_name: String,
    pub duration_secs: u32,
    /// Hard mode hides the country name, leaving only the flag as the prompt
    pub hard_mode: bool,
    /// Region filter, or "all"
    pub region: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: String::new(),
            duration_secs: DEFAULT_DURATION_SECS,
            hard_mode: false,
            region: REGION_ALL.to_string(),
        }
    }
}

impl GameConfig {
    /// Validate settings before a session is constructed.
    ///
    /// The duration set matches what the leaderboard accepts, so a finished
    /// game is never rejected at persistence time for its duration.
    pub fn validate(&self) -> Result<()> {
        if self.player_name.trim().is_empty() {
            return Err(GameError::MissingPlayerName);
        }
        if !ALLOWED_DURATIONS.contains(&self.duration_secs) {
            return Err(GameError::InvalidDuration { duration: self.duration_secs });
        }
        Ok(())
    }

    /// True when `region` matches the configured filter (case-insensitive)
    pub fn region_matches(&self, region: &str) -> bool {
        self.region == REGION_ALL || self.region.eq_ignore_ascii_case(region)
    }
}
