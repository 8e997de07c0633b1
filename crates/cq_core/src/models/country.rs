use serde::{Deserialize, Serialize};

/// A quizzable country. Immutable once loaded; read-only during a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    /// Display name, also the identity key within a pool
    pub name: String,
    /// Accepted answers; some countries have more than one capital
    pub capitals: Vec<String>,
    /// Flag image reference shown as the round prompt
    pub flag: String,
    /// Geographic region (Europe, Americas, Asia, Africa, Oceania)
    pub region: String,
    /// Sovereignty flag; dependent territories are excluded from play
    pub independent: bool,
}

impl Country {
    /// Identity key used for without-replacement round selection
    pub fn key(&self) -> &str {
        &self.name
    }

    /// Accepted answer strings for this round
    pub fn accepted_answers(&self) -> &[String] {
        &self.capitals
    }

    /// First accepted answer, revealed on a miss and used for hints
    pub fn primary_capital(&self) -> Option<&str> {
        self.capitals.first().map(String::as_str)
    }
}
