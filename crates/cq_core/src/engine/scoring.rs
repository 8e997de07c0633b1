//! Score and streak accounting.

use serde::{Deserialize, Serialize};

/// Every fifth consecutive correct answer earns this on top of the base point
pub const STREAK_BONUS: u32 = 2;

/// Streak length granting the bonus (and every multiple of it)
pub const STREAK_BONUS_INTERVAL: u32 = 5;

/// Accumulated score and current streak. Folded forward one answer at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub score: u32,
    pub streak: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one answer outcome into the state.
    ///
    /// Correct: streak grows by one, score grows by one plus the streak
    /// bonus when the new streak is a positive multiple of
    /// [`STREAK_BONUS_INTERVAL`]. Incorrect: streak resets, score unchanged.
    #[must_use]
    pub fn apply(self, correct: bool) -> Self {
        if correct {
            let streak = self.streak + 1;
            let bonus = if streak % STREAK_BONUS_INTERVAL == 0 { STREAK_BONUS } else { 0 };
            Self { score: self.score + 1 + bonus, streak }
        } else {
            Self { score: self.score, streak: 0 }
        }
    }
}

/// Percentage of rounds answered correctly, rounded to the nearest integer.
/// Derived on demand; never stored.
pub fn accuracy(score: u32, rounds_played: u32) -> u32 {
    let rounds = rounds_played.max(1);
    ((score as f64 / rounds as f64) * 100.0).round() as u32
}
