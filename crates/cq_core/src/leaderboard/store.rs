//! In-memory ranking store.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ALLOWED_DURATIONS;

/// Stored entries are capped; the lowest-ranked are evicted first
pub const MAX_ENTRIES: usize = 200;

/// Top-N cap for a duration-filtered query
pub const TOP_FILTERED: usize = 10;

/// Top-N cap for an unfiltered query
pub const TOP_UNFILTERED: usize = 20;

/// Highest score the store accepts
pub const MAX_SCORE: u32 = 1000;

/// Player names are capped at this many characters after sanitization
pub const MAX_NAME_LEN: usize = 15;

/// Placeholder for names that sanitize down to nothing
pub const DEFAULT_NAME: &str = "Anonymous";

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("Player name must not be empty")]
    InvalidName,

    #[error("Score out of range: {score}")]
    ScoreOutOfRange { score: u32 },

    #[error("Invalid duration: {duration}s")]
    InvalidDuration { duration: u32 },
}

/// Immutable end-of-game summary handed across the client boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub name: String,
    pub score: u32,
    pub duration_secs: u32,
}

/// One stored ranking entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Monotonic insertion id; later entries have larger ids
    pub id: u64,
    pub name: String,
    pub score: u32,
    pub duration: u32,
    pub timestamp: DateTime<Utc>,
}

/// What the store returns for an accepted submission. `rank` is the 1-based
/// position among entries with the same duration, absent when the entry was
/// evicted on insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub entry: LeaderboardEntry,
    pub rank: Option<usize>,
}

/// Capped, sorted score store.
///
/// Entries stay sorted by score descending, ties broken by recency
/// descending, then by insertion id descending.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardStore {
    entries: Vec<LeaderboardEntry>,
    next_id: u64,
}

impl LeaderboardStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the default ranking entries
    pub fn seeded() -> Self {
        let now = Utc::now();
        let mut store = Self::new();
        let seeds: [(&str, u32, u32, i64); 5] = [
            ("Hunter", 25, 180, 1),
            ("GeoMaster", 22, 180, 2),
            ("CapitalKing", 20, 180, 3),
            ("QuickThink", 15, 60, 1),
            ("SpeedyGeo", 12, 60, 2),
        ];
        for (name, score, duration, days_ago) in seeds {
            let entry = LeaderboardEntry {
                id: store.next_id,
                name: name.to_string(),
                score,
                duration,
                timestamp: now - Duration::days(days_ago),
            };
            store.insert(entry);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate and record a score. Returns the stored entry and its rank
    /// among entries sharing the same duration.
    pub fn submit(&mut self, snapshot: &SessionSnapshot) -> Result<SubmitReceipt, LeaderboardError> {
        self.submit_at(snapshot, Utc::now())
    }

    /// Submission with an explicit timestamp.
    pub fn submit_at(
        &mut self,
        snapshot: &SessionSnapshot,
        now: DateTime<Utc>,
    ) -> Result<SubmitReceipt, LeaderboardError> {
        if snapshot.name.trim().is_empty() {
            return Err(LeaderboardError::InvalidName);
        }
        if snapshot.score > MAX_SCORE {
            return Err(LeaderboardError::ScoreOutOfRange { score: snapshot.score });
        }
        if !ALLOWED_DURATIONS.contains(&snapshot.duration_secs) {
            return Err(LeaderboardError::InvalidDuration { duration: snapshot.duration_secs });
        }

        let entry = LeaderboardEntry {
            id: self.next_id,
            name: sanitize_name(&snapshot.name),
            score: snapshot.score,
            duration: snapshot.duration_secs,
            timestamp: now,
        };
        let id = self.insert(entry.clone());
        // Rank is absent when the entry fell below the cap and was evicted
        let rank = self.rank_of(id, snapshot.duration_secs);

        log::info!("Score saved: {} - {} points ({}s)", entry.name, entry.score, entry.duration);
        Ok(SubmitReceipt { entry, rank })
    }

    /// Top entries, optionally filtered by duration. Sorted by score
    /// descending, recency descending; capped at [`TOP_FILTERED`] /
    /// [`TOP_UNFILTERED`].
    pub fn top(&self, duration: Option<u32>) -> Vec<LeaderboardEntry> {
        match duration {
            Some(d) => self
                .entries
                .iter()
                .filter(|e| e.duration == d)
                .take(TOP_FILTERED)
                .cloned()
                .collect(),
            None => self.entries.iter().take(TOP_UNFILTERED).cloned().collect(),
        }
    }

    fn insert(&mut self, entry: LeaderboardEntry) -> u64 {
        let id = entry.id;
        self.next_id = id + 1;
        self.entries.push(entry);
        self.entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.timestamp.cmp(&a.timestamp))
                .then(b.id.cmp(&a.id))
        });
        self.entries.truncate(MAX_ENTRIES);
        id
    }

    fn rank_of(&self, id: u64, duration: u32) -> Option<usize> {
        self.entries
            .iter()
            .filter(|e| e.duration == duration)
            .position(|e| e.id == id)
            .map(|pos| pos + 1)
    }
}

/// Strip everything but ASCII alphanumerics and spaces, cap the length, and
/// fall back to the default placeholder when nothing is left.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .take(MAX_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}
