//! JSON endpoints for the leaderboard read/write contract.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::leaderboard::{LeaderboardEntry, SessionSnapshot};
use crate::state;
use crate::SCHEMA_VERSION;

/// Read the top entries, optionally filtered by duration.
pub fn leaderboard_top_json(duration: Option<u32>) -> Result<String> {
    #[derive(Serialize)]
    struct TopResponse {
        schema_version: u8,
        entries: Vec<LeaderboardEntry>,
    }

    let entries = state::leaderboard().read().expect("LEADERBOARD lock poisoned").top(duration);
    Ok(serde_json::to_string(&TopResponse { schema_version: SCHEMA_VERSION, entries })?)
}

#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    pub name: String,
    pub score: u32,
    pub duration_secs: u32,
}

/// Write a score directly to the store. Validation failures are reported in
/// the response body rather than as an error, matching the service contract
/// of rejecting bad payloads without a partial write.
pub fn submit_score_json(request_json: &str) -> Result<String> {
    #[derive(Serialize)]
    struct SubmitScoreResponse {
        schema_version: u8,
        accepted: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        entry: Option<LeaderboardEntry>,
        #[serde(skip_serializing_if = "Option::is_none")]
        rank: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    }

    let request: SubmitScoreRequest = serde_json::from_str(request_json)?;
    let snapshot = SessionSnapshot {
        name: request.name,
        score: request.score,
        duration_secs: request.duration_secs,
    };

    let result =
        state::leaderboard().write().expect("LEADERBOARD lock poisoned").submit(&snapshot);
    let response = match result {
        Ok(receipt) => SubmitScoreResponse {
            schema_version: SCHEMA_VERSION,
            accepted: true,
            entry: Some(receipt.entry),
            rank: receipt.rank,
            error: None,
        },
        Err(err) => SubmitScoreResponse {
            schema_version: SCHEMA_VERSION,
            accepted: false,
            entry: None,
            rank: None,
            error: Some(err.to_string()),
        },
    };
    Ok(serde_json::to_string(&response)?)
}
