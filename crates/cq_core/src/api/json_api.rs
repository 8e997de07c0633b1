//! JSON API for front-end integration.
//!
//! String-in/string-out functions over the process-wide session slot, so a
//! host (web view, game engine binding, CLI) can drive a game without
//! linking against the engine types.

use serde::{Deserialize, Serialize};

use crate::data::EmbeddedCatalog;
use crate::engine::{GameSession, SessionView};
use crate::error::{GameError, Result};
use crate::leaderboard::StoreClient;
use crate::models::{GameConfig, DEFAULT_DURATION_SECS, REGION_ALL};
use crate::state;
use crate::SCHEMA_VERSION;

fn default_schema_version() -> u8 {
    SCHEMA_VERSION
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_SECS
}

fn default_region() -> String {
    REGION_ALL.to_string()
}

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    /// Deterministic shuffle/selection seed; omitted = entropy-seeded
    #[serde(default)]
    pub seed: Option<u64>,
    pub player_name: String,
    #[serde(default = "default_duration")]
    pub duration_secs: u32,
    #[serde(default)]
    pub hard_mode: bool,
    #[serde(default = "default_region")]
    pub region: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
struct ViewResponse {
    schema_version: u8,
    #[serde(flatten)]
    view: SessionView,
}

fn view_response(view: SessionView) -> Result<String> {
    let response = ViewResponse { schema_version: SCHEMA_VERSION, view };
    Ok(serde_json::to_string(&response)?)
}

/// Start a new game from a [`StartRequest`] payload, replacing any active
/// session. Returns the initial view.
pub fn start_game_json(request_json: &str) -> Result<String> {
    let request: StartRequest = serde_json::from_str(request_json)?;

    let config = GameConfig {
        player_name: request.player_name,
        duration_secs: request.duration_secs,
        hard_mode: request.hard_mode,
        region: request.region,
    };
    let client = Box::new(StoreClient::new(state::leaderboard()));
    let session = GameSession::new(config, &EmbeddedCatalog, client, request.seed)?;
    let view = session.view();
    state::set_session(session);
    view_response(view)
}

/// Advance the active session by one second and return the updated view.
pub fn tick_json() -> Result<String> {
    let view = state::with_session(|session| {
        session.tick();
        session.view()
    })
    .ok_or(GameError::NoActiveSession)?;
    view_response(view)
}

/// Submit an answer for the current round.
pub fn submit_answer_json(request_json: &str) -> Result<String> {
    let request: SubmitAnswerRequest = serde_json::from_str(request_json)?;
    let outcome = state::with_session(|session| {
        session.submit_answer(&request.answer).map(|outcome| (outcome, session.view()))
    })
    .ok_or(GameError::NoActiveSession)??;

    #[derive(Serialize)]
    struct SubmitResponse {
        schema_version: u8,
        correct: bool,
        message: String,
        #[serde(flatten)]
        view: SessionView,
    }
    let (outcome, view) = outcome;
    Ok(serde_json::to_string(&SubmitResponse {
        schema_version: SCHEMA_VERSION,
        correct: outcome.correct,
        message: outcome.message,
        view,
    })?)
}

/// Use the round's hint, if still available. `hint` is null when the hint
/// was already spent or a result is on screen.
pub fn use_hint_json() -> Result<String> {
    let (hint, view) = state::with_session(|session| (session.use_hint(), session.view()))
        .ok_or(GameError::NoActiveSession)?;

    #[derive(Serialize)]
    struct HintResponse {
        schema_version: u8,
        hint: Option<String>,
        #[serde(flatten)]
        view: SessionView,
    }
    Ok(serde_json::to_string(&HintResponse { schema_version: SCHEMA_VERSION, hint, view })?)
}

/// Abort the active session without persisting its score, and drop it.
pub fn quit_json() -> Result<String> {
    let summary = state::with_session(|session| {
        session.quit();
        session.summary()
    })
    .ok_or(GameError::NoActiveSession)?;
    state::clear_session();

    #[derive(Serialize)]
    struct QuitResponse {
        schema_version: u8,
        #[serde(flatten)]
        summary: crate::engine::GameSummary,
    }
    Ok(serde_json::to_string(&QuitResponse { schema_version: SCHEMA_VERSION, summary })?)
}

/// Current view of the active session.
pub fn game_view_json() -> Result<String> {
    let view = state::with_session(|session| session.view()).ok_or(GameError::NoActiveSession)?;
    view_response(view)
}
