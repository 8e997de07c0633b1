//! # cq_core - Capital-Cities Quiz Engine
//!
//! Round-lifecycle and scoring engine for a capital-cities quiz game:
//! deterministic round selection without replacement, normalized answer
//! matching, streak-bonus scoring, per-second timing with cooperative
//! display windows, and best-effort leaderboard persistence.
//!
//! ## Features
//! - Deterministic games (same seed + same pool = same round order)
//! - Diacritic/case/whitespace tolerant answer matching
//! - In-process leaderboard service behind an explicit client boundary
//! - JSON API for front-end integration

pub mod api;
pub mod data;
pub mod engine;
pub mod error;
pub mod leaderboard;
pub mod models;
pub mod state;
pub mod text;

// Re-export main API functions
pub use api::{
    game_view_json, leaderboard_top_json, quit_json, start_game_json, submit_answer_json,
    submit_score_json, tick_json, use_hint_json,
};
pub use error::{GameError, Result};

// Re-export engine types
pub use engine::{
    accuracy, is_correct, select_next, AnswerOutcome, EndReason, GamePhase, GameSession,
    GameSummary, ScoreState, SessionView,
};

// Re-export data boundary
pub use data::{eligible_countries, CountryProvider, EmbeddedCatalog, ProviderError};

// Re-export leaderboard service types
pub use leaderboard::{
    LeaderboardClient, LeaderboardEntry, LeaderboardError, LeaderboardStore, SessionSnapshot,
    StoreClient, SubmitReceipt,
};

// Re-export models
pub use models::{Country, GameConfig, ALLOWED_DURATIONS};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
