//! Round-lifecycle and scoring engine.
//!
//! Layering mirrors the rest of the crate: `answer`, `scoring` and
//! `selector` are stateless leaves; `session` owns all mutable game state
//! and drives round transitions, timing windows and end-of-game hand-off.

pub mod answer;
pub mod scoring;
pub mod selector;
pub mod session;

pub use answer::is_correct;
pub use scoring::{accuracy, ScoreState};
pub use selector::select_next;
pub use session::{
    AnswerOutcome, EndReason, GamePhase, GameSession, GameSummary, SessionView,
    HINT_DISPLAY_SECS, RESULT_DISPLAY_SECS,
};
