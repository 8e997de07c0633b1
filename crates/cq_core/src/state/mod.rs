//! Process-wide runtime state.
//!
//! Holds the shared leaderboard store (the "service" the in-process client
//! writes to) and the single active game session driven by the JSON API.
//! Each session still exclusively owns its pool and round/score state; the
//! slot here only tracks which session is active.

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, RwLock};

use crate::engine::GameSession;
use crate::leaderboard::LeaderboardStore;

/// Shared leaderboard store, seeded with the default entries
pub static LEADERBOARD: Lazy<Arc<RwLock<LeaderboardStore>>> =
    Lazy::new(|| Arc::new(RwLock::new(LeaderboardStore::seeded())));

/// Active game session slot
pub static ACTIVE_SESSION: Lazy<Mutex<Option<GameSession>>> = Lazy::new(|| Mutex::new(None));

/// Shared handle to the leaderboard store
pub fn leaderboard() -> Arc<RwLock<LeaderboardStore>> {
    Arc::clone(&LEADERBOARD)
}

/// Replace the active session, discarding any previous one
pub fn set_session(session: GameSession) {
    *ACTIVE_SESSION.lock().expect("ACTIVE_SESSION lock poisoned") = Some(session);
}

/// Run `f` against the active session
pub fn with_session<T>(f: impl FnOnce(&mut GameSession) -> T) -> Option<T> {
    ACTIVE_SESSION.lock().expect("ACTIVE_SESSION lock poisoned").as_mut().map(f)
}

/// Drop the active session
pub fn clear_session() {
    *ACTIVE_SESSION.lock().expect("ACTIVE_SESSION lock poisoned") = None;
}

/// Reset the leaderboard store to its seeded defaults
pub fn reset_leaderboard() {
    *LEADERBOARD.write().expect("LEADERBOARD lock poisoned") = LeaderboardStore::seeded();
}
