//! Leaderboard service boundary.
//!
//! The store models the external ranking service in-process: explicit init
//! with seeded defaults, mutation only through the validated submit path,
//! capped size, sorted order. Gameplay code never touches the store
//! directly; it talks to a [`LeaderboardClient`] and treats every call as
//! best-effort.

pub mod client;
pub mod store;

pub use client::{LeaderboardClient, StoreClient};
pub use store::{
    LeaderboardEntry, LeaderboardError, LeaderboardStore, SessionSnapshot, SubmitReceipt,
    MAX_ENTRIES, MAX_SCORE, TOP_FILTERED, TOP_UNFILTERED,
};
