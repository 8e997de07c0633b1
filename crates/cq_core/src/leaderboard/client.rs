//! Client boundary between gameplay and the ranking service.

use std::sync::{Arc, RwLock};

use crate::leaderboard::store::{
    LeaderboardError, LeaderboardStore, SessionSnapshot, SubmitReceipt,
};

/// Posts a finished session's snapshot to the ranking service.
///
/// Callers treat this as best-effort: a failure is logged and play proceeds;
/// there are no retries and game-over handling never blocks on the result.
pub trait LeaderboardClient: Send + Sync {
    fn submit(&self, snapshot: &SessionSnapshot) -> Result<SubmitReceipt, LeaderboardError>;
}

/// Client backed by a shared in-process store.
#[derive(Clone)]
pub struct StoreClient {
    store: Arc<RwLock<LeaderboardStore>>,
}

impl StoreClient {
    pub fn new(store: Arc<RwLock<LeaderboardStore>>) -> Self {
        Self { store }
    }
}

impl LeaderboardClient for StoreClient {
    fn submit(&self, snapshot: &SessionSnapshot) -> Result<SubmitReceipt, LeaderboardError> {
        self.store.write().expect("leaderboard lock poisoned").submit(snapshot)
    }
}
