//! Game session state machine.
//!
//! A session owns its pool, round state and score state exclusively; nothing
//! outside the session holds a mutable reference into them. All transitions
//! happen on discrete events (`tick`, `submit_answer`, `use_hint`, `quit`),
//! and the transient display windows are deferred actions resolved by
//! `tick()`, which acts as a cooperative single-threaded scheduler. At game
//! end the
//! leaderboard client receives an immutable snapshot; its result only feeds
//! the rank notification, never gameplay state.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::data::{eligible_countries, CountryProvider};
use crate::engine::answer;
use crate::engine::scoring::{self, ScoreState};
use crate::engine::selector;
use crate::error::{GameError, Result};
use crate::leaderboard::{LeaderboardClient, SessionSnapshot, SubmitReceipt};
use crate::models::{Country, GameConfig};

/// How long a round result stays on screen before the next round starts
pub const RESULT_DISPLAY_SECS: u32 = 2;

/// How long a hint stays on screen
pub const HINT_DISPLAY_SECS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Playing,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    TimeUp,
    PoolExhausted,
    Quit,
}

/// Transient result banner shown after an answer
#[derive(Debug, Clone)]
struct ResultDisplay {
    message: String,
    correct: bool,
}

/// Action deferred to a later tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    ResolveResult,
    ClearHint,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    remaining_secs: u32,
    action: Deferred,
}

/// What `submit_answer` reports back to the caller
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub message: String,
    pub score: u32,
    pub streak: u32,
}

/// Serializable projection of session state for a front-end.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub phase: GamePhase,
    /// Round prompt; hidden in hard mode
    pub country_name: Option<String>,
    pub flag: Option<String>,
    pub time_remaining_secs: u32,
    pub score: u32,
    pub streak: u32,
    pub rounds_played: u32,
    pub accuracy: u32,
    pub hint_used: bool,
    pub result_message: Option<String>,
    pub result_correct: Option<bool>,
    pub hint_message: Option<String>,
}

/// End-of-game summary.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub player_name: String,
    pub score: u32,
    pub best_streak: u32,
    pub rounds_played: u32,
    pub accuracy: u32,
    pub duration_secs: u32,
    pub end_reason: Option<EndReason>,
    /// Rank reported by the leaderboard, when the submission went through
    pub leaderboard_rank: Option<usize>,
}

/// One game of the capital-cities quiz.
pub struct GameSession {
    config: GameConfig,
    pool: Vec<Country>,
    used: HashSet<String>,
    current: Option<usize>,
    score: ScoreState,
    rounds_played: u32,
    best_streak: u32,
    time_remaining: u32,
    hint_used: bool,
    result: Option<ResultDisplay>,
    hint: Option<String>,
    pending: Vec<Pending>,
    phase: GamePhase,
    end_reason: Option<EndReason>,
    submitted: bool,
    last_receipt: Option<SubmitReceipt>,
    rng: ChaCha8Rng,
    client: Box<dyn LeaderboardClient>,
}

impl GameSession {
    /// Build a session: validate config, fetch and filter the country
    /// catalog, shuffle the pool once, and start the first round.
    ///
    /// A provider failure degrades to an empty catalog; an empty pool after
    /// filtering is the setup failure that blocks game start.
    pub fn new(
        config: GameConfig,
        provider: &dyn CountryProvider,
        client: Box<dyn LeaderboardClient>,
        seed: Option<u64>,
    ) -> Result<Self> {
        config.validate()?;

        let raw = match provider.fetch() {
            Ok(countries) => countries,
            Err(err) => {
                log::warn!("Country provider failed: {}", err);
                Vec::new()
            }
        };

        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut pool = eligible_countries(raw, &config);
        if pool.is_empty() {
            return Err(GameError::EmptyPool { region: config.region.clone() });
        }
        pool.shuffle(&mut rng);

        let time_remaining = config.duration_secs;
        let mut session = Self {
            config,
            pool,
            used: HashSet::new(),
            current: None,
            score: ScoreState::new(),
            rounds_played: 0,
            best_streak: 0,
            time_remaining,
            hint_used: false,
            result: None,
            hint: None,
            pending: Vec::new(),
            phase: GamePhase::Playing,
            end_reason: None,
            submitted: false,
            last_receipt: None,
            rng,
            client,
        };

        // Pool is non-empty, so the first draw always succeeds
        let first = session.draw_next().ok_or(GameError::EmptyPool {
            region: session.config.region.clone(),
        })?;
        session.start_round(first);
        Ok(session)
    }

    // ========================
    // Event handlers
    // ========================

    /// Advance the session by one elapsed real-time second.
    ///
    /// Due display windows resolve first, then the clock decrements. When
    /// the clock reaches zero the game ends, unless a result is still on
    /// screen: the in-flight display completes and the termination is
    /// honored at the round-advance boundary instead.
    pub fn tick(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.fire_due_deferrals();
        if self.phase != GamePhase::Playing {
            return;
        }

        if self.time_remaining > 0 {
            self.time_remaining -= 1;
        }
        if self.time_remaining == 0 && self.result.is_none() {
            self.end(EndReason::TimeUp);
        }
    }

    /// Evaluate an answer for the current round.
    ///
    /// Valid only while playing with no result on screen; the result banner
    /// then blocks further submissions until its window elapses and the next
    /// round starts (or the game ends).
    pub fn submit_answer(&mut self, raw_input: &str) -> Result<AnswerOutcome> {
        if self.phase != GamePhase::Playing {
            return Err(GameError::NotPlaying);
        }
        if self.result.is_some() {
            return Err(GameError::ResultPending);
        }
        let country = self.current.map(|i| &self.pool[i]).ok_or(GameError::NotPlaying)?;

        let correct = answer::is_correct(raw_input, country.accepted_answers());
        let message = if correct {
            "Correct!".to_string()
        } else {
            format!("The answer is {}", country.primary_capital().unwrap_or_default())
        };

        self.score = self.score.apply(correct);
        self.rounds_played += 1;
        self.best_streak = self.best_streak.max(self.score.streak);

        self.result = Some(ResultDisplay { message: message.clone(), correct });
        self.pending
            .push(Pending { remaining_secs: RESULT_DISPLAY_SECS, action: Deferred::ResolveResult });

        Ok(AnswerOutcome { correct, message, score: self.score.score, streak: self.score.streak })
    }

    /// Reveal the first letter of the capital. At most once per round, only
    /// while playing with no result on screen; otherwise a no-op. The hint
    /// banner does not block answer submission.
    pub fn use_hint(&mut self) -> Option<String> {
        if self.phase != GamePhase::Playing || self.result.is_some() || self.hint_used {
            return None;
        }
        let country = self.current.map(|i| &self.pool[i])?;
        let first = country.primary_capital()?.chars().next()?;

        self.hint_used = true;
        let message = format!("The capital starts with \"{}\"", first.to_uppercase());
        self.hint = Some(message.clone());
        self.pending
            .push(Pending { remaining_secs: HINT_DISPLAY_SECS, action: Deferred::ClearHint });
        Some(message)
    }

    /// Abort immediately. Valid from any state; cancels every pending
    /// display window and never persists the score.
    pub fn quit(&mut self) {
        self.pending.clear();
        self.result = None;
        self.hint = None;
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Ended;
            self.end_reason = Some(EndReason::Quit);
        }
    }

    // ========================
    // Internal transitions
    // ========================

    fn fire_due_deferrals(&mut self) {
        let mut due = Vec::new();
        self.pending.retain_mut(|pending| {
            pending.remaining_secs = pending.remaining_secs.saturating_sub(1);
            if pending.remaining_secs == 0 {
                due.push(pending.action);
                false
            } else {
                true
            }
        });

        for action in due {
            match action {
                Deferred::ResolveResult => self.resolve_result(),
                Deferred::ClearHint => self.hint = None,
            }
        }
    }

    /// End of the result display window: advance to the next round, or end
    /// the game on timer expiry or pool exhaustion.
    fn resolve_result(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.result = None;

        if self.time_remaining == 0 {
            self.end(EndReason::TimeUp);
            return;
        }
        match self.draw_next() {
            Some(idx) => self.start_round(idx),
            None => self.end(EndReason::PoolExhausted),
        }
    }

    fn draw_next(&mut self) -> Option<usize> {
        let picked = selector::select_next(&self.pool, &self.used, &mut self.rng)?;
        self.pool.iter().position(|c| c.key() == picked.key())
    }

    fn start_round(&mut self, idx: usize) {
        self.used.insert(self.pool[idx].key().to_string());
        self.current = Some(idx);
        self.hint_used = false;
        self.hint = None;
        self.result = None;
        // Hint windows are round-scoped; a leftover one must not clear the
        // next round's hint early
        self.pending.retain(|p| p.action != Deferred::ClearHint);
    }

    fn end(&mut self, reason: EndReason) {
        self.pending.clear();
        self.result = None;
        self.hint = None;
        self.phase = GamePhase::Ended;
        self.end_reason = Some(reason);
        if reason != EndReason::Quit {
            self.persist_score();
        }
    }

    /// Hand the snapshot to the leaderboard client, at most once. Failures
    /// are logged and swallowed; the game is already over.
    fn persist_score(&mut self) {
        if self.submitted || self.score.score == 0 {
            return;
        }
        self.submitted = true;

        let snapshot = SessionSnapshot {
            name: self.config.player_name.clone(),
            score: self.score.score,
            duration_secs: self.config.duration_secs,
        };
        match self.client.submit(&snapshot) {
            Ok(receipt) => {
                log::info!(
                    "Leaderboard accepted {} points for {} (rank {:?})",
                    receipt.entry.score,
                    receipt.entry.name,
                    receipt.rank
                );
                self.last_receipt = Some(receipt);
            }
            Err(err) => {
                log::warn!("Failed to save score: {}", err);
            }
        }
    }

    // ========================
    // Accessors
    // ========================

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn score(&self) -> u32 {
        self.score.score
    }

    pub fn streak(&self) -> u32 {
        self.score.streak
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    pub fn is_result_displayed(&self) -> bool {
        self.result.is_some()
    }

    pub fn current_country(&self) -> Option<&Country> {
        self.current.map(|i| &self.pool[i])
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn last_receipt(&self) -> Option<&SubmitReceipt> {
        self.last_receipt.as_ref()
    }

    /// Front-end projection of the current state.
    pub fn view(&self) -> SessionView {
        let country = self.current_country();
        SessionView {
            phase: self.phase,
            country_name: match country {
                Some(c) if !self.config.hard_mode => Some(c.name.clone()),
                _ => None,
            },
            flag: country.map(|c| c.flag.clone()),
            time_remaining_secs: self.time_remaining,
            score: self.score.score,
            streak: self.score.streak,
            rounds_played: self.rounds_played,
            accuracy: scoring::accuracy(self.score.score, self.rounds_played),
            hint_used: self.hint_used,
            result_message: self.result.as_ref().map(|r| r.message.clone()),
            result_correct: self.result.as_ref().map(|r| r.correct),
            hint_message: self.hint.clone(),
        }
    }

    /// End-of-game summary for the game-over screen.
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            player_name: self.config.player_name.clone(),
            score: self.score.score,
            best_streak: self.best_streak,
            rounds_played: self.rounds_played,
            accuracy: scoring::accuracy(self.score.score, self.rounds_played),
            duration_secs: self.config.duration_secs,
            end_reason: self.end_reason,
            leaderboard_rank: self.last_receipt.as_ref().and_then(|r| r.rank),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ProviderError;
    use crate::leaderboard::LeaderboardError;
    use std::sync::{Arc, Mutex};

    struct StaticProvider(Vec<Country>);

    impl CountryProvider for StaticProvider {
        fn fetch(&self) -> std::result::Result<Vec<Country>, ProviderError> {
            Ok(self.0.clone())
        }
    }

    struct FailingProvider;

    impl CountryProvider for FailingProvider {
        fn fetch(&self) -> std::result::Result<Vec<Country>, ProviderError> {
            Err(ProviderError::Unavailable("connection refused".to_string()))
        }
    }

    /// Records snapshots; optionally fails every submission.
    #[derive(Clone, Default)]
    struct RecordingClient {
        submissions: Arc<Mutex<Vec<SessionSnapshot>>>,
        fail: bool,
    }

    impl LeaderboardClient for RecordingClient {
        fn submit(
            &self,
            snapshot: &SessionSnapshot,
        ) -> std::result::Result<crate::leaderboard::SubmitReceipt, LeaderboardError> {
            self.submissions.lock().unwrap().push(snapshot.clone());
            if self.fail {
                return Err(LeaderboardError::InvalidName);
            }
            Ok(crate::leaderboard::SubmitReceipt {
                entry: crate::leaderboard::LeaderboardEntry {
                    id: 0,
                    name: snapshot.name.clone(),
                    score: snapshot.score,
                    duration: snapshot.duration_secs,
                    timestamp: chrono::Utc::now(),
                },
                rank: Some(1),
            })
        }
    }

    fn country(name: &str, capital: &str) -> Country {
        Country {
            name: name.to_string(),
            capitals: vec![capital.to_string()],
            flag: "flag.png".to_string(),
            region: "Europe".to_string(),
            independent: true,
        }
    }

    fn config(duration: u32) -> GameConfig {
        GameConfig {
            player_name: "Ada".to_string(),
            duration_secs: duration,
            ..GameConfig::default()
        }
    }

    fn session_with(
        countries: Vec<Country>,
        duration: u32,
    ) -> (GameSession, Arc<Mutex<Vec<SessionSnapshot>>>) {
        let client = RecordingClient::default();
        let submissions = Arc::clone(&client.submissions);
        let session = GameSession::new(
            config(duration),
            &StaticProvider(countries),
            Box::new(client),
            Some(42),
        )
        .expect("session start");
        (session, submissions)
    }

    #[test]
    fn test_empty_pool_is_setup_failure() {
        let result = GameSession::new(
            config(60),
            &StaticProvider(Vec::new()),
            Box::new(RecordingClient::default()),
            Some(1),
        );
        assert!(matches!(result, Err(GameError::EmptyPool { .. })));
    }

    #[test]
    fn test_provider_failure_degrades_to_setup_failure() {
        let result = GameSession::new(
            config(60),
            &FailingProvider,
            Box::new(RecordingClient::default()),
            Some(1),
        );
        assert!(matches!(result, Err(GameError::EmptyPool { .. })));
    }

    #[test]
    fn test_single_round_game_ends_and_persists() {
        let (mut session, submissions) = session_with(vec![country("France", "Paris")], 60);
        assert_eq!(session.phase(), GamePhase::Playing);

        let outcome = session.submit_answer("  paris  ").expect("playing");
        assert!(outcome.correct);
        assert_eq!(session.score(), 1);
        assert!(session.is_result_displayed());

        // Result window elapses, pool is exhausted
        session.tick();
        assert_eq!(session.phase(), GamePhase::Playing);
        session.tick();
        assert_eq!(session.phase(), GamePhase::Ended);
        assert_eq!(session.end_reason(), Some(EndReason::PoolExhausted));

        let posted = submissions.lock().unwrap();
        assert_eq!(posted.len(), 1, "exactly one submission");
        assert_eq!(posted[0].name, "Ada");
        assert_eq!(posted[0].score, 1);
        assert_eq!(posted[0].duration_secs, 60);
    }

    #[test]
    fn test_timer_expiry_ends_game_with_pool_remaining() {
        let pool = vec![country("France", "Paris"), country("Italy", "Rome")];
        let (mut session, submissions) = session_with(pool, 60);

        for _ in 0..60 {
            session.tick();
        }
        assert_eq!(session.phase(), GamePhase::Ended);
        assert_eq!(session.end_reason(), Some(EndReason::TimeUp));
        // Score is zero, so nothing was persisted
        assert!(submissions.lock().unwrap().is_empty());
    }

    #[test]
    fn test_result_display_blocks_resubmission() {
        let pool = vec![country("France", "Paris"), country("Italy", "Rome")];
        let (mut session, _) = session_with(pool, 60);

        session.submit_answer("wrong").expect("first submission");
        assert!(matches!(session.submit_answer("Paris"), Err(GameError::ResultPending)));
    }

    #[test]
    fn test_wrong_answer_reveals_capital_and_resets_streak() {
        let (mut session, _) = session_with(vec![country("France", "Paris")], 60);

        let outcome = session.submit_answer("Lyon").expect("playing");
        assert!(!outcome.correct);
        assert!(outcome.message.contains("Paris"));
        assert_eq!(outcome.streak, 0);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_round_advances_after_result_window() {
        let pool = vec![country("France", "Paris"), country("Italy", "Rome")];
        let (mut session, _) = session_with(pool, 60);
        let first = session.current_country().unwrap().name.clone();

        session.submit_answer("whatever").unwrap();
        session.tick();
        session.tick();

        assert_eq!(session.phase(), GamePhase::Playing);
        let second = session.current_country().unwrap().name.clone();
        assert_ne!(first, second, "next round must use a fresh country");
    }

    #[test]
    fn test_hint_once_per_round() {
        let (mut session, _) = session_with(vec![country("France", "Paris")], 60);

        let hint = session.use_hint().expect("first hint");
        assert!(hint.contains('P'));
        assert!(session.hint_used());

        // Second invocation is a no-op
        assert!(session.use_hint().is_none());
        assert!(session.hint_used());
    }

    #[test]
    fn test_hint_does_not_block_submission() {
        let (mut session, _) = session_with(vec![country("France", "Paris")], 60);

        session.use_hint().expect("hint shown");
        let outcome = session.submit_answer("Paris").expect("hint must not block");
        assert!(outcome.correct);
    }

    #[test]
    fn test_hint_resets_on_new_round() {
        let pool = vec![country("France", "Paris"), country("Italy", "Rome")];
        let (mut session, _) = session_with(pool, 60);

        session.use_hint().expect("hint");
        session.submit_answer("whatever").unwrap();
        session.tick();
        session.tick();

        assert!(!session.hint_used(), "hint gate resets per round");
        assert!(session.use_hint().is_some());
    }

    #[test]
    fn test_hint_banner_clears_after_window() {
        let pool = vec![country("France", "Paris"), country("Italy", "Rome")];
        let (mut session, _) = session_with(pool, 60);

        session.use_hint().expect("hint");
        assert!(session.view().hint_message.is_some());
        for _ in 0..HINT_DISPLAY_SECS {
            session.tick();
        }
        assert!(session.view().hint_message.is_none());
    }

    #[test]
    fn test_stale_hint_window_does_not_clip_next_rounds_hint() {
        let pool = vec![country("France", "Paris"), country("Italy", "Rome")];
        let (mut session, _) = session_with(pool, 60);

        // Hint window (3s) outlives the result window (2s) of this answer
        session.use_hint().expect("hint");
        session.submit_answer("whatever").unwrap();
        session.tick();
        session.tick();
        assert!(!session.is_result_displayed(), "round advanced");

        session.use_hint().expect("fresh round, fresh hint");
        session.tick();
        assert!(
            session.view().hint_message.is_some(),
            "previous round's hint window must not clear this hint"
        );
        session.tick();
        session.tick();
        assert!(session.view().hint_message.is_none(), "hint clears after its own window");
    }

    #[test]
    fn test_timer_expiry_waits_for_result_display() {
        let pool = vec![country("France", "Paris"), country("Italy", "Rome")];
        let (mut session, _) = session_with(pool, 60);

        // Burn the clock down to one remaining second
        for _ in 0..59 {
            session.tick();
        }
        assert_eq!(session.time_remaining(), 1);

        session.submit_answer("Paris").expect("still playing");
        session.tick();
        // Clock hit zero mid-display: the result window must finish first
        assert_eq!(session.time_remaining(), 0);
        assert_eq!(session.phase(), GamePhase::Playing);
        assert!(session.is_result_displayed());

        session.tick();
        assert_eq!(session.phase(), GamePhase::Ended);
        assert_eq!(session.end_reason(), Some(EndReason::TimeUp));
    }

    #[test]
    fn test_quit_cancels_pending_and_skips_persistence() {
        let pool = vec![country("France", "Paris"), country("Italy", "Rome")];
        let (mut session, submissions) = session_with(pool, 60);

        session.submit_answer("Paris").expect("score a point");
        session.quit();

        assert_eq!(session.phase(), GamePhase::Ended);
        assert_eq!(session.end_reason(), Some(EndReason::Quit));
        assert!(!session.is_result_displayed());

        // Ticks after quit must not fire orphaned callbacks
        session.tick();
        session.tick();
        session.tick();
        assert_eq!(session.end_reason(), Some(EndReason::Quit));
        assert!(submissions.lock().unwrap().is_empty(), "quit never persists");
    }

    #[test]
    fn test_submission_failure_is_swallowed() {
        let client = RecordingClient { fail: true, ..RecordingClient::default() };
        let submissions = Arc::clone(&client.submissions);
        let mut session = GameSession::new(
            config(60),
            &StaticProvider(vec![country("France", "Paris")]),
            Box::new(client),
            Some(42),
        )
        .expect("session start");

        session.submit_answer("Paris").unwrap();
        session.tick();
        session.tick();

        assert_eq!(session.phase(), GamePhase::Ended);
        assert_eq!(submissions.lock().unwrap().len(), 1);
        assert!(session.last_receipt().is_none());
        assert!(session.summary().leaderboard_rank.is_none());
    }

    #[test]
    fn test_hard_mode_hides_country_name_in_view() {
        let client = RecordingClient::default();
        let mut cfg = config(60);
        cfg.hard_mode = true;
        let session = GameSession::new(
            cfg,
            &StaticProvider(vec![country("France", "Paris")]),
            Box::new(client),
            Some(42),
        )
        .expect("session start");

        let view = session.view();
        assert!(view.country_name.is_none());
        assert!(view.flag.is_some(), "flag prompt is always visible");
    }

    #[test]
    fn test_full_pool_is_played_without_repeats() {
        let pool: Vec<Country> =
            ["France", "Italy", "Spain", "Poland", "Norway"]
                .iter()
                .map(|n| country(n, &format!("{} City", n)))
                .collect();
        let (mut session, _) = session_with(pool, 180);

        let mut seen = Vec::new();
        while session.phase() == GamePhase::Playing {
            seen.push(session.current_country().unwrap().name.clone());
            session.submit_answer("wrong").unwrap();
            session.tick();
            session.tick();
        }

        assert_eq!(session.end_reason(), Some(EndReason::PoolExhausted));
        assert_eq!(seen.len(), 5);
        let unique: std::collections::HashSet<_> = seen.iter().collect();
        assert_eq!(unique.len(), 5, "no country repeats within a game: {:?}", seen);
    }
}
