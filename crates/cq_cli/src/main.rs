//! Terminal front-end for the capital-cities quiz.
//!
//! Drives the engine through the same cooperative event loop a browser
//! front-end would: a 1 Hz timer tick plus user input events, one logical
//! thread of control.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use cq_core::engine::{GamePhase, GameSession};
use cq_core::leaderboard::StoreClient;
use cq_core::models::GameConfig;
use cq_core::{state, EmbeddedCatalog};

#[derive(Parser)]
#[command(name = "cq_cli")]
#[command(about = "Play the capital-cities quiz in a terminal", long_about = None)]
struct Cli {
    /// Player name shown on the leaderboard
    #[arg(long)]
    name: String,

    /// Game length in seconds (60 or 180)
    #[arg(long, default_value_t = 180)]
    duration: u32,

    /// Region filter (all, Europe, Americas, Asia, Africa, Oceania)
    #[arg(long, default_value = "all")]
    region: String,

    /// Hard mode: only the flag is shown, not the country name
    #[arg(long, default_value_t = false)]
    hard: bool,

    /// Seed for a reproducible round order
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = GameConfig {
        player_name: cli.name,
        duration_secs: cli.duration,
        hard_mode: cli.hard,
        region: cli.region,
    };
    let client = Box::new(StoreClient::new(state::leaderboard()));
    let mut session = GameSession::new(config, &EmbeddedCatalog, client, cli.seed)
        .context("could not start the game")?;

    println!("Type the capital and press Enter. Commands: /hint, /quit");
    print_round(&session);

    let input = spawn_stdin_reader();
    let mut next_tick = Instant::now() + Duration::from_secs(1);

    while session.phase() == GamePhase::Playing {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        match input.recv_timeout(timeout) {
            Ok(line) => handle_line(&mut session, line.trim()),
            Err(RecvTimeoutError::Timeout) => {
                let before = current_round_key(&session);
                let result_was_shown = session.is_result_displayed();

                session.tick();
                next_tick += Duration::from_secs(1);

                // Announce the next round once its result window has elapsed
                if session.phase() == GamePhase::Playing
                    && result_was_shown
                    && !session.is_result_displayed()
                    && current_round_key(&session) != before
                {
                    print_round(&session);
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                session.quit();
            }
        }
    }

    print_summary(&session);
    print_leaderboard(&session);
    Ok(())
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    log::debug!("stdin closed: {}", err);
                    break;
                }
            }
        }
    });
    rx
}

fn handle_line(session: &mut GameSession, line: &str) {
    match line {
        "/quit" => session.quit(),
        "/hint" => match session.use_hint() {
            Some(hint) => println!("{}", hint),
            None => println!("No hint available right now."),
        },
        "" => {}
        answer => match session.submit_answer(answer) {
            Ok(outcome) => {
                println!("{}  (score {}, streak {})", outcome.message, outcome.score, outcome.streak)
            }
            Err(err) => println!("{}", err),
        },
    }
    let _ = io::stdout().flush();
}

fn current_round_key(session: &GameSession) -> Option<String> {
    session.current_country().map(|c| c.name.clone())
}

fn print_round(session: &GameSession) {
    let Some(country) = session.current_country() else {
        return;
    };
    println!();
    if session.config().hard_mode {
        println!("[{}s] Which capital belongs to this flag? {}", session.time_remaining(), country.flag);
    } else {
        println!("[{}s] What is the capital of {}?", session.time_remaining(), country.name);
    }
}

fn print_summary(session: &GameSession) {
    let summary = session.summary();
    println!();
    println!("=== Game over ===");
    println!("Player:      {}", summary.player_name);
    println!("Score:       {}", summary.score);
    println!("Best streak: {}", summary.best_streak);
    println!("Rounds:      {}", summary.rounds_played);
    println!("Accuracy:    {}%", summary.accuracy);
    if let Some(rank) = summary.leaderboard_rank {
        println!("Leaderboard rank ({}s games): #{}", summary.duration_secs, rank);
    }
}

fn print_leaderboard(session: &GameSession) {
    let duration = session.config().duration_secs;
    let store = state::leaderboard();
    let entries = store.read().expect("leaderboard lock poisoned").top(Some(duration));
    if entries.is_empty() {
        return;
    }

    println!();
    println!("Top scores ({}s games):", duration);
    for (idx, entry) in entries.iter().enumerate() {
        println!("{:>3}. {:<15} {:>5}", idx + 1, entry.name, entry.score);
    }
}
