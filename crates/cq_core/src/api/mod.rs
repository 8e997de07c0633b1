pub mod json_api;
pub mod leaderboard_json;

pub use json_api::{
    game_view_json, quit_json, start_game_json, submit_answer_json, tick_json, use_hint_json,
    StartRequest, SubmitAnswerRequest,
};
pub use leaderboard_json::{leaderboard_top_json, submit_score_json};
