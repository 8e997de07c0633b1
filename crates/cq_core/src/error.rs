use std::fmt;

#[derive(Debug)]
pub enum GameError {
    EmptyPool { region: String },
    InvalidDuration { duration: u32 },
    MissingPlayerName,
    NoActiveSession,
    NotPlaying,
    ResultPending,
    SerializationError(String),
    DeserializationError(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::EmptyPool { region } => {
                write!(f, "No quizzable countries matched region filter: {}", region)
            }
            GameError::InvalidDuration { duration } => {
                write!(f, "Invalid game duration: {}s", duration)
            }
            GameError::MissingPlayerName => {
                write!(f, "Player name is required to start a game")
            }
            GameError::NoActiveSession => {
                write!(f, "No active game session")
            }
            GameError::NotPlaying => {
                write!(f, "Game is not in the playing state")
            }
            GameError::ResultPending => {
                write!(f, "A round result is currently being displayed")
            }
            GameError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            GameError::DeserializationError(msg) => {
                write!(f, "Deserialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for GameError {}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            GameError::DeserializationError(err.to_string())
        } else {
            GameError::SerializationError(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
