pub mod country;
pub mod settings;

pub use country::Country;
pub use settings::{GameConfig, ALLOWED_DURATIONS, DEFAULT_DURATION_SECS, REGION_ALL};
