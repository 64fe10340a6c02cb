//! Traffic Racer - A top-down scrolling arcade driving game
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (motion, spawning, collisions, scoring)
//! - `levels`: Level configuration table
//! - `session`: Menu / level select / play / game over sequencing
//! - `input`: Pressed-action set sampled once per tick
//! - `highscores`: Top 10 leaderboard and its store
//! - `settings`: Player preferences
//! - `persistence`: JSON file helpers

pub mod error;
pub mod highscores;
pub mod input;
pub mod levels;
pub mod persistence;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, PersistenceError};
pub use highscores::{HighScoreStore, HighScores, JsonFileStore, MemoryStore};
pub use input::{Action, InputState};
pub use levels::{LevelConfig, LevelTable};
pub use session::{FrameSink, Screen, Session};
pub use settings::{AccelerationMode, QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Target tick rate
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep (seconds)
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;

    /// Playing field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 700.0;
    /// Road shoulder on each side
    pub const ROAD_MARGIN: f32 = 50.0;

    /// Player car
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    /// Gap between the player's starting bottom edge and the field bottom
    pub const PLAYER_START_GAP: f32 = 20.0;
    /// Sideways step per tick while steering
    pub const PLAYER_LATERAL_SPEED: f32 = 8.0;
    /// Used when a level has no player speed override
    pub const DEFAULT_PLAYER_MAX_SPEED: f32 = 10.0;

    /// Pedal mode: speed gained per tick while accelerating
    pub const ACCELERATION: f32 = 0.5;
    /// Pedal mode: speed shed per tick while braking
    pub const BRAKING: f32 = 1.0;
    /// Pedal mode: coasting decay per tick
    pub const COAST_DECAY: f32 = 0.95;
    /// Speeds below this snap to zero while coasting
    pub const SPEED_EPSILON: f32 = 0.1;
    /// Reverse speed cap as a fraction of max speed
    pub const REVERSE_FRACTION: f32 = 0.5;
    /// Auto mode: cruise speed as a fraction of max speed
    pub const AUTO_CRUISE_FRACTION: f32 = 0.9;

    /// Obstacle cars
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HEIGHT: f32 = 100.0;
    /// Live obstacle cap
    pub const MAX_OBSTACLES: usize = 5;
    /// Vertical band above the field where obstacles appear
    pub const SPAWN_BAND_TOP: f32 = -300.0;
    pub const SPAWN_BAND_BOTTOM: f32 = -150.0;
    /// Distance past the field edge before an obstacle is dropped
    pub const DESPAWN_MARGIN: f32 = 50.0;
    /// Number of obstacle sprite variants
    pub const OBSTACLE_VARIANTS: u8 = 2;

    /// Points per unit of forward speed per tick
    pub const SCORE_PER_SPEED: f32 = 0.1;
    /// One-time bonus for overtaking an obstacle
    pub const OVERTAKE_BONUS: u64 = 150;
}
