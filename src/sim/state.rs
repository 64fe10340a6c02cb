//! Run state and core simulation types
//!
//! Everything one run owns lives here: the player, the obstacle collection,
//! score bookkeeping and the seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::levels::{LevelConfig, LevelTable};

/// Axis-aligned rectangle, top-left origin, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// No run exists
    Idle,
    /// Ticking
    Playing,
    /// Terminal; a new run must be created to play again
    Ended,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Collision { obstacle_id: u32 },
    Aborted,
}

/// Things that happened during a tick, in order, for presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Horn,
    ObstacleSpawned { id: u32 },
    ObstacleDespawned { id: u32 },
    Overtake { id: u32, bonus: u64 },
    Collision { id: u32 },
}

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Negative = moving forward (up the screen)
    pub vertical_speed: f32,
    /// Sideways step per tick while steering
    pub lateral_speed: f32,
    pub max_speed: f32,
}

impl Player {
    /// Centered on the road near the bottom of the field
    pub fn new(max_speed: f32) -> Self {
        Self {
            rect: Rect::new(
                (FIELD_WIDTH - PLAYER_WIDTH) / 2.0,
                FIELD_HEIGHT - PLAYER_HEIGHT - PLAYER_START_GAP,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            vertical_speed: 0.0,
            lateral_speed: PLAYER_LATERAL_SPEED,
            max_speed,
        }
    }

    /// Forward component of speed (0 when stopped or reversing)
    pub fn forward_speed(&self) -> f32 {
        (-self.vertical_speed).max(0.0)
    }
}

/// Sprite variant tag; selects artwork only, never behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObstacleKind(pub u8);

/// An obstacle car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
    /// Drawn from the level's obstacle speed range at spawn
    pub speed_offset: f32,
    /// Set once the obstacle has fallen behind the player
    pub passed: bool,
}

/// Score bookkeeping for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    pub score: u64,
    /// Forward distance covered
    pub distance: f32,
    pub ticks_since_last_spawn: u32,
    pub running: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Road texture scroll, in [0, FIELD_HEIGHT)
    pub road_offset: f32,
    /// Fractional speed points not yet credited to `score`
    pub score_carry: f32,
}

/// One playthrough, from start to collision or abort
#[derive(Debug, Clone)]
pub struct Run {
    pub level: LevelConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub player: Player,
    /// Live obstacles (spawn order)
    pub obstacles: Vec<Obstacle>,
    pub state: RunState,
    pub end_reason: Option<EndReason>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl Run {
    /// Start a run on an explicit level configuration; `name` labels errors
    pub fn new(name: &str, level: LevelConfig, seed: u64) -> Result<Self, ConfigError> {
        level.validate(name)?;
        Ok(Self::with_validated(level, seed))
    }

    /// Start a run on a named level from `table`
    pub fn start(table: &LevelTable, level_id: &str, seed: u64) -> Result<Self, ConfigError> {
        let level = *table.lookup(level_id)?;
        Ok(Self::with_validated(level, seed))
    }

    fn with_validated(level: LevelConfig, seed: u64) -> Self {
        Self {
            level,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(level.player_max_speed()),
            obstacles: Vec::with_capacity(MAX_OBSTACLES),
            state: RunState {
                running: true,
                ..Default::default()
            },
            end_reason: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn phase(&self) -> RunPhase {
        if self.state.running {
            RunPhase::Playing
        } else {
            RunPhase::Ended
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// Stop the run between ticks (e.g. back to menu)
    pub fn abort(&mut self) {
        if self.state.running {
            self.end(EndReason::Aborted);
        }
    }

    pub(crate) fn end(&mut self, reason: EndReason) {
        self.state.running = false;
        self.end_reason = Some(reason);
        log::info!(
            "Run ended ({:?}) after {} ticks, score {}",
            reason,
            self.state.time_ticks,
            self.state.score
        );
    }
}
