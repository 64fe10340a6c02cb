//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and synchronous:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod motion;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::TickClock;
pub use collision::{first_collision, rects_intersect};
pub use state::{
    EndReason, GameEvent, Obstacle, ObstacleKind, Player, Rect, Run, RunPhase, RunState,
};
pub use tick::{FrameSnapshot, TickInput, TickOutcome, tick};
