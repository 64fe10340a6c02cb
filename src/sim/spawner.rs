//! Obstacle spawner
//!
//! Counts ticks and, once the level's interval is exceeded and there is room
//! under the cap, places a new obstacle somewhere above the visible field.

use rand::Rng;

use super::state::{GameEvent, Obstacle, ObstacleKind, Rect, Run};
use crate::consts::*;

/// Advance the spawn timer; returns the new obstacle's id if one spawned
pub fn spawn_tick(run: &mut Run) -> Option<u32> {
    run.state.ticks_since_last_spawn = run.state.ticks_since_last_spawn.saturating_add(1);
    if run.state.ticks_since_last_spawn <= run.level.spawn_interval
        || run.obstacles.len() >= MAX_OBSTACLES
    {
        return None;
    }
    run.state.ticks_since_last_spawn = 0;

    let kind = ObstacleKind(run.rng.random_range(0..OBSTACLE_VARIANTS));
    let (min, max) = (run.level.obstacle_speed_min, run.level.obstacle_speed_max);
    let speed_offset = if min < max {
        run.rng.random_range(min..=max)
    } else {
        min
    };

    // Whole-unit placement, fully inside the road and fully off-screen
    let max_x = (FIELD_WIDTH - ROAD_MARGIN - OBSTACLE_WIDTH) as i32;
    let x = run.rng.random_range(ROAD_MARGIN as i32..=max_x) as f32;
    let y = run
        .rng
        .random_range(SPAWN_BAND_TOP as i32..=SPAWN_BAND_BOTTOM as i32) as f32;

    let id = run.next_entity_id();
    run.obstacles.push(Obstacle {
        id,
        kind,
        rect: Rect::new(x, y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
        speed_offset,
        passed: false,
    });
    run.events.push(GameEvent::ObstacleSpawned { id });
    log::debug!(
        "Spawned obstacle {} ({:?}) at ({}, {}) speed {:.2}",
        id,
        kind,
        x,
        y,
        speed_offset
    );
    Some(id)
}
