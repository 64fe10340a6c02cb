//! Motion integrator
//!
//! Discrete, input-driven movement: no mass or friction model. Positions move
//! in whole units per tick and are clamped to the field rather than rejected.

use super::state::{GameEvent, Player, Run};
use super::tick::TickInput;
use crate::consts::*;
use crate::settings::AccelerationMode;

/// Advance the player's speed and position by one tick
pub fn integrate_player(player: &mut Player, input: &TickInput) {
    // Lateral: both held cancel out
    let mut x = player.rect.pos.x;
    if input.steer_left {
        x -= player.lateral_speed;
    }
    if input.steer_right {
        x += player.lateral_speed;
    }
    player.rect.pos.x = x.clamp(ROAD_MARGIN, FIELD_WIDTH - ROAD_MARGIN - player.rect.size.x);

    player.vertical_speed = next_vertical_speed(player, input);

    let max_y = FIELD_HEIGHT - player.rect.size.y;
    let y = player.rect.pos.y + player.vertical_speed.round();
    if y < 0.0 || y > max_y {
        // Pinned against an edge means no progress, in either mode
        player.rect.pos.y = y.clamp(0.0, max_y);
        player.vertical_speed = 0.0;
    } else {
        player.rect.pos.y = y;
    }
}

fn next_vertical_speed(player: &Player, input: &TickInput) -> f32 {
    let max = player.max_speed;
    let v = player.vertical_speed;
    match input.mode {
        AccelerationMode::Auto => -max * AUTO_CRUISE_FRACTION,
        AccelerationMode::Pedal if input.brake => (v + BRAKING).min(max * REVERSE_FRACTION),
        AccelerationMode::Pedal if input.accelerate => (v - ACCELERATION).max(-max),
        AccelerationMode::Pedal => {
            let decayed = v * COAST_DECAY;
            if decayed.abs() < SPEED_EPSILON {
                0.0
            } else {
                decayed
            }
        }
    }
}

/// Move obstacles relative to the player, drop unreachable ones, scroll the
/// road and accumulate distance.
///
/// Each obstacle closes in by the player's signed forward speed minus its own
/// `speed_offset`: slower traffic comes down the screen toward the player,
/// faster traffic pulls away up the screen.
pub fn advance_world(run: &mut Run) {
    let forward = -run.player.vertical_speed;
    for obstacle in &mut run.obstacles {
        obstacle.rect.pos.y += (forward - obstacle.speed_offset).round();
    }

    let events = &mut run.events;
    run.obstacles.retain(|o| {
        // Top edge past the margin: fully off-screen and out of reach
        let below = o.rect.top() > FIELD_HEIGHT + DESPAWN_MARGIN;
        let above = o.rect.bottom() < SPAWN_BAND_TOP - DESPAWN_MARGIN;
        if below || above {
            events.push(GameEvent::ObstacleDespawned { id: o.id });
            false
        } else {
            true
        }
    });

    let progress = run.player.forward_speed();
    run.state.distance += progress;
    run.state.road_offset =
        (run.state.road_offset + run.level.obstacle_speed_min + progress).rem_euclid(FIELD_HEIGHT);
}
