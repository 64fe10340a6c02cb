//! Attract/demo mode driver
//!
//! Plays the game through the normal input layer by pressing and releasing
//! actions, exactly as a human at the keyboard would.

use super::state::{Obstacle, Run};
use crate::consts::*;
use crate::input::{Action, InputState};
use crate::settings::AccelerationMode;

/// How far ahead of the player's nose obstacles are considered threats
const LOOKAHEAD: f32 = 260.0;
/// Extra sideways clearance when judging lane overlap
const CLEARANCE: f32 = 12.0;

/// Update `input` for the next tick based on the current run
pub fn drive(run: &Run, input: &mut InputState, mode: AccelerationMode) {
    for action in [Action::SteerLeft, Action::SteerRight, Action::Accelerate, Action::Brake] {
        input.release(action);
    }

    let player = &run.player.rect;
    let threat = nearest_threat(run);

    match threat {
        Some(obstacle) => {
            let room_left = player.left() - ROAD_MARGIN;
            let room_right = FIELD_WIDTH - ROAD_MARGIN - player.right();
            let go_right = if obstacle.rect.center_x() < player.center_x() {
                room_right >= run.player.lateral_speed
            } else {
                room_left < run.player.lateral_speed
            };
            input.press(if go_right {
                Action::SteerRight
            } else {
                Action::SteerLeft
            });
            if mode == AccelerationMode::Pedal {
                input.press(Action::Brake);
            }
        }
        None => {
            // Drift back to the middle of the road
            let dx = FIELD_WIDTH / 2.0 - player.center_x();
            if dx.abs() > run.player.lateral_speed {
                input.press(if dx > 0.0 {
                    Action::SteerRight
                } else {
                    Action::SteerLeft
                });
            }
            if mode == AccelerationMode::Pedal {
                input.press(Action::Accelerate);
            }
        }
    }
}

/// Closest not-yet-passed obstacle ahead of the player that shares its lane
fn nearest_threat(run: &Run) -> Option<&Obstacle> {
    let player = &run.player.rect;
    run.obstacles
        .iter()
        .filter(|o| !o.passed)
        .filter(|o| o.rect.bottom() > player.top() - LOOKAHEAD && o.rect.top() < player.bottom())
        .filter(|o| {
            o.rect.left() < player.right() + CLEARANCE && player.left() - CLEARANCE < o.rect.right()
        })
        .max_by(|a, b| {
            a.rect
                .bottom()
                .partial_cmp(&b.rect.bottom())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
