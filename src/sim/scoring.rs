//! Scoring policy
//!
//! Continuous points for forward progress plus a one-time bonus per overtake.

use super::state::{GameEvent, Run};
use crate::consts::{OVERTAKE_BONUS, SCORE_PER_SPEED};

/// Credit this tick's score. Never decreases the score.
pub fn score_tick(run: &mut Run) {
    let forward = run.player.forward_speed();
    if forward > 0.0 {
        run.state.score_carry += forward * SCORE_PER_SPEED;
        let whole = run.state.score_carry.floor();
        run.state.score += whole as u64;
        run.state.score_carry -= whole;
    }

    // Overtaken = fully behind the player while the player is the faster car.
    // Traffic can't fall behind a slower player under relative motion, so the
    // speed check only guards forced placements.
    let player_bottom = run.player.rect.bottom();
    for obstacle in run.obstacles.iter_mut().filter(|o| !o.passed) {
        if obstacle.rect.top() > player_bottom && forward > obstacle.speed_offset {
            obstacle.passed = true;
            run.state.score += OVERTAKE_BONUS;
            run.events.push(GameEvent::Overtake {
                id: obstacle.id,
                bonus: OVERTAKE_BONUS,
            });
        }
    }
}
