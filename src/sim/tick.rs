//! Fixed timestep simulation tick
//!
//! One call advances a run by exactly one step. The stage order is fixed:
//! input → player motion → obstacle advancement → spawner → collision →
//! scoring. Scoring sees post-movement positions; collision runs after
//! movement and before the next tick's input is sampled.

use super::collision::first_collision;
use super::motion::{advance_world, integrate_player};
use super::scoring::score_tick;
use super::spawner::spawn_tick;
use super::state::{EndReason, GameEvent, Obstacle, Rect, Run, RunPhase};
use crate::settings::AccelerationMode;

/// Input commands for a single tick (sampled once, at tick start)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub steer_left: bool,
    pub steer_right: bool,
    pub accelerate: bool,
    pub brake: bool,
    pub horn: bool,
    /// Re-read from settings every tick
    pub mode: AccelerationMode,
}

/// Result of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still playing
    Continue,
    /// A collision ended the run on this tick
    GameOver { score: u64 },
    /// The run had already ended; nothing happened
    Ended,
}

/// Advance the run by one fixed timestep
pub fn tick(run: &mut Run, input: &TickInput) -> TickOutcome {
    if !run.is_running() {
        return TickOutcome::Ended;
    }

    run.events.clear();
    run.state.time_ticks += 1;

    if input.horn {
        run.events.push(GameEvent::Horn);
    }

    integrate_player(&mut run.player, input);
    advance_world(run);
    spawn_tick(run);

    // Any overlap is terminal, so the first one found is enough
    if let Some(id) = first_collision(&run.player.rect, &run.obstacles) {
        run.events.push(GameEvent::Collision { id });
        run.end(EndReason::Collision { obstacle_id: id });
        return TickOutcome::GameOver {
            score: run.state.score,
        };
    }

    score_tick(run);
    TickOutcome::Continue
}

/// Read-only view of a run for drawing
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub tick: u64,
    pub player: Rect,
    pub obstacles: &'a [Obstacle],
    pub score: u64,
    pub distance: f32,
    pub road_offset: f32,
    pub phase: RunPhase,
    pub events: &'a [GameEvent],
}

impl Run {
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            tick: self.state.time_ticks,
            player: self.player.rect,
            obstacles: &self.obstacles,
            score: self.state.score,
            distance: self.state.distance,
            road_offset: self.state.road_offset,
            phase: self.phase(),
            events: &self.events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::levels::LevelConfig;
    use crate::sim::state::ObstacleKind;
    use proptest::prelude::*;

    fn scenario_level() -> LevelConfig {
        LevelConfig::new(4.0, 7.0, 70).with_player_max_speed(15.0)
    }

    #[test]
    fn test_idle_run_spawns_exactly_one_by_tick_71() {
        let mut run = Run::new("Scenario", scenario_level(), 2024).unwrap();
        let start = run.player.rect;
        let input = TickInput::default();

        for _ in 0..70 {
            assert_eq!(tick(&mut run, &input), TickOutcome::Continue);
        }
        assert!(run.obstacles.is_empty());

        assert_eq!(tick(&mut run, &input), TickOutcome::Continue);
        assert_eq!(run.obstacles.len(), 1);
        assert_eq!(run.player.rect, start);
        assert_eq!(run.player.vertical_speed, 0.0);
        assert_eq!(run.state.score, 0);
        assert_eq!(run.state.distance, 0.0);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut run = Run::new("Scenario", scenario_level(), 1).unwrap();
        run.player.vertical_speed = -10.0;
        let p = run.player.rect;
        // Slower car just ahead; the player closes the gap next tick
        run.obstacles.push(Obstacle {
            id: 77,
            kind: ObstacleKind(0),
            rect: Rect::new(p.left(), p.top() - OBSTACLE_HEIGHT - 2.0, OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed_offset: 4.0,
            passed: false,
        });
        run.state.score = 42;

        let input = TickInput {
            accelerate: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut run, &input), TickOutcome::GameOver { score: 42 });
        assert_eq!(run.phase(), RunPhase::Ended);
        assert_eq!(run.end_reason, Some(EndReason::Collision { obstacle_id: 77 }));
        assert_eq!(run.events.last(), Some(&GameEvent::Collision { id: 77 }));

        // Ended is terminal
        let ticks = run.state.time_ticks;
        assert_eq!(tick(&mut run, &input), TickOutcome::Ended);
        assert_eq!(run.state.time_ticks, ticks);
    }

    #[test]
    fn test_horn_only_emits_event() {
        let mut run = Run::new("Scenario", scenario_level(), 1).unwrap();
        let input = TickInput {
            horn: true,
            ..Default::default()
        };
        tick(&mut run, &input);
        assert_eq!(run.events, vec![GameEvent::Horn]);
        assert_eq!(run.player.vertical_speed, 0.0);
    }

    #[test]
    fn test_auto_mode_scores_progress() {
        let mut run = Run::new("Scenario", scenario_level(), 1).unwrap();
        let input = TickInput {
            mode: AccelerationMode::Auto,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut run, &input);
        }
        assert!(run.state.score > 0);
        assert!(run.state.distance > 0.0);
        assert!(run.player.rect.top() < FIELD_HEIGHT - PLAYER_HEIGHT - PLAYER_START_GAP);
    }

    #[test]
    fn test_snapshot_reflects_run() {
        let mut run = Run::new("Test", LevelConfig::new(4.0, 7.0, 1), 8).unwrap();
        tick(&mut run, &TickInput::default());
        tick(&mut run, &TickInput::default());
        let frame = run.snapshot();
        assert_eq!(frame.tick, 2);
        assert_eq!(frame.obstacles.len(), 1);
        assert_eq!(frame.phase, RunPhase::Playing);
        assert_eq!(frame.player, run.player.rect);
        assert!(matches!(frame.events, [GameEvent::ObstacleSpawned { .. }]));
    }

    #[test]
    fn test_auto_mode_pinned_at_top_earns_nothing() {
        let mut run = Run::new("Scenario", scenario_level(), 5).unwrap();
        run.player.rect.pos.y = 0.0;
        let input = TickInput {
            mode: AccelerationMode::Auto,
            ..Default::default()
        };
        for _ in 0..100 {
            assert_eq!(tick(&mut run, &input), TickOutcome::Continue);
            assert_eq!(run.player.rect.top(), 0.0);
            assert_eq!(run.player.vertical_speed, 0.0);
        }
        assert_eq!(run.state.score, 0);
        assert_eq!(run.state.distance, 0.0);
    }

    fn overtakes(run: &Run) -> impl Iterator<Item = u32> + '_ {
        run.events.iter().filter_map(|e| match e {
            GameEvent::Overtake { id, .. } => Some(*id),
            _ => None,
        })
    }

    #[test]
    fn test_parked_player_never_overtakes() {
        let mut run = Run::new("Scenario", scenario_level(), 6).unwrap();
        let top = run.player.rect.top();
        // Alongside in the next lane over
        run.obstacles.push(Obstacle {
            id: 900,
            kind: ObstacleKind(0),
            rect: Rect::new(100.0, top, OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed_offset: 5.0,
            passed: false,
        });
        for _ in 0..200 {
            assert_eq!(tick(&mut run, &TickInput::default()), TickOutcome::Continue);
            assert_eq!(overtakes(&run).count(), 0);
            assert!(run.obstacles.iter().all(|o| !o.passed));
        }
        assert_eq!(run.state.score, 0);
    }

    #[test]
    fn test_faster_traffic_is_never_passed() {
        let mut run = Run::new("Test", LevelConfig::new(4.0, 7.0, 70), 6).unwrap();
        run.player.vertical_speed = -run.player.max_speed;
        run.obstacles.push(Obstacle {
            id: 901,
            kind: ObstacleKind(1),
            rect: Rect::new(100.0, 300.0, OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed_offset: 12.0,
            passed: false,
        });
        let input = TickInput {
            accelerate: true,
            ..Default::default()
        };
        let mut last_top = 300.0;
        for _ in 0..50 {
            assert_eq!(tick(&mut run, &input), TickOutcome::Continue);
            assert_eq!(overtakes(&run).count(), 0);
            let o = &run.obstacles[0];
            assert!(!o.passed);
            assert!(o.rect.top() < last_top);
            last_top = o.rect.top();
        }
        assert_eq!(run.player.forward_speed(), 10.0);
        assert!(run.state.score < OVERTAKE_BONUS);
    }

    #[test]
    fn test_slower_traffic_is_overtaken_once() {
        let mut run = Run::new("Test", LevelConfig::new(4.0, 7.0, 70), 6).unwrap();
        run.player.vertical_speed = -run.player.max_speed;
        let top = run.player.rect.top() - 50.0;
        run.obstacles.push(Obstacle {
            id: 902,
            kind: ObstacleKind(0),
            rect: Rect::new(100.0, top, OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
            speed_offset: 4.0,
            passed: false,
        });
        let input = TickInput {
            accelerate: true,
            ..Default::default()
        };
        let mut seen = Vec::new();
        for _ in 0..30 {
            assert_eq!(tick(&mut run, &input), TickOutcome::Continue);
            seen.extend(overtakes(&run));
        }
        assert_eq!(seen, vec![902]);
        assert!(run.state.score > OVERTAKE_BONUS);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<[bool; 5]>(), any::<bool>()).prop_map(|(keys, auto)| TickInput {
            steer_left: keys[0],
            steer_right: keys[1],
            accelerate: keys[2],
            brake: keys[3],
            horn: keys[4],
            mode: if auto {
                AccelerationMode::Auto
            } else {
                AccelerationMode::Pedal
            },
        })
    }

    /// Hold each input for a stretch of ticks so motion actually develops
    fn play(run: &mut Run, inputs: &[TickInput], hold: usize) -> Option<u64> {
        for input in inputs {
            for _ in 0..hold {
                if let TickOutcome::GameOver { .. } = tick(run, input) {
                    return Some(run.state.time_ticks);
                }
            }
        }
        None
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_every_tick(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..60),
            level in prop_oneof![
                Just(LevelConfig::new(5.0, 8.0, 60)),
                Just(LevelConfig::new(12.0, 18.0, 25).with_player_max_speed(15.0)),
                Just(LevelConfig::new(0.0, 3.0, 1)),
            ],
        ) {
            let mut run = Run::new("Test", level, seed).unwrap();
            let mut last_score = 0;
            'outer: for input in &inputs {
                for _ in 0..10 {
                    let outcome = tick(&mut run, input);
                    let r = run.player.rect;
                    prop_assert!(r.left() >= ROAD_MARGIN && r.right() <= FIELD_WIDTH - ROAD_MARGIN);
                    prop_assert!(r.top() >= 0.0 && r.bottom() <= FIELD_HEIGHT);
                    prop_assert!(run.obstacles.len() <= MAX_OBSTACLES);
                    for o in &run.obstacles {
                        prop_assert!(o.rect.left() >= ROAD_MARGIN);
                        prop_assert!(o.rect.right() <= FIELD_WIDTH - ROAD_MARGIN);
                    }
                    prop_assert!(run.state.score >= last_score);
                    prop_assert!((0.0..FIELD_HEIGHT).contains(&run.state.road_offset));
                    // Only traffic slower than the player can be overtaken
                    for id in overtakes(&run) {
                        let o = run.obstacles.iter().find(|o| o.id == id);
                        prop_assert!(o.is_some_and(|o| run.player.forward_speed() > o.speed_offset));
                    }
                    last_score = run.state.score;
                    if outcome != TickOutcome::Continue {
                        break 'outer;
                    }
                }
            }
        }

        #[test]
        fn prop_same_seed_same_run(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..40),
        ) {
            let mut a = Run::new("Scenario", scenario_level(), seed).unwrap();
            let mut b = Run::new("Scenario", scenario_level(), seed).unwrap();
            let end_a = play(&mut a, &inputs, 8);
            let end_b = play(&mut b, &inputs, 8);
            prop_assert_eq!(end_a, end_b);
            prop_assert_eq!(a.state.score, b.state.score);
            prop_assert_eq!(a.player.rect, b.player.rect);
            prop_assert_eq!(a.obstacles.len(), b.obstacles.len());
        }
    }
}
