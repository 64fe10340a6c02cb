//! Session controller
//!
//! Sequences screens across runs: main menu → level select → play → game
//! over → (level select | main menu). Owns the settings, the input layer and
//! the high-score store; high scores are only read at run start and written
//! at run end, never mid-tick.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use crate::error::ConfigError;
use crate::highscores::{HighScoreStore, HighScores};
use crate::input::InputState;
use crate::levels::LevelTable;
use crate::settings::Settings;
use crate::sim::{FrameSnapshot, Run, RunPhase, TickOutcome, autopilot, tick};

/// Which screen the player is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    LevelSelect,
    Playing,
    GameOver {
        score: u64,
        /// Leaderboard position (1-indexed) if the score made the top 10
        rank: Option<usize>,
    },
}

/// Receives a read-only frame after every tick. Must not block.
pub trait FrameSink {
    fn frame_ready(&mut self, frame: &FrameSnapshot<'_>);
}

/// Sink that drops every frame
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn frame_ready(&mut self, _frame: &FrameSnapshot<'_>) {}
}

/// Where run seeds come from
#[derive(Debug, Clone)]
enum SeedSource {
    Entropy,
    Fixed(Pcg32),
}

impl SeedSource {
    fn next_seed(&mut self) -> u64 {
        match self {
            SeedSource::Entropy => rand::random(),
            SeedSource::Fixed(rng) => rng.next_u64(),
        }
    }
}

pub struct Session<S: HighScoreStore> {
    levels: LevelTable,
    settings: Settings,
    input: InputState,
    store: S,
    high_scores: HighScores,
    screen: Screen,
    run: Option<Run>,
    level_name: Option<String>,
    seeds: SeedSource,
}

impl<S: HighScoreStore> Session<S> {
    pub fn new(levels: LevelTable, settings: Settings, mut store: S) -> Self {
        let high_scores = store.load();
        Self {
            levels,
            settings,
            input: InputState::new(),
            store,
            high_scores,
            screen: Screen::MainMenu,
            run: None,
            level_name: None,
            seeds: SeedSource::Entropy,
        }
    }

    /// Derive every run seed from `seed` (reproducible sessions)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seeds = SeedSource::Fixed(Pcg32::seed_from_u64(seed));
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings changes take effect on the next tick
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    /// Current (or just-ended) run
    pub fn run(&self) -> Option<&Run> {
        self.run.as_ref()
    }

    pub fn run_phase(&self) -> RunPhase {
        self.run.as_ref().map_or(RunPhase::Idle, Run::phase)
    }

    pub fn level_name(&self) -> Option<&str> {
        self.level_name.as_deref()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Best recorded score, for the HUD
    pub fn best_score(&self) -> Option<u64> {
        self.high_scores.top_score()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Main menu or game over → level select
    pub fn open_level_select(&mut self) {
        match self.screen {
            Screen::MainMenu | Screen::GameOver { .. } => {
                self.run = None;
                self.screen = Screen::LevelSelect;
            }
            screen => log::debug!("Level select unavailable from {:?}", screen),
        }
    }

    /// Back to the main menu from anywhere; an active run is aborted
    pub fn back_to_menu(&mut self) {
        if self.screen == Screen::Playing {
            self.abort();
        } else {
            self.run = None;
            self.screen = Screen::MainMenu;
        }
    }

    /// Start a run on the named level. On error nothing changes.
    pub fn select_level(&mut self, level_id: &str) -> Result<(), ConfigError> {
        let level = match self.levels.lookup(level_id) {
            Ok(level) => *level,
            Err(e) => {
                log::warn!("Cannot start run: {}", e);
                return Err(e);
            }
        };

        let seed = self.seeds.next_seed();
        let run = Run::new(level_id, level, seed)?;

        if let Some(old) = self.run.as_mut() {
            old.abort();
        }
        self.run = Some(run);
        self.input.clear();
        self.high_scores = self.store.load();
        self.level_name = Some(level_id.to_string());
        self.screen = Screen::Playing;
        log::info!("Run started on {} with seed {}", level_id, seed);
        Ok(())
    }

    /// Run one tick of the active run and hand the frame to `sink`.
    /// Returns None when no run is playing.
    pub fn tick(&mut self, sink: &mut dyn FrameSink) -> Option<TickOutcome> {
        if self.screen != Screen::Playing {
            return None;
        }
        let run = self.run.as_mut()?;
        let input = self.input.sample(self.settings.acceleration_mode);
        let outcome = tick(run, &input);
        sink.frame_ready(&run.snapshot());

        if let TickOutcome::GameOver { score } = outcome {
            self.finish_run(score);
        }
        Some(outcome)
    }

    /// Let the demo driver choose this tick's input
    pub fn steer_autopilot(&mut self) {
        if let Some(run) = self.run.as_ref().filter(|r| r.is_running()) {
            autopilot::drive(run, &mut self.input, self.settings.acceleration_mode);
        }
    }

    /// Stop the active run between ticks and return to the menu.
    /// Aborted runs don't record a high score.
    pub fn abort(&mut self) {
        if let Some(mut run) = self.run.take() {
            run.abort();
        }
        self.input.clear();
        self.screen = Screen::MainMenu;
    }

    fn finish_run(&mut self, score: u64) {
        let mut scores = self.store.load();
        let rank = scores.add_score(score);
        self.store.save(&scores);
        self.high_scores = scores;
        self.input.clear();
        self.screen = Screen::GameOver { score, rank };
        match rank {
            Some(rank) => log::info!("Game over: {} points, rank #{}", score, rank),
            None => log::info!("Game over: {} points", score),
        }
    }
}
