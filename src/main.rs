//! Traffic Racer headless entry point
//!
//! Plays one autopilot run through the session controller, then records the
//! score in the data directory's high score table.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use traffic_racer::consts::TICK_RATE_HZ;
use traffic_racer::session::NullSink;
use traffic_racer::settings::AccelerationMode;
use traffic_racer::sim::{FrameSnapshot, TickClock, TickOutcome};
use traffic_racer::{FrameSink, JsonFileStore, LevelTable, Screen, Session, Settings};

#[derive(Parser)]
#[command(name = "traffic-racer")]
#[command(about = "Play a headless Traffic Racer run on autopilot")]
struct Args {
    /// Level to play
    #[arg(short, long, default_value = "Easy")]
    level: String,

    /// Run seed (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Abort the run after this many ticks
    #[arg(long, default_value_t = 60 * 60 * 5)]
    max_ticks: u64,

    /// Directory holding settings.json and highscores.json
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Optional level table JSON replacing the built-in levels
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Override the acceleration mode from settings (pedal | auto)
    #[arg(long)]
    mode: Option<AccelerationMode>,

    /// Pace ticks at the real tick rate instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Log a HUD line every N ticks
    #[arg(long, default_value_t = 0)]
    hud_every: u64,
}

/// Logs a HUD line every `every` ticks
struct HudLog {
    every: u64,
}

impl FrameSink for HudLog {
    fn frame_ready(&mut self, frame: &FrameSnapshot<'_>) {
        if self.every > 0 && frame.tick % self.every == 0 {
            log::info!(
                "tick {:>6}  score {:>6}  distance {:>8.0}  obstacles {}",
                frame.tick,
                frame.score,
                frame.distance,
                frame.obstacles.len()
            );
        }
    }
}

fn load_levels(args: &Args) -> Result<LevelTable, String> {
    match &args.levels {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
            LevelTable::from_json(&json).map_err(|e| e.to_string())
        }
        None => Ok(LevelTable::builtin().clone()),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let levels = match load_levels(&args) {
        Ok(levels) => levels,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut settings = Settings::load(&args.data_dir.join(Settings::FILE_NAME));
    if let Some(mode) = args.mode {
        settings.acceleration_mode = mode;
    }

    let store = JsonFileStore::in_dir(&args.data_dir);
    let mut session = Session::new(levels, settings, store);
    if let Some(seed) = args.seed {
        session = session.with_seed(seed);
    }

    log::info!("Traffic Racer (headless) starting...");
    session.open_level_select();
    if let Err(e) = session.select_level(&args.level) {
        eprintln!("{e}");
        eprintln!(
            "Available levels: {}",
            session.levels().names().collect::<Vec<_>>().join(", ")
        );
        return ExitCode::FAILURE;
    }

    let mut clock = TickClock::with_rate(TICK_RATE_HZ);
    let mut hud = HudLog {
        every: args.hud_every,
    };
    let mut null = NullSink;
    let mut ticks = 0u64;
    loop {
        if ticks >= args.max_ticks {
            log::info!("Tick limit reached, aborting run");
            let score = session.run().map_or(0, |r| r.score());
            session.abort();
            println!("Run aborted after {ticks} ticks with {score} points (not recorded)");
            return ExitCode::SUCCESS;
        }
        if args.realtime {
            let now = Instant::now();
            if !clock.poll(now) {
                std::thread::sleep(clock.time_until_due(now));
                continue;
            }
        }

        session.steer_autopilot();
        let sink: &mut dyn FrameSink = if args.hud_every > 0 { &mut hud } else { &mut null };
        match session.tick(sink) {
            Some(TickOutcome::Continue) => ticks += 1,
            _ => break,
        }
    }

    if let Screen::GameOver { score, rank } = session.screen() {
        let (played, distance) = session
            .run()
            .map_or((ticks, 0.0), |r| (r.state.time_ticks, r.state.distance));
        println!("Game over after {played} ticks: {score} points, distance {distance:.0}");
        match rank {
            Some(rank) => println!("New high score! Rank #{rank}"),
            None => println!("No high score this time"),
        }
        println!("High scores:");
        for (i, score) in session.high_scores().scores().enumerate() {
            println!("{:>3}. {}", i + 1, score);
        }
    }
    ExitCode::SUCCESS
}
