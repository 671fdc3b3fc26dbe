//! tetrs-sim - run the TETRS engine without a screen
//!
//! Plays a recorded session or a seeded random player for a number of ticks,
//! then prints a JSON summary and the final board.

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tetrs_engine::audio::SfxQueue;
use tetrs_engine::replay::Replay;
use tetrs_engine::score::Score;
use tetrs_engine::{Controller, EventSink, Game, GameEvent, HeldKeys, Settings};

/// Stream of the seed the random player draws from
const PLAYER_STREAM: u64 = 2;

#[derive(Parser, Debug)]
#[command(name = "tetrs-sim", version, about)]
struct Args {
    /// Seed for pieces, fragments and the random player (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks to simulate with the random player
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Play back a recorded session instead of the random player
    #[arg(long, value_name = "FILE", conflicts_with = "seed")]
    replay: Option<PathBuf>,

    /// Save the keys of this run as a replay
    #[arg(long, value_name = "FILE")]
    record: Option<PathBuf>,

    /// Settings file (defaults to the user config location)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pace ticks at the configured tick rate
    #[arg(long)]
    realtime: bool,

    /// Save the effective settings to the user config location
    #[arg(long)]
    write_config: bool,
}

/// Get the tetrs temp directory, creating it if needed
fn tetrs_temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("tetrs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Mashes random keys, releasing between presses so one-shot keys fire
struct Autoplayer {
    rng: ChaCha8Rng,
    keys: HeldKeys,
    remaining: u32,
}

impl Autoplayer {
    fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(PLAYER_STREAM);
        Self {
            rng,
            keys: HeldKeys::default(),
            remaining: 0,
        }
    }

    fn next_keys(&mut self) -> HeldKeys {
        if self.remaining == 0 {
            self.keys = self.pick();
            self.remaining = self.rng.gen_range(1..=12);
            return HeldKeys::default();
        }
        self.remaining -= 1;
        self.keys
    }

    fn pick(&mut self) -> HeldKeys {
        let mut keys = HeldKeys::default();
        match self.rng.gen_range(0..10) {
            0..=2 => keys.left = true,
            3..=5 => keys.right = true,
            6 => keys.rotate_cw = true,
            7 => keys.rotate_ccw = true,
            8 => keys.soft_drop = true,
            _ => keys.hard_drop = true,
        }
        keys
    }
}

/// Counts what a restart would otherwise wipe out
#[derive(Debug, Default, Serialize)]
struct Tally {
    games_over: u32,
    total_pieces: u32,
    total_lines: u32,
}

impl EventSink for Tally {
    fn emit(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PieceLocked { lines, .. } => {
                self.total_pieces += 1;
                self.total_lines += lines;
            }
            GameEvent::GameOver { .. } => self.games_over += 1,
            _ => {}
        }
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    seed: u64,
    ticks: u64,
    frame_count: u64,
    put_pieces: u32,
    cleared_lines: u32,
    level: u32,
    score: &'a Score,
    tally: &'a Tally,
    sfx_cues: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Generate session ID for this instance
    let session_id: u32 = rand::random();
    let log_dir = tetrs_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tetrs_engine=debug".parse()?)
                .add_directive("tetrs_sim=info".parse()?),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "tetrs-sim starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = match &args.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load(),
    };
    if args.write_config {
        let path = settings.save().context("saving settings")?;
        tracing::info!("Saved settings to {}", path.display());
    }

    let (seed, scripted) = match &args.replay {
        Some(path) => {
            let replay = Replay::load(path)
                .with_context(|| format!("loading replay from {}", path.display()))?;
            (replay.seed, Some(replay.frames))
        }
        None => (args.seed.unwrap_or_else(rand::random), None),
    };
    let ticks = scripted
        .as_ref()
        .map_or(args.ticks, |frames| frames.len() as u64);

    let mut game = Game::with_seed(settings.gameplay.clone(), seed).context("starting game")?;
    let mut controller = Controller::new(&settings.controls);
    let mut player = Autoplayer::new(seed);
    let mut recording = Replay::new(seed);
    let mut sink = (Score::new(), (SfxQueue::new(), Tally::default()));
    let tick_duration =
        Duration::from_secs_f64(1.0 / settings.gameplay.ticks_per_second.max(1) as f64);

    tracing::info!("Running {} ticks with seed {}", ticks, seed);
    for tick in 0..ticks as usize {
        let started = Instant::now();
        let keys = match &scripted {
            Some(frames) => frames[tick],
            None => player.next_keys(),
        };
        recording.record(keys);

        let input = controller.update(&keys);
        game.tick(&input, &mut sink);
        for sfx in sink.1.0.drain() {
            tracing::trace!("cue {}", sfx.filename());
        }

        if args.realtime {
            if let Some(rest) = tick_duration.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    if let Some(path) = &args.record {
        recording
            .save(path)
            .with_context(|| format!("saving replay to {}", path.display()))?;
        tracing::info!("Recorded {} frames to {}", recording.len(), path.display());
    }

    let (score, (sfx, tally)) = &sink;
    let summary = Summary {
        seed,
        ticks,
        frame_count: game.frame_count(),
        put_pieces: game.put_pieces(),
        cleared_lines: game.cleared_lines(),
        level: game.level(),
        score,
        tally,
        sfx_cues: sfx.played(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    print!("{}", game.board());
    Ok(())
}
