//! Air Combat entry point
//!
//! Runs a headless session flown by the autopilot and reports the result.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;

use air_combat::autopilot::autopilot_input;
use air_combat::consts::SIM_DT;
use air_combat::sim::{GameEvent, GameState, HitSource, TickOutcome};
use air_combat::{Session, SimConfig};

#[derive(Parser, Debug)]
#[command(name = "air-combat", version, about = "Headless air combat simulation flown by the autopilot")]
struct Args {
    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many simulation ticks
    #[arg(long, default_value_t = 60 * 60 * 3)]
    max_ticks: u64,

    /// JSON file overriding the default balance values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pace the simulation to wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Print the HUD as a JSON line once per simulated second
    #[arg(long)]
    trace: bool,
}

/// Tallies of what happened during a run
#[derive(Debug, Default)]
struct RunStats {
    kills: u32,
    bosses_defeated: u32,
    projectile_hits: u32,
    rams: u32,
    power_ups: u32,
}

impl RunStats {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::EnemyDestroyed { .. } => self.kills += 1,
            GameEvent::BossDefeated { .. } => self.bosses_defeated += 1,
            GameEvent::PlayerHit {
                source: HitSource::Projectile,
                ..
            } => self.projectile_hits += 1,
            GameEvent::PlayerHit {
                source: HitSource::Ram,
                ..
            } => self.rams += 1,
            GameEvent::PowerUpCollected { .. } => self.power_ups += 1,
            _ => {}
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("air-combat: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SimConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Air Combat (headless) starting, seed {}", seed);

    let mut session = Session::new(GameState::new(config, seed));
    let mut stats = RunStats::default();
    let ticks_per_second = (1.0 / SIM_DT).round() as u64;
    let mut last_trace = 0;
    let mut last_frame = Instant::now();

    let outcome = loop {
        let mut input = autopilot_input(session.state());
        input.quit = session.state().time_ticks >= args.max_ticks;

        let frame_dt = if args.realtime {
            std::thread::sleep(Duration::from_secs_f32(SIM_DT));
            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;
            dt
        } else {
            SIM_DT
        };

        let outcome = session
            .advance(frame_dt, &input)
            .with_context(|| format!("simulation fault at tick {}", session.state().time_ticks))?;
        for event in session.drain_events() {
            stats.record(&event);
        }

        let state = session.state();
        if args.trace && state.time_ticks / ticks_per_second > last_trace {
            last_trace = state.time_ticks / ticks_per_second;
            println!("{}", serde_json::to_string(&state.hud())?);
        }

        match outcome {
            TickOutcome::Quit | TickOutcome::GameOver => break outcome,
            TickOutcome::Running | TickOutcome::Paused => {}
        }
    };

    let state = session.state();
    println!(
        "{}: score {} in {:.1}s ({} ticks), hp {}/{}",
        if outcome == TickOutcome::GameOver {
            "Game over"
        } else {
            "Stopped"
        },
        state.player.score(),
        state.elapsed,
        state.time_ticks,
        state.player.hp(),
        state.player.max_hp,
    );
    println!(
        "kills {}, bosses {}, hits {}, rams {}, power-ups {}",
        stats.kills, stats.bosses_defeated, stats.projectile_hits, stats.rams, stats.power_ups
    );
    log::info!("Air Combat finished ({:?})", outcome);
    Ok(())
}
