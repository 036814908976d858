//! Headless batch runner
//!
//! Runs a seeded simulation for a fixed number of ticks and reports
//! periodic flock samples plus a final capture summary. Useful for
//! parameter sweeps driven by an external script.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use shoalhunt::core::config::SimulationConfig;
use shoalhunt::metrics::CaptureLog;
use shoalhunt::sim::world::HuntWorld;

#[derive(Parser, Debug)]
#[command(about = "Headless predator-prey simulation runs")]
struct Args {
    /// Number of agents to spawn
    #[arg(long, default_value_t = 60)]
    agents: usize,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 5000)]
    ticks: u64,

    /// Spawn seed (same seed, same run)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Optional TOML config file; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a flock sample every this many ticks (0 disables)
    #[arg(long, default_value_t = 500)]
    sample_every: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter("shoalhunt=warn")
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match SimulationConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        },
        None => SimulationConfig::default(),
    };

    let mut world = match HuntWorld::new(config) {
        Ok(world) => world,
        Err(err) => {
            eprintln!("Failed to build world: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    world.spawn_school(args.agents, &mut rng);
    world.add_obstacle(Vec3::new(0.0, 8.0, 12.0), 3.0);

    println!(
        "Running {} ticks with {} agents (seed {})",
        args.ticks, args.agents, args.seed
    );

    let mut captures = CaptureLog::new();
    for _ in 0..args.ticks {
        world.step(&mut captures);

        if args.sample_every > 0 && world.tick() % args.sample_every == 0 {
            let sample = world.sample_flock();
            println!(
                "tick {:>6}: {:>4} alive | polarization {:.3} | nn dist {:.2} | confusion {:.2}",
                world.tick(),
                sample.live_count,
                sample.polarization,
                sample.avg_nearest_neighbor_distance,
                world.predator().confusion,
            );
        }

        if world.live_count() == 0 {
            println!("School wiped out at tick {}", world.tick());
            break;
        }
    }

    println!();
    println!("=== summary ===");
    println!("ticks run:        {}", world.tick());
    println!("captures:         {}", captures.capture_count());
    println!("survivors:        {}", world.live_count());
    println!("target switches:  {}", world.predator().switch_count);
    if !captures.visible_counts.is_empty() {
        let mean: f32 = captures.visible_counts.iter().sum::<usize>() as f32
            / captures.visible_counts.len() as f32;
        println!("mean visible at capture: {:.2}", mean);
    }

    ExitCode::SUCCESS
}
