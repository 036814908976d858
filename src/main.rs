//! Shoalhunt - Entry Point
//!
//! Interactive driver for the predator-prey simulation: spawns a school,
//! steps the world on demand, and displays flock and predator state.

use shoalhunt::core::config::SimulationConfig;
use shoalhunt::core::error::Result;
use shoalhunt::metrics::CaptureLog;
use shoalhunt::sim::events::SimulationEvent;
use shoalhunt::sim::world::HuntWorld;

use std::io::{self, Write};

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const INITIAL_SCHOOL_SIZE: usize = 60;
const SPAWN_SEED: u64 = 42;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("shoalhunt=info")
        .init();

    tracing::info!("Shoalhunt starting...");

    let config = SimulationConfig::default();
    let mut world = HuntWorld::new(config)?;
    let mut rng = ChaCha8Rng::seed_from_u64(SPAWN_SEED);
    world.spawn_school(INITIAL_SCHOOL_SIZE, &mut rng);
    world.add_obstacle(Vec3::new(0.0, 8.0, 12.0), 3.0);

    let mut captures = CaptureLog::new();

    println!("\n=== SHOALHUNT ===");
    println!("A schooling-prey vs confused-predator simulation");
    println!();
    println!("Commands:");
    println!("  tick / t        - Advance simulation by one tick");
    println!("  run <n>         - Run n simulation ticks");
    println!("  spawn <n>       - Spawn n more agents");
    println!("  status / s      - Show detailed status");
    println!("  quit / q        - Exit");
    println!();

    loop {
        display_status(&world, &captures);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            report_events(&world.step(&mut captures));
            continue;
        }

        if input == "status" || input == "s" {
            display_detail(&world, &captures);
            continue;
        }

        if let Some(rest) = input.strip_prefix("run ") {
            match rest.trim().parse::<u64>() {
                Ok(n) => {
                    for _ in 0..n {
                        report_events(&world.step(&mut captures));
                    }
                }
                Err(_) => println!("Usage: run <ticks>"),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("spawn ") {
            match rest.trim().parse::<usize>() {
                Ok(n) => {
                    world.spawn_school(n, &mut rng);
                    println!("Spawned {} agents", n);
                }
                Err(_) => println!("Usage: spawn <count>"),
            }
            continue;
        }

        println!("Unknown command: {}", input);
    }

    println!(
        "Final tally: {} captures over {} ticks",
        captures.capture_count(),
        world.tick()
    );
    Ok(())
}

fn display_status(world: &HuntWorld, captures: &CaptureLog) {
    let predator = world.predator();
    println!(
        "[tick {}] agents: {} | captures: {} | confusion: {:.2} | target: {}",
        world.tick(),
        world.live_count(),
        captures.capture_count(),
        predator.confusion,
        match predator.target {
            Some(id) => format!("{:?}", id.0),
            None => "none".to_string(),
        }
    );
}

fn display_detail(world: &HuntWorld, captures: &CaptureLog) {
    let sample = world.sample_flock();
    let predator = world.predator();
    println!("--- status ---");
    println!("tick:          {}", world.tick());
    println!("elapsed:       {:.2}s", world.elapsed());
    println!("live agents:   {}", sample.live_count);
    println!("polarization:  {:.3}", sample.polarization);
    println!("avg nn dist:   {:.3}", sample.avg_nearest_neighbor_distance);
    println!("captures:      {}", captures.capture_count());
    println!("pred position: {:.1?}", predator.position);
    println!("pred switches: {}", predator.switch_count);
}

fn report_events(events: &[SimulationEvent]) {
    for event in events {
        match event {
            SimulationEvent::Captured {
                visible_count,
                tick,
                ..
            } => println!(
                "  [tick {}] capture! ({} agents visible)",
                tick, visible_count
            ),
            SimulationEvent::TargetSwitched { forced, tick, .. } => println!(
                "  [tick {}] target switch ({})",
                tick,
                if *forced { "reacquired" } else { "distracted" }
            ),
        }
    }
}
