//! Wa-Tor CLI - Run ocean simulations from JSON configuration.

use std::fs;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wator::{Ocean, OceanConfig, RunList};

/// Fraction of cells seeded with fish.
const FISH_DENSITY: f64 = 0.3;
/// Fraction of cells seeded with sharks.
const SHARK_DENSITY: f64 = 0.05;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [steps] [seed]", args[0]);
        eprintln!();
        eprintln!("Run a predator/prey ocean simulation from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to ocean configuration file");
        eprintln!("  steps        Number of simulation steps (default: 10)");
        eprintln!("  seed         RNG seed for the initial population (default: 0)");
        eprintln!();
        eprintln!("An example configuration is printed with --example.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    let steps: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10);
    let seed: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0);

    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: OceanConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    let mut ocean = Ocean::new(&config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let mut rng = StdRng::seed_from_u64(seed);
    for y in 0..config.height {
        for x in 0..config.width {
            let roll: f64 = rng.r#gen();
            if roll < SHARK_DENSITY {
                ocean.add_shark(x, y).expect("coordinates are in bounds");
            } else if roll < SHARK_DENSITY + FISH_DENSITY {
                ocean.add_fish(x, y).expect("coordinates are in bounds");
            }
        }
    }

    println!("Wa-Tor Simulation");
    println!("=================");
    println!("Grid: {}x{}", config.width, config.height);
    println!("Starve time: {}", config.starve_time);
    println!("Steps: {}", steps);
    println!();
    println!("{}", ocean);
    println!();

    for step in 1..=steps {
        ocean = ocean.time_step();
        println!("Generation {}:", step);
        println!("{}", ocean);
        println!();
    }

    // Round-trip the final grid through the run-length encoding as a
    // self-check.
    let encoding = RunList::from_ocean(&ocean);
    encoding.check().unwrap_or_else(|e| {
        eprintln!("Encoding self-check failed: {}", e);
        std::process::exit(1);
    });
    assert_eq!(encoding.to_ocean(), ocean);
    println!(
        "Final grid: {} cells in {} runs",
        config.grid_size(),
        encoding.run_count()
    );
}

fn print_example_config() {
    let config = OceanConfig::default();
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
