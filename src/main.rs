// src/main.rs
//! Demo binary: synthesize one instance of each sample domain type.

use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use specimen::fixtures;
use specimen::{SynthConfig, Synthesizer};

#[derive(Parser)]
#[command(name = "specimen")]
#[command(about = "Generate random instances of the sample domain types")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Generate only the named type
    #[arg(long = "type")]
    type_name: Option<String>,

    /// Maximum recursion depth
    #[arg(long, default_value = "3")]
    max_depth: usize,
}

fn main() -> ExitCode {
    // Initialize tracing if SPECIMEN_LOG is set
    if let Ok(filter) = EnvFilter::try_from_env("SPECIMEN_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    // Determine seed - use provided or generate from current time
    let seed = cli.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let registry = fixtures::sample_registry();
    let mut synth = Synthesizer::with_config(
        &registry,
        &mut rng,
        SynthConfig {
            max_depth: cli.max_depth,
        },
    );

    let targets: Vec<&str> = match &cli.type_name {
        Some(name) => vec![name.as_str()],
        None => fixtures::SAMPLE_TYPES.to_vec(),
    };

    println!("specimen: seed {seed}");
    for name in targets {
        match synth.generate_by_name(name) {
            Ok(value) => println!("  {name} = {}", value.render(&registry)),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
