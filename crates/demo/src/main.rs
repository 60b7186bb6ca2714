use anyhow::{Result, ensure};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ordered_map::OrderedMap;

/// Builds an AVL-backed map from random keys and prints it.
#[derive(Parser, Debug)]
#[command(name = "avl-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of random keys to insert
    #[arg(short, long, default_value_t = 16)]
    count: usize,

    /// Length of each random key
    #[arg(short, long, default_value_t = 3)]
    key_len: usize,

    /// Number of entries to remove after building
    #[arg(short, long, default_value_t = 4)]
    remove: usize,

    /// Lower bound of the range query (inclusive)
    #[arg(long, default_value = "b")]
    low: String,

    /// Upper bound of the range query (inclusive)
    #[arg(long, default_value = "m")]
    high: String,

    /// RNG seed; a fixed default seed is used when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cli.log_level))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    ensure!(cli.key_len > 0, "--key-len must be positive");

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => bench::default_rng(),
    };

    let mut map = OrderedMap::new();
    for i in 0..cli.count {
        let key = bench::random_key(&mut rng, cli.key_len);
        if !map.insert(key.clone(), i as u64) {
            debug!(%key, "duplicate key rejected");
        }
    }
    map.check_invariants()?;
    info!(len = map.len(), height = map.height(), "built map");
    print!("{map}");

    let keys: Vec<String> = map.keys().cloned().collect();
    for _ in 0..cli.remove.min(keys.len()) {
        let key = &keys[rng.random_range(0..keys.len())];
        if map.remove(key.as_str()) {
            info!(%key, "removed");
        } else {
            debug!(%key, "already removed");
        }
    }
    map.check_invariants()?;
    info!(len = map.len(), height = map.height(), "after removals");
    println!();
    print!("{map}");

    println!();
    println!("range [{}, {}]:", cli.low, cli.high);
    for (key, value) in map.range_entries(cli.low.as_str(), cli.high.as_str()) {
        println!("{key}: {value}");
    }
    Ok(())
}
