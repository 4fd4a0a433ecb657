//! Driver that runs insert, search and delete phases over a key sequence
//! and reports node reads/writes per phase.
#![forbid(unsafe_code)]

use std::error::Error;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use paged_btree::{AccessSnapshot, BTree, TreeConfig, DEFAULT_MIN_DEGREE};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "btree-bench",
    version,
    about = "Measure simulated page reads and writes of B-tree operations"
)]
struct Cli {
    #[arg(long, default_value_t = DEFAULT_MIN_DEGREE, help = "Minimum degree t (>= 2)")]
    min_degree: usize,

    #[arg(long, default_value_t = 999, help = "Number of keys per phase")]
    keys: u64,

    #[arg(
        long,
        value_enum,
        default_value_t = KeyOrder::Linear,
        help = "How the key sequence is generated"
    )]
    order: KeyOrder,

    #[arg(long, default_value_t = 0x5EED, help = "Seed for random key orders")]
    seed: u64,

    #[arg(
        long,
        value_name = "N",
        help = "Print cumulative counters after every N-th operation"
    )]
    every: Option<u64>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum KeyOrder {
    /// 1, 2, ..., n
    Linear,
    /// 1..=n in a random permutation
    Shuffled,
    /// n draws from 1..=n with repetition
    Random,
}

#[derive(Copy, Clone, Debug)]
enum Phase {
    Insert,
    Search,
    Delete,
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Phase::Insert => "insert",
            Phase::Search => "search",
            Phase::Delete => "delete",
        }
    }
}

struct PhaseReport {
    phase: Phase,
    ops: u64,
    hits: u64,
    elapsed: Duration,
    access: AccessSnapshot,
}

fn generate_keys(order: KeyOrder, n: u64, seed: u64) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    match order {
        KeyOrder::Linear => (1..=n).collect(),
        KeyOrder::Shuffled => {
            let mut keys: Vec<u64> = (1..=n).collect();
            keys.shuffle(&mut rng);
            keys
        }
        KeyOrder::Random => (0..n).map(|_| rng.gen_range(1..=n.max(1))).collect(),
    }
}

fn run_phase(
    tree: &mut BTree<u64>,
    phase: Phase,
    keys: &[u64],
    every: Option<u64>,
) -> PhaseReport {
    let before = tree.stats();
    let mut hits = 0;
    let mut elapsed = Duration::ZERO;

    for (n, key) in keys.iter().enumerate() {
        let start = Instant::now();
        let hit = match phase {
            Phase::Insert => tree.insert(*key),
            Phase::Search => tree.search(key).is_some(),
            Phase::Delete => tree.delete(key),
        };
        let took = start.elapsed();
        elapsed += took;
        hits += u64::from(hit);

        let n = n as u64 + 1;
        if every.is_some_and(|step| step > 0 && n % step == 0) {
            let now = tree.stats();
            println!(
                "{},{},{},{:.3},{},{}",
                phase.name(),
                n,
                key,
                took.as_secs_f64() * 1e6,
                now.nodes_read,
                now.nodes_written
            );
        }
    }

    PhaseReport {
        phase,
        ops: keys.len() as u64,
        hits,
        elapsed,
        access: tree.stats().since(&before),
    }
}

fn print_report(report: &PhaseReport) {
    let per_op = |count: u64| {
        if report.ops == 0 {
            0.0
        } else {
            count as f64 / report.ops as f64
        }
    };
    println!(
        "{:<7} ops={:<8} hits={:<8} time={:>10.3}ms  reads={:<9} ({:.2}/op)  writes={:<9} ({:.2}/op)",
        report.phase.name(),
        report.ops,
        report.hits,
        report.elapsed.as_secs_f64() * 1e3,
        report.access.nodes_read,
        per_op(report.access.nodes_read),
        report.access.nodes_written,
        per_op(report.access.nodes_written),
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut tree = BTree::with_config(TreeConfig::new(cli.min_degree))?;
    let keys = generate_keys(cli.order, cli.keys, cli.seed);
    info!(
        min_degree = cli.min_degree,
        keys = keys.len(),
        order = ?cli.order,
        "starting run"
    );

    if cli.every.is_some() {
        println!("phase,op,key,micros,nodes_read,nodes_written");
    }

    let mut reports = Vec::with_capacity(3);
    for phase in [Phase::Insert, Phase::Search, Phase::Delete] {
        let report = run_phase(&mut tree, phase, &keys, cli.every);
        info!(
            phase = phase.name(),
            height = tree.height(),
            len = tree.len(),
            "phase complete"
        );
        reports.push(report);
    }

    println!();
    for report in &reports {
        print_report(report);
    }
    println!("total   {}", tree.stats());

    Ok(())
}
