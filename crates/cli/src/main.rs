//! Cache simulator CLI.
//!
//! This binary builds a simulator from command-line parameters, feeds it an
//! address sequence, and reports statistics. It performs:
//! 1. **Explicit runs:** A comma-separated list of hex addresses, with the
//!    `ADDR-DATA` store syntax for writes (e.g. `1f-aa` writes `0xaa` to `0x1f`).
//! 2. **Scenario runs:** A named deterministic pattern (matrix, random,
//!    interleaved), optionally repeated for warm-up passes.

use std::process;

use clap::Parser;

use cachesim_core::common::SimError;
use cachesim_core::config::{CacheConfig, MemoryConfig, SimConfig};
use cachesim_core::core::cache::AccessResult;
use cachesim_core::sim::{Request, Scenario, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Deterministic set-associative cache simulator",
    long_about = "Replay an address sequence through a configurable cache and report\nhits, misses, and memory traffic.\n\nExamples:\n  cachesim --addresses 0,1,0,2,0,3 --blocks 4 --ways 2 --replacement lru\n  cachesim --scenario matrix --passes 2 --write-policy write-back\n  cachesim --addresses 1f-aa,1f --write-policy write-back --json"
)]
struct Cli {
    /// Total number of cache blocks (lines).
    #[arg(long, default_value_t = 16)]
    blocks: usize,

    /// Associativity (ways per set); must divide the block count.
    #[arg(long, default_value_t = 1)]
    ways: usize,

    /// Line size in addressable cells.
    #[arg(long, default_value_t = 1)]
    line_size: u64,

    /// Replacement policy: LRU, FIFO, or Random.
    #[arg(long, default_value = "LRU")]
    replacement: String,

    /// Write policy: write-back or write-through.
    #[arg(long, default_value = "write-through")]
    write_policy: String,

    /// Write-miss policy: write-allocate or write-no-allocate.
    #[arg(long, default_value = "write-allocate")]
    write_miss_policy: String,

    /// Backing store capacity in cells.
    #[arg(long, default_value_t = 1024)]
    ram_size: u64,

    /// Comma-separated hex addresses; `ADDR-DATA` marks a store.
    #[arg(long)]
    addresses: Option<String>,

    /// Named scenario: matrix, random, or interleaved.
    #[arg(long)]
    scenario: Option<String>,

    /// Number of passes over the sequence (warm-up then repeats).
    #[arg(long, default_value_t = 1)]
    passes: u32,

    /// Print one line per access.
    #[arg(long)]
    trace: bool,

    /// Emit final statistics as JSON instead of the summary block.
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Builds the simulator, replays the requested sequence, and reports stats.
fn run(cli: &Cli) -> Result<(), SimError> {
    let config = SimConfig {
        cache: CacheConfig {
            num_blocks: cli.blocks,
            line_size: cli.line_size,
            ways: cli.ways,
            policy: cli.replacement.parse()?,
            write_policy: cli.write_policy.parse()?,
            write_miss_policy: cli.write_miss_policy.parse()?,
        },
        memory: MemoryConfig {
            ram_size: cli.ram_size,
        },
    };

    let mut sim = Simulator::from_config(&config)?;

    let requests = match (&cli.addresses, &cli.scenario) {
        (Some(list), _) => parse_requests(list)?,
        (None, Some(name)) => name.parse::<Scenario>()?.requests(),
        (None, None) => Scenario::MatrixTraversal.requests(),
    };

    if !cli.json {
        println!(
            "Configuration: {} blocks, {}-way, line size {}, {} sets",
            cli.blocks,
            cli.ways,
            cli.line_size,
            sim.cache.num_sets()
        );
        println!(
            "  Policies: {} / {} / {}",
            sim.cache.replacement(),
            sim.cache.write_policy(),
            sim.cache.write_miss_policy()
        );
        println!();
    }

    let trace = cli.trace && !cli.json;
    for _ in 0..cli.passes {
        sim.load_sequence(requests.clone());
        let mut n = 0usize;
        sim.run_all(|req, result| {
            if trace {
                print_access(n, req, result);
            }
            n += 1;
        })?;
    }

    if cli.json {
        match serde_json::to_string_pretty(&sim.stats) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    } else {
        sim.stats.print();
    }
    Ok(())
}

/// Prints a one-line record of an access.
fn print_access(n: usize, req: &Request, result: &AccessResult) {
    let kind = if req.is_write { "store" } else { "load " };
    let outcome = if result.hit { "hit " } else { "miss" };
    let way = result
        .way_index
        .map_or_else(|| "-".to_string(), |w| w.to_string());
    let evicted = result.evicted.map_or_else(String::new, |e| {
        format!(
            "  evicted tag={:#x}{}",
            e.tag,
            if e.dirty { " (dirty)" } else { "" }
        )
    });
    println!(
        "[{n:4}] {kind} {:#010x}  {outcome}  set={} way={way}  mem r/w={}/{}{evicted}",
        req.addr,
        result.set_index,
        u8::from(result.memory_read),
        u8::from(result.memory_write),
    );
}

/// Parses the comma-separated request list.
///
/// Each item is a hex address; `ADDR-DATA` marks a store of `DATA` (hex) to
/// `ADDR`, following the simulator's traditional input syntax.
fn parse_requests(list: &str) -> Result<Vec<Request>, SimError> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once('-') {
            Some((addr, data)) => Ok(Request::write(parse_hex(addr)?, parse_hex(data)?)),
            None => Ok(Request::read(parse_hex(item)?)),
        })
        .collect()
}

/// Parses a hex value with an optional `0x` prefix.
fn parse_hex(s: &str) -> Result<u64, SimError> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u64::from_str_radix(digits, 16)
        .map_err(|_| SimError::InvalidConfiguration(format!("invalid hex value {trimmed:?}")))
}
