//! Bench command - time pathfinding and fog refresh on random maps
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: bench_paths(), bench_fog(), report
//! - Level 3: random_open_tile()
//! - Level 4: timing utilities

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Args;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use hexfog_core::{Actor, EngineConfig, Hex, HexGrid, HexMap, MapLayout};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchArgs {
    /// Map width in tiles
    #[arg(long, default_value = "40")]
    pub width: usize,

    /// Map height in tiles
    #[arg(long, default_value = "40")]
    pub height: usize,

    /// Fraction of blocked tiles
    #[arg(long, default_value = "0.2")]
    pub blocked: f64,

    /// Number of path searches
    #[arg(long, default_value = "1000")]
    pub searches: usize,

    /// Sight sources placed for the fog refresh
    #[arg(long, default_value = "4")]
    pub units: usize,

    /// Sight radius of each unit
    #[arg(long, default_value = "5")]
    pub radius: u32,

    /// Random seed
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct BenchResults {
    tiles: usize,
    open_tiles: usize,
    searches: usize,
    reachable: usize,
    avg_path_len: f64,
    search_total_ms: f64,
    searches_per_second: f64,
    units: usize,
    refresh_ms: f64,
    visible: usize,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run bench command
pub fn run(args: BenchArgs, config: EngineConfig) -> Result<()> {
    if !(0.0..=1.0).contains(&args.blocked) {
        bail!("--blocked must be between 0 and 1, got {}", args.blocked);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let layout = MapLayout::random(&mut rng, "bench", args.width, args.height, args.blocked);
    let grid = HexGrid::from_layout(&layout)?;

    let open: Vec<Hex> = grid
        .tiles()
        .filter(|t| t.is_traversable())
        .map(|t| t.hex())
        .collect();
    if open.is_empty() {
        bail!("random map has no open tiles; lower --blocked");
    }

    tracing::info!(
        "Benchmarking {}x{} map ({} open tiles), {} searches, seed {}",
        args.width,
        args.height,
        open.len(),
        args.searches,
        args.seed
    );

    let mut map = HexMap::new(grid, config);
    let (reachable, total_len, search_time) = bench_paths(&mut map, &open, args.searches, &mut rng);
    let (units, refresh_time, visible) = bench_fog(&mut map, &open, args.units, args.radius, &mut rng);

    let results = BenchResults {
        tiles: map.grid().len(),
        open_tiles: open.len(),
        searches: args.searches,
        reachable,
        avg_path_len: if reachable > 0 { total_len as f64 / reachable as f64 } else { 0.0 },
        search_total_ms: as_ms(search_time),
        searches_per_second: per_second(args.searches, search_time),
        units,
        refresh_ms: as_ms(refresh_time),
        visible,
    };

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Returns (reachable pairs, summed path length, elapsed)
fn bench_paths(map: &mut HexMap, open: &[Hex], searches: usize, rng: &mut ChaCha8Rng) -> (usize, usize, Duration) {
    let pairs: Vec<(Hex, Hex)> = (0..searches)
        .map(|_| (random_open_tile(open, rng), random_open_tile(open, rng)))
        .collect();

    let mut reachable = 0;
    let mut total_len = 0;
    let start = Instant::now();
    for &(from, to) in &pairs {
        let path = map.find_path(from, to);
        if !path.is_empty() {
            reachable += 1;
            total_len += path.len();
        }
    }
    (reachable, total_len, start.elapsed())
}

/// Returns (units placed, elapsed, visible tiles)
fn bench_fog(map: &mut HexMap, open: &[Hex], units: usize, radius: u32, rng: &mut ChaCha8Rng) -> (usize, Duration, usize) {
    let mut placed = 0;
    for (i, &hex) in open.choose_multiple(rng, units).enumerate() {
        if map.place(hex, Actor::scout(i as u32 + 1, radius)) {
            placed += 1;
        }
    }

    let start = Instant::now();
    let report = map.refresh_visibility();
    (placed, start.elapsed(), report.visible)
}

fn report_results(results: &BenchResults, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    println!("Map: {} tiles, {} open", results.tiles, results.open_tiles);
    println!(
        "Paths: {} searches, {} reachable, avg length {:.2}",
        results.searches, results.reachable, results.avg_path_len
    );
    println!(
        "       {:.2} ms total, {:.0} searches/s",
        results.search_total_ms, results.searches_per_second
    );
    println!(
        "Fog:   {} units, refresh {:.2} ms, {} tiles visible",
        results.units, results.refresh_ms, results.visible
    );
    Ok(())
}

// ============================================================================
// LEVEL 3 - HELPERS
// ============================================================================

fn random_open_tile(open: &[Hex], rng: &mut ChaCha8Rng) -> Hex {
    open.choose(rng).copied().unwrap_or(Hex::new(0, 0))
}

// ============================================================================
// LEVEL 4 - TIMING
// ============================================================================

fn as_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn per_second(count: usize, d: Duration) -> f64 {
    let secs = d.as_secs_f64();
    if secs > 0.0 {
        count as f64 / secs
    } else {
        0.0
    }
}
