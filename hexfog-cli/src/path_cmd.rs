//! Path command - shortest path between two tiles

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use hexfog_core::{EngineConfig, Hex, HexMap};

use crate::source::MapSource;

#[derive(Args)]
pub struct PathArgs {
    #[command(flatten)]
    pub source: MapSource,

    /// Start tile as COL,ROW (logical coordinates)
    #[arg(long, allow_hyphen_values = true)]
    pub from: Hex,

    /// Goal tile as COL,ROW
    #[arg(long, allow_hyphen_values = true)]
    pub to: Hex,

    /// Output result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PathReport {
    from: Hex,
    to: Hex,
    distance: u32,
    reachable: bool,
    path: Vec<Hex>,
}

/// Run path command
pub fn run(args: PathArgs, config: EngineConfig) -> Result<()> {
    let grid = args.source.grid()?;
    let mut map = HexMap::new(grid, config);

    for (label, hex) in [("start", args.from), ("goal", args.to)] {
        if map.resolve(hex).is_none() {
            bail!("{} {} is off the map", label, hex);
        }
    }

    let path = map.find_path(args.from, args.to);
    let report = PathReport {
        from: args.from,
        to: args.to,
        distance: map.distance(args.from, args.to),
        reachable: args.from == args.to || !path.is_empty(),
        path,
    };

    tracing::info!(
        "Path {} -> {}: {} steps (distance {})",
        report.from,
        report.to,
        report.path.len(),
        report.distance
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !report.reachable {
        println!("{} is unreachable from {}", report.to, report.from);
    } else {
        let steps: Vec<String> = report.path.iter().map(|h| h.to_string()).collect();
        println!("{} steps: {}", steps.len(), steps.join(" -> "));
    }

    Ok(())
}
