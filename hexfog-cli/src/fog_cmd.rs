//! Fog command - visibility from a set of sight sources
//!
//! ## Architecture
//! - Level 1: run() - orchestration
//! - Level 2: build_map(), report
//! - Level 3: render_ascii()

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use hexfog_core::{Actor, ActorId, EngineConfig, Hex, HexGrid, HexMap, VisibilityReport};

use crate::source::{MapSource, UnitSpec};

/// Unit on a visible tile
const UNIT_GLYPH: char = '@';
/// Tile under fog
const HIDDEN_GLYPH: char = '~';

#[derive(Args)]
pub struct FogArgs {
    #[command(flatten)]
    pub source: MapSource,

    /// Sight source as COL,ROW:RADIUS (repeatable)
    #[arg(long = "unit", value_name = "COL,ROW:RADIUS", allow_hyphen_values = true, required = true)]
    pub units: Vec<UnitSpec>,

    /// Extra blocked tile as COL,ROW (repeatable)
    #[arg(long = "block", value_name = "COL,ROW", allow_hyphen_values = true)]
    pub blocks: Vec<Hex>,

    /// Output result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct SourceSummary {
    actor: u32,
    origin: Hex,
    radius: u32,
    revealed: usize,
}

#[derive(Serialize)]
struct FogReport {
    visible: Vec<Hex>,
    sources: Vec<SourceSummary>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run fog command
pub fn run(args: FogArgs, config: EngineConfig) -> Result<()> {
    let mut map = build_map(&args, config)?;
    let report = map.refresh_visibility();

    tracing::info!(
        "Fog refreshed: {} sources, {} of {} tiles visible",
        report.sources.len(),
        report.visible,
        map.grid().len()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summarize(map.grid(), &report))?);
    } else {
        print!("{}", render_ascii(map.grid()));
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_map(args: &FogArgs, config: EngineConfig) -> Result<HexMap> {
    let mut map = HexMap::new(args.source.grid()?, config);

    for &hex in &args.blocks {
        if !map.set_traversable(hex, false) {
            bail!("blocked tile {} is off the map", hex);
        }
    }

    for (i, unit) in args.units.iter().enumerate() {
        let actor = Actor::scout(i as u32 + 1, unit.radius);
        if !map.place(unit.at, actor) {
            bail!("cannot place unit at {}: off the map or occupied", unit.at);
        }
    }

    Ok(map)
}

fn summarize(grid: &HexGrid, report: &VisibilityReport) -> FogReport {
    let visible = grid
        .tiles()
        .filter(|t| t.is_visible())
        .map(|t| t.hex())
        .collect();

    let sources = report
        .sources
        .iter()
        .map(|view| {
            let ActorId(actor) = view.actor;
            SourceSummary {
                actor,
                origin: view.origin,
                radius: view.radius,
                revealed: view.revealed.len(),
            }
        })
        .collect();

    FogReport { visible, sources }
}

// ============================================================================
// LEVEL 3 - RENDERING
// ============================================================================

/// One line per storage row, odd rows shifted half a cell
pub fn render_ascii(grid: &HexGrid) -> String {
    let mut out = String::new();
    for row in 0..grid.height() {
        if row % 2 == 1 {
            out.push(' ');
        }
        for col in 0..grid.width() {
            let tile = grid
                .hex_at_storage(col, row)
                .and_then(|hex| grid.resolve(hex));
            let glyph = match tile {
                Some(t) if !t.is_visible() => HIDDEN_GLYPH,
                Some(t) if t.occupant().is_some() => UNIT_GLYPH,
                Some(t) if t.is_traversable() => hexfog_core::layout::OPEN_GLYPH,
                Some(_) => hexfog_core::layout::BLOCKED_GLYPH,
                None => ' ',
            };
            out.push(glyph);
            out.push(' ');
        }
        out.truncate(out.trim_end_matches(' ').len());
        out.push('\n');
    }
    out
}
