//! Shared inputs: map layouts, engine config, coordinate arguments

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use hexfog_core::{EngineConfig, Hex, HexGrid, MapLayout};

/// Where the map comes from
#[derive(Args, Debug, Clone)]
pub struct MapSource {
    /// Layout file: JSON `{"name", "rows"}` or plain rows of `.` and `#`
    #[arg(long, value_name = "FILE", conflicts_with = "size")]
    pub map: Option<PathBuf>,

    /// Obstacle-free map of WIDTHxHEIGHT tiles
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub size: Option<(usize, usize)>,
}

impl MapSource {
    pub fn layout(&self) -> Result<MapLayout> {
        match (&self.map, self.size) {
            (Some(path), _) => load_layout(path),
            (None, Some((width, height))) => Ok(MapLayout::open("open", width, height)),
            (None, None) => bail!("either --map or --size is required"),
        }
    }

    pub fn grid(&self) -> Result<HexGrid> {
        let layout = self.layout()?;
        HexGrid::from_layout(&layout).with_context(|| format!("Invalid layout: {}", layout.name))
    }
}

/// Read a layout from JSON or plain glyph rows
pub fn load_layout(path: &Path) -> Result<MapLayout> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout: {}", path.display()))?;

    if content.trim_start().starts_with('{') {
        return serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse layout JSON: {}", path.display()));
    }

    let mut layout: MapLayout = content
        .parse()
        .with_context(|| format!("Failed to parse layout rows: {}", path.display()))?;
    if let Some(stem) = path.file_stem() {
        layout.name = stem.to_string_lossy().into_owned();
    }
    Ok(layout)
}

/// Engine config from a JSON file, or defaults
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let path = match path {
        Some(p) => p,
        None => return Ok(EngineConfig::default()),
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Parse "WIDTHxHEIGHT"
pub fn parse_size(s: &str) -> Result<(usize, usize), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;
    let w = w.trim().parse().map_err(|e| format!("bad width {:?}: {}", w, e))?;
    let h = h.trim().parse().map_err(|e| format!("bad height {:?}: {}", h, e))?;
    Ok((w, h))
}

/// A unit argument: "COL,ROW:RADIUS"
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitSpec {
    pub at: Hex,
    pub radius: u32,
}

impl std::str::FromStr for UnitSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (at, radius) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected COL,ROW:RADIUS, got {:?}", s))?;
        let radius = radius
            .trim()
            .parse()
            .map_err(|e| format!("bad radius {:?}: {}", radius, e))?;
        Ok(UnitSpec { at: at.parse()?, radius })
    }
}
