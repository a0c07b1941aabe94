//! Experiment tile layout.
//!
//! The aggregator only needs two things from an experiment: the ordered
//! list of tiles and the mapping from tile-local to region coordinates.
//! Both are captured by [`TileLayout`]; [`ExperimentConfig`] is the
//! JSON-backed implementation used by the command line tool.
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Identifies one imaging tile of an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    pub region_index: u32,
    /// Position of the tile within its region, in acquisition order.
    pub tile_index:   u32,
    pub tile_x:       u32,
    pub tile_y:       u32,
}

impl TileIndex {
    pub fn new(
        region_index: u32,
        tile_index: u32,
        tile_x: u32,
        tile_y: u32,
    ) -> Self {
        Self {
            region_index,
            tile_index,
            tile_x,
            tile_y,
        }
    }
}

impl Display for TileIndex {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "R{:03}/T{:03} (x={}, y={})",
            self.region_index, self.tile_index, self.tile_x, self.tile_y
        )
    }
}

/// Tile enumeration and coordinate transform of an experiment.
pub trait TileLayout {
    /// All tiles of the experiment, in a deterministic order.
    fn tile_indices(&self) -> Vec<TileIndex>;

    /// Maps a point given in the coordinates of tile `tile` into the shared
    /// coordinate space of the tile's region.
    fn region_point_coordinates(
        &self,
        tile: (i64, i64),
        point: (f64, f64),
    ) -> (f64, f64);
}

/// Order in which tiles were acquired within a region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TilingMode {
    /// Row-major, every row left to right.
    #[default]
    Grid,
    /// Row-major, odd rows right to left.
    Snake,
}

impl TilingMode {
    /// Converts a 0-based acquisition index into `(tile_x, tile_y)` for a
    /// region `width` tiles wide.
    pub fn tile_coordinates(
        &self,
        index: u32,
        width: u32,
    ) -> (u32, u32) {
        let y = index / width;
        let x = index % width;
        match self {
            TilingMode::Grid => (x, y),
            TilingMode::Snake if y % 2 == 1 => (width - 1 - x, y),
            TilingMode::Snake => (x, y),
        }
    }
}

impl FromStr for TilingMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(TilingMode::Grid),
            "snake" => Ok(TilingMode::Snake),
            other => bail!("Unknown tiling mode '{}'", other),
        }
    }
}

impl Display for TilingMode {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            TilingMode::Grid => write!(f, "grid"),
            TilingMode::Snake => write!(f, "snake"),
        }
    }
}

fn default_region_indexes() -> Vec<u32> { vec![0] }

/// Acquisition geometry of an experiment.
///
/// Tile dimensions are the dimensions of the tiles as processed, i.e. after
/// any overlap between neighbouring tiles has been cropped away, so that
/// tiles abut exactly in region space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    #[serde(default = "default_region_indexes")]
    pub region_indexes: Vec<u32>,
    pub region_width:   u32,
    pub region_height:  u32,
    pub tile_width:     u32,
    pub tile_height:    u32,
    #[serde(default)]
    pub tiling_mode:    TilingMode,
}

impl ExperimentConfig {
    pub fn new(
        region_indexes: Vec<u32>,
        region_width: u32,
        region_height: u32,
        tile_width: u32,
        tile_height: u32,
    ) -> Self {
        Self {
            region_indexes,
            region_width,
            region_height,
            tile_width,
            tile_height,
            tiling_mode: TilingMode::default(),
        }
    }

    pub fn with_tiling_mode(
        mut self,
        tiling_mode: TilingMode,
    ) -> Self {
        self.tiling_mode = tiling_mode;
        self
    }

    /// Reads and validates a JSON experiment configuration.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| {
            format!("Could not open experiment config {}", path.display())
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| {
                format!("Could not parse experiment config {}", path.display())
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.region_indexes.is_empty() {
            bail!("region_indexes must not be empty")
        }
        if !self.region_indexes.iter().all_unique() {
            bail!("region_indexes contains duplicates")
        }
        for (name, value) in [
            ("region_width", self.region_width),
            ("region_height", self.region_height),
            ("tile_width", self.tile_width),
            ("tile_height", self.tile_height),
        ] {
            if value == 0 {
                bail!("{} must be greater than 0", name)
            }
        }
        if self.region_width.checked_mul(self.region_height).is_none() {
            bail!(
                "region_width * region_height ({} * {}) overflows the tile \
                 count",
                self.region_width,
                self.region_height
            )
        }
        Ok(())
    }

    /// Number of tiles in one region. Saturates for configs that would not
    /// pass [`validate`](Self::validate).
    pub fn n_tiles_per_region(&self) -> u32 {
        self.region_width.saturating_mul(self.region_height)
    }
}

impl TileLayout for ExperimentConfig {
    fn tile_indices(&self) -> Vec<TileIndex> {
        self.region_indexes
            .iter()
            .cartesian_product(0..self.n_tiles_per_region())
            .map(|(&region, tile)| {
                let (x, y) = self
                    .tiling_mode
                    .tile_coordinates(tile, self.region_width);
                TileIndex::new(region, tile, x, y)
            })
            .collect()
    }

    fn region_point_coordinates(
        &self,
        tile: (i64, i64),
        point: (f64, f64),
    ) -> (f64, f64) {
        let (tx, ty) = tile;
        let (x, y) = point;
        (
            tx as f64 * self.tile_width as f64 + x,
            ty as f64 * self.tile_height as f64 + y,
        )
    }
}
