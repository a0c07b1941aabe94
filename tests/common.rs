#![allow(dead_code)]
use std::fs::{create_dir_all, write};
use std::path::Path;

use cytoagg::io::cytometry_stats_path;
use cytoagg::{TileIndex, TileLayout};
use polars::prelude::*;

/// Layout over an explicit tile list, placing tiles `tile_width` apart along
/// x and `tile_height` apart along y.
pub struct StubLayout {
    pub tiles:       Vec<TileIndex>,
    pub tile_width:  f64,
    pub tile_height: f64,
}

impl StubLayout {
    pub fn new(tiles: Vec<TileIndex>) -> Self {
        Self {
            tiles,
            tile_width: 10.0,
            tile_height: 0.0,
        }
    }

    /// Region coordinates equal tile coordinates.
    pub fn identity(tiles: Vec<TileIndex>) -> Self {
        Self {
            tiles,
            tile_width: 0.0,
            tile_height: 0.0,
        }
    }
}

impl TileLayout for StubLayout {
    fn tile_indices(&self) -> Vec<TileIndex> { self.tiles.clone() }

    fn region_point_coordinates(
        &self,
        tile: (i64, i64),
        point: (f64, f64),
    ) -> (f64, f64) {
        (
            tile.0 as f64 * self.tile_width + point.0,
            tile.1 as f64 * self.tile_height + point.1,
        )
    }
}

pub fn tile(
    region_index: u32,
    tile_x: u32,
    tile_y: u32,
) -> TileIndex {
    TileIndex::new(region_index, 0, tile_x, tile_y)
}

/// Writes `content` as the statistics table of `tile` under `root`.
pub fn write_tile(
    root: &Path,
    tile: &TileIndex,
    content: &str,
) -> anyhow::Result<()> {
    let path = root.join(cytometry_stats_path(
        tile.region_index,
        tile.tile_x,
        tile.tile_y,
    ));
    create_dir_all(path.parent().unwrap())?;
    write(path, content)?;
    Ok(())
}

pub fn i64_values(
    df: &DataFrame,
    name: &str,
) -> Vec<Option<i64>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .collect()
}

pub fn f64_values(
    df: &DataFrame,
    name: &str,
) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}
