//! Aggregation of per-tile cytometry tables into one experiment-wide table.
//!
//! Every tile of a [`TileLayout`] is looked up under the experiment output
//! directory, loaded, and the resulting tables are stacked in enumeration
//! order. The stacked table gains three columns placed right before `id`:
//!
//! * `rid` - row position in the aggregate, `0..N`
//! * `rx`, `ry` - cell coordinates in region space
//!
//! Tiles without a statistics file are skipped and reported in
//! [`AggregateReport::skipped`]; they never fail the aggregation.
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use itertools::{izip, Itertools};
use log::{debug, info, warn};
use polars::prelude::*;

use crate::config::{TileIndex, TileLayout};
use crate::io::{cytometry_stats_path, read_tile_table};

pub const ID_COL: &str = "id";
pub const RID_COL: &str = "rid";
pub const RX_COL: &str = "rx";
pub const RY_COL: &str = "ry";
pub const TILE_X_COL: &str = "tile_x";
pub const TILE_Y_COL: &str = "tile_y";
pub const X_COL: &str = "x";
pub const Y_COL: &str = "y";

/// Fatal aggregation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// None of the expected tile tables exist.
    NoData { expected: usize },
    /// A column required for aggregation is absent from the loaded data.
    MissingColumn(String),
    /// A tile coordinate column holds a value with a fractional part.
    NonIntegralTileCoordinate { column: String, row: usize },
}

impl Display for AggregateError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            AggregateError::NoData { expected } => {
                write!(
                    f,
                    "No cytometry data available: none of the {} expected \
                     tile files exist",
                    expected
                )
            },
            AggregateError::MissingColumn(name) => {
                write!(f, "Required column '{}' not found in cytometry data", name)
            },
            AggregateError::NonIntegralTileCoordinate { column, row } => {
                write!(
                    f,
                    "Tile coordinate column '{}' holds a non-integral value at \
                     row {}",
                    column, row
                )
            },
        }
    }
}

impl Error for AggregateError {}

/// Why a tile contributed no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Missing,
}

impl Display for SkipReason {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            SkipReason::Missing => write!(f, "file does not exist"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTile {
    pub tile:   TileIndex,
    pub path:   PathBuf,
    pub reason: SkipReason,
}

impl Display for SkippedTile {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{} at \"{}\": {}", self.tile, self.path.display(), self.reason)
    }
}

/// Aggregated table together with the tiles that were left out of it.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    pub data:    DataFrame,
    pub skipped: Vec<SkippedTile>,
}

impl AggregateReport {
    pub fn height(&self) -> usize { self.data.height() }

    pub fn is_complete(&self) -> bool { self.skipped.is_empty() }
}

/// Loads every existing tile table of `layout` under `output_dir`, in
/// enumeration order. Missing files are returned as [`SkippedTile`]s.
fn collect_tiles<L: TileLayout + ?Sized>(
    layout: &L,
    output_dir: &Path,
) -> anyhow::Result<(Vec<DataFrame>, Vec<SkippedTile>)> {
    let mut frames = Vec::new();
    let mut skipped = Vec::new();

    for tile in layout.tile_indices() {
        let path = output_dir.join(cytometry_stats_path(
            tile.region_index,
            tile.tile_x,
            tile.tile_y,
        ));
        if !path.exists() {
            warn!(
                "Expected cytometry data file at \"{}\" does not exist. It \
                 will be ignored but this is worth investigating",
                path.display()
            );
            skipped.push(SkippedTile {
                tile,
                path,
                reason: SkipReason::Missing,
            });
            continue;
        }
        let df = read_tile_table(&path)?;
        debug!("Loaded {} rows for tile {}", df.height(), tile);
        frames.push(df);
    }
    Ok((frames, skipped))
}

/// Retypes every column of a table without rows to `Null`.
///
/// A header-only CSV is read with all columns as `String`; left as is, it
/// would turn the supertype of every column into `String`.
fn untyped_if_empty(df: DataFrame) -> PolarsResult<DataFrame> {
    if df.height() > 0 {
        return Ok(df);
    }
    let columns = df
        .get_columns()
        .iter()
        .map(|c| {
            Series::full_null(c.name().clone(), 0, &DataType::Null)
                .into_column()
        })
        .collect_vec();
    DataFrame::new(columns)
}

/// Stacks tile tables by column name. Columns absent from a table are filled
/// with nulls and differing column types are promoted to a common supertype.
/// Tables without rows keep their columns but take no part in the choice of
/// column types.
fn concat_tiles(frames: Vec<DataFrame>) -> PolarsResult<DataFrame> {
    let lazy = frames
        .into_iter()
        .map(|df| untyped_if_empty(df).map(|df| df.lazy()))
        .collect::<PolarsResult<Vec<_>>>()?;
    concat_lf_diagonal(lazy, UnionArgs {
        rechunk: true,
        to_supertypes: true,
        ..Default::default()
    })?
    .collect()
}

fn required_series(
    df: &DataFrame,
    name: &str,
    dtype: &DataType,
) -> anyhow::Result<Series> {
    let column = df
        .column(name)
        .map_err(|_| AggregateError::MissingColumn(name.to_string()))?;
    Ok(column.as_materialized_series().strict_cast(dtype)?)
}

/// Reads a tile coordinate column as integers. Float columns are accepted
/// only when every value is whole.
fn tile_coordinate_series(
    df: &DataFrame,
    name: &str,
) -> anyhow::Result<Series> {
    let values = required_series(df, name, &DataType::Float64)?;
    if let Some(row) = values
        .f64()?
        .into_iter()
        .position(|v| v.is_some_and(|v| v.fract() != 0.0))
    {
        return Err(AggregateError::NonIntegralTileCoordinate {
            column: name.to_string(),
            row,
        }
        .into());
    }
    Ok(values.strict_cast(&DataType::Int64)?)
}

/// Computes region coordinates for every row of `df`. Rows with a null tile
/// or point coordinate get null region coordinates.
fn region_coordinates<L: TileLayout + ?Sized>(
    layout: &L,
    df: &DataFrame,
) -> anyhow::Result<(Float64Chunked, Float64Chunked)> {
    let tile_x = tile_coordinate_series(df, TILE_X_COL)?;
    let tile_y = tile_coordinate_series(df, TILE_Y_COL)?;
    let x = required_series(df, X_COL, &DataType::Float64)?;
    let y = required_series(df, Y_COL, &DataType::Float64)?;

    let (rx, ry): (Vec<Option<f64>>, Vec<Option<f64>>) = izip!(
        tile_x.i64()?.into_iter(),
        tile_y.i64()?.into_iter(),
        x.f64()?.into_iter(),
        y.f64()?.into_iter()
    )
    .map(|row| match row {
        (Some(tx), Some(ty), Some(px), Some(py)) => {
            let (rx, ry) = layout.region_point_coordinates((tx, ty), (px, py));
            (Some(rx), Some(ry))
        },
        _ => (None, None),
    })
    .unzip();

    Ok((
        Float64Chunked::from_iter_options(RX_COL.into(), rx.into_iter()),
        Float64Chunked::from_iter_options(RY_COL.into(), ry.into_iter()),
    ))
}

/// Aggregates the cytometry tables of all tiles of an experiment.
///
/// Row order follows `layout.tile_indices()`, then the row order within each
/// tile file. Per-tile `id` values are kept as they are and may repeat
/// across tiles; `rid` is the identifier that is unique in the aggregate.
///
/// # Errors
///
/// * [`AggregateError::NoData`] when no tile file exists.
/// * [`AggregateError::MissingColumn`] when `id` or one of the coordinate
///   columns is absent.
/// * [`AggregateError::NonIntegralTileCoordinate`] when `tile_x` or `tile_y`
///   holds a fractional value.
/// * Any read or parse error of an existing tile file, unchanged.
pub fn aggregate<L, P>(
    layout: &L,
    output_dir: P,
) -> anyhow::Result<AggregateReport>
where
    L: TileLayout + ?Sized,
    P: AsRef<Path>, {
    let output_dir = output_dir.as_ref();
    let (frames, skipped) = collect_tiles(layout, output_dir)?;
    if frames.is_empty() {
        return Err(AggregateError::NoData {
            expected: skipped.len(),
        }
        .into());
    }
    let n_tiles = frames.len();

    let mut data = concat_tiles(frames)?;

    let id_idx = data
        .get_column_index(ID_COL)
        .ok_or_else(|| AggregateError::MissingColumn(ID_COL.to_string()))?;

    let (rx, ry) = region_coordinates(layout, &data)?;
    let rid = Int64Chunked::from_vec(
        RID_COL.into(),
        (0..data.height() as i64).collect(),
    );

    // Inserted in reverse so the final order is rid, rx, ry, id
    data.insert_column(id_idx, ry.into_series())?;
    data.insert_column(id_idx, rx.into_series())?;
    data.insert_column(id_idx, rid.into_series())?;

    info!(
        "Aggregated {} rows from {} tiles ({} skipped)",
        data.height(),
        n_tiles,
        skipped.len()
    );
    Ok(AggregateReport { data, skipped })
}

/// Same as [`aggregate`], discarding the skipped tile list.
pub fn aggregate_frame<L, P>(
    layout: &L,
    output_dir: P,
) -> anyhow::Result<DataFrame>
where
    L: TileLayout + ?Sized,
    P: AsRef<Path>, {
    aggregate(layout, output_dir).map(|report| report.data)
}
