//! # cytoagg
//!
//! `cytoagg` merges the per-tile cytometry statistics of a multi-region
//! microscopy experiment into a single [polars](https://pola.rs) `DataFrame`.
//!
//! Segmentation and quantification run tile by tile, each tile producing a
//! CSV table with one row per cell (`id`, `tile_x`, `tile_y`, `x`, `y` and
//! any number of measurement columns). [`aggregate()`] stacks these tables in
//! acquisition order and adds:
//!
//! * `rid` - a cell identifier unique across the whole experiment,
//! * `rx`, `ry` - cell coordinates in the shared coordinate space of the
//!   region.
//!
//! Tiles whose statistics file is missing are skipped with a warning and
//! listed in [`AggregateReport::skipped`].
//!
//! ## Structure
//!
//! * [`config`]: tile enumeration and tile to region coordinate mapping
//!   ([`TileLayout`], [`ExperimentConfig`]).
//! * [`io`]: naming convention of per-tile files and CSV I/O.
//! * [`aggregate`](mod@aggregate): the aggregation itself.
//!
//! ## Usage
//!
//! ```no_run
//! use cytoagg::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ExperimentConfig::from_json_path("experiment.json")?;
//!     let report = aggregate(&config, "/data/experiment/output")?;
//!
//!     for skipped in report.skipped.iter() {
//!         eprintln!("Skipped {}", skipped);
//!     }
//!     println!("Aggregated {} cells", report.height());
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod exports;
pub mod io;
pub mod prelude;

pub use aggregate::{aggregate, aggregate_frame, AggregateError, AggregateReport};
pub use config::{ExperimentConfig, TileIndex, TileLayout, TilingMode};
