//! Location and serialization of cytometry tables in an experiment output
//! tree.
pub mod cytometry;

use std::path::PathBuf;

pub use cytometry::{read_tile_table, write_table};

/// Directory (relative to the experiment output root) holding per-tile
/// cytometry statistics.
pub const CYTOMETRY_STATS_DIR: &str = "cytometry/statistics";

/// Relative path of the per-tile statistics table for the given tile.
///
/// Region and tile coordinates are 0-based, e.g. region 0, tile (1, 2) maps
/// to `cytometry/statistics/R000_X001_Y002.csv`.
pub fn cytometry_stats_path(
    region_index: u32,
    tile_x: u32,
    tile_y: u32,
) -> PathBuf {
    PathBuf::from(CYTOMETRY_STATS_DIR).join(format!(
        "R{:03}_X{:03}_Y{:03}.csv",
        region_index, tile_x, tile_y
    ))
}

/// Relative path of the experiment-wide aggregate table.
pub fn aggregate_data_path() -> PathBuf { PathBuf::from("cytometry/data.csv") }

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_cytometry_stats_path() {
        assert_eq!(
            cytometry_stats_path(0, 1, 2),
            Path::new("cytometry/statistics/R000_X001_Y002.csv")
        );
        assert_eq!(
            cytometry_stats_path(12, 0, 105),
            Path::new("cytometry/statistics/R012_X000_Y105.csv")
        );
    }

    #[test]
    fn test_aggregate_data_path() {
        assert_eq!(aggregate_data_path(), Path::new("cytometry/data.csv"));
    }
}
