pub use crate::aggregate::{
    aggregate,
    aggregate_frame,
    AggregateError,
    AggregateReport,
    SkipReason,
    SkippedTile,
};
pub use crate::config::{
    ExperimentConfig,
    TileIndex,
    TileLayout,
    TilingMode,
};
pub use crate::io::{
    aggregate_data_path,
    cytometry_stats_path,
    read_tile_table,
    write_table,
};
