pub use {anyhow, itertools, log, polars, pretty_env_logger, serde, serde_json};
