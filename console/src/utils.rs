use clap::Args;
use log::LevelFilter;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        short,
        long,
        default_value_t = false,
        help = "Log debug messages. Overrides RUST_LOG."
    )]
    pub verbose: bool,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> { init_logger(self.verbose) }
}

/// Installs the logger. Without `verbose` the level comes from `RUST_LOG`,
/// falling back to `info`.
pub(crate) fn init_logger(verbose: bool) -> anyhow::Result<()> {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) if !verbose => {
            builder.parse_filters(&filters);
        },
        _ => {
            builder.filter_level(if verbose {
                LevelFilter::Debug
            }
            else {
                LevelFilter::Info
            });
        },
    }
    builder.try_init()?;
    Ok(())
}
