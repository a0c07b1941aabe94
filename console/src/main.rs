mod aggregate;
mod utils;

use aggregate::{AggregateArgs, TilesArgs};
use clap::{Parser, Subcommand};
use utils::UtilsArgs;

#[derive(Parser, Debug)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Merge per-tile cytometry statistics into one table.
    Aggregate {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  AggregateArgs,
    },
    /// List the tiles of an experiment and their expected statistics files.
    Tiles {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  TilesArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        MainMenu::Aggregate { utils, args } => {
            utils.setup()?;
            args.run()?;
        },
        MainMenu::Tiles { utils, args } => {
            utils.setup()?;
            args.run()?;
        },
    }
    Ok(())
}
