use std::path::PathBuf;

use clap::Args;
use console::style;
use cytoagg::prelude::*;
use log::info;

#[derive(Args, Debug, Clone)]
pub(crate) struct AggregateArgs {
    #[arg(short, long, help = "Path to the experiment config (JSON).")]
    config:     PathBuf,
    #[arg(
        short = 'd',
        long,
        help = "Experiment output directory containing cytometry/statistics."
    )]
    output_dir: PathBuf,
    #[arg(
        short = 'o',
        long,
        required = false,
        help = "Path for the aggregated CSV. Defaults to \
                <OUTPUT_DIR>/cytometry/data.csv."
    )]
    out:        Option<PathBuf>,
}

impl AggregateArgs {
    fn out_path(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| self.output_dir.join(aggregate_data_path()))
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let config = ExperimentConfig::from_json_path(&self.config)?;
        let mut report = aggregate(&config, &self.output_dir)?;

        let out_path = self.out_path();
        write_table(&mut report.data, &out_path)?;
        info!("Aggregate written to {}", out_path.display());

        println!(
            "[{}] Aggregated {} cells into {}",
            style("V").green(),
            style(report.height()).green(),
            out_path.display()
        );
        if !report.is_complete() {
            eprintln!(
                "[{}] {} tile(s) skipped:",
                style("!").yellow(),
                style(report.skipped.len()).yellow()
            );
            for skipped in report.skipped.iter() {
                eprintln!("\t{}", skipped);
            }
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct TilesArgs {
    #[arg(short, long, help = "Path to the experiment config (JSON).")]
    config:     PathBuf,
    #[arg(
        short = 'd',
        long,
        required = false,
        help = "Experiment output directory. When given, marks tiles whose \
                statistics file is missing."
    )]
    output_dir: Option<PathBuf>,
}

impl TilesArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        let config = ExperimentConfig::from_json_path(&self.config)?;
        for tile in config.tile_indices() {
            let path =
                cytometry_stats_path(tile.region_index, tile.tile_x, tile.tile_y);
            let marker = match self.output_dir.as_ref() {
                Some(dir) if dir.join(&path).exists() => style("V").green(),
                Some(_) => style("X").red(),
                None => style("-").dim(),
            };
            println!("[{}] {}\t{}", marker, tile, path.display());
        }
        Ok(())
    }
}
