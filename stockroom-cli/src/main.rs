use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};

use stockroom::entities::Warehouse;
use stockroom_cli::commands;
use stockroom_cli::config::{CliConfig, validate_grid_size};
use stockroom_cli::io;
use stockroom_cli::io::cli::{Cli, Command};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level, &args.exception_log)?;

    let mut config = match &args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            CliConfig::default()
        }
        Some(config_file) => io::read_config(config_file)?,
    };
    config.validate().context("invalid config")?;
    if let Some(database) = args.database_path() {
        config.warehouse.database_path = database;
    }

    info!("[MAIN] Successfully parsed CliConfig: {config:?}");

    match &args.command {
        Command::Init { locations, floors } => {
            let n_locations = locations.unwrap_or(config.n_locations);
            let n_floors = floors.unwrap_or(config.n_floors);
            validate_grid_size(n_locations, n_floors)?;

            let warehouse = Warehouse::with_config(n_locations, n_floors, config.warehouse);
            warehouse
                .save()
                .with_context(|| format!("could not write {}", warehouse.database_path().display()))?;
            println!(
                "Empty warehouse of {n_locations}x{n_floors} written to {}.",
                warehouse.database_path().display()
            );
        }
        command => {
            let mut warehouse = Warehouse::with_config(0, 0, config.warehouse);
            warehouse.load().with_context(|| {
                format!(
                    "could not read {}, use `init` to create a warehouse",
                    warehouse.database_path().display()
                )
            })?;

            // saved once by `commands::run`, which reports a failed write
            warehouse.set_auto_save(false);
            commands::run(command, &mut warehouse, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
