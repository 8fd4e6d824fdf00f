// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

mod commands;

use crate::commands::{Cmd, SimParams, SubCmd};
use ant_logging::{LogBuilder, VerbosityLevel};
use ant_naming_sim::{SimulationConfig, run_chunk_simulation, run_name_distances, wall_clock_seed};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::io::Write;
use tracing::Level;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cmd::parse();

    let mut log_builder = get_log_builder();
    log_builder
        .output_dest(args.log_output_dest.clone())
        .format(args.log_format)
        .print_updates_to_stderr(args.verbose > 0);
    if args.verbose > 0 {
        log_builder.verbosity(VerbosityLevel::from(args.verbose));
    }
    let _log_guard = log_builder.initialize()?;

    let seed = match args.seed {
        Some(seed) => seed,
        None => {
            let seed = wall_clock_seed();
            tracing::info!("No seed given, using {seed}");
            seed
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &args.cmd {
        SubCmd::Chunks { params } => {
            let config = load_config(&args, params)?;
            let report = run_chunk_simulation(&config, seed)?;
            if args.json {
                report.write_json(&mut out)?;
            } else {
                report.write_csv(&mut out)?;
            }
        }
        SubCmd::Names { params } => {
            let config = load_config(&args, params)?;
            let report = run_name_distances(&config, seed)?;
            if args.json {
                report.write_json(&mut out)?;
            } else {
                report.write_text(&mut out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Defaults, then the config file if given, then the command line flags.
fn load_config(args: &Cmd, params: &SimParams) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)
            .wrap_err_with(|| format!("Failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    params.apply(&mut config);
    tracing::debug!("Effective configuration: {config:?}");
    Ok(config)
}

fn get_log_builder() -> LogBuilder {
    let logging_targets = vec![
        ("vaultsim".to_string(), Level::INFO),
        ("ant_naming_sim".to_string(), Level::INFO),
    ];
    LogBuilder::new(logging_targets)
}
