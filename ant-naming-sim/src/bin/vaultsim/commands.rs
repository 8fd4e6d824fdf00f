// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use ant_logging::{LogFormat, LogOutputDest};
use ant_naming_sim::{NamingStrategyKind, SimulationConfig, SpacingMetric, StorageUnits};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cmd {
    /// Available sub commands.
    #[clap(subcommand)]
    pub cmd: SubCmd,

    /// Seed for the random number generator.
    ///
    /// Runs with the same seed and parameters produce identical reports. When omitted, the seed is
    /// taken from the wall clock and printed with the report.
    #[clap(long, global = true)]
    pub seed: Option<u64>,

    /// Path to a JSON file with simulation parameters.
    ///
    /// Missing fields take their defaults. Flags given on the command line override the file.
    #[clap(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the report as JSON instead of text.
    #[clap(long, global = true)]
    pub json: bool,

    /// Specify the logging output destination.
    ///
    /// Valid values are "stdout", "stderr", or a custom path. A path ending in ".log" is used as
    /// the log file, any other path is used as a directory for daily log files.
    ///
    /// The default is "stderr", which keeps the report on stdout clean.
    #[clap(long, global = true, value_parser = LogOutputDest::parse_from_str, default_value = "stderr", verbatim_doc_comment)]
    pub log_output_dest: LogOutputDest,

    /// Specify the logging format.
    ///
    /// Valid values are "default" or "json".
    #[clap(long, global = true, value_parser = LogFormat::parse_from_str, default_value = "default")]
    pub log_format: LogFormat,

    /// Set the verbosity level. Repeat for more detail, e.g. -vv.
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum SubCmd {
    /// Name vaults, relocate them, then route chunks to their close groups and report the load per
    /// vault.
    #[clap(name = "chunks")]
    Chunks {
        #[command(flatten)]
        params: SimParams,
    },
    /// Only name the vaults and report how evenly the names spread.
    #[clap(name = "names")]
    Names {
        #[command(flatten)]
        params: SimParams,
    },
}

/// Overrides for the simulation parameters.
#[derive(Args, Debug, Default)]
pub struct SimParams {
    /// Number of vaults in the network.
    #[clap(long)]
    pub total_nodes: Option<usize>,

    /// Number of chunks to store.
    #[clap(long)]
    pub total_chunks: Option<usize>,

    /// Number of closest vaults that store each chunk.
    #[clap(long)]
    pub group_size: Option<usize>,

    /// Number of relocations applied after the initial naming.
    ///
    /// Ignored by the uniform strategy.
    #[clap(long)]
    pub relocations: Option<usize>,

    /// Strategy used to pick new vault names.
    #[clap(long, value_enum)]
    pub naming_strategy: Option<NamingStrategyKind>,

    /// Metric used to measure gaps and closeness between names.
    #[clap(long, value_enum)]
    pub spacing_metric: Option<SpacingMetric>,

    /// Unit that vault loads are counted in.
    #[clap(long, value_enum)]
    pub storage_units: Option<StorageUnits>,
}

impl SimParams {
    /// Apply the given flags on top of `config`.
    pub fn apply(&self, config: &mut SimulationConfig) {
        if let Some(total_nodes) = self.total_nodes {
            config.total_nodes = total_nodes;
        }
        if let Some(total_chunks) = self.total_chunks {
            config.total_chunks = total_chunks;
        }
        if let Some(group_size) = self.group_size {
            config.group_size = group_size;
        }
        if let Some(relocations) = self.relocations {
            config.relocations = relocations;
        }
        if let Some(naming_strategy) = self.naming_strategy {
            config.naming_strategy = naming_strategy;
        }
        if let Some(spacing_metric) = self.spacing_metric {
            config.spacing_metric = spacing_metric;
        }
        if let Some(storage_units) = self.storage_units {
            config.storage_units = storage_units;
        }
    }
}
