// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Final summaries of a run, rendered as the CSV-like text stream or as JSON.

use crate::{
    config::{SimulationConfig, StorageUnits},
    error::Result,
    population::{Population, Stored},
    space::{SpacingMetric, all_spacings},
    stats::standard_deviation,
};
use serde::Serialize;
use std::io::Write;

const BASE32_DIGITS: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";
/// Base-32 digits needed for any u64.
const BASE32_U64_WIDTH: usize = 13;
/// Leading base-32 digits kept when displaying a name.
const BASE32_DISPLAY_WIDTH: usize = 7;

/// 16 zero-padded lowercase hex digits.
pub fn hex_name(name: u64) -> String {
    format!("{name:016x}")
}

/// First 7 digits of the zero-padded base-32 rendering.
pub fn base32_name(name: u64) -> String {
    let mut digits = [b'0'; BASE32_U64_WIDTH];
    let mut remaining = name;
    for slot in digits.iter_mut().rev() {
        *slot = BASE32_DIGITS[(remaining % 32) as usize];
        remaining /= 32;
    }
    digits[..BASE32_DISPLAY_WIDTH]
        .iter()
        .map(|&digit| char::from(digit))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct VaultLoad {
    pub name: String,
    pub stored: Stored,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl LoadSummary {
    fn from_vaults(vaults: &[VaultLoad]) -> Self {
        let loads: Vec<f64> = vaults.iter().map(|vault| vault.stored.as_f64()).collect();
        let min = loads.iter().copied().fold(f64::INFINITY, f64::min);
        let max = loads.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = if loads.is_empty() {
            0.0
        } else {
            loads.iter().sum::<f64>() / loads.len() as f64
        };
        Self { min, max, mean }
    }
}

/// Outcome of a full chunk placement run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub seed: u64,
    pub config: SimulationConfig,
    pub vaults: Vec<VaultLoad>,
    pub load_summary: LoadSummary,
    pub spacing_std_dev: u64,
}

impl SimulationReport {
    pub fn new(seed: u64, config: &SimulationConfig, population: &Population) -> Result<Self> {
        let nodes = population.sorted_by_name();
        let names: Vec<u64> = nodes.iter().map(|node| node.name).collect();
        let spacing_std_dev = standard_deviation(&all_spacings(config.spacing_metric, &names))?;

        let vaults: Vec<VaultLoad> = nodes
            .iter()
            .map(|node| VaultLoad {
                name: hex_name(node.name),
                stored: node.stored,
            })
            .collect();
        let load_summary = LoadSummary::from_vaults(&vaults);

        Ok(Self {
            seed,
            config: config.clone(),
            vaults,
            load_summary,
            spacing_std_dev,
        })
    }

    pub fn write_csv<W: Write>(&self, out: &mut W) -> Result<()> {
        let config = &self.config;
        writeln!(out, "seed,{}", self.seed)?;
        writeln!(out, "totalNodes,{}", config.total_nodes)?;
        writeln!(out, "totalChunks,{}", config.total_chunks)?;
        writeln!(out, "groupSize,{}", config.group_size)?;
        writeln!(out, "namingStrategy,{}", config.naming_strategy)?;
        writeln!(out, "spacingStrategy,{}", config.spacing_metric)?;
        writeln!(out, "relocations,{}", config.relocations)?;
        writeln!(out, "storageUnits,{}", config.storage_units)?;
        writeln!(out)?;

        let column = match config.storage_units {
            StorageUnits::Chunks => "chunks stored",
            StorageUnits::Megabytes => "megabytes stored",
        };
        writeln!(out, "vault name,{column}")?;
        for vault in &self.vaults {
            writeln!(out, "{},{}", vault.name, vault.stored)?;
        }

        writeln!(out)?;
        writeln!(out, "Standard deviation of spacings:")?;
        writeln!(out, "{}", self.spacing_std_dev)?;
        Ok(())
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Outcome of the name-only study: where names land and how evenly.
#[derive(Debug, Clone, Serialize)]
pub struct NameDistanceReport {
    pub seed: u64,
    pub total_names: usize,
    pub naming_strategy: String,
    pub spacing_metric: SpacingMetric,
    pub names: Vec<String>,
    pub spacing_std_dev: u64,
}

impl NameDistanceReport {
    pub fn new(seed: u64, config: &SimulationConfig, sorted_names: &[u64]) -> Result<Self> {
        let spacing_std_dev =
            standard_deviation(&all_spacings(config.spacing_metric, sorted_names))?;
        Ok(Self {
            seed,
            total_names: sorted_names.len(),
            naming_strategy: config.naming_strategy.to_string(),
            spacing_metric: config.spacing_metric,
            names: sorted_names.iter().map(|&name| base32_name(name)).collect(),
            spacing_std_dev,
        })
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Seed is {}", self.seed)?;
        writeln!(out)?;
        writeln!(out, "Names (base32):")?;
        for name in &self.names {
            writeln!(out, "{name}")?;
        }
        writeln!(out)?;
        writeln!(out, "Standard deviation of distances:")?;
        writeln!(out, "{}", self.spacing_std_dev)?;
        Ok(())
    }

    pub fn write_json<W: Write>(&self, out: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}
