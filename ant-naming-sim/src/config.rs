// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Simulation parameters.

use crate::{
    error::{Error, Result},
    naming::NamingStrategyKind,
    space::SpacingMetric,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{Display, EnumIter, EnumString};

pub const DEFAULT_TOTAL_NODES: usize = 100;
pub const DEFAULT_TOTAL_CHUNKS: usize = 1_000_000;
pub const DEFAULT_GROUP_SIZE: usize = 8;
pub const DEFAULT_RELOCATIONS: usize = 100;

/// What a vault's load is counted in.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageUnits {
    /// One per chunk stored.
    #[default]
    Chunks,
    /// Chunk sizes drawn from observed traffic, in MB.
    Megabytes,
}

impl StorageUnits {
    pub fn parse(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| Error::UnknownStorageUnits(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationConfig {
    pub total_nodes: usize,
    pub total_chunks: usize,
    pub group_size: usize,
    pub relocations: usize,
    pub naming_strategy: NamingStrategyKind,
    pub spacing_metric: SpacingMetric,
    pub storage_units: StorageUnits,
}

/// Config file contents as written. Enum names stay strings so an unknown one is reported with
/// its own error variant.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    total_nodes: Option<usize>,
    total_chunks: Option<usize>,
    group_size: Option<usize>,
    relocations: Option<usize>,
    naming_strategy: Option<String>,
    spacing_metric: Option<String>,
    storage_units: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_nodes: DEFAULT_TOTAL_NODES,
            total_chunks: DEFAULT_TOTAL_CHUNKS,
            group_size: DEFAULT_GROUP_SIZE,
            relocations: DEFAULT_RELOCATIONS,
            naming_strategy: NamingStrategyKind::BestFit,
            spacing_metric: SpacingMetric::XorDistance,
            storage_units: StorageUnits::Chunks,
        }
    }
}

impl SimulationConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    ///
    /// Unknown strategy, metric or unit names are reported with the matching error variant.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(contents)?;
        let defaults = Self::default();

        let naming_strategy = match file.naming_strategy.as_deref() {
            Some(name) => NamingStrategyKind::parse(name)?,
            None => defaults.naming_strategy,
        };
        let spacing_metric = match file.spacing_metric.as_deref() {
            Some(name) => SpacingMetric::parse(name)?,
            None => defaults.spacing_metric,
        };
        let storage_units = match file.storage_units.as_deref() {
            Some(name) => StorageUnits::parse(name)?,
            None => defaults.storage_units,
        };

        Ok(Self {
            total_nodes: file.total_nodes.unwrap_or(defaults.total_nodes),
            total_chunks: file.total_chunks.unwrap_or(defaults.total_chunks),
            group_size: file.group_size.unwrap_or(defaults.group_size),
            relocations: file.relocations.unwrap_or(defaults.relocations),
            naming_strategy,
            spacing_metric,
            storage_units,
        })
    }

    /// Reject parameters the simulation cannot honour, before any work is done.
    pub fn validate(&self) -> Result<()> {
        if self.total_nodes == 0 {
            return Err(Error::InvalidConfig(
                "total_nodes must be at least 1".to_string(),
            ));
        }
        if self.group_size == 0 {
            return Err(Error::InvalidConfig(
                "group_size must be at least 1".to_string(),
            ));
        }
        if self.group_size > self.total_nodes {
            return Err(Error::InvalidConfig(format!(
                "group_size ({}) cannot exceed total_nodes ({})",
                self.group_size, self.total_nodes
            )));
        }
        Ok(())
    }

    /// Relocations only apply to strategies that depend on the current names.
    pub fn effective_relocations(&self) -> usize {
        match self.naming_strategy {
            NamingStrategyKind::Uniform => 0,
            _ => self.relocations,
        }
    }
}
