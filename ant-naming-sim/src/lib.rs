// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

// Allow enum variant names (comes from thiserror derives)
#![allow(clippy::enum_variant_names)]

//! Vault naming simulator
//!
//! Models how a 64-bit namespace of vault names fills up under different naming strategies, and
//! how evenly chunks spread across vaults when each chunk is stored by the group of vaults
//! closest to it.
//!
//! - Naming strategies: uniform, random, best-fit, quietest-half and empty-subsection
//! - Linear or XOR spacing between names
//! - Relocation churn before chunks are placed
//! - Per-vault load reported as chunk counts or megabytes

#[macro_use]
extern crate tracing;

pub mod config;
pub mod error;
pub mod naming;
pub mod placement;
pub mod population;
pub mod report;
pub mod simulation;
pub mod space;
pub mod stats;

pub use config::{SimulationConfig, StorageUnits};
pub use error::{Error, Result};
pub use naming::{NamingStrategy, NamingStrategyKind};
pub use population::{Node, Population, Stored};
pub use report::{NameDistanceReport, SimulationReport};
pub use simulation::{run_chunk_simulation, run_name_distances, wall_clock_seed};
pub use space::SpacingMetric;
