// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{
    config::SimulationConfig,
    error::{Error, Result},
    naming::NamingStrategy,
    placement::place_chunks,
    population::Population,
    report::{NameDistanceReport, SimulationReport},
};
use rand::{SeedableRng, rngs::SmallRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Seed taken from the wall clock, for runs without an explicit one.
pub fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// Bootstrap the population, churn it, route every chunk and summarise the loads.
///
/// The same `config` and `seed` always produce the same report.
pub fn run_chunk_simulation(config: &SimulationConfig, seed: u64) -> Result<SimulationReport> {
    config.validate()?;
    info!("Running chunk simulation with seed {seed}: {config:?}");

    let mut rng = SmallRng::seed_from_u64(seed);
    let strategy = NamingStrategy::from_config(config);
    let mut population = Population::bootstrap(config, &strategy, &mut rng);
    place_chunks(&mut population, config, &mut rng);

    let report = SimulationReport::new(seed, config, &population)?;
    let summary = &report.load_summary;
    info!(
        "Load per vault: min {:.3}, max {:.3}, mean {:.3}",
        summary.min, summary.max, summary.mean
    );
    info!("Standard deviation of spacings: {}", report.spacing_std_dev);
    Ok(report)
}

/// Name `total_nodes` vaults with the configured strategy and report how evenly they spread.
/// No relocations or chunks are involved.
pub fn run_name_distances(config: &SimulationConfig, seed: u64) -> Result<NameDistanceReport> {
    if config.total_nodes == 0 {
        return Err(Error::InvalidConfig(
            "total_nodes must be at least 1".to_string(),
        ));
    }
    info!(
        "Running name distance study with seed {seed}: {} names, {} strategy, {} spacing",
        config.total_nodes, config.naming_strategy, config.spacing_metric
    );

    let mut rng = SmallRng::seed_from_u64(seed);
    let strategy = NamingStrategy::from_config(config);
    let mut population = Population::new(config.storage_units);
    for _ in 0..config.total_nodes {
        let name = population.add_new_node(&strategy, &mut rng);
        trace!("Added vault {name:016x}");
    }

    let report = NameDistanceReport::new(seed, config, &population.sorted_names())?;
    info!("Standard deviation of distances: {}", report.spacing_std_dev);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::StorageUnits, naming::NamingStrategyKind, population::Stored,
        space::SpacingMetric,
    };

    fn small_config() -> SimulationConfig {
        SimulationConfig {
            total_nodes: 12,
            total_chunks: 500,
            group_size: 3,
            relocations: 10,
            ..Default::default()
        }
    }

    #[test]
    fn same_seed_same_report() -> Result<()> {
        let config = small_config();
        let first = run_chunk_simulation(&config, 2024)?;
        let second = run_chunk_simulation(&config, 2024)?;

        let loads = |report: &SimulationReport| -> Vec<(String, Stored)> {
            report
                .vaults
                .iter()
                .map(|vault| (vault.name.clone(), vault.stored))
                .collect()
        };
        assert_eq!(loads(&first), loads(&second));
        assert_eq!(first.spacing_std_dev, second.spacing_std_dev);
        Ok(())
    }

    #[test]
    fn uniform_linear_end_to_end() -> Result<()> {
        let config = SimulationConfig {
            total_nodes: 4,
            total_chunks: 8,
            group_size: 1,
            relocations: 100,
            naming_strategy: NamingStrategyKind::Uniform,
            spacing_metric: SpacingMetric::Linear,
            storage_units: StorageUnits::Chunks,
        };
        let report = run_chunk_simulation(&config, 1)?;

        let names: Vec<&str> = report.vaults.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "0000000000000000",
                "4000000000000000",
                "8000000000000000",
                "c000000000000000"
            ]
        );
        let total: u64 = report
            .vaults
            .iter()
            .map(|vault| match vault.stored {
                Stored::Chunks(count) => count,
                Stored::Megabytes(_) => 0,
            })
            .sum();
        assert_eq!(total, 8);
        Ok(())
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let config = SimulationConfig {
            total_nodes: 2,
            group_size: 3,
            ..Default::default()
        };
        assert!(matches!(
            run_chunk_simulation(&config, 0),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn name_study_ignores_group_size() -> Result<()> {
        let config = SimulationConfig {
            total_nodes: 5,
            group_size: 8,
            naming_strategy: NamingStrategyKind::QuietestHalf,
            ..Default::default()
        };
        let report = run_name_distances(&config, 3)?;
        assert_eq!(report.total_names, 5);
        assert_eq!(report.names.len(), 5);
        assert!(report.names.iter().all(|name| name.len() == 7));
        Ok(())
    }

    #[test]
    fn name_study_needs_names() {
        let config = SimulationConfig {
            total_nodes: 0,
            ..Default::default()
        };
        assert!(matches!(
            run_name_distances(&config, 3),
            Err(Error::InvalidConfig(_))
        ));
    }
}
