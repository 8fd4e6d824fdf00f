// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{config::SimulationConfig, config::StorageUnits, naming::NamingStrategy};
use rand::Rng;
use serde::Serialize;

/// Load accumulated by a vault during chunk placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Stored {
    Chunks(u64),
    Megabytes(f64),
}

impl Stored {
    pub fn empty(units: StorageUnits) -> Self {
        match units {
            StorageUnits::Chunks => Stored::Chunks(0),
            StorageUnits::Megabytes => Stored::Megabytes(0.0),
        }
    }

    /// Record one chunk of `size_mb`. Chunk counts ignore the size.
    pub fn record(&mut self, size_mb: f64) {
        match self {
            Stored::Chunks(count) => *count += 1,
            Stored::Megabytes(total) => *total += size_mb,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Stored::Chunks(count) => *count as f64,
            Stored::Megabytes(total) => *total,
        }
    }
}

impl std::fmt::Display for Stored {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stored::Chunks(count) => write!(f, "{count}"),
            Stored::Megabytes(total) => write!(f, "{total:.6}"),
        }
    }
}

/// A vault in the simulated namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: u64,
    pub stored: Stored,
}

impl Node {
    pub fn new(name: u64, units: StorageUnits) -> Self {
        Self {
            name,
            stored: Stored::empty(units),
        }
    }
}

/// The set of vaults, in no particular order.
#[derive(Debug, Clone)]
pub struct Population {
    nodes: Vec<Node>,
    units: StorageUnits,
}

impl Population {
    pub fn new(units: StorageUnits) -> Self {
        Self {
            nodes: Vec::new(),
            units,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_nodes(nodes: Vec<Node>, units: StorageUnits) -> Self {
        Self { nodes, units }
    }

    /// Build `total_nodes` vaults with `strategy`, then churn them with relocations unless the
    /// strategy is uniform.
    pub fn bootstrap<R: Rng + ?Sized>(
        config: &SimulationConfig,
        strategy: &NamingStrategy,
        rng: &mut R,
    ) -> Self {
        let mut population = Self::new(config.storage_units);
        for _ in 0..config.total_nodes {
            let name = population.add_new_node(strategy, rng);
            trace!("Added vault {name:016x}");
        }
        debug!(
            "Bootstrapped {} vaults with the {} strategy",
            population.len(),
            strategy.kind()
        );

        let relocations = config.effective_relocations();
        for _ in 0..relocations {
            population.relocate(strategy, rng);
        }
        if relocations > 0 {
            debug!("Completed {relocations} relocations");
        }
        population
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn units(&self) -> StorageUnits {
        self.units
    }

    /// All names in ascending order.
    pub fn sorted_names(&self) -> Vec<u64> {
        let mut names: Vec<u64> = self.nodes.iter().map(|node| node.name).collect();
        names.sort_unstable();
        names
    }

    /// Nodes in ascending name order.
    pub fn sorted_by_name(&self) -> Vec<Node> {
        let mut nodes = self.nodes.clone();
        nodes.sort_by_key(|node| node.name);
        nodes
    }

    /// Ask `strategy` for a name and add an empty vault under it.
    pub fn add_new_node<R: Rng + ?Sized>(&mut self, strategy: &NamingStrategy, rng: &mut R) -> u64 {
        let names = self.sorted_names();
        let name = strategy.next_name(&names, rng);
        self.nodes.push(Node::new(name, self.units));
        name
    }

    /// Remove a vault chosen uniformly at random.
    pub fn remove_random_node<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Node> {
        if self.nodes.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.nodes.len());
        Some(self.nodes.remove(index))
    }

    /// Replace a random vault with a newly named one. The size is unchanged afterwards.
    pub fn relocate<R: Rng + ?Sized>(&mut self, strategy: &NamingStrategy, rng: &mut R) {
        let removed = self.remove_random_node(rng);
        let added = self.add_new_node(strategy, rng);
        if let Some(removed) = removed {
            trace!("Relocated vault {:016x} to {added:016x}", removed.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{naming::NamingStrategyKind, space::SpacingMetric};
    use rand::{SeedableRng, rngs::SmallRng};

    fn config(strategy: NamingStrategyKind) -> SimulationConfig {
        SimulationConfig {
            total_nodes: 16,
            total_chunks: 0,
            group_size: 4,
            relocations: 30,
            naming_strategy: strategy,
            spacing_metric: SpacingMetric::XorDistance,
            storage_units: StorageUnits::Chunks,
        }
    }

    #[test]
    fn bootstrap_builds_exactly_total_nodes() {
        let mut rng = SmallRng::seed_from_u64(1);
        for kind in [
            NamingStrategyKind::Uniform,
            NamingStrategyKind::Random,
            NamingStrategyKind::BestFit,
            NamingStrategyKind::QuietestHalf,
            NamingStrategyKind::EmptySubsection,
        ] {
            let config = config(kind);
            let strategy = NamingStrategy::from_config(&config);
            let population = Population::bootstrap(&config, &strategy, &mut rng);
            assert_eq!(population.len(), 16, "{kind}");
            assert!(population
                .nodes()
                .iter()
                .all(|node| node.stored == Stored::Chunks(0)));
        }
    }

    #[test]
    fn relocation_keeps_population_size() {
        let mut rng = SmallRng::seed_from_u64(2);
        let config = config(NamingStrategyKind::Random);
        let strategy = NamingStrategy::from_config(&config);
        let mut population = Population::bootstrap(&config, &strategy, &mut rng);
        for _ in 0..50 {
            let before = population.sorted_names();
            population.relocate(&strategy, &mut rng);
            assert_eq!(population.len(), config.total_nodes);
            assert_ne!(population.sorted_names(), before);
        }
    }

    #[test]
    fn remove_from_empty_population_is_none() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut population = Population::new(StorageUnits::Chunks);
        assert!(population.remove_random_node(&mut rng).is_none());
        assert!(population.is_empty());
    }

    #[test]
    fn sorted_views_are_ascending() {
        let mut rng = SmallRng::seed_from_u64(4);
        let config = config(NamingStrategyKind::Random);
        let population = Population::bootstrap(&config, &NamingStrategy::Random, &mut rng);
        let names = population.sorted_names();
        assert!(names.windows(2).all(|pair| pair[0] <= pair[1]));
        let by_name: Vec<u64> = population
            .sorted_by_name()
            .iter()
            .map(|node| node.name)
            .collect();
        assert_eq!(by_name, names);
    }

    #[test]
    fn stored_records_per_unit() {
        let mut chunks = Stored::empty(StorageUnits::Chunks);
        chunks.record(0.7);
        chunks.record(0.2);
        assert_eq!(chunks, Stored::Chunks(2));
        assert_eq!(chunks.to_string(), "2");

        let mut megabytes = Stored::empty(StorageUnits::Megabytes);
        megabytes.record(0.5);
        megabytes.record(0.25);
        assert_eq!(megabytes, Stored::Megabytes(0.75));
        assert_eq!(megabytes.to_string(), "0.750000");
    }
}
