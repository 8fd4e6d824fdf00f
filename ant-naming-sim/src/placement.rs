// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Routing of chunks to the close group of vaults.

use crate::{
    config::{SimulationConfig, StorageUnits},
    population::{Node, Population},
    space::SpacingMetric,
};
use rand::Rng;

/// Cumulative probability bounds of the observed chunk size histogram, one bucket per 0.1 MB.
/// Anything above the last bound is a full 1 MB chunk.
const CHUNK_SIZE_BUCKETS: [f64; 10] = [
    0.709159, 0.774634, 0.777539, 0.778139, 0.778459, 0.779100, 0.779342, 0.779450, 0.779588,
    0.779730,
];
const BUCKET_WIDTH_MB: f64 = 0.1;
const MAX_CHUNK_SIZE_MB: f64 = 1.0;

/// Draw a chunk size in MB following the observed traffic histogram.
pub fn random_chunk_size<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let i: f64 = rng.gen();
    match CHUNK_SIZE_BUCKETS.iter().position(|&bound| i < bound) {
        Some(bucket) => {
            let within: f64 = rng.gen();
            (bucket as f64 + within) * BUCKET_WIDTH_MB
        }
        None => MAX_CHUNK_SIZE_MB,
    }
}

/// Finds the close group of a chunk, reusing its ranking buffer between chunks.
pub struct ChunkRouter {
    metric: SpacingMetric,
    group_size: usize,
    ranking: Vec<(u64, u64, usize)>,
}

impl ChunkRouter {
    pub fn new(metric: SpacingMetric, group_size: usize) -> Self {
        Self {
            metric,
            group_size,
            ranking: Vec::new(),
        }
    }

    /// Indices into `nodes` of the `group_size` vaults closest to `chunk`, closest first.
    ///
    /// Vaults are ranked by distance to the chunk, ties broken by name, so the group is the same
    /// as the head of a full sort.
    pub fn closest_group(&mut self, nodes: &[Node], chunk: u64) -> &[(u64, u64, usize)] {
        let metric = self.metric;
        self.ranking.clear();
        self.ranking.extend(
            nodes
                .iter()
                .enumerate()
                .map(|(index, node)| (metric.distance(node.name, chunk), node.name, index)),
        );

        let group_size = self.group_size.min(self.ranking.len());
        if group_size == 0 {
            return &[];
        }
        if group_size < self.ranking.len() {
            self.ranking.select_nth_unstable(group_size - 1);
        }
        let group = &mut self.ranking[..group_size];
        group.sort_unstable();
        group
    }
}

/// Route `config.total_chunks` random chunks, crediting each to its close group.
///
/// With megabyte units every vault in the group is credited an independently drawn size.
pub fn place_chunks<R: Rng + ?Sized>(
    population: &mut Population,
    config: &SimulationConfig,
    rng: &mut R,
) {
    let mut router = ChunkRouter::new(config.spacing_metric, config.group_size);
    let units = population.units();
    let progress_step = (config.total_chunks / 10).max(1);

    for placed in 0..config.total_chunks {
        let chunk: u64 = rng.gen();
        let nodes = population.nodes_mut();
        let group: Vec<usize> = router
            .closest_group(nodes, chunk)
            .iter()
            .map(|&(_, _, index)| index)
            .collect();
        for index in group {
            // Each holder draws its own size.
            let size_mb = match units {
                StorageUnits::Chunks => 1.0,
                StorageUnits::Megabytes => random_chunk_size(rng),
            };
            if let Some(node) = nodes.get_mut(index) {
                node.stored.record(size_mb);
            }
        }

        if (placed + 1) % progress_step == 0 {
            info!("Placed {}/{} chunks", placed + 1, config.total_chunks);
        }
    }
}
