// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Distances within the 64-bit vault namespace.

use crate::error::Error;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// How the gap between two names is measured.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum SpacingMetric {
    /// Plain numeric difference.
    Linear,
    /// Kademlia style XOR distance.
    #[value(name = "xordistance")]
    XorDistance,
}

impl SpacingMetric {
    /// Parse a metric name, failing with a configuration error on anything unknown.
    pub fn parse(name: &str) -> Result<Self, Error> {
        name.parse()
            .map_err(|_| Error::UnknownSpacingMetric(name.to_string()))
    }

    /// Gap between `big` and `small`, where `big >= small` in namespace order.
    ///
    /// Linear spacing wraps rather than panics if the order is violated.
    pub fn spacing(&self, big: u64, small: u64) -> u64 {
        match self {
            SpacingMetric::Linear => big.wrapping_sub(small),
            SpacingMetric::XorDistance => big ^ small,
        }
    }

    /// Symmetric distance used to rank vaults against a chunk.
    pub fn distance(&self, a: u64, b: u64) -> u64 {
        match self {
            SpacingMetric::Linear => a.abs_diff(b),
            SpacingMetric::XorDistance => a ^ b,
        }
    }
}

/// All gaps across the namespace for an ascending list of names.
///
/// Yields the gap from 0 to the first name, every consecutive gap, then the gap from the last
/// name to `u64::MAX`, so the result always has `names.len() + 1` entries.
pub fn all_spacings(metric: SpacingMetric, sorted_names: &[u64]) -> Vec<u64> {
    let mut spacings = Vec::with_capacity(sorted_names.len() + 1);
    let mut previous = 0;
    for &name in sorted_names {
        spacings.push(metric.spacing(name, previous));
        previous = name;
    }
    spacings.push(metric.spacing(u64::MAX, previous));
    spacings
}
