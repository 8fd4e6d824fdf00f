// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Strategies for choosing where a new vault name lands in the namespace.
//!
//! The sampling strategies draw a uniform `u64` from their target range, which gives the same
//! distribution as drawing from the whole namespace and rejecting names outside the range, but
//! in constant time. This matters for best fit under XOR spacing: the gap with the largest XOR
//! spacing can straddle a high bit while being numerically tiny.

use crate::{config::SimulationConfig, error::Error, space::SpacingMetric};
use rand::Rng;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// Midpoint dividing the namespace into two halves.
pub const HALFWAY: u64 = 1 << 63;

/// Naming strategy as selected in configuration.
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
pub enum NamingStrategyKind {
    Uniform,
    Random,
    #[value(name = "bestfit")]
    BestFit,
    #[value(name = "quietesthalf")]
    QuietestHalf,
    #[value(name = "emptysubsection")]
    EmptySubsection,
}

impl NamingStrategyKind {
    /// Parse a strategy name, failing with a configuration error on anything unknown.
    pub fn parse(name: &str) -> Result<Self, Error> {
        name.parse()
            .map_err(|_| Error::UnknownNamingStrategy(name.to_string()))
    }
}

/// A naming strategy together with whatever it needs to propose the next name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingStrategy {
    /// Evenly spaced names, `floor(2^64 * current / target_size)`.
    Uniform { target_size: usize },
    /// Any name at all.
    Random,
    /// Middle third of the largest gap, gaps measured with `metric`.
    BestFit { metric: SpacingMetric },
    /// Anywhere in the half of the namespace holding fewer names.
    QuietestHalf,
    /// Anywhere in a range that holds no names, at the coarsest granularity where one exists.
    EmptySubsection,
}

impl NamingStrategy {
    pub fn from_config(config: &SimulationConfig) -> Self {
        match config.naming_strategy {
            NamingStrategyKind::Uniform => NamingStrategy::Uniform {
                target_size: config.total_nodes,
            },
            NamingStrategyKind::Random => NamingStrategy::Random,
            NamingStrategyKind::BestFit => NamingStrategy::BestFit {
                metric: config.spacing_metric,
            },
            NamingStrategyKind::QuietestHalf => NamingStrategy::QuietestHalf,
            NamingStrategyKind::EmptySubsection => NamingStrategy::EmptySubsection,
        }
    }

    pub fn kind(&self) -> NamingStrategyKind {
        match self {
            NamingStrategy::Uniform { .. } => NamingStrategyKind::Uniform,
            NamingStrategy::Random => NamingStrategyKind::Random,
            NamingStrategy::BestFit { .. } => NamingStrategyKind::BestFit,
            NamingStrategy::QuietestHalf => NamingStrategyKind::QuietestHalf,
            NamingStrategy::EmptySubsection => NamingStrategyKind::EmptySubsection,
        }
    }

    /// Propose the next name given the current names in ascending order.
    pub fn next_name<R: Rng + ?Sized>(&self, sorted_names: &[u64], rng: &mut R) -> u64 {
        match self {
            NamingStrategy::Uniform { target_size } => {
                uniform_name(sorted_names.len(), *target_size)
            }
            NamingStrategy::Random => rng.gen(),
            NamingStrategy::BestFit { metric } => best_fit_name(*metric, sorted_names, rng),
            NamingStrategy::QuietestHalf => quietest_half_name(sorted_names, rng),
            NamingStrategy::EmptySubsection => empty_subsection_name(sorted_names, rng),
        }
    }
}

/// `floor(2^64 * current / target)`, saturating once `current` reaches `target`.
pub fn uniform_name(current: usize, target_size: usize) -> u64 {
    if target_size == 0 {
        return 0;
    }
    let scaled = (u128::from(current as u64) << 64) / u128::from(target_size as u64);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// Bounds `(low, high)` of the largest gap, boundaries included. The first gap wins ties.
pub fn largest_gap(metric: SpacingMetric, sorted_names: &[u64]) -> (u64, u64) {
    let mut max_spacing = 0;
    let mut bounds = (0, u64::MAX);
    let mut previous = 0;
    let upper_ends = sorted_names.iter().copied().chain(std::iter::once(u64::MAX));
    for (i, name) in upper_ends.enumerate() {
        let spacing = metric.spacing(name, previous);
        if i == 0 || spacing > max_spacing {
            max_spacing = spacing;
            bounds = (previous, name);
        }
        previous = name;
    }
    bounds
}

/// Shrink `(low, high)` by a third of its width at each end.
pub fn narrow_gap(low: u64, high: u64) -> (u64, u64) {
    let margin = (high - low) / 3;
    (low + margin, high - margin)
}

fn best_fit_name<R: Rng + ?Sized>(metric: SpacingMetric, sorted_names: &[u64], rng: &mut R) -> u64 {
    if sorted_names.is_empty() {
        return rng.gen();
    }

    let (low, high) = largest_gap(metric, sorted_names);
    let (low, high) = narrow_gap(low, high);
    strictly_between(low, high, rng)
}

/// Uniform name in `(low, high)`, or the midpoint when that range holds nothing.
pub fn strictly_between<R: Rng + ?Sized>(low: u64, high: u64, rng: &mut R) -> u64 {
    if high.saturating_sub(low) < 2 {
        // Only reachable once repeated insertions have exhausted the gap.
        return low + (high.saturating_sub(low)) / 2;
    }
    rng.gen_range(low + 1..high)
}

/// `(first_half, second_half)` counts, split at [`HALFWAY`].
pub fn half_counts(names: &[u64]) -> (usize, usize) {
    let first = names.iter().filter(|&&name| name < HALFWAY).count();
    (first, names.len() - first)
}

fn quietest_half_name<R: Rng + ?Sized>(names: &[u64], rng: &mut R) -> u64 {
    let (first, second) = half_counts(names);
    // Equal halves go to the second half.
    if first < second {
        rng.gen_range(0..HALFWAY)
    } else {
        rng.gen_range(HALFWAY..=u64::MAX)
    }
}

/// Index of the subsection holding `name` when the namespace is split into `2^depth` parts.
fn subsection_index(name: u64, depth: u32) -> u64 {
    if depth == 0 {
        0
    } else {
        name >> (64 - depth)
    }
}

/// Inclusive bounds of subsection `index` at `depth`. Consecutive subsections tile the namespace.
pub fn subsection_bounds(index: u64, depth: u32) -> (u64, u64) {
    let width = 1u128 << (64 - depth);
    let start = u128::from(index) * width;
    let end = start + width - 1;
    (
        u64::try_from(start).unwrap_or(u64::MAX),
        u64::try_from(end).unwrap_or(u64::MAX),
    )
}

/// The shallowest depth at which some subsection holds no name, with the indices of all empty
/// subsections at that depth.
///
/// A depth with more subsections than names always has an empty one, so the search stops by
/// `depth = log2(n) + 1`.
pub fn empty_subsections(names: &[u64]) -> (u32, Vec<u64>) {
    let mut depth = 0;
    loop {
        let mut occupied = vec![false; 1usize << depth];
        for &name in names {
            occupied[subsection_index(name, depth) as usize] = true;
        }
        let empty: Vec<u64> = occupied
            .iter()
            .enumerate()
            .filter(|(_, taken)| !**taken)
            .map(|(index, _)| index as u64)
            .collect();
        if !empty.is_empty() {
            return (depth, empty);
        }
        depth += 1;
    }
}

fn empty_subsection_name<R: Rng + ?Sized>(names: &[u64], rng: &mut R) -> u64 {
    let (depth, empty) = empty_subsections(names);
    let index = empty[rng.gen_range(0..empty.len())];
    let (start, end) = subsection_bounds(index, depth);
    rng.gen_range(start..=end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5afe)
    }

    #[test]
    fn parse_strategy_names() {
        assert_eq!(
            NamingStrategyKind::parse("bestfit").ok(),
            Some(NamingStrategyKind::BestFit)
        );
        assert_eq!(
            NamingStrategyKind::parse("emptysubsection").ok(),
            Some(NamingStrategyKind::EmptySubsection)
        );
        assert!(matches!(
            NamingStrategyKind::parse("roundrobin"),
            Err(Error::UnknownNamingStrategy(name)) if name == "roundrobin"
        ));
        assert_eq!(NamingStrategyKind::QuietestHalf.to_string(), "quietesthalf");
    }

    #[test]
    fn uniform_names_are_evenly_spaced() {
        let strategy = NamingStrategy::Uniform { target_size: 4 };
        let mut rng = rng();
        let mut names = Vec::new();
        for _ in 0..4 {
            let name = strategy.next_name(&names, &mut rng);
            names.push(name);
        }
        assert_eq!(names, vec![0, 1 << 62, 1 << 63, 3 << 62]);
    }

    #[test]
    fn uniform_saturates_past_target() {
        assert_eq!(uniform_name(5, 4), u64::MAX);
        assert_eq!(uniform_name(3, 0), 0);
    }

    #[test]
    fn largest_gap_considers_boundaries() {
        let metric = SpacingMetric::Linear;
        assert_eq!(largest_gap(metric, &[10, 20, 1 << 40]), (1 << 40, u64::MAX));
        assert_eq!(largest_gap(metric, &[u64::MAX - 5]), (0, u64::MAX - 5));
        assert_eq!(
            largest_gap(metric, &[1 << 60, 1 << 63, u64::MAX - 1]),
            (1 << 60, 1 << 63)
        );
    }

    #[test]
    fn best_fit_on_empty_set_uses_whole_namespace() {
        let strategy = NamingStrategy::BestFit {
            metric: SpacingMetric::XorDistance,
        };
        let mut rng = rng();
        // Any u64 is acceptable, the call must simply return.
        let _name = strategy.next_name(&[], &mut rng);
    }

    #[test]
    fn best_fit_always_lands_inside_the_narrowed_largest_gap() {
        let low = 0x2000_0000_0000_0000u64;
        let high = 0xA000_0000_0000_0000u64;
        let mut names = vec![0x0000_0000_0000_1000, 0x1000_0000_0000_0000, low, high];
        names.extend((1..8u64).map(|i| high + i * 0x0100_0000_0000_0000));
        names.sort_unstable();

        let (narrow_low, narrow_high) = narrow_gap(low, high);
        for metric in [SpacingMetric::Linear, SpacingMetric::XorDistance] {
            assert_eq!(largest_gap(metric, &names), (low, high));
            let strategy = NamingStrategy::BestFit { metric };
            let mut rng = rng();
            for _ in 0..500 {
                let name = strategy.next_name(&names, &mut rng);
                assert!(name > narrow_low && name < narrow_high, "{name:#x}");
            }
        }
    }

    #[test]
    fn best_fit_narrowing_uses_numeric_width_under_xor() {
        // 0x7fff.. ^ 0x8000.. is all ones, far wider than the real gap.
        let names = [0x7FFF_FFFF_FFFF_F000, 0x8000_0000_0000_1000];
        let mut rng = rng();
        let strategy = NamingStrategy::BestFit {
            metric: SpacingMetric::XorDistance,
        };
        let name = strategy.next_name(&names, &mut rng);
        assert!(name > names[0] && name < names[1], "{name:#x}");
    }

    #[test]
    fn best_fit_falls_back_to_midpoint_when_gap_is_exhausted() {
        let mut rng = rng();
        let (low, high) = narrow_gap(10, 13);
        assert_eq!((low, high), (11, 12));
        assert_eq!(strictly_between(low, high, &mut rng), 11);
        assert_eq!(strictly_between(7, 7, &mut rng), 7);
        for _ in 0..50 {
            assert_eq!(strictly_between(20, 22, &mut rng), 21);
        }
    }

    #[test]
    fn quietest_half_targets_the_emptier_half() {
        let mut rng = rng();
        let crowded_first = [1, 2, 3, HALFWAY + 1];
        for _ in 0..100 {
            assert!(NamingStrategy::QuietestHalf.next_name(&crowded_first, &mut rng) >= HALFWAY);
        }
        let crowded_second = [1, HALFWAY, HALFWAY + 7, u64::MAX];
        for _ in 0..100 {
            assert!(NamingStrategy::QuietestHalf.next_name(&crowded_second, &mut rng) < HALFWAY);
        }
    }

    #[test]
    fn quietest_half_tie_goes_to_second_half() {
        let mut rng = rng();
        for names in [&[][..], &[5, HALFWAY + 5][..]] {
            for _ in 0..100 {
                assert!(NamingStrategy::QuietestHalf.next_name(names, &mut rng) >= HALFWAY);
            }
        }
    }

    #[test]
    fn quietest_half_imbalance_never_grows() {
        let mut rng = rng();
        let mut names: Vec<u64> = (0..20).map(|i| i * 1000).collect();
        let (first, second) = half_counts(&names);
        let mut imbalance = first.abs_diff(second);
        for _ in 0..60 {
            let name = NamingStrategy::QuietestHalf.next_name(&names, &mut rng);
            names.push(name);
            names.sort_unstable();
            let (first, second) = half_counts(&names);
            let next = first.abs_diff(second);
            assert!(next <= imbalance.max(1));
            imbalance = next;
        }
        assert!(imbalance <= 1);
    }

    #[test]
    fn subsections_tile_the_namespace() {
        assert_eq!(subsection_bounds(0, 0), (0, u64::MAX));
        assert_eq!(subsection_bounds(0, 1), (0, HALFWAY - 1));
        assert_eq!(subsection_bounds(1, 1), (HALFWAY, u64::MAX));
        assert_eq!(
            subsection_bounds(0xB, 4),
            (0xB000_0000_0000_0000, 0xBFFF_FFFF_FFFF_FFFF)
        );
        assert_eq!(subsection_bounds(u64::MAX, 64), (u64::MAX, u64::MAX));
        for depth in 1..6 {
            for index in 1..(1u64 << depth) {
                let (_, previous_end) = subsection_bounds(index - 1, depth);
                let (start, _) = subsection_bounds(index, depth);
                assert_eq!(previous_end + 1, start);
            }
        }
    }

    #[test]
    fn empty_subsection_finds_missing_nibbles() {
        let names: Vec<u64> = [0x0, 0x1, 0x2, 0x3, 0x5, 0x6, 0x7, 0x8, 0x9, 0xA, 0xC, 0xD, 0xE, 0xF]
            .iter()
            .map(|nibble: &u64| (nibble << 60) | 0x3000)
            .collect();

        assert_eq!(empty_subsections(&names), (4, vec![0x4, 0xB]));

        let mut rng = rng();
        for _ in 0..200 {
            let name = NamingStrategy::EmptySubsection.next_name(&names, &mut rng);
            let in_four = (0x4000_0000_0000_0000..=0x4FFF_FFFF_FFFF_FFFF).contains(&name);
            let in_eleven = (0xB000_0000_0000_0000..=0xBFFF_FFFF_FFFF_FFFF).contains(&name);
            assert!(in_four || in_eleven, "{name:#x}");
        }
    }

    #[test]
    fn empty_subsection_on_empty_set_is_whole_namespace() {
        assert_eq!(empty_subsections(&[]), (0, vec![0]));
    }

    #[test]
    fn strategy_kind_round_trips_from_config() {
        let mut config = SimulationConfig::default();
        config.naming_strategy = NamingStrategyKind::BestFit;
        config.spacing_metric = SpacingMetric::Linear;
        let strategy = NamingStrategy::from_config(&config);
        assert_eq!(
            strategy,
            NamingStrategy::BestFit {
                metric: SpacingMetric::Linear
            }
        );
        assert_eq!(strategy.kind(), NamingStrategyKind::BestFit);
    }
}
