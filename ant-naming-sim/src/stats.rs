// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Exact integer statistics over `u64` samples.
//!
//! Sums and squared deviations are accumulated in 256 bits: a sum of up to 2^64 squares of
//! 64-bit deviations stays below 2^192, so nothing here can overflow or lose precision.

use crate::error::{Error, Result};

#[allow(clippy::all)]
mod wide {
    uint::construct_uint! {
        /// 256-bit unsigned integer used for overflow-free accumulation.
        pub(crate) struct U256(4);
    }
}

use wide::U256;

/// Floor of the arithmetic mean.
pub fn average(values: &[u64]) -> Result<u64> {
    if values.is_empty() {
        return Err(Error::InsufficientSamples {
            required: 1,
            actual: 0,
        });
    }

    let total = values
        .iter()
        .fold(U256::zero(), |acc, &value| acc + U256::from(value));
    let mean = total / U256::from(values.len() as u64);

    // The mean of u64 values is itself a u64.
    Ok(mean.low_u64())
}

/// Sample standard deviation, floored at every step.
///
/// Uses the floored average, divides the squared deviations by `count - 1` and takes the
/// integer square root.
pub fn standard_deviation(values: &[u64]) -> Result<u64> {
    if values.len() < 2 {
        return Err(Error::InsufficientSamples {
            required: 2,
            actual: values.len(),
        });
    }

    let avg = average(values)?;
    let total_diffs = values.iter().fold(U256::zero(), |acc, &value| {
        let diff = U256::from(value.abs_diff(avg));
        acc + diff * diff
    });
    let variance = total_diffs / U256::from((values.len() - 1) as u64);
    let deviation = variance.integer_sqrt();

    if deviation > U256::from(u64::MAX) {
        return Err(Error::StdDevOverflow);
    }
    Ok(deviation.low_u64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    const MAX: u64 = u64::MAX;

    #[test]
    fn average_fixtures() -> Result<()> {
        assert_eq!(average(&[5, 5, 5])?, 5);
        assert_eq!(average(&[1000, 3000, 7000])?, 3666);
        assert_eq!(average(&[MAX, MAX - 99, MAX - 9999])?, MAX - 3366);
        Ok(())
    }

    #[test]
    fn standard_deviation_fixtures() -> Result<()> {
        assert_eq!(standard_deviation(&[5, 5, 5])?, 0);
        assert_eq!(standard_deviation(&[1000, 3000, 7000])?, 3055);
        assert_eq!(standard_deviation(&[MAX, MAX - 99, MAX - 9999])?, 5744);
        Ok(())
    }

    #[test]
    fn extreme_pair_does_not_overflow() -> Result<()> {
        // avg = 2^63 - 1, deviations 2^63 - 1 and 2^63
        let deviation = standard_deviation(&[0, MAX])?;
        assert!(deviation > 1 << 63);
        assert_eq!(average(&[MAX, MAX])?, MAX);
        Ok(())
    }

    #[test]
    fn too_few_samples_is_an_error() {
        assert!(matches!(
            average(&[]),
            Err(Error::InsufficientSamples {
                required: 1,
                actual: 0
            })
        ));
        assert!(matches!(
            standard_deviation(&[7]),
            Err(Error::InsufficientSamples {
                required: 2,
                actual: 1
            })
        ));
    }

    quickcheck! {
        fn average_is_within_bounds(values: Vec<u64>) -> bool {
            match (average(&values), values.iter().min(), values.iter().max()) {
                (Ok(avg), Some(&min), Some(&max)) => min <= avg && avg <= max,
                (Err(_), None, None) => true,
                _ => false,
            }
        }

        fn constant_samples_have_zero_deviation(value: u64, count: u8) -> bool {
            let values = vec![value; usize::from(count) + 2];
            standard_deviation(&values).ok() == Some(0)
        }
    }
}
