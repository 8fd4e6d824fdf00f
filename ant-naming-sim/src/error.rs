// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use thiserror::Error;

/// Result type used throughout the simulator.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure is fatal for a run; nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown naming strategy: {0}")]
    UnknownNamingStrategy(String),

    #[error("Unknown spacing metric: {0}")]
    UnknownSpacingMetric(String),

    #[error("Unknown storage units: {0}")]
    UnknownStorageUnits(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("At least {required} values are required, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("Standard deviation does not fit in 64 bits")]
    StdDevOverflow,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
