// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! Logging setup shared by the simulator binaries.
//!
//! Logs never go to stdout unless asked for, since stdout carries the simulation report.

mod error;
mod layers;

pub use error::{Error, Result};
pub use layers::get_logging_targets;

use layers::TracingLayers;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_core::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding extra log targets, e.g. `SIM_LOG=std,ant_naming_sim=trace`.
pub const SIM_LOG_ENV: &str = "SIM_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutputDest {
    /// Log to standard output
    Stdout,
    /// Log to standard error
    Stderr,
    /// Log to a file; a path without a `.log` extension is treated as a directory
    Path(PathBuf),
}

impl LogOutputDest {
    pub fn parse_from_str(val: &str) -> Result<Self> {
        match val {
            "stdout" => Ok(LogOutputDest::Stdout),
            "stderr" => Ok(LogOutputDest::Stderr),
            "" => Err(Error::InvalidOutputDest(val.to_string())),
            path => Ok(LogOutputDest::Path(PathBuf::from(path))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Default,
    Json,
}

impl LogFormat {
    pub fn parse_from_str(val: &str) -> Result<Self> {
        match val {
            "default" => Ok(LogFormat::Default),
            "json" => Ok(LogFormat::Json),
            _ => Err(Error::InvalidLogFormat(val.to_string())),
        }
    }
}

/// Verbosity requested on the command line, mapped from the `-v` count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    Minimal,
    Standard,
    Verbose,
}

impl From<u8> for VerbosityLevel {
    fn from(count: u8) -> Self {
        match count {
            0 => VerbosityLevel::Minimal,
            1 => VerbosityLevel::Standard,
            _ => VerbosityLevel::Verbose,
        }
    }
}

pub struct LogBuilder {
    default_logging_targets: Vec<(String, Level)>,
    output_dest: LogOutputDest,
    format: LogFormat,
    verbosity: Option<VerbosityLevel>,
    print_updates_to_stderr: bool,
}

impl LogBuilder {
    /// Create a builder with the application's default `(target, level)` pairs.
    pub fn new(default_logging_targets: Vec<(String, Level)>) -> Self {
        Self {
            default_logging_targets,
            output_dest: LogOutputDest::Stderr,
            format: LogFormat::Default,
            verbosity: None,
            print_updates_to_stderr: true,
        }
    }

    pub fn output_dest(&mut self, output_dest: LogOutputDest) -> &mut Self {
        self.output_dest = output_dest;
        self
    }

    pub fn format(&mut self, format: LogFormat) -> &mut Self {
        self.format = format;
        self
    }

    pub fn verbosity(&mut self, verbosity: VerbosityLevel) -> &mut Self {
        self.verbosity = Some(verbosity);
        self
    }

    pub fn print_updates_to_stderr(&mut self, print: bool) -> &mut Self {
        self.print_updates_to_stderr = print;
        self
    }

    /// Install the global subscriber.
    ///
    /// The returned guard must be held for as long as logs should be flushed to a file.
    pub fn initialize(&self) -> Result<Option<WorkerGuard>> {
        let mut layers = TracingLayers::default();
        layers.fmt_layer(
            self.default_logging_targets.clone(),
            &self.output_dest,
            self.format,
            self.verbosity,
            self.print_updates_to_stderr,
        )?;

        tracing_subscriber::registry()
            .with(layers.layers)
            .try_init()
            .map_err(|err| Error::SubscriberInit(err.to_string()))?;

        Ok(layers.log_appender_guard)
    }
}
