// Copyright 2025 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

use crate::{LogFormat, LogOutputDest, SIM_LOG_ENV, VerbosityLevel, error::Result};
use std::collections::BTreeMap;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_core::{Event, Level, Subscriber};
use tracing_subscriber::{
    Layer, Registry,
    filter::Targets,
    fmt::{
        self as tracing_fmt, FmtContext, FormatEvent, FormatFields, MakeWriter,
        format::Writer,
        time::{FormatTime, SystemTime},
    },
    registry::LookupSpan,
};

const LOG_FILE_PREFIX: &str = "vaultsim.log";

// Verbosity level keywords for the SIM_LOG environment variable
const VERBOSITY_VERBOSE: &str = "verbose";
const VERBOSITY_VERBOSE_SHORT: &str = "v";
const VERBOSITY_STANDARD: &str = "standard";
const VERBOSITY_STANDARD_SHORT: &str = "std";
const VERBOSITY_MINIMAL: &str = "minimal";
const VERBOSITY_MINIMAL_SHORT: &str = "min";

#[derive(Default)]
/// Tracing log formatter setup for easier span viewing
pub(crate) struct LogFormatter;

impl<S, N> FormatEvent<S, N> for LogFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = *event.metadata().level();
        let module = event.metadata().module_path().unwrap_or("<unknown module>");
        let lno = event.metadata().line().unwrap_or(0);
        let time = SystemTime;

        write!(writer, "[")?;
        time.format_time(&mut writer)?;
        write!(writer, " {level} {module} {lno}")?;
        ctx.visit_spans(|span| write!(writer, "/{}", span.name()))?;
        write!(writer, "] ")?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// The different Subscribers composed into a list of layers
#[derive(Default)]
pub(crate) struct TracingLayers {
    pub(crate) layers: Vec<Box<dyn Layer<Registry> + Send + Sync>>,
    pub(crate) log_appender_guard: Option<WorkerGuard>,
}

fn formatted_layer<W>(writer: W, format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => tracing_fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Default => tracing_fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .event_format(LogFormatter)
            .with_writer(writer)
            .boxed(),
    }
}

impl TracingLayers {
    pub(crate) fn fmt_layer(
        &mut self,
        application_log_targets: Vec<(String, Level)>,
        output_dest: &LogOutputDest,
        format: LogFormat,
        verbosity: Option<VerbosityLevel>,
        print_updates: bool,
    ) -> Result<()> {
        let layer = match output_dest {
            LogOutputDest::Stdout => formatted_layer(std::io::stdout, format),
            LogOutputDest::Stderr => formatted_layer(std::io::stderr, format),
            LogOutputDest::Path(path) => {
                let (writer, guard) =
                    if path.extension() == Some(std::ffi::OsStr::new("log")) {
                        // Single file, appended to across runs
                        if let Some(parent) = path.parent() {
                            std::fs::create_dir_all(parent)?;
                        }
                        if print_updates {
                            eprintln!("Logging to file: {path:?}");
                        }
                        let file = std::fs::OpenOptions::new()
                            .create(true)
                            .append(true)
                            .open(path)?;
                        tracing_appender::non_blocking(file)
                    } else {
                        // Directory with one file per day
                        std::fs::create_dir_all(path)?;
                        if print_updates {
                            eprintln!("Logging to directory: {path:?}");
                        }
                        let appender = tracing_appender::rolling::daily(path, LOG_FILE_PREFIX);
                        tracing_appender::non_blocking(appender)
                    };
                self.log_appender_guard = Some(guard);
                formatted_layer(writer, format)
            }
        };

        let sim_log = std::env::var(SIM_LOG_ENV).ok();
        let targets = get_logging_targets(
            sim_log.as_deref(),
            application_log_targets,
            verbosity,
            print_updates,
        );

        let layer = layer.with_filter(Targets::new().with_targets(targets));
        self.layers.push(Box::new(layer));

        Ok(())
    }
}

/// Computes the final logging targets based on CLI verbosity, `SIM_LOG` and application defaults.
///
/// Precedence for determining base targets:
/// 1. CLI verbosity `standard`/`verbose` sets hardcoded base targets
/// 2. `SIM_LOG` keywords (`std`/`verbose`) set hardcoded base targets (when CLI is minimal/none)
/// 3. Application defaults are used otherwise
///
/// Custom overrides from `SIM_LOG` (e.g. `ant_naming_sim=trace`) are always applied on top.
pub fn get_logging_targets(
    sim_log_value: Option<&str>,
    application_log_targets: Vec<(String, Level)>,
    verbosity: Option<VerbosityLevel>,
    print_updates: bool,
) -> Vec<(String, Level)> {
    let (sim_log_keyword, custom_overrides) = parse_sim_log(sim_log_value);

    let chosen = match verbosity {
        Some(VerbosityLevel::Standard) | Some(VerbosityLevel::Verbose) => verbosity,
        Some(VerbosityLevel::Minimal) | None => sim_log_keyword,
    };

    let base_targets = match chosen {
        Some(VerbosityLevel::Standard) => standard_targets(),
        Some(VerbosityLevel::Verbose) => verbose_targets(),
        Some(VerbosityLevel::Minimal) | None => BTreeMap::from_iter(application_log_targets),
    };

    if print_updates {
        let name = match chosen {
            Some(VerbosityLevel::Standard) => "standard",
            Some(VerbosityLevel::Verbose) => "verbose",
            Some(VerbosityLevel::Minimal) | None => "application defaults",
        };
        if custom_overrides.is_empty() {
            eprintln!("Using log verbosity: {name}");
        } else {
            eprintln!("Using log verbosity: {name} with {SIM_LOG_ENV} overrides");
        }
    }

    let mut final_targets = base_targets;
    final_targets.extend(custom_overrides);

    final_targets.into_iter().collect()
}

/// Parses a `SIM_LOG` value into an optional keyword and `target=level` overrides.
/// Invalid entries are silently skipped.
fn parse_sim_log(value: Option<&str>) -> (Option<VerbosityLevel>, BTreeMap<String, Level>) {
    let Some(value) = value else {
        return (None, BTreeMap::new());
    };

    let mut keyword_verbosity = None;
    let mut custom_overrides = BTreeMap::new();

    for part in value.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed == VERBOSITY_VERBOSE || trimmed == VERBOSITY_VERBOSE_SHORT {
            keyword_verbosity = Some(VerbosityLevel::Verbose);
        } else if trimmed == VERBOSITY_STANDARD || trimmed == VERBOSITY_STANDARD_SHORT {
            keyword_verbosity = Some(VerbosityLevel::Standard);
        } else if trimmed == VERBOSITY_MINIMAL || trimmed == VERBOSITY_MINIMAL_SHORT {
            keyword_verbosity = Some(VerbosityLevel::Minimal);
        } else {
            let mut split = trimmed.split('=');
            let crate_name = split.next().unwrap_or_default();
            if crate_name.is_empty() {
                continue;
            }
            let log_level = split.next().unwrap_or("trace");
            if let Some(level) = parse_log_level(log_level) {
                custom_overrides.insert(crate_name.to_string(), level);
            }
        }
    }

    (keyword_verbosity, custom_overrides)
}

fn standard_targets() -> BTreeMap<String, Level> {
    BTreeMap::from_iter(vec![
        ("vaultsim".to_string(), Level::DEBUG),
        ("ant_naming_sim".to_string(), Level::DEBUG),
        ("ant_logging".to_string(), Level::INFO),
    ])
}

fn verbose_targets() -> BTreeMap<String, Level> {
    BTreeMap::from_iter(vec![
        ("vaultsim".to_string(), Level::TRACE),
        ("ant_naming_sim".to_string(), Level::TRACE),
        ("ant_logging".to_string(), Level::DEBUG),
    ])
}

fn parse_log_level(log_level: &str) -> Option<Level> {
    match log_level.to_lowercase().as_str() {
        "info" | "i" => Some(Level::INFO),
        "debug" | "d" => Some(Level::DEBUG),
        "trace" | "t" => Some(Level::TRACE),
        "warn" | "w" => Some(Level::WARN),
        "error" | "e" => Some(Level::ERROR),
        _ => None,
    }
}
