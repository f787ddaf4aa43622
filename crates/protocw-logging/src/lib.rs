//! ---
//! pcw_section: "03-logging"
//! pcw_subsection: "module"
//! pcw_type: "source"
//! pcw_scope: "code"
//! pcw_description: "Structured logging adapters and sinks."
//! pcw_version: "v0.0.0-prealpha"
//! pcw_owner: "tbd"
//! ---
#![warn(missing_docs)]
//! Tracing setup and context-enriched logging helpers shared by the protocw
//! crates. All output goes to standard error so it never interleaves with
//! anything the binary prints on standard output.

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as subscriber_fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

pub mod macros;

/// Environment variable holding a filter directive that overrides `-v`.
pub const LOG_ENV: &str = "PROTOCW_LOG";

/// Output format for the diagnostic log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line records.
    #[default]
    Pretty,
    /// One JSON object per record.
    Json,
}

/// Settings that control subscriber installation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingConfig {
    /// Number of `-v` flags given on the command line.
    pub verbosity: u8,
    /// Record format.
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Default level implied by the verbosity count.
    pub fn default_level(&self) -> Level {
        match self.verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// Initialize a baseline subscriber with warn-level output, suitable for tests.
pub fn init() {
    init_with(&LoggingConfig::default());
}

/// Install the global subscriber.
///
/// `PROTOCW_LOG` wins when set, then `RUST_LOG`, and finally the level implied
/// by [`LoggingConfig::verbosity`]. Repeated calls are ignored.
pub fn init_with(config: &LoggingConfig) {
    let fallback = config.default_level();
    let filter = match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|err| {
            eprintln!(
                "invalid {} directive ({}); defaulting to {} logging",
                LOG_ENV, err, fallback
            );
            EnvFilter::default().add_directive(fallback.into())
        }),
        Err(_) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::default().add_directive(fallback.into())),
    };

    let fmt_layer = match config.format {
        LogFormat::Pretty => subscriber_fmt::layer()
            .with_target(false)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => subscriber_fmt::layer()
            .with_target(true)
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Directory batch being processed.
    pub directory: Option<&'a str>,
    /// Target language identifier.
    pub language: Option<&'a str>,
    /// Pipeline stage (resolve, plan, invoke).
    pub stage: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a directory.
    pub fn with_directory(mut self, directory: &'a str) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Attach a language identifier.
    pub fn with_language(mut self, language: &'a str) -> Self {
        self.language = Some(language);
        self
    }

    /// Attach a pipeline stage.
    pub fn with_stage(mut self, stage: &'a str) -> Self {
        self.stage = Some(stage);
        self
    }
}

/// Outcome attached to run lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The step completed.
    Success,
    /// The step was aborted.
    Fault,
}

impl RunOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            RunOutcome::Success => "success",
            RunOutcome::Fault => "fault",
        }
    }
}

/// Emit a standardized lifecycle event such as `run.start` or `run.abort`.
///
/// Lifecycle events are recorded at INFO whatever the outcome, so they stay
/// out of the default stream; the binary prints user-facing failures itself.
pub fn log_run_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: RunOutcome,
) {
    let ctx = context.cloned().unwrap_or_default();
    tracing::info!(
        event,
        outcome = outcome.as_str(),
        directory = ctx.directory.unwrap_or(""),
        language = ctx.language.unwrap_or(""),
        stage = ctx.stage.unwrap_or(""),
        message = %message
    );
}
