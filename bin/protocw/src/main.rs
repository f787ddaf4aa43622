//! ---
//! pcw_section: "02-invocation-driver"
//! pcw_subsection: "binary"
//! pcw_type: "source"
//! pcw_scope: "code"
//! pcw_description: "Command-line entry point for protocw."
//! pcw_version: "v0.0.0-prealpha"
//! pcw_owner: "tbd"
//! ---
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use protocw_core::{
    resolve, Driver, FsProbe, Options, ProcessRunner, ResolveContext, Tool, TOOL_DIR_ENV,
};
use protocw_logging::{
    self as logging, log_run_event, LogContext, LogFormat, LoggingConfig, RunOutcome,
};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "protocw",
    author,
    version,
    about = "Run protoc over every directory of .proto files under a root",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    options: Options,

    /// Directory holding protoc and its plugins (defaults to this executable's directory).
    #[arg(long = "tool_dir", value_name = "DIR", env = TOOL_DIR_ENV)]
    tool_dir: Option<PathBuf>,

    /// Use this protoc instead of the one in the tool directory.
    #[arg(long = "protoc", value_name = "FILE", env = "PROTOCW_PROTOC")]
    protoc: Option<PathBuf>,

    /// Print the planned compiler command lines instead of running them.
    #[arg(long = "dry_run")]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Log record format.
    #[arg(long = "log_format", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_with(&LoggingConfig {
        verbosity: cli.verbose,
        format: cli.log_format,
    });

    if let Err(err) = run(cli) {
        report(&err);
    }
    // Aborted runs still exit with status 0; failures are reported only on stderr.
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    let mut context = ResolveContext::from_process(cli.tool_dir.clone())
        .context("unable to determine the working directory or executable location")?;
    if let Some(protoc) = &cli.protoc {
        context.toolchain = context.toolchain.with_path(Tool::Compiler, protoc);
    }

    let ctx = LogContext::new().with_stage("resolve");
    log_run_event(Some(&ctx), "run.start", "resolving options", RunOutcome::Success);
    let config = resolve(&cli.options, &context, &FsProbe)?;
    debug!(
        compiler = %config.compiler().display(),
        includes = %config.include_line(),
        "configuration resolved"
    );

    let mut driver = Driver::new(config, ProcessRunner, io::stderr());
    if cli.dry_run {
        let plan = driver.plan()?;
        for invocation in &plan.invocations {
            println!("{}", invocation.command_line());
        }
        return Ok(());
    }

    let summary = driver.run()?;
    let ctx = LogContext::new().with_stage("invoke");
    log_run_event(
        Some(&ctx),
        "run.finish",
        &format!(
            "{} invocation(s) over {} director(ies); {} with diagnostics, {} with non-zero exit",
            summary.invocations,
            summary.directories,
            summary.with_diagnostics,
            summary.failed_exits
        ),
        RunOutcome::Success,
    );
    Ok(())
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<protocw_core::Error>() {
        Some(core) if core.is_configuration() => {
            debug!(error = %core, "validation failed");
            eprintln!("{core}");
        }
        _ => {
            log_run_event(None, "run.abort", &format!("{err:#}"), RunOutcome::Fault);
            eprintln!("Exception raised : {err:#}");
        }
    }
}
