//! ---
//! pcw_section: "02-invocation-driver"
//! pcw_subsection: "module"
//! pcw_type: "source"
//! pcw_scope: "code"
//! pcw_description: "Plans and runs compiler invocations for each directory batch."
//! pcw_version: "v0.0.0-prealpha"
//! pcw_owner: "tbd"
//! ---
//! The invocation driver.
//!
//! A run is split in two phases. [`Driver::plan`] walks the input root and
//! builds every [`Invocation`] up front, so a bad directory aborts the run
//! before any process is started. [`Driver::execute`] then runs the plan one
//! invocation at a time and relays whatever the compiler writes to standard
//! error. Exit codes are recorded but never stop the run.

use std::io::Write;

use protocw_logging::{pw_debug, pw_info, LogContext};

use crate::batch::{collect_batches, DirectoryBatch};
use crate::error::{Error, Result};
use crate::resolver::{display, ResolvedConfiguration};
use crate::runner::{CompilerRunner, Invocation};

/// Every invocation for one run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub batches: Vec<DirectoryBatch>,
    pub invocations: Vec<Invocation>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub directories: usize,
    pub invocations: usize,
    /// Invocations that wrote to standard error.
    pub with_diagnostics: usize,
    /// Invocations that exited unsuccessfully or were killed.
    pub failed_exits: usize,
}

pub struct Driver<R, W> {
    config: ResolvedConfiguration,
    runner: R,
    diagnostics: W,
}

impl<R: CompilerRunner, W: Write> Driver<R, W> {
    pub fn new(config: ResolvedConfiguration, runner: R, diagnostics: W) -> Self {
        Self {
            config,
            runner,
            diagnostics,
        }
    }

    /// Enumerate the input root and build all invocations without running any.
    pub fn plan(&self) -> Result<Plan> {
        let batches = collect_batches(self.config.input_dir())?;
        let mut invocations = Vec::new();
        for batch in &batches {
            let directory = display(&batch.directory);
            let ctx = LogContext::new()
                .with_directory(&directory)
                .with_stage("plan");
            pw_debug!(context = ctx, "{} schema file(s)", batch.len());
            invocations.extend(
                self.config
                    .targets()
                    .iter()
                    .filter_map(|language| self.config.invocation(language, batch)),
            );
        }
        Ok(Plan {
            batches,
            invocations,
        })
    }

    /// Run each planned invocation in order, waiting for each to finish.
    pub fn execute(&mut self, plan: &Plan) -> Result<RunSummary> {
        let mut summary = RunSummary {
            directories: plan.batches.len(),
            ..RunSummary::default()
        };
        for invocation in &plan.invocations {
            let directory = display(&invocation.directory);
            let ctx = LogContext::new()
                .with_directory(&directory)
                .with_language(invocation.language.as_str())
                .with_stage("invoke");
            pw_debug!(context = ctx, "{}", invocation.command_line());

            let output = self
                .runner
                .run(invocation)
                .map_err(|source| Error::Spawn {
                    program: invocation.program.clone(),
                    source,
                })?;
            summary.invocations += 1;

            if output.status != Some(0) {
                summary.failed_exits += 1;
                pw_debug!(context = ctx, "compiler exited with {:?}", output.status);
            }
            if !output.stderr.is_empty() {
                summary.with_diagnostics += 1;
                pw_debug!(context = ctx, "compiler reported diagnostics");
                writeln!(self.diagnostics, "{}", output.stderr).map_err(Error::Diagnostics)?;
            }
        }
        Ok(summary)
    }

    /// Plan, then execute.
    pub fn run(&mut self) -> Result<RunSummary> {
        let plan = self.plan()?;
        pw_info!(
            "planned {} invocation(s) across {} director(ies)",
            plan.invocations.len(),
            plan.batches.len()
        );
        self.execute(&plan)
    }

    pub fn into_parts(self) -> (R, W) {
        (self.runner, self.diagnostics)
    }
}
