//! ---
//! pcw_section: "02-invocation-driver"
//! pcw_subsection: "module"
//! pcw_type: "source"
//! pcw_scope: "code"
//! pcw_description: "Compiler process invocation."
//! pcw_version: "v0.0.0-prealpha"
//! pcw_owner: "tbd"
//! ---
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::resolver::{display, join_lossy};
use crate::target::Language;

/// One fully determined compiler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub language: Language,
    pub directory: PathBuf,
}

impl Invocation {
    /// Space-joined argument line, without the program. Display only: bytes
    /// that are not valid UTF-8 are replaced.
    pub fn argument_line(&self) -> String {
        join_lossy(&self.args)
    }

    pub fn command_line(&self) -> String {
        format!("{} {}", display(&self.program), self.argument_line())
    }
}

/// What the driver keeps from a finished compiler process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit code, `None` when terminated by a signal.
    pub status: Option<i32>,
    pub stderr: String,
}

pub trait CompilerRunner {
    /// Run `invocation` to completion.
    fn run(&mut self, invocation: &Invocation) -> io::Result<RunOutput>;
}

/// Spawns the real compiler. Standard output is discarded and standard
/// error captured in full.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CompilerRunner for ProcessRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<RunOutput> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()?;
        Ok(RunOutput {
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl<R: CompilerRunner + ?Sized> CompilerRunner for &mut R {
    fn run(&mut self, invocation: &Invocation) -> io::Result<RunOutput> {
        (**self).run(invocation)
    }
}
