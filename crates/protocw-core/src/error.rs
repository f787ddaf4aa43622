//! ---
//! pcw_section: "01-configuration-resolver"
//! pcw_subsection: "module"
//! pcw_type: "source"
//! pcw_scope: "code"
//! pcw_description: "Error taxonomy for resolution and invocation."
//! pcw_version: "v0.0.0-prealpha"
//! pcw_owner: "tbd"
//! ---
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Which option a directory came from, used to label diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirRole {
    Input,
    Output,
    ProtoPath,
    Tool,
    Source,
}

impl fmt::Display for DirRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DirRole::Input => "input_dir",
            DirRole::Output => "output_dir",
            DirRole::ProtoPath => "proto_path",
            DirRole::Tool => "protocw path",
            DirRole::Source => "Directory",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("No language option is specified")]
    NoLanguage,
    #[error("More than one Java option is specified")]
    MultipleJava,
    #[error("Executable file does not exist : {}", .0.display())]
    MissingExecutable(PathBuf),
    #[error("{role} not exist : {}", .path.display())]
    MissingDirectory { role: DirRole, path: PathBuf },
    #[error("{role} contains spaces : {}", .path.display())]
    DirectoryContainsSpace { role: DirRole, path: PathBuf },
    #[error("unable to resolve absolute path for {}: {source}", .path.display())]
    Absolutize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to walk {}: {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to list {}: {source}", .directory.display())]
    ReadDir {
        directory: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to launch {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write diagnostics: {0}")]
    Diagnostics(#[source] std::io::Error),
}

impl Error {
    /// True for failures detected before any compiler process is started.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::NoLanguage
                | Error::MultipleJava
                | Error::MissingExecutable(_)
                | Error::MissingDirectory { .. }
                | Error::DirectoryContainsSpace { .. }
                | Error::Absolutize { .. }
        )
    }
}
