//! ---
//! pcw_section: "01-configuration-resolver"
//! pcw_subsection: "module"
//! pcw_type: "source"
//! pcw_scope: "code"
//! pcw_description: "Option resolution and compiler invocation for protocw."
//! pcw_version: "v0.0.0-prealpha"
//! pcw_owner: "tbd"
//! ---
//! Core of the protocw batch driver.
//!
//! [`resolve`] validates the command-line [`Options`] and precomputes the
//! compiler flags for every selected [`Language`]. A [`Driver`] then walks the
//! input tree and runs the compiler once per directory and language.

pub mod batch;
pub mod driver;
pub mod error;
pub mod options;
pub mod resolver;
pub mod runner;
pub mod target;
pub mod toolchain;

pub use batch::{collect_batches, DirectoryBatch, SCHEMA_EXTENSION};
pub use driver::{Driver, Plan, RunSummary};
pub use error::{DirRole, Error, Result};
pub use options::{LanguageFlags, Options};
pub use resolver::{resolve, FsProbe, PathProbe, ResolveContext, ResolvedConfiguration};
pub use runner::{CompilerRunner, Invocation, ProcessRunner, RunOutput};
pub use target::{JavaFlavor, Language, TargetSet};
pub use toolchain::{Tool, Toolchain, TOOL_DIR_ENV};
