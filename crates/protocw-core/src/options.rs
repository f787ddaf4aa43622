//! ---
//! pcw_section: "01-configuration-resolver"
//! pcw_subsection: "module"
//! pcw_type: "source"
//! pcw_scope: "code"
//! pcw_description: "Recognized command-line options."
//! pcw_version: "v0.0.0-prealpha"
//! pcw_owner: "tbd"
//! ---
use std::path::PathBuf;

use clap::Args;

/// Flat record of the recognized flags, built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct Options {
    /// Root directory where the proto files are stored.
    #[arg(short = 'i', long = "input_dir", value_name = "DIR", default_value = ".")]
    pub input_dir: PathBuf,

    /// Destination directory for the generated source files.
    #[arg(short = 'o', long = "output_dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Extra include directories (separated by ; when there are multiple).
    #[arg(
        short = 'p',
        long = "proto_path",
        value_name = "DIR",
        value_delimiter = ';',
        num_args = 1
    )]
    pub proto_paths: Vec<PathBuf>,

    #[command(flatten)]
    pub languages: LanguageFlags,

    /// Also generate gRPC sources for every selected language.
    #[arg(long = "grpc")]
    pub grpc: bool,
}

impl Options {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            proto_paths: Vec::new(),
            languages: LanguageFlags::default(),
            grpc: false,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new(".", ".")
    }
}

/// One boolean per language switch, exactly as accepted on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct LanguageFlags {
    /// Generate C++ source files.
    #[arg(long = "cpp")]
    pub cpp: bool,
    /// Generate C# source files.
    #[arg(long = "csharp")]
    pub csharp: bool,
    /// Generate Go source files.
    #[arg(long = "go")]
    pub go: bool,
    /// Generate Java source files (cannot be combined with other Java options).
    #[arg(long = "java")]
    pub java: bool,
    /// Generate Java-Lite source files (cannot be combined with other Java options).
    #[arg(long = "java_lite")]
    pub java_lite: bool,
    /// Generate Java-Nano source files (cannot be combined with other Java options).
    #[arg(long = "java_nano")]
    pub java_nano: bool,
    /// Generate Node source files.
    #[arg(long = "node")]
    pub node: bool,
    /// Generate Objective-C source files.
    #[arg(long = "objc")]
    pub objc: bool,
    /// Generate PHP source files.
    #[arg(long = "php")]
    pub php: bool,
    /// Generate Python source files.
    #[arg(long = "python")]
    pub python: bool,
    /// Generate Ruby source files.
    #[arg(long = "ruby")]
    pub ruby: bool,
    /// Generate grpc-gateway source files.
    #[arg(long = "grpc_gateway")]
    pub grpc_gateway: bool,
    /// Generate swagger.json files.
    #[arg(long = "swagger")]
    pub swagger: bool,
}
