//! ---
//! pcw_section: "01-configuration-resolver"
//! pcw_subsection: "module"
//! pcw_type: "source"
//! pcw_scope: "code"
//! pcw_description: "Expected locations of the compiler and its plugins."
//! pcw_version: "v0.0.0-prealpha"
//! pcw_owner: "tbd"
//! ---
use std::collections::BTreeMap;
use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};

use crate::target::Language;

/// Environment variable overriding the directory searched for executables.
pub const TOOL_DIR_ENV: &str = "PROTOCW_TOOL_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Compiler,
    Plugin(Language),
}

impl Tool {
    /// File name without the platform executable suffix.
    pub fn base_name(&self) -> &'static str {
        match self {
            Tool::Compiler => "protoc",
            Tool::Plugin(language) => match language {
                Language::Cpp => "grpc_cpp_plugin",
                Language::CSharp => "grpc_csharp_plugin",
                Language::Go => "protoc-gen-go",
                Language::GrpcGateway => "protoc-gen-grpc-gateway",
                Language::Java => "protoc-gen-grpc-java",
                Language::Node => "grpc_node_plugin",
                Language::ObjectiveC => "grpc_objective_c_plugin",
                Language::Php => "grpc_php_plugin",
                Language::Python => "grpc_python_plugin",
                Language::Ruby => "grpc_ruby_plugin",
                Language::Swagger => "protoc-gen-swagger",
            },
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}{}", self.base_name(), EXE_SUFFIX)
    }
}

/// Mapping from each tool to the path it is expected at.
///
/// Tools default to their conventional file name inside [`Toolchain::directory`];
/// individual entries can be pointed elsewhere with [`Toolchain::with_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    directory: PathBuf,
    compiler: Option<PathBuf>,
    plugins: BTreeMap<Language, PathBuf>,
}

impl Toolchain {
    /// Every tool lives side by side in `directory`.
    pub fn colocated(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            compiler: None,
            plugins: BTreeMap::new(),
        }
    }

    /// Tools co-located with the running executable.
    pub fn beside_current_exe() -> std::io::Result<Self> {
        let exe = std::env::current_exe()?;
        let directory = exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::colocated(directory))
    }

    pub fn with_path(mut self, tool: Tool, path: impl Into<PathBuf>) -> Self {
        match tool {
            Tool::Compiler => self.compiler = Some(path.into()),
            Tool::Plugin(language) => {
                self.plugins.insert(language, path.into());
            }
        }
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path(&self, tool: Tool) -> PathBuf {
        let custom = match tool {
            Tool::Compiler => self.compiler.as_ref(),
            Tool::Plugin(language) => self.plugins.get(&language),
        };
        custom
            .cloned()
            .unwrap_or_else(|| self.directory.join(tool.file_name()))
    }
}
