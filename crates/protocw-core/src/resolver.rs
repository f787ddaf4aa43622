//! ---
//! pcw_section: "01-configuration-resolver"
//! pcw_subsection: "module"
//! pcw_type: "source"
//! pcw_scope: "code"
//! pcw_description: "Validation of options and construction of compiler flags."
//! pcw_version: "v0.0.0-prealpha"
//! pcw_owner: "tbd"
//! ---
//! Turns [`Options`] into a [`ResolvedConfiguration`].
//!
//! Resolution never touches the filesystem directly: relative paths are made
//! absolute lexically against [`ResolveContext::cwd`] and existence checks go
//! through a [`PathProbe`].

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;
use protocw_logging::{pw_debug, LogContext};

use crate::batch::DirectoryBatch;
use crate::error::{DirRole, Error, Result};
use crate::options::Options;
use crate::runner::Invocation;
use crate::target::{Language, TargetSet};
use crate::toolchain::{Tool, Toolchain};

/// Existence queries used during validation.
pub trait PathProbe {
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
}

/// [`PathProbe`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Environment a resolution runs against.
#[derive(Debug, Clone)]
pub struct ResolveContext {
    pub cwd: PathBuf,
    pub toolchain: Toolchain,
}

impl ResolveContext {
    pub fn new(cwd: impl Into<PathBuf>, toolchain: Toolchain) -> Self {
        Self {
            cwd: cwd.into(),
            toolchain,
        }
    }

    /// Context for the running process: its working directory and, unless a
    /// directory is given, the tools next to its own executable.
    pub fn from_process(tool_dir: Option<PathBuf>) -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        let toolchain = match tool_dir {
            Some(dir) => Toolchain::colocated(dir),
            None => Toolchain::beside_current_exe()?,
        };
        Ok(Self::new(cwd, toolchain))
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf> {
        path.absolutize_from(self.cwd.as_path())
            .map(|abs| abs.into_owned())
            .map_err(|source| Error::Absolutize {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Validated options with every compiler flag precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfiguration {
    compiler: PathBuf,
    input_dir: PathBuf,
    output_dir: PathBuf,
    include_args: Vec<OsString>,
    targets: TargetSet,
    flags: BTreeMap<Language, Vec<OsString>>,
}

impl ResolvedConfiguration {
    pub fn compiler(&self) -> &Path {
        &self.compiler
    }

    /// Absolute root scanned for schema files.
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `-I` arguments, input root first.
    pub fn include_args(&self) -> &[OsString] {
        &self.include_args
    }

    pub fn include_line(&self) -> String {
        join_lossy(&self.include_args)
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    /// Full flag list for `language`, excluding the trailing file list.
    pub fn flags(&self, language: Language) -> Option<&[OsString]> {
        self.flags.get(&language).map(Vec::as_slice)
    }

    /// Space-joined flags, lossily converted for display.
    pub fn flag_line(&self, language: Language) -> Option<String> {
        self.flags(language).map(join_lossy)
    }

    /// Compiler invocation for one language over one directory batch.
    pub fn invocation(&self, language: Language, batch: &DirectoryBatch) -> Option<Invocation> {
        let flags = self.flags(language)?;
        let args = flags
            .iter()
            .cloned()
            .chain(batch.files.iter().map(|file| file.as_os_str().to_owned()))
            .collect();
        Some(Invocation {
            program: self.compiler.clone(),
            args,
            language,
            directory: batch.directory.clone(),
        })
    }
}

/// Validate `options` and build every per-language flag list.
///
/// Checks run in a fixed order and the first failure is returned: language
/// selection, executables, tool directory, input and output directories,
/// then each extra include path.
pub fn resolve(
    options: &Options,
    context: &ResolveContext,
    probe: &dyn PathProbe,
) -> Result<ResolvedConfiguration> {
    let targets = TargetSet::from_flags(&options.languages)?;

    let compiler = context.absolute(&context.toolchain.path(Tool::Compiler))?;
    check_executable(probe, &compiler)?;
    let mut plugins = BTreeMap::new();
    for language in targets.iter() {
        let plugin = context.absolute(&context.toolchain.path(Tool::Plugin(language)))?;
        check_executable(probe, &plugin)?;
        plugins.insert(language, plugin);
    }

    let tool_dir = context.absolute(context.toolchain.directory())?;
    reject_spaces(DirRole::Tool, &tool_dir)?;

    let input_dir = check_directory(context, probe, DirRole::Input, &options.input_dir)?;
    let output_dir = check_directory(context, probe, DirRole::Output, &options.output_dir)?;
    let mut include_args = vec![path_arg("-I", &input_dir)];
    for path in &options.proto_paths {
        let include = check_directory(context, probe, DirRole::ProtoPath, path)?;
        include_args.push(path_arg("-I", &include));
    }

    let out = output_dir.as_os_str();
    let flags = targets
        .iter()
        .map(|language| {
            let mut flags = include_args.clone();
            flags.extend(language_flags(
                language,
                &targets,
                options.grpc,
                plugins.get(&language).map(PathBuf::as_path),
                out,
            ));
            (language, flags)
        })
        .collect::<BTreeMap<_, _>>();

    for (language, args) in &flags {
        let ctx = LogContext::new()
            .with_language(language.as_str())
            .with_stage("resolve");
        pw_debug!(context = ctx, "flags: {}", join_lossy(args));
    }

    Ok(ResolvedConfiguration {
        compiler,
        input_dir,
        output_dir,
        include_args,
        targets,
        flags,
    })
}

fn language_flags(
    language: Language,
    targets: &TargetSet,
    grpc: bool,
    plugin: Option<&Path>,
    out: &OsStr,
) -> Vec<OsString> {
    let out_flag = format!("--{}=", output_flag(language));
    match language {
        Language::Go if grpc => vec![path_arg(&format!("{out_flag}plugins=grpc:"), out)],
        Language::Go => vec![path_arg(&out_flag, out)],
        Language::GrpcGateway | Language::Swagger => {
            vec![path_arg(&format!("{out_flag}logtostderr=true:"), out)]
        }
        Language::Java => {
            let mut flags = vec![
                plugin_flag("protoc-gen-grpc-java", plugin),
                path_arg(&out_flag, out),
            ];
            if grpc {
                let flavor = targets.java_flavor().and_then(|f| f.grpc_option());
                flags.push(match flavor {
                    Some(option) => path_arg(&format!("--grpc-java_out={option}:"), out),
                    None => path_arg("--grpc-java_out=", out),
                });
            }
            flags
        }
        Language::Cpp
        | Language::CSharp
        | Language::Node
        | Language::ObjectiveC
        | Language::Php
        | Language::Python
        | Language::Ruby => {
            let mut flags = vec![
                plugin_flag("protoc-gen-grpc", plugin),
                path_arg(&out_flag, out),
            ];
            if grpc {
                flags.push(path_arg("--grpc_out=", out));
            }
            flags
        }
    }
}

fn output_flag(language: Language) -> &'static str {
    match language {
        Language::Cpp => "cpp_out",
        Language::CSharp => "csharp_out",
        Language::Node => "js_out",
        Language::ObjectiveC => "objc_out",
        Language::Php => "php_out",
        Language::Python => "python_out",
        Language::Ruby => "ruby_out",
        Language::Go => "go_out",
        Language::Java => "java_out",
        Language::GrpcGateway => "grpc-gateway_out",
        Language::Swagger => "swagger_out",
    }
}

fn plugin_flag(name: &str, plugin: Option<&Path>) -> OsString {
    let path = plugin.map(Path::as_os_str).unwrap_or_default();
    path_arg(&format!("--plugin={name}="), path)
}

/// `prefix` followed by the raw bytes of `path`; never lossy.
fn path_arg(prefix: &str, path: impl AsRef<OsStr>) -> OsString {
    let mut arg = OsString::from(prefix);
    arg.push(path);
    arg
}

pub(crate) fn join_lossy(args: &[OsString]) -> String {
    args.iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

fn check_executable(probe: &dyn PathProbe, path: &Path) -> Result<()> {
    if probe.is_file(path) {
        Ok(())
    } else {
        Err(Error::MissingExecutable(path.to_path_buf()))
    }
}

fn check_directory(
    context: &ResolveContext,
    probe: &dyn PathProbe,
    role: DirRole,
    path: &Path,
) -> Result<PathBuf> {
    let absolute = context.absolute(path)?;
    if !probe.is_dir(&absolute) {
        return Err(Error::MissingDirectory {
            role,
            path: absolute,
        });
    }
    reject_spaces(role, &absolute)?;
    Ok(absolute)
}

pub(crate) fn reject_spaces(role: DirRole, path: &Path) -> Result<()> {
    if display(path).contains(' ') {
        return Err(Error::DirectoryContainsSpace {
            role,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

pub(crate) fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
