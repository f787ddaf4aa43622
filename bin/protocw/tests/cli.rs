//! ---
//! pcw_section: "02-invocation-driver"
//! pcw_subsection: "integration-tests"
//! pcw_type: "source"
//! pcw_scope: "code"
//! pcw_description: "Command-line behaviour of the protocw binary."
//! pcw_version: "v0.0.0-prealpha"
//! pcw_owner: "tbd"
//! ---
use std::env::consts::EXE_SUFFIX;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

const TOOLS: &[&str] = &[
    "protoc",
    "grpc_cpp_plugin",
    "grpc_csharp_plugin",
    "protoc-gen-go",
    "protoc-gen-grpc-gateway",
    "protoc-gen-grpc-java",
    "grpc_node_plugin",
    "grpc_objective_c_plugin",
    "grpc_php_plugin",
    "grpc_python_plugin",
    "grpc_ruby_plugin",
    "protoc-gen-swagger",
];

struct Workspace {
    _dir: TempDir,
    root: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("tools")).unwrap();
        fs::create_dir_all(root.join("gen")).unwrap();
        fs::create_dir_all(root.join("protos")).unwrap();
        Self { _dir: dir, root }
    }

    fn with_tools(self, names: &[&str]) -> Self {
        for name in names {
            fs::write(self.tool(name), b"").unwrap();
        }
        self
    }

    fn with_proto(self, rel: &str) -> Self {
        let path = self.root.join("protos").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"syntax = \"proto3\";\n").unwrap();
        self
    }

    fn tool(&self, name: &str) -> PathBuf {
        self.root.join("tools").join(format!("{name}{EXE_SUFFIX}"))
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::cargo_bin("protocw")
            .unwrap()
            .current_dir(&self.root)
            .env_remove("PROTOCW_TOOL_DIR")
            .env_remove("PROTOCW_PROTOC")
            .env_remove("PROTOCW_LOG")
            .env_remove("RUST_LOG")
            .arg("--tool_dir")
            .arg(self.root.join("tools"))
            .args(args)
            .output()
            .unwrap()
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn show(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn no_language_option_is_reported() {
    let ws = Workspace::new().with_tools(TOOLS);
    let output = ws.run(&["-i", "protos", "-o", "gen"]);
    assert!(output.status.success());
    assert!(text(&output.stderr).contains("No language option is specified"));
    assert!(output.stdout.is_empty());
}

#[test]
fn two_java_options_are_reported() {
    let ws = Workspace::new().with_tools(TOOLS);
    let output = ws.run(&["--java", "--java_nano", "--dry_run"]);
    assert!(text(&output.stderr).contains("More than one Java option is specified"));
    assert!(output.stdout.is_empty());
}

#[test]
fn dry_run_prints_planned_command_lines() {
    let ws = Workspace::new()
        .with_tools(TOOLS)
        .with_proto("api/v1/a.proto")
        .with_proto("api/v1/b.proto")
        .with_proto("root.proto");
    let output = ws.run(&[
        "-i", "protos", "-o", "gen", "--go", "--java_lite", "--grpc", "--dry_run",
    ]);
    assert!(output.status.success(), "{}", text(&output.stderr));

    let stdout = text(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4, "{stdout}");

    let protoc = show(&ws.tool("protoc"));
    let include = format!("-I{}", show(&ws.path("protos")));
    let gen = show(&ws.path("gen"));
    let root_proto = show(&ws.path("protos/root.proto"));
    let nested = format!(
        "{} {}",
        show(&ws.path("protos/api/v1/a.proto")),
        show(&ws.path("protos/api/v1/b.proto"))
    );

    assert_eq!(
        lines[0],
        format!("{protoc} {include} --go_out=plugins=grpc:{gen} {root_proto}")
    );
    assert_eq!(
        lines[1],
        format!(
            "{protoc} {include} --plugin=protoc-gen-grpc-java={java} --java_out={gen} \
             --grpc-java_out=lite:{gen} {root_proto}",
            java = show(&ws.tool("protoc-gen-grpc-java"))
        )
    );
    assert_eq!(
        lines[2],
        format!("{protoc} {include} --go_out=plugins=grpc:{gen} {nested}")
    );
    assert!(lines[3].ends_with(&nested));
}

#[test]
fn proto_path_list_is_added_after_input_root() {
    let ws = Workspace::new().with_tools(TOOLS).with_proto("a.proto");
    fs::create_dir_all(ws.path("inc1")).unwrap();
    fs::create_dir_all(ws.path("inc2")).unwrap();
    let output = ws.run(&[
        "-p",
        "inc1;inc2",
        "--swagger",
        "--dry_run",
        "-i",
        "protos",
        "-o",
        "gen",
    ]);
    let stdout = text(&output.stdout);
    let expected = format!(
        "-I{} -I{} -I{} --swagger_out=logtostderr=true:{}",
        show(&ws.path("protos")),
        show(&ws.path("inc1")),
        show(&ws.path("inc2")),
        show(&ws.path("gen"))
    );
    assert!(stdout.contains(&expected), "{stdout}");
}

#[test]
fn missing_plugin_names_the_path() {
    let ws = Workspace::new()
        .with_tools(&["protoc", "grpc_cpp_plugin"])
        .with_proto("a.proto");
    let output = ws.run(&["--cpp", "--python", "-i", "protos", "-o", "gen", "--dry_run"]);
    let stderr = text(&output.stderr);
    assert!(stderr.contains(&format!(
        "Executable file does not exist : {}",
        show(&ws.tool("grpc_python_plugin"))
    )));
    assert!(output.stdout.is_empty());
}

#[test]
fn output_dir_with_space_is_rejected() {
    let ws = Workspace::new().with_tools(TOOLS).with_proto("a.proto");
    fs::create_dir_all(ws.path("my gen")).unwrap();
    let output = ws.run(&["--ruby", "-i", "protos", "-o", "my gen", "--dry_run"]);
    assert!(text(&output.stderr).contains(&format!(
        "output_dir contains spaces : {}",
        show(&ws.path("my gen"))
    )));
    assert!(output.stdout.is_empty());
}

#[test]
fn input_dir_with_space_is_rejected() {
    let ws = Workspace::new().with_tools(TOOLS);
    fs::create_dir_all(ws.path("my protos")).unwrap();
    fs::write(ws.path("my protos/a.proto"), b"syntax = \"proto3\";\n").unwrap();
    let output = ws.run(&["--go", "-i", "my protos", "-o", "gen", "--dry_run"]);
    assert!(output.status.success());
    assert_eq!(
        text(&output.stderr),
        format!("input_dir contains spaces : {}\n", show(&ws.path("my protos")))
    );
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_input_dir_is_rejected() {
    let ws = Workspace::new().with_tools(TOOLS);
    let output = ws.run(&["--php", "-i", "nowhere", "-o", "gen", "--dry_run"]);
    assert!(text(&output.stderr).contains(&format!(
        "input_dir not exist : {}",
        show(&ws.path("nowhere"))
    )));
}

#[test]
fn nested_directory_with_space_aborts_whole_run() {
    let ws = Workspace::new()
        .with_tools(TOOLS)
        .with_proto("a/a.proto")
        .with_proto("b c/b.proto");
    let output = ws.run(&["--node", "-i", "protos", "-o", "gen", "--dry_run"]);
    assert!(text(&output.stderr).contains(&format!(
        "Directory contains spaces : {}",
        show(&ws.path("protos/b c"))
    )));
    assert!(output.stdout.is_empty());
}

#[test]
fn tool_dir_can_come_from_environment() {
    let ws = Workspace::new().with_tools(TOOLS).with_proto("a.proto");
    let output = Command::cargo_bin("protocw")
        .unwrap()
        .current_dir(&ws.root)
        .env("PROTOCW_TOOL_DIR", ws.path("tools"))
        .env_remove("PROTOCW_PROTOC")
        .args(["--csharp", "-i", "protos", "-o", "gen", "--dry_run"])
        .output()
        .unwrap();
    let stdout = text(&output.stdout);
    assert!(stdout.starts_with(&show(&ws.tool("protoc"))), "{stdout}");
    assert!(stdout.contains(&format!(
        "--plugin=protoc-gen-grpc={}",
        show(&ws.tool("grpc_csharp_plugin"))
    )));
}

#[cfg(unix)]
#[test]
fn compiler_stderr_is_relayed() {
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::new().with_tools(TOOLS).with_proto("a.proto");
    let protoc = ws.tool("protoc");
    let script = "#!/bin/sh\necho \"stdout noise\"\necho \"compiler says: $1\" >&2\nexit 1\n";
    fs::write(&protoc, script).unwrap();
    fs::set_permissions(&protoc, fs::Permissions::from_mode(0o755)).unwrap();

    let output = ws.run(&["--go", "-i", "protos", "-o", "gen"]);
    assert!(output.status.success());
    // Only the compiler's own text reaches stderr at default verbosity.
    assert_eq!(
        text(&output.stderr),
        format!("compiler says: -I{}\n\n", show(&ws.path("protos")))
    );
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
#[test]
fn launch_failure_is_reported_without_log_records() {
    let ws = Workspace::new().with_tools(TOOLS).with_proto("a.proto");
    // Exists but is not executable, so spawning it fails.
    fs::write(ws.tool("protoc"), b"not a program").unwrap();

    let output = ws.run(&["--go", "-i", "protos", "-o", "gen"]);
    assert!(output.status.success());
    let stderr = text(&output.stderr);
    assert!(stderr.starts_with("Exception raised : "), "{stderr}");
    assert_eq!(stderr.lines().count(), 1, "{stderr}");
    assert!(!stderr.contains("ERROR"), "{stderr}");
    assert!(!stderr.contains('\x1b'), "{stderr}");
}
