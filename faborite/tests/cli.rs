use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const HELLO_PLUGIN: &str = r#"
[plugin]
name = "hello"
description = "Greets"

[[register]]
name = "hello"
exec = ["echo", "hello"]
"#;

struct TestEnv {
    home: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            home: tempfile::tempdir().unwrap(),
        }
    }

    fn plugin_dir(&self) -> PathBuf {
        self.home.path().join(".faborite").join("plugins")
    }

    fn write_plugin(&self, stem: &str, content: &str) {
        std::fs::create_dir_all(self.plugin_dir()).unwrap();
        std::fs::write(self.plugin_dir().join(format!("{}.toml", stem)), content).unwrap();
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_faborite"));
        cmd.env("HOME", self.home.path())
            .env("RUST_LOG", "info")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("Failed to run faborite")
    }

    fn run_with_stdin(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command()
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
            .expect("Failed to start faborite");
        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_plugin_dir_defaults_under_home() {
    let env = TestEnv::new();
    let output = env.run(&["plugin", "dir"]);
    assert!(output.status.success());
    assert_eq!(Path::new(stdout(&output).trim()), env.plugin_dir());
}

#[test]
fn test_plugin_dir_flag_overrides() {
    let env = TestEnv::new();
    let custom = env.home.path().join("elsewhere");
    let output = env.run(&["--plugin-dir", custom.to_str().unwrap(), "plugin", "dir"]);
    assert!(output.status.success());
    assert_eq!(Path::new(stdout(&output).trim()), custom);
}

#[test]
fn test_plugin_list_survives_broken_plugin() {
    let env = TestEnv::new();
    env.write_plugin("hello", HELLO_PLUGIN);
    env.write_plugin("broken", "[[register]\nname = ");

    let output = env.run(&["plugin", "list"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "hello");

    let errors = stderr(&output);
    assert!(errors.contains("Failed to load plugin broken"), "stderr: {}", errors);
    assert!(errors.contains("Loaded plugin: hello"), "stderr: {}", errors);
}

#[test]
fn test_default_invocation_lists_plugins() {
    let env = TestEnv::new();
    env.write_plugin("hello", HELLO_PLUGIN);

    let output = env.run(&[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), r#"Loaded plugins: ["hello"]"#);
}

#[test]
fn test_default_invocation_creates_plugin_dir() {
    let env = TestEnv::new();
    let output = env.run(&[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Loaded plugins: []");
    assert!(env.plugin_dir().is_dir());
}

#[cfg(unix)]
#[test]
fn test_run_plugin_command() {
    let env = TestEnv::new();
    env.write_plugin("hello", HELLO_PLUGIN);

    let output = env.run(&["run", "hello", "world"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "hello world");
}

#[cfg(unix)]
#[test]
fn test_external_subcommand_runs_plugin() {
    let env = TestEnv::new();
    env.write_plugin("hello", HELLO_PLUGIN);

    let output = env.run(&["hello", "from", "cli"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "hello from cli");
}

#[cfg(unix)]
#[test]
fn test_run_with_named_args() {
    let env = TestEnv::new();
    env.write_plugin(
        "fmt",
        r#"
[[register]]
name = "fmt"
exec = ["sh", "-c", "printf '%s' \"$FABORITE_ARG_OUTPUT_FORMAT\""]
"#,
    );

    let output = env.run(&["run", "fmt", "--set", "output-format=json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "json\n");
}

#[test]
fn test_run_unknown_command_fails() {
    let env = TestEnv::new();
    let output = env.run(&["run", "missing-cmd"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown command: missing-cmd"));
}

#[cfg(unix)]
#[test]
fn test_failing_handler_fails_the_run() {
    let env = TestEnv::new();
    env.write_plugin(
        "fail",
        r#"
[[register]]
name = "fail"
exec = ["sh", "-c", "echo nope >&2; exit 2"]
"#,
    );

    let output = env.run(&["run", "fail"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("nope"));
}

#[test]
fn test_plugin_install() {
    let env = TestEnv::new();
    let source = env.home.path().join("hello.toml");
    std::fs::write(&source, HELLO_PLUGIN).unwrap();

    let output = env.run(&["plugin", "install", source.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(env.plugin_dir().join("hello.toml").is_file());

    let output = env.run(&["plugin", "list"]);
    assert_eq!(stdout(&output).trim(), "hello");
}

#[test]
fn test_plugin_install_rejects_invalid() {
    let env = TestEnv::new();
    let source = env.home.path().join("bad.toml");
    std::fs::write(&source, "register = [").unwrap();

    let output = env.run(&["plugin", "install", source.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(!env.plugin_dir().join("bad.toml").exists());
}

#[test]
fn test_repl_over_piped_stdin() {
    let env = TestEnv::new();
    let output = env.run_with_stdin(
        &["repl"],
        "sync ws1\n\nlist\nprofile mytable\nfrobnicate x y\nhistory\nexit\nsync never\n",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.starts_with("Faborite Interactive REPL\n"));
    assert!(out.contains("Triggering sync for workspace: ws1\n"));
    assert!(out.contains("Listing tables in workspace: default\n"));
    assert!(out.contains("Profiling table: mytable\n"));
    assert!(out.contains("Unknown command: frobnicate\n"));
    assert!(out.contains("  1  sync ws1\n  2  list\n  3  profile mytable\n  4  frobnicate x y\n"));
    assert!(!out.contains("never"));
}

#[test]
fn test_repl_uses_configured_prompt() {
    let env = TestEnv::new();
    let config = env.home.path().join("faborite.toml");
    std::fs::write(&config, "[repl]\nprompt = \"fab$ \"\nbanner = false\n").unwrap();

    let output = env.run_with_stdin(&["--config", config.to_str().unwrap(), "repl"], "list ws\n");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "fab$ Listing tables in workspace: ws\nfab$ "
    );
}

#[test]
fn test_missing_explicit_config_fails() {
    let env = TestEnv::new();
    let output = env.run(&["--config", "/nonexistent/faborite.toml", "plugin", "dir"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Configuration error"));
}
