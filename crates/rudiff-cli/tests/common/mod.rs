//! Shared test harness for rudiff end-to-end tests.
//!
//! Provides binary discovery and process runners with pinned environment
//! variables for deterministic output across machines and CI runners.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Captured output from running the binary.
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Discover the path to the compiled `rudiff` binary.
pub fn rudiff_bin() -> PathBuf {
    let mut path = std::env::current_exe()
        .unwrap()
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf();
    path.push("rudiff");
    path
}

fn pin_env(cmd: &mut Command, dir: &Path) {
    cmd.current_dir(dir).env("TZ", "UTC").env("LC_ALL", "C");
}

/// Run rudiff in `dir` with the given arguments.
pub fn rudiff(dir: &Path, args: &[&str]) -> CommandResult {
    let mut cmd = Command::new(rudiff_bin());
    cmd.args(args).stdin(Stdio::null());
    pin_env(&mut cmd, dir);
    let output = cmd.output().expect("failed to run rudiff");
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

/// Run rudiff with bytes fed to standard input.
pub fn rudiff_with_stdin(dir: &Path, args: &[&str], input: &[u8]) -> CommandResult {
    let mut cmd = Command::new(rudiff_bin());
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    pin_env(&mut cmd, dir);
    let mut child = cmd.spawn().expect("failed to spawn rudiff");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input)
        .expect("failed to write stdin");
    let output = child.wait_with_output().expect("failed to wait for rudiff");
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

/// Write a file, creating parent directories as needed.
pub fn write_file(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

/// Drop the first `n` lines (the mtime headers of -c and -u output).
pub fn skip_lines(text: &str, n: usize) -> String {
    text.splitn(n + 1, '\n').nth(n).unwrap_or("").to_string()
}
