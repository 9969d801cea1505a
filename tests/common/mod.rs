//! Common test helpers for CLI tests.

#![allow(dead_code)] // Functions used across different test binaries

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Get the path to a test fixture
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Copy a fixture project into a fresh temp directory
pub fn fixture_project(name: &str) -> TempDir {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let src = fixture_path(name);
    for entry in walkdir::WalkDir::new(&src) {
        let entry = entry.expect("failed to walk fixture");
        let relative = entry.path().strip_prefix(&src).expect("fixture prefix");
        let dest = temp_dir.path().join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).expect("failed to create fixture dir");
        } else {
            fs::copy(entry.path(), &dest).expect("failed to copy fixture file");
        }
    }
    temp_dir
}

/// Replace temp directory paths with `<TEMPDIR>`
pub fn normalize_output(output: &str, dir: &Path) -> String {
    let mut normalized = output.to_string();
    if let Ok(canonical) = dir.canonicalize() {
        normalized = normalized.replace(&canonical.display().to_string(), "<TEMPDIR>");
    }
    normalized.replace(&dir.display().to_string(), "<TEMPDIR>")
}

/// Run thriftdoc commands in a directory and capture output.
///
/// Each command's invocation, stdout, stderr and exit code are recorded.
pub fn run_commands(dir: &Path, commands: &[&[&str]]) -> String {
    let mut output = String::new();

    for args in commands {
        output.push_str(&format!("$ thriftdoc {}\n", args.join(" ")));

        let result = Command::new(env!("CARGO_BIN_EXE_thriftdoc"))
            .args(*args)
            .current_dir(dir)
            .env("NO_COLOR", "1")
            .env_remove("THRIFTDOC_LOG")
            .output()
            .expect("failed to run thriftdoc");

        let stdout = String::from_utf8_lossy(&result.stdout);
        let stderr = String::from_utf8_lossy(&result.stderr);

        if !stdout.is_empty() {
            output.push_str(&stdout);
            if !stdout.ends_with('\n') {
                output.push('\n');
            }
        }
        if !stderr.is_empty() {
            output.push_str(&stderr);
            if !stderr.ends_with('\n') {
                output.push('\n');
            }
        }

        output.push_str(&format!("exit: {}\n\n", result.status.code().unwrap_or(-1)));
    }

    normalize_output(&output, dir)
}
