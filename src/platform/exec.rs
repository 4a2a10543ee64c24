// plugin-tooling - platform/exec.rs
//
// External executable lookup and invocation.
//
// Tools inherit the parent's stdio unless the caller redirects it, so their
// own diagnostics reach the user unchanged. A non-zero exit is an error;
// nothing is retried.

use crate::util::error::DocsError;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Locate `name` on `search_path`, or on PATH when `search_path` is `None`.
///
/// On Windows each PATHEXT extension is tried as well.
pub fn find_executable(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let paths = match search_path {
        Some(p) => p.to_os_string(),
        None => env::var_os("PATH")?,
    };
    env::split_paths(&paths)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir, name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let exts = env::var_os("PATHEXT").unwrap_or_else(|| std::ffi::OsString::from(".COM;.EXE;.BAT;.CMD"));
    let mut out = vec![dir.join(name)];
    for ext in exts.to_string_lossy().split(';').filter(|e| !e.is_empty()) {
        out.push(dir.join(format!("{name}{ext}")));
    }
    out
}

#[cfg(not(windows))]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![dir.join(name)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| m.is_file())
}

/// Run `command` to completion, mapping spawn failures and unsuccessful
/// exits to `DocsError`.
pub fn run_tool(tool: &'static str, command: &mut Command) -> Result<(), DocsError> {
    tracing::debug!(tool, command = ?command, "Running external tool");
    let status = command
        .status()
        .map_err(|source| DocsError::Spawn { tool, source })?;
    if status.success() {
        Ok(())
    } else {
        tracing::error!(tool, code = ?status.code(), "External tool failed");
        Err(DocsError::ExitStatus {
            tool,
            code: status.code(),
        })
    }
}
