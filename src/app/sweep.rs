// plugin-tooling - app/sweep.rs
//
// Plugin directory sweep: walk a directory of native binaries, drop libtool
// leftovers and orphaned sidecars, and (re)write the meta file for every
// binary the target knows about.
//
// The walk is collected up front (sorted by file name) and processed
// afterwards, so metas written during the sweep are never revisited and the
// order of operations is deterministic.
//
// Failure is fail-fast: the first traversal, render or I/O error aborts the
// sweep. Writes are not atomic; re-running the sweep regenerates everything.

use crate::core::classify::{self, FileKind};
use crate::core::model::{
    AndroidCpu, EditorCpu, ExcludedPlatforms, OsType, PlatformGroup, StandaloneCpu, SweepTarget,
};
use crate::core::platform_meta::{self, AssetMeta};
use crate::util::error::{MetaError, SweepError};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

// =============================================================================
// Configuration and report
// =============================================================================

/// Parameters for one sweep.
#[derive(Debug, Clone, Copy)]
pub struct SweepConfig {
    /// Platform family whose binaries get metas.
    pub target: SweepTarget,

    /// Log every ignored file.
    pub debug: bool,
}

/// What a sweep did, in processing order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// Sidecars created or overwritten.
    pub written: Vec<PathBuf>,

    /// Sidecars deleted by this sweep because their asset no longer exists.
    pub orphans_removed: Vec<PathBuf>,

    /// Libtool `.la` files deleted by this sweep.
    pub libtool_removed: Vec<PathBuf>,

    /// Files the target does not handle.
    pub ignored: Vec<PathBuf>,
}

// =============================================================================
// Sweep
// =============================================================================

/// Sweep every file under `root` according to `config`.
///
/// Returns `Err` for an invalid root, any traversal error, or the first
/// failed write/delete.
pub fn sweep(root: &Path, config: &SweepConfig) -> Result<SweepReport, SweepError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(SweepError::NotADirectory {
                path: root.to_path_buf(),
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SweepError::RootNotFound {
                path: root.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(SweepError::Io {
                path: root.to_path_buf(),
                operation: "stat",
                source,
            })
        }
    }

    tracing::debug!(root = %root.display(), target = ?config.target, "Sweep starting");

    let files = collect_files(root)?;
    let mut report = SweepReport::default();

    for path in files {
        handle_file(path, config, &mut report)?;
    }

    tracing::info!(
        root = %root.display(),
        written = report.written.len(),
        orphans_removed = report.orphans_removed.len(),
        libtool_removed = report.libtool_removed.len(),
        ignored = report.ignored.len(),
        "Sweep complete"
    );

    Ok(report)
}

/// Apply the sweep rule for one collected file, recording what was done.
///
/// A file that vanished after the walk is not an error and is not recorded.
fn handle_file(
    path: PathBuf,
    config: &SweepConfig,
    report: &mut SweepReport,
) -> Result<(), SweepError> {
    match classify::classify(&path, config.target) {
        FileKind::LibtoolArchive => {
            if remove_if_present(&path)? {
                tracing::info!(file = %path.display(), "Removed libtool archive");
                report.libtool_removed.push(path);
            }
        }
        FileKind::Sidecar { source } => {
            let source_exists = source.try_exists().map_err(|e| SweepError::Io {
                path: source.clone(),
                operation: "stat",
                source: e,
            })?;
            if source_exists {
                tracing::trace!(file = %path.display(), "Sidecar has its asset");
                return Ok(());
            }
            if remove_if_present(&path)? {
                tracing::info!(file = %path.display(), "Removed orphaned meta");
                report.orphans_removed.push(path);
            }
        }
        FileKind::Ignored => {
            if config.debug {
                tracing::debug!(file = %path.display(), "Ignored file");
            }
            report.ignored.push(path);
        }
        kind => {
            let meta = build_meta(&kind, config.target)
                .map_err(|source| SweepError::Meta {
                    path: path.clone(),
                    source,
                })?;
            match meta {
                Some(meta) => {
                    let written = write_meta(&path, &meta)?;
                    tracing::info!(file = %written.display(), guid = %meta.guid, "Wrote meta");
                    report.written.push(written);
                }
                None => report.ignored.push(path),
            }
        }
    }
    Ok(())
}

/// All non-directory entries under `root`, depth-first, sorted by name.
fn collect_files(root: &Path) -> Result<Vec<PathBuf>, SweepError> {
    let walker = walkdir::WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry_result in walker {
        let entry = entry_result.map_err(|e| SweepError::Traversal {
            path: e
                .path()
                .map_or_else(|| root.to_path_buf(), Path::to_path_buf),
            source: e,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

/// Delete `path`; a file that is already gone is not an error.
fn remove_if_present(path: &Path) -> Result<bool, SweepError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(SweepError::Io {
            path: path.to_path_buf(),
            operation: "delete",
            source,
        }),
    }
}

/// Builder call for one binary kind under `target`. `None` when the kind
/// does not belong to the target.
fn build_meta(kind: &FileKind, target: SweepTarget) -> Result<Option<AssetMeta>, MetaError> {
    let meta = match (target, kind) {
        (SweepTarget::Android(cpu), FileKind::SharedObject) => {
            platform_meta::shared_library_meta(
                true,
                OsType::AnyOs,
                StandaloneCpu::None,
                EditorCpu::AnyCpu,
                cpu,
                &ExcludedPlatforms::from([PlatformGroup::Editor, PlatformGroup::Standalone]),
            )
        }
        (SweepTarget::Android(cpu), FileKind::StaticArchive) => platform_meta::static_archive_meta(
            true,
            EditorCpu::AnyCpu,
            OsType::AnyOs,
            cpu,
            &ExcludedPlatforms::from([PlatformGroup::Editor, PlatformGroup::Standalone]),
        ),
        (SweepTarget::Windows, FileKind::NativeDll) => platform_meta::native_dll_meta(
            false,
            OsType::Windows,
            StandaloneCpu::X86_64,
            EditorCpu::AnyCpu,
            &ExcludedPlatforms::from([PlatformGroup::Android]),
        )?,
        (SweepTarget::Windows, FileKind::DllImportLibrary) => platform_meta::static_archive_meta(
            false,
            EditorCpu::X86_64,
            OsType::Windows,
            AndroidCpu::Armv7,
            &ExcludedPlatforms::from([PlatformGroup::Android]),
        ),
        _ => return Ok(None),
    };
    Ok(Some(meta))
}

/// Overwrite the sidecar of `asset` with `meta`. Returns the sidecar path.
fn write_meta(asset: &Path, meta: &AssetMeta) -> Result<PathBuf, SweepError> {
    let target = classify::sidecar_path(asset);
    let io_err = |source| SweepError::Io {
        path: target.clone(),
        operation: "write",
        source,
    };

    let file = fs::File::create(&target).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    meta.render(&mut writer).map_err(|source| SweepError::Render {
        path: target.clone(),
        source,
    })?;
    writer.flush().map_err(io_err)?;
    Ok(target)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ARM64: SweepConfig = SweepConfig {
        target: SweepTarget::Android(AndroidCpu::Arm64),
        debug: true,
    };

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_root_not_found() {
        let result = sweep(Path::new("/nonexistent/plugin-tooling/sweep"), &ARM64);
        assert!(matches!(result, Err(SweepError::RootNotFound { .. })));
    }

    #[test]
    fn test_root_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("libfoo.so");
        fs::write(&file, b"\x7fELF").unwrap();
        let result = sweep(&file, &ARM64);
        assert!(matches!(result, Err(SweepError::NotADirectory { .. })));
    }

    #[test]
    fn test_processes_subdirectories_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("libb.so"), b"").unwrap();
        fs::write(root.join("liba.a"), b"").unwrap();
        let nested = root.join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("libc.so"), b"").unwrap();

        let report = sweep(root, &ARM64).unwrap();
        assert_eq!(
            names(&report.written),
            vec!["liba.a.meta", "libb.so.meta", "libc.so.meta"]
        );
        assert!(nested.join("libc.so.meta").is_file());
    }

    #[test]
    fn test_existing_meta_is_overwritten_with_new_guid() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("libfoo.so"), b"").unwrap();
        fs::write(root.join("libfoo.so.meta"), "stale\n").unwrap();

        sweep(root, &ARM64).unwrap();
        let first = fs::read_to_string(root.join("libfoo.so.meta")).unwrap();
        assert!(first.starts_with("fileFormatVersion: 2\n"));

        let report = sweep(root, &ARM64).unwrap();
        let second = fs::read_to_string(root.join("libfoo.so.meta")).unwrap();
        assert_eq!(report.written.len(), 1);
        assert!(report.orphans_removed.is_empty());
        assert_ne!(first, second, "guid must be regenerated on each run");
        assert_eq!(first.lines().count(), second.lines().count());
    }

    #[test]
    fn test_other_platform_binaries_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("core.dll"), b"").unwrap();
        fs::write(root.join("notes.txt"), b"").unwrap();

        let report = sweep(root, &ARM64).unwrap();
        assert!(report.written.is_empty());
        assert_eq!(names(&report.ignored), vec!["core.dll", "notes.txt"]);
        assert!(!root.join("core.dll.meta").exists());
    }

    #[test]
    fn test_build_meta_rejects_foreign_kind() {
        let meta = build_meta(&FileKind::NativeDll, SweepTarget::Android(AndroidCpu::Armv7)).unwrap();
        assert!(meta.is_none());
    }

    #[test]
    fn test_vanished_files_are_not_reported_as_removed() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = SweepReport::default();
        handle_file(dir.path().join("gone.la"), &ARM64, &mut report).unwrap();
        handle_file(dir.path().join("gone.so.meta"), &ARM64, &mut report).unwrap();
        assert_eq!(report, SweepReport::default());

        fs::write(dir.path().join("here.la"), b"").unwrap();
        handle_file(dir.path().join("here.la"), &ARM64, &mut report).unwrap();
        assert_eq!(names(&report.libtool_removed), vec!["here.la"]);
        assert!(report.orphans_removed.is_empty());
    }

    #[test]
    fn test_remove_if_present_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!remove_if_present(&dir.path().join("gone.la")).unwrap());
    }
}
