// plugin-tooling - core/classify.rs
//
// Classification of plugin directory entries by file-name suffixes.
// Pure: inspects names only, never touches the filesystem.
//
// Suffixes follow the usual path convention: leading dots are ignored and
// every dot-separated component after the first is a suffix, so
// `libfoo.dll.a` has suffixes [".dll", ".a"] and `.hidden` has none.

use crate::core::model::SweepTarget;
use crate::util::constants;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// What the sweeper should do with a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    /// Libtool `.la` description; always removed.
    LibtoolArchive,

    /// A `.meta` sidecar. `source` is the asset it describes.
    Sidecar { source: PathBuf },

    /// Android shared object (`.so`).
    SharedObject,

    /// Android static archive (`.a`).
    StaticArchive,

    /// Windows native library (`.dll`).
    NativeDll,

    /// MinGW import library (`.dll.a`).
    DllImportLibrary,

    /// Not handled by the selected target.
    Ignored,
}

/// Suffixes of `file_name`, in order.
pub fn suffixes(file_name: &str) -> Vec<&str> {
    if file_name.ends_with('.') {
        return Vec::new();
    }
    let trimmed = file_name.trim_start_matches('.');
    let mut out = Vec::new();
    let mut rest = trimmed;
    // Skip the stem, then collect each ".ext" component.
    if let Some(first_dot) = rest.find('.') {
        rest = &rest[first_dot..];
        while !rest.is_empty() {
            let next = rest[1..].find('.').map_or(rest.len(), |i| i + 1);
            out.push(&rest[..next]);
            rest = &rest[next..];
        }
    }
    out
}

/// Classify `path` for a sweep over `target`.
///
/// Checks run in a fixed order: libtool archives, sidecars, then the
/// binary kinds the target generates metas for.
pub fn classify(path: &Path, target: SweepTarget) -> FileKind {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return FileKind::Ignored;
    };
    let suffixes = suffixes(file_name);

    if suffixes.contains(&constants::LIBTOOL_SUFFIX) {
        return FileKind::LibtoolArchive;
    }

    if suffixes.last() == Some(&constants::META_SUFFIX) {
        let stem = &file_name[..file_name.len() - constants::META_SUFFIX.len()];
        return FileKind::Sidecar {
            source: path.with_file_name(stem),
        };
    }

    match target {
        SweepTarget::Android(_) => match suffixes.as_slice() {
            [s] if *s == constants::SHARED_OBJECT_SUFFIX => FileKind::SharedObject,
            [s] if *s == constants::STATIC_ARCHIVE_SUFFIX => FileKind::StaticArchive,
            _ => FileKind::Ignored,
        },
        SweepTarget::Windows => match suffixes.as_slice() {
            [s] if *s == constants::DLL_SUFFIX => FileKind::NativeDll,
            [dll, a] if *dll == constants::DLL_SUFFIX && *a == constants::STATIC_ARCHIVE_SUFFIX => {
                FileKind::DllImportLibrary
            }
            _ => FileKind::Ignored,
        },
    }
}

/// Path of the sidecar that describes `asset`.
pub fn sidecar_path(asset: &Path) -> PathBuf {
    let mut name = OsString::from(asset.as_os_str());
    name.push(constants::META_SUFFIX);
    PathBuf::from(name)
}
