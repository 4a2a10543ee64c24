// plugin-tooling - tests/e2e_sweep.rs
//
// End-to-end tests for the plugin directory sweep.
//
// These tests exercise the real filesystem, real walkdir traversal and the
// real meta builders and emitter. No mocks, no stubs.

use plugin_tooling::app::sweep::{sweep, SweepConfig};
use plugin_tooling::core::model::{AndroidCpu, Preset, SweepTarget};
use plugin_tooling::platform::config::load_config;
use plugin_tooling::util::error::SweepError;
use std::fs;
use std::path::Path;

// =============================================================================
// Helpers
// =============================================================================

fn android(cpu: AndroidCpu) -> SweepConfig {
    SweepConfig {
        target: SweepTarget::Android(cpu),
        debug: false,
    }
}

fn windows() -> SweepConfig {
    SweepConfig {
        target: SweepTarget::Windows,
        debug: true,
    }
}

fn touch(path: &Path) {
    fs::write(path, b"").expect("create file");
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read meta")
}

/// Meta text with the guid line blanked out.
fn without_guid(text: &str) -> String {
    text.lines()
        .map(|l| if l.starts_with("guid: ") { "guid: <guid>" } else { l })
        .collect::<Vec<_>>()
        .join("\n")
}

fn descriptor_count(text: &str) -> usize {
    text.lines().filter(|l| *l == "  - first:").count()
}

// =============================================================================
// Android
// =============================================================================

/// A lone shared object gets a meta enabled for Android on the requested CPU only.
#[test]
fn e2e_shared_object_gets_android_meta() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("lib.so"));

    let report = sweep(dir.path(), &android(AndroidCpu::Arm64)).unwrap();
    let meta_path = dir.path().join("lib.so.meta");
    assert_eq!(report.written, vec![meta_path.clone()]);

    let text = read(&meta_path);
    assert!(text.starts_with("fileFormatVersion: 2\nguid: "));
    assert_eq!(descriptor_count(&text), 8);
    assert!(
        text.contains(
            "      Android: Android\n    second:\n      enabled: 1\n      settings:\n        \
             AndroidSharedLibraryType: Executable\n        CPU: ARM64\n"
        ),
        "android descriptor mismatch:\n{text}"
    );
    assert!(text.contains("      Any:\n    second:\n      enabled: 1\n"));
    assert!(text.contains("      Editor: Editor\n    second:\n      enabled: 0\n"));
    assert!(text.contains("        Exclude Android: 0\n        Exclude Editor: 1\n"));

    let guid = text
        .lines()
        .find_map(|l| l.strip_prefix("guid: "))
        .expect("guid line");
    assert_eq!(guid.len(), 32);
    assert!(guid.chars().all(|c| c.is_ascii_hexdigit()));
}

/// A static archive for ARMv7 records the ARMv7 CPU.
#[test]
fn e2e_static_archive_for_armv7() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("libssl.a"));

    sweep(dir.path(), &android(AndroidCpu::Armv7)).unwrap();
    let text = read(&dir.path().join("libssl.a.meta"));
    assert_eq!(descriptor_count(&text), 8);
    assert!(text.contains("        CPU: ARMv7\n"));
    assert!(text.contains("        OS: AnyOS\n"));
}

/// Orphaned sidecars are removed, sidecars with an asset are kept.
#[test]
fn e2e_orphaned_meta_is_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("orphan.so.meta"), "fileFormatVersion: 2\n").unwrap();
    fs::create_dir(root.join("include")).unwrap();
    fs::write(root.join("include.meta"), "folderAsset: yes\n").unwrap();

    let report = sweep(root, &android(AndroidCpu::Arm64)).unwrap();
    assert!(!root.join("orphan.so.meta").exists());
    assert!(root.join("include.meta").exists(), "folder meta must survive");
    assert_eq!(report.orphans_removed, vec![root.join("orphan.so.meta")]);
}

/// Libtool archives are deleted even when the library they describe exists.
#[test]
fn e2e_libtool_archive_is_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("x.la"));
    touch(&root.join("x.so"));

    let report = sweep(root, &android(AndroidCpu::Arm64)).unwrap();
    assert!(!root.join("x.la").exists());
    assert!(root.join("x.so").exists());
    assert!(root.join("x.so.meta").exists());
    assert_eq!(report.libtool_removed, vec![root.join("x.la")]);
}

/// Running the sweep twice only changes the guid.
#[test]
fn e2e_rerun_differs_only_in_guid() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("libcrypto.so"));
    let meta = dir.path().join("libcrypto.so.meta");

    sweep(dir.path(), &android(AndroidCpu::Arm64)).unwrap();
    let first = read(&meta);
    sweep(dir.path(), &android(AndroidCpu::Arm64)).unwrap();
    let second = read(&meta);

    assert_ne!(first, second);
    assert_eq!(without_guid(&first), without_guid(&second));
}

// =============================================================================
// Windows
// =============================================================================

#[test]
fn e2e_windows_dll_and_import_library() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(&root.join("core.dll"));
    touch(&root.join("libcore.dll.a"));
    touch(&root.join("core.pdb"));
    fs::write(root.join("removed.dll.meta"), "stale\n").unwrap();

    let report = sweep(root, &windows()).unwrap();
    assert_eq!(report.written.len(), 2);
    assert_eq!(report.orphans_removed, vec![root.join("removed.dll.meta")]);
    assert_eq!(report.ignored, vec![root.join("core.pdb")]);

    let dll = read(&root.join("core.dll.meta"));
    assert_eq!(descriptor_count(&dll), 7, "DLL meta has no Android entry");
    assert!(!dll.contains("Android: Android"));
    assert!(dll.contains("        Exclude Android: 1\n"));
    assert!(dll.contains("      Standalone: Win64\n    second:\n      enabled: 1\n      settings:\n        CPU: AnyCPU\n"));
    assert!(dll.contains("        OS: Windows\n"));

    let import_lib = read(&root.join("libcore.dll.a.meta"));
    assert_eq!(descriptor_count(&import_lib), 8);
    assert!(import_lib.contains("      Android: Android\n    second:\n      enabled: 0\n"));
    assert!(import_lib.contains("        CPU: x86_64\n"));
}

// =============================================================================
// Configured layout
// =============================================================================

/// The preset directory comes from tooling.toml and the sweep runs there.
#[test]
fn e2e_preset_directory_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let tools_root = dir.path().join("Utils~");
    fs::create_dir(&tools_root).unwrap();
    fs::write(
        tools_root.join("tooling.toml"),
        "[paths]\nplugins_dir = \"../Plugins\"\n",
    )
    .unwrap();
    let arm_dir = dir.path().join("Plugins").join("Android").join("armeabi-v7a");
    fs::create_dir_all(&arm_dir).unwrap();
    touch(&arm_dir.join("libnative.so"));

    let (config, warnings) = load_config(&tools_root);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    let plugin_dir = config.plugin_dir(Preset::AndroidArmv7);
    let sweep_config = SweepConfig {
        target: Preset::AndroidArmv7.target(),
        debug: false,
    };
    sweep(&plugin_dir, &sweep_config).unwrap();

    let text = read(&arm_dir.join("libnative.so.meta"));
    assert!(text.contains("        CPU: ARMv7\n"));
}

#[test]
fn e2e_missing_preset_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let (config, _) = load_config(dir.path());
    let result = sweep(&config.plugin_dir(Preset::Windows), &windows());
    assert!(
        matches!(result, Err(SweepError::RootNotFound { .. })),
        "expected RootNotFound, got {result:?}"
    );
}
