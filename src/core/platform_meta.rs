// plugin-tooling - core/platform_meta.rs
//
// Plugin importer meta documents for native libraries.
//
// Three builders, one per asset kind (Android shared object, static archive,
// Windows DLL). Each is pure apart from drawing a fresh random guid, and
// returns a typed `AssetMeta` that converts to a `Value` tree for core::yaml.
//
// Descriptor order is fixed: excluded summary, Android, Any, Editor, Linux64,
// OSX, Win, Win64. The DLL builder has no Android descriptor.

use crate::core::model::{
    AndroidCpu, EditorCpu, ExcludedPlatforms, OsType, PlatformGroup, StandaloneCpu,
};
use crate::core::value::{Mapping, Value};
use crate::core::yaml;
use crate::util::constants;
use crate::util::error::{MetaError, RenderError};
use std::io::Write;

// =============================================================================
// Document model
// =============================================================================

/// Identifies one descriptor in `platformData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformSlot {
    ExcludedSummary,
    Android,
    Any,
    Editor,
    Linux64,
    Osx,
    Win,
    Win64,
}

impl PlatformSlot {
    /// The `first:` selector as (key, value). `Any` has a null value.
    pub fn selector(&self) -> (&'static str, Option<&'static str>) {
        match self {
            PlatformSlot::ExcludedSummary => ("", Some("Any")),
            PlatformSlot::Android => ("Android", Some("Android")),
            PlatformSlot::Any => ("Any", None),
            PlatformSlot::Editor => ("Editor", Some("Editor")),
            PlatformSlot::Linux64 => ("Standalone", Some("Linux64")),
            PlatformSlot::Osx => ("Standalone", Some("OSXUniversal")),
            PlatformSlot::Win => ("Standalone", Some("Win")),
            PlatformSlot::Win64 => ("Standalone", Some("Win64")),
        }
    }
}

/// One `platformData` entry: a platform selector plus its settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDescriptor {
    pub slot: PlatformSlot,
    pub enabled: bool,
    pub settings: Mapping,
}

impl PlatformDescriptor {
    fn new(slot: PlatformSlot, enabled: bool, settings: Mapping) -> Self {
        Self {
            slot,
            enabled,
            settings,
        }
    }

    pub fn to_value(&self) -> Value {
        let (key, selector) = self.slot.selector();
        Mapping::new()
            .with("first", Mapping::new().with(key, selector))
            .with(
                "second",
                Mapping::new()
                    .with("enabled", flag(self.enabled))
                    .with("settings", self.settings.clone()),
            )
            .into()
    }
}

/// A complete meta document for one binary asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetMeta {
    /// 32 lowercase hex digits, regenerated on every build.
    pub guid: String,
    pub platforms: Vec<PlatformDescriptor>,
}

impl AssetMeta {
    fn new(platforms: Vec<PlatformDescriptor>) -> Self {
        Self {
            guid: new_guid(),
            platforms,
        }
    }

    pub fn platform(&self, slot: PlatformSlot) -> Option<&PlatformDescriptor> {
        self.platforms.iter().find(|p| p.slot == slot)
    }

    pub fn to_value(&self) -> Value {
        let platform_data: Vec<Value> = self.platforms.iter().map(|p| p.to_value()).collect();
        Mapping::new()
            .with("fileFormatVersion", constants::META_FILE_FORMAT_VERSION)
            .with("guid", self.guid.as_str())
            .with(
                "PluginImporter",
                Mapping::new()
                    .with("externalObjects", Mapping::new())
                    .with(
                        "serializedVersion",
                        constants::PLUGIN_IMPORTER_SERIALIZED_VERSION,
                    )
                    .with("iconMap", Mapping::new())
                    .with("executionOrder", Mapping::new())
                    .with("defineConstraints", Vec::<Value>::new())
                    .with("isPreloaded", 0)
                    .with("isOverridable", 1)
                    .with("isExplicitlyReferenced", 0)
                    .with("validateReferences", 1)
                    .with("platformData", platform_data)
                    .with("userData", Value::Null)
                    .with("assetBundleName", Value::Null)
                    .with("assetBundleVariant", Value::Null),
            )
            .into()
    }

    /// Render the document as meta-file text.
    pub fn render<W: Write>(&self, sink: &mut W) -> Result<(), RenderError> {
        yaml::render(&self.to_value(), sink)
    }
}

fn new_guid() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Meta files store booleans as 0/1 integers.
fn flag(b: bool) -> i64 {
    i64::from(b)
}

// =============================================================================
// Descriptor helpers
// =============================================================================

/// Per-platform enabled flags computed by a builder.
struct Enablement {
    android: bool,
    editor: bool,
    linux: bool,
    osx: bool,
    win: bool,
    win64: bool,
}

impl Enablement {
    fn excluded_summary(&self) -> PlatformDescriptor {
        let settings = Mapping::new()
            .with("Exclude Android", flag(!self.android))
            .with("Exclude Editor", flag(!self.editor))
            .with("Exclude Linux64", flag(!self.linux))
            .with("Exclude OSXUniversal", flag(!self.osx))
            .with("Exclude Win", flag(!self.win))
            .with("Exclude Win64", flag(!self.win64));
        PlatformDescriptor::new(PlatformSlot::ExcludedSummary, false, settings)
    }
}

fn android(enabled: bool, cpu: AndroidCpu) -> PlatformDescriptor {
    let settings = Mapping::new()
        .with(
            "AndroidSharedLibraryType",
            constants::ANDROID_SHARED_LIBRARY_TYPE,
        )
        .with("CPU", cpu.label());
    PlatformDescriptor::new(PlatformSlot::Android, enabled, settings)
}

fn any(enabled: bool) -> PlatformDescriptor {
    PlatformDescriptor::new(PlatformSlot::Any, enabled, Mapping::new())
}

fn editor(enabled: bool, os: OsType, cpu: EditorCpu) -> PlatformDescriptor {
    let settings = Mapping::new()
        .with("CPU", cpu.label())
        .with("DefaultValueInitialized", true)
        .with("OS", os.label());
    PlatformDescriptor::new(PlatformSlot::Editor, enabled, settings)
}

/// Linux64 and OSXUniversal always carry the literal `CPU: None`.
fn standalone_fixed(slot: PlatformSlot, enabled: bool) -> PlatformDescriptor {
    let settings = Mapping::new().with("CPU", constants::STANDALONE_CPU_NONE);
    PlatformDescriptor::new(slot, enabled, settings)
}

fn windows(slot: PlatformSlot, enabled: bool, cpu: StandaloneCpu) -> PlatformDescriptor {
    PlatformDescriptor::new(slot, enabled, Mapping::new().with("CPU", cpu.label()))
}

// =============================================================================
// Builders
// =============================================================================

/// Meta for an Android shared object (`.so`).
pub fn shared_library_meta(
    any_platform: bool,
    os: OsType,
    standalone_cpu: StandaloneCpu,
    editor_cpu: EditorCpu,
    android_cpu: AndroidCpu,
    excluded: &ExcludedPlatforms,
) -> AssetMeta {
    let ex_editor = excluded.contains(PlatformGroup::Editor);
    let ex_standalone = excluded.contains(PlatformGroup::Standalone);
    let x86 = standalone_cpu == StandaloneCpu::X86;

    let flags = Enablement {
        android: !excluded.contains(PlatformGroup::Android),
        editor: !ex_editor,
        // Standalone Linux is never enabled for shared objects.
        linux: false,
        osx: os == OsType::Osx && !ex_standalone,
        win: !ex_standalone && x86,
        win64: !(ex_editor && ex_standalone) || (ex_editor && x86),
    };

    AssetMeta::new(vec![
        flags.excluded_summary(),
        android(flags.android, android_cpu),
        any(any_platform),
        editor(flags.editor, os, editor_cpu),
        standalone_fixed(PlatformSlot::Linux64, flags.linux),
        standalone_fixed(PlatformSlot::Osx, flags.osx),
        windows(PlatformSlot::Win, flags.win, StandaloneCpu::None),
        windows(PlatformSlot::Win64, flags.win64, StandaloneCpu::None),
    ])
}

/// Meta for a static archive (`.a`, also MinGW `.dll.a` import libraries).
pub fn static_archive_meta(
    any_platform: bool,
    editor_cpu: EditorCpu,
    editor_os: OsType,
    android_cpu: AndroidCpu,
    excluded: &ExcludedPlatforms,
) -> AssetMeta {
    let standalone = !excluded.contains(PlatformGroup::Standalone);

    let flags = Enablement {
        android: !excluded.contains(PlatformGroup::Android),
        editor: !excluded.contains(PlatformGroup::Editor),
        linux: standalone,
        osx: standalone,
        win: standalone,
        win64: standalone,
    };

    AssetMeta::new(vec![
        flags.excluded_summary(),
        android(flags.android, android_cpu),
        any(any_platform),
        editor(flags.editor, editor_os, editor_cpu),
        standalone_fixed(PlatformSlot::Linux64, flags.linux),
        standalone_fixed(PlatformSlot::Osx, flags.osx),
        windows(PlatformSlot::Win, flags.win, StandaloneCpu::None),
        windows(PlatformSlot::Win64, flags.win64, StandaloneCpu::None),
    ])
}

/// Meta for a native Windows DLL.
///
/// `standalone_cpu` must be one of `AnyCPU`, `x86_64`, `x86`.
pub fn native_dll_meta(
    any_platform: bool,
    os: OsType,
    standalone_cpu: StandaloneCpu,
    editor_cpu: EditorCpu,
    excluded: &ExcludedPlatforms,
) -> Result<AssetMeta, MetaError> {
    if standalone_cpu == StandaloneCpu::None {
        return Err(MetaError::UnsupportedSelector {
            builder: "native DLL meta",
            selector: "standalone CPU",
            value: standalone_cpu.label().to_string(),
        });
    }

    let ex_editor = excluded.contains(PlatformGroup::Editor);
    let ex_standalone = excluded.contains(PlatformGroup::Standalone);
    let x86 = standalone_cpu == StandaloneCpu::X86;

    let flags = Enablement {
        android: !excluded.contains(PlatformGroup::Android),
        editor: !ex_editor,
        // Standalone Linux is always enabled for DLLs; OSX unless the
        // requested OS is OSX itself.
        linux: true,
        osx: os != OsType::Osx,
        win: !ex_standalone && x86,
        win64: !(ex_editor && ex_standalone) || (!ex_standalone && !x86),
    };

    Ok(AssetMeta::new(vec![
        flags.excluded_summary(),
        any(any_platform),
        editor(flags.editor, os, editor_cpu),
        standalone_fixed(PlatformSlot::Linux64, flags.linux),
        standalone_fixed(PlatformSlot::Osx, flags.osx),
        windows(PlatformSlot::Win, flags.win, StandaloneCpu::AnyCpu),
        windows(PlatformSlot::Win64, flags.win64, StandaloneCpu::AnyCpu),
    ]))
}
