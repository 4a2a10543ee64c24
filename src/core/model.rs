// plugin-tooling - core/model.rs
//
// Enumerated selectors shared by the meta builders, the sweeper and the CLI.
// Pure data definitions with no I/O.
//
// Every selector has a fixed label, which is exactly the string the engine
// stores in meta files. Parsing a label outside the set is an explicit
// `MetaError::UnknownSelector`.

use crate::util::constants;
use crate::util::error::MetaError;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Resolve `s` against the labels of `all`.
fn from_label<T: Copy>(
    s: &str,
    all: &[T],
    label: fn(&T) -> &'static str,
    selector: &'static str,
) -> Result<T, MetaError> {
    all.iter()
        .copied()
        .find(|v| label(v) == s)
        .ok_or_else(|| MetaError::UnknownSelector {
            selector,
            value: s.to_string(),
        })
}

// =============================================================================
// Android CPU
// =============================================================================

/// Android ABI a native library is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AndroidCpu {
    Arm64,
    Armv7,
    X86,
    X86_64,
}

impl AndroidCpu {
    pub fn all() -> &'static [AndroidCpu] {
        &[
            AndroidCpu::Arm64,
            AndroidCpu::Armv7,
            AndroidCpu::X86,
            AndroidCpu::X86_64,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            AndroidCpu::Arm64 => "ARM64",
            AndroidCpu::Armv7 => "ARMv7",
            AndroidCpu::X86 => "X86",
            AndroidCpu::X86_64 => "X86_64",
        }
    }
}

impl FromStr for AndroidCpu {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_label(s, Self::all(), Self::label, "Android CPU")
    }
}

// =============================================================================
// Operating system
// =============================================================================

/// Editor / standalone operating system selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsType {
    AnyOs,
    Osx,
    Windows,
    Linux,
}

impl OsType {
    pub fn all() -> &'static [OsType] {
        &[OsType::AnyOs, OsType::Osx, OsType::Windows, OsType::Linux]
    }

    pub fn label(&self) -> &'static str {
        match self {
            OsType::AnyOs => "AnyOS",
            OsType::Osx => "OSX",
            OsType::Windows => "Windows",
            OsType::Linux => "Linux",
        }
    }
}

impl FromStr for OsType {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_label(s, Self::all(), Self::label, "OS")
    }
}

// =============================================================================
// Editor CPU
// =============================================================================

/// CPU the editor loads the plugin on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCpu {
    AnyCpu,
    X86_64,
    Arm64,
}

impl EditorCpu {
    pub fn all() -> &'static [EditorCpu] {
        &[EditorCpu::AnyCpu, EditorCpu::X86_64, EditorCpu::Arm64]
    }

    pub fn label(&self) -> &'static str {
        match self {
            EditorCpu::AnyCpu => "AnyCPU",
            EditorCpu::X86_64 => "x86_64",
            EditorCpu::Arm64 => "ARM64",
        }
    }
}

impl FromStr for EditorCpu {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_label(s, Self::all(), Self::label, "editor CPU")
    }
}

// =============================================================================
// Standalone CPU
// =============================================================================

/// CPU architecture of standalone (desktop player) builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandaloneCpu {
    None,
    AnyCpu,
    X86_64,
    X86,
}

impl StandaloneCpu {
    pub fn all() -> &'static [StandaloneCpu] {
        &[
            StandaloneCpu::None,
            StandaloneCpu::AnyCpu,
            StandaloneCpu::X86_64,
            StandaloneCpu::X86,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            StandaloneCpu::None => "None",
            StandaloneCpu::AnyCpu => "AnyCPU",
            StandaloneCpu::X86_64 => "x86_64",
            StandaloneCpu::X86 => "x86",
        }
    }
}

impl FromStr for StandaloneCpu {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_label(s, Self::all(), Self::label, "standalone CPU")
    }
}

// =============================================================================
// Excluded platforms
// =============================================================================

/// Platform groups that can be excluded from a plugin import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlatformGroup {
    Editor,
    Standalone,
    Android,
}

impl PlatformGroup {
    pub fn all() -> &'static [PlatformGroup] {
        &[
            PlatformGroup::Editor,
            PlatformGroup::Standalone,
            PlatformGroup::Android,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlatformGroup::Editor => "Editor",
            PlatformGroup::Standalone => "Standalone",
            PlatformGroup::Android => "Android",
        }
    }
}

impl FromStr for PlatformGroup {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_label(s, Self::all(), Self::label, "platform group")
    }
}

/// Set of platform groups a builder must leave disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludedPlatforms(BTreeSet<PlatformGroup>);

impl ExcludedPlatforms {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, group: PlatformGroup) -> bool {
        self.0.contains(&group)
    }

    pub fn iter(&self) -> impl Iterator<Item = PlatformGroup> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<PlatformGroup> for ExcludedPlatforms {
    fn from_iter<I: IntoIterator<Item = PlatformGroup>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[PlatformGroup; N]> for ExcludedPlatforms {
    fn from(groups: [PlatformGroup; N]) -> Self {
        groups.into_iter().collect()
    }
}

// =============================================================================
// Presets
// =============================================================================

/// Plugin binary set the sweeper runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    #[value(name = "Android:ARM64")]
    AndroidArm64,
    #[value(name = "Android:ARMv7")]
    AndroidArmv7,
    #[value(name = "Windows")]
    Windows,
}

/// Platform family a sweep generates metas for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepTarget {
    Android(AndroidCpu),
    Windows,
}

impl Preset {
    pub fn all() -> &'static [Preset] {
        &[Preset::AndroidArm64, Preset::AndroidArmv7, Preset::Windows]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Preset::AndroidArm64 => "Android:ARM64",
            Preset::AndroidArmv7 => "Android:ARMv7",
            Preset::Windows => "Windows",
        }
    }

    /// Directory of this preset's binaries, relative to the plugins directory.
    pub fn plugin_subdir(&self) -> [&'static str; 2] {
        match self {
            Preset::AndroidArm64 => constants::ANDROID_ARM64_SUBDIR,
            Preset::AndroidArmv7 => constants::ANDROID_ARMV7_SUBDIR,
            Preset::Windows => constants::WINDOWS_X64_SUBDIR,
        }
    }

    pub fn target(&self) -> SweepTarget {
        match self {
            Preset::AndroidArm64 => SweepTarget::Android(AndroidCpu::Arm64),
            Preset::AndroidArmv7 => SweepTarget::Android(AndroidCpu::Armv7),
            Preset::Windows => SweepTarget::Windows,
        }
    }
}

impl FromStr for Preset {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_label(s, Self::all(), Self::label, "preset")
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_via_label!(AndroidCpu, OsType, EditorCpu, StandaloneCpu, PlatformGroup, Preset);
