// plugin-tooling - util/constants.rs
//
// Single source of truth for named constants: meta schema fields, sidecar
// suffixes, plugin directory layout, external tool names and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "plugin-tooling";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default log level when neither RUST_LOG, --debug nor the config file set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level` in the config file.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Optional config file looked up in the tools root.
pub const CONFIG_FILE_NAME: &str = "tooling.toml";

/// Default location of the plugin binaries, relative to the tools root.
pub const DEFAULT_PLUGINS_DIR: &str = "../Plugins";

// =============================================================================
// Plugin directory layout
// =============================================================================

/// Android ARM64 binaries, relative to the plugins directory.
pub const ANDROID_ARM64_SUBDIR: [&str; 2] = ["Android", "ARM64"];

/// Android ARMv7 binaries, relative to the plugins directory.
pub const ANDROID_ARMV7_SUBDIR: [&str; 2] = ["Android", "armeabi-v7a"];

/// Windows x64 binaries, relative to the plugins directory.
pub const WINDOWS_X64_SUBDIR: [&str; 2] = ["Windows", "x64"];

// =============================================================================
// File suffixes
// =============================================================================

/// Sidecar suffix appended to every asset file name.
pub const META_SUFFIX: &str = ".meta";

/// Libtool archive descriptions; never needed by the engine.
pub const LIBTOOL_SUFFIX: &str = ".la";

pub const SHARED_OBJECT_SUFFIX: &str = ".so";
pub const STATIC_ARCHIVE_SUFFIX: &str = ".a";
pub const DLL_SUFFIX: &str = ".dll";

// =============================================================================
// Meta document schema
// =============================================================================

/// `fileFormatVersion` written at the top of every meta document.
pub const META_FILE_FORMAT_VERSION: i64 = 2;

/// `PluginImporter.serializedVersion`.
pub const PLUGIN_IMPORTER_SERIALIZED_VERSION: i64 = 2;

/// Shared library type recorded for Android plugins.
pub const ANDROID_SHARED_LIBRARY_TYPE: &str = "Executable";

/// Literal CPU value the editor writes for Linux/OSX standalone targets.
pub const STANDALONE_CPU_NONE: &str = "None";

// =============================================================================
// Documentation pipeline
// =============================================================================

pub const DOXYGEN_TOOL: &str = "doxygen";
pub const XSLTPROC_TOOL: &str = "xsltproc";
pub const DOTNET_TOOL: &str = "dotnet";

/// Doxygen working directory, relative to the tools root.
pub const DOXYGEN_DIR: &str = "doxygen";

/// Doxygen configuration file inside `DOXYGEN_DIR`.
pub const DOXYFILE: &str = "Doxyfile";

/// Stylesheet and index consumed by xsltproc inside the XML output directory.
pub const COMBINE_XSLT: &str = "combine.xslt";
pub const XML_INDEX: &str = "index.xml";

/// Combined XML produced by xsltproc.
pub const COMBINED_XML: &str = "all.xml";

/// Final JSON reference written by the generator, inside `doxygen/output`.
pub const API_JSON: &str = "api.json";

/// dotnet project that post-processes the combined XML, relative to the tools root.
pub const DOCS_GENERATOR_DIR: [&str; 2] = ["doc-generator-cs", "DocsGenerator"];
