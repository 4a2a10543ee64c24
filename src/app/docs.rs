// plugin-tooling - app/docs.rs
//
// API documentation pipeline: doxygen extracts XML from the C# sources,
// xsltproc merges the per-compound files into one document, and the dotnet
// DocsGenerator project turns that into the JSON reference consumed by the
// documentation site.
//
// All three tools are located before anything runs. Each step must exit
// successfully before the next starts.

use crate::platform::exec;
use crate::util::constants;
use crate::util::error::DocsError;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

// =============================================================================
// Layout and toolchain
// =============================================================================

/// Directories and files the pipeline reads and writes, derived from the
/// tools root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsLayout {
    /// Holds the `Doxyfile`; doxygen runs here.
    pub doxygen_dir: PathBuf,

    /// Doxygen XML output; xsltproc runs here.
    pub xml_dir: PathBuf,

    /// Combined XML written by xsltproc.
    pub combined_xml: PathBuf,

    /// dotnet project that renders the JSON reference.
    pub generator_dir: PathBuf,

    /// Package root passed to the generator (parent of the tools root).
    pub repository_root: PathBuf,

    /// Final JSON reference.
    pub output_json: PathBuf,
}

impl DocsLayout {
    pub fn new(tools_root: &Path) -> Self {
        let doxygen_dir = tools_root.join(constants::DOXYGEN_DIR);
        let output_dir = doxygen_dir.join("output");
        let xml_dir = output_dir.join("xml");
        let generator_dir = constants::DOCS_GENERATOR_DIR
            .iter()
            .fold(tools_root.to_path_buf(), |dir, part| dir.join(part));
        let repository_root = tools_root
            .parent()
            .map_or_else(|| tools_root.to_path_buf(), Path::to_path_buf);

        Self {
            combined_xml: xml_dir.join(constants::COMBINED_XML),
            output_json: output_dir.join(constants::API_JSON),
            doxygen_dir,
            xml_dir,
            generator_dir,
            repository_root,
        }
    }
}

/// Resolved paths of the external executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub doxygen: PathBuf,
    pub xsltproc: PathBuf,
    pub dotnet: PathBuf,
}

impl Toolchain {
    /// Find all three tools on `search_path` (PATH when `None`).
    pub fn locate(search_path: Option<&OsStr>) -> Result<Self, DocsError> {
        let find = |tool: &'static str| {
            exec::find_executable(tool, search_path).ok_or(DocsError::ToolNotFound { tool })
        };
        let doxygen = find(constants::DOXYGEN_TOOL)?;
        let dotnet = find(constants::DOTNET_TOOL)?;
        let xsltproc = find(constants::XSLTPROC_TOOL)?;

        tracing::debug!(
            doxygen = %doxygen.display(),
            xsltproc = %xsltproc.display(),
            dotnet = %dotnet.display(),
            "Toolchain located"
        );

        Ok(Self {
            doxygen,
            xsltproc,
            dotnet,
        })
    }
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsSummary {
    pub output: PathBuf,
    pub bytes: u64,
}

// =============================================================================
// Pipeline
// =============================================================================

/// Run doxygen, xsltproc and the generator, then check the JSON output.
pub fn run_pipeline(layout: &DocsLayout, tools: &Toolchain) -> Result<DocsSummary, DocsError> {
    // 1. doxygen Doxyfile
    require_dir(&layout.doxygen_dir)?;
    tracing::info!(dir = %layout.doxygen_dir.display(), "Running doxygen");
    exec::run_tool(
        constants::DOXYGEN_TOOL,
        Command::new(&tools.doxygen)
            .arg(constants::DOXYFILE)
            .current_dir(&layout.doxygen_dir),
    )?;

    // 2. xsltproc combine.xslt index.xml > all.xml
    require_dir(&layout.xml_dir)?;
    tracing::info!(output = %layout.combined_xml.display(), "Combining doxygen XML");
    let combined = fs::File::create(&layout.combined_xml).map_err(|source| DocsError::Io {
        path: layout.combined_xml.clone(),
        operation: "create",
        source,
    })?;
    exec::run_tool(
        constants::XSLTPROC_TOOL,
        Command::new(&tools.xsltproc)
            .args([constants::COMBINE_XSLT, constants::XML_INDEX])
            .current_dir(&layout.xml_dir)
            .stdout(Stdio::from(combined)),
    )?;

    // 3. dotnet run <all.xml> <repository root> <api.json>
    require_dir(&layout.generator_dir)?;
    remove_stale_output(&layout.output_json)?;
    tracing::info!(output = %layout.output_json.display(), "Running DocsGenerator");
    exec::run_tool(
        constants::DOTNET_TOOL,
        Command::new(&tools.dotnet)
            .arg("run")
            .arg(&layout.combined_xml)
            .arg(&layout.repository_root)
            .arg(&layout.output_json)
            .current_dir(&layout.generator_dir),
    )?;

    verify_output(&layout.output_json)
}

fn require_dir(path: &Path) -> Result<(), DocsError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(DocsError::MissingDirectory {
            path: path.to_path_buf(),
        })
    }
}

/// Delete the previous run's reference so only a freshly written one can pass
/// the output check.
fn remove_stale_output(path: &Path) -> Result<(), DocsError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(file = %path.display(), "Removed previous API reference");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(DocsError::Io {
            path: path.to_path_buf(),
            operation: "delete",
            source,
        }),
    }
}

/// The generator must leave a well-formed JSON document behind.
fn verify_output(path: &Path) -> Result<DocsSummary, DocsError> {
    let bytes = fs::read(path).map_err(|source| DocsError::Io {
        path: path.to_path_buf(),
        operation: "read",
        source,
    })?;
    let json: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|source| DocsError::InvalidOutput {
            path: path.to_path_buf(),
            source,
        })?;

    let top_level = match &json {
        serde_json::Value::Object(map) => map.len(),
        serde_json::Value::Array(items) => items.len(),
        _ => 1,
    };
    tracing::info!(
        output = %path.display(),
        bytes = bytes.len(),
        top_level,
        "API reference written"
    );

    Ok(DocsSummary {
        output: path.to_path_buf(),
        bytes: bytes.len() as u64,
    })
}
