// plugin-tooling - bin/generate_docs.rs
//
// Entry point for the API documentation pipeline. Handles:
// 1. CLI argument parsing (tools root override only)
// 2. Config loading and logging initialisation
// 3. Locating doxygen, xsltproc and dotnet, then running the pipeline

use clap::Parser;
use plugin_tooling::app::docs::{self, DocsLayout, Toolchain};
use plugin_tooling::platform::config;
use plugin_tooling::util;
use std::path::PathBuf;

const USAGE: &str = "\
Generates the API reference consumed by the documentation site.
Most of the work is done by external command-line tools.

External dependencies:
- doxygen
- xsltproc
- dotnet SDK

Usage:
1. Change the C# API XML doc comments.
2. Run this tool (from any directory; paths are resolved from the tools
   directory this tool was built in, or from --tools-root).
3. Output is saved in doxygen/output/api.json (relative to the tools directory).";

/// Generate the JSON API reference.
#[derive(Parser, Debug)]
#[command(name = "generate-docs", version, about, long_about = USAGE)]
struct Cli {
    /// Tools directory holding doxygen/ and doc-generator-cs/ (defaults to
    /// this crate's directory).
    #[arg(short = 't', long = "tools-root")]
    tools_root: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        tracing::error!(error = %e, "Documentation generation failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> util::error::Result<()> {
    let tools_root = config::resolve_tools_root(cli.tools_root.as_deref());
    let (config, warnings) = config::load_config(&tools_root);
    util::logging::init(false, config.log_level.as_deref());
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    // Fail before running anything if a tool is missing.
    let toolchain = Toolchain::locate(None)?;
    let layout = DocsLayout::new(&tools_root);
    let summary = docs::run_pipeline(&layout, &toolchain)?;

    println!("{}", summary.output.display());
    Ok(())
}
