// plugin-tooling - bin/generate_meta.rs
//
// Entry point for the native library meta generator. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation
// 3. Sweeping the preset's plugin directory

use clap::Parser;
use plugin_tooling::app::sweep::{self, SweepConfig};
use plugin_tooling::core::model::Preset;
use plugin_tooling::platform::config;
use plugin_tooling::util;
use std::path::PathBuf;

const USAGE: &str = "\
Generates meta files for native libraries for Android (ARM64 and ARMv7) and Windows.

Usage:
1. Delete all files from the directory with native libraries:
  - Plugins/Android/ARM64 for Android:ARM64
  - Plugins/Android/armeabi-v7a for Android:ARMv7
  - Plugins/Windows/x64 for Windows
2. Copy the new version of the libraries to the target directory
3. Run this tool with the desired preset
4. Commit changes

Paths are resolved from the tools directory this tool was built in, never
from the working directory. Use --tools-root to point at another checkout and
[paths] plugins_dir in tooling.toml to use another plugins location.";

/// Generate plugin importer meta files for native libraries.
#[derive(Parser, Debug)]
#[command(name = "generate-meta", version, about, long_about = USAGE)]
struct Cli {
    /// Platform for which library meta files should be generated/updated.
    #[arg(value_enum)]
    preset: Preset,

    /// Tools directory holding tooling.toml (defaults to this crate's directory).
    #[arg(short = 't', long = "tools-root")]
    tools_root: Option<PathBuf>,

    /// Debug mode: log every ignored file.
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        tracing::error!(error = %e, "Meta generation failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> util::error::Result<()> {
    let tools_root = config::resolve_tools_root(cli.tools_root.as_deref());
    let (config, warnings) = config::load_config(&tools_root);
    util::logging::init(cli.debug, config.log_level.as_deref());
    for warning in &warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let plugin_dir = config.plugin_dir(cli.preset);
    tracing::info!(
        preset = %cli.preset,
        dir = %plugin_dir.display(),
        "Generating meta files"
    );

    let sweep_config = SweepConfig {
        target: cli.preset.target(),
        debug: cli.debug,
    };
    sweep::sweep(&plugin_dir, &sweep_config)?;
    Ok(())
}
