// plugin-tooling - app/mod.rs
//
// Application layer: the plugin directory sweep and the documentation
// pipeline. Dependencies: core and platform layers.

pub mod docs;
pub mod sweep;
