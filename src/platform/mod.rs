// plugin-tooling - platform/mod.rs
//
// Platform layer: config file loading and external process handling.
// Must NOT depend on: app.

pub mod config;
pub mod exec;
