// plugin-tooling - lib.rs
//
// Library entry point shared by the `generate-meta` and `generate-docs`
// binaries and the integration tests.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
