// plugin-tooling - core/mod.rs
//
// Core logic: value tree, YAML emitter, selectors, meta builders and file
// classification. No filesystem or process access.

pub mod classify;
pub mod model;
pub mod platform_meta;
pub mod value;
pub mod yaml;
