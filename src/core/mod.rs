//! Core module for `NuEnroll`

pub mod config;
pub mod enrollment;
pub mod models;

/// Returns the current version of the `NuEnroll` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
