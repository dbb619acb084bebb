//! Utility modules: build info and JSON persistence.

pub mod build_info;
pub mod persistence;

pub use build_info::{BUILD_COMMIT, BUILD_DATE};
