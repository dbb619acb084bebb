//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `leviathan 0.1.0 (abc1234 2026-10-19)`
pub fn version_string() -> String {
    format!(
        "{} {} ({} {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    )
}
