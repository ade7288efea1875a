//! Commit and date baked in by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `questlog <version> (<date>, <commit>)`.
pub fn version_line() -> String {
    format!(
        "questlog {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
