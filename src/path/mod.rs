// explorer module
mod explorer;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the explorer module.
//─────────────────────────────────────────────────────────────────────────────
pub use explorer::{format_path, MountainPath, PathEnumerator, ReportOptions};
