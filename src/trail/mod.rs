// error module
mod error;
// node module
mod node;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the trail module.
//─────────────────────────────────────────────────────────────────────────────
pub use error::TrailError;
pub use node::{Trail, TrailNode};
