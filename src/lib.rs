//! Trails of mountains: persistent trail editing, strategy-guided walks and
//! exhaustive path enumeration under difficulty constraints.

pub mod mountain;
pub mod path;
pub mod trail;
pub mod trail_loader;
pub mod walker;

pub use mountain::Mountain;
pub use path::{PathEnumerator, ReportOptions};
pub use trail::{Trail, TrailError, TrailNode};
pub use walker::{Decision, DecisionStrategy, WalkOutcome, WalkSummary};
