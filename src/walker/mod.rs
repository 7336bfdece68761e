// decision module
mod decision;
// traversal module
mod traversal;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the walker module.
//─────────────────────────────────────────────────────────────────────────────
pub use decision::{
    AlwaysBottom, AlwaysTop, Decision, DecisionStrategy, GreedyLeastDifficulty, Scripted,
};
pub use traversal::{TraversalEngine, WalkOutcome, WalkSummary};
