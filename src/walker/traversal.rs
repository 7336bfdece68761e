use super::decision::{Decision, DecisionStrategy};
use crate::trail::{Trail, TrailNode};

/// How a single walk ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Every deferred continuation was walked to its end.
    Completed,
    /// The strategy answered `Decision::Stop` at a split.
    Stopped,
}

/// Counters collected while walking one path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkSummary {
    pub mountains_visited: usize,
    pub splits_decided: usize,
    pub outcome: WalkOutcome,
}

/// Walks one path through a trail under a `DecisionStrategy`.
///
/// The walk is iterative: at every split the continuation is pushed onto
/// `pending` and resumed once the chosen branch runs out, last deferred
/// first. Trail depth therefore never grows the call stack.
pub struct TraversalEngine<'t> {
    current: &'t TrailNode,
    pending: Vec<&'t TrailNode>,
}

impl<'t> TraversalEngine<'t> {
    pub fn new(trail: &'t Trail) -> Self {
        Self {
            current: trail.root(),
            pending: Vec::new(),
        }
    }

    /// Runs the walk to completion, reporting each mountain to `strategy`.
    pub fn run<S>(mut self, strategy: &mut S) -> WalkSummary
    where
        S: DecisionStrategy + ?Sized,
    {
        let mut mountains_visited = 0;
        let mut splits_decided = 0;

        loop {
            match self.current {
                TrailNode::Sequence { mountain, next } => {
                    strategy.on_mountain(mountain);
                    mountains_visited += 1;
                    self.current = next.root();
                }
                TrailNode::Split { top, bottom, next } => {
                    self.pending.push(next.root());
                    splits_decided += 1;
                    match strategy.select_branch(top, bottom) {
                        Decision::Top => self.current = top.root(),
                        Decision::Bottom => self.current = bottom.root(),
                        Decision::Stop => {
                            self.pending.clear();
                            return WalkSummary {
                                mountains_visited,
                                splits_decided,
                                outcome: WalkOutcome::Stopped,
                            };
                        }
                    }
                }
                TrailNode::Empty => match self.pending.pop() {
                    Some(continuation) => self.current = continuation,
                    None => {
                        return WalkSummary {
                            mountains_visited,
                            splits_decided,
                            outcome: WalkOutcome::Completed,
                        };
                    }
                },
            }
        }
    }
}

impl Trail {
    /// Follows the trail, calling `strategy.on_mountain` for every mountain passed by.
    pub fn follow_path<S>(&self, strategy: &mut S) -> WalkSummary
    where
        S: DecisionStrategy + ?Sized,
    {
        TraversalEngine::new(self).run(strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mountain::Mountain;
    use crate::walker::{AlwaysBottom, AlwaysTop, GreedyLeastDifficulty, Scripted};

    fn m(name: &str, difficulty: u32, index: usize) -> Mountain {
        Mountain::with_index(name, difficulty, 1, index)
    }

    fn names(strategy: &dyn DecisionStrategy) -> Vec<&str> {
        strategy.visited().iter().map(Mountain::name).collect()
    }

    // A -> split(top: B, bottom: C) -> D
    fn forked() -> Trail {
        let top = Trail::empty().add_mountain_before(m("B", 2, 1));
        let bottom = Trail::empty().add_mountain_before(m("C", 5, 2));
        let after = Trail::empty().add_mountain_before(m("D", 1, 3));
        Trail::split(top, bottom, after).add_mountain_before(m("A", 3, 0))
    }

    #[test]
    fn test_sequence_visits_in_order() {
        let trail = Trail::empty()
            .add_mountain_before(m("C", 1, 2))
            .add_mountain_before(m("B", 1, 1))
            .add_mountain_before(m("A", 1, 0));
        let mut walker = AlwaysBottom::new();
        let summary = trail.follow_path(&mut walker);
        assert_eq!(names(&walker), ["A", "B", "C"]);
        assert_eq!(summary.outcome, WalkOutcome::Completed);
        assert_eq!(summary.splits_decided, 0);
    }

    #[test]
    fn test_split_resumes_continuation() {
        let trail = forked();
        let mut top = AlwaysTop::new();
        trail.follow_path(&mut top);
        assert_eq!(names(&top), ["A", "B", "D"]);

        let mut bottom = AlwaysBottom::new();
        let summary = trail.follow_path(&mut bottom);
        assert_eq!(names(&bottom), ["A", "C", "D"]);
        assert_eq!(summary.mountains_visited, 3);
        assert_eq!(summary.splits_decided, 1);
    }

    #[test]
    fn test_greedy_takes_easier_branch() {
        let mut walker = GreedyLeastDifficulty::new();
        forked().follow_path(&mut walker);
        assert_eq!(names(&walker), ["A", "B", "D"]);
    }

    #[test]
    fn test_stop_discards_pending() {
        let mut walker = Scripted::new(vec![Decision::Stop]);
        let summary = forked().follow_path(&mut walker);
        assert_eq!(names(&walker), ["A"]);
        assert_eq!(summary.outcome, WalkOutcome::Stopped);
    }

    #[test]
    fn test_nested_continuations_resume_last_deferred_first() {
        // split(top: split(top: X, bottom: -) -> Y, bottom: -) -> Z
        let inner = Trail::split(
            Trail::empty().add_mountain_before(m("X", 1, 0)),
            Trail::empty(),
            Trail::empty().add_mountain_before(m("Y", 1, 1)),
        );
        let trail = Trail::split(
            inner,
            Trail::empty(),
            Trail::empty().add_mountain_before(m("Z", 1, 2)),
        );
        let mut walker = AlwaysTop::new();
        let summary = trail.follow_path(&mut walker);
        assert_eq!(names(&walker), ["X", "Y", "Z"]);
        assert_eq!(summary.splits_decided, 2);
    }

    #[test]
    fn test_empty_trail() {
        let mut walker = AlwaysTop::new();
        let summary = Trail::empty().follow_path(&mut walker);
        assert!(walker.visited().is_empty());
        assert_eq!(summary.outcome, WalkOutcome::Completed);
    }

    #[test]
    fn test_long_trail_does_not_overflow() {
        let mut trail = Trail::empty();
        for i in 0..200_000 {
            trail = trail
                .add_mountain_before(m("hill", 1, i))
                .add_empty_branch_before();
        }
        let mut walker = AlwaysTop::new();
        let summary = trail.follow_path(&mut walker);
        assert_eq!(summary.mountains_visited, 200_000);
        assert_eq!(summary.splits_decided, 200_000);
    }
}
