use std::io::Write;

use crate::mountain::Mountain;
use crate::trail::{Trail, TrailNode};

/// A path is the ordered list of mountains collected along one set of choices.
pub type MountainPath<'t> = Vec<&'t Mountain>;

/// Options for `PathEnumerator::print_paths_to_writer`.
#[derive(Clone, Copy, Debug)]
pub struct ReportOptions {
    /// Difficulty budget for `maximum_difficulty_paths`.
    pub limit: u32,
    /// Spread bound for `difference_bounded_paths`; skipped when `None`.
    pub max_difference: Option<u32>,
    /// Only report paths that are not a prefix of another reported path.
    pub maximal_only: bool,
}

// Running totals of the path collected so far.
#[derive(Clone, Copy, Debug, Default)]
struct PathState {
    total: u64,
    lowest: Option<u32>,
    highest: Option<u32>,
}

impl PathState {
    fn extended(&self, mountain: &Mountain) -> Self {
        let level = mountain.difficulty_level();
        Self {
            total: self.total + u64::from(level),
            lowest: Some(self.lowest.map_or(level, |low| low.min(level))),
            highest: Some(self.highest.map_or(level, |high| high.max(level))),
        }
    }

    fn spread(&self) -> u32 {
        match (self.lowest, self.highest) {
            (Some(low), Some(high)) => high - low,
            _ => 0,
        }
    }
}

/// `PathEnumerator` explores every branch choice of a trail at once.
pub struct PathEnumerator;

impl PathEnumerator {
    /// Returns every mountain on the trail, across all branches.
    ///
    /// Splits are visited top, then bottom, then the continuation.
    pub fn collect_all_mountains(trail: &Trail) -> Vec<&Mountain> {
        let mut mountains = Vec::new();
        let mut stack = vec![trail.root()];

        while let Some(node) = stack.pop() {
            match node {
                TrailNode::Empty => {}
                TrailNode::Sequence { mountain, next } => {
                    mountains.push(mountain);
                    stack.push(next.root());
                }
                TrailNode::Split { top, bottom, next } => {
                    stack.push(next.root());
                    stack.push(bottom.root());
                    stack.push(top.root());
                }
            }
        }
        mountains
    }

    /// Returns every path whose summed difficulty stays within `limit`.
    ///
    /// Every admissible prefix is reported, not only the longest ones.
    pub fn maximum_difficulty_paths(trail: &Trail, limit: u32) -> Vec<MountainPath<'_>> {
        Self::explore(trail, |state| state.total <= u64::from(limit))
    }

    /// Returns every path whose hardest and easiest mountains differ by at
    /// most `max_difference` difficulty levels.
    pub fn difference_bounded_paths(trail: &Trail, max_difference: u32) -> Vec<MountainPath<'_>> {
        Self::explore(trail, |state| state.spread() <= max_difference)
    }

    /// Drops every path that is a strict prefix of another path in `paths`.
    pub fn maximal_paths<'t>(paths: &[MountainPath<'t>]) -> Vec<MountainPath<'t>> {
        paths
            .iter()
            .filter(|path| {
                !paths.iter().any(|other| {
                    other.len() > path.len()
                        && path
                            .iter()
                            .zip(other.iter())
                            .all(|(a, b)| std::ptr::eq(*a, *b))
                })
            })
            .cloned()
            .collect()
    }

    /// Depth-first exploration of all branch choices.
    ///
    /// A sequence extends the current path if `admit` accepts the extended
    /// totals, reports it, and continues; otherwise the branch ends there.
    /// A split explores top, bottom and the continuation each from the path
    /// as it stood at the split.
    fn explore<'t, F>(trail: &'t Trail, admit: F) -> Vec<MountainPath<'t>>
    where
        F: Fn(&PathState) -> bool,
    {
        let mut all_paths: Vec<MountainPath<'t>> = Vec::new();
        // Stack stores (node, path taken to reach node, totals of that path).
        let mut stack: Vec<(&'t TrailNode, MountainPath<'t>, PathState)> = Vec::new();
        stack.push((trail.root(), Vec::new(), PathState::default()));

        while let Some((node, mut path_so_far, state)) = stack.pop() {
            match node {
                TrailNode::Empty => {}
                TrailNode::Sequence { mountain, next } => {
                    let extended = state.extended(mountain);
                    if !admit(&extended) {
                        continue;
                    }
                    path_so_far.push(mountain);
                    all_paths.push(path_so_far.clone());
                    stack.push((next.root(), path_so_far, extended));
                }
                TrailNode::Split { top, bottom, next } => {
                    // Pushed in reverse so top is explored first.
                    stack.push((next.root(), path_so_far.clone(), state));
                    stack.push((bottom.root(), path_so_far.clone(), state));
                    stack.push((top.root(), path_so_far, state));
                }
            }
        }
        all_paths
    }

    /// Prints the trail, its inventory and its enumerated paths to `writer`.
    pub fn print_paths_to_writer(
        trail: &Trail,
        options: &ReportOptions,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer, "=== TRAIL ===")?;
        write!(writer, "{}", trail)?;
        writeln!(writer)?;

        let inventory = Self::collect_all_mountains(trail);
        writeln!(writer, "=== TRAIL INVENTORY ===")?;
        writeln!(writer, "Total mountains: {}", inventory.len())?;
        for mountain in &inventory {
            writeln!(writer, "  {}", mountain)?;
        }
        writeln!(writer)?;

        let paths = Self::maximum_difficulty_paths(trail, options.limit);
        let title = format!("DIFFICULTY-LIMITED PATHS (limit {})", options.limit);
        Self::write_path_section(writer, &title, &paths, options.maximal_only)?;

        if let Some(max_difference) = options.max_difference {
            let paths = Self::difference_bounded_paths(trail, max_difference);
            let title = format!("DIFFERENCE-BOUNDED PATHS (max difference {})", max_difference);
            Self::write_path_section(writer, &title, &paths, options.maximal_only)?;
        }
        Ok(())
    }

    fn write_path_section(
        writer: &mut dyn Write,
        title: &str,
        paths: &[MountainPath<'_>],
        maximal_only: bool,
    ) -> std::io::Result<()> {
        let maximal;
        let shown = if maximal_only {
            maximal = Self::maximal_paths(paths);
            maximal.as_slice()
        } else {
            paths
        };

        writeln!(writer, "=== {} ===", title)?;
        if shown.is_empty() {
            writeln!(writer, "No paths found.")?;
        } else {
            writeln!(writer, "Total paths found: {}", shown.len())?;
            for (i, path) in shown.iter().enumerate() {
                writeln!(writer, "Path {}: {}", i, format_path(path))?;
            }
        }
        writeln!(writer)?;
        Ok(())
    }
}

impl Trail {
    /// Returns every mountain on the trail, across all branches.
    pub fn collect_all_mountains(&self) -> Vec<&Mountain> {
        PathEnumerator::collect_all_mountains(self)
    }

    /// See `PathEnumerator::maximum_difficulty_paths`.
    pub fn maximum_difficulty_paths(&self, limit: u32) -> Vec<MountainPath<'_>> {
        PathEnumerator::maximum_difficulty_paths(self, limit)
    }

    /// See `PathEnumerator::difference_bounded_paths`.
    pub fn difference_bounded_paths(&self, max_difference: u32) -> Vec<MountainPath<'_>> {
        PathEnumerator::difference_bounded_paths(self, max_difference)
    }
}

/// Formats a path as `A -> B -> C [total difficulty N]`.
pub fn format_path(path: &[&Mountain]) -> String {
    let names: Vec<&str> = path.iter().map(|m| m.name()).collect();
    let total: u64 = path.iter().map(|m| u64::from(m.difficulty_level())).sum();
    format!("{} [total difficulty {}]", names.join(" -> "), total)
}
