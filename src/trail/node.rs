// node.rs
// ──────────────────────────────────────────────────────────────────────────────
// A trail is a strict tree of three node shapes:
//
//   Empty                      end of this fragment
//   Sequence { mountain, next }  one mountain, then the rest
//   Split { top, bottom, next }  two alternatives that rejoin at `next`
//
//        _____top______
//       /              \
//     -<                >-next-
//       \____bottom____/
//
// Nodes never change after construction. Every edit builds new nodes and
// shares the untouched subtrees through `Rc`, so older trails stay valid.
// ──────────────────────────────────────────────────────────────────────────────
use std::fmt;
use std::rc::Rc;

use super::error::TrailError;
use crate::mountain::Mountain;

/// One fragment of a trail.
#[derive(Clone, Debug)]
pub enum TrailNode {
    Empty,
    Sequence {
        mountain: Mountain,
        next: Trail,
    },
    Split {
        top: Trail,
        bottom: Trail,
        next: Trail,
    },
}

/// A cheaply clonable handle on a root `TrailNode`.
#[derive(Clone)]
pub struct Trail {
    root: Rc<TrailNode>,
}

impl TrailNode {
    /// Short name of the node shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            TrailNode::Empty => "empty",
            TrailNode::Sequence { .. } => "sequence",
            TrailNode::Split { .. } => "split",
        }
    }

    /// Returns the mountain at the head of this node, if it is a sequence.
    pub fn head_mountain(&self) -> Option<&Mountain> {
        match self {
            TrailNode::Sequence { mountain, .. } => Some(mountain),
            _ => None,
        }
    }

    /// Returns a *new* node which would be the result of:
    /// removing the mountain at the beginning of this sequence.
    pub fn remove_mountain(&self) -> Result<TrailNode, TrailError> {
        let (_, next) = self.as_sequence("remove a mountain")?;
        Ok(next.root().clone())
    }

    /// Returns a *new* node which would be the result of:
    /// adding a mountain in series before the current one.
    pub fn add_mountain_before(&self, mountain: Mountain) -> Result<TrailNode, TrailError> {
        self.as_sequence("add a mountain before")?;
        Ok(TrailNode::Sequence {
            mountain,
            next: Trail::from(self.clone()),
        })
    }

    /// Returns a *new* node which would be the result of:
    /// adding an empty branch, where the current node becomes the continuation.
    pub fn add_empty_branch_before(&self) -> Result<TrailNode, TrailError> {
        self.as_sequence("add an empty branch before")?;
        Ok(TrailNode::Split {
            top: Trail::empty(),
            bottom: Trail::empty(),
            next: Trail::from(self.clone()),
        })
    }

    /// Returns a *new* node which would be the result of:
    /// adding a mountain after the current mountain, but before the continuation.
    pub fn add_mountain_after(&self, mountain: Mountain) -> Result<TrailNode, TrailError> {
        let (head, next) = self.as_sequence("add a mountain after")?;
        Ok(TrailNode::Sequence {
            mountain: head.clone(),
            next: Trail::from(TrailNode::Sequence {
                mountain,
                next: next.clone(),
            }),
        })
    }

    /// Returns a *new* node which would be the result of:
    /// adding an empty branch after the current mountain, but before the continuation.
    pub fn add_empty_branch_after(&self) -> Result<TrailNode, TrailError> {
        let (head, next) = self.as_sequence("add an empty branch after")?;
        Ok(TrailNode::Sequence {
            mountain: head.clone(),
            next: Trail::split(Trail::empty(), Trail::empty(), next.clone()),
        })
    }

    /// Removes the branch, leaving only the continuation.
    pub fn remove_branch(&self) -> Result<TrailNode, TrailError> {
        match self {
            TrailNode::Split { next, .. } => Ok(next.root().clone()),
            other => Err(TrailError::Structural {
                operation: "remove a branch",
                found: other.kind(),
            }),
        }
    }

    fn detach_children(&mut self, out: &mut Vec<Trail>) {
        match std::mem::replace(self, TrailNode::Empty) {
            TrailNode::Empty => {}
            TrailNode::Sequence { next, .. } => out.push(next),
            TrailNode::Split { top, bottom, next } => out.extend([top, bottom, next]),
        }
    }

    fn as_sequence(&self, operation: &'static str) -> Result<(&Mountain, &Trail), TrailError> {
        match self {
            TrailNode::Sequence { mountain, next } => Ok((mountain, next)),
            other => Err(TrailError::Structural {
                operation,
                found: other.kind(),
            }),
        }
    }
}

impl Trail {
    /// A trail with nothing on it.
    pub fn empty() -> Self {
        Self::from(TrailNode::Empty)
    }

    /// Builds a split whose two branches rejoin at `next`.
    pub fn split(top: Trail, bottom: Trail, next: Trail) -> Self {
        Self::from(TrailNode::Split { top, bottom, next })
    }

    pub fn root(&self) -> &TrailNode {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        matches!(*self.root, TrailNode::Empty)
    }

    /// Returns a *new* trail which would be the result of:
    /// adding a mountain before everything currently in the trail.
    pub fn add_mountain_before(&self, mountain: Mountain) -> Trail {
        Trail::from(TrailNode::Sequence {
            mountain,
            next: self.clone(),
        })
    }

    /// Returns a *new* trail which would be the result of:
    /// adding an empty branch before everything currently in the trail.
    pub fn add_empty_branch_before(&self) -> Trail {
        Trail::split(Trail::empty(), Trail::empty(), self.clone())
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<TrailNode> for Trail {
    fn from(node: TrailNode) -> Self {
        Self {
            root: Rc::new(node),
        }
    }
}

impl Drop for Trail {
    // Unlinks uniquely owned descendants one at a time so that dropping a
    // very long trail never recurses through every node.
    fn drop(&mut self) {
        let mut detached = Vec::new();
        if let Some(node) = Rc::get_mut(&mut self.root) {
            node.detach_children(&mut detached);
        }
        while let Some(mut trail) = detached.pop() {
            if let Some(node) = Rc::get_mut(&mut trail.root) {
                node.detach_children(&mut detached);
            }
        }
    }
}

impl PartialEq for TrailNode {
    // Structural comparison over an explicit work list; subtrees shared
    // between both sides are equal without being visited.
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some(pair) = pairs.pop() {
            match pair {
                (TrailNode::Empty, TrailNode::Empty) => {}
                (
                    TrailNode::Sequence { mountain: a, next: a_next },
                    TrailNode::Sequence { mountain: b, next: b_next },
                ) => {
                    if a != b {
                        return false;
                    }
                    push_unshared(&mut pairs, a_next, b_next);
                }
                (
                    TrailNode::Split { top: a_top, bottom: a_bottom, next: a_next },
                    TrailNode::Split { top: b_top, bottom: b_bottom, next: b_next },
                ) => {
                    push_unshared(&mut pairs, a_next, b_next);
                    push_unshared(&mut pairs, a_bottom, b_bottom);
                    push_unshared(&mut pairs, a_top, b_top);
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for TrailNode {}

fn push_unshared<'t>(
    pairs: &mut Vec<(&'t TrailNode, &'t TrailNode)>,
    a: &'t Trail,
    b: &'t Trail,
) {
    if !Rc::ptr_eq(&a.root, &b.root) {
        pairs.push((a.root(), b.root()));
    }
}

impl PartialEq for Trail {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.root, &other.root) || *self.root == *other.root
    }
}

impl Eq for Trail {}

impl fmt::Debug for Trail {
    /// Shows the whole trail as its outline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Trail").field(&self.to_string()).finish()
    }
}

// Work items for the outline printer.
enum Outline<'t> {
    Node(&'t TrailNode, usize),
    Branch(&'static str, &'t Trail, usize),
}

impl fmt::Display for Trail {
    /// Writes the trail as an indented outline, one mountain per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "(empty)");
        }

        let mut stack = vec![Outline::Node(self.root(), 0)];
        while let Some(item) = stack.pop() {
            match item {
                Outline::Node(node, depth) => {
                    let pad = "  ".repeat(depth);
                    match node {
                        TrailNode::Empty => {}
                        TrailNode::Sequence { mountain, next } => {
                            writeln!(f, "{}- {}", pad, mountain)?;
                            stack.push(Outline::Node(next.root(), depth));
                        }
                        TrailNode::Split { top, bottom, next } => {
                            writeln!(f, "{}split", pad)?;
                            // Pushed in reverse so top prints first.
                            stack.push(Outline::Node(next.root(), depth));
                            stack.push(Outline::Branch("bottom", bottom, depth + 1));
                            stack.push(Outline::Branch("top", top, depth + 1));
                        }
                    }
                }
                Outline::Branch(label, branch, depth) => {
                    let pad = "  ".repeat(depth);
                    writeln!(f, "{}{}:", pad, label)?;
                    if branch.is_empty() {
                        writeln!(f, "{}  (empty)", pad)?;
                    } else {
                        stack.push(Outline::Node(branch.root(), depth + 1));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mountain(name: &str, difficulty: u32) -> Mountain {
        Mountain::with_index(name, difficulty, 1, 0)
    }

    #[test]
    fn test_remove_mountain_returns_continuation() {
        let rest = Trail::empty().add_mountain_before(mountain("B", 4));
        let trail = rest.add_mountain_before(mountain("A", 3));
        let removed = trail.root().remove_mountain().unwrap();
        assert_eq!(&removed, rest.root());
    }

    #[test]
    fn test_remove_mountain_on_split_fails() {
        let trail = Trail::empty().add_empty_branch_before();
        let err = trail.root().remove_mountain().unwrap_err();
        assert_eq!(
            err,
            TrailError::Structural {
                operation: "remove a mountain",
                found: "split",
            }
        );
    }

    #[test]
    fn test_remove_mountain_on_empty_fails() {
        assert!(Trail::empty().root().remove_mountain().is_err());
    }

    #[test]
    fn test_remove_branch_on_sequence_fails() {
        let trail = Trail::empty().add_mountain_before(mountain("A", 1));
        assert!(matches!(
            trail.root().remove_branch(),
            Err(TrailError::Structural { found: "sequence", .. })
        ));
    }

    #[test]
    fn test_add_mountain_after_keeps_head() {
        let trail = Trail::empty().add_mountain_before(mountain("A", 1));
        let node = trail.root().add_mountain_after(mountain("B", 2)).unwrap();
        match &node {
            TrailNode::Sequence { mountain: head, next } => {
                assert_eq!(head.name(), "A");
                assert_eq!(next.root().head_mountain().map(Mountain::name), Some("B"));
            }
            other => panic!("expected sequence, got {:?}", other),
        }
        // The original is untouched.
        assert!(matches!(
            trail.root(),
            TrailNode::Sequence { next, .. } if next.is_empty()
        ));
    }

    #[test]
    fn test_add_empty_branch_after_inserts_split() {
        let trail = Trail::empty().add_mountain_before(mountain("A", 1));
        let node = trail.root().add_empty_branch_after().unwrap();
        let TrailNode::Sequence { next, .. } = &node else {
            panic!("expected sequence");
        };
        assert_eq!(next.root().kind(), "split");
        let unwound = node.remove_mountain().unwrap().remove_branch().unwrap();
        assert_eq!(unwound, TrailNode::Empty);
    }

    #[test]
    fn test_sequence_edits_on_split_fail() {
        let trail = Trail::empty().add_empty_branch_before();
        let root = trail.root();
        assert!(root.add_mountain_before(mountain("A", 1)).is_err());
        assert!(root.add_mountain_after(mountain("A", 1)).is_err());
        assert!(root.add_empty_branch_before().is_err());
        assert!(root.add_empty_branch_after().is_err());
    }

    #[test]
    fn test_display_outline() {
        let top = Trail::empty().add_mountain_before(mountain("B", 2));
        let trail = Trail::split(top, Trail::empty(), Trail::empty())
            .add_mountain_before(mountain("A", 1));
        let outline = trail.to_string();
        let expected = "\
- A (difficulty 1, length 1)
split
  top:
    - B (difficulty 2, length 1)
  bottom:
    (empty)
";
        assert_eq!(outline, expected);
    }

    // ============= Equality and Debug on long trails =============

    fn long_trail(len: u32, last_difficulty: u32) -> Trail {
        let mut trail = Trail::empty().add_mountain_before(mountain("end", last_difficulty));
        for i in 0..len {
            trail = trail.add_mountain_before(mountain("peak", i % 7));
        }
        trail
    }

    #[test]
    fn test_independent_long_trails_compare_equal() {
        let a = long_trail(200_000, 1);
        let b = long_trail(200_000, 1);
        assert_eq!(a, b);
        assert_eq!(a.root(), b.root());
    }

    #[test]
    fn test_long_trails_differing_at_the_end_are_unequal() {
        let a = long_trail(200_000, 1);
        let b = long_trail(200_000, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_split_equality_checks_every_branch() {
        let leaf = |name| Trail::empty().add_mountain_before(mountain(name, 1));
        let a = Trail::split(leaf("T"), leaf("B"), leaf("N"));
        assert_eq!(a, Trail::split(leaf("T"), leaf("B"), leaf("N")));
        assert_ne!(a, Trail::split(leaf("T"), leaf("X"), leaf("N")));
        assert_ne!(a, Trail::split(leaf("T"), leaf("B"), Trail::empty()));
        assert_ne!(a, leaf("T"));
    }

    #[test]
    fn test_debug_long_trail() {
        let trail = long_trail(200_000, 1);
        let debug = format!("{:?}", trail);
        assert!(debug.starts_with("Trail("));
        assert!(debug.contains("end (difficulty 1, length 1)"));
    }
}
