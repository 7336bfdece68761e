use std::fs;

use super::error::LoaderError;
use crate::mountain::Mountain;
use crate::path::PathEnumerator;
use crate::trail::Trail;

//─────────────────────────────────────────────────────────────────────────────
// Trail description format, one statement per line, `#` starts a comment:
//
//   mountain <name> <difficulty> <length>
//   split {
//     top {
//       ...
//     }
//     bottom {
//       ...
//     }
//   }
//
// Whatever follows a split in the same block is its continuation. Either
// branch may be left out, but `top` has to come before `bottom`.
//─────────────────────────────────────────────────────────────────────────────

/// Loads a trail description from a file.
pub fn load_trail_from_file(file_path: &str) -> Result<Trail, LoaderError> {
    let file_content =
        fs::read_to_string(file_path).map_err(|e| LoaderError::ReadFile(file_path.into(), e))?;

    let trail = parse_trail(&file_content)?;

    if PathEnumerator::collect_all_mountains(&trail).is_empty() {
        return Err(LoaderError::EmptyTrail(file_path.into()));
    }
    Ok(trail)
}

/// Parses a trail description. Mountains are indexed in the order they appear.
///
/// Nesting is tracked on an explicit stack, so deeply nested splits are
/// parsed without call recursion.
pub fn parse_trail(source: &str) -> Result<Trail, LoaderError> {
    let mut parser = TrailParser::new();
    for (i, line) in source.lines().enumerate() {
        let code = line.split('#').next().unwrap_or("").trim();
        if code.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = code.split_whitespace().collect();
        parser.statement(i + 1, &tokens)?;
    }
    parser.finish()
}

// A parsed statement, kept until its continuation is known.
enum Item {
    Mountain(Mountain),
    Split { top: Trail, bottom: Trail },
}

#[derive(Clone, Copy)]
enum Side {
    Top,
    Bottom,
}

// One open construct. The outermost block has no side and is always at the
// bottom of the stack; every split sits directly on top of a block.
enum Frame {
    Block {
        opened_at: usize,
        side: Option<Side>,
        items: Vec<Item>,
    },
    Split {
        opened_at: usize,
        top: Option<Trail>,
        bottom: Option<Trail>,
    },
}

struct TrailParser {
    stack: Vec<Frame>,
    next_index: usize,
}

impl TrailParser {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Block {
                opened_at: 0,
                side: None,
                items: Vec::new(),
            }],
            next_index: 0,
        }
    }

    fn statement(&mut self, line_no: usize, tokens: &[&str]) -> Result<(), LoaderError> {
        match self.stack.last() {
            Some(Frame::Split { top, bottom, .. }) => {
                let (has_top, has_bottom) = (top.is_some(), bottom.is_some());
                self.split_statement(line_no, tokens, has_top, has_bottom)
            }
            _ => self.block_statement(line_no, tokens),
        }
    }

    fn block_statement(&mut self, line_no: usize, tokens: &[&str]) -> Result<(), LoaderError> {
        match tokens {
            ["}"] => self.close_block(line_no),
            ["mountain", name, difficulty, length] => {
                let difficulty = parse_number(line_no, "difficulty", difficulty)?;
                let length = parse_number(line_no, "length", length)?;
                let mountain = Mountain::with_index(*name, difficulty, length, self.next_index);
                self.next_index += 1;
                self.push_item(Item::Mountain(mountain));
                Ok(())
            }
            ["mountain", ..] => Err(LoaderError::parse(
                line_no,
                "expected `mountain <name> <difficulty> <length>`",
            )),
            ["split", "{"] => {
                self.stack.push(Frame::Split {
                    opened_at: line_no,
                    top: None,
                    bottom: None,
                });
                Ok(())
            }
            _ => Err(LoaderError::parse(
                line_no,
                format!("unrecognised statement `{}`", tokens.join(" ")),
            )),
        }
    }

    fn split_statement(
        &mut self,
        line_no: usize,
        tokens: &[&str],
        has_top: bool,
        has_bottom: bool,
    ) -> Result<(), LoaderError> {
        let side = match tokens {
            ["}"] => {
                self.close_split();
                return Ok(());
            }
            ["top", "{"] if !has_top && !has_bottom => Side::Top,
            ["bottom", "{"] if !has_bottom => Side::Bottom,
            _ => {
                return Err(LoaderError::parse(
                    line_no,
                    "expected `top {`, `bottom {` or `}` inside a split",
                ))
            }
        };
        self.stack.push(Frame::Block {
            opened_at: line_no,
            side: Some(side),
            items: Vec::new(),
        });
        Ok(())
    }

    // Closes a branch block and hands the finished branch to its split.
    fn close_block(&mut self, line_no: usize) -> Result<(), LoaderError> {
        if self.stack.len() == 1 {
            return Err(LoaderError::parse(line_no, "unmatched '}'"));
        }
        if let Some(Frame::Block {
            side: Some(side),
            items,
            ..
        }) = self.stack.pop()
        {
            let branch = assemble(items);
            if let Some(Frame::Split { top, bottom, .. }) = self.stack.last_mut() {
                match side {
                    Side::Top => *top = Some(branch),
                    Side::Bottom => *bottom = Some(branch),
                }
            }
        }
        Ok(())
    }

    fn close_split(&mut self) {
        if let Some(Frame::Split { top, bottom, .. }) = self.stack.pop() {
            self.push_item(Item::Split {
                top: top.unwrap_or_default(),
                bottom: bottom.unwrap_or_default(),
            });
        }
    }

    fn push_item(&mut self, item: Item) {
        if let Some(Frame::Block { items, .. }) = self.stack.last_mut() {
            items.push(item);
        }
    }

    // Anything still open at the end of input is reported at the line that
    // opened the innermost construct.
    fn finish(mut self) -> Result<Trail, LoaderError> {
        match self.stack.pop() {
            Some(Frame::Block {
                side: None, items, ..
            }) => Ok(assemble(items)),
            Some(Frame::Block { opened_at, .. }) => {
                Err(LoaderError::parse(opened_at, "block is never closed"))
            }
            Some(Frame::Split { opened_at, .. }) => {
                Err(LoaderError::parse(opened_at, "split is never closed"))
            }
            None => Ok(Trail::empty()),
        }
    }
}

fn parse_number(line: usize, what: &str, token: &str) -> Result<u32, LoaderError> {
    token
        .parse()
        .map_err(|_| LoaderError::parse(line, format!("invalid {} `{}`", what, token)))
}

// Builds the trail back to front so each item gets its continuation.
fn assemble(items: Vec<Item>) -> Trail {
    items
        .into_iter()
        .rev()
        .fold(Trail::empty(), |next, item| match item {
            Item::Mountain(mountain) => next.add_mountain_before(mountain),
            Item::Split { top, bottom } => Trail::split(top, bottom, next),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trail::TrailNode;

    #[test]
    fn test_parse_sequence() {
        let trail = parse_trail("mountain A 3 10\nmountain B 4 12\n").unwrap();
        let all: Vec<(&str, usize)> = PathEnumerator::collect_all_mountains(&trail)
            .into_iter()
            .map(|m| (m.name(), m.index()))
            .collect();
        assert_eq!(all, [("A", 0), ("B", 1)]);
    }

    #[test]
    fn test_parse_split_with_continuation() {
        let source = "
            # a fork after the first peak
            mountain A 1 1
            split {
              top {
                mountain B 2 2
              }
              bottom {
              }
            }
            mountain C 3 3
        ";
        let trail = parse_trail(source).unwrap();
        let TrailNode::Sequence { next, .. } = trail.root() else {
            panic!("expected sequence");
        };
        let TrailNode::Split { top, bottom, next } = next.root() else {
            panic!("expected split");
        };
        assert_eq!(top.root().head_mountain().map(Mountain::name), Some("B"));
        assert!(bottom.is_empty());
        assert_eq!(next.root().head_mountain().map(Mountain::name), Some("C"));
    }

    #[test]
    fn test_missing_branches_are_empty() {
        let trail = parse_trail("split {\n}\n").unwrap();
        assert_eq!(trail, Trail::empty().add_empty_branch_before());
    }

    #[test]
    fn test_empty_source() {
        assert!(parse_trail("# nothing here\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_bad_number_reports_line() {
        let err = parse_trail("mountain A 1 1\nmountain B hard 2\n").unwrap_err();
        assert!(matches!(err, LoaderError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_unclosed_split() {
        let err = parse_trail("split {\n  top {\n    mountain A 1 1\n  }\n").unwrap_err();
        assert!(matches!(err, LoaderError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_bottom_before_top_rejected() {
        let err = parse_trail("split {\n bottom {\n }\n top {\n }\n}\n").unwrap_err();
        assert!(matches!(err, LoaderError::Parse { line: 4, .. }));
    }

    #[test]
    fn test_unmatched_brace() {
        let err = parse_trail("mountain A 1 1\n}\n").unwrap_err();
        assert!(matches!(err, LoaderError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_unclosed_branch_block() {
        let err = parse_trail("split {\n  top {\n    mountain A 1 1\n").unwrap_err();
        assert!(matches!(err, LoaderError::Parse { line: 2, .. }));
    }

    // ============= Deep nesting =============

    fn nested_splits(depth: usize, closed: bool) -> String {
        let mut source = "split {\ntop {\n".repeat(depth);
        source.push_str("mountain Summit 5 5\n");
        if closed {
            source.push_str(&"}\n}\n".repeat(depth));
        }
        source
    }

    #[test]
    fn test_deeply_nested_splits_parse() {
        let trail = parse_trail(&nested_splits(20_000, true)).unwrap();
        let all = PathEnumerator::collect_all_mountains(&trail);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name(), "Summit");
        assert_eq!(trail.root().kind(), "split");
    }

    #[test]
    fn test_deeply_nested_unclosed_reports_innermost_block() {
        let err = parse_trail(&nested_splits(20_000, false)).unwrap_err();
        // The innermost `top {` is on the last line before the mountain.
        assert!(matches!(err, LoaderError::Parse { line: 40_000, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_trail_from_file("/nonexistent/trail.txt").unwrap_err();
        assert!(matches!(err, LoaderError::ReadFile(..)));
    }
}
