use std::cmp::Ordering;
use std::str::FromStr;

use crate::mountain::Mountain;
use crate::trail::{Trail, TrailError};

/// What a walker does when it reaches a split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Top,
    Bottom,
    Stop,
}

impl FromStr for Decision {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Decision::Top),
            "bottom" => Ok(Decision::Bottom),
            "stop" => Ok(Decision::Stop),
            digits => match digits.parse::<u8>() {
                Ok(code) => Decision::try_from(code),
                Err(_) => Err(TrailError::InvalidDecision(s.to_string())),
            },
        }
    }
}

impl TryFrom<u8> for Decision {
    type Error = TrailError;

    /// Decodes the numeric form used by scripted walkers (1 = top, 2 = bottom, 3 = stop).
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Decision::Top),
            2 => Ok(Decision::Bottom),
            3 => Ok(Decision::Stop),
            other => Err(TrailError::InvalidDecision(other.to_string())),
        }
    }
}

/// A walker personality: picks a branch at every split and records the
/// mountains it passes.
pub trait DecisionStrategy {
    /// Chooses between the two branches of a split.
    fn select_branch(&mut self, top: &Trail, bottom: &Trail) -> Decision;

    /// Called once for every mountain passed, in walking order.
    fn on_mountain(&mut self, mountain: &Mountain);

    /// Mountains recorded so far.
    fn visited(&self) -> &[Mountain];
}

/// Always takes the top branch.
#[derive(Clone, Debug, Default)]
pub struct AlwaysTop {
    mountains: Vec<Mountain>,
}

impl AlwaysTop {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DecisionStrategy for AlwaysTop {
    fn select_branch(&mut self, _top: &Trail, _bottom: &Trail) -> Decision {
        Decision::Top
    }

    fn on_mountain(&mut self, mountain: &Mountain) {
        self.mountains.push(mountain.clone());
    }

    fn visited(&self) -> &[Mountain] {
        &self.mountains
    }
}

/// Always takes the bottom branch.
#[derive(Clone, Debug, Default)]
pub struct AlwaysBottom {
    mountains: Vec<Mountain>,
}

impl AlwaysBottom {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DecisionStrategy for AlwaysBottom {
    fn select_branch(&mut self, _top: &Trail, _bottom: &Trail) -> Decision {
        Decision::Bottom
    }

    fn on_mountain(&mut self, mountain: &Mountain) {
        self.mountains.push(mountain.clone());
    }

    fn visited(&self) -> &[Mountain] {
        &self.mountains
    }
}

/// Looks at the first mountain of each branch and takes the easier one.
///
/// * Both branches open with a mountain: the lower difficulty wins. When
///   difficulty and length are both equal the lower creation index wins, and
///   top wins if the indices match too. Equal difficulty with different
///   lengths goes bottom.
/// * Only one branch opens with a mountain: take the other one.
/// * Neither does: take top.
#[derive(Clone, Debug, Default)]
pub struct GreedyLeastDifficulty {
    mountains: Vec<Mountain>,
}

impl GreedyLeastDifficulty {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DecisionStrategy for GreedyLeastDifficulty {
    fn select_branch(&mut self, top: &Trail, bottom: &Trail) -> Decision {
        match (top.root().head_mountain(), bottom.root().head_mountain()) {
            (Some(top_m), Some(bottom_m)) => compare_heads(top_m, bottom_m),
            (Some(_), None) => Decision::Bottom,
            (None, _) => Decision::Top,
        }
    }

    fn on_mountain(&mut self, mountain: &Mountain) {
        self.mountains.push(mountain.clone());
    }

    fn visited(&self) -> &[Mountain] {
        &self.mountains
    }
}

fn compare_heads(top: &Mountain, bottom: &Mountain) -> Decision {
    match top.difficulty_level().cmp(&bottom.difficulty_level()) {
        Ordering::Less => Decision::Top,
        Ordering::Greater => Decision::Bottom,
        Ordering::Equal if top.length() == bottom.length() => {
            if top.index() <= bottom.index() {
                Decision::Top
            } else {
                Decision::Bottom
            }
        }
        Ordering::Equal => Decision::Bottom,
    }
}

/// Replays a fixed list of decisions, then stops.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    script: Vec<Decision>,
    cursor: usize,
    mountains: Vec<Mountain>,
}

impl Scripted {
    pub fn new(script: Vec<Decision>) -> Self {
        Self {
            script,
            cursor: 0,
            mountains: Vec::new(),
        }
    }

    /// Parses a comma separated script such as `"top,bottom,stop"`.
    pub fn from_script(script: &str) -> Result<Self, TrailError> {
        let decisions = script
            .split(',')
            .filter(|token| !token.trim().is_empty())
            .map(Decision::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(decisions))
    }
}

impl DecisionStrategy for Scripted {
    fn select_branch(&mut self, _top: &Trail, _bottom: &Trail) -> Decision {
        let decision = self.script.get(self.cursor).copied().unwrap_or(Decision::Stop);
        self.cursor += 1;
        decision
    }

    fn on_mountain(&mut self, mountain: &Mountain) {
        self.mountains.push(mountain.clone());
    }

    fn visited(&self) -> &[Mountain] {
        &self.mountains
    }
}
