use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

// Creation counter shared by every `Mountain::new` call in the process.
static NEXT_INDEX: AtomicUsize = AtomicUsize::new(0);

/// A single mountain on a trail.
///
/// Mountains are immutable once created. The `index` records creation order
/// and is only used to break ties deterministically.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Mountain {
    name: String,
    difficulty_level: u32,
    length: u32,
    index: usize,
}

impl Mountain {
    /// Creates a mountain, assigning it the next creation index.
    pub fn new(name: impl Into<String>, difficulty_level: u32, length: u32) -> Self {
        let index = NEXT_INDEX.fetch_add(1, Ordering::Relaxed);
        Self::with_index(name, difficulty_level, length, index)
    }

    /// Creates a mountain with an explicit creation index.
    pub fn with_index(
        name: impl Into<String>,
        difficulty_level: u32,
        length: u32,
        index: usize,
    ) -> Self {
        Self {
            name: name.into(),
            difficulty_level,
            length,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn difficulty_level(&self) -> u32 {
        self.difficulty_level
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for Mountain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (difficulty {}, length {})",
            self.name, self.difficulty_level, self.length
        )
    }
}
