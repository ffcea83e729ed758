use std::fmt;

use serde::{Deserialize, Serialize};

/// Symbolic time offset relative to the instant being evaluated.
///
/// At evaluation instant `e` (an age in working memory), `Previous` reads age
/// `e + 1`, `Now` reads age `e` and `Future` reads age `e - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalTag {
    Previous,
    Now,
    Future,
}

impl TemporalTag {
    /// Memory age this tag reads when evaluated at `instant`. `None` for a
    /// `Future` term evaluated at age 0.
    pub fn age_at(self, instant: usize) -> Option<usize> {
        match self {
            Self::Previous => Some(instant + 1),
            Self::Now => Some(instant),
            Self::Future => instant.checked_sub(1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Previous => "PREV",
            Self::Now => "NOW",
            Self::Future => "FUTURE",
        }
    }
}

impl fmt::Display for TemporalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
