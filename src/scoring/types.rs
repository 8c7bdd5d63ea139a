use serde::{Deserialize, Serialize};

/// Position on the two-party axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lean {
    Left,
    Neutral,
    Right,
}

impl Lean {
    /// Numeric value: `-1`, `0` or `1`.
    #[inline]
    pub fn value(&self) -> i8 {
        match self {
            Lean::Left => -1,
            Lean::Neutral => 0,
            Lean::Right => 1,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Lean::Left => "left",
            Lean::Neutral => "neutral",
            Lean::Right => "right",
        }
    }
}

impl std::fmt::Display for Lean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
