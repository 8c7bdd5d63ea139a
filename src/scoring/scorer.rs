use super::types::Lean;

const RIGHT_MARKER: &str = "republican";
const LEFT_MARKER: &str = "democrat";

#[derive(Debug, Clone, Copy, Default)]
/// Maps a party label to a lean by case-insensitive substring match.
pub struct AffiliationScorer;

impl AffiliationScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn lean(&self, affiliation: Option<&str>) -> Lean {
        let Some(label) = affiliation else {
            return Lean::Neutral;
        };

        let label = label.to_lowercase();
        if label.contains(RIGHT_MARKER) {
            Lean::Right
        } else if label.contains(LEFT_MARKER) {
            Lean::Left
        } else {
            Lean::Neutral
        }
    }

    /// Returns `1` for Republican, `-1` for Democratic, `0` otherwise.
    pub fn score(&self, affiliation: Option<&str>) -> i8 {
        self.lean(affiliation).value()
    }
}
