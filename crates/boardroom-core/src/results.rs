//! Aggregated scores as reported by the backend.

use std::fmt;

/// One participant's score. Computed entirely by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub user_id: String,
    pub username: String,
    pub score: f64,
}

impl fmt::Display for ScoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {}): {}", self.username, self.user_id, self.score)
    }
}
