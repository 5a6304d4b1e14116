use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use verdict_types::{MatrixConfig, ScaleConfig, Timestamp};

/// Weight assigned to a criterion that has never had a `WeightSet` event.
pub const DEFAULT_WEIGHT: u32 = 10;

/// A dimension tools are evaluated against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub label: String,
    /// User that created the criterion.
    pub owner: String,
    /// Per-criterion scale override; `None` falls back to the matrix default.
    pub scale: Option<ScaleConfig>,
}

/// A tool (option) being evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub label: String,
    /// User that created the tool.
    pub owner: String,
}

/// One recorded score (or comment-only note) for a (tool, criterion) pair.
///
/// Multiple entries may target the same pair; the most recent entry carrying
/// a numeric score is "current", earlier ones remain visible as history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: String,
    pub tool_id: String,
    pub criterion_id: String,
    /// `None` for a comment-only entry.
    pub score: Option<i32>,
    /// Optional display label overriding the numeric score.
    pub label: Option<String>,
    pub comment: Option<String>,
    pub timestamp: Timestamp,
    pub author: String,
}

impl ScoreEntry {
    /// Returns `true` if this entry carries no numeric score.
    pub fn is_comment_only(&self) -> bool {
        self.score.is_none()
    }
}

/// The materialized projection of an event log.
///
/// Entirely derived; consumers read it as a snapshot and must never mutate
/// it in place outside the fold.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainState {
    /// Live criteria, in creation order.
    pub criteria: Vec<Criterion>,
    /// Live tools, in creation order.
    pub tools: Vec<Tool>,
    /// Full, unfiltered score history for live entities.
    pub scores: Vec<ScoreEntry>,
    /// Per-criterion weight multipliers.
    pub weights: BTreeMap<String, u32>,
    /// Matrix-wide configuration. Always present, defaulted when unset.
    pub config: MatrixConfig,
}

impl DomainState {
    /// Look up a live criterion by id.
    pub fn criterion(&self, id: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.id == id)
    }

    /// Look up a live tool by id.
    pub fn tool(&self, id: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// All score entries for a (tool, criterion) pair, oldest first.
    pub fn score_history(&self, tool_id: &str, criterion_id: &str) -> Vec<&ScoreEntry> {
        let mut entries: Vec<&ScoreEntry> = self
            .scores
            .iter()
            .filter(|s| s.tool_id == tool_id && s.criterion_id == criterion_id)
            .collect();
        entries.sort_by_key(|s| s.timestamp);
        entries
    }

    /// The current score entry for a pair: the most recent entry that
    /// carries a numeric score. Comment-only entries never become current.
    pub fn current_score(&self, tool_id: &str, criterion_id: &str) -> Option<&ScoreEntry> {
        self.scores
            .iter()
            .filter(|s| {
                s.tool_id == tool_id && s.criterion_id == criterion_id && s.score.is_some()
            })
            .max_by_key(|s| s.timestamp)
    }

    /// Effective weight for a criterion, defaulting to [`DEFAULT_WEIGHT`].
    pub fn weight_of(&self, criterion_id: &str) -> u32 {
        self.weights
            .get(criterion_id)
            .copied()
            .unwrap_or(DEFAULT_WEIGHT)
    }

    /// Effective scale for a criterion: its override or the matrix default.
    pub fn scale_for(&self, criterion_id: &str) -> ScaleConfig {
        self.criterion(criterion_id)
            .and_then(|c| c.scale)
            .unwrap_or(self.config.default_scale)
    }

    /// Weighted sum of a tool's current scores across all live criteria.
    pub fn weighted_total(&self, tool_id: &str) -> i64 {
        self.criteria
            .iter()
            .filter_map(|criterion| {
                let entry = self.current_score(tool_id, &criterion.id)?;
                let score = entry.score? as i64;
                Some(score * self.weight_of(&criterion.id) as i64)
            })
            .sum()
    }
}
