use serde::{Deserialize, Serialize};

use crate::config::{MatrixConfig, ScaleConfig};
use crate::id::EventId;
use crate::temporal::Timestamp;

/// An immutable fact describing one edit to the decision matrix.
///
/// Events are never mutated or deleted once stored; history is append-only.
/// The `timestamp` is the writer's logical stamp, used for tie-breaking and
/// display — causal order is the position in the replayed log, which comes
/// from the commit DAG.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event id, minted by the writer.
    pub id: EventId,
    /// Writer-local logical timestamp.
    pub timestamp: Timestamp,
    /// Identifier of the user who made the edit. Trusted as supplied.
    pub author: String,
    /// What changed.
    pub kind: EventKind,
}

impl Event {
    /// Create an event with a fresh id.
    pub fn new(author: impl Into<String>, timestamp: Timestamp, kind: EventKind) -> Self {
        Self {
            id: EventId::new(),
            timestamp,
            author: author.into(),
            kind,
        }
    }
}

/// The edit vocabulary.
///
/// Entity ids (`criterion_id`, `tool_id`, `entry_id`) are caller-supplied
/// strings. No cross-entity validation happens at construction: a variant
/// referencing an id that never existed is still a well-formed event, and the
/// projection tolerates it (see `verdict-projection`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A new criterion to evaluate tools against.
    CriterionAdded { criterion_id: String, label: String },
    /// Relabel an existing criterion. No-op on replay if the id is gone.
    CriterionRenamed { criterion_id: String, label: String },
    /// Override (or clear) a criterion's scoring scale.
    CriterionScaleSet {
        criterion_id: String,
        scale: Option<ScaleConfig>,
    },
    /// Remove a criterion. Cascades over its scores and weight on replay.
    CriterionRemoved { criterion_id: String },

    /// A new tool (option) being evaluated.
    ToolAdded { tool_id: String, label: String },
    /// Relabel an existing tool. No-op on replay if the id is gone.
    ToolRenamed { tool_id: String, label: String },
    /// Remove a tool. Cascades over its scores on replay.
    ToolRemoved { tool_id: String },

    /// Record a score (or a comment-only note) for a (tool, criterion) pair.
    ///
    /// Replay always appends: earlier entries for the same pair remain
    /// visible as history. `score: None` layers a note without changing the
    /// current score.
    ScoreSet {
        entry_id: String,
        tool_id: String,
        criterion_id: String,
        score: Option<i32>,
        label: Option<String>,
        comment: Option<String>,
    },

    /// Set a criterion's weight multiplier. Last write wins.
    WeightSet { criterion_id: String, weight: u32 },

    /// Replace the matrix configuration wholesale.
    ConfigReplaced { config: MatrixConfig },
    /// Change only the default scoring scale.
    DefaultScaleSet { scale: ScaleConfig },
    /// Change only whether negative scores are allowed.
    NegativeScoresToggled { allowed: bool },
}

impl EventKind {
    /// Short tag for logging and display.
    pub fn tag(&self) -> &'static str {
        match self {
            EventKind::CriterionAdded { .. } => "criterion_added",
            EventKind::CriterionRenamed { .. } => "criterion_renamed",
            EventKind::CriterionScaleSet { .. } => "criterion_scale_set",
            EventKind::CriterionRemoved { .. } => "criterion_removed",
            EventKind::ToolAdded { .. } => "tool_added",
            EventKind::ToolRenamed { .. } => "tool_renamed",
            EventKind::ToolRemoved { .. } => "tool_removed",
            EventKind::ScoreSet { .. } => "score_set",
            EventKind::WeightSet { .. } => "weight_set",
            EventKind::ConfigReplaced { .. } => "config_replaced",
            EventKind::DefaultScaleSet { .. } => "default_scale_set",
            EventKind::NegativeScoresToggled { .. } => "negative_scores_toggled",
        }
    }
}
