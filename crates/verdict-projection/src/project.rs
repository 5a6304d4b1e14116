//! The fold itself: replay an ordered event sequence into [`DomainState`].

use verdict_types::{Event, EventKind};

use crate::state::{Criterion, DomainState, ScoreEntry, Tool, DEFAULT_WEIGHT};

/// Replay an ordered event sequence from scratch.
///
/// Pure and deterministic: the same sequence always produces a structurally
/// equal state. No event is ever rejected; see the crate docs for the
/// permissiveness rules.
pub fn project(events: &[Event]) -> DomainState {
    let mut state = DomainState::default();
    for event in events {
        apply(&mut state, event);
    }
    state
}

/// Apply a single event to a state in place.
///
/// Folding events one at a time through `apply` is equivalent to a full
/// [`project`] over the concatenated sequence — live sessions rely on this
/// to keep optimistic state in sync with replayed state.
pub fn apply(state: &mut DomainState, event: &Event) {
    match &event.kind {
        EventKind::CriterionAdded {
            criterion_id,
            label,
        } => {
            state.criteria.push(Criterion {
                id: criterion_id.clone(),
                label: label.clone(),
                owner: event.author.clone(),
                scale: None,
            });
            state
                .weights
                .entry(criterion_id.clone())
                .or_insert(DEFAULT_WEIGHT);
        }
        EventKind::CriterionRenamed {
            criterion_id,
            label,
        } => {
            // Permissive: silently a no-op when the id is absent.
            if let Some(criterion) = state.criteria.iter_mut().find(|c| &c.id == criterion_id) {
                criterion.label = label.clone();
            }
        }
        EventKind::CriterionScaleSet {
            criterion_id,
            scale,
        } => {
            if let Some(criterion) = state.criteria.iter_mut().find(|c| &c.id == criterion_id) {
                criterion.scale = *scale;
            }
        }
        EventKind::CriterionRemoved { criterion_id } => {
            state.criteria.retain(|c| &c.id != criterion_id);
            // Cascade: a removed criterion takes its scores and weight with it.
            state.scores.retain(|s| &s.criterion_id != criterion_id);
            state.weights.remove(criterion_id);
        }
        EventKind::ToolAdded { tool_id, label } => {
            state.tools.push(Tool {
                id: tool_id.clone(),
                label: label.clone(),
                owner: event.author.clone(),
            });
        }
        EventKind::ToolRenamed { tool_id, label } => {
            if let Some(tool) = state.tools.iter_mut().find(|t| &t.id == tool_id) {
                tool.label = label.clone();
            }
        }
        EventKind::ToolRemoved { tool_id } => {
            state.tools.retain(|t| &t.id != tool_id);
            state.scores.retain(|s| &s.tool_id != tool_id);
        }
        EventKind::ScoreSet {
            entry_id,
            tool_id,
            criterion_id,
            score,
            label,
            comment,
        } => {
            // Always append: the score collection is a history, never a cell.
            state.scores.push(ScoreEntry {
                id: entry_id.clone(),
                tool_id: tool_id.clone(),
                criterion_id: criterion_id.clone(),
                score: *score,
                label: label.clone(),
                comment: comment.clone(),
                timestamp: event.timestamp,
                author: event.author.clone(),
            });
        }
        EventKind::WeightSet {
            criterion_id,
            weight,
        } => {
            // Unconditional last-write-wins, even for an id that does not
            // currently exist. Intentionally unguarded.
            state.weights.insert(criterion_id.clone(), *weight);
        }
        EventKind::ConfigReplaced { config } => {
            state.config = *config;
        }
        EventKind::DefaultScaleSet { scale } => {
            state.config.default_scale = *scale;
        }
        EventKind::NegativeScoresToggled { allowed } => {
            state.config.allow_negative = *allowed;
        }
    }
}
