//! Seeding a fresh matrix from flat construction-time data.
//!
//! Construction-time seed data (criteria, tools, ratings, weights) is turned
//! into an equivalent event sequence so that seeded and history-derived data
//! share one code path: everything goes through [`project`](crate::project).

use std::collections::BTreeMap;

use verdict_types::{Clock, Event, EventId, EventKind, MatrixConfig, ScaleConfig};

/// A criterion in a flat seed dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedCriterion {
    pub id: String,
    pub label: String,
    pub scale: Option<ScaleConfig>,
}

/// A tool in a flat seed dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedTool {
    pub id: String,
    pub label: String,
}

/// A rating in a flat seed dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedRating {
    pub tool_id: String,
    pub criterion_id: String,
    pub score: Option<i32>,
    pub label: Option<String>,
    pub comment: Option<String>,
}

/// Flat initial dataset supplied at construction time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedMatrix {
    pub criteria: Vec<SeedCriterion>,
    pub tools: Vec<SeedTool>,
    pub ratings: Vec<SeedRating>,
    /// Explicit weight overrides; unlisted criteria keep the default.
    pub weights: BTreeMap<String, u32>,
    /// Matrix configuration; `None` keeps the default.
    pub config: Option<MatrixConfig>,
}

/// Convert a flat seed dataset into an equivalent ordered event sequence.
///
/// Order: configuration, criteria (with scale overrides), tools, weights,
/// then ratings — so that projecting the result reconstructs the seed input.
pub fn seed_events(seed: &SeedMatrix, author: &str, clock: &Clock) -> Vec<Event> {
    let mut events = Vec::new();

    if let Some(config) = seed.config {
        events.push(Event::new(
            author,
            clock.tick(),
            EventKind::ConfigReplaced { config },
        ));
    }

    for criterion in &seed.criteria {
        events.push(Event::new(
            author,
            clock.tick(),
            EventKind::CriterionAdded {
                criterion_id: criterion.id.clone(),
                label: criterion.label.clone(),
            },
        ));
        if criterion.scale.is_some() {
            events.push(Event::new(
                author,
                clock.tick(),
                EventKind::CriterionScaleSet {
                    criterion_id: criterion.id.clone(),
                    scale: criterion.scale,
                },
            ));
        }
    }

    for tool in &seed.tools {
        events.push(Event::new(
            author,
            clock.tick(),
            EventKind::ToolAdded {
                tool_id: tool.id.clone(),
                label: tool.label.clone(),
            },
        ));
    }

    for (criterion_id, weight) in &seed.weights {
        events.push(Event::new(
            author,
            clock.tick(),
            EventKind::WeightSet {
                criterion_id: criterion_id.clone(),
                weight: *weight,
            },
        ));
    }

    for rating in &seed.ratings {
        events.push(Event::new(
            author,
            clock.tick(),
            EventKind::ScoreSet {
                entry_id: EventId::new().to_string(),
                tool_id: rating.tool_id.clone(),
                criterion_id: rating.criterion_id.clone(),
                score: rating.score,
                label: rating.label.clone(),
                comment: rating.comment.clone(),
            },
        ));
    }

    events
}

#[cfg(test)]
mod tests {
    use crate::project::project;
    use crate::state::DEFAULT_WEIGHT;

    use super::*;

    fn sample_seed() -> SeedMatrix {
        SeedMatrix {
            criteria: vec![
                SeedCriterion {
                    id: "cost".into(),
                    label: "Cost".into(),
                    scale: None,
                },
                SeedCriterion {
                    id: "speed".into(),
                    label: "Speed".into(),
                    scale: Some(ScaleConfig::new(1, 5)),
                },
            ],
            tools: vec![SeedTool {
                id: "hammer".into(),
                label: "Hammer".into(),
            }],
            ratings: vec![SeedRating {
                tool_id: "hammer".into(),
                criterion_id: "cost".into(),
                score: Some(8),
                label: None,
                comment: Some("cheap".into()),
            }],
            weights: BTreeMap::from([("cost".to_string(), 20)]),
            config: None,
        }
    }

    #[test]
    fn seed_roundtrips_through_projection() {
        let clock = Clock::new();
        let events = seed_events(&sample_seed(), "seeder", &clock);
        let state = project(&events);

        assert_eq!(state.criteria.len(), 2);
        assert_eq!(state.criterion("cost").unwrap().label, "Cost");
        assert_eq!(
            state.criterion("speed").unwrap().scale,
            Some(ScaleConfig::new(1, 5))
        );
        assert_eq!(state.tools.len(), 1);
        assert_eq!(state.scores.len(), 1);
        assert_eq!(state.scores[0].comment.as_deref(), Some("cheap"));
        assert_eq!(state.weights.get("cost"), Some(&20));
        assert_eq!(state.weights.get("speed"), Some(&DEFAULT_WEIGHT));
    }

    #[test]
    fn empty_seed_produces_no_events() {
        let clock = Clock::new();
        assert!(seed_events(&SeedMatrix::default(), "seeder", &clock).is_empty());
    }

    #[test]
    fn seed_config_comes_first() {
        let clock = Clock::new();
        let seed = SeedMatrix {
            config: Some(MatrixConfig {
                default_scale: ScaleConfig::new(0, 5),
                allow_negative: true,
            }),
            ..sample_seed()
        };
        let events = seed_events(&seed, "seeder", &clock);
        assert!(matches!(events[0].kind, EventKind::ConfigReplaced { .. }));

        let state = project(&events);
        assert!(state.config.allow_negative);
    }

    #[test]
    fn seed_timestamps_are_strictly_increasing() {
        let clock = Clock::new();
        let events = seed_events(&sample_seed(), "seeder", &clock);
        for pair in events.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }
}
