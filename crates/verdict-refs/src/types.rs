use serde::{Deserialize, Serialize};
use verdict_types::CommitId;

/// What a named reference is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    /// A mutable pointer that advances as commits land.
    Branch,
    /// A write-once pointer to a specific commit.
    Tag,
}

/// A named pointer to a commit in the DAG.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    /// Human-readable name (e.g. "main", "feature/scoring").
    pub name: String,
    /// The commit this ref currently targets.
    pub target: CommitId,
    /// Branch or tag.
    pub kind: RefKind,
}

impl Ref {
    /// Create a branch ref.
    pub fn branch(name: impl Into<String>, target: CommitId) -> Self {
        Self {
            name: name.into(),
            target,
            kind: RefKind::Branch,
        }
    }

    /// Create a tag ref.
    pub fn tag(name: impl Into<String>, target: CommitId) -> Self {
        Self {
            name: name.into(),
            target,
            kind: RefKind::Tag,
        }
    }

    /// Returns `true` if this is a branch ref.
    pub fn is_branch(&self) -> bool {
        self.kind == RefKind::Branch
    }

    /// Returns `true` if this is a tag ref.
    pub fn is_tag(&self) -> bool {
        self.kind == RefKind::Tag
    }
}
