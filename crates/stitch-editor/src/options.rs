//! Options for controlling the editor's behavior.

use serde::{Deserialize, Serialize};

/// How variable candidates are checked during enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateCheck {
    /// Fill the hole in a copy of the term and infer the whole copy.
    #[default]
    Speculative,
    /// Unify the binding's type with the hole's type directly.
    ///
    /// The hole's type comes from a most general solution,
    /// so this accepts exactly the variables the speculative check accepts.
    /// Structural constructors are still checked speculatively.
    Unification,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Strategy for variable candidates
    pub candidate_check: CandidateCheck,

    /// Whether a focus also offers selecting each of the other holes
    pub offer_selections: bool,
}

impl EditorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidate_check(mut self, candidate_check: CandidateCheck) -> Self {
        self.candidate_check = candidate_check;
        self
    }

    pub fn with_offer_selections(mut self, offer_selections: bool) -> Self {
        self.offer_selections = offer_selections;
        self
    }
}
