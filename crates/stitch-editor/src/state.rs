use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

use log::debug;
use stitch_tree::prelude::*;
use stitch_typer::prelude::*;

use crate::{
    action::{Action, Transition},
    candidates::candidates,
    error::EditError,
    options::EditorOptions,
};

/// The selected hole together with everything the editor knows about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Focus {
    pub hole: HoleName,
    pub ty: Type,
    pub context: Context,
    pub transitions: Vec<Transition>,
}

impl Focus {
    pub fn offers(&self, action: Action) -> bool {
        self.transitions.contains(&Transition::Put(action))
    }

    /// The offered actions, in menu order.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.transitions.iter().filter_map(|transition| match transition {
            Transition::Put(action) => Some(*action),
            _ => None,
        })
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hole: {}; type: {}; context: {}; transitions: ",
            self.hole, self.ty, self.context
        )?;

        for (idx, transition) in self.transitions.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{transition}")?;
        }

        Ok(())
    }
}

/// Editor state, either unfocused or focused on a single hole.
///
/// Transitions never mutate a state, they return the next one.
/// Deserialization goes through [`StateSnapshot`], so a loaded state
/// is re-checked and its focus recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StateSnapshot")]
pub struct State {
    term: Term,
    ty: Type,
    focus: Option<Focus>,
    options: EditorOptions,
}

impl State {
    /// Starts editing `term`, which must be well typed and have unique hole names.
    pub fn new(term: Term) -> Result<Self, EditError> {
        Self::with_options(term, EditorOptions::default())
    }

    pub fn with_options(term: Term, options: EditorOptions) -> Result<Self, EditError> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = term.holes().into_iter().find(|hole| !seen.insert(*hole)) {
            return Err(EditError::DuplicateHole(duplicate));
        }

        let inference = infer(&term)?;

        Ok(Self {
            term,
            ty: inference.ty,
            focus: None,
            options,
        })
    }

    /// A program consisting of a single hole.
    pub fn empty() -> Self {
        Self {
            term: Term::default(),
            ty: Type::var(0),
            focus: None,
            options: EditorOptions::default(),
        }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn focus(&self) -> Option<&Focus> {
        self.focus.as_ref()
    }

    pub fn is_focused(&self) -> bool {
        self.focus.is_some()
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn update(&self, transition: Transition) -> Result<Self, EditError> {
        debug!("Update with {transition}");

        match transition {
            Transition::Select(hole) => self.select(hole),
            Transition::Put(action) => self.put(action),
            Transition::Relabel(name, label) => self.relabel(name, label),
        }
    }

    /// Focuses `hole` and computes every action that can be put into it.
    pub fn select(&self, hole: HoleName) -> Result<Self, EditError> {
        if !self.term.has_hole(hole) {
            return Err(EditError::UnknownHole(hole));
        }

        let inference = infer(&self.term)
            .unwrap_or_else(|e| panic!("committed term {} is ill typed: {e}", self.term));

        let ty = inference
            .hole_type(hole)
            .cloned()
            .expect("every hole of an inferred term has a type");
        let context = inference
            .hole_context(hole)
            .cloned()
            .expect("every hole of an inferred term has a context");

        let mut transitions = candidates(
            &self.term,
            hole,
            &ty,
            &context,
            self.options.candidate_check,
        )
        .into_iter()
        .map(Transition::Put)
        .collect::<Vec<_>>();

        if self.options.offer_selections {
            transitions.extend(
                inference
                    .holes()
                    .filter(|other| *other != hole)
                    .map(Transition::Select),
            );
        }

        debug!(
            "Selected {hole} : {ty} with {} transitions",
            transitions.len()
        );

        Ok(Self {
            term: self.term.clone(),
            ty: self.ty.clone(),
            focus: Some(Focus {
                hole,
                ty,
                context,
                transitions,
            }),
            options: self.options.clone(),
        })
    }

    /// Fills the focused hole with `action`, which must have been offered.
    pub fn put(&self, action: Action) -> Result<Self, EditError> {
        let focus = self.focus.as_ref().ok_or(EditError::Unfocused)?;

        if !focus.offers(action) {
            return Err(EditError::NotOffered(action));
        }

        let term = action.fill(&self.term, focus.hole);
        let inference = infer(&term)
            .unwrap_or_else(|e| panic!("offered action {action} produced ill typed {term}: {e}"));

        debug!("Put {action} into {}: {term} : {}", focus.hole, inference.ty);

        Ok(Self {
            term,
            ty: inference.ty,
            focus: None,
            options: self.options.clone(),
        })
    }

    /// Changes the display label of the variable `name`.
    ///
    /// Types and focus are unaffected.
    pub fn relabel(&self, name: VarName, label: Option<Label>) -> Result<Self, EditError> {
        let mut term = self.term.clone();

        if !term.relabel(name, label) {
            return Err(EditError::UnknownVariable(name));
        }

        Ok(Self {
            term,
            ..self.clone()
        })
    }
}

/// The parts of a serialized [`State`] that are not derived from its term.
#[derive(Debug, Clone, Deserialize)]
pub struct StateSnapshot {
    pub term: Term,
    #[serde(default)]
    pub focus: Option<FocusSnapshot>,
    #[serde(default)]
    pub options: EditorOptions,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FocusSnapshot {
    pub hole: HoleName,
}

impl TryFrom<StateSnapshot> for State {
    type Error = EditError;

    fn try_from(snapshot: StateSnapshot) -> Result<Self, EditError> {
        let state = Self::with_options(snapshot.term, snapshot.options)?;

        match snapshot.focus {
            Some(focus) => state.select(focus.hole),
            None => Ok(state),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "term: {}; type: {}; focus: ", self.term, self.ty)?;

        match &self.focus {
            Some(focus) => write!(f, "{focus}"),
            None => f.write_str("unfocused"),
        }
    }
}
