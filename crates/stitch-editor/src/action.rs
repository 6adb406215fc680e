use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

use stitch_tree::prelude::*;
use stitch_utils::id::IdGen;

/// Something that can be put into a focused hole.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[display("unit")]
    Unit,
    #[display("? ?")]
    Application,
    #[display("λ. ?")]
    Abstraction,
    #[display("(?, ?)")]
    Pair,
    #[display("π₁ ?")]
    Proj1,
    #[display("π₂ ?")]
    Proj2,
    #[display("{_0}")]
    Variable(VarName),
}

impl Action {
    /// The structural constructors in menu order.
    pub const CONSTRUCTORS: [Self; 6] = [
        Self::Unit,
        Self::Application,
        Self::Abstraction,
        Self::Pair,
        Self::Proj1,
        Self::Proj2,
    ];

    /// Builds the fragment this action stands for,
    /// with a fresh placeholder hole in every child position.
    pub fn materialize(&self, vars: &mut IdGen<VarName>, holes: &mut IdGen<HoleName>) -> Term {
        let mut hole = || Term::Hole(holes.fresh());

        match *self {
            Self::Unit => Term::Unit,
            Self::Variable(name) => Term::Var(name),
            Self::Abstraction => Term::abs(vars.fresh(), hole()),
            Self::Application => {
                let applicant = hole();
                Term::app(applicant, hole())
            }
            Self::Pair => {
                let first = hole();
                Term::pair(first, hole())
            }
            Self::Proj1 => Term::proj1(hole()),
            Self::Proj2 => Term::proj2(hole()),
        }
    }

    /// Returns a copy of `term` where `hole` is filled with this action,
    /// and all holes are canonically renumbered.
    pub fn fill(&self, term: &Term, hole: HoleName) -> Term {
        let mut vars = IdGen::after(term.max_var());
        let mut holes = IdGen::after(term.max_hole());
        let fragment = self.materialize(&mut vars, &mut holes);

        let mut filled = term.clone();
        filled.fill_hole(hole, fragment);
        filled.renumber_holes();
        filled
    }
}

/// Input of the editor state machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    Select(HoleName),
    Put(Action),
    Relabel(VarName, Option<Label>),
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(hole) => write!(f, "select {hole}"),
            Self::Put(action) => write!(f, "put {action}"),
            Self::Relabel(name, Some(label)) => write!(f, "relabel {name} as {label}"),
            Self::Relabel(name, None) => write!(f, "unlabel {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(id: u32) -> Term {
        Term::hole(HoleName::new(id))
    }

    #[test]
    fn materialize_uses_fresh_ids() {
        let mut vars = IdGen::after(Some(VarName::new(3)));
        let mut holes = IdGen::after(Some(HoleName::new(1)));

        assert_eq!(
            Action::Abstraction.materialize(&mut vars, &mut holes),
            Term::abs(VarName::new(4), h(2))
        );
        assert_eq!(
            Action::Application.materialize(&mut vars, &mut holes),
            Term::app(h(3), h(4))
        );
        assert_eq!(Action::Unit.materialize(&mut vars, &mut holes), Term::Unit);
    }

    #[test]
    fn fill_renumbers_holes() {
        // (?0, ?1) with ?0 := ?2 ?3 becomes (?0 ?1, ?2)
        let term = Term::pair(h(0), h(1));
        let filled = Action::Application.fill(&term, HoleName::new(0));

        assert_eq!(filled, Term::pair(Term::app(h(0), h(1)), h(2)));
        // the committed term is untouched
        assert_eq!(term, Term::pair(h(0), h(1)));
    }

    #[test]
    fn abstraction_gets_unused_binder() {
        let term = Term::abs(VarName::new(0), h(0));
        let filled = Action::Abstraction.fill(&term, HoleName::new(0));

        assert_eq!(
            filled,
            Term::abs(VarName::new(0), Term::abs(VarName::new(1), h(0)))
        );
    }

    #[test]
    fn display() {
        assert_eq!(Transition::Put(Action::Pair).to_string(), "put (?, ?)");
        assert_eq!(
            Transition::Put(Action::Variable(VarName::new(2))).to_string(),
            "put x2"
        );
        assert_eq!(Transition::Select(HoleName::new(1)).to_string(), "select ?1");
    }

    #[test]
    fn relabel_display_names_the_label() {
        assert_eq!(
            Transition::Relabel(VarName::new(0), Some(Label::from("f"))).to_string(),
            "relabel x0 as f"
        );
        assert_eq!(
            Transition::Relabel(VarName::new(3), None).to_string(),
            "unlabel x3"
        );
    }
}
