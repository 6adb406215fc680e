use serde::{Deserialize, Serialize};
use std::fmt;

use log::trace;

use crate::{
    annotate::TermAnn,
    error::TypeError,
    substitute::{Substitutable, Substitution},
    types::Type,
    unify::Unifiable,
};

/// Equation between two types that must hold for the term to be well typed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constraint {
    pub expected: Type,
    pub actual: Type,
}

impl Constraint {
    pub fn new(expected: Type, actual: Type) -> Self {
        Self { expected, actual }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ≈ {}", self.expected, self.actual)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constraints(Vec<Constraint>);

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constrain(&mut self, expected: Type, actual: Type) {
        self.0.push(Constraint::new(expected, actual));
    }

    /// Generates the constraints of an annotated term, parents before children.
    ///
    /// - `f a : τ` requires `ty(f) ≈ ty(a) -> τ`
    /// - `(a, b) : τ` requires `ty(a) * ty(b) ≈ τ`
    /// - `π₁ e : τ` requires `ty(e) ≈ τ * σ` for the auxiliary `σ`
    /// - `π₂ e : τ` requires `ty(e) ≈ σ * τ` for the auxiliary `σ`
    pub fn collect(term: &TermAnn) -> Self {
        let mut constraints = Self::new();
        constraints.visit(term);
        constraints
    }

    fn visit(&mut self, term: &TermAnn) {
        match term {
            TermAnn::Unit | TermAnn::Var { .. } | TermAnn::Hole { .. } => (),
            TermAnn::Abs { body, .. } => self.visit(body),
            TermAnn::App {
                applicant,
                argument,
                ty,
            } => {
                self.constrain(
                    applicant.ty().into_owned(),
                    Type::arrow(argument.ty().into_owned(), ty.clone()),
                );
                self.visit(applicant);
                self.visit(argument);
            }
            TermAnn::Pair { first, second, ty } => {
                self.constrain(
                    Type::product(first.ty().into_owned(), second.ty().into_owned()),
                    ty.clone(),
                );
                self.visit(first);
                self.visit(second);
            }
            TermAnn::Proj1 {
                argument,
                ty,
                second,
            } => {
                self.constrain(
                    argument.ty().into_owned(),
                    Type::product(ty.clone(), second.clone()),
                );
                self.visit(argument);
            }
            TermAnn::Proj2 {
                argument,
                ty,
                first,
            } => {
                self.constrain(
                    argument.ty().into_owned(),
                    Type::product(first.clone(), ty.clone()),
                );
                self.visit(argument);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.0.iter()
    }

    /// Solves the constraints in the order they were generated,
    /// stopping at the first one that cannot be satisfied.
    pub fn solve(self, s: &mut Substitution) -> Result<(), TypeError> {
        for Constraint { expected, actual } in self.0 {
            let lhs = expected.apply_cow(s);
            let rhs = actual.apply_cow(s);

            trace!("SOLVING: {} ≈ {}", lhs, rhs);

            lhs.try_unify(&rhs, s)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{annotate::Annotator, context::Context, test::*};
    use stitch_tree::term::Term;

    fn constraints_of(term: &Term) -> Constraints {
        let ann = Annotator::new().annotate(term, &Context::new()).unwrap();
        Constraints::collect(&ann)
    }

    #[test]
    fn leaves_and_abstractions_are_unconstrained() {
        assert!(constraints_of(&h(0)).is_empty());
        assert!(constraints_of(&Term::Unit).is_empty());
        assert!(constraints_of(&Term::abs(x(0), Term::var(x(0)))).is_empty());
    }

    #[test]
    fn application_constrains_applicant() {
        // ?0 : a, ?1 : b, node : c
        let constraints = constraints_of(&Term::app(h(0), h(1)));

        assert_eq!(
            constraints.iter().collect::<Vec<_>>(),
            vec![&Constraint::new(
                Type::var(0),
                Type::arrow(Type::var(1), Type::var(2))
            )]
        );
    }

    #[test]
    fn projections_use_auxiliary_component() {
        // ?0 : a, node : b, aux : c
        let first = constraints_of(&Term::proj1(h(0)));
        let second = constraints_of(&Term::proj2(h(0)));

        assert_eq!(
            first.iter().next(),
            Some(&Constraint::new(
                Type::var(0),
                Type::product(Type::var(1), Type::var(2))
            ))
        );
        assert_eq!(
            second.iter().next(),
            Some(&Constraint::new(
                Type::var(0),
                Type::product(Type::var(2), Type::var(1))
            ))
        );
    }

    #[test]
    fn parent_constraints_come_first() {
        let constraints = constraints_of(&Term::pair(Term::app(h(0), h(1)), Term::Unit));

        assert_eq!(constraints.len(), 2);
        let outer = constraints.iter().next().unwrap();
        assert!(outer.expected.is_product());
    }

    #[test]
    fn solve_fails_on_unit_application() {
        let constraints = constraints_of(&Term::app(Term::Unit, h(0)));
        let mut s = Substitution::empty();

        assert!(matches!(
            constraints.solve(&mut s),
            Err(TypeError::Mismatch { .. })
        ));
    }
}
