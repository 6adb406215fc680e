use std::fmt::{self, Display};

use crate::{
    id::VarName,
    term::{Binder, Term},
};

/// Binding strength of the position a term is printed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    /// Anything goes, abstractions extend as far right as possible.
    Top,
    /// Left of an application, applications are left associative.
    Applicant,
    /// Operand of an application or projection.
    Atom,
}

/// Prints terms, resolving variables to the labels of their binders.
pub struct TermPrinter<'t> {
    scope: Vec<&'t Binder>,
}

impl<'t> TermPrinter<'t> {
    pub fn new() -> Self {
        Self { scope: Vec::new() }
    }

    fn write_var(&self, name: VarName, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope.iter().rev().find(|binder| binder.name == name) {
            Some(binder) => binder.fmt(f),
            None => name.fmt(f),
        }
    }

    fn write(&mut self, term: &'t Term, prec: Prec, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match term {
            Term::Unit => f.write_str("unit"),
            Term::Var(name) => self.write_var(*name, f),
            Term::Hole(name) => name.fmt(f),
            Term::Pair(first, second) => {
                f.write_str("(")?;
                self.write(first, Prec::Top, f)?;
                f.write_str(", ")?;
                self.write(second, Prec::Top, f)?;
                f.write_str(")")
            }
            Term::Abs(binder, body) => {
                let parens = prec > Prec::Top;
                if parens {
                    f.write_str("(")?;
                }
                write!(f, "λ{binder}. ")?;

                self.scope.push(binder);
                let result = self.write(body, Prec::Top, f);
                self.scope.pop();
                result?;

                if parens {
                    f.write_str(")")?;
                }
                Ok(())
            }
            Term::App(applicant, argument) => self.parenthesized(prec > Prec::Applicant, f, |p, f| {
                p.write(applicant, Prec::Applicant, f)?;
                f.write_str(" ")?;
                p.write(argument, Prec::Atom, f)
            }),
            Term::Proj1(argument) => self.parenthesized(prec > Prec::Applicant, f, |p, f| {
                f.write_str("π₁ ")?;
                p.write(argument, Prec::Atom, f)
            }),
            Term::Proj2(argument) => self.parenthesized(prec > Prec::Applicant, f, |p, f| {
                f.write_str("π₂ ")?;
                p.write(argument, Prec::Atom, f)
            }),
        }
    }

    fn parenthesized<F>(&mut self, parens: bool, f: &mut fmt::Formatter<'_>, inner: F) -> fmt::Result
    where
        F: FnOnce(&mut Self, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        if parens {
            f.write_str("(")?;
        }
        inner(self, f)?;
        if parens {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl Default for TermPrinter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TermPrinter::new().write(self, Prec::Top, f)
    }
}

#[cfg(test)]
mod tests {
    use crate::id::HoleName;

    use super::*;

    fn h(id: u32) -> Term {
        Term::hole(HoleName::new(id))
    }

    fn x(id: u32) -> VarName {
        VarName::new(id)
    }

    #[test]
    fn atoms() {
        assert_eq!(Term::Unit.to_string(), "unit");
        assert_eq!(h(3).to_string(), "?3");
        assert_eq!(Term::var(x(1)).to_string(), "x1");
    }

    #[test]
    fn abstraction_uses_binder_label() {
        let term = Term::abs(Binder::labeled(x(0), "f"), Term::app(Term::var(x(0)), h(0)));
        assert_eq!(term.to_string(), "λf. f ?0");
    }

    #[test]
    fn application_is_left_associative() {
        let left = Term::app(Term::app(h(0), h(1)), h(2));
        let right = Term::app(h(0), Term::app(h(1), h(2)));

        assert_eq!(left.to_string(), "?0 ?1 ?2");
        assert_eq!(right.to_string(), "?0 (?1 ?2)");
    }

    #[test]
    fn nested_structure() {
        let term = Term::app(
            Term::abs(x(0), Term::pair(Term::proj1(Term::var(x(0))), Term::Unit)),
            Term::proj2(Term::app(h(0), h(1))),
        );

        assert_eq!(term.to_string(), "(λx0. (π₁ x0, unit)) (π₂ (?0 ?1))");
    }
}
