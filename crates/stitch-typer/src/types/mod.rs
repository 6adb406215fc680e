use derive_more::From;
use enum_as_inner::EnumAsInner;
use serde::{Deserialize, Serialize};
use std::{
    convert::Infallible,
    fmt::{self, Display},
    ops::ControlFlow,
};

mod arrow;
mod product;
mod var;
mod visit;

pub use arrow::*;
pub use product::*;
pub use var::*;
pub use visit::*;

use crate::substitute::{Substitutable, Substitution};

/// Monomorphic types of the object language.
///
/// τ ::= Unit | α | τ -> τ | τ * τ
#[derive(Debug, From, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, EnumAsInner)]
pub enum Type {
    Unit,
    Var(TypeVar),
    Arrow(Box<ArrowType>),
    Product(Box<ProductType>),
}

impl Type {
    pub fn arrow(domain: Self, codomain: Self) -> Self {
        Self::Arrow(Box::new(ArrowType::new(domain, codomain)))
    }

    pub fn product(first: Self, second: Self) -> Self {
        Self::Product(Box::new(ProductType::new(first, second)))
    }

    pub fn var(id: u32) -> Self {
        Self::Var(TypeVar::new(id))
    }
}

impl Type {
    /// Occurs check.
    pub fn contains(&self, var: &TypeVar) -> bool {
        struct Occured;
        struct OccursChecker<'t>(&'t TypeVar);

        impl TypeVisitor for OccursChecker<'_> {
            type BreakValue = Occured;

            fn visit_var(&mut self, var: &TypeVar) -> ControlFlow<Self::BreakValue> {
                if var == self.0 {
                    ControlFlow::Break(Occured)
                } else {
                    ControlFlow::Continue(())
                }
            }
        }

        let mut checker = OccursChecker(var);
        match self.visit_type_by(&mut checker) {
            ControlFlow::Break(_) => true,
            ControlFlow::Continue(()) => false,
        }
    }

    /// Type variables in order of first occurrence, without duplicates.
    pub fn type_vars(&self) -> Vec<TypeVar> {
        let mut vars = Vec::new();
        self.extend_type_vars(&mut vars);
        vars
    }

    pub fn extend_type_vars(&self, vars: &mut Vec<TypeVar>) {
        struct VarsFinder<'t>(&'t mut Vec<TypeVar>);

        impl TypeVisitor for VarsFinder<'_> {
            type BreakValue = Infallible;

            fn visit_var(&mut self, var: &TypeVar) -> ControlFlow<Self::BreakValue> {
                if !self.0.contains(var) {
                    self.0.push(*var);
                }
                ControlFlow::Continue(())
            }
        }

        let mut finder = VarsFinder(vars);
        let _ = self.visit_type_by(&mut finder);
    }

    /// Replaces every occurrence of `var` with `with`.
    pub fn substitute(&self, var: TypeVar, with: &Self) -> Self {
        match self {
            Self::Unit => Self::Unit,
            Self::Var(v) if *v == var => with.clone(),
            Self::Var(v) => Self::Var(*v),
            Self::Arrow(a) => Self::arrow(a.domain.substitute(var, with), a.codomain.substitute(var, with)),
            Self::Product(p) => {
                Self::product(p.first.substitute(var, with), p.second.substitute(var, with))
            }
        }
    }
}

impl Substitutable for Type {
    fn try_apply(&self, s: &mut Substitution) -> Option<Self> {
        match self {
            Self::Unit => None,
            Self::Var(v) => v.try_apply(s),
            Self::Arrow(a) => a.try_apply(s).map(Into::into),
            Self::Product(p) => p.try_apply(s).map(Into::into),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => f.write_str("Unit"),
            Self::Var(tv) => Display::fmt(tv, f),
            Self::Arrow(a) => Display::fmt(a, f),
            Self::Product(p) => Display::fmt(p, f),
        }
    }
}

impl From<ArrowType> for Type {
    fn from(value: ArrowType) -> Self {
        Self::Arrow(Box::new(value))
    }
}

impl From<ProductType> for Type {
    fn from(value: ProductType) -> Self {
        Self::Product(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_nests_correctly() {
        let a = Type::var(0);
        let b = Type::var(1);

        assert_eq!(Type::arrow(a.clone(), Type::arrow(b.clone(), Type::Unit)).to_string(), "a -> b -> Unit");
        assert_eq!(Type::arrow(Type::arrow(a.clone(), b.clone()), Type::Unit).to_string(), "(a -> b) -> Unit");
        assert_eq!(
            Type::product(Type::arrow(a.clone(), b.clone()), Type::product(a.clone(), Type::Unit)).to_string(),
            "(a -> b) * (a * Unit)"
        );
        assert_eq!(Type::arrow(Type::product(a, b), Type::Unit).to_string(), "a * b -> Unit");
    }

    #[test]
    fn contains_finds_nested_vars() {
        let ty = Type::arrow(Type::Unit, Type::product(Type::var(3), Type::Unit));

        assert!(ty.contains(&TypeVar::new(3)));
        assert!(!ty.contains(&TypeVar::new(0)));
        assert!(!Type::Unit.contains(&TypeVar::new(0)));
    }

    #[test]
    fn type_vars_in_first_occurrence_order() {
        let ty = Type::arrow(Type::var(4), Type::product(Type::var(1), Type::var(4)));
        assert_eq!(ty.type_vars(), vec![TypeVar::new(4), TypeVar::new(1)]);
    }

    #[test]
    fn substitute_replaces_all_occurrences() {
        let ty = Type::arrow(Type::var(0), Type::product(Type::var(0), Type::var(1)));
        let replaced = ty.substitute(TypeVar::new(0), &Type::Unit);

        assert_eq!(replaced, Type::arrow(Type::Unit, Type::product(Type::Unit, Type::var(1))));
    }
}
