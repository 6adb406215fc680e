use ecow::EcoString;
use enum_as_inner::EnumAsInner;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::id::{HoleName, VarName};

pub type Label = EcoString;

/// Binding occurrence of a variable.
///
/// The `name` is the variable's identity and never changes,
/// the `label` is purely cosmetic and can be replaced at any time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Binder {
    pub name: VarName,
    pub label: Option<Label>,
}

impl Binder {
    pub fn new(name: VarName) -> Self {
        Self { name, label: None }
    }

    pub fn labeled(name: VarName, label: impl Into<Label>) -> Self {
        Self {
            name,
            label: Some(label.into()),
        }
    }
}

impl From<VarName> for Binder {
    fn from(name: VarName) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => f.write_str(label),
            None => Display::fmt(&self.name, f),
        }
    }
}

/// A possibly incomplete program.
///
/// ```text
/// e ::= unit | x | λx. e | e e | (e, e) | π₁ e | π₂ e | ?n
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, EnumAsInner)]
pub enum Term {
    Unit,
    Var(VarName),
    Abs(Binder, Box<Term>),
    App(Box<Term>, Box<Term>),
    Pair(Box<Term>, Box<Term>),
    Proj1(Box<Term>),
    Proj2(Box<Term>),
    Hole(HoleName),
}

impl Term {
    pub fn var(name: VarName) -> Self {
        Self::Var(name)
    }

    pub fn hole(name: HoleName) -> Self {
        Self::Hole(name)
    }

    pub fn abs(binder: impl Into<Binder>, body: Self) -> Self {
        Self::Abs(binder.into(), Box::new(body))
    }

    pub fn app(applicant: Self, argument: Self) -> Self {
        Self::App(Box::new(applicant), Box::new(argument))
    }

    pub fn pair(first: Self, second: Self) -> Self {
        Self::Pair(Box::new(first), Box::new(second))
    }

    pub fn proj1(argument: Self) -> Self {
        Self::Proj1(Box::new(argument))
    }

    pub fn proj2(argument: Self) -> Self {
        Self::Proj2(Box::new(argument))
    }
}

impl Term {
    /// Iterates over all subterms in pre-order, left to right, starting with `self`.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// All hole names in traversal order.
    pub fn holes(&self) -> Vec<HoleName> {
        self.preorder()
            .filter_map(|term| term.as_hole().copied())
            .collect()
    }

    pub fn has_hole(&self, name: HoleName) -> bool {
        self.preorder()
            .any(|term| matches!(term, Self::Hole(hole) if *hole == name))
    }

    pub fn binder(&self, name: VarName) -> Option<&Binder> {
        self.preorder().find_map(|term| match term {
            Self::Abs(binder, _) if binder.name == name => Some(binder),
            _ => None,
        })
    }

    /// Largest variable name mentioned anywhere, either bound or referenced.
    pub fn max_var(&self) -> Option<VarName> {
        self.preorder()
            .filter_map(|term| match term {
                Self::Var(name) => Some(*name),
                Self::Abs(binder, _) => Some(binder.name),
                _ => None,
            })
            .max()
    }

    pub fn max_hole(&self) -> Option<HoleName> {
        self.holes().into_iter().max()
    }

    /// Returns the hole named `name`.
    pub fn hole_mut(&mut self, name: HoleName) -> Option<&mut Self> {
        if matches!(self, Self::Hole(hole) if *hole == name) {
            return Some(self);
        }

        match self {
            Self::Unit | Self::Var(_) | Self::Hole(_) => None,
            Self::Abs(_, body) => body.hole_mut(name),
            Self::Proj1(arg) | Self::Proj2(arg) => arg.hole_mut(name),
            Self::App(l, r) | Self::Pair(l, r) => match l.hole_mut(name) {
                Some(found) => Some(found),
                None => r.hole_mut(name),
            },
        }
    }

    /// Replaces the hole named `name` with `fragment`.
    ///
    /// Returns `false` and leaves the term unchanged if no such hole exists.
    pub fn fill_hole(&mut self, name: HoleName, fragment: Self) -> bool {
        match self.hole_mut(name) {
            Some(slot) => {
                *slot = fragment;
                true
            }
            None => false,
        }
    }

    /// Updates the display label of the binder of `name`.
    ///
    /// Returns `false` if the term has no such binder.
    pub fn relabel(&mut self, name: VarName, label: Option<Label>) -> bool {
        match self {
            Self::Abs(binder, _) if binder.name == name => {
                binder.label = label;
                true
            }
            Self::Unit | Self::Var(_) | Self::Hole(_) => false,
            Self::Abs(_, body) => body.relabel(name, label),
            Self::Proj1(arg) | Self::Proj2(arg) => arg.relabel(name, label),
            Self::App(l, r) | Self::Pair(l, r) => {
                l.relabel(name, label.clone()) || r.relabel(name, label)
            }
        }
    }
}

impl Default for Term {
    fn default() -> Self {
        Self::Hole(HoleName::new(0))
    }
}

pub struct Preorder<'a> {
    stack: Vec<&'a Term>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Term;

    fn next(&mut self) -> Option<Self::Item> {
        let term = self.stack.pop()?;
        match term {
            Term::Unit | Term::Var(_) | Term::Hole(_) => (),
            Term::Abs(_, body) => self.stack.push(body),
            Term::Proj1(arg) | Term::Proj2(arg) => self.stack.push(arg),
            Term::App(l, r) | Term::Pair(l, r) => {
                self.stack.push(r);
                self.stack.push(l);
            }
        }
        Some(term)
    }
}
