use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt};

use log::trace;
use stitch_tree::prelude::*;
use stitch_utils::id::IdGen;

use crate::{context::Context, error::TypeError, types::{Type, TypeVar}};

/// A term where every node carries its type.
///
/// Projections additionally remember the type of the product component they discard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermAnn {
    Unit,
    Var {
        name: VarName,
        ty: Type,
    },
    Abs {
        binder: Binder,
        domain: Type,
        body: Box<TermAnn>,
    },
    App {
        applicant: Box<TermAnn>,
        argument: Box<TermAnn>,
        ty: Type,
    },
    Pair {
        first: Box<TermAnn>,
        second: Box<TermAnn>,
        ty: Type,
    },
    Proj1 {
        argument: Box<TermAnn>,
        ty: Type,
        second: Type,
    },
    Proj2 {
        argument: Box<TermAnn>,
        ty: Type,
        first: Type,
    },
    Hole {
        name: HoleName,
        ty: Type,
    },
}

impl TermAnn {
    /// The type of this node.
    pub fn ty(&self) -> Cow<'_, Type> {
        match self {
            Self::Unit => Cow::Owned(Type::Unit),
            Self::Abs { domain, body, .. } => {
                Cow::Owned(Type::arrow(domain.clone(), body.ty().into_owned()))
            }
            Self::Var { ty, .. }
            | Self::App { ty, .. }
            | Self::Pair { ty, .. }
            | Self::Proj1 { ty, .. }
            | Self::Proj2 { ty, .. }
            | Self::Hole { ty, .. } => Cow::Borrowed(ty),
        }
    }

    /// Visits every stored type in pre-order, a node's own types before its children.
    pub fn for_each_type<F>(&self, f: &mut F)
    where
        F: FnMut(&Type),
    {
        match self {
            Self::Unit => (),
            Self::Var { ty, .. } | Self::Hole { ty, .. } => f(ty),
            Self::Abs { domain, body, .. } => {
                f(domain);
                body.for_each_type(f);
            }
            Self::App {
                applicant,
                argument,
                ty,
            } => {
                f(ty);
                applicant.for_each_type(f);
                argument.for_each_type(f);
            }
            Self::Pair { first, second, ty } => {
                f(ty);
                first.for_each_type(f);
                second.for_each_type(f);
            }
            Self::Proj1 {
                argument,
                ty,
                second: other,
            }
            | Self::Proj2 {
                argument,
                ty,
                first: other,
            } => {
                f(ty);
                f(other);
                argument.for_each_type(f);
            }
        }
    }

    /// Mutable counterpart of [`TermAnn::for_each_type`], same order.
    pub fn for_each_type_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Type),
    {
        match self {
            Self::Unit => (),
            Self::Var { ty, .. } | Self::Hole { ty, .. } => f(ty),
            Self::Abs { domain, body, .. } => {
                f(domain);
                body.for_each_type_mut(f);
            }
            Self::App {
                applicant,
                argument,
                ty,
            } => {
                f(ty);
                applicant.for_each_type_mut(f);
                argument.for_each_type_mut(f);
            }
            Self::Pair { first, second, ty } => {
                f(ty);
                first.for_each_type_mut(f);
                second.for_each_type_mut(f);
            }
            Self::Proj1 {
                argument,
                ty,
                second: other,
            }
            | Self::Proj2 {
                argument,
                ty,
                first: other,
            } => {
                f(ty);
                f(other);
                argument.for_each_type_mut(f);
            }
        }
    }

    /// All type variables in first-occurrence order.
    pub fn type_vars(&self) -> Vec<TypeVar> {
        let mut vars = Vec::new();
        self.for_each_type(&mut |ty| ty.extend_type_vars(&mut vars));
        vars
    }
}

impl fmt::Display for TermAnn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => f.write_str("unit"),
            Self::Var { name, ty } => write!(f, "({name} : {ty})"),
            Self::Hole { name, ty } => write!(f, "({name} : {ty})"),
            Self::Abs {
                binder,
                domain,
                body,
            } => write!(f, "(λ{binder} : {domain}. {body})"),
            Self::App {
                applicant,
                argument,
                ty,
            } => write!(f, "({applicant} {argument} : {ty})"),
            Self::Pair { first, second, ty } => write!(f, "(({first}, {second}) : {ty})"),
            Self::Proj1 { argument, ty, .. } => write!(f, "(π₁ {argument} : {ty})"),
            Self::Proj2 { argument, ty, .. } => write!(f, "(π₂ {argument} : {ty})"),
        }
    }
}

/// First inference phase: gives every node a type,
/// inventing fresh type variables wherever the type is not yet known.
#[derive(Debug, Default)]
pub struct Annotator {
    vars: IdGen<TypeVar>,
}

impl Annotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of type variables created so far.
    pub fn type_var_count(&self) -> u32 {
        self.vars.count()
    }

    fn fresh(&mut self) -> Type {
        Type::Var(self.vars.fresh())
    }

    pub fn annotate(&mut self, term: &Term, ctx: &Context) -> Result<TermAnn, TypeError> {
        let ann = match term {
            Term::Unit => TermAnn::Unit,
            Term::Var(name) => {
                let ty = ctx.lookup(*name).ok_or(TypeError::Unbound(*name))?;
                TermAnn::Var {
                    name: *name,
                    ty: ty.clone(),
                }
            }
            Term::Abs(binder, body) => {
                let domain = self.fresh();
                let body = self.annotate(body, &ctx.extend(binder.name, domain.clone()))?;
                TermAnn::Abs {
                    binder: binder.clone(),
                    domain,
                    body: Box::new(body),
                }
            }
            Term::App(applicant, argument) => TermAnn::App {
                applicant: Box::new(self.annotate(applicant, ctx)?),
                argument: Box::new(self.annotate(argument, ctx)?),
                ty: self.fresh(),
            },
            Term::Pair(first, second) => TermAnn::Pair {
                first: Box::new(self.annotate(first, ctx)?),
                second: Box::new(self.annotate(second, ctx)?),
                ty: self.fresh(),
            },
            Term::Proj1(argument) => TermAnn::Proj1 {
                argument: Box::new(self.annotate(argument, ctx)?),
                ty: self.fresh(),
                second: self.fresh(),
            },
            Term::Proj2(argument) => TermAnn::Proj2 {
                argument: Box::new(self.annotate(argument, ctx)?),
                ty: self.fresh(),
                first: self.fresh(),
            },
            Term::Hole(name) => TermAnn::Hole {
                name: *name,
                ty: self.fresh(),
            },
        };

        trace!("ANNOTATED: {ann}");
        Ok(ann)
    }
}
