use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use log::{debug, trace};
use stitch_tree::prelude::*;

use crate::{
    annotate::{Annotator, TermAnn},
    constraints::Constraints,
    context::Context,
    error::TypeError,
    substitute::{Substitutable, Substitution},
    types::Type,
};

/// Result of a successful inference run.
///
/// All type variables are canonically numbered, so two runs on
/// structurally equal terms produce equal inferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inference {
    pub term: TermAnn,
    pub ty: Type,
    pub hole_types: IndexMap<HoleName, Type>,
    pub hole_contexts: IndexMap<HoleName, Context>,
}

impl Inference {
    pub fn hole_type(&self, hole: HoleName) -> Option<&Type> {
        self.hole_types.get(&hole)
    }

    pub fn hole_context(&self, hole: HoleName) -> Option<&Context> {
        self.hole_contexts.get(&hole)
    }

    /// Holes in traversal order.
    pub fn holes(&self) -> impl Iterator<Item = HoleName> + '_ {
        self.hole_types.keys().copied()
    }
}

/// Infers the type of `term` together with the type and context of every hole.
pub fn infer(term: &Term) -> Result<Inference, TypeError> {
    // 1. annotate
    let mut annotator = Annotator::new();
    let mut ann = annotator.annotate(term, &Context::new())?;
    debug!(
        "Annotated {term} with {} type variables",
        annotator.type_var_count()
    );

    // 2. generate constraints
    let constraints = Constraints::collect(&ann);
    debug!("Collected {} constraints", constraints.len());
    for constraint in constraints.iter() {
        trace!("CONSTRAINT: {constraint}");
    }

    // 3. unify
    let mut s = Substitution::empty();
    constraints.solve(&mut s)?;
    debug!("Solved with {} bindings", s.len());
    trace!("Substitution:\n{s}");

    // 4. finalize
    ann.for_each_type_mut(&mut |ty| ty.apply_mut(&mut s));
    ann.normalize();
    debug!("{} free type variables remain", ann.type_vars().len());

    // 5. per hole types and contexts
    let mut collector = HoleCollector::default();
    collector.visit(&ann, &Context::new());

    let ty = ann.ty().into_owned();
    debug!("Inferred {term} : {ty}");

    Ok(Inference {
        term: ann,
        ty,
        hole_types: collector.types,
        hole_contexts: collector.contexts,
    })
}

#[derive(Default)]
struct HoleCollector {
    types: IndexMap<HoleName, Type>,
    contexts: IndexMap<HoleName, Context>,
}

impl HoleCollector {
    fn visit(&mut self, term: &TermAnn, ctx: &Context) {
        match term {
            TermAnn::Unit | TermAnn::Var { .. } => (),
            TermAnn::Hole { name, ty } => {
                self.types.insert(*name, ty.clone());
                self.contexts.insert(*name, ctx.clone());
            }
            TermAnn::Abs {
                binder,
                domain,
                body,
            } => self.visit(body, &ctx.extend(binder.name, domain.clone())),
            TermAnn::App {
                applicant: left,
                argument: right,
                ..
            }
            | TermAnn::Pair {
                first: left,
                second: right,
                ..
            } => {
                self.visit(left, ctx);
                self.visit(right, ctx);
            }
            TermAnn::Proj1 { argument, .. } | TermAnn::Proj2 { argument, .. } => {
                self.visit(argument, ctx)
            }
        }
    }
}
