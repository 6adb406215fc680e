use std::{convert::Infallible, ops::ControlFlow};

use stitch_utils::id::Renumbering;

use crate::{
    annotate::TermAnn,
    types::{Type, TypeVar, TypeVisitable, TypeVisitorMut},
};

struct TypeVarRenamer<'r>(&'r mut Renumbering<TypeVar>);

impl TypeVisitorMut for TypeVarRenamer<'_> {
    type BreakValue = Infallible;

    fn visit_var_mut(&mut self, var: &mut TypeVar) -> ControlFlow<Self::BreakValue> {
        *var = self.0.rename(*var);
        ControlFlow::Continue(())
    }
}

impl Type {
    /// Renames the variables of this type through `renumbering`.
    pub fn renumber(&mut self, renumbering: &mut Renumbering<TypeVar>) {
        let _ = self.visit_type_mut_by(&mut TypeVarRenamer(renumbering));
    }

    /// Renames type variables to `a, b, c, ..` by first occurrence.
    pub fn canonical(mut self) -> Self {
        self.renumber(&mut Renumbering::new());
        self
    }
}

impl TermAnn {
    /// Renames all type variables to `0, 1, 2, ..` in order of first occurrence,
    /// walking the term in pre-order and each node's own types before its children.
    pub fn normalize(&mut self) -> Renumbering<TypeVar> {
        let mut renumbering = Renumbering::new();
        self.for_each_type_mut(&mut |ty| ty.renumber(&mut renumbering));
        renumbering
    }
}
