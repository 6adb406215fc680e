use serde::{Deserialize, Serialize};
use std::fmt;

use stitch_collections::ImShadowList;
use stitch_tree::id::VarName;

use crate::types::Type;

/// Variables in scope at some program point together with their types.
///
/// Descending into an abstraction prepends its binder,
/// so the innermost binding of a name is the one found by `lookup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context(ImShadowList<VarName, Type>);

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// The context of an abstraction body binding `name : ty`.
    pub fn extend(&self, name: VarName, ty: Type) -> Self {
        Self(self.0.update(name, ty))
    }

    pub fn lookup(&self, name: VarName) -> Option<&Type> {
        self.0.get(&name)
    }

    /// All bindings, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = (VarName, &Type)> {
        self.0.iter().map(|(name, ty)| (*name, ty))
    }

    /// Bindings that are not shadowed by a more recent one, most recent first.
    pub fn bindings(&self) -> impl Iterator<Item = (VarName, &Type)> {
        self.0.visible().map(|(name, ty)| (*name, ty))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(VarName, Type)> for Context {
    /// Binds the items in order, the last one ends up innermost.
    fn from_iter<I: IntoIterator<Item = (VarName, Type)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (name, ty)) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} : {ty}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x(id: u32) -> VarName {
        VarName::new(id)
    }

    #[test]
    fn extend_shadows_outer_binding() {
        let outer = Context::new().extend(x(0), Type::Unit);
        let inner = outer.extend(x(0), Type::var(0));

        assert_eq!(outer.lookup(x(0)), Some(&Type::Unit));
        assert_eq!(inner.lookup(x(0)), Some(&Type::var(0)));
        assert_eq!(inner.len(), 2);
        assert_eq!(inner.bindings().count(), 1);
    }

    #[test]
    fn display_lists_most_recent_first() {
        let ctx: Context = [(x(0), Type::Unit), (x(1), Type::var(0))].into_iter().collect();

        assert_eq!(ctx.to_string(), "x1 : a, x0 : Unit");
        assert_eq!(Context::new().to_string(), "");
    }
}
