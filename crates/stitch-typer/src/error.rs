use stitch_tree::id::VarName;
use thiserror::Error;

use crate::types::{Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Two types of incompatible shape had to be equal.
    #[error("Cannot Unify: Expected `{expected}` but got `{actual}`")]
    Mismatch { expected: Type, actual: Type },
    /// Occurs check failure, binding `var` would create an infinite type.
    #[error("Circularity: `{var}` occurs in `{ty}`")]
    Circularity { var: TypeVar, ty: Type },
    /// A variable occurrence outside the scope of its binder.
    #[error("Unbound: {0}")]
    Unbound(VarName),
}
