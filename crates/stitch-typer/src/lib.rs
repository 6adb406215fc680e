//! Hindley-Milner style inference for terms with holes.
//!
//! Inference runs in five phases: annotate, generate constraints, unify,
//! finalize and collect per hole types and contexts. See [`infer::infer`].

pub mod annotate;
pub mod constraints;
pub mod context;
pub mod error;
pub mod infer;
pub mod normalize;
pub mod substitute;
pub mod types;
pub mod unify;


pub mod prelude {
    pub use crate::annotate::{Annotator, TermAnn};
    pub use crate::constraints::{Constraint, Constraints};
    pub use crate::context::Context;
    pub use crate::error::TypeError;
    pub use crate::infer::{infer, Inference};
    pub use crate::substitute::{Substitutable, Substitution};
    pub use crate::types::*;
    pub use crate::unify::Unifiable;
}
