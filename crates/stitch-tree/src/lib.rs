pub mod id;
pub mod print;
pub mod renumber;
pub mod term;

pub mod prelude {
    pub use crate::id::{HoleName, VarName};
    pub use crate::print::TermPrinter;
    pub use crate::term::{Binder, Label, Preorder, Term};
}
