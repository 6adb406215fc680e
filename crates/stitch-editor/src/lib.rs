//! Type-directed structural editing of terms with holes.
//!
//! A [`State`](state::State) is either unfocused or focused on a hole.
//! Selecting a hole computes every action that keeps the program well typed,
//! putting one of them fills the hole and clears the focus.

pub mod action;
pub mod candidates;
pub mod error;
pub mod options;
pub mod print;
pub mod state;

pub mod prelude {
    pub use crate::action::{Action, Transition};
    pub use crate::candidates::{admissible, candidates};
    pub use crate::error::EditError;
    pub use crate::options::{CandidateCheck, EditorOptions};
    pub use crate::print::StateReport;
    pub use crate::state::{Focus, FocusSnapshot, State, StateSnapshot};
}
