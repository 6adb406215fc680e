use stitch_tree::prelude::*;
use stitch_typer::error::TypeError;
use thiserror::Error;

use crate::action::Action;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Unknown hole: {0}")]
    UnknownHole(HoleName),
    #[error("Duplicate hole: {0} occurs more than once")]
    DuplicateHole(HoleName),
    #[error("No hole is selected")]
    Unfocused,
    #[error("Not offered: `{0}` cannot be put into the selected hole")]
    NotOffered(Action),
    #[error("Unknown variable: {0}")]
    UnknownVariable(VarName),
    #[error(transparent)]
    Type(#[from] TypeError),
}
