use std::fmt;

use stitch_utils::define_id;

define_id!(
    /// Name of a hole, unique within one term.
    HoleName
);

define_id!(
    /// Identity of a bound variable. Display labels live on the binder.
    VarName
);

impl fmt::Display for HoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.id())
    }
}

impl fmt::Display for VarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.id())
    }
}
