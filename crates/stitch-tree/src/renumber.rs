use stitch_utils::id::Renumbering;

use crate::{id::HoleName, term::Term};

impl Term {
    /// Renames all holes to `?0, ?1, ..` in traversal order and returns the mapping.
    pub fn renumber_holes(&mut self) -> Renumbering<HoleName> {
        let mut renumbering = Renumbering::new();
        self.rename_holes(&mut renumbering);
        renumbering
    }

    fn rename_holes(&mut self, renumbering: &mut Renumbering<HoleName>) {
        match self {
            Self::Unit | Self::Var(_) => (),
            Self::Hole(hole) => *hole = renumbering.rename(*hole),
            Self::Abs(_, body) => body.rename_holes(renumbering),
            Self::Proj1(arg) | Self::Proj2(arg) => arg.rename_holes(renumbering),
            Self::App(l, r) | Self::Pair(l, r) => {
                l.rename_holes(renumbering);
                r.rename_holes(renumbering);
            }
        }
    }
}
