use std::fmt;

use stitch_utils::define_id;

use super::Type;
use crate::substitute::{Substitutable, Substitution};

define_id!(
    /// Type variable, only meaningful within the inference run that created it.
    TypeVar
);

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.as_usize();
        let letter = ALPHABET[id % ALPHABET.len()] as char;

        match id / ALPHABET.len() {
            0 => write!(f, "{letter}"),
            round => write!(f, "{letter}{round}"),
        }
    }
}

impl TypeVar {
    pub fn try_apply(&self, s: &mut Substitution) -> Option<Type> {
        let ty = s.get(self).cloned();
        ty.map(|mut ty| {
            ty.apply_mut(s);
            s.cache(*self, &ty);
            ty
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_cycles_through_alphabet() {
        assert_eq!(TypeVar::new(0).to_string(), "a");
        assert_eq!(TypeVar::new(25).to_string(), "z");
        assert_eq!(TypeVar::new(26).to_string(), "a1");
        assert_eq!(TypeVar::new(55).to_string(), "d2");
    }
}
