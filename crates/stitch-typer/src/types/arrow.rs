use serde::{Deserialize, Serialize};
use std::fmt;

use super::Type;
use crate::substitute::{merge, Substitutable, Substitution};

/// Function type `domain -> codomain`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrowType {
    pub domain: Type,
    pub codomain: Type,
}

impl ArrowType {
    pub fn new(domain: Type, codomain: Type) -> Self {
        Self { domain, codomain }
    }
}

impl fmt::Display for ArrowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // arrows associate to the right
        if self.domain.is_arrow() {
            write!(f, "({}) -> {}", self.domain, self.codomain)
        } else {
            write!(f, "{} -> {}", self.domain, self.codomain)
        }
    }
}

impl Substitutable for ArrowType {
    fn try_apply(&self, s: &mut Substitution) -> Option<Self> {
        let domain = self.domain.try_apply(s);
        let codomain = self.codomain.try_apply(s);

        merge(domain, || self.domain.clone(), codomain, || self.codomain.clone())
            .map(|(domain, codomain)| ArrowType { domain, codomain })
    }
}
