use serde::{Deserialize, Serialize};
use std::fmt;

use super::Type;
use crate::substitute::{merge, Substitutable, Substitution};

/// Pair type `first * second`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductType {
    pub first: Type,
    pub second: Type,
}

impl ProductType {
    pub fn new(first: Type, second: Type) -> Self {
        Self { first, second }
    }
}

fn fmt_component(ty: &Type, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match ty {
        Type::Arrow(_) | Type::Product(_) => write!(f, "({ty})"),
        Type::Unit | Type::Var(_) => write!(f, "{ty}"),
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_component(&self.first, f)?;
        f.write_str(" * ")?;
        fmt_component(&self.second, f)
    }
}

impl Substitutable for ProductType {
    fn try_apply(&self, s: &mut Substitution) -> Option<Self> {
        let first = self.first.try_apply(s);
        let second = self.second.try_apply(s);

        merge(first, || self.first.clone(), second, || self.second.clone())
            .map(|(first, second)| ProductType { first, second })
    }
}
