use std::{borrow::Cow, collections::HashMap, fmt};

use owo_colors::OwoColorize;

use crate::types::{Type, TypeVar};

/// Finite mapping from type variables to types.
///
/// Bindings may mention other bound variables, applying a substitution
/// resolves such chains until only free variables remain. The occurs check
/// performed before every insertion keeps the chains acyclic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    table: HashMap<TypeVar, Type>,
    /// Path compression is a technique commonly used in Union-Find data structures.
    /// We apply it here so that whenever a chain of substitutions is traversed,
    /// each variable is updated to point to its ultimate value. For example, the
    /// chain:
    ///
    /// `t0 ↦ t1`, `t1 ↦ t2`, and `t2 ↦ Unit`
    ///
    /// becomes
    ///
    /// `t0 ↦ Unit`, `t1 ↦ Unit`, and `t2 ↦ Unit`
    ///
    /// Rather than updating the actual mappings,
    /// this cache maintains these compressed mappings.
    cache: HashMap<TypeVar, Type>,
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = self.table.iter().collect::<Vec<_>>();
        entries.sort_unstable_by_key(|(var, _)| **var);

        for (var, ty) in entries {
            writeln!(f, "{var} := {}", ty.green())?;
        }

        Ok(())
    }
}

impl Substitution {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn unit(var: TypeVar, ty: Type) -> Self {
        let mut table = HashMap::new();
        table.insert(var, ty);
        Self {
            table,
            cache: HashMap::new(),
        }
    }

    pub fn get(&self, tv: &TypeVar) -> Option<&Type> {
        self.cache.get(tv).or_else(|| self.table.get(tv))
    }

    pub fn insert(&mut self, tv: TypeVar, ty: Type) -> Option<Type> {
        self.table.insert(tv, ty)
    }

    pub fn cache(&mut self, tv: TypeVar, ty: &Type) {
        self.cache
            .entry(tv)
            .and_modify(|stored| {
                if stored != ty {
                    *stored = ty.clone();
                }
            })
            .or_insert_with(|| ty.clone());
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty() && self.cache.is_empty()
    }
}

/// A type is `Substitutable` if a substitution can be applied to it.
pub trait Substitutable: Sized {
    /// Apply a substitution.
    fn apply(self, s: &mut Substitution) -> Self {
        self.try_apply(s).unwrap_or(self)
    }

    /// Apply a substitution in place.
    fn apply_mut(&mut self, s: &mut Substitution) {
        if let Some(new) = self.try_apply(s) {
            *self = new;
        }
    }

    /// Apply a substitution, borrowing `self` if nothing changes.
    fn apply_cow(&self, s: &mut Substitution) -> Cow<'_, Self>
    where
        Self: Clone,
    {
        match self.try_apply(s) {
            Some(t) => Cow::Owned(t),
            None => Cow::Borrowed(self),
        }
    }

    /// Apply a non-mutating substitution.
    /// Should return `None` if there was nothing to apply
    /// which allows for optimizations.
    fn try_apply(&self, s: &mut Substitution) -> Option<Self>;
}

pub fn merge<A, B, DA, DB>(
    a: Option<A>,
    default_a: DA,
    b: Option<B>,
    default_b: DB,
) -> Option<(A, B)>
where
    DA: FnOnce() -> A,
    DB: FnOnce() -> B,
{
    match (a, b) {
        (Some(a), Some(b)) => Some((a, b)),
        (Some(a), None) => Some((a, default_b())),
        (None, Some(b)) => Some((default_a(), b)),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_resolves_chains() {
        let mut s = Substitution::unit(TypeVar::new(0), Type::var(1));
        s.insert(TypeVar::new(1), Type::arrow(Type::Unit, Type::var(2)));
        s.insert(TypeVar::new(2), Type::Unit);

        let ty = Type::product(Type::var(0), Type::var(3)).apply(&mut s);

        assert_eq!(
            ty,
            Type::product(Type::arrow(Type::Unit, Type::Unit), Type::var(3))
        );
    }

    #[test]
    fn apply_cow_borrows_when_unchanged() {
        let mut s = Substitution::unit(TypeVar::new(0), Type::Unit);
        let ty = Type::arrow(Type::var(1), Type::Unit);

        assert!(matches!(ty.apply_cow(&mut s), Cow::Borrowed(_)));
        assert!(matches!(Type::var(0).apply_cow(&mut s), Cow::Owned(Type::Unit)));
    }

    #[test]
    fn cache_compresses_paths() {
        let mut s = Substitution::unit(TypeVar::new(0), Type::var(1));
        s.insert(TypeVar::new(1), Type::Unit);

        Type::var(0).apply(&mut s);

        assert_eq!(s.get(&TypeVar::new(0)), Some(&Type::Unit));
        assert_eq!(s.len(), 2);
    }
}
