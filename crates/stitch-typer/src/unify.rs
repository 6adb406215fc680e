use crate::{
    error::TypeError,
    substitute::{Substitutable, Substitution},
    types::*,
};

/// Principal Type: Most general type that can be inferred for a given expression
/// Builds up constraints (Substitutions) so that lhs and rhs unify.
/// Most general unifier, builds up a substitution S such that S(lhs) is congruent to S(rhs).
pub trait Unifiable<Rhs = Self> {
    /// Performs unification on the type with another type.
    /// If successful, results in a solution to the unification problem,
    /// in the form of bindings added to `s`. If there is no solution to the
    /// unification problem then unification fails and an error is reported.
    ///
    /// On failure `s` may hold some of the bindings made before the clash,
    /// callers discard it together with the failed inference run.
    fn try_unify(&self, rhs: &Rhs, s: &mut Substitution) -> Result<(), TypeError>;
}

impl Unifiable for Type {
    fn try_unify(&self, rhs: &Self, s: &mut Substitution) -> Result<(), TypeError> {
        Unifier::new(s).unify(self, rhs)
    }
}

impl Unifiable<Type> for TypeVar {
    fn try_unify(&self, rhs: &Type, s: &mut Substitution) -> Result<(), TypeError> {
        Unifier::new(s).unify(&Type::Var(*self), rhs)
    }
}

struct Unifier<'a> {
    substitution: &'a mut Substitution,
}

impl<'a> Unifier<'a> {
    fn new(substitution: &'a mut Substitution) -> Self {
        Self { substitution }
    }

    // domain before codomain, each side sees the bindings made by the previous one
    #[inline]
    fn unify_arrow(&mut self, lhs: &ArrowType, rhs: &ArrowType) -> Result<(), TypeError> {
        self.unify(&lhs.domain, &rhs.domain)?;
        self.unify(&lhs.codomain, &rhs.codomain)
    }

    #[inline]
    fn unify_product(&mut self, lhs: &ProductType, rhs: &ProductType) -> Result<(), TypeError> {
        self.unify(&lhs.first, &rhs.first)?;
        self.unify(&lhs.second, &rhs.second)
    }

    #[inline]
    fn unify_var(&mut self, lhs: &TypeVar, rhs: &TypeVar) {
        if lhs != rhs {
            self.substitution.insert(*lhs, Type::Var(*rhs));
        }
    }

    fn unify(&mut self, lhs: &Type, rhs: &Type) -> Result<(), TypeError> {
        // Apply current substitution to resolve any already-bound variables
        let lhs = lhs.apply_cow(self.substitution);
        let rhs = rhs.apply_cow(self.substitution);

        match (lhs.as_ref(), rhs.as_ref()) {
            (Type::Unit, Type::Unit) => Ok(()),
            (Type::Var(l), Type::Var(r)) => {
                self.unify_var(l, r);
                Ok(())
            }
            (Type::Var(var), with) => self.bind_var(var, with),
            (with, Type::Var(var)) => self.bind_var(var, with),
            (Type::Arrow(l), Type::Arrow(r)) => self.unify_arrow(l, r),
            (Type::Product(l), Type::Product(r)) => self.unify_product(l, r),
            // Unit ~ Arrow, Unit ~ Product, Arrow ~ Product in either order
            (l, r) => Err(TypeError::Mismatch {
                expected: l.clone(),
                actual: r.clone(),
            }),
        }
    }

    /// Binds a free variable to a type that is not a variable.
    fn bind_var(&mut self, var: &TypeVar, with: &Type) -> Result<(), TypeError> {
        if with.contains(var) {
            Err(TypeError::Circularity {
                var: *var,
                ty: with.clone(),
            })
        } else {
            self.substitution.insert(*var, with.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(id: u32) -> TypeVar {
        TypeVar::new(id)
    }

    /// Unifies and checks that the resulting substitution equates both sides.
    fn unify_round_trip(lhs: &Type, rhs: &Type) -> Substitution {
        let mut subs = Substitution::empty();
        lhs.try_unify(rhs, &mut subs)
            .unwrap_or_else(|e| panic!("{lhs} ~ {rhs} should unify: {e}"));

        let l = lhs.clone().apply(&mut subs);
        let r = rhs.clone().apply(&mut subs);
        assert_eq!(l, r, "substitution does not equate {lhs} and {rhs}");

        subs
    }

    #[test]
    fn unit_with_unit() {
        let subs = unify_round_trip(&Type::Unit, &Type::Unit);
        assert!(subs.is_empty());
    }

    #[test]
    fn var_with_unit_either_side() {
        let subs = unify_round_trip(&Type::var(0), &Type::Unit);
        assert_eq!(subs.get(&var(0)), Some(&Type::Unit));

        let subs = unify_round_trip(&Type::Unit, &Type::var(0));
        assert_eq!(subs.get(&var(0)), Some(&Type::Unit));
    }

    #[test]
    fn var_with_itself_binds_nothing() {
        let subs = unify_round_trip(&Type::var(3), &Type::var(3));
        assert!(subs.is_empty());
    }

    #[test]
    fn var_with_var_binds_left() {
        let subs = unify_round_trip(&Type::var(0), &Type::var(1));
        assert_eq!(subs.get(&var(0)), Some(&Type::var(1)));
        assert_eq!(subs.get(&var(1)), None);
    }

    #[test]
    fn arrow_with_arrow_binds_both_sides() {
        // (Unit -> a) ~ (b -> Unit)
        let lhs = Type::arrow(Type::Unit, Type::var(0));
        let rhs = Type::arrow(Type::var(1), Type::Unit);

        let mut subs = unify_round_trip(&lhs, &rhs);

        assert_eq!(Type::var(0).apply(&mut subs), Type::Unit);
        assert_eq!(Type::var(1).apply(&mut subs), Type::Unit);
    }

    #[test]
    fn arrow_codomain_sees_domain_bindings() {
        // (a -> a) ~ (Unit -> b)
        let lhs = Type::arrow(Type::var(0), Type::var(0));
        let rhs = Type::arrow(Type::Unit, Type::var(1));

        let mut subs = unify_round_trip(&lhs, &rhs);
        assert_eq!(Type::var(1).apply(&mut subs), Type::Unit);
    }

    #[test]
    fn product_with_product() {
        let lhs = Type::product(Type::var(0), Type::arrow(Type::var(1), Type::Unit));
        let rhs = Type::product(Type::arrow(Type::Unit, Type::Unit), Type::var(2));

        let mut subs = unify_round_trip(&lhs, &rhs);
        assert_eq!(
            Type::var(0).apply(&mut subs),
            Type::arrow(Type::Unit, Type::Unit)
        );
        assert_eq!(
            Type::var(2).apply(&mut subs),
            Type::arrow(Type::var(1), Type::Unit)
        );
    }

    #[test]
    fn occurs_check() {
        // a ~ Unit -> a
        let mut subs = Substitution::empty();
        let result = Type::var(0).try_unify(&Type::arrow(Type::Unit, Type::var(0)), &mut subs);

        assert_eq!(
            result,
            Err(TypeError::Circularity {
                var: var(0),
                ty: Type::arrow(Type::Unit, Type::var(0)),
            })
        );
    }

    #[test]
    fn occurs_check_through_substitution() {
        // a := b, then b ~ b * Unit is circular
        let mut subs = Substitution::unit(var(0), Type::var(1));
        let result = Type::var(0).try_unify(&Type::product(Type::var(1), Type::Unit), &mut subs);

        assert!(matches!(result, Err(TypeError::Circularity { var: v, .. }) if v == var(1)));
    }

    #[test]
    fn incompatible_shapes() {
        let arrow = Type::arrow(Type::Unit, Type::Unit);
        let product = Type::product(Type::Unit, Type::Unit);

        for (lhs, rhs) in [
            (&Type::Unit, &arrow),
            (&Type::Unit, &product),
            (&arrow, &product),
            (&product, &arrow),
            (&arrow, &Type::Unit),
        ] {
            let mut subs = Substitution::empty();
            let result = lhs.try_unify(rhs, &mut subs);

            assert_eq!(
                result,
                Err(TypeError::Mismatch {
                    expected: lhs.clone(),
                    actual: rhs.clone(),
                })
            );
        }
    }

    #[test]
    fn nested_mismatch_reports_innermost_types() {
        let lhs = Type::arrow(Type::Unit, Type::Unit);
        let rhs = Type::arrow(Type::product(Type::Unit, Type::Unit), Type::Unit);

        let mut subs = Substitution::empty();
        assert_eq!(
            lhs.try_unify(&rhs, &mut subs),
            Err(TypeError::Mismatch {
                expected: Type::Unit,
                actual: Type::product(Type::Unit, Type::Unit),
            })
        );
    }

    #[test]
    fn var_unifies_with_type() {
        let mut subs = Substitution::empty();
        let target = Type::product(Type::Unit, Type::var(1));

        var(0).try_unify(&target, &mut subs).unwrap();
        assert_eq!(subs.get(&var(0)), Some(&target));
    }
}
