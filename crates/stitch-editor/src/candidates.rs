use log::debug;

use stitch_tree::prelude::*;
use stitch_typer::prelude::*;

use crate::{action::Action, options::CandidateCheck};

/// Enumerates the actions that keep the term well typed when put into `hole`.
///
/// `ty` and `context` are the hole's type and context in the committed term.
/// Structural constructors come first in menu order,
/// followed by the visible context bindings, most recent first.
pub fn candidates(
    term: &Term,
    hole: HoleName,
    ty: &Type,
    context: &Context,
    check: CandidateCheck,
) -> Vec<Action> {
    let variables = context.bindings().map(|(name, _)| Action::Variable(name));

    Action::CONSTRUCTORS
        .into_iter()
        .chain(variables)
        .filter(|action| match (check, action) {
            (CandidateCheck::Unification, Action::Variable(name)) => {
                let binding = context
                    .lookup(*name)
                    .expect("candidate variable is bound in the hole's context");
                unifies(*action, binding, ty)
            }
            _ => admissible(term, hole, *action),
        })
        .collect()
}

/// Fills `hole` in a disposable copy of `term` and infers the copy.
pub fn admissible(term: &Term, hole: HoleName, action: Action) -> bool {
    let speculative = action.fill(term, hole);

    match infer(&speculative) {
        Ok(_) => true,
        Err(e) => {
            debug!("Rejected {action} for {hole}: {e}");
            false
        }
    }
}

fn unifies(action: Action, binding: &Type, goal: &Type) -> bool {
    let mut s = Substitution::empty();

    match binding.try_unify(goal, &mut s) {
        Ok(()) => true,
        Err(e) => {
            debug!("Rejected {action}: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(id: u32) -> Term {
        Term::hole(HoleName::new(id))
    }

    fn x(id: u32) -> VarName {
        VarName::new(id)
    }

    fn candidates_of(term: &Term, hole: HoleName, check: CandidateCheck) -> Vec<Action> {
        let inference = infer(term).unwrap();
        candidates(
            term,
            hole,
            inference.hole_type(hole).unwrap(),
            inference.hole_context(hole).unwrap(),
            check,
        )
    }

    #[test]
    fn lone_hole_accepts_every_constructor() {
        let actions = candidates_of(&h(0), HoleName::new(0), CandidateCheck::Speculative);
        assert_eq!(actions, Action::CONSTRUCTORS.to_vec());
    }

    #[test]
    fn product_goal_rejects_unit_and_abstraction() {
        let actions = candidates_of(
            &Term::proj1(h(0)),
            HoleName::new(0),
            CandidateCheck::Speculative,
        );

        assert_eq!(
            actions,
            vec![
                Action::Application,
                Action::Pair,
                Action::Proj1,
                Action::Proj2
            ]
        );
    }

    #[test]
    fn circular_variable_is_rejected() {
        // λx. x ?0 : putting x into ?0 would need a ~ a -> b
        let term = Term::abs(x(0), Term::app(Term::var(x(0)), h(0)));

        for check in [CandidateCheck::Speculative, CandidateCheck::Unification] {
            let actions = candidates_of(&term, HoleName::new(0), check);

            assert_eq!(actions, Action::CONSTRUCTORS.to_vec());
        }
    }

    #[test]
    fn variables_follow_constructors_most_recent_first() {
        // λx. λy. ?0
        let term = Term::abs(x(0), Term::abs(x(1), h(0)));
        let actions = candidates_of(&term, HoleName::new(0), CandidateCheck::Speculative);

        assert_eq!(
            actions[Action::CONSTRUCTORS.len()..],
            [Action::Variable(x(1)), Action::Variable(x(0))]
        );
    }

    #[test]
    fn unit_goal_rejects_mismatched_variable() {
        // λf. (λu. (f u, f ?0)) unit, where f : Unit -> a, u : Unit and ?0 : Unit
        let term = Term::abs(
            x(0),
            Term::app(
                Term::abs(
                    x(1),
                    Term::pair(
                        Term::app(Term::var(x(0)), Term::var(x(1))),
                        Term::app(Term::var(x(0)), h(0)),
                    ),
                ),
                Term::Unit,
            ),
        );
        let hole = HoleName::new(0);

        let inference = infer(&term).unwrap();
        assert_eq!(inference.hole_type(hole), Some(&Type::Unit));

        let expected = vec![
            Action::Unit,
            Action::Application,
            Action::Proj1,
            Action::Proj2,
            Action::Variable(x(1)),
        ];

        assert_eq!(candidates_of(&term, hole, CandidateCheck::Speculative), expected);
        assert_eq!(candidates_of(&term, hole, CandidateCheck::Unification), expected);
    }
}
