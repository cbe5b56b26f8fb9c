//! Skolemization of prenex formulas

use crate::misc::log::targets::SKOLEM as LOG_SKOLEM;
use crate::logic::{Constant, Formula, FunctionSymbol, Interner, Quantifier, Term, Variable};
use indexmap::IndexSet;

/// Replace every existential in the prefix of a prenex formula by a skolem
/// term over the universals bound before it.
pub fn skolemize(formula: Formula, interner: &mut Interner) -> Formula {
    let mut universals = IndexSet::new();
    skolemize_in_scope(formula, &mut universals, interner)
}

/// Skolemize with an explicit set of universals in scope.
///
/// `universals` keeps binding order, which fixes the argument order of the
/// skolem functions. Universals of the prefix are added to it as they are
/// passed. The walk stops at the first node that is not a quantifier.
pub fn skolemize_in_scope(
    formula: Formula,
    universals: &mut IndexSet<Variable>,
    interner: &mut Interner,
) -> Formula {
    match formula {
        Formula::Quantified(Quantifier::Exists, var, body) => {
            let witness = skolem_term(universals, interner);
            log::debug!(
                target: LOG_SKOLEM,
                "some {} replaced by {}",
                var.name(interner),
                witness.display(interner)
            );
            skolemize_in_scope(body.substitute(&var, &witness), universals, interner)
        }
        Formula::Quantified(Quantifier::Forall, var, body) => {
            universals.insert(var);
            let body = skolemize_in_scope(*body, universals, interner);
            Formula::forall(var, body)
        }
        matrix => matrix,
    }
}

/// A fresh constant for an empty scope, otherwise a fresh function applied
/// to the universals in scope
fn skolem_term(universals: &IndexSet<Variable>, interner: &mut Interner) -> Term {
    let symbol = interner.fresh_skolem();
    if universals.is_empty() {
        Term::Constant(Constant::new(symbol.constant))
    } else {
        let args: Vec<Term> = universals.iter().map(|v| Term::Variable(*v)).collect();
        Term::Function(FunctionSymbol::new(symbol.function, args.len()), args)
    }
}
