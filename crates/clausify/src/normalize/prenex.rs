//! Prenex conversion

use crate::config::PrenexOrder;
use crate::logic::{Formula, Quantifier, Variable};

/// Move every quantifier into a leading prefix.
///
/// Input must be in negation normal form with bound variables standardized
/// apart, so pulling a quantifier out of a conjunction or disjunction cannot
/// capture anything. Quantifiers are recorded in pre-order, left to right,
/// and the prefix is rebuilt around the quantifier-free matrix in the
/// requested order.
pub fn to_prenex(formula: Formula, order: PrenexOrder) -> Formula {
    let mut prefix = Vec::new();
    let matrix = strip_quantifiers(formula, &mut prefix);

    if order == PrenexOrder::ExistentialsFirst {
        // Stable: relative order inside each group is kept
        prefix.sort_by_key(|(q, _)| *q == Quantifier::Forall);
    }

    prefix
        .into_iter()
        .rev()
        .fold(matrix, |body, (q, var)| Formula::Quantified(q, var, Box::new(body)))
}

fn strip_quantifiers(formula: Formula, prefix: &mut Vec<(Quantifier, Variable)>) -> Formula {
    match formula {
        Formula::Quantified(q, var, body) => {
            prefix.push((q, var));
            strip_quantifiers(*body, prefix)
        }
        Formula::And(f1, f2) => {
            let f1 = strip_quantifiers(*f1, prefix);
            Formula::and(f1, strip_quantifiers(*f2, prefix))
        }
        Formula::Or(f1, f2) => {
            let f1 = strip_quantifiers(*f1, prefix);
            Formula::or(f1, strip_quantifiers(*f2, prefix))
        }
        Formula::Implies(f1, f2) => {
            let f1 = strip_quantifiers(*f1, prefix);
            Formula::implies(f1, strip_quantifiers(*f2, prefix))
        }
        Formula::Iff(f1, f2) => {
            let f1 = strip_quantifiers(*f1, prefix);
            Formula::iff(f1, strip_quantifiers(*f2, prefix))
        }
        Formula::Not(f) => Formula::not(strip_quantifiers(*f, prefix)),
        Formula::Atom(_) => formula,
    }
}
