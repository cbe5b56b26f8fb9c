//! Negation normal form

use super::implication::eliminate_implications;
use crate::logic::Formula;

/// Push every negation down to the atoms.
///
/// Applies double-negation collapse, De Morgan's laws and quantifier
/// duality:
/// - `--p` = `p`
/// - `-(p & q)` = `-p | -q`, `-(p | q)` = `-p & -q`
/// - `-all x.p` = `some x.-p`, `-some x.p` = `all x.-p`
///
/// Implications are expected to be gone already; any that remain are
/// eliminated on the spot so the result is always in negation normal form.
pub fn push_negation(formula: Formula) -> Formula {
    nnf(formula, false)
}

/// `negate` records an odd number of enclosing negations still to be applied
fn nnf(formula: Formula, negate: bool) -> Formula {
    match (formula, negate) {
        (Formula::Atom(a), false) => Formula::Atom(a),
        (Formula::Atom(a), true) => Formula::not(Formula::Atom(a)),

        (Formula::Not(f), neg) => nnf(*f, !neg),

        (Formula::And(f1, f2), false) => Formula::and(nnf(*f1, false), nnf(*f2, false)),
        (Formula::And(f1, f2), true) => Formula::or(nnf(*f1, true), nnf(*f2, true)),

        (Formula::Or(f1, f2), false) => Formula::or(nnf(*f1, false), nnf(*f2, false)),
        (Formula::Or(f1, f2), true) => Formula::and(nnf(*f1, true), nnf(*f2, true)),

        (Formula::Quantified(q, var, body), neg) => {
            let q = if neg { q.dual() } else { q };
            Formula::Quantified(q, var, Box::new(nnf(*body, neg)))
        }

        (f @ (Formula::Implies(..) | Formula::Iff(..)), neg) => nnf(eliminate_implications(f), neg),
    }
}
