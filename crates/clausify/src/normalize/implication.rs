//! Implication and biconditional elimination

use crate::logic::Formula;

/// Rewrite `->` and `<->` into negation, disjunction and conjunction.
///
/// - `p <-> q` becomes `(-p | q) & (p | -q)`
/// - `p -> q` becomes `-p | q`
///
/// A single bottom-up pass suffices: the operands are eliminated before
/// they are recombined, so no rewrite can reintroduce an implication.
pub fn eliminate_implications(formula: Formula) -> Formula {
    match formula {
        Formula::Iff(p, q) => {
            let p = eliminate_implications(*p);
            let q = eliminate_implications(*q);
            Formula::and(
                Formula::or(Formula::not(p.clone()), q.clone()),
                Formula::or(p, Formula::not(q)),
            )
        }
        Formula::Implies(p, q) => Formula::or(
            Formula::not(eliminate_implications(*p)),
            eliminate_implications(*q),
        ),
        Formula::And(p, q) => Formula::and(eliminate_implications(*p), eliminate_implications(*q)),
        Formula::Or(p, q) => Formula::or(eliminate_implications(*p), eliminate_implications(*q)),
        Formula::Not(p) => Formula::not(eliminate_implications(*p)),
        Formula::Quantified(q, var, body) => {
            Formula::Quantified(q, var, Box::new(eliminate_implications(*body)))
        }
        Formula::Atom(_) => formula,
    }
}
