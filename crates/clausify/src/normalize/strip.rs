//! Universal quantifier stripping

use crate::logic::{Formula, Quantifier};

/// Drop every universal quantifier, keeping its body.
///
/// The variables it bound become free and are read as implicitly universal
/// from here on.
pub fn strip_universals(formula: Formula) -> Formula {
    match formula {
        Formula::Quantified(Quantifier::Forall, _, body) => strip_universals(*body),
        Formula::Quantified(q, var, body) => {
            Formula::Quantified(q, var, Box::new(strip_universals(*body)))
        }
        Formula::And(f1, f2) => Formula::and(strip_universals(*f1), strip_universals(*f2)),
        Formula::Or(f1, f2) => Formula::or(strip_universals(*f1), strip_universals(*f2)),
        Formula::Implies(f1, f2) => Formula::implies(strip_universals(*f1), strip_universals(*f2)),
        Formula::Iff(f1, f2) => Formula::iff(strip_universals(*f1), strip_universals(*f2)),
        Formula::Not(f) => Formula::not(strip_universals(*f)),
        Formula::Atom(_) => formula,
    }
}
