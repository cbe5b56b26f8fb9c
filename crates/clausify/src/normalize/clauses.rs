//! Clause extraction from CNF formulas

use crate::error::{ClausifyError, Result};
use crate::misc::log::targets::CLAUSES as LOG_CLAUSES;
use crate::logic::{Clause, Formula, Literal};

/// Flatten a list of CNF formulas into clauses.
///
/// Top-level conjunctions split into clauses and each clause's disjunctions
/// into literals, in formula order and then left to right. A leaf that is
/// neither an atom nor a negated atom yields `NotClausal`.
pub fn extract_clauses(formulas: &[Formula]) -> Result<Vec<Clause>> {
    let mut clauses = Vec::new();
    for formula in formulas {
        for disjunct in conjuncts(formula) {
            clauses.push(Clause::new(collect_literals(disjunct)?));
        }
    }
    log::debug!(
        target: LOG_CLAUSES,
        "{} formulas flattened into {} clauses",
        formulas.len(),
        clauses.len()
    );
    Ok(clauses)
}

/// Top-level conjuncts, left to right
fn conjuncts(formula: &Formula) -> Vec<&Formula> {
    let mut stack = vec![formula];
    let mut out = Vec::new();

    while let Some(f) = stack.pop() {
        match f {
            Formula::And(f1, f2) => {
                stack.push(f2);
                stack.push(f1);
            }
            _ => out.push(f),
        }
    }

    out
}

fn collect_literals(formula: &Formula) -> Result<Vec<Literal>> {
    // Iterative literal collection
    let mut stack = vec![formula];
    let mut literals = Vec::new();

    while let Some(f) = stack.pop() {
        match f {
            Formula::Or(f1, f2) => {
                stack.push(f2);
                stack.push(f1);
            }

            Formula::Atom(atom) => literals.push(Literal::positive(atom.clone())),

            Formula::Not(inner) => match inner.as_ref() {
                Formula::Atom(atom) => literals.push(Literal::negative(atom.clone())),
                _ => return Err(not_clausal(f)),
            },

            _ => return Err(not_clausal(f)),
        }
    }

    Ok(literals)
}

fn not_clausal(formula: &Formula) -> ClausifyError {
    ClausifyError::NotClausal(format!("{:?}", formula))
}
