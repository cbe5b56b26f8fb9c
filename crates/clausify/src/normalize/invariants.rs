//! Normal-form predicates
//!
//! One predicate per invariant a stage establishes. The pipeline checks them
//! when `check_invariants` is set; tests use them directly.

use super::Stage;
use crate::config::PrenexOrder;
use crate::logic::{Formula, Quantifier, Variable};
use std::collections::HashSet;

/// No `Implies` or `Iff` node anywhere
pub fn is_implication_free(formula: &Formula) -> bool {
    match formula {
        Formula::Atom(_) => true,
        Formula::Not(f) | Formula::Quantified(_, _, f) => is_implication_free(f),
        Formula::And(f1, f2) | Formula::Or(f1, f2) => {
            is_implication_free(f1) && is_implication_free(f2)
        }
        Formula::Implies(..) | Formula::Iff(..) => false,
    }
}

/// Negation normal form: implication-free, and every `Not` wraps an atom
pub fn is_nnf(formula: &Formula) -> bool {
    match formula {
        Formula::Atom(_) => true,
        Formula::Not(f) => matches!(**f, Formula::Atom(_)),
        Formula::Quantified(_, _, f) => is_nnf(f),
        Formula::And(f1, f2) | Formula::Or(f1, f2) => is_nnf(f1) && is_nnf(f2),
        Formula::Implies(..) | Formula::Iff(..) => false,
    }
}

/// No two quantifiers bind the same variable, and no bound variable also
/// occurs free
pub fn has_unique_bound_variables(formula: &Formula) -> bool {
    let mut seen = formula.free_variables();
    formula
        .bound_variables()
        .into_iter()
        .all(|(_, var)| seen.insert(var))
}

/// The quantifiers form a contiguous prefix over a quantifier-free matrix
pub fn is_prenex(formula: &Formula) -> bool {
    !matrix(formula).contains_quantifier()
}

/// Prenex, with every existential in the prefix before every universal
pub fn has_existentials_before_universals(formula: &Formula) -> bool {
    if !is_prenex(formula) {
        return false;
    }
    let mut universal_seen = false;
    for (q, _) in formula.bound_variables() {
        match q {
            Quantifier::Forall => universal_seen = true,
            Quantifier::Exists if universal_seen => return false,
            Quantifier::Exists => {}
        }
    }
    true
}

/// No existential quantifier anywhere
pub fn is_skolemized(formula: &Formula) -> bool {
    formula
        .bound_variables()
        .iter()
        .all(|(q, _)| *q == Quantifier::Forall)
}

/// Universally bound variables are pairwise distinct across the whole list
pub fn universals_unique_across(formulas: &[Formula]) -> bool {
    let mut seen: HashSet<Variable> = HashSet::new();
    formulas
        .iter()
        .flat_map(|f| f.bound_variables())
        .filter(|(q, _)| *q == Quantifier::Forall)
        .all(|(_, var)| seen.insert(var))
}

pub fn is_quantifier_free(formula: &Formula) -> bool {
    !formula.contains_quantifier()
}

/// Conjunctive normal form: quantifier-free NNF where no `Or` has an `And`
/// child
pub fn is_cnf(formula: &Formula) -> bool {
    match formula {
        Formula::Atom(_) => true,
        Formula::Not(f) => matches!(**f, Formula::Atom(_)),
        Formula::And(f1, f2) => is_cnf(f1) && is_cnf(f2),
        Formula::Or(f1, f2) => is_disjunction(f1) && is_disjunction(f2),
        Formula::Implies(..) | Formula::Iff(..) | Formula::Quantified(..) => false,
    }
}

/// Does the invariant established by `stage` hold for its output?
///
/// `order` is the prefix order prenex conversion was asked for. Clause
/// extraction has no formula-level invariant; its output is a clause list
/// by construction.
pub fn holds_after(stage: Stage, order: PrenexOrder, formulas: &[Formula]) -> bool {
    match stage {
        Stage::ImplicationElimination => formulas.iter().all(is_implication_free),
        Stage::NegationNormalForm => formulas.iter().all(is_nnf),
        Stage::Standardization => formulas.iter().all(has_unique_bound_variables),
        Stage::Prenex => match order {
            PrenexOrder::ExistentialsFirst => {
                formulas.iter().all(has_existentials_before_universals)
            }
            PrenexOrder::Preserve => formulas.iter().all(is_prenex),
        },
        Stage::Skolemization => formulas.iter().all(is_skolemized),
        Stage::Renaming => universals_unique_across(formulas),
        Stage::UniversalStripping => formulas.iter().all(is_quantifier_free),
        Stage::Distribution => formulas.iter().all(is_cnf),
        Stage::ClauseExtraction => true,
    }
}

/// The formula below its leading quantifiers
fn matrix(formula: &Formula) -> &Formula {
    let mut current = formula;
    while let Formula::Quantified(_, _, body) = current {
        current = body;
    }
    current
}

fn is_disjunction(formula: &Formula) -> bool {
    match formula {
        Formula::Atom(_) => true,
        Formula::Not(f) => matches!(**f, Formula::Atom(_)),
        Formula::Or(f1, f2) => is_disjunction(f1) && is_disjunction(f2),
        _ => false,
    }
}
