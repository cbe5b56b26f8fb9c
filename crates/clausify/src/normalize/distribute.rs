//! Distribution of disjunction over conjunction

use super::Stage;
use crate::config::NormalizeConfig;
use crate::error::{ClausifyError, Result};
use crate::misc::log::targets::{DISTRIBUTE as LOG_DISTRIBUTE, PIPELINE as LOG_PIPELINE};
use crate::logic::Formula;
use std::time::Instant;

/// Convert a quantifier-free NNF formula to conjunctive normal form.
///
/// Children are converted first and then combined:
/// - `(p & q) | r` = `(p | r) & (q | r)`
/// - `r | (p & q)` = `(r | p) & (r | q)`
///
/// Because both operands are already in CNF when a disjunction is
/// distributed, a child that turned into a conjunction during conversion is
/// distributed as well. Any other node is a leaf here.
pub fn to_cnf(formula: Formula) -> Formula {
    match formula {
        Formula::And(p, q) => Formula::and(to_cnf(*p), to_cnf(*q)),
        Formula::Or(p, q) => distribute(to_cnf(*p), to_cnf(*q)),
        other => other,
    }
}

/// Resource limits for a normalization run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Budget {
    pub deadline: Option<Instant>,
    /// 0 means no limit
    pub max_clauses: usize,
}

impl Budget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// The budget of a run configured by `config` that started at `start`
    pub fn from_config(config: &NormalizeConfig, start: Instant) -> Self {
        Budget {
            deadline: config.timeout().map(|timeout| start + timeout),
            max_clauses: config.max_clauses,
        }
    }

    /// Fail with `Timeout` once the deadline has passed
    pub fn check_deadline(&self, stage: Stage) -> Result<()> {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                log::warn!(target: LOG_PIPELINE, "Timeout reached during {}", stage);
                return Err(ClausifyError::Timeout { stage });
            }
        }
        Ok(())
    }

    fn check_clauses(&self, count: usize) -> Result<()> {
        if self.max_clauses > 0 && count > self.max_clauses {
            log::warn!(
                target: LOG_DISTRIBUTE,
                "Distribution would produce {} clauses, limit is {}",
                count,
                self.max_clauses
            );
            return Err(ClausifyError::ClauseLimitExceeded {
                stage: Stage::Distribution,
                limit: self.max_clauses,
            });
        }
        Ok(())
    }
}

/// `to_cnf` under a budget.
///
/// The clause count of a disjunction is known before it is distributed
/// (the product of its operands' counts), so an oversized result is
/// rejected without being built.
pub fn to_cnf_bounded(formula: Formula, budget: &Budget) -> Result<Formula> {
    budget.check_deadline(Stage::Distribution)?;

    match formula {
        Formula::And(p, q) => {
            let p = to_cnf_bounded(*p, budget)?;
            let q = to_cnf_bounded(*q, budget)?;
            budget.check_clauses(conjunct_count(&p) + conjunct_count(&q))?;
            Ok(Formula::and(p, q))
        }
        Formula::Or(p, q) => {
            let p = to_cnf_bounded(*p, budget)?;
            let q = to_cnf_bounded(*q, budget)?;
            budget.check_clauses(conjunct_count(&p).saturating_mul(conjunct_count(&q)))?;
            Ok(distribute(p, q))
        }
        other => Ok(other),
    }
}

/// Number of clauses a CNF formula denotes
pub fn conjunct_count(formula: &Formula) -> usize {
    match formula {
        Formula::And(p, q) => conjunct_count(p) + conjunct_count(q),
        _ => 1,
    }
}

/// Disjoin two CNF formulas, distributing over any conjunction on either
/// side. Clause order follows the left operand's conjuncts first.
fn distribute(left: Formula, right: Formula) -> Formula {
    match (left, right) {
        (Formula::And(a, b), right) => {
            Formula::and(distribute(*a, right.clone()), distribute(*b, right))
        }
        (left, Formula::And(a, b)) => {
            Formula::and(distribute(left.clone(), *a), distribute(left, *b))
        }
        (left, right) => Formula::or(left, right),
    }
}
