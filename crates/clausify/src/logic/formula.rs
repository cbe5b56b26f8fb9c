//! First-order formula representation
//!
//! `Formula` is the tree every normalization stage consumes and produces.
//! Stages take formulas by value and build new trees; nothing is mutated in
//! place.

use super::core::{Atom, Term, Variable};
use super::interner::Interner;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Quantifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantifier {
    Forall,
    Exists,
}

impl Quantifier {
    /// The dual quantifier, used when a negation moves through
    pub fn dual(self) -> Self {
        match self {
            Quantifier::Forall => Quantifier::Exists,
            Quantifier::Exists => Quantifier::Forall,
        }
    }

    /// Keyword in the textual syntax
    pub fn keyword(self) -> &'static str {
        match self {
            Quantifier::Forall => "all",
            Quantifier::Exists => "some",
        }
    }
}

/// First-order formula
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    /// Atomic formula
    Atom(Atom),
    /// Negation
    Not(Box<Formula>),
    /// Conjunction
    And(Box<Formula>, Box<Formula>),
    /// Disjunction
    Or(Box<Formula>, Box<Formula>),
    /// Implication
    Implies(Box<Formula>, Box<Formula>),
    /// Biconditional
    Iff(Box<Formula>, Box<Formula>),
    /// Quantified formula
    Quantified(Quantifier, Variable, Box<Formula>),
}

impl Formula {
    pub fn not(f: Formula) -> Formula {
        Formula::Not(Box::new(f))
    }

    pub fn and(left: Formula, right: Formula) -> Formula {
        Formula::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Formula {
        Formula::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(left: Formula, right: Formula) -> Formula {
        Formula::Implies(Box::new(left), Box::new(right))
    }

    pub fn iff(left: Formula, right: Formula) -> Formula {
        Formula::Iff(Box::new(left), Box::new(right))
    }

    pub fn forall(var: Variable, body: Formula) -> Formula {
        Formula::Quantified(Quantifier::Forall, var, Box::new(body))
    }

    pub fn exists(var: Variable, body: Formula) -> Formula {
        Formula::Quantified(Quantifier::Exists, var, Box::new(body))
    }

    /// An atom or a negated atom
    pub fn is_literal(&self) -> bool {
        match self {
            Formula::Atom(_) => true,
            Formula::Not(inner) => matches!(**inner, Formula::Atom(_)),
            _ => false,
        }
    }

    /// Get all free variables in the formula
    pub fn free_variables(&self) -> HashSet<Variable> {
        match self {
            Formula::Atom(atom) => atom.variables().into_iter().collect(),
            Formula::Not(f) => f.free_variables(),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2) => {
                let mut vars = f1.free_variables();
                vars.extend(f2.free_variables());
                vars
            }
            Formula::Quantified(_, var, f) => {
                let mut vars = f.free_variables();
                vars.remove(var);
                vars
            }
        }
    }

    /// Check if the formula is closed (no free variables)
    pub fn is_closed(&self) -> bool {
        self.free_variables().is_empty()
    }

    /// Quantifier-bound variables with their quantifier, in pre-order,
    /// left to right. Repeats are kept.
    pub fn bound_variables(&self) -> Vec<(Quantifier, Variable)> {
        let mut out = Vec::new();
        self.collect_bound(&mut out);
        out
    }

    fn collect_bound(&self, out: &mut Vec<(Quantifier, Variable)>) {
        match self {
            Formula::Atom(_) => {}
            Formula::Not(f) => f.collect_bound(out),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2) => {
                f1.collect_bound(out);
                f2.collect_bound(out);
            }
            Formula::Quantified(q, var, f) => {
                out.push((*q, *var));
                f.collect_bound(out);
            }
        }
    }

    /// Check if a formula contains any quantifiers
    pub fn contains_quantifier(&self) -> bool {
        match self {
            Formula::Atom(_) => false,
            Formula::Not(f) => f.contains_quantifier(),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2) => f1.contains_quantifier() || f2.contains_quantifier(),
            Formula::Quantified(..) => true,
        }
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        match self {
            Formula::Atom(_) => 1,
            Formula::Not(f) | Formula::Quantified(_, _, f) => 1 + f.size(),
            Formula::And(f1, f2)
            | Formula::Or(f1, f2)
            | Formula::Implies(f1, f2)
            | Formula::Iff(f1, f2) => 1 + f1.size() + f2.size(),
        }
    }

    /// Replace every free occurrence of `var` with `term`.
    ///
    /// Occurrences bound by an inner quantifier over the same variable are
    /// left alone. No capture check is made: callers substitute into
    /// formulas whose bound variables are already standardized apart.
    pub fn substitute(self, var: &Variable, term: &Term) -> Formula {
        match self {
            Formula::Atom(atom) => Formula::Atom(atom.substitute(var, term)),
            Formula::Not(f) => Formula::not(f.substitute(var, term)),
            Formula::And(f1, f2) => Formula::and(f1.substitute(var, term), f2.substitute(var, term)),
            Formula::Or(f1, f2) => Formula::or(f1.substitute(var, term), f2.substitute(var, term)),
            Formula::Implies(f1, f2) => {
                Formula::implies(f1.substitute(var, term), f2.substitute(var, term))
            }
            Formula::Iff(f1, f2) => Formula::iff(f1.substitute(var, term), f2.substitute(var, term)),
            Formula::Quantified(q, v, f) => {
                if &v == var {
                    // Rebound here; inner occurrences are not free
                    Formula::Quantified(q, v, f)
                } else {
                    Formula::Quantified(q, v, Box::new(f.substitute(var, term)))
                }
            }
        }
    }

    /// Rename the bound variable of a quantifier node to `new_var`, along
    /// with every occurrence it binds. Any other node is returned unchanged.
    pub fn alpha_convert(self, new_var: Variable) -> Formula {
        match self {
            Formula::Quantified(q, old, body) => {
                let body = body.substitute(&old, &Term::Variable(new_var));
                Formula::Quantified(q, new_var, Box::new(body))
            }
            other => other,
        }
    }

    /// Format this formula with an interner for name resolution
    pub fn display<'a>(&'a self, interner: &'a Interner) -> FormulaDisplay<'a> {
        FormulaDisplay {
            formula: self,
            interner,
        }
    }
}

/// Display wrapper for Formula that includes an interner for name resolution
///
/// Binary connectives are always parenthesized:
/// `all x.((-P(x) | A) & (P(x) | -A))`.
pub struct FormulaDisplay<'a> {
    formula: &'a Formula,
    interner: &'a Interner,
}

impl<'a> FormulaDisplay<'a> {
    fn binary(&self, f: &mut fmt::Formatter<'_>, l: &Formula, op: &str, r: &Formula) -> fmt::Result {
        write!(
            f,
            "({} {} {})",
            l.display(self.interner),
            op,
            r.display(self.interner)
        )
    }
}

impl<'a> fmt::Display for FormulaDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formula {
            Formula::Atom(atom) => write!(f, "{}", atom.display(self.interner)),
            Formula::Not(inner) => write!(f, "-{}", inner.display(self.interner)),
            Formula::And(l, r) => self.binary(f, l, "&", r),
            Formula::Or(l, r) => self.binary(f, l, "|", r),
            Formula::Implies(l, r) => self.binary(f, l, "->", r),
            Formula::Iff(l, r) => self.binary(f, l, "<->", r),
            Formula::Quantified(q, var, body) => write!(
                f,
                "{} {}.{}",
                q.keyword(),
                var.name(self.interner),
                body.display(self.interner)
            ),
        }
    }
}
