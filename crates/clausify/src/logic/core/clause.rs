//! Clauses and clause sets

use super::literal::Literal;
use super::term::Term;
use crate::logic::interner::Interner;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A clause (disjunction of literals)
///
/// Literal order is the order in which the literals were collected from the
/// disjunction, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

/// A clause set (conjunction of clauses)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseSet {
    pub clauses: Vec<Clause>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause { literals }
    }

    /// An empty clause is unsatisfiable on its own
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Check for a complementary pair of literals
    pub fn is_tautology(&self) -> bool {
        self.literals.iter().enumerate().any(|(i, a)| {
            self.literals[i + 1..].iter().any(|b| {
                a.predicate == b.predicate && a.args == b.args && a.polarity != b.polarity
            })
        })
    }

    /// Count of distinct variables
    pub fn distinct_variable_count(&self) -> usize {
        let mut seen = std::collections::HashSet::new();
        for lit in &self.literals {
            for arg in &lit.args {
                seen.extend(arg.variables());
            }
        }
        seen.len()
    }

    /// Maximum term nesting depth across all literals
    pub fn max_depth(&self) -> usize {
        self.literals
            .iter()
            .flat_map(|lit| lit.args.iter())
            .map(Self::term_depth)
            .max()
            .unwrap_or(0)
    }

    fn term_depth(term: &Term) -> usize {
        match term {
            Term::Variable(_) | Term::Constant(_) => 0,
            Term::Function(_, args) => 1 + args.iter().map(Self::term_depth).max().unwrap_or(0),
        }
    }

    pub fn display<'a>(&'a self, interner: &'a Interner) -> ClauseDisplay<'a> {
        ClauseDisplay {
            clause: self,
            interner,
        }
    }
}

impl ClauseSet {
    pub fn new(clauses: Vec<Clause>) -> Self {
        ClauseSet { clauses }
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether the set contains the empty clause
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Clause> {
        self.clauses.iter()
    }
}

impl From<Vec<Clause>> for ClauseSet {
    fn from(clauses: Vec<Clause>) -> Self {
        ClauseSet { clauses }
    }
}

impl IntoIterator for ClauseSet {
    type Item = Clause;
    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

/// Display wrapper for Clause that includes an interner for name resolution
pub struct ClauseDisplay<'a> {
    clause: &'a Clause,
    interner: &'a Interner,
}

impl<'a> fmt::Display for ClauseDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clause.is_empty() {
            return write!(f, "⊥");
        }
        for (i, lit) in self.clause.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", lit.display(self.interner))?;
        }
        Ok(())
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "⊥");
        }
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}
