//! Atoms and literals

use super::term::{Term, Variable};
use crate::logic::interner::{Interner, PredicateId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A predicate symbol with arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PredicateSymbol {
    pub id: PredicateId,
    pub arity: usize,
}

impl PredicateSymbol {
    pub fn new(id: PredicateId, arity: usize) -> Self {
        PredicateSymbol { id, arity }
    }

    pub fn name<'a>(&self, interner: &'a Interner) -> &'a str {
        interner.resolve_predicate(self.id)
    }
}

/// An atomic formula: a predicate applied to terms
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Atom {
    pub predicate: PredicateSymbol,
    pub args: Vec<Term>,
}

impl Atom {
    pub fn new(predicate: PredicateSymbol, args: Vec<Term>) -> Self {
        Atom { predicate, args }
    }

    pub fn variables(&self) -> Vec<Variable> {
        self.args.iter().flat_map(|t| t.variables()).collect()
    }

    /// Replace every occurrence of `var` in the arguments
    pub fn substitute(&self, var: &Variable, replacement: &Term) -> Atom {
        Atom {
            predicate: self.predicate,
            args: self
                .args
                .iter()
                .map(|t| t.substitute(var, replacement))
                .collect(),
        }
    }

    pub fn display<'a>(&'a self, interner: &'a Interner) -> AtomDisplay<'a> {
        AtomDisplay {
            atom: self,
            interner,
        }
    }
}

/// A literal (positive or negative atomic formula)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub predicate: PredicateSymbol,
    pub args: Vec<Term>,
    pub polarity: bool, // true = positive, false = negative
}

impl Literal {
    pub fn positive(atom: Atom) -> Self {
        Self::from_atom(atom, true)
    }

    pub fn negative(atom: Atom) -> Self {
        Self::from_atom(atom, false)
    }

    pub fn from_atom(atom: Atom, polarity: bool) -> Self {
        Literal {
            predicate: atom.predicate,
            args: atom.args,
            polarity,
        }
    }

    /// The atom underlying this literal
    pub fn atom(&self) -> Atom {
        Atom {
            predicate: self.predicate,
            args: self.args.clone(),
        }
    }

    pub fn complement(&self) -> Literal {
        Literal {
            predicate: self.predicate,
            args: self.args.clone(),
            polarity: !self.polarity,
        }
    }

    pub fn display<'a>(&'a self, interner: &'a Interner) -> LiteralDisplay<'a> {
        LiteralDisplay {
            literal: self,
            interner,
        }
    }
}

fn write_application(
    f: &mut fmt::Formatter<'_>,
    predicate: &PredicateSymbol,
    args: &[Term],
    interner: &Interner,
) -> fmt::Result {
    write!(f, "{}", interner.resolve_predicate(predicate.id))?;
    if args.is_empty() {
        return Ok(());
    }
    write!(f, "(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", arg.display(interner))?;
    }
    write!(f, ")")
}

/// Display wrapper for Atom that includes an interner for name resolution
pub struct AtomDisplay<'a> {
    atom: &'a Atom,
    interner: &'a Interner,
}

impl<'a> fmt::Display for AtomDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_application(f, &self.atom.predicate, &self.atom.args, self.interner)
    }
}

/// Display wrapper for Literal that includes an interner for name resolution
pub struct LiteralDisplay<'a> {
    literal: &'a Literal,
    interner: &'a Interner,
}

impl<'a> fmt::Display for LiteralDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.literal.polarity {
            write!(f, "-")?;
        }
        write_application(f, &self.literal.predicate, &self.literal.args, self.interner)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "-")?;
        }
        write!(f, "P{}(", self.predicate.id.as_u32())?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}
