//! Core types: terms, atoms, literals, clauses

pub mod clause;
pub mod literal;
pub mod term;

pub use clause::{Clause, ClauseDisplay, ClauseSet};
pub use literal::{Atom, AtomDisplay, Literal, LiteralDisplay, PredicateSymbol};
pub use term::{Constant, FunctionSymbol, Term, TermDisplay, Variable};
