//! First-order logic representation
//!
//! This module provides the fundamental types the normalization stages work
//! on: terms, atoms, literals, clauses, formulas, and the symbol interner.

pub mod builder;
pub mod core;
pub mod formula;
pub mod interner;

pub use builder::FormulaBuilder;
pub use core::{
    Atom, AtomDisplay, Clause, ClauseDisplay, ClauseSet, Constant, FunctionSymbol, Literal,
    LiteralDisplay, PredicateSymbol, Term, TermDisplay, Variable,
};
pub use formula::{Formula, FormulaDisplay, Quantifier};
pub use interner::{
    ConstantId, FunctionId, Interner, PredicateId, SkolemSymbol, VariableId,
    FRESH_VARIABLE_PREFIX, SKOLEM_PREFIX,
};
