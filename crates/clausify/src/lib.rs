//! clausify: normalization of first-order formulas into clause sets
//!
//! This library converts arbitrary first-order formulas into conjunctive
//! normal form, expressed as the clause list a resolution prover consumes.
//! The conversion is a fixed sequence of tree rewrites, see [`normalize`].

pub mod config;
pub mod error;
pub mod json;
pub mod misc;
pub mod logic;
pub mod normalize;

// Re-export commonly used types from logic
pub use logic::{
    Atom, Clause, ClauseSet, Constant, Formula, FormulaBuilder, FunctionSymbol, Interner, Literal,
    PredicateSymbol, Quantifier, Term, Variable,
};

pub use config::{NormalizeConfig, PrenexOrder};
pub use error::{ClausifyError, Result};

// Re-export the pipeline and its stages
pub use normalize::{
    eliminate_implications, extract_clauses, push_negation, rename_across, skolemize,
    standardize, standardize_variables, strip_universals, to_cnf, to_prenex,
    NormalizationProfile, Normalized, Normalizer, NullSink, RecordingSink, Stage, TraceSink,
    WriterSink,
};

pub use json::{ClauseSetJson, FormulaJson, ProblemJson};
