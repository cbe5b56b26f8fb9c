//! Normalization of first-order formulas into clauses
//!
//! Each stage is a tree-to-tree function establishing one normal-form
//! invariant that the next stage relies on. `pipeline::Normalizer` composes
//! them in order:
//!
//! 1. implication elimination
//! 2. negation normal form
//! 3. per-formula variable standardization
//! 4. prenex conversion
//! 5. skolemization
//! 6. cross-formula variable renaming
//! 7. universal quantifier stripping
//! 8. CNF distribution
//! 9. clause extraction

pub mod clauses;
pub mod distribute;
pub mod implication;
pub mod invariants;
pub mod negation;
pub mod pipeline;
pub mod prenex;
pub mod rename;
pub mod skolem;
pub mod standardize;
pub mod strip;


use serde::{Deserialize, Serialize};
use std::fmt;

pub use clauses::extract_clauses;
pub use distribute::{to_cnf, to_cnf_bounded, Budget};
pub use implication::eliminate_implications;
pub use negation::push_negation;
pub use pipeline::{
    NormalizationProfile, Normalized, Normalizer, NullSink, RecordingSink, TraceSink, WriterSink,
};
pub use prenex::to_prenex;
pub use rename::rename_across;
pub use skolem::{skolemize, skolemize_in_scope};
pub use standardize::{standardize, standardize_variables};
pub use strip::strip_universals;

/// The nine normalization stages, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ImplicationElimination,
    NegationNormalForm,
    Standardization,
    Prenex,
    Skolemization,
    Renaming,
    UniversalStripping,
    Distribution,
    ClauseExtraction,
}

impl Stage {
    pub const ALL: [Stage; 9] = [
        Stage::ImplicationElimination,
        Stage::NegationNormalForm,
        Stage::Standardization,
        Stage::Prenex,
        Stage::Skolemization,
        Stage::Renaming,
        Stage::UniversalStripping,
        Stage::Distribution,
        Stage::ClauseExtraction,
    ];

    /// 1-based position in the pipeline
    pub fn number(self) -> usize {
        self as usize + 1
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ImplicationElimination => "eliminating implication",
            Stage::NegationNormalForm => "moving negation inwards",
            Stage::Standardization => "standardizing variables",
            Stage::Prenex => "prenex form",
            Stage::Skolemization => "skolemization",
            Stage::Renaming => "renaming variables",
            Stage::UniversalStripping => "eliminating universal quantifiers",
            Stage::Distribution => "conjunctive normal form",
            Stage::ClauseExtraction => "converting to clause",
        };
        write!(f, "{}", name)
    }
}
