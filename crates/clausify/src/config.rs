//! Normalization configuration types.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Order of the quantifier prefix built by prenex conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrenexOrder {
    /// All existentials, then all universals, each group in traversal order.
    ///
    /// Skolem terms built from this prefix never depend on universals, so
    /// every skolem symbol is a constant.
    #[default]
    ExistentialsFirst,
    /// Quantifiers stay in traversal order (leftmost-outermost first)
    Preserve,
}

/// Configuration for a normalization run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Hand each stage's output to the trace sink
    pub trace: bool,
    pub prenex_order: PrenexOrder,
    /// Maximum number of clauses distribution may produce (0 means no limit)
    pub max_clauses: usize,
    /// Wall-clock budget for the whole run in milliseconds
    pub timeout_ms: Option<u64>,
    /// Check each stage's output against its normal-form invariant
    pub check_invariants: bool,
    /// Collect per-stage timings
    pub enable_profiling: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        NormalizeConfig {
            trace: false,
            prenex_order: PrenexOrder::ExistentialsFirst,
            max_clauses: 0,
            timeout_ms: None,
            check_invariants: false,
            enable_profiling: false,
        }
    }
}

impl NormalizeConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = NormalizeConfig::from_json_str(r#"{"trace": true, "prenex_order": "preserve"}"#)
            .unwrap();
        assert!(config.trace);
        assert_eq!(config.prenex_order, PrenexOrder::Preserve);
        assert_eq!(config.max_clauses, 0);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_unknown_order_is_rejected() {
        assert!(NormalizeConfig::from_json_str(r#"{"prenex_order": "random"}"#).is_err());
    }
}
