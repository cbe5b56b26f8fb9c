//! Symbol interning and fresh-symbol generation
//!
//! Every symbol that appears in a formula is interned here, one arena per
//! symbol kind:
//! - `VariableId` for variables
//! - `ConstantId` for constants (including zero-arity skolem symbols)
//! - `FunctionId` for function symbols (including skolem functions)
//! - `PredicateId` for predicate symbols
//!
//! The interner is also the naming context of one normalization run. Fresh
//! variables and skolem symbols are generated from monotonic counters and are
//! guaranteed not to clash with any name interned so far. The interner is
//! passed explicitly rather than kept in global state, so independent runs
//! never interfere.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;

use super::core::Variable;

/// Prefix of variables introduced by alpha-conversion
pub const FRESH_VARIABLE_PREFIX: &str = "z";

/// Prefix of skolem constants and functions
pub const SKOLEM_PREFIX: &str = "sk";

/// ID for an interned variable name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub(crate) u32);

/// ID for an interned constant name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstantId(pub(crate) u32);

/// ID for an interned function symbol name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub(crate) u32);

/// ID for an interned predicate symbol name
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PredicateId(pub(crate) u32);

impl VariableId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl ConstantId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl FunctionId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl PredicateId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Internal string arena for a single symbol type
#[derive(Debug, Clone, Default)]
struct StringArena {
    strings: Vec<String>,
    lookup: HashMap<String, u32>,
}

impl StringArena {
    /// Intern a string, returning its ID (get-or-create)
    fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.lookup.get(name) {
            return id;
        }
        let id = self.strings.len() as u32;
        self.strings.push(name.to_string());
        self.lookup.insert(name.to_string(), id);
        id
    }

    fn resolve(&self, id: u32) -> &str {
        &self.strings[id as usize]
    }

    fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<u32> {
        self.lookup.get(name).copied()
    }

    fn len(&self) -> usize {
        self.strings.len()
    }
}

/// A freshly generated skolem symbol
///
/// The name is reserved in both the constant and the function arena, so the
/// caller can build either a constant (empty scope) or a function
/// application of any arity from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkolemSymbol {
    pub constant: ConstantId,
    pub function: FunctionId,
}

/// Symbol interner for first-order logic
#[derive(Debug, Clone, Default)]
pub struct Interner {
    variables: StringArena,
    constants: StringArena,
    functions: StringArena,
    predicates: StringArena,
    next_variable: usize,
    next_skolem: usize,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    // === Variable interning ===

    /// Intern a variable name, returning its ID (get-or-create)
    pub fn intern_variable(&mut self, name: &str) -> VariableId {
        VariableId(self.variables.intern(name))
    }

    pub fn resolve_variable(&self, id: VariableId) -> &str {
        self.variables.resolve(id.0)
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        self.variables.contains(name)
    }

    /// Get the ID for an already-interned variable (returns None if not found)
    pub fn get_variable(&self, name: &str) -> Option<VariableId> {
        self.variables.get(name).map(VariableId)
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    // === Constant interning ===

    /// Intern a constant name, returning its ID (get-or-create)
    pub fn intern_constant(&mut self, name: &str) -> ConstantId {
        ConstantId(self.constants.intern(name))
    }

    pub fn resolve_constant(&self, id: ConstantId) -> &str {
        self.constants.resolve(id.0)
    }

    pub fn contains_constant(&self, name: &str) -> bool {
        self.constants.contains(name)
    }

    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    // === Function interning ===

    /// Intern a function name, returning its ID (get-or-create)
    pub fn intern_function(&mut self, name: &str) -> FunctionId {
        FunctionId(self.functions.intern(name))
    }

    pub fn resolve_function(&self, id: FunctionId) -> &str {
        self.functions.resolve(id.0)
    }

    pub fn contains_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    // === Predicate interning ===

    /// Intern a predicate name, returning its ID (get-or-create)
    pub fn intern_predicate(&mut self, name: &str) -> PredicateId {
        PredicateId(self.predicates.intern(name))
    }

    pub fn resolve_predicate(&self, id: PredicateId) -> &str {
        self.predicates.resolve(id.0)
    }

    pub fn contains_predicate(&self, name: &str) -> bool {
        self.predicates.contains(name)
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    // === Fresh symbols ===

    /// Generate a variable that is not in `exclude` and whose name has never
    /// been interned before.
    ///
    /// Names are `z1`, `z2`, ... from a counter that only moves forward, so a
    /// name returned once is never returned again by the same interner. Names
    /// the caller already used for their own variables are skipped.
    pub fn fresh_variable(&mut self, exclude: &HashSet<Variable>) -> Variable {
        loop {
            self.next_variable += 1;
            let name = format!("{}{}", FRESH_VARIABLE_PREFIX, self.next_variable);
            if self.variables.contains(&name) {
                continue;
            }
            let var = Variable::new(self.intern_variable(&name));
            debug_assert!(!exclude.contains(&var), "fresh variable {name} was excluded");
            return var;
        }
    }

    /// Generate a skolem symbol (`sk0`, `sk1`, ...) unused as a constant or
    /// function name.
    pub fn fresh_skolem(&mut self) -> SkolemSymbol {
        loop {
            let name = format!("{}{}", SKOLEM_PREFIX, self.next_skolem);
            self.next_skolem += 1;
            if self.constants.contains(&name) || self.functions.contains(&name) {
                continue;
            }
            return SkolemSymbol {
                constant: self.intern_constant(&name),
                function: self.intern_function(&name),
            };
        }
    }

    /// Total number of interned symbols
    pub fn total_symbols(&self) -> usize {
        self.variable_count() + self.constant_count() + self.function_count() + self.predicate_count()
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}", self.0)
    }
}

impl fmt::Display for ConstantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

impl fmt::Display for PredicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

// IDs serialize as bare u32; names are resolved by the wrappers in json.rs

impl Serialize for VariableId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for VariableId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(VariableId)
    }
}

impl Serialize for ConstantId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ConstantId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(ConstantId)
    }
}

impl Serialize for FunctionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FunctionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(FunctionId)
    }
}

impl Serialize for PredicateId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PredicateId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(PredicateId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_interning() {
        let mut interner = Interner::new();

        let x1 = interner.intern_variable("x");
        let x2 = interner.intern_variable("x");
        let y = interner.intern_variable("y");

        assert_eq!(x1, x2);
        assert_ne!(x1, y);
        assert_eq!(interner.resolve_variable(x1), "x");
        assert_eq!(interner.variable_count(), 2);
    }

    #[test]
    fn test_separate_namespaces() {
        let mut interner = Interner::new();

        let v = interner.intern_variable("a");
        let c = interner.intern_constant("a");
        let f = interner.intern_function("a");
        let p = interner.intern_predicate("a");

        assert_eq!(interner.resolve_variable(v), "a");
        assert_eq!(interner.resolve_constant(c), "a");
        assert_eq!(interner.resolve_function(f), "a");
        assert_eq!(interner.resolve_predicate(p), "a");
        assert_eq!(interner.total_symbols(), 4);
    }

    #[test]
    fn test_fresh_variable_skips_interned_names() {
        let mut interner = Interner::new();
        interner.intern_variable("z1");
        interner.intern_variable("z2");

        let fresh = interner.fresh_variable(&HashSet::new());
        assert_eq!(interner.resolve_variable(fresh.id), "z3");
    }

    #[test]
    fn test_fresh_variables_never_repeat() {
        let mut interner = Interner::new();
        let mut seen = HashSet::new();
        for _ in 0..50 {
            let v = interner.fresh_variable(&seen);
            assert!(seen.insert(v), "fresh variable returned twice");
        }
    }

    #[test]
    fn test_fresh_skolem_avoids_user_symbols() {
        let mut interner = Interner::new();
        interner.intern_constant("sk0");
        interner.intern_function("sk1");

        let sk = interner.fresh_skolem();
        assert_eq!(interner.resolve_constant(sk.constant), "sk2");
        assert_eq!(interner.resolve_function(sk.function), "sk2");

        let next = interner.fresh_skolem();
        assert_eq!(interner.resolve_constant(next.constant), "sk3");
    }
}
