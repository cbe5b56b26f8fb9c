//! JSON serialization types for problems and clause sets
//!
//! Input problems arrive as already-structured formula trees; names are
//! interned as the trees are converted. Output clauses carry resolved names.

use crate::error::Result;
use crate::logic::{
    Atom, Clause, Constant, Formula, FunctionSymbol, Interner, Literal, PredicateSymbol,
    Quantifier, Term, Variable,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// JSON representation of a term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TermJson {
    Variable { name: String },
    Constant { name: String },
    Function { name: String, args: Vec<TermJson> },
}

impl TermJson {
    pub fn from_term(term: &Term, interner: &Interner) -> Self {
        match term {
            Term::Variable(v) => TermJson::Variable {
                name: v.name(interner).to_string(),
            },
            Term::Constant(c) => TermJson::Constant {
                name: c.name(interner).to_string(),
            },
            Term::Function(func_sym, args) => TermJson::Function {
                name: func_sym.name(interner).to_string(),
                args: args.iter().map(|t| TermJson::from_term(t, interner)).collect(),
            },
        }
    }

    pub fn to_term(&self, interner: &mut Interner) -> Term {
        match self {
            TermJson::Variable { name } => Term::Variable(Variable::new(interner.intern_variable(name))),
            TermJson::Constant { name } => Term::Constant(Constant::new(interner.intern_constant(name))),
            TermJson::Function { name, args } => {
                let id = interner.intern_function(name);
                let args: Vec<Term> = args.iter().map(|a| a.to_term(interner)).collect();
                Term::Function(FunctionSymbol::new(id, args.len()), args)
            }
        }
    }
}

/// JSON representation of a formula tree
///
/// `{"type": "forall", "variable": "x", "body": {"type": "atom", "predicate": "P", "args": [...]}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaJson {
    Atom {
        predicate: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<TermJson>,
    },
    Not {
        formula: Box<FormulaJson>,
    },
    And {
        left: Box<FormulaJson>,
        right: Box<FormulaJson>,
    },
    Or {
        left: Box<FormulaJson>,
        right: Box<FormulaJson>,
    },
    Implies {
        left: Box<FormulaJson>,
        right: Box<FormulaJson>,
    },
    Iff {
        left: Box<FormulaJson>,
        right: Box<FormulaJson>,
    },
    Forall {
        variable: String,
        body: Box<FormulaJson>,
    },
    Exists {
        variable: String,
        body: Box<FormulaJson>,
    },
}

impl FormulaJson {
    pub fn from_formula(formula: &Formula, interner: &Interner) -> Self {
        let boxed = |f: &Formula| Box::new(FormulaJson::from_formula(f, interner));
        match formula {
            Formula::Atom(atom) => FormulaJson::Atom {
                predicate: atom.predicate.name(interner).to_string(),
                args: atom.args.iter().map(|t| TermJson::from_term(t, interner)).collect(),
            },
            Formula::Not(f) => FormulaJson::Not { formula: boxed(f) },
            Formula::And(l, r) => FormulaJson::And {
                left: boxed(l),
                right: boxed(r),
            },
            Formula::Or(l, r) => FormulaJson::Or {
                left: boxed(l),
                right: boxed(r),
            },
            Formula::Implies(l, r) => FormulaJson::Implies {
                left: boxed(l),
                right: boxed(r),
            },
            Formula::Iff(l, r) => FormulaJson::Iff {
                left: boxed(l),
                right: boxed(r),
            },
            Formula::Quantified(q, var, body) => {
                let variable = var.name(interner).to_string();
                match q {
                    Quantifier::Forall => FormulaJson::Forall {
                        variable,
                        body: boxed(body),
                    },
                    Quantifier::Exists => FormulaJson::Exists {
                        variable,
                        body: boxed(body),
                    },
                }
            }
        }
    }

    /// Build the formula, interning every name. A predicate's arity is the
    /// number of arguments it is given.
    pub fn to_formula(&self, interner: &mut Interner) -> Formula {
        match self {
            FormulaJson::Atom { predicate, args } => {
                let id = interner.intern_predicate(predicate);
                let args: Vec<Term> = args.iter().map(|a| a.to_term(interner)).collect();
                Formula::Atom(Atom::new(PredicateSymbol::new(id, args.len()), args))
            }
            FormulaJson::Not { formula } => Formula::not(formula.to_formula(interner)),
            FormulaJson::And { left, right } => {
                Formula::and(left.to_formula(interner), right.to_formula(interner))
            }
            FormulaJson::Or { left, right } => {
                Formula::or(left.to_formula(interner), right.to_formula(interner))
            }
            FormulaJson::Implies { left, right } => {
                Formula::implies(left.to_formula(interner), right.to_formula(interner))
            }
            FormulaJson::Iff { left, right } => {
                Formula::iff(left.to_formula(interner), right.to_formula(interner))
            }
            FormulaJson::Forall { variable, body } => {
                let var = Variable::new(interner.intern_variable(variable));
                Formula::forall(var, body.to_formula(interner))
            }
            FormulaJson::Exists { variable, body } => {
                let var = Variable::new(interner.intern_variable(variable));
                Formula::exists(var, body.to_formula(interner))
            }
        }
    }
}

/// A problem file: the formulas whose conjunction is normalized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemJson {
    pub formulas: Vec<FormulaJson>,
}

impl ProblemJson {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_formulas(&self, interner: &mut Interner) -> Vec<Formula> {
        self.formulas.iter().map(|f| f.to_formula(interner)).collect()
    }
}

/// JSON representation of an atom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomJson {
    pub predicate: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TermJson>,
}

impl AtomJson {
    pub fn from_literal(lit: &Literal, interner: &Interner) -> Self {
        AtomJson {
            predicate: lit.predicate.name(interner).to_string(),
            args: lit.args.iter().map(|t| TermJson::from_term(t, interner)).collect(),
        }
    }
}

/// JSON representation of a literal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralJson {
    pub polarity: bool,
    pub atom: AtomJson,
}

impl LiteralJson {
    pub fn from_literal(lit: &Literal, interner: &Interner) -> Self {
        LiteralJson {
            polarity: lit.polarity,
            atom: AtomJson::from_literal(lit, interner),
        }
    }
}

/// JSON representation of a clause; an empty literal list is the empty clause
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseJson {
    pub literals: Vec<LiteralJson>,
}

impl ClauseJson {
    pub fn from_clause(clause: &Clause, interner: &Interner) -> Self {
        ClauseJson {
            literals: clause
                .literals
                .iter()
                .map(|l| LiteralJson::from_literal(l, interner))
                .collect(),
        }
    }
}

/// JSON representation of a normalization result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseSetJson {
    pub clauses: Vec<ClauseJson>,
}

impl ClauseSetJson {
    pub fn from_clauses(clauses: &[Clause], interner: &Interner) -> Self {
        ClauseSetJson {
            clauses: clauses
                .iter()
                .map(|c| ClauseJson::from_clause(c, interner))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::FormulaBuilder;

    #[test]
    fn test_problem_from_json() {
        let json = r#"{
            "formulas": [
                {"type": "exists", "variable": "x", "body":
                    {"type": "implies",
                     "left": {"type": "atom", "predicate": "Dog", "args": [{"type": "variable", "name": "x"}]},
                     "right": {"type": "atom", "predicate": "Owns", "args": [
                        {"type": "constant", "name": "Jack"}, {"type": "variable", "name": "x"}]}}},
                {"type": "not", "formula": {"type": "atom", "predicate": "Rain"}}
            ]
        }"#;

        let problem = ProblemJson::from_json_str(json).unwrap();
        let mut interner = Interner::new();
        let formulas = problem.to_formulas(&mut interner);

        let shown: Vec<String> = formulas
            .iter()
            .map(|f| f.display(&interner).to_string())
            .collect();
        assert_eq!(shown, vec!["some x.(Dog(x) -> Owns(Jack,x))", "-Rain"]);
    }

    #[test]
    fn test_unknown_node_type_is_rejected() {
        let json = r#"{"formulas": [{"type": "xor", "left": {}, "right": {}}]}"#;
        assert!(ProblemJson::from_json_str(json).is_err());
    }

    #[test]
    fn test_formula_json_survives_interning() {
        let mut interner = Interner::new();
        let mut b = FormulaBuilder::new(&mut interner);
        let x = b.var("x");
        let y = b.var_term("y");
        let fy = b.function("f", vec![y]);
        let xt = Term::Variable(x);
        let body = b.atom("R", vec![xt, fy]);
        let formula = Formula::forall(x, Formula::iff(body, Formula::not(b.prop("Q"))));

        let json = FormulaJson::from_formula(&formula, &interner);
        let mut fresh = Interner::new();
        let rebuilt = json.to_formula(&mut fresh);

        assert_eq!(
            rebuilt.display(&fresh).to_string(),
            formula.display(&interner).to_string()
        );
    }

    #[test]
    fn test_clause_set_json_shape() {
        let mut interner = Interner::new();
        let mut b = FormulaBuilder::new(&mut interner);
        let sk = b.constant("sk0");
        let Formula::Atom(atom) = b.atom("P", vec![sk]) else {
            panic!("Expected atom");
        };
        let clauses = vec![Clause::new(vec![Literal::negative(atom)]), Clause::new(vec![])];

        let value = serde_json::to_value(ClauseSetJson::from_clauses(&clauses, &interner)).unwrap();

        assert_eq!(value["clauses"][0]["literals"][0]["polarity"], false);
        assert_eq!(value["clauses"][0]["literals"][0]["atom"]["predicate"], "P");
        assert_eq!(
            value["clauses"][0]["literals"][0]["atom"]["args"][0]["type"],
            "constant"
        );
        assert_eq!(value["clauses"][1]["literals"].as_array().unwrap().len(), 0);
    }
}
