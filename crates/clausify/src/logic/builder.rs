//! Formula builder over an interner
//!
//! Formulas reach the pipeline already structured; this builder is the
//! programmatic way to construct them without a parser.

use super::core::{Atom, Constant, FunctionSymbol, PredicateSymbol, Term, Variable};
use super::formula::Formula;
use super::interner::Interner;

/// Builds terms and formulas, interning every name it is given
pub struct FormulaBuilder<'a> {
    interner: &'a mut Interner,
}

impl<'a> FormulaBuilder<'a> {
    pub fn new(interner: &'a mut Interner) -> Self {
        FormulaBuilder { interner }
    }

    pub fn interner(&self) -> &Interner {
        self.interner
    }

    pub fn var(&mut self, name: &str) -> Variable {
        Variable::new(self.interner.intern_variable(name))
    }

    pub fn var_term(&mut self, name: &str) -> Term {
        Term::Variable(self.var(name))
    }

    pub fn constant(&mut self, name: &str) -> Term {
        Term::Constant(Constant::new(self.interner.intern_constant(name)))
    }

    /// A function application. With no arguments this is still a function
    /// term, not a constant.
    pub fn function(&mut self, name: &str, args: Vec<Term>) -> Term {
        let symbol = FunctionSymbol::new(self.interner.intern_function(name), args.len());
        Term::Function(symbol, args)
    }

    /// An atomic formula; the predicate's arity is the argument count
    pub fn atom(&mut self, name: &str, args: Vec<Term>) -> Formula {
        let predicate = PredicateSymbol::new(self.interner.intern_predicate(name), args.len());
        Formula::Atom(Atom::new(predicate, args))
    }

    /// A zero-arity atom
    pub fn prop(&mut self, name: &str) -> Formula {
        self.atom(name, vec![])
    }

    /// `name(v)` for a single variable argument
    pub fn unary(&mut self, name: &str, var: Variable) -> Formula {
        self.atom(name, vec![Term::Variable(var)])
    }
}
