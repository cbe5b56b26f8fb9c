//! Standardizing bound variables apart within a formula

use crate::misc::log::targets::STANDARDIZE as LOG_STANDARDIZE;
use crate::logic::{Formula, Interner, Quantifier, Term, Variable};
use std::collections::HashSet;

/// Rename bound variables so that no two quantifiers in the formula bind the
/// same symbol.
///
/// `seen` holds the symbols already taken. A quantifier whose variable is in
/// `seen` is alpha-converted to a fresh symbol before its variable is added
/// and its body is visited. Traversal is depth-first, left to right, and
/// `seen` is updated in that order.
pub fn standardize_variables(
    formula: Formula,
    seen: &mut HashSet<Variable>,
    interner: &mut Interner,
) -> Formula {
    match formula {
        Formula::Quantified(q, var, body) => {
            let (var, body) = claim_variable(q, var, *body, seen, interner);
            Formula::Quantified(q, var, Box::new(standardize_variables(body, seen, interner)))
        }
        Formula::And(f1, f2) => {
            let f1 = standardize_variables(*f1, seen, interner);
            Formula::and(f1, standardize_variables(*f2, seen, interner))
        }
        Formula::Or(f1, f2) => {
            let f1 = standardize_variables(*f1, seen, interner);
            Formula::or(f1, standardize_variables(*f2, seen, interner))
        }
        Formula::Implies(f1, f2) => {
            let f1 = standardize_variables(*f1, seen, interner);
            Formula::implies(f1, standardize_variables(*f2, seen, interner))
        }
        Formula::Iff(f1, f2) => {
            let f1 = standardize_variables(*f1, seen, interner);
            Formula::iff(f1, standardize_variables(*f2, seen, interner))
        }
        Formula::Not(f) => Formula::not(standardize_variables(*f, seen, interner)),
        Formula::Atom(_) => formula,
    }
}

/// Standardize one formula on its own.
///
/// The formula's free variables are taken from the start, so a quantifier
/// reusing the name of a free variable is renamed too; otherwise hoisting
/// that quantifier into the prefix would capture the free occurrence.
pub fn standardize(formula: Formula, interner: &mut Interner) -> Formula {
    let mut seen = formula.free_variables();
    standardize_variables(formula, &mut seen, interner)
}

/// Take ownership of `var` for a quantifier, alpha-converting the body if
/// the symbol is already in `seen`. Returns the variable the quantifier binds
/// afterwards, which is then in `seen`.
pub(crate) fn claim_variable(
    q: Quantifier,
    var: Variable,
    body: Formula,
    seen: &mut HashSet<Variable>,
    interner: &mut Interner,
) -> (Variable, Formula) {
    if !seen.contains(&var) {
        seen.insert(var);
        return (var, body);
    }

    let fresh = interner.fresh_variable(seen);
    log::trace!(
        target: LOG_STANDARDIZE,
        "{} {} renamed to {}",
        q.keyword(),
        var.name(interner),
        fresh.name(interner)
    );
    seen.insert(fresh);
    (fresh, body.substitute(&var, &Term::Variable(fresh)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::FormulaBuilder;
    use crate::normalize::invariants::has_unique_bound_variables;

    #[test]
    fn test_sibling_quantifiers_renamed() {
        // all x.P(x) & all x.Q(x) -> all x.P(x) & all z1.Q(z1)
        let mut interner = Interner::new();
        let mut b = FormulaBuilder::new(&mut interner);
        let x = b.var("x");
        let px = b.unary("P", x);
        let qx = b.unary("Q", x);
        let formula = Formula::and(Formula::forall(x, px), Formula::forall(x, qx));

        let result = standardize(formula, &mut interner);

        assert!(has_unique_bound_variables(&result));
        assert_eq!(
            result.display(&interner).to_string(),
            "(all x.P(x) & all z1.Q(z1))"
        );
    }

    #[test]
    fn test_nested_rebinding_only_renames_inner_scope() {
        // all x.(P(x) & some x.Q(x)) -> all x.(P(x) & some z1.Q(z1))
        let mut interner = Interner::new();
        let mut b = FormulaBuilder::new(&mut interner);
        let x = b.var("x");
        let px = b.unary("P", x);
        let qx = b.unary("Q", x);
        let formula = Formula::forall(x, Formula::and(px, Formula::exists(x, qx)));

        let result = standardize(formula, &mut interner);

        assert_eq!(
            result.display(&interner).to_string(),
            "all x.(P(x) & some z1.Q(z1))"
        );
    }

    #[test]
    fn test_free_variable_name_is_not_reused() {
        // P(y) | all y.Q(y) -> P(y) | all z1.Q(z1)
        let mut interner = Interner::new();
        let mut b = FormulaBuilder::new(&mut interner);
        let y = b.var("y");
        let py = b.unary("P", y);
        let qy = b.unary("Q", y);
        let formula = Formula::or(py, Formula::forall(y, qy));

        let result = standardize(formula, &mut interner);

        assert_eq!(result.display(&interner).to_string(), "(P(y) | all z1.Q(z1))");
        assert!(result.free_variables().contains(&y));
    }

    #[test]
    fn test_fresh_names_skip_user_variables() {
        // A user variable already called z1 must not be captured
        let mut interner = Interner::new();
        let mut b = FormulaBuilder::new(&mut interner);
        let x = b.var("x");
        let z1 = b.var("z1");
        let px = b.unary("P", x);
        let qx = b.atom("Q", vec![Term::Variable(x), Term::Variable(z1)]);
        let formula = Formula::and(
            Formula::forall(x, px),
            Formula::forall(z1, Formula::forall(x, qx)),
        );

        let result = standardize(formula, &mut interner);

        assert!(has_unique_bound_variables(&result));
        assert_eq!(
            result.display(&interner).to_string(),
            "(all x.P(x) & all z1.all z2.Q(z2,z1))"
        );
    }

    #[test]
    fn test_seen_set_is_threaded() {
        let mut interner = Interner::new();
        let mut b = FormulaBuilder::new(&mut interner);
        let x = b.var("x");
        let px = b.unary("P", x);
        let first = Formula::forall(x, px.clone());
        let second = Formula::forall(x, px);

        let mut seen = HashSet::new();
        let first = standardize_variables(first, &mut seen, &mut interner);
        let second = standardize_variables(second, &mut seen, &mut interner);

        assert_eq!(first.display(&interner).to_string(), "all x.P(x)");
        assert_eq!(second.display(&interner).to_string(), "all z1.P(z1)");
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_already_standard_formula_unchanged() {
        let mut interner = Interner::new();
        let mut b = FormulaBuilder::new(&mut interner);
        let x = b.var("x");
        let y = b.var("y");
        let pxy = b.atom("P", vec![Term::Variable(x), Term::Variable(y)]);
        let formula = Formula::forall(x, Formula::exists(y, pxy));

        let result = standardize(formula.clone(), &mut interner);
        assert_eq!(result, formula);
    }
}
