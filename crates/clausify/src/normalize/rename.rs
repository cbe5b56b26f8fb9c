//! Renaming universal variables apart across a formula list

use super::standardize::claim_variable;
use crate::logic::{Formula, Interner, Quantifier, Variable};
use std::collections::HashSet;

/// Rename universally bound variables so that none is shared between any two
/// formulas of the list.
///
/// One `seen` set is threaded through the whole list in order, so the first
/// formula to bind a name keeps it.
pub fn rename_across(formulas: Vec<Formula>, interner: &mut Interner) -> Vec<Formula> {
    let mut seen = HashSet::new();
    formulas
        .into_iter()
        .map(|f| rename_universals(f, &mut seen, interner))
        .collect()
}

fn rename_universals(
    formula: Formula,
    seen: &mut HashSet<Variable>,
    interner: &mut Interner,
) -> Formula {
    match formula {
        Formula::Quantified(Quantifier::Forall, var, body) => {
            let (var, body) = claim_variable(Quantifier::Forall, var, *body, seen, interner);
            Formula::forall(var, rename_universals(body, seen, interner))
        }
        Formula::Quantified(q, var, body) => {
            Formula::Quantified(q, var, Box::new(rename_universals(*body, seen, interner)))
        }
        Formula::And(f1, f2) => {
            let f1 = rename_universals(*f1, seen, interner);
            Formula::and(f1, rename_universals(*f2, seen, interner))
        }
        Formula::Or(f1, f2) => {
            let f1 = rename_universals(*f1, seen, interner);
            Formula::or(f1, rename_universals(*f2, seen, interner))
        }
        Formula::Implies(f1, f2) => {
            let f1 = rename_universals(*f1, seen, interner);
            Formula::implies(f1, rename_universals(*f2, seen, interner))
        }
        Formula::Iff(f1, f2) => {
            let f1 = rename_universals(*f1, seen, interner);
            Formula::iff(f1, rename_universals(*f2, seen, interner))
        }
        Formula::Not(f) => Formula::not(rename_universals(*f, seen, interner)),
        Formula::Atom(_) => formula,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::FormulaBuilder;
    use crate::normalize::invariants::universals_unique_across;

    #[test]
    fn test_second_formula_is_renamed() {
        let mut interner = Interner::new();
        let mut b = FormulaBuilder::new(&mut interner);
        let x = b.var("x");
        let px = b.unary("P", x);
        let qx = b.unary("Q", x);
        let formulas = vec![Formula::forall(x, px), Formula::forall(x, qx)];

        let renamed = rename_across(formulas, &mut interner);

        assert!(universals_unique_across(&renamed));
        let shown: Vec<String> = renamed
            .iter()
            .map(|f| f.display(&interner).to_string())
            .collect();
        assert_eq!(shown, vec!["all x.P(x)", "all z1.Q(z1)"]);
    }

    #[test]
    fn test_distinct_names_untouched() {
        let mut interner = Interner::new();
        let mut b = FormulaBuilder::new(&mut interner);
        let x = b.var("x");
        let y = b.var("y");
        let px = b.unary("P", x);
        let qy = b.unary("Q", y);
        let formulas = vec![Formula::forall(x, px), Formula::forall(y, qy)];

        let renamed = rename_across(formulas.clone(), &mut interner);
        assert_eq!(renamed, formulas);
    }

    #[test]
    fn test_existentials_are_not_renamed() {
        let mut interner = Interner::new();
        let mut b = FormulaBuilder::new(&mut interner);
        let x = b.var("x");
        let px = b.unary("P", x);
        let formulas = vec![Formula::exists(x, px.clone()), Formula::exists(x, px)];

        let renamed = rename_across(formulas.clone(), &mut interner);
        assert_eq!(renamed, formulas);
    }
}
