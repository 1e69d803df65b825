//! Structural pattern matching.
//!
//! A pattern is an ordinary [`Expr`] whose symbols act as holes. The first occurrence of a symbol
//! binds it to the subexpression at the same position in the candidate; every later occurrence
//! of that symbol must match the bound value exactly.
//!
//! ```
//! use cas_algebra::symbolic::{matches, Expr};
//!
//! let a = Expr::symbol("a");
//! let y = Expr::symbol("y");
//!
//! let bindings = matches(&y.sin().pow(&Expr::int(2)), &a.sin().pow(&Expr::int(2))).unwrap();
//! assert_eq!(bindings.get("a"), Some(&y));
//! ```
//!
//! Matching is positional. The children of a [`Expr::Sum`] or [`Expr::Product`] are compared in
//! their canonical order, and both sides must have the same number of children; no reordering or
//! regrouping is attempted. For example, `x + 1` (canonically `1 + x`) matches `a + b` with
//! `a = 1` and `b = x`, while `x + y + 1` does not match `a + b` at all.

use crate::symbolic::expr::Expr;
use std::collections::BTreeMap;

/// The values bound to the symbols of a pattern by a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings(BTreeMap<String, Expr>);

impl Bindings {
    /// Creates an empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value bound to the given symbol.
    pub fn get(&self, name: &str) -> Option<&Expr> {
        self.0.get(name)
    }

    /// Returns the number of bound symbols.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no symbol is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the bound symbols and their values, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Replaces every bound symbol in the pattern with its value, simultaneously.
    ///
    /// If the bindings came from matching `expr` against `pattern`, this reproduces `expr`.
    pub fn apply(&self, pattern: &Expr) -> Expr {
        let replacements = self.0.iter()
            .map(|(name, value)| (Expr::symbol(name), value.clone()))
            .collect::<BTreeMap<_, _>>();
        pattern.substitute_all(&replacements)
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = (&'a String, &'a Expr);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Expr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Matches children pairwise, requiring the same number of them.
fn match_children(exprs: &[Expr], patterns: &[Expr], bindings: &mut Bindings) -> bool {
    exprs.len() == patterns.len()
        && exprs.iter().zip(patterns).all(|(expr, pattern)| match_node(expr, pattern, bindings))
}

fn match_node(expr: &Expr, pattern: &Expr, bindings: &mut Bindings) -> bool {
    match (expr, pattern) {
        (_, Expr::Symbol(name)) => match bindings.0.get(&**name) {
            Some(bound) => bound == expr,
            None => {
                bindings.0.insert(name.to_string(), expr.clone());
                true
            },
        },
        (Expr::Sum(exprs), Expr::Sum(patterns))
        | (Expr::Product(exprs), Expr::Product(patterns)) => match_children(exprs, patterns, bindings),
        (Expr::Power(base, exp), Expr::Power(pattern_base, pattern_exp)) => {
            match_node(base, pattern_base, bindings) && match_node(exp, pattern_exp, bindings)
        },
        (Expr::Function(func, arg), Expr::Function(pattern_func, pattern_arg)) => {
            func == pattern_func && match_node(arg, pattern_arg, bindings)
        },
        (Expr::MultiFunction(func, args), Expr::MultiFunction(pattern_func, pattern_args)) => {
            func == pattern_func && match_children(args, pattern_args, bindings)
        },
        // numbers and sentinels
        _ => expr == pattern,
    }
}

/// Matches `expr` against `pattern`, extending the given bindings. Symbols that are already bound
/// must match their bound values.
///
/// Returns false and leaves `bindings` unchanged if the match fails.
pub fn match_into(expr: &Expr, pattern: &Expr, bindings: &mut Bindings) -> bool {
    let mut extended = bindings.clone();
    if match_node(expr, pattern, &mut extended) {
        *bindings = extended;
        true
    } else {
        false
    }
}

/// Matches `expr` against `pattern`, returning the bindings of the pattern's symbols if the match
/// succeeds.
pub fn matches(expr: &Expr, pattern: &Expr) -> Option<Bindings> {
    let mut bindings = Bindings::new();
    match_node(expr, pattern, &mut bindings).then_some(bindings)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::expr::{Func, MultiFunc};
    use super::*;

    fn sym(name: &str) -> Expr {
        Expr::symbol(name)
    }

    #[test]
    fn binds_function_argument() {
        let (a, y) = (sym("a"), sym("y"));
        let bindings = matches(&y.sin().pow(&Expr::int(2)), &a.sin().pow(&Expr::int(2))).unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.get("a"), Some(&y));
    }

    #[test]
    fn positional_sums() {
        let (a, b, x, y) = (sym("a"), sym("b"), sym("x"), sym("y"));
        let bindings = matches(&(&x + Expr::int(1)), &(&a + &b)).unwrap();
        assert_eq!(bindings.get("a"), Some(&Expr::int(1)));
        assert_eq!(bindings.get("b"), Some(&x));

        // different arity
        assert_eq!(matches(&(&x + &y + Expr::int(1)), &(&a + &b)), None);
        // different kind
        assert_eq!(matches(&(&x * &y), &(&a + &b)), None);
    }

    #[test]
    fn repeated_symbols_must_agree() {
        let (a, x, y) = (sym("a"), sym("x"), sym("y"));
        let pattern = a.sin() * a.cos();
        assert!(matches(&(x.sin() * x.cos()), &pattern).is_some());
        assert_eq!(matches(&(x.sin() * y.cos()), &pattern), None);
    }

    #[test]
    fn numbers_and_functions_must_be_equal() {
        let (a, x) = (sym("a"), sym("x"));
        assert_eq!(matches(&x.pow(&Expr::int(3)), &a.pow(&Expr::int(2))), None);
        assert_eq!(matches(&x.cos(), &a.sin()), None);
        assert!(matches(&Expr::Undefined, &Expr::Undefined).is_some());
        assert_eq!(matches(&Expr::ComplexInfinity, &Expr::Undefined), None);

        let log = Expr::call_multi(MultiFunc::Log, vec![x.clone(), Expr::int(2)]).unwrap();
        let pattern = Expr::call_multi(MultiFunc::Log, vec![a.clone(), Expr::int(2)]).unwrap();
        assert_eq!(matches(&log, &pattern).unwrap().get("a"), Some(&x));
    }

    #[test]
    fn extends_existing_bindings() {
        let (a, b, x, y) = (sym("a"), sym("b"), sym("x"), sym("y"));
        let mut bindings = matches(&x.exp(), &a.exp()).unwrap();

        // `a` is already bound to `x`
        assert!(!match_into(&y.sin(), &a.sin(), &mut bindings));
        assert_eq!(bindings.len(), 1);

        assert!(match_into(&(&x * &y).sin(), &(&a * &b).sin(), &mut bindings));
        assert_eq!(bindings.get("b"), Some(&y));
    }

    #[test]
    fn failed_match_leaves_bindings_unchanged() {
        let (a, b, x, y) = (sym("a"), sym("b"), sym("x"), sym("y"));
        let mut bindings = Bindings::new();
        // `a` binds to `y` in the cosine before the tangent fails to match
        let pattern = Expr::call(Func::Tan, &a + &b) * a.cos();
        let expr = Expr::call(Func::Tan, &x + &y) * y.cos();
        assert!(!match_into(&expr, &pattern, &mut bindings));
        assert!(bindings.is_empty());
    }

    #[test]
    fn soundness() {
        let (a, b, c, x, y) = (sym("a"), sym("b"), sym("c"), sym("x"), sym("y"));
        let cases = [
            (x.sin().pow(&Expr::int(2)) * y.exp(), a.sin().pow(&b) * c.exp()),
            (&x + Expr::int(1), &a + &b),
            ((&x * &y).ln() + Expr::int(3), &c + a.ln()),
        ];
        for (expr, pattern) in cases {
            let bindings = matches(&expr, &pattern).unwrap();
            assert_eq!(bindings.apply(&pattern), expr, "{expr} against {pattern}");
        }
    }
}
