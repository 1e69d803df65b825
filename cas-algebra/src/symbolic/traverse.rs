//! Generic traversals of expression trees: free symbols, containment, substitution, and mapping
//! over children.
//!
//! Every traversal that produces a new tree rebuilds composite nodes through the canonicalizing
//! constructors, so replacing a subexpression can trigger re-normalization. Substituting `x = y`
//! into `x + y` produces `2*y`, not a sum with two equal terms.

use crate::error::EmptySymbolSet;
use cas_error::Error;
use std::collections::{BTreeMap, BTreeSet};
use super::expr::Expr;

impl Expr {
    /// Returns the set of symbols that appear in the expression, in canonical order.
    pub fn free_symbols(&self) -> BTreeSet<Expr> {
        self.post_order_iter()
            .filter(|expr| matches!(expr, Expr::Symbol(_)))
            .cloned()
            .collect()
    }

    /// Returns true if `target` appears anywhere in the expression, including the expression
    /// itself. Comparison is structural.
    pub fn contains(&self, target: &Expr) -> bool {
        self.post_order_iter().any(|expr| expr == target)
    }

    /// Returns true if the symbol with the given name appears in the expression.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.post_order_iter().any(|expr| expr.as_symbol() == Some(name))
    }

    /// Returns true if any of the given expressions appears in the expression.
    ///
    /// Fails with [`EmptySymbolSet`] if `targets` is empty.
    pub fn contains_any(&self, targets: &[Expr]) -> Result<bool, Error> {
        if targets.is_empty() {
            return Err(EmptySymbolSet.into());
        }
        Ok(targets.iter().any(|target| self.contains(target)))
    }

    /// Returns true if every one of the given expressions appears in the expression.
    ///
    /// Fails with [`EmptySymbolSet`] if `targets` is empty.
    pub fn contains_all(&self, targets: &[Expr]) -> Result<bool, Error> {
        if targets.is_empty() {
            return Err(EmptySymbolSet.into());
        }
        Ok(targets.iter().all(|target| self.contains(target)))
    }

    /// Replaces every occurrence of `from` with `to`.
    ///
    /// Occurrences are found by structural equality; `from` is not a pattern. A replaced node is
    /// not searched again, so `x` can be substituted with an expression containing `x`.
    pub fn substitute(&self, from: &Expr, to: &Expr) -> Expr {
        if self == from {
            to.clone()
        } else {
            self.map(|child| child.substitute(from, to))
        }
    }

    /// Replaces every key of `replacements` with its value, simultaneously.
    ///
    /// Because all replacements happen in one pass, `{x: y, y: x}` swaps `x` and `y`.
    pub fn substitute_all(&self, replacements: &BTreeMap<Expr, Expr>) -> Expr {
        match replacements.get(self) {
            Some(to) => to.clone(),
            None => self.map(|child| child.substitute_all(replacements)),
        }
    }

    /// Rebuilds the node by applying `f` to each of its immediate children. Leaves are returned
    /// unchanged.
    pub fn map(&self, mut f: impl FnMut(&Expr) -> Expr) -> Expr {
        match self {
            Expr::Sum(terms) => Expr::sum(terms.iter().map(&mut f)),
            Expr::Product(factors) => Expr::product(factors.iter().map(&mut f)),
            Expr::Power(base, exp) => {
                let base = f(base);
                let exp = f(exp);
                base.pow(&exp)
            },
            Expr::Function(func, arg) => Expr::call(*func, f(arg)),
            Expr::MultiFunction(func, args) => {
                Expr::call_multi_unchecked(*func, args.iter().map(f).collect())
            },
            leaf => leaf.clone(),
        }
    }

    /// Like [`Expr::map`], but stops at the first child for which `f` fails.
    pub fn try_map<E>(&self, mut f: impl FnMut(&Expr) -> Result<Expr, E>) -> Result<Expr, E> {
        Ok(match self {
            Expr::Sum(terms) => Expr::sum(terms.iter().map(&mut f).collect::<Result<Vec<_>, _>>()?),
            Expr::Product(factors) => {
                Expr::product(factors.iter().map(&mut f).collect::<Result<Vec<_>, _>>()?)
            },
            Expr::Power(base, exp) => {
                let base = f(base)?;
                let exp = f(exp)?;
                base.pow(&exp)
            },
            Expr::Function(func, arg) => Expr::call(*func, f(arg)?),
            Expr::MultiFunction(func, args) => Expr::call_multi_unchecked(
                *func,
                args.iter().map(f).collect::<Result<Vec<_>, _>>()?,
            ),
            leaf => leaf.clone(),
        })
    }
}
