use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`]. Subtrees that are shared between
/// several parents are visited once per occurrence.
pub struct ExprIter<'a> {
    /// Expressions waiting to be visited, with a flag that is set once their children have been
    /// pushed above them.
    stack: Vec<(&'a Expr, bool)>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self { stack: vec![(expr, false)] }
    }

    /// Pushes the given children so that the leftmost child is visited first.
    fn push_children<I>(&mut self, children: I)
    where
        I: DoubleEndedIterator<Item = &'a Expr>,
    {
        self.stack.extend(children.rev().map(|child| (child, false)));
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (expr, expanded) = self.stack.pop()?;
            if expanded || expr.is_leaf() {
                return Some(expr);
            }

            self.stack.push((expr, true));
            match expr {
                Expr::Sum(children)
                    | Expr::Product(children)
                    | Expr::MultiFunction(_, children) => self.push_children(children.iter()),
                Expr::Power(base, exp) => self.push_children([&**base, &**exp].into_iter()),
                Expr::Function(_, arg) => self.stack.push((&**arg, false)),
                _ => {},
            }
        }
    }
}
