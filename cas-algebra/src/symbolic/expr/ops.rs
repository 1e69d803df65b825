//! Arithmetic operators on expressions. Every operator routes through the canonicalizing
//! constructors.
//!
//! Subtraction is `a + (-1)*b`, and division is `a * b^(-1)`.

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub};
use super::{Expr, NEG_ONE};

/// Implements a binary operator for every combination of owned and borrowed operands.
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $body:ident) => {
        impl $trait<Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                $body(self, rhs)
            }
        }

        impl $trait<&Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                $body(self, rhs.clone())
            }
        }

        impl $trait<Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                $body(self.clone(), rhs)
            }
        }

        impl $trait<&Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                $body(self.clone(), rhs.clone())
            }
        }
    };
}

fn add(lhs: Expr, rhs: Expr) -> Expr {
    Expr::sum([lhs, rhs])
}

fn sub(lhs: Expr, rhs: Expr) -> Expr {
    Expr::sum([lhs, negate(rhs)])
}

fn mul(lhs: Expr, rhs: Expr) -> Expr {
    Expr::product([lhs, rhs])
}

fn div(lhs: Expr, rhs: Expr) -> Expr {
    Expr::product([lhs, rhs.recip()])
}

fn negate(expr: Expr) -> Expr {
    Expr::product([NEG_ONE.clone(), expr])
}

impl_binary_op!(Add, add, add);
impl_binary_op!(Sub, sub, sub);
impl_binary_op!(Mul, mul, mul);
impl_binary_op!(Div, div, div);

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        negate(self)
    }
}

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        negate(self.clone())
    }
}

impl AddAssign<Expr> for Expr {
    fn add_assign(&mut self, rhs: Expr) {
        let lhs = std::mem::replace(self, Expr::Undefined);
        *self = add(lhs, rhs);
    }
}

impl MulAssign<Expr> for Expr {
    fn mul_assign(&mut self, rhs: Expr) {
        let lhs = std::mem::replace(self, Expr::Undefined);
        *self = mul(lhs, rhs);
    }
}
