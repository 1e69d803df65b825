//! Builtin functions and their exactly-known values.

use crate::error::{UnknownFunction, WrongArity};
use crate::number::Number;
use cas_error::Error;
use rug::Float;
use std::{cmp::Ordering, fmt, str::FromStr};
use super::{Expr, ONE, ZERO};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A builtin function of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    Exp,
    Ln,
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Asin,
    Acos,
    Atan,
    Acot,
    Asec,
    Acsc,
    Sinh,
    Cosh,
    Tanh,
    Coth,
    Sech,
    Csch,
    Asinh,
    Acosh,
    Atanh,
    Acoth,
    Asech,
    Acsch,
    Abs,
    Sgn,
}

impl Func {
    /// Every builtin function of one argument.
    pub const ALL: [Func; 28] = [
        Func::Exp, Func::Ln,
        Func::Sin, Func::Cos, Func::Tan, Func::Cot, Func::Sec, Func::Csc,
        Func::Asin, Func::Acos, Func::Atan, Func::Acot, Func::Asec, Func::Acsc,
        Func::Sinh, Func::Cosh, Func::Tanh, Func::Coth, Func::Sech, Func::Csch,
        Func::Asinh, Func::Acosh, Func::Atanh, Func::Acoth, Func::Asech, Func::Acsch,
        Func::Abs, Func::Sgn,
    ];

    /// Returns the name of the function.
    pub fn name(self) -> &'static str {
        match self {
            Func::Exp => "exp",
            Func::Ln => "ln",
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Cot => "cot",
            Func::Sec => "sec",
            Func::Csc => "csc",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Acot => "acot",
            Func::Asec => "asec",
            Func::Acsc => "acsc",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Coth => "coth",
            Func::Sech => "sech",
            Func::Csch => "csch",
            Func::Asinh => "asinh",
            Func::Acosh => "acosh",
            Func::Atanh => "atanh",
            Func::Acoth => "acoth",
            Func::Asech => "asech",
            Func::Acsch => "acsch",
            Func::Abs => "abs",
            Func::Sgn => "sgn",
        }
    }

    /// Evaluates the function on a float.
    pub fn eval_float(self, x: Float) -> Float {
        match self {
            Func::Exp => x.exp(),
            Func::Ln => x.ln(),
            Func::Sin => x.sin(),
            Func::Cos => x.cos(),
            Func::Tan => x.tan(),
            Func::Cot => x.cot(),
            Func::Sec => x.sec(),
            Func::Csc => x.csc(),
            Func::Asin => x.asin(),
            Func::Acos => x.acos(),
            Func::Atan => x.atan(),
            Func::Acot => x.recip().atan(),
            Func::Asec => x.recip().acos(),
            Func::Acsc => x.recip().asin(),
            Func::Sinh => x.sinh(),
            Func::Cosh => x.cosh(),
            Func::Tanh => x.tanh(),
            Func::Coth => x.coth(),
            Func::Sech => x.sech(),
            Func::Csch => x.csch(),
            Func::Asinh => x.asinh(),
            Func::Acosh => x.acosh(),
            Func::Atanh => x.atanh(),
            Func::Acoth => x.recip().atanh(),
            Func::Asech => x.recip().acosh(),
            Func::Acsch => x.recip().asinh(),
            Func::Abs => x.abs(),
            Func::Sgn => x.signum(),
        }
    }

    /// Returns the value of the function at an exact number, if it is exactly known.
    fn eval_exact(self, n: &Number) -> Option<Expr> {
        let zero = n.is_zero();
        let one = n.is_one();
        let value = match self {
            Func::Abs => return Some(Expr::Number(n.abs())),
            Func::Sgn => return Some(Expr::int(match n.signum() {
                Ordering::Less => -1,
                Ordering::Equal => 0,
                Ordering::Greater => 1,
            })),
            Func::Ln if !n.is_positive() => Expr::Undefined,
            Func::Asin | Func::Acos if n.abs() > Number::int(1) => Expr::Undefined,
            Func::Exp | Func::Cos | Func::Cosh | Func::Sec | Func::Sech if zero => ONE.clone(),
            Func::Sin | Func::Tan | Func::Asin | Func::Atan
                | Func::Sinh | Func::Tanh | Func::Asinh | Func::Atanh if zero => ZERO.clone(),
            Func::Cot | Func::Csc | Func::Coth | Func::Csch if zero => Expr::ComplexInfinity,
            Func::Ln | Func::Acos | Func::Asec | Func::Acosh | Func::Asech if one => ZERO.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Returns the value of the function at the given argument, if it can be computed without
    /// creating a [`Expr::Function`] node.
    pub(super) fn evaluate(self, arg: &Expr) -> Option<Expr> {
        match (self, arg) {
            (_, Expr::Undefined) => Some(Expr::Undefined),
            (_, Expr::Number(n @ Number::Float(_))) => Some(Expr::from(self.eval_float(n.to_float()))),
            (_, Expr::Number(n)) => self.eval_exact(n),
            (Func::Exp, Expr::NegativeInfinity) => Some(ZERO.clone()),
            (Func::Exp | Func::Ln | Func::Abs, Expr::PositiveInfinity)
                | (Func::Abs, Expr::NegativeInfinity) => Some(Expr::PositiveInfinity),
            (Func::Sgn, Expr::PositiveInfinity) => Some(ONE.clone()),
            (Func::Sgn, Expr::NegativeInfinity) => Some(Expr::int(-1)),
            // exp and ln are inverses on the reals
            (Func::Exp, Expr::Function(Func::Ln, inner))
                | (Func::Ln, Expr::Function(Func::Exp, inner)) => Some((**inner).clone()),
            _ => None,
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Func {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Func::ALL.iter()
            .copied()
            .find(|func| func.name() == s)
            .ok_or_else(|| UnknownFunction::new(s).into())
    }
}

/// A builtin function of two or more arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MultiFunc {
    /// `log(a, b)`, the logarithm of `a` in base `b`.
    Log,

    /// `atan2(y, x)`, the angle of the point `(x, y)`.
    Atan2,

    /// The smallest argument.
    Min,

    /// The largest argument.
    Max,
}

impl MultiFunc {
    /// Every builtin function of several arguments.
    pub const ALL: [MultiFunc; 4] = [MultiFunc::Log, MultiFunc::Atan2, MultiFunc::Min, MultiFunc::Max];

    /// Returns the name of the function.
    pub fn name(self) -> &'static str {
        match self {
            MultiFunc::Log => "log",
            MultiFunc::Atan2 => "atan2",
            MultiFunc::Min => "min",
            MultiFunc::Max => "max",
        }
    }

    /// Checks that the function accepts the given number of arguments.
    pub fn check_arity(self, given: usize) -> Result<(), Error> {
        let (valid, expected) = match self {
            MultiFunc::Log | MultiFunc::Atan2 => (given == 2, "2"),
            MultiFunc::Min | MultiFunc::Max => (given >= 2, "at least 2"),
        };

        if valid {
            Ok(())
        } else {
            Err(WrongArity { name: self.name(), expected, given }.into())
        }
    }

    /// Returns the value of the function at the given arguments, if it can be computed without
    /// creating a [`Expr::MultiFunction`] node.
    pub(super) fn evaluate(self, args: &[Expr]) -> Option<Expr> {
        if args.iter().any(|arg| *arg == Expr::Undefined) {
            return Some(Expr::Undefined);
        }

        let numbers = args.iter().map(Expr::as_number).collect::<Option<Vec<_>>>();
        match (self, args) {
            (MultiFunc::Log, [value, base]) => {
                if value.is_one() {
                    return Some(ZERO.clone());
                }
                if value == base {
                    return Some(ONE.clone());
                }
                match numbers?.as_slice() {
                    [value, base] if !value.is_exact() || !base.is_exact() => {
                        Some(Expr::from(value.to_float().ln() / base.to_float().ln()))
                    },
                    _ => None,
                }
            },
            (MultiFunc::Atan2, _) => match numbers?.as_slice() {
                [y, x] if !y.is_exact() || !x.is_exact() => Some(Expr::from(y.to_float().atan2(&x.to_float()))),
                _ => None,
            },
            (MultiFunc::Min, _) => numbers?.into_iter().min().cloned().map(Expr::Number),
            (MultiFunc::Max, _) => numbers?.into_iter().max().cloned().map(Expr::Number),
            _ => None,
        }
    }
}

impl fmt::Display for MultiFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for MultiFunc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MultiFunc::ALL.iter()
            .copied()
            .find(|func| func.name() == s)
            .ok_or_else(|| UnknownFunction::new(s).into())
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{assert_float_absolute_eq, assert_float_relative_eq};
    use pretty_assertions::assert_eq;
    use super::*;

    fn float_of(expr: &Expr) -> f64 {
        match expr {
            Expr::Number(n) => n.to_f64(),
            other => panic!("expected a number, got {other:?}"),
        }
    }

    #[test]
    fn parse_names() {
        for func in Func::ALL {
            assert_eq!(func.name().parse::<Func>().unwrap(), func);
        }
        assert_eq!("atan2".parse::<MultiFunc>().unwrap(), MultiFunc::Atan2);
        assert!("sine".parse::<Func>().is_err());
    }

    #[test]
    fn special_values() {
        assert_eq!(Expr::call(Func::Exp, Expr::int(0)), Expr::int(1));
        assert_eq!(Expr::call(Func::Ln, Expr::int(1)), Expr::int(0));
        assert_eq!(Expr::call(Func::Sin, Expr::int(0)), Expr::int(0));
        assert_eq!(Expr::call(Func::Cos, Expr::int(0)), Expr::int(1));
        assert_eq!(Expr::call(Func::Cot, Expr::int(0)), Expr::ComplexInfinity);
        assert_eq!(Expr::call(Func::Acos, Expr::int(1)), Expr::int(0));
        assert_eq!(Expr::call(Func::Abs, Expr::rational(-3, 2)), Expr::rational(3, 2));
        assert_eq!(Expr::call(Func::Sgn, Expr::int(-7)), Expr::int(-1));
    }

    #[test]
    fn domain_errors_are_undefined() {
        assert_eq!(Expr::call(Func::Ln, Expr::int(0)), Expr::Undefined);
        assert_eq!(Expr::call(Func::Ln, Expr::int(-2)), Expr::Undefined);
        assert_eq!(Expr::call(Func::Asin, Expr::int(2)), Expr::Undefined);
        assert_eq!(Expr::call(Func::Acos, Expr::rational(-3, 2)), Expr::Undefined);
        assert_eq!(Expr::call(Func::Ln, Expr::float(-1.0)), Expr::Undefined);
        assert_eq!(Expr::call(Func::Sin, Expr::Undefined), Expr::Undefined);
    }

    #[test]
    fn exact_arguments_stay_symbolic() {
        let sin_two = Expr::call(Func::Sin, Expr::int(2));
        assert!(matches!(sin_two, Expr::Function(Func::Sin, _)));
    }

    #[test]
    fn float_evaluation() {
        assert_float_relative_eq!(float_of(&Expr::call(Func::Exp, Expr::float(1.0))), std::f64::consts::E);
        assert_float_relative_eq!(float_of(&Expr::call(Func::Sin, Expr::float(0.5))), 0.5f64.sin());
        assert_float_relative_eq!(float_of(&Expr::call(Func::Acot, Expr::float(2.0))), 0.5f64.atan());
        assert_float_relative_eq!(float_of(&Expr::call(Func::Asech, Expr::float(0.5))), 2.0f64.acosh());
        assert_float_absolute_eq!(float_of(&Expr::call(Func::Tanh, Expr::float(0.0))), 0.0);
    }

    #[test]
    fn inverse_pairs() {
        let x = Expr::symbol("x");
        assert_eq!(x.ln().exp(), x);
        assert_eq!(x.exp().ln(), x);
    }

    #[test]
    fn multi_argument_values() {
        let x = Expr::symbol("x");
        let log = |a, b| Expr::call_multi(MultiFunc::Log, vec![a, b]).unwrap();
        assert_eq!(log(Expr::int(1), x.clone()), Expr::int(0));
        assert_eq!(log(x.clone(), x.clone()), Expr::int(1));
        assert_float_relative_eq!(float_of(&log(Expr::float(8.0), Expr::int(2))), 3.0);
        assert!(matches!(log(Expr::int(8), Expr::int(2)), Expr::MultiFunction(MultiFunc::Log, _)));

        let max = Expr::call_multi(MultiFunc::Max, vec![Expr::int(3), Expr::rational(7, 2), Expr::int(-1)]);
        assert_eq!(max.unwrap(), Expr::rational(7, 2));

        let min = Expr::call_multi(MultiFunc::Min, vec![x.clone(), Expr::int(1)]).unwrap();
        assert!(matches!(min, Expr::MultiFunction(MultiFunc::Min, _)));

        assert!(Expr::call_multi(MultiFunc::Atan2, vec![x]).is_err());
    }
}
