//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`Expr`] nodes. The tree is
//! kept in a **canonical form** at all times: sums and products are flattened, like terms and
//! factors are merged, and children are sorted by a fixed total order.
//!
//! For example, the expression `x + (y + x)` is represented as a single [`Expr::Sum`] node with
//! _two_ children, `2*x` and `y`.
//!
//! ```
//! use cas_algebra::symbolic::Expr;
//!
//! let x = Expr::symbol("x");
//! let y = Expr::symbol("y");
//! let expr = &x + (&y + &x);
//!
//! assert_eq!(expr, Expr::int(2) * &x + &y);
//! ```
//!
//! Every algorithm in this module assumes that its inputs are canonical, and routes every node it
//! creates through the constructors, so its outputs are canonical too.
//!
//! # Algorithms
//!
//! - [`derivative()`] and [`mod@derivative`]: differentiation and Taylor expansion.
//! - [`expand()`] and [`mod@expand`]: distribution of products and powers over sums, and the
//!   expand / contract pairs for exponential and trigonometric forms.
//! - [`simplify()`] and [`mod@simplify`]: rationalization and the combined simplification
//!   pipelines.
//! - [`poly`]: degree, long division, and GCD of polynomials in one pivot symbol.
//! - [`pattern`]: structural pattern matching.
//!
//! ```
//! use cas_algebra::symbolic::{poly, Expr};
//!
//! let x = Expr::symbol("x");
//! let p = x.pow(&Expr::int(2)) - Expr::int(1);
//! let q = &x - Expr::int(1);
//!
//! assert_eq!(poly::gcd(&p, &q, "x").unwrap(), q);
//! ```

pub mod derivative;
pub mod expand;
pub mod expr;
pub mod pattern;
pub mod poly;
pub mod simplify;
pub mod step_collector;
mod traverse;

pub use derivative::{derivative, derivative_at, nth_derivative, taylor};
pub use expand::expand;
pub use expr::{Expr, Func, MultiFunc};
pub use pattern::{matches, Bindings};
pub use simplify::{simplify, simplify_with, simplify_with_steps};
pub use step_collector::StepCollector;
