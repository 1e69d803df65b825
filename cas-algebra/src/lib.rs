//! A computer-algebra core that keeps expressions in a unique canonical form.
//!
//! Expressions are built only through canonicalizing constructors (see [`symbolic::Expr`]), which
//! flatten nested sums and products, merge like terms and factors, and sort children by a fixed
//! total order. Every algorithm in [`symbolic`] routes new nodes back through these constructors,
//! so two expressions are equal exactly when their canonical trees are identical.
//!
//! ```
//! use cas_algebra::symbolic::{derivative, Expr};
//!
//! let x = Expr::symbol("x");
//! let f = x.pow(&Expr::int(2)) + Expr::int(2) * &x + Expr::int(1);
//!
//! // d/dx (x^2 + 2x + 1) = 2x + 2
//! assert_eq!(derivative(&f, "x").unwrap(), Expr::int(2) * &x + Expr::int(2));
//! ```

pub mod error;
pub mod number;
pub mod options;
pub mod primitive;
pub mod symbolic;

pub use cas_error::Error;
pub use number::Number;
pub use options::Options;
