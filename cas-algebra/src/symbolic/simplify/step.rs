/// A stage of a simplification pipeline that changed the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a/b + c/d = (a*d + b*c) / (b*d)`
    Rationalize,

    /// `a*(b + c) = a*b + a*c`
    Expand,

    /// `exp(a + b) = exp(a) * exp(b)`
    ExpandExponential,

    /// `exp(a) * exp(b) = exp(a + b)`
    ContractExponential,

    /// `tan(a) = sin(a) / cos(a)`
    SubstituteTrigonometric,

    /// `sin(a + b) = sin(a)*cos(b) + cos(a)*sin(b)`
    ExpandTrigonometric,

    /// `sin(a)^2 = 1/2 - cos(2a)/2`
    ContractTrigonometric,

    /// `(x^2 - 1) / (x - 1) = x + 1`
    CancelGcd,
}
