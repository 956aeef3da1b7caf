use std::fmt::{self, Display};

use crate::Float;

/// Forward-mode dual number: a value paired with its tangent (derivative).
///
/// `Dual { x, dx }` represents `x + dx·ε` where `ε² = 0`. Every operator is a
/// pure function of its operands; there is no graph and no shared state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dual<F: Float> {
    pub(crate) x: F,
    pub(crate) dx: F,
}

impl<F: Float> Display for Dual<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value: {}, grad: {}", self.x, self.dx)
    }
}

impl<F: Float> Dual<F> {
    /// Create a new dual number.
    #[inline]
    pub fn new(x: F, dx: F) -> Self {
        Dual { x, dx }
    }

    /// Create a constant (zero derivative).
    #[inline]
    pub fn constant(x: F) -> Self {
        Dual { x, dx: F::zero() }
    }

    /// Create a variable (unit derivative) for differentiation.
    #[inline]
    pub fn variable(x: F) -> Self {
        Dual { x, dx: F::one() }
    }

    /// Primal value.
    #[inline]
    pub fn x(&self) -> F {
        self.x
    }

    /// Tangent (derivative) value.
    #[inline]
    pub fn dx(&self) -> F {
        self.dx
    }

    #[inline]
    pub fn set_x(&mut self, x: F) {
        self.x = x;
    }

    #[inline]
    pub fn set_dx(&mut self, dx: F) {
        self.dx = dx;
    }

    /// Apply the chain rule: given `f(self.x)` and `f'(self.x)`, produce the dual result.
    #[inline]
    fn chain(self, f_val: F, f_deriv: F) -> Self {
        Dual {
            x: f_val,
            dx: f_deriv * self.dx,
        }
    }

    #[inline]
    pub fn sin(self) -> Self {
        self.chain(self.x.sin(), self.x.cos())
    }

    #[inline]
    pub fn cos(self) -> Self {
        self.chain(self.x.cos(), -self.x.sin())
    }

    /// Natural logarithm. `ln` of a non-positive value is `-inf` or NaN.
    #[inline]
    pub fn ln(self) -> Self {
        Dual {
            x: self.x.ln(),
            dx: self.dx / self.x,
        }
    }
}
