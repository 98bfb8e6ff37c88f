use num_traits::{AsPrimitive, NumAssign, Signed};
use std::fmt::{Debug, Display};
use std::iter::Sum;

/// Numeric type of a cost matrix entry.
///
/// Floating point types accept any finite value. Integer types are always finite
/// and keep the whole computation exact, which is the better choice for ranked
/// preferences and other integral inputs.
pub trait Cost:
    Copy
    + Debug
    + Display
    + PartialOrd
    + Signed
    + NumAssign
    + Sum
    + AsPrimitive<f64>
    + Send
    + Sync
    + 'static
{
    /// Largest magnitude the type can hold.
    const LIMIT: f64;

    /// `false` for NaN and infinities.
    fn is_finite_cost(self) -> bool;

    /// Sentinel that compares greater than any slack reachable during a solve.
    fn unbounded() -> Self;

    /// Absolute error allowed when checking dual feasibility of a solution over
    /// costs bounded by `max_abs`.
    fn toleration(max_abs: f64, size: usize) -> f64;
}

macro_rules! float_cost {
    ($t:ty) => {
        impl Cost for $t {
            const LIMIT: f64 = <$t>::MAX as f64;

            #[inline]
            fn is_finite_cost(self) -> bool {
                self.is_finite()
            }

            #[inline]
            fn unbounded() -> Self {
                <$t>::INFINITY
            }

            fn toleration(max_abs: f64, size: usize) -> f64 {
                // potentials accumulate one rounding error per relabel step
                let steps = size as f64 * size as f64;
                4.0 * (<$t>::EPSILON as f64) * max_abs.max(1.0) * steps
            }
        }
    };
}

macro_rules! integer_cost {
    ($t:ty) => {
        impl Cost for $t {
            const LIMIT: f64 = <$t>::MAX as f64;

            #[inline]
            fn is_finite_cost(self) -> bool {
                true
            }

            #[inline]
            fn unbounded() -> Self {
                <$t>::MAX
            }

            fn toleration(_max_abs: f64, _size: usize) -> f64 {
                0.0
            }
        }
    };
}

float_cost!(f32);
float_cost!(f64);
integer_cost!(i32);
integer_cost!(i64);

#[cfg(test)]
mod tests {
    use super::Cost;

    #[test]
    fn test_finiteness() {
        assert!(1.5_f64.is_finite_cost());
        assert!(!f64::NAN.is_finite_cost());
        assert!(!f32::NEG_INFINITY.is_finite_cost());
        assert!(i64::MIN.is_finite_cost());
    }

    #[test]
    fn test_unbounded_dominates() {
        assert!(f64::unbounded() > f64::MAX);
        assert_eq!(i32::unbounded(), i32::MAX);
    }

    #[test]
    fn test_toleration() {
        assert_eq!(i64::toleration(1e9, 100), 0.0);
        let small = f64::toleration(1.0, 10);
        let large = f64::toleration(1000.0, 10);
        assert!(small > 0.0 && small < 1e-12);
        assert!(large > small);
    }
}
