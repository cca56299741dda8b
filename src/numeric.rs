/*!
# Numeric Weights and Capacities

Shortest-path and flow algorithms are generic over [`Numeric`], a minimal arithmetic trait with
additive/multiplicative identities. All primitive integers and floats implement it, as do exact
rationals (`num::rational::Ratio`). A custom type (e.g. an element of a modular field) only needs
the arithmetic operators, `PartialOrd`, [`num::Zero`] and [`num::One`] to opt in.
*/

use std::ops::{Add, Div, Mul, Sub};

use num::{Integer, One, Zero, rational::Ratio};

/// Arithmetic required by the weighted algorithms.
pub trait Numeric:
    Copy
    + PartialOrd
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Returns *true* if the value is positive beyond rounding noise.
    /// Exact types compare against zero, floats against a small epsilon.
    fn exceeds_epsilon(&self) -> bool {
        *self > Self::zero()
    }

    /// Returns the smaller of both values; `other` wins ties and incomparable pairs
    fn min_of(self, other: Self) -> Self {
        if self < other { self } else { other }
    }
}

macro_rules! impl_exact_numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {}
        )*
    };
}

impl_exact_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float_numeric {
    ($($t:ty => $eps:expr),*) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn exceeds_epsilon(&self) -> bool {
                    *self > $eps
                }
            }
        )*
    };
}

impl_float_numeric!(f32 => 1e-6, f64 => 1e-9);

impl<T> Numeric for Ratio<T> where T: Clone + Copy + Integer {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon() {
        assert!(1u32.exceeds_epsilon());
        assert!(!0i64.exceeds_epsilon());
        assert!(!(-3i32).exceeds_epsilon());

        assert!(0.5f64.exceeds_epsilon());
        assert!(!1e-12f64.exceeds_epsilon());
        assert!(!(0.1f64 + 0.2 - 0.3).exceeds_epsilon());
        assert!(!1e-7f32.exceeds_epsilon());

        assert!(Ratio::new(1i64, 1_000_000_000_000).exceeds_epsilon());
        assert!(!Ratio::<i64>::zero().exceeds_epsilon());
    }

    #[test]
    fn min_of() {
        assert_eq!(3i32.min_of(5), 3);
        assert_eq!(2.5f64.min_of(-1.0), -1.0);
        assert_eq!(Ratio::new(1i32, 3).min_of(Ratio::new(1, 2)), Ratio::new(1, 3));
    }
}
