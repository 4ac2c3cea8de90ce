//! Checked numeric primitives shared by the menu operations and the
//! expression evaluator.
//!
//! Every primitive validates its domain before computing and refuses to hand
//! back a non-finite value, so callers never see `inf` or `NaN`.

use crate::error::MathError;
use num_bigint::BigUint;
use num_traits::One;

/// Number of decimal places every displayed or recorded float is rounded to.
pub const DECIMAL_PLACES: usize = 6;

/// Largest accepted factorial operand.
pub const MAX_FACTORIAL: i64 = 10_000;

fn finite(operation: &str, value: f64) -> Result<f64, MathError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::domain(format!("{} result is out of range", operation)))
    }
}

/// Round to [`DECIMAL_PLACES`] places.
pub fn round6(value: f64) -> f64 {
    round_to(value, DECIMAL_PLACES)
}

/// Round to `places` decimal places using correctly rounded decimal
/// formatting, so the operation is idempotent.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

pub fn add(xs: &[f64]) -> Result<f64, MathError> {
    if xs.is_empty() {
        return Err(MathError::invalid_operand("addition needs at least one number"));
    }
    finite("Addition", xs.iter().sum())
}

pub fn multiply(xs: &[f64]) -> Result<f64, MathError> {
    if xs.is_empty() {
        return Err(MathError::invalid_operand(
            "multiplication needs at least one number",
        ));
    }
    finite("Multiplication", xs.iter().product())
}

pub fn subtract(a: f64, b: f64) -> Result<f64, MathError> {
    finite("Subtraction", a - b)
}

pub fn divide(a: f64, b: f64) -> Result<f64, MathError> {
    if b == 0.0 {
        return Err(MathError::division_by_zero("Division"));
    }
    finite("Division", a / b)
}

/// Floored modulus: a non-zero result takes the sign of the divisor.
pub fn modulus(a: f64, b: f64) -> Result<f64, MathError> {
    if b == 0.0 {
        return Err(MathError::division_by_zero("Modulus"));
    }
    let m = a % b;
    let m = if m == 0.0 {
        0.0_f64.copysign(b)
    } else if (m < 0.0) != (b < 0.0) {
        m + b
    } else {
        m
    };
    finite("Modulus", m)
}

pub fn floor_divide(a: f64, b: f64) -> Result<f64, MathError> {
    if b == 0.0 {
        return Err(MathError::division_by_zero("Floor division"));
    }
    let m = a % b;
    let mut div = (a - m) / b;
    if m != 0.0 && (m < 0.0) != (b < 0.0) {
        div -= 1.0;
    }
    let quotient = if div == 0.0 {
        0.0_f64.copysign(a / b)
    } else {
        let floor = div.floor();
        if div - floor > 0.5 {
            floor + 1.0
        } else {
            floor
        }
    };
    finite("Floor division", quotient)
}

pub fn power(base: f64, exponent: f64) -> Result<f64, MathError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(MathError::domain("zero cannot be raised to a negative power"));
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(MathError::domain(
            "negative base with a fractional exponent has no real value",
        ));
    }
    finite("Power", base.powf(exponent))
}

pub fn sqrt(x: f64) -> Result<f64, MathError> {
    if x < 0.0 {
        return Err(MathError::domain("square root of a negative number"));
    }
    finite("Square root", x.sqrt())
}

pub fn ln(x: f64) -> Result<f64, MathError> {
    if x <= 0.0 {
        return Err(MathError::domain("logarithm of a non-positive number"));
    }
    finite("Logarithm", x.ln())
}

pub fn log(x: f64, base: f64) -> Result<f64, MathError> {
    if base <= 0.0 || base == 1.0 {
        return Err(MathError::domain(
            "logarithm base must be positive and different from 1",
        ));
    }
    finite("Logarithm", ln(x)? / base.ln())
}

pub fn log10(x: f64) -> Result<f64, MathError> {
    if x <= 0.0 {
        return Err(MathError::domain("logarithm of a non-positive number"));
    }
    finite("Logarithm", x.log10())
}

pub fn sin(x: f64) -> Result<f64, MathError> {
    finite("Sine", x.sin())
}

pub fn cos(x: f64) -> Result<f64, MathError> {
    finite("Cosine", x.cos())
}

pub fn tan(x: f64) -> Result<f64, MathError> {
    finite("Tangent", x.tan())
}

pub fn abs(x: f64) -> Result<f64, MathError> {
    finite("Absolute value", x.abs())
}

pub fn exp(x: f64) -> Result<f64, MathError> {
    finite("Exponential", x.exp())
}

/// Exact factorial. Never rounded.
pub fn factorial(n: i64) -> Result<BigUint, MathError> {
    if n < 0 {
        return Err(MathError::invalid_operand(
            "factorial is only defined for non-negative integers",
        ));
    }
    if n > MAX_FACTORIAL {
        return Err(MathError::invalid_operand(format!(
            "factorial operand must not exceed {}",
            MAX_FACTORIAL
        )));
    }
    Ok((2..=n as u64).fold(BigUint::one(), |acc, k| acc * k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_variadic_operations() {
        assert_eq!(add(&[2.0, 3.0]).unwrap(), 5.0);
        assert_eq!(add(&[1.5]).unwrap(), 1.5);
        assert_eq!(multiply(&[2.0, 3.0, 4.0]).unwrap(), 24.0);
        assert!(matches!(add(&[]), Err(MathError::InvalidOperand { .. })));
        assert!(matches!(multiply(&[]), Err(MathError::InvalidOperand { .. })));
    }

    #[test]
    fn test_division_by_zero_is_checked() {
        assert_eq!(divide(5.0, 0.0), Err(MathError::division_by_zero("Division")));
        assert_eq!(modulus(5.0, 0.0), Err(MathError::division_by_zero("Modulus")));
        assert!(floor_divide(5.0, -0.0).is_err());
        assert_eq!(divide(5.0, 2.0).unwrap(), 2.5);
    }

    #[test]
    fn test_floored_modulus() {
        assert_eq!(modulus(7.0, 3.0).unwrap(), 1.0);
        assert_eq!(modulus(-7.0, 3.0).unwrap(), 2.0);
        assert_eq!(modulus(7.0, -3.0).unwrap(), -2.0);
        assert_eq!(modulus(5.5, 2.0).unwrap(), 1.5);
    }

    #[test]
    fn test_floor_divide() {
        assert_eq!(floor_divide(7.0, 2.0).unwrap(), 3.0);
        assert_eq!(floor_divide(-7.0, 2.0).unwrap(), -4.0);
        assert_eq!(floor_divide(7.5, -2.0).unwrap(), -4.0);
    }

    #[test]
    fn test_power_domain() {
        assert_eq!(power(2.0, 10.0).unwrap(), 1024.0);
        assert_eq!(power(-2.0, 3.0).unwrap(), -8.0);
        assert_eq!(power(2.0, -1.0).unwrap(), 0.5);
        assert!(matches!(power(0.0, -1.0), Err(MathError::Domain { .. })));
        assert!(matches!(power(-8.0, 0.5), Err(MathError::Domain { .. })));
        assert!(matches!(power(10.0, 400.0), Err(MathError::Domain { .. })));
    }

    #[test]
    fn test_scientific_domains() {
        assert_eq!(sqrt(16.0).unwrap(), 4.0);
        assert!(sqrt(-1.0).is_err());
        assert!(ln(0.0).is_err());
        assert!(log10(-5.0).is_err());
        assert_eq!(log10(1000.0).unwrap(), 3.0);
        assert_eq!(round6(log(8.0, 2.0).unwrap()), 3.0);
        assert!(log(8.0, 1.0).is_err());
        assert!(exp(1000.0).is_err());
        assert_eq!(abs(-3.5).unwrap(), 3.5);
        assert_eq!(sin(0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_factorial_is_exact() {
        assert_eq!(factorial(5).unwrap(), BigUint::from(120u32));
        assert_eq!(factorial(0).unwrap(), BigUint::one());
        assert_eq!(
            factorial(25).unwrap().to_string(),
            "15511210043330985984000000"
        );
        assert!(matches!(factorial(-1), Err(MathError::InvalidOperand { .. })));
        assert!(factorial(MAX_FACTORIAL + 1).is_err());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round6(1.0 / 3.0), 0.333333);
        assert_eq!(round6(2.0 / 3.0), 0.666667);
        assert_eq!(round6(14.0), 14.0);
        assert_eq!(round6(1e20), 1e20);
    }

    proptest! {
        #[test]
        fn rounding_is_idempotent(x in -1e12f64..1e12f64) {
            let once = round6(x);
            prop_assert_eq!(round6(once), once);
        }

        #[test]
        fn modulus_takes_divisor_sign(a in -1e6f64..1e6f64, b in 0.001f64..1e3f64) {
            let m = modulus(a, b).unwrap();
            prop_assert!(m >= 0.0 && m <= b);
        }
    }
}
