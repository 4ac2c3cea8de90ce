use crate::history::History;
use num_bigint::BigUint;
use std::fmt;

/// A displayable calculation result.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Already rounded to six decimal places.
    Float(f64),
    /// Exact integer, never rounded.
    Integer(BigUint),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Integer(n) => write!(f, "{}", n),
        }
    }
}

/// A successful calculation: the history line and the value to show.
#[derive(Debug, Clone, PartialEq)]
pub struct Computation {
    pub record: String,
    pub value: Value,
}

impl Computation {
    pub fn new(input: &str, value: Value) -> Self {
        Self {
            record: record(input, &value),
            value,
        }
    }
}

/// Render a float the way the calculator prints numbers: shortest round-trip
/// digits, a trailing `.0` for integral values and a signed two-digit
/// exponent (`1e+16`, `1.5e-07`) for very large or very small magnitudes.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

/// One history line: `"<input> = <result>"`.
pub fn record(input: &str, value: &Value) -> String {
    format!("{} = {}", input, value)
}

/// Numbered history listing, one entry per line.
pub fn history_listing(history: &History) -> Vec<String> {
    history
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {}", i + 1, entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_repr() {
        assert_eq!(format_float(5.0), "5.0");
        assert_eq!(format_float(4.0), "4.0");
        assert_eq!(format_float(0.333333), "0.333333");
        assert_eq!(format_float(-2.5), "-2.5");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1.5e-7), "1.5e-07");
        assert_eq!(format_float(1e100), "1e+100");
        assert_eq!(format_float(123456.0), "123456.0");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Float(14.0).to_string(), "14.0");
        assert_eq!(Value::Integer(BigUint::from(120u32)).to_string(), "120");
        assert_eq!(record("2 + 3", &Value::Float(5.0)), "2 + 3 = 5.0");
        assert_eq!(
            Computation::new("sqrt(16.0)", Value::Float(4.0)).record,
            "sqrt(16.0) = 4.0"
        );
    }

    #[test]
    fn test_history_listing() {
        let mut history = History::new();
        history.record("2 + 3 = 5.0".to_string());
        history.record("sqrt(16.0) = 4.0".to_string());
        let lines = history_listing(&history);
        assert_eq!(lines, vec!["1. 2 + 3 = 5.0", "2. sqrt(16.0) = 4.0"]);
    }
}
