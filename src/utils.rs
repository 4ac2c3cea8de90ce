//! Input helpers for the menu operations

use crate::error::MathError;

/// Split an operand line on whitespace.
pub fn split_operands(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Parse one finite number.
pub fn parse_number(token: &str) -> Result<f64, MathError> {
    let trimmed = token.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(MathError::invalid_operand(format!(
            "'{}' is not a valid number",
            trimmed
        ))),
    }
}

/// Parse one integer.
pub fn parse_integer(token: &str) -> Result<i64, MathError> {
    let trimmed = token.trim();
    trimmed.parse::<i64>().map_err(|_| {
        MathError::invalid_operand(format!("'{}' is not a valid integer", trimmed))
    })
}

/// Split `line` and require exactly `count` operands.
pub fn exact_operands(line: &str, count: usize) -> Result<Vec<&str>, MathError> {
    let operands = split_operands(line);
    if operands.len() != count {
        return Err(MathError::invalid_operand(format!(
            "expected {} number(s), got {}",
            count,
            operands.len()
        )));
    }
    Ok(operands)
}

/// Parse a menu choice such as `"3"` or `" 10 "`.
pub fn parse_choice(line: &str) -> Option<u8> {
    line.trim().parse().ok()
}

/// Text processing utilities
pub struct TextUtils;

impl TextUtils {
    /// Center text within specified width
    pub fn center(text: &str, width: usize) -> String {
        let len = text.chars().count();
        if len >= width {
            return text.to_string();
        }

        let padding = width - len;
        let left_padding = padding / 2;
        let right_padding = padding - left_padding;

        format!("{}{}{}", " ".repeat(left_padding), text, " ".repeat(right_padding))
    }

    /// A horizontal rule of `width` box-drawing characters
    pub fn rule(width: usize) -> String {
        "═".repeat(width)
    }
}
