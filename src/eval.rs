//! Sandboxed expression evaluation.
//!
//! Input goes through a coarse substring blacklist, then the closed grammar in
//! [`crate::parser`], then a tree walk that only ever calls into the checked
//! primitives of [`crate::numeric`]. Nothing outside the symbol table can be
//! named, so there is no ambient environment to escape into.

use crate::error::{EvalError, ExpressionResult};
use crate::numeric::{self, round6};
use crate::parser::{parse, BinaryOp, Expr, UnaryOp};
use log::debug;

/// Substrings that reject an expression outright, before any parsing.
pub const BLACKLIST: [&str; 7] = ["import", "__", "os", "sys", "open", "eval", "exec"];

/// First blacklisted substring contained in `expression`, in table order.
pub fn find_blacklisted(expression: &str) -> Option<&'static str> {
    BLACKLIST
        .iter()
        .copied()
        .find(|token| expression.contains(token))
}

/// Evaluate `expression` and round the result to six decimal places.
pub fn evaluate(expression: &str) -> ExpressionResult {
    evaluate_checked(expression).map_err(|e| {
        debug!("rejected {:?}: {}", expression, e);
        e
    })
}

fn evaluate_checked(expression: &str) -> ExpressionResult {
    if let Some(token) = find_blacklisted(expression) {
        return Err(EvalError::blacklisted(token));
    }

    let tree = parse(expression)?;
    let value = evaluate_expr(&tree)?;
    if !value.is_finite() {
        return Err(EvalError::evaluation("result is not a finite number"));
    }
    Ok(round6(value))
}

/// Evaluate an already parsed tree without rounding.
pub fn evaluate_expr(expr: &Expr) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Constant { value, .. } => Ok(*value),
        Expr::Unresolved(name) => Err(EvalError::evaluation(format!(
            "name '{}' is not defined",
            name
        ))),
        Expr::Unary { op, operand } => {
            let value = evaluate_expr(operand)?;
            Ok(match op {
                UnaryOp::Neg => -value,
                UnaryOp::Pos => value,
            })
        }
        Expr::Binary { op, left, right } => {
            let left = evaluate_expr(left)?;
            let right = evaluate_expr(right)?;
            let value = match op {
                BinaryOp::Add => numeric::add(&[left, right]),
                BinaryOp::Sub => numeric::subtract(left, right),
                BinaryOp::Mul => numeric::multiply(&[left, right]),
                BinaryOp::Div => numeric::divide(left, right),
                BinaryOp::FloorDiv => numeric::floor_divide(left, right),
                BinaryOp::Mod => numeric::modulus(left, right),
                BinaryOp::Pow => numeric::power(left, right),
            }?;
            Ok(value)
        }
        Expr::Call { function, args } => {
            let values = args
                .iter()
                .map(evaluate_expr)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(function.call(&values)?)
        }
    }
}
