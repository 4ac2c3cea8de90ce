pub mod commands;
pub mod config;
pub mod error;
pub mod eval;
pub mod format;
pub mod history;
pub mod lexer;
pub mod numeric;
pub mod parser;
pub mod repl;
pub mod session;
pub mod symbols;
pub mod utils;

pub use error::{CalcError, CalcResult, EvalError, ExpressionResult, MathError, RejectionKind};
pub use eval::evaluate;
pub use history::History;
pub use repl::ReplEngine;
pub use session::Session;

/// scicalc version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file name inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_public_evaluate() {
        assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
        assert_eq!(
            evaluate("import math").map_err(|e| e.kind()),
            Err(RejectionKind::BlacklistedToken)
        );
    }
}
