//! The closed set of names an expression may refer to.

use crate::error::MathError;
use crate::numeric;

pub type NumericFn = fn(&[f64]) -> Result<f64, MathError>;

#[derive(Debug, Clone, Copy)]
pub struct Function {
    pub name: &'static str,
    pub min_args: usize,
    pub max_args: usize,
    apply: NumericFn,
}

impl Function {
    /// Caller guarantees `accepts(args.len())`.
    pub fn call(&self, args: &[f64]) -> Result<f64, MathError> {
        (self.apply)(args)
    }

    pub fn accepts(&self, argc: usize) -> bool {
        (self.min_args..=self.max_args).contains(&argc)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Symbol {
    Function(Function),
    Constant(f64),
}

fn sin(args: &[f64]) -> Result<f64, MathError> {
    numeric::sin(args[0])
}

fn cos(args: &[f64]) -> Result<f64, MathError> {
    numeric::cos(args[0])
}

fn tan(args: &[f64]) -> Result<f64, MathError> {
    numeric::tan(args[0])
}

fn log(args: &[f64]) -> Result<f64, MathError> {
    match *args {
        [x, base] => numeric::log(x, base),
        _ => numeric::ln(args[0]),
    }
}

fn log10(args: &[f64]) -> Result<f64, MathError> {
    numeric::log10(args[0])
}

fn sqrt(args: &[f64]) -> Result<f64, MathError> {
    numeric::sqrt(args[0])
}

fn abs(args: &[f64]) -> Result<f64, MathError> {
    numeric::abs(args[0])
}

const fn unary(name: &'static str, apply: NumericFn) -> (&'static str, Symbol) {
    (
        name,
        Symbol::Function(Function {
            name,
            min_args: 1,
            max_args: 1,
            apply,
        }),
    )
}

static SYMBOLS: [(&str, Symbol); 9] = [
    unary("sin", sin),
    unary("cos", cos),
    unary("tan", tan),
    (
        "log",
        Symbol::Function(Function {
            name: "log",
            min_args: 1,
            max_args: 2,
            apply: log,
        }),
    ),
    unary("log10", log10),
    unary("sqrt", sqrt),
    unary("abs", abs),
    ("pi", Symbol::Constant(std::f64::consts::PI)),
    ("e", Symbol::Constant(std::f64::consts::E)),
];

/// Read-only view of the fixed symbol table.
pub struct SymbolTable;

impl SymbolTable {
    pub fn lookup(name: &str) -> Option<&'static Symbol> {
        SYMBOLS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, symbol)| symbol)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        SYMBOLS.iter().map(|(name, _)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_resolve() {
        for name in ["sin", "cos", "tan", "log", "log10", "sqrt", "abs", "pi", "e"] {
            assert!(SymbolTable::lookup(name).is_some(), "{} should resolve", name);
        }
        assert_eq!(SymbolTable::names().count(), 9);
    }

    #[test]
    fn test_unknown_names_do_not_resolve() {
        for name in ["exp", "print", "open", "Sin", "PI", "factorial", ""] {
            assert!(SymbolTable::lookup(name).is_none(), "{} should not resolve", name);
        }
    }

    #[test]
    fn test_log_arity() {
        match SymbolTable::lookup("log") {
            Some(Symbol::Function(log)) => {
                assert!(log.accepts(1));
                assert!(log.accepts(2));
                assert!(!log.accepts(0));
                assert!(!log.accepts(3));
                assert_eq!(log.call(&[1.0]).unwrap(), 0.0);
            }
            other => panic!("Expected log function, got {:?}", other),
        }
    }

    #[test]
    fn test_constants() {
        assert!(matches!(
            SymbolTable::lookup("pi"),
            Some(Symbol::Constant(v)) if *v == std::f64::consts::PI
        ));
    }
}
