use crate::error::{CalcError, CalcResult, MathError};
use crate::format::{format_float, Computation, Value};
use crate::numeric::{self, round6};
use crate::utils::{exact_operands, parse_integer, parse_number, split_operands};
use log::debug;
use std::collections::BTreeMap;

pub type OperationFn = Box<dyn Fn(&str) -> CalcResult<Computation> + Send + Sync>;

/// Which operation catalog a menu choice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    Basic,
    Scientific,
}

pub struct OperationRegistry {
    title: String,
    footer: Option<String>,
    operations: BTreeMap<u8, OperationInfo>,
}

pub struct OperationInfo {
    pub code: u8,
    pub name: String,
    pub prompt: String,
    pub handler: OperationFn,
}

impl OperationRegistry {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self {
            title: title.into(),
            footer: None,
            operations: BTreeMap::new(),
        }
    }

    pub fn for_catalog(catalog: Catalog) -> Self {
        match catalog {
            Catalog::Basic => Self::basic(),
            Catalog::Scientific => Self::scientific(),
        }
    }

    pub fn basic() -> Self {
        let mut registry = Self::new("BASIC OPERATIONS");
        registry.register_basic_operations();
        registry
    }

    pub fn scientific() -> Self {
        let mut registry = Self::new("SCIENTIFIC OPERATIONS");
        registry.footer = Some("Note: Trigonometric functions use radians".to_string());
        registry.register_scientific_operations();
        registry
    }

    pub fn register(&mut self, info: OperationInfo) {
        self.operations.insert(info.code, info);
    }

    pub fn has_operation(&self, code: u8) -> bool {
        self.operations.contains_key(&code)
    }

    pub fn get(&self, code: u8) -> Option<&OperationInfo> {
        self.operations.get(&code)
    }

    pub fn execute(&self, code: u8, input: &str) -> CalcResult<Computation> {
        let info = self
            .operations
            .get(&code)
            .ok_or_else(|| CalcError::unknown_choice(code.to_string()))?;
        debug!("{}: {:?}", info.name, input);
        (info.handler)(input)
    }

    /// Operations in menu order
    pub fn list_operations(&self) -> impl Iterator<Item = &OperationInfo> {
        self.operations.values()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn menu_text(&self) -> String {
        let mut text = format!("--- {} ---\n", self.title);
        for info in self.list_operations() {
            text.push_str(&format!("{}. {}\n", info.code, info.name));
        }
        text.push_str("0. Back to Main Menu\n");
        if let Some(footer) = &self.footer {
            text.push_str(footer);
            text.push('\n');
        }
        text
    }

    fn add(&mut self, code: u8, name: &str, prompt: &str, handler: OperationFn) {
        self.register(OperationInfo {
            code,
            name: name.to_string(),
            prompt: prompt.to_string(),
            handler,
        });
    }

    fn register_basic_operations(&mut self) {
        const MANY: &str = "Enter numbers separated by space: ";
        const TWO: &str = "Enter two numbers: ";

        self.add(1, "Addition", MANY, variadic(" + ", numeric::add));
        self.add(2, "Subtraction", TWO, binary_raw(" - ", numeric::subtract));
        self.add(3, "Multiplication", MANY, variadic(" * ", numeric::multiply));
        self.add(4, "Division", TWO, binary_repr(" / ", numeric::divide));
        self.add(5, "Modulus", TWO, binary_repr(" % ", numeric::modulus));
        self.add(
            6,
            "Power",
            "Enter base and power: ",
            binary_raw(" ** ", numeric::power),
        );
    }

    fn register_scientific_operations(&mut self) {
        const ANY: &str = "Enter x: ";
        const POSITIVE: &str = "Enter x (>0): ";

        self.add(
            1,
            "Square Root (√x)",
            "Enter x (>=0): ",
            unary(|x| format!("sqrt({})", x), numeric::sqrt),
        );
        self.add(
            2,
            "Power (xʸ)",
            "Enter base and power: ",
            binary_raw(" ^ ", numeric::power),
        );
        self.add(
            3,
            "Natural Logarithm (ln x)",
            POSITIVE,
            unary(|x| format!("log({})", x), numeric::ln),
        );
        self.add(
            4,
            "Logarithm Base 10 (log₁₀ x)",
            POSITIVE,
            unary(|x| format!("log10({})", x), numeric::log10),
        );
        self.add(5, "Sine (sin x)", ANY, unary(|x| format!("sin({})", x), numeric::sin));
        self.add(6, "Cosine (cos x)", ANY, unary(|x| format!("cos({})", x), numeric::cos));
        self.add(7, "Tangent (tan x)", ANY, unary(|x| format!("tan({})", x), numeric::tan));
        self.add(
            8,
            "Factorial (x!)",
            "Enter integer x (>=0): ",
            Box::new(|input: &str| -> CalcResult<Computation> {
                let operand = exact_operands(input, 1)?;
                let n = parse_integer(operand[0])?;
                let value = Value::Integer(numeric::factorial(n)?);
                Ok(Computation::new(&format!("factorial({})", n), value))
            }),
        );
        self.add(
            9,
            "Absolute Value (|x|)",
            ANY,
            unary(|x| format!("abs({})", x), numeric::abs),
        );
        self.add(
            10,
            "Exponential (eˣ)",
            ANY,
            unary(|x| format!("e^{}", x), numeric::exp),
        );
    }
}

fn rounded(value: f64) -> Value {
    Value::Float(round6(value))
}

/// Any number of operands, recorded as typed and joined by `separator`.
fn variadic(separator: &'static str, op: fn(&[f64]) -> Result<f64, MathError>) -> OperationFn {
    Box::new(move |input: &str| -> CalcResult<Computation> {
        let tokens = split_operands(input);
        let values = tokens
            .iter()
            .map(|token| parse_number(token))
            .collect::<Result<Vec<_>, _>>()?;
        let value = op(&values)?;
        Ok(Computation::new(&tokens.join(separator), rounded(value)))
    })
}

/// Two operands, recorded as typed.
fn binary_raw(operator: &'static str, op: fn(f64, f64) -> Result<f64, MathError>) -> OperationFn {
    Box::new(move |input: &str| -> CalcResult<Computation> {
        let tokens = exact_operands(input, 2)?;
        let value = op(parse_number(tokens[0])?, parse_number(tokens[1])?)?;
        let label = format!("{}{}{}", tokens[0], operator, tokens[1]);
        Ok(Computation::new(&label, rounded(value)))
    })
}

/// Two operands, recorded in their parsed float form.
fn binary_repr(operator: &'static str, op: fn(f64, f64) -> Result<f64, MathError>) -> OperationFn {
    Box::new(move |input: &str| -> CalcResult<Computation> {
        let tokens = exact_operands(input, 2)?;
        let (a, b) = (parse_number(tokens[0])?, parse_number(tokens[1])?);
        let value = op(a, b)?;
        let label = format!("{}{}{}", format_float(a), operator, format_float(b));
        Ok(Computation::new(&label, rounded(value)))
    })
}

/// One operand; `label` receives the parsed float form.
fn unary(label: fn(&str) -> String, op: fn(f64) -> Result<f64, MathError>) -> OperationFn {
    Box::new(move |input: &str| -> CalcResult<Computation> {
        let tokens = exact_operands(input, 1)?;
        let x = parse_number(tokens[0])?;
        let value = op(x)?;
        Ok(Computation::new(&label(&format_float(x)), rounded(value)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(registry: &OperationRegistry, code: u8, input: &str) -> String {
        registry.execute(code, input).unwrap().record
    }

    #[test]
    fn test_operation_registry() {
        let basic = OperationRegistry::basic();
        assert!(basic.has_operation(1));
        assert!(basic.has_operation(6));
        assert!(!basic.has_operation(7));
        assert_eq!(basic.list_operations().count(), 6);

        let scientific = OperationRegistry::scientific();
        assert_eq!(scientific.list_operations().count(), 10);
        assert_eq!(scientific.get(8).map(|op| op.name.as_str()), Some("Factorial (x!)"));
    }

    #[test]
    fn test_menu_text() {
        let text = OperationRegistry::scientific().menu_text();
        assert!(text.starts_with("--- SCIENTIFIC OPERATIONS ---"));
        assert!(text.contains("10. Exponential (eˣ)"));
        assert!(text.contains("0. Back to Main Menu"));
        assert!(text.contains("radians"));
    }

    #[test]
    fn test_basic_records() {
        let basic = OperationRegistry::basic();
        assert_eq!(record(&basic, 1, "2 3"), "2 + 3 = 5.0");
        assert_eq!(record(&basic, 2, "10 4"), "10 - 4 = 6.0");
        assert_eq!(record(&basic, 3, "2 3 4"), "2 * 3 * 4 = 24.0");
        assert_eq!(record(&basic, 4, "1 3"), "1.0 / 3.0 = 0.333333");
        assert_eq!(record(&basic, 5, "-7 3"), "-7.0 % 3.0 = 2.0");
        assert_eq!(record(&basic, 6, "2 10"), "2 ** 10 = 1024.0");
    }

    #[test]
    fn test_scientific_records() {
        let scientific = OperationRegistry::scientific();
        assert_eq!(record(&scientific, 1, "16"), "sqrt(16.0) = 4.0");
        assert_eq!(record(&scientific, 2, "2 3"), "2 ^ 3 = 8.0");
        assert_eq!(record(&scientific, 3, "1"), "log(1.0) = 0.0");
        assert_eq!(record(&scientific, 4, "100"), "log10(100.0) = 2.0");
        assert_eq!(record(&scientific, 5, "0"), "sin(0.0) = 0.0");
        assert_eq!(record(&scientific, 6, "0"), "cos(0.0) = 1.0");
        assert_eq!(record(&scientific, 8, "5"), "factorial(5) = 120");
        assert_eq!(record(&scientific, 9, "-2.5"), "abs(-2.5) = 2.5");
        assert_eq!(record(&scientific, 10, "0"), "e^0.0 = 1.0");
    }

    #[test]
    fn test_failures() {
        let basic = OperationRegistry::basic();
        assert!(matches!(
            basic.execute(4, "5 0"),
            Err(CalcError::Math(MathError::DivisionByZero { .. }))
        ));
        assert!(matches!(
            basic.execute(5, "5 0"),
            Err(CalcError::Math(MathError::DivisionByZero { .. }))
        ));
        assert!(matches!(
            basic.execute(1, ""),
            Err(CalcError::Math(MathError::InvalidOperand { .. }))
        ));
        assert!(matches!(
            basic.execute(2, "1 two"),
            Err(CalcError::Math(MathError::InvalidOperand { .. }))
        ));
        assert!(matches!(basic.execute(9, "1"), Err(CalcError::UnknownChoice { .. })));

        let scientific = OperationRegistry::scientific();
        assert!(matches!(
            scientific.execute(1, "-4"),
            Err(CalcError::Math(MathError::Domain { .. }))
        ));
        assert!(matches!(
            scientific.execute(8, "-1"),
            Err(CalcError::Math(MathError::InvalidOperand { .. }))
        ));
        assert!(matches!(
            scientific.execute(8, "2.5"),
            Err(CalcError::Math(MathError::InvalidOperand { .. }))
        ));
    }
}
