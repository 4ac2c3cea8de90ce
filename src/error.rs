use thiserror::Error;

pub type CalcResult<T> = Result<T, CalcError>;

/// Outcome of evaluating one expression string.
pub type ExpressionResult = Result<f64, EvalError>;

/// Coarse classification of a rejected expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    BlacklistedToken,
    ParseError,
    EvaluationError,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Blacklisted token: `{token}`")]
    BlacklistedToken { token: String },

    #[error("Parse error at offset {offset}: {message}")]
    Parse { message: String, offset: usize },

    #[error("Evaluation error: {message}")]
    Evaluation { message: String },
}

impl EvalError {
    pub fn blacklisted<S: Into<String>>(token: S) -> Self {
        Self::BlacklistedToken {
            token: token.into(),
        }
    }

    pub fn parse<S: Into<String>>(message: S, offset: usize) -> Self {
        Self::Parse {
            message: message.into(),
            offset,
        }
    }

    pub fn evaluation<S: Into<String>>(message: S) -> Self {
        Self::Evaluation {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> RejectionKind {
        match self {
            EvalError::BlacklistedToken { .. } => RejectionKind::BlacklistedToken,
            EvalError::Parse { .. } => RejectionKind::ParseError,
            EvalError::Evaluation { .. } => RejectionKind::EvaluationError,
        }
    }
}

// Domain faults raised inside the evaluator surface as evaluation errors.
impl From<MathError> for EvalError {
    fn from(err: MathError) -> Self {
        EvalError::evaluation(err.to_string())
    }
}

/// Failures of the numeric primitives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid operand: {message}")]
    InvalidOperand { message: String },

    #[error("{operation} by zero")]
    DivisionByZero { operation: String },

    #[error("Math domain error: {message}")]
    Domain { message: String },
}

impl MathError {
    pub fn invalid_operand<S: Into<String>>(message: S) -> Self {
        Self::InvalidOperand {
            message: message.into(),
        }
    }

    pub fn division_by_zero<S: Into<String>>(operation: S) -> Self {
        Self::DivisionByZero {
            operation: operation.into(),
        }
    }

    pub fn domain<S: Into<String>>(message: S) -> Self {
        Self::Domain {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("REPL error: {message}")]
    Repl { message: String },

    #[error("Invalid expression: {0}")]
    Expression(#[from] EvalError),

    #[error("{0}")]
    Math(#[from] MathError),

    #[error("Unknown menu choice: {choice}")]
    UnknownChoice { choice: String },
}

impl CalcError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn repl<S: Into<String>>(message: S) -> Self {
        Self::Repl {
            message: message.into(),
        }
    }

    pub fn unknown_choice<S: Into<String>>(choice: S) -> Self {
        Self::UnknownChoice {
            choice: choice.into(),
        }
    }

    /// Returns true if the user can simply try again
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CalcError::Expression(_) | CalcError::Math(_) | CalcError::UnknownChoice { .. }
        )
    }
}
