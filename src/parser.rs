//! Recursive-descent parser over the closed calculator grammar.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '//' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('**' unary)?
//! primary := NUMBER | IDENT | IDENT '(' args ')' | '(' expr ')'
//! args    := expr (',' expr)*
//! ```
//!
//! Identifiers are resolved against [`SymbolTable`] while parsing, so the
//! resulting tree can only reference whitelisted functions and constants.

use crate::error::EvalError;
use crate::lexer::{tokenize, Token, TokenKind};
use crate::symbols::{Function, Symbol, SymbolTable};

/// Maximum nesting of parentheses, calls and unary operators.
pub const MAX_DEPTH: usize = 256;

/// Maximum number of binary operators in one expression. Together with
/// [`MAX_DEPTH`] this bounds the height of the tree, which evaluation and
/// drop both walk recursively.
pub const MAX_OPERATORS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Number(f64),
    Constant {
        name: &'static str,
        value: f64,
    },
    /// A bare identifier that is not in the symbol table. Evaluating it fails.
    Unresolved(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

pub fn parse(source: &str) -> Result<Expr, EvalError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        operators: 0,
    };
    let expr = parser.parse_expr()?;
    let trailing = parser.peek();
    if trailing.kind != TokenKind::Eof {
        return Err(EvalError::parse("unexpected trailing input", trailing.offset));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    operators: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // tokenize() always terminates the stream with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, EvalError> {
        let token = self.advance();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(EvalError::parse(format!("expected {}", what), token.offset))
        }
    }

    fn enter(&mut self, offset: usize) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::parse("expression is nested too deeply", offset));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // Consume a binary operator token, counting it against MAX_OPERATORS.
    fn operator(&mut self) -> Result<(), EvalError> {
        let token = self.advance();
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(EvalError::parse(
                format!("expression has more than {} operators", MAX_OPERATORS),
                token.offset,
            ));
        }
        Ok(())
    }

    fn parse_expr(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.operator()?;
            let right = self.parse_term()?;
            left = binary(op, left, right);
        }
    }

    fn parse_term(&mut self) -> Result<Expr, EvalError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::DoubleSlash => BinaryOp::FloorDiv,
                TokenKind::Percent => BinaryOp::Mod,
                _ => return Ok(left),
            };
            self.operator()?;
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        let op = match self.peek().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Pos,
            _ => return self.parse_power(),
        };
        let token = self.advance();
        self.enter(token.offset)?;
        let operand = self.parse_unary()?;
        self.leave();
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_power(&mut self) -> Result<Expr, EvalError> {
        let base = self.parse_primary()?;
        if self.peek().kind != TokenKind::DoubleStar {
            return Ok(base);
        }
        let offset = self.peek().offset;
        self.operator()?;
        // right-associative; the exponent may carry its own sign
        self.enter(offset)?;
        let exponent = self.parse_unary()?;
        self.leave();
        Ok(binary(BinaryOp::Pow, base, exponent))
    }

    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Number(value)),
            TokenKind::LParen => {
                self.enter(token.offset)?;
                let inner = self.parse_expr()?;
                self.leave();
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Ident(name) => self.parse_identifier(name, token.offset),
            TokenKind::Eof => Err(EvalError::parse("unexpected end of expression", token.offset)),
            _ => Err(EvalError::parse("expected a number, name or '('", token.offset)),
        }
    }

    fn parse_identifier(&mut self, name: String, offset: usize) -> Result<Expr, EvalError> {
        let is_call = self.peek().kind == TokenKind::LParen;
        match (SymbolTable::lookup(&name), is_call) {
            (Some(Symbol::Function(function)), true) => {
                let open = self.advance();
                self.enter(open.offset)?;
                let args = self.parse_args()?;
                self.leave();
                if !function.accepts(args.len()) {
                    return Err(EvalError::parse(
                        arity_message(function, args.len()),
                        offset,
                    ));
                }
                Ok(Expr::Call {
                    function: *function,
                    args,
                })
            }
            (Some(Symbol::Function(function)), false) => Err(EvalError::parse(
                format!("function '{}' must be called with parentheses", function.name),
                offset,
            )),
            (Some(Symbol::Constant(value)), false) => Ok(Expr::Constant {
                name: constant_name(&name),
                value: *value,
            }),
            (Some(Symbol::Constant(_)), true) => Err(EvalError::parse(
                format!("constant '{}' is not callable", name),
                offset,
            )),
            (None, true) => Err(EvalError::parse(format!("unknown function '{}'", name), offset)),
            (None, false) => Ok(Expr::Unresolved(name)),
        }
    }

    // Called with the opening parenthesis already consumed.
    fn parse_args(&mut self) -> Result<Vec<Expr>, EvalError> {
        let mut args = Vec::new();
        if self.peek().kind == TokenKind::RParen {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            let token = self.advance();
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::RParen => return Ok(args),
                _ => return Err(EvalError::parse("expected ',' or ')'", token.offset)),
            }
        }
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn arity_message(function: &Function, argc: usize) -> String {
    if function.min_args == function.max_args {
        format!(
            "{}() takes exactly {} argument(s) ({} given)",
            function.name, function.min_args, argc
        )
    } else {
        format!(
            "{}() takes {} to {} arguments ({} given)",
            function.name, function.min_args, function.max_args, argc
        )
    }
}

fn constant_name(name: &str) -> &'static str {
    SymbolTable::names()
        .find(|candidate| *candidate == name)
        .unwrap_or("constant")
}
