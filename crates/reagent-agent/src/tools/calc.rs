//! Calculator tool — a small recursive-descent arithmetic evaluator.
//!
//! Expressions are tokenized and parsed directly; nothing is ever handed to
//! an interpreter, so input like `__import__('os')` is just a parse error.
//!
//! Grammar (highest binding last):
//!
//! ```text
//! expr   := term   (('+' | '-') term)*
//! term   := factor (('*' | '/' | '%') factor)*
//! factor := '-' factor | power
//! power  := atom ('^' factor)?          (right-associative)
//! atom   := NUMBER | IDENT '(' args ')' | '(' expr ')'
//! args   := expr (',' expr)*
//! ```

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use super::base::{require_string, Tool};

// ─────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────

/// Everything that can go wrong while evaluating an expression.
#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("Unexpected character '{0}' in expression")]
    UnexpectedChar(char),
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    #[error("Unexpected token '{0}'")]
    UnexpectedToken(String),
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),
    #[error("Function '{name}' expects {expected} argument(s), got {got}")]
    WrongArity {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("Function '{0}' requires at least one argument")]
    EmptyArgs(String),
    #[error("Division by zero")]
    DivisionByZero,
}

// ─────────────────────────────────────────────
// Tokenizer
// ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Ident(s) => write!(f, "{s}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Caret => write!(f, "^"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, CalcError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut lit = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        lit.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let n: f64 = lit.parse().map_err(|_| CalcError::InvalidNumber(lit))?;
                tokens.push(Token::Number(n));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                // Accept "**" as an alias for "^"
                if chars.peek() == Some(&'*') {
                    chars.next();
                    tokens.push(Token::Caret);
                } else {
                    tokens.push(Token::Star);
                }
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '%' => {
                chars.next();
                tokens.push(Token::Percent);
            }
            '^' => {
                chars.next();
                tokens.push(Token::Caret);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            c => return Err(CalcError::UnexpectedChar(c)),
        }
    }

    Ok(tokens)
}

// ─────────────────────────────────────────────
// Parser / evaluator
// ─────────────────────────────────────────────

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token) -> Result<(), CalcError> {
        match self.advance() {
            Some(ref tok) if tok == expected => Ok(()),
            Some(tok) => Err(CalcError::UnexpectedToken(tok.to_string())),
            None => Err(CalcError::UnexpectedEnd),
        }
    }

    fn parse(mut self) -> Result<f64, CalcError> {
        let value = self.expr()?;
        match self.advance() {
            None => Ok(value),
            Some(tok) => Err(CalcError::UnexpectedToken(tok.to_string())),
        }
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.factor()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    value *= self.factor()?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    let rhs = self.factor()?;
                    if rhs == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value /= rhs;
                }
                Some(Token::Percent) => {
                    self.advance();
                    let rhs = self.factor()?;
                    if rhs == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value %= rhs;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, CalcError> {
        if let Some(Token::Minus) = self.peek() {
            self.advance();
            return Ok(-self.factor()?);
        }
        self.power()
    }

    fn power(&mut self) -> Result<f64, CalcError> {
        let base = self.atom()?;
        if let Some(Token::Caret) = self.peek() {
            self.advance();
            let exp = self.factor()?;
            return Ok(base.powf(exp));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, CalcError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expr()?;
                self.expect(&Token::RParen)?;
                Ok(value)
            }
            Some(Token::Ident(name)) => {
                self.expect(&Token::LParen)?;
                let args = self.args()?;
                self.expect(&Token::RParen)?;
                apply_function(&name, &args)
            }
            Some(tok) => Err(CalcError::UnexpectedToken(tok.to_string())),
            None => Err(CalcError::UnexpectedEnd),
        }
    }

    fn args(&mut self) -> Result<Vec<f64>, CalcError> {
        let mut args = Vec::new();
        if let Some(Token::RParen) = self.peek() {
            return Ok(args);
        }
        args.push(self.expr()?);
        while let Some(Token::Comma) = self.peek() {
            self.advance();
            args.push(self.expr()?);
        }
        Ok(args)
    }
}

/// The function allow-list. Anything else is an `UnknownFunction` error.
fn apply_function(name: &str, args: &[f64]) -> Result<f64, CalcError> {
    let arity = |expected: usize| -> Result<(), CalcError> {
        if args.len() == expected {
            Ok(())
        } else {
            Err(CalcError::WrongArity {
                name: name.to_string(),
                expected,
                got: args.len(),
            })
        }
    };
    let nonempty = || -> Result<(), CalcError> {
        if args.is_empty() {
            Err(CalcError::EmptyArgs(name.to_string()))
        } else {
            Ok(())
        }
    };

    match name {
        "abs" => {
            arity(1)?;
            Ok(args[0].abs())
        }
        "round" => {
            arity(1)?;
            Ok(args[0].round())
        }
        "sqrt" => {
            arity(1)?;
            Ok(args[0].sqrt())
        }
        "pow" => {
            arity(2)?;
            Ok(args[0].powf(args[1]))
        }
        "min" => {
            nonempty()?;
            Ok(args.iter().copied().fold(f64::INFINITY, f64::min))
        }
        "max" => {
            nonempty()?;
            Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max))
        }
        "sum" => {
            nonempty()?;
            Ok(args.iter().sum())
        }
        _ => Err(CalcError::UnknownFunction(name.to_string())),
    }
}

/// Evaluate an arithmetic expression to a single number.
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(CalcError::UnexpectedEnd);
    }
    Parser::new(tokens).parse()
}

/// Render the result the way a calculator would: integers without a
/// trailing `.0`, everything else as-is.
fn format_result(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

// ─────────────────────────────────────────────
// CalculatorTool
// ─────────────────────────────────────────────

/// Evaluates arithmetic expressions with a dedicated parser.
pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "calculator"
    }

    fn description(&self) -> &str {
        "Evaluate an arithmetic expression. Supports + - * / % ^, parentheses, \
         and the functions abs, round, sqrt, pow, min, max, sum."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The arithmetic expression to evaluate, e.g. '2 * (3 + 4)'"
                }
            },
            "required": ["expression"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let expression = require_string(&params, "expression")?;
        let value = evaluate(&expression)?;
        Ok(format_result(value))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
