//! Closed-form expressions of one variable.
//!
//! Curves in figure documents are written as text (`"x^2 - 4x + 3"`, `"sin(5x)/x"`) and evaluated
//! per sample. The grammar, loosest binding first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/')? unary)*      // juxtaposition multiplies: 2x, 3(x+1)
//! unary   := '-' unary | power
//! power   := primary (('^' | '**') unary)?    // right associative, -x^2 == -(x^2)
//! primary := number | constant | variable | function '(' sum ')' | '(' sum ')'
//! ```

use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExprError {
    #[error("empty expression")]
    Empty,
    #[error("invalid character at offset {offset}")]
    InvalidCharacter { offset: usize },
    #[error("unexpected {found:?} at offset {offset}")]
    UnexpectedToken { offset: usize, found: String },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unknown identifier {name:?}")]
    UnknownIdentifier { name: String },
    #[error("unknown function {name:?}")]
    UnknownFunction { name: String },
    #[error("expression mixes variables {first:?} and {second:?}")]
    MixedVariables { first: String, second: String },
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    #[regex(r"\.[0-9]+")]
    Number,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    #[token("π")]
    #[token("θ")]
    Ident,
    #[token("+")]
    Plus,
    #[token("-")]
    #[token("−")]
    Minus,
    #[token("*")]
    #[token("·")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    #[token("**")]
    Caret,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log2,
    Log10,
    Sqrt,
    Cbrt,
    Abs,
    Sign,
    Floor,
    Ceil,
    Rad,
    Deg,
}

impl Func {
    fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" | "arcsin" => Self::Asin,
            "acos" | "arccos" => Self::Acos,
            "atan" | "arctan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "ln" | "log" => Self::Ln,
            "log2" => Self::Log2,
            "log10" => Self::Log10,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "abs" => Self::Abs,
            "sign" => Self::Sign,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "rad" | "radians" => Self::Rad,
            "deg" | "degrees" => Self::Deg,
            _ => return None,
        })
    }

    fn apply(self, v: f64) -> f64 {
        match self {
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Asin => v.asin(),
            Self::Acos => v.acos(),
            Self::Atan => v.atan(),
            Self::Sinh => v.sinh(),
            Self::Cosh => v.cosh(),
            Self::Tanh => v.tanh(),
            Self::Exp => v.exp(),
            Self::Ln => v.ln(),
            Self::Log2 => v.log2(),
            Self::Log10 => v.log10(),
            Self::Sqrt => v.sqrt(),
            Self::Cbrt => v.cbrt(),
            Self::Abs => v.abs(),
            Self::Sign => {
                if v == 0.0 || v.is_nan() {
                    v
                } else {
                    v.signum()
                }
            }
            Self::Floor => v.floor(),
            Self::Ceil => v.ceil(),
            Self::Rad => v.to_radians(),
            Self::Deg => v.to_degrees(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Num(f64),
    Var,
    Neg(Box<Node>),
    Bin(BinOp, Box<Node>, Box<Node>),
    Call(Func, Box<Node>),
}

impl Node {
    fn eval(&self, v: f64) -> f64 {
        match self {
            Node::Num(n) => *n,
            Node::Var => v,
            Node::Neg(a) => -a.eval(v),
            Node::Bin(op, a, b) => {
                let (a, b) = (a.eval(v), b.eval(v));
                match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => a / b,
                    BinOp::Pow => pow(a, b),
                }
            }
            Node::Call(f, a) => f.apply(a.eval(v)),
        }
    }
}

fn pow(base: f64, exp: f64) -> f64 {
    if exp.fract() == 0.0 && exp.abs() <= i32::MAX as f64 {
        base.powi(exp as i32)
    } else {
        base.powf(exp)
    }
}

/// A parsed expression in at most one free variable (`x`, `t` or `theta`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Expr {
    source: String,
    variable: Option<String>,
    root: Node,
}

impl Expr {
    pub fn parse(source: &str) -> Result<Self, ExprError> {
        let tokens = lex(source)?;
        if tokens.is_empty() {
            return Err(ExprError::Empty);
        }
        let mut parser = Parser {
            tokens: &tokens,
            pos: 0,
            variable: None,
        };
        let root = parser.sum()?;
        if let Some(tok) = parser.peek() {
            return Err(ExprError::UnexpectedToken {
                offset: tok.offset,
                found: tok.text.to_string(),
            });
        }
        Ok(Self {
            source: source.trim().to_string(),
            variable: parser.variable,
            root,
        })
    }

    pub fn eval(&self, v: f64) -> f64 {
        self.root.eval(v)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The free variable name, or `None` for constant expressions.
    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl std::str::FromStr for Expr {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Expr {
    type Error = ExprError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Expr> for String {
    fn from(value: Expr) -> Self {
        value.source
    }
}

#[derive(Debug, Clone, Copy)]
struct Lexeme<'a> {
    token: Token,
    text: &'a str,
    offset: usize,
}

fn lex(source: &str) -> Result<Vec<Lexeme<'_>>, ExprError> {
    let mut out = Vec::new();
    let mut lexer = Token::lexer(source);
    while let Some(tok) = lexer.next() {
        let span = lexer.span();
        let Ok(token) = tok else {
            return Err(ExprError::InvalidCharacter { offset: span.start });
        };
        out.push(Lexeme {
            token,
            text: lexer.slice(),
            offset: span.start,
        });
    }
    Ok(out)
}

struct Parser<'t, 'a> {
    tokens: &'t [Lexeme<'a>],
    pos: usize,
    variable: Option<String>,
}

impl<'a> Parser<'_, 'a> {
    fn peek(&self) -> Option<Lexeme<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Result<Lexeme<'a>, ExprError> {
        let tok = self.peek().ok_or(ExprError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(tok)
    }

    fn eat(&mut self, token: Token) -> bool {
        if self.peek().is_some_and(|t| t.token == token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token) -> Result<(), ExprError> {
        let tok = self.bump()?;
        if tok.token != token {
            return Err(ExprError::UnexpectedToken {
                offset: tok.offset,
                found: tok.text.to_string(),
            });
        }
        Ok(())
    }

    fn sum(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.product()?;
        loop {
            let op = if self.eat(Token::Plus) {
                BinOp::Add
            } else if self.eat(Token::Minus) {
                BinOp::Sub
            } else {
                break;
            };
            let rhs = self.product()?;
            lhs = Node::Bin(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn product(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek().map(|t| t.token) {
                Some(Token::Star) => {
                    self.pos += 1;
                    BinOp::Mul
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    BinOp::Div
                }
                Some(Token::Number | Token::Ident | Token::LParen) => BinOp::Mul,
                _ => break,
            };
            let rhs = self.unary()?;
            lhs = Node::Bin(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Node, ExprError> {
        if self.eat(Token::Minus) {
            return Ok(Node::Neg(Box::new(self.unary()?)));
        }
        if self.eat(Token::Plus) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Node, ExprError> {
        let base = self.primary()?;
        if self.eat(Token::Caret) {
            let exp = self.unary()?;
            return Ok(Node::Bin(BinOp::Pow, Box::new(base), Box::new(exp)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ExprError> {
        let tok = self.bump()?;
        match tok.token {
            Token::Number => {
                let n = tok
                    .text
                    .parse::<f64>()
                    .map_err(|_| ExprError::UnexpectedToken {
                        offset: tok.offset,
                        found: tok.text.to_string(),
                    })?;
                Ok(Node::Num(n))
            }
            Token::LParen => {
                let inner = self.sum()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Ident => {
                if self.eat(Token::LParen) {
                    let func = Func::lookup(tok.text).ok_or_else(|| ExprError::UnknownFunction {
                        name: tok.text.to_string(),
                    })?;
                    let arg = self.sum()?;
                    self.expect(Token::RParen)?;
                    return Ok(Node::Call(func, Box::new(arg)));
                }
                self.identifier(tok.text)
            }
            _ => Err(ExprError::UnexpectedToken {
                offset: tok.offset,
                found: tok.text.to_string(),
            }),
        }
    }

    fn identifier(&mut self, name: &str) -> Result<Node, ExprError> {
        match name {
            "pi" | "π" => return Ok(Node::Num(std::f64::consts::PI)),
            "tau" => return Ok(Node::Num(std::f64::consts::TAU)),
            "e" => return Ok(Node::Num(std::f64::consts::E)),
            _ => {}
        }
        let canonical = match name {
            "x" => "x",
            "t" => "t",
            "theta" | "θ" => "theta",
            _ => {
                return Err(ExprError::UnknownIdentifier {
                    name: name.to_string(),
                });
            }
        };
        match self.variable.as_deref() {
            Some(prev) if prev != canonical => Err(ExprError::MixedVariables {
                first: prev.to_string(),
                second: canonical.to_string(),
            }),
            Some(_) => Ok(Node::Var),
            None => {
                self.variable = Some(canonical.to_string());
                Ok(Node::Var)
            }
        }
    }
}
