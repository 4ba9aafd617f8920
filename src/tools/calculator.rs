//! calculate tool - evaluate simple arithmetic expressions

use async_trait::async_trait;
use serde_json::Value;

use super::{Tool, ToolArguments, ToolError, required_str};

const ALLOWED_CHARS: &str = "0123456789+-*/(). ";

/// Nesting allowed for unary signs and parentheses combined
const MAX_DEPTH: usize = 256;

pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &'static str {
        "calculate"
    }

    fn description(&self) -> &'static str {
        "Evaluates a simple mathematical expression involving numbers and basic operators (+, -, *, /). Example: '15 * (4 + 3)'"
    }

    fn parameters(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "expression": {
                    "type": "string",
                    "description": "The mathematical expression to evaluate."
                }
            },
            "required": ["expression"]
        })
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<String, ToolError> {
        let expression = required_str(arguments, "expression")?;

        if !expression.chars().all(|c| ALLOWED_CHARS.contains(c)) {
            return Ok("Error: Expression contains invalid characters.".to_string());
        }

        match evaluate(expression) {
            Ok(value) => Ok(format!("The result of '{}' is: {}", expression, format_number(value))),
            Err(reason) => Ok(format!("Error evaluating expression: {}", reason)),
        }
    }
}

/// Evaluate `+ - * /` with parentheses, unary signs and decimals
pub fn evaluate(expression: &str) -> Result<f64, String> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expression()?;
    match parser.peek() {
        None => Ok(value),
        Some(token) => Err(format!("unexpected {}", token)),
    }
}

/// Integral values print without a fractional part
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' => {
                chars.next();
            }
            '+' | '-' | '*' | '/' | '(' | ')' => {
                chars.next();
                tokens.push(match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '(' => Token::LParen,
                    _ => Token::RParen,
                });
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let number = literal
                    .parse::<f64>()
                    .map_err(|_| format!("invalid number '{}'", literal))?;
                tokens.push(Token::Number(number));
            }
            other => return Err(format!("unexpected character '{}'", other)),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.factor()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            value = if op == Token::Star {
                value * rhs
            } else {
                if rhs == 0.0 {
                    return Err("division by zero".to_string());
                }
                value / rhs
            };
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, String> {
        if self.depth >= MAX_DEPTH {
            return Err("expression is nested too deeply".to_string());
        }
        self.depth += 1;
        let value = self.unary();
        self.depth -= 1;
        value
    }

    // factor := ('+' | '-') factor | number | '(' expression ')'
    fn unary(&mut self) -> Result<f64, String> {
        match self.next() {
            Some(Token::Minus) => Ok(-self.factor()?),
            Some(Token::Plus) => self.factor(),
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expression()?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err("missing closing parenthesis".to_string()),
                }
            }
            Some(token) => Err(format!("unexpected {}", token)),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}
