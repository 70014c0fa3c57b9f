//! Recursive-descent parser over rendered rules
//!
//! Input has already passed the arithmetic whitelist, so the grammar is tiny:
//! numeric literals, `+ - * /`, parentheses, unary minus, and one optional
//! comparison (`< > <= >= = !=`) at each nesting level. This is deliberately
//! not a general-purpose evaluator.

/// Result of evaluating a rendered rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
}

/// Evaluate a rendered rule string.
pub(crate) fn evaluate(input: &str) -> Result<Value, String> {
    let mut parser = Parser {
        input: input.as_bytes(),
        pos: 0,
    };
    let value = parser.comparison()?;
    parser.skip_spaces();
    if parser.pos < parser.input.len() {
        return Err(format!(
            "unexpected input at offset {}: {input}",
            parser.pos
        ));
    }
    Ok(value)
}

enum CompareOp {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.input.get(self.pos + 1).copied()
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    fn comparison(&mut self) -> Result<Value, String> {
        let left = self.additive()?;
        self.skip_spaces();
        let op = match (self.peek(), self.peek_next()) {
            (Some(b'<'), Some(b'=')) => {
                self.pos += 2;
                CompareOp::Le
            }
            (Some(b'>'), Some(b'=')) => {
                self.pos += 2;
                CompareOp::Ge
            }
            (Some(b'!'), Some(b'=')) => {
                self.pos += 2;
                CompareOp::Ne
            }
            (Some(b'<'), _) => {
                self.pos += 1;
                CompareOp::Lt
            }
            (Some(b'>'), _) => {
                self.pos += 1;
                CompareOp::Gt
            }
            (Some(b'='), _) => {
                self.pos += 1;
                if self.peek() == Some(b'=') {
                    self.pos += 1;
                }
                CompareOp::Eq
            }
            _ => return Ok(left),
        };
        let right = self.additive()?;
        let (l, r) = (to_number(left)?, to_number(right)?);
        Ok(Value::Bool(match op {
            CompareOp::Lt => l < r,
            CompareOp::Gt => l > r,
            CompareOp::Le => l <= r,
            CompareOp::Ge => l >= r,
            CompareOp::Eq => l == r,
            CompareOp::Ne => l != r,
        }))
    }

    fn additive(&mut self) -> Result<Value, String> {
        let mut left = self.term()?;
        loop {
            self.skip_spaces();
            let add = match self.peek() {
                Some(b'+') => true,
                Some(b'-') => false,
                _ => return Ok(left),
            };
            self.pos += 1;
            let l = to_number(left)?;
            let r = to_number(self.term()?)?;
            left = Value::Number(if add { l + r } else { l - r });
        }
    }

    fn term(&mut self) -> Result<Value, String> {
        let mut left = self.unary()?;
        loop {
            self.skip_spaces();
            let multiply = match self.peek() {
                Some(b'*') => true,
                Some(b'/') => false,
                _ => return Ok(left),
            };
            self.pos += 1;
            let l = to_number(left)?;
            let r = to_number(self.unary()?)?;
            // Division by zero follows float semantics (inf / NaN)
            left = Value::Number(if multiply { l * r } else { l / r });
        }
    }

    fn unary(&mut self) -> Result<Value, String> {
        self.skip_spaces();
        if self.peek() == Some(b'-') {
            self.pos += 1;
            let value = to_number(self.unary()?)?;
            return Ok(Value::Number(-value));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Value, String> {
        self.skip_spaces();
        if self.peek() == Some(b'(') {
            self.pos += 1;
            let value = self.comparison()?;
            self.skip_spaces();
            if self.peek() != Some(b')') {
                return Err(format!("missing closing parenthesis at offset {}", self.pos));
            }
            self.pos += 1;
            return Ok(value);
        }
        self.number()
    }

    fn number(&mut self) -> Result<Value, String> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9') | Some(b'.')) {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(format!("expected a number at offset {start}"));
        }
        let literal = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| format!("invalid literal at offset {start}"))?;
        literal
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| format!("invalid number literal: {literal}"))
    }
}

fn to_number(value: Value) -> Result<f64, String> {
    match value {
        Value::Number(n) => Ok(n),
        Value::Bool(_) => Err("expected a number, found a boolean".into()),
    }
}
