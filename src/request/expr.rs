//! Arithmetic over known constants, for range bounds like `pi/4`.
//!
//! Grammar:
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := power (('*' | '/') power)*
//! power   := unary ('^' power)?
//! unary   := ('+' | '-') unary | primary
//! primary := number | 'pi' | 'e' | '(' expr ')'
//! ```

use crate::util::{Error, Result};

/// Evaluate a bound expression.
pub fn eval(input: &str) -> Result<f64> {
    let mut p = Parser { src: input, bytes: input.as_bytes(), pos: 0 };
    let value = p.expr()?;
    p.skip_ws();
    if p.pos != p.bytes.len() {
        return Err(p.error(format!("unexpected '{}'", &input[p.pos..])));
    }
    if !value.is_finite() {
        return Err(p.error("expression is not finite"));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, reason: impl Into<String>) -> Error {
        Error::parse(self.src, reason)
    }

    fn skip_ws(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.bytes.get(self.pos).copied()
    }

    fn expr(&mut self) -> Result<f64> {
        let mut acc = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            acc = if op == b'+' { acc + rhs } else { acc - rhs };
        }
        Ok(acc)
    }

    fn term(&mut self) -> Result<f64> {
        let mut acc = self.power()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.power()?;
            acc = if op == b'*' { acc * rhs } else { acc / rhs };
        }
        Ok(acc)
    }

    fn power(&mut self) -> Result<f64> {
        let base = self.unary()?;
        if self.peek() == Some(b'^') {
            self.pos += 1;
            let exp = self.power()?;
            return Ok(base.powf(exp));
        }
        Ok(base)
    }

    fn unary(&mut self) -> Result<f64> {
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(b'+') => {
                self.pos += 1;
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64> {
        match self.peek() {
            Some(b'(') => {
                self.pos += 1;
                let v = self.expr()?;
                if self.peek() != Some(b')') {
                    return Err(self.error("missing ')'"));
                }
                self.pos += 1;
                Ok(v)
            }
            Some(c) if c.is_ascii_digit() || c == b'.' => self.number(),
            Some(c) if c.is_ascii_alphabetic() => {
                let start = self.pos;
                while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_alphanumeric() {
                    self.pos += 1;
                }
                match &self.src[start..self.pos] {
                    "pi" | "PI" | "Pi" => Ok(std::f64::consts::PI),
                    "e" => Ok(std::f64::consts::E),
                    other => Err(self.error(format!("unknown constant '{other}'"))),
                }
            }
            Some(c) => Err(self.error(format!("unexpected '{}'", c as char))),
            None => Err(self.error("unexpected end of expression")),
        }
    }

    fn number(&mut self) -> Result<f64> {
        let start = self.pos;
        let digits = |p: &mut Self| {
            while p.bytes.get(p.pos).is_some_and(|b| b.is_ascii_digit() || *b == b'.') {
                p.pos += 1;
            }
        };
        digits(self);
        // exponent only when followed by digits, so `2e` stays an error
        if matches!(self.bytes.get(self.pos), Some(b'e' | b'E')) {
            let mut look = self.pos + 1;
            if matches!(self.bytes.get(look), Some(b'+' | b'-')) {
                look += 1;
            }
            if self.bytes.get(look).is_some_and(u8::is_ascii_digit) {
                self.pos = look;
                digits(self);
            }
        }
        self.src[start..self.pos]
            .parse::<f64>()
            .map_err(|_| self.error(format!("bad number '{}'", &self.src[start..self.pos])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_numbers() {
        assert_eq!(eval("0").unwrap(), 0.0);
        assert_eq!(eval(" 2.5 ").unwrap(), 2.5);
        assert_eq!(eval("1e-3").unwrap(), 1e-3);
        assert_eq!(eval("-4").unwrap(), -4.0);
        assert_eq!(eval(".5").unwrap(), 0.5);
    }

    #[test]
    fn test_constants() {
        assert_eq!(eval("pi/4").unwrap(), PI / 4.0);
        assert_eq!(eval("2*pi").unwrap(), 2.0 * PI);
        assert_eq!(eval("-pi").unwrap(), -PI);
        assert!((eval("e").unwrap() - std::f64::consts::E).abs() < 1e-15);
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("1+2*3").unwrap(), 7.0);
        assert_eq!(eval("(1+2)*3").unwrap(), 9.0);
        assert_eq!(eval("2^3^2").unwrap(), 512.0);
        assert_eq!(eval("10-4-3").unwrap(), 3.0);
        assert_eq!(eval("-2^2").unwrap(), 4.0);
    }

    #[test]
    fn test_errors() {
        assert!(eval("").is_err());
        assert!(eval("1+").is_err());
        assert!(eval("(1").is_err());
        assert!(eval("tau").is_err());
        assert!(eval("2e").is_err());
        assert!(eval("1/0").is_err());
        assert!(eval("1 2").is_err());
    }
}
