//! Expression evaluator.
//!
//! An expression is one of, checked in this order:
//!
//! - **Postfix block** `$x 10 +$`: whitespace-separated tokens run through an
//!   operand stack. Numbers and constants push, `+ - min mod` pop two and push one.
//! - **Integer literal** `125`
//! - **Quoted text** `'value'` (quotes stripped)
//!
//! Evaluation is pure: the only input besides the expression is a shared borrow
//! of the constants declared so far.

use crate::constants::ConstantTable;
use crate::error::EvalError;
use crate::types::Scalar;

type EvalResult<T> = std::result::Result<T, EvalError>;

/// Resolve a raw expression to a scalar.
pub fn evaluate(expr: &str, constants: &ConstantTable) -> EvalResult<Scalar> {
    let expr = expr.trim();

    // a lone `$` opens and closes an empty block
    if expr == "$" {
        return evaluate_postfix("", constants);
    }
    if let Some(body) = expr.strip_prefix('$').and_then(|e| e.strip_suffix('$')) {
        return evaluate_postfix(body.trim(), constants);
    }
    if is_digits(expr) {
        return parse_integer(expr).map(Scalar::Integer);
    }
    if let Some(text) = expr.strip_prefix('\'').and_then(|e| e.strip_suffix('\'')) {
        return Ok(Scalar::Text(text.to_string()));
    }

    Err(EvalError::InvalidValue(expr.to_string()))
}

/// Binary postfix operators. `a` is the deeper stack slot, `b` the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Min,
    Mod,
}

impl Operator {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "min" => Some(Operator::Min),
            "mod" => Some(Operator::Mod),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Min => "min",
            Operator::Mod => "mod",
        }
    }

    /// Apply to two integers. `Mod` is floored: the result takes the sign of `b`.
    pub fn apply(self, a: i64, b: i64) -> EvalResult<i64> {
        let overflow = || EvalError::Overflow(format!("{a} {b} {}", self.symbol()));
        match self {
            Operator::Add => a.checked_add(b).ok_or_else(overflow),
            Operator::Sub => a.checked_sub(b).ok_or_else(overflow),
            Operator::Min => Ok(a.min(b)),
            Operator::Mod => {
                if b == 0 {
                    return Err(EvalError::DivisionByZero(format!("{a} {b} mod")));
                }
                // i64::MIN % -1 overflows; the floored result is 0 anyway
                let r = if b == -1 { 0 } else { a % b };
                if r != 0 && (r < 0) != (b < 0) {
                    Ok(r + b)
                } else {
                    Ok(r)
                }
            }
        }
    }

    fn apply_scalars(self, a: Scalar, b: Scalar) -> EvalResult<Scalar> {
        match (a, b) {
            (Scalar::Integer(a), Scalar::Integer(b)) => self.apply(a, b).map(Scalar::Integer),
            _ => Err(EvalError::TypeMismatch {
                operator: self.symbol().to_string(),
            }),
        }
    }
}

fn evaluate_postfix(body: &str, constants: &ConstantTable) -> EvalResult<Scalar> {
    let mut stack: Vec<Scalar> = Vec::new();

    for token in body.split_whitespace() {
        if is_digits(token) {
            stack.push(Scalar::Integer(parse_integer(token)?));
            continue;
        }
        // constants shadow operator names
        if let Some(value) = constants.get(token) {
            stack.push(value.clone());
            continue;
        }
        let op = Operator::from_token(token)
            .ok_or_else(|| EvalError::UnknownToken(token.to_string()))?;
        let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
            return Err(EvalError::InvalidExpression(body.to_string()));
        };
        stack.push(op.apply_scalars(a, b)?);
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(value), true) => Ok(value),
        _ => Err(EvalError::InvalidExpression(body.to_string())),
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_integer(digits: &str) -> EvalResult<i64> {
    digits
        .parse::<i64>()
        .map_err(|_| EvalError::Overflow(digits.to_string()))
}
