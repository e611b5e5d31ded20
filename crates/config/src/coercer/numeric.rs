//! Integer and float coercion.
//!
//! Text is parsed leniently from its leading numeric prefix: surrounding
//! whitespace is skipped, single underscores between digits are ignored, and
//! parsing stops at the first character that cannot continue the number.
//! Text with no numeric prefix becomes zero.

use super::Coercer;
use crate::value::{ConfigValue, ValueType};

/// Coerces values into signed 64-bit integers.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntegerCoercer;

impl Coercer for IntegerCoercer {
    fn name(&self) -> &str {
        "Integer"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Integer
    }

    fn coerce(&self, value: Option<ConfigValue>) -> Option<ConfigValue> {
        let n = match value {
            Some(ConfigValue::Integer(n)) => n,
            // `as` truncates toward zero and saturates out-of-range floats.
            Some(ConfigValue::Float(f)) => f as i64,
            Some(ConfigValue::VerifyMode(mode)) => mode.value(),
            Some(ConfigValue::String(s)) => parse_integer_prefix(&s),
            _ => 0,
        };
        Some(ConfigValue::Integer(n))
    }
}

/// Coerces values into 64-bit floats.
#[derive(Debug, Default, Clone, Copy)]
pub struct FloatCoercer;

impl Coercer for FloatCoercer {
    fn name(&self) -> &str {
        "Float"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Float
    }

    fn coerce(&self, value: Option<ConfigValue>) -> Option<ConfigValue> {
        let f = match value {
            Some(ConfigValue::Float(f)) => f,
            Some(ConfigValue::Integer(n)) => n as f64,
            Some(ConfigValue::VerifyMode(mode)) => mode.value() as f64,
            Some(ConfigValue::String(s)) => parse_float_prefix(&s),
            _ => 0.0,
        };
        Some(ConfigValue::Float(f))
    }
}

/// Consume a run of digits where single underscores may separate digits.
/// Returns the digits without underscores and the number of bytes consumed.
fn scan_digits(bytes: &[u8]) -> (String, usize) {
    let mut digits = String::new();
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b if b.is_ascii_digit() => {
                digits.push(b as char);
                pos += 1;
            }
            b'_' if !digits.is_empty()
                && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit) =>
            {
                pos += 1;
            }
            _ => break,
        }
    }

    (digits, pos)
}

/// Skip leading whitespace and an optional sign. Returns the remaining bytes
/// and whether the number is negative.
fn split_sign(text: &str) -> (&[u8], bool) {
    let bytes = text.trim_start().as_bytes();
    match bytes.first() {
        Some(b'-') => (&bytes[1..], true),
        Some(b'+') => (&bytes[1..], false),
        _ => (bytes, false),
    }
}

pub(crate) fn parse_integer_prefix(text: &str) -> i64 {
    let (rest, negative) = split_sign(text);
    let (digits, _) = scan_digits(rest);

    let magnitude = digits.bytes().try_fold(0i64, |acc, b| {
        acc.checked_mul(10)?.checked_sub(i64::from(b - b'0'))
    });

    // Accumulate negatively so i64::MIN is representable; saturate on overflow.
    match (magnitude, negative) {
        (Some(n), true) => n,
        (Some(n), false) => n.checked_neg().unwrap_or(i64::MAX),
        (None, true) => i64::MIN,
        (None, false) => i64::MAX,
    }
}

pub(crate) fn parse_float_prefix(text: &str) -> f64 {
    let (rest, negative) = split_sign(text);

    let (integral, mut pos) = scan_digits(rest);
    let mut literal = if integral.is_empty() {
        "0".to_string()
    } else {
        integral.clone()
    };

    let mut fraction = String::new();
    if rest.get(pos) == Some(&b'.') {
        let (digits, consumed) = scan_digits(&rest[pos + 1..]);
        if !digits.is_empty() {
            fraction = digits;
            pos += 1 + consumed;
        }
    }

    if integral.is_empty() && fraction.is_empty() {
        return 0.0;
    }
    if !fraction.is_empty() {
        literal.push('.');
        literal.push_str(&fraction);
    }

    if let Some(b'e' | b'E') = rest.get(pos) {
        let exponent = &rest[pos + 1..];
        let (exp_negative, exp_body) = match exponent.first() {
            Some(b'-') => (true, &exponent[1..]),
            Some(b'+') => (false, &exponent[1..]),
            _ => (false, exponent),
        };
        let (exp_digits, _) = scan_digits(exp_body);
        if !exp_digits.is_empty() {
            literal.push('e');
            if exp_negative {
                literal.push('-');
            }
            literal.push_str(&exp_digits);
        }
    }

    let magnitude = literal.parse::<f64>().unwrap_or(0.0);
    if negative { -magnitude } else { magnitude }
}
