use super::Coercer;
use crate::value::{ConfigValue, ValueType};

/// Coerces values into booleans.
///
/// Purely numeric strings are true when non-zero (`"5"`, `"-1"`); anything
/// else is true only if it equals `"true"` ignoring case. Absent is false.
#[derive(Debug, Default, Clone, Copy)]
pub struct BooleanCoercer;

impl Coercer for BooleanCoercer {
    fn name(&self) -> &str {
        "Boolean"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Boolean
    }

    fn coerce(&self, value: Option<ConfigValue>) -> Option<ConfigValue> {
        let result = match value {
            Some(ConfigValue::Boolean(b)) => b,
            Some(ConfigValue::Integer(n)) => n != 0,
            Some(ConfigValue::Symbol(s)) => s.eq_ignore_ascii_case("true"),
            Some(other) => text_to_bool(&other.to_plain_string()),
            None => false,
        };
        Some(ConfigValue::Boolean(result))
    }
}

fn text_to_bool(text: &str) -> bool {
    if is_canonical_integer(text) {
        return text != "0";
    }
    text.eq_ignore_ascii_case("true")
}

/// True for integers written the way they print: an optional `-` and digits
/// without leading zeros. `"05"`, `"+1"` and `"-0"` are not canonical.
/// Length is unbounded, so values past `i64` still count.
fn is_canonical_integer(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits == "0" {
        return digits.len() == text.len();
    }
    !digits.is_empty() && !digits.starts_with('0') && digits.bytes().all(|b| b.is_ascii_digit())
}
