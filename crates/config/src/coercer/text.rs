use super::Coercer;
use crate::value::{ConfigValue, ValueType};

/// Coerces values into their string form. Absent becomes `""`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringCoercer;

impl Coercer for StringCoercer {
    fn name(&self) -> &str {
        "String"
    }

    fn value_type(&self) -> ValueType {
        ValueType::String
    }

    fn coerce(&self, value: Option<ConfigValue>) -> Option<ConfigValue> {
        let text = value.map(|v| v.to_plain_string()).unwrap_or_default();
        Some(ConfigValue::String(text))
    }
}

/// Coerces values into symbols. Absent stays absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymbolCoercer;

impl Coercer for SymbolCoercer {
    fn name(&self) -> &str {
        "Symbol"
    }

    fn value_type(&self) -> ValueType {
        ValueType::Symbol
    }

    fn coerce(&self, value: Option<ConfigValue>) -> Option<ConfigValue> {
        value.map(|v| match v {
            ConfigValue::Symbol(_) => v,
            other => ConfigValue::Symbol(other.to_plain_string()),
        })
    }
}
