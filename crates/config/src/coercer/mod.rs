//! Type coercion for resolved values.
//!
//! Responsibilities:
//! - Define the `Coercer` trait every type converter implements.
//! - Assemble the default coercer chain.
//! - Dispatch a value to the coercer whose tag matches the requested type.
//!
//! Does NOT handle:
//! - Enum validation (see `resolver`).
//!
//! Invariants:
//! - Coercers never fail outward. Unparsable input becomes a type-specific
//!   fallback (`0`, `false`, `""`) or `None`, with a warning where noted.
//! - An unknown type tag leaves the value unchanged and logs a warning.

mod boolean;
mod numeric;
mod ssl;
mod text;

pub use boolean::BooleanCoercer;
pub use numeric::{FloatCoercer, IntegerCoercer};
pub use ssl::{SslCertificateCoercer, SslKeyCoercer, SslVerifyModeCoercer};
pub use text::{StringCoercer, SymbolCoercer};

use crate::value::{ConfigValue, ValueType};

/// Converts an untyped value into a specific type.
pub trait Coercer: Send + Sync {
    /// Display name used in diagnostics.
    fn name(&self) -> &str;

    /// Tag this coercer answers to.
    fn value_type(&self) -> ValueType;

    fn coerce(&self, value: Option<ConfigValue>) -> Option<ConfigValue>;
}

/// The default coercer chain, one per built-in `ValueType`.
pub fn default_coercers() -> Vec<Box<dyn Coercer>> {
    vec![
        Box::new(BooleanCoercer),
        Box::new(FloatCoercer),
        Box::new(IntegerCoercer),
        Box::new(SslCertificateCoercer),
        Box::new(SslKeyCoercer),
        Box::new(SslVerifyModeCoercer),
        Box::new(StringCoercer),
        Box::new(SymbolCoercer),
    ]
}

/// Coerce `value` into `value_type` using the first matching coercer.
///
/// With no type the value is returned unchanged, as is an absent value when
/// `coerce_nil` is false.
pub fn coerce_value(
    coercers: &[Box<dyn Coercer>],
    value: Option<ConfigValue>,
    value_type: Option<&ValueType>,
    coerce_nil: bool,
) -> Option<ConfigValue> {
    let Some(value_type) = value_type else {
        return value;
    };

    if !coerce_nil && value.is_none() {
        return value;
    }

    match coercers.iter().find(|c| c.value_type() == *value_type) {
        Some(coercer) => {
            tracing::trace!(coercer = coercer.name(), %value_type, "Coercing configuration value");
            coercer.coerce(value)
        }
        None => {
            tracing::warn!("Could not find valid coercion type for {value_type}");
            value
        }
    }
}
