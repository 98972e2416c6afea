//! Maps JVM type descriptors onto declaration types.
//!
//! Only the leading character is looked at; object references are not
//! followed and array element types are ignored.

use std::fmt;

const STRING_DESCRIPTOR: &str = "Ljava/lang/String;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsType {
    Number,
    String,
    Boolean,
    Void,
    Any,
    AnyArray,
}

impl fmt::Display for TsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TsType::Number => "number",
            TsType::String => "string",
            TsType::Boolean => "boolean",
            TsType::Void => "void",
            TsType::Any => "any",
            TsType::AnyArray => "any[]",
        })
    }
}

pub fn resolve_descriptor(descriptor: &str) -> TsType {
    match descriptor.chars().next() {
        Some('B' | 'D' | 'F' | 'I' | 'J' | 'S') => TsType::Number,
        Some('C') => TsType::String,
        Some('Z') => TsType::Boolean,
        Some('V') => TsType::Void,
        Some('L') if descriptor == STRING_DESCRIPTOR => TsType::String,
        Some('[') => TsType::AnyArray,
        _ => TsType::Any,
    }
}
