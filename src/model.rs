//! Records produced by the mapping parser and consumed by the writers.
//!
//! The tree is strictly owned: a class holds its fields, methods and nested
//! classes by value. It is also the JSON interchange format, so the serde
//! names follow camelCase and accept the key spellings of older dumps.

use serde::{Deserialize, Serialize};

/// Obfuscated and readable name of every initializer method.
pub const CONSTRUCTOR_MARKER: &str = "<init>";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    /// Absent only for the root of a file that never declared a `CLASS`.
    #[serde(default, alias = "obfuscated")]
    pub obfuscated_name: Option<String>,
    #[serde(default, alias = "yarn")]
    pub readable_name: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldRecord>,
    #[serde(default)]
    pub methods: Vec<MethodRecord>,
    #[serde(default)]
    pub sub_classes: Vec<ClassRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    #[serde(default, alias = "obfuscated")]
    pub obfuscated_name: String,
    #[serde(default, alias = "yarn")]
    pub readable_name: Option<String>,
    #[serde(default, alias = "type")]
    pub type_descriptor: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodRecord {
    #[serde(default, alias = "obfuscated")]
    pub obfuscated_name: String,
    #[serde(default, alias = "yarn")]
    pub readable_name: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    /// Declaration order, not sorted by position.
    #[serde(default)]
    pub args: Vec<ArgRecord>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgRecord {
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default, alias = "yarn")]
    pub readable_name: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl ClassRecord {
    /// A class opened by a `CLASS <obf> [<name>]` line.
    pub fn named(obfuscated: &str, readable: Option<&str>) -> Self {
        Self {
            obfuscated_name: Some(obfuscated.to_string()),
            readable_name: readable.map(str::to_string),
            ..Self::default()
        }
    }
}

/// Whether a method name denotes an initializer.
pub fn is_constructor(name: &str) -> bool {
    name == CONSTRUCTOR_MARKER
}

/// Append one comment line to a record's comment, starting it if needed.
///
/// Lines are never overwritten; each one is followed by a single space.
pub fn append_comment(slot: &mut Option<String>, text: &str) {
    let comment = slot.get_or_insert_with(String::new);
    comment.push_str(text);
    comment.push(' ');
}
