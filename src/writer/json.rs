//! JSON interchange for the parsed class tree.
//!
//! Dumps use a four-space indent so they diff cleanly against dumps
//! written by earlier tooling.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::model::ClassRecord;

pub fn to_pretty_json(class: &ClassRecord) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    class
        .serialize(&mut ser)
        .context("serializing class tree")?;
    String::from_utf8(buf).context("serialized class tree is not UTF-8")
}

pub fn from_json(json: &str) -> Result<ClassRecord> {
    serde_json::from_str(json).context("parsing class tree JSON")
}
