//! Everything downstream of the parsed class tree.

pub mod descriptor;
pub mod dts;
pub mod json;
pub mod numerals;
