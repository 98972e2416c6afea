//! Parser for Yarn `.mapping` files.
//!
//! The format is one record per line, tokens separated by single spaces and
//! nesting expressed by leading tab characters:
//!
//! ```text
//! CLASS <obf> [<name>]
//! 	COMMENT <text...>
//! 	FIELD <obf> <name> <type>
//! 	METHOD <obf> <name> [<signature>]
//! 		COMMENT <text...>
//! 		ARG <position> <name>
//! 	CLASS <obf> [<name>]
//! ```
//!
//! Parsing is lenient: any line that does not match a known
//! `(depth, keyword)` pair is skipped, never rejected.

use tracing::trace;

use crate::model::{
    CONSTRUCTOR_MARKER, ArgRecord, ClassRecord, FieldRecord, MethodRecord, append_comment,
};

/// Where a field or method lives in the tree being built.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MemberSlot {
    class: Vec<usize>,
    index: usize,
}

/// Which record a depth-2 `COMMENT` line belongs to.
///
/// Set by the most recent depth-1 `CLASS`, `FIELD` or `METHOD` line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Context {
    #[default]
    Class,
    Field(MemberSlot),
    Method(MemberSlot),
}

/// Parse-time position in the tree. Rebuilt on every top-level `CLASS`.
#[derive(Debug, Default)]
struct Cursor {
    /// Indices through `sub_classes` from the root to the current class.
    open: Vec<usize>,
    /// Target of `ARG` lines.
    method: Option<MemberSlot>,
    context: Context,
}

/// One non-blank line split into its indentation, keyword and the rest.
#[derive(Debug, PartialEq)]
struct Line<'a> {
    depth: usize,
    keyword: &'a str,
    /// Everything after the keyword and its separating space.
    rest: &'a str,
}

impl<'a> Line<'a> {
    fn split(raw: &'a str) -> Option<Self> {
        let body = raw.trim_start_matches('\t');
        let depth = raw.len() - body.len();
        let (keyword, rest) = body.split_once(' ')?;
        Some(Self {
            depth,
            keyword,
            rest,
        })
    }

    fn tokens(&self) -> Vec<&'a str> {
        self.rest.split(' ').collect()
    }
}

/// Token `i`, treating a missing or empty token as absent.
fn token<'a>(tokens: &[&'a str], i: usize) -> Option<&'a str> {
    tokens.get(i).copied().filter(|t| !t.is_empty())
}

fn owned(token: Option<&str>) -> Option<String> {
    token.map(str::to_string)
}

fn class_at_mut<'t>(root: &'t mut ClassRecord, path: &[usize]) -> &'t mut ClassRecord {
    path.iter()
        .fold(root, |class, &index| &mut class.sub_classes[index])
}

fn field_at_mut<'t>(root: &'t mut ClassRecord, slot: &MemberSlot) -> &'t mut FieldRecord {
    &mut class_at_mut(root, &slot.class).fields[slot.index]
}

fn method_at_mut<'t>(root: &'t mut ClassRecord, slot: &MemberSlot) -> &'t mut MethodRecord {
    &mut class_at_mut(root, &slot.class).methods[slot.index]
}

/// Parse a whole mapping file into its root class.
///
/// The root is always the class opened by the last top-level `CLASS` line
/// (or a nameless class if there was none); nested classes are only
/// reachable through `sub_classes`.
pub fn parse_mappings(source: &str) -> ClassRecord {
    let mut root = ClassRecord::default();
    let mut cursor = Cursor::default();

    for (number, raw) in source.lines().enumerate() {
        let Some(line) = Line::split(raw) else {
            continue;
        };
        if !apply_line(&mut root, &mut cursor, &line) {
            trace!(line = number + 1, "skipping unrecognised mapping line");
        }
    }

    root
}

/// Apply one line to the tree. Returns `false` if the line was skipped.
fn apply_line(root: &mut ClassRecord, cursor: &mut Cursor, line: &Line) -> bool {
    let tokens = line.tokens();

    match (line.depth, line.keyword) {
        (0, "CLASS") => {
            let obfuscated = tokens[0];
            let readable = token(&tokens, 1).unwrap_or(obfuscated);
            *root = ClassRecord::named(obfuscated, Some(readable));
            *cursor = Cursor::default();
        }
        (1, "CLASS") => {
            open_nested_class(root, cursor, &tokens);
        }
        (1, "COMMENT") => {
            append_comment(&mut class_at_mut(root, &cursor.open).comment, line.rest);
        }
        (1, "FIELD") => {
            let slot = push_field(root, cursor, &tokens);
            cursor.context = Context::Field(slot);
        }
        (1, "METHOD") => {
            let slot = push_method(root, cursor, method_from_tokens(&tokens, true));
            cursor.method = Some(slot.clone());
            cursor.context = Context::Method(slot);
        }
        (2, "COMMENT") => {
            let comment = match &cursor.context {
                Context::Class => &mut class_at_mut(root, &cursor.open).comment,
                Context::Field(slot) => &mut field_at_mut(root, slot).comment,
                Context::Method(slot) => &mut method_at_mut(root, slot).comment,
            };
            append_comment(comment, line.rest);
        }
        (2, "FIELD") => {
            push_field(root, cursor, &tokens);
        }
        (2, "METHOD") => {
            let slot = push_method(root, cursor, method_from_tokens(&tokens, false));
            cursor.method = Some(slot);
        }
        (2 | 3, "ARG") => {
            let Some(slot) = &cursor.method else {
                return false;
            };
            method_at_mut(root, slot).args.push(ArgRecord {
                position: tokens[0].parse().ok(),
                readable_name: owned(token(&tokens, 1)),
                comment: None,
            });
        }
        _ => return false,
    }

    true
}

/// Open a class declared one tab deep under the root.
///
/// Any nested class still open is closed first, so siblings stay siblings.
fn open_nested_class(root: &mut ClassRecord, cursor: &mut Cursor, tokens: &[&str]) {
    cursor.open.clear();
    let parent = class_at_mut(root, &cursor.open);
    parent
        .sub_classes
        .push(ClassRecord::named(tokens[0], token(tokens, 1)));
    cursor.open.push(parent.sub_classes.len() - 1);
    cursor.context = Context::Class;
}

fn push_field(root: &mut ClassRecord, cursor: &Cursor, tokens: &[&str]) -> MemberSlot {
    let class = class_at_mut(root, &cursor.open);
    class.fields.push(FieldRecord {
        obfuscated_name: tokens[0].to_string(),
        readable_name: owned(token(tokens, 1)),
        type_descriptor: owned(token(tokens, 2)),
        comment: None,
    });
    MemberSlot {
        class: cursor.open.clone(),
        index: class.fields.len() - 1,
    }
}

fn push_method(root: &mut ClassRecord, cursor: &Cursor, method: MethodRecord) -> MemberSlot {
    let class = class_at_mut(root, &cursor.open);
    class.methods.push(method);
    MemberSlot {
        class: cursor.open.clone(),
        index: class.methods.len() - 1,
    }
}

/// Build a method from the tokens of a `METHOD` line.
///
/// Constructors carry no readable name: `METHOD <init> <signature>`.
/// With `shift_signature`, a readable name that looks like a signature means
/// the line omitted the readable name, so the obfuscated name stands in.
fn method_from_tokens(tokens: &[&str], shift_signature: bool) -> MethodRecord {
    if tokens[0] == CONSTRUCTOR_MARKER {
        return MethodRecord {
            obfuscated_name: CONSTRUCTOR_MARKER.to_string(),
            readable_name: Some(CONSTRUCTOR_MARKER.to_string()),
            signature: owned(token(tokens, 1)),
            ..MethodRecord::default()
        };
    }

    let obfuscated = tokens[0];
    let mut readable = token(tokens, 1);
    let mut signature = token(tokens, 2);
    if shift_signature && readable.is_some_and(|name| name.starts_with('(')) {
        signature = readable;
        readable = Some(obfuscated);
    }

    MethodRecord {
        obfuscated_name: obfuscated.to_string(),
        readable_name: owned(readable),
        signature: owned(signature),
        ..MethodRecord::default()
    }
}
