//! Emit ambient `declare class` blocks for a parsed class tree.

use std::fmt::Write;

use anyhow::{Context, Result, anyhow};

use crate::model::{ClassRecord, FieldRecord, MethodRecord, is_constructor};

use super::descriptor::{TsType, resolve_descriptor};
use super::numerals::spell_digits;

/// Appended to a method that shares its name with a field of the same class.
pub const METHOD_COLLISION_SUFFIX: &str = "_Method";

/// Assumed return descriptor when a method has no usable signature.
const VOID_DESCRIPTOR: &str = "V";

const MEMBER_INDENT: &str = "    ";

/// Declarations for `class` followed by all of its nested classes, pre-order.
pub fn generate_declarations(class: &ClassRecord) -> Result<String> {
    let mut out = String::new();
    emit_class(class, &mut out)?;
    Ok(out)
}

fn emit_class(class: &ClassRecord, out: &mut String) -> Result<()> {
    let obfuscated = class.obfuscated_name.as_deref().unwrap_or_default();
    let name = declared_class_name(class);

    doc_block(out, "", class.comment.as_deref(), obfuscated)?;
    writeln!(out, "declare class {name} {{")?;

    for field in &class.fields {
        emit_field(field, out).with_context(|| format!("in class `{name}`"))?;
    }
    for method in &class.methods {
        emit_method(class, method, out).with_context(|| format!("in class `{name}`"))?;
    }

    writeln!(out, "}}")?;

    for sub_class in &class.sub_classes {
        emit_class(sub_class, out)?;
    }
    Ok(())
}

/// Last path segment of the readable name. Without one, a numeric
/// obfuscated name is spelled out and any other obfuscated name is used
/// by its last segment.
fn declared_class_name(class: &ClassRecord) -> String {
    if let Some(readable) = non_empty(class.readable_name.as_deref()) {
        return last_segment(readable).to_string();
    }

    let obfuscated = class.obfuscated_name.as_deref().unwrap_or_default();
    match obfuscated.parse::<u64>() {
        Ok(number) => spell_digits(number),
        Err(_) => last_segment(obfuscated).to_string(),
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn emit_field(field: &FieldRecord, out: &mut String) -> Result<()> {
    doc_block(
        out,
        MEMBER_INDENT,
        field.comment.as_deref(),
        &field.obfuscated_name,
    )?;

    let (name, ty) = match field.type_descriptor.as_deref() {
        Some(descriptor) => (
            field.readable_name.as_deref().unwrap_or_default(),
            resolve_descriptor(descriptor),
        ),
        // Some mappings carry the descriptor in the name slot.
        None => {
            let readable = field.readable_name.as_deref().ok_or_else(|| {
                anyhow!(
                    "field `{}` has neither a type descriptor nor a readable name",
                    field.obfuscated_name
                )
            })?;
            (field.obfuscated_name.as_str(), resolve_descriptor(readable))
        }
    };

    writeln!(out, "{MEMBER_INDENT}{name}: {ty};")?;
    Ok(())
}

fn emit_method(class: &ClassRecord, method: &MethodRecord, out: &mut String) -> Result<()> {
    doc_block(
        out,
        MEMBER_INDENT,
        method.comment.as_deref(),
        &method.obfuscated_name,
    )?;

    let readable =
        non_empty(method.readable_name.as_deref()).unwrap_or(method.obfuscated_name.as_str());

    let params = parameters(method).join(", ");

    let mut name = readable.to_string();
    if class
        .fields
        .iter()
        .any(|field| field.readable_name.as_deref() == Some(readable))
    {
        name.push_str(METHOD_COLLISION_SUFFIX);
    }

    if is_constructor(&name) {
        writeln!(out, "{MEMBER_INDENT}constructor({params});")?;
    } else {
        let returns = return_type(method.signature.as_deref());
        writeln!(out, "{MEMBER_INDENT}{name}({params}): {returns};")?;
    }
    Ok(())
}

/// Parameter list in declaration order, with placeholders for skipped
/// positions. Every parameter is `any`.
fn parameters(method: &MethodRecord) -> Vec<String> {
    let mut params = Vec::with_capacity(method.args.len());
    let mut expected: u32 = 0;

    for arg in &method.args {
        let readable = non_empty(arg.readable_name.as_deref());
        match arg.position {
            Some(position) => {
                while expected < position {
                    params.push(format!("arg{expected}: any"));
                    expected += 1;
                }
                let name = readable.map_or_else(|| format!("arg{position}"), str::to_string);
                params.push(format!("{name}: any"));
                expected = position + 1;
            }
            None => {
                let name = readable.map_or_else(|| format!("arg{expected}"), str::to_string);
                params.push(format!("{name}: any"));
                expected += 1;
            }
        }
    }

    params
}

/// Resolve the part of a method signature after the first `)`.
fn return_type(signature: Option<&str>) -> TsType {
    let descriptor = signature
        .and_then(|sig| sig.split(')').nth(1))
        .unwrap_or(VOID_DESCRIPTOR);
    resolve_descriptor(descriptor)
}

fn doc_block(out: &mut String, indent: &str, comment: Option<&str>, obfuscated: &str) -> Result<()> {
    let comment = comment.unwrap_or_default();
    writeln!(out, "{indent}/**")?;
    writeln!(out, "{indent} * {comment}")?;
    writeln!(out, "{indent} * @obfuscated {obfuscated}")?;
    writeln!(out, "{indent} */")?;
    Ok(())
}

fn non_empty(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::ArgRecord;
    use crate::parser::parse_mappings;

    fn method_with_args(positions: &[(Option<u32>, Option<&str>)]) -> MethodRecord {
        MethodRecord {
            obfuscated_name: "m".into(),
            readable_name: Some("run".into()),
            signature: Some("()V".into()),
            args: positions
                .iter()
                .map(|(position, name)| ArgRecord {
                    position: *position,
                    readable_name: name.map(str::to_string),
                    comment: None,
                })
                .collect(),
            comment: None,
        }
    }

    #[test]
    fn test_field_declaration() {
        let root = parse_mappings("CLASS a1 com/example/Foo\n\tFIELD f1 bar I\n");
        let out = generate_declarations(&root).unwrap();

        let expected = [
            "/**",
            " * ",
            " * @obfuscated a1",
            " */",
            "declare class Foo {",
            "    /**",
            "     * ",
            "     * @obfuscated f1",
            "     */",
            "    bar: number;",
            "}",
            "",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_class_comment_and_sub_classes() {
        let src = "\
CLASS a net/minecraft/Outer
\tCOMMENT The outer class.
\tCLASS b Inner
\tCLASS 12
";
        let out = generate_declarations(&parse_mappings(src)).unwrap();

        let expected = [
            "/**",
            " * The outer class. ",
            " * @obfuscated a",
            " */",
            "declare class Outer {",
            "}",
            "/**",
            " * ",
            " * @obfuscated b",
            " */",
            "declare class Inner {",
            "}",
            "/**",
            " * ",
            " * @obfuscated 12",
            " */",
            "declare class OneTwo {",
            "}",
            "",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_parameter_backfill() {
        let test_cases = vec![
            (vec![(Some(0), Some("a")), (Some(2), Some("c"))], "a: any, arg1: any, c: any"),
            (vec![(Some(1), Some("x"))], "arg0: any, x: any"),
            (vec![(Some(2), None)], "arg0: any, arg1: any, arg2: any"),
            (
                vec![(Some(3), Some("c")), (Some(1), Some("a")), (Some(5), Some("e"))],
                "arg0: any, arg1: any, arg2: any, c: any, a: any, arg2: any, arg3: any, arg4: any, e: any",
            ),
            (vec![(None, Some("a")), (None, None)], "a: any, arg1: any"),
            (vec![], ""),
        ];

        for (args, expected) in test_cases {
            let method = method_with_args(&args);
            assert_eq!(parameters(&method).join(", "), expected, "args: {args:?}");
        }
    }

    #[test]
    fn test_return_types() {
        let test_cases = vec![
            (Some("(I)Z"), TsType::Boolean),
            (Some("()Ljava/lang/String;"), TsType::String),
            (Some("(II)[I"), TsType::AnyArray),
            (Some("(I)"), TsType::Any),
            (Some("garbage"), TsType::Void),
            (None, TsType::Void),
        ];

        for (signature, expected) in test_cases {
            assert_eq!(return_type(signature), expected, "signature: {signature:?}");
        }
    }

    #[test]
    fn test_method_name_collision() {
        let src = "\
CLASS a Holder
\tFIELD f value I
\tMETHOD m value ()I
\tMETHOD n other ()V
";
        let out = generate_declarations(&parse_mappings(src)).unwrap();
        assert!(out.contains("    value: number;\n"), "{out}");
        assert!(out.contains("    value_Method(): number;\n"), "{out}");
        assert!(out.contains("    other(): void;\n"), "{out}");
    }

    #[test]
    fn test_constructor() {
        let src = "CLASS a Point\n\tMETHOD <init> (II)V\n\t\tARG 1 x\n\t\tARG 2 y\n";
        let root = parse_mappings(src);
        let out = generate_declarations(&root).unwrap();
        assert!(
            out.contains("    constructor(arg0: any, x: any, y: any);\n"),
            "{out}"
        );
        assert!(!out.contains("<init>("), "{out}");
    }

    #[test]
    fn test_field_without_type_uses_name_as_descriptor() {
        let root = parse_mappings("CLASS a Foo\n\tFIELD f1 Z\n");
        let out = generate_declarations(&root).unwrap();
        assert!(out.contains("    f1: boolean;\n"), "{out}");
    }

    #[test]
    fn test_unnamed_class_names() {
        let test_cases = vec![
            (ClassRecord::named("12", None), "OneTwo"),
            (ClassRecord::named("class_5678", None), "class_5678"),
            (ClassRecord::named("net/minecraft/class_5678", None), "class_5678"),
            (ClassRecord::named("a", Some("")), "a"),
        ];

        for (class, expected) in test_cases {
            assert_eq!(declared_class_name(&class), expected);
        }
    }

    #[test]
    fn test_unnamed_nested_class_and_method_still_generate() {
        let src = "CLASS a net/minecraft/Outer\n\tCLASS class_5678\n\t\tMETHOD m named ()V\n\tMETHOD m1\n";
        let out = generate_declarations(&parse_mappings(src)).unwrap();
        assert!(out.contains("declare class class_5678 {\n"), "{out}");
        assert!(out.contains("    named(): void;\n"), "{out}");
        assert!(out.contains("    m1(): void;\n"), "{out}");
    }

    #[test]
    fn test_field_without_type_or_name_fails() {
        let err = generate_declarations(&parse_mappings("CLASS a Foo\n\tFIELD f1\n")).unwrap_err();
        assert!(
            format!("{err:#}")
                .contains("field `f1` has neither a type descriptor nor a readable name"),
            "got: {err:#}"
        );
    }
}
