//! Turns Python source text into a [`SyntaxTree`] via tree-sitter.
//!
//! This is where the "formatting is invisible" contract lives: delimiters,
//! comments and quote tokens never make it into a node's field list, so the
//! comparator only ever sees structure.

use crate::artifacts::syntax::{Scalar, SyntaxNode, SyntaxTree, Value};
use thiserror::Error;
use tree_sitter::{Node, Parser};

/// Node kinds that are pure formatting and never reach the comparator.
const IGNORED_KINDS: [&str; 2] = ["comment", "string_end"];

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid syntax at line {line}")]
    InvalidSyntax { line: usize },
    #[error("failed to load the python grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("the parser produced no tree")]
    NoTree,
}

/// Parse one file into a syntax tree, failing on any syntax error rather than
/// returning a partial tree.
pub fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_python::language())?;

    let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(ParseError::InvalidSyntax {
            line: first_error_line(root),
        });
    }

    Ok(SyntaxTree {
        root: convert(root, source.as_bytes()),
    })
}

fn first_error_line(root: Node) -> usize {
    let mut cursor = root.walk();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return node.start_position().row + 1;
        }
        // Pushed in reverse so the pop order walks children left to right
        // and the earliest offending node is the one reported.
        let erroring: Vec<Node> = node
            .children(&mut cursor)
            .filter(|child| child.has_error())
            .collect();
        stack.extend(erroring.into_iter().rev());
    }
    root.start_position().row + 1
}

fn convert(node: Node, source: &[u8]) -> SyntaxNode {
    let line = node.start_position().row + 1;
    let mut fields: Vec<(String, Value)> = Vec::new();

    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            let slot = cursor.field_name();
            collect_child(&mut fields, child, slot, source);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    // A named leaf carries its token as a typed scalar. The root of an empty
    // file is a childless module, not a token, so it stays field-free.
    if fields.is_empty() && node.child_count() == 0 && node.parent().is_some() {
        fields.push(("value".to_string(), Value::Scalar(leaf_scalar(node, source))));
    }

    SyntaxNode::new(node.kind().to_string(), line, fields)
}

fn collect_child(
    fields: &mut Vec<(String, Value)>,
    child: Node,
    slot: Option<&str>,
    source: &[u8],
) {
    let kind = child.kind();
    if IGNORED_KINDS.contains(&kind) {
        return;
    }

    // Quote tokens are cosmetic, but the prefix letters of a string literal
    // (b"...", r"...") are not: they change how its content is read.
    if kind == "string_start" {
        let prefix: String = text(child, source)
            .chars()
            .filter(|c| !matches!(c, '\'' | '"'))
            .collect::<String>()
            .to_ascii_lowercase();
        if !prefix.is_empty() {
            push_field(fields, "prefix", Value::Scalar(Scalar::Str(prefix)));
        }
        return;
    }

    if child.is_named() {
        push_field(
            fields,
            slot.unwrap_or(""),
            Value::Node(convert(child, source)),
        );
    } else if slot.is_some() || is_structural_token(kind) {
        // Anonymous tokens are kept when the grammar gives them a slot (the
        // operator of a binary_operator) and when the token itself carries
        // meaning: keywords distinguish `async def` from `def` and `yield
        // from` from `yield`, and the `:` tokens of a slice are what encode
        // which operand is the lower bound, the upper bound or the step.
        push_field(
            fields,
            slot.unwrap_or(""),
            Value::Scalar(Scalar::Str(text(child, source))),
        );
    }
}

/// Slotless anonymous tokens that are structure rather than punctuation:
/// keywords, plus the `:` separators that give slice operands their position.
/// Pure delimiters (commas, brackets, parentheses) stay invisible.
fn is_structural_token(kind: &str) -> bool {
    kind == ":" || (!kind.is_empty() && kind.chars().all(|c| c.is_ascii_alphabetic()))
}

/// Append a child value under `name`, keeping the grammar's child order.
/// Slotless children accumulate into one ordered sequence per run; a slot
/// name repeated on consecutive children is promoted to a sequence.
fn push_field(fields: &mut Vec<(String, Value)>, name: &str, value: Value) {
    if let Some((last_name, last_value)) = fields.last_mut() {
        if last_name == name {
            let previous = std::mem::replace(last_value, Value::Absent);
            *last_value = match previous {
                Value::Sequence(mut items) => {
                    items.push(value);
                    Value::Sequence(items)
                }
                single => Value::Sequence(vec![single, value]),
            };
            return;
        }
    }

    let value = if name.is_empty() {
        Value::Sequence(vec![value])
    } else {
        value
    };
    fields.push((name.to_string(), value));
}

fn leaf_scalar(node: Node, source: &[u8]) -> Scalar {
    let raw = text(node, source);
    match node.kind() {
        "integer" => parse_int(&raw).map_or(Scalar::Str(raw), Scalar::Int),
        "float" => raw
            .replace('_', "")
            .parse::<f64>()
            .map_or(Scalar::Str(raw), Scalar::Float),
        "true" => Scalar::Bool(true),
        "false" => Scalar::Bool(false),
        "none" => Scalar::None,
        _ => Scalar::Str(raw),
    }
}

/// Normalize digit separators and radix prefixes so `1_000`, `1000` and
/// `0x3e8` all carry the same value. Literals outside the i64 range fall
/// back to their raw text.
fn parse_int(raw: &str) -> Option<i64> {
    let digits = raw.replace('_', "").to_ascii_lowercase();
    if let Some(hex) = digits.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(octal) = digits.strip_prefix("0o") {
        i64::from_str_radix(octal, 8).ok()
    } else if let Some(binary) = digits.strip_prefix("0b") {
        i64::from_str_radix(binary, 2).ok()
    } else {
        digits.parse().ok()
    }
}

fn text(node: Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or_default().to_string()
}
