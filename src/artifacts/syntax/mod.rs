//! The syntax tree the comparator walks.
//!
//! The loader strips everything cosmetic (whitespace, comments, quote style)
//! while building these values, so equivalence over them is equivalence of
//! program structure. Source positions are carried on [`SyntaxNode::line`]
//! for diagnostics only; the type deliberately has no `PartialEq` so nothing
//! can compare nodes without going through the comparator.

use derive_new::new;
use std::fmt;

pub mod comparator;
pub mod loader;

/// A leaf value held by a node field. Equality is exact: no numeric coercion
/// and no case folding, so `Str("1")` never matches `Int(1)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(text) => write!(f, "{text:?}"),
            Scalar::Int(number) => write!(f, "{number}"),
            Scalar::Float(number) => write!(f, "{number}"),
            Scalar::Bool(true) => write!(f, "True"),
            Scalar::Bool(false) => write!(f, "False"),
            Scalar::None => write!(f, "None"),
        }
    }
}

/// Everything a node field can hold, as one tagged union so the comparator
/// never needs runtime shape inspection.
#[derive(Debug, Clone)]
pub enum Value {
    /// No node or field exists here. Distinct from a node with no fields.
    Absent,
    Scalar(Scalar),
    Node(SyntaxNode),
    Sequence(Vec<Value>),
}

impl Value {
    /// Short one-line rendering used in mismatch reports.
    pub fn describe(&self) -> String {
        match self {
            Value::Absent => "absent".to_string(),
            Value::Scalar(scalar) => scalar.to_string(),
            Value::Node(node) => node.kind.clone(),
            Value::Sequence(items) => format!("sequence of {}", items.len()),
        }
    }
}

/// One syntactic construct: a kind tag plus an ordered field list.
///
/// `fields` holds only semantically significant children, in the grammar's
/// child order for that kind, so iterating it is deterministic. `line` is the
/// 1-based source row and must never take part in equivalence.
#[derive(Debug, Clone, new)]
pub struct SyntaxNode {
    pub kind: String,
    pub line: usize,
    pub fields: Vec<(String, Value)>,
}

/// A parsed file: one root node, produced per file-per-revision, compared
/// once and dropped.
#[derive(Debug)]
pub struct SyntaxTree {
    pub root: SyntaxNode,
}
