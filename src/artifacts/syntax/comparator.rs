//! Structural equivalence over syntax trees.
//!
//! A pure, pre-order, short-circuiting walk: no I/O, no memoization, no cycle
//! detection (loader trees are finite and acyclic). A `false` result is the
//! normal "found a difference" outcome, not a failure.

use crate::artifacts::syntax::{SyntaxNode, Value};
use derive_new::new;
use std::fmt;

/// The first structural difference between two trees, with the nearest
/// enclosing source line on each side.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Mismatch {
    pub left_line: usize,
    pub right_line: usize,
    pub left: String,
    pub right: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "different nodes at lines left:{}, and right:{}\n{} != {}",
            self.left_line, self.right_line, self.left, self.right
        )
    }
}

/// Decide structural equivalence between two field values.
///
/// Rules: both absent is equivalent, one-sided absence is not; scalars match
/// by exact value; sequences match pairwise in order (reordering is a
/// difference); nodes match when kind, field names and field values all
/// match; any shape disagreement is a difference.
pub fn equivalent(a: &Value, b: &Value) -> bool {
    check(a, b, 0, 0).is_ok()
}

/// Same decision procedure as [`equivalent`], applied to two roots, but
/// reporting the first difference for diagnostics. `None` means equivalent.
pub fn explain(a: &SyntaxNode, b: &SyntaxNode) -> Option<Mismatch> {
    check_nodes(a, b).err()
}

fn check(a: &Value, b: &Value, left_line: usize, right_line: usize) -> Result<(), Mismatch> {
    match (a, b) {
        (Value::Absent, Value::Absent) => Ok(()),
        (Value::Scalar(left), Value::Scalar(right)) if left == right => Ok(()),
        (Value::Sequence(left), Value::Sequence(right)) if left.len() == right.len() => left
            .iter()
            .zip(right)
            .try_for_each(|(left, right)| check(left, right, left_line, right_line)),
        (Value::Node(left), Value::Node(right)) => check_nodes(left, right),
        _ => Err(Mismatch::new(
            left_line,
            right_line,
            a.describe(),
            b.describe(),
        )),
    }
}

fn check_nodes(a: &SyntaxNode, b: &SyntaxNode) -> Result<(), Mismatch> {
    if a.kind != b.kind || a.fields.len() != b.fields.len() {
        return Err(Mismatch::new(
            a.line,
            b.line,
            describe_node(a),
            describe_node(b),
        ));
    }

    for ((left_name, left_value), (right_name, right_value)) in a.fields.iter().zip(&b.fields) {
        if left_name != right_name {
            return Err(Mismatch::new(
                a.line,
                b.line,
                format!("field {left_name:?}"),
                format!("field {right_name:?}"),
            ));
        }
        check(left_value, right_value, a.line, b.line)?;
    }

    Ok(())
}

fn describe_node(node: &SyntaxNode) -> String {
    let names: Vec<&str> = node
        .fields
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    format!("{}({})", node.kind, names.join(", "))
}
