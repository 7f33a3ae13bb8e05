//! The single user-facing command: check that the Python files changed
//! between two snapshots are AST-equivalent.

pub mod check;
