//! Which two snapshots to diff, from the command line's zero, one or two
//! revision arguments.

use std::fmt;

/// Alias for `HEAD` accepted anywhere a revision is expected.
pub const HEAD_ALIAS: &str = "@";

/// Alias for the working tree, accepted only as the second revision.
pub const WORKING_TREE_ALIAS: &str = ".";

/// One side of the comparison: a committed revision or the working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    Revision(String),
    WorkingTree,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snapshot::Revision(revision) => write!(f, "{revision}"),
            Snapshot::WorkingTree => write!(f, "working tree"),
        }
    }
}

/// The resolved pair of snapshots to compare. The base is always a committed
/// revision; only the target may be the working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionPair {
    base: String,
    target: Snapshot,
}

impl RevisionPair {
    /// Selection rules, in order of argument count:
    /// none compares `HEAD` against the working tree; one argument `C`
    /// compares `C~1` against `C`; two arguments compare them directly, with
    /// `.` as the second meaning the working tree.
    pub fn from_args(commits: &[String]) -> anyhow::Result<Self> {
        match commits {
            [] => Ok(RevisionPair {
                base: "HEAD".to_string(),
                target: Snapshot::WorkingTree,
            }),
            [commit] => {
                if commit.as_str() == WORKING_TREE_ALIAS {
                    anyhow::bail!("'{WORKING_TREE_ALIAS}' needs an explicit base revision");
                }
                let commit = unalias(commit);
                Ok(RevisionPair {
                    base: format!("{commit}~1"),
                    target: Snapshot::Revision(commit),
                })
            }
            [base, target] => {
                if base.as_str() == WORKING_TREE_ALIAS {
                    anyhow::bail!("the working tree can only be the second revision");
                }
                let target = if target.as_str() == WORKING_TREE_ALIAS {
                    Snapshot::WorkingTree
                } else {
                    Snapshot::Revision(unalias(target))
                };
                Ok(RevisionPair {
                    base: unalias(base),
                    target,
                })
            }
            _ => anyhow::bail!("expected at most two revisions"),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn target(&self) -> &Snapshot {
        &self.target
    }

    pub fn base_snapshot(&self) -> Snapshot {
        Snapshot::Revision(self.base.clone())
    }
}

impl fmt::Display for RevisionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.base, self.target)
    }
}

fn unalias(commit: &str) -> String {
    if commit == HEAD_ALIAS {
        "HEAD".to_string()
    } else {
        commit.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(commits: &[&str]) -> Vec<String> {
        commits.iter().map(|commit| commit.to_string()).collect()
    }

    #[test]
    fn no_arguments_compares_head_against_working_tree() {
        let pair = RevisionPair::from_args(&[]).unwrap();
        assert_eq!(pair.base(), "HEAD");
        assert_eq!(pair.target(), &Snapshot::WorkingTree);
    }

    #[test]
    fn single_commit_compares_against_its_parent() {
        let pair = RevisionPair::from_args(&args(&["abc123"])).unwrap();
        assert_eq!(pair.base(), "abc123~1");
        assert_eq!(pair.target(), &Snapshot::Revision("abc123".to_string()));
    }

    #[test]
    fn head_alias_expands_before_the_parent_rule() {
        let pair = RevisionPair::from_args(&args(&["@"])).unwrap();
        assert_eq!(pair.base(), "HEAD~1");
        assert_eq!(pair.target(), &Snapshot::Revision("HEAD".to_string()));
    }

    #[test]
    fn two_commits_compare_directly() {
        let pair = RevisionPair::from_args(&args(&["v1", "v2"])).unwrap();
        assert_eq!(pair.base(), "v1");
        assert_eq!(pair.target(), &Snapshot::Revision("v2".to_string()));
    }

    #[test]
    fn dot_target_means_the_working_tree() {
        let pair = RevisionPair::from_args(&args(&["v1", "."])).unwrap();
        assert_eq!(pair.base(), "v1");
        assert_eq!(pair.target(), &Snapshot::WorkingTree);
    }

    #[test]
    fn dot_is_rejected_as_base_or_sole_argument() {
        assert!(RevisionPair::from_args(&args(&["."])).is_err());
        assert!(RevisionPair::from_args(&args(&[".", "v2"])).is_err());
    }

    #[test]
    fn more_than_two_revisions_are_rejected() {
        assert!(RevisionPair::from_args(&args(&["a", "b", "c"])).is_err());
    }
}
