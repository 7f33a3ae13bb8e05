//! The version-control collaborator: resolves revisions, lists the paths that
//! changed between two snapshots and retrieves file content on either side.

use crate::artifacts::revision::{RevisionPair, Snapshot};
use anyhow::Context;
use git2::{DiffOptions, ObjectType};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

pub struct Repository {
    git: git2::Repository,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl Repository {
    /// Open the repository containing `path`, searching upwards the way
    /// `git` itself does.
    pub fn discover(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let git = git2::Repository::discover(path)
            .with_context(|| format!("{} is not inside a git repository", path.display()))?;

        Ok(Repository {
            git,
            writer: RefCell::new(writer),
        })
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// Paths that differ between the two snapshots, in git's delta order.
    pub fn changed_paths(&self, pair: &RevisionPair) -> anyhow::Result<Vec<PathBuf>> {
        let base = self.tree_at(pair.base())?;
        let mut options = DiffOptions::new();

        let diff = match pair.target() {
            Snapshot::Revision(revision) => {
                let target = self.tree_at(revision)?;
                self.git
                    .diff_tree_to_tree(Some(&base), Some(&target), Some(&mut options))?
            }
            Snapshot::WorkingTree => {
                self.git
                    .diff_tree_to_workdir_with_index(Some(&base), Some(&mut options))?
            }
        };

        Ok(diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(Path::to_path_buf)
            })
            .collect())
    }

    /// The file's content in the given snapshot. A path that does not exist
    /// on that side is an error, never an empty or "absent" tree.
    pub fn source_at(&self, snapshot: &Snapshot, path: &Path) -> anyhow::Result<String> {
        match snapshot {
            Snapshot::Revision(revision) => {
                let tree = self.tree_at(revision)?;
                let entry = tree.get_path(path).with_context(|| {
                    format!("{} does not exist at {revision}", path.display())
                })?;
                let object = entry.to_object(&self.git)?;
                let blob = object.into_blob().map_err(|_| {
                    anyhow::anyhow!("{} is not a regular file at {revision}", path.display())
                })?;

                Ok(std::str::from_utf8(blob.content())
                    .with_context(|| format!("{} is not valid UTF-8", path.display()))?
                    .to_string())
            }
            Snapshot::WorkingTree => {
                let root = self
                    .git
                    .workdir()
                    .context("a bare repository has no working tree")?;

                std::fs::read_to_string(root.join(path))
                    .with_context(|| format!("failed to read {}", path.display()))
            }
        }
    }

    fn tree_at(&self, revision: &str) -> anyhow::Result<git2::Tree<'_>> {
        let object = self
            .git
            .revparse_single(revision)
            .with_context(|| format!("unknown revision {revision}"))?;

        object
            .peel(ObjectType::Tree)?
            .into_tree()
            .map_err(|_| anyhow::anyhow!("revision {revision} does not point to a tree"))
    }
}
