use crate::areas::repository::Repository;
use crate::artifacts::revision::RevisionPair;
use crate::artifacts::syntax::comparator;
use crate::artifacts::syntax::loader::{self, ParseError};
use crate::artifacts::syntax::SyntaxTree;
use colored::Colorize;
use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Compare the AST of every changed Python file between the two
    /// snapshots. Returns `true` when every file is equivalent; every file
    /// is checked even after a failure so one bad file cannot hide another.
    pub fn check(&self, pair: &RevisionPair) -> anyhow::Result<bool> {
        writeln!(self.writer(), "{}", format!("Comparing {pair}").dimmed())?;

        let paths = self.changed_paths(pair)?;
        let mut all_well = true;

        for path in &paths {
            if path.extension() != Some(OsStr::new("py")) {
                continue;
            }

            write!(
                self.writer(),
                "{} ... ",
                format!("Checking {}", path.display()).cyan()
            )?;
            all_well &= self.check_file(pair, path)?;
        }

        writeln!(self.writer())?;
        if all_well {
            writeln!(self.writer(), "{}", "All files are equivalent!".green())?;
        } else {
            writeln!(self.writer(), "{}", "Uh oh, some files are different".red())?;
        }

        Ok(all_well)
    }

    fn check_file(&self, pair: &RevisionPair, path: &Path) -> anyhow::Result<bool> {
        let sources = self
            .source_at(&pair.base_snapshot(), path)
            .and_then(|old| self.source_at(pair.target(), path).map(|new| (old, new)));
        let (old, new) = match sources {
            Ok(sources) => sources,
            Err(error) => {
                writeln!(self.writer(), "{}", "git failed".red().bold())?;
                writeln!(self.writer(), "{}", format!("{error:#}").yellow())?;
                return Ok(false);
            }
        };

        // A side that fails to parse is a failure for this file, never a
        // silent skip and never an "absent" tree.
        let trees = parse_both(&old, &new);
        let (old_tree, new_tree) = match trees {
            Ok(trees) => trees,
            Err(error) => {
                writeln!(self.writer(), "{}", "failed to parse".red().bold())?;
                writeln!(self.writer(), "{}", error.to_string().yellow())?;
                return Ok(false);
            }
        };

        match comparator::explain(&old_tree.root, &new_tree.root) {
            None => {
                writeln!(self.writer(), "{}", "ok".green())?;
                Ok(true)
            }
            Some(mismatch) => {
                writeln!(self.writer(), "{}", "failed".red().bold())?;
                writeln!(self.writer(), "{}", mismatch.to_string().yellow())?;
                Ok(false)
            }
        }
    }
}

fn parse_both(old: &str, new: &str) -> Result<(SyntaxTree, SyntaxTree), ParseError> {
    Ok((loader::parse(old)?, loader::parse(new)?))
}
