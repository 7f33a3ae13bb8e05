use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const INITIAL_SOURCE: &str = "def greet(name):\n    return 'hello ' + name\n";

pub fn run_astdiff_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("astdiff").expect("Failed to find astdiff binary");
    cmd.current_dir(dir).args(args);
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) {
    let status = std::process::Command::new("git")
        .current_dir(dir)
        .args(args)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {args:?} failed");
}

pub fn git_commit_all(dir: &Path, message: &str) {
    run_git_command(dir, &["add", "."]);
    run_git_command(
        dir,
        &["-c", "commit.gpgsign=false", "commit", "-m", message],
    );
}

pub fn get_head_commit_sha(dir: &Path) -> String {
    let output = std::process::Command::new("git")
        .current_dir(dir)
        .args(["rev-parse", "HEAD"])
        .output()
        .expect("Failed to run git rev-parse");
    assert!(output.status.success(), "git rev-parse failed");

    String::from_utf8(output.stdout)
        .expect("Commit SHA is not UTF-8")
        .trim()
        .to_string()
}

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A git repository with one committed Python file (`app.py`).
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_git_command(repository_dir.path(), &["init"]);
    run_git_command(repository_dir.path(), &["config", "user.name", "astdiff tests"]);
    run_git_command(
        repository_dir.path(),
        &["config", "user.email", "astdiff@example.com"],
    );

    write_file(FileSpec::new(
        repository_dir.path().join("app.py"),
        INITIAL_SOURCE.to_string(),
    ));
    git_commit_all(repository_dir.path(), "Initial commit");

    repository_dir
}
