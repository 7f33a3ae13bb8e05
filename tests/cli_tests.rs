use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;
use common::command::{repository_dir, run_astdiff_command};

#[rstest]
fn running_outside_a_repository_fails(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_astdiff_command(repository_dir.path(), &[])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not inside a git repository"));

    Ok(())
}

#[rstest]
fn more_than_two_revisions_are_rejected(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_astdiff_command(repository_dir.path(), &["a", "b", "c"])
        .assert()
        .failure();

    Ok(())
}

#[rstest]
fn dot_base_is_rejected(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_astdiff_command(repository_dir.path(), &[".", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "the working tree can only be the second revision",
        ));

    Ok(())
}

#[test]
fn help_describes_the_revision_arguments() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    run_astdiff_command(dir.path(), &["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("astdiff"))
        .stdout(predicate::str::contains("COMMIT"));

    Ok(())
}
