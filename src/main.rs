use anyhow::Result;
use astdiff::areas::repository::Repository;
use astdiff::artifacts::revision::RevisionPair;
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "astdiff",
    version = "0.1.0",
    about = "Compare the AST of all changed Python files between git revisions",
    long_about = "Checks that the Python files changed between two revisions are \
    semantically equivalent: their syntax trees are identical once whitespace, \
    comments and quote style are stripped. \
    With no arguments, compare between HEAD and the working tree. \
    With one argument COMMIT, compare between COMMIT~1 and COMMIT. \
    With two arguments, compare between those two revisions \
    (the second can be '.' to mean the working tree).",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        value_name = "COMMIT",
        num_args = 0..=2,
        help = "Zero, one or two revisions to compare ('@' for HEAD, '.' for the working tree)"
    )]
    commits: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let pair = RevisionPair::from_args(&cli.commits)?;

    let pwd = std::env::current_dir()?;
    let repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;

    // Exit-status policy lives here and nowhere else: 0 when every changed
    // file is equivalent, 1 for any mismatch, parse failure or git failure.
    if !repository.check(&pair)? {
        std::process::exit(1);
    }

    Ok(())
}
