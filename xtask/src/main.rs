use anyhow::{
    Context,
    Result,
    ensure,
};
use clap::{
    Parser,
    Subcommand,
};
use earnhub::config::{
    resolve_data_dir,
    storage_dir,
};
use std::{
    path::{
        Path,
        PathBuf,
    },
    process::Command,
};

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "EarnHub helper tasks (clippy, tests, local data cleanup)",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run clippy for the entire workspace with warnings-as-errors
    Clippy,
    /// Run the unit tests of every crate, then the end-to-end journeys
    Test {
        /// Only run the journeys in integration-tests
        #[arg(long, conflicts_with = "skip_integration")]
        integration_only: bool,
        /// Skip the journeys in integration-tests
        #[arg(long)]
        skip_integration: bool,
    },
    /// Delete the local storage of an EarnHub data directory
    WipeData {
        /// Data directory (defaults to ~/.earnhub)
        #[arg(long)]
        data_dir: Option<String>,
        /// Also remove settings and logs
        #[arg(long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let root = repo_root()?;

    match cli.command {
        Commands::Clippy => run_clippy(&root)?,
        Commands::Test {
            integration_only,
            skip_integration,
        } => {
            if !integration_only {
                run_unit_tests(&root)?;
            }
            if !skip_integration {
                run_integration_tests(&root)?;
            }
        }
        Commands::WipeData { data_dir, all } => {
            let data_dir = resolve_data_dir(data_dir.as_deref())?;
            wipe_data(&data_dir, all)?;
        }
    }

    Ok(())
}

fn repo_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

fn run_clippy(root: &Path) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("clippy")
        .arg("--workspace")
        .arg("--all-targets")
        .arg("--all-features")
        .arg("--")
        .arg("-D")
        .arg("warnings")
        .current_dir(root);
    run_command(cmd, "cargo clippy")
}

fn run_unit_tests(root: &Path) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("test")
        .arg("--workspace")
        .arg("--exclude")
        .arg("integration-tests")
        .current_dir(root);
    run_command(cmd, "cargo test --workspace --exclude integration-tests")
}

fn run_integration_tests(root: &Path) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("test")
        .arg("-p")
        .arg("integration-tests")
        .current_dir(root);
    run_command(cmd, "cargo test -p integration-tests")
}

fn wipe_data(data_dir: &Path, all: bool) -> Result<()> {
    let target = if all {
        data_dir.to_path_buf()
    } else {
        storage_dir(data_dir)
    };
    if !target.exists() {
        println!("Nothing to wipe at {}", target.display());
        return Ok(());
    }
    std::fs::remove_dir_all(&target)
        .with_context(|| format!("failed to remove {}", target.display()))?;
    println!("Removed {}", target.display());
    Ok(())
}

fn run_command(mut cmd: Command, label: &str) -> Result<()> {
    println!("Running: {}", label);
    let status = cmd
        .status()
        .with_context(|| format!("failed to run {label}"))?;
    ensure!(status.success(), "{label} failed with status {status}");
    Ok(())
}
