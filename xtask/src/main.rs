use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for nescore")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci,
    /// Quick checks before commit (fmt, clippy)
    Check,
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Include ignored tests (nestest needs ROMs under tests/roms/)
        #[arg(long)]
        ignored: bool,
        /// Filter to one module (e.g. cpu, ppu, bus)
        #[arg(long)]
        module: Option<String>,
    },
    /// Run benchmarks
    Bench,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci => run_ci(),
        Commands::Check => run_check(),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test { ignored, module } => run_test(ignored, module.as_deref()),
        Commands::Bench => run_bench(),
    }
}

fn run_ci() -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());
    let start = Instant::now();

    run_fmt(true)?;
    run_clippy(false)?;
    run_build(false)?;
    run_test(false, None)?;

    println!(
        "\n{} {}",
        "CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn run_check() -> Result<()> {
    println!("{}", "=== Running Quick Checks ===".bold().blue());
    run_fmt(true)?;
    run_clippy(false)
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("fmt").arg("--all");
    if check {
        cmd.arg("--").arg("--check");
    }
    execute(&mut cmd)
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("clippy").arg("--all-targets");
    if fix {
        cmd.arg("--fix");
    } else {
        cmd.arg("--").arg("-D").arg("warnings");
    }
    execute(&mut cmd)
}

fn run_build(release: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("build");
    if release {
        cmd.arg("--release");
    }
    execute(&mut cmd)
}

fn run_test(ignored: bool, module: Option<&str>) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("test");
    if let Some(module) = module {
        cmd.arg(format!("{}::", module));
    }
    if ignored {
        cmd.arg("--").arg("--include-ignored");
    }
    execute(&mut cmd)
}

fn run_bench() -> Result<()> {
    execute(Command::new("cargo").arg("bench"))
}

fn execute(cmd: &mut Command) -> Result<()> {
    let rendered = format!("{:?}", cmd);
    println!("{} {}", ">".dimmed(), rendered.dimmed());

    let status = cmd.status()?;
    if !status.success() {
        bail!("command failed: {}", rendered);
    }
    Ok(())
}
