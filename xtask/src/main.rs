use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for chip8-frontend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, test)
    Ci,
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
    /// Run tests, optionally limited to one library module
    Test {
        #[arg(long, value_enum)]
        module: Option<Module>,
    },
    /// Run the render benchmarks
    Bench,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Module {
    Display,
    Input,
    Events,
    Frontend,
    Config,
}

impl Module {
    fn filter(self) -> &'static str {
        match self {
            Module::Display => "display",
            Module::Input => "input",
            Module::Events => "events",
            Module::Frontend => "frontend",
            Module::Config => "config",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci => run_ci(),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Test { module } => run_test(module),
        Commands::Bench => cargo(&["bench"]),
    }
}

fn run_ci() -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());
    let start = Instant::now();

    run_task("Format Check", || run_fmt(true))?;
    run_task("Clippy", || run_clippy(false))?;
    run_task("Test", || run_test(None))?;

    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    if check {
        cargo(&["fmt", "--all", "--", "--check"])
    } else {
        cargo(&["fmt", "--all"])
    }
}

fn run_clippy(fix: bool) -> Result<()> {
    if fix {
        cargo(&["clippy", "--workspace", "--all-targets", "--fix"])
    } else {
        cargo(&[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ])
    }
}

fn run_test(module: Option<Module>) -> Result<()> {
    match module {
        Some(module) => {
            println!("{} Running {} tests...", "→".blue(), module.filter().bold());
            cargo(&["test", "--lib", module.filter()])
        }
        None => cargo(&["test", "--workspace"]),
    }
}

fn run_task<F>(name: &str, task: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    println!("{} {}", "→".blue(), name);

    match task() {
        Ok(()) => {
            println!("{} {}", "✓".green().bold(), name);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), name);
            Err(e)
        }
    }
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("cargo {} failed with exit code: {}", args.join(" "), status);
    }

    Ok(())
}
