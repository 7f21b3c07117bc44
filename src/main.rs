//! dlprobe - probe a shared library for exported symbols.
//!
//! Loads the given module through the OS loader and reports which of the
//! requested symbols it exports. Exits non-zero if any symbol is missing.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use dynload::DynamicLibrary;

#[derive(Parser)]
#[command(name = "dlprobe")]
#[command(version)]
#[command(about = "Probe a shared library for exported symbols", long_about = None)]
struct Cli {
    /// Path to the shared library (.so / .dylib / .dll)
    library: PathBuf,

    /// Symbol names to look up
    #[arg(required = true)]
    symbols: Vec<String>,

    /// Only set the exit code, print nothing
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let lib = DynamicLibrary::load(&cli.library)
        .with_context(|| format!("cannot open '{}'", cli.library.display()))?;

    if !cli.quiet {
        println!(
            "loaded {} (handle {:p})",
            cli.library.display(),
            lib.native_handle()
        );
    }

    let mut missing = 0usize;
    for name in &cli.symbols {
        let found = lib.has_symbol(name);
        if !cli.quiet {
            println!("  {name}: {}", if found { "found" } else { "missing" });
        }
        if !found {
            missing += 1;
        }
    }

    Ok(if missing == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
