use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{cargo, OnFailure};

/// Target the watchface ships on.
const WATCH_TARGET: &str = "thumbv7em-none-eabihf";

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking watchface builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    // The core crates must stay no_std, with and without defmt.
    for package in ["platform", "watchface"] {
        cargo(
            &format!("Checking {package} (no_std, {WATCH_TARGET})"),
            &["check", "-p", package, "--target", WATCH_TARGET],
            OnFailure::Abort,
        )?;
        cargo(
            &format!("Checking {package} with defmt"),
            &["check", "-p", package, "--target", WATCH_TARGET, "--features", "defmt"],
            OnFailure::Abort,
        )?;
    }

    cargo(
        "Checking host workspace",
        &["check", "--workspace", "--all-targets"],
        OnFailure::Abort,
    )?;

    cargo(
        "Running clippy lints",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;

    if cargo("Checking code formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?.is_none() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
