use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;

pub fn run(minutes: u32, twelve_hour: bool, verbose: bool) -> Result<()> {
    println!();
    println!("{}", "⌚ Running watchface simulator...".cyan().bold());
    println!();

    let minutes = minutes.to_string();
    let mut cmd = Command::new("cargo");
    cmd.args(["run", "-p", "simulator", "--", "--minutes", &minutes]);
    if twelve_hour {
        cmd.arg("--twelve-hour");
    }
    if verbose {
        cmd.arg("--verbose");
    }

    let status = cmd.status().context("Failed to launch simulator")?;
    if !status.success() {
        anyhow::bail!("Simulator exited with {status}");
    }
    Ok(())
}
