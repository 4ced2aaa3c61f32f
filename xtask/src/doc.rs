use anyhow::Result;
use colored::Colorize;

use crate::step::{cargo, OnFailure};

/// Crate whose docs are the entry point.
const INDEX: &str = "target/doc/watchface/index.html";

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Documenting the watchface workspace...".cyan().bold());
    println!();

    cargo("Documenting", &doc_args(open), OnFailure::Abort)?;

    if !open {
        println!("   {}", format!("Docs at {INDEX}").dimmed());
        println!();
    }

    Ok(())
}

/// `cargo doc` arguments. Private items are included; `std` pulls the
/// mocks into the platform docs.
fn doc_args(open: bool) -> Vec<&'static str> {
    let mut args = vec![
        "doc",
        "--workspace",
        "--no-deps",
        "--document-private-items",
        "--features",
        "watchface/std",
    ];
    if open {
        args.push("--open");
    }
    args
}
