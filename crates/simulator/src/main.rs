//! CST Big Time desktop simulator.
//!
//! Runs the watchface against an in-memory host, one simulated minute per
//! tick, while a fixed script drains the battery, drops the phone connection
//! and changes settings. Each frame is logged as a one-line screen dump.
//!
//! # Usage
//!
//! ```bash
//! # Two simulated hours, 50 ms per minute
//! cargo run -p simulator -- --minutes 120
//!
//! # 12-hour style starting at 23:00, with per-glyph traffic
//! RUST_LOG=debug cargo run -p simulator -- --start-hour 23 --twelve-hour
//! ```

#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]

mod clock;
mod host;
mod script;

use std::time::Duration;

use anyhow::ensure;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use platform::config;
use watchface::{FaceEvents, WatchFace};

use crate::host::SimHost;
use crate::script::Script;

/// CST Big Time simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Simulated minutes to run
    #[arg(short, long, default_value_t = 120)]
    minutes: u32,

    /// Wall-clock milliseconds per simulated minute
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Hour to start at (0–23)
    #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u8).range(0..24))]
    start_hour: u8,

    /// Use the 12-hour display convention
    #[arg(long)]
    twelve_hour: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        app = config::APP_NAME,
        kind = config::APP_TYPE,
        version = config::APP_VERSION,
        "{}",
        config::dev_banner()
    );

    let mut host = SimHost::new(clock::start_time(args.start_hour));
    host.set_24h_style(!args.twelve_hour);
    let mut face = WatchFace::new(host);
    face.start();
    info!(screen = %face.host().screen(), "started");

    let mut script = Script::new();
    let mut interval = tokio::time::interval(Duration::from_millis(args.tick_ms));
    interval.tick().await;

    for minute in 1..=args.minutes {
        interval.tick().await;

        let now = clock::advance(face.host().current_time());
        face.host_mut().set_time(now);
        for event in script.events_at(minute) {
            event.deliver(&mut face);
        }
        face.on_tick(&now);

        info!(minute, screen = %face.host().screen(), "tick");
    }

    let peak = face.host().peak_resident();
    let host = face.into_host();
    info!(peak_resident = peak, "shutdown");
    ensure!(
        host.resident_count() == 0,
        "{} glyph images still resident after shutdown",
        host.resident_count()
    );
    Ok(())
}
