// SPDX-License-Identifier: MIT
//
// Mars Rover Photo Picker
// Copyright (c) 2025 Mars Rover Photo Picker Contributors

//! Rover Pics - prints one random Mars rover photo URL
//!
//! Each invocation picks a rover, queries the NASA Mars Rover Photos API for a random day of
//! its mission and prints the URL of one photo on stdout.
//!
//! # Flow
//!
//! ```text
//! ┌──────────────┐  earth_date   ┌──────────────┐   empty?    ┌──────────────┐
//! │ Random rover │ ─────────────>│  Photos API  │ ───────────>│ Random sol   │
//! │  + date      │    (HTTPS)    │              │  (x2 max)   │  fallback    │
//! └──────────────┘               └──────────────┘             └──────────────┘
//!                                       │
//!                                       └──> one URL on stdout
//! ```
//!
//! Configuration comes from `MARS_*` environment variables; diagnostics go to stderr.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rover_core::{
    config::PickerConfig,
    fetcher::ApiClient,
    report::{report, EXIT_SUCCESS},
    selector::{PhotoSelector, Selection},
};
use std::future::Future;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "rover-pics")]
#[command(about = "Rover Pics - Prints a random Mars rover photo URL", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", value_parser = clap::value_parser!(tracing::Level))]
    log_level: tracing::Level,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(args: &Args) {
    // stdout carries nothing but the photo URL
    let builder = tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_writer(io::stderr);

    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Load configuration, build the selector and run it once
async fn pick() -> rover_core::Result<Selection> {
    let config = PickerConfig::from_env()?;
    let client = ApiClient::new(config.fetcher_config()?)?;
    let rng = StdRng::from_entropy();
    let settings = config.selection_settings();

    let mut selector = match config.pinned_rover()? {
        Some(rover) => PhotoSelector::with_rover(client, rng, rover, settings),
        None => PhotoSelector::new(client, rng, settings),
    };
    info!(rover = %selector.rover(), "Rover selected");

    let selection = selector.run(Utc::now().date_naive()).await?;

    let photo = &selection.photo;
    info!(
        rover = %selection.rover,
        attempts = selection.attempts,
        sol = ?photo.sol,
        earth_date = ?photo.earth_date,
        camera = ?photo.camera.as_ref().map(|c| c.name.as_str()),
        "Photo picked"
    );
    Ok(selection)
}

/// Race the selection against `shutdown`; a shutdown that wins exits cleanly with no output
async fn run_until<P, C, O, E>(pick: P, shutdown: C, out: &mut O, err: &mut E) -> i32
where
    P: Future<Output = rover_core::Result<Selection>>,
    C: Future<Output = ()>,
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    let outcome = tokio::select! {
        outcome = pick => outcome,
        () = shutdown => {
            let _ = writeln!(err, "\nOperation cancelled by user.");
            return EXIT_SUCCESS;
        }
    };

    report(&outcome, out, err)
}

/// Resolves on Ctrl+C; never resolves if the handler cannot be installed
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(&args);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let code = runtime.block_on(run_until(
        pick(),
        ctrl_c(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    ));
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_core::{
        photos::Photo,
        query::Query,
        report::EXIT_FAILURE,
        Error, Rover,
    };

    fn selection() -> Selection {
        Selection {
            rover: Rover::Opportunity,
            query: Query::sol(7),
            photo: Photo {
                img_src: "https://mars.nasa.gov/opp.jpg".to_string(),
                id: None,
                sol: Some(7),
                earth_date: None,
                camera: None,
            },
            attempts: 2,
        }
    }

    #[tokio::test]
    async fn test_cancel_exits_cleanly() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let pending = std::future::pending::<rover_core::Result<Selection>>();
        let code = run_until(pending, async {}, &mut out, &mut err).await;

        assert_eq!(code, EXIT_SUCCESS);
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "\nOperation cancelled by user.\n");
    }

    #[tokio::test]
    async fn test_selection_prints_url() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = run_until(
            async { Ok(selection()) },
            std::future::pending::<()>(),
            &mut out,
            &mut err,
        )
        .await;

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(String::from_utf8(out).unwrap(), "https://mars.nasa.gov/opp.jpg\n");
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_failure_exits_non_zero() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let code = run_until(
            async { Err(Error::Network("Request timeout after 30 seconds".into())) },
            std::future::pending::<()>(),
            &mut out,
            &mut err,
        )
        .await;

        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "Error [NetworkFailure]: Request timeout after 30 seconds\n"
        );
    }

    #[test]
    fn test_log_level_parsing() {
        let args = Args::try_parse_from(["rover-pics"]).unwrap();
        assert_eq!(args.log_level, tracing::Level::WARN);
        assert!(!args.json_logs);

        let args = Args::try_parse_from(["rover-pics", "--log-level", "debug", "--json-logs"]).unwrap();
        assert_eq!(args.log_level, tracing::Level::DEBUG);
        assert!(args.json_logs);

        assert!(Args::try_parse_from(["rover-pics", "--log-level", "loud"]).is_err());
    }
}
