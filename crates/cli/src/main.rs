//! `groupboard` -- browse WCA competition groups from the terminal.
//!
//! Lists upcoming and bookmarked competitions and shows who is competing
//! or staffing in each group, straight from a competition's public WCIF.
//!
//! # Environment variables
//!
//! | Variable                | Required | Default            | Description                  |
//! |-------------------------|----------|--------------------|------------------------------|
//! | `WCA_API_URL`           | no       | WCA API v0         | WCA REST API base URL        |
//! | `LIVE_COMPETITIONS_URL` | no       | --                 | JSON list of live comp ids   |
//! | `REQUEST_TIMEOUT_SECS`  | no       | `30`               | HTTP request timeout         |
//! | `GROUPBOARD_CACHE_DIR`  | no       | platform cache dir | WCIF and listing cache       |
//! | `GROUPBOARD_DATA_DIR`   | no       | platform data dir  | Pinned competitions          |
//! | `GROUPBOARD_OFFLINE`    | no       | `false`            | Same as `--offline`          |
//! | `RUST_LOG`              | no       | `groupboard=warn`  | Log filter (stderr)          |
//!
//! The default API URL is `https://www.worldcubeassociation.org/api/v0`.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use groupboard_cli::commands::{self, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "groupboard=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
