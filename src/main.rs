// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! netcrumb CLI
//!
//! Demonstrates the observer: performs a tracked request and prints the
//! breadcrumbs it left.

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use netcrumb::network::Fetch;
use netcrumb::{HttpClient, NetworkBreadcrumbs, NetworkBreadcrumbsConfig, RequestOptions};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("netcrumb=info".parse().expect("static directive")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "fetch" => {
            if args.len() < 3 {
                eprintln!("Usage: netcrumb fetch <url> [method]");
                return ExitCode::from(1);
            }
            match tracked_fetch(&args[2], args.get(3).map(String::as_str)).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    ExitCode::from(1)
                }
            }
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("netcrumb {}", netcrumb::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"netcrumb - Network breadcrumbs for error monitoring

USAGE:
    netcrumb <COMMAND> [OPTIONS]

COMMANDS:
    fetch <url> [method]    Perform a tracked request and print its breadcrumbs
    help                    Show this help message
    version                 Show version

ENVIRONMENT:
    NETCRUMB_NOTIFY_ENDPOINT, NETCRUMB_SESSIONS_ENDPOINT, NETCRUMB_IGNORED_URLS,
    NETCRUMB_ENABLED_TYPES, NETCRUMB_MAX_BREADCRUMBS, RUST_LOG
"#
    );
}

async fn tracked_fetch(url: &str, method: Option<&str>) -> anyhow::Result<()> {
    let config = NetworkBreadcrumbsConfig::from_env().context("loading configuration")?;
    let (observer, log) = NetworkBreadcrumbs::with_log(config);
    let fetch = observer.wrap_fetch(HttpClient::new()?);

    let options = method.map(|m| RequestOptions::new().method(m));
    match fetch.fetch(url.into(), options).await {
        Ok(response) => tracing::info!(status = response.status_code(), "Request completed"),
        Err(e) => tracing::warn!(error = %e, "Request failed"),
    }

    println!("{}", serde_json::to_string_pretty(&log.breadcrumbs())?);
    Ok(())
}
