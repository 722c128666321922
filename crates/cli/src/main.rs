//! Chawkbazar CLI - checkout session tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the session stored under the default key
//! cb-cli show
//!
//! # Use a different storage directory and key
//! cb-cli --dir /tmp/cb --key guest-checkout show
//!
//! # Machine-readable output, including errors
//! cb-cli --json set-gateway BITCOIN
//! ```
//!
//! # Commands
//!
//! - `show` - Print the session and derived values
//! - `reset` - Reset the session and clear storage
//! - `set-gateway`, `set-contact`, `set-token` - Edit single fields
//! - `set-coupon`, `clear-coupon` - Manage the applied coupon
//! - `set-verified` - Store a verification result

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chawkbazar_cli::{Cli, CliError, run};

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chawkbazar_checkout=info,chawkbazar_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = cli.config().and_then(|config| run(&cli.command, &config));

    match result {
        Ok(output) => print_output(&output, cli.json),
        Err(e) => {
            report(&e, cli.json);
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_output(output: &serde_json::Value, json: bool) {
    if json {
        println!("{output}");
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(output).unwrap_or_else(|_| output.to_string())
        );
    }
}

#[allow(clippy::print_stdout)]
fn report(error: &CliError, json: bool) {
    if json {
        println!("{}", error.to_client_error().to_json());
    }
    tracing::error!("Command failed: {error}");
}
