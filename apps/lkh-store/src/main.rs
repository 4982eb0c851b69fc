//! # LKH Store Entry Point
//!
//! Interactive cart shell for the LKH Store catalog.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LKH Store                                        │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  stdin ──► shell::parse_line ──► shell::execute ──► stdout       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Session { config, catalog, cart: SharedCart }                   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │ CartEvent (broadcast)                 │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Listener task: logs every cart change                           │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! lkh-store
//! lkh-store --config ./store.toml
//! lkh-store --json          # print command results as JSON
//! RUST_LOG=lkh=trace lkh-store
//! ```

mod shell;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use lkh_session::{Session, StoreConfig};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use shell::{Input, Output};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Some(args) => args,
        None => {
            print_help();
            return Ok(());
        }
    };

    let config = StoreConfig::load_or_default(args.config_path);
    let session = Session::new(config);

    info!(store = %session.config.store.name, "Starting LKH Store");

    let mut events = session.cart.subscribe();
    let listener = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => info!(
                    session_id = %event.session_id,
                    change = ?event.change,
                    total_quantity = event.total_quantity,
                    "Cart changed"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Cart event listener fell behind")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let shell_session = session.clone();
    tokio::task::spawn_blocking(move || run_shell(&shell_session, args.json)).await??;

    // Dropping the last sender closes the channel and ends the listener
    drop(session);
    listener.await?;

    info!("Goodbye");
    Ok(())
}

/// Command line options.
#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    config_path: Option<PathBuf>,
    json: bool,
}

impl CliArgs {
    /// Parses arguments after the program name; `None` means help was asked for.
    fn parse(args: impl IntoIterator<Item = String>) -> Option<Self> {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => match args.next() {
                    Some(path) => parsed.config_path = Some(PathBuf::from(path)),
                    None => warn!(arg = %arg, "Missing path after config flag, using default"),
                },
                "--json" => parsed.json = true,
                "--help" | "-h" => return None,
                other => warn!(arg = %other, "Ignoring unknown argument"),
            }
        }

        Some(parsed)
    }
}

fn print_help() {
    println!("LKH Store cart shell");
    println!();
    println!("Usage: lkh-store [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Config file (default: per-user store.toml)");
    println!("      --json           Print command results as JSON");
    println!("  -h, --help           Show this help message");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=lkh=trace` - Show trace for lkh crates only
/// - Default: INFO, DEBUG for lkh crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,lkh=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Reads commands until `quit` or end of input.
fn run_shell(session: &Session, json: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{} - type 'help' for commands", session.config.store.name);

    for line in stdin.lock().lines() {
        let line = line?;
        let input = match shell::parse_line(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(usage) => {
                writeln!(stdout, "{}", usage)?;
                continue;
            }
        };

        if input == Input::Quit {
            break;
        }

        match shell::execute(session, input) {
            Ok(output) if json => writeln!(stdout, "{}", to_json(&output))?,
            Ok(output) => {
                for rendered in shell::render(session, &output) {
                    writeln!(stdout, "{}", rendered)?;
                }
            }
            Err(e) => {
                debug!(error = %e, "Command failed");
                writeln!(stdout, "error: {}", e.message)?;
            }
        }
        stdout.flush()?;
    }

    Ok(())
}

fn to_json(output: &Output) -> String {
    let value = match output {
        Output::Products(products) => serde_json::to_value(products),
        Output::Quantity {
            product_id,
            quantity,
        } => Ok(serde_json::json!({ "productId": product_id, "quantity": quantity })),
        Output::Cart(response) => serde_json::to_value(response),
        Output::Help | Output::Quit => Ok(serde_json::Value::Null),
    };
    value.map(|v| v.to_string()).unwrap_or_default()
}
