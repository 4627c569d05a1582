//! Calc Bridge CLI Application
//!
//! A native host for the calc-bridge bindings. It registers the bindings
//! into an in-memory namespace and then either:
//! - invokes them directly (`--call`)
//! - drives them through a keypad session (`--keys`)
//! - stays resident, serving calls from stdin until shutdown

use anyhow::{Context, Result};
use calc_bridge::{BindingTable, BindingValue, Resident, ShutdownHandle};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

mod config;
mod keypad;

use config::AppConfig;
use keypad::{parse_keys, KeypadSession};

/// Calc Bridge - Host harness for the arithmetic bindings
#[derive(Parser, Debug)]
#[command(name = "calc-bridge-cli")]
#[command(about = "Register and drive the calc-bridge arithmetic bindings", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Binding name prefix (overrides the config file)
    #[arg(long, value_name = "NAME")]
    prefix: Option<String>,

    /// Invoke a binding once, e.g. "goAdd 2 3" (can be repeated)
    #[arg(long, value_name = "CALL")]
    call: Vec<String>,

    /// Feed a keypad key sequence, e.g. "12+3="
    #[arg(long, value_name = "SEQ")]
    keys: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// List the registered binding names
    #[arg(long)]
    list: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Calc Bridge CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using bridge library v{}", calc_bridge::VERSION);

    let mut config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };
    if let Some(prefix) = &args.prefix {
        config.bridge.prefix = prefix.clone();
    }

    let table = BindingTable::with_callbacks(&config.bridge)
        .context("Failed to register bindings")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list {
        for name in table.names() {
            writeln!(out, "{}", name)?;
        }
    }

    for call in &args.call {
        let value = evaluate_call(&table, call)?;
        writeln!(out, "{}", render(&value, args.json)?)?;
    }

    if let Some(keys) = &args.keys {
        let mut session = KeypadSession::new(&table, &config.bridge, config.keypad.max_digits);
        session.press_all(&parse_keys(keys));
        writeln!(out, "{}", render_display(session.display(), args.json)?)?;
    }

    if args.list || !args.call.is_empty() || args.keys.is_some() {
        return Ok(());
    }
    drop(out);

    resident_mode(table, config, args.json)
}

/// Stay resident, serving stdin on a worker until the host shuts down
fn resident_mode(table: BindingTable, config: AppConfig, json: bool) -> Result<()> {
    let (resident, handle) = Resident::channel();

    let worker = thread::spawn(move || -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        serve(stdin.lock(), stdout.lock(), &table, &config, json, handle)
    });

    let reason = resident.run_until_shutdown();
    log::info!("Shutting down ({:?})", reason);

    match worker.join() {
        Ok(result) => result,
        Err(_) => anyhow::bail!("stdin worker panicked"),
    }
}

/// Serve host requests line by line
///
/// - `:SEQ` feeds a key sequence to the keypad session
/// - `quit` / `exit` (or end of input) signals shutdown
/// - anything else is a binding call such as `goDiv 10 4`
///
/// A malformed request is reported and serving continues.
fn serve(
    input: impl BufRead,
    mut out: impl Write,
    table: &BindingTable,
    config: &AppConfig,
    json: bool,
    shutdown: ShutdownHandle,
) -> Result<()> {
    let mut session = KeypadSession::new(table, &config.bridge, config.keypad.max_digits);

    for line in input.lines() {
        let line = line.context("Failed to read request")?;
        let request = line.trim();

        if request.is_empty() {
            continue;
        }
        if request == "quit" || request == "exit" {
            break;
        }

        if let Some(keys) = request.strip_prefix(':') {
            let display = session.press_all(&parse_keys(keys));
            writeln!(out, "{}", render_display(display, json)?)?;
        } else {
            match evaluate_call(table, request) {
                Ok(value) => writeln!(out, "{}", render(&value, json)?)?,
                Err(e) => {
                    log::warn!("Rejected request {:?}: {:#}", request, e);
                    writeln!(out, "error: {:#}", e)?;
                }
            }
        }
        out.flush()?;
    }

    if !shutdown.shutdown() {
        log::debug!("No resident waiter took the shutdown signal");
    }
    Ok(())
}

/// Parse and invoke a call written as `NAME A B` or `NAME(A, B)`
fn evaluate_call(table: &BindingTable, call: &str) -> Result<BindingValue> {
    let normalized: String = call
        .chars()
        .map(|c| if matches!(c, '(' | ')' | ',') { ' ' } else { c })
        .collect();
    let mut parts = normalized.split_whitespace();

    let name = parts.next().context("Empty call")?;
    let args = parts
        .map(|arg| {
            arg.parse::<f64>()
                .with_context(|| format!("Invalid numeric argument: {:?}", arg))
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(table.call(name, &args)?)
}

fn render(value: &BindingValue, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(value)?)
    } else {
        Ok(value.to_string())
    }
}

fn render_display(display: &str, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(display)?)
    } else {
        Ok(display.to_string())
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn default_table() -> BindingTable {
        BindingTable::with_callbacks(&AppConfig::default().bridge).unwrap()
    }

    fn serve_text(input: &str, json: bool) -> String {
        let table = default_table();
        let config = AppConfig::default();
        let (_resident, handle) = Resident::channel();
        let mut out = Vec::new();

        serve(Cursor::new(input), &mut out, &table, &config, json, handle).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_evaluate_call_forms() {
        let table = default_table();
        assert_eq!(evaluate_call(&table, "goAdd 2 3").unwrap(), BindingValue::Number(5.0));
        assert_eq!(evaluate_call(&table, "goSub(2, 3)").unwrap(), BindingValue::Number(-1.0));
        assert_eq!(evaluate_call(&table, "goDiv").unwrap(), BindingValue::Text("NaN"));
    }

    #[test]
    fn test_evaluate_call_errors() {
        let table = default_table();
        assert!(evaluate_call(&table, "").is_err());
        assert!(evaluate_call(&table, "goAdd two 3").is_err());
        assert!(evaluate_call(&table, "goPow 2 3").is_err());
    }

    #[test]
    fn test_serve_calls_and_keys() {
        let output = serve_text("goMul 4 5\n\n:10/0=\ngoPow 1 2\nquit\ngoAdd 1 1\n", false);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "20");
        assert_eq!(lines[1], "∞");
        assert!(lines[2].starts_with("error:"));
    }

    #[test]
    fn test_serve_keypad_state_persists_across_lines() {
        let output = serve_text(":12+\n:3=\n", false);
        assert_eq!(output.lines().collect::<Vec<_>>(), vec!["12", "15"]);
    }

    #[test]
    fn test_serve_json_output() {
        let output = serve_text("goAdd 2 3\ngoAdd\ngoDiv 1 0\n", true);
        assert_eq!(output.lines().collect::<Vec<_>>(), vec!["5.0", "0", "\"∞\""]);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["calc-bridge-cli", "--call", "goAdd 1 2", "--json", "-vv"]);
        assert_eq!(args.call, vec!["goAdd 1 2"]);
        assert!(args.json);
        assert_eq!(args.verbose, 2);
        assert!(args.keys.is_none());
    }
}
