//! # Casework CLI
//!
//! Usage:
//!   casework spec.json -o layout.json
//!   echo '{ ... }' | casework --price
//!   casework spec.json --share
//!   casework --decode 'https://example.com/?config=eyJ3aWR0aCI6...'
//!   casework --example > spec.json
//!
//! Diagnostics go to stderr and follow `RUST_LOG` (default `warn`).

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use casework::{share, Specification};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        match serde_json::to_string_pretty(&example_spec()) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&format!("Failed to serialize example: {}", e)),
        }
        return;
    }

    if let Some(payload) = flag_value(&args, "--decode") {
        let payload = share::payload_from_url(&payload).unwrap_or(payload);
        match share::decode(&payload).and_then(|spec| Ok(serde_json::to_string_pretty(&spec)?)) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&format!("✗ {}", e)),
        }
        return;
    }

    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1])
            .unwrap_or_else(|e| fail(&format!("✗ Failed to read {}: {}", args[1], e)))
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            fail(&format!("✗ Failed to read stdin: {}", e));
        }
        buf
    };

    let spec = Specification::from_json(&input).unwrap_or_else(|e| fail(&format!("✗ {}", e)));
    if let Err(e) = spec.check_grid() {
        eprintln!("! {} (unresolvable cells will be omitted)", e);
    }

    let output = if args.iter().any(|a| a == "--share") {
        share::encode(&spec).map(|payload| payload + "\n")
    } else if args.iter().any(|a| a == "--price") {
        serde_json::to_string_pretty(&casework::calculate_price(&spec))
            .map(|json| json + "\n")
            .map_err(Into::into)
    } else {
        serde_json::to_string_pretty(&casework::evaluate(&spec))
            .map(|json| json + "\n")
            .map_err(Into::into)
    };
    let output = output.unwrap_or_else(|e| fail(&format!("✗ {}", e)));

    match flag_value(&args, "-o") {
        Some(path) => {
            if let Err(e) = fs::write(&path, &output) {
                fail(&format!("✗ Failed to write {}: {}", path, e));
            }
            eprintln!("✓ Written {} bytes to {}", output.len(), path);
        }
        None => print!("{}", output),
    }
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

/// A three-column, two-row sideboard with a drawer bank in the middle.
fn example_spec() -> Specification {
    use casework::model::{BackPanel, BaseType, Cell, Finish};

    Specification {
        width: 1800,
        height: 900,
        depth: 450,
        finish: Finish::Walnut,
        base: BaseType::Leg100,
        back_panel: BackPanel::On,
        column_ratios: vec![1.0, 1.5, 1.0],
        row_ratios: vec![1.0, 1.0],
        cells: vec![
            vec![Cell::door(), Cell::drawer(), Cell::door()],
            vec![Cell::door(), Cell::drawer(), Cell::door()],
        ],
        ..Default::default()
    }
}
