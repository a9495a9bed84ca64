//! Output helpers for human and JSON modes.
//!
//! Human mode prints primary data to stdout and notices to stderr. JSON mode
//! wraps responses in `{ data, warnings? }` and respects `--pretty`.

use std::io::Write;

use anyhow::Result;
use serde_json::{Value, json};

use crate::opts::GlobalOpts;

pub fn print_success(opts: &GlobalOpts, data: Value, warnings: Vec<String>) -> Result<()> {
    if opts.json {
        print_json(opts, data, warnings)
    } else {
        print_human(opts, data, warnings)
    }
}

fn print_json(opts: &GlobalOpts, data: Value, warnings: Vec<String>) -> Result<()> {
    let mut root = json!({ "data": data });
    if !warnings.is_empty() {
        root["warnings"] = warnings.into_iter().map(Value::String).collect();
    }
    println!("{}", render(opts, &root)?);
    Ok(())
}

fn print_human(opts: &GlobalOpts, data: Value, warnings: Vec<String>) -> Result<()> {
    let mut stderr = std::io::stderr();
    for w in warnings {
        writeln!(stderr, "notice: {w}")?;
    }
    match data {
        Value::String(s) => println!("{s}"),
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::String(s) => println!("{s}"),
                    other => println!("{}", render(opts, &other)?),
                }
            }
        }
        other => println!("{}", render(opts, &other)?),
    }
    Ok(())
}

/// Compact unless `--pretty`.
pub fn render(opts: &GlobalOpts, value: &Value) -> Result<String> {
    Ok(if opts.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}
