//! Output Formatting

use serde::Serialize;

use crate::commands::OutputFormat;
use crate::handler::{BlobReport, CompatReport, RulesReport, ValidateReport};

/// Print as JSON
fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error formatting JSON: {}", e),
    }
}

pub fn print_validate(report: &ValidateReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            println!("Fork Schedule");
            print_separator();
            print_row("Chain ID", report.chain_id.as_deref().unwrap_or("<nil>"));
            for entry in &report.forks {
                print_row(entry.fork.name(), &entry.block);
            }
            print_separator();
            println!("OK");
        }
        OutputFormat::Plain => println!("ok {}", report.summary),
    }
}

pub fn print_compat(report: &CompatReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            print_row("Height", &report.height.to_string());
            match &report.mismatch {
                None => print_row("Result", "compatible"),
                Some(err) => {
                    print_row("Result", "incompatible");
                    print_row("Fork", &err.what);
                    print_row("Stored", &threshold(err.stored_block.as_ref()));
                    print_row("New", &threshold(err.new_block.as_ref()));
                    print_row("Rewind to", &err.rewind_to.to_string());
                }
            }
        }
        OutputFormat::Plain => match &report.mismatch {
            None => println!("compatible"),
            Some(err) => println!("{}", err),
        },
    }
}

pub fn print_rules(report: &RulesReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            print_row("Block", &report.block.to_string());
            print_row("Chain ID", &report.chain_id);
            print_separator();
            if report.active.is_empty() {
                println!("(no forks active)");
            }
            for fork in &report.active {
                println!("  - {}", fork);
            }
        }
        OutputFormat::Plain => {
            let names: Vec<&str> = report.active.iter().map(|f| f.name()).collect();
            println!("{}", names.join(" "));
        }
    }
}

pub fn print_blob(report: &BlobReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            print_row("Block", &report.block.to_string());
            match (&report.fork, &report.config) {
                (Some(fork), Some(config)) => {
                    print_row("Blob fork", fork.name());
                    print_row("Target", &config.target.to_string());
                    print_row("Max", &config.max.to_string());
                    print_row("Update fraction", &config.update_fraction.to_string());
                }
                _ => print_row("Blob fork", "none"),
            }
        }
        OutputFormat::Plain => println!("{} {}", report.target_blobs, report.max_blobs),
    }
}

fn threshold(value: Option<&num_bigint::BigUint>) -> String {
    value.map_or_else(|| "nil".to_string(), |v| v.to_string())
}

/// Print a table row
pub fn print_row(key: &str, value: &str) {
    println!("{:<20} {}", key, value);
}

/// Print a separator line
pub fn print_separator() {
    println!("{}", "-".repeat(40));
}
