//! Result printing for the CLI

use garita_app::{EntryReceipt, ExitReceipt};
use garita_domain::model::PlateLogEntry;
use garita_domain::service::PlateState;
use garita_types::Direction;
use serde_json::json;

use crate::cli::OutputFormat;

pub fn print_plate_state(plate: &str, state: &PlateState, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            print_json(&json!({
                "plate": plate.trim().to_uppercase(),
                "required": state.required,
                "open_exit": state.open_exit,
                "last_timestamp": state.last_timestamp,
            }));
        }
        OutputFormat::Table => match (&state.required, &state.open_exit) {
            (Direction::Entry, Some(open)) => {
                println!(
                    "Plate {} has an open exit at row {} ({}). Next: entry inspection.",
                    plate.trim().to_uppercase(),
                    open.row,
                    open.timestamp.format("%d/%m/%Y %H:%M:%S")
                );
            }
            _ if state.last_timestamp.is_none() => {
                println!(
                    "Plate {} has no inspection history. Next: exit inspection.",
                    plate.trim().to_uppercase()
                );
            }
            _ => {
                println!(
                    "Plate {} completed its last cycle. Next: exit inspection.",
                    plate.trim().to_uppercase()
                );
            }
        },
    }
}

pub fn print_exit_receipt(receipt: &ExitReceipt, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            print_json(&json!({
                "row": receipt.row,
                "timestamp": receipt.timestamp,
            }));
        }
        OutputFormat::Table => {
            println!(
                "Exit inspection recorded at row {} ({})",
                receipt.row,
                receipt.timestamp.format("%d/%m/%Y %H:%M:%S")
            );
        }
    }
}

pub fn print_entry_receipt(receipt: &EntryReceipt, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            print_json(&json!({
                "row": receipt.row,
                "consecutive_number": receipt.consecutive_number,
                "document_name": receipt.document_name,
                "report_delivered": receipt.report_delivered,
            }));
        }
        OutputFormat::Table => {
            println!(
                "Entry inspection completed at row {} (document no. {})",
                receipt.row, receipt.consecutive_number
            );
            println!("Report: {}", receipt.document_name);
            if !receipt.report_delivered {
                println!("Warning: report delivery failed; re-run the export for this document.");
            }
        }
    }
}

pub fn print_number(branch: &str, number: u32, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            print_json(&json!({ "branch": branch, "number": number }));
        }
        OutputFormat::Table => {
            println!("Next consecutive number for {}: {}", branch, number);
        }
    }
}

pub fn print_history(plate: &str, log: &[PlateLogEntry], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            print_json(&json!({
                "plate": plate.trim().to_uppercase(),
                "records": log,
            }));
        }
        OutputFormat::Table => {
            if log.is_empty() {
                println!("No inspection history for plate {}", plate.trim().to_uppercase());
                return;
            }
            println!(
                "{:<6} {:<20} {:<8} {:>12} {:>12}",
                "Row", "Timestamp", "State", "Exit odo", "Entry odo"
            );
            println!("{}", "-".repeat(62));
            for entry in log {
                println!(
                    "{:<6} {:<20} {:<8} {:>12} {:>12}",
                    entry.row,
                    entry.timestamp.format("%d/%m/%Y %H:%M:%S"),
                    entry.direction.marker(),
                    entry.exit_odometer,
                    entry.entry_odometer,
                );
            }
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: failed to serialize output: {}", e),
    }
}
