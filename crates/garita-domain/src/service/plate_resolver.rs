//! Plate state resolution
//!
//! Decides, from a plate's history, whether the next inspection must be an
//! exit or an entry, and for entries which row holds the open exit.

use chrono::NaiveDateTime;
use garita_types::Direction;
use serde::Serialize;

use crate::model::PlateLogEntry;

/// The open exit row an entry submission must complete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenExit {
    pub row: u32,
    pub timestamp: NaiveDateTime,
    pub exit_odometer: f64,
}

/// Resolved state of a plate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateState {
    /// Direction the next submission for this plate must have.
    pub required: Direction,
    /// Set when the latest record is an exit still waiting for its entry.
    pub open_exit: Option<OpenExit>,
    /// Timestamp of the latest valid record, if any.
    pub last_timestamp: Option<NaiveDateTime>,
}

/// Trimmed, upper-cased form used to correlate plates across records.
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

/// Resolve the required next direction for a plate.
///
/// A plate with no valid history must register an exit; "not found" is a
/// normal state, never an error. The log is expected to be pre-filtered of
/// malformed-timestamp rows, so ordering here is total.
pub fn resolve_state(plate: &str, log: &[PlateLogEntry]) -> PlateState {
    let wanted = normalize_plate(plate);
    let latest = log
        .iter()
        .filter(|entry| normalize_plate(&entry.plate) == wanted)
        .max_by_key(|entry| entry.timestamp);

    match latest {
        None => PlateState {
            required: Direction::Exit,
            open_exit: None,
            last_timestamp: None,
        },
        Some(entry) => match entry.direction {
            Direction::Exit => PlateState {
                required: Direction::Entry,
                open_exit: Some(OpenExit {
                    row: entry.row,
                    timestamp: entry.timestamp,
                    exit_odometer: entry.exit_odometer,
                }),
                last_timestamp: Some(entry.timestamp),
            },
            Direction::Entry => PlateState {
                required: Direction::Exit,
                open_exit: None,
                last_timestamp: Some(entry.timestamp),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(row: u32, plate: &str, day: u32, direction: Direction) -> PlateLogEntry {
        PlateLogEntry {
            row,
            timestamp: NaiveDate::from_ymd_opt(2025, 3, day)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
            plate: plate.to_string(),
            direction,
            exit_odometer: 100.0,
            entry_odometer: 0.0,
        }
    }

    #[test]
    fn test_unknown_plate_requires_exit() {
        let state = resolve_state("ABC123", &[]);
        assert_eq!(state.required, Direction::Exit);
        assert!(state.open_exit.is_none());
        assert!(state.last_timestamp.is_none());
    }

    #[test]
    fn test_open_exit_requires_entry_pointing_at_row() {
        let log = vec![
            entry(2, "ABC123", 1, Direction::Entry),
            entry(3, "ABC123", 2, Direction::Exit),
        ];
        let state = resolve_state("abc123 ", &log);
        assert_eq!(state.required, Direction::Entry);
        let open = state.open_exit.unwrap();
        assert_eq!(open.row, 3);
    }

    #[test]
    fn test_completed_entry_requires_exit() {
        let log = vec![
            entry(2, "ABC123", 1, Direction::Exit),
            entry(2, "ABC123", 3, Direction::Entry),
        ];
        let state = resolve_state("ABC123", &log);
        assert_eq!(state.required, Direction::Exit);
        assert!(state.open_exit.is_none());
    }

    #[test]
    fn test_other_plates_do_not_interfere() {
        let log = vec![
            entry(2, "XYZ789", 4, Direction::Exit),
            entry(3, "ABC123", 1, Direction::Entry),
        ];
        let state = resolve_state("ABC123", &log);
        assert_eq!(state.required, Direction::Exit);
    }

    #[test]
    fn test_ordering_is_by_timestamp_not_row() {
        // an older exit above a newer entry in the sheet must not win
        let log = vec![
            entry(5, "ABC123", 9, Direction::Entry),
            entry(2, "ABC123", 3, Direction::Exit),
        ];
        let state = resolve_state("ABC123", &log);
        assert_eq!(state.required, Direction::Exit);
    }
}
