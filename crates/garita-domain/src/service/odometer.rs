//! Odometer monotonicity validation
//!
//! Exit and entry readings are recorded in different columns of the same row
//! and reflect different physical moments, so each direction forms its own
//! strictly increasing sequence per plate. An entry reading must additionally
//! cover the exit reading of the row it completes.

use garita_types::{Direction, Error, Result};

use crate::model::PlateLogEntry;
use crate::service::plate_resolver::{normalize_plate, OpenExit};

/// Highest reading recorded for a plate in one direction.
///
/// Absent or malformed readings were already mapped to zero when the log was
/// parsed, so an empty history reads as zero.
pub fn last_known(plate: &str, direction: Direction, log: &[PlateLogEntry]) -> f64 {
    let wanted = normalize_plate(plate);
    log.iter()
        .filter(|entry| normalize_plate(&entry.plate) == wanted)
        .map(|entry| match direction {
            Direction::Exit => entry.exit_odometer,
            Direction::Entry => entry.entry_odometer,
        })
        .fold(0.0, f64::max)
}

/// Validate a candidate reading for a plate and direction.
///
/// The candidate must be strictly greater than the last known reading for
/// the same direction; equal readings are rejected (a vehicle cannot return
/// with a frozen counter). Entry candidates must also be at least the exit
/// reading of the row being completed.
pub fn validate(
    plate: &str,
    direction: Direction,
    candidate: f64,
    log: &[PlateLogEntry],
    open_exit: Option<&OpenExit>,
) -> Result<()> {
    let last = last_known(plate, direction, log);
    if candidate <= last {
        return Err(Error::OdometerRegression {
            direction,
            last_known: last,
            candidate,
        });
    }

    if direction == Direction::Entry {
        if let Some(open) = open_exit {
            if candidate < open.exit_odometer {
                return Err(Error::OdometerRegression {
                    direction,
                    last_known: open.exit_odometer,
                    candidate,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(day: u32, exit_odometer: f64, entry_odometer: f64) -> PlateLogEntry {
        PlateLogEntry {
            row: day,
            timestamp: NaiveDate::from_ymd_opt(2025, 4, day)
                .unwrap()
                .and_hms_opt(7, 0, 0)
                .unwrap(),
            plate: "ABC123".to_string(),
            direction: Direction::Entry,
            exit_odometer,
            entry_odometer,
        }
    }

    #[test]
    fn test_first_reading_must_be_positive() {
        assert!(validate("ABC123", Direction::Exit, 100.0, &[], None).is_ok());
        // an empty history reads as zero, and equal readings are rejected
        assert!(validate("ABC123", Direction::Exit, 0.0, &[], None).is_err());
    }

    #[test]
    fn test_exit_must_exceed_maximum_not_just_latest() {
        let log = vec![entry(1, 500.0, 520.0), entry(2, 480.0, 0.0)];
        assert!(validate("ABC123", Direction::Exit, 501.0, &log, None).is_ok());
        assert!(validate("ABC123", Direction::Exit, 490.0, &log, None).is_err());
    }

    #[test]
    fn test_equal_reading_is_rejected() {
        let log = vec![entry(1, 500.0, 520.0)];
        let result = validate("ABC123", Direction::Exit, 500.0, &log, None);
        match result {
            Err(Error::OdometerRegression { last_known, candidate, .. }) => {
                assert_eq!(last_known, 500.0);
                assert_eq!(candidate, 500.0);
            }
            other => panic!("expected regression, got {:?}", other),
        }
    }

    #[test]
    fn test_directions_are_independent_sequences() {
        let log = vec![entry(1, 500.0, 450.0)];
        // entry readings only compete with entry readings
        assert!(validate("ABC123", Direction::Entry, 460.0, &log, None).is_ok());
    }

    #[test]
    fn test_malformed_history_reads_as_zero() {
        let log = vec![entry(1, 0.0, 0.0)];
        assert!(validate("ABC123", Direction::Exit, 10.0, &log, None).is_ok());
    }

    #[test]
    fn test_entry_must_cover_exit_of_same_row() {
        let open = OpenExit {
            row: 4,
            timestamp: NaiveDate::from_ymd_opt(2025, 4, 9)
                .unwrap()
                .and_hms_opt(7, 0, 0)
                .unwrap(),
            exit_odometer: 600.0,
        };
        let log = vec![entry(1, 500.0, 520.0)];
        assert!(validate("ABC123", Direction::Entry, 590.0, &log, Some(&open)).is_err());
        // the vehicle may return without having moved
        assert!(validate("ABC123", Direction::Entry, 600.0, &log, Some(&open)).is_ok());
        assert!(validate("ABC123", Direction::Entry, 650.0, &log, Some(&open)).is_ok());
    }

    #[test]
    fn test_error_carries_last_known_value() {
        let log = vec![entry(1, 500.0, 520.0)];
        match validate("ABC123", Direction::Entry, 510.0, &log, None) {
            Err(Error::OdometerRegression { last_known, .. }) => assert_eq!(last_known, 520.0),
            other => panic!("expected regression, got {:?}", other),
        }
    }
}
