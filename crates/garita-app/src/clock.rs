//! Branch-local wall clock
//!
//! All sheet timestamps are Panama local time. Panama sits at UTC-5 year
//! round with no daylight saving, so a fixed offset is exact.

use chrono::{FixedOffset, NaiveDateTime, Utc};

const PANAMA_UTC_OFFSET_SECS: i32 = 5 * 3600;

/// Current Panama local time.
pub fn now_local() -> NaiveDateTime {
    let offset = FixedOffset::west_opt(PANAMA_UTC_OFFSET_SECS).unwrap();
    Utc::now().with_timezone(&offset).naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_time_is_five_hours_behind_utc() {
        let utc = Utc::now().naive_utc();
        let local = now_local();
        let diff = utc - local;
        // allow a little slack for the two clock reads
        assert!((diff.num_seconds() - 5 * 3600).abs() < 5);
    }
}
