//! Repository and collaborator traits at the storage seam

use garita_types::{Direction, Result, TireConfiguration};

use crate::model::{EntryCompletion, InspectionRecord, InspectionReportPayload, PlateLogEntry};

/// History access for one inspection sheet.
pub trait InspectionHistoryRepository: Send + Sync {
    /// All valid history rows for a plate, oldest first.
    ///
    /// Rows whose timestamp does not parse are skipped, never surfaced.
    fn plate_log(&self, plate: &str) -> Result<Vec<PlateLogEntry>>;

    /// Append a new exit record; returns the 1-based row it landed on.
    fn append_exit(&self, record: &InspectionRecord) -> Result<u32>;

    /// Current direction marker of a row, read immediately before an update.
    fn direction_marker(&self, row: u32) -> Result<Option<Direction>>;

    /// Write the entry fields of a row. The direction marker is written
    /// last; it is the commit point of the entry.
    fn complete_entry(&self, row: u32, completion: &EntryCompletion) -> Result<()>;

    /// Load the full record stored at a row.
    fn load_record(&self, row: u32) -> Result<InspectionRecord>;
}

/// Fleet registry: declared vehicle data keyed by plate.
pub trait FleetRegistry: Send + Sync {
    /// Tire configuration declared for a plate. Unknown plates default to
    /// the four-wheel configuration.
    fn tire_configuration(&self, plate: &str) -> Result<TireConfiguration>;

    /// E-mail recipients for a branch's reports.
    fn branch_recipients(&self, branch: &str) -> Result<Vec<String>>;
}

/// Branch-scoped consecutive document numbers.
pub trait ConsecutiveCounter: Send + Sync {
    /// Issue the next number for a branch: unique and strictly greater than
    /// every number previously issued for that branch.
    fn next_number(&self, branch: &str) -> Result<u32>;
}

/// External export/notification pipeline (rendering, upload, e-mail).
pub trait ReportPipeline: Send + Sync {
    /// Deliver an assembled report. Failures are reported to the caller but
    /// must never roll back the persisted inspection.
    fn deliver(&self, payload: &InspectionReportPayload) -> Result<()>;
}
