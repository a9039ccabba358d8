//! Inspection lifecycle service
//!
//! Exit path: validate → normalize tires → check odometer → append the row
//! (single commit point).
//!
//! Entry path: resolve the open exit → normalize → check odometer →
//! conditional row update → consecutive number → report handoff. Failures
//! after the row update surface as a retryable "number pending" state; a
//! failed report handoff is reported but never rolls the inspection back.

use std::sync::Arc;

use chrono::NaiveDateTime;

use garita_domain::model::InspectionReportPayload;
use garita_domain::repository::{
    ConsecutiveCounter, FleetRegistry, InspectionHistoryRepository, ReportPipeline,
};
use garita_domain::service::{
    expand_to_slots, normalize, resolve_state, validate as validate_odometer, PlateState,
};
use garita_types::{Direction, Error, Result};

use crate::clock;
use crate::submission::{EntrySubmission, ExitSubmission};

/// Outcome of a persisted exit inspection.
#[derive(Debug, Clone)]
pub struct ExitReceipt {
    /// 1-based sheet row the record landed on.
    pub row: u32,
    pub timestamp: NaiveDateTime,
}

/// Outcome of a completed entry inspection.
#[derive(Debug, Clone)]
pub struct EntryReceipt {
    pub row: u32,
    pub consecutive_number: u32,
    pub document_name: String,
    /// False when the export pipeline failed; the inspection itself stands.
    pub report_delivered: bool,
}

/// Composes the resolver, normalizer, validator and counter over the
/// storage seams.
pub struct InspectionService {
    history: Arc<dyn InspectionHistoryRepository>,
    registry: Arc<dyn FleetRegistry>,
    counter: Arc<dyn ConsecutiveCounter>,
    pipeline: Arc<dyn ReportPipeline>,
}

impl InspectionService {
    pub fn new(
        history: Arc<dyn InspectionHistoryRepository>,
        registry: Arc<dyn FleetRegistry>,
        counter: Arc<dyn ConsecutiveCounter>,
        pipeline: Arc<dyn ReportPipeline>,
    ) -> Self {
        Self {
            history,
            registry,
            counter,
            pipeline,
        }
    }

    /// Resolve which direction a plate must register next.
    pub fn check_plate(&self, plate: &str) -> Result<PlateState> {
        let log = self.history.plate_log(plate)?;
        Ok(resolve_state(plate, &log))
    }

    /// Register an exit inspection: appends a new row.
    pub fn register_exit(&self, submission: ExitSubmission) -> Result<ExitReceipt> {
        submission.validate()?;

        let configuration = self.registry.tire_configuration(&submission.plate)?;
        let normalized = normalize(&submission.tires, configuration)?;

        let log = self.history.plate_log(&submission.plate)?;
        validate_odometer(&submission.plate, Direction::Exit, submission.odometer, &log, None)?;

        let now = clock::now_local();
        let record = submission.into_record(now, expand_to_slots(&normalized));
        let row = self.history.append_exit(&record)?;

        Ok(ExitReceipt { row, timestamp: now })
    }

    /// Complete the open exit of a plate with an entry inspection.
    pub fn register_entry(&self, submission: EntrySubmission) -> Result<EntryReceipt> {
        submission.validate()?;

        let log = self.history.plate_log(&submission.plate)?;
        let state = resolve_state(&submission.plate, &log);
        let open = match (state.required, state.open_exit) {
            (Direction::Entry, Some(open)) => open,
            _ => return Err(Error::NoOpenExit(submission.plate.trim().to_uppercase())),
        };

        let configuration = self.registry.tire_configuration(&submission.plate)?;
        normalize(&submission.tires, configuration)?;

        validate_odometer(
            &submission.plate,
            Direction::Entry,
            submission.odometer,
            &log,
            Some(&open),
        )?;

        // conditional update: the row must still read as an open exit at the
        // moment we write, or a concurrent entry got there first
        match self.history.direction_marker(open.row)? {
            Some(Direction::Exit) => {}
            _ => return Err(Error::ConcurrentModification(open.row)),
        }

        let completion = submission.to_completion(clock::now_local().time());
        self.history.complete_entry(open.row, &completion)?;

        // the row is committed; anything that fails from here on is a
        // retryable post-commit state, not a lost inspection
        let record = self
            .history
            .load_record(open.row)
            .map_err(|e| Error::NumberPending {
                row: open.row,
                reason: e.to_string(),
            })?;
        let number = self
            .counter
            .next_number(&record.branch)
            .map_err(|e| Error::NumberPending {
                row: open.row,
                reason: e.to_string(),
            })?;

        let recipients = match self.registry.branch_recipients(&record.branch) {
            Ok(recipients) => recipients,
            Err(e) => {
                tracing::warn!(branch = %record.branch, error = %e, "recipient lookup failed");
                Vec::new()
            }
        };

        let payload = InspectionReportPayload::assemble(record, open.row, number, recipients);
        let report_delivered = match self.pipeline.deliver(&payload) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    document = %payload.document_name,
                    error = %e,
                    "report pipeline failed; inspection is complete, delivery must be re-run"
                );
                false
            }
        };

        Ok(EntryReceipt {
            row: open.row,
            consecutive_number: number,
            document_name: payload.document_name,
            report_delivered,
        })
    }
}
