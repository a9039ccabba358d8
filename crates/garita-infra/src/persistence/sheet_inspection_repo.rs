//! Sheet-backed inspection history repository

use std::sync::Arc;

use garita_domain::model::{EntryCompletion, InspectionRecord, PlateLogEntry};
use garita_domain::repository::InspectionHistoryRepository;
use garita_domain::service::normalize_plate;
use garita_store::{CellRef, RangeSpec, SheetsClient};
use garita_types::{Direction, Result, StoreError};

use crate::layout;

/// Inspection history stored as one sheet row per exit inspection.
pub struct SheetInspectionRepository {
    client: Arc<dyn SheetsClient>,
    sheet: String,
}

impl SheetInspectionRepository {
    pub fn new(client: Arc<dyn SheetsClient>, sheet: impl Into<String>) -> Self {
        Self { client, sheet: sheet.into() }
    }

    fn full_row_range(&self, row: u32) -> RangeSpec {
        RangeSpec::row(self.sheet.as_str(), row, layout::COL_TIMESTAMP, layout::COL_ENTRY_ODOMETER)
    }
}

impl InspectionHistoryRepository for SheetInspectionRepository {
    fn plate_log(&self, plate: &str) -> Result<Vec<PlateLogEntry>> {
        let range = RangeSpec::scan(
            self.sheet.as_str(),
            2,
            layout::COL_TIMESTAMP,
            layout::COL_ENTRY_ODOMETER,
        );
        let rows = self.client.get_rows(&range).map_err(garita_types::Error::from)?;

        let wanted = normalize_plate(plate);
        let mut log = Vec::new();
        for (offset, cells) in rows.iter().enumerate() {
            let row = offset as u32 + 2;
            let row_plate = cells.get(layout::COL_PLATE).map(String::as_str).unwrap_or("");
            if normalize_plate(row_plate) != wanted {
                continue;
            }
            match layout::decode_log_entry(row, cells) {
                Some(entry) => log.push(entry),
                None => {
                    tracing::warn!(row, plate = %wanted, "skipping history row with malformed timestamp");
                }
            }
        }
        Ok(log)
    }

    fn append_exit(&self, record: &InspectionRecord) -> Result<u32> {
        let cells = layout::encode_exit_row(record);
        let result = self.client.append_row(&self.sheet, cells)?;
        tracing::info!(row = result.row, plate = %record.plate, "exit inspection appended");
        Ok(result.row)
    }

    fn direction_marker(&self, row: u32) -> Result<Option<Direction>> {
        let range = RangeSpec::row(self.sheet.as_str(), row, layout::COL_DIRECTION, layout::COL_DIRECTION);
        let rows = self.client.get_rows(&range)?;
        let marker = rows
            .first()
            .and_then(|cells| cells.first())
            .map(String::as_str)
            .unwrap_or("");
        Ok(Direction::from_marker(marker))
    }

    fn complete_entry(&self, row: u32, completion: &EntryCompletion) -> Result<()> {
        let block = layout::encode_entry_block(completion);
        let range = RangeSpec::row(
            self.sheet.as_str(),
            row,
            layout::REVISION_PAIRS_START,
            layout::COL_ENTRY_REMARKS,
        );
        self.client.update_range(&range, vec![block])?;

        self.client.update_cell(
            &CellRef::new(self.sheet.as_str(), layout::COL_RETURN_TIME, row),
            &completion.return_time.format(layout::TIME_FORMAT).to_string(),
        )?;
        self.client.update_cell(
            &CellRef::new(self.sheet.as_str(), layout::COL_ENTRY_ODOMETER, row),
            &completion.entry_odometer.to_string(),
        )?;

        // the marker flips last: until it reads "entrada" the row is still an
        // open exit for every other reader
        self.client.update_cell(
            &CellRef::new(self.sheet.as_str(), layout::COL_DIRECTION, row),
            Direction::Entry.marker(),
        )?;
        tracing::info!(row, "entry inspection recorded");
        Ok(())
    }

    fn load_record(&self, row: u32) -> Result<InspectionRecord> {
        let rows = self.client.get_rows(&self.full_row_range(row))?;
        let cells = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::MalformedResponse(format!("row {row} is empty")))?;
        Ok(layout::decode_row(row, &cells)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use garita_domain::model::EntryRevision;
    use garita_store::MemorySheetsClient;

    fn record(plate: &str, day: u32, odometer: f64) -> InspectionRecord {
        InspectionRecord {
            timestamp: NaiveDate::from_ymd_opt(2025, 5, day)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            plate: plate.to_string(),
            driver: "Luis".to_string(),
            branch: "(SU02) Chiriquí".to_string(),
            vehicle_type: "sedan".to_string(),
            exit_odometer: odometer,
            direction: Direction::Exit,
            tires: Default::default(),
            tire_remarks: String::new(),
            fluids: Default::default(),
            fluid_remarks: String::new(),
            visuals: Default::default(),
            visual_remarks: String::new(),
            lights: Default::default(),
            supplies: Default::default(),
            documents: Default::default(),
            damage: Default::default(),
            departure_time: NaiveTime::from_hms_opt(9, 0, 5).unwrap(),
            entry: None,
        }
    }

    fn repo() -> (Arc<MemorySheetsClient>, SheetInspectionRepository) {
        let client = Arc::new(MemorySheetsClient::in_memory());
        let repo = SheetInspectionRepository::new(client.clone(), "Hoja 1");
        (client, repo)
    }

    #[test]
    fn test_append_then_log() {
        let (_, repo) = repo();
        let row = repo.append_exit(&record("ABC123", 2, 100.0)).unwrap();
        assert_eq!(row, 1);

        let log = repo.plate_log("abc123 ").unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].exit_odometer, 100.0);
        assert_eq!(log[0].direction, Direction::Exit);
    }

    #[test]
    fn test_log_skips_malformed_timestamp_rows() {
        let (client, repo) = repo();
        repo.append_exit(&record("ABC123", 2, 100.0)).unwrap();

        let mut broken = layout::encode_exit_row(&record("ABC123", 3, 200.0));
        broken[layout::COL_TIMESTAMP] = "ayer".to_string();
        client.append_row("Hoja 1", broken).unwrap();

        let log = repo.plate_log("ABC123").unwrap();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_complete_entry_flips_marker_and_tail() {
        let (_, repo) = repo();
        let row = repo.append_exit(&record("ABC123", 2, 100.0)).unwrap();
        assert_eq!(repo.direction_marker(row).unwrap(), Some(Direction::Exit));

        let completion = EntryCompletion {
            revisions: std::array::from_fn(|n| EntryRevision {
                description: format!("revisión {}", n + 1),
                passed: Some(true),
            }),
            remarks: String::new(),
            return_time: NaiveTime::from_hms_opt(17, 45, 0).unwrap(),
            entry_odometer: 180.0,
        };
        repo.complete_entry(row, &completion).unwrap();

        assert_eq!(repo.direction_marker(row).unwrap(), Some(Direction::Entry));
        let loaded = repo.load_record(row).unwrap();
        assert_eq!(loaded.direction, Direction::Entry);
        assert_eq!(loaded.entry.unwrap().entry_odometer, 180.0);
    }

    #[test]
    fn test_direction_marker_of_blank_row() {
        let (_, repo) = repo();
        assert_eq!(repo.direction_marker(7).unwrap(), None);
    }
}
