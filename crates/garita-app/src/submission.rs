//! Boundary-validated submission records
//!
//! Incoming submissions are a tagged union of two well-defined record
//! shapes, checked here before anything reaches the lifecycle service.
//! Checklists arrive as open lists and are padded to their fixed slot
//! counts; the slot order is the submission order, as captured on the form.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use garita_domain::model::{
    BodyDamageCheck, DocumentCheck, EntryCompletion, EntryRevision, FluidCheck, InspectionRecord,
    LightCheck, SupplyCheck, TireObservation, VisualCheck,
};
use garita_types::{Direction, Error, Result};

/// One incoming submission of either direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InspectionSubmission {
    Exit(ExitSubmission),
    Entry(EntrySubmission),
}

/// Check-out inspection: the vehicle leaves a branch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExitSubmission {
    pub plate: String,
    pub driver: String,
    pub branch: String,
    #[serde(default)]
    pub vehicle_type: String,
    pub odometer: f64,
    #[serde(default)]
    pub tires: Vec<TireObservation>,
    #[serde(default)]
    pub tire_remarks: String,
    #[serde(default)]
    pub fluids: Vec<FluidCheck>,
    #[serde(default)]
    pub fluid_remarks: String,
    #[serde(default)]
    pub visuals: Vec<VisualCheck>,
    #[serde(default)]
    pub visual_remarks: String,
    #[serde(default)]
    pub lights: Vec<LightCheck>,
    #[serde(default)]
    pub supplies: Vec<SupplyCheck>,
    #[serde(default)]
    pub documents: Vec<DocumentCheck>,
    #[serde(default)]
    pub damage: Vec<BodyDamageCheck>,
}

/// Check-in inspection: the vehicle returns and completes its open exit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntrySubmission {
    pub plate: String,
    pub odometer: f64,
    #[serde(default)]
    pub revisions: Vec<EntryRevision>,
    #[serde(default)]
    pub remarks: String,
    /// Optional tire re-check; validated against the vehicle's
    /// configuration like the exit checklist.
    #[serde(default)]
    pub tires: Vec<TireObservation>,
}

fn require_field(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidSubmission(format!("{name} must not be empty")));
    }
    Ok(())
}

fn require_odometer(value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidSubmission(format!(
            "odometer must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

/// Pad an open checklist to its fixed slot count, dropping any overflow.
fn fixed_slots<T: Clone + Default, const N: usize>(items: &[T]) -> [T; N] {
    std::array::from_fn(|i| items.get(i).cloned().unwrap_or_default())
}

impl ExitSubmission {
    pub fn validate(&self) -> Result<()> {
        require_field(&self.plate, "plate")?;
        require_field(&self.driver, "driver")?;
        require_field(&self.branch, "branch")?;
        require_odometer(self.odometer)
    }

    /// Build the record that becomes the appended sheet row.
    pub fn into_record(
        self,
        timestamp: NaiveDateTime,
        tires: [Option<TireObservation>; 10],
    ) -> InspectionRecord {
        InspectionRecord {
            timestamp,
            plate: self.plate.trim().to_uppercase(),
            driver: self.driver,
            branch: self.branch,
            vehicle_type: self.vehicle_type,
            exit_odometer: self.odometer,
            direction: Direction::Exit,
            tires,
            tire_remarks: self.tire_remarks,
            fluids: fixed_slots(&self.fluids),
            fluid_remarks: self.fluid_remarks,
            visuals: fixed_slots(&self.visuals),
            visual_remarks: self.visual_remarks,
            lights: fixed_slots(&self.lights),
            supplies: fixed_slots(&self.supplies),
            documents: fixed_slots(&self.documents),
            damage: fixed_slots(&self.damage),
            departure_time: timestamp.time(),
            entry: None,
        }
    }
}

impl EntrySubmission {
    pub fn validate(&self) -> Result<()> {
        require_field(&self.plate, "plate")?;
        require_odometer(self.odometer)
    }

    pub fn to_completion(&self, return_time: chrono::NaiveTime) -> EntryCompletion {
        EntryCompletion {
            revisions: fixed_slots(&self.revisions),
            remarks: self.remarks.clone(),
            return_time,
            entry_odometer: self.odometer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_validation() {
        let mut submission = ExitSubmission {
            plate: "abc123".to_string(),
            driver: "Luis".to_string(),
            branch: "(SU02) Chiriquí".to_string(),
            odometer: 120.0,
            ..Default::default()
        };
        assert!(submission.validate().is_ok());

        submission.plate = "  ".to_string();
        assert!(matches!(submission.validate(), Err(Error::InvalidSubmission(_))));
    }

    #[test]
    fn test_odometer_must_be_a_valid_number() {
        let submission = EntrySubmission {
            plate: "ABC123".to_string(),
            odometer: f64::NAN,
            ..Default::default()
        };
        assert!(submission.validate().is_err());

        let negative = EntrySubmission {
            plate: "ABC123".to_string(),
            odometer: -5.0,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_into_record_normalizes_plate_and_pads_checklists() {
        let submission = ExitSubmission {
            plate: " abc123 ".to_string(),
            driver: "Luis".to_string(),
            branch: "(SU02) Chiriquí".to_string(),
            odometer: 120.0,
            fluids: vec![FluidCheck {
                name: "aceite".to_string(),
                required: false,
                full: true,
            }],
            ..Default::default()
        };
        let timestamp = chrono::NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let record = submission.into_record(timestamp, Default::default());

        assert_eq!(record.plate, "ABC123");
        assert_eq!(record.fluids[0].name, "aceite");
        assert_eq!(record.fluids[1], FluidCheck::default());
        assert_eq!(record.departure_time, timestamp.time());
    }

    #[test]
    fn test_submission_json_shape() {
        let json = r#"{
            "kind": "entry",
            "plate": "ABC123",
            "odometer": 150,
            "revisions": [{ "description": "golpes", "passed": true }]
        }"#;
        let submission: InspectionSubmission = serde_json::from_str(json).unwrap();
        match submission {
            InspectionSubmission::Entry(entry) => {
                assert_eq!(entry.plate, "ABC123");
                assert_eq!(entry.revisions.len(), 1);
                assert_eq!(entry.revisions[0].passed, Some(true));
            }
            other => panic!("expected entry, got {:?}", other),
        }
    }
}
