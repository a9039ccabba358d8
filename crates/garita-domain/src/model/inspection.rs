//! Inspection record and checklist types
//!
//! One record per exit inspection; the matching entry completes the same
//! record instead of creating a new one. Checklists are fixed-size so the
//! export layout can rely on stable slot positions.

use chrono::{NaiveDateTime, NaiveTime};
use garita_types::Direction;
use serde::{Deserialize, Serialize};

/// Observation for one wheel position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TireObservation {
    /// Wheel position ID (1..=10), validated against the vehicle's
    /// tire configuration.
    #[serde(alias = "id")]
    pub position_id: u8,
    /// Inflation pressure checked.
    #[serde(default)]
    pub pressure_checked: bool,
    /// Lug nuts / studs checked.
    #[serde(default)]
    pub studs_checked: bool,
    /// Tread depth checked.
    #[serde(default)]
    pub tread_checked: bool,
    /// Visible wear flagged.
    #[serde(default)]
    pub worn: bool,
}

/// Fluid level check (oil, coolant, brake, washer).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FluidCheck {
    pub name: String,
    /// Level requires a top-up.
    #[serde(default)]
    pub required: bool,
    /// Level is full.
    #[serde(default)]
    pub full: bool,
}

/// Visual parameter check answered yes/no.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualCheck {
    pub name: String,
    #[serde(default)]
    pub ok: bool,
}

/// Light check; `None` means not applicable to this vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightCheck {
    pub name: String,
    #[serde(default)]
    pub works: Option<bool>,
}

/// On-board supply check (cones, extinguisher, jack...); `None` = N/A.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplyCheck {
    pub name: String,
    #[serde(default)]
    pub available: Option<bool>,
}

/// Vehicle document check (permits, insurance, licence...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentCheck {
    pub name: String,
    #[serde(default)]
    pub available: bool,
}

/// Body damage observation for one view of the vehicle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyDamageCheck {
    /// Which side/view the observation covers.
    pub view: String,
    #[serde(default)]
    pub scratched: bool,
    #[serde(default)]
    pub dented: bool,
    #[serde(default)]
    pub broken: bool,
    #[serde(default)]
    pub missing: bool,
}

/// One item of the entry re-check list; `None` = N/A.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryRevision {
    pub description: String,
    #[serde(default)]
    pub passed: Option<bool>,
}

/// Entry-side completion of an exit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryCompletion {
    pub revisions: [EntryRevision; 12],
    pub remarks: String,
    pub return_time: NaiveTime,
    pub entry_odometer: f64,
}

/// One inspection row: an exit record, optionally completed by an entry.
///
/// Identity is (plate, timestamp); the sheet row index is a storage detail
/// carried separately where it is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRecord {
    /// Local (Panama) timestamp of the exit submission.
    pub timestamp: NaiveDateTime,
    pub plate: String,
    pub driver: String,
    pub branch: String,
    pub vehicle_type: String,
    pub exit_odometer: f64,
    pub direction: Direction,
    /// Ten fixed slots, one per wheel position ID; positions outside the
    /// vehicle's tire configuration stay empty.
    pub tires: [Option<TireObservation>; 10],
    pub tire_remarks: String,
    pub fluids: [FluidCheck; 4],
    pub fluid_remarks: String,
    pub visuals: [VisualCheck; 4],
    pub visual_remarks: String,
    pub lights: [LightCheck; 8],
    pub supplies: [SupplyCheck; 8],
    pub documents: [DocumentCheck; 8],
    pub damage: [BodyDamageCheck; 4],
    pub departure_time: NaiveTime,
    pub entry: Option<EntryCompletion>,
}

/// Slim projection of one history row, enough to resolve plate state and
/// check odometer monotonicity. Absent or malformed odometer cells read as
/// zero; rows with malformed timestamps never become log entries at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateLogEntry {
    /// 1-based sheet row the entry came from.
    pub row: u32,
    pub timestamp: NaiveDateTime,
    pub plate: String,
    pub direction: Direction,
    pub exit_odometer: f64,
    pub entry_odometer: f64,
}
