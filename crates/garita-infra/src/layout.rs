//! Column layout of the inspection sheet
//!
//! One row per exit inspection; the matching entry writes into the tail
//! columns of the same row. Checklist blocks sit at fixed offsets so the
//! report template can address cells positionally.
//!
//! Columns (0-based): A timestamp, B plate, C driver, D branch, E vehicle
//! type, F exit odometer, G direction marker; ten 5-cell tire blocks, four
//! 4-cell fluid blocks, four visual pairs, eight light pairs, eight supply
//! pairs, eight document pairs, four 6-cell damage blocks; then the entry
//! tail: twelve revision pairs (FG..), departure time (GF), return time
//! (GG), entry odometer (GH).

use chrono::{NaiveDateTime, NaiveTime};
use garita_types::{Direction, StoreError};

use garita_domain::model::{
    BodyDamageCheck, DocumentCheck, EntryCompletion, EntryRevision, FluidCheck, InspectionRecord,
    LightCheck, PlateLogEntry, SupplyCheck, TireObservation, VisualCheck,
};

pub const COL_TIMESTAMP: usize = 0;
pub const COL_PLATE: usize = 1;
pub const COL_DRIVER: usize = 2;
pub const COL_BRANCH: usize = 3;
pub const COL_VEHICLE_TYPE: usize = 4;
pub const COL_EXIT_ODOMETER: usize = 5;
pub const COL_DIRECTION: usize = 6;

pub const TIRE_BLOCKS_START: usize = 7;
pub const TIRE_BLOCK_WIDTH: usize = 5;
pub const COL_TIRE_REMARKS: usize = 57;

pub const FLUID_BLOCKS_START: usize = 58;
pub const FLUID_BLOCK_WIDTH: usize = 4;
pub const COL_FLUID_REMARKS: usize = 74;

pub const VISUAL_PAIRS_START: usize = 76;
pub const COL_VISUAL_REMARKS: usize = 84;

pub const LIGHT_PAIRS_START: usize = 86;
pub const SUPPLY_PAIRS_START: usize = 103;
pub const DOCUMENT_PAIRS_START: usize = 120;

pub const DAMAGE_BLOCKS_START: usize = 137;
pub const DAMAGE_BLOCK_WIDTH: usize = 6;

/// Start of the entry tail ("FG").
pub const REVISION_PAIRS_START: usize = 162;
pub const COL_ENTRY_REMARKS: usize = 186;
/// "GF"
pub const COL_DEPARTURE_TIME: usize = 187;
/// "GG"
pub const COL_RETURN_TIME: usize = 188;
/// "GH"
pub const COL_ENTRY_ODOMETER: usize = 189;

pub const ROW_WIDTH: usize = 190;

pub const MARK_CHECK: &str = "√";
pub const MARK_WEAR: &str = "x";
pub const MARK_SCRATCH: &str = "X";
pub const MARK_DENT: &str = "/";
pub const MARK_BREAK: &str = "O";
pub const MARK_MISSING: &str = "*";
pub const OPT_YES: &str = "sí";
pub const OPT_NO: &str = "no";
pub const OPT_NA: &str = "N/A";

/// Timestamp cell format, Panama local time.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";
pub const TIME_FORMAT: &str = "%H:%M:%S";

fn cell(cells: &[String], index: usize) -> &str {
    cells.get(index).map(String::as_str).unwrap_or("")
}

fn opt_to_cell(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => OPT_YES,
        Some(false) => OPT_NO,
        None => OPT_NA,
    }
}

fn opt_from_cell(value: &str) -> Option<bool> {
    match value.trim() {
        OPT_YES => Some(true),
        OPT_NO => Some(false),
        _ => None,
    }
}

/// Odometer cells: malformed or missing values read as zero, never as errors.
pub fn parse_odometer(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

fn format_odometer(value: f64) -> String {
    value.to_string()
}

/// Encode a full exit row, departure time included, so a single append is
/// the whole commit.
pub fn encode_exit_row(record: &InspectionRecord) -> Vec<String> {
    let mut row = vec![String::new(); ROW_WIDTH];
    row[COL_TIMESTAMP] = record.timestamp.format(TIMESTAMP_FORMAT).to_string();
    row[COL_PLATE] = record.plate.clone();
    row[COL_DRIVER] = record.driver.clone();
    row[COL_BRANCH] = record.branch.clone();
    row[COL_VEHICLE_TYPE] = record.vehicle_type.clone();
    row[COL_EXIT_ODOMETER] = format_odometer(record.exit_odometer);
    row[COL_DIRECTION] = record.direction.marker().to_string();

    for (n, slot) in record.tires.iter().enumerate() {
        let base = TIRE_BLOCKS_START + n * TIRE_BLOCK_WIDTH;
        row[base] = format!("llanta {}", n + 1);
        if let Some(tire) = slot {
            row[base + 1] = check_mark(tire.pressure_checked);
            row[base + 2] = check_mark(tire.studs_checked);
            row[base + 3] = check_mark(tire.tread_checked);
            row[base + 4] = if tire.worn { MARK_WEAR.to_string() } else { String::new() };
        }
    }
    row[COL_TIRE_REMARKS] = record.tire_remarks.clone();

    for (n, fluid) in record.fluids.iter().enumerate() {
        let base = FLUID_BLOCKS_START + n * FLUID_BLOCK_WIDTH;
        row[base] = format!("Nivel {}", n + 1);
        row[base + 1] = fluid.name.clone();
        row[base + 2] = check_mark(fluid.required);
        row[base + 3] = check_mark(fluid.full);
    }
    row[COL_FLUID_REMARKS] = record.fluid_remarks.clone();

    for (n, visual) in record.visuals.iter().enumerate() {
        let base = VISUAL_PAIRS_START + n * 2;
        row[base] = visual.name.clone();
        row[base + 1] = if visual.ok { OPT_YES.to_string() } else { OPT_NO.to_string() };
    }
    row[COL_VISUAL_REMARKS] = record.visual_remarks.clone();

    for (n, light) in record.lights.iter().enumerate() {
        let base = LIGHT_PAIRS_START + n * 2;
        row[base] = light.name.clone();
        row[base + 1] = opt_to_cell(light.works).to_string();
    }

    for (n, supply) in record.supplies.iter().enumerate() {
        let base = SUPPLY_PAIRS_START + n * 2;
        row[base] = supply.name.clone();
        row[base + 1] = opt_to_cell(supply.available).to_string();
    }

    for (n, document) in record.documents.iter().enumerate() {
        let base = DOCUMENT_PAIRS_START + n * 2;
        row[base] = document.name.clone();
        row[base + 1] =
            if document.available { OPT_YES.to_string() } else { OPT_NO.to_string() };
    }

    for (n, damage) in record.damage.iter().enumerate() {
        let base = DAMAGE_BLOCKS_START + n * DAMAGE_BLOCK_WIDTH;
        row[base] = format!("Daño {}", n + 1);
        row[base + 1] = damage.view.clone();
        row[base + 2] = damage_mark(damage.scratched, MARK_SCRATCH);
        row[base + 3] = damage_mark(damage.dented, MARK_DENT);
        row[base + 4] = damage_mark(damage.broken, MARK_BREAK);
        row[base + 5] = damage_mark(damage.missing, MARK_MISSING);
    }

    row[COL_DEPARTURE_TIME] = record.departure_time.format(TIME_FORMAT).to_string();
    row
}

/// Encode the revision block written at entry completion (FG.. columns).
pub fn encode_entry_block(completion: &EntryCompletion) -> Vec<String> {
    let mut block = Vec::with_capacity(25);
    for revision in &completion.revisions {
        block.push(revision.description.clone());
        block.push(opt_to_cell(revision.passed).to_string());
    }
    block.push(completion.remarks.clone());
    block
}

fn check_mark(checked: bool) -> String {
    if checked { MARK_CHECK.to_string() } else { String::new() }
}

fn damage_mark(present: bool, mark: &str) -> String {
    if present { mark.to_string() } else { OPT_NO.to_string() }
}

/// Parse a timestamp cell. `None` marks the row as malformed; callers skip
/// and log it, they never fail on it.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).ok()
}

/// Slim projection of a history row for state resolution. `None` when the
/// timestamp or the direction marker does not parse.
pub fn decode_log_entry(row: u32, cells: &[String]) -> Option<PlateLogEntry> {
    let timestamp = parse_timestamp(cell(cells, COL_TIMESTAMP))?;
    let direction = Direction::from_marker(cell(cells, COL_DIRECTION))?;
    Some(PlateLogEntry {
        row,
        timestamp,
        plate: cell(cells, COL_PLATE).trim().to_string(),
        direction,
        exit_odometer: parse_odometer(cell(cells, COL_EXIT_ODOMETER)),
        entry_odometer: parse_odometer(cell(cells, COL_ENTRY_ODOMETER)),
    })
}

/// Decode a full row back into a record, tolerating blank checklist cells.
pub fn decode_row(row: u32, cells: &[String]) -> Result<InspectionRecord, StoreError> {
    let timestamp = parse_timestamp(cell(cells, COL_TIMESTAMP)).ok_or_else(|| {
        StoreError::MalformedResponse(format!("row {row}: unparseable timestamp"))
    })?;
    let direction = Direction::from_marker(cell(cells, COL_DIRECTION)).ok_or_else(|| {
        StoreError::MalformedResponse(format!("row {row}: unknown direction marker"))
    })?;

    let mut tires: [Option<TireObservation>; 10] = Default::default();
    for (n, slot) in tires.iter_mut().enumerate() {
        let base = TIRE_BLOCKS_START + n * TIRE_BLOCK_WIDTH;
        let observation = TireObservation {
            position_id: n as u8 + 1,
            pressure_checked: cell(cells, base + 1) == MARK_CHECK,
            studs_checked: cell(cells, base + 2) == MARK_CHECK,
            tread_checked: cell(cells, base + 3) == MARK_CHECK,
            worn: cell(cells, base + 4) == MARK_WEAR,
        };
        let observed = observation.pressure_checked
            || observation.studs_checked
            || observation.tread_checked
            || observation.worn;
        if observed {
            *slot = Some(observation);
        }
    }

    let fluids: [FluidCheck; 4] = std::array::from_fn(|n| {
        let base = FLUID_BLOCKS_START + n * FLUID_BLOCK_WIDTH;
        FluidCheck {
            name: cell(cells, base + 1).to_string(),
            required: cell(cells, base + 2) == MARK_CHECK,
            full: cell(cells, base + 3) == MARK_CHECK,
        }
    });

    let visuals: [VisualCheck; 4] = std::array::from_fn(|n| {
        let base = VISUAL_PAIRS_START + n * 2;
        VisualCheck {
            name: cell(cells, base).to_string(),
            ok: cell(cells, base + 1) == OPT_YES,
        }
    });

    let lights: [LightCheck; 8] = std::array::from_fn(|n| {
        let base = LIGHT_PAIRS_START + n * 2;
        LightCheck {
            name: cell(cells, base).to_string(),
            works: opt_from_cell(cell(cells, base + 1)),
        }
    });

    let supplies: [SupplyCheck; 8] = std::array::from_fn(|n| {
        let base = SUPPLY_PAIRS_START + n * 2;
        SupplyCheck {
            name: cell(cells, base).to_string(),
            available: opt_from_cell(cell(cells, base + 1)),
        }
    });

    let documents: [DocumentCheck; 8] = std::array::from_fn(|n| {
        let base = DOCUMENT_PAIRS_START + n * 2;
        DocumentCheck {
            name: cell(cells, base).to_string(),
            available: cell(cells, base + 1) == OPT_YES,
        }
    });

    let damage: [BodyDamageCheck; 4] = std::array::from_fn(|n| {
        let base = DAMAGE_BLOCKS_START + n * DAMAGE_BLOCK_WIDTH;
        BodyDamageCheck {
            view: cell(cells, base + 1).to_string(),
            scratched: cell(cells, base + 2) == MARK_SCRATCH,
            dented: cell(cells, base + 3) == MARK_DENT,
            broken: cell(cells, base + 4) == MARK_BREAK,
            missing: cell(cells, base + 5) == MARK_MISSING,
        }
    });

    let entry = match direction {
        Direction::Exit => None,
        Direction::Entry => {
            let revisions: [EntryRevision; 12] = std::array::from_fn(|n| {
                let base = REVISION_PAIRS_START + n * 2;
                EntryRevision {
                    description: cell(cells, base).to_string(),
                    passed: opt_from_cell(cell(cells, base + 1)),
                }
            });
            Some(EntryCompletion {
                revisions,
                remarks: cell(cells, COL_ENTRY_REMARKS).to_string(),
                return_time: NaiveTime::parse_from_str(
                    cell(cells, COL_RETURN_TIME),
                    TIME_FORMAT,
                )
                .unwrap_or(NaiveTime::MIN),
                entry_odometer: parse_odometer(cell(cells, COL_ENTRY_ODOMETER)),
            })
        }
    };

    Ok(InspectionRecord {
        timestamp,
        plate: cell(cells, COL_PLATE).trim().to_string(),
        driver: cell(cells, COL_DRIVER).to_string(),
        branch: cell(cells, COL_BRANCH).to_string(),
        vehicle_type: cell(cells, COL_VEHICLE_TYPE).to_string(),
        exit_odometer: parse_odometer(cell(cells, COL_EXIT_ODOMETER)),
        direction,
        tires,
        tire_remarks: cell(cells, COL_TIRE_REMARKS).to_string(),
        fluids,
        fluid_remarks: cell(cells, COL_FLUID_REMARKS).to_string(),
        visuals,
        visual_remarks: cell(cells, COL_VISUAL_REMARKS).to_string(),
        lights,
        supplies,
        documents,
        damage,
        departure_time: NaiveTime::parse_from_str(cell(cells, COL_DEPARTURE_TIME), TIME_FORMAT)
            .unwrap_or(NaiveTime::MIN),
        entry,
    })
}
