//! CSV loader for fleet registry rows
//!
//! Expected CSV header:
//! vehicle_number,plate,vehicle_type,wheel_count

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use garita_store::SheetsClient;
use garita_types::{Result, TireConfiguration};

use super::sheet_fleet_registry::{
    REGISTRY_COL_KIND, REGISTRY_COL_PLATE, REGISTRY_COL_VEHICLE_NUMBER,
};

#[derive(Error, Debug)]
pub enum RegistryCsvError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid wheel count in row {row}: {value} (expected 4, 6 or 10)")]
    InvalidWheelCount { row: usize, value: u32 },
}

/// One vehicle of the fleet registry.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetVehicleRow {
    pub vehicle_number: String,
    pub plate: String,
    #[serde(default)]
    pub vehicle_type: String,
    #[serde(default)]
    pub wheel_count: Option<u32>,
}

impl FleetVehicleRow {
    pub fn tire_configuration(&self) -> TireConfiguration {
        self.wheel_count
            .and_then(TireConfiguration::from_wheel_count)
            .unwrap_or_default()
    }
}

/// Load fleet registry rows from a CSV file.
pub fn load_fleet_csv<P: AsRef<Path>>(path: P) -> std::result::Result<Vec<FleetVehicleRow>, RegistryCsvError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for (index, result) in reader.deserialize().enumerate() {
        let row: FleetVehicleRow = result?;
        if let Some(count) = row.wheel_count {
            if TireConfiguration::from_wheel_count(count).is_none() {
                return Err(RegistryCsvError::InvalidWheelCount {
                    row: index + 2,
                    value: count,
                });
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Rewrite the registry sheet from loaded rows (header plus one row per
/// vehicle, in the sheet's A/C/D column layout).
pub fn seed_registry_sheet(
    client: &Arc<dyn SheetsClient>,
    sheet: &str,
    rows: &[FleetVehicleRow],
) -> Result<()> {
    let width = REGISTRY_COL_KIND + 1;
    let mut header = vec![String::new(); width];
    header[REGISTRY_COL_VEHICLE_NUMBER] = "Vehículo".to_string();
    header[REGISTRY_COL_PLATE] = "Placa".to_string();
    header[REGISTRY_COL_KIND] = "Tipo de Vehículo".to_string();

    let mut matrix = vec![header];
    for row in rows {
        let mut cells = vec![String::new(); width];
        cells[REGISTRY_COL_VEHICLE_NUMBER] = row.vehicle_number.clone();
        cells[REGISTRY_COL_PLATE] = row.plate.trim().to_uppercase();
        cells[REGISTRY_COL_KIND] = row
            .wheel_count
            .map(|count| count.to_string())
            .unwrap_or_else(|| row.vehicle_type.clone());
        matrix.push(cells);
    }

    let range = garita_store::RangeSpec::scan(sheet, 1, 0, width - 1);
    client.update_range(&range, matrix)?;
    tracing::info!(sheet, vehicles = rows.len(), "fleet registry seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use garita_domain::repository::FleetRegistry;
    use garita_store::MemorySheetsClient;
    use garita_types::TireConfiguration;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_fleet_csv() {
        let file = write_csv(
            "vehicle_number,plate,vehicle_type,wheel_count\n\
             V-12,abc123,sedan,4\n\
             V-13,CDE456,camión,6\n",
        );
        let rows = load_fleet_csv(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].tire_configuration(), TireConfiguration::Six);
    }

    #[test]
    fn test_rejects_bad_wheel_count() {
        let file = write_csv(
            "vehicle_number,plate,vehicle_type,wheel_count\n\
             V-12,ABC123,sedan,5\n",
        );
        let result = load_fleet_csv(file.path());
        assert!(matches!(
            result,
            Err(RegistryCsvError::InvalidWheelCount { row: 2, value: 5 })
        ));
    }

    #[test]
    fn test_seed_then_lookup() {
        let file = write_csv(
            "vehicle_number,plate,vehicle_type,wheel_count\n\
             V-14,fgh789,articulado,10\n",
        );
        let rows = load_fleet_csv(file.path()).unwrap();

        let client: Arc<dyn SheetsClient> = Arc::new(MemorySheetsClient::in_memory());
        seed_registry_sheet(&client, "Lista de Placas", &rows).unwrap();

        let registry = super::super::SheetFleetRegistry::new(
            client,
            "Lista de Placas",
            Default::default(),
        );
        assert_eq!(
            registry.tire_configuration("FGH789").unwrap(),
            TireConfiguration::Ten
        );
    }
}
