//! Fleet registry implementations and loaders

mod csv_import;
mod sheet_fleet_registry;

pub use csv_import::{load_fleet_csv, seed_registry_sheet, FleetVehicleRow, RegistryCsvError};
pub use sheet_fleet_registry::SheetFleetRegistry;
