//! Sheet-backed fleet registry
//!
//! The registry sheet ("Lista de Placas") keys declared vehicle data by
//! plate: column A vehicle number, column C plate, column D wheel count or
//! vehicle kind. Branch e-mail recipients come from configuration, keyed by
//! the full branch name.

use std::collections::HashMap;
use std::sync::Arc;

use garita_domain::repository::FleetRegistry;
use garita_domain::service::normalize_plate;
use garita_store::{RangeSpec, SheetsClient};
use garita_types::{Result, TireConfiguration};

pub(crate) const REGISTRY_COL_VEHICLE_NUMBER: usize = 0;
pub(crate) const REGISTRY_COL_PLATE: usize = 2;
pub(crate) const REGISTRY_COL_KIND: usize = 3;

pub struct SheetFleetRegistry {
    client: Arc<dyn SheetsClient>,
    sheet: String,
    recipients: HashMap<String, Vec<String>>,
}

impl SheetFleetRegistry {
    pub fn new(
        client: Arc<dyn SheetsClient>,
        sheet: impl Into<String>,
        recipients: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            client,
            sheet: sheet.into(),
            recipients,
        }
    }
}

/// Map a registry kind cell to a tire configuration.
///
/// Accepts a plain wheel count ("4", "6", "10") or a vehicle kind word;
/// anything unrecognized falls back to the four-wheel configuration.
fn parse_configuration(cell: &str) -> TireConfiguration {
    let value = cell.trim().to_lowercase();
    if let Ok(count) = value.parse::<u32>() {
        return TireConfiguration::from_wheel_count(count).unwrap_or_default();
    }
    match value.as_str() {
        "camion" | "camión" => TireConfiguration::Six,
        "articulado" => TireConfiguration::Ten,
        _ => TireConfiguration::Four,
    }
}

impl FleetRegistry for SheetFleetRegistry {
    fn tire_configuration(&self, plate: &str) -> Result<TireConfiguration> {
        let range = RangeSpec::scan(self.sheet.as_str(), 2, REGISTRY_COL_PLATE, REGISTRY_COL_KIND);
        let rows = self.client.get_rows(&range)?;

        let wanted = normalize_plate(plate);
        for cells in &rows {
            let row_plate = cells.first().map(String::as_str).unwrap_or("");
            if normalize_plate(row_plate) == wanted {
                let kind = cells.get(1).map(String::as_str).unwrap_or("");
                return Ok(parse_configuration(kind));
            }
        }

        tracing::debug!(plate = %wanted, "plate not in registry, defaulting to four wheels");
        Ok(TireConfiguration::Four)
    }

    fn branch_recipients(&self, branch: &str) -> Result<Vec<String>> {
        match self.recipients.get(branch.trim()) {
            Some(recipients) => Ok(recipients.clone()),
            None => {
                tracing::warn!(branch, "no report recipients configured for branch");
                Ok(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garita_store::MemorySheetsClient;

    fn registry(recipients: HashMap<String, Vec<String>>) -> SheetFleetRegistry {
        let client = Arc::new(MemorySheetsClient::in_memory());
        client
            .seed(
                "Lista de Placas",
                vec![
                    vec!["Vehículo".into(), "".into(), "Placa".into(), "Tipo".into()],
                    vec!["V-12".into(), "".into(), "ABC123".into(), "sedan".into()],
                    vec!["V-13".into(), "".into(), "CDE456".into(), "camión".into()],
                    vec!["V-14".into(), "".into(), "FGH789".into(), "10".into()],
                ],
            )
            .unwrap();
        SheetFleetRegistry::new(client, "Lista de Placas", recipients)
    }

    #[test]
    fn test_tire_configuration_lookup() {
        let registry = registry(HashMap::new());
        assert_eq!(registry.tire_configuration("abc123").unwrap(), TireConfiguration::Four);
        assert_eq!(registry.tire_configuration("CDE456").unwrap(), TireConfiguration::Six);
        assert_eq!(registry.tire_configuration(" fgh789 ").unwrap(), TireConfiguration::Ten);
    }

    #[test]
    fn test_unknown_plate_defaults_to_four() {
        let registry = registry(HashMap::new());
        assert_eq!(registry.tire_configuration("ZZZ000").unwrap(), TireConfiguration::Four);
    }

    #[test]
    fn test_branch_recipients() {
        let mut recipients = HashMap::new();
        recipients.insert(
            "(SU03) Chorrera".to_string(),
            vec!["registro@example.com".to_string()],
        );
        let registry = registry(recipients);

        assert_eq!(
            registry.branch_recipients("(SU03) Chorrera").unwrap(),
            vec!["registro@example.com".to_string()]
        );
        assert!(registry.branch_recipients("(SU09) Los Santos").unwrap().is_empty());
    }
}
