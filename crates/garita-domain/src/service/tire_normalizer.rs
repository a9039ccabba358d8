//! Tire checklist normalization
//!
//! Vehicles declare a 4-, 6- or 10-wheel configuration; each configuration
//! fixes the set of valid position IDs and the canonical slot order, so the
//! export layout never depends on submission order.

use garita_types::{Error, Result, TireConfiguration};

use crate::model::TireObservation;

/// Normalize a submitted tire list against a configuration.
///
/// The result always has exactly `configuration.slot_count()` slots, in the
/// configuration's canonical ID order; positions with no submitted
/// observation stay empty. Duplicate position IDs and IDs outside the
/// allowed set are input errors.
pub fn normalize(
    submitted: &[TireObservation],
    configuration: TireConfiguration,
) -> Result<Vec<Option<TireObservation>>> {
    let allowed = configuration.allowed_ids();

    let mut seen: Vec<u8> = Vec::with_capacity(submitted.len());
    for tire in submitted {
        if seen.contains(&tire.position_id) {
            return Err(Error::InvalidTireConfiguration(format!(
                "duplicate tire position ID {}",
                tire.position_id
            )));
        }
        seen.push(tire.position_id);
    }

    let invalid: Vec<u8> = seen
        .iter()
        .copied()
        .filter(|id| !allowed.contains(id))
        .collect();
    if !invalid.is_empty() {
        let ids: Vec<String> = invalid.iter().map(|id| id.to_string()).collect();
        return Err(Error::InvalidTireConfiguration(format!(
            "{configuration} configuration does not allow position IDs {}",
            ids.join(", ")
        )));
    }

    Ok(allowed
        .iter()
        .map(|id| submitted.iter().find(|tire| tire.position_id == *id).cloned())
        .collect())
}

/// Expand a normalized list into the ten export slots, one per position ID.
pub fn expand_to_slots(
    normalized: &[Option<TireObservation>],
) -> [Option<TireObservation>; 10] {
    let mut slots: [Option<TireObservation>; 10] = Default::default();
    for tire in normalized.iter().flatten() {
        let index = usize::from(tire.position_id).saturating_sub(1);
        if index < slots.len() {
            slots[index] = Some(tire.clone());
        }
    }
    slots
}
