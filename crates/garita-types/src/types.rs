use serde::{Deserialize, Serialize};

/// Direction of an inspection: the vehicle leaves the branch or returns to it.
///
/// Every plate alternates between the two; an exit with no later entry on the
/// same row is an "open exit".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Exit,
    Entry,
}

impl Direction {
    /// Marker string stored in the direction column of the inspection sheet.
    pub fn marker(&self) -> &'static str {
        match self {
            Direction::Exit => "salida",
            Direction::Entry => "entrada",
        }
    }

    /// Parse a direction column cell. Unknown markers yield `None`.
    pub fn from_marker(cell: &str) -> Option<Direction> {
        match cell.trim() {
            "salida" => Some(Direction::Exit),
            "entrada" => Some(Direction::Entry),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Exit => write!(f, "exit"),
            Direction::Entry => write!(f, "entry"),
        }
    }
}

/// Declared wheel-position count of a vehicle.
///
/// Fixes the set of tire position IDs a submission may carry and the slot
/// order of the normalized checklist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TireConfiguration {
    #[default]
    Four,
    Six,
    Ten,
}

impl TireConfiguration {
    /// Canonical position IDs for this configuration, in slot order.
    pub fn allowed_ids(&self) -> &'static [u8] {
        match self {
            TireConfiguration::Four => &[1, 2, 5, 7],
            TireConfiguration::Six => &[1, 2, 5, 6, 7, 8],
            TireConfiguration::Ten => &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
        }
    }

    /// Number of wheel positions in this configuration.
    pub fn slot_count(&self) -> usize {
        self.allowed_ids().len()
    }

    /// Map a declared wheel count (4, 6 or 10) to a configuration.
    pub fn from_wheel_count(count: u32) -> Option<TireConfiguration> {
        match count {
            4 => Some(TireConfiguration::Four),
            6 => Some(TireConfiguration::Six),
            10 => Some(TireConfiguration::Ten),
            _ => None,
        }
    }

    pub fn wheel_count(&self) -> u32 {
        self.slot_count() as u32
    }

    /// Whether a position ID belongs to this configuration.
    pub fn allows(&self, position_id: u8) -> bool {
        self.allowed_ids().contains(&position_id)
    }
}

impl std::fmt::Display for TireConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-wheel", self.wheel_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_marker_round_trip() {
        assert_eq!(Direction::from_marker("salida"), Some(Direction::Exit));
        assert_eq!(Direction::from_marker(" entrada "), Some(Direction::Entry));
        assert_eq!(Direction::from_marker("nueva"), None);
        assert_eq!(Direction::from_marker(Direction::Exit.marker()), Some(Direction::Exit));
    }

    #[test]
    fn test_tire_configuration_slots() {
        assert_eq!(TireConfiguration::Four.allowed_ids(), &[1, 2, 5, 7]);
        assert_eq!(TireConfiguration::Six.allowed_ids(), &[1, 2, 5, 6, 7, 8]);
        assert_eq!(TireConfiguration::Ten.slot_count(), 10);
        assert!(TireConfiguration::Four.allows(7));
        assert!(!TireConfiguration::Four.allows(9));
    }

    #[test]
    fn test_from_wheel_count() {
        assert_eq!(TireConfiguration::from_wheel_count(6), Some(TireConfiguration::Six));
        assert_eq!(TireConfiguration::from_wheel_count(5), None);
        assert_eq!(TireConfiguration::default(), TireConfiguration::Four);
    }
}
