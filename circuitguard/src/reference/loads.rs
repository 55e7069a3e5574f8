//! Load type vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a circuit feeds. Parsing is total: unrecognised descriptions are kept
/// as [`LoadType::Other`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoadType {
    Lighting,
    Socket,
    Cooker,
    Shower,
    Immersion,
    Heating,
    EvCharger,
    Motor,
    Other(String),
}

impl LoadType {
    pub fn parse(text: &str) -> Self {
        let lower = text.trim().to_lowercase();
        if lower.contains("light") {
            LoadType::Lighting
        } else if lower.contains("socket") || lower.starts_with("ring") || lower.contains(" ring") {
            LoadType::Socket
        } else if lower.contains("cooker") || lower.contains("oven") || lower.contains("hob") {
            LoadType::Cooker
        } else if lower.contains("shower") {
            LoadType::Shower
        } else if lower.contains("immersion") {
            LoadType::Immersion
        } else if (lower.contains("ev") && lower.contains("charg"))
            || lower == "ev"
            || lower.contains("electric vehicle")
        {
            LoadType::EvCharger
        } else if lower.contains("heat") {
            LoadType::Heating
        } else if lower.contains("motor") {
            LoadType::Motor
        } else {
            LoadType::Other(text.trim().to_string())
        }
    }

    /// Number of points a circuit of this kind typically serves on the
    /// schedule. Single-point loads and anything unrecognised count as 1.
    pub fn points_served(&self) -> u32 {
        match self {
            LoadType::Lighting => 10,
            LoadType::Socket => 8,
            LoadType::Cooker
            | LoadType::Shower
            | LoadType::Immersion
            | LoadType::Heating
            | LoadType::EvCharger
            | LoadType::Motor
            | LoadType::Other(_) => 1,
        }
    }

    pub fn is_lighting(&self) -> bool {
        matches!(self, LoadType::Lighting)
    }

    pub fn as_str(&self) -> &str {
        match self {
            LoadType::Lighting => "lighting",
            LoadType::Socket => "socket",
            LoadType::Cooker => "cooker",
            LoadType::Shower => "shower",
            LoadType::Immersion => "immersion",
            LoadType::Heating => "heating",
            LoadType::EvCharger => "ev-charger",
            LoadType::Motor => "motor",
            LoadType::Other(name) => name,
        }
    }
}

impl From<String> for LoadType {
    fn from(value: String) -> Self {
        LoadType::parse(&value)
    }
}

impl From<&str> for LoadType {
    fn from(value: &str) -> Self {
        LoadType::parse(value)
    }
}

impl From<LoadType> for String {
    fn from(value: LoadType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for LoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_served() {
        assert_eq!(LoadType::parse("Lighting").points_served(), 10);
        assert_eq!(LoadType::parse("Ring final sockets").points_served(), 8);
        assert_eq!(LoadType::parse("shower").points_served(), 1);
        assert_eq!(LoadType::parse("EV charger").points_served(), 1);
        assert_eq!(LoadType::parse("bespoke").points_served(), 1);
    }

    #[test]
    fn test_unknown_load_is_kept() {
        assert_eq!(LoadType::parse(" bespoke "), LoadType::Other("bespoke".to_string()));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&LoadType::EvCharger).unwrap();
        assert_eq!(json, "\"ev-charger\"");
        let parsed: LoadType = serde_json::from_str("\"ev-charger\"").unwrap();
        assert_eq!(parsed, LoadType::EvCharger);
        let other: LoadType = serde_json::from_str("\"sauna\"").unwrap();
        assert_eq!(other, LoadType::Other("sauna".to_string()));
    }
}
