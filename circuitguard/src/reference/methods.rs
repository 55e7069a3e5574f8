//! Installation method vocabulary and BS 7671 reference methods.

use serde::{Deserialize, Serialize};

/// Code assumed whenever the installation method is missing or unrecognised.
pub const DEFAULT_METHOD_CODE: u16 = 103;

/// Reference installation condition used to pick a column of the Iz tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceMethod {
    /// Enclosed in conduit in a thermally insulating wall
    A,
    /// Enclosed in conduit or trunking on a wall
    B,
    /// Clipped direct
    C,
    /// In ducts or direct in the ground
    D,
    /// In free air or on a perforated tray
    E,
}

impl ReferenceMethod {
    pub fn letter(&self) -> char {
        match self {
            ReferenceMethod::A => 'A',
            ReferenceMethod::B => 'B',
            ReferenceMethod::C => 'C',
            ReferenceMethod::D => 'D',
            ReferenceMethod::E => 'E',
        }
    }
}

/// The fixed installation-method vocabulary accepted from callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallationMethod {
    ThermalInsulation,
    Conduit,
    Trunking,
    ClippedDirect,
    Underground,
    FreeAir,
}

impl InstallationMethod {
    /// Numeric code recorded on the schedule.
    pub fn code(&self) -> u16 {
        match self {
            InstallationMethod::ThermalInsulation => 100,
            InstallationMethod::Conduit => 101,
            InstallationMethod::Trunking => 102,
            InstallationMethod::ClippedDirect => 103,
            InstallationMethod::Underground => 104,
            InstallationMethod::FreeAir => 105,
        }
    }

    pub fn reference_method(&self) -> ReferenceMethod {
        match self {
            InstallationMethod::ThermalInsulation => ReferenceMethod::A,
            InstallationMethod::Conduit | InstallationMethod::Trunking => ReferenceMethod::B,
            InstallationMethod::ClippedDirect => ReferenceMethod::C,
            InstallationMethod::Underground => ReferenceMethod::D,
            InstallationMethod::FreeAir => ReferenceMethod::E,
        }
    }

    /// Classify a free-text installation description. Total: anything not
    /// recognised is treated as clipped direct.
    pub fn classify(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return InstallationMethod::ClippedDirect;
        };
        let lower = text.trim().to_lowercase();

        if let Ok(code) = lower.parse::<u16>() {
            return Self::from_code(code).unwrap_or(InstallationMethod::ClippedDirect);
        }

        match lower.as_str() {
            "a" | "a1" | "a2" => return InstallationMethod::ThermalInsulation,
            "b" | "b1" | "b2" => return InstallationMethod::Conduit,
            "c" => return InstallationMethod::ClippedDirect,
            "d" | "d1" | "d2" => return InstallationMethod::Underground,
            "e" | "f" | "g" => return InstallationMethod::FreeAir,
            _ => {}
        }

        if lower.contains("insulat") {
            InstallationMethod::ThermalInsulation
        } else if lower.contains("conduit") {
            InstallationMethod::Conduit
        } else if lower.contains("trunking") {
            InstallationMethod::Trunking
        } else if lower.contains("buried") || lower.contains("underground") || lower.contains("duct") {
            InstallationMethod::Underground
        } else if lower.contains("free air") || lower.contains("tray") || lower.contains("ladder") {
            InstallationMethod::FreeAir
        } else {
            InstallationMethod::ClippedDirect
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            100 => Some(InstallationMethod::ThermalInsulation),
            101 => Some(InstallationMethod::Conduit),
            102 => Some(InstallationMethod::Trunking),
            103 => Some(InstallationMethod::ClippedDirect),
            104 => Some(InstallationMethod::Underground),
            105 => Some(InstallationMethod::FreeAir),
            _ => None,
        }
    }
}

/// Numeric reference-method code for a free-text installation method.
pub fn reference_method_code(method: Option<&str>) -> u16 {
    InstallationMethod::classify(method).code()
}
