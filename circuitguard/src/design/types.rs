use serde::{Deserialize, Serialize};

use crate::reference::{
    CableType, LoadType, ReferenceMethod, DEFAULT_BREAKING_CAPACITY_KA, DEFAULT_CURVE,
    DEFAULT_DEVICE_TYPE,
};

/// Supply arrangement of a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phases {
    #[default]
    #[serde(alias = "single-phase", alias = "1")]
    Single,
    #[serde(alias = "three-phase", alias = "3")]
    Three,
}

impl Phases {
    /// Read a free-text phase descriptor. Anything mentioning "three" (or a
    /// bare 3) is three-phase, everything else single-phase.
    pub fn from_descriptor(text: &str) -> Self {
        let lower = text.trim().to_lowercase();
        if lower.contains("three") || lower == "3" || lower.starts_with("3-") || lower.starts_with("3 ") {
            Phases::Three
        } else {
            Phases::Single
        }
    }

    pub fn is_three(&self) -> bool {
        matches!(self, Phases::Three)
    }

    /// Label printed in the schedule's phase column.
    pub fn label(&self) -> &'static str {
        match self {
            Phases::Single => "single-phase",
            Phases::Three => "three-phase",
        }
    }
}

/// Protective device as chosen by the designer. Every field is optional;
/// the engine fills gaps from the catalogue defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceSpec {
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub curve: Option<String>,
    /// Rated current In in amps.
    pub rating: Option<f64>,
    pub breaking_capacity_ka: Option<f64>,
}

impl DeviceSpec {
    pub fn new(device_type: &str, curve: &str, rating: f64) -> Self {
        Self {
            device_type: Some(device_type.to_string()),
            curve: Some(curve.to_string()),
            rating: Some(rating),
            breaking_capacity_ka: None,
        }
    }

    pub fn device_type_or_default(&self) -> &str {
        self.device_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_DEVICE_TYPE)
    }

    pub fn curve_or_default(&self) -> &str {
        self.curve
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CURVE)
    }

    pub fn breaking_capacity_or_default(&self) -> f64 {
        self.breaking_capacity_ka.unwrap_or(DEFAULT_BREAKING_CAPACITY_KA)
    }
}

/// Electrical parameters of one circuit, as entered by the designer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitParameters {
    #[serde(default)]
    pub name: String,
    /// Connected load in watts. Ignored when `design_current_a` is set.
    #[serde(default)]
    pub load_power_w: Option<f64>,
    /// Explicit design current Ib in amps.
    #[serde(default)]
    pub design_current_a: Option<f64>,
    /// Single-phase: line-to-neutral. Three-phase: line-to-line.
    pub voltage_v: f64,
    #[serde(default)]
    pub phases: Phases,
    #[serde(default)]
    pub cable_length_m: Option<f64>,
    #[serde(default)]
    pub installation_method: Option<String>,
    pub load_type: LoadType,
    #[serde(default)]
    pub cable_type: CableType,
    #[serde(default)]
    pub live_size_mm2: Option<f64>,
    #[serde(default)]
    pub cpc_size_mm2: Option<f64>,
    #[serde(default)]
    pub device: Option<DeviceSpec>,
    /// External earth fault loop impedance in ohms.
    #[serde(default)]
    pub ze_ohms: Option<f64>,
    #[serde(default)]
    pub rcd_required: bool,
    #[serde(default)]
    pub afdd_required: bool,
}

impl CircuitParameters {
    /// Single-phase circuit sized from its connected load.
    pub fn single_phase(load_power_w: f64, voltage_v: f64, load_type: impl Into<LoadType>) -> Self {
        Self {
            name: String::new(),
            load_power_w: Some(load_power_w),
            design_current_a: None,
            voltage_v,
            phases: Phases::Single,
            cable_length_m: None,
            installation_method: None,
            load_type: load_type.into(),
            cable_type: CableType::TwinAndEarth,
            live_size_mm2: None,
            cpc_size_mm2: None,
            device: None,
            ze_ohms: None,
            rcd_required: false,
            afdd_required: false,
        }
    }

    /// Balanced three-phase circuit in single-core cable; `voltage_v` is
    /// line-to-line.
    pub fn three_phase(load_power_w: f64, voltage_v: f64, load_type: impl Into<LoadType>) -> Self {
        Self {
            phases: Phases::Three,
            cable_type: CableType::SingleCore,
            ..Self::single_phase(load_power_w, voltage_v, load_type)
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_length(mut self, metres: f64) -> Self {
        self.cable_length_m = Some(metres);
        self
    }

    pub fn with_method(mut self, method: &str) -> Self {
        self.installation_method = Some(method.to_string());
        self
    }

    pub fn with_cable(mut self, live_mm2: f64, cpc_mm2: Option<f64>) -> Self {
        self.live_size_mm2 = Some(live_mm2);
        self.cpc_size_mm2 = cpc_mm2;
        self
    }

    pub fn with_device(mut self, device: DeviceSpec) -> Self {
        self.device = Some(device);
        self
    }

    pub fn with_ze(mut self, ze_ohms: f64) -> Self {
        self.ze_ohms = Some(ze_ohms);
        self
    }
}

/// Ground-truth design quantities for one circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignResult {
    /// Ib, amps
    pub design_current: f64,
    /// In, amps
    pub selected_device_rating: f64,
    /// Iz, amps
    pub tabulated_cable_rating: f64,
    pub live_size_mm2: f64,
    pub cpc_size_mm2: f64,
    /// R1+R2 at operating temperature, ohms. `None` without a cable length.
    pub expected_conductor_resistance: Option<f64>,
    /// `None` without a cable length.
    pub expected_voltage_drop_percent: Option<f64>,
    pub reference_method_code: u16,
    pub reference_method: ReferenceMethod,
    /// Construction the figures were taken from; SWA for buried runs.
    pub cable_type: CableType,
    pub load_type: LoadType,
    pub device_type: String,
    pub device_curve: String,
    /// Ze + R1+R2 when both are known.
    pub expected_zs: Option<f64>,
    /// Disconnection-time limit for the chosen device.
    pub max_zs: Option<f64>,
}
