//! Copper conductor data: resistance, voltage drop and current-carrying
//! capacity for the cable types the engine knows about.

use serde::{Deserialize, Serialize};

use super::methods::ReferenceMethod;
use super::same_size;

/// Copper conductor resistance at 20 °C in mΩ/m, ascending by area.
pub const CONDUCTOR_RESISTANCE_MOHM_PER_M: &[(f64, f64)] = &[
    (1.0, 18.10),
    (1.5, 12.10),
    (2.5, 7.41),
    (4.0, 4.61),
    (6.0, 3.08),
    (10.0, 1.83),
    (16.0, 1.15),
    (25.0, 0.727),
    (35.0, 0.524),
    (50.0, 0.387),
    (70.0, 0.268),
    (95.0, 0.193),
    (120.0, 0.153),
    (150.0, 0.124),
    (185.0, 0.0991),
    (240.0, 0.0754),
    (300.0, 0.0601),
];

/// Two-conductor (single-phase) voltage drop in mV/A/m at 70 °C.
const VOLTAGE_DROP_MV_PER_AMP_METRE: &[(f64, f64)] = &[
    (1.0, 44.0),
    (1.5, 29.0),
    (2.5, 18.0),
    (4.0, 11.0),
    (6.0, 7.3),
    (10.0, 4.4),
    (16.0, 2.8),
    (25.0, 1.75),
    (35.0, 1.25),
    (50.0, 0.93),
    (70.0, 0.65),
    (95.0, 0.49),
    (120.0, 0.41),
];

const TWIN_AND_EARTH_SIZES: [f64; 7] = [1.0, 1.5, 2.5, 4.0, 6.0, 10.0, 16.0];

// 70 °C thermoplastic flat twin & earth, two loaded conductors.
const TWIN_AND_EARTH_METHOD_A: [f64; 7] = [11.5, 14.5, 20.0, 26.0, 32.0, 44.0, 57.0];
const TWIN_AND_EARTH_METHOD_B: [f64; 7] = [13.0, 16.5, 23.0, 30.0, 38.0, 52.0, 69.0];
const TWIN_AND_EARTH_METHOD_C: [f64; 7] = [16.0, 20.0, 27.0, 37.0, 47.0, 64.0, 85.0];
const TWIN_AND_EARTH_METHOD_E: [f64; 7] = [17.0, 22.0, 30.0, 40.0, 51.0, 70.0, 94.0];

const SINGLE_CORE_SIZES: [f64; 13] = [
    1.0, 1.5, 2.5, 4.0, 6.0, 10.0, 16.0, 25.0, 35.0, 50.0, 70.0, 95.0, 120.0,
];

// 70 °C thermoplastic single-core, two cables single-phase.
const SINGLE_CORE_1PH_METHOD_A: [f64; 13] = [
    11.0, 14.5, 19.5, 26.0, 34.0, 46.0, 61.0, 80.0, 99.0, 119.0, 151.0, 182.0, 210.0,
];
const SINGLE_CORE_1PH_METHOD_B: [f64; 13] = [
    13.5, 17.5, 24.0, 32.0, 41.0, 57.0, 76.0, 101.0, 125.0, 151.0, 192.0, 232.0, 269.0,
];
const SINGLE_CORE_1PH_METHOD_C: [f64; 13] = [
    15.5, 20.0, 27.0, 37.0, 47.0, 65.0, 87.0, 114.0, 141.0, 182.0, 234.0, 284.0, 330.0,
];

// Three or four cables, three-phase.
const SINGLE_CORE_3PH_METHOD_A: [f64; 13] = [
    10.5, 13.5, 18.0, 24.0, 31.0, 42.0, 56.0, 73.0, 89.0, 108.0, 136.0, 164.0, 188.0,
];
const SINGLE_CORE_3PH_METHOD_B: [f64; 13] = [
    12.0, 15.5, 21.0, 28.0, 36.0, 50.0, 68.0, 89.0, 110.0, 134.0, 171.0, 207.0, 239.0,
];
const SINGLE_CORE_3PH_METHOD_C: [f64; 13] = [
    14.0, 18.0, 25.0, 33.0, 43.0, 59.0, 79.0, 104.0, 129.0, 167.0, 214.0, 261.0, 303.0,
];

const SWA_SIZES: [f64; 12] = [
    1.5, 2.5, 4.0, 6.0, 10.0, 16.0, 25.0, 35.0, 50.0, 70.0, 95.0, 120.0,
];

// 90 °C XLPE steel wire armoured, multicore.
const SWA_METHOD_C: [f64; 12] = [
    32.0, 43.0, 57.0, 73.0, 98.0, 131.0, 168.0, 201.0, 242.0, 310.0, 375.0, 431.0,
];
// D1 (in ducts) is the lower of the two buried columns.
const SWA_METHOD_D: [f64; 12] = [
    25.0, 33.0, 44.0, 56.0, 75.0, 100.0, 128.0, 153.0, 184.0, 236.0, 285.0, 328.0,
];
const SWA_METHOD_E: [f64; 12] = [
    36.0, 48.0, 64.0, 82.0, 110.0, 147.0, 189.0, 226.0, 272.0, 348.0, 421.0, 484.0,
];

/// Cable construction, which selects the capacity table and CPC sizing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CableType {
    /// Flat twin & earth with a reduced CPC (6242Y).
    #[default]
    TwinAndEarth,
    /// Single-core conductors drawn into conduit or trunking (6491X).
    SingleCore,
    /// Steel wire armoured multicore (6944X). The only construction rated
    /// for burial; a spare core serves as CPC.
    Swa,
}

impl CableType {
    /// Tabulated sizes for this construction, ascending.
    pub fn sizes(&self) -> &'static [f64] {
        match self {
            CableType::TwinAndEarth => &TWIN_AND_EARTH_SIZES,
            CableType::SingleCore => &SINGLE_CORE_SIZES,
            CableType::Swa => &SWA_SIZES,
        }
    }

    /// Construction actually used for a run. Buried runs are always SWA,
    /// whatever was requested.
    pub fn for_method(self, method: ReferenceMethod) -> Self {
        match method {
            ReferenceMethod::D => CableType::Swa,
            _ => self,
        }
    }

    fn capacity_column(&self, method: ReferenceMethod, three_phase: bool) -> Option<&'static [f64]> {
        match (self, method) {
            (CableType::TwinAndEarth, ReferenceMethod::A) => Some(&TWIN_AND_EARTH_METHOD_A),
            (CableType::TwinAndEarth, ReferenceMethod::B) => Some(&TWIN_AND_EARTH_METHOD_B),
            (CableType::TwinAndEarth, ReferenceMethod::C) => Some(&TWIN_AND_EARTH_METHOD_C),
            (CableType::TwinAndEarth, ReferenceMethod::E) => Some(&TWIN_AND_EARTH_METHOD_E),
            (CableType::SingleCore, ReferenceMethod::A) if three_phase => Some(&SINGLE_CORE_3PH_METHOD_A),
            (CableType::SingleCore, ReferenceMethod::A) => Some(&SINGLE_CORE_1PH_METHOD_A),
            (CableType::SingleCore, ReferenceMethod::B) if three_phase => Some(&SINGLE_CORE_3PH_METHOD_B),
            (CableType::SingleCore, ReferenceMethod::B) => Some(&SINGLE_CORE_1PH_METHOD_B),
            // Free-air ratings exceed clipped-direct ones, so C is the safe column for E.
            (CableType::SingleCore, ReferenceMethod::C | ReferenceMethod::E) if three_phase => {
                Some(&SINGLE_CORE_3PH_METHOD_C)
            }
            (CableType::SingleCore, ReferenceMethod::C | ReferenceMethod::E) => {
                Some(&SINGLE_CORE_1PH_METHOD_C)
            }
            (CableType::Swa, ReferenceMethod::C) => Some(&SWA_METHOD_C),
            (CableType::Swa, ReferenceMethod::D) => Some(&SWA_METHOD_D),
            (CableType::Swa, ReferenceMethod::E) => Some(&SWA_METHOD_E),
            // SWA is not installed in insulated walls or conduit; the others
            // are never buried.
            (CableType::Swa, ReferenceMethod::A | ReferenceMethod::B) => None,
            (_, ReferenceMethod::D) => None,
        }
    }
}

/// Resistance per metre (mΩ/m at 20 °C) for a nominal conductor area.
pub fn conductor_resistance(size_mm2: f64) -> Option<f64> {
    CONDUCTOR_RESISTANCE_MOHM_PER_M
        .iter()
        .find(|(size, _)| same_size(*size, size_mm2))
        .map(|(_, r)| *r)
}

/// Voltage drop per amp per metre. Three-phase values are the line-to-line
/// figures (√3/2 of the single-phase loop value).
pub fn voltage_drop_mv_per_amp_metre(size_mm2: f64, three_phase: bool) -> Option<f64> {
    let single = VOLTAGE_DROP_MV_PER_AMP_METRE
        .iter()
        .find(|(size, _)| same_size(*size, size_mm2))
        .map(|(_, mv)| *mv)?;
    if three_phase {
        Some(single * 3f64.sqrt() / 2.0)
    } else {
        Some(single)
    }
}

/// Tabulated current-carrying capacity Iz for a cable installed by the given
/// reference method. `None` when the size or method is not tabulated.
pub fn tabulated_rating(
    cable: CableType,
    method: ReferenceMethod,
    three_phase: bool,
    size_mm2: f64,
) -> Option<f64> {
    let column = cable.capacity_column(method, three_phase)?;
    cable
        .sizes()
        .iter()
        .position(|s| same_size(*s, size_mm2))
        .map(|idx| column[idx])
}

/// Circuit protective conductor size when the design does not declare one.
pub fn default_cpc_size(cable: CableType, live_mm2: f64) -> Option<f64> {
    match cable {
        CableType::TwinAndEarth => {
            let cpc = match live_mm2 {
                s if same_size(s, 1.0) => 1.0,
                s if same_size(s, 1.5) => 1.0,
                s if same_size(s, 2.5) => 1.5,
                s if same_size(s, 4.0) => 1.5,
                s if same_size(s, 6.0) => 2.5,
                s if same_size(s, 10.0) => 4.0,
                s if same_size(s, 16.0) => 6.0,
                _ => return None,
            };
            Some(cpc)
        }
        // Table 54.7: S ≤ 16 → S, 16 < S ≤ 35 → 16, S > 35 → S/2.
        CableType::SingleCore => {
            let cpc = if live_mm2 <= 16.0 {
                live_mm2
            } else if live_mm2 <= 35.0 {
                16.0
            } else {
                live_mm2 / 2.0
            };
            conductor_resistance(cpc).map(|_| cpc)
        }
        CableType::Swa => conductor_resistance(live_mm2).map(|_| live_mm2),
    }
}
