//! BS 7671 Reference Data
//!
//! Static lookup tables used by the design calculator and the schedule
//! builder. Nothing in here is mutated at runtime.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  Conductors  │   │   Devices    │   │   Methods    │   │    Loads     │
//! │ mΩ/m, mV/A/m │   │ ratings, Zs  │   │ codes, A-E   │   │ points, kind │
//! │ Iz, CPC size │   │ BS standard  │   │              │   │              │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! Lookups keyed by free text (installation method, load type) are total:
//! they always return a value, falling back to a conservative default.
//! Lookups that would otherwise invent a safety-relevant number (device
//! rating, cable capacity) return `Option` and leave the decision to the
//! caller.

pub mod conductors;
pub mod devices;
pub mod loads;
pub mod methods;

pub use conductors::{
    conductor_resistance, default_cpc_size, tabulated_rating, voltage_drop_mv_per_amp_metre,
    CableType, CONDUCTOR_RESISTANCE_MOHM_PER_M,
};
pub use devices::{
    bs_standard_for, max_zs, next_standard_rating, DEFAULT_BREAKING_CAPACITY_KA, DEFAULT_CURVE,
    DEFAULT_DEVICE_TYPE, STANDARD_DEVICE_RATINGS,
};
pub use loads::LoadType;
pub use methods::{reference_method_code, InstallationMethod, ReferenceMethod, DEFAULT_METHOD_CODE};

/// Float key comparison for the tabulated conductor sizes.
pub(crate) fn same_size(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
