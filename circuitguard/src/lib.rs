//! CircuitGuard - BS 7671 circuit design and compliance engine
//!
//! Calculates the design quantities of an electrical circuit (Ib, In, Iz,
//! R1+R2, voltage drop, Zs), checks the regulatory inequalities between
//! them, cross-checks numeric claims made in generated text against that
//! ground truth, and builds the per-circuit certification schedule.
//!
//! # Quick Start
//!
//! ```
//! use circuitguard::{CircuitGuardCore, CircuitParameters, EngineOptions};
//!
//! let params = CircuitParameters::single_phase(3000.0, 230.0, "immersion").with_length(12.0);
//! let review = CircuitGuardCore::review_response(
//!     "Design current is 20A, protected by a 16A MCB.",
//!     &params,
//!     &EngineOptions::default(),
//! )
//! .unwrap();
//!
//! assert!(!review.is_valid());
//! println!("{}", review.fix_instructions);
//! ```
//!
//! # Features
//!
//! - **Design calculation**: Ib, device and cable selection, R1+R2, Vd, Zs
//! - **Compliance rules**: Ib ≤ In ≤ Iz, voltage drop limits, loop impedance
//! - **Claim validation**: tolerance checks and fix instructions for generated text
//! - **Schedules**: certificate rows with test placeholders
//! - **Optional AI loop**: bounded regeneration against any narrator

pub mod ai;
pub mod compliance;
pub mod core;
pub mod design;
pub mod parser;
pub mod reference;
pub mod schedule;
pub mod validation;

// Re-export main types
pub use crate::core::{
    CircuitGuardCore, CircuitGuardError, ConfidencePolicy, EngineOptions, ResponseReview, Result,
    PVC_70C_MULTIPLIER,
};
pub use compliance::{check_rules, RuleReport, RuleSubject};
pub use design::{compute_design, CircuitParameters, DesignResult, DeviceSpec, Phases};
pub use parser::{extract_claims, ClaimField, ExtractedClaim};
pub use reference::{CableType, LoadType};
pub use schedule::{
    build_installation_schedule, build_schedule, InstallationSchedule, MultiCircuitDesign,
    ScheduleRow,
};
pub use validation::{
    generate_fix_instructions, validate, CalculationValidation, ValidationError, ValidationWarning,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CalculationValidation, CircuitGuardCore, CircuitGuardError, CircuitParameters,
        DesignResult, EngineOptions, ExtractedClaim, LoadType, ScheduleRow,
    };
}
