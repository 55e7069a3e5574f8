//! Circuit design calculator.
//!
//! Derives the BS 7671 design quantities for a single circuit:
//!
//! ```text
//!   P, V, phases ──► Ib ──► In (catalogue) ──► live size (Iz ≥ In) ──► CPC
//!                                                    │
//!                     length ──► R1+R2 × 1.2, Vd %   │
//!                     Ze     ──► Zs = Ze + R1+R2 ◄───┘
//! ```
//!
//! Everything here is pure. Malformed parameters and catalogue exhaustion are
//! returned as errors; regulatory problems with the result are left to the
//! compliance checker.

mod calculator;
mod types;

pub use calculator::{compute_design, design_current, expected_r1r2, select_cable, select_device_rating};
pub use types::{CircuitParameters, DesignResult, DeviceSpec, Phases};
