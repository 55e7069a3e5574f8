//! Certification Schedule Module
//!
//! Turns a finished multi-circuit design into the per-circuit rows of an
//! installation certificate's schedule. Measured values are left as
//! placeholders for the inspector.

mod builder;
mod types;

pub use builder::{build_installation_schedule, build_schedule, TO_BE_TESTED};
pub use types::{
    CircuitDesign, InstallationSchedule, MultiCircuitDesign, ProjectInfo, ScheduleDevice,
    ScheduleRecord, ScheduleRow, ScheduleStatus, SiteInfo,
};
