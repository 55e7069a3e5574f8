//! Compliance Rule Module
//!
//! Checks the BS 7671 inequalities between design quantities:
//!
//! ```text
//!   (1) Ib ≤ In            error
//!   (2) In ≤ Iz            error
//!   (3) Vd ≤ 3 % / 5 %     warning
//!   (4) Zs ≤ max Zs        error
//! ```
//!
//! The same checks run on calculated designs before they reach a schedule,
//! and on claims parsed from text with any missing operand taken from the
//! calculated design.

pub mod rules;

pub use rules::{check_rules, ClaimAgainstDesign, RuleReport, RuleSubject, RuleViolation};
