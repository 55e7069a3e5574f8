//! Response Parser Module
//!
//! Pulls numeric claims (Ib, In, cable size, voltage drop, Iz) out of
//! free-form generated text so they can be checked against the calculator.

pub mod claims;

pub use claims::{extract_claims, ClaimField, ExtractedClaim};
