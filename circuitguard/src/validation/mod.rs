//! Calculation Validation Module
//!
//! Reconciles claims parsed from generated text with the calculated design
//! and turns failures into correction instructions.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────────┐
//! │  Extracted  │────►│  Validator   │────►│ Fix instructions  │
//! │   claim     │     │ (deviations, │     │ (only if invalid) │
//! └─────────────┘     │  rules)      │     └───────────────────┘
//! ┌─────────────┐     │              │
//! │ DesignResult│────►│              │
//! └─────────────┘     └──────────────┘
//! ```

mod fixes;
mod types;
mod validator;

pub use fixes::generate_fix_instructions;
pub use types::{CalculationValidation, ValidationError, ValidationWarning};
pub use validator::{relative_deviation, validate, validate_against_design};
