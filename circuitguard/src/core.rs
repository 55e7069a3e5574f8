//! Core API shared by every caller of the engine.
//! No I/O beyond optional option-file loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::design::{compute_design, CircuitParameters, DesignResult};
use crate::parser::{extract_claims, ExtractedClaim};
use crate::validation::{generate_fix_instructions, validate_against_design, CalculationValidation};

/// Resistance multiplier taking 20 °C conductor data to the 70 °C operating
/// temperature of thermoplastic (PVC) insulated cable.
pub const PVC_70C_MULTIPLIER: f64 = 1.2;

#[derive(Debug, thiserror::Error)]
pub enum CircuitGuardError {
    #[error("Invalid circuit parameters: {0}")]
    InvalidParameters(String),
    #[error("No standard protective device rating covers a design current of {design_current:.2} A")]
    UnresolvedRating { design_current: f64 },
    #[error("No tabulated cable size satisfies {required:.1} A for reference method {method}")]
    UnresolvedCableSize { required: f64, method: char },
    #[error("Cable size {size} mm² has no tabulated rating for reference method {method}")]
    UntabulatedCable { size: f64, method: char },
    #[error("Circuit '{circuit}' is not compliant: {}", .violations.join("; "))]
    NonCompliant {
        circuit: String,
        violations: Vec<String>,
    },
    #[error("Invalid engine options: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CircuitGuardError>;

/// How the validator scores checks that could not run because the claim
/// did not carry the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidencePolicy {
    /// Denominator is always the four structural checks; skipped checks
    /// count as passed.
    #[default]
    FixedDenominator,
    /// Denominator is the number of checks actually performed. A claim with
    /// nothing to check scores zero.
    ChecksPerformed,
}

/// Tunable constants for a calculation or validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    /// Multiplier applied to 20 °C R1+R2.
    pub temperature_multiplier: f64,
    /// Relative deviation above which a claim is an error (0.15 = 15 %).
    pub error_deviation: f64,
    /// Relative deviation above which a claim is a warning.
    pub warning_deviation: f64,
    /// Voltage drop limit for lighting circuits, percent.
    pub lighting_voltage_drop_limit: f64,
    /// Voltage drop limit for every other circuit, percent.
    pub other_voltage_drop_limit: f64,
    pub confidence_policy: ConfidencePolicy,
    /// Nominal line-to-earth voltage used for maximum Zs.
    pub nominal_u0: f64,
    /// Minimum voltage factor used for maximum Zs.
    pub cmin: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            temperature_multiplier: PVC_70C_MULTIPLIER,
            error_deviation: 0.15,
            warning_deviation: 0.05,
            lighting_voltage_drop_limit: 3.0,
            other_voltage_drop_limit: 5.0,
            confidence_policy: ConfidencePolicy::FixedDenominator,
            nominal_u0: 230.0,
            cmin: 0.95,
        }
    }
}

impl EngineOptions {
    /// Load options from a JSON string. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: EngineOptions = serde_json::from_str(json)?;
        options.check()?;
        Ok(options)
    }

    /// Load options from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&content)?;
        tracing::info!("Loaded engine options from {}", path.display());
        Ok(options)
    }

    fn check(&self) -> Result<()> {
        let positive = [
            ("temperatureMultiplier", self.temperature_multiplier),
            ("errorDeviation", self.error_deviation),
            ("warningDeviation", self.warning_deviation),
            ("lightingVoltageDropLimit", self.lighting_voltage_drop_limit),
            ("otherVoltageDropLimit", self.other_voltage_drop_limit),
            ("nominalU0", self.nominal_u0),
            ("cmin", self.cmin),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CircuitGuardError::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if self.warning_deviation > self.error_deviation {
            return Err(CircuitGuardError::Config(format!(
                "warningDeviation ({}) exceeds errorDeviation ({})",
                self.warning_deviation, self.error_deviation
            )));
        }
        Ok(())
    }
}

/// Everything the engine derives from one generated response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseReview {
    pub claim: ExtractedClaim,
    pub design: DesignResult,
    pub validation: CalculationValidation,
    /// Empty when the response is valid.
    pub fix_instructions: String,
}

impl ResponseReview {
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid
    }
}

/// Entry points combining the parser, calculator and validator.
pub struct CircuitGuardCore;

impl CircuitGuardCore {
    /// Ground-truth design for a circuit.
    pub fn design(params: &CircuitParameters, options: &EngineOptions) -> Result<DesignResult> {
        compute_design(params, options)
    }

    /// Parse a generated description, reconcile it with the calculated
    /// design and produce fix instructions when it does not hold up.
    pub fn review_response(
        text: &str,
        params: &CircuitParameters,
        options: &EngineOptions,
    ) -> Result<ResponseReview> {
        let design = compute_design(params, options)?;
        Ok(Self::review_against(text, design, options))
    }

    /// Same as [`CircuitGuardCore::review_response`] for a design that has
    /// already been calculated.
    pub fn review_against(text: &str, design: DesignResult, options: &EngineOptions) -> ResponseReview {
        let claim = extract_claims(text);
        let validation = validate_against_design(&claim, &design, options);
        let fix_instructions = generate_fix_instructions(&validation);
        ResponseReview {
            claim,
            design,
            validation,
            fix_instructions,
        }
    }
}
