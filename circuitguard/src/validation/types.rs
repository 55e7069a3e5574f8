use serde::{Deserialize, Serialize};

use crate::parser::ClaimField;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub field: ClaimField,
    pub expected_value: f64,
    pub actual_value: f64,
    pub deviation_percent: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationWarning {
    pub field: ClaimField,
    pub message: String,
}

/// Verdict on one generated response. `is_valid` holds exactly when
/// `errors` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationValidation {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    /// 0–100
    pub confidence: f64,
}

impl CalculationValidation {
    pub fn error_fields(&self) -> Vec<ClaimField> {
        self.errors.iter().map(|e| e.field).collect()
    }

    pub fn has_error_on(&self, field: ClaimField) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn has_warning_on(&self, field: ClaimField) -> bool {
        self.warnings.iter().any(|w| w.field == field)
    }
}
