use crate::parser::ClaimField;
use crate::reference::next_standard_rating;

use super::types::{CalculationValidation, ValidationError};

/// Correction text for a rejected response, one line per error. Empty when
/// the validation passed.
pub fn generate_fix_instructions(validation: &CalculationValidation) -> String {
    if validation.is_valid {
        return String::new();
    }
    validation
        .errors
        .iter()
        .map(|error| format!("- {}", instruction_for(error)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn instruction_for(error: &ValidationError) -> String {
    match error.field {
        ClaimField::DesignCurrent => format!(
            "Recalculate the design current: Ib should be {:.2}A, not {}A.",
            error.expected_value, error.actual_value
        ),
        // Raised by Ib > In: expected carries Ib, actual the undersized In.
        ClaimField::DeviceRating => format!(
            "Select a protective device rated at least {}A for a design current of {:.2}A; {}A is too small.",
            suggested_rating(error.expected_value),
            error.expected_value,
            error.actual_value
        ),
        // Raised by In > Iz: expected carries In, actual the inadequate Iz.
        ClaimField::CableSize => format!(
            "Increase the cable size: its tabulated capacity Iz ({}A) must be at least the device rating In ({}A).",
            error.actual_value, error.expected_value
        ),
        _ => error.message.clone(),
    }
}

/// Next standard rating, or Ib rounded up to a multiple of 10 past the
/// catalogue.
fn suggested_rating(design_current: f64) -> f64 {
    next_standard_rating(design_current).unwrap_or_else(|| (design_current / 10.0).ceil() * 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationWarning;

    fn error(field: ClaimField, expected: f64, actual: f64) -> ValidationError {
        ValidationError {
            field,
            expected_value: expected,
            actual_value: actual,
            deviation_percent: 0.0,
            message: format!("raw message for {}", field),
        }
    }

    fn invalid(errors: Vec<ValidationError>) -> CalculationValidation {
        CalculationValidation {
            is_valid: false,
            errors,
            warnings: vec![],
            confidence: 50.0,
        }
    }

    #[test]
    fn test_valid_gives_empty_text() {
        let validation = CalculationValidation {
            is_valid: true,
            errors: vec![],
            warnings: vec![ValidationWarning {
                field: ClaimField::VoltageDrop,
                message: "high".to_string(),
            }],
            confidence: 100.0,
        };
        assert_eq!(generate_fix_instructions(&validation), "");
    }

    #[test]
    fn test_one_line_per_error() {
        let text = generate_fix_instructions(&invalid(vec![
            error(ClaimField::DesignCurrent, 13.04, 20.0),
            error(ClaimField::DeviceRating, 32.0, 25.0),
            error(ClaimField::CableSize, 32.0, 27.0),
        ]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("13.04A"));
        assert!(lines[1].contains("at least 32A"));
        assert!(lines[2].contains("Iz (27A)"));
    }

    #[test]
    fn test_rating_suggestion_past_catalogue() {
        let text = generate_fix_instructions(&invalid(vec![error(ClaimField::DeviceRating, 131.0, 125.0)]));
        assert!(text.contains("at least 140A"));
    }

    #[test]
    fn test_unknown_field_echoes_message() {
        let text = generate_fix_instructions(&invalid(vec![error(ClaimField::LoopImpedance, 1.37, 1.9)]));
        assert_eq!(text, "- raw message for loopImpedance");
    }
}
