use crate::compliance::{check_rules, ClaimAgainstDesign, RuleViolation};
use crate::core::{ConfidencePolicy, EngineOptions, Result};
use crate::design::{compute_design, CircuitParameters, DesignResult};
use crate::parser::{ClaimField, ExtractedClaim};

use super::types::{CalculationValidation, ValidationError, ValidationWarning};

/// Number of checks that can fail a claim: design-current deviation plus
/// the three claim-level rules (Ib ≤ In, In ≤ Iz, voltage drop).
const STRUCTURAL_CHECKS: u32 = 4;

/// Validate a claim against the design calculated from `params`.
pub fn validate(
    claim: &ExtractedClaim,
    params: &CircuitParameters,
    options: &EngineOptions,
) -> Result<CalculationValidation> {
    let truth = compute_design(params, options)?;
    Ok(validate_against_design(claim, &truth, options))
}

/// Validate a claim against an already calculated design. Never mutates
/// either input; the same inputs always give the same verdict.
pub fn validate_against_design(
    claim: &ExtractedClaim,
    truth: &DesignResult,
    options: &EngineOptions,
) -> CalculationValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut checks_performed = 0;

    if let Some(claimed) = claim.design_current {
        checks_performed += 1;
        let deviation = relative_deviation(claimed, truth.design_current);
        if deviation > options.error_deviation {
            errors.push(ValidationError {
                field: ClaimField::DesignCurrent,
                expected_value: truth.design_current,
                actual_value: claimed,
                deviation_percent: deviation * 100.0,
                message: format!(
                    "Claimed design current {}A deviates {:.1}% from the calculated {:.2}A",
                    claimed,
                    deviation * 100.0,
                    truth.design_current
                ),
            });
        } else if deviation > options.warning_deviation {
            warnings.push(ValidationWarning {
                field: ClaimField::DesignCurrent,
                message: format!(
                    "Claimed design current {}A differs {:.1}% from the calculated {:.2}A",
                    claimed,
                    deviation * 100.0,
                    truth.design_current
                ),
            });
        }
    }

    let shared = [
        (ClaimField::DeviceRating, claim.device_rating, Some(truth.selected_device_rating)),
        (ClaimField::CableSize, claim.cable_size, Some(truth.live_size_mm2)),
        (ClaimField::TabulatedCurrent, claim.tabulated_current, Some(truth.tabulated_cable_rating)),
        (ClaimField::VoltageDrop, claim.voltage_drop_percent, truth.expected_voltage_drop_percent),
    ];
    for (field, claimed, calculated) in shared {
        if let (Some(claimed), Some(calculated)) = (claimed, calculated) {
            let deviation = relative_deviation(claimed, calculated);
            if deviation > options.error_deviation {
                warnings.push(ValidationWarning {
                    field,
                    message: format!(
                        "Claimed {} {} differs {:.1}% from the calculated {:.2}",
                        field,
                        claimed,
                        deviation * 100.0,
                        calculated
                    ),
                });
            }
        }
    }

    let report = check_rules(
        &ClaimAgainstDesign::new(claim, truth),
        &truth.load_type,
        options,
    );
    checks_performed += claimed_rule_checks(claim);
    errors.extend(report.errors.into_iter().map(rule_error));
    warnings.extend(report.warnings.into_iter().map(|v| ValidationWarning {
        field: v.field,
        message: v.message,
    }));

    let confidence = confidence(options.confidence_policy, checks_performed, errors.len() as u32);
    let is_valid = errors.is_empty();

    if is_valid {
        tracing::debug!(
            "Claim accepted with {} warning(s), confidence {:.0}",
            warnings.len(),
            confidence
        );
    } else {
        tracing::warn!(
            "Claim rejected: {} error(s) on {:?}",
            errors.len(),
            errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>()
        );
    }

    CalculationValidation {
        is_valid,
        errors,
        warnings,
        confidence,
    }
}

/// |claimed − truth| / |truth|. A zero truth value is only matched by zero;
/// anything else counts as a 100 % deviation.
pub fn relative_deviation(claimed: f64, truth: f64) -> f64 {
    if truth == 0.0 {
        if claimed == 0.0 {
            0.0
        } else {
            1.0
        }
    } else {
        (claimed - truth).abs() / truth.abs()
    }
}

/// Rule checks that read at least one operand from the claim itself.
fn claimed_rule_checks(claim: &ExtractedClaim) -> u32 {
    let touched = [
        claim.design_current.is_some() || claim.device_rating.is_some(),
        claim.device_rating.is_some() || claim.tabulated_current.is_some(),
        claim.voltage_drop_percent.is_some(),
    ];
    touched.iter().filter(|t| **t).count() as u32
}

fn rule_error(violation: RuleViolation) -> ValidationError {
    ValidationError {
        field: violation.field,
        expected_value: violation.expected_value,
        actual_value: violation.actual_value,
        deviation_percent: relative_deviation(violation.actual_value, violation.expected_value) * 100.0,
        message: violation.message,
    }
}

fn confidence(policy: ConfidencePolicy, performed: u32, errors: u32) -> f64 {
    let denominator = match policy {
        ConfidencePolicy::FixedDenominator => STRUCTURAL_CHECKS,
        ConfidencePolicy::ChecksPerformed => performed,
    };
    if denominator == 0 {
        return 0.0;
    }
    let score = (denominator as f64 - errors as f64) / denominator as f64 * 100.0;
    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shower() -> CircuitParameters {
        CircuitParameters::single_phase(3000.0, 230.0, "shower").with_length(15.0)
    }

    #[test]
    fn test_matching_claim_is_valid() {
        let truth = compute_design(&shower(), &EngineOptions::default()).unwrap();
        let claim = ExtractedClaim {
            design_current: Some(13.0),
            device_rating: Some(16.0),
            cable_size: Some(truth.live_size_mm2),
            voltage_drop_percent: None,
            tabulated_current: Some(truth.tabulated_cable_rating),
        };
        let validation = validate_against_design(&claim, &truth, &EngineOptions::default());
        assert!(validation.is_valid);
        assert!(validation.warnings.is_empty());
        assert_eq!(validation.confidence, 100.0);
    }

    #[test]
    fn test_warning_band_for_design_current() {
        // 13.04A calculated; 14A is ~7% off
        let claim = ExtractedClaim {
            design_current: Some(14.0),
            ..ExtractedClaim::default()
        };
        let validation = validate(&claim, &shower(), &EngineOptions::default()).unwrap();
        assert!(validation.is_valid);
        assert!(validation.has_warning_on(ClaimField::DesignCurrent));
    }

    #[test]
    fn test_shared_field_deviation_only_warns() {
        let claim = ExtractedClaim {
            cable_size: Some(6.0),
            ..ExtractedClaim::default()
        };
        let validation = validate(&claim, &shower(), &EngineOptions::default()).unwrap();
        assert!(validation.is_valid);
        assert!(validation.has_warning_on(ClaimField::CableSize));
    }

    #[test]
    fn test_confidence_policies() {
        let claim = ExtractedClaim {
            design_current: Some(30.0),
            ..ExtractedClaim::default()
        };
        // 30A is off by more than 15% and also exceeds the calculated 16A device
        let fixed = validate(&claim, &shower(), &EngineOptions::default()).unwrap();
        assert_eq!(fixed.error_fields(), vec![ClaimField::DesignCurrent, ClaimField::DeviceRating]);
        assert_eq!(fixed.confidence, 50.0);

        let options = EngineOptions {
            confidence_policy: ConfidencePolicy::ChecksPerformed,
            ..EngineOptions::default()
        };
        let performed = validate(&claim, &shower(), &options).unwrap();
        assert_eq!(performed.confidence, 0.0);

        let empty = validate(&ExtractedClaim::default(), &shower(), &options).unwrap();
        assert!(empty.is_valid);
        assert_eq!(empty.confidence, 0.0);
    }

    #[test]
    fn test_undersized_device_alone_is_rejected() {
        // 3000W immersion: Ib 13.04A
        let params = CircuitParameters::single_phase(3000.0, 230.0, "immersion");
        let claim = ExtractedClaim {
            device_rating: Some(10.0),
            ..ExtractedClaim::default()
        };
        let validation = validate(&claim, &params, &EngineOptions::default()).unwrap();

        assert!(!validation.is_valid);
        assert_eq!(validation.error_fields(), vec![ClaimField::DeviceRating]);
        let error = &validation.errors[0];
        assert!((error.expected_value - 13.04).abs() < 0.01);
        assert_eq!(error.actual_value, 10.0);
    }

    #[test]
    fn test_oversized_device_against_calculated_cable() {
        // Calculated cable is 1.0mm² clipped direct, Iz 16A
        let claim = ExtractedClaim {
            device_rating: Some(20.0),
            ..ExtractedClaim::default()
        };
        let validation = validate(&claim, &shower(), &EngineOptions::default()).unwrap();
        assert_eq!(validation.error_fields(), vec![ClaimField::CableSize]);
    }

    #[test]
    fn test_relative_deviation() {
        assert!((relative_deviation(20.0, 13.0) - 0.538).abs() < 0.001);
        assert_eq!(relative_deviation(0.0, 0.0), 0.0);
        assert_eq!(relative_deviation(5.0, 0.0), 1.0);
    }

    #[test]
    fn test_invalid_parameters_propagate() {
        let params = CircuitParameters::single_phase(3000.0, -230.0, "shower");
        assert!(validate(&ExtractedClaim::default(), &params, &EngineOptions::default()).is_err());
    }
}
