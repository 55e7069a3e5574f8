use serde::{Deserialize, Serialize};

use crate::core::EngineOptions;
use crate::design::DesignResult;
use crate::parser::{ClaimField, ExtractedClaim};
use crate::reference::LoadType;

/// Anything the rule checker can inspect. Every quantity is optional so a
/// sparse claim and a full design go through the same checks.
pub trait RuleSubject {
    fn design_current(&self) -> Option<f64>;
    fn device_rating(&self) -> Option<f64>;
    fn tabulated_current(&self) -> Option<f64>;
    fn voltage_drop_percent(&self) -> Option<f64>;

    fn expected_zs(&self) -> Option<f64> {
        None
    }

    fn max_zs(&self) -> Option<f64> {
        None
    }
}

impl RuleSubject for DesignResult {
    fn design_current(&self) -> Option<f64> {
        Some(self.design_current)
    }

    fn device_rating(&self) -> Option<f64> {
        Some(self.selected_device_rating)
    }

    fn tabulated_current(&self) -> Option<f64> {
        Some(self.tabulated_cable_rating)
    }

    fn voltage_drop_percent(&self) -> Option<f64> {
        self.expected_voltage_drop_percent
    }

    fn expected_zs(&self) -> Option<f64> {
        self.expected_zs
    }

    fn max_zs(&self) -> Option<f64> {
        self.max_zs
    }
}

impl RuleSubject for ExtractedClaim {
    fn design_current(&self) -> Option<f64> {
        self.design_current
    }

    fn device_rating(&self) -> Option<f64> {
        self.device_rating
    }

    fn tabulated_current(&self) -> Option<f64> {
        self.tabulated_current
    }

    fn voltage_drop_percent(&self) -> Option<f64> {
        self.voltage_drop_percent
    }
}

/// A claim checked against the calculated design: Ib, In and Iz the claim
/// leaves out are taken from the design. Voltage drop is the claim's own.
#[derive(Debug, Clone, Copy)]
pub struct ClaimAgainstDesign<'a> {
    pub claim: &'a ExtractedClaim,
    pub design: &'a DesignResult,
}

impl<'a> ClaimAgainstDesign<'a> {
    pub fn new(claim: &'a ExtractedClaim, design: &'a DesignResult) -> Self {
        Self { claim, design }
    }
}

impl RuleSubject for ClaimAgainstDesign<'_> {
    fn design_current(&self) -> Option<f64> {
        self.claim.design_current.or(Some(self.design.design_current))
    }

    fn device_rating(&self) -> Option<f64> {
        self.claim
            .device_rating
            .or(Some(self.design.selected_device_rating))
    }

    fn tabulated_current(&self) -> Option<f64> {
        self.claim
            .tabulated_current
            .or(Some(self.design.tabulated_cable_rating))
    }

    fn voltage_drop_percent(&self) -> Option<f64> {
        self.claim.voltage_drop_percent
    }
}

/// A broken inequality. `expected_value` is the bound, `actual_value` the
/// quantity that crossed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleViolation {
    pub field: ClaimField,
    pub expected_value: f64,
    pub actual_value: f64,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleReport {
    pub errors: Vec<RuleViolation>,
    pub warnings: Vec<RuleViolation>,
    /// Checks whose operands were all present.
    pub checks_performed: u32,
}

impl RuleReport {
    pub fn is_compliant(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run every rule in order. Never stops at the first failure; a rule whose
/// operands are missing from the subject is skipped.
pub fn check_rules<S: RuleSubject + ?Sized>(
    subject: &S,
    load_type: &LoadType,
    options: &EngineOptions,
) -> RuleReport {
    let mut report = RuleReport::default();

    if let (Some(ib), Some(rating)) = (subject.design_current(), subject.device_rating()) {
        report.checks_performed += 1;
        if ib > rating {
            report.errors.push(RuleViolation {
                field: ClaimField::DeviceRating,
                expected_value: ib,
                actual_value: rating,
                message: format!(
                    "Design current Ib ({:.2}A) exceeds device rating In ({}A); Ib ≤ In is required",
                    ib, rating
                ),
            });
        }
    }

    if let (Some(rating), Some(iz)) = (subject.device_rating(), subject.tabulated_current()) {
        report.checks_performed += 1;
        if rating > iz {
            report.errors.push(RuleViolation {
                field: ClaimField::CableSize,
                expected_value: rating,
                actual_value: iz,
                message: format!(
                    "Device rating In ({}A) exceeds cable capacity Iz ({}A); In ≤ Iz is required",
                    rating, iz
                ),
            });
        }
    }

    if let Some(drop) = subject.voltage_drop_percent() {
        report.checks_performed += 1;
        let limit = voltage_drop_limit(load_type, options);
        if drop > limit {
            report.warnings.push(RuleViolation {
                field: ClaimField::VoltageDrop,
                expected_value: limit,
                actual_value: drop,
                message: format!(
                    "Voltage drop {:.2}% exceeds the {}% limit for {} circuits",
                    drop,
                    limit,
                    if load_type.is_lighting() { "lighting" } else { "other" }
                ),
            });
        }
    }

    if let (Some(zs), Some(max)) = (subject.expected_zs(), subject.max_zs()) {
        report.checks_performed += 1;
        if zs > max {
            report.errors.push(RuleViolation {
                field: ClaimField::LoopImpedance,
                expected_value: max,
                actual_value: zs,
                message: format!(
                    "Earth fault loop impedance Zs ({:.3}Ω) exceeds the {:.3}Ω maximum for disconnection",
                    zs, max
                ),
            });
        }
    }

    report
}

fn voltage_drop_limit(load_type: &LoadType, options: &EngineOptions) -> f64 {
    if load_type.is_lighting() {
        options.lighting_voltage_drop_limit
    } else {
        options.other_voltage_drop_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{compute_design, CircuitParameters, DeviceSpec};

    fn claim(ib: Option<f64>, rating: Option<f64>, iz: Option<f64>, vd: Option<f64>) -> ExtractedClaim {
        ExtractedClaim {
            design_current: ib,
            device_rating: rating,
            cable_size: None,
            voltage_drop_percent: vd,
            tabulated_current: iz,
        }
    }

    #[test]
    fn test_compliant_claim() {
        let report = check_rules(
            &claim(Some(13.0), Some(16.0), Some(27.0), Some(2.0)),
            &LoadType::Socket,
            &EngineOptions::default(),
        );
        assert!(report.is_compliant());
        assert!(report.warnings.is_empty());
        assert_eq!(report.checks_performed, 3);
    }

    #[test]
    fn test_design_current_above_rating() {
        let report = check_rules(
            &claim(Some(32.0), Some(25.0), None, None),
            &LoadType::Socket,
            &EngineOptions::default(),
        );
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, ClaimField::DeviceRating);
        assert_eq!(report.errors[0].expected_value, 32.0);
        assert_eq!(report.errors[0].actual_value, 25.0);
    }

    #[test]
    fn test_all_failures_reported() {
        let report = check_rules(
            &claim(Some(40.0), Some(32.0), Some(27.0), Some(6.0)),
            &LoadType::Cooker,
            &EngineOptions::default(),
        );
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[1].field, ClaimField::CableSize);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_lighting_limit_is_tighter() {
        let lighting = check_rules(
            &claim(None, None, None, Some(4.0)),
            &LoadType::Lighting,
            &EngineOptions::default(),
        );
        let heating = check_rules(
            &claim(None, None, None, Some(4.0)),
            &LoadType::Heating,
            &EngineOptions::default(),
        );
        assert_eq!(lighting.warnings.len(), 1);
        assert!(lighting.is_compliant());
        assert!(heating.warnings.is_empty());
    }

    
    fn immersion() -> CircuitParameters {
        // Ib 13.04A, 16A type B MCB, 1.0mm² T&E clipped direct
        CircuitParameters::single_phase(3000.0, 230.0, "immersion")
    }

    fn design(params: &CircuitParameters) -> DesignResult {
        compute_design(params, &EngineOptions::default()).expect("Should compute design")
    }

    #[test]
    fn test_compliant_design() {
        let result = design(&immersion().with_length(15.0).with_ze(0.35));
        let report = check_rules(&result, &result.load_type, &EngineOptions::default());
        assert!(report.is_compliant());
        assert!(report.warnings.is_empty());
        assert_eq!(report.checks_performed, 4);
    }

    #[test]
    fn test_declared_device_above_cable() {
        let result = design(
            &immersion()
                .with_cable(2.5, None)
                .with_device(DeviceSpec::new("MCB", "B", 32.0)),
        );
        let report = check_rules(&result, &result.load_type, &EngineOptions::default());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, ClaimField::CableSize);
        assert_eq!(report.errors[0].expected_value, 32.0);
        assert_eq!(report.errors[0].actual_value, 27.0);
    }

    #[test]
    fn test_long_run_on_high_ze_breaks_max_zs() {
        // 1.2 + 1.7376 > 230 × 0.95 / 80
        let result = design(&immersion().with_length(40.0).with_ze(1.2));
        let report = check_rules(&result, &result.load_type, &EngineOptions::default());
        assert_eq!(report.errors.len(), 1);
        let error = &report.errors[0];
        assert_eq!(error.field, ClaimField::LoopImpedance);
        assert!((error.expected_value - 2.73125).abs() < 1e-9);
        assert!((error.actual_value - 2.9376).abs() < 1e-9);
        // voltage drop is also well over 5% on that run
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_claim_gaps_filled_from_design() {
        let result = design(&immersion());
        let sparse = claim(None, Some(10.0), None, None);

        let report = check_rules(
            &ClaimAgainstDesign::new(&sparse, &result),
            &result.load_type,
            &EngineOptions::default(),
        );
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, ClaimField::DeviceRating);
        assert_eq!(report.errors[0].actual_value, 10.0);
        // Zs is never taken from the design for a claim
        assert_eq!(report.checks_performed, 2);
    }

    #[test]
    fn test_missing_operands_are_skipped() {
        let report = check_rules(
            &claim(Some(50.0), None, Some(10.0), None),
            &LoadType::Socket,
            &EngineOptions::default(),
        );
        assert!(report.is_compliant());
        assert_eq!(report.checks_performed, 0);
    }
}
