use chrono::NaiveDate;
use uuid::Uuid;

use crate::compliance::check_rules;
use crate::core::{CircuitGuardError, EngineOptions, Result};
use crate::design::{compute_design, CircuitParameters, Phases};
use crate::reference::{bs_standard_for, LoadType};

use super::types::{
    CircuitDesign, InstallationSchedule, MultiCircuitDesign, ProjectInfo, ScheduleDevice,
    ScheduleRow, ScheduleStatus, SiteInfo,
};

/// Placeholder for values the inspector measures on site.
pub const TO_BE_TESTED: &str = "to be tested on site";
const NOT_APPLICABLE: &str = "N/A";

const SINGLE_PHASE_VOLTAGE: f64 = 230.0;
const THREE_PHASE_VOLTAGE: f64 = 400.0;

/// One row per circuit, numbered from 1 in declaration order. Fails on the
/// first circuit that cannot be designed or whose design breaks Ib ≤ In,
/// In ≤ Iz or the loop impedance limit.
pub fn build_schedule(
    design: &MultiCircuitDesign,
    project: &ProjectInfo,
    site: &SiteInfo,
    options: &EngineOptions,
) -> Result<Vec<ScheduleRow>> {
    tracing::info!(
        "Building schedule for '{}' with {} circuit(s)",
        project.name,
        design.circuits.len()
    );

    design
        .circuits
        .iter()
        .enumerate()
        .map(|(idx, circuit)| build_row(idx as u32 + 1, circuit, site, options))
        .collect()
}

/// Schedule rows wrapped with installation metadata, ready for approval.
pub fn build_installation_schedule(
    design: &MultiCircuitDesign,
    project: &ProjectInfo,
    site: &SiteInfo,
    design_date: NaiveDate,
    options: &EngineOptions,
) -> Result<InstallationSchedule> {
    let rows = build_schedule(design, project, site, options)?;
    Ok(InstallationSchedule {
        installation_id: Uuid::new_v4().to_string(),
        project: project.clone(),
        site: site.clone(),
        design_date,
        status: ScheduleStatus::Pending,
        rows,
    })
}

fn build_row(
    number: u32,
    circuit: &CircuitDesign,
    site: &SiteInfo,
    options: &EngineOptions,
) -> Result<ScheduleRow> {
    let phases = Phases::from_descriptor(&circuit.phases);
    let params = parameters_for(circuit, phases, site);
    let result = compute_design(&params, options).map_err(|err| {
        tracing::warn!("Circuit {} ('{}') could not be designed: {}", number, circuit.name, err);
        err
    })?;

    let report = check_rules(&result, &result.load_type, options);
    for warning in &report.warnings {
        tracing::warn!("Circuit {} ('{}'): {}", number, circuit.name, warning.message);
    }
    if !report.is_compliant() {
        tracing::warn!(
            "Circuit {} ('{}') breaks {} design rule(s)",
            number,
            circuit.name,
            report.errors.len()
        );
        return Err(CircuitGuardError::NonCompliant {
            circuit: circuit.name.clone(),
            violations: report.errors.into_iter().map(|v| v.message).collect(),
        });
    }

    let device = circuit.protective_device.clone().unwrap_or_default();
    let device_type = device.device_type_or_default().to_string();
    let rcd_protected = circuit.rcd_required || is_residual_current_device(&device_type);

    Ok(ScheduleRow {
        circuit_number: number,
        phase_type: phases.label().to_string(),
        description: circuit.name.clone(),
        reference_method_code: result.reference_method_code,
        points_served: LoadType::parse(&circuit.load_type).points_served(),
        live_conductor_size: result.live_size_mm2,
        cpc_size: result.cpc_size_mm2,
        cable_length_m: circuit.cable_length_m,
        protective_device: ScheduleDevice {
            bs_standard: bs_standard_for(&device_type).to_string(),
            curve: device.curve_or_default().to_string(),
            rating: result.selected_device_rating,
            breaking_capacity_ka: device.breaking_capacity_or_default(),
            device_type,
        },
        expected_r1r2: result.expected_conductor_resistance,
        max_zs: result.max_zs,
        rcd_required: circuit.rcd_required,
        afdd_required: circuit.afdd_required,
        insulation_resistance: TO_BE_TESTED.to_string(),
        polarity: TO_BE_TESTED.to_string(),
        measured_zs: TO_BE_TESTED.to_string(),
        rcd_behaviour: if rcd_protected {
            TO_BE_TESTED.to_string()
        } else {
            NOT_APPLICABLE.to_string()
        },
    })
}

fn parameters_for(circuit: &CircuitDesign, phases: Phases, site: &SiteInfo) -> CircuitParameters {
    let voltage = circuit.voltage_v.unwrap_or(match phases {
        Phases::Single => site.supply_voltage_v.unwrap_or(SINGLE_PHASE_VOLTAGE),
        Phases::Three => THREE_PHASE_VOLTAGE,
    });
    CircuitParameters {
        name: circuit.name.clone(),
        load_power_w: circuit.load_power_w,
        design_current_a: circuit.design_current_a,
        voltage_v: voltage,
        phases,
        cable_length_m: circuit.cable_length_m,
        installation_method: circuit.installation_method.clone(),
        load_type: LoadType::parse(&circuit.load_type),
        cable_type: circuit.cable_type,
        live_size_mm2: circuit.live_size_mm2,
        cpc_size_mm2: circuit.cpc_size_mm2,
        device: circuit.protective_device.clone(),
        ze_ohms: site.ze_ohms,
        rcd_required: circuit.rcd_required,
        afdd_required: circuit.afdd_required,
    }
}

fn is_residual_current_device(device_type: &str) -> bool {
    let upper = device_type.to_uppercase();
    upper.contains("RCBO") || upper.contains("RCD")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{expected_r1r2, DeviceSpec};
    use crate::reference::CableType;

    fn circuit(name: &str, load_type: &str, power: f64) -> CircuitDesign {
        CircuitDesign {
            name: name.to_string(),
            phases: "single".to_string(),
            load_type: load_type.to_string(),
            load_power_w: Some(power),
            design_current_a: None,
            voltage_v: None,
            cable_length_m: Some(18.0),
            installation_method: Some("clipped direct".to_string()),
            cable_type: CableType::TwinAndEarth,
            live_size_mm2: None,
            cpc_size_mm2: None,
            protective_device: None,
            rcd_required: false,
            afdd_required: false,
        }
    }

    fn build(circuits: Vec<CircuitDesign>) -> Vec<ScheduleRow> {
        build_schedule(
            &MultiCircuitDesign { circuits },
            &ProjectInfo::default(),
            &SiteInfo::default(),
            &EngineOptions::default(),
        )
        .expect("Should build schedule")
    }

    #[test]
    fn test_rows_numbered_in_order() {
        let rows = build(vec![
            circuit("Upstairs lights", "lighting", 600.0),
            circuit("Kitchen ring", "socket", 7000.0),
            circuit("Shower", "shower", 9500.0),
        ]);
        let numbers: Vec<u32> = rows.iter().map(|r| r.circuit_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(rows[0].points_served, 10);
        assert_eq!(rows[1].points_served, 8);
        assert_eq!(rows[2].points_served, 1);
        assert_eq!(rows[0].description, "Upstairs lights");
    }

    #[test]
    fn test_unknown_load_serves_one_point() {
        let rows = build(vec![circuit("Garden feature", "bespoke", 500.0)]);
        assert_eq!(rows[0].points_served, 1);
    }

    #[test]
    fn test_device_defaults_and_placeholders() {
        let rows = build(vec![circuit("Immersion", "immersion", 3000.0)]);
        let row = &rows[0];
        assert_eq!(row.protective_device.device_type, "MCB");
        assert_eq!(row.protective_device.curve, "B");
        assert_eq!(row.protective_device.breaking_capacity_ka, 6.0);
        assert_eq!(row.protective_device.bs_standard, "BS EN 60898");
        assert_eq!(row.protective_device.rating, 16.0);
        assert_eq!(row.phase_type, "single-phase");
        assert_eq!(row.insulation_resistance, TO_BE_TESTED);
        assert_eq!(row.rcd_behaviour, NOT_APPLICABLE);
    }

    #[test]
    fn test_device_fields_verbatim() {
        let mut rcbo = circuit("Sockets", "socket", 7000.0);
        rcbo.protective_device = Some(DeviceSpec {
            device_type: Some("RCBO".to_string()),
            curve: Some("C".to_string()),
            rating: Some(32.0),
            breaking_capacity_ka: Some(10.0),
        });
        let rows = build(vec![rcbo]);
        let device = &rows[0].protective_device;
        assert_eq!(device.device_type, "RCBO");
        assert_eq!(device.curve, "C");
        assert_eq!(device.rating, 32.0);
        assert_eq!(device.breaking_capacity_ka, 10.0);
        assert_eq!(device.bs_standard, "BS EN 61009");
        assert_eq!(rows[0].rcd_behaviour, TO_BE_TESTED);
    }

    #[test]
    fn test_three_phase_descriptor() {
        let mut motor = circuit("Workshop compressor", "motor", 7500.0);
        motor.phases = "Three Phase".to_string();
        motor.cable_type = CableType::SingleCore;
        motor.installation_method = Some("trunking".to_string());
        let rows = build(vec![motor]);
        assert_eq!(rows[0].phase_type, "three-phase");
        assert_eq!(rows[0].reference_method_code, 102);
    }

    #[test]
    fn test_r1r2_round_trip() {
        let rows = build(vec![circuit("Cooker", "cooker", 8000.0)]);
        let row = &rows[0];
        let again = expected_r1r2(
            row.live_conductor_size,
            row.cpc_size,
            row.cable_length_m.unwrap(),
            EngineOptions::default().temperature_multiplier,
        )
        .unwrap();
        assert!((row.expected_r1r2.unwrap() - again).abs() < 1e-12);
    }

    #[test]
    fn test_undersized_cable_blocks_schedule() {
        let mut shower = circuit("Shower", "shower", 9500.0);
        shower.live_size_mm2 = Some(1.5);
        shower.protective_device = Some(DeviceSpec::new("MCB", "B", 20.0));

        let err = build_installation_schedule(
            &MultiCircuitDesign {
                circuits: vec![circuit("Lights", "lighting", 400.0), shower],
            },
            &ProjectInfo::default(),
            &SiteInfo::default(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            &EngineOptions::default(),
        )
        .unwrap_err();

        match err {
            CircuitGuardError::NonCompliant { circuit, violations } => {
                assert_eq!(circuit, "Shower");
                // 41.3A on a 20A device; 20A device on 1.5mm² (Iz 20A) is fine
                assert_eq!(violations.len(), 1);
                assert!(violations[0].contains("Ib ≤ In"));
            }
            other => panic!("expected NonCompliant, got {:?}", other),
        }
    }

    #[test]
    fn test_device_above_cable_blocks_schedule() {
        let mut sockets = circuit("Sockets", "socket", 7000.0);
        sockets.live_size_mm2 = Some(2.5);
        sockets.protective_device = Some(DeviceSpec::new("RCBO", "B", 32.0));

        let result = build_schedule(
            &MultiCircuitDesign {
                circuits: vec![sockets],
            },
            &ProjectInfo::default(),
            &SiteInfo::default(),
            &EngineOptions::default(),
        );
        assert!(matches!(result, Err(CircuitGuardError::NonCompliant { .. })));
    }

    #[test]
    fn test_high_loop_impedance_blocks_schedule() {
        let mut immersion = circuit("Immersion", "immersion", 3000.0);
        immersion.cable_length_m = Some(40.0);
        let site = SiteInfo {
            ze_ohms: Some(1.2),
            ..SiteInfo::default()
        };

        let err = build_schedule(
            &MultiCircuitDesign {
                circuits: vec![immersion],
            },
            &ProjectInfo::default(),
            &site,
            &EngineOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("loop impedance"));
    }

    #[test]
    fn test_installation_metadata() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let mut schedule = build_installation_schedule(
            &MultiCircuitDesign {
                circuits: vec![circuit("Lights", "lighting", 400.0)],
            },
            &ProjectInfo {
                name: "Loft conversion".to_string(),
                designer: "J. Smith".to_string(),
                ..ProjectInfo::default()
            },
            &SiteInfo {
                address: "1 High Street".to_string(),
                ..SiteInfo::default()
            },
            date,
            &EngineOptions::default(),
        )
        .unwrap();
        assert_eq!(schedule.status, ScheduleStatus::Pending);
        assert!(Uuid::parse_str(&schedule.installation_id).is_ok());

        schedule.approve();
        let record = schedule.to_record().unwrap();
        assert_eq!(record.status, ScheduleStatus::Approved);
        assert_eq!(record.circuit_count, 1);
        assert_eq!(record.payload["status"], "approved");
        assert_eq!(record.schedule().unwrap(), schedule);
    }
}
