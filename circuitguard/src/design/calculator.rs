use crate::core::{CircuitGuardError, EngineOptions, Result};
use crate::reference::{
    conductor_resistance, default_cpc_size, max_zs, next_standard_rating, tabulated_rating,
    voltage_drop_mv_per_amp_metre, CableType, InstallationMethod, ReferenceMethod,
    DEFAULT_CURVE, DEFAULT_DEVICE_TYPE,
};

use super::types::{CircuitParameters, DesignResult, Phases};

/// Calculate the design quantities for one circuit.
pub fn compute_design(params: &CircuitParameters, options: &EngineOptions) -> Result<DesignResult> {
    check_parameters(params)?;

    let three_phase = params.phases.is_three();
    let ib = design_current(params)?;

    let device = params.device.as_ref();
    let rating = match device.and_then(|d| d.rating) {
        Some(rating) => rating,
        None => select_device_rating(ib)?,
    };

    let installation = InstallationMethod::classify(params.installation_method.as_deref());
    let method = installation.reference_method();
    let cable_type = params.cable_type.for_method(method);
    if cable_type != params.cable_type {
        tracing::debug!(
            "'{}' is buried; designing in {:?} instead of {:?}",
            params.name,
            cable_type,
            params.cable_type
        );
    }

    let (live, iz) = match params.live_size_mm2 {
        Some(size) => {
            let iz = tabulated_rating(cable_type, method, three_phase, size).ok_or(
                CircuitGuardError::UntabulatedCable {
                    size,
                    method: method.letter(),
                },
            )?;
            (size, iz)
        }
        None => select_cable(cable_type, method, three_phase, rating)?,
    };

    let cpc = match params.cpc_size_mm2 {
        Some(size) => size,
        None => default_cpc_size(cable_type, live).ok_or_else(|| {
            CircuitGuardError::InvalidParameters(format!(
                "no default CPC for a {} mm² live conductor; declare cpcSizeMm2",
                live
            ))
        })?,
    };

    let r1r2 = match params.cable_length_m {
        Some(length) => Some(
            expected_r1r2(live, cpc, length, options.temperature_multiplier).ok_or_else(|| {
                CircuitGuardError::InvalidParameters(format!(
                    "no resistance data for {} / {} mm² conductors",
                    live, cpc
                ))
            })?,
        ),
        None => None,
    };

    let voltage_drop = match params.cable_length_m {
        Some(length) => {
            let mv = voltage_drop_mv_per_amp_metre(live, three_phase).ok_or_else(|| {
                CircuitGuardError::InvalidParameters(format!(
                    "no voltage drop data for {} mm² conductors",
                    live
                ))
            })?;
            Some(mv * ib * length / 1000.0 / params.voltage_v * 100.0)
        }
        None => None,
    };

    let device_type = device
        .map(|d| d.device_type_or_default().to_string())
        .unwrap_or_else(|| DEFAULT_DEVICE_TYPE.to_string());
    let device_curve = device
        .map(|d| d.curve_or_default().to_string())
        .unwrap_or_else(|| DEFAULT_CURVE.to_string());

    let expected_zs = params.ze_ohms.zip(r1r2).map(|(ze, r)| ze + r);
    let limit = max_zs(&device_type, &device_curve, rating, options.nominal_u0, options.cmin);

    tracing::debug!(
        "Computed design for '{}': Ib={:.2}A In={}A Iz={}A live={}mm² cpc={}mm² method={}",
        params.name,
        ib,
        rating,
        iz,
        live,
        cpc,
        method.letter()
    );

    Ok(DesignResult {
        design_current: ib,
        selected_device_rating: rating,
        tabulated_cable_rating: iz,
        live_size_mm2: live,
        cpc_size_mm2: cpc,
        expected_conductor_resistance: r1r2,
        expected_voltage_drop_percent: voltage_drop,
        reference_method_code: installation.code(),
        reference_method: method,
        cable_type,
        load_type: params.load_type.clone(),
        device_type,
        device_curve,
        expected_zs,
        max_zs: limit,
    })
}

/// Design current Ib. Single-phase `P / V`; balanced three-phase
/// `P / (√3 · V)` with V line-to-line. An explicit current wins.
pub fn design_current(params: &CircuitParameters) -> Result<f64> {
    if let Some(current) = params.design_current_a {
        return Ok(current);
    }
    let power = params.load_power_w.ok_or_else(|| {
        CircuitGuardError::InvalidParameters(
            "either loadPowerW or designCurrentA is required".to_string(),
        )
    })?;
    let current = match params.phases {
        Phases::Single => power / params.voltage_v,
        Phases::Three => power / (3f64.sqrt() * params.voltage_v),
    };
    Ok(current)
}

/// Smallest standard device rating not below the design current.
pub fn select_device_rating(design_current: f64) -> Result<f64> {
    next_standard_rating(design_current).ok_or_else(|| {
        tracing::warn!(
            "Design current {:.2}A exceeds the device catalogue",
            design_current
        );
        CircuitGuardError::UnresolvedRating { design_current }
    })
}

/// Smallest tabulated cable whose Iz covers `device_rating`. Returns the
/// size and its Iz.
pub fn select_cable(
    cable: CableType,
    method: ReferenceMethod,
    three_phase: bool,
    device_rating: f64,
) -> Result<(f64, f64)> {
    cable
        .sizes()
        .iter()
        .filter_map(|size| {
            tabulated_rating(cable, method, three_phase, *size).map(|iz| (*size, iz))
        })
        .find(|(_, iz)| *iz >= device_rating)
        .ok_or_else(|| {
            tracing::warn!(
                "No {:?} cable carries {}A by reference method {}",
                cable,
                device_rating,
                method.letter()
            );
            CircuitGuardError::UnresolvedCableSize {
                required: device_rating,
                method: method.letter(),
            }
        })
}

/// R1+R2 in ohms at operating temperature for a run of `length_m` metres.
/// `None` when either size is missing from the resistance table.
pub fn expected_r1r2(live_mm2: f64, cpc_mm2: f64, length_m: f64, multiplier: f64) -> Option<f64> {
    let r_live = conductor_resistance(live_mm2)?;
    let r_cpc = conductor_resistance(cpc_mm2)?;
    Some((r_live + r_cpc) * length_m / 1000.0 * multiplier)
}

fn check_parameters(params: &CircuitParameters) -> Result<()> {
    let invalid = |msg: String| -> Result<()> { Err(CircuitGuardError::InvalidParameters(msg)) };

    if !params.voltage_v.is_finite() || params.voltage_v <= 0.0 {
        return invalid(format!("voltage must be positive, got {}", params.voltage_v));
    }
    match (params.design_current_a, params.load_power_w) {
        (Some(current), _) if !current.is_finite() || current < 0.0 => {
            return invalid(format!("design current must be non-negative, got {}", current));
        }
        (None, Some(power)) if !power.is_finite() || power < 0.0 => {
            return invalid(format!("load power must be non-negative, got {}", power));
        }
        (None, None) => {
            return invalid("either loadPowerW or designCurrentA is required".to_string());
        }
        _ => {}
    }

    let optional = [
        ("cable length", params.cable_length_m, false),
        ("live conductor size", params.live_size_mm2, true),
        ("CPC size", params.cpc_size_mm2, true),
        ("Ze", params.ze_ohms, false),
        ("device rating", params.device.as_ref().and_then(|d| d.rating), true),
    ];
    for (name, value, strictly_positive) in optional {
        if let Some(value) = value {
            let bad = !value.is_finite() || value < 0.0 || (strictly_positive && value == 0.0);
            if bad {
                return invalid(format!("{} out of range: {}", name, value));
            }
        }
    }
    Ok(())
}
