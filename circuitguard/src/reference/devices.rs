//! Protective device catalogue and disconnection limits.

pub const DEFAULT_DEVICE_TYPE: &str = "MCB";
pub const DEFAULT_CURVE: &str = "B";
/// Breaking capacity (kA) assumed when none is recorded.
pub const DEFAULT_BREAKING_CAPACITY_KA: f64 = 6.0;

/// Standard overcurrent device ratings in amps, ascending.
pub const STANDARD_DEVICE_RATINGS: &[f64] = &[
    6.0, 10.0, 16.0, 20.0, 25.0, 32.0, 40.0, 45.0, 50.0, 63.0, 80.0, 100.0, 125.0,
];

/// Smallest standard rating that is not below `current`. `None` once the
/// catalogue is exhausted; callers must not substitute a default.
pub fn next_standard_rating(current: f64) -> Option<f64> {
    STANDARD_DEVICE_RATINGS
        .iter()
        .copied()
        .find(|rating| *rating >= current)
}

/// Instantaneous trip multiple of In for a circuit-breaker curve.
fn trip_multiple(curve: &str) -> Option<f64> {
    match curve.trim().to_uppercase().as_str() {
        "B" => Some(5.0),
        "C" => Some(10.0),
        "D" => Some(20.0),
        _ => None,
    }
}

/// Maximum earth fault loop impedance for 0.4 s disconnection of an MCB or
/// RCBO: `U0 × Cmin / (k × In)`. Other device families return `None`.
pub fn max_zs(device_type: &str, curve: &str, rating: f64, u0: f64, cmin: f64) -> Option<f64> {
    let upper = device_type.to_uppercase();
    if !(upper.contains("MCB") || upper.contains("RCBO")) || rating <= 0.0 {
        return None;
    }
    let k = trip_multiple(curve)?;
    Some(u0 * cmin / (k * rating))
}

/// Product standard printed on the certificate for a device family.
pub fn bs_standard_for(device_type: &str) -> &'static str {
    let upper = device_type.to_uppercase();
    if upper.contains("RCBO") {
        "BS EN 61009"
    } else if upper.contains("RCD") {
        "BS EN 61008"
    } else if upper.contains("FUSE") || upper.contains("BS 88") || upper.contains("BS88") {
        "BS 88"
    } else {
        "BS EN 60898"
    }
}
