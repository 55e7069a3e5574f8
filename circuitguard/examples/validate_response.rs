//! Example: check a generated design description against the calculator.
//! Run with: cargo run --example validate_response [path/to/response.txt]

use circuitguard::{CircuitGuardCore, CircuitParameters, EngineOptions};

const SAMPLE: &str = "The design current (Ib) is 32A, so a 25A Type B MCB is used \
    with 2.5mm² twin and earth (Iz = 27A). Voltage drop is 2.4%.";

fn main() -> Result<(), circuitguard::CircuitGuardError> {
    tracing_subscriber::fmt::init();

    let text = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };

    let params = CircuitParameters::single_phase(7200.0, 230.0, "socket")
        .with_name("Kitchen ring final")
        .with_length(30.0)
        .with_method("clipped direct")
        .with_ze(0.35);

    let review = CircuitGuardCore::review_response(&text, &params, &EngineOptions::default())?;

    println!(
        "Calculated: Ib={:.2}A In={}A Iz={}A cable={}mm²/{}mm²",
        review.design.design_current,
        review.design.selected_device_rating,
        review.design.tabulated_cable_rating,
        review.design.live_size_mm2,
        review.design.cpc_size_mm2
    );
    println!("Claimed:    {:?}", review.claim);
    println!(
        "Verdict:    {} (confidence {:.0}%)",
        if review.is_valid() { "valid" } else { "invalid" },
        review.validation.confidence
    );
    for warning in &review.validation.warnings {
        println!("  [warning] {}: {}", warning.field, warning.message);
    }
    if !review.is_valid() {
        println!("\nFix instructions:\n{}", review.fix_instructions);
        std::process::exit(1);
    }
    Ok(())
}
