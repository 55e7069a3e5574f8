//! Example: build a certificate schedule from a JSON design.
//! Run with: cargo run --example certificate_schedule [path/to/design.json]

use chrono::Local;
use circuitguard::schedule::{build_installation_schedule, MultiCircuitDesign, ProjectInfo, SiteInfo};
use circuitguard::EngineOptions;
use serde::Deserialize;

#[derive(Deserialize)]
struct DesignFile {
    project: ProjectInfo,
    site: SiteInfo,
    design: MultiCircuitDesign,
}

fn main() -> Result<(), circuitguard::CircuitGuardError> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/domestic_rewire.json".to_string());
    let file: DesignFile = serde_json::from_str(&std::fs::read_to_string(&path)?)?;

    let schedule = build_installation_schedule(
        &file.design,
        &file.project,
        &file.site,
        Local::now().date_naive(),
        &EngineOptions::default(),
    )?;

    println!(
        "Installation {} - {} ({:?})",
        schedule.installation_id, schedule.site.address, schedule.status
    );
    println!(
        "{:<4} {:<26} {:<13} {:>4} {:>6} {:>9} {:>10} {:>8}",
        "No.", "Description", "Phase", "Pts", "Live", "CPC", "Device", "R1+R2"
    );
    for row in &schedule.rows {
        println!(
            "{:<4} {:<26} {:<13} {:>4} {:>6} {:>9} {:>10} {:>8}",
            row.circuit_number,
            row.description,
            row.phase_type,
            row.points_served,
            row.live_conductor_size,
            row.cpc_size,
            format!("{}{} {}", row.protective_device.curve, row.protective_device.rating, row.protective_device.device_type),
            row.expected_r1r2
                .map(|r| format!("{:.3}", r))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    let record = schedule.to_record()?;
    println!("\n{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
