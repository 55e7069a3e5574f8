use crate::design::CircuitParameters;

pub fn build_design_prompt(params: &CircuitParameters) -> String {
    format!(
        r#"You are a qualified electrical designer working to BS 7671.

Circuit Context:
{}

Design this circuit and state, with units:
1. Design current (Ib) in A
2. Protective device type, curve and rating (In) in A
3. Live conductor cable size in mm²
4. Tabulated current-carrying capacity (Iz) in A
5. Voltage drop as a percentage of supply voltage

Check that Ib ≤ In ≤ Iz and that voltage drop is within 3% for lighting or 5% for other circuits."#,
        summarize_circuit(params)
    )
}

/// Prompt for another attempt after a response failed validation.
pub fn build_correction_prompt(
    params: &CircuitParameters,
    previous_response: &str,
    fix_instructions: &str,
) -> String {
    format!(
        r#"{}

Your previous answer was:
---
{}
---

It contained calculation errors. Correct them:
{}

Restate the full design with the corrected values."#,
        build_design_prompt(params),
        previous_response.trim(),
        fix_instructions
    )
}

fn summarize_circuit(params: &CircuitParameters) -> String {
    let mut lines = Vec::new();

    if !params.name.is_empty() {
        lines.push(format!("Name: {}", params.name));
    }
    lines.push(format!("Load type: {}", params.load_type));
    match (params.design_current_a, params.load_power_w) {
        (Some(current), _) => lines.push(format!("Design current: {}A", current)),
        (None, Some(power)) => lines.push(format!("Load: {}W", power)),
        (None, None) => {}
    }
    lines.push(format!("Supply: {}V {}", params.voltage_v, params.phases.label()));
    if let Some(length) = params.cable_length_m {
        lines.push(format!("Cable length: {}m", length));
    }
    if let Some(method) = &params.installation_method {
        lines.push(format!("Installation method: {}", method));
    }
    if let Some(ze) = params.ze_ohms {
        lines.push(format!("Ze: {}Ω", ze));
    }
    if params.rcd_required {
        lines.push("RCD protection required".to_string());
    }
    if params.afdd_required {
        lines.push("AFDD required".to_string());
    }

    lines.join("\n")
}
