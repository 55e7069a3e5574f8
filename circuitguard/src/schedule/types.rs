use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::design::DeviceSpec;
use crate::reference::CableType;

/// One circuit as it leaves the design workflow. Phase and load type are
/// kept as the free text the designer entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitDesign {
    pub name: String,
    #[serde(default)]
    pub phases: String,
    pub load_type: String,
    #[serde(default)]
    pub load_power_w: Option<f64>,
    #[serde(default)]
    pub design_current_a: Option<f64>,
    /// Falls back to the site supply voltage (or 400 V for three-phase).
    #[serde(default)]
    pub voltage_v: Option<f64>,
    #[serde(default)]
    pub cable_length_m: Option<f64>,
    #[serde(default)]
    pub installation_method: Option<String>,
    #[serde(default)]
    pub cable_type: CableType,
    #[serde(default)]
    pub live_size_mm2: Option<f64>,
    #[serde(default)]
    pub cpc_size_mm2: Option<f64>,
    #[serde(default)]
    pub protective_device: Option<DeviceSpec>,
    #[serde(default)]
    pub rcd_required: bool,
    #[serde(default)]
    pub afdd_required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiCircuitDesign {
    pub circuits: Vec<CircuitDesign>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectInfo {
    pub name: String,
    pub client: Option<String>,
    pub reference: Option<String>,
    pub designer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteInfo {
    pub address: String,
    pub postcode: Option<String>,
    /// TN-S, TN-C-S, TT ...
    pub earthing_arrangement: Option<String>,
    pub ze_ohms: Option<f64>,
    pub supply_voltage_v: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDevice {
    #[serde(rename = "type")]
    pub device_type: String,
    pub curve: String,
    pub rating: f64,
    pub breaking_capacity_ka: f64,
    pub bs_standard: String,
}

/// A schedule row. Everything above the placeholders is derived once from
/// the design; the placeholders belong to the inspection workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub circuit_number: u32,
    pub phase_type: String,
    pub description: String,
    pub reference_method_code: u16,
    pub points_served: u32,
    pub live_conductor_size: f64,
    pub cpc_size: f64,
    pub cable_length_m: Option<f64>,
    pub protective_device: ScheduleDevice,
    pub expected_r1r2: Option<f64>,
    pub max_zs: Option<f64>,
    pub rcd_required: bool,
    pub afdd_required: bool,
    pub insulation_resistance: String,
    pub polarity: String,
    pub measured_zs: String,
    pub rcd_behaviour: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    #[default]
    Pending,
    Approved,
}

/// Schedule rows plus the installation metadata printed on the certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationSchedule {
    pub installation_id: String,
    pub project: ProjectInfo,
    pub site: SiteInfo,
    pub design_date: NaiveDate,
    pub status: ScheduleStatus,
    pub rows: Vec<ScheduleRow>,
}

impl InstallationSchedule {
    pub fn approve(&mut self) {
        self.status = ScheduleStatus::Approved;
    }

    /// Shape handed to the persistence layer: identifiers in the clear and
    /// the schedule itself as an opaque JSON payload.
    pub fn to_record(&self) -> Result<ScheduleRecord> {
        Ok(ScheduleRecord {
            installation_id: self.installation_id.clone(),
            status: self.status,
            design_date: self.design_date,
            designer: self.project.designer.clone(),
            address: self.site.address.clone(),
            circuit_count: self.rows.len(),
            created_at: Utc::now(),
            payload: serde_json::to_value(self)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub installation_id: String,
    pub status: ScheduleStatus,
    pub design_date: NaiveDate,
    pub designer: String,
    pub address: String,
    pub circuit_count: usize,
    pub created_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl ScheduleRecord {
    /// Recover the schedule from a stored record.
    pub fn schedule(&self) -> Result<InstallationSchedule> {
        Ok(serde_json::from_value(self.payload.clone())?)
    }
}
