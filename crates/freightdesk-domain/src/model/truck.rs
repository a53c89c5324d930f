//! Truck type definitions

use freightdesk_types::{DriverId, TruckId};
use serde::{Deserialize, Serialize};

/// Operational status of a truck
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruckStatus {
    #[default]
    Available,
    Assigned,
    InTransit,
    Maintenance,
    OutOfService,
}

impl TruckStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TruckStatus::Available => "Available",
            TruckStatus::Assigned => "Assigned",
            TruckStatus::InTransit => "In Transit",
            TruckStatus::Maintenance => "Maintenance",
            TruckStatus::OutOfService => "Out of Service",
        }
    }
}

/// Truck as returned by `GET /trucks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub truck_id: TruckId,
    /// Registration plate shown to users
    pub registration_number: String,
    #[serde(default)]
    pub model: Option<String>,
    /// Maximum payload (kg)
    pub capacity_weight: f64,
    /// Maximum cargo volume (m³)
    pub capacity_volume: f64,
    #[serde(default)]
    pub driver_id: Option<DriverId>,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub status: TruckStatus,
}

impl Truck {
    /// Both capacity limits must be positive for a truck to carry anything.
    pub fn has_valid_capacity(&self) -> bool {
        self.capacity_weight.is_finite()
            && self.capacity_volume.is_finite()
            && self.capacity_weight > 0.0
            && self.capacity_volume > 0.0
    }

    /// "REG-123 - Volvo FH" style label used in pickers
    pub fn display_name(&self) -> String {
        match self.model.as_deref() {
            Some(model) if !model.is_empty() => format!("{} - {}", self.registration_number, model),
            _ => self.registration_number.clone(),
        }
    }
}
