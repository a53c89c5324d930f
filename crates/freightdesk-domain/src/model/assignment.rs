//! Assignment request/record definitions

use chrono::NaiveDateTime;
use freightdesk_types::{AssignmentId, InventoryId, TruckId, WarehouseId};
use serde::{Deserialize, Serialize};

/// Body of `POST /inventory-assignments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub truck_id: TruckId,
    /// Origin warehouse
    pub warehouse_id: WarehouseId,
    pub destination_warehouse_id: WarehouseId,
    pub inventory_ids: Vec<InventoryId>,
}

/// Lifecycle of an assignment on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentStatus {
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::InTransit => "in transit",
            AssignmentStatus::Delivered => "delivered",
            AssignmentStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedItem {
    pub inventory_id: InventoryId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Server view of an assignment. Returned by submission and by the lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentRecord {
    pub assignment_id: Option<AssignmentId>,
    pub truck_id: Option<TruckId>,
    pub truck_registration_number: Option<String>,
    pub driver_name: Option<String>,
    pub origin_warehouse_name: Option<String>,
    pub destination_warehouse_name: Option<String>,
    pub assigned_inventory: Vec<AssignedItem>,
    pub status: Option<AssignmentStatus>,
    pub assignment_date: Option<NaiveDateTime>,
    pub message: Option<String>,
    pub success: bool,
}

/// Assignments touching one warehouse, split by direction
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WarehouseAssignments {
    /// Leaving the warehouse (it is the origin)
    pub outgoing: Vec<AssignmentRecord>,
    /// Arriving at the warehouse (it is the destination)
    pub incoming: Vec<AssignmentRecord>,
}

impl WarehouseAssignments {
    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }
}
