//! Inventory item definitions

use freightdesk_types::{InventoryId, WarehouseId};
use serde::{Deserialize, Serialize};

/// Stock line held by a single warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub inventory_id: InventoryId,
    #[serde(alias = "itemName")]
    pub name: String,
    pub sku: String,
    /// Units on hand
    pub quantity: u32,
    /// Per-unit weight (kg)
    #[serde(default)]
    pub weight: f64,
    /// Per-unit volume (m³)
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub warehouse_id: Option<WarehouseId>,
}

impl InventoryItem {
    /// Weight of the whole on-hand quantity
    pub fn line_weight(&self) -> f64 {
        self.weight * f64::from(self.quantity)
    }

    /// Volume of the whole on-hand quantity
    pub fn line_volume(&self) -> f64 {
        self.volume * f64::from(self.quantity)
    }
}
