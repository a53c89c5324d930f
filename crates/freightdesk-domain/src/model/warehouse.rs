use freightdesk_types::WarehouseId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub warehouse_id: WarehouseId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "isActive", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Warehouse {
    pub fn display_name(&self) -> String {
        match self.location.as_deref() {
            Some(location) if !location.is_empty() => format!("{} - {}", self.name, location),
            _ => self.name.clone(),
        }
    }
}
