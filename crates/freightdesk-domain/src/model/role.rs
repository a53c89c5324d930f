//! User roles and the capability table that gates what each role may do

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Role {
    Admin,
    LogisticsManager,
    WarehouseStaff,
    DeliveryDriver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewDashboard,
    ViewWarehouses,
    ManageWarehouses,
    ViewInventory,
    ManageInventory,
    ReorderInventory,
    AssignInventory,
    ManageTrucks,
}

impl Capability {
    pub const ALL: [Capability; 8] = [
        Capability::ViewDashboard,
        Capability::ViewWarehouses,
        Capability::ManageWarehouses,
        Capability::ViewInventory,
        Capability::ManageInventory,
        Capability::ReorderInventory,
        Capability::AssignInventory,
        Capability::ManageTrucks,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Capability::ViewDashboard => "view dashboard",
            Capability::ViewWarehouses => "view warehouses",
            Capability::ManageWarehouses => "manage warehouses",
            Capability::ViewInventory => "view inventory",
            Capability::ManageInventory => "manage inventory",
            Capability::ReorderInventory => "reorder inventory",
            Capability::AssignInventory => "assign inventory to trucks",
            Capability::ManageTrucks => "manage trucks",
        }
    }
}

const STAFF_CAPABILITIES: &[Capability] = &[
    Capability::ViewDashboard,
    Capability::ViewWarehouses,
    Capability::ViewInventory,
    Capability::ManageInventory,
    Capability::AssignInventory,
];

const DRIVER_CAPABILITIES: &[Capability] = &[
    Capability::ViewDashboard,
    Capability::ViewWarehouses,
    Capability::ViewInventory,
];

impl Role {
    /// Capability table. Every gating decision goes through here.
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            Role::Admin | Role::LogisticsManager => &Capability::ALL,
            Role::WarehouseStaff => STAFF_CAPABILITIES,
            Role::DeliveryDriver => DRIVER_CAPABILITIES,
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::LogisticsManager => "logistics_manager",
            Role::WarehouseStaff => "warehouse_staff",
            Role::DeliveryDriver => "delivery_driver",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        // backends sometimes send Spring-style ROLE_ prefixes
        let normalized = normalized.strip_prefix("role_").unwrap_or(&normalized);
        match normalized {
            "admin" => Ok(Role::Admin),
            "logistics_manager" => Ok(Role::LogisticsManager),
            "warehouse_staff" => Ok(Role::WarehouseStaff),
            "delivery_driver" => Ok(Role::DeliveryDriver),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
