//! Read-only lookups backing the listing commands

use freightdesk_domain::model::{
    AssignmentRecord, Capability, InventoryItem, Role, Truck, Warehouse, WarehouseAssignments,
};
use freightdesk_domain::repository::{
    AssignmentLookup, InventoryProvider, TruckProvider, WarehouseProvider,
};
use freightdesk_domain::service::filter_inventory;
use freightdesk_types::{ApiError, Error, Result, TruckId, WarehouseId};
use tracing::debug;

/// Which side of an assignment to look up by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentQuery {
    Truck(TruckId),
    Warehouse(WarehouseId),
}

impl AssignmentQuery {
    /// Drivers may look up a truck's load but not a warehouse's traffic
    pub fn capability(&self) -> Capability {
        match self {
            AssignmentQuery::Truck(_) => Capability::ViewInventory,
            AssignmentQuery::Warehouse(_) => Capability::AssignInventory,
        }
    }
}

/// Refuse `capability` for roles that lack it. An unknown role is let
/// through; the backend decides.
pub fn require_capability(role: Option<Role>, capability: Capability) -> Result<()> {
    match role {
        Some(role) if !role.can(capability) => Err(Error::Forbidden(format!(
            "{} cannot {}",
            role,
            capability.label()
        ))),
        _ => Ok(()),
    }
}

pub struct QueryService<'a> {
    trucks: &'a dyn TruckProvider,
    warehouses: &'a dyn WarehouseProvider,
    inventory: &'a dyn InventoryProvider,
    assignments: &'a dyn AssignmentLookup,
}

impl<'a> QueryService<'a> {
    pub fn new(
        trucks: &'a dyn TruckProvider,
        warehouses: &'a dyn WarehouseProvider,
        inventory: &'a dyn InventoryProvider,
        assignments: &'a dyn AssignmentLookup,
    ) -> Self {
        Self {
            trucks,
            warehouses,
            inventory,
            assignments,
        }
    }

    pub fn trucks(&self) -> std::result::Result<Vec<Truck>, ApiError> {
        self.trucks.list_trucks()
    }

    pub fn warehouses(&self) -> std::result::Result<Vec<Warehouse>, ApiError> {
        self.warehouses.list_warehouses()
    }

    /// Stock of one warehouse, optionally narrowed by a name/SKU search
    pub fn inventory(
        &self,
        warehouse_id: WarehouseId,
        search: Option<&str>,
    ) -> std::result::Result<Vec<InventoryItem>, ApiError> {
        let items = self.inventory.list_inventory(warehouse_id)?;
        let Some(term) = search else {
            return Ok(items);
        };
        let total = items.len();
        let matched: Vec<InventoryItem> =
            filter_inventory(&items, term).into_iter().cloned().collect();
        debug!(%warehouse_id, total, matched = matched.len(), "filtered inventory");
        Ok(matched)
    }

    pub fn truck_assignments(
        &self,
        truck_id: TruckId,
    ) -> std::result::Result<Vec<AssignmentRecord>, ApiError> {
        self.assignments.find_by_truck(truck_id)
    }

    pub fn warehouse_assignments(
        &self,
        warehouse_id: WarehouseId,
    ) -> std::result::Result<WarehouseAssignments, ApiError> {
        self.assignments.find_by_warehouse(warehouse_id)
    }
}
