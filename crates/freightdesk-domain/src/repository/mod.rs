//! Collaborator traits the planner and services depend on
//!
//! Implementations live in the infra crate (REST) and in tests (in-memory).

use freightdesk_types::{ApiError, TruckId, WarehouseId};

use crate::model::{
    AssignmentRecord, AssignmentRequest, InventoryItem, Truck, Warehouse, WarehouseAssignments,
};

/// Source of trucks that can be assigned
pub trait TruckProvider {
    fn list_trucks(&self) -> Result<Vec<Truck>, ApiError>;
}

/// Source of warehouses (origin and destination candidates)
pub trait WarehouseProvider {
    fn list_warehouses(&self) -> Result<Vec<Warehouse>, ApiError>;
}

/// Source of stock held by one warehouse
pub trait InventoryProvider {
    fn list_inventory(&self, warehouse_id: WarehouseId) -> Result<Vec<InventoryItem>, ApiError>;
}

/// Write side: creates the assignment record on the server
pub trait AssignmentGateway {
    /// Submit a validated request. A 2xx response is returned as-is, including
    /// bodies with `success: false`; the caller decides what that means.
    fn submit_assignment(&self, request: &AssignmentRequest) -> Result<AssignmentRecord, ApiError>;
}

/// Read side for existing assignments
pub trait AssignmentLookup {
    fn find_by_truck(&self, truck_id: TruckId) -> Result<Vec<AssignmentRecord>, ApiError>;

    fn find_by_warehouse(
        &self,
        warehouse_id: WarehouseId,
    ) -> Result<WarehouseAssignments, ApiError>;
}

/// Receives the hand-off after a successful submission
pub trait NavigationSink {
    fn show_truck(&mut self, truck_id: TruckId);
}

