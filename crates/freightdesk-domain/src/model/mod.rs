//! Domain model types

pub mod assignment;
pub mod inventory;
pub mod role;
pub mod truck;
pub mod warehouse;

pub use assignment::{
    AssignedItem, AssignmentRecord, AssignmentRequest, AssignmentStatus, WarehouseAssignments,
};
pub use inventory::InventoryItem;
pub use role::{Capability, Role};
pub use truck::{Truck, TruckStatus};
pub use warehouse::Warehouse;
