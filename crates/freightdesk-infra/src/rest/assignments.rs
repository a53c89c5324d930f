//! Assignment submission and lookups
//!
//! Submission answers with a flat response record. The lookups answer with
//! the stored assignment entities instead (nested truck, warehouses and
//! items), which are flattened into [`AssignmentRecord`] here.

use chrono::NaiveDateTime;
use freightdesk_domain::model::{
    AssignedItem, AssignmentRecord, AssignmentRequest, AssignmentStatus, WarehouseAssignments,
};
use freightdesk_domain::repository::{AssignmentGateway, AssignmentLookup};
use freightdesk_types::{ApiError, AssignmentId, InventoryId, TruckId, WarehouseId};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use super::RestClient;
use crate::session::CredentialProvider;

const ASSIGNMENTS_PATH: &str = "inventory-assignments";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredAssignment {
    assignment_id: Option<AssignmentId>,
    truck: Option<TruckRef>,
    source_warehouse: Option<WarehouseRef>,
    destination_warehouse: Option<WarehouseRef>,
    status: Option<AssignmentStatus>,
    #[serde(deserialize_with = "lenient_datetime")]
    assigned_at: Option<NaiveDateTime>,
    assignment_items: Vec<StoredItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TruckRef {
    truck_id: TruckId,
    #[serde(default)]
    registration_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WarehouseRef {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StoredItem {
    inventory: Option<InventoryRef>,
    #[serde(default)]
    quantity: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InventoryRef {
    inventory_id: InventoryId,
    #[serde(default, alias = "name")]
    item_name: Option<String>,
    #[serde(default)]
    sku: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WarehouseAssignmentsBody {
    source_assignments: Vec<StoredAssignment>,
    destination_assignments: Vec<StoredAssignment>,
}

/// Timestamps written in a form chrono cannot read (e.g. Jackson's array
/// form) are dropped rather than failing the whole listing.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse::<NaiveDateTime>().ok()))
}

impl From<StoredAssignment> for AssignmentRecord {
    fn from(stored: StoredAssignment) -> Self {
        let (truck_id, truck_registration_number) = match stored.truck {
            Some(truck) => (Some(truck.truck_id), truck.registration_number),
            None => (None, None),
        };
        AssignmentRecord {
            assignment_id: stored.assignment_id,
            truck_id,
            truck_registration_number,
            origin_warehouse_name: stored.source_warehouse.and_then(|w| w.name),
            destination_warehouse_name: stored.destination_warehouse.and_then(|w| w.name),
            assigned_inventory: stored
                .assignment_items
                .into_iter()
                .filter_map(|item| {
                    let inventory = item.inventory?;
                    Some(AssignedItem {
                        inventory_id: inventory.inventory_id,
                        name: inventory.item_name,
                        sku: inventory.sku,
                        weight: None,
                        volume: None,
                        quantity: item.quantity,
                    })
                })
                .collect(),
            status: stored.status,
            assignment_date: stored.assigned_at,
            ..AssignmentRecord::default()
        }
    }
}

impl<C: CredentialProvider> AssignmentGateway for RestClient<C> {
    fn submit_assignment(&self, request: &AssignmentRequest) -> Result<AssignmentRecord, ApiError> {
        info!(
            truck_id = %request.truck_id,
            origin = %request.warehouse_id,
            destination = %request.destination_warehouse_id,
            items = request.inventory_ids.len(),
            "submitting inventory assignment"
        );
        self.post_json(ASSIGNMENTS_PATH, request)
    }
}

impl<C: CredentialProvider> AssignmentLookup for RestClient<C> {
    fn find_by_truck(&self, truck_id: TruckId) -> Result<Vec<AssignmentRecord>, ApiError> {
        let stored: Vec<StoredAssignment> =
            self.get_json(&format!("{}/truck/{}", ASSIGNMENTS_PATH, truck_id))?;
        debug!(%truck_id, count = stored.len(), "loaded truck assignments");
        Ok(stored.into_iter().map(AssignmentRecord::from).collect())
    }

    fn find_by_warehouse(
        &self,
        warehouse_id: WarehouseId,
    ) -> Result<WarehouseAssignments, ApiError> {
        let body: WarehouseAssignmentsBody =
            self.get_json(&format!("{}/warehouse/{}", ASSIGNMENTS_PATH, warehouse_id))?;
        debug!(
            %warehouse_id,
            outgoing = body.source_assignments.len(),
            incoming = body.destination_assignments.len(),
            "loaded warehouse assignments"
        );
        Ok(WarehouseAssignments {
            outgoing: body.source_assignments.into_iter().map(AssignmentRecord::from).collect(),
            incoming: body
                .destination_assignments
                .into_iter()
                .map(AssignmentRecord::from)
                .collect(),
        })
    }
}
