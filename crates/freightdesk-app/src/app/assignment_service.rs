//! Assignment Service - the inventory-to-truck assignment use case
//!
//! Wires the [`AssignmentPlanner`] to its collaborators:
//! 1. Load trucks and warehouses
//! 2. Load the origin warehouse's stock when the origin is chosen
//! 3. Apply the requested truck, destination and items
//! 4. Validate against truck capacity
//! 5. Submit through the gateway (unless this is a dry run)

use freightdesk_domain::model::{AssignmentRecord, AssignmentRequest, InventoryItem, Truck};
use freightdesk_domain::repository::{
    AssignmentGateway, InventoryProvider, NavigationSink, TruckProvider, WarehouseProvider,
};
use freightdesk_domain::service::{AssignmentPlanner, CapacityCheck, PlannerError, ValidationError};
use freightdesk_types::{ApiError, InventoryId, TruckId, WarehouseId};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors specific to the assignment use case
#[derive(Debug, Error)]
pub enum AssignmentServiceError {
    /// Caught locally; nothing was sent
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// Submission never got an answer; safe to retry
    #[error("{0}")]
    Transport(String),

    /// Server refused the assignment; message is the server's
    #[error("{0}")]
    Rejected(String),

    #[error("Failed to load data: {0}")]
    Load(ApiError),

    #[error(transparent)]
    Planner(PlannerError),
}

const GENERIC_SUBMIT_FAILURE: &str = "Failed to assign inventory. Please try again.";

impl From<ApiError> for AssignmentServiceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized(msg) => AssignmentServiceError::Unauthorized(msg),
            other => AssignmentServiceError::Load(other),
        }
    }
}

impl From<PlannerError> for AssignmentServiceError {
    fn from(err: PlannerError) -> Self {
        match err {
            PlannerError::Invalid(v) => AssignmentServiceError::Validation(v),
            PlannerError::Submission(ApiError::Unauthorized(msg)) => {
                AssignmentServiceError::Unauthorized(msg)
            }
            PlannerError::Submission(ApiError::Transport(msg)) => {
                debug!(error = %msg, "assignment submission transport failure");
                AssignmentServiceError::Transport(GENERIC_SUBMIT_FAILURE.to_string())
            }
            PlannerError::Submission(ApiError::Rejected { message, .. }) => {
                AssignmentServiceError::Rejected(message)
            }
            PlannerError::Submission(other) => {
                AssignmentServiceError::Rejected(other.to_string())
            }
            other => AssignmentServiceError::Planner(other),
        }
    }
}

impl AssignmentServiceError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, AssignmentServiceError::Transport(_))
    }
}

impl From<AssignmentServiceError> for freightdesk_types::Error {
    fn from(err: AssignmentServiceError) -> Self {
        use freightdesk_types::Error;
        match err {
            AssignmentServiceError::Unauthorized(msg) => Error::Api(ApiError::Unauthorized(msg)),
            AssignmentServiceError::Load(api) => Error::Api(api),
            AssignmentServiceError::Rejected(message) => Error::Api(ApiError::Rejected {
                status: None,
                message,
            }),
            other => Error::Invalid(other.to_string()),
        }
    }
}

/// What the user asked to assign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentPlan {
    pub truck_id: Option<TruckId>,
    pub origin_id: Option<WarehouseId>,
    pub destination_id: Option<WarehouseId>,
    pub inventory_ids: Vec<InventoryId>,
    /// Search term for the candidate listing; never affects the selection
    pub filter: Option<String>,
}

impl AssignmentPlan {
    pub fn new() -> Self {
        Self {
            truck_id: None,
            origin_id: None,
            destination_id: None,
            inventory_ids: Vec::new(),
            filter: None,
        }
    }

    pub fn with_truck(mut self, truck_id: TruckId) -> Self {
        self.truck_id = Some(truck_id);
        self
    }

    pub fn with_origin(mut self, origin_id: WarehouseId) -> Self {
        self.origin_id = Some(origin_id);
        self
    }

    pub fn with_destination(mut self, destination_id: WarehouseId) -> Self {
        self.destination_id = Some(destination_id);
        self
    }

    pub fn with_items(mut self, ids: impl IntoIterator<Item = InventoryId>) -> Self {
        self.inventory_ids.extend(ids);
        self
    }

    pub fn with_filter(mut self, term: impl Into<String>) -> Self {
        self.filter = Some(term.into());
        self
    }
}

impl Default for AssignmentPlan {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of running a plan
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentOutcome {
    pub request: AssignmentRequest,
    pub truck: Truck,
    pub capacity: CapacityCheck,
    /// Lines that were (or, for a dry run, would be) loaded
    pub items: Vec<InventoryItem>,
    /// Origin stock matching the plan's filter
    pub visible: Vec<InventoryItem>,
    /// Server record; `None` for a dry run
    pub record: Option<AssignmentRecord>,
}

pub struct AssignmentService<'a> {
    trucks: &'a dyn TruckProvider,
    warehouses: &'a dyn WarehouseProvider,
    inventory: &'a dyn InventoryProvider,
    gateway: &'a dyn AssignmentGateway,
}

impl<'a> AssignmentService<'a> {
    pub fn new(
        trucks: &'a dyn TruckProvider,
        warehouses: &'a dyn WarehouseProvider,
        inventory: &'a dyn InventoryProvider,
        gateway: &'a dyn AssignmentGateway,
    ) -> Self {
        Self {
            trucks,
            warehouses,
            inventory,
            gateway,
        }
    }

    /// Load candidates and start an empty planner
    pub fn open_planner(&self) -> Result<AssignmentPlanner, AssignmentServiceError> {
        let trucks = self.trucks.list_trucks()?;
        let warehouses = self.warehouses.list_warehouses()?;
        for truck in trucks.iter().filter(|t| !t.has_valid_capacity()) {
            warn!(
                truck_id = %truck.truck_id,
                registration = %truck.registration_number,
                "skipping truck with non-positive capacity"
            );
        }
        debug!(trucks = trucks.len(), warehouses = warehouses.len(), "opened planner");
        Ok(AssignmentPlanner::new(trucks, warehouses))
    }

    /// Select `origin`, fetching its stock first unless it is already the origin
    pub fn choose_origin(
        &self,
        planner: &mut AssignmentPlanner,
        origin: WarehouseId,
    ) -> Result<(), AssignmentServiceError> {
        if planner.origin() == Some(origin) {
            return Ok(());
        }
        let stock = self.inventory.list_inventory(origin)?;
        let (stock, foreign): (Vec<_>, Vec<_>) = stock
            .into_iter()
            .partition(|item| item.warehouse_id.map_or(true, |w| w == origin));
        if !foreign.is_empty() {
            warn!(
                %origin,
                dropped = foreign.len(),
                "inventory listing contained items from other warehouses"
            );
        }
        planner.select_origin(origin, stock)?;
        Ok(())
    }

    /// Build a planner reflecting `plan`. Invalid combinations that the
    /// planner refuses outright (unknown ids, destination equal to origin)
    /// fail here; capacity and completeness are left to validation.
    pub fn apply_plan(
        &self,
        plan: &AssignmentPlan,
    ) -> Result<AssignmentPlanner, AssignmentServiceError> {
        let mut planner = self.open_planner()?;
        if let Some(truck_id) = plan.truck_id {
            planner.select_truck(truck_id)?;
        }
        if let Some(origin) = plan.origin_id {
            self.choose_origin(&mut planner, origin)?;
        }
        if let Some(destination) = plan.destination_id {
            planner.select_destination(destination)?;
        }
        for &id in &plan.inventory_ids {
            if !planner.is_selected(id) {
                planner.toggle_item(id)?;
            }
        }
        if let Some(ref term) = plan.filter {
            planner.set_filter(term.clone())?;
        }
        Ok(planner)
    }

    /// Apply, validate and (unless `dry_run`) submit `plan`.
    pub fn run(
        &self,
        plan: &AssignmentPlan,
        dry_run: bool,
        navigation: &mut dyn NavigationSink,
    ) -> Result<AssignmentOutcome, AssignmentServiceError> {
        let mut planner = self.apply_plan(plan)?;
        planner.validate()?;

        // validate() passed, so a truck is selected
        let truck = planner
            .truck()
            .cloned()
            .ok_or(ValidationError::MissingTruck)?;
        let capacity = planner
            .utilization()
            .ok_or(ValidationError::MissingTruck)?;
        let request = AssignmentRequest {
            truck_id: truck.truck_id,
            warehouse_id: planner.origin().ok_or(ValidationError::MissingOrigin)?,
            destination_warehouse_id: planner
                .destination()
                .ok_or(ValidationError::MissingDestination)?,
            inventory_ids: planner.selected_ids(),
        };
        let items: Vec<InventoryItem> =
            planner.selected_items().into_iter().cloned().collect();
        let visible: Vec<InventoryItem> =
            planner.visible_inventory().into_iter().cloned().collect();

        if dry_run {
            info!(truck_id = %truck.truck_id, "dry run: assignment is valid, not submitting");
            return Ok(AssignmentOutcome {
                request,
                truck,
                capacity,
                items,
                visible,
                record: None,
            });
        }

        let record = planner.submit(self.gateway, navigation)?;
        info!(
            truck_id = %truck.truck_id,
            assignment_id = ?record.assignment_id,
            "inventory assigned"
        );
        Ok(AssignmentOutcome {
            request,
            truck,
            capacity,
            items,
            visible,
            record: Some(record),
        })
    }
}
