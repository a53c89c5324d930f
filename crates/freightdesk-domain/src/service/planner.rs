//! Inventory-to-truck assignment planner
//!
//! Holds one in-progress assignment: the chosen truck, origin and destination
//! warehouses, and the set of origin inventory lines picked for transport.
//! Totals are recomputed from the selection on demand, and submission is only
//! possible once every check in [`AssignmentPlanner::validate`] passes.
//!
//! The planner never talks to the network itself except through the
//! [`AssignmentGateway`] handed to [`AssignmentPlanner::submit`].

use std::collections::BTreeSet;

use freightdesk_types::{ApiError, InventoryId, TruckId, WarehouseId};
use serde::Serialize;
use thiserror::Error;

use crate::model::{AssignmentRecord, AssignmentRequest, InventoryItem, Truck, Warehouse};
use crate::repository::{AssignmentGateway, NavigationSink};
use crate::service::capacity::{
    check_capacity, compute_totals, format_amount, CapacityCheck, Totals,
};
use crate::service::filter::matches_search;

const SAME_WAREHOUSE_MESSAGE: &str = "Origin and destination warehouses cannot be the same";
const GENERIC_SUBMIT_FAILURE: &str = "Failed to assign inventory. Please try again.";
const DEFAULT_REJECTION: &str = "Failed to assign inventory";

/// Where the planner is in its lifecycle. Derived from the current inputs,
/// except for the two submission phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannerState {
    Empty,
    OriginChosen,
    Configuring,
    Valid,
    Submitting,
    Submitted,
}

/// Submit-time checks, in the order they are applied
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please select a truck")]
    MissingTruck,

    #[error("Please select an origin warehouse")]
    MissingOrigin,

    #[error("Please select a destination warehouse")]
    MissingDestination,

    #[error("Origin and destination warehouses cannot be the same")]
    SameWarehouse,

    #[error("Please select at least one inventory item")]
    NoItems,

    #[error(
        "Total weight ({} kg) exceeds truck capacity ({} kg)",
        amount(.total, .capacity),
        amount(.capacity, .total)
    )]
    WeightExceeded { total: f64, capacity: f64 },

    #[error(
        "Total volume ({} m³) exceeds truck capacity ({} m³)",
        amount(.total, .capacity),
        amount(.capacity, .total)
    )]
    VolumeExceeded { total: f64, capacity: f64 },
}

/// `value` rounded for display, unless rounding would make it read the same
/// as `other`; then the unrounded value is shown so the overage stays visible.
fn amount(value: &f64, other: &f64) -> String {
    let rounded = format_amount(*value);
    if rounded == format_amount(*other) && value != other {
        value.to_string()
    } else {
        rounded
    }
}

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("An assignment is being submitted; wait for it to finish")]
    Busy,

    #[error("This assignment has already been submitted")]
    Finished,

    #[error("No submission is in progress")]
    NotSubmitting,

    #[error("Unknown truck: {0}")]
    UnknownTruck(TruckId),

    #[error("Unknown warehouse: {0}")]
    UnknownWarehouse(WarehouseId),

    #[error("Inventory item {0} is not stocked at the origin warehouse")]
    UnknownItem(InventoryId),

    #[error("{}", SAME_WAREHOUSE_MESSAGE)]
    SameWarehouse(WarehouseId),

    #[error("Select an origin warehouse before choosing items")]
    NoOrigin,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Submission(ApiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Editing,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone)]
pub struct AssignmentPlanner {
    trucks: Vec<Truck>,
    warehouses: Vec<Warehouse>,
    /// Stock of the current origin warehouse
    inventory: Vec<InventoryItem>,
    truck_id: Option<TruckId>,
    origin_id: Option<WarehouseId>,
    destination_id: Option<WarehouseId>,
    selected: BTreeSet<InventoryId>,
    filter: String,
    phase: Phase,
    last_error: Option<String>,
}

impl AssignmentPlanner {
    /// Start an empty plan over the given candidates. Trucks without a usable
    /// capacity are left out.
    pub fn new(trucks: Vec<Truck>, warehouses: Vec<Warehouse>) -> Self {
        Self {
            trucks: trucks.into_iter().filter(Truck::has_valid_capacity).collect(),
            warehouses,
            inventory: Vec::new(),
            truck_id: None,
            origin_id: None,
            destination_id: None,
            selected: BTreeSet::new(),
            filter: String::new(),
            phase: Phase::Editing,
            last_error: None,
        }
    }

    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    /// Full (unfiltered) stock of the origin warehouse
    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn truck(&self) -> Option<&Truck> {
        let id = self.truck_id?;
        self.trucks.iter().find(|t| t.truck_id == id)
    }

    pub fn origin(&self) -> Option<WarehouseId> {
        self.origin_id
    }

    pub fn destination(&self) -> Option<WarehouseId> {
        self.destination_id
    }

    /// Message from the most recent failed validation or submission
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn state(&self) -> PlannerState {
        match self.phase {
            Phase::Submitting => return PlannerState::Submitting,
            Phase::Submitted => return PlannerState::Submitted,
            Phase::Editing => {}
        }
        if self.validate().is_ok() {
            return PlannerState::Valid;
        }
        let nothing_else =
            self.truck_id.is_none() && self.destination_id.is_none() && self.selected.is_empty();
        match (self.origin_id, nothing_else) {
            (None, true) => PlannerState::Empty,
            (Some(_), true) => PlannerState::OriginChosen,
            _ => PlannerState::Configuring,
        }
    }

    fn ensure_editable(&self) -> Result<(), PlannerError> {
        match self.phase {
            Phase::Editing => Ok(()),
            Phase::Submitting => Err(PlannerError::Busy),
            Phase::Submitted => Err(PlannerError::Finished),
        }
    }

    pub fn select_truck(&mut self, truck_id: TruckId) -> Result<(), PlannerError> {
        self.ensure_editable()?;
        if !self.trucks.iter().any(|t| t.truck_id == truck_id) {
            return Err(PlannerError::UnknownTruck(truck_id));
        }
        self.truck_id = Some(truck_id);
        Ok(())
    }

    pub fn clear_truck(&mut self) -> Result<(), PlannerError> {
        self.ensure_editable()?;
        self.truck_id = None;
        Ok(())
    }

    /// Switch the origin warehouse to `warehouse_id`, replacing the candidate
    /// stock with `inventory`.
    ///
    /// A different origin drops every selected item, since a selection is only
    /// meaningful within one warehouse. Re-selecting the current origin is a
    /// no-op and keeps the selection.
    pub fn select_origin(
        &mut self,
        warehouse_id: WarehouseId,
        inventory: Vec<InventoryItem>,
    ) -> Result<(), PlannerError> {
        self.ensure_editable()?;
        self.require_warehouse(warehouse_id)?;
        if self.origin_id == Some(warehouse_id) {
            return Ok(());
        }
        self.origin_id = Some(warehouse_id);
        self.inventory = inventory;
        self.selected.clear();
        if self.destination_id == Some(warehouse_id) {
            self.destination_id = None;
        }
        Ok(())
    }

    pub fn clear_origin(&mut self) -> Result<(), PlannerError> {
        self.ensure_editable()?;
        self.origin_id = None;
        self.inventory.clear();
        self.selected.clear();
        Ok(())
    }

    pub fn select_destination(&mut self, warehouse_id: WarehouseId) -> Result<(), PlannerError> {
        self.ensure_editable()?;
        self.require_warehouse(warehouse_id)?;
        if self.origin_id == Some(warehouse_id) {
            return Err(PlannerError::SameWarehouse(warehouse_id));
        }
        self.destination_id = Some(warehouse_id);
        Ok(())
    }

    pub fn clear_destination(&mut self) -> Result<(), PlannerError> {
        self.ensure_editable()?;
        self.destination_id = None;
        Ok(())
    }

    /// Destination candidates: every warehouse except the current origin
    pub fn destination_options(&self) -> Vec<&Warehouse> {
        self.warehouses
            .iter()
            .filter(|w| Some(w.warehouse_id) != self.origin_id)
            .collect()
    }

    fn require_warehouse(&self, warehouse_id: WarehouseId) -> Result<(), PlannerError> {
        if self.warehouses.iter().any(|w| w.warehouse_id == warehouse_id) {
            Ok(())
        } else {
            Err(PlannerError::UnknownWarehouse(warehouse_id))
        }
    }

    /// Flip the selection of one origin item. Returns whether it is selected
    /// afterwards.
    pub fn toggle_item(&mut self, inventory_id: InventoryId) -> Result<bool, PlannerError> {
        self.ensure_editable()?;
        if self.origin_id.is_none() {
            return Err(PlannerError::NoOrigin);
        }
        if !self.inventory.iter().any(|i| i.inventory_id == inventory_id) {
            return Err(PlannerError::UnknownItem(inventory_id));
        }
        if self.selected.remove(&inventory_id) {
            Ok(false)
        } else {
            self.selected.insert(inventory_id);
            Ok(true)
        }
    }

    pub fn is_selected(&self, inventory_id: InventoryId) -> bool {
        self.selected.contains(&inventory_id)
    }

    pub fn selected_ids(&self) -> Vec<InventoryId> {
        self.selected.iter().copied().collect()
    }

    pub fn selected_items(&self) -> Vec<&InventoryItem> {
        self.inventory
            .iter()
            .filter(|i| self.selected.contains(&i.inventory_id))
            .collect()
    }

    /// Narrow the visible stock. The selection is left untouched.
    pub fn set_filter(&mut self, term: impl Into<String>) -> Result<(), PlannerError> {
        self.ensure_editable()?;
        self.filter = term.into();
        Ok(())
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn visible_inventory(&self) -> Vec<&InventoryItem> {
        self.inventory
            .iter()
            .filter(|i| matches_search(i, &self.filter))
            .collect()
    }

    pub fn totals(&self) -> Totals {
        compute_totals(self.selected_items())
    }

    /// Load against the selected truck, if there is one
    pub fn utilization(&self) -> Option<CapacityCheck> {
        self.truck().map(|truck| check_capacity(self.totals(), truck))
    }

    /// Apply every submit-time check; the first failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let truck = self.truck().ok_or(ValidationError::MissingTruck)?;
        let origin = self.origin_id.ok_or(ValidationError::MissingOrigin)?;
        let destination = self.destination_id.ok_or(ValidationError::MissingDestination)?;
        if origin == destination {
            return Err(ValidationError::SameWarehouse);
        }
        if self.selected.is_empty() {
            return Err(ValidationError::NoItems);
        }
        let totals = self.totals();
        if totals.weight > truck.capacity_weight {
            return Err(ValidationError::WeightExceeded {
                total: totals.weight,
                capacity: truck.capacity_weight,
            });
        }
        if totals.volume > truck.capacity_volume {
            return Err(ValidationError::VolumeExceeded {
                total: totals.volume,
                capacity: truck.capacity_volume,
            });
        }
        Ok(())
    }

    /// Validate and move into `Submitting`, returning the request to send.
    /// Nothing can be changed until [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> Result<AssignmentRequest, PlannerError> {
        self.ensure_editable()?;
        if let Err(err) = self.validate() {
            self.last_error = Some(err.to_string());
            return Err(err.into());
        }
        let request = AssignmentRequest {
            truck_id: self.truck_id.ok_or(ValidationError::MissingTruck)?,
            warehouse_id: self.origin_id.ok_or(ValidationError::MissingOrigin)?,
            destination_warehouse_id: self
                .destination_id
                .ok_or(ValidationError::MissingDestination)?,
            inventory_ids: self.selected_ids(),
        };
        self.phase = Phase::Submitting;
        self.last_error = None;
        Ok(request)
    }

    /// Resolve an in-flight submission.
    ///
    /// Success empties the selection and ends the plan. Any failure (transport,
    /// server rejection, or a 2xx body with `success: false`) returns to
    /// editing with the selection intact and a message in `last_error`.
    pub fn finish_submit(
        &mut self,
        outcome: Result<AssignmentRecord, ApiError>,
    ) -> Result<AssignmentRecord, PlannerError> {
        if self.phase != Phase::Submitting {
            return Err(PlannerError::NotSubmitting);
        }
        let err = match outcome {
            Ok(record) if record.success => {
                self.phase = Phase::Submitted;
                self.selected.clear();
                self.last_error = None;
                return Ok(record);
            }
            Ok(record) => ApiError::Rejected {
                status: None,
                message: record
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            },
            Err(err) => err,
        };
        self.phase = Phase::Editing;
        self.last_error = Some(failure_message(&err));
        Err(PlannerError::Submission(err))
    }

    /// Validate, send through `gateway`, and on success hand the truck over to
    /// `navigation`. Validation failures never reach the gateway.
    pub fn submit(
        &mut self,
        gateway: &dyn AssignmentGateway,
        navigation: &mut dyn NavigationSink,
    ) -> Result<AssignmentRecord, PlannerError> {
        let request = self.begin_submit()?;
        let outcome = gateway.submit_assignment(&request);
        let record = self.finish_submit(outcome)?;
        navigation.show_truck(request.truck_id);
        Ok(record)
    }
}

fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Transport(_) => GENERIC_SUBMIT_FAILURE.to_string(),
        ApiError::Rejected { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TruckStatus;
    use std::cell::RefCell;

    const NORTH: WarehouseId = WarehouseId(1);
    const SOUTH: WarehouseId = WarehouseId(2);
    const EAST: WarehouseId = WarehouseId(3);
    const TRUCK: TruckId = TruckId(10);

    struct FakeGateway {
        calls: RefCell<Vec<AssignmentRequest>>,
        reply: RefCell<Option<Result<AssignmentRecord, ApiError>>>,
    }

    impl FakeGateway {
        fn replying(reply: Result<AssignmentRecord, ApiError>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                reply: RefCell::new(Some(reply)),
            }
        }

        fn ok() -> Self {
            Self::replying(Ok(AssignmentRecord {
                success: true,
                message: Some("Inventory assigned successfully".to_string()),
                ..Default::default()
            }))
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl AssignmentGateway for FakeGateway {
        fn submit_assignment(
            &self,
            request: &AssignmentRequest,
        ) -> Result<AssignmentRecord, ApiError> {
            self.calls.borrow_mut().push(request.clone());
            self.reply
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(ApiError::Transport("no reply scripted".into())))
        }
    }

    #[derive(Default)]
    struct RecordingNav {
        shown: Vec<TruckId>,
    }

    impl NavigationSink for RecordingNav {
        fn show_truck(&mut self, truck_id: TruckId) {
            self.shown.push(truck_id);
        }
    }

    fn truck(id: TruckId, capacity_weight: f64, capacity_volume: f64) -> Truck {
        Truck {
            truck_id: id,
            registration_number: format!("TRK-{}", id),
            model: None,
            capacity_weight,
            capacity_volume,
            driver_id: None,
            driver_name: None,
            status: TruckStatus::Available,
        }
    }

    fn warehouse(id: WarehouseId, name: &str) -> Warehouse {
        Warehouse {
            warehouse_id: id,
            name: name.to_string(),
            location: None,
            active: true,
        }
    }

    fn item(
        id: i64,
        name: &str,
        sku: &str,
        weight: f64,
        volume: f64,
        quantity: u32,
    ) -> InventoryItem {
        InventoryItem {
            inventory_id: InventoryId(id),
            name: name.to_string(),
            sku: sku.to_string(),
            quantity,
            weight,
            volume,
            warehouse_id: Some(NORTH),
        }
    }

    fn north_stock() -> Vec<InventoryItem> {
        vec![
            item(100, "Blue Widget", "BW1", 400.0, 1.0, 2),
            item(101, "Red Gadget", "RG2", 300.0, 2.0, 1),
            item(102, "Green Gizmo", "GG3", 10.0, 0.5, 4),
        ]
    }

    fn planner() -> AssignmentPlanner {
        AssignmentPlanner::new(
            vec![truck(TRUCK, 1000.0, 10.0), truck(TruckId(11), 5000.0, 2.0)],
            vec![warehouse(NORTH, "North"), warehouse(SOUTH, "South"), warehouse(EAST, "East")],
        )
    }

    /// Truck, distinct origin/destination and one light item: ready to submit
    fn valid_planner() -> AssignmentPlanner {
        let mut p = planner();
        p.select_truck(TRUCK).unwrap();
        p.select_origin(NORTH, north_stock()).unwrap();
        p.select_destination(SOUTH).unwrap();
        p.toggle_item(InventoryId(102)).unwrap();
        assert_eq!(p.state(), PlannerState::Valid);
        p
    }

    fn submit_expecting_validation(p: &mut AssignmentPlanner) -> ValidationError {
        let gateway = FakeGateway::ok();
        let mut nav = RecordingNav::default();
        let err = p.submit(&gateway, &mut nav).unwrap_err();
        assert_eq!(gateway.call_count(), 0, "validation failure must not reach the network");
        assert!(nav.shown.is_empty());
        match err {
            PlannerError::Invalid(v) => v,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_new_planner_is_empty() {
        let p = planner();
        assert_eq!(p.state(), PlannerState::Empty);
        assert_eq!(p.totals(), Totals::default());
        assert!(p.utilization().is_none());
    }

    #[test]
    fn test_trucks_without_capacity_are_dropped() {
        let p = AssignmentPlanner::new(
            vec![truck(TRUCK, 1000.0, 10.0), truck(TruckId(99), 0.0, 10.0)],
            vec![warehouse(NORTH, "North")],
        );
        assert_eq!(p.trucks().len(), 1);
        let mut p = p;
        assert!(matches!(p.select_truck(TruckId(99)), Err(PlannerError::UnknownTruck(_))));
    }

    #[test]
    fn test_state_progression() {
        let mut p = planner();
        p.select_origin(NORTH, north_stock()).unwrap();
        assert_eq!(p.state(), PlannerState::OriginChosen);
        p.select_truck(TRUCK).unwrap();
        assert_eq!(p.state(), PlannerState::Configuring);
        p.select_destination(SOUTH).unwrap();
        assert_eq!(p.state(), PlannerState::Configuring);
        p.toggle_item(InventoryId(102)).unwrap();
        assert_eq!(p.state(), PlannerState::Valid);
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let mut p = planner();
        p.select_origin(NORTH, north_stock()).unwrap();
        p.toggle_item(InventoryId(100)).unwrap();
        // 2 x (400 kg, 1 m³)
        assert_eq!(p.totals(), Totals { weight: 800.0, volume: 2.0 });

        assert!(p.toggle_item(InventoryId(102)).unwrap());
        // plus 4 x (10 kg, 0.5 m³)
        assert_eq!(p.totals(), Totals { weight: 840.0, volume: 4.0 });

        assert!(!p.toggle_item(InventoryId(102)).unwrap());
        assert_eq!(p.selected_ids(), vec![InventoryId(100)]);
        assert_eq!(p.totals(), Totals { weight: 800.0, volume: 2.0 });
    }

    #[test]
    fn test_totals_follow_selection() {
        let mut p = planner();
        p.select_origin(NORTH, north_stock()).unwrap();
        p.toggle_item(InventoryId(100)).unwrap();
        p.toggle_item(InventoryId(101)).unwrap();
        assert_eq!(p.totals(), Totals { weight: 1100.0, volume: 4.0 });

        p.toggle_item(InventoryId(100)).unwrap();
        assert_eq!(p.totals(), Totals { weight: 300.0, volume: 2.0 });
    }

    #[test]
    fn test_changing_origin_clears_selection() {
        let mut p = planner();
        p.select_origin(NORTH, north_stock()).unwrap();
        for id in [100, 101, 102] {
            p.toggle_item(InventoryId(id)).unwrap();
        }
        assert_eq!(p.selected_ids().len(), 3);

        p.select_origin(EAST, vec![item(200, "Crate", "CR", 1.0, 1.0, 1)]).unwrap();
        assert!(p.selected_ids().is_empty());
        assert_eq!(p.totals(), Totals::default());
        assert_eq!(p.inventory().len(), 1);
        assert!(matches!(p.toggle_item(InventoryId(100)), Err(PlannerError::UnknownItem(_))));
    }

    #[test]
    fn test_reselecting_same_origin_keeps_selection() {
        let mut p = planner();
        p.select_origin(NORTH, north_stock()).unwrap();
        p.toggle_item(InventoryId(100)).unwrap();
        p.select_origin(NORTH, Vec::new()).unwrap();
        assert!(p.is_selected(InventoryId(100)));
        assert_eq!(p.inventory().len(), 3);
    }

    #[test]
    fn test_origin_moving_onto_destination_clears_destination() {
        let mut p = planner();
        p.select_origin(NORTH, north_stock()).unwrap();
        p.select_destination(SOUTH).unwrap();
        p.select_origin(SOUTH, Vec::new()).unwrap();
        assert_eq!(p.destination(), None);
    }

    #[test]
    fn test_destination_options_exclude_origin() {
        let mut p = planner();
        assert_eq!(p.destination_options().len(), 3);
        for origin in [NORTH, SOUTH, EAST] {
            p.select_origin(origin, Vec::new()).unwrap();
            let options = p.destination_options();
            assert_eq!(options.len(), 2);
            assert!(options.iter().all(|w| w.warehouse_id != origin));
        }
    }

    #[test]
    fn test_destination_equal_to_origin_rejected() {
        let mut p = planner();
        p.select_truck(TRUCK).unwrap();
        p.select_origin(NORTH, north_stock()).unwrap();
        p.toggle_item(InventoryId(102)).unwrap();
        let err = p.select_destination(NORTH).unwrap_err();
        assert!(err.to_string().contains("cannot be the same"));
        assert_eq!(p.destination(), None);
    }

    #[test]
    fn test_unknown_warehouse_rejected() {
        let mut p = planner();
        assert!(matches!(
            p.select_origin(WarehouseId(404), Vec::new()),
            Err(PlannerError::UnknownWarehouse(_))
        ));
        assert!(matches!(
            p.select_destination(WarehouseId(404)),
            Err(PlannerError::UnknownWarehouse(_))
        ));
    }

    #[test]
    fn test_toggle_requires_origin() {
        let mut p = planner();
        assert!(matches!(p.toggle_item(InventoryId(100)), Err(PlannerError::NoOrigin)));
    }

    #[test]
    fn test_rule_missing_truck() {
        let mut p = valid_planner();
        p.clear_truck().unwrap();
        assert_eq!(submit_expecting_validation(&mut p), ValidationError::MissingTruck);
        assert_eq!(p.last_error(), Some("Please select a truck"));
    }

    #[test]
    fn test_rule_missing_origin() {
        let mut p = valid_planner();
        p.clear_origin().unwrap();
        assert_eq!(submit_expecting_validation(&mut p), ValidationError::MissingOrigin);
    }

    #[test]
    fn test_rule_missing_destination() {
        let mut p = valid_planner();
        p.clear_destination().unwrap();
        assert_eq!(submit_expecting_validation(&mut p), ValidationError::MissingDestination);
    }

    #[test]
    fn test_rule_same_warehouse() {
        let mut p = valid_planner();
        // not reachable through select_destination; checked again at submit
        p.destination_id = p.origin_id;
        let err = submit_expecting_validation(&mut p);
        assert_eq!(err, ValidationError::SameWarehouse);
        assert!(err.to_string().contains("cannot be the same"));
    }

    #[test]
    fn test_rule_no_items() {
        let mut p = valid_planner();
        p.toggle_item(InventoryId(102)).unwrap();
        assert_eq!(submit_expecting_validation(&mut p), ValidationError::NoItems);
    }

    #[test]
    fn test_rule_weight_exceeded_reports_totals() {
        let mut p = valid_planner();
        p.toggle_item(InventoryId(102)).unwrap();
        p.toggle_item(InventoryId(100)).unwrap();
        p.toggle_item(InventoryId(101)).unwrap();

        let err = submit_expecting_validation(&mut p);
        assert_eq!(
            err,
            ValidationError::WeightExceeded {
                total: 1100.0,
                capacity: 1000.0
            }
        );
        let message = err.to_string();
        assert!(message.contains("1100"), "{message}");
        assert!(message.contains("1000"), "{message}");
        assert_eq!(p.state(), PlannerState::Configuring);
    }

    #[test]
    fn test_rule_volume_exceeded() {
        let mut p = valid_planner();
        p.select_truck(TruckId(11)).unwrap();
        p.toggle_item(InventoryId(101)).unwrap();
        let err = submit_expecting_validation(&mut p);
        assert_eq!(
            err,
            ValidationError::VolumeExceeded {
                total: 4.0,
                capacity: 2.0
            }
        );
        assert!(err.to_string().contains("4 m³"));
    }

    #[test]
    fn test_overage_below_display_precision_stays_visible() {
        let err = ValidationError::WeightExceeded {
            total: 1000.004,
            capacity: 1000.0,
        };
        assert_eq!(
            err.to_string(),
            "Total weight (1000.004 kg) exceeds truck capacity (1000 kg)"
        );

        let err = ValidationError::VolumeExceeded {
            total: 12.3456,
            capacity: 12.0,
        };
        assert_eq!(
            err.to_string(),
            "Total volume (12.35 m³) exceeds truck capacity (12 m³)"
        );
    }

    #[test]
    fn test_successful_submit() {
        let mut p = planner();
        p.select_truck(TRUCK).unwrap();
        p.select_origin(NORTH, north_stock()).unwrap();
        p.select_destination(SOUTH).unwrap();
        p.toggle_item(InventoryId(101)).unwrap();

        let gateway = FakeGateway::ok();
        let mut nav = RecordingNav::default();
        let record = p.submit(&gateway, &mut nav).unwrap();

        assert!(record.success);
        let calls = gateway.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            AssignmentRequest {
                truck_id: TRUCK,
                warehouse_id: NORTH,
                destination_warehouse_id: SOUTH,
                inventory_ids: vec![InventoryId(101)],
            }
        );
        assert!(p.selected_ids().is_empty());
        assert_eq!(p.state(), PlannerState::Submitted);
        assert_eq!(nav.shown, vec![TRUCK]);
        assert!(matches!(p.toggle_item(InventoryId(101)), Err(PlannerError::Finished)));
    }

    #[test]
    fn test_server_rejection_keeps_selection() {
        let mut p = valid_planner();
        let gateway = FakeGateway::replying(Err(ApiError::Rejected {
            status: Some(400),
            message: "Truck TRK-10 is already assigned".to_string(),
        }));
        let mut nav = RecordingNav::default();

        let err = p.submit(&gateway, &mut nav).unwrap_err();
        assert!(matches!(err, PlannerError::Submission(ApiError::Rejected { .. })));
        assert_eq!(p.last_error(), Some("Truck TRK-10 is already assigned"));
        assert_eq!(p.selected_ids(), vec![InventoryId(102)]);
        assert_eq!(p.state(), PlannerState::Valid);
        assert!(nav.shown.is_empty());
    }

    #[test]
    fn test_success_false_body_is_a_rejection() {
        let mut p = valid_planner();
        let gateway = FakeGateway::replying(Ok(AssignmentRecord {
            success: false,
            message: Some("Insufficient stock".to_string()),
            ..Default::default()
        }));
        let err = p.submit(&gateway, &mut RecordingNav::default()).unwrap_err();
        assert!(matches!(err, PlannerError::Submission(_)));
        assert_eq!(p.last_error(), Some("Insufficient stock"));

        let gateway = FakeGateway::replying(Ok(AssignmentRecord::default()));
        p.submit(&gateway, &mut RecordingNav::default()).unwrap_err();
        assert_eq!(p.last_error(), Some("Failed to assign inventory"));
    }

    #[test]
    fn test_transport_failure_is_generic_and_retryable() {
        let mut p = valid_planner();
        let gateway = FakeGateway::replying(Err(ApiError::Transport("connection refused".into())));
        p.submit(&gateway, &mut RecordingNav::default()).unwrap_err();
        assert_eq!(p.last_error(), Some("Failed to assign inventory. Please try again."));
        assert_eq!(p.state(), PlannerState::Valid);

        let retry = FakeGateway::ok();
        p.submit(&retry, &mut RecordingNav::default()).unwrap();
        assert_eq!(p.state(), PlannerState::Submitted);
        assert_eq!(p.last_error(), None);
    }

    #[test]
    fn test_inputs_locked_while_submitting() {
        let mut p = valid_planner();
        let request = p.begin_submit().unwrap();
        assert_eq!(request.inventory_ids, vec![InventoryId(102)]);
        assert_eq!(p.state(), PlannerState::Submitting);

        assert!(matches!(p.toggle_item(InventoryId(100)), Err(PlannerError::Busy)));
        assert!(matches!(p.select_truck(TruckId(11)), Err(PlannerError::Busy)));
        assert!(matches!(p.select_origin(EAST, Vec::new()), Err(PlannerError::Busy)));
        assert!(matches!(p.set_filter("x"), Err(PlannerError::Busy)));
        assert!(matches!(p.begin_submit(), Err(PlannerError::Busy)));
        assert_eq!(p.selected_ids(), vec![InventoryId(102)]);

        p.finish_submit(Err(ApiError::Transport("timeout".into()))).unwrap_err();
        assert_eq!(p.state(), PlannerState::Valid);
        assert!(p.toggle_item(InventoryId(100)).is_ok());
    }

    #[test]
    fn test_finish_without_begin() {
        let mut p = valid_planner();
        assert!(matches!(
            p.finish_submit(Ok(AssignmentRecord::default())),
            Err(PlannerError::NotSubmitting)
        ));
    }

    #[test]
    fn test_filter_preserves_hidden_selection() {
        let mut p = planner();
        p.select_origin(
            NORTH,
            vec![
                item(1, "Blue Widget", "BW1", 1.0, 1.0, 1),
                item(2, "Red Gadget", "RG2", 1.0, 1.0, 1),
            ],
        )
        .unwrap();

        p.set_filter("blue").unwrap();
        let visible: Vec<_> = p.visible_inventory().iter().map(|i| i.inventory_id).collect();
        assert_eq!(visible, vec![InventoryId(1)]);
        p.toggle_item(InventoryId(1)).unwrap();

        p.set_filter("red").unwrap();
        let visible: Vec<_> = p.visible_inventory().iter().map(|i| i.inventory_id).collect();
        assert_eq!(visible, vec![InventoryId(2)]);
        assert!(p.is_selected(InventoryId(1)));

        p.set_filter("").unwrap();
        assert_eq!(p.visible_inventory().len(), 2);
        assert!(p.is_selected(InventoryId(1)));
        assert!(!p.is_selected(InventoryId(2)));
    }

    #[test]
    fn test_utilization_reports_percentages() {
        let mut p = valid_planner();
        p.toggle_item(InventoryId(101)).unwrap();
        let check = p.utilization().unwrap();
        assert!((check.weight_ratio_percent - 34.0).abs() < 1e-9);
        assert!((check.volume_ratio_percent - 40.0).abs() < 1e-9);
        assert!(!check.is_over_capacity());
    }
}
