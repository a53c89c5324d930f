//! Read-only lookups: trucks, warehouses, inventory

use freightdesk_domain::model::{InventoryItem, Truck, Warehouse};
use freightdesk_domain::repository::{InventoryProvider, TruckProvider, WarehouseProvider};
use freightdesk_types::{ApiError, WarehouseId};
use tracing::debug;

use super::RestClient;
use crate::session::CredentialProvider;

impl<C: CredentialProvider> TruckProvider for RestClient<C> {
    fn list_trucks(&self) -> Result<Vec<Truck>, ApiError> {
        let trucks: Vec<Truck> = self.get_json("trucks")?;
        debug!(count = trucks.len(), "loaded trucks");
        Ok(trucks)
    }
}

impl<C: CredentialProvider> WarehouseProvider for RestClient<C> {
    fn list_warehouses(&self) -> Result<Vec<Warehouse>, ApiError> {
        let warehouses: Vec<Warehouse> = self.get_json("warehouses")?;
        debug!(count = warehouses.len(), "loaded warehouses");
        Ok(warehouses)
    }
}

impl<C: CredentialProvider> InventoryProvider for RestClient<C> {
    fn list_inventory(&self, warehouse_id: WarehouseId) -> Result<Vec<InventoryItem>, ApiError> {
        let items: Vec<InventoryItem> =
            self.get_json(&format!("inventory/warehouse/{}", warehouse_id))?;
        debug!(%warehouse_id, count = items.len(), "loaded inventory");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::rest::stub::serve_once;
    use crate::session::Session;
    use freightdesk_domain::model::TruckStatus;
    use freightdesk_types::{InventoryId, TruckId};

    fn client(base_url: &str) -> RestClient<Session> {
        RestClient::new(base_url, Duration::from_secs(5), Session::new("secret-token")).unwrap()
    }

    #[test]
    fn test_list_trucks_sends_bearer() {
        let body = r#"[{
            "truckId": 1,
            "registrationNumber": "KA-01",
            "model": "Tata",
            "capacityWeight": 1000,
            "capacityVolume": 10,
            "status": "AVAILABLE"
        }]"#;
        let (url, handle) = serve_once("200 OK", body);

        let trucks = client(&url).list_trucks().unwrap();
        let captured = handle.join().unwrap();

        assert_eq!(captured.request_line, "GET /api/trucks HTTP/1.1");
        assert_eq!(captured.header("authorization"), Some("Bearer secret-token"));
        assert_eq!(trucks.len(), 1);
        assert_eq!(trucks[0].truck_id, TruckId(1));
        assert_eq!(trucks[0].status, TruckStatus::Available);
    }

    #[test]
    fn test_list_warehouses() {
        let body = r#"[
            {"warehouseId": 1, "name": "North", "location": "Pune", "isActive": true},
            {"warehouseId": 2, "name": "South", "isActive": false}
        ]"#;
        let (url, handle) = serve_once("200 OK", body);

        let warehouses = client(&url).list_warehouses().unwrap();
        let captured = handle.join().unwrap();

        assert_eq!(captured.request_line, "GET /api/warehouses HTTP/1.1");
        assert_eq!(warehouses.len(), 2);
        assert!(warehouses[0].active);
        assert!(!warehouses[1].active);
    }

    #[test]
    fn test_list_inventory_by_warehouse() {
        let body = r#"[{
            "inventoryId": 5,
            "itemName": "Blue Widget",
            "sku": "BW1",
            "quantity": 3,
            "weight": 2.5,
            "volume": 0.1,
            "warehouseId": 7
        }]"#;
        let (url, handle) = serve_once("200 OK", body);

        let items = client(&url).list_inventory(WarehouseId(7)).unwrap();
        let captured = handle.join().unwrap();

        assert_eq!(captured.request_line, "GET /api/inventory/warehouse/7 HTTP/1.1");
        assert_eq!(items[0].inventory_id, InventoryId(5));
        assert_eq!(items[0].name, "Blue Widget");
    }
}
