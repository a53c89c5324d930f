//! Strongly typed entity identifiers
//!
//! The backend hands out integer keys for every entity. Wrapping them keeps a
//! truck id from being passed where a warehouse id is expected.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }
    };
}

entity_id!(
    /// Truck primary key (`truckId`)
    TruckId
);
entity_id!(
    /// Warehouse primary key (`warehouseId`)
    WarehouseId
);
entity_id!(
    /// Inventory item primary key (`inventoryId`)
    InventoryId
);
entity_id!(
    /// Assignment record primary key (`assignmentId`)
    AssignmentId
);
entity_id!(
    /// Driver (user) primary key
    DriverId
);
