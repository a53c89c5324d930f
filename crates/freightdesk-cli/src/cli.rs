//! CLI definition using clap

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use freightdesk_domain::model::Role;
use freightdesk_types::{InventoryId, OutputFormat, TruckId, WarehouseId};

#[derive(Parser)]
#[command(name = "freightdesk")]
#[command(version)]
#[command(about = "Assign warehouse inventory to trucks within their capacity")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (e.g. http://localhost:8080/api). Uses config value if not specified.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token for this invocation only
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List trucks available for assignment
    Trucks,

    /// List warehouses
    Warehouses,

    /// List the stock of one warehouse
    Inventory {
        /// Warehouse id
        #[arg(long, short = 'w')]
        warehouse: WarehouseId,

        /// Only show items whose name or SKU contains this text
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Assign inventory from one warehouse to a truck
    Assign(AssignArgs),

    /// Show existing assignments for a truck or a warehouse
    Assignments {
        /// Truck id
        #[arg(long, conflicts_with = "warehouse", required_unless_present = "warehouse")]
        truck: Option<TruckId>,

        /// Warehouse id (origin or destination)
        #[arg(long)]
        warehouse: Option<WarehouseId>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set backend base URL
        #[arg(long)]
        set_api_url: Option<String>,

        /// Store a bearer token
        #[arg(long)]
        set_token: Option<String>,

        /// When the stored token stops being valid (RFC 3339, e.g. 2026-10-16T18:00:00Z)
        #[arg(long, conflicts_with = "clear_token")]
        set_token_expiry: Option<DateTime<Utc>>,

        /// Forget the stored token
        #[arg(long, conflicts_with = "set_token")]
        clear_token: bool,

        /// Set the username shown alongside the token
        #[arg(long)]
        set_username: Option<String>,

        /// Set your role (admin, logistics_manager, warehouse_staff, delivery_driver)
        #[arg(long)]
        set_role: Option<Role>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set request timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Args)]
pub struct AssignArgs {
    /// Truck id
    #[arg(long, short = 't')]
    pub truck: TruckId,

    /// Origin warehouse id
    #[arg(long, short = 'o')]
    pub origin: WarehouseId,

    /// Destination warehouse id
    #[arg(long, short = 'd')]
    pub destination: WarehouseId,

    /// Inventory id to load; repeat for several items
    #[arg(long = "item", short = 'i', required = true)]
    pub items: Vec<InventoryId>,

    /// Filter applied to the candidate listing shown with the result
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Validate against truck capacity without submitting
    #[arg(long)]
    pub dry_run: bool,
}
