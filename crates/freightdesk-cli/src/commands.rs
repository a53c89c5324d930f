//! Command handlers

use crate::cli::{AssignArgs, Cli, Commands};
use crate::output::{
    output_assignments, output_inventory, output_outcome, output_trucks,
    output_warehouse_assignments, output_warehouses,
};
use freightdesk_app::app::{
    require_capability, AssignmentPlan, AssignmentQuery, AssignmentService, QueryService,
};
use freightdesk_app::config::{Config, TOKEN_ENV};
use freightdesk_app::repository::open_rest_client;
use freightdesk_domain::model::{Capability, Role};
use freightdesk_domain::repository::NavigationSink;
use freightdesk_infra::{RestClient, Session};
use chrono::{DateTime, Utc};
use freightdesk_types::{ConfigError, Error, OutputFormat, Result, TruckId, WarehouseId};
use tracing::debug;

/// Points the user at the truck once its assignment has gone through
struct NextStepHint;

impl NavigationSink for NextStepHint {
    fn show_truck(&mut self, truck_id: TruckId) {
        eprintln!(
            "View this truck's load with: freightdesk assignments --truck {}",
            truck_id
        );
    }
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref api_url) = cli.api_url {
        config.api_base_url = api_url.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    if let Commands::Config {
        show,
        ref set_api_url,
        ref set_token,
        set_token_expiry,
        clear_token,
        ref set_username,
        set_role,
        set_output,
        set_timeout,
        reset,
    } = cli.command
    {
        return cmd_config(ConfigChanges {
            show,
            api_url: set_api_url.clone(),
            token: set_token.clone(),
            token_expiry: set_token_expiry,
            clear_token,
            username: set_username.clone(),
            role: set_role,
            output: set_output,
            timeout: set_timeout,
            reset,
        });
    }

    // --token beats the environment, which beats the stored token
    let token = cli.token.clone().or_else(|| std::env::var(TOKEN_ENV).ok());
    let session = config.session(token);
    let role = session.role;
    let client = open_rest_client(&config, session)?;

    match &cli.command {
        Commands::Trucks => {
            require_capability(role, Capability::AssignInventory)?;
            let trucks = queries(&client).trucks()?;
            output_trucks(output_format, &trucks)
        }

        Commands::Warehouses => {
            require_capability(role, Capability::ViewWarehouses)?;
            let warehouses = queries(&client).warehouses()?;
            output_warehouses(output_format, &warehouses)
        }

        Commands::Inventory { warehouse, search } => {
            require_capability(role, Capability::ViewInventory)?;
            let items = queries(&client).inventory(*warehouse, search.as_deref())?;
            output_inventory(output_format, &items)
        }

        Commands::Assign(args) => cmd_assign(&client, role, args, output_format),

        Commands::Assignments { truck, warehouse } => {
            let query = assignment_query(*truck, *warehouse)?;
            require_capability(role, query.capability())?;
            match query {
                AssignmentQuery::Truck(id) => {
                    let records = queries(&client).truck_assignments(id)?;
                    output_assignments(output_format, &records)
                }
                AssignmentQuery::Warehouse(id) => {
                    let found = queries(&client).warehouse_assignments(id)?;
                    output_warehouse_assignments(output_format, &found)
                }
            }
        }

        Commands::Config { .. } => Ok(()),
    }
}

fn queries(client: &RestClient<Session>) -> QueryService<'_> {
    QueryService::new(client, client, client, client)
}

fn assignment_query(
    truck: Option<TruckId>,
    warehouse: Option<WarehouseId>,
) -> Result<AssignmentQuery> {
    match (truck, warehouse) {
        (Some(id), None) => Ok(AssignmentQuery::Truck(id)),
        (None, Some(id)) => Ok(AssignmentQuery::Warehouse(id)),
        _ => Err(Error::Invalid(
            "Specify exactly one of --truck or --warehouse".to_string(),
        )),
    }
}

fn cmd_assign(
    client: &RestClient<Session>,
    role: Option<Role>,
    args: &AssignArgs,
    output_format: OutputFormat,
) -> Result<()> {
    require_capability(role, Capability::AssignInventory)?;

    let mut plan = AssignmentPlan::new()
        .with_truck(args.truck)
        .with_origin(args.origin)
        .with_destination(args.destination)
        .with_items(args.items.iter().copied());
    if let Some(ref term) = args.search {
        plan = plan.with_filter(term.clone());
    }
    debug!(?plan, dry_run = args.dry_run, "running assignment plan");

    let service = AssignmentService::new(client, client, client, client);
    let outcome = service.run(&plan, args.dry_run, &mut NextStepHint)?;
    output_outcome(output_format, &outcome, args.search.is_some())
}

/// Requested edits for the `config` subcommand
struct ConfigChanges {
    show: bool,
    api_url: Option<String>,
    token: Option<String>,
    token_expiry: Option<DateTime<Utc>>,
    clear_token: bool,
    username: Option<String>,
    role: Option<Role>,
    output: Option<OutputFormat>,
    timeout: Option<u64>,
    reset: bool,
}

fn cmd_config(changes: ConfigChanges) -> Result<()> {
    if changes.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let modified = apply_config_changes(&mut config, &changes)?;

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if changes.show || !modified {
        println!("{}", config);
    }

    Ok(())
}

fn apply_config_changes(config: &mut Config, changes: &ConfigChanges) -> Result<bool> {
    let mut modified = false;

    if let Some(ref url) = changes.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
        modified = true;
    }

    if let Some(ref token) = changes.token {
        if token.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "token".to_string(),
                message: "token is empty; use --clear-token to remove it".to_string(),
            }
            .into());
        }
        config.token = Some(token.trim().to_string());
        config.token_expires_at = None;
        modified = true;
    }

    if let Some(at) = changes.token_expiry {
        config.token_expires_at = Some(at);
        modified = true;
    }

    if changes.clear_token {
        config.token = None;
        config.token_expires_at = None;
        modified = true;
    }

    if let Some(ref username) = changes.username {
        config.username = Some(username.clone());
        modified = true;
    }

    if let Some(role) = changes.role {
        config.role = Some(role);
        modified = true;
    }

    if let Some(output_format) = changes.output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(timeout) = changes.timeout {
        config.request_timeout_secs = timeout;
        modified = true;
    }

    Ok(modified)
}
