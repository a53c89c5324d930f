//! Output formatting module

use freightdesk_app::app::AssignmentOutcome;
use freightdesk_domain::model::{
    AssignmentRecord, InventoryItem, Truck, Warehouse, WarehouseAssignments,
};
use freightdesk_domain::service::{format_amount, generate_capacity_report};
use freightdesk_types::{OutputFormat, Result};
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

pub fn output_trucks(output_format: OutputFormat, trucks: &[Truck]) -> Result<()> {
    match output_format {
        OutputFormat::Json => print_json(trucks),
        OutputFormat::Table => {
            print!("{}", render_trucks(trucks));
            Ok(())
        }
    }
}

fn render_trucks(trucks: &[Truck]) -> String {
    if trucks.is_empty() {
        return "No trucks available.\n".to_string();
    }
    let mut out = format!(
        "{:>6}  {:<28} {:>12} {:>10}  {:<12} {}\n",
        "ID", "Truck", "Weight(kg)", "Volume(m³)", "Status", "Driver"
    );
    out.push_str(&"-".repeat(84));
    out.push('\n');
    for truck in trucks {
        out.push_str(&format!(
            "{:>6}  {:<28} {:>12} {:>10}  {:<12} {}\n",
            truck.truck_id,
            truncate(&truck.display_name(), 28),
            format_amount(truck.capacity_weight),
            format_amount(truck.capacity_volume),
            truck.status.label(),
            truck.driver_name.as_deref().unwrap_or("-"),
        ));
    }
    out
}

pub fn output_warehouses(output_format: OutputFormat, warehouses: &[Warehouse]) -> Result<()> {
    match output_format {
        OutputFormat::Json => print_json(warehouses),
        OutputFormat::Table => {
            if warehouses.is_empty() {
                println!("No warehouses found.");
                return Ok(());
            }
            println!("{:>6}  {:<30} {:<30} {}", "ID", "Name", "Location", "Active");
            println!("{}", "-".repeat(76));
            for w in warehouses {
                println!(
                    "{:>6}  {:<30} {:<30} {}",
                    w.warehouse_id,
                    truncate(&w.name, 30),
                    truncate(w.location.as_deref().unwrap_or("-"), 30),
                    if w.active { "yes" } else { "no" }
                );
            }
            Ok(())
        }
    }
}

pub fn output_inventory(output_format: OutputFormat, items: &[InventoryItem]) -> Result<()> {
    match output_format {
        OutputFormat::Json => print_json(items),
        OutputFormat::Table => {
            print!("{}", render_inventory(items, &[]));
            Ok(())
        }
    }
}

/// Item table; rows whose id is in `marked` get a `*`
fn render_inventory(items: &[InventoryItem], marked: &[&InventoryItem]) -> String {
    if items.is_empty() {
        return "No inventory items found.\n".to_string();
    }
    let mut out = format!(
        "  {:>6}  {:<30} {:<14} {:>5} {:>10} {:>10}\n",
        "ID", "Name", "SKU", "Qty", "Wt(kg)", "Vol(m³)"
    );
    out.push_str(&"-".repeat(84));
    out.push('\n');
    for item in items {
        let mark = if marked.iter().any(|m| m.inventory_id == item.inventory_id) {
            '*'
        } else {
            ' '
        };
        out.push_str(&format!(
            "{} {:>6}  {:<30} {:<14} {:>5} {:>10} {:>10}\n",
            mark,
            item.inventory_id,
            truncate(&item.name, 30),
            truncate(&item.sku, 14),
            item.quantity,
            format_amount(item.line_weight()),
            format_amount(item.line_volume()),
        ));
    }
    out
}

pub fn output_assignments(output_format: OutputFormat, records: &[AssignmentRecord]) -> Result<()> {
    match output_format {
        OutputFormat::Json => print_json(records),
        OutputFormat::Table => {
            print!("{}", render_assignments(records));
            Ok(())
        }
    }
}

pub fn output_warehouse_assignments(
    output_format: OutputFormat,
    found: &WarehouseAssignments,
) -> Result<()> {
    match output_format {
        OutputFormat::Json => print_json(found),
        OutputFormat::Table => {
            print!("{}", render_warehouse_assignments(found));
            Ok(())
        }
    }
}

fn render_warehouse_assignments(found: &WarehouseAssignments) -> String {
    if found.is_empty() {
        return "No assignments found.\n".to_string();
    }
    let mut out = String::new();
    for (title, records) in [("Outgoing", &found.outgoing), ("Incoming", &found.incoming)] {
        out.push_str(&format!("{} ({}):\n", title, records.len()));
        if !records.is_empty() {
            out.push_str(&render_assignments(records));
        }
        out.push('\n');
    }
    out
}

fn render_assignments(records: &[AssignmentRecord]) -> String {
    if records.is_empty() {
        return "No assignments found.\n".to_string();
    }
    let dash = || "-".to_string();
    let mut out = format!(
        "{:>6}  {:<14} {:<20} {:<20} {:>5}  {:<11} {}\n",
        "ID", "Truck", "From", "To", "Items", "Status", "Date"
    );
    out.push_str(&"-".repeat(96));
    out.push('\n');
    for r in records {
        out.push_str(&format!(
            "{:>6}  {:<14} {:<20} {:<20} {:>5}  {:<11} {}\n",
            r.assignment_id.map(|id| id.to_string()).unwrap_or_else(dash),
            truncate(r.truck_registration_number.as_deref().unwrap_or("-"), 14),
            truncate(r.origin_warehouse_name.as_deref().unwrap_or("-"), 20),
            truncate(r.destination_warehouse_name.as_deref().unwrap_or("-"), 20),
            r.assigned_inventory.len(),
            r.status.map(|s| s.to_string()).unwrap_or_else(dash),
            r.assignment_date
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(dash),
        ));
    }
    out
}

pub fn output_outcome(
    output_format: OutputFormat,
    outcome: &AssignmentOutcome,
    show_listing: bool,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(outcome);
    }

    let report = generate_capacity_report(&outcome.capacity, &outcome.truck, outcome.items.len());
    println!("{}", report);
    println!("Items:");
    print!("{}", render_inventory(&outcome.items, &[]));

    if show_listing {
        let selected: Vec<&InventoryItem> = outcome.items.iter().collect();
        println!("\nMatching stock (* = selected):");
        print!("{}", render_inventory(&outcome.visible, &selected));
    }

    println!();
    match outcome.record {
        None => println!("Dry run: assignment is valid and was not submitted."),
        Some(ref record) => {
            let message = record
                .message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or("Inventory assigned successfully");
            match record.assignment_id {
                Some(id) => println!("{} (assignment #{})", message, id),
                None => println!("{}", message),
            }
        }
    }
    Ok(())
}
