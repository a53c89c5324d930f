//! Load totals and capacity checks for a truck

use serde::{Deserialize, Serialize};

use crate::model::{InventoryItem, Truck};

/// Summed weight/volume of a set of inventory lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// kg
    pub weight: f64,
    /// m³
    pub volume: f64,
}

/// Sum `weight × quantity` and `volume × quantity` over `items`.
///
/// Always recomputed from scratch so removing an item can never leave
/// accumulated rounding behind.
pub fn compute_totals<'a, I>(items: I) -> Totals
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    items.into_iter().fold(Totals::default(), |acc, item| Totals {
        weight: acc.weight + item.line_weight(),
        volume: acc.volume + item.line_volume(),
    })
}

/// Result of holding a load up against one truck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityCheck {
    pub totals: Totals,
    pub capacity_weight: f64,
    pub capacity_volume: f64,
    pub weight_ratio_percent: f64,
    pub volume_ratio_percent: f64,
    pub excess_weight: Option<f64>,
    pub excess_volume: Option<f64>,
}

impl CapacityCheck {
    pub fn is_over_capacity(&self) -> bool {
        self.excess_weight.is_some() || self.excess_volume.is_some()
    }
}

pub fn check_capacity(totals: Totals, truck: &Truck) -> CapacityCheck {
    let excess = |total: f64, limit: f64| {
        let diff = total - limit;
        if diff > 0.0 {
            Some(diff)
        } else {
            None
        }
    };
    CapacityCheck {
        totals,
        capacity_weight: truck.capacity_weight,
        capacity_volume: truck.capacity_volume,
        weight_ratio_percent: ratio_percent(totals.weight, truck.capacity_weight),
        volume_ratio_percent: ratio_percent(totals.volume, truck.capacity_volume),
        excess_weight: excess(totals.weight, truck.capacity_weight),
        excess_volume: excess(totals.volume, truck.capacity_volume),
    }
}

fn ratio_percent(total: f64, capacity: f64) -> f64 {
    if capacity > 0.0 {
        (total / capacity) * 100.0
    } else {
        0.0
    }
}

/// Render a kg/m³ amount with at most two decimals and no trailing zeros.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn generate_capacity_report(check: &CapacityCheck, truck: &Truck, item_count: usize) -> String {
    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("              Truck Capacity Check                \n");
    report.push_str("==================================================\n\n");
    report.push_str(&format!("  Truck:            {}\n", truck.display_name()));
    report.push_str(&format!("  Status:           {}\n", truck.status.label()));
    if let Some(ref driver) = truck.driver_name {
        report.push_str(&format!("  Driver:           {}\n", driver));
    }
    report.push_str(&format!("  Selected items:   {}\n\n", item_count));

    report.push_str(&format!(
        "{:<10} {:>12} {:>12} {:>8}  {}\n",
        "", "Selected", "Capacity", "Load", ""
    ));
    report.push_str("-".repeat(50).as_str());
    report.push('\n');
    report.push_str(&capacity_row(
        "Weight",
        "kg",
        check.totals.weight,
        check.capacity_weight,
        check.weight_ratio_percent,
        check.excess_weight,
    ));
    report.push_str(&capacity_row(
        "Volume",
        "m³",
        check.totals.volume,
        check.capacity_volume,
        check.volume_ratio_percent,
        check.excess_volume,
    ));
    report.push('\n');

    if check.is_over_capacity() {
        report.push_str("  Load exceeds truck capacity.\n");
    } else {
        report.push_str("  Load is within truck capacity.\n");
    }
    report.push_str("==================================================\n");
    report
}

fn capacity_row(
    label: &str,
    unit: &str,
    total: f64,
    capacity: f64,
    ratio: f64,
    excess: Option<f64>,
) -> String {
    let marker = match excess {
        Some(over) => format!("OVER by {} {}", format_amount(over), unit),
        None => "ok".to_string(),
    };
    format!(
        "{:<10} {:>9} {:<2} {:>9} {:<2} {:>7.1}%  {}\n",
        label,
        format_amount(total),
        unit,
        format_amount(capacity),
        unit,
        ratio,
        marker
    )
}
