//! Free-text inventory search

use crate::model::InventoryItem;

/// Case-insensitive substring match against item name or SKU.
/// An empty (or blank) term matches everything.
pub fn matches_search(item: &InventoryItem, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    item.name.to_lowercase().contains(&needle) || item.sku.to_lowercase().contains(&needle)
}

pub fn filter_inventory<'a>(items: &'a [InventoryItem], term: &str) -> Vec<&'a InventoryItem> {
    items.iter().filter(|item| matches_search(item, term)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use freightdesk_types::InventoryId;

    fn item(id: i64, name: &str, sku: &str) -> InventoryItem {
        InventoryItem {
            inventory_id: InventoryId(id),
            name: name.to_string(),
            sku: sku.to_string(),
            quantity: 1,
            weight: 1.0,
            volume: 1.0,
            warehouse_id: None,
        }
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let items = vec![item(1, "Blue Widget", "BW1"), item(2, "Red Gadget", "RG2")];
        let hits = filter_inventory(&items, "blue");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].inventory_id, InventoryId(1));
    }

    #[test]
    fn test_matches_sku() {
        let items = vec![item(1, "Blue Widget", "BW1"), item(2, "Red Gadget", "RG2")];
        let hits = filter_inventory(&items, "rg");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].inventory_id, InventoryId(2));
    }

    #[test]
    fn test_blank_term_matches_all() {
        let items = vec![item(1, "Blue Widget", "BW1"), item(2, "Red Gadget", "RG2")];
        assert_eq!(filter_inventory(&items, "").len(), 2);
        assert_eq!(filter_inventory(&items, "   ").len(), 2);
    }

    #[test]
    fn test_no_match() {
        let items = vec![item(1, "Blue Widget", "BW1")];
        assert!(filter_inventory(&items, "green").is_empty());
    }
}
