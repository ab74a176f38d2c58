use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::menu::{MenuItem, MenuItemId};

/// A requested quantity of a menu item, snapshotted at match time. The copy
/// of `tags`, `available`, and `prep_time_min` is deliberate: a matched item
/// must not change under the guest if the catalog reloads mid-session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub tags: Vec<String>,
    pub available: bool,
    pub prep_time_min: Option<u32>,
    pub menu_id: MenuItemId,
}

impl OrderItem {
    pub fn from_menu_item(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: 1,
            tags: item.tags.clone(),
            available: item.available,
            prep_time_min: item.prep_time_min,
            menu_id: item.id.clone(),
        }
    }
}

/// An order that survived confirmation and was appended to session history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub items: Vec<OrderItem>,
    pub eta_min: Option<u32>,
    pub placed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use crate::domain::menu::{MenuItem, MenuItemId};

    use super::OrderItem;

    #[test]
    fn snapshot_defaults_quantity_to_one() {
        let item = MenuItem {
            id: MenuItemId("1".to_string()),
            name: "French Fries".to_string(),
            tags: vec!["snack".to_string()],
            available: true,
            prep_time_min: Some(10),
        };

        let order = OrderItem::from_menu_item(&item);
        assert_eq!(order.quantity, 1);
        assert_eq!(order.menu_id, MenuItemId("1".to_string()));
        assert_eq!(order.prep_time_min, Some(10));
    }
}
