use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuItemId(pub String);

/// A single orderable dish as loaded from the menu source. Immutable once
/// loaded; owned exclusively by the [`crate::Catalog`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub prep_time_min: Option<u32>,
}

fn default_available() -> bool {
    true
}

/// Raw menu record as it appears in the JSON source. Only `name` is
/// required; a missing `id` falls back to the name.
#[derive(Clone, Debug, Deserialize)]
pub struct MenuRecord {
    pub name: String,
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub prep_time_min: Option<u32>,
}

impl From<MenuRecord> for MenuItem {
    fn from(record: MenuRecord) -> Self {
        let id = record.id.unwrap_or_else(|| record.name.clone());
        Self {
            id: MenuItemId(id),
            name: record.name,
            tags: record.tags,
            available: record.available,
            prep_time_min: record.prep_time_min,
        }
    }
}
