use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::menu::{MenuItem, MenuItemId, MenuRecord};

/// The loaded, indexed menu of orderable items. Items are immutable once
/// loaded; reload is a full replace, never a mutation.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Builds a catalog from already-parsed records, deduplicating by id
    /// (first occurrence wins).
    pub fn new(records: Vec<MenuRecord>) -> Self {
        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            let item = MenuItem::from(record);
            if seen.insert(item.id.0.clone()) {
                items.push(item);
            }
        }
        Self { items }
    }

    /// Loads the menu from a JSON file. Fails softly: a missing or
    /// malformed source yields an empty catalog and a warning, never an
    /// error. The rest of the system must keep answering, if uselessly.
    pub fn load_from_path(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(
                    event_name = "catalog.load.missing",
                    path = %path.display(),
                    error = %error,
                    "menu source unreadable; starting with empty catalog"
                );
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<MenuRecord>>(&raw) {
            Ok(records) => {
                let catalog = Self::new(records);
                info!(
                    event_name = "catalog.load.ok",
                    path = %path.display(),
                    item_count = catalog.len(),
                    "menu loaded"
                );
                catalog
            }
            Err(error) => {
                warn!(
                    event_name = "catalog.load.malformed",
                    path = %path.display(),
                    error = %error,
                    "menu source malformed; starting with empty catalog"
                );
                Self::default()
            }
        }
    }

    /// Tries each candidate path in order and loads the first that exists,
    /// mirroring the `data/menu.json` then `data/data.json` fallback of the
    /// menu source layout. No candidate present is not fatal.
    pub fn load_first_available<P: AsRef<Path>>(candidates: &[P]) -> Self {
        match candidates.iter().find(|path| path.as_ref().exists()) {
            Some(path) => Self::load_from_path(path.as_ref()),
            None => {
                warn!(
                    event_name = "catalog.load.no_source",
                    "no menu source found; starting with empty catalog"
                );
                Self::default()
            }
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, id: &MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
