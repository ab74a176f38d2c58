use std::collections::BTreeSet;

use concierge_core::{Catalog, OrderItem};

use crate::text::{normalize, tokenize, SynonymTable};

/// Matches free text against the catalog, producing order-item snapshots.
///
/// Per catalog item, in catalog order, the first of three rules wins:
/// whole-name substring, token equality against the name's tokens, then tag
/// substring. An item contributes at most one snapshot per call. There is no
/// ranking or confidence score; a name hit for one item and a tag hit for
/// another are equally good.
#[derive(Clone, Debug)]
pub struct MenuMatcher<'a> {
    catalog: &'a Catalog,
    synonyms: &'a SynonymTable,
}

impl<'a> MenuMatcher<'a> {
    pub fn new(catalog: &'a Catalog, synonyms: &'a SynonymTable) -> Self {
        Self { catalog, synonyms }
    }

    pub fn match_items(&self, text: &str) -> Vec<OrderItem> {
        if self.catalog.is_empty() {
            return Vec::new();
        }

        let expanded = self.synonyms.apply(&normalize(text));
        if expanded.trim().is_empty() {
            return Vec::new();
        }
        let text_tokens: Vec<&str> = tokenize(&expanded);

        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut found = Vec::new();

        for item in self.catalog.items() {
            let normalized_name = normalize(&item.name);

            let name_hit = !normalized_name.is_empty() && expanded.contains(&normalized_name);
            let token_hit = || {
                let name_tokens: Vec<&str> = tokenize(&normalized_name);
                text_tokens.iter().any(|token| name_tokens.contains(token))
            };
            let tag_hit = || {
                item.tags.iter().any(|tag| !tag.is_empty() && expanded.contains(tag.as_str()))
            };

            if (name_hit || token_hit() || tag_hit()) && seen.insert(item.id.0.clone()) {
                found.push(OrderItem::from_menu_item(item));
            }
        }

        found
    }
}
