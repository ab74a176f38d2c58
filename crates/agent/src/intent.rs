use concierge_core::{DietaryTag, OrderItem};

use crate::matcher::MenuMatcher;

/// What a guest message was classified as. Produced and consumed within a
/// single turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedIntent {
    Greeting,
    Cancel,
    Confirm,
    SetPreference { dietary: Vec<DietaryTag> },
    OrderFood { items: Vec<OrderItem> },
    Clarify,
    Unknown,
}

const GREETING_WORDS: &[&str] = &["hi", "hello", "hey", "good morning", "good evening"];
const CANCEL_WORDS: &[&str] = &["cancel", "never mind", "stop", "don't"];
const AFFIRMATIONS: &[&str] = &["yes", "yep", "confirm", "please", "sure", "ok"];
const ORDER_VERBS: &[&str] =
    &["order", "i want", "i'd like", "get me", "bring me", "please get", "i need"];
const PREFERENCE_TRIGGERS: &[&str] =
    &["vegetarian", "vegan", "no onion", "no dairy", "dairy-free", "nut allergy"];

/// Deterministic, ordered rule cascade; the first satisfied rule wins and
/// short-circuits the rest. No rule is ever re-evaluated.
#[derive(Clone, Debug)]
pub struct IntentParser<'a> {
    matcher: MenuMatcher<'a>,
}

impl<'a> IntentParser<'a> {
    pub fn new(matcher: MenuMatcher<'a>) -> Self {
        Self { matcher }
    }

    pub fn parse(&self, text: &str) -> ParsedIntent {
        let trimmed = text.trim().to_lowercase();

        if GREETING_WORDS.iter().any(|word| contains_word(&trimmed, word)) {
            return ParsedIntent::Greeting;
        }

        if CANCEL_WORDS.iter().any(|word| contains_word(&trimmed, word)) {
            return ParsedIntent::Cancel;
        }

        if AFFIRMATIONS.contains(&trimmed.as_str()) {
            return ParsedIntent::Confirm;
        }

        if PREFERENCE_TRIGGERS.iter().any(|trigger| trimmed.contains(trigger)) {
            // Each trigger is tested independently; one message can set
            // several preferences at once.
            let mut dietary = Vec::new();
            if trimmed.contains("vegetarian") || trimmed.contains("vegan") {
                dietary.push(DietaryTag::Vegetarian);
            }
            if trimmed.contains("no onion") {
                dietary.push(DietaryTag::NoOnion);
            }
            if trimmed.contains("no dairy") || trimmed.contains("dairy-free") {
                dietary.push(DietaryTag::NoDairy);
            }
            if trimmed.contains("nut") {
                dietary.push(DietaryTag::NoNuts);
            }
            return ParsedIntent::SetPreference { dietary };
        }

        if let Some((quantity, remainder)) = parse_quantity(&trimmed) {
            let mut items = self.matcher.match_items(remainder);
            if !items.is_empty() {
                for item in &mut items {
                    item.quantity = quantity;
                }
                return ParsedIntent::OrderFood { items };
            }
        }

        let short_utterance = trimmed.split_whitespace().count() <= 3;
        if ORDER_VERBS.iter().any(|verb| contains_word(&trimmed, verb)) || short_utterance {
            let items = self.matcher.match_items(text);
            if items.is_empty() {
                // Ambiguous short input is a clarification, not an error.
                return ParsedIntent::Clarify;
            }
            return ParsedIntent::OrderFood { items };
        }

        ParsedIntent::Unknown
    }
}

/// Substring containment with word boundaries on both ends, so "hi" does not
/// fire inside "this".
fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut search_from = 0;
    while let Some(offset) = haystack[search_from..].find(needle) {
        let start = search_from + offset;
        let end = start + needle.len();
        let boundary_before =
            start == 0 || !haystack[..start].chars().next_back().is_some_and(is_word_char);
        let boundary_after = end == haystack.len()
            || !haystack[end..].chars().next().is_some_and(is_word_char);
        if boundary_before && boundary_after {
            return true;
        }
        search_from = start + needle.len().max(1);
    }
    false
}

fn is_word_char(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '_'
}

/// Matches `<integer> [x|pcs|pieces]? <remainder>` starting at the first
/// digit run in the message. A leading zero clamps to one; the quantity
/// invariant is `>= 1`.
fn parse_quantity(text: &str) -> Option<(u32, &str)> {
    let digits_start = text.find(|character: char| character.is_ascii_digit())?;
    let after_digits = text[digits_start..]
        .find(|character: char| !character.is_ascii_digit())
        .map(|length| digits_start + length)
        .unwrap_or(text.len());

    let quantity: u32 = text[digits_start..after_digits].parse().ok()?;

    let mut remainder = text[after_digits..].trim_start();
    for unit in ["pieces", "pcs", "x"] {
        if let Some(stripped) = remainder.strip_prefix(unit) {
            remainder = stripped.trim_start();
            break;
        }
    }

    if remainder.is_empty() {
        return None;
    }
    Some((quantity.max(1), remainder))
}
