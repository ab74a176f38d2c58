use concierge_core::{ChatResponse, DietaryTag, OrderItem, OrderPhase, SessionContext};
use serde_json::json;

use crate::intent::ParsedIntent;

/// Tags that conflict with a stored vegetarian preference.
const VEGETARIAN_FORBIDDEN_TAGS: &[&str] = &["non-veg", "chicken", "beef", "pork", "fish", "egg"];

/// Turns a parsed intent into a reply, mutating session state in place.
///
/// Transitions are explicit per intent. An order with dietary conflicts or
/// unavailable items is not dropped: it is held in the session phase pending
/// the guest's decision, and a bare confirmation still places it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DialogueEngine;

impl DialogueEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn respond(
        &self,
        session_id: &str,
        intent: ParsedIntent,
        session: &mut SessionContext,
    ) -> ChatResponse {
        match intent {
            ParsedIntent::Greeting => {
                ChatResponse::new(session_id, "Hello! How can I help with room service today?")
                    .with_intent("greeting")
            }

            ParsedIntent::SetPreference { dietary } => {
                for tag in &dietary {
                    session.set_preference(*tag);
                }
                let saved = dietary.iter().map(DietaryTag::as_str).collect::<Vec<_>>().join(", ");
                let preferences =
                    session.preferences.iter().map(DietaryTag::as_str).collect::<Vec<_>>();
                ChatResponse::new(session_id, format!("Saved preferences: {saved}"))
                    .with_intent("set_preference")
                    .with_context("preferences", json!(preferences))
            }

            ParsedIntent::Cancel => {
                session.cancel_pending();
                ChatResponse::new(session_id, "Cancelled your pending request.")
                    .with_intent("cancel")
            }

            ParsedIntent::Confirm => match session.confirm_pending() {
                Some(_) => ChatResponse::new(session_id, "Order placed. Thank you!")
                    .with_intent("confirm")
                    .with_context("history", json!(session.history)),
                None => {
                    ChatResponse::new(session_id, "Nothing to confirm.").with_intent("confirm")
                }
            },

            ParsedIntent::OrderFood { items } if items.is_empty() => {
                ChatResponse::new(session_id, "I couldn't find that item. Can you name it differently?")
                    .with_intent("clarify")
                    .with_suggested_actions(["provide_item_name"])
            }

            ParsedIntent::OrderFood { items } => self.handle_order(session_id, items, session),

            ParsedIntent::Clarify | ParsedIntent::Unknown => ChatResponse::new(
                session_id,
                "I didn't understand. Can you specify the dish name (e.g., 'Grilled Chicken Sandwich')?",
            )
            .with_intent("clarify")
            .with_suggested_actions(["provide_item_name"]),
        }
    }

    fn handle_order(
        &self,
        session_id: &str,
        items: Vec<OrderItem>,
        session: &mut SessionContext,
    ) -> ChatResponse {
        let vegetarian = session.preferences.contains(&DietaryTag::Vegetarian);
        let conflicts: Vec<&OrderItem> = if vegetarian {
            items
                .iter()
                .filter(|item| {
                    item.tags.iter().any(|tag| VEGETARIAN_FORBIDDEN_TAGS.contains(&tag.as_str()))
                })
                .collect()
        } else {
            Vec::new()
        };
        let unavailable: Vec<&OrderItem> = items.iter().filter(|item| !item.available).collect();

        // Conflicts take priority over availability. Both branches hold the
        // full requested item set, unfiltered.
        if !conflicts.is_empty() {
            let names: Vec<String> = conflicts.iter().map(|item| item.name.clone()).collect();
            let conflict_payload = json!(conflicts);
            session.phase = OrderPhase::AwaitingConflictResolution {
                items: items.clone(),
                conflicts: names.clone(),
            };
            return ChatResponse::new(
                session_id,
                format!(
                    "These items conflict with your dietary preferences: {}. Replace or remove?",
                    names.join(", ")
                ),
            )
            .with_intent("confirm")
            .with_suggested_actions(["replace_item", "remove_item"])
            .with_context("conflicts", conflict_payload);
        }

        if !unavailable.is_empty() {
            let names: Vec<String> = unavailable.iter().map(|item| item.name.clone()).collect();
            let unavailable_payload = json!(unavailable);
            session.phase = OrderPhase::AwaitingAvailabilityResolution {
                items: items.clone(),
                unavailable: names.clone(),
            };
            return ChatResponse::new(
                session_id,
                format!(
                    "Sorry, these are currently unavailable: {}. Would you like alternatives?",
                    names.join(", ")
                ),
            )
            .with_intent("clarify")
            .with_suggested_actions(["offer_alternatives"])
            .with_context("unavailable", unavailable_payload);
        }

        // ETA sums prep_time_min once per dish line, not per unit and not max.
        let eta_min: u32 = items.iter().filter_map(|item| item.prep_time_min).sum();
        let item_names = items
            .iter()
            .map(|item| format!("{} x {}", item.quantity, item.name))
            .collect::<Vec<_>>()
            .join(", ");
        session.phase = OrderPhase::AwaitingConfirmation { items: items.clone(), eta_min };

        ChatResponse::new(
            session_id,
            format!("Confirming: {item_names}. ETA ~{eta_min} minutes. Shall I place the order?"),
        )
        .with_intent("confirm_request")
        .with_suggested_actions(["confirm", "modify", "cancel"])
        .with_context("pending", json!({ "items": items, "eta_min": eta_min }))
    }
}

#[cfg(test)]
mod tests {
    use concierge_core::{DietaryTag, MenuItemId, OrderItem, OrderPhase, SessionContext};

    use crate::intent::ParsedIntent;

    use super::DialogueEngine;

    fn item(name: &str, tags: &[&str], available: bool, prep: Option<u32>) -> OrderItem {
        OrderItem {
            name: name.to_string(),
            quantity: 1,
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            available,
            prep_time_min: prep,
            menu_id: MenuItemId(name.to_string()),
        }
    }

    #[test]
    fn greeting_does_not_touch_state() {
        let engine = DialogueEngine::new();
        let mut session = SessionContext::new();
        let before = session.clone();

        let response = engine.respond("s-1", ParsedIntent::Greeting, &mut session);
        assert_eq!(response.intent.as_deref(), Some("greeting"));
        assert_eq!(session, before);
    }

    #[test]
    fn clean_order_is_held_for_confirmation_with_summed_eta() {
        let engine = DialogueEngine::new();
        let mut session = SessionContext::new();
        let items =
            vec![item("French Fries", &[], true, Some(10)), item("Veg Caesar Salad", &[], true, Some(8))];

        let response =
            engine.respond("s-1", ParsedIntent::OrderFood { items }, &mut session);

        assert_eq!(response.intent.as_deref(), Some("confirm_request"));
        assert!(response.reply.contains("ETA ~18 minutes"));
        assert_eq!(
            response.suggested_actions,
            Some(vec!["confirm".to_string(), "modify".to_string(), "cancel".to_string()])
        );
        assert!(matches!(session.phase, OrderPhase::AwaitingConfirmation { eta_min: 18, .. }));
    }

    #[test]
    fn missing_prep_times_count_as_zero() {
        let engine = DialogueEngine::new();
        let mut session = SessionContext::new();
        let items = vec![item("Masala Chai", &[], true, None)];

        let response =
            engine.respond("s-1", ParsedIntent::OrderFood { items }, &mut session);
        assert!(response.reply.contains("ETA ~0 minutes"));
    }

    #[test]
    fn vegetarian_conflict_outranks_availability() {
        let engine = DialogueEngine::new();
        let mut session = SessionContext::new();
        session.set_preference(DietaryTag::Vegetarian);
        let items = vec![
            item("Grilled Chicken Sandwich", &["chicken"], false, Some(15)),
            item("French Fries", &[], true, Some(10)),
        ];

        let response =
            engine.respond("s-1", ParsedIntent::OrderFood { items }, &mut session);

        assert_eq!(response.intent.as_deref(), Some("confirm"));
        assert_eq!(
            response.suggested_actions,
            Some(vec!["replace_item".to_string(), "remove_item".to_string()])
        );
        let context = response.context.expect("context");
        assert!(context.contains_key("conflicts"));

        // The full requested set is held, unfiltered.
        match &session.phase {
            OrderPhase::AwaitingConflictResolution { items, conflicts } => {
                assert_eq!(items.len(), 2);
                assert_eq!(conflicts, &vec!["Grilled Chicken Sandwich".to_string()]);
            }
            other => panic!("unexpected phase: {other:?}"),
        }
    }

    #[test]
    fn unavailable_items_ask_for_alternatives() {
        let engine = DialogueEngine::new();
        let mut session = SessionContext::new();
        let items = vec![item("Chocolate Lava Cake", &["dessert"], false, Some(12))];

        let response =
            engine.respond("s-1", ParsedIntent::OrderFood { items }, &mut session);

        assert_eq!(response.intent.as_deref(), Some("clarify"));
        assert_eq!(response.suggested_actions, Some(vec!["offer_alternatives".to_string()]));
        assert!(matches!(session.phase, OrderPhase::AwaitingAvailabilityResolution { .. }));
    }

    #[test]
    fn no_conflict_without_vegetarian_preference() {
        let engine = DialogueEngine::new();
        let mut session = SessionContext::new();
        let items = vec![item("Grilled Chicken Sandwich", &["chicken"], true, Some(15))];

        let response =
            engine.respond("s-1", ParsedIntent::OrderFood { items }, &mut session);
        assert_eq!(response.intent.as_deref(), Some("confirm_request"));
    }

    #[test]
    fn confirm_places_held_order_and_cancel_is_idempotent() {
        let engine = DialogueEngine::new();
        let mut session = SessionContext::new();
        let items = vec![item("French Fries", &[], true, Some(10))];

        engine.respond("s-1", ParsedIntent::OrderFood { items }, &mut session);
        let placed = engine.respond("s-1", ParsedIntent::Confirm, &mut session);
        assert_eq!(placed.reply, "Order placed. Thank you!");
        assert_eq!(session.history.len(), 1);
        assert!(session.phase.is_idle());

        let nothing = engine.respond("s-1", ParsedIntent::Confirm, &mut session);
        assert_eq!(nothing.reply, "Nothing to confirm.");
        assert_eq!(session.history.len(), 1);

        let cancelled = engine.respond("s-1", ParsedIntent::Cancel, &mut session);
        assert_eq!(cancelled.reply, "Cancelled your pending request.");
        assert!(session.phase.is_idle());
    }

    #[test]
    fn empty_order_asks_for_an_item_name() {
        let engine = DialogueEngine::new();
        let mut session = SessionContext::new();
        let before = session.clone();

        let response =
            engine.respond("s-1", ParsedIntent::OrderFood { items: Vec::new() }, &mut session);
        assert_eq!(response.intent.as_deref(), Some("clarify"));
        assert_eq!(response.suggested_actions, Some(vec!["provide_item_name".to_string()]));
        assert_eq!(session, before);
    }

    #[test]
    fn preferences_echoed_and_merged() {
        let engine = DialogueEngine::new();
        let mut session = SessionContext::new();

        let response = engine.respond(
            "s-1",
            ParsedIntent::SetPreference { dietary: vec![DietaryTag::Vegetarian] },
            &mut session,
        );
        assert!(response.reply.contains("vegetarian"));

        engine.respond(
            "s-1",
            ParsedIntent::SetPreference {
                dietary: vec![DietaryTag::Vegetarian, DietaryTag::NoNuts],
            },
            &mut session,
        );
        assert_eq!(session.preferences.len(), 2);
    }
}
