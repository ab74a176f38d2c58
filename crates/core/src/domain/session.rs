use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::order::{OrderItem, PlacedOrder};

/// Guest dietary preferences with stable snake_case wire forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryTag {
    Vegetarian,
    NoOnion,
    NoDairy,
    NoNuts,
}

impl DietaryTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::NoOnion => "no_onion",
            Self::NoDairy => "no_dairy",
            Self::NoNuts => "no_nuts",
        }
    }
}

/// Where a session stands in the order flow. Any non-`Idle` phase holds the
/// full requested item set and can be confirmed or cancelled; an order held
/// for conflict or availability resolution is still placeable by a bare
/// confirmation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum OrderPhase {
    Idle,
    AwaitingConfirmation { items: Vec<OrderItem>, eta_min: u32 },
    AwaitingConflictResolution { items: Vec<OrderItem>, conflicts: Vec<String> },
    AwaitingAvailabilityResolution { items: Vec<OrderItem>, unavailable: Vec<String> },
}

impl OrderPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    fn held(&self) -> Option<(&[OrderItem], Option<u32>)> {
        match self {
            Self::Idle => None,
            Self::AwaitingConfirmation { items, eta_min } => Some((items, Some(*eta_min))),
            Self::AwaitingConflictResolution { items, .. }
            | Self::AwaitingAvailabilityResolution { items, .. } => Some((items, None)),
        }
    }
}

/// Per-session conversational state. Created lazily on first reference,
/// mutated in place on every turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub preferences: BTreeSet<DietaryTag>,
    pub phase: OrderPhase,
    pub history: Vec<PlacedOrder>,
    pub last_seen: DateTime<Utc>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            preferences: BTreeSet::new(),
            phase: OrderPhase::Idle,
            history: Vec::new(),
            last_seen: Utc::now(),
        }
    }

    /// Idempotent: re-setting an already stored preference is a no-op.
    pub fn set_preference(&mut self, tag: DietaryTag) {
        self.preferences.insert(tag);
    }

    /// Idempotent: cancelling with nothing pending still succeeds.
    pub fn cancel_pending(&mut self) {
        self.phase = OrderPhase::Idle;
    }

    /// Places the held order, if any. Terminal success path: the entry is
    /// appended to history and the phase resets, with no rollback.
    pub fn confirm_pending(&mut self) -> Option<PlacedOrder> {
        let (items, eta_min) = self.phase.held().map(|(i, e)| (i.to_vec(), e))?;
        let placed = PlacedOrder { items, eta_min, placed_at: Utc::now() };
        self.history.push(placed.clone());
        self.phase = OrderPhase::Idle;
        Some(placed)
    }

    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::menu::MenuItemId;
    use crate::domain::order::OrderItem;

    use super::{DietaryTag, OrderPhase, SessionContext};

    fn fries(quantity: u32) -> OrderItem {
        OrderItem {
            name: "French Fries".to_string(),
            quantity,
            tags: Vec::new(),
            available: true,
            prep_time_min: Some(10),
            menu_id: MenuItemId("1".to_string()),
        }
    }

    #[test]
    fn preferences_are_idempotent() {
        let mut session = SessionContext::new();
        session.set_preference(DietaryTag::Vegetarian);
        session.set_preference(DietaryTag::Vegetarian);
        assert_eq!(session.preferences.len(), 1);
        assert!(session.preferences.contains(&DietaryTag::Vegetarian));
    }

    #[test]
    fn confirm_with_nothing_pending_leaves_history_untouched() {
        let mut session = SessionContext::new();
        assert!(session.confirm_pending().is_none());
        assert!(session.history.is_empty());
    }

    #[test]
    fn confirm_appends_exactly_one_history_entry_and_clears_phase() {
        let mut session = SessionContext::new();
        session.phase =
            OrderPhase::AwaitingConfirmation { items: vec![fries(2)], eta_min: 10 };

        let placed = session.confirm_pending().expect("pending order should place");
        assert_eq!(placed.eta_min, Some(10));
        assert_eq!(session.history.len(), 1);
        assert!(session.phase.is_idle());

        assert!(session.confirm_pending().is_none());
        assert_eq!(session.history.len(), 1);
    }

    #[test]
    fn conflict_held_order_is_still_confirmable() {
        let mut session = SessionContext::new();
        session.phase = OrderPhase::AwaitingConflictResolution {
            items: vec![fries(1)],
            conflicts: vec!["Grilled Chicken Sandwich".to_string()],
        };

        let placed = session.confirm_pending().expect("held order should place");
        assert_eq!(placed.eta_min, None);
        assert_eq!(session.history.len(), 1);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut session = SessionContext::new();
        session.cancel_pending();
        assert!(session.phase.is_idle());

        session.phase =
            OrderPhase::AwaitingConfirmation { items: vec![fries(1)], eta_min: 5 };
        session.cancel_pending();
        assert!(session.phase.is_idle());
        assert!(session.history.is_empty());
    }
}
