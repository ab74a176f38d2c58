//! Conversational order-taking runtime for hotel room service.
//!
//! This crate is the "brain" of the concierge system:
//! - **Text front end** (`text`, `matcher`) - normalize free text, expand
//!   casual synonyms, and match it against the menu catalog
//! - **Intent Parser** (`intent`) - deterministic rule cascade turning a raw
//!   message into a [`intent::ParsedIntent`]
//! - **Dialogue Engine** (`dialogue`) - per-intent transition functions over
//!   session state, with dietary-conflict and availability checks before an
//!   order is held for confirmation
//! - **Session Store** (`session`) - keyed in-memory store with TTL and
//!   capacity eviction; one lock per session
//! - **Runtime** (`runtime`) - [`runtime::AgentRuntime`] orchestrates a turn
//!
//! # Contract
//!
//! `AgentRuntime::handle_message` always returns a reply. Ambiguity becomes a
//! `clarify` reply, domain conflicts become structured replies with the order
//! held pending, and a generative-backend failure degrades to an apologetic
//! error reply. No error kind crosses this boundary.
//!
//! The rule-based path never consults the generative client; only messages no
//! rule can classify fall through to it, and only when one is configured.

pub mod dialogue;
pub mod intent;
pub mod llm;
pub mod matcher;
pub mod runtime;
pub mod session;
pub mod text;
