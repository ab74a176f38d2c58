pub mod chat;
pub mod menu;
pub mod order;
pub mod session;
