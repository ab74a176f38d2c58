pub mod catalog;
pub mod config;
pub mod domain;

pub use catalog::Catalog;
pub use config::{AppConfig, ConfigError};
pub use domain::chat::{ChatRequest, ChatResponse};
pub use domain::menu::{MenuItem, MenuItemId, MenuRecord};
pub use domain::order::{OrderItem, PlacedOrder};
pub use domain::session::{DietaryTag, OrderPhase, SessionContext};
