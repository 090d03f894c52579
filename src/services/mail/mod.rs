pub mod provider;
pub mod templates;

pub use provider::{DeliveryError, EmailProvider};
