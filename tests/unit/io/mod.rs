pub mod configuration;
pub mod error;
