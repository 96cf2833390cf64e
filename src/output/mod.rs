/// Mockup persistence.
pub mod store;
