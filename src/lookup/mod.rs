pub mod acromine;
pub mod client;
pub mod types;

pub use acromine::AcromineClient;
pub use client::{LookupClient, LookupError};
pub use types::{Definition, LongForm, LookupResponse, Variation};
