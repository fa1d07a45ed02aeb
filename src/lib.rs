// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod credentials;
pub mod error;
pub mod observability;
pub mod render;
pub mod types;
pub mod utils;

// Re-exports
pub use client::Wildcat;
pub use client_logger::ClientLogger;
pub use credentials::{CredentialStore, TokenPair};
pub use error::{Error, Result};
pub use render::{PlainTextRenderer, Renderer};
pub use types::*;
