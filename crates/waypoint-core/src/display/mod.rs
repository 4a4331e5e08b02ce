//! Display formatting for advisory output.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collection wrappers add headers, counts and empty-collection handling.
//! Everything renders as markdown, for the terminal renderer in the CLI and
//! verbatim for MCP clients.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (Suggestions, CatalogListing)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod status;

pub use collections::{CatalogListing, Suggestions};
pub use datetime::LocalDateTime;
pub use status::OperationStatus;
