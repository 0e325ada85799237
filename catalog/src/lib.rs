//! Read-only contracts for the collaborators the verification core consults.
//!
//! The badge catalog and the event registry are owned by the surrounding
//! application (admin dashboard CRUD). This core only reads them, and only
//! through these traits — any backend that can answer the lookups plugs in.

pub mod badge;
pub mod error;
pub mod event;

pub use badge::{BadgeCatalog, BadgeDefinition};
pub use error::CatalogError;
pub use event::{EventRecord, EventRegistry};
