use thiserror::Error;

/// Failures surfaced by the catalog and registry collaborators.
///
/// `NotFound` is a definitive answer; `Unavailable` is transient and callers
/// must treat the whole operation as not-applied.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}
