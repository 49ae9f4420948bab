//! Natural-key to surrogate-ID resolution.
//!
//! Lookups only see records that are already persisted; rows of the batch
//! being imported are never consulted.

use crate::db::StoreError;
use log::warn;
use uuid::Uuid;

/// Read-only access to already-persisted entities by their natural keys.
pub trait ReferenceLookup {
    fn animal_id_by_tag(&self, tag: &str) -> Result<Option<String>, StoreError>;
    fn property_id_by_name(&self, name: &str) -> Result<Option<String>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// A required reference has no persisted target. Fails the row only.
    #[error("{0}")]
    Missing(String),
    /// The lookup itself failed. Fatal for the whole import.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Fresh surrogate ID for a new entity.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn require_animal<L>(lookup: &L, tag: &str) -> Result<String, ResolveError>
where
    L: ReferenceLookup + ?Sized,
{
    lookup
        .animal_id_by_tag(tag)?
        .ok_or_else(|| ResolveError::Missing(format!("Animal with tag '{}' not found", tag)))
}

pub fn require_property<L>(lookup: &L, name: &str) -> Result<String, ResolveError>
where
    L: ReferenceLookup + ?Sized,
{
    lookup
        .property_id_by_name(name)?
        .ok_or_else(|| ResolveError::Missing(format!("Property '{}' not found", name)))
}

/// Resolves an optional animal reference. A tag that matches nothing is
/// dropped to `None` and the row still succeeds.
pub fn optional_animal<L>(
    lookup: &L,
    column: &str,
    tag: Option<&str>,
) -> Result<Option<String>, StoreError>
where
    L: ReferenceLookup + ?Sized,
{
    let Some(tag) = tag else {
        return Ok(None);
    };
    let id = lookup.animal_id_by_tag(tag)?;
    if id.is_none() {
        warn!("{} '{}' does not match any animal, storing without it", column, tag);
    }
    Ok(id)
}
