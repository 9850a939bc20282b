//! Entity source contract consumed by the batch core

use super::options::Selection;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Supplies the ordered identifiers of a run and resolves each to its entity
#[async_trait]
pub trait EntitySource: Send + Sync {
    /// Opaque identifier naming one unit of input
    type Id: Clone + fmt::Display + fmt::Debug + Send + Sync;
    /// Fully loaded domain object
    type Entity: Send;

    /// Ordered identifiers matching the selection window
    ///
    /// A filter that matches nothing yields an empty list, not an error.
    async fn resolve_identifiers(&self, selection: &Selection) -> Result<Vec<Self::Id>>;

    /// Load the entity behind `id`
    ///
    /// Fails with `SweepError::EntityNotFound` when nothing is stored under it.
    async fn resolve_entity(&self, id: &Self::Id) -> Result<Self::Entity>;

    /// Human-readable identity used in logs and errors
    fn entity_label(&self, entity: &Self::Entity) -> String;
}
