//! Saved network storage abstraction Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::CredentialList;

/// Saved network storage Trait
///
/// The whole list is read and written as one unit; there is no partial or
/// incremental persistence.
///
/// Implementations:
/// - `KeyValueCredentialStore`: JSON array under a single key of any `KeyValueStorage`
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load every saved network in insertion order
    ///
    /// # Returns
    /// * `Ok(list)` - an empty list when nothing has been saved yet
    /// * `Err(CoreError::StorageError)` - the persisted payload is unreadable
    async fn load(&self) -> CoreResult<CredentialList>;

    /// Replace the persisted list
    ///
    /// A failed or interrupted save must never leave a payload that a later
    /// `load()` reads as truncated.
    ///
    /// # Arguments
    /// * `list` - the complete list to persist
    async fn save(&self, list: &CredentialList) -> CoreResult<()>;
}
