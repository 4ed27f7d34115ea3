//! Stay repository trait.

use async_trait::async_trait;

use crate::domain::entities::stay::Stay;
use crate::errors::DomainResult;

/// Repository contract for stays.
#[async_trait]
pub trait StayRepository: Send + Sync {
    /// Persist a new stay, returning it with its database-assigned id.
    ///
    /// Implementations reject the insert with Conflict when the room already
    /// holds a stay that is still open, or one that departs after the new
    /// arrival. Racing check-ins for the same room therefore serialize at
    /// the storage layer, like racing reservation inserts do.
    async fn save(&self, stay: Stay) -> DomainResult<Stay>;

    /// Find a stay by id
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Stay>>;

    /// All stays for a client, most recent arrival first
    async fn find_by_client(&self, client_id: i64) -> DomainResult<Vec<Stay>>;

    /// Replace an existing stay. Fails with NotFound if absent.
    ///
    /// Implementations guard the close transition at the storage layer as
    /// well: writing a departure over an already-departed row fails with
    /// Conflict, so a double checkout loses even across processes.
    async fn update(&self, stay: Stay) -> DomainResult<Stay>;
}
