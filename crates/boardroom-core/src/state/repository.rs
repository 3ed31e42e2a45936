//! Client state repository trait.

use crate::error::Result;
use crate::state::model::ClientState;

/// Storage for [`ClientState`].
///
/// Synchronous: a mutation is not complete until it has been written.
pub trait ClientStateRepository: Send + Sync {
    /// Loads the stored state, or the default state if nothing is stored.
    fn load(&self) -> Result<ClientState>;

    fn save(&self, state: &ClientState) -> Result<()>;
}
