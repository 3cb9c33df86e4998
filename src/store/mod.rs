//! Contract with the persistence collaborator, plus ready-made pieces.
//!
//! The engine never stores anything itself. A collaborator implements
//! [`Persistence`] to say whether an entity was already written and how to
//! write it; the provided [`Persistence::save`] runs the engine's lifecycle
//! hooks around that write.

mod memory;
mod record;

pub use memory::MemoryStore;
pub use record::Record;

use crate::core::Entity;
use crate::machine::SaveLifecycle;
use thiserror::Error;
use uuid::Uuid;

/// Errors a collaborator may report from a write.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to encode entity {id}: {reason}")]
    Encoding { id: Uuid, reason: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage collaborator for entities of type `E`.
pub trait Persistence<E: Entity> {
    /// Whether `entity` has been written before.
    fn is_persisted(&self, entity: &E) -> bool;

    /// Durably store `entity`.
    fn write(&mut self, entity: &E) -> Result<(), PersistenceError>;

    /// Write `entity`, calling `lifecycle` hooks around the write.
    ///
    /// Returns `false` if the write fails; the after-hooks are skipped in
    /// that case. Overrides must keep the hook order documented on
    /// [`SaveLifecycle`].
    fn save(&mut self, entity: &mut E, lifecycle: &dyn SaveLifecycle<E>) -> bool {
        let first = !self.is_persisted(entity);
        if first {
            lifecycle.before_first_save(entity);
        }
        lifecycle.before_every_save(entity);

        if let Err(error) = self.write(entity) {
            tracing::warn!(error = %error, first_save = first, "Entity write failed");
            return false;
        }

        if first {
            lifecycle.after_first_save(entity);
        }
        lifecycle.after_every_save(entity);
        true
    }
}
