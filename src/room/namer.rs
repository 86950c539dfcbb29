//! Unique room name generation.
//!
//! The active set is fetched once per call and candidates are checked against
//! it in memory. Nothing is reserved: two concurrent callers can both see the
//! same name as free.

use std::sync::Arc;

use thiserror::Error;

use super::registry::{RegistryError, RoomRegistry};
use crate::util::id::new_room_name;

#[derive(Debug, Error)]
pub enum NamingError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("no free room name after {attempts} attempts")]
    Exhausted { attempts: usize },
}

#[derive(Clone)]
pub struct RoomNamer {
    registry: Arc<dyn RoomRegistry>,
    max_attempts: usize,
}

impl RoomNamer {
    pub fn new(registry: Arc<dyn RoomRegistry>, max_attempts: usize) -> Self {
        Self {
            registry,
            max_attempts: max_attempts.max(1),
        }
    }

    pub async fn generate_unique_room_name(&self) -> Result<String, NamingError> {
        self.generate_with(new_room_name).await
    }

    /// Like [`generate_unique_room_name`](Self::generate_unique_room_name) with
    /// candidates drawn from `candidate`.
    pub async fn generate_with<F>(&self, mut candidate: F) -> Result<String, NamingError>
    where
        F: FnMut() -> String + Send,
    {
        let active = self.registry.list_active_rooms().await?;
        for attempt in 1..=self.max_attempts {
            let name = candidate();
            if !active.contains(&name) {
                return Ok(name);
            }
            tracing::debug!(%name, attempt, "room name taken");
        }
        Err(NamingError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
