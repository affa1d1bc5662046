//! Read-mostly cache of catalogue records.
//!
//! Catalogue data (valid ingredients, units, preparations and so on) is owned
//! by the server and changes rarely, so decoded records are kept until someone
//! invalidates them. Nothing expires on a timer.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use hearth_shared::Record;

type Key = (&'static str, String);
type Entry = Arc<dyn Any + Send + Sync>;

/// Decoded records keyed by (kind, id).
#[derive(Clone, Default)]
pub struct CatalogueCache {
    entries: Arc<RwLock<HashMap<Key, Entry>>>,
}

impl CatalogueCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get<T: Record + Clone>(&self, id: &str) -> Option<T> {
        let entries = self.entries.read().await;
        let hit = entries
            .get(&(T::KIND, id.to_string()))
            .and_then(|entry| entry.downcast_ref::<T>())
            .cloned();
        if hit.is_some() {
            debug!(kind = T::KIND, id, "Catalogue record served from cache");
        }
        hit
    }

    pub async fn insert<T: Record + Clone>(&self, record: &T) {
        let key = (T::KIND, record.id().to_string());
        self.entries.write().await.insert(key, Arc::new(record.clone()));
    }

    /// Drop one record. Returns whether it was cached.
    pub async fn invalidate<T: Record>(&self, id: &str) -> bool {
        let removed = self
            .entries
            .write()
            .await
            .remove(&(T::KIND, id.to_string()))
            .is_some();
        if removed {
            debug!(kind = T::KIND, id, "Catalogue record invalidated");
        }
        removed
    }

    /// Drop every record of type `T`.
    pub async fn invalidate_kind<T: Record>(&self) {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|(kind, _), _| *kind != T::KIND);
        debug!(kind = T::KIND, removed = before - entries.len(), "Catalogue kind invalidated");
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
