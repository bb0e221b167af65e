use std::{collections::HashSet, fmt::Display, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};

use crate::{entities::KeyValueStore, errors::LedgerError};

/// Serialized form of one collection element.
pub(crate) trait SnapshotModel: Serialize + DeserializeOwned {
    type Entity;

    /// Identity within the collection; a snapshot never repeats one.
    fn id(&self) -> &str;

    fn from_entity(entity: &Self::Entity) -> Self;
    fn into_entity(self) -> Result<Self::Entity, LedgerError>;
}

/// Loads and saves a whole collection under one key.
pub(crate) trait SnapshotDatasource<T>: Send + Sync {
    /// `None` when nothing has been persisted under the key yet.
    fn load(&self) -> Result<Option<Vec<T>>, LedgerError>;
    fn save(&self, items: &[T]) -> Result<(), LedgerError>;
}

pub(crate) struct JsonSnapshotDatasource<M: SnapshotModel> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _phantom: std::marker::PhantomData<fn() -> M>,
}

impl<M: SnapshotModel> JsonSnapshotDatasource<M> {
    pub(crate) fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<M: SnapshotModel> SnapshotDatasource<M::Entity> for JsonSnapshotDatasource<M> {
    fn load(&self) -> Result<Option<Vec<M::Entity>>, LedgerError> {
        let invalid = |details: &dyn Display| LedgerError::InvalidSnapshot {
            key: self.key.to_string(),
            details: details.to_string(),
        };
        let Some(raw) = self.store.get(self.key)? else {
            return Ok(None);
        };
        let models: Vec<M> = serde_json::from_str(&raw).map_err(|e| invalid(&e))?;
        {
            let mut seen = HashSet::new();
            if let Some(id) = models.iter().map(M::id).find(|id| !seen.insert(*id)) {
                return Err(invalid(&format!("duplicate id '{}'", id)));
            }
        }
        models
            .into_iter()
            .map(|m| m.into_entity().map_err(|e| invalid(&e)))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn save(&self, items: &[M::Entity]) -> Result<(), LedgerError> {
        let models: Vec<M> = items.iter().map(M::from_entity).collect();
        let raw = serde_json::to_string(&models)
            .map_err(|e| LedgerError::persistence(self.key, &e))?;
        self.store.set(self.key, &raw)
    }
}
