//! Per-entity repositories over a [`DocumentStore`].
//!
//! Every successful write is followed by a full re-list of the collection and
//! the caller receives that fresh snapshot. There is no local patching: what a
//! caller holds after a write is exactly what the store returned.

use crate::errors::StoreError;
use crate::models::Task;
use crate::store::{Document, DocumentStore, Fields};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// An application record materialized from one document plus its id.
pub trait Entity: Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;
    /// Human-readable kind, used in notices and logs.
    const LABEL: &'static str;
    /// Whether the list view asks before deleting.
    const CONFIRM_DELETE: bool;

    type Draft: Clone + Default + Send + Sync;
    type Patch: Clone + Send + Sync;

    fn id(&self) -> &str;

    /// Fields for a new document, or `None` when the required text is blank.
    fn draft_fields(draft: &Self::Draft) -> Option<Fields>;

    /// Fields to merge, or `None` when the patch would blank the required text.
    fn patch_fields(patch: &Self::Patch) -> Option<Fields>;

    fn apply_patch(&mut self, patch: &Self::Patch);

    fn from_document(document: Document) -> Result<Self, serde_json::Error>;
}

/// Result of a guarded write.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<E> {
    /// Blank required text; the store was not touched.
    Skipped,
    /// The write landed and this is the re-listed collection.
    Refreshed(Vec<E>),
}

pub struct Repository<E> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

pub type TaskRepository = Repository<Task>;
pub type ProjectRepository = Repository<crate::models::Project>;

impl<E: Entity> Repository<E> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<E>, StoreError> {
        let documents = self.store.list_documents(E::COLLECTION).await?;
        let entities = documents
            .into_iter()
            .filter_map(|document| {
                let id = document.id.clone();
                match E::from_document(document) {
                    Ok(entity) => Some(entity),
                    Err(err) => {
                        warn!("skipping {}/{id}: {err}", E::COLLECTION);
                        None
                    }
                }
            })
            .collect();
        Ok(entities)
    }

    pub async fn create(&self, draft: &E::Draft) -> Result<Outcome<E>, StoreError> {
        let Some(fields) = E::draft_fields(draft) else {
            debug!("skipping create in {}: required text is blank", E::COLLECTION);
            return Ok(Outcome::Skipped);
        };
        let id = self.store.create_document(E::COLLECTION, fields).await?;
        debug!("created {}/{id}", E::COLLECTION);
        Ok(Outcome::Refreshed(self.list().await?))
    }

    pub async fn update(&self, id: &str, patch: &E::Patch) -> Result<Outcome<E>, StoreError> {
        let Some(fields) = E::patch_fields(patch) else {
            debug!("skipping update of {}/{id}: required text is blank", E::COLLECTION);
            return Ok(Outcome::Skipped);
        };
        self.merge(id, fields).await.map(Outcome::Refreshed)
    }

    pub async fn remove(&self, id: &str) -> Result<Vec<E>, StoreError> {
        self.store.delete_document(E::COLLECTION, id).await?;
        debug!("deleted {}/{id}", E::COLLECTION);
        self.list().await
    }

    async fn merge(&self, id: &str, fields: Fields) -> Result<Vec<E>, StoreError> {
        self.store.update_document(E::COLLECTION, id, fields).await?;
        debug!("updated {}/{id}", E::COLLECTION);
        self.list().await
    }
}

impl Repository<Task> {
    pub async fn toggle_completed(&self, task: &Task) -> Result<Vec<Task>, StoreError> {
        let mut fields = Fields::new();
        fields.insert("completed".into(), serde_json::Value::Bool(!task.completed));
        self.merge(&task.id, fields).await
    }
}
