//! The document store contract the repositories consume, plus the in-process
//! implementation used for tests and `APP_STORE=memory`.

use crate::errors::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use uuid::Uuid;

pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

/// A schemaless store addressed by collection name and document id.
///
/// Implementations own identity and durability. Consistency between
/// concurrent writers is last-write-wins per document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Appends a document and returns its store-assigned id.
    async fn create_document(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Merges `patch` into the stored fields. Keys absent from the patch are untouched.
    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<(), StoreError>;

    /// Deleting an id that does not exist succeeds.
    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Insertion-ordered collections, shared by the memory and file backends.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreData {
    pub collections: BTreeMap<String, Vec<Document>>,
}

impl StoreData {
    pub fn insert(&mut self, collection: &str, fields: Fields) -> String {
        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        id
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections.get(collection).cloned().unwrap_or_default()
    }

    pub fn merge(&mut self, collection: &str, id: &str, patch: Fields) -> Result<(), StoreError> {
        let document = self
            .collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        document.fields.extend(patch);
        Ok(())
    }

    /// Returns whether a document was actually removed.
    pub fn remove(&mut self, collection: &str, id: &str) -> bool {
        let Some(docs) = self.collections.get_mut(collection) else {
            return false;
        };
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        docs.len() != before
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        Ok(self.data.lock().await.insert(collection, fields))
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self.data.lock().await.documents(collection))
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<(), StoreError> {
        self.data.lock().await.merge(collection, id, patch)
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.data.lock().await.remove(collection, id);
        Ok(())
    }
}
