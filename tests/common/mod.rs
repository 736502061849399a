#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use taskboard::store::{Document, DocumentStore, Fields, MemoryStore};
use taskboard::StoreError;

/// Wraps a [`MemoryStore`], counting writes and failing on demand.
#[derive(Default)]
pub struct FakeStore {
    inner: MemoryStore,
    writes: AtomicUsize,
    lists: AtomicUsize,
    fail_writes: AtomicBool,
    fail_lists: AtomicBool,
}

impl FakeStore {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    fn write_guard(&self, collection: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(collection, "connection refused"));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn create_document(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.write_guard(collection)?;
        self.inner.create_document(collection, fields).await
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(collection, "connection refused"));
        }
        self.lists.fetch_add(1, Ordering::SeqCst);
        self.inner.list_documents(collection).await
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<(), StoreError> {
        self.write_guard(collection)?;
        self.inner.update_document(collection, id, patch).await
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.write_guard(collection)?;
        self.inner.delete_document(collection, id).await
    }
}
