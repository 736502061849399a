use crate::errors::StoreError;
use crate::store::{Document, DocumentStore, Fields, StoreData};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::{fs, sync::Mutex};
use tracing::{debug, error, info};

/// Document store persisted as one JSON file, rewritten after every write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<StoreData>,
}

impl JsonFileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, std::io::Error> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let data = load_data(&path).await;
        info!(
            "opened document store at {} ({} collections)",
            path.display(),
            data.collections.len()
        );
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Applies `change` to a copy, persists it, and only then commits it.
    async fn write<T>(
        &self,
        collection: &str,
        change: impl FnOnce(&mut StoreData) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let value = change(&mut next)?;
        persist_data(&self.path, &next)
            .await
            .map_err(|err| StoreError::unavailable(collection, err))?;
        *data = next;
        Ok(value)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn create_document(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.write(collection, |data| Ok(data.insert(collection, fields)))
            .await
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
        self.write(collection, |data| data.merge(collection, id, patch))
            .await
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let present = self
            .data
            .lock()
            .await
            .documents(collection)
            .iter()
            .any(|doc| doc.id == id);
        if !present {
            debug!("delete of absent document {collection}/{id}");
            return Ok(());
        }

        self.write(collection, |data| {
            data.remove(collection, id);
            Ok(())
        })
        .await
    }
}

pub async fn load_data(path: &Path) -> StoreData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse store file: {err}");
                StoreData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
        Err(err) => {
            error!("failed to read store file: {err}");
            StoreData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &StoreData) -> Result<(), std::io::Error> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await
}
