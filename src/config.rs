use crate::storage::JsonFileStore;
use crate::store::{DocumentStore, MemoryStore};
use std::{env, path::PathBuf, sync::Arc};
use tracing::{info, warn};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/store.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    File,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub store: StoreKind,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let store = match lookup("APP_STORE").as_deref().map(str::trim) {
            None | Some("") | Some("file") => StoreKind::File,
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                warn!("unknown APP_STORE '{other}', using the file store");
                StoreKind::File
            }
        };

        Self {
            port,
            data_path,
            store,
        }
    }

    /// Builds the one store handle shared by every repository.
    pub async fn open_store(&self) -> Result<Arc<dyn DocumentStore>, std::io::Error> {
        match self.store {
            StoreKind::Memory => {
                info!("using in-memory document store");
                Ok(Arc::new(MemoryStore::new()))
            }
            StoreKind::File => Ok(Arc::new(JsonFileStore::open(&self.data_path).await?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/store.json"));
        assert_eq!(config.store, StoreKind::File);
    }

    #[test]
    fn reads_overrides_and_ignores_bad_port() {
        let config = config(&[
            ("PORT", "not-a-port"),
            ("APP_DATA_PATH", "/tmp/board.json"),
            ("APP_STORE", "memory"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("/tmp/board.json"));
        assert_eq!(config.store, StoreKind::Memory);
    }
}
