//! JSON file implementation of SingletonRepository

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::instrument;

use society_core::patch::merge_document;
use society_core::traits::{RepoResult, SingletonRepository};

use crate::json_file;

pub const CONTACT_FILE: &str = "contact.json";
pub const SETTINGS_FILE: &str = "settings.json";

/// A single JSON document; missing or corrupt files read as `T::default()`
pub struct JsonSingletonStore<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonSingletonStore<T>
where
    T: Default + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _doc: PhantomData,
        }
    }

    /// Store at `<data_dir>/<file_name>`
    pub fn in_dir(data_dir: &Path, file_name: &str) -> Self {
        Self::new(data_dir.join(file_name))
    }
}

#[async_trait]
impl<T> SingletonRepository<T> for JsonSingletonStore<T>
where
    T: Default + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn get(&self) -> RepoResult<T> {
        Ok(json_file::read_or_default(&self.path, T::default).await)
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn put(&self, value: &T) -> RepoResult<()> {
        let _guard = self.write_lock.lock().await;
        json_file::write(&self.path, value).await
    }

    #[instrument(skip(self, patch), fields(path = %self.path.display()))]
    async fn update(&self, patch: &Map<String, Value>, updated_by: &str) -> RepoResult<T> {
        let _guard = self.write_lock.lock().await;
        let current: T = json_file::read_or_default(&self.path, T::default).await;
        let merged = merge_document(&current, patch, Utc::now(), updated_by)?;
        json_file::write(&self.path, &merged).await?;
        Ok(merged)
    }
}
