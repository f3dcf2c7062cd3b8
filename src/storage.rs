use crate::constants;
use crate::error::{CleanerError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Logical names the pipeline artifacts are stored under between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKey {
    ExtractedData,
    ProfilingResults,
    TransformedData,
    ValidationResults,
}

impl ArtifactKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKey::ExtractedData => constants::EXTRACTED_DATA_KEY,
            ArtifactKey::ProfilingResults => constants::PROFILING_RESULTS_KEY,
            ArtifactKey::TransformedData => constants::TRANSFORMED_DATA_KEY,
            ArtifactKey::ValidationResults => constants::VALIDATION_RESULTS_KEY,
        }
    }
}

/// Storage collaborator for persisting pipeline artifacts between runs.
/// Failures surface as errors to the caller; they are logged, not retried.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save(&self, key: ArtifactKey, value: Value) -> Result<()>;
    async fn load(&self, key: ArtifactKey) -> Result<Value>;
}

/// In-memory storage implementation for development/testing
pub struct InMemoryStorage {
    artifacts: Arc<Mutex<HashMap<ArtifactKey, Value>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            artifacts: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save(&self, key: ArtifactKey, value: Value) -> Result<()> {
        let mut artifacts = self.artifacts.lock().unwrap();
        artifacts.insert(key, value);

        debug!("Saved artifact '{}'", key.as_str());
        Ok(())
    }

    async fn load(&self, key: ArtifactKey) -> Result<Value> {
        let artifacts = self.artifacts.lock().unwrap();
        artifacts
            .get(&key)
            .cloned()
            .ok_or(CleanerError::MissingArtifact(key.as_str()))
    }
}

/// File-backed storage: one pretty-printed `<key>.json` per artifact under a
/// root directory, so artifacts survive between CLI invocations.
pub struct JsonFileStorage {
    root: PathBuf,
}

impl JsonFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: ArtifactKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn save(&self, key: ArtifactKey, value: Value) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        let json_content = serde_json::to_string_pretty(&value)?;
        let path = self.path_for(key);
        tokio::fs::write(&path, json_content).await?;

        debug!("Saved artifact '{}' to {}", key.as_str(), path.display());
        Ok(())
    }

    async fn load(&self, key: ArtifactKey) -> Result<Value> {
        let path = self.path_for(key);
        let json_content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CleanerError::MissingArtifact(key.as_str()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json_content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn in_memory_round_trips_artifacts() {
        let storage = InMemoryStorage::new();
        storage
            .save(ArtifactKey::ExtractedData, json!([{"a": "1"}]))
            .await
            .unwrap();

        let loaded = storage.load(ArtifactKey::ExtractedData).await.unwrap();
        assert_eq!(loaded, json!([{"a": "1"}]));
    }

    #[tokio::test]
    async fn loading_absent_key_fails_with_key_name() {
        let storage = InMemoryStorage::new();
        let err = storage.load(ArtifactKey::ValidationResults).await.unwrap_err();
        assert!(err.to_string().contains("validationResults"));
    }

    #[tokio::test]
    async fn file_storage_persists_under_key_names() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());

        storage
            .save(ArtifactKey::ProfilingResults, json!({"totalRows": 3}))
            .await
            .unwrap();
        assert!(dir.path().join("profilingResults.json").exists());

        let loaded = storage.load(ArtifactKey::ProfilingResults).await.unwrap();
        assert_eq!(loaded["totalRows"], 3);

        let err = storage.load(ArtifactKey::TransformedData).await.unwrap_err();
        assert!(matches!(err, CleanerError::MissingArtifact(_)));
    }
}
