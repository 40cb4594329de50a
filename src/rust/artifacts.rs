use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::models::{BuiltinModel, VECTORIZER_FILE};

/// File holding `{file name -> sha256 hex}` for the artifacts in a directory.
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    NotFound(String),
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Manifest error: {0}")]
    ManifestError(String),
    #[error("Hash mismatch: expected {expected}, got {actual} for {file_name}")]
    HashMismatch {
        file_name: String,
        expected: String,
        actual: String,
    },
}

/// Locates, verifies and fetches the vectorizer and model artifacts.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    artifacts_dir: PathBuf,
    download_lock: Arc<Mutex<()>>,
}

impl ArtifactStore {
    /// Creates a new ArtifactStore with the default artifacts directory
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::get_default_artifacts_dir())
    }

    /// Returns the default artifacts directory path
    pub fn get_default_artifacts_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("NEWSCLASS_ARTIFACTS") {
            return PathBuf::from(path);
        }

        // 2. An `artifacts` directory next to where the app is started
        let local = PathBuf::from("artifacts");
        if local.is_dir() {
            return local;
        }

        // 3. Platform-specific data directory
        if let Some(data_dir) = dirs::data_dir() {
            return data_dir.join("newsclass").join("artifacts");
        }

        local
    }

    pub fn new<P: AsRef<Path>>(artifacts_dir: P) -> io::Result<Self> {
        let artifacts_dir = artifacts_dir.as_ref().to_path_buf();
        fs::create_dir_all(&artifacts_dir)?;
        Ok(Self {
            artifacts_dir,
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.artifacts_dir
    }

    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.artifacts_dir.join(file_name)
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.artifact_path(VECTORIZER_FILE)
    }

    pub fn model_path(&self, model: BuiltinModel) -> PathBuf {
        self.artifact_path(model.file_name())
    }

    pub fn is_model_available(&self, model: BuiltinModel) -> bool {
        let path = self.model_path(model);
        log::debug!("Model path: {:?} (exists: {})", path, path.exists());
        path.exists()
    }

    /// Built-in models whose artifact is present, in selector order.
    pub fn available_models(&self) -> Vec<BuiltinModel> {
        BuiltinModel::all()
            .into_iter()
            .filter(|m| self.is_model_available(*m))
            .collect()
    }

    /// Reads the manifest if the directory has one.
    pub fn load_manifest(&self) -> Result<Option<HashMap<String, String>>, ArtifactError> {
        let path = self.artifact_path(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        let manifest: HashMap<String, String> = serde_json::from_str(&raw)
            .map_err(|e| ArtifactError::ManifestError(format!("{:?}: {}", path, e)))?;
        Ok(Some(manifest))
    }

    pub fn verify_file(&self, path: &Path, expected_hash: &str) -> Result<bool, ArtifactError> {
        log::info!("Verifying file: {:?}", path);
        let bytes = fs::read(path)?;
        let hash = sha256_hex(&bytes);
        log::debug!("Calculated hash: {}", hash);
        log::debug!("Expected hash:   {}", expected_hash);
        Ok(hash.eq_ignore_ascii_case(expected_hash))
    }

    /// Checks every file listed in the manifest. Returns how many files were verified.
    pub fn verify_all(&self) -> Result<usize, ArtifactError> {
        let manifest = self.load_manifest()?.ok_or_else(|| {
            ArtifactError::ManifestError(format!(
                "No {} in {:?}",
                MANIFEST_FILE, self.artifacts_dir
            ))
        })?;

        let mut entries: Vec<_> = manifest.into_iter().collect();
        entries.sort();
        for (file_name, expected) in &entries {
            let path = self.artifact_path(file_name);
            if !path.exists() {
                return Err(ArtifactError::NotFound(path.display().to_string()));
            }
            let actual = sha256_hex(&fs::read(&path)?);
            if !actual.eq_ignore_ascii_case(expected) {
                log::error!("{} hash mismatch: expected {}, got {}", file_name, expected, actual);
                return Err(ArtifactError::HashMismatch {
                    file_name: file_name.clone(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }
        log::info!("Verified {} artifact(s) in {:?}", entries.len(), self.artifacts_dir);
        Ok(entries.len())
    }

    /// Downloads an artifact into the store, refusing content whose hash does not match.
    pub async fn fetch_artifact(
        &self,
        url: &str,
        file_name: &str,
        expected_hash: &str,
    ) -> Result<PathBuf, ArtifactError> {
        let _lock = self.download_lock.lock().await;
        let path = self.artifact_path(file_name);

        if path.exists() && self.verify_file(&path, expected_hash)? {
            log::info!("Existing {} verified, skipping download", file_name);
            return Ok(path);
        }

        log::info!("Downloading {} from {}", file_name, url);
        let response = reqwest::get(url).await?.error_for_status()?;
        let bytes = response.bytes().await?;
        log::info!("Downloaded {} bytes", bytes.len());

        let hash = sha256_hex(&bytes);
        if !hash.eq_ignore_ascii_case(expected_hash) {
            log::error!("{} hash mismatch: expected {}, got {}", file_name, expected_hash, hash);
            return Err(ArtifactError::HashMismatch {
                file_name: file_name.to_string(),
                expected: expected_hash.to_string(),
                actual: hash,
            });
        }

        fs::write(&path, &bytes)?;
        log::info!("{} written to {:?}", file_name, path);
        Ok(path)
    }

    pub fn remove_artifact(&self, file_name: &str) -> Result<(), ArtifactError> {
        let path = self.artifact_path(file_name);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
