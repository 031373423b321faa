use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::CandidateProfile;

/// Errors that can occur when reading the candidate directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse candidates: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate candidate id: {0}")]
    DuplicateId(String),

    #[error("SQLx error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Source of barterable user profiles
///
/// `list_candidates` returns a snapshot that stays consistent for the whole
/// query. The snapshot is shared read-only, so concurrent queries never lock.
#[async_trait]
pub trait CandidateDirectory: Send + Sync {
    async fn list_candidates(&self) -> Result<Arc<Vec<CandidateProfile>>, DirectoryError>;

    /// Re-resolve a single profile, e.g. from a `MatchResult` id
    async fn get_candidate(&self, id: &str) -> Result<Option<CandidateProfile>, DirectoryError>;

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str;
}

/// Directory held entirely in memory, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    candidates: Arc<Vec<CandidateProfile>>,
}

impl InMemoryDirectory {
    /// Build a directory, rejecting duplicate ids
    pub fn new(candidates: Vec<CandidateProfile>) -> Result<Self, DirectoryError> {
        ensure_unique_ids(&candidates)?;
        Ok(Self {
            candidates: Arc::new(candidates),
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, DirectoryError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Load a JSON array of profiles from disk
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let directory = Self::from_json_str(&raw)?;

        tracing::info!(
            "Loaded {} candidates from {}",
            directory.len(),
            path.as_ref().display()
        );

        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[async_trait]
impl CandidateDirectory for InMemoryDirectory {
    async fn list_candidates(&self) -> Result<Arc<Vec<CandidateProfile>>, DirectoryError> {
        Ok(Arc::clone(&self.candidates))
    }

    async fn get_candidate(&self, id: &str) -> Result<Option<CandidateProfile>, DirectoryError> {
        Ok(self.candidates.iter().find(|p| p.id == id).cloned())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

pub(crate) fn ensure_unique_ids(candidates: &[CandidateProfile]) -> Result<(), DirectoryError> {
    let mut seen = HashSet::with_capacity(candidates.len());
    for profile in candidates {
        if !seen.insert(profile.id.as_str()) {
            return Err(DirectoryError::DuplicateId(profile.id.clone()));
        }
    }
    Ok(())
}
