//! Policy engine backed by a compiled artifact on disk

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::domain::value_objects::{PolicyDecision, PolicyDecisionRequest};
use crate::errors::{AppError, AppErrorKind, AppResult};

use super::traits::{LoadedPolicy, PolicyEngine, PolicyLoader};

/// Policy engine that loads its artifact on first use.
///
/// The artifact is read and loaded at most once per instance; the loaded
/// policy is then reused for every evaluation. A failed load is not cached,
/// so the next evaluation tries again.
pub struct ArtifactPolicy<L: PolicyLoader> {
    path: PathBuf,
    loader: Arc<L>,
    loaded: OnceCell<Box<dyn LoadedPolicy>>,
}

impl<L: PolicyLoader> ArtifactPolicy<L> {
    pub fn new(path: impl Into<PathBuf>, loader: Arc<L>) -> Self {
        Self {
            path: path.into(),
            loader,
            loaded: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the artifact has been loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    async fn policy(&self) -> AppResult<&dyn LoadedPolicy> {
        let loaded = self
            .loaded
            .get_or_try_init(|| async {
                let artifact = tokio::fs::read(&self.path).await.map_err(|e| {
                    AppError::system(
                        AppErrorKind::PolicyEvaluationFailed,
                        format!("failed to read policy artifact {}", self.path.display()),
                    )
                    .with_source(e)
                })?;

                let policy = self.loader.load(&artifact).await?;
                tracing::info!(
                    path = %self.path.display(),
                    size = artifact.len(),
                    event = "policy_loaded",
                    "Policy artifact loaded"
                );
                Ok::<_, AppError>(policy)
            })
            .await?;

        Ok(loaded.as_ref())
    }
}

#[async_trait]
impl<L: PolicyLoader> PolicyEngine for ArtifactPolicy<L> {
    async fn evaluate(&self, request: &PolicyDecisionRequest) -> AppResult<PolicyDecision> {
        let policy = self.policy().await?;

        let input = serde_json::to_value(request).map_err(|e| {
            AppError::system(
                AppErrorKind::PolicyEvaluationFailed,
                "failed to encode policy input",
            )
            .with_source(e)
        })?;

        let output = policy.evaluate(&input).await?;

        serde_json::from_value(output).map_err(|e| {
            AppError::system(
                AppErrorKind::PolicyEvaluationFailed,
                "policy returned an unrecognized decision",
            )
            .with_source(e)
        })
    }
}
