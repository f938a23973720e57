//! Model oracle implementations
//!
//! Models are shipped as a JSON artifact tagged by `kind`:
//!
//! - `linear`: intercept plus one coefficient per feature
//! - `tree_ensemble`: gradient-boosted regression trees in the XGBoost JSON
//!   dump layout
//!
//! Both are compiled against the [`FeatureSpec`] at load time so a mismatch
//! between model and spec fails startup rather than a request.

mod linear;
mod tree;

pub use linear::{LinearArtifact, LinearModel};
pub use tree::{TreeEnsemble, TreeEnsembleArtifact, TreeNode};

use forecast_spi::{FeatureSpec, LoadError, ModelOracle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Serialized model as found on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearArtifact),
    TreeEnsemble(TreeEnsembleArtifact),
}

impl ModelArtifact {
    /// Compile the artifact against the feature spec.
    pub fn into_oracle(self, spec: &FeatureSpec) -> Result<Arc<dyn ModelOracle>, LoadError> {
        Ok(match self {
            ModelArtifact::Linear(artifact) => Arc::new(LinearModel::compile(artifact, spec)?),
            ModelArtifact::TreeEnsemble(artifact) => {
                Arc::new(TreeEnsemble::compile(artifact, spec)?)
            }
        })
    }
}

/// Parse and compile a model artifact from JSON text.
pub fn parse_model(json: &str, spec: &FeatureSpec) -> Result<Arc<dyn ModelOracle>, LoadError> {
    let artifact: ModelArtifact =
        serde_json::from_str(json).map_err(|e| LoadError::Json(e.to_string()))?;
    artifact.into_oracle(spec)
}

/// Load and compile a model artifact from disk.
pub fn load_model(path: &Path, spec: &FeatureSpec) -> Result<Arc<dyn ModelOracle>, LoadError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| LoadError::Io(format!("{}: {}", path.display(), e)))?;
    parse_model(&contents, spec)
}
