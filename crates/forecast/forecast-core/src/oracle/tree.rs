//! Gradient-boosted tree ensemble oracle

use forecast_spi::{FeatureSpec, FeatureVector, ForecastError, LoadError, ModelOracle, Result};
use serde::{Deserialize, Serialize};

/// Tree node in the XGBoost JSON dump layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        nodeid: u32,
        /// Feature name, or `f<index>` when the booster was trained without names
        split: String,
        split_condition: f64,
        yes: u32,
        no: u32,
        /// Branch taken for a missing value; defaults to `yes`
        #[serde(default)]
        missing: Option<u32>,
        children: Vec<TreeNode>,
    },
    Leaf {
        nodeid: u32,
        leaf: f64,
    },
}

impl TreeNode {
    pub fn nodeid(&self) -> u32 {
        match self {
            TreeNode::Split { nodeid, .. } | TreeNode::Leaf { nodeid, .. } => *nodeid,
        }
    }
}

fn default_base_score() -> f64 {
    0.5
}

/// On-disk form of a tree ensemble.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsembleArtifact {
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    pub trees: Vec<TreeNode>,
}

#[derive(Debug, Clone, Copy)]
enum Node {
    Split {
        feature: usize,
        threshold: f32,
        yes: usize,
        no: usize,
        missing: usize,
    },
    Leaf(f64),
}

/// Flattened tree. Children are always stored after their parent, so
/// traversal from index 0 terminates.
#[derive(Debug, Clone)]
struct CompiledTree {
    nodes: Vec<Node>,
}

impl CompiledTree {
    fn compile(root: &TreeNode, spec: &FeatureSpec) -> std::result::Result<Self, LoadError> {
        let mut nodes = Vec::new();
        compile_node(root, spec, &mut nodes)?;
        Ok(Self { nodes })
    }

    fn evaluate(&self, values: &[Option<f64>]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    idx = match values[feature] {
                        None => missing,
                        // XGBoost compares in single precision
                        Some(x) if (x as f32) < threshold => yes,
                        Some(_) => no,
                    };
                }
            }
        }
    }
}

fn compile_node(
    node: &TreeNode,
    spec: &FeatureSpec,
    nodes: &mut Vec<Node>,
) -> std::result::Result<usize, LoadError> {
    let idx = nodes.len();
    match node {
        TreeNode::Leaf { leaf, .. } => {
            nodes.push(Node::Leaf(*leaf));
        }
        TreeNode::Split {
            nodeid,
            split,
            split_condition,
            yes,
            no,
            missing,
            children,
        } => {
            let feature = resolve_feature(split, spec)?;
            // Reserve the slot so children land after the parent
            nodes.push(Node::Leaf(0.0));

            let mut compiled_children = Vec::with_capacity(children.len());
            for child in children {
                compiled_children.push((child.nodeid(), compile_node(child, spec, nodes)?));
            }
            let child = |id: u32| {
                compiled_children
                    .iter()
                    .find(|(child_id, _)| *child_id == id)
                    .map(|&(_, child_idx)| child_idx)
                    .ok_or_else(|| {
                        LoadError::InvalidModel(format!(
                            "node {} references missing child {}",
                            nodeid, id
                        ))
                    })
            };

            nodes[idx] = Node::Split {
                feature,
                threshold: *split_condition as f32,
                yes: child(*yes)?,
                no: child(*no)?,
                missing: child(missing.unwrap_or(*yes))?,
            };
        }
    }
    Ok(idx)
}

fn resolve_feature(name: &str, spec: &FeatureSpec) -> std::result::Result<usize, LoadError> {
    if let Some(idx) = spec.position(name) {
        return Ok(idx);
    }
    name.strip_prefix('f')
        .and_then(|digits| digits.parse::<usize>().ok())
        .filter(|&idx| idx < spec.len())
        .ok_or_else(|| LoadError::InvalidModel(format!("split on unknown feature '{}'", name)))
}

/// Sum of tree outputs on top of a base score. Missing feature values follow
/// each split's default branch, so the ensemble accepts incomplete vectors.
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    model_type: String,
    base_score: f64,
    n_features: usize,
    trees: Vec<CompiledTree>,
}

impl TreeEnsemble {
    pub const DEFAULT_MODEL_TYPE: &'static str = "XGBoost Regressor";

    pub fn compile(
        artifact: TreeEnsembleArtifact,
        spec: &FeatureSpec,
    ) -> std::result::Result<Self, LoadError> {
        if artifact.trees.is_empty() {
            return Err(LoadError::InvalidModel("tree ensemble has no trees".to_string()));
        }
        let trees = artifact
            .trees
            .iter()
            .map(|root| CompiledTree::compile(root, spec))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            model_type: artifact
                .model_type
                .unwrap_or_else(|| Self::DEFAULT_MODEL_TYPE.to_string()),
            base_score: artifact.base_score,
            n_features: spec.len(),
            trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl ModelOracle for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        if features.len() != self.n_features {
            return Err(ForecastError::Oracle(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }
        let values = features.values();
        Ok(self.base_score + self.trees.iter().map(|t| t.evaluate(values)).sum::<f64>())
    }

    fn model_type(&self) -> &str {
        &self.model_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_spi::{DerivedFeatures, DerivedRow, Observation};

    const STUMPS: &str = r#"{
        "base_score": 100.0,
        "trees": [
            {"nodeid": 0, "depth": 0, "split": "mmr_lag_1", "split_condition": 500.0,
             "yes": 1, "no": 2, "missing": 2,
             "children": [{"nodeid": 1, "leaf": -50.0}, {"nodeid": 2, "leaf": 400.0}]},
            {"nodeid": 0, "depth": 0, "split": "f1", "split_condition": 0.0,
             "yes": 1, "no": 2, "missing": 1,
             "children": [{"nodeid": 1, "leaf": -10.0}, {"nodeid": 2, "leaf": 10.0}]}
        ]
    }"#;

    fn spec() -> FeatureSpec {
        FeatureSpec::new(["mmr_lag_1", "trend_slope"]).unwrap()
    }

    fn ensemble() -> TreeEnsemble {
        let artifact: TreeEnsembleArtifact = serde_json::from_str(STUMPS).unwrap();
        TreeEnsemble::compile(artifact, &spec()).unwrap()
    }

    fn vector(lag: Option<f64>, slope: Option<f64>) -> FeatureVector {
        let row = DerivedRow::new(
            Observation::new(2020),
            DerivedFeatures {
                mmr_lag_1: lag,
                trend_slope: slope,
                ..DerivedFeatures::default()
            },
        );
        FeatureVector::from_row(&spec(), &row)
    }

    #[test]
    fn test_sums_leaves_over_base_score() {
        let model = ensemble();
        assert_eq!(model.n_trees(), 2);
        assert_eq!(model.predict(&vector(Some(300.0), Some(-5.0))).unwrap(), 40.0);
        assert_eq!(model.predict(&vector(Some(800.0), Some(5.0))).unwrap(), 510.0);
    }

    #[test]
    fn test_threshold_is_exclusive_for_yes_branch() {
        let model = ensemble();
        // 500 is not < 500, so the "no" leaf applies
        assert_eq!(model.predict(&vector(Some(500.0), Some(1.0))).unwrap(), 510.0);
    }

    #[test]
    fn test_missing_values_follow_default_branch() {
        let model = ensemble();
        assert_eq!(model.predict(&vector(None, None)).unwrap(), 490.0);
    }

    #[test]
    fn test_default_model_type() {
        assert_eq!(ensemble().model_type(), TreeEnsemble::DEFAULT_MODEL_TYPE);
    }

    #[test]
    fn test_unknown_split_feature_rejected() {
        let artifact: TreeEnsembleArtifact = serde_json::from_str(
            r#"{"trees": [{"nodeid": 0, "split": "f7", "split_condition": 1.0, "yes": 1, "no": 2,
                "children": [{"nodeid": 1, "leaf": 0.0}, {"nodeid": 2, "leaf": 1.0}]}]}"#,
        )
        .unwrap();
        let err = TreeEnsemble::compile(artifact, &spec()).unwrap_err();
        assert_eq!(
            err,
            LoadError::InvalidModel("split on unknown feature 'f7'".to_string())
        );
    }

    #[test]
    fn test_dangling_child_rejected() {
        let artifact: TreeEnsembleArtifact = serde_json::from_str(
            r#"{"trees": [{"nodeid": 0, "split": "mmr_lag_1", "split_condition": 1.0,
                "yes": 1, "no": 5, "children": [{"nodeid": 1, "leaf": 0.0}]}]}"#,
        )
        .unwrap();
        let err = TreeEnsemble::compile(artifact, &spec()).unwrap_err();
        assert_eq!(
            err,
            LoadError::InvalidModel("node 0 references missing child 5".to_string())
        );
    }

    #[test]
    fn test_base_score_defaults() {
        let artifact: TreeEnsembleArtifact =
            serde_json::from_str(r#"{"trees": [{"nodeid": 0, "leaf": 1.0}]}"#).unwrap();
        assert_eq!(artifact.base_score, 0.5);
    }

    #[test]
    fn test_empty_ensemble_rejected() {
        let artifact: TreeEnsembleArtifact = serde_json::from_str(r#"{"trees": []}"#).unwrap();
        assert!(TreeEnsemble::compile(artifact, &spec()).is_err());
    }

    #[test]
    fn test_vector_length_mismatch() {
        let model = ensemble();
        let other_spec = FeatureSpec::new(["mmr_lag_1"]).unwrap();
        let row = DerivedRow::new(Observation::new(2020), DerivedFeatures::default());
        let err = model
            .predict(&FeatureVector::from_row(&other_spec, &row))
            .unwrap_err();
        assert!(matches!(err, ForecastError::Oracle(_)));
    }
}
