//! Gradient-boosted tree ensemble loaded from an XGBoost JSON dump.
//!
//! The artifact is a single JSON object:
//!
//! ```text
//! {
//!   "objective": "binary:logistic",
//!   "base_score": 0.5,
//!   "feature_names": ["loan_limit", "Gender", ...],
//!   "trees": [<tree>, ...]
//! }
//! ```
//!
//! Each `<tree>` is one element of `Booster.get_dump(dump_format="json")`:
//! split nodes carry `nodeid`, `split`, `split_condition`, `yes`, `no`,
//! `missing` and `children`; leaves carry `nodeid` and `leaf`.
//!
//! A sample goes to `yes` when `value < split_condition`, compared in `f32`
//! like XGBoost does, and to `missing` when the value is NaN. The class is 1
//! when `sigmoid(logit(base_score) + Σ leaf) > 0.5`.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::classifier::{Classifier, ClassifierError};

#[derive(Deserialize)]
struct EnsembleDump {
    #[serde(default)]
    objective: Option<String>,
    #[serde(default = "default_base_score")]
    base_score: f64,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    #[serde(default)]
    num_feature: Option<usize>,
    trees: Vec<DumpNode>,
}

fn default_base_score() -> f64 {
    0.5
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DumpNode {
    Split {
        nodeid: u32,
        split: String,
        split_condition: f64,
        yes: u32,
        no: u32,
        missing: u32,
        children: Vec<DumpNode>,
    },
    Leaf {
        nodeid: u32,
        leaf: f64,
    },
}

impl DumpNode {
    fn nodeid(&self) -> u32 {
        match self {
            Self::Split { nodeid, .. } | Self::Leaf { nodeid, .. } => *nodeid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
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

/// Flattened tree in pre-order: the root is at 0 and every child sits at a
/// higher index than its parent.
#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn leaf_value(&self, features: &[f64]) -> f64 {
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
                    let value = features[feature];
                    idx = if value.is_nan() {
                        missing
                    } else if (value as f32) < threshold {
                        yes
                    } else {
                        no
                    };
                }
            }
        }
    }
}

/// Binary-logistic tree ensemble.
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    trees: Vec<Tree>,
    base_margin: f64,
    n_features: usize,
    feature_names: Option<Vec<String>>,
}

impl TreeEnsemble {
    /// Parse an ensemble from its JSON dump.
    pub fn from_json(json: &str) -> Result<Self, ClassifierError> {
        let dump: EnsembleDump = serde_json::from_str(json)?;

        let base_margin = match dump.objective.as_deref() {
            None | Some("binary:logistic") => {
                if !(dump.base_score > 0.0 && dump.base_score < 1.0) {
                    return Err(ClassifierError::Malformed(format!(
                        "base_score {} outside (0, 1)",
                        dump.base_score
                    )));
                }
                logit(dump.base_score)
            }
            // Raw margin objective: base_score is already a margin.
            Some("binary:logitraw") => dump.base_score,
            Some(other) => {
                return Err(ClassifierError::UnsupportedFormat(format!(
                    "objective {other:?}, expected binary:logistic"
                )));
            }
        };

        let n_features = match (&dump.feature_names, dump.num_feature) {
            (Some(names), Some(n)) if names.len() != n => {
                return Err(ClassifierError::Malformed(format!(
                    "{} feature names but num_feature is {n}",
                    names.len()
                )));
            }
            (Some(names), _) => names.len(),
            (None, Some(n)) => n,
            (None, None) => {
                return Err(ClassifierError::Malformed(
                    "either feature_names or num_feature is required".into(),
                ));
            }
        };

        if dump.trees.is_empty() {
            return Err(ClassifierError::Malformed("ensemble has no trees".into()));
        }

        let names = dump.feature_names.as_deref();
        let resolve = |split: &str| resolve_feature(split, names, n_features);
        let trees = dump
            .trees
            .iter()
            .map(|root| -> Result<Tree, ClassifierError> {
                let mut nodes = Vec::new();
                flatten(root, &resolve, &mut nodes)?;
                Ok(Tree { nodes })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            trees,
            base_margin,
            n_features,
            feature_names: dump.feature_names,
        })
    }

    /// Load an ensemble from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let json = std::fs::read_to_string(path)?;
        let model = Self::from_json(&json)?;
        info!(
            trees = model.tree_count(),
            features = model.n_features,
            model = %path.display(),
            "loaded tree ensemble"
        );
        Ok(model)
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Raw additive score before the logistic transform.
    pub fn margin(&self, features: &[f64]) -> Result<f64, ClassifierError> {
        if features.len() != self.n_features {
            return Err(ClassifierError::InputShape {
                expected: self.n_features,
                found: features.len(),
            });
        }
        let sum: f64 = self.trees.iter().map(|t| t.leaf_value(features)).sum();
        Ok(self.base_margin + sum)
    }
}

impl Classifier for TreeEnsemble {
    fn kind(&self) -> &'static str {
        "tree-ensemble"
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn predict(&self, features: &[f64]) -> Result<i64, ClassifierError> {
        // sigmoid(m) > 0.5 exactly when m > 0.
        let margin = self.margin(features)?;
        Ok(i64::from(margin > 0.0))
    }
}

/// Append `node` and its subtree to `nodes` in pre-order, returning its index.
fn flatten(
    node: &DumpNode,
    resolve: &dyn Fn(&str) -> Result<usize, ClassifierError>,
    nodes: &mut Vec<Node>,
) -> Result<usize, ClassifierError> {
    let idx = nodes.len();
    match node {
        DumpNode::Leaf { leaf, .. } => nodes.push(Node::Leaf(*leaf)),
        DumpNode::Split {
            nodeid,
            split,
            split_condition,
            yes,
            no,
            missing,
            children,
        } => {
            // Reserve the slot; filled in once the children have indices.
            nodes.push(Node::Leaf(0.0));

            let mut child_index = HashMap::with_capacity(children.len());
            for child in children {
                let child_idx = flatten(child, resolve, nodes)?;
                child_index.insert(child.nodeid(), child_idx);
            }

            let target = |id: u32| {
                child_index.get(&id).copied().ok_or_else(|| {
                    ClassifierError::Malformed(format!(
                        "node {nodeid} branches to {id}, which is not one of its children"
                    ))
                })
            };

            nodes[idx] = Node::Split {
                feature: resolve(split.as_str())?,
                threshold: *split_condition as f32,
                yes: target(*yes)?,
                no: target(*no)?,
                missing: target(*missing)?,
            };
        }
    }
    Ok(idx)
}

/// Resolve a split feature by name, falling back to XGBoost's `f<index>`.
fn resolve_feature(
    split: &str,
    names: Option<&[String]>,
    n_features: usize,
) -> Result<usize, ClassifierError> {
    let idx = names
        .and_then(|names| names.iter().position(|n| n == split))
        .or_else(|| split.strip_prefix('f').and_then(|d| d.parse::<usize>().ok()));
    match idx {
        Some(i) if i < n_features => Ok(i),
        _ => Err(ClassifierError::Malformed(format!(
            "unknown split feature {split:?}"
        ))),
    }
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}
