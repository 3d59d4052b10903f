//! Defines `C45Config` and the builder of `C45`.
use serde::{Serialize, Deserialize};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;
use crate::common::checker;
use crate::sample::Dataset;
use super::{
    c45::C45,
    dtree::UnseenCategory,
    pruning::{
        Pruner,
        DEFAULT_Z_VALUE,
        DEFAULT_MIN_INSTANCES_PER_LEAF,
    },
};


/// The hyperparameters of [`C45`].
///
/// Every field has a default, so a JSON file only needs
/// the fields it overrides:
/// ```json
/// { "use_min_instance_pruning": true, "min_instances_per_leaf": 3 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct C45Config {
    /// Run the minimum-instances-per-leaf pruning phase.
    pub use_min_instance_pruning: bool,
    /// Leaves reached by fewer training instances are pruned
    /// when `use_min_instance_pruning` is set.
    pub min_instances_per_leaf: usize,
    /// The z-value of the pessimistic error estimate.
    pub z_value: f64,
    /// What to do with categorical values unseen during training.
    pub unseen_category: UnseenCategory,
}


impl Default for C45Config {
    fn default() -> Self {
        Self {
            use_min_instance_pruning: false,
            min_instances_per_leaf: DEFAULT_MIN_INSTANCES_PER_LEAF,
            z_value: DEFAULT_Z_VALUE,
            unseen_category: UnseenCategory::default(),
        }
    }
}


impl C45Config {
    /// Read a configuration from a JSON file.
    /// The values are validated before returning.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }


    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        checker::check_z_value(self.z_value)?;
        checker::check_min_instances(self.min_instances_per_leaf)?;
        Ok(())
    }


    /// Returns the [`Pruner`] this configuration describes.
    pub fn pruner(&self) -> Pruner {
        let pruner = Pruner::new().z_value(self.z_value);
        if self.use_min_instance_pruning {
            pruner.min_instance_pruning(self.min_instances_per_leaf)
        } else {
            pruner
        }
    }
}


/// A struct that builds [`C45`].
///
/// # Example
///
/// ```no_run
/// use c45tree::prelude::*;
///
/// let dataset = DatasetReader::new()
///     .file("tests/dataset/tennis.csv")
///     .schema("tests/dataset/tennis-schema.json")
///     .read()
///     .unwrap();
///
/// let mut c45 = C45Builder::new(dataset)
///     .z_value(0.69)
///     .min_instance_pruning(true)
///     .min_instances_per_leaf(2)
///     .build()
///     .unwrap();
/// c45.train().unwrap();
/// ```
pub struct C45Builder {
    dataset: Dataset,
    config: C45Config,
}


impl C45Builder {
    /// Construct a new instance of [`C45Builder`].
    /// By default, [`C45Builder`] sets the parameters as follows;
    /// ```text
    /// use_min_instance_pruning: false,
    /// min_instances_per_leaf: DEFAULT_MIN_INSTANCES_PER_LEAF == 2,
    /// z_value: DEFAULT_Z_VALUE == 0.69,
    /// unseen_category: UnseenCategory::Reject,
    /// ```
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset, config: C45Config::default(), }
    }


    /// Set the z-value of the confidence bound used by pruning.
    #[inline]
    pub fn z_value(mut self, z: f64) -> Self {
        self.config.z_value = z;
        self
    }


    /// Enable or disable the minimum-instances-per-leaf pruning phase.
    #[inline]
    pub fn min_instance_pruning(mut self, flag: bool) -> Self {
        self.config.use_min_instance_pruning = flag;
        self
    }


    /// Set the minimal number of training instances per leaf.
    /// Only used when min-instance pruning is enabled.
    #[inline]
    pub fn min_instances_per_leaf(mut self, min_instances: usize) -> Self {
        self.config.min_instances_per_leaf = min_instances;
        self
    }


    /// Set the policy for categorical values unseen during training.
    #[inline]
    pub fn unseen_category(mut self, policy: UnseenCategory) -> Self {
        self.config.unseen_category = policy;
        self
    }


    /// Replace the whole configuration.
    #[inline]
    pub fn config(mut self, config: C45Config) -> Self {
        self.config = config;
        self
    }


    /// Build a [`C45`].
    /// Fails if a configuration value is out of range.
    pub fn build(self) -> Result<C45> {
        self.config.validate()?;
        Ok(C45::from_components(self.dataset, self.config))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::C45Error;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "use_min_instance_pruning": true }"#;
        let config: C45Config = serde_json::from_str(json).unwrap();
        assert!(config.use_min_instance_pruning);
        assert_eq!(config.min_instances_per_leaf, 2);
        assert_eq!(config.z_value, 0.69);
        assert_eq!(config.unseen_category, UnseenCategory::Reject);
    }

    #[test]
    fn unseen_category_is_snake_case() {
        let json = r#"{ "unseen_category": "majority_branch" }"#;
        let config: C45Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.unseen_category, UnseenCategory::MajorityBranch);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let config = C45Config { z_value: -1.0, ..C45Config::default() };
        assert!(matches!(config.validate(), Err(C45Error::InvalidConfig(_))));

        let config = C45Config {
            min_instances_per_leaf: 0,
            ..C45Config::default()
        };
        assert!(matches!(config.validate(), Err(C45Error::InvalidConfig(_))));
    }
}
