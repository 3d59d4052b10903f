//! The C4.5 learner: split criteria, tree growing, pruning
//! and evaluation.

/// Shannon entropy of attribute and target distributions.
pub mod entropy;
/// Information gain and gain ratio of a split.
pub mod information_gain;
/// Defines the rules a node carries.
pub mod split_rule;
/// Defines the decision tree classifier.
pub mod dtree;
/// Defines the C4.5 learner.
pub mod c45;
/// Defines the builder of `C45`.
pub mod builder;
/// Confidence-bound and minimum-instance pruning.
pub mod pruning;

/// Defines the inner representation of `DecisionTree`.
mod node;
mod c45_algorithm;


pub use entropy::{
    log2_or_zero,
    attribute_entropy,
    categorical_entropy,
    numeric_entropy,
};
pub use information_gain::{
    Gain,
    categorical_information_gain,
    categorical_information_gain_ratio,
    numeric_information_gain,
    numeric_information_gain_ratio,
};
pub use split_rule::{
    Branches,
    Rule,
    CategoricalRule,
    NumericRule,
    PredictionRule,
};
pub use node::{Node, NodeId};
pub use dtree::{
    DecisionTree,
    TestResult,
    UnseenCategory,
    DEPTH_MARKER,
};
pub use c45_algorithm::{
    SelectedAttribute,
    choose_split_attribute,
    grow_tree,
};
pub use pruning::{
    Pruner,
    confidence_interval,
    DEFAULT_Z_VALUE,
    DEFAULT_MIN_INSTANCES_PER_LEAF,
};
pub use builder::{C45Builder, C45Config};
pub use c45::C45;
