#![warn(missing_docs)]

//! 
//! A crate that provides the C4.5 decision tree learner.
//! 
//! Given a dataset of instances described by categorical and
//! numeric attributes, `C45` grows a decision tree that
//! maximizes the information gain ratio at every split,
//! then prunes it to improve generalization.
//! 
//! - Growing
//!     Every node splits on the attribute with the highest gain ratio.
//!     A categorical attribute gets one branch per value,
//!     a numeric attribute gets two branches around the best threshold.
//! 
//! 
//! - Pruning
//!     A subtree is replaced by a single leaf when the pessimistic
//!     error estimate of the leaf is no worse than the subtree's.
//!     Optionally, splitters owning a leaf reached by too few
//!     training instances are collapsed as well.
//! 
//! 
//! # Example
//! ```no_run
//! use c45tree::prelude::*;
//! 
//! let dataset = DatasetReader::new()
//!     .file("tests/dataset/tennis.csv")
//!     .schema("tests/dataset/tennis-schema.json")
//!     .percentage_split(66.0)
//!     .read()
//!     .unwrap();
//! 
//! let mut c45 = C45Builder::new(dataset)
//!     .z_value(0.69)
//!     .build()
//!     .unwrap();
//! c45.train().unwrap();
//! c45.prune().unwrap();
//! c45.test().unwrap();
//! 
//! println!("{}", c45.display_tree());
//! println!("accuracy: {}", c45.accuracy());
//! ```

pub mod error;
pub mod common;
pub mod sample;
pub mod decision_tree;
pub mod research;

pub mod prelude;


pub use error::{C45Error, Result};

pub use sample::{
    Attribute,
    AttributeKind,
    Instance,
    Schema,
    Dataset,
    DatasetReader,
};

pub use decision_tree::{
    C45,
    C45Builder,
    C45Config,
    DecisionTree,
    Pruner,
    Rule,
    TestResult,
    UnseenCategory,
};

pub use research::{Trials, TrialSummary, Report};
