//! Defines the error type shared by every part of this crate.
use thiserror::Error;

use std::io;


/// Errors returned while loading data, growing, pruning,
/// or evaluating a decision tree.
#[derive(Debug, Error)]
pub enum C45Error {
    /// A precondition the algorithm relies on does not hold.
    /// Reaching this variant means a caller broke a contract,
    /// e.g., asked for the best split of an empty instance list.
    #[error("invariant violated: {0}")]
    InvariantViolated(String),


    /// A categorical value that no training instance carried
    /// at this point of the tree.
    #[error("unseen value `{value}` for categorical attribute `{attribute}`")]
    UnseenCategory {
        /// The splitting attribute.
        attribute: String,
        /// The value of the classified instance.
        value: String,
    },


    /// A numeric splitter does not own the branch
    /// selected by its threshold test.
    #[error("numeric attribute `{attribute}` has no branch `{index}`")]
    MissingBranch {
        /// The splitting attribute.
        attribute: String,
        /// The selected branch index.
        index: usize,
    },


    /// A leaf label that the target attribute never takes.
    #[error("label `{label}` is not in the domain of `{target}`")]
    LabelNotInDomain {
        /// The rejected label.
        label: String,
        /// The target attribute.
        target: String,
    },


    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),


    /// The input data is malformed.
    #[error("dataset error: {0}")]
    Dataset(String),


    /// I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),


    /// Malformed JSON schema or configuration.
    #[error(transparent)]
    Json(#[from] serde_json::Error),


    /// Failure while reading a `polars::DataFrame`.
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}


impl C45Error {
    #[inline]
    pub(crate) fn invariant<S: ToString>(message: S) -> Self {
        Self::InvariantViolated(message.to_string())
    }


    #[inline]
    pub(crate) fn dataset<S: ToString>(message: S) -> Self {
        Self::Dataset(message.to_string())
    }


    #[inline]
    pub(crate) fn config<S: ToString>(message: S) -> Self {
        Self::InvalidConfig(message.to_string())
    }
}


/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, C45Error>;
