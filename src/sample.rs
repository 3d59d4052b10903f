//! The attribute/instance model the learner consumes,
//! and the readers that build it from files.

// Provides the attribute descriptor.
pub(crate) mod attribute;
// Provides a single row.
pub(crate) mod instance;
// Provides the JSON schema.
pub(crate) mod schema;
// Provides the dataset struct.
pub(crate) mod dataset;

// Provides a struct that reads files.
pub(crate) mod dataset_reader;


pub use attribute::{Attribute, AttributeKind};
pub use instance::{Instance, sort_by_attribute};
pub use schema::{Schema, AttributeSchema};
pub use dataset::{Dataset, unanimous_class, majority_class};
pub use dataset_reader::{
    DatasetReader,
    DEFAULT_PERCENTAGE_SPLIT,
    DEFAULT_SEED,
};
