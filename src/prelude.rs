//! Exports the learner, the dataset readers and the research tools.
//! 
pub use crate::error::C45Error;


pub use crate::sample::{
    // Data model ---------------------------
    Attribute,
    AttributeKind,
    Instance,


    // Readers ------------------------------
    Schema,
    AttributeSchema,
    Dataset,
    DatasetReader,
    DEFAULT_PERCENTAGE_SPLIT,
    DEFAULT_SEED,
};


pub use crate::decision_tree::{
    // Learner ------------------------------
    C45,
    C45Builder,
    C45Config,


    // Tree ---------------------------------
    DecisionTree,
    Node,
    NodeId,
    Rule,
    TestResult,
    UnseenCategory,


    // Pruning ------------------------------
    Pruner,
};


pub use crate::research::{
    Trials,
    TrialSummary,
    Report,
};
