//! Functions shared by the learner and its collaborators.

/// Range checks run before any training begins.
pub mod checker;
