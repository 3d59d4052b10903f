//! Defines the inner representation
//! of the Decision Tree class.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::sample::Instance;
use super::split_rule::*;


/// Index of a node in the arena of a [`DecisionTree`](super::DecisionTree).
/// This is just a wrapper for `usize`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);


impl NodeId {
    /// Returns the position of the node in the arena.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}


/// A node of the decision tree.
/// The tree owns every node; `parent` is a plain index,
/// so children never own their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) rule: Rule,

    // Branch key of the parent partition this node was grown from.
    pub(crate) condition: Option<String>,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,

    // Correct/wrong predictions of the current evaluation pass.
    pub(crate) num_correct: usize,
    pub(crate) num_wrong: usize,

    // Number of training instances this node was grown from.
    pub(crate) n_train: usize,
}


impl Node {
    /// Construct a childless node from the given components.
    #[inline]
    pub(crate) fn from_raw(
        rule: Rule,
        condition: Option<String>,
        parent: Option<NodeId>,
        n_train: usize,
    ) -> Self
    {
        Self {
            rule,
            condition,
            parent,
            children: Vec::new(),
            num_correct: 0,
            num_wrong: 0,
            n_train,
        }
    }


    /// Returns the rule of this node.
    #[inline]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }


    /// Returns the inbound branch condition.
    /// The root has none.
    #[inline]
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }


    /// Returns the parent of this node.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }


    /// Returns the children of this node in partition order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children[..]
    }


    /// Returns `true` if this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.rule.is_leaf()
    }


    /// Returns the number of correct predictions in the current pass.
    #[inline]
    pub fn num_correct(&self) -> usize {
        self.num_correct
    }


    /// Returns the number of wrong predictions in the current pass.
    #[inline]
    pub fn num_wrong(&self) -> usize {
        self.num_wrong
    }


    /// Returns the number of training instances this node was grown from.
    #[inline]
    pub fn n_train(&self) -> usize {
        self.n_train
    }


    /// Returns the instances that reached this leaf in the current pass.
    /// Splitters return an empty slice.
    #[inline]
    pub fn instances(&self) -> &[Instance] {
        match &self.rule {
            Rule::Prediction(rule) => rule.instances(),
            _ => &[],
        }
    }


    /// Returns the predicted label if this node is a leaf.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        match &self.rule {
            Rule::Prediction(rule) => Some(rule.label()),
            _ => None,
        }
    }


    /// Record `instance` reaching this leaf:
    /// update the counters, keep the instance and return the label.
    /// Returns `None` on a splitter.
    pub(crate) fn record(&mut self, instance: &Instance) -> Option<String> {
        let Rule::Prediction(rule) = &mut self.rule else {
            return None;
        };

        if rule.classify(instance) {
            self.num_correct += 1;
        } else {
            self.num_wrong += 1;
        }
        rule.add_instance(instance.clone());
        Some(rule.label.clone())
    }


    /// Zero the counters and forget the instances of the last pass.
    #[inline]
    pub(crate) fn reset(&mut self) {
        self.num_correct = 0;
        self.num_wrong = 0;
        if let Rule::Prediction(rule) = &mut self.rule {
            rule.clear_instances();
        }
    }
}


/// One line of the tree rendering,
/// e.g., `Condition: Sunny, Choose: No (3/0)`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(condition) = &self.condition {
            write!(f, "Condition: {condition}, ")?;
        }
        match &self.rule {
            Rule::Prediction(rule) => {
                write!(f, "{rule} ({}/{})", self.num_correct, self.num_wrong)
            },
            rule => write!(f, "{rule}"),
        }
    }
}
