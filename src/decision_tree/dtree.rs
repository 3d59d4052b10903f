//! Defines the decision tree and its evaluation passes.
use serde::{Serialize, Deserialize};
use tracing::debug;

use std::fmt;
use std::path::Path;
use std::fs::File;
use std::io::prelude::*;

use crate::error::{C45Error, Result};
use crate::sample::{Attribute, Instance};
use super::{
    node::*,
    split_rule::*,
};


/// The marker repeated once per depth level in the tree rendering.
pub const DEPTH_MARKER: &str = "------";


/// What to do when a categorical splitter meets a value
/// none of the training instances at that node carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnseenCategory {
    /// Fail with [`C45Error::UnseenCategory`].
    #[default]
    Reject,
    /// Descend into the child grown from the most training instances.
    /// Ties go to the first such child.
    MajorityBranch,
}


impl fmt::Display for UnseenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reject => "Reject",
            Self::MajorityBranch => "Majority branch",
        };

        write!(f, "{name}")
    }
}


/// A prediction made during [`DecisionTree::test`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// The classified instance.
    pub instance: Instance,
    /// The label the tree chose.
    pub predicted: String,
    /// The actual target value of the instance.
    pub actual: String,
}


impl TestResult {
    /// Returns `true` if the prediction is correct.
    #[inline]
    pub fn is_correct(&self) -> bool {
        self.predicted == self.actual
    }
}


/// Decision tree classifier.
/// Nodes live in an arena; the root is always the node at `root`.
///
/// Each evaluation pass accumulates per-node counters and
/// per-leaf instance lists. Call [`DecisionTree::reset`]
/// before starting a new pass over the same tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) target: Attribute,
    pub(crate) unseen_category: UnseenCategory,
}


impl DecisionTree {
    /// Construct a tree from an arena whose root is its first node.
    #[inline]
    pub(crate) fn from_raw(nodes: Vec<Node>, target: &Attribute) -> Self {
        Self {
            nodes,
            root: NodeId(0),
            target: target.clone(),
            unseen_category: UnseenCategory::default(),
        }
    }


    /// Set the policy for categorical values unseen during training.
    #[inline]
    pub fn unseen_category(mut self, policy: UnseenCategory) -> Self {
        self.unseen_category = policy;
        self
    }


    /// Returns the root node id.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }


    /// Returns the node of the given id.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }


    /// Returns the target attribute.
    #[inline]
    pub fn target(&self) -> &Attribute {
        &self.target
    }


    /// Returns the nodes of the subtree rooted at `id`, in pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }


    /// Returns every reachable node in post-order
    /// (children left to right, then the parent).
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![(self.root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            let children = self.nodes[id.0].children.iter().rev();
            stack.extend(children.map(|&child| (child, false)));
        }
        order
    }


    /// Returns the number of reachable nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.descendants(self.root).len()
    }


    /// Returns the number of reachable leaves.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.descendants(self.root)
            .into_iter()
            .filter(|&id| self.nodes[id.0].is_leaf())
            .count()
    }


    /// Returns the number of levels; a single leaf has height `1`.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self.root, 1_usize)];
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            let children = self.nodes[id.0].children.iter();
            stack.extend(children.map(|&child| (child, depth + 1)));
        }
        height
    }


    /// Route `instance` from the root to a leaf and return its label.
    /// The leaf records the instance and whether the label
    /// matches the instance's actual target value.
    pub fn classify(&mut self, instance: &Instance) -> Result<String> {
        let mut id = self.root;
        loop {
            let node = &self.nodes[id.0];
            id = match &node.rule {
                Rule::Prediction(_) => break,
                Rule::Numeric(rule) => {
                    let index = rule.branch_index(instance);
                    *node.children.get(index)
                        .ok_or_else(|| C45Error::MissingBranch {
                            attribute: rule.attribute.name().to_string(),
                            index,
                        })?
                },
                Rule::Categorical(rule) => {
                    let name = rule.attribute.name();
                    let value = instance.value(name).unwrap_or_default();
                    self.categorical_child(node, name, value)?
                },
            };
        }

        self.nodes[id.0].record(instance)
            .ok_or_else(|| C45Error::invariant("classification ended on a splitter"))
    }


    fn categorical_child(&self, node: &Node, name: &str, value: &str)
        -> Result<NodeId>
    {
        let found = node.children.iter()
            .copied()
            .find(|&child| self.nodes[child.0].condition() == Some(value));
        if let Some(child) = found {
            return Ok(child);
        }

        match self.unseen_category {
            UnseenCategory::Reject => Err(C45Error::UnseenCategory {
                attribute: name.to_string(),
                value: value.to_string(),
            }),
            UnseenCategory::MajorityBranch => {
                let mut best: Option<NodeId> = None;
                for &child in &node.children {
                    let n = self.nodes[child.0].n_train;
                    if best.map_or(true, |b| n > self.nodes[b.0].n_train) {
                        best = Some(child);
                    }
                }
                debug!(attribute = name, value, "unseen category, majority branch");
                best.ok_or_else(|| C45Error::invariant("splitter without children"))
            },
        }
    }


    /// Classify every instance and collect the predictions.
    /// Counters keep accumulating; see [`DecisionTree::report`].
    pub fn test(&mut self, instances: &[Instance]) -> Result<Vec<TestResult>> {
        let name = self.target.name().to_string();
        instances.iter()
            .map(|instance| {
                let predicted = self.classify(instance)?;
                let actual = instance.value(&name)
                    .unwrap_or_default()
                    .to_string();
                Ok(TestResult { instance: instance.clone(), predicted, actual })
            })
            .collect()
    }


    /// Returns the total number of correct predictions
    /// recorded on the nodes since the last reset.
    #[inline]
    pub fn report(&self) -> usize {
        self.descendants(self.root)
            .into_iter()
            .map(|id| self.nodes[id.0].num_correct)
            .sum::<usize>()
    }


    /// Returns the number of correct predictions recorded
    /// in the subtree rooted at `id`.
    #[inline]
    pub fn subtree_correct(&self, id: NodeId) -> usize {
        self.descendants(id)
            .into_iter()
            .map(|id| self.nodes[id.0].num_correct)
            .sum::<usize>()
    }


    /// Zero every counter and clear every leaf instance list.
    #[inline]
    pub fn reset(&mut self) {
        self.nodes.iter_mut().for_each(Node::reset);
    }


    /// Classify `instances` from a clean state and
    /// return the fraction classified correctly.
    /// An empty list has accuracy `0`.
    pub fn accuracy(&mut self, instances: &[Instance]) -> Result<f64> {
        self.reset();
        self.test(instances)?;
        if instances.is_empty() { return Ok(0.0); }
        Ok(self.report() as f64 / instances.len() as f64)
    }


    /// Drop the nodes that are no longer reachable from the root
    /// and renumber the rest in pre-order.
    pub(crate) fn compact(&mut self) {
        let order = self.descendants(self.root);
        let mut new_id = vec![None; self.nodes.len()];
        for (i, id) in order.iter().enumerate() {
            new_id[id.0] = Some(NodeId(i));
        }

        let remap = |id: &NodeId| new_id[id.0];
        let nodes = order.iter()
            .map(|id| {
                let mut node = self.nodes[id.0].clone();
                node.parent = node.parent.as_ref().and_then(remap);
                node.children = node.children.iter()
                    .filter_map(remap)
                    .collect();
                node
            })
            .collect::<Vec<_>>();

        self.nodes = nodes;
        self.root = NodeId(0);
    }


    /// Write the current decision tree to dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> std::io::Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(self.to_dot().as_bytes())?;
        Ok(())
    }


    /// Returns the Graphviz representation of this tree.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("graph DecisionTree {\n");
        for id in self.descendants(self.root) {
            let node = &self.nodes[id.0];
            let info = match &node.rule {
                Rule::Prediction(rule) => format!(
                    "\tnode_{i} [ label = \"{l}\", shape = box, ];\n",
                    i = id.0,
                    l = rule.label(),
                ),
                Rule::Categorical(rule) => format!(
                    "\tnode_{i} [ label = \"{a} ?\" ];\n",
                    i = id.0,
                    a = rule.attribute.name(),
                ),
                Rule::Numeric(rule) => format!(
                    "\tnode_{i} [ label = \"{a} <= {t} ?\" ];\n",
                    i = id.0,
                    a = rule.attribute.name(),
                    t = rule.threshold,
                ),
            };
            dot.push_str(&info);

            for child in &node.children {
                let condition = self.nodes[child.0].condition()
                    .unwrap_or_default();
                let edge = format!(
                    "\tnode_{i} -- node_{c} [ label = \"{condition}\" ];\n",
                    i = id.0,
                    c = child.0,
                );
                dot.push_str(&edge);
            }
        }
        dot.push('}');
        dot
    }
}


/// Renders one line per node, prefixed by [`DEPTH_MARKER`]
/// repeated once per depth level.
impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root, 0_usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id.0];
            writeln!(f, "{}{node}", DEPTH_MARKER.repeat(depth))?;
            let children = node.children.iter().rev();
            stack.extend(children.map(|&child| (child, depth + 1)));
        }
        Ok(())
    }
}
