//! The recursive C4.5 growing procedure.
use tracing::{debug, trace};

use crate::error::{C45Error, Result};
use crate::sample::{
    Attribute,
    AttributeKind,
    Instance,
    unanimous_class,
    majority_class,
};
use super::{
    information_gain::*,
    node::*,
    split_rule::*,
    dtree::DecisionTree,
};


/// The attribute chosen for splitting and, if it is numeric,
/// the threshold that achieved its gain ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedAttribute<'a> {
    /// The chosen attribute.
    pub attribute: &'a Attribute,
    /// The threshold for a numeric attribute, `0` otherwise.
    pub split_value: f64,
    /// The gain ratio of the chosen split.
    pub gain_ratio: f64,
}


/// Returns the attribute with the highest gain ratio on `instances`,
/// or `None` if no attribute has a positive gain ratio.
///
/// Attributes are scanned in order and only a strictly higher
/// ratio replaces the current best,
/// so ties go to the attribute listed first.
pub fn choose_split_attribute<'a>(
    instances: &[Instance],
    attributes: &'a [Attribute],
    target: &Attribute,
) -> Result<Option<SelectedAttribute<'a>>>
{
    if instances.is_empty() || attributes.is_empty() {
        return Err(C45Error::invariant(
            "split selection needs non-empty instance and attribute lists"
        ));
    }

    let mut best: Option<SelectedAttribute<'a>> = None;
    for attribute in attributes {
        let (gain_ratio, split_value) = match attribute.kind() {
            AttributeKind::Categorical => {
                let ratio = categorical_information_gain_ratio(
                    instances, attribute, target
                );
                (ratio, 0.0)
            },
            AttributeKind::Numeric => {
                let gain = numeric_information_gain_ratio(
                    instances, attribute, target
                );
                (gain.max_gain, gain.split_value)
            },
        };
        trace!(attribute = attribute.name(), gain_ratio, "candidate split");

        if gain_ratio > best.map_or(0.0, |b| b.gain_ratio) {
            best = Some(SelectedAttribute { attribute, split_value, gain_ratio });
        }
    }
    Ok(best)
}


/// Grows a tree node by node into an arena.
pub(crate) struct TreeGrower<'a> {
    attributes: &'a [Attribute],
    target: &'a Attribute,
    nodes: Vec<Node>,
}


impl<'a> TreeGrower<'a> {
    #[inline]
    pub(crate) fn new(attributes: &'a [Attribute], target: &'a Attribute)
        -> Self
    {
        Self { attributes, target, nodes: Vec::new() }
    }


    /// Grow the full tree for `instances`.
    pub(crate) fn grow(mut self, instances: &[Instance])
        -> Result<DecisionTree>
    {
        if instances.is_empty() {
            return Err(C45Error::invariant(
                "cannot grow a tree from an empty training set"
            ));
        }

        self.build(instances.to_vec(), None, None)?;
        Ok(DecisionTree::from_raw(self.nodes, self.target))
    }


    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent) = node.parent {
            self.nodes[parent.0].children.push(id);
        }
        self.nodes.push(node);
        id
    }


    /// A leaf starts with an empty instance list;
    /// only evaluation passes record instances on it.
    fn leaf(
        &mut self,
        label: String,
        n_train: usize,
        parent: Option<NodeId>,
        condition: Option<String>,
    ) -> Result<NodeId>
    {
        let rule = PredictionRule::new(self.target, label, Vec::new())?;
        let node = Node::from_raw(
            Rule::Prediction(rule), condition, parent, n_train
        );
        Ok(self.push(node))
    }


    /// One recursive step.
    /// Returns `None` if `instances` is empty,
    /// in which case no node materializes for this branch.
    fn build(
        &mut self,
        instances: Vec<Instance>,
        parent: Option<NodeId>,
        condition: Option<String>,
    ) -> Result<Option<NodeId>>
    {
        // Base zero: nothing reaches this branch.
        if instances.is_empty() {
            return Ok(None);
        }


        // Base one: every instance has the same class.
        if let Some(label) = unanimous_class(&instances, self.target) {
            return self.leaf(label, instances.len(), parent, condition).map(Some);
        }


        let target = self.target;
        let selected = choose_split_attribute(
            &instances, self.attributes, target
        )?;


        // Base two: no attribute has positive gain.
        let Some(selected) = selected else {
            let label = majority_class(&instances, target)
                .ok_or_else(|| C45Error::invariant(
                    "no instance carries a label of the target domain"
                ))?;
            return self.leaf(label, instances.len(), parent, condition).map(Some);
        };


        let rule = match selected.attribute.kind() {
            AttributeKind::Categorical => {
                Rule::Categorical(CategoricalRule::new(selected.attribute))
            },
            AttributeKind::Numeric => {
                let rule = NumericRule::new(
                    selected.attribute, selected.split_value
                );
                Rule::Numeric(rule)
            },
        };
        debug!(
            rule = %rule,
            gain_ratio = selected.gain_ratio,
            n_instance = instances.len(),
            "split"
        );


        let branches = rule.split(&instances)
            .ok_or_else(|| C45Error::invariant("a splitter must partition"))?;
        let node = Node::from_raw(rule, condition, parent, instances.len());
        let id = self.push(node);


        // Recurse on every non-empty partition, in partition order.
        for (key, sublist) in branches {
            if sublist.is_empty() { continue; }
            self.build(sublist, Some(id), Some(key))?;
        }

        Ok(Some(id))
    }
}


/// Grow a decision tree for `instances` with the C4.5 algorithm.
///
/// `attributes` must not contain `target`.
pub fn grow_tree(
    instances: &[Instance],
    attributes: &[Attribute],
    target: &Attribute,
) -> Result<DecisionTree>
{
    TreeGrower::new(attributes, target).grow(instances)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grown_leaves_hold_no_instances() {
        let instances = [("a", "yes"), ("a", "yes"), ("b", "no")]
            .into_iter()
            .enumerate()
            .map(|(i, (x, y))| Instance::new(i, [("x", x), ("y", y)]))
            .collect::<Vec<_>>();
        let mut x = Attribute::new("x", AttributeKind::Categorical);
        let mut y = Attribute::new("y", AttributeKind::Categorical);
        x.observe(&instances);
        y.observe(&instances);

        let mut tree = grow_tree(&instances, &[x], &y).unwrap();
        let root = tree.root();
        for id in tree.descendants(root) {
            let node = tree.node(id);
            assert!(node.instances().is_empty());
            assert_eq!(node.num_correct() + node.num_wrong(), 0);
        }
        assert_eq!(tree.node(tree.node(root).children()[0]).n_train(), 2);

        tree.test(&instances).unwrap();
        let routed = tree.descendants(root)
            .into_iter()
            .map(|id| tree.node(id).instances().len())
            .sum::<usize>();
        assert_eq!(routed, instances.len());
    }
}
