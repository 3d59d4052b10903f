//! Post-pruning of a grown decision tree.
//!
//! Two phases run on a clone of the grown tree:
//! reduced error pruning against a pessimistic confidence bound,
//! then, if enabled, pruning of the splitters
//! that own a leaf reached by too few training instances.
use serde::{Serialize, Deserialize};
use tracing::{info, trace};

use crate::error::{C45Error, Result};
use crate::sample::{Instance, majority_class};
use super::{
    node::*,
    split_rule::*,
    dtree::DecisionTree,
};


/// The default z-value of the confidence bound.
pub const DEFAULT_Z_VALUE: f64 = 0.69;
/// The default minimum number of instances per leaf.
pub const DEFAULT_MIN_INSTANCES_PER_LEAF: usize = 2;


/// Pessimistic error estimate for `n_wrong` errors out of `n` cases:
/// the larger bound of `p ± z * sqrt(p * (1 - p) / n)` with `p = n_wrong / n`.
/// Returns `0` when `n == 0`.
#[inline]
pub fn confidence_interval(n_wrong: usize, n: usize, z: f64) -> f64 {
    if n == 0 { return 0.0; }

    let n = n as f64;
    let p = n_wrong as f64 / n;
    let width = z * (p * (1.0 - p) / n).sqrt();
    (p + width).max(p - width)
}


impl DecisionTree {
    /// Build, without attaching it, the leaf that would replace
    /// the subtree rooted at `id`.
    ///
    /// The leaf gathers every instance recorded by the leaves
    /// of the subtree in the current pass, predicts their majority
    /// label and carries the counters of reclassifying them.
    /// Returns `None` if no instance reached the subtree.
    pub(crate) fn collapsed_leaf(&self, id: NodeId) -> Result<Option<Node>> {
        let union = self.descendants(id)
            .into_iter()
            .flat_map(|id| self.nodes[id.0].instances().iter().cloned())
            .collect::<Vec<Instance>>();

        let Some(label) = majority_class(&union, &self.target) else {
            return Ok(None);
        };

        let node = &self.nodes[id.0];
        let rule = PredictionRule::new(&self.target, label, Vec::new())?;
        let mut leaf = Node::from_raw(
            Rule::Prediction(rule),
            node.condition.clone(),
            node.parent,
            node.n_train,
        );
        for instance in &union {
            leaf.record(instance);
        }
        Ok(Some(leaf))
    }


    /// Put `leaf` in place of the node `id`.
    /// The former descendants stay in the arena, unreachable,
    /// until the next compaction.
    #[inline]
    fn splice(&mut self, id: NodeId, leaf: Node) {
        self.nodes[id.0] = leaf;
    }


    /// Replace the subtree rooted at `id` by its collapsed leaf.
    /// Returns `false` if `id` already is a leaf
    /// or no instance reached it in the current pass.
    pub fn collapse(&mut self, id: NodeId) -> Result<bool> {
        if self.nodes[id.0].is_leaf() {
            return Ok(false);
        }

        match self.collapsed_leaf(id)? {
            Some(leaf) => {
                trace!(node = id.index(), "collapse");
                self.splice(id, leaf);
                Ok(true)
            },
            None => Ok(false),
        }
    }
}


/// Prunes a grown [`DecisionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pruner {
    z_value: f64,
    use_min_instance_pruning: bool,
    min_instances_per_leaf: usize,
}


impl Default for Pruner {
    fn default() -> Self {
        Self {
            z_value: DEFAULT_Z_VALUE,
            use_min_instance_pruning: false,
            min_instances_per_leaf: DEFAULT_MIN_INSTANCES_PER_LEAF,
        }
    }
}


impl Pruner {
    /// Construct a new instance of [`Pruner`]
    /// with reduced error pruning only.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }


    /// Set the z-value of the confidence bound.
    #[inline]
    pub fn z_value(mut self, z: f64) -> Self {
        self.z_value = z;
        self
    }


    /// Enable the minimum-instances-per-leaf phase
    /// with the given minimum.
    #[inline]
    pub fn min_instance_pruning(mut self, min_instances: usize) -> Self {
        self.use_min_instance_pruning = true;
        self.min_instances_per_leaf = min_instances;
        self
    }


    /// Prune a clone of `tree` against the `training` instances
    /// and return it.
    /// `tree` itself is left untouched.
    pub fn prune(&self, tree: &DecisionTree, training: &[Instance])
        -> Result<DecisionTree>
    {
        if training.is_empty() {
            return Err(C45Error::invariant(
                "pruning needs the training instances"
            ));
        }

        let mut pruned = tree.clone();
        let before = pruned.node_count();

        let n_reduced = self.reduced_error_pruning(&mut pruned, training)?;

        let n_min = if self.use_min_instance_pruning {
            self.min_instance_pruning_pass(&mut pruned, training)?
        } else {
            0
        };

        pruned.compact();
        pruned.reset();

        info!(
            before,
            after = pruned.node_count(),
            reduced_error = n_reduced,
            min_instance = n_min,
            "pruned"
        );
        Ok(pruned)
    }


    /// Collapse, bottom-up, every splitter whose children are all leaves
    /// and whose collapsed leaf is estimated no worse than the subtree.
    /// Returns the number of collapses.
    fn reduced_error_pruning(
        &self,
        tree: &mut DecisionTree,
        training: &[Instance],
    ) -> Result<usize>
    {
        tree.reset();
        tree.test(training)?;

        let mut n_collapse = 0;
        for id in tree.post_order() {
            let node = tree.node(id);
            if node.is_leaf() { continue; }
            let all_leaves = node.children()
                .iter()
                .all(|&child| tree.node(child).is_leaf());
            if !all_leaves { continue; }

            let Some(leaf) = tree.collapsed_leaf(id)? else { continue; };

            let total = leaf.num_correct() + leaf.num_wrong();
            let candidate = confidence_interval(
                leaf.num_wrong(), total, self.z_value
            );
            let correct = tree.subtree_correct(id);
            let current = confidence_interval(
                total.saturating_sub(correct), total, self.z_value
            );

            trace!(node = id.index(), candidate, current, "collapse candidate");
            if candidate <= current {
                tree.splice(id, leaf);
                n_collapse += 1;
            }
        }
        Ok(n_collapse)
    }


    /// Repeatedly collapse every splitter owning a leaf
    /// reached by fewer than `min_instances_per_leaf` training instances,
    /// until a full pass collapses nothing.
    /// Returns the number of collapses.
    fn min_instance_pruning_pass(
        &self,
        tree: &mut DecisionTree,
        training: &[Instance],
    ) -> Result<usize>
    {
        let mut n_collapse = 0;
        loop {
            tree.reset();
            tree.test(training)?;

            let mut changed = false;
            for id in tree.post_order() {
                let node = tree.node(id);
                if node.is_leaf() { continue; }
                let sparse = node.children()
                    .iter()
                    .map(|&child| tree.node(child))
                    .any(|child| {
                        child.is_leaf()
                            && child.instances().len()
                                < self.min_instances_per_leaf
                    });
                if sparse && tree.collapse(id)? {
                    n_collapse += 1;
                    changed = true;
                }
            }

            if !changed { break; }
        }
        Ok(n_collapse)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{Attribute, AttributeKind};
    use crate::decision_tree::c45_algorithm::grow_tree;

    fn sample(rows: &[(&str, &str)]) -> (Vec<Instance>, Attribute, Attribute) {
        let instances = rows.iter()
            .enumerate()
            .map(|(i, (x, y))| Instance::new(i, [("x", *x), ("y", *y)]))
            .collect::<Vec<_>>();
        let mut x = Attribute::new("x", AttributeKind::Categorical);
        let mut y = Attribute::new("y", AttributeKind::Categorical);
        x.observe(&instances);
        y.observe(&instances);
        (instances, x, y)
    }

    #[test]
    fn confidence_interval_of_empty_set_is_zero() {
        assert_eq!(confidence_interval(0, 0, 0.69), 0.0);
    }

    #[test]
    fn confidence_interval_takes_the_upper_bound() {
        let bound = confidence_interval(2, 5, 0.69);
        let exp = 0.4 + 0.69 * (0.4 * 0.6 / 5.0_f64).sqrt();
        assert!((bound - exp).abs() < 1e-12);
        assert_eq!(confidence_interval(0, 5, 0.69), 0.0);
    }

    #[test]
    fn collapse_two_children() {
        let (instances, x, y) = sample(&[
            ("a", "yes"), ("a", "yes"), ("b", "no"), ("b", "yes"),
        ]);
        let mut tree = grow_tree(&instances, &[x], &y).unwrap();
        assert_eq!(tree.node_count(), 3);

        tree.test(&instances).unwrap();
        let root = tree.root();
        assert!(tree.collapse(root).unwrap());

        let leaf = tree.node(root);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.label(), Some("yes"));
        assert_eq!(leaf.instances().len(), 4);
        assert_eq!(leaf.num_correct(), 3);
        assert_eq!(leaf.num_wrong(), 1);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn collapse_four_children() {
        let (instances, x, y) = sample(&[
            ("a", "yes"), ("b", "no"), ("c", "yes"), ("d", "yes"),
            ("a", "yes"), ("b", "no"),
        ]);
        let mut tree = grow_tree(&instances, &[x], &y).unwrap();
        assert_eq!(tree.node(tree.root()).children().len(), 4);

        tree.test(&instances).unwrap();
        let root = tree.root();
        assert!(tree.collapse(root).unwrap());

        let leaf = tree.node(root);
        assert_eq!(leaf.label(), Some("yes"));
        assert_eq!(leaf.instances().len(), 6);
        assert_eq!(leaf.num_correct(), 4);
    }

    #[test]
    fn collapse_without_instances_is_refused() {
        let (instances, x, y) = sample(&[("a", "yes"), ("b", "no")]);
        let mut tree = grow_tree(&instances, &[x], &y).unwrap();
        let root = tree.root();
        assert!(!tree.collapse(root).unwrap());
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn pruning_leaves_the_input_untouched() {
        let (instances, x, y) = sample(&[
            ("a", "yes"), ("a", "yes"), ("b", "no"), ("b", "yes"),
        ]);
        let tree = grow_tree(&instances, &[x], &y).unwrap();
        let pruned = Pruner::new().prune(&tree, &instances).unwrap();

        assert_eq!(tree.node_count(), 3);
        assert!(pruned.node_count() <= tree.node_count());
    }

    #[test]
    fn min_instance_pruning_collapses_sparse_leaves() {
        let (instances, x, y) = sample(&[
            ("a", "yes"), ("a", "yes"), ("a", "yes"), ("b", "no"),
        ]);
        let tree = grow_tree(&instances, &[x], &y).unwrap();
        assert_eq!(tree.node_count(), 3);

        let pruned = Pruner::new()
            .min_instance_pruning(2)
            .prune(&tree, &instances)
            .unwrap();
        assert_eq!(pruned.node_count(), 1);
        assert_eq!(pruned.node(pruned.root()).label(), Some("yes"));
    }

    #[test]
    fn reduced_error_pruning_merges_same_label_leaves() {
        let (instances, x, y) = sample(&[
            ("a", "yes"), ("a", "yes"), ("a", "yes"), ("a", "no"), ("b", "yes"),
        ]);
        let tree = grow_tree(&instances, &[x], &y).unwrap();
        assert_eq!(tree.node_count(), 3);

        let pruned = Pruner::new().prune(&tree, &instances).unwrap();
        assert_eq!(pruned.node_count(), 1);
        assert_eq!(pruned.node(pruned.root()).label(), Some("yes"));
        assert_eq!(pruned.to_string(), "Choose: yes (0/0)\n");
    }

    #[test]
    fn reduced_error_pruning_is_transitive() {
        // x ties with z at the root and wins by order;
        // z then splits the `a` branch into two `yes` leaves.
        let instances = [
            ("a", "p", "yes"), ("a", "p", "yes"), ("a", "p", "no"),
            ("a", "q", "yes"), ("b", "p", "yes"),
        ]
            .into_iter()
            .enumerate()
            .map(|(i, (x, z, y))| {
                Instance::new(i, [("x", x), ("z", z), ("y", y)])
            })
            .collect::<Vec<_>>();
        let mut attributes = vec![
            Attribute::new("x", AttributeKind::Categorical),
            Attribute::new("z", AttributeKind::Categorical),
        ];
        attributes.iter_mut().for_each(|a| a.observe(&instances));
        let mut y = Attribute::new("y", AttributeKind::Categorical);
        y.observe(&instances);

        let tree = grow_tree(&instances, &attributes, &y).unwrap();
        assert_eq!(tree.node_count(), 5);
        let inner = tree.node(tree.root()).children()[0];
        assert_eq!(tree.node(inner).rule().attribute_name(), Some("z"));

        let pruned = Pruner::new().prune(&tree, &instances).unwrap();
        assert_eq!(pruned.node_count(), 1);
        assert_eq!(pruned.node(pruned.root()).label(), Some("yes"));
    }
}
