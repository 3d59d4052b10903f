//! The C4.5 learner: grows, prunes and evaluates a decision tree
//! over the partitions of a [`Dataset`].
use tracing::{info, warn};

use crate::error::{C45Error, Result};
use crate::sample::Dataset;
use super::{
    builder::C45Config,
    c45_algorithm::grow_tree,
    dtree::{DecisionTree, TestResult},
};


/// C4.5 decision tree learner.
///
/// Use [`C45Builder`](super::C45Builder) to construct an instance.
/// The expected call order is
/// [`C45::train`], [`C45::prune`] (optional) and [`C45::test`];
/// [`C45::run`] does all three.
#[derive(Debug, Clone)]
pub struct C45 {
    dataset: Dataset,
    config: C45Config,

    unpruned: Option<DecisionTree>,
    pruned: Option<DecisionTree>,

    results: Vec<TestResult>,
    num_correct: usize,
    accuracy: f64,
}


impl C45 {
    #[inline]
    pub(crate) fn from_components(dataset: Dataset, config: C45Config)
        -> Self
    {
        Self {
            dataset,
            config,
            unpruned: None,
            pruned: None,
            results: Vec::new(),
            num_correct: 0,
            accuracy: 0.0,
        }
    }


    /// Grow a tree on the training partition.
    /// A previously pruned tree is discarded.
    pub fn train(&mut self) -> Result<()> {
        let tree = grow_tree(
            self.dataset.training_instances(),
            self.dataset.attributes(),
            self.dataset.target(),
        )?
        .unseen_category(self.config.unseen_category);

        info!(
            n_train = self.dataset.training_instances().len(),
            n_node = tree.node_count(),
            height = tree.height(),
            "trained"
        );

        self.unpruned = Some(tree);
        self.pruned = None;
        Ok(())
    }


    /// Prune a copy of the trained tree against the training partition.
    /// The unpruned tree stays available
    /// through [`C45::unpruned_tree`].
    pub fn prune(&mut self) -> Result<()> {
        let tree = self.unpruned.as_ref().ok_or_else(not_trained)?;
        let pruned = self.config.pruner()
            .prune(tree, self.dataset.training_instances())?;
        self.pruned = Some(pruned);
        Ok(())
    }


    /// Classify the testing partition with the final tree
    /// and return the predictions.
    ///
    /// If a pruned tree exists, the unpruned tree is evaluated
    /// on the same instances afterwards, so both trees carry
    /// the counters of this pass. A failure of that second pass
    /// is logged and leaves the unpruned tree reset.
    pub fn test(&mut self) -> Result<&[TestResult]> {
        let testing = self.dataset.testing_instances();

        let tree = self.pruned.as_mut()
            .or(self.unpruned.as_mut())
            .ok_or_else(not_trained)?;
        tree.reset();
        self.results = tree.test(testing)?;
        self.num_correct = tree.report();
        self.accuracy = if testing.is_empty() {
            0.0
        } else {
            self.num_correct as f64 / testing.len() as f64
        };

        info!(
            n_test = testing.len(),
            num_correct = self.num_correct,
            accuracy = self.accuracy,
            "tested"
        );


        if self.pruned.is_some() {
            if let Some(unpruned) = self.unpruned.as_mut() {
                unpruned.reset();
                if let Err(err) = unpruned.test(testing) {
                    warn!(%err, "the unpruned tree cannot classify the test set");
                    unpruned.reset();
                }
            }
        }
        Ok(&self.results[..])
    }


    /// Train, prune and test in a row.
    pub fn run(&mut self) -> Result<&[TestResult]> {
        self.train()?;
        self.prune()?;
        self.test()
    }


    /// Returns the dataset.
    #[inline]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }


    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &C45Config {
        &self.config
    }


    /// Returns the tree as grown, before pruning.
    #[inline]
    pub fn unpruned_tree(&self) -> Option<&DecisionTree> {
        self.unpruned.as_ref()
    }


    /// Returns the pruned tree, if [`C45::prune`] ran.
    #[inline]
    pub fn pruned_tree(&self) -> Option<&DecisionTree> {
        self.pruned.as_ref()
    }


    /// Returns the final tree:
    /// the pruned one if any, the unpruned one otherwise.
    #[inline]
    pub fn tree(&self) -> Option<&DecisionTree> {
        self.pruned.as_ref().or(self.unpruned.as_ref())
    }


    /// Returns the predictions of the last [`C45::test`].
    #[inline]
    pub fn results(&self) -> &[TestResult] {
        &self.results[..]
    }


    /// Returns the number of correct predictions of the last test.
    #[inline]
    pub fn num_correct(&self) -> usize {
        self.num_correct
    }


    /// Returns the accuracy of the last test.
    #[inline]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }


    /// Returns the number of nodes of the final tree,
    /// `0` before training.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.tree().map_or(0, DecisionTree::node_count)
    }


    /// Returns the height of the final tree,
    /// `0` before training.
    #[inline]
    pub fn height(&self) -> usize {
        self.tree().map_or(0, DecisionTree::height)
    }


    /// Returns the rendering of the final tree.
    #[inline]
    pub fn display_tree(&self) -> String {
        self.tree().map(ToString::to_string).unwrap_or_default()
    }
}


#[inline]
fn not_trained() -> C45Error {
    C45Error::invariant("the tree is not trained yet")
}
