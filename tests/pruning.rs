use c45tree::prelude::*;
use c45tree::decision_tree::{grow_tree, confidence_interval};


fn tennis() -> Dataset {
    let schema = Schema::from_json_file("tests/dataset/tennis-schema.json")
        .unwrap();
    Dataset::from_csv("tests/dataset/tennis.csv", &schema).unwrap()
}


fn grow(data: &Dataset) -> DecisionTree {
    grow_tree(data.instances(), data.attributes(), data.target()).unwrap()
}


#[test]
fn pure_leaves_survive_reduced_error_pruning() {
    let data = tennis();
    let tree = grow(&data);
    let pruned = Pruner::new().prune(&tree, data.instances()).unwrap();

    assert_eq!(pruned.node_count(), 8);
    assert_eq!(pruned, tree);
}


#[test]
fn pruning_never_grows_the_tree() {
    let mut data = tennis();
    for seed in 0..10 {
        data.percentage_split(50.0, seed).unwrap();
        let tree = grow_tree(
            data.training_instances(), data.attributes(), data.target()
        )
        .unwrap();

        for z in [0.0, 0.69, 1.96] {
            let pruned = Pruner::new()
                .z_value(z)
                .prune(&tree, data.training_instances())
                .unwrap();
            assert!(pruned.node_count() <= tree.node_count());
        }
    }
}


#[test]
fn min_instance_pruning_collapses_small_branches() {
    let data = tennis();
    let tree = grow(&data);
    let mut pruned = Pruner::new()
        .min_instance_pruning(3)
        .prune(&tree, data.instances())
        .unwrap();

    // Windy/True and Humidity/Normal leaves hold two instances each.
    assert_eq!(pruned.node_count(), 4);
    assert_eq!(pruned.height(), 2);

    let root = pruned.node(pruned.root());
    let labels = root.children()
        .iter()
        .map(|&child| pruned.node(child).label().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["Yes", "Yes", "No"]);

    pruned.test(data.instances()).unwrap();
    assert_eq!(pruned.report(), 10);

    // The input tree is untouched.
    assert_eq!(tree.node_count(), 8);
}


#[test]
fn min_instance_pruning_repeats_until_stable() {
    let data = tennis();
    let tree = grow(&data);
    let pruned = Pruner::new()
        .min_instance_pruning(100)
        .prune(&tree, data.instances())
        .unwrap();

    assert_eq!(pruned.node_count(), 1);
    assert_eq!(pruned.node(pruned.root()).label(), Some("Yes"));
}


#[test]
fn pruned_tree_is_compact_and_reset() {
    let data = tennis();
    let tree = grow(&data);
    let pruned = Pruner::new()
        .min_instance_pruning(3)
        .prune(&tree, data.instances())
        .unwrap();

    let root = pruned.root();
    assert_eq!(root.index(), 0);
    for (i, id) in pruned.descendants(root).into_iter().enumerate() {
        assert_eq!(id.index(), i);
        let node = pruned.node(id);
        assert_eq!(node.num_correct() + node.num_wrong(), 0);
        assert!(node.instances().is_empty());
        for &child in node.children() {
            assert_eq!(pruned.node(child).parent(), Some(id));
        }
    }
}


#[test]
fn collapse_sums_the_leaf_instances() {
    let data = tennis();
    let mut tree = grow(&data);
    tree.test(data.instances()).unwrap();

    // The Sunny branch: Humidity/High (3 x No), Humidity/Normal (2 x Yes).
    let sunny = tree.node(tree.root()).children()[2];
    assert!(tree.collapse(sunny).unwrap());

    let leaf = tree.node(sunny);
    assert_eq!(leaf.instances().len(), 5);
    assert_eq!(leaf.label(), Some("No"));
    assert_eq!(leaf.num_correct(), 3);
    assert_eq!(leaf.num_wrong(), 2);
    assert_eq!(leaf.condition(), Some("Sunny"));
    assert_eq!(tree.node_count(), 6);
}


#[test]
fn pessimistic_estimate_grows_with_z() {
    let low = confidence_interval(2, 10, 0.0);
    let mid = confidence_interval(2, 10, 0.69);
    let high = confidence_interval(2, 10, 1.96);
    assert_eq!(low, 0.2);
    assert!(low < mid && mid < high);
}


#[test]
fn c45_keeps_the_unpruned_tree() {
    let data = tennis();
    let mut c45 = C45Builder::new(data)
        .min_instance_pruning(true)
        .min_instances_per_leaf(3)
        .build()
        .unwrap();
    c45.train().unwrap();
    c45.prune().unwrap();

    assert_eq!(c45.unpruned_tree().unwrap().node_count(), 8);
    assert_eq!(c45.pruned_tree().unwrap().node_count(), 4);
    assert_eq!(c45.tree().unwrap().node_count(), 4);
}
