//! Information gain and gain ratio of a candidate split.
use serde::{Serialize, Deserialize};

use crate::sample::{Attribute, Instance, sort_by_attribute};
use super::entropy::*;


/// The best gain over the thresholds of a numeric attribute,
/// together with the threshold that achieves it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gain {
    /// The highest gain (or gain ratio) found.
    pub max_gain: f64,
    /// The threshold achieving `max_gain`.
    pub split_value: f64,
}


/// Divides `gain` by `split_entropy`, or returns `0` when the
/// attribute takes a single value on the list.
#[inline(always)]
fn normalize(gain: f64, split_entropy: f64) -> f64 {
    if split_entropy <= 0.0 { 0.0 } else { gain / split_entropy }
}


/// Information gain of splitting `instances` on every value
/// of the categorical `attribute`.
pub fn categorical_information_gain(
    instances: &[Instance],
    attribute: &Attribute,
    target: &Attribute,
) -> f64
{
    let n_sample = instances.len();
    if n_sample == 0 { return 0.0; }

    let n_sample = n_sample as f64;
    let prior = attribute_entropy(instances, target);
    let posterior = attribute.unique_values()
        .iter()
        .map(|value| {
            let p = attribute.count(instances, value) as f64 / n_sample;
            p * categorical_entropy(instances, attribute, target, value)
        })
        .sum::<f64>();

    prior - posterior
}


/// Information gain normalized by the intrinsic value of `attribute`.
pub fn categorical_information_gain_ratio(
    instances: &[Instance],
    attribute: &Attribute,
    target: &Attribute,
) -> f64
{
    let gain = categorical_information_gain(instances, attribute, target);
    normalize(gain, attribute_entropy(instances, attribute))
}


/// Highest information gain over every candidate threshold of
/// the numeric `attribute`.
///
/// The candidates are the values at which the sorted list changes;
/// the threshold `v` sends every instance with value `<= v` left.
/// Only strictly positive improvements are kept,
/// so a list without a useful split yields `Gain { 0, 0 }`.
pub fn numeric_information_gain(
    instances: &[Instance],
    attribute: &Attribute,
    target: &Attribute,
) -> Gain
{
    if instances.is_empty() { return Gain::default(); }

    let sorted = sort_by_attribute(instances, attribute);
    let prior = attribute_entropy(&sorted, target);
    let name = attribute.name();

    let mut best = Gain::default();
    for i in attribute.candidate_splits(&sorted) {
        let threshold = sorted[i].numeric_value(name);
        let gain = prior - numeric_entropy(&sorted, attribute, target, threshold);

        if gain > best.max_gain {
            best = Gain { max_gain: gain, split_value: threshold };
        }
    }
    best
}


/// Same as [`numeric_information_gain`], but the gain is normalized
/// by the intrinsic value of `attribute`.
pub fn numeric_information_gain_ratio(
    instances: &[Instance],
    attribute: &Attribute,
    target: &Attribute,
) -> Gain
{
    let gain = numeric_information_gain(instances, attribute, target);
    let split_entropy = attribute_entropy(instances, attribute);

    Gain {
        max_gain: normalize(gain.max_gain, split_entropy),
        split_value: gain.split_value,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::AttributeKind;

    #[test]
    fn single_valued_attribute_has_zero_ratio() {
        let color = Attribute::with_values(
            "color", AttributeKind::Categorical, ["red"]
        );
        let target = Attribute::with_values(
            "class", AttributeKind::Categorical, ["a", "b"]
        );
        let instances = vec![
            Instance::new(0, [("color", "red"), ("class", "a")]),
            Instance::new(1, [("color", "red"), ("class", "b")]),
        ];
        let ratio = categorical_information_gain_ratio(
            &instances, &color, &target
        );
        assert_eq!(ratio, 0.0);
        assert!(!ratio.is_nan());
    }

    #[test]
    fn empty_list_has_no_numeric_gain() {
        let width = Attribute::with_values(
            "width", AttributeKind::Numeric, ["0.5"]
        );
        let target = Attribute::with_values(
            "class", AttributeKind::Categorical, ["a"]
        );
        let gain = numeric_information_gain(&[], &width, &target);
        assert_eq!(gain, Gain { max_gain: 0.0, split_value: 0.0 });
    }
}
