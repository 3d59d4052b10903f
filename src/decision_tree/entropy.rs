//! Entropy of label distributions,
//! optionally restricted to a categorical value or a numeric threshold.
//!
//! Every function returns `0.0` on degenerate input (empty lists,
//! empty partitions) instead of `NaN` or `-inf`.
use crate::sample::{Attribute, Instance};


/// Base-2 logarithm that is `0` at `0`,
/// which encodes the convention `0 * log(0) = 0`.
#[inline(always)]
pub fn log2_or_zero(x: f64) -> f64 {
    if x <= 0.0 { 0.0 } else { x.log2() }
}


/// Shannon entropy of a histogram.
#[inline(always)]
fn entropic_impurity<I>(counts: I, total: usize) -> f64
    where I: IntoIterator<Item = usize>
{
    if total == 0 { return 0.0; }
    let total = total as f64;

    counts.into_iter()
        .map(|count| {
            let p = count as f64 / total;
            -p * log2_or_zero(p)
        })
        .sum::<f64>()
}


/// Entropy of the distribution of `attribute`'s values over `instances`,
/// taken over the attribute's domain.
///
/// Given the target attribute this is the label entropy `H(S)`;
/// given a splitting attribute it is the split entropy
/// (intrinsic value) used by the gain ratio.
pub fn attribute_entropy(instances: &[Instance], attribute: &Attribute)
    -> f64
{
    let total = instances.len();
    let counts = attribute.unique_values()
        .iter()
        .map(|value| attribute.count(instances, value));

    entropic_impurity(counts, total)
}


/// Entropy of the target over the instances whose `attribute` equals `value`.
/// Returns `0` if no instance carries `value`.
pub fn categorical_entropy(
    instances: &[Instance],
    attribute: &Attribute,
    target: &Attribute,
    value: &str,
) -> f64
{
    let subset = instances.iter()
        .filter(|instance| attribute.matches(instance, value))
        .cloned()
        .collect::<Vec<_>>();

    attribute_entropy(&subset, target)
}


/// Weighted entropy of the target after splitting `instances`
/// into `attribute <= threshold` and `attribute > threshold`.
/// Each side is weighted by its share of `instances`.
pub fn numeric_entropy(
    instances: &[Instance],
    attribute: &Attribute,
    target: &Attribute,
    threshold: f64,
) -> f64
{
    let n_sample = instances.len();
    if n_sample == 0 { return 0.0; }

    let name = attribute.name();
    let (left, right): (Vec<Instance>, Vec<Instance>) = instances.iter()
        .cloned()
        .partition(|instance| instance.numeric_value(name) <= threshold);

    let n_sample = n_sample as f64;
    let lp = left.len() as f64 / n_sample;
    let rp = right.len() as f64 / n_sample;

    lp * attribute_entropy(&left, target)
        + rp * attribute_entropy(&right, target)
}
