//! This file defines split rules for decision tree.
//! A node carries exactly one [`Rule`]:
//! a categorical splitter, a numeric splitter, or a leaf prediction.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::error::{C45Error, Result};
use crate::sample::{Attribute, Instance};


/// Partition of an instance list,
/// as ordered pairs of branch key and instances.
pub type Branches = Vec<(String, Vec<Instance>)>;


/// Splits instances by exact equality on a categorical attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalRule {
    pub(crate) attribute: Attribute,
}


impl CategoricalRule {
    /// Construct a new categorical splitter.
    #[inline]
    pub fn new(attribute: &Attribute) -> Self {
        Self { attribute: attribute.clone() }
    }


    /// Returns the splitting attribute.
    #[inline]
    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }


    /// Bucket `instances` by their value of the splitting attribute.
    /// There is a branch for every value of the attribute's domain,
    /// in domain order, even if no instance falls into it.
    pub fn split(&self, instances: &[Instance]) -> Branches {
        let mut branches = self.attribute.unique_values()
            .iter()
            .map(|value| (value.clone(), Vec::new()))
            .collect::<Branches>();

        let name = self.attribute.name();
        for instance in instances {
            let value = instance.value(name).unwrap_or_default();
            match branches.iter_mut().find(|(key, _)| key == value) {
                Some((_, bucket)) => bucket.push(instance.clone()),
                None => branches.push((value.to_string(), vec![instance.clone()])),
            }
        }
        branches
    }
}


impl fmt::Display for CategoricalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Split on Categorical Attribute: {}", self.attribute.name())
    }
}


/// Splits instances into `<= threshold` and `> threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericRule {
    pub(crate) attribute: Attribute,
    pub(crate) threshold: f64,
}


impl NumericRule {
    /// Construct a new numeric splitter.
    #[inline]
    pub fn new(attribute: &Attribute, threshold: f64) -> Self {
        Self { attribute: attribute.clone(), threshold }
    }


    /// Returns the splitting attribute.
    #[inline]
    pub fn attribute(&self) -> &Attribute {
        &self.attribute
    }


    /// Returns the threshold.
    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }


    /// Branch key of the left (`<=`) side.
    #[inline]
    pub fn left_key(&self) -> String {
        format!("<={}", self.threshold)
    }


    /// Branch key of the right (`>`) side.
    #[inline]
    pub fn right_key(&self) -> String {
        format!(">{}", self.threshold)
    }


    /// Returns `0` if the instance goes left, `1` otherwise.
    #[inline]
    pub fn branch_index(&self, instance: &Instance) -> usize {
        let value = instance.numeric_value(self.attribute.name());
        if value <= self.threshold { 0 } else { 1 }
    }


    /// Split `instances` into exactly two branches,
    /// `<=threshold` first.
    pub fn split(&self, instances: &[Instance]) -> Branches {
        let (left, right): (Vec<Instance>, Vec<Instance>) = instances.iter()
            .cloned()
            .partition(|instance| self.branch_index(instance) == 0);

        vec![(self.left_key(), left), (self.right_key(), right)]
    }
}


impl fmt::Display for NumericRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Split on Numeric Attribute: {}, Value - {}",
            self.attribute.name(),
            self.threshold
        )
    }
}


/// A leaf. Predicts `label` and keeps the instances that reached it
/// during the current evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRule {
    pub(crate) target: String,
    pub(crate) label: String,
    pub(crate) instances: Vec<Instance>,
}


impl PredictionRule {
    /// Construct a new leaf predicting `label`.
    /// Fails if `label` is not a value of `target`.
    pub fn new<S: ToString>(
        target: &Attribute,
        label: S,
        instances: Vec<Instance>,
    ) -> Result<Self>
    {
        let label = label.to_string();
        if !target.contains(&label) {
            return Err(C45Error::LabelNotInDomain {
                label,
                target: target.name().to_string(),
            });
        }

        Ok(Self { target: target.name().to_string(), label, instances, })
    }


    /// Returns the predicted label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }


    /// Returns the instances that reached this leaf.
    #[inline]
    pub fn instances(&self) -> &[Instance] {
        &self.instances[..]
    }


    /// Returns `true` if the actual target value of `instance`
    /// equals the predicted label.
    #[inline]
    pub fn classify(&self, instance: &Instance) -> bool {
        instance.value(&self.target) == Some(self.label.as_str())
    }


    /// Record an instance reaching this leaf.
    #[inline]
    pub fn add_instance(&mut self, instance: Instance) {
        self.instances.push(instance);
    }


    #[inline]
    pub(crate) fn clear_instances(&mut self) {
        self.instances.clear();
    }
}


impl fmt::Display for PredictionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Choose: {}", self.label)
    }
}


/// Enumeration of the rules a node can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rule {
    /// Categorical splitter.
    Categorical(CategoricalRule),
    /// Numeric splitter.
    Numeric(NumericRule),
    /// Leaf.
    Prediction(PredictionRule),
}


impl Rule {
    /// Returns `true` if this rule is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Rule::Prediction(_))
    }


    /// Partition `instances`.
    /// Returns `None` for a leaf.
    #[inline]
    pub fn split(&self, instances: &[Instance]) -> Option<Branches> {
        match self {
            Rule::Categorical(rule) => Some(rule.split(instances)),
            Rule::Numeric(rule) => Some(rule.split(instances)),
            Rule::Prediction(_) => None,
        }
    }


    /// Returns the name of the splitting attribute, if any.
    #[inline]
    pub fn attribute_name(&self) -> Option<&str> {
        match self {
            Rule::Categorical(rule) => Some(rule.attribute.name()),
            Rule::Numeric(rule) => Some(rule.attribute.name()),
            Rule::Prediction(_) => None,
        }
    }
}


impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Categorical(rule) => rule.fmt(f),
            Rule::Numeric(rule) => rule.fmt(f),
            Rule::Prediction(rule) => rule.fmt(f),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::AttributeKind;

    fn instances() -> Vec<Instance> {
        [("0.2", "Sunny"), ("0.6", "Rain"), ("1.4", "Sunny")]
            .into_iter()
            .enumerate()
            .map(|(i, (x, o))| Instance::new(i, [("x", x), ("outlook", o)]))
            .collect()
    }

    #[test]
    fn categorical_split_keeps_empty_branches() {
        let outlook = Attribute::with_values(
            "outlook",
            AttributeKind::Categorical,
            ["Sunny", "Rain", "Overcast"],
        );
        let branches = CategoricalRule::new(&outlook).split(&instances());
        let sizes = branches.iter()
            .map(|(key, list)| (key.as_str(), list.len()))
            .collect::<Vec<_>>();
        assert_eq!(sizes, vec![("Overcast", 0), ("Rain", 1), ("Sunny", 2)]);
    }

    #[test]
    fn numeric_split_has_two_branches() {
        let x = Attribute::with_values(
            "x", AttributeKind::Numeric, ["0.2", "0.6", "1.4"]
        );
        let rule = NumericRule::new(&x, 0.6);
        let branches = rule.split(&instances());
        assert_eq!(branches[0].0, "<=0.6");
        assert_eq!(branches[0].1.len(), 2);
        assert_eq!(branches[1].0, ">0.6");
        assert_eq!(branches[1].1.len(), 1);
        assert_eq!(rule.to_string(), "Split on Numeric Attribute: x, Value - 0.6");
    }

    #[test]
    fn prediction_label_must_be_in_domain() {
        let target = Attribute::with_values(
            "class", AttributeKind::Categorical, ["yes", "no"]
        );
        let res = PredictionRule::new(&target, "maybe", Vec::new());
        assert!(matches!(res, Err(C45Error::LabelNotInDomain { .. })));
    }
}
