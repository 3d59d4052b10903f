//! Defines a single row of a dataset.
use serde::{Serialize, Deserialize};

use std::rc::Rc;
use std::cmp::Ordering;

use super::attribute::{Attribute, AttributeKind, numeric_order};


/// A row of a dataset: the raw value of every attribute,
/// in schema order, plus the sequence number the loader assigned.
///
/// Cloning an `Instance` is cheap;
/// the values are shared between the clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    number: usize,
    data: Rc<Vec<(String, String)>>,
}


impl Instance {
    /// Construct a new instance from `(attribute name, raw value)` pairs.
    pub fn new<I, K, V>(number: usize, data: I) -> Self
        where I: IntoIterator<Item = (K, V)>,
              K: ToString,
              V: ToString,
    {
        let data = data.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>();

        Self { number, data: Rc::new(data), }
    }


    /// Returns the sequence number of this instance.
    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }


    /// Returns the raw value of the attribute named `name`.
    #[inline]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.data.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }


    /// Returns the value of the attribute named `name` as `f64`.
    /// A missing or unparsable value is `NaN`.
    #[inline]
    pub fn numeric_value(&self, name: &str) -> f64 {
        self.value(name)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(f64::NAN)
    }


    /// Returns the `(attribute name, raw value)` pairs in schema order.
    #[inline]
    pub fn data(&self) -> &[(String, String)] {
        &self.data[..]
    }
}


/// Sort a copy of `instances` by `attribute`;
/// lexicographically for categorical attributes,
/// numerically for numeric ones.
pub fn sort_by_attribute(instances: &[Instance], attribute: &Attribute)
    -> Vec<Instance>
{
    let name = attribute.name();
    let mut sorted = instances.to_vec();
    match attribute.kind() {
        AttributeKind::Categorical => {
            sorted.sort_by(|a, b| cmp_raw(a.value(name), b.value(name)));
        },
        AttributeKind::Numeric => {
            sorted.sort_by(|a, b| {
                match (a.value(name), b.value(name)) {
                    (Some(x), Some(y)) => numeric_order(x, y),
                    (x, y) => cmp_raw(x, y),
                }
            });
        },
    }
    sorted
}


#[inline]
fn cmp_raw(a: Option<&str>, b: Option<&str>) -> Ordering {
    a.cmp(&b)
}
