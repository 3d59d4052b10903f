//! Defines the attribute (feature) descriptor.
use serde::{Serialize, Deserialize};

use std::fmt;
use std::cmp::Ordering;

use super::instance::Instance;


/// The kind of values an attribute takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttributeKind {
    /// Values are compared by exact string equality.
    Categorical,
    /// Values are parsed as `f64` and compared numerically.
    Numeric,
}


impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Categorical => "Categorical",
            Self::Numeric => "Numeric",
        };

        write!(f, "{name}")
    }
}


/// Describes a column of a dataset:
/// its name, its kind and the sorted set of values observed for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
    unique_values: Vec<String>,
}


impl Attribute {
    /// Construct an attribute with no observed value.
    #[inline]
    pub fn new<S: ToString>(name: S, kind: AttributeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            unique_values: Vec::new(),
        }
    }


    /// Construct an attribute whose domain is populated from `values`.
    /// Duplicates are removed and the domain is sorted
    /// according to `kind`.
    pub fn with_values<S, I, T>(name: S, kind: AttributeKind, values: I)
        -> Self
        where S: ToString,
              I: IntoIterator<Item = T>,
              T: ToString,
    {
        let mut attribute = Self::new(name, kind);
        values.into_iter()
            .for_each(|value| attribute.add_value(value.to_string()));
        attribute
    }


    /// Collect the values of this attribute over `instances`.
    pub fn observe(&mut self, instances: &[Instance]) {
        for instance in instances {
            if let Some(value) = instance.value(&self.name) {
                self.add_value(value.to_string());
            }
        }
    }


    fn add_value(&mut self, value: String) {
        let kind = self.kind;
        if self.unique_values.iter().any(|v| same_value(kind, v, &value)) {
            return;
        }
        self.unique_values.push(value);

        match self.kind {
            AttributeKind::Categorical => self.unique_values.sort(),
            AttributeKind::Numeric => {
                self.unique_values.sort_by(|a, b| numeric_order(a, b));
            },
        }
    }


    /// Returns the attribute name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the attribute kind.
    #[inline]
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }


    /// Returns `true` if this attribute is categorical.
    #[inline]
    pub fn is_categorical(&self) -> bool {
        self.kind == AttributeKind::Categorical
    }


    /// Returns the sorted domain of this attribute.
    #[inline]
    pub fn unique_values(&self) -> &[String] {
        &self.unique_values[..]
    }


    /// Returns `true` if `value` belongs to the domain.
    #[inline]
    pub fn contains(&self, value: &str) -> bool {
        self.unique_values.iter().any(|v| same_value(self.kind, v, value))
    }


    /// Returns `true` if the instance carries `value` for this attribute.
    /// Numeric values are compared after parsing,
    /// so `"1.0"` and `"1"` are the same value.
    pub fn matches(&self, instance: &Instance, value: &str) -> bool {
        instance.value(&self.name)
            .is_some_and(|raw| same_value(self.kind, raw, value))
    }


    /// Returns the number of instances carrying `value`.
    #[inline]
    pub fn count(&self, instances: &[Instance], value: &str) -> usize {
        instances.iter()
            .filter(|instance| self.matches(instance, value))
            .count()
    }


    /// Candidate split points of `instances`, which must be sorted
    /// by this attribute: every index `i` such that the values at
    /// `i` and `i + 1` differ.
    pub fn candidate_splits(&self, instances: &[Instance]) -> Vec<usize> {
        instances.windows(2)
            .enumerate()
            .filter(|(_, pair)| {
                pair[0].numeric_value(&self.name)
                    != pair[1].numeric_value(&self.name)
            })
            .map(|(i, _)| i)
            .collect()
    }
}


#[inline]
fn same_value(kind: AttributeKind, a: &str, b: &str) -> bool {
    match kind {
        AttributeKind::Categorical => a == b,
        AttributeKind::Numeric => {
            match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
                (Ok(x), Ok(y)) => x == y,
                _ => a == b,
            }
        },
    }
}


/// Orders two raw numeric strings by their parsed value.
/// Unparsable strings sort after every number.
pub(crate) fn numeric_order(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorical_domain_is_sorted_lexicographically() {
        let attr = Attribute::with_values(
            "outlook",
            AttributeKind::Categorical,
            ["Sunny", "Overcast", "Rain", "Sunny"],
        );
        let exp = vec!["Overcast", "Rain", "Sunny"];
        assert_eq!(attr.unique_values(), &exp[..]);
    }

    #[test]
    fn numeric_domain_is_sorted_numerically() {
        let attr = Attribute::with_values(
            "width",
            AttributeKind::Numeric,
            ["10", "9.5", "0.6", "9.5"],
        );
        let exp = vec!["0.6", "9.5", "10"];
        assert_eq!(attr.unique_values(), &exp[..]);
    }
}
