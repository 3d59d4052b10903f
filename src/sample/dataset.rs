//! Defines `Dataset`,
//! the normalized attribute/instance representation the learner consumes.
use polars::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::debug;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{C45Error, Result};
use crate::common::checker;
use super::{
    attribute::{Attribute, AttributeKind},
    instance::Instance,
    schema::Schema,
};


/// A labeled dataset:
/// the attributes (target excluded), the target attribute,
/// every instance and the current training/testing partition.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    attributes: Vec<Attribute>,
    target: Attribute,
    instances: Vec<Instance>,
    training: Vec<Instance>,
    testing: Vec<Instance>,
    percentage_split: f64,
}


impl Dataset {
    /// Construct a dataset from pre-partitioned instance lists.
    /// `attributes` must not contain `target`.
    /// The attribute domains are taken as given.
    pub fn from_partitions(
        attributes: Vec<Attribute>,
        target: Attribute,
        training: Vec<Instance>,
        testing: Vec<Instance>,
    ) -> Self
    {
        let instances = training.iter()
            .chain(testing.iter())
            .cloned()
            .collect::<Vec<_>>();
        let n_sample = instances.len();
        let percentage_split = if n_sample == 0 {
            100.0
        } else {
            100.0 * training.len() as f64 / n_sample as f64
        };

        Self {
            name: String::from("dataset"),
            attributes,
            target,
            instances,
            training,
            testing,
            percentage_split,
        }
    }


    /// Construct a dataset from raw rows laid out as `schema` describes.
    /// Instances are numbered in row order starting at `0`.
    /// Every instance is placed in the training partition;
    /// call [`Dataset::percentage_split`] to hold some out.
    pub fn from_rows<I, R, S>(schema: &Schema, rows: I) -> Result<Self>
        where I: IntoIterator<Item = R>,
              R: IntoIterator<Item = S>,
              S: AsRef<str>,
    {
        let n_column = schema.attributes.len();
        let mut instances = Vec::new();
        for (number, row) in rows.into_iter().enumerate() {
            let values = row.into_iter()
                .map(|v| v.as_ref().trim().to_string())
                .collect::<Vec<_>>();

            if values.len() != n_column {
                return Err(C45Error::dataset(format!(
                    "row {number} has {} values, but the schema has {n_column} attributes",
                    values.len()
                )));
            }

            for (column, value) in schema.attributes.iter().zip(&values) {
                let unparsable = column.kind == AttributeKind::Numeric
                    && value.parse::<f64>().is_err();
                if unparsable {
                    return Err(C45Error::dataset(format!(
                        "row {number}: `{value}` is not a number (attribute `{}`)",
                        column.name
                    )));
                }
            }

            let data = schema.attributes.iter()
                .map(|column| column.name.clone())
                .zip(values);
            instances.push(Instance::new(number, data));
        }

        let mut attributes = schema.attributes.iter()
            .map(|column| {
                let mut attribute = Attribute::new(&column.name, column.kind);
                attribute.observe(&instances);
                attribute
            })
            .collect::<Vec<_>>();

        let target = strip_target(&mut attributes, &schema.target)?;

        debug!(
            n_instance = instances.len(),
            n_attribute = attributes.len(),
            target = target.name(),
            "dataset loaded"
        );

        Ok(Self {
            name: String::from("dataset"),
            attributes,
            target,
            training: instances.clone(),
            testing: Vec::new(),
            instances,
            percentage_split: 100.0,
        })
    }


    /// Read a comma separated file without header.
    /// Blank lines are skipped and empty cells are dropped,
    /// so a trailing comma does not produce an extra value.
    pub fn from_csv<P: AsRef<Path>>(file: P, schema: &Schema)
        -> Result<Self>
    {
        let path = file.as_ref();
        let file = File::open(path)?;
        let lines = BufReader::new(file).lines();

        let mut rows = Vec::new();
        for line in lines {
            let line = line?;
            let line = line.trim();
            if line.is_empty() { continue; }

            let row = line.split(',')
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .map(String::from)
                .collect::<Vec<_>>();
            rows.push(row);
        }

        let mut dataset = Self::from_rows(schema, rows)?;
        if let Some(stem) = path.file_stem() {
            dataset.name = stem.to_string_lossy().into_owned();
        }
        Ok(dataset)
    }


    /// Convert a `polars::DataFrame` into a `Dataset`.
    /// Numeric columns become numeric attributes,
    /// every other column becomes categorical.
    pub fn from_dataframe(data: &DataFrame, target: &str) -> Result<Self> {
        let columns = data.get_columns();

        let mut kinds = Vec::with_capacity(columns.len());
        let mut cells = Vec::with_capacity(columns.len());
        for series in columns {
            let kind = if series.dtype().is_numeric() {
                AttributeKind::Numeric
            } else {
                AttributeKind::Categorical
            };
            let utf8 = series.cast(&DataType::Utf8)?;
            let values = utf8.utf8()?
                .into_iter()
                .map(|v| v.map(String::from))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| C45Error::dataset(format!(
                    "column `{}` has missing values", series.name()
                )))?;

            kinds.push((series.name().to_string(), kind));
            cells.push(values);
        }

        let schema = Schema {
            target: target.to_string(),
            attributes: kinds.into_iter()
                .map(|(name, kind)| super::schema::AttributeSchema { name, kind })
                .collect(),
        };

        let rows = (0..data.height())
            .map(|i| cells.iter().map(|column| column[i].clone()).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        Self::from_rows(&schema, rows)
    }


    /// Set the name used in reports.
    pub fn name<S: ToString>(mut self, name: S) -> Self {
        self.name = name.to_string();
        self
    }


    /// Shuffle every instance with a generator seeded by `seed`
    /// and keep the first `percentage` percent for training;
    /// the rest is held out for testing.
    pub fn percentage_split(&mut self, percentage: f64, seed: u64)
        -> Result<()>
    {
        checker::check_percentage_split(percentage)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut shuffled = self.instances.clone();
        shuffled.shuffle(&mut rng);

        let n_train = (shuffled.len() as f64 * percentage / 100.0).round()
            as usize;
        let testing = shuffled.split_off(n_train.min(shuffled.len()));

        self.training = shuffled;
        self.testing = testing;
        self.percentage_split = percentage;
        Ok(())
    }


    /// Returns the dataset name (the file stem when read from a file).
    #[inline]
    pub fn dataset_name(&self) -> &str {
        &self.name
    }


    /// Returns the attributes, target excluded.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes[..]
    }


    /// Returns the target attribute.
    #[inline]
    pub fn target(&self) -> &Attribute {
        &self.target
    }


    /// Returns every instance in row order.
    #[inline]
    pub fn instances(&self) -> &[Instance] {
        &self.instances[..]
    }


    /// Returns the training partition.
    #[inline]
    pub fn training_instances(&self) -> &[Instance] {
        &self.training[..]
    }


    /// Returns the testing partition.
    #[inline]
    pub fn testing_instances(&self) -> &[Instance] {
        &self.testing[..]
    }


    /// Returns the percentage of instances used for training.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.percentage_split
    }
}


/// Remove the attribute named `target` from `attributes` and return it.
fn strip_target(attributes: &mut Vec<Attribute>, target: &str)
    -> Result<Attribute>
{
    let pos = attributes.iter()
        .position(|attribute| attribute.name() == target)
        .ok_or_else(|| C45Error::dataset(format!(
            "target `{target}` is not in the attribute list"
        )))?;
    Ok(attributes.remove(pos))
}


/// Returns the target value shared by every instance,
/// or `None` if `instances` is empty or the values differ.
pub fn unanimous_class(instances: &[Instance], target: &Attribute)
    -> Option<String>
{
    let name = target.name();
    let first = instances.first()?.value(name)?;
    instances.iter()
        .all(|instance| instance.value(name) == Some(first))
        .then(|| first.to_string())
}


/// Returns the most frequent target value among `instances`.
/// Ties go to the label that reaches the highest count first
/// while walking the target domain in order.
/// Returns `None` if no instance carries a label of the domain.
pub fn majority_class(instances: &[Instance], target: &Attribute)
    -> Option<String>
{
    let mut best: Option<(&str, usize)> = None;
    for label in target.unique_values() {
        let count = target.count(instances, label);
        if count > best.map_or(0, |(_, c)| c) {
            best = Some((label.as_str(), count));
        }
    }
    best.map(|(label, _)| label.to_string())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::schema::AttributeSchema;

    fn schema() -> Schema {
        Schema {
            target: "class".into(),
            attributes: vec![
                AttributeSchema { name: "x".into(), kind: AttributeKind::Numeric },
                AttributeSchema { name: "class".into(), kind: AttributeKind::Categorical },
            ],
        }
    }

    #[test]
    fn target_is_stripped_from_attributes() {
        let rows = vec![vec!["1.0", "a"], vec!["2.0", "b"]];
        let data = Dataset::from_rows(&schema(), rows).unwrap();
        assert_eq!(data.attributes().len(), 1);
        assert_eq!(data.attributes()[0].name(), "x");
        assert_eq!(data.target().name(), "class");
        assert_eq!(data.instances()[1].number(), 1);
    }

    #[test]
    fn row_width_mismatch_is_rejected() {
        let rows = vec![vec!["1.0", "a", "extra"]];
        let res = Dataset::from_rows(&schema(), rows);
        assert!(matches!(res, Err(C45Error::Dataset(_))));
    }

    #[test]
    fn unparsable_numeric_value_is_rejected() {
        let rows = vec![vec!["one", "a"]];
        let res = Dataset::from_rows(&schema(), rows);
        assert!(matches!(res, Err(C45Error::Dataset(_))));
    }

    #[test]
    fn majority_ties_go_to_first_label_in_domain() {
        let rows = vec![
            vec!["1", "b"], vec!["2", "a"], vec!["3", "b"], vec!["4", "a"],
        ];
        let data = Dataset::from_rows(&schema(), rows).unwrap();
        let label = majority_class(data.instances(), data.target());
        assert_eq!(label.as_deref(), Some("a"));
    }

    #[test]
    fn percentage_split_is_seeded() {
        let rows = (0..10).map(|i| vec![i.to_string(), "a".to_string()]);
        let mut d1 = Dataset::from_rows(&schema(), rows.clone()).unwrap();
        let mut d2 = Dataset::from_rows(&schema(), rows).unwrap();
        d1.percentage_split(70.0, 7).unwrap();
        d2.percentage_split(70.0, 7).unwrap();

        assert_eq!(d1.training_instances().len(), 7);
        assert_eq!(d1.testing_instances().len(), 3);
        assert_eq!(d1.training_instances(), d2.training_instances());
    }

    #[test]
    fn percentage_out_of_range_is_rejected() {
        let rows = vec![vec!["1", "a"]];
        let mut data = Dataset::from_rows(&schema(), rows).unwrap();
        let res = data.percentage_split(120.0, 0);
        assert!(matches!(res, Err(C45Error::InvalidConfig(_))));
    }
}
