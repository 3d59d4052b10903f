//! Defines `DatasetReader`, which reads a CSV file and its schema.
use std::path::Path;

use crate::error::{C45Error, Result};
use super::{dataset::Dataset, schema::Schema};


/// The percentage of instances used for training by default.
pub const DEFAULT_PERCENTAGE_SPLIT: f64 = 66.0;
/// The seed used for shuffling by default.
pub const DEFAULT_SEED: u64 = 1234;


/// A struct that returns [`Dataset`].
/// Using this struct, one can read a CSV file described by
/// a JSON schema and split it into training/testing partitions.
/// # Example
/// ```no_run
/// use c45tree::prelude::*;
///
/// let dataset = DatasetReader::new()
///     .file("tests/dataset/tennis.csv")
///     .schema("tests/dataset/tennis-schema.json")
///     .percentage_split(66.0)
///     .seed(777)
///     .read()
///     .unwrap();
/// ```
pub struct DatasetReader<P, Q> {
    file: Option<P>,
    schema: Option<Q>,
    percentage_split: f64,
    seed: u64,
}


impl<P, Q> DatasetReader<P, Q> {
    /// Construct a new instance of [`DatasetReader`].
    /// By default, [`DatasetReader`] sets the parameters as follows;
    /// ```text
    /// percentage_split: DEFAULT_PERCENTAGE_SPLIT == 66.0,
    /// seed: DEFAULT_SEED == 1234,
    /// ```
    pub fn new() -> Self {
        Self {
            file: None,
            schema: None,
            percentage_split: DEFAULT_PERCENTAGE_SPLIT,
            seed: DEFAULT_SEED,
        }
    }


    /// Set the percentage of instances used for training.
    /// Must be in `[0, 100]`.
    pub fn percentage_split(mut self, percentage: f64) -> Self {
        self.percentage_split = percentage;
        self
    }


    /// Set the seed of the randomness for shuffling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}


impl<P, Q> Default for DatasetReader<P, Q> {
    fn default() -> Self {
        Self::new()
    }
}


impl<P, Q> DatasetReader<P, Q>
    where P: AsRef<Path>
{
    /// Set the data file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}


impl<P, Q> DatasetReader<P, Q>
    where Q: AsRef<Path>
{
    /// Set the schema file name.
    pub fn schema(mut self, schema: Q) -> Self {
        self.schema = Some(schema);
        self
    }
}


impl<P, Q> DatasetReader<P, Q>
    where P: AsRef<Path>,
          Q: AsRef<Path>,
{
    /// Reads the files based on the arguments,
    /// and returns the split [`Dataset`].
    /// The same reader can be read repeatedly with different seeds,
    /// see [`DatasetReader::read_with_seed`].
    pub fn read(&self) -> Result<Dataset> {
        self.read_with_seed(self.seed)
    }


    /// Same as [`DatasetReader::read`], but shuffles with `seed`.
    pub fn read_with_seed(&self, seed: u64) -> Result<Dataset> {
        let file = self.file.as_ref()
            .ok_or_else(|| C45Error::config("the data file is not set"))?;
        let schema = self.schema.as_ref()
            .ok_or_else(|| C45Error::config("the schema file is not set"))?;

        let schema = Schema::from_json_file(schema)?;
        let mut dataset = Dataset::from_csv(file, &schema)?;
        dataset.percentage_split(self.percentage_split, seed)?;
        Ok(dataset)
    }
}
