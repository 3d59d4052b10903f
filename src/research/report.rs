//! Markdown report of a tested [`C45`].
use tracing::info;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::decision_tree::C45;


/// Renders the results of a tested learner as Markdown:
/// dataset statistics, both trees, the test summary
/// and one table row per tested instance.
///
/// # Example
/// ```no_run
/// use c45tree::prelude::*;
///
/// let dataset = DatasetReader::new()
///     .file("tests/dataset/tennis.csv")
///     .schema("tests/dataset/tennis-schema.json")
///     .read()
///     .unwrap();
/// let mut c45 = C45Builder::new(dataset).build().unwrap();
/// c45.run().unwrap();
///
/// let path = Report::new(&c45)
///     .title("100-trials-best")
///     .write("results")
///     .unwrap();
/// ```
pub struct Report<'a> {
    c45: &'a C45,
    title: Option<String>,
}


impl<'a> Report<'a> {
    /// Construct a new instance of [`Report`].
    #[inline]
    pub fn new(c45: &'a C45) -> Self {
        Self { c45, title: None }
    }


    /// Set the title used for the output file names.
    /// Defaults to the dataset name.
    #[inline]
    pub fn title<S: ToString>(mut self, title: S) -> Self {
        self.title = Some(title.to_string());
        self
    }


    fn stem(&self) -> String {
        self.title.clone()
            .unwrap_or_else(|| self.c45.dataset().dataset_name().to_string())
    }


    /// Returns the Markdown text of the report.
    #[inline]
    pub fn render(&self) -> String {
        self.to_string()
    }


    /// Write `out-<title>.md` and the Graphviz files of both trees
    /// into `dir`, creating it if needed.
    /// Returns the path of the Markdown file.
    pub fn write<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let stem = self.stem();
        let path = dir.join(format!("out-{stem}.md"));
        fs::write(&path, self.render())?;

        if let Some(tree) = self.c45.unpruned_tree() {
            tree.to_dot_file(dir.join(format!("{stem}-unpruned.dot")))?;
        }
        if let Some(tree) = self.c45.pruned_tree() {
            tree.to_dot_file(dir.join(format!("{stem}-pruned.dot")))?;
        }

        info!(path = %path.display(), "report written");
        Ok(path)
    }
}


impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dataset = self.c45.dataset();
        let n_test = dataset.testing_instances().len();

        writeln!(f, "# Results for '{}' Data Set\n", dataset.dataset_name())?;

        writeln!(f, "## Statistics\n")?;
        writeln!(f, "Number of Instances: {}\n", dataset.instances().len())?;
        writeln!(f, "Percentage Train/Test Split: {}%\n", dataset.percentage())?;
        writeln!(
            f,
            "Training Instances: {}, Testing Instances: {n_test}\n",
            dataset.training_instances().len(),
        )?;

        let trees = [
            ("Unpruned", self.c45.unpruned_tree()),
            ("Pruned", self.c45.pruned_tree()),
        ];
        for (kind, tree) in trees {
            let Some(tree) = tree else { continue; };
            writeln!(f, "## {kind} Decision Tree\n")?;
            writeln!(f, "Nodes: {}, Height: {}\n", tree.node_count(), tree.height())?;
            writeln!(f, "```text\n{tree}```\n")?;
        }

        writeln!(f, "## Test Results\n")?;
        writeln!(
            f,
            "Correctly Classified {} out of {n_test} Instances\n",
            self.c45.num_correct(),
        )?;
        writeln!(f, "Accuracy: {:.2}%\n", self.c45.accuracy() * 100.0)?;
        writeln!(f, "Instance Breakdown:\n")?;


        // One row per tested instance:
        // its number, its attribute values, the prediction and the label.
        let attributes = dataset.attributes();
        write!(f, "| instance number |")?;
        for attribute in attributes {
            write!(f, " {} |", attribute.name())?;
        }
        writeln!(f, " predicted | actual |")?;
        writeln!(f, "|{}", " --- |".repeat(attributes.len() + 3))?;

        for result in self.c45.results() {
            write!(f, "| {} |", result.instance.number())?;
            for attribute in attributes {
                let value = result.instance.value(attribute.name())
                    .unwrap_or_default();
                write!(f, " {value} |")?;
            }
            writeln!(f, " {} | {} |", result.predicted, result.actual)?;
        }
        Ok(())
    }
}
