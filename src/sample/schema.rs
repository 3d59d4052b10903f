//! Defines the JSON schema that names and types the CSV columns.
use serde::{Serialize, Deserialize};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;
use super::attribute::AttributeKind;


/// Name and kind of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchema {
    /// Column name.
    pub name: String,
    /// Column kind, written as `"CATEGORICAL"` or `"NUMERIC"`.
    #[serde(rename = "type", alias = "kind")]
    pub kind: AttributeKind,
}


/// The schema of a dataset file.
/// Columns are listed in the order they appear in each row.
///
/// ```json
/// {
///     "target": "PlayTennis",
///     "attributes": [
///         { "name": "Outlook", "type": "CATEGORICAL" },
///         { "name": "PlayTennis", "type": "CATEGORICAL" }
///     ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Name of the attribute to classify.
    pub target: String,
    /// Every column, the target included.
    pub attributes: Vec<AttributeSchema>,
}


impl Schema {
    /// Read a schema from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let schema = serde_json::from_reader(BufReader::new(file))?;
        Ok(schema)
    }


    /// Parse a schema from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let schema = serde_json::from_str(json)?;
        Ok(schema)
    }
}
