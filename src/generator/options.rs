use crate::error::{Result, SqltsError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Configuration for TypeScript generation
///
/// Every flag defaults to `false`, the suffix to empty, with no exclusions
/// and no header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Declare rows as `export type X = {` instead of `export interface X {`
    #[serde(rename = "type")]
    pub type_alias: bool,
    /// Terminate members and declarations with `;`
    pub semicolons: bool,
    /// Title-case enum member keys instead of quoting the raw value
    pub pascal_enums: bool,
    /// Render nullable columns as optional fields instead of `| null`
    pub optionals: bool,
    /// Emit doc comments from schema comments and primary keys
    pub comments: bool,
    /// Emit an `Insert` declaration for every table that is not a view
    pub insert_types: bool,
    /// Emit the `Tables` union and `Table` enum
    pub table_names: bool,
    /// Appended to every table declaration name
    pub suffix: String,
    /// Table and enum names left out of the output
    pub exclude: Vec<String>,
    /// Text placed verbatim before all declarations
    pub header: Option<String>,
}

impl GeneratorOptions {
    /// Load options from a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading generator options");
        let content = fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| {
            SqltsError::config(format!("invalid options file {}: {}", path.display(), e))
        })
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Whether a table or enum name is excluded from output
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }

    /// Statement terminator for member lines and closing braces
    pub fn terminator(&self) -> &'static str {
        if self.semicolons {
            ";"
        } else {
            ""
        }
    }
}
