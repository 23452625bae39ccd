use crate::error::{Result, SqltsError};
use crate::loader::type_mapping::Dialect;
use crate::types::{Schema, TypeMapping};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Loads schema snapshots produced by a schema discovery tool
///
/// The effective type mapping of a loaded schema is, from lowest to highest
/// precedence: the dialect defaults, the snapshot's own `typeMapping`, and
/// any custom mappings registered on the loader.
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    /// Dialect supplying the default type mapping
    dialect: Dialect,
    /// Custom type mappings applied on top of every snapshot
    custom_mappings: TypeMapping,
}

impl SchemaLoader {
    /// Create a new loader for a dialect
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            custom_mappings: TypeMapping::new(),
        }
    }

    /// Add a custom mapping for a target type, replacing any default entry of that name
    pub fn add_custom_mapping<I, S>(&mut self, target: impl Into<String>, natives: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_mappings.insert(target, natives);
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Type mapping used for a snapshot that brings none of its own
    pub fn base_type_mapping(&self) -> TypeMapping {
        self.dialect
            .default_type_mapping()
            .merged_with(&self.custom_mappings)
    }

    /// Load a snapshot from a JSON file
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Schema> {
        let path = path.as_ref();
        info!(path = %path.display(), dialect = %self.dialect, "Loading schema snapshot");

        let file = File::open(path)?;
        self.load_reader(BufReader::new(file)).map_err(|e| match e {
            SqltsError::Json(inner) => {
                SqltsError::schema(format!("invalid schema snapshot {}: {}", path.display(), inner))
            }
            other => other,
        })
    }

    /// Load a snapshot from any JSON reader
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Schema> {
        let schema: Schema = serde_json::from_reader(reader)?;
        Ok(self.finish(schema))
    }

    /// Load a snapshot from a JSON string
    pub fn load_str(&self, content: &str) -> Result<Schema> {
        let schema: Schema = serde_json::from_str(content)?;
        Ok(self.finish(schema))
    }

    /// Apply the effective type mapping to an already constructed schema
    pub fn finish(&self, mut schema: Schema) -> Schema {
        schema.type_mapping = self
            .dialect
            .default_type_mapping()
            .merged_with(&schema.type_mapping)
            .merged_with(&self.custom_mappings);

        debug!(
            tables = schema.tables.len(),
            enums = schema.enums.len(),
            mapped_targets = schema.type_mapping.len(),
            "Schema snapshot loaded"
        );

        schema
    }
}
