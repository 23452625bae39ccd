use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

/// Leading character of a native type name that marks an array column
/// (`_int4` is an array of `int4`).
pub const ARRAY_MARKER: char = '_';

/// Snapshot of a relational schema as produced by a schema discovery tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Tables and views, in discovery order
    #[serde(default)]
    pub tables: Vec<Table>,
    /// Enumerated types
    #[serde(default)]
    pub enums: Vec<EnumDefinition>,
    /// Target type name to the native type names it represents
    #[serde(default)]
    pub type_mapping: TypeMapping,
}

/// Table or view definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Table name, unique within the schema
    pub name: String,
    /// Column definitions
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Table comment
    #[serde(default)]
    pub comment: Option<String>,
    /// Views never get an insert declaration
    #[serde(default)]
    pub is_view: bool,
}

/// Column definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name, unique within its table
    pub name: String,
    /// Native type name, possibly prefixed with [`ARRAY_MARKER`]
    #[serde(rename = "type", default)]
    pub type_name: String,
    /// Whether the column accepts NULL
    #[serde(default)]
    pub is_nullable: bool,
    /// Whether the column has a default value
    #[serde(default)]
    pub has_default: bool,
    /// Column comment
    #[serde(default)]
    pub comment: Option<String>,
    /// Indexes the column participates in
    #[serde(default)]
    pub indices: Vec<Index>,
}

/// Index descriptor attached to a column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    /// Index name
    #[serde(default)]
    pub name: Option<String>,
    /// Whether the index backs the primary key
    #[serde(default)]
    pub is_primary_key: bool,
}

/// Enumerated type definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDefinition {
    /// Enum type name, unique within the schema
    pub name: String,
    /// Enum labels; emission order is always re-derived by sorting
    #[serde(default)]
    pub values: Vec<String>,
}

/// Mapping from target type names to the native type names they represent
///
/// Keys keep their insertion (document) order; when a native type is listed
/// under several keys, the first one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeMapping {
    entries: IndexMap<String, Vec<String>>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn view(mut self) -> Self {
        self.is_view = true;
        self
    }
}

impl Column {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.indices.push(Index {
            name: None,
            is_primary_key: true,
        });
        self
    }

    /// True when any index on the column backs the primary key
    pub fn is_primary_key(&self) -> bool {
        self.indices.iter().any(|index| index.is_primary_key)
    }
}

impl EnumDefinition {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl TypeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add native type names under a target type, extending any existing entry
    pub fn insert<I, S>(&mut self, target: impl Into<String>, natives: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(target.into())
            .or_default()
            .extend(natives.into_iter().map(Into::into));
    }

    pub fn with<I, S>(mut self, target: impl Into<String>, natives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(target, natives);
        self
    }

    /// Native type names listed for a target type
    pub fn get(&self, target: &str) -> Option<&[String]> {
        self.entries.get(target).map(Vec::as_slice)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(target, natives)| (target.as_str(), natives.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Combine with an overriding mapping: keys present in `overrides`
    /// replace this mapping's entry wholesale, and native names claimed by
    /// an override are removed from the remaining base entries.
    pub fn merged_with(&self, overrides: &TypeMapping) -> TypeMapping {
        let claimed: Vec<&str> = overrides
            .entries
            .values()
            .flatten()
            .map(String::as_str)
            .collect();

        let mut entries = IndexMap::new();
        for (target, natives) in &self.entries {
            if overrides.entries.contains_key(target) {
                continue;
            }
            let kept: Vec<String> = natives
                .iter()
                .filter(|native| !claimed.contains(&native.as_str()))
                .cloned()
                .collect();
            if !kept.is_empty() {
                entries.insert(target.clone(), kept);
            }
        }
        for (target, natives) in &overrides.entries {
            entries.insert(target.clone(), natives.clone());
        }

        TypeMapping { entries }
    }
}
