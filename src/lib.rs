pub mod error;
pub mod types;
pub mod generator;
pub mod loader;
pub mod output;

pub use error::{Result, SqltsError};
pub use generator::{generate, GeneratorOptions, TypeScriptGenerator};
pub use loader::{Dialect, SchemaLoader};
pub use types::{Column, EnumDefinition, Index, Schema, Table, TypeMapping};
