// TypeScript declaration generator
pub mod enum_emitter;
pub mod name_formatter;
pub mod options;
pub mod table_emitter;
pub mod type_resolver;
pub mod typescript;

#[cfg(test)]
mod tests;

pub use enum_emitter::EnumEmitter;
pub use name_formatter::*;
pub use options::GeneratorOptions;
pub use table_emitter::{DeclarationKind, TableEmitter};
pub use type_resolver::{resolve, TypeResolver, UNKNOWN_TYPE};
pub use typescript::{generate, GeneratedTypes, TypeScriptGenerator};
