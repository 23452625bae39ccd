// Schema snapshot loading and dialect type mappings
pub mod schema_loader;
pub mod type_mapping;


pub use schema_loader::SchemaLoader;
pub use type_mapping::Dialect;
