use crate::generator::name_formatter::to_title_word;
use crate::types::{EnumDefinition, TypeMapping, ARRAY_MARKER};
use std::collections::HashMap;
use tracing::debug;

/// Target type used when neither the mapping nor an enum matches
pub const UNKNOWN_TYPE: &str = "any";

/// Resolves native column types to TypeScript type names
///
/// The type mapping is inverted once on construction. Lookup order is
/// always: mapping, then enum names, then [`UNKNOWN_TYPE`].
pub struct TypeResolver<'a> {
    /// Native type name to target type name
    native_to_target: HashMap<&'a str, &'a str>,
    /// Enum definitions by exact name
    enums: HashMap<&'a str, &'a EnumDefinition>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(type_mapping: &'a TypeMapping, enums: &'a [EnumDefinition]) -> Self {
        let mut native_to_target = HashMap::new();
        for (target, natives) in type_mapping.iter() {
            for native in natives {
                // first key in mapping order wins
                native_to_target.entry(native.as_str()).or_insert(target);
            }
        }

        let mut enum_index = HashMap::new();
        for definition in enums {
            enum_index.entry(definition.name.as_str()).or_insert(definition);
        }

        Self {
            native_to_target,
            enums: enum_index,
        }
    }

    /// Resolve a native type, wrapping array-marked types as `Array<...>`
    pub fn resolve(&self, native_type: &str) -> String {
        match native_type.strip_prefix(ARRAY_MARKER) {
            Some(element) => format!("Array<{}>", self.resolve_element(element)),
            None => self.resolve_element(native_type),
        }
    }

    fn resolve_element(&self, native_type: &str) -> String {
        if let Some(target) = self.native_to_target.get(native_type) {
            return (*target).to_string();
        }

        if let Some(definition) = self.enums.get(native_type) {
            return to_title_word(&definition.name);
        }

        debug!(native_type, "No type mapping or enum found, falling back to {}", UNKNOWN_TYPE);
        UNKNOWN_TYPE.to_string()
    }
}

/// One-shot resolution without building a reusable resolver
pub fn resolve(type_mapping: &TypeMapping, native_type: &str, enums: &[EnumDefinition]) -> String {
    TypeResolver::new(type_mapping, enums).resolve(native_type)
}
