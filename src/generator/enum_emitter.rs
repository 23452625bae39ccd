use crate::generator::name_formatter::{
    format_enum_member, sorted_by_name, string_literal, to_title_word,
};
use crate::generator::options::GeneratorOptions;
use crate::types::EnumDefinition;
use tracing::debug;

/// Renders `export enum` declarations from enum definitions
pub struct EnumEmitter<'a> {
    options: &'a GeneratorOptions,
}

impl<'a> EnumEmitter<'a> {
    pub fn new(options: &'a GeneratorOptions) -> Self {
        Self { options }
    }

    /// Render every non-excluded enum, sorted by name, separated by blank lines
    pub fn render(&self, enums: &[EnumDefinition]) -> String {
        self.render_all(enums).join("\n")
    }

    /// Render each non-excluded enum as its own block, sorted by name
    pub fn render_all(&self, enums: &[EnumDefinition]) -> Vec<String> {
        let included = enums
            .iter()
            .filter(|definition| !self.options.is_excluded(&definition.name));

        sorted_by_name(included, |definition| definition.name.as_str())
            .into_iter()
            .map(|definition| self.render_enum(definition))
            .collect()
    }

    /// Render a single enum declaration
    pub fn render_enum(&self, definition: &EnumDefinition) -> String {
        debug!(
            enum_name = %definition.name,
            values = definition.values.len(),
            "Rendering enum"
        );

        let mut out = format!("export enum {} {{", to_title_word(&definition.name));
        if !definition.values.is_empty() {
            out.push('\n');
        }

        for value in sorted_by_name(definition.values.iter(), |value| value.as_str()) {
            out.push_str(&format!(
                "  {} = {},\n",
                format_enum_member(self.options, value),
                string_literal(value)
            ));
        }

        out.push_str("}\n");
        out
    }
}
