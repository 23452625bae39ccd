use crate::generator::enum_emitter::EnumEmitter;
use crate::generator::name_formatter::{singularize_type_name, sorted_by_name, string_literal};
use crate::generator::options::GeneratorOptions;
use crate::generator::table_emitter::TableEmitter;
use crate::generator::type_resolver::TypeResolver;
use crate::types::{Schema, Table};
use tracing::info;

/// Generated TypeScript source with declaration counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTypes {
    /// Full source text
    pub source: String,
    /// Number of enum declarations emitted
    pub enum_count: usize,
    /// Number of tables emitted (each yields one or two declarations)
    pub table_count: usize,
    /// Number of insert declarations emitted
    pub insert_count: usize,
}

/// Assembles header, table names, enums and tables into one source text
pub struct TypeScriptGenerator {
    options: GeneratorOptions,
}

impl TypeScriptGenerator {
    /// Create a generator with default options
    pub fn new() -> Self {
        Self {
            options: GeneratorOptions::default(),
        }
    }

    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// Generate the declaration source for a schema
    pub fn generate(&self, schema: &Schema) -> String {
        self.generate_types(schema).source
    }

    /// Generate the declaration source together with counts
    pub fn generate_types(&self, schema: &Schema) -> GeneratedTypes {
        let options = &self.options;
        let resolver = TypeResolver::new(&schema.type_mapping, &schema.enums);
        let enum_emitter = EnumEmitter::new(options);
        let table_emitter = TableEmitter::new(options, &resolver);

        let mut source = String::new();

        if let Some(header) = options.header.as_deref().filter(|header| !header.is_empty()) {
            source.push_str(header);
            source.push_str("\n\n");
        }

        if options.table_names {
            source.push_str(&self.render_table_names(&schema.tables));
            source.push('\n');
        }

        let enum_blocks = enum_emitter.render_all(&schema.enums);
        if !enum_blocks.is_empty() {
            source.push_str(&enum_blocks.join("\n"));
            source.push('\n');
        }

        let table_blocks = table_emitter.render_all(&schema.tables);
        source.push_str(&table_blocks.join("\n"));

        let insert_count = schema
            .tables
            .iter()
            .filter(|table| !options.is_excluded(&table.name))
            .filter(|table| table_emitter.emits_insert_type(table))
            .count();

        info!(
            enums = enum_blocks.len(),
            tables = table_blocks.len(),
            insert_types = insert_count,
            bytes = source.len(),
            "Generated TypeScript declarations"
        );

        GeneratedTypes {
            source,
            enum_count: enum_blocks.len(),
            table_count: table_blocks.len(),
            insert_count,
        }
    }

    /// Render the `Tables` union and `Table` enum for non-view, non-excluded tables
    pub fn render_table_names(&self, tables: &[Table]) -> String {
        let options = &self.options;
        let eligible = tables
            .iter()
            .filter(|table| !table.is_view && !options.is_excluded(&table.name));
        let eligible = sorted_by_name(eligible, |table| table.name.as_str());

        let union = if eligible.is_empty() {
            "never".to_string()
        } else {
            eligible
                .iter()
                .map(|table| string_literal(&table.name))
                .collect::<Vec<_>>()
                .join(" | ")
        };

        let mut out = format!("export type Tables = {}{}\n\n", union, options.terminator());

        out.push_str("export enum Table {");
        if !eligible.is_empty() {
            out.push('\n');
        }
        for table in &eligible {
            out.push_str(&format!(
                "  {} = {},\n",
                singularize_type_name(&table.name),
                string_literal(&table.name)
            ));
        }
        out.push_str("}\n");
        out
    }
}

impl Default for TypeScriptGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate declarations for a schema in one call
pub fn generate(options: &GeneratorOptions, schema: &Schema) -> String {
    TypeScriptGenerator::with_options(options.clone()).generate(schema)
}
