use crate::generator::name_formatter::{quote_if_needed, singularize_type_name, sorted_by_name};
use crate::generator::options::GeneratorOptions;
use crate::generator::type_resolver::TypeResolver;
use crate::types::{Column, Table};
use tracing::debug;

/// Which declaration of a table is being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// The row as read back from the table
    Row,
    /// The row as passed to an insert; nullable and defaulted columns may be omitted
    Insert,
}

/// Renders row (and insert) declarations for tables
pub struct TableEmitter<'a> {
    options: &'a GeneratorOptions,
    resolver: &'a TypeResolver<'a>,
}

impl DeclarationKind {
    /// Whether a column is rendered with the optional-field marker
    pub fn is_optional(self, column: &Column, options: &GeneratorOptions) -> bool {
        match self {
            DeclarationKind::Row => options.optionals && column.is_nullable,
            DeclarationKind::Insert => column.is_nullable || column.has_default,
        }
    }

    fn name_suffix(self, options: &GeneratorOptions) -> String {
        match self {
            DeclarationKind::Row => options.suffix.clone(),
            DeclarationKind::Insert => format!("Insert{}", options.suffix),
        }
    }
}

impl<'a> TableEmitter<'a> {
    pub fn new(options: &'a GeneratorOptions, resolver: &'a TypeResolver<'a>) -> Self {
        Self { options, resolver }
    }

    /// Render every non-excluded table, sorted by name, separated by blank lines
    pub fn render(&self, tables: &[Table]) -> String {
        self.render_all(tables).join("\n")
    }

    /// Render each non-excluded table as its own block, sorted by name.
    ///
    /// A block holds the row declaration followed, when enabled, by the
    /// insert declaration.
    pub fn render_all(&self, tables: &[Table]) -> Vec<String> {
        let included = tables
            .iter()
            .filter(|table| !self.options.is_excluded(&table.name));

        sorted_by_name(included, |table| table.name.as_str())
            .into_iter()
            .map(|table| self.render_table(table))
            .collect()
    }

    /// Render the declarations for one table
    pub fn render_table(&self, table: &Table) -> String {
        debug!(
            table = %table.name,
            columns = table.columns.len(),
            is_view = table.is_view,
            "Rendering table"
        );

        let columns = sorted_by_name(table.columns.iter(), |column| column.name.as_str());

        let mut out = self.render_declaration(table, &columns, DeclarationKind::Row);
        if self.emits_insert_type(table) {
            out.push('\n');
            out.push_str(&self.render_declaration(table, &columns, DeclarationKind::Insert));
        }
        out
    }

    /// Whether an insert declaration is emitted for the table
    pub fn emits_insert_type(&self, table: &Table) -> bool {
        self.options.insert_types && !table.is_view
    }

    /// Opening line of a declaration, e.g. `export interface User {`
    pub fn declaration_header(&self, table_name: &str, kind: DeclarationKind) -> String {
        let name = format!(
            "{}{}",
            singularize_type_name(table_name),
            kind.name_suffix(self.options)
        );

        if self.options.type_alias {
            format!("export type {} = {{", name)
        } else {
            format!("export interface {} {{", name)
        }
    }

    fn render_declaration(&self, table: &Table, columns: &[&Column], kind: DeclarationKind) -> String {
        let mut out = self.table_comment(table);
        out.push_str(&self.declaration_header(&table.name, kind));
        if !columns.is_empty() {
            out.push('\n');
        }

        for column in columns {
            out.push_str(&self.column_comment(column));
            out.push_str(&self.render_column(column, kind));
        }

        out.push('}');
        out.push_str(self.options.terminator());
        out.push('\n');
        out
    }

    /// Render one member line, including indentation and trailing newline
    pub fn render_column(&self, column: &Column, kind: DeclarationKind) -> String {
        let optional = if kind.is_optional(column, self.options) { "?" } else { "" };
        let null_union = if column.is_nullable && !self.options.optionals {
            " | null"
        } else {
            ""
        };

        format!(
            "  {}{}: {}{}{}\n",
            quote_if_needed(&column.name),
            optional,
            self.resolver.resolve(&column.type_name),
            null_union,
            self.options.terminator()
        )
    }

    fn table_comment(&self, table: &Table) -> String {
        match non_empty(&table.comment) {
            Some(comment) if self.options.comments => {
                let mut out = String::from("/**\n");
                for line in comment.lines() {
                    out.push_str(&format!(" * {}\n", line));
                }
                out.push_str("*/\n");
                out
            }
            _ => String::new(),
        }
    }

    fn column_comment(&self, column: &Column) -> String {
        if !self.options.comments {
            return String::new();
        }

        let comment = non_empty(&column.comment);
        let is_primary_key = column.is_primary_key();
        if comment.is_none() && !is_primary_key {
            return String::new();
        }

        let mut out = String::from("  /**\n");
        if let Some(comment) = comment {
            for line in comment.lines() {
                out.push_str(&format!("   * {}\n", line));
            }
        }
        if is_primary_key {
            out.push_str("   * PRIMARY KEY\n");
        }
        out.push_str("  */\n");
        out
    }
}

/// Blank comments count as absent
fn non_empty(comment: &Option<String>) -> Option<&str> {
    comment.as_deref().filter(|comment| !comment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EnumDefinition, TypeMapping};

    fn mapping() -> TypeMapping {
        TypeMapping::new()
            .with("number", ["int4"])
            .with("string", ["text"])
    }

    fn users() -> Table {
        Table::new("users")
            .with_column(Column::new("role", "text").with_default())
            .with_column(Column::new("id", "int4"))
            .with_column(Column::new("email", "text").nullable())
    }

    fn render(options: &GeneratorOptions, table: &Table) -> String {
        let mapping = mapping();
        let enums: Vec<EnumDefinition> = Vec::new();
        let resolver = TypeResolver::new(&mapping, &enums);
        TableEmitter::new(options, &resolver).render_table(table)
    }

    #[test]
    fn test_render_interface_with_null_union() {
        let options = GeneratorOptions::default();
        assert_eq!(
            render(&options, &users()),
            "export interface User {\n  email: string | null\n  id: number\n  role: string\n}\n"
        );
    }

    #[test]
    fn test_render_type_alias_with_semicolons_and_suffix() {
        let options = GeneratorOptions {
            type_alias: true,
            semicolons: true,
            suffix: "Entity".to_string(),
            ..Default::default()
        };
        assert_eq!(
            render(&options, &users()),
            "export type UserEntity = {\n  email: string | null;\n  id: number;\n  role: string;\n};\n"
        );
    }

    #[test]
    fn test_optionals_and_insert_types() {
        let options = GeneratorOptions {
            optionals: true,
            insert_types: true,
            ..Default::default()
        };
        assert_eq!(
            render(&options, &users()),
            "export interface User {\n  email?: string\n  id: number\n  role: string\n}\n\
             \n\
             export interface UserInsert {\n  email?: string\n  id: number\n  role?: string\n}\n"
        );
    }

    #[test]
    fn test_insert_type_keeps_null_union_without_optionals() {
        let options = GeneratorOptions {
            insert_types: true,
            suffix: "Row".to_string(),
            ..Default::default()
        };
        let rendered = render(&options, &users());
        assert!(rendered.contains("export interface UserInsertRow {\n  email?: string | null\n  id: number\n  role?: string\n}\n"));
    }

    #[test]
    fn test_views_get_no_insert_type() {
        let options = GeneratorOptions {
            insert_types: true,
            ..Default::default()
        };
        let view = Table::new("active_users")
            .view()
            .with_column(Column::new("id", "int4"));
        assert_eq!(render(&options, &view), "export interface ActiveUser {\n  id: number\n}\n");
    }

    #[test]
    fn test_comments() {
        let options = GeneratorOptions {
            comments: true,
            ..Default::default()
        };
        let table = Table::new("accounts")
            .with_comment("Billing accounts")
            .with_column(Column::new("id", "int4").primary_key().with_comment("Surrogate key"))
            .with_column(Column::new("owner", "int4").primary_key())
            .with_column(Column::new("plan", "text").with_comment("Current plan"))
            .with_column(Column::new("status", "text"));

        assert_eq!(
            render(&options, &table),
            "/**\n * Billing accounts\n*/\n\
             export interface Account {\n\
             \x20 /**\n   * Surrogate key\n   * PRIMARY KEY\n  */\n\
             \x20 id: number\n\
             \x20 /**\n   * PRIMARY KEY\n  */\n\
             \x20 owner: number\n\
             \x20 /**\n   * Current plan\n  */\n\
             \x20 plan: string\n\
             \x20 status: string\n\
             }\n"
        );
    }

    #[test]
    fn test_empty_comments_are_skipped() {
        let options = GeneratorOptions {
            comments: true,
            ..Default::default()
        };
        let table = Table::new("users")
            .with_comment("")
            .with_column(Column::new("id", "int4").with_comment(""))
            .with_column(Column::new("key", "int4").primary_key().with_comment(""));
        assert_eq!(
            render(&options, &table),
            "export interface User {\n  id: number\n  /**\n   * PRIMARY KEY\n  */\n  key: number\n}\n"
        );
    }

    #[test]
    fn test_comments_disabled() {
        let options = GeneratorOptions::default();
        let table = Table::new("accounts")
            .with_comment("Billing accounts")
            .with_column(Column::new("id", "int4").primary_key().with_comment("Surrogate key"));
        assert_eq!(render(&options, &table), "export interface Account {\n  id: number\n}\n");
    }

    #[test]
    fn test_quoted_names_and_unknown_types() {
        let options = GeneratorOptions::default();
        let table = Table::new("events")
            .with_column(Column::new("event-type", "text"))
            .with_column(Column::new("payload", "_jsonb"))
            .with_column(Column::new("location", "geometry").nullable());
        assert_eq!(
            render(&options, &table),
            "export interface Event {\n  'event-type': string\n  location: any | null\n  payload: Array<any>\n}\n"
        );
    }

    #[test]
    fn test_empty_table() {
        let options = GeneratorOptions::default();
        assert_eq!(render(&options, &Table::new("things")), "export interface Thing {}\n");
    }

    #[test]
    fn test_does_not_reorder_input_columns() {
        let options = GeneratorOptions::default();
        let table = users();
        render(&options, &table);
        let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["role", "id", "email"]);
    }
}
