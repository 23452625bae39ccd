use super::*;
use crate::types::*;

/// Helper function to create the schema shared by most tests
fn create_test_schema() -> Schema {
    Schema {
        tables: vec![
            Table::new("users")
                .with_column(Column::new("id", "int4").primary_key())
                .with_column(Column::new("email", "text").nullable())
                .with_column(Column::new("role", "user_role").with_default()),
            Table::new("addresses")
                .with_column(Column::new("street", "text").nullable())
                .with_column(Column::new("id", "int4")),
            Table::new("active_users")
                .view()
                .with_column(Column::new("id", "int4")),
            Table::new("migrations").with_column(Column::new("id", "int4")),
        ],
        enums: vec![
            EnumDefinition::new("user_role", ["member", "admin"]),
            EnumDefinition::new("migration_state", ["pending", "applied"]),
        ],
        type_mapping: TypeMapping::new()
            .with("number", ["int4"])
            .with("string", ["text"]),
    }
}

fn full_options() -> GeneratorOptions {
    GeneratorOptions {
        header: Some("/* generated */".to_string()),
        table_names: true,
        insert_types: true,
        optionals: true,
        semicolons: true,
        exclude: vec!["migrations".to_string(), "migration_state".to_string()],
        ..Default::default()
    }
}

#[cfg(test)]
mod orchestrator_tests {
    use super::*;

    #[test]
    fn test_generate_full_output() {
        let output = generate(&full_options(), &create_test_schema());

        let expected = "/* generated */\n\
\n\
export type Tables = 'addresses' | 'users';\n\
\n\
export enum Table {\n  Address = 'addresses',\n  User = 'users',\n}\n\
\n\
export enum UserRole {\n  admin = 'admin',\n  member = 'member',\n}\n\
\n\
export interface ActiveUser {\n  id: number;\n};\n\
\n\
export interface Address {\n  id: number;\n  street?: string;\n};\n\
\n\
export interface AddressInsert {\n  id: number;\n  street?: string;\n};\n\
\n\
export interface User {\n  email?: string;\n  id: number;\n  role: UserRole;\n};\n\
\n\
export interface UserInsert {\n  email?: string;\n  id: number;\n  role?: UserRole;\n};\n";

        assert_eq!(output, expected);
    }

    #[test]
    fn test_generate_defaults() {
        let schema = Schema {
            tables: vec![Table::new("users").with_column(Column::new("email", "text").nullable())],
            enums: vec![EnumDefinition::new("mood", ["ok"])],
            type_mapping: TypeMapping::new().with("string", ["text"]),
        };

        let output = TypeScriptGenerator::new().generate(&schema);
        assert_eq!(
            output,
            "export enum Mood {\n  ok = 'ok',\n}\n\nexport interface User {\n  email: string | null\n}\n"
        );
    }

    #[test]
    fn test_empty_schema_produces_empty_output() {
        let output = TypeScriptGenerator::new().generate(&Schema::default());
        assert_eq!(output, "");
    }

    #[test]
    fn test_header_only() {
        let options = GeneratorOptions {
            header: Some("// header".to_string()),
            ..Default::default()
        };
        assert_eq!(generate(&options, &Schema::default()), "// header\n\n");
    }

    #[test]
    fn test_empty_header_is_skipped() {
        let options = GeneratorOptions {
            header: Some(String::new()),
            ..Default::default()
        };
        let schema = Schema {
            tables: vec![Table::new("users").with_column(Column::new("id", "int4"))],
            type_mapping: TypeMapping::new().with("number", ["int4"]),
            ..Default::default()
        };
        assert_eq!(generate(&options, &schema), "export interface User {\n  id: number\n}\n");
        assert_eq!(generate(&options, &Schema::default()), "");
    }

    #[test]
    fn test_table_names_without_eligible_tables() {
        let options = GeneratorOptions {
            table_names: true,
            ..Default::default()
        };
        let schema = Schema {
            tables: vec![Table::new("report").view()],
            ..Default::default()
        };
        let output = generate(&options, &schema);
        assert!(output.starts_with("export type Tables = never\n\nexport enum Table {}\n\n"));
        assert!(output.ends_with("export interface Report {}\n"));
    }

    #[test]
    fn test_generate_types_counts() {
        let generated = TypeScriptGenerator::with_options(full_options()).generate_types(&create_test_schema());
        assert_eq!(generated.enum_count, 1);
        assert_eq!(generated.table_count, 3);
        assert_eq!(generated.insert_count, 2);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn test_excluded_names_never_declared() {
        let output = generate(&full_options(), &create_test_schema());
        assert!(!output.contains("Migration"));
        assert!(!output.contains("'migrations'"));
        assert!(!output.contains("MigrationState"));
    }

    #[test]
    fn test_permuted_input_gives_identical_output() {
        let schema = create_test_schema();

        let mut permuted = schema.clone();
        permuted.tables.reverse();
        permuted.enums.reverse();
        for table in &mut permuted.tables {
            table.columns.reverse();
        }
        for definition in &mut permuted.enums {
            definition.values.reverse();
        }

        let options = full_options();
        assert_eq!(generate(&options, &schema), generate(&options, &permuted));
    }

    #[test]
    fn test_generation_is_idempotent_and_does_not_mutate_input() {
        let schema = create_test_schema();
        let snapshot = schema.clone();
        let generator = TypeScriptGenerator::with_options(full_options());

        let first = generator.generate(&schema);
        let second = generator.generate(&schema);
        assert_eq!(first, second);
        assert_eq!(schema, snapshot);
    }

    #[test]
    fn test_unresolved_array_is_array_of_any() {
        let schema = Schema {
            tables: vec![Table::new("shapes").with_column(Column::new("points", "_point"))],
            ..Default::default()
        };
        let output = TypeScriptGenerator::new().generate(&schema);
        assert!(output.contains("  points: Array<any>\n"));
        assert!(!output.contains("points: any"));
    }

    #[test]
    fn test_insert_variant_optionality() {
        let schema = Schema {
            tables: vec![Table::new("users")
                .with_column(Column::new("id", "int4"))
                .with_column(Column::new("email", "text").nullable())
                .with_column(Column::new("role", "text").with_default())],
            enums: vec![],
            type_mapping: TypeMapping::new()
                .with("number", ["int4"])
                .with("string", ["text"]),
        };
        let options = GeneratorOptions {
            optionals: true,
            insert_types: true,
            ..Default::default()
        };

        let output = generate(&options, &schema);
        let (row, insert) = output
            .split_once("export interface UserInsert")
            .expect("insert declaration should be present");

        assert!(row.contains("  email?: string\n"));
        assert!(row.contains("  id: number\n"));
        assert!(row.contains("  role: string\n"));
        assert!(insert.contains("  email?: string\n"));
        assert!(insert.contains("  id: number\n"));
        assert!(insert.contains("  role?: string\n"));
    }

    #[test]
    fn test_concurrent_generation() {
        let schema = create_test_schema();
        let options = full_options();
        let expected = generate(&options, &schema);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| generate(&options, &schema)))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
