use crate::error::SqltsError;
use crate::types::TypeMapping;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Database dialect a schema snapshot was discovered from
///
/// Each dialect carries a built-in mapping from its native type names to
/// TypeScript types. Snapshots may extend or override it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgres,
    Mysql,
    Sqlite,
    Mssql,
    /// No built-in mapping; the snapshot must carry its own
    None,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::Postgres,
        Dialect::Mysql,
        Dialect::Sqlite,
        Dialect::Mssql,
        Dialect::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Mysql => "mysql",
            Dialect::Sqlite => "sqlite",
            Dialect::Mssql => "mssql",
            Dialect::None => "none",
        }
    }

    /// Built-in native type mapping for the dialect
    pub fn default_type_mapping(&self) -> TypeMapping {
        match self {
            Dialect::Postgres => TypeMapping::new()
                .with(
                    "number",
                    [
                        "int2", "int4", "int8", "smallint", "integer", "bigint", "float4",
                        "float8", "real", "double precision", "numeric", "decimal", "money",
                        "oid", "serial", "bigserial", "smallserial",
                    ],
                )
                .with(
                    "string",
                    [
                        "text", "varchar", "character varying", "char", "character", "bpchar",
                        "citext", "name", "uuid", "inet", "cidr", "macaddr", "time", "timetz",
                        "interval", "xml", "tsvector", "bit", "varbit",
                    ],
                )
                .with(
                    "Date",
                    [
                        "date",
                        "timestamp",
                        "timestamptz",
                        "timestamp without time zone",
                        "timestamp with time zone",
                    ],
                )
                .with("boolean", ["bool", "boolean"])
                .with("Object", ["json", "jsonb"])
                .with("Buffer", ["bytea"]),
            Dialect::Mysql => TypeMapping::new()
                .with(
                    "number",
                    [
                        "tinyint", "smallint", "mediumint", "int", "integer", "bigint", "float",
                        "double", "decimal", "numeric", "year", "bit",
                    ],
                )
                .with(
                    "string",
                    [
                        "char", "varchar", "tinytext", "text", "mediumtext", "longtext", "enum",
                        "set", "time",
                    ],
                )
                .with("Date", ["date", "datetime", "timestamp"])
                .with("boolean", ["bool", "boolean"])
                .with("Object", ["json"])
                .with(
                    "Buffer",
                    ["binary", "varbinary", "tinyblob", "blob", "mediumblob", "longblob"],
                ),
            Dialect::Sqlite => TypeMapping::new()
                .with("number", ["integer", "int", "real", "numeric", "float", "double"])
                .with("string", ["text", "varchar", "char", "clob"])
                .with("Date", ["date", "datetime"])
                .with("boolean", ["boolean"])
                .with("Buffer", ["blob"]),
            Dialect::Mssql => TypeMapping::new()
                .with(
                    "number",
                    [
                        "tinyint", "smallint", "int", "bigint", "decimal", "numeric", "float",
                        "real", "money", "smallmoney",
                    ],
                )
                .with(
                    "string",
                    [
                        "char", "varchar", "text", "nchar", "nvarchar", "ntext",
                        "uniqueidentifier", "time", "xml",
                    ],
                )
                .with(
                    "Date",
                    ["date", "datetime", "datetime2", "smalldatetime", "datetimeoffset"],
                )
                .with("boolean", ["bit"])
                .with("Buffer", ["binary", "varbinary", "image"]),
            Dialect::None => TypeMapping::new(),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = SqltsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "mysql" | "mariadb" => Ok(Dialect::Mysql),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "mssql" | "sqlserver" => Ok(Dialect::Mssql),
            "none" => Ok(Dialect::None),
            other => Err(SqltsError::config(format!("unknown dialect: {}", other))),
        }
    }
}
