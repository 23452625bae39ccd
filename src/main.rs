use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, Level};

use sqlts::generator::GeneratorOptions;
use sqlts::loader::{Dialect, SchemaLoader};
use sqlts::output::{run_batch, Destination, GenerationJob};

#[derive(Parser)]
#[command(name = "sqlts")]
#[command(about = "Generate TypeScript declarations from relational schema snapshots")]
#[command(version)]
#[command(long_about = "sqlts reads schema snapshots (tables, columns, enums and type mappings as JSON) and writes TypeScript interfaces, type aliases and enums describing them. Output is deterministic: the same snapshot and options always produce the same text.")]
#[command(after_help = "EXAMPLES:
    # Print declarations for a PostgreSQL snapshot
    sqlts generate -s schema.json

    # Write to a file with insert types, optionals and semicolons
    sqlts generate -s schema.json -o src/db.ts --insert-types --optionals --semicolons

    # Generate several snapshots in parallel into a directory
    sqlts generate -s app.json -s audit.json --out-dir generated/

    # Show the built-in type mapping for MySQL
    sqlts mappings --dialect mysql")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Set log level explicitly
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(ValueEnum, Clone, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DialectArg {
    Postgres,
    Mysql,
    Sqlite,
    Mssql,
    None,
}

impl From<DialectArg> for Dialect {
    fn from(dialect: DialectArg) -> Self {
        match dialect {
            DialectArg::Postgres => Dialect::Postgres,
            DialectArg::Mysql => Dialect::Mysql,
            DialectArg::Sqlite => Dialect::Sqlite,
            DialectArg::Mssql => Dialect::Mssql,
            DialectArg::None => Dialect::None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript declarations from schema snapshots
    Generate(GenerateArgs),

    /// Print the built-in type mapping of a dialect as JSON
    Mappings {
        /// Dialect whose default mapping is printed
        #[arg(long, value_enum, default_value = "postgres")]
        dialect: DialectArg,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Schema snapshot JSON file (repeatable)
    #[arg(short, long = "schema", value_name = "FILE", required = true)]
    schemas: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE", conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Output directory; each snapshot is written to <stem>.ts
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// JSON file with generator options; flags below override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Dialect supplying the default type mapping
    #[arg(long, value_enum, default_value = "postgres")]
    dialect: DialectArg,

    /// Declare rows with `export type X = {` instead of interfaces
    #[arg(long = "type")]
    type_alias: bool,

    /// Terminate members and declarations with semicolons
    #[arg(long)]
    semicolons: bool,

    /// Title-case enum member names
    #[arg(long)]
    pascal_enums: bool,

    /// Render nullable columns as optional fields instead of `| null`
    #[arg(long)]
    optionals: bool,

    /// Emit doc comments from table/column comments and primary keys
    #[arg(long)]
    comments: bool,

    /// Emit `Insert` declarations for tables
    #[arg(long)]
    insert_types: bool,

    /// Emit the `Tables` union and `Table` enum
    #[arg(long)]
    table_names: bool,

    /// Suffix appended to every table declaration name
    #[arg(long, value_name = "SUFFIX")]
    suffix: Option<String>,

    /// Table or enum name to leave out (repeatable)
    #[arg(long, value_name = "NAME")]
    exclude: Vec<String>,

    /// Text placed verbatim before all declarations
    #[arg(long, value_name = "TEXT", conflicts_with = "header_file")]
    header: Option<String>,

    /// File whose contents are placed verbatim before all declarations
    #[arg(long, value_name = "FILE")]
    header_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    info!("Starting sqlts v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Generate(args) => {
            if let Err(e) = execute_generate(args) {
                eprintln!("Generation failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Commands::Mappings { dialect } => {
            let mapping = Dialect::from(dialect).default_type_mapping();
            println!("{}", serde_json::to_string_pretty(&mapping)?);
        }
    }

    Ok(())
}

/// Resolve options and destinations, then run every generation job
fn execute_generate(args: GenerateArgs) -> Result<()> {
    let options = build_options(&args)?;
    debug!(?options, "Resolved generator options");

    if args.schemas.len() > 1 && args.out_dir.is_none() {
        bail!("--out-dir is required when generating more than one schema");
    }

    let jobs: Vec<GenerationJob> = args
        .schemas
        .iter()
        .map(|schema_path| {
            let destination = match (&args.out_dir, &args.output) {
                (Some(dir), _) => Destination::in_directory(dir, schema_path),
                (None, Some(path)) => Destination::File(path.clone()),
                (None, None) => Destination::Stdout,
            };
            GenerationJob::new(schema_path, destination, options.clone())
        })
        .collect();

    let loader = SchemaLoader::new(args.dialect.into());
    let reports = run_batch(&jobs, &loader);

    let mut failed = 0;
    for report in &reports {
        info!("{}", report.summary());
        if !report.is_success() {
            failed += 1;
        }
    }

    if failed > 0 {
        let first_error = reports
            .iter()
            .find_map(|report| report.result.as_ref().err())
            .map(ToString::to_string)
            .unwrap_or_default();
        bail!("{} of {} schema(s) failed: {}", failed, reports.len(), first_error);
    }

    Ok(())
}

/// Merge the config file (if any) with command-line flags
fn build_options(args: &GenerateArgs) -> Result<GeneratorOptions> {
    let mut options = match &args.config {
        Some(path) => GeneratorOptions::from_path(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => GeneratorOptions::default(),
    };

    options.type_alias |= args.type_alias;
    options.semicolons |= args.semicolons;
    options.pascal_enums |= args.pascal_enums;
    options.optionals |= args.optionals;
    options.comments |= args.comments;
    options.insert_types |= args.insert_types;
    options.table_names |= args.table_names;

    if let Some(suffix) = &args.suffix {
        options.suffix = suffix.clone();
    }
    options.exclude.extend(args.exclude.iter().cloned());

    if let Some(header) = &args.header {
        options.header = Some(header.clone());
    } else if let Some(path) = &args.header_file {
        let header = fs::read_to_string(path)
            .with_context(|| format!("reading header file {}", path.display()))?;
        options.header = Some(header.trim_end_matches('\n').to_string());
    }

    Ok(options)
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let log_level = if let Some(level) = &cli.log_level {
        level.clone().into()
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    // stdout carries generated source, so logs go to stderr
    if cli.json_logs {
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(cli.verbose)
            .with_line_number(cli.verbose)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_file(cli.verbose)
            .with_line_number(cli.verbose)
            .init();
    }

    Ok(())
}
