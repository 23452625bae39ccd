// Output writing and batch generation
use crate::error::{Result, SqltsError};
use crate::generator::{GeneratedTypes, GeneratorOptions, TypeScriptGenerator};
use crate::loader::SchemaLoader;
use rayon::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Where generated source is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// Destination for a `generate` job writing into a directory: the
    /// schema file's stem with a `.ts` extension
    pub fn in_directory(directory: &Path, schema_path: &Path) -> Self {
        let stem = schema_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "schema".to_string());
        Destination::File(directory.join(format!("{}.ts", stem)))
    }
}

/// Write generated source, creating parent directories for file destinations
pub fn write_output(destination: &Destination, source: &str) -> Result<()> {
    match destination {
        Destination::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(source.as_bytes())?;
            handle.flush()?;
        }
        Destination::File(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    SqltsError::output(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
            fs::write(path, source)?;
            info!(path = %path.display(), bytes = source.len(), "Declarations written");
        }
    }
    Ok(())
}

/// One schema snapshot to generate declarations for
#[derive(Debug, Clone)]
pub struct GenerationJob {
    /// Path to the schema snapshot JSON
    pub schema_path: PathBuf,
    /// Where the declarations go
    pub destination: Destination,
    /// Generation options for this job
    pub options: GeneratorOptions,
}

/// Outcome of a single generation job
#[derive(Debug)]
pub struct JobReport {
    /// Snapshot the job read
    pub schema_path: PathBuf,
    /// Destination the job wrote to
    pub destination: Destination,
    /// Generated declaration counts, or the failure
    pub result: Result<GeneratedTypes>,
}

impl JobReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// One-line summary suitable for logs
    pub fn summary(&self) -> String {
        match &self.result {
            Ok(generated) => format!(
                "{}: {} enums, {} tables, {} insert types ({} bytes)",
                self.schema_path.display(),
                generated.enum_count,
                generated.table_count,
                generated.insert_count,
                generated.source.len()
            ),
            Err(e) => format!("{}: failed: {}", self.schema_path.display(), e),
        }
    }
}

impl GenerationJob {
    pub fn new(schema_path: impl Into<PathBuf>, destination: Destination, options: GeneratorOptions) -> Self {
        Self {
            schema_path: schema_path.into(),
            destination,
            options,
        }
    }

    /// Load, generate and write this job's declarations
    pub fn run(&self, loader: &SchemaLoader) -> Result<GeneratedTypes> {
        let schema = loader.load_path(&self.schema_path)?;
        let generated = TypeScriptGenerator::with_options(self.options.clone()).generate_types(&schema);
        write_output(&self.destination, &generated.source)?;
        Ok(generated)
    }
}

/// Run independent generation jobs in parallel.
///
/// Every job is attempted; reports come back in job order.
pub fn run_batch(jobs: &[GenerationJob], loader: &SchemaLoader) -> Vec<JobReport> {
    info!(jobs = jobs.len(), "Starting batch generation");

    jobs.par_iter()
        .map(|job| {
            let result = job.run(loader);
            if let Err(e) = &result {
                error!(schema = %job.schema_path.display(), error = %e, "Generation failed");
            }
            JobReport {
                schema_path: job.schema_path.clone(),
                destination: job.destination.clone(),
                result,
            }
        })
        .collect()
}
