//! swatchdump - Decode swatch-exchange color collections
//!
//! Reads `.ase` files (or every `.ase` file in the given directories),
//! decodes them in parallel and writes the colors as JSON or YAML, keyed by
//! collection name. A file's collection name comes from the collection list
//! (`--collections`, or `collections_data.yaml` inside a scanned directory)
//! and falls back to the file stem.
//!
//! Each color is written as `{collection, name, model, values, colorType}`.
//! `collection` is the group the color was found in, which differs from the
//! catalog key when a file holds several or nested groups.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use swatch_core::{
    BatchReport, Catalog, CollectionInfo, DecodeOptions, Fallback, GroupNaming, RawFile,
    TrailingDataPolicy, UnknownBlockPolicy, collections_in, decode_all, expand_paths,
    load_collections,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Output format for the decoded catalog.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// JSON (default)
    #[default]
    Json,
    /// YAML with the same structure as the JSON output
    Yaml,
}

/// Group a color inside nested groups is attributed to.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Naming {
    /// Innermost enclosing group (default)
    #[default]
    Innermost,
    /// Top-level enclosing group
    Outermost,
}

impl From<Naming> for GroupNaming {
    fn from(naming: Naming) -> Self {
        match naming {
            Naming::Innermost => GroupNaming::Innermost,
            Naming::Outermost => GroupNaming::Outermost,
        }
    }
}

/// Decode swatch-exchange (.ase) color collections to JSON or YAML.
#[derive(Parser, Debug)]
#[command(name = "swatchdump")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// .ase files, or directories to scan for .ase files
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Collection list mapping file names to collection names
    /// (default: collections_data.yaml in each scanned directory)
    #[arg(long, value_name = "FILE")]
    collections: Option<PathBuf>,

    /// Put colors found outside any group under the file name
    #[arg(long = "fallback-to-file-name", action = ArgAction::SetTrue)]
    fallback_to_file_name: bool,

    /// Fail a file when bytes follow its last block
    #[arg(long = "reject-trailing-data", action = ArgAction::SetTrue)]
    reject_trailing_data: bool,

    /// Skip unknown block types instead of failing the file
    #[arg(long = "skip-unknown-blocks", action = ArgAction::SetTrue)]
    skip_unknown_blocks: bool,

    /// Which group nested colors belong to
    #[arg(long = "group-naming", value_enum, default_value_t = Naming::Innermost)]
    group_naming: Naming,

    /// Number of decode threads (0 = one per core)
    #[arg(short = 'j', long, default_value = "0")]
    jobs: usize,

    /// Exit with an error status if any file fails to decode
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

impl Args {
    fn decode_options(&self) -> DecodeOptions {
        let mut options = DecodeOptions::default().with_group_naming(self.group_naming.into());
        if self.fallback_to_file_name {
            options = options.with_fallback(Fallback::SourceId);
        }
        if self.reject_trailing_data {
            options = options.with_trailing_data(TrailingDataPolicy::Reject);
        }
        if self.skip_unknown_blocks {
            options = options.with_unknown_blocks(UnknownBlockPolicy::Skip);
        }
        options
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn collection_list(args: &Args) -> Result<Vec<CollectionInfo>> {
    if let Some(path) = &args.collections {
        return load_collections(path)
            .with_context(|| format!("failed to read collection list {}", path.display()));
    }

    let mut collections = Vec::new();
    for dir in args.paths.iter().filter(|path| path.is_dir()) {
        collections.extend(
            collections_in(dir)
                .with_context(|| format!("failed to read collection list in {}", dir.display()))?,
        );
    }
    Ok(collections)
}

fn load_files(args: &Args) -> Result<Vec<RawFile>> {
    let paths = expand_paths(&args.paths).context("failed to list input paths")?;
    if paths.is_empty() {
        bail!("no .ase files found in {:?}", args.paths);
    }
    let collections = collection_list(args)?;

    paths
        .iter()
        .map(|path| {
            RawFile::from_path_with(path, &collections)
                .with_context(|| format!("failed to read {}", path.display()))
        })
        .collect()
}

fn write_catalog(catalog: &Catalog, format: OutputFormat, output: Option<&PathBuf>) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, catalog)?;
            writeln!(writer)?;
        }
        OutputFormat::Yaml => serde_yaml::to_writer(&mut writer, catalog)?,
    }
    writer.flush()?;

    if let Some(path) = output {
        info!(path = %path.display(), "wrote catalog");
    }
    Ok(())
}

fn report_failures(report: &BatchReport) {
    for failure in &report.failures {
        error!(file = %failure.file, reason = %failure.error, "skipped file");
    }
    if !report.is_clean() {
        warn!(
            failed = report.failures.len(),
            decoded = report.catalog.len(),
            "some files could not be decoded"
        );
    }
}

fn run(args: Args) -> Result<ExitCode> {
    if args.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.jobs)
            .build_global()
            .context("failed to configure decode threads")?;
    }

    let files = load_files(&args)?;
    info!(files = files.len(), "decoding");

    let report = decode_all(&files, &args.decode_options());
    report_failures(&report);

    // Partial results are written even when some files failed
    write_catalog(&report.catalog, args.format, args.output.as_ref())?;

    if args.strict && !report.is_clean() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
