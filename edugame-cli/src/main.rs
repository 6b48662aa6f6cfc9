mod loader;
mod reports;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use edugame_catalog::{
    CategoryRegistry, GameCatalogResolver, ResolveRequest, StaticCatalogLoader,
};
use loader::{FileCatalogLoader, load_requests};
use reports::{
    CategorySummary, ResolutionRecord, bucket_listings, write_batch_console,
    write_categories_console, write_json, write_listings_console, write_resolution_console,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable, colored output
    Console,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "edugame", version)]
#[command(about = "Resolve and browse the educational mini-game catalog")]
struct Args {
    /// Catalog JSON file to use instead of the bundled catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Output report format
    #[arg(long, global = true, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Verbose output (debug logging unless RUST_LOG says otherwise)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve one category / age group / game id triple
    Resolve {
        category: String,
        age_group: String,
        game_id: String,
        /// Opaque hint forwarded to the resolved game
        #[arg(long)]
        hint: Option<String>,
    },
    /// Resolve every request in a JSON array file
    Batch { file: PathBuf },
    /// List games, optionally narrowed to one category and age group
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        age_group: Option<String>,
    },
    /// List categories and their aliases
    Categories,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let registry = load_registry(args.catalog.as_deref())?;
    let resolver = GameCatalogResolver::new(&registry);
    let mut output_target = OutputTarget::new(args.output.clone())?;

    let all_found = match &args.command {
        Command::Resolve {
            category,
            age_group,
            game_id,
            hint,
        } => {
            let mut request = ResolveRequest::new(category, age_group, game_id);
            request.context_hint.clone_from(hint);
            run_batch(&resolver, vec![request], args.report, &mut output_target, false)?
        }
        Command::Batch { file } => {
            let requests = load_requests(file)?;
            log::info!("resolving {} requests from {}", requests.len(), file.display());
            run_batch(&resolver, requests, args.report, &mut output_target, true)?
        }
        Command::List {
            category,
            age_group,
        } => {
            run_list(
                &registry,
                category.as_deref(),
                age_group.as_deref(),
                args.report,
                &mut output_target,
            )?;
            true
        }
        Command::Categories => {
            let summaries = CategorySummary::collect(&registry);
            match args.report {
                ReportFormat::Json => write_json(&mut output_target, &summaries)?,
                ReportFormat::Console => write_categories_console(&mut output_target, &summaries)?,
            }
            true
        }
    };

    output_target.flush_inner()?;
    Ok(if all_found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_registry(path: Option<&Path>) -> Result<CategoryRegistry> {
    match path {
        Some(path) => CategoryRegistry::from_loader(&FileCatalogLoader::new(path))
            .with_context(|| format!("loading catalog from {}", path.display())),
        None => CategoryRegistry::from_loader(&StaticCatalogLoader)
            .context("loading bundled catalog"),
    }
}

/// Resolve `requests` and report them; returns whether every one was found.
fn run_batch(
    resolver: &GameCatalogResolver<'_>,
    requests: Vec<ResolveRequest>,
    format: ReportFormat,
    out: &mut OutputTarget,
    summarize: bool,
) -> Result<bool> {
    let records: Vec<ResolutionRecord<'_>> = requests
        .into_iter()
        .map(|request| {
            let resolution = resolver.resolve_request(&request);
            ResolutionRecord::new(request, resolution)
        })
        .collect();
    let all_found = records.iter().all(|record| record.resolution.is_found());

    match (format, summarize) {
        (ReportFormat::Json, true) => write_json(out, &records)?,
        (ReportFormat::Json, false) => {
            for record in &records {
                write_json(out, record)?;
            }
        }
        (ReportFormat::Console, true) => write_batch_console(out, &records)?,
        (ReportFormat::Console, false) => {
            for record in &records {
                write_resolution_console(out, record)?;
            }
        }
    }
    Ok(all_found)
}

fn run_list(
    registry: &CategoryRegistry,
    category: Option<&str>,
    age_group: Option<&str>,
    format: ReportFormat,
    out: &mut OutputTarget,
) -> Result<()> {
    let listings = match category {
        Some(key) => {
            let Some(entry) = registry.get(key) else {
                bail!("unknown category '{key}'");
            };
            bucket_listings(entry, age_group)
        }
        None => registry
            .categories()
            .flat_map(|entry| bucket_listings(entry, age_group))
            .collect(),
    };

    match format {
        ReportFormat::Json => write_json(out, &listings),
        ReportFormat::Console => write_listings_console(out, &listings),
    }
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            colored::control::set_override(false);
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
