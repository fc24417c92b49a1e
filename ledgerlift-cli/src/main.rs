use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ledgerlift_finance::CategoryDictionary;
use ledgerlift_ingest::{
    ExtractionMethod, ProcessedDocument, StatementProcessor, TableExtractor, TabulaExtractor,
};
use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod config;
mod logging;
mod output;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "ledgerlift",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LEDGERLIFT_BUILD_SHA"), ")"),
    about = "Extract, clean and categorize transactions from bank statement PDFs"
)]
struct Cli {
    /// Config file (default: ~/.ledgerlift/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Turn statement PDFs into categorized CSV files, one per input
    Process {
        /// Statement PDFs
        #[arg(required = true)]
        pdfs: Vec<PathBuf>,

        /// Where to write the CSV files (default: [output] dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Category rules CSV (default: [categories] path)
        #[arg(long)]
        categories: Option<PathBuf>,

        /// tabula-java jar (default: [tabula] jar_path)
        #[arg(long)]
        tabula_jar: Option<PathBuf>,

        /// Table detection: decide, stream or lattice
        #[arg(long, value_parser = parse_method)]
        method: Option<ExtractionMethod>,
    },

    /// Print the category a description would get
    Categorize {
        description: String,

        /// Category rules CSV (default: [categories] path)
        #[arg(long)]
        categories: Option<PathBuf>,
    },

    /// Write a default config to ~/.ledgerlift/config.toml
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::InitConfig => config::init_config()?,

        Command::Categorize {
            description,
            categories,
        } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let dict = load_categories(categories.as_deref().unwrap_or(cfg.categories.path.as_path()))?;
            println!("{}", dict.categorize(&description));
        }

        Command::Process {
            pdfs,
            out_dir,
            categories,
            tabula_jar,
            method,
        } => {
            let mut cfg = config::load_config(cli.config.as_deref())?;
            if let Some(p) = categories {
                cfg.categories.path = p;
            }
            if let Some(p) = tabula_jar {
                cfg.tabula.jar_path = p;
            }
            if let Some(m) = method {
                cfg.tabula.method = m;
            }
            if let Some(d) = out_dir {
                cfg.output.dir = d;
            }
            process(&cfg, &pdfs)?;
        }
    }

    Ok(())
}

fn parse_method(s: &str) -> Result<ExtractionMethod, String> {
    match s {
        "decide" => Ok(ExtractionMethod::Decide),
        "stream" => Ok(ExtractionMethod::Stream),
        "lattice" => Ok(ExtractionMethod::Lattice),
        other => Err(format!("unknown method {other:?} (decide, stream, lattice)")),
    }
}

fn load_categories(path: &Path) -> Result<Arc<CategoryDictionary>> {
    let dict = CategoryDictionary::from_csv_path(path)
        .with_context(|| format!("loading categories from {}", path.display()))?;
    tracing::info!(path = %path.display(), categories = dict.len(), "loaded category rules");
    Ok(Arc::new(dict))
}

fn process(cfg: &Config, pdfs: &[PathBuf]) -> Result<()> {
    let categories = load_categories(&cfg.categories.path)?;
    let extractor = TabulaExtractor::new(&cfg.tabula.jar_path, cfg.tabula.method, cfg.tabula.guess)?;
    let processor = StatementProcessor::new(extractor, categories);

    fs::create_dir_all(&cfg.output.dir)
        .with_context(|| format!("create {}", cfg.output.dir.display()))?;

    let mut written = HashSet::new();
    let mut failed = 0;

    for pdf in pdfs {
        let out_path = output::output_path(pdf, &cfg.output.dir);
        if !written.insert(out_path.clone()) {
            tracing::warn!(input = %pdf.display(), output = %out_path.display(), "output name collides with an earlier input; overwriting");
        }

        match process_one(&processor, pdf, &out_path) {
            Ok(doc) => print_summary(pdf, &out_path, &doc),
            Err(err) => {
                tracing::error!(input = %pdf.display(), "{err:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} documents failed", pdfs.len());
    }
    Ok(())
}

fn process_one<E: TableExtractor>(
    processor: &StatementProcessor<E>,
    pdf: &Path,
    out_path: &Path,
) -> Result<ProcessedDocument> {
    let file = File::open(pdf).with_context(|| format!("open {}", pdf.display()))?;
    let doc = processor
        .process_document_with_report(file)
        .with_context(|| format!("processing {}", pdf.display()))?;
    output::write_table_file(&doc.table, out_path)?;
    Ok(doc)
}

fn print_summary(pdf: &Path, out_path: &Path, doc: &ProcessedDocument) {
    let uncategorized = doc.table.iter().filter(|r| r.is_uncategorized()).count();
    println!(
        "{} -> {}: {} transactions ({} uncategorized), {}/{} tables used",
        pdf.display(),
        out_path.display(),
        doc.table.len(),
        uncategorized,
        doc.report.tables_accepted,
        doc.report.tables_extracted,
    );
    for rejection in &doc.report.rejected {
        let page = rejection
            .page
            .map(|p| format!("page {p}"))
            .unwrap_or_else(|| "unknown page".to_string());
        println!("  skipped table {} ({page}): {}", rejection.index, rejection.reason);
    }
    if doc.report.rows_dropped > 0 {
        println!("  dropped {} rows with unreadable dates", doc.report.rows_dropped);
    }
}
