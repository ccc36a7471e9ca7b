use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use newsdesk_core::{ConfigFile, ExtractionResult, config_file};
use newsdesk_parsing::{ArticleExtractor, ParsingConfigBuilder};
use newsdesk_pdf_mupdf::MupdfBackend;
use newsdesk_store::SqliteRepository;
use tracing_subscriber::EnvFilter;

mod output;

use output::ColorMode;

/// Newsdesk - turn student-news PDFs into catalog articles
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Options shared by the commands that run the extractor.
#[derive(clap::Args, Debug)]
struct ExtractOptions {
    /// Treat the input as already-extracted plain text instead of a PDF
    #[arg(long)]
    text: bool,

    /// Minimum segment length in characters (overrides config)
    #[arg(long)]
    min_segment_chars: Option<usize>,

    /// Maximum number of candidates per document (overrides config)
    #[arg(long)]
    max_candidates: Option<usize>,

    /// Emit a blank line after every PDF layout block
    #[arg(long)]
    block_breaks: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dry run: extract and print article candidates without storing them
    Extract {
        /// Path to the PDF (or text file with --text)
        file_path: PathBuf,

        #[command(flatten)]
        options: ExtractOptions,

        /// Print candidates as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract articles and store new ones as drafts
    Ingest {
        /// Path to the PDF (or text file with --text)
        file_path: PathBuf,

        #[command(flatten)]
        options: ExtractOptions,

        /// SQLite database (overrides NEWSDESK_DB_PATH and config)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the URL slug for a title
    Slug {
        title: String,

        /// Append a timestamp suffix, as manual article creation does
        #[arg(long)]
        unique: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config_file::load_config();

    match cli.command {
        Command::Extract {
            file_path,
            options,
            json,
            no_color,
            output,
        } => extract(&config, &file_path, &options, json, no_color, output),
        Command::Ingest {
            file_path,
            options,
            db,
            no_color,
        } => ingest(&config, &file_path, &options, db, no_color),
        Command::Slug { title, unique } => {
            if unique {
                println!("{}", newsdesk_core::unique_slug(&title));
            } else {
                println!("{}", newsdesk_core::base_slug(&title));
            }
            Ok(())
        }
    }
}

/// Resolve parsing settings: CLI flags > config file > defaults.
fn build_extractor(config: &ConfigFile, options: &ExtractOptions) -> anyhow::Result<ArticleExtractor> {
    let mut builder = ParsingConfigBuilder::new().with_file_section(config.parsing.as_ref());
    if let Some(n) = options.min_segment_chars {
        builder = builder.min_segment_chars(n);
    }
    if let Some(n) = options.max_candidates {
        builder = builder.max_candidates(n);
    }
    Ok(ArticleExtractor::with_config(builder.build()?))
}

fn run_extraction(
    file_path: &Path,
    extractor: &ArticleExtractor,
    options: &ExtractOptions,
) -> anyhow::Result<ExtractionResult> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }
    if options.text {
        let text = std::fs::read_to_string(file_path)?;
        Ok(extractor.extract_from_text(&text))
    } else {
        let backend = MupdfBackend::default().with_block_breaks(options.block_breaks);
        Ok(extractor.extract_via_backend(file_path, &backend)?)
    }
}

fn display_name(file_path: &Path) -> String {
    file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.display().to_string())
}

fn extract(
    config: &ConfigFile,
    file_path: &Path,
    options: &ExtractOptions,
    json: bool,
    no_color: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let color = ColorMode(!no_color && !json && output.is_none());
    let mut writer: Box<dyn Write> = if let Some(ref output_path) = output {
        Box::new(std::fs::File::create(output_path)?)
    } else {
        Box::new(std::io::stdout())
    };

    let extractor = build_extractor(config, options)?;
    let result = run_extraction(file_path, &extractor, options)?;

    if json {
        serde_json::to_writer_pretty(&mut writer, &result.candidates)?;
        writeln!(writer)?;
        return Ok(());
    }

    let file_name = display_name(file_path);
    output::print_extraction_summary(
        &mut writer,
        &file_name,
        result.candidates.len(),
        &result.skip_stats,
        color,
    )?;
    for (i, candidate) in result.candidates.iter().enumerate() {
        output::print_candidate(&mut writer, i, candidate, color)?;
    }
    Ok(())
}

fn ingest(
    config: &ConfigFile,
    file_path: &Path,
    options: &ExtractOptions,
    db: Option<PathBuf>,
    no_color: bool,
) -> anyhow::Result<()> {
    let color = ColorMode(!no_color);
    let db_path = db.unwrap_or_else(|| config.db_path());
    tracing::debug!(db = %db_path.display(), "opening article database");
    let repo = SqliteRepository::open(&db_path)?;

    let extractor = build_extractor(config, options)?;
    let result = run_extraction(file_path, &extractor, options)?;
    let file_name = display_name(file_path);
    let report = newsdesk_ingest::ingest_extraction(result, &file_name, &repo);

    let mut stdout = std::io::stdout();
    output::print_ingest_report(&mut stdout, &file_name, &report, color)?;
    if !report.errors.is_empty() {
        anyhow::bail!("{} article(s) failed to store", report.errors.len());
    }
    Ok(())
}
