//! Berean interlinear command-line tool
//!
//! Reads the chapter, index, heading, concordance and lexicon resources from
//! a data directory and prints verses, interlinear alignments, concordance
//! hits and lexicon entries.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use berean_interlinear::align::interlinear_pairs;
use berean_interlinear::books;
use berean_interlinear::concordance::{search, search_by_index_scan};
use berean_interlinear::config::DataLayout;
use berean_interlinear::lexicon::LexiconStore;
use berean_interlinear::models::AlignOrder;
use berean_interlinear::output::{
    format_interlinear, format_lexicon_entry, format_reference, print_chapter, print_concordance,
    verse_text, write_concordance_csv, write_json,
};
use berean_interlinear::source::{FileSource, ResourceSource};
use berean_interlinear::store::BibleStore;

#[derive(Parser)]
#[command(name = "berean")]
#[command(about = "Interlinear alignment and concordance for the Berean Standard Bible")]
#[command(version)]
struct Cli {
    /// Root directory of the data resources
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// JSON file overriding resource paths under the data directory
    #[arg(long, global = true)]
    layout: Option<PathBuf>,

    /// Suppress progress output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log cache and fetch activity
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Interlinear word order (CLI version, mirrors models::AlignOrder)
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliOrder {
    /// English reading order
    English,
    /// Hebrew/Greek reading order
    Original,
}

impl From<CliOrder> for AlignOrder {
    fn from(order: CliOrder) -> Self {
        match order {
            CliOrder::English => AlignOrder::English,
            CliOrder::Original => AlignOrder::Original,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show one verse with its interlinear alignment
    Verse {
        /// Book code (USFM, aliases accepted)
        book: String,

        chapter: u32,

        verse: u32,

        /// Word order for the interlinear rows
        #[arg(long, value_enum, default_value = "english")]
        order: CliOrder,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a chapter with its section headings
    Chapter {
        /// Book code (USFM, aliases accepted)
        book: String,

        chapter: u32,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List every verse containing a Strong's number
    Search {
        /// Strong's number, e.g. H0430 or G3056
        strongs: String,

        /// Scan chapter indexes instead of using the concordance map
        #[arg(long)]
        scan: bool,

        /// Print at most N hits
        #[arg(long)]
        limit: Option<usize>,

        /// Also write the hits as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a lexicon entry
    Lexicon {
        /// Strong's number, e.g. H0430 or G3056
        strongs: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Load chapters and indexes ahead of time to check a data directory
    Preload {
        /// Book codes to load (default: all 66)
        #[arg(value_delimiter = ',')]
        books: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Start with library defaults, overlay a layout file if given
    let layout = match &cli.layout {
        Some(path) => DataLayout::from_file(path)?,
        None => DataLayout::default(),
    };
    let files = FileSource::new(&cli.data_dir);
    tracing::info!(data_dir = %files.root().display(), "using data directory");
    let source: Arc<dyn ResourceSource> = Arc::new(files);

    let store = BibleStore::new(Arc::clone(&source), layout.clone());

    match cli.command {
        Commands::Verse {
            book,
            chapter,
            verse,
            order,
            json,
        } => {
            let book_id = resolve_chapter(&book, chapter)?;
            let enriched = store
                .load_enriched_chapter(book_id, chapter)
                .ok_or_else(|| format!("chapter {} {} is unavailable", book, chapter))?;
            let found = enriched
                .chapter
                .verse(verse)
                .ok_or_else(|| format!("{} {} has no verse {}", book, chapter, verse))?;

            let cells = interlinear_pairs(found, &enriched.index, order.into());
            if json {
                let words: Vec<_> = cells.iter().map(|c| &c.word).collect();
                write_json(&words, &mut std::io::stdout().lock())?;
            } else {
                println!("{}", format_reference(book_id, chapter, verse));
                println!("{}\n", verse_text(found));
                print!("{}", format_interlinear(&cells));

                if let Some(entry) = enriched.entry(verse) {
                    if !entry.xrefs().is_empty() {
                        println!("\nCross references: {}", entry.xrefs().join(", "));
                    }
                }
            }
        }

        Commands::Chapter {
            book,
            chapter,
            json,
        } => {
            let book_id = resolve_chapter(&book, chapter)?;
            let enriched = store
                .load_enriched_chapter(book_id, chapter)
                .ok_or_else(|| format!("chapter {} {} is unavailable", book, chapter))?;

            if json {
                write_json(enriched.chapter.as_ref(), &mut std::io::stdout().lock())?;
            } else {
                print_chapter(&enriched);
            }
        }

        Commands::Search {
            strongs,
            scan,
            limit,
            csv,
            json,
        } => {
            let results = if scan {
                if !cli.quiet {
                    eprintln!("Scanning chapter indexes for {}...", strongs);
                }
                search_by_index_scan(&store, &strongs)
            } else {
                search(&store, &strongs)
            };

            if let Some(path) = csv {
                let mut file = std::fs::File::create(&path)?;
                write_concordance_csv(&results, &mut file)?;
                if !cli.quiet {
                    eprintln!("CSV output: {}", path.display());
                }
            }

            if json {
                write_json(&results, &mut std::io::stdout().lock())?;
            } else {
                print_concordance(&strongs.to_uppercase(), &results, limit);
            }
        }

        Commands::Lexicon { strongs, json } => {
            let lexicon = LexiconStore::new(source, layout);
            match lexicon.get_entry(&strongs) {
                Some(entry) if json => write_json(&entry, &mut std::io::stdout().lock())?,
                Some(entry) => print!("{}", format_lexicon_entry(&strongs.to_uppercase(), &entry)),
                None => return Err(format!("no lexicon entry for {}", strongs).into()),
            }
        }

        Commands::Preload { books: codes } => {
            run_preload(&store, &codes, cli.quiet)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Resolve a book code and check the chapter exists in that book.
fn resolve_chapter(code: &str, chapter: u32) -> Result<u8, String> {
    let book_id = books::book_id(code).ok_or_else(|| format!("unknown book code: {}", code))?;
    let count = books::chapter_count(book_id).unwrap_or(0);
    if chapter == 0 || chapter > count {
        return Err(format!("{} has chapters 1-{}, not {}", code, count, chapter));
    }
    Ok(book_id)
}

/// Load every chapter (and its index) of the requested books in parallel.
fn run_preload(
    store: &BibleStore,
    codes: &[String],
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let selected: Vec<&'static books::Book> = if codes.is_empty() {
        books::BOOKS.iter().collect()
    } else {
        codes
            .iter()
            .map(|c| books::find(c).ok_or_else(|| format!("unknown book code: {}", c)))
            .collect::<Result<_, _>>()?
    };

    let chapters: Vec<(&'static books::Book, u32)> = selected
        .iter()
        .flat_map(|&book| (1..=book.chapters).map(move |c| (book, c)))
        .collect();

    let progress = if quiet {
        None
    } else {
        let pb = ProgressBar::new(chapters.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    let missing: Vec<String> = chapters
        .par_iter()
        .filter_map(|&(book, chapter)| {
            let loaded = store.load_chapter(book.id, chapter);
            store.load_index(book.code, chapter);

            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            match loaded {
                Some(_) => None,
                None => Some(format!("{} {}", book.code, chapter)),
            }
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_with_message("Done");
    }

    store.load_headings();
    store.load_concordance();

    println!("Chapters loaded: {}", store.cached_chapters());
    if !missing.is_empty() {
        println!("Missing chapters: {}", missing.len());
        for m in missing.iter().take(20) {
            println!("  {}", m);
        }
        if missing.len() > 20 {
            println!("  ... and {} more", missing.len() - 20);
        }
    }

    Ok(())
}
