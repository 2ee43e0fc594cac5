use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use chart_parser::parser::{process_document, tagger};
use chart_parser::settings::Settings;
use chart_parser::view;

#[derive(Parser)]
#[command(name = "chart_parser", about = "Clinical-record markdown → categories and observations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one document and print its categories
    Parse {
        file: PathBuf,
        /// Print the full parsed document as JSON
        #[arg(long)]
        json: bool,
        /// Show observations for this category (repeatable)
        #[arg(short, long)]
        expand: Vec<String>,
        /// Show observations for every category
        #[arg(long)]
        expand_all: bool,
    },
    /// Print the document with observation markers inserted
    Tag { file: PathBuf },
    /// Parse many documents in parallel
    Batch {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the medication list handed to the summarizer
    Meds { file: PathBuf },
}

fn main() -> Result<()> {
    let settings = Settings::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_filter.as_str().into()),
        )
        .with_writer(std::io::stderr)
        .init();
    info!(?settings, "settings loaded");

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            file,
            json,
            expand,
            expand_all,
        } => {
            let doc = process_document(&read(&file)?);
            if json || settings.json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
                return Ok(());
            }
            let expanded = if expand_all {
                doc.categories.iter().map(|c| c.name.clone()).collect()
            } else {
                let requested = expand
                    .iter()
                    .fold(BTreeSet::new(), |set, name| view::toggle_expanded(&set, name));
                view::retain_known(&requested, &doc.categories)
            };
            if doc.categories.is_empty() {
                println!("No categories found.");
                return Ok(());
            }
            print!("{}", view::render_summary(&doc.categories, &expanded));
            println!(
                "\n{} categories | {} observations",
                doc.categories.len(),
                doc.observation_total()
            );
        }
        Commands::Tag { file } => {
            println!("{}", tagger::tag_entries(&read(&file)?));
        }
        Commands::Batch { files } => {
            let counts = process_files(&files, settings.chunk_size);
            counts.print();
        }
        Commands::Meds { file } => {
            let doc = process_document(&read(&file)?);
            match view::medication_summary_input(&doc.categories) {
                Some(input) if !input.is_empty() => println!("{}", input),
                Some(_) => println!("Medications category has no entries."),
                None => println!("No medications category found."),
            }
        }
    }

    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "finished");
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

struct BatchCounts {
    documents: usize,
    failed: usize,
    categories: usize,
    observations: usize,
}

impl BatchCounts {
    fn print(&self) {
        println!(
            "Parsed {} documents ({} failed): {} categories, {} observations.",
            self.documents, self.failed, self.categories, self.observations,
        );
    }
}

fn process_files(files: &[PathBuf], chunk_size: usize) -> BatchCounts {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:32} {pos}/{len} records ({eta}) {wide_msg}") {
        pb.set_style(style.progress_chars("=> "));
    }

    let mut counts = BatchCounts {
        documents: 0,
        failed: 0,
        categories: 0,
        observations: 0,
    };

    for chunk in files.chunks(chunk_size) {
        if let Some(first) = chunk.first() {
            pb.set_message(first.display().to_string());
        }
        let results: Vec<_> = chunk
            .par_iter()
            .map(|path| read(path).map(|md| (path, process_document(&md))))
            .collect();

        for result in results {
            match result {
                Ok((path, doc)) => {
                    counts.documents += 1;
                    counts.categories += doc.categories.len();
                    counts.observations += doc.observation_total();
                    pb.println(format!(
                        "{}: {} categories, {} observations",
                        path.display(),
                        doc.categories.len(),
                        doc.observation_total()
                    ));
                }
                Err(e) => {
                    counts.failed += 1;
                    warn!("{:#}", e);
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    counts
}
