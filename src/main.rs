use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pdfoutline::core::model::HeadingLevel;
use pdfoutline::layout::{LayoutExtractor, LayoutTrack, PdfReader};
use pdfoutline::pipeline::{build_outline, export_outline, PipelineConfig, FALLBACK_THRESHOLD};

#[derive(Parser, Debug)]
#[command(name = "pdfoutline")]
#[command(version, about = "Heuristic PDF outline extraction using font sizes with an OCR fallback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract the outline of a single PDF file
    Extract {
        /// Input PDF file path
        input: PathBuf,

        /// Output JSON path (default: ./<input_name>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rendering DPI for the OCR fallback
        #[arg(long, default_value_t = 200)]
        dpi: u32,

        /// Tesseract language(s) for the OCR fallback
        #[arg(long, default_value = "eng")]
        lang: String,

        /// Disable progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Extract outlines for every PDF in a directory
    Batch {
        /// Directory scanned for .pdf files
        input_dir: PathBuf,

        /// Output directory for the .json results (default: ./output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rendering DPI for the OCR fallback
        #[arg(long, default_value_t = 200)]
        dpi: u32,

        /// Tesseract language(s) for the OCR fallback
        #[arg(long, default_value = "eng")]
        lang: String,
    },

    /// Show page and heading counts for a PDF file
    Info {
        /// Input PDF file path
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            output,
            dpi,
            lang,
            quiet,
        } => extract_single(input, output, dpi, lang, quiet),
        Commands::Batch {
            input_dir,
            output,
            dpi,
            lang,
        } => extract_batch(input_dir, output, dpi, lang),
        Commands::Info { input } => show_info(input),
    }
}

fn extract_single(
    input: PathBuf,
    output: Option<PathBuf>,
    dpi: u32,
    lang: String,
    quiet: bool,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }
    if !input.is_file() {
        anyhow::bail!("Input is not a file: {}", input.display());
    }

    let output_path = output.unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{stem}.json"))
    });

    if !quiet {
        println!("[*] Processing: {}", input.display());
        println!("[*] Output: {}", output_path.display());
    }

    let config = PipelineConfig::new(input.clone(), output_path.clone(), dpi, lang);
    let outline = build_outline(&config)
        .with_context(|| format!("Failed to process PDF: {}", input.display()))?;

    export_outline(&outline, &output_path)
        .with_context(|| format!("Failed to write: {}", output_path.display()))?;

    if !quiet {
        println!(
            "[✓] Done! {} heading(s) written to {}",
            outline.outline.len(),
            output_path.display()
        );
    }

    Ok(())
}

fn extract_batch(
    input_dir: PathBuf,
    output: Option<PathBuf>,
    dpi: u32,
    lang: String,
) -> Result<()> {
    if !input_dir.is_dir() {
        anyhow::bail!("Input is not a directory: {}", input_dir.display());
    }

    let mut inputs: Vec<PathBuf> = std::fs::read_dir(&input_dir)
        .with_context(|| format!("Failed to read directory: {}", input_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("pdf"))
        .collect();
    inputs.sort();

    if inputs.is_empty() {
        anyhow::bail!("No PDF files found in {}", input_dir.display());
    }

    let output_dir = output.unwrap_or_else(|| PathBuf::from("output"));
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create: {}", output_dir.display()))?;

    println!("[*] Batch processing {} file(s)", inputs.len());
    println!("[*] Output directory: {}\n", output_dir.display());

    let mut success = 0;
    let mut failed = 0;

    for (i, input) in inputs.iter().enumerate() {
        println!("[{}/{}] Processing: {}", i + 1, inputs.len(), input.display());

        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let output_path = output_dir.join(format!("{stem}.json"));

        match extract_single(input.clone(), Some(output_path), dpi, lang.clone(), true) {
            Ok(_) => {
                println!("  [✓] Success");
                success += 1;
            }
            Err(e) => {
                eprintln!("  [✗] Failed: {e:#}");
                failed += 1;
            }
        }
    }

    println!("\n[*] Summary: {success} succeeded, {failed} failed");

    if failed > 0 {
        anyhow::bail!("{failed} file(s) failed to process");
    }

    Ok(())
}

fn show_info(input: PathBuf) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let reader = PdfReader::open(&input)
        .with_context(|| format!("Failed to open PDF: {}", input.display()))?;
    println!("PDF Information");
    println!("  File: {}", input.display());
    println!("  Pages: {}", reader.page_count());

    let layout = LayoutExtractor::new();
    let headings = layout.extract_headings(&input)?;
    let count_of = |level: HeadingLevel| headings.iter().filter(|h| h.level == level).count();

    println!("  Layout headings: {}", headings.len());
    println!("    H1: {}", count_of(HeadingLevel::H1));
    println!("    H2: {}", count_of(HeadingLevel::H2));
    println!("    H3: {}", count_of(HeadingLevel::H3));
    println!(
        "  OCR fallback would run: {}",
        headings.len() < FALLBACK_THRESHOLD
    );

    Ok(())
}
