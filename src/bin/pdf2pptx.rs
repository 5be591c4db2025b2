//! CLI binary for pdf2pptx.
//!
//! A thin shim over the library crate that maps CLI flags to `ClientConfig`,
//! drives one conversion session, and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2pptx::{ClientConfig, ConverterSession, FileInput, Theme, PDF_MEDIA_TYPE};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a PDF; the deck lands next to the input as report.pptx
  pdf2pptx report.pdf

  # Choose where the deck is written
  pdf2pptx report.pdf -o ~/decks

  # Also save the first-page preview
  pdf2pptx report.pdf --thumbnail preview.png

  # Point at a different conversion service
  pdf2pptx --endpoint http://10.0.0.5:5000/convert report.pdf

  # Machine-readable session state
  pdf2pptx --json report.pdf

THEMES:
  midnight (default), blush, slate, aurora, plain — presentation copy only,
  the conversion flow is identical for all of them.

ENVIRONMENT VARIABLES:
  PDF2PPTX_ENDPOINT   Conversion endpoint URL
  PDF2PPTX_TIMEOUT    Upload timeout in seconds
  PDFIUM_DYNAMIC_LIB_PATH  Directory containing (or full path to) a pdfium
                           library, checked before the system path

The thumbnail preview needs a pdfium library on the host. When none is
found the preview is skipped with a warning; conversion still works.
"#;

/// Convert a PDF into a slide deck via a conversion service.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2pptx",
    version,
    about = "Convert a PDF into a PPTX slide deck via a conversion service",
    long_about = "Submit a PDF to a PDF-to-PPTX conversion service, preview its first page, \
and download the resulting deck. The service performs the actual conversion; this client \
handles validation, preview, upload, and download.",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file to convert.
    input: PathBuf,

    /// Directory the converted deck is written to. Default: input's directory.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Conversion endpoint URL.
    #[arg(long, env = "PDF2PPTX_ENDPOINT", default_value = pdf2pptx::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Write the first-page preview PNG to this path.
    #[arg(long)]
    thumbnail: Option<PathBuf>,

    /// Preview zoom factor.
    #[arg(long, default_value_t = pdf2pptx::DEFAULT_THUMBNAIL_SCALE)]
    scale: f32,

    /// Presentation theme: midnight, blush, slate, aurora, plain.
    #[arg(long, default_value = "midnight")]
    theme: String,

    /// Upload timeout in seconds.
    #[arg(long, env = "PDF2PPTX_TIMEOUT", default_value_t = 120)]
    timeout: u64,

    /// Output the final session snapshot as JSON.
    #[arg(long)]
    json: bool,

    /// Disable the upload spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let theme = Theme::by_name(&cli.theme)
        .with_context(|| format!("Unknown theme '{}'", cli.theme))?;

    if !cli.quiet && !cli.json {
        eprintln!("{}", bold(theme.title));
    }

    // ── Build session ────────────────────────────────────────────────────
    let config = ClientConfig::builder()
        .endpoint(cli.endpoint.clone())
        .thumbnail_scale(cli.scale)
        .request_timeout_secs(cli.timeout)
        .build()
        .context("Invalid configuration")?;
    let session = ConverterSession::new(config)?;

    // Bind the render engine up front so a missing library surfaces as one
    // warning instead of a failed preview later.
    if let Err(e) = pdf2pptx::init_engine() {
        tracing::warn!("{e}");
    }

    // ── Intake ───────────────────────────────────────────────────────────
    // The picker boundary: the declared media type comes from the file's
    // extension, the way a browser picker declares it.
    let bytes = tokio::fs::read(&cli.input)
        .await
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let name = cli
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input.pdf".to_string());
    let media_type = match cli.input.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MEDIA_TYPE,
        _ => "application/octet-stream",
    };

    let thumb_task = session
        .select_file(FileInput::new(name.clone(), media_type, bytes))
        .await;

    if thumb_task.is_none() {
        let snap = session.snapshot().await;
        let msg = snap
            .error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "File rejected".to_string());
        anyhow::bail!("{msg}");
    }

    // ── Preview ──────────────────────────────────────────────────────────
    // Fire-and-forget in a UI; the CLI awaits it so the preview can be
    // saved before the process exits.
    if let Some(task) = thumb_task {
        task.await.ok();
    }
    match session.thumbnail().await {
        Some(thumb) => {
            if !cli.quiet && !cli.json {
                eprintln!(
                    "{} preview rendered  {}",
                    green("✓"),
                    dim(&format!("{}x{} px", thumb.width, thumb.height))
                );
            }
            if let Some(ref path) = cli.thumbnail {
                thumb.png.save_to(path).await?;
                if !cli.quiet && !cli.json {
                    eprintln!("{} preview saved to {}", green("✓"), path.display());
                }
            }
        }
        None => {
            if !cli.quiet {
                eprintln!("{} preview unavailable (no pdfium engine?)", dim("–"));
            }
        }
    }

    // ── Convert ──────────────────────────────────────────────────────────
    let spinner = if !cli.quiet && !cli.no_progress && !cli.json {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(format!("Converting {name}…"));
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    let result = session.convert().await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    // ── Download & report ────────────────────────────────────────────────
    let exit_err = match result {
        Some(ref converted) => {
            let out_dir = cli
                .output_dir
                .clone()
                .or_else(|| cli.input.parent().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("."));
            let path = session
                .save_result_to(&out_dir)
                .await?
                .context("No result to save after a successful conversion")?;

            if !cli.quiet && !cli.json {
                eprintln!(
                    "{} {}  {}",
                    green("✔"),
                    bold(&converted.name),
                    dim(&format!("{} bytes → {}", converted.data.len(), path.display()))
                );
            }
            None
        }
        None => {
            let snap = session.snapshot().await;
            let msg = snap
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "Conversion failed".to_string());
            if !cli.json {
                eprintln!("{} {}", red("✘"), msg);
            }
            Some(msg)
        }
    };

    // ── Session summary ──────────────────────────────────────────────────
    let snap = session.snapshot().await;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    } else if !cli.quiet {
        if snap.history.is_empty() {
            eprintln!("{}", dim(theme.empty_history));
        } else {
            eprintln!("{}", dim(&format!("history: {}", snap.history.join(", "))));
        }
    }

    if let Some(msg) = exit_err {
        anyhow::bail!("{msg}");
    }
    Ok(())
}
