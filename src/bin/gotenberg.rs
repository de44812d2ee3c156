//! CLI binary for gotenberg-client.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `PageProperties`, calls one route and writes the resulting PDF.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use gotenberg_client::properties::PagePropertiesDocument;
use gotenberg_client::{ClientConfig, GotenbergClient, PageProperties, PdfFormat};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # HTML with assets (index.html is required)
  gotenberg html site/index.html site/style.css site/logo.png -o site.pdf

  # Markdown wrapped in an index.html template
  gotenberg markdown template/index.html chapter1.md chapter2.md -o book.pdf

  # A remote page, landscape, with backgrounds
  gotenberg --landscape --print-background url https://example.com -o example.pdf

  # Office documents through LibreOffice, pages 1-3 only
  gotenberg --pages 1-3 office report.docx -o report.pdf

  # Merge PDFs in order, archived as PDF/A-2b
  gotenberg --pdf-format pdf-a2b merge a.pdf b.pdf c.pdf -o merged.pdf

  # Options from a JSON file, CLI flags override
  gotenberg --properties page.json --margins 0.2 html index.html

ENVIRONMENT VARIABLES:
  GOTENBERG_ENDPOINT   Service base URL (default http://localhost:3000)
  GOTENBERG_TIMEOUT    Request timeout in seconds
  RUST_LOG             tracing filter, overrides --verbose/--quiet
"#;

/// Convert documents to PDF through a Gotenberg service.
#[derive(Parser, Debug)]
#[command(
    name = "gotenberg",
    version,
    about = "Convert documents to PDF through a Gotenberg service",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Service base URL.
    #[arg(long, env = "GOTENBERG_ENDPOINT", default_value = "http://localhost:3000")]
    endpoint: String,

    /// Request timeout in seconds.
    #[arg(long, env = "GOTENBERG_TIMEOUT")]
    timeout: Option<u64>,

    /// Write the PDF here; `-` for stdout.
    #[arg(short, long, env = "GOTENBERG_OUTPUT", default_value = "output.pdf")]
    output: PathBuf,

    /// JSON file with page properties (camelCase keys).
    #[arg(long, env = "GOTENBERG_PROPERTIES")]
    properties: Option<PathBuf>,

    #[command(flatten)]
    page: PageArgs,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chromium: index.html plus assets.
    Html {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Chromium: index.html template plus Markdown files.
    Markdown {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Chromium: a remote page.
    Url { url: String },
    /// LibreOffice: office documents and images.
    Office {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// PDF engines: convert PDFs (typically to PDF/A).
    Convert {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// PDF engines: merge PDFs in the given order.
    Merge {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct PageArgs {
    /// Paper width in inches (> 1.0).
    #[arg(long)]
    paper_width: Option<f32>,

    /// Paper height in inches (> 1.5).
    #[arg(long)]
    paper_height: Option<f32>,

    /// All four margins in inches (> 0).
    #[arg(long)]
    margins: Option<f32>,

    #[arg(long)]
    margin_top: Option<f32>,

    #[arg(long)]
    margin_bottom: Option<f32>,

    #[arg(long)]
    margin_left: Option<f32>,

    #[arg(long)]
    margin_right: Option<f32>,

    #[arg(long)]
    landscape: bool,

    #[arg(long)]
    print_background: bool,

    #[arg(long)]
    prefer_css_page_size: bool,

    /// Rendering scale factor.
    #[arg(long)]
    scale: Option<f32>,

    /// Page range, e.g. 1-5.
    #[arg(long)]
    pages: Option<String>,

    /// PDF/A output format.
    #[arg(long, value_enum)]
    pdf_format: Option<PdfFormatArg>,

    /// Produce a PDF/UA (universal accessibility) document.
    #[arg(long)]
    pdfua: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PdfFormatArg {
    PdfA1a,
    PdfA2b,
    PdfA3b,
}

impl From<PdfFormatArg> for PdfFormat {
    fn from(v: PdfFormatArg) -> Self {
        match v {
            PdfFormatArg::PdfA1a => PdfFormat::PdfA1a,
            PdfFormatArg::PdfA2b => PdfFormat::PdfA2b,
            PdfFormatArg::PdfA3b => PdfFormat::PdfA3b,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let properties = build_properties(&cli).await?;
    debug!("Page properties: {:?}", properties);

    let mut config = ClientConfig::builder().endpoint(cli.endpoint.as_str());
    if let Some(secs) = cli.timeout {
        config = config.timeout_secs(secs);
    }
    let config = config.build().context("Invalid client configuration")?;
    let client = GotenbergClient::from_config(config).context("Failed to create HTTP client")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let response = match &cli.command {
        Command::Html { files } => client.convert_html(files.as_slice(), &properties).await,
        Command::Markdown { files } => client.convert_markdown(files.as_slice(), &properties).await,
        Command::Url { url } => client.convert_url(url, &properties).await,
        Command::Office { files } => client.convert_with_libre_office(files.as_slice(), &properties).await,
        Command::Convert { files } => client.convert_with_pdf_engines(files.as_slice(), &properties).await,
        Command::Merge { files } => client.merge_with_pdf_engines(files.as_slice(), &properties).await,
    }
    .context("Conversion failed")?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("Service returned {status}: {}", body.trim());
    }

    let bytes = response
        .bytes()
        .await
        .context("Failed to read response body")?;

    if cli.output.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(&bytes)
            .context("Failed to write to stdout")?;
    } else {
        tokio::fs::write(&cli.output, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", cli.output.display()))?;
        info!(
            "Wrote {} bytes ({}) to {}",
            bytes.len(),
            content_type,
            cli.output.display()
        );
    }

    Ok(())
}

/// Merge the optional JSON properties file with CLI flags, flags winning.
async fn build_properties(cli: &Cli) -> Result<PageProperties> {
    let mut doc: PagePropertiesDocument = match &cli.properties {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read page properties from {:?}", path))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid page properties in {:?}", path))?
        }
        None => PagePropertiesDocument::default(),
    };

    let p = &cli.page;
    if let Some(m) = p.margins {
        doc.margin_top = Some(m);
        doc.margin_bottom = Some(m);
        doc.margin_left = Some(m);
        doc.margin_right = Some(m);
    }
    override_with(&mut doc.paper_width, p.paper_width);
    override_with(&mut doc.paper_height, p.paper_height);
    override_with(&mut doc.margin_top, p.margin_top);
    override_with(&mut doc.margin_bottom, p.margin_bottom);
    override_with(&mut doc.margin_left, p.margin_left);
    override_with(&mut doc.margin_right, p.margin_right);
    override_with(&mut doc.scale, p.scale);
    override_with(&mut doc.native_page_ranges, p.pages.clone());
    override_with(&mut doc.pdf_format, p.pdf_format.map(PdfFormat::from));
    if p.landscape {
        doc.landscape = Some(true);
    }
    if p.print_background {
        doc.print_background = Some(true);
    }
    if p.prefer_css_page_size {
        doc.prefer_css_page_size = Some(true);
    }
    if p.pdfua {
        doc.pdf_universal_access = Some(true);
    }

    PageProperties::try_from(doc).context("Invalid page properties")
}

fn override_with<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
