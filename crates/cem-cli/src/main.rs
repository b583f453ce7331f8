//! CLI entry point for running Custom Elements Manifest diagnostics over a
//! single document outside an editor session.
//!
//! This binary is not the LSP transport: it never watches for `didChange`
//! notifications and never keeps a document open across invocations. It
//! builds a registry and a one-document store, runs the diagnostics
//! pipeline once, and prints the result.
//!
//! # Usage
//!
//! ```bash
//! cem-lsp-cli diagnose --manifest custom-elements.json src/index.html
//!
//! # Emit the same wire shape the LSP transport publishes
//! cem-lsp-cli diagnose --manifest custom-elements.json --format json src/index.html
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;
use std::sync::Arc;

use camino::Utf8PathBuf;
use cem_core::{Diagnostic, EngineConfig, StdWorkspaceFs};
use cem_engine::manifest::ManifestPackage;
use cem_engine::{DiagnosticsPublisher, DocumentStore, ManifestRegistry, ModuleGraph, RegistryError};
use cem_parser::pool::ParserPool;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CLI tool for running Custom Elements Manifest diagnostics against a
/// single HTML or TypeScript document.
#[derive(Parser)]
#[command(name = "cem-lsp-cli", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run the tag, attribute-name, attribute-value, and slot analyzers
    /// once over a single document and print the resulting diagnostics.
    Diagnose {
        /// Path to a Custom Elements Manifest JSON file.
        #[arg(short, long)]
        manifest: Utf8PathBuf,

        /// Path to the HTML or TypeScript document to analyze.
        document: Utf8PathBuf,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },
}

/// Diagnostics output format.
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One diagnostic per line, formatted for a terminal.
    Human,
    /// The same `{uri, diagnostics}` wire shape the transport publishes.
    Json,
}

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(level)
    });

    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

/// Reads and parses a Custom Elements Manifest JSON file into a registry.
///
/// # Errors
///
/// Returns [`RegistryError::Read`] if the file cannot be read, or
/// [`RegistryError::Parse`] if it does not parse as a manifest package.
fn load_registry(manifest_path: &Utf8PathBuf) -> Result<ManifestRegistry, RegistryError> {
    let text = std::fs::read_to_string(manifest_path.as_std_path()).map_err(|source| RegistryError::Read {
        path: manifest_path.clone(),
        source,
    })?;
    let package: ManifestPackage = serde_json::from_str(&text).map_err(|source| RegistryError::Parse {
        path: manifest_path.clone(),
        source,
    })?;
    Ok(ManifestRegistry::from_packages(vec![package]))
}

/// Builds a stable `file://` URI for a document path, so the tag analyzer's
/// local-definition suppression can compare it against manifest
/// module paths the way an editor-supplied URI would be compared.
fn document_uri(path: &Utf8PathBuf) -> color_eyre::Result<String> {
    let absolute = path
        .canonicalize_utf8()
        .map_err(|e| color_eyre::eyre::eyre!("failed to resolve document path {path}: {e}"))?;
    Ok(format!("file://{absolute}"))
}

/// The same wire shape the LSP transport publishes.
#[derive(serde::Serialize)]
struct DiagnosticsPayload<'a> {
    uri: &'a str,
    diagnostics: &'a [Diagnostic],
}

fn print_human(diagnostics: &[Diagnostic]) -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    if diagnostics.is_empty() {
        writeln!(handle, "No diagnostics.")?;
        return Ok(());
    }
    for diagnostic in diagnostics {
        writeln!(
            handle,
            "{}:{}: [{}] {}",
            diagnostic.range.start.line,
            diagnostic.range.start.column,
            diagnostic.severity.as_str(),
            diagnostic.message
        )?;
    }
    Ok(())
}

/// Runs the `diagnose` subcommand: build a registry and a one-document
/// store, run the publisher pipeline once, and print the result.
///
/// # Errors
///
/// Returns an error if the manifest or document cannot be read or parsed.
fn run_diagnose(manifest: Utf8PathBuf, document: Utf8PathBuf, format: OutputFormat) -> color_eyre::Result<()> {
    let config = EngineConfig::default();
    let registry = Arc::new(load_registry(&manifest)?);
    let parsers = Arc::new(ParserPool::new());
    parsers
        .warm(config.parser_pool_initial_capacity)
        .map_err(|e| color_eyre::eyre::eyre!("failed to warm parser pool: {e}"))?;
    let documents = Arc::new(DocumentStore::new(Arc::clone(&parsers)));
    let graph = Arc::new(ModuleGraph::new(StdWorkspaceFs, registry.snapshot(), Arc::clone(&parsers)));
    let publisher = DiagnosticsPublisher::with_config(Arc::clone(&documents), Arc::clone(&registry), graph, config);

    let text = std::fs::read_to_string(document.as_std_path())
        .map_err(|e| color_eyre::eyre::eyre!("failed to read document {document}: {e}"))?;
    let uri = document_uri(&document)?;

    info!(uri = %uri, "opening document");
    documents.open(uri.clone(), text, 1);
    publisher.note_version(&uri, 1);

    let diagnostics = publisher.publish(&uri).map(|result| result.diagnostics).unwrap_or_default();

    match format {
        OutputFormat::Json => {
            let payload = DiagnosticsPayload {
                uri: &uri,
                diagnostics: &diagnostics,
            };
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", serde_json::to_string_pretty(&payload)?)?;
        }
        OutputFormat::Human => print_human(&diagnostics)?,
    }

    Ok(())
}

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    match cli.command {
        Commands::Diagnose { manifest, document, format } => run_diagnose(manifest, document, format),
    }
}
