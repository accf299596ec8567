//! # Etiqueta CLI
//!
//! Command-line interface for label rendering and export.
//!
//! ## Usage
//!
//! ```bash
//! # Preview a template as SVG with bleed/safe guides
//! etiqueta render label.json --bleed --safe -o preview.svg
//!
//! # Export production artwork (real QR/barcode geometry)
//! etiqueta export label.json --format pdf -o label.pdf
//!
//! # Substitute variables at export time
//! etiqueta export label.json --var productName="Sleep Well Plus" --var lot=A42
//!
//! # Check HK labeling compliance
//! etiqueta check label.json
//!
//! # Start the HTTP API
//! etiqueta serve --listen 0.0.0.0:8080
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use etiqueta::EtiquetaError;
use etiqueta::compliance::{ComplianceStatus, validate_hk};
use etiqueta::export::{ExportFormat, ExportOptions, export_pdf, export_svg};
use etiqueta::label::LabelTemplate;
use etiqueta::render::{RenderOptions, render_svg};
use etiqueta::server::{ServerConfig, serve};

/// Etiqueta - label rendering and export utility
#[derive(Parser, Debug)]
#[command(name = "etiqueta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Svg,
    Pdf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a design preview SVG (guides optional)
    Render {
        /// Template JSON file
        template: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include the bleed area and its guide
        #[arg(long)]
        bleed: bool,

        /// Draw the safe-zone guide
        #[arg(long)]
        safe: bool,

        /// Render resolution
        #[arg(long, default_value = "96")]
        dpi: f64,
    },

    /// Export production artwork (SVG or PDF)
    Export {
        /// Template JSON file
        template: PathBuf,

        /// Output file (defaults to stdout for SVG; required for PDF)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "svg")]
        format: FormatArg,

        /// Variable substitution, repeatable: --var key=value
        #[arg(long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,

        /// Render resolution
        #[arg(long, default_value = "96")]
        dpi: f64,
    },

    /// Check a template against the HK labeling checklist
    Check {
        /// Template JSON file
        template: PathBuf,
    },

    /// Start the HTTP API server
    Serve {
        /// Listen address
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), EtiquetaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            template,
            output,
            bleed,
            safe,
            dpi,
        } => {
            let template = load_template(&template)?;
            let svg = render_svg(
                &template,
                &RenderOptions {
                    show_bleed: bleed,
                    show_safe: safe,
                    dpi,
                },
            );
            write_output(output.as_deref(), svg.as_bytes())?;
        }

        Commands::Export {
            template,
            output,
            format,
            vars,
            dpi,
        } => {
            let template = load_template(&template)?;
            let variables = parse_vars(&vars)?;
            let options = ExportOptions {
                format: match format {
                    FormatArg::Svg => ExportFormat::Svg,
                    FormatArg::Pdf => ExportFormat::Pdf,
                },
                variables,
                dpi,
            };

            match options.format {
                ExportFormat::Svg => {
                    let svg = export_svg(&template, &options);
                    write_output(output.as_deref(), svg.as_bytes())?;
                }
                ExportFormat::Pdf => {
                    let pdf = export_pdf(&template, &options)?;
                    let path = output.ok_or_else(|| {
                        EtiquetaError::Template("PDF export requires -o <FILE>".to_string())
                    })?;
                    fs::write(&path, pdf)?;
                    println!("Wrote {}", path.display());
                }
            }
        }

        Commands::Check { template } => {
            let template = load_template(&template)?;
            let report = validate_hk(&template);

            for check in &report.checklist {
                let mark = match check.status {
                    ComplianceStatus::Pass => "PASS",
                    ComplianceStatus::Warning => "WARN",
                    ComplianceStatus::Fail => "FAIL",
                };
                match &check.message {
                    Some(msg) => println!("[{}] {} - {}", mark, check.item, msg),
                    None => println!("[{}] {}", mark, check.item),
                }
            }
            println!();
            println!(
                "Score: {}/100 ({})",
                report.score,
                if report.passed { "passed" } else { "failed" }
            );
        }

        Commands::Serve { listen } => {
            let config = ServerConfig {
                listen_addr: listen,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve(config))?;
        }
    }

    Ok(())
}

/// Read and parse a template file.
fn load_template(path: &std::path::Path) -> Result<LabelTemplate, EtiquetaError> {
    let json = fs::read_to_string(path)?;
    LabelTemplate::from_json(&json)
}

/// Parse repeated `--var key=value` arguments into a map.
fn parse_vars(vars: &[String]) -> Result<Option<HashMap<String, String>>, EtiquetaError> {
    if vars.is_empty() {
        return Ok(None);
    }
    let mut map = HashMap::new();
    for pair in vars {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            EtiquetaError::Template(format!("invalid --var '{}', expected key=value", pair))
        })?;
        map.insert(key.to_string(), value.to_string());
    }
    Ok(Some(map))
}

/// Write to a file, or stdout when no path is given.
fn write_output(path: Option<&std::path::Path>, bytes: &[u8]) -> Result<(), EtiquetaError> {
    use std::io::Write;

    match path {
        Some(path) => {
            fs::write(path, bytes)?;
            println!("Wrote {}", path.display());
        }
        None => {
            std::io::stdout().write_all(bytes)?;
        }
    }
    Ok(())
}
