use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use fenix_barcode::config::UPLOAD_DIR_ENV;
use fenix_barcode::logging::init_cli_logger;
use fenix_barcode::matrix::dimensions;
use fenix_barcode::terminal::{fits_in_terminal, preview_matrix};
use fenix_barcode::{render_matrix_to_terminal, BarcodeProperties, BarcodeService, SymbolFormat};

#[derive(Parser)]
#[command(name = "fenix-barcode")]
#[command(author, version, about = "Encode text into barcode PNG images", long_about = None)]
struct Cli {
    /// TOML file with a [fenix.spring.barcode] section (defaults to ./fenix-barcode.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory where image files are written, overrides the config file
    #[arg(short, long, global = true, env = UPLOAD_DIR_ENV)]
    upload_dir: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a barcode PNG into the upload directory
    Image {
        /// Symbol format, e.g. QR_CODE, EAN_13, code128
        format: SymbolFormat,

        /// Text to encode
        text: String,

        /// Base name of the file; a Unix timestamp and ".png" are appended
        #[arg(short, long, default_value = "barcode")]
        name: String,

        /// Image width in pixels
        #[arg(long, default_value = "300")]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value = "150")]
        height: u32,
    },

    /// Produce PNG bytes on stdout or in a file
    Bytes {
        format: SymbolFormat,

        text: String,

        #[arg(long, default_value = "300")]
        width: u32,

        #[arg(long, default_value = "150")]
        height: u32,

        /// Output file (defaults to stdout)
        #[arg(short, long, conflicts_with = "base64")]
        output: Option<PathBuf>,

        /// Print a data:image/png;base64 URI instead of raw bytes
        #[arg(long)]
        base64: bool,
    },

    /// Render the barcode in the terminal
    Preview { format: SymbolFormat, text: String },

    /// List supported formats with sample payloads
    Formats,

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    let properties = BarcodeProperties::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_env_override(cli.upload_dir);

    match cli.command {
        Commands::Image {
            format,
            text,
            name,
            width,
            height,
        } => {
            let service = BarcodeService::from_properties(properties);
            let path = service.barcode_img(format, &text, &name, width, height)?;
            println!("{}", path.display());
        }

        Commands::Bytes {
            format,
            text,
            width,
            height,
            output,
            base64,
        } => {
            let service = BarcodeService::from_properties(properties);
            let bytes = service.barcode_bytes(format, &text, width, height)?;

            if let Some(path) = output {
                fs::write(&path, &bytes)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("{}", path.display());
            } else if base64 {
                println!("data:image/png;base64,{}", BASE64.encode(&bytes));
            } else {
                let mut stdout = io::stdout().lock();
                stdout.write_all(&bytes)?;
                stdout.flush()?;
            }
        }

        Commands::Preview { format, text } => {
            let matrix = preview_matrix(&text, format)?;
            if !fits_in_terminal(&matrix) {
                let (width, height) = dimensions(&matrix);
                anyhow::bail!(
                    "Terminal too small to display this {} symbol ({}x{} modules)",
                    format,
                    width,
                    height
                );
            }
            println!("{}  |  {}", format, text);
            println!("{}", "=".repeat(50));
            println!();
            print!("{}", render_matrix_to_terminal(&matrix));
        }

        Commands::Formats => {
            for format in SymbolFormat::ALL {
                println!("{:<12} {}", format.name(), format.description());
                println!("{:<12} sample: {}", "", format.sample());
            }
        }

        Commands::Config => {
            print!("{}", properties.to_toml_string()?);
        }
    }

    Ok(())
}
