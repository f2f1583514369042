//! qrlogo CLI — encode a URL or domain as a QR code PNG, with an optional centered logo.
//!
//! Usage:
//!   qrlogo                          Prompt for the payload, write qrcode.png
//!   qrlogo https://example.com      Encode the given payload
//!   qrlogo URL -l logo.png -o x.png Use a specific logo and output file

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use qrlogo::helper::print_qr;
use qrlogo::{generate_qr, logging, QrCodeEcc, QrConfig};

#[derive(Parser)]
#[command(
    name = "qrlogo",
    about = "Generate a QR code PNG with an optional centered logo",
    version,
    author
)]
struct Cli {
    /// Domain or URL to encode; prompted for on stdin when omitted
    payload: Option<String>,

    /// Output PNG path [default: qrcode.png]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Logo image to place in the center [default: logo.png if present]
    #[arg(short, long)]
    logo: Option<PathBuf>,

    /// Never add a logo, even if the default one exists
    #[arg(long, conflicts_with = "logo")]
    no_logo: bool,

    /// Error correction level
    #[arg(long, value_enum)]
    ecc: Option<QrCodeEcc>,

    /// Module size in pixels
    #[arg(long)]
    module_size: Option<u32>,

    /// Quiet zone width in modules
    #[arg(long)]
    border: Option<u32>,

    /// Smallest QR version to use (1-40)
    #[arg(long)]
    min_version: Option<u8>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also print the code to the terminal
    #[arg(long)]
    preview: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, config: &mut QrConfig) {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if self.no_logo {
            config.default_logo = None;
        }
        if let Some(ecc) = self.ecc {
            config.render.ecl = ecc;
        }
        if let Some(size) = self.module_size {
            config.render.module_size = size;
        }
        if let Some(border) = self.border {
            config.render.border = border;
        }
        if let Some(version) = self.min_version {
            config.render.min_version = version;
        }
    }
}

/// Ask for the payload and read one line, without its line terminator.
fn prompt_payload<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<String> {
    write!(output, "Enter a web domain or URL: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = QrConfig::load_or_default(cli.config.as_deref())
        .with_context(|| format!("Failed to load config {:?}", cli.config))?;
    cli.apply(&mut config);
    logging::init_logging(&config.logging, cli.verbose);

    let payload = match &cli.payload {
        Some(payload) => payload.clone(),
        None => prompt_payload(io::stdin().lock(), io::stdout()).context("Failed to read payload")?,
    };

    let report = generate_qr(&payload, cli.logo.as_deref(), &config.output, &config)
        .with_context(|| format!("Failed to generate QR code for {payload:?}"))?;

    if cli.preview {
        print_qr(&report.matrix, config.render.border as i32);
    }

    println!(
        "QR code saved as '{}' for: {}",
        report.output.display(),
        report.payload
    );
    if let Some(logo) = &report.logo {
        println!("Logo added with white rounded background from: {}", logo.display());
    }
    Ok(())
}
