//! # qrlogo
//!
//! Generate QR code PNGs for a URL or domain, optionally with a logo in the middle.
//!
//! Symbol encoding is delegated to the [`qrcode`](https://docs.rs/qrcode) crate. This crate picks
//! the symbol version, rasterizes the modules, and composites the logo: the logo is scaled to at
//! most 30% of the image width, placed on a white rounded plate, and centered on the code. The
//! default error correction level is High so the covered modules can still be recovered.
//!
//! ## Example
//!
//! Generate a QR code with a logo:
//!
//! ```no_run
//! use qrlogo::{generate_qr, QrConfig};
//! use std::path::Path;
//!
//! let report = generate_qr(
//!     "https://example.com",
//!     Some(Path::new("logo.png")),
//!     Path::new("output/styled_qr.png"),
//!     &QrConfig::default(),
//! ).expect("Failed to generate QR code");
//! println!("saved {}", report.output.display());
//! ```
//!
//! Generate an in-memory image buffer:
//!
//! ```no_run
//! use qrlogo::{helper::generate_image_buffer, RenderOptions};
//!
//! let img = generate_image_buffer("Hello, World!", &RenderOptions::default()).unwrap();
//! img.save("output/qr.png").expect("Failed to save image");
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: QR symbol generation and version selection.
//! - [`helper`]: Rasterization, terminal preview, PNG output and the full pipeline.
//! - [`overlay`]: Logo scaling, backing plate and compositing.
//! - [`config`]: Render, logo and logging settings.
//! - [`error`]: Error type.
//! - [`logging`]: Tracing setup.

pub mod config;
pub mod error;
pub mod helper;
pub mod logging;
pub mod matrix;
pub mod overlay;

pub use config::{LoggingConfig, LogoStyle, QrConfig, RenderOptions};
pub use error::{QrLogoError, QrLogoResult};
pub use helper::{generate_qr, GenerateReport};
pub use matrix::{QrCodeEcc, QrMatrix};
