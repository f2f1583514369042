//! Generation configuration.
//!
//! Every field has a default matching the stock output: a level-H symbol of at least version 2,
//! 10 px modules, a 4 module border, black on white, and a logo capped at 30% of the image width
//! sitting on a white plate with 30 px padding and 15 px corners.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{QrLogoError, QrLogoResult};
use crate::matrix::{QrCodeEcc, MAX_VERSION, MIN_VERSION};

/// Largest accepted image side, in pixels.
pub const MAX_IMAGE_SIDE: u32 = 16_384;

/// Top-level configuration for [`generate_qr`](crate::helper::generate_qr).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    /// Where the PNG is written when no output path is given.
    pub output: PathBuf,

    /// Logo picked up when none is given explicitly, if the file exists.
    pub default_logo: Option<PathBuf>,

    /// Symbol and raster parameters.
    pub render: RenderOptions,

    /// Logo badge geometry.
    pub logo: LogoStyle,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// QR symbol and raster parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Error correction level. High leaves room for the logo to cover modules.
    pub ecl: QrCodeEcc,

    /// Smallest symbol version to use.
    pub min_version: u8,

    /// Side of one module, in pixels.
    pub module_size: u32,

    /// Quiet zone width, in modules.
    pub border: u32,

    /// Dark module color.
    pub foreground: [u8; 3],

    /// Light module and quiet zone color.
    pub background: [u8; 3],
}

/// Geometry of the logo badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoStyle {
    /// Maximum logo width as a fraction of the QR image width.
    pub max_width_ratio: f64,

    /// Backing plate margin around the logo, in pixels.
    pub padding: u32,

    /// Backing plate corner radius, in pixels.
    pub corner_radius: u32,

    /// Backing plate RGBA color.
    pub backing: [u8; 4],
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "qrlogo=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("qrcode.png"),
            default_logo: Some(PathBuf::from("logo.png")),
            render: RenderOptions::default(),
            logo: LogoStyle::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ecl: QrCodeEcc::High,
            min_version: 2,
            module_size: 10,
            border: 4,
            foreground: [0, 0, 0],
            background: [255, 255, 255],
        }
    }
}

impl Default for LogoStyle {
    fn default() -> Self {
        Self {
            max_width_ratio: 0.3,
            padding: 30,
            corner_radius: 15,
            backing: [255, 255, 255, 255],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl QrConfig {
    /// Load config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> QrLogoResult<Self> {
        if !path.exists() {
            return Err(QrLogoError::file_not_found(path));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path` if one is given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> QrLogoResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject values the renderer cannot work with.
    pub fn validate(&self) -> QrLogoResult<()> {
        self.render.validate()?;

        let ratio = self.logo.max_width_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(QrLogoError::config(format!(
                "max_width_ratio must be in (0, 1], got {ratio}"
            )));
        }
        let plate_margin = self.logo.padding.checked_mul(2);
        if plate_margin.map_or(true, |m| m > MAX_IMAGE_SIDE) {
            return Err(QrLogoError::config(format!(
                "padding {} exceeds the {MAX_IMAGE_SIDE} px image limit",
                self.logo.padding
            )));
        }
        Ok(())
    }
}

impl RenderOptions {
    /// Side of the rendered image for a symbol `modules` wide, or `None` on overflow.
    pub fn image_side(&self, modules: u32) -> Option<u32> {
        self.border
            .checked_mul(2)?
            .checked_add(modules)?
            .checked_mul(self.module_size)
    }

    /// Reject values that cannot be rendered.
    ///
    /// The image side is checked against a version 40 symbol, so any payload that encodes
    /// renders within [`MAX_IMAGE_SIDE`].
    pub fn validate(&self) -> QrLogoResult<()> {
        if self.module_size == 0 {
            return Err(QrLogoError::config("module_size must be at least 1"));
        }
        if !(MIN_VERSION..=MAX_VERSION).contains(&self.min_version) {
            return Err(QrLogoError::config(format!(
                "min_version must be between {MIN_VERSION} and {MAX_VERSION}, got {}",
                self.min_version
            )));
        }
        let largest = u32::from(MAX_VERSION) * 4 + 17;
        match self.image_side(largest) {
            Some(side) if side <= MAX_IMAGE_SIDE => Ok(()),
            _ => Err(QrLogoError::config(format!(
                "module_size {} with border {} exceeds the {MAX_IMAGE_SIDE} px image limit",
                self.module_size, self.border
            ))),
        }
    }
}
