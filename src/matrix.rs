#![forbid(unsafe_code)]
//! QR symbol generation.
//!
//! This module wraps the `qrcode` crate, which performs the actual encoding (segment selection,
//! Reed–Solomon error correction, module placement and masking). On top of it sits the version
//! search used by this crate: the smallest version at or above a configurable minimum that can
//! hold the payload.
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode, Version};
use serde::{Deserialize, Serialize};

/// Smallest QR Code Model 2 version.
pub const MIN_VERSION: u8 = 1;
/// Largest QR Code Model 2 version.
pub const MAX_VERSION: u8 = 40;

/// The error correction level in a QR Code symbol.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    #[default]
    High,
}

impl QrCodeEcc {
    fn ec_level(self) -> EcLevel {
        use QrCodeEcc::*;
        match self {
            Low => EcLevel::L,
            Medium => EcLevel::M,
            Quartile => EcLevel::Q,
            High => EcLevel::H,
        }
    }
}

/// A QR Code symbol, representing a square grid of dark and light modules.
///
/// Instances are immutable after creation. Create one with [`QrMatrix::encode_text`].
///
/// # Example
///
/// ```rust
/// use qrlogo::matrix::{QrCodeEcc, QrMatrix};
///
/// let qr = QrMatrix::encode_text("Hello, World!", QrCodeEcc::Low, 1).unwrap();
/// assert_eq!(qr.version(), 1);
/// assert_eq!(qr.size(), 21);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrMatrix {
    size: i32,
    version: u8,
    ecl: QrCodeEcc,
    /// Row-major, `true` = dark.
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Encodes a text string into a QR code.
    ///
    /// Selects the smallest version in `min_version..=40` that can hold the text at the requested
    /// error correction level.
    ///
    /// # Errors
    ///
    /// * [`QrLogoError::InvalidInput`](crate::QrLogoError::InvalidInput) if `text` is empty or
    ///   `min_version` is out of range.
    /// * [`QrLogoError::DataTooLong`](crate::QrLogoError::DataTooLong) if even version 40 is
    ///   too small.
    pub fn encode_text(text: &str, ecl: QrCodeEcc, min_version: u8) -> crate::QrLogoResult<Self> {
        if text.is_empty() {
            return Err(crate::QrLogoError::invalid_input("payload must not be empty"));
        }
        if !(MIN_VERSION..=MAX_VERSION).contains(&min_version) {
            return Err(crate::QrLogoError::invalid_input(format!(
                "minimum version must be between {MIN_VERSION} and {MAX_VERSION}, got {min_version}"
            )));
        }

        for ver in min_version..=MAX_VERSION {
            let version = Version::Normal(i16::from(ver));
            match QrCode::with_version(text.as_bytes(), version, ecl.ec_level()) {
                Ok(code) => {
                    tracing::debug!(version = ver, width = code.width(), ?ecl, "encoded QR symbol");
                    return Ok(Self::from_code(&code, ver, ecl));
                }
                Err(QrError::DataTooLong) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(crate::QrLogoError::DataTooLong { min_version })
    }

    fn from_code(code: &QrCode, version: u8, ecl: QrCodeEcc) -> Self {
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        QrMatrix {
            size: code.width() as i32,
            version,
            ecl,
            modules,
        }
    }

    /// Returns this QR Code's version, in the range [1, 40].
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns this QR Code's size, in the range [21, 177].
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Returns this QR Code's error correction level.
    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.ecl
    }

    /// Returns the color of the module (pixel) at the given coordinates,
    /// which is `false` for light or `true` for dark.
    ///
    /// The top left corner has the coordinates (x=0, y=0). If the given
    /// coordinates are out of bounds, then `false` (light) is returned.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x)
            && (0..self.size).contains(&y)
            && self.modules[(y * self.size + x) as usize]
    }
}
