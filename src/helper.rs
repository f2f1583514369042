use crate::config::{QrConfig, RenderOptions};
use crate::error::{QrLogoError, QrLogoResult};
use crate::matrix::QrMatrix;
use crate::overlay;

use image::{ImageFormat, Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

/*---- Utilities ----*/

/// Returns a block-character drawing of the given QR Code, with the given number of border
/// modules. Each module is two characters wide so the symbol looks square in a terminal.
pub fn to_terminal_string(qr: &QrMatrix, border: i32) -> String {
    let mut result = String::new();
    for y in -border..qr.size() + border {
        for x in -border..qr.size() + border {
            let c: char = if qr.get_module(x, y) { '█' } else { ' ' };
            result.push(c);
            result.push(c);
        }
        result.push('\n');
    }
    result
}

/// Prints the given QR Code to the console.
pub fn print_qr(qr: &QrMatrix, border: i32) {
    println!("{}", to_terminal_string(qr, border));
}

/// Rasterizes a QR Code.
///
/// The image is `(size + 2 * border) * module_size` pixels square. Every module becomes a solid
/// `module_size` × `module_size` block in the foreground (dark) or background (light) color.
///
/// # Example
///
/// ```rust
/// use qrlogo::config::RenderOptions;
/// use qrlogo::helper::render_matrix;
/// use qrlogo::matrix::{QrCodeEcc, QrMatrix};
///
/// let qr = QrMatrix::encode_text("Hello, World!", QrCodeEcc::Low, 1).unwrap();
/// let img = render_matrix(&qr, &RenderOptions::default());
/// assert_eq!(img.dimensions(), (290, 290));
/// ```
///
/// # Panics
///
/// Panics if the image side overflows `u32`. Options that pass
/// [`RenderOptions::validate`] never do.
pub fn render_matrix(qr: &QrMatrix, options: &RenderOptions) -> RgbImage {
    let border = options.border as i32;
    let module_size = options.module_size.max(1);
    let size = (qr.size() as u32 + 2 * options.border) * module_size;
    let mut img = RgbImage::new(size, size);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let qr_x = (x / module_size) as i32 - border;
        let qr_y = (y / module_size) as i32 - border;
        *pixel = if qr.get_module(qr_x, qr_y) {
            Rgb(options.foreground)
        } else {
            Rgb(options.background)
        };
    }

    img
}

/// Generates a QR Code image buffer from the provided content.
///
/// # Example
///
/// ```
/// use qrlogo::config::RenderOptions;
/// use qrlogo::helper::generate_image_buffer;
///
/// let img_buffer = generate_image_buffer("Hello, World!", &RenderOptions::default()).unwrap();
/// assert_eq!(img_buffer.width(), img_buffer.height());
/// ```
pub fn generate_image_buffer(content: &str, options: &RenderOptions) -> QrLogoResult<RgbImage> {
    options.validate()?;
    let qr = QrMatrix::encode_text(content, options.ecl, options.min_version)?;
    Ok(render_matrix(&qr, options))
}

/// Saves an image as PNG, creating the parent directory if it doesn't exist.
///
/// # Errors
///
/// Returns [`QrLogoError::ImageWrite`] if the file cannot be written.
pub fn save_png(img: &RgbImage, path: &Path) -> QrLogoResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| QrLogoError::image_write(path, e))
}

/// What [`generate_qr`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Path of the written PNG.
    pub output: PathBuf,
    /// The encoded payload.
    pub payload: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Symbol version used.
    pub version: u8,
    /// The encoded symbol.
    pub matrix: QrMatrix,
    /// Logo composited onto the code, if any.
    pub logo: Option<PathBuf>,
}

/// Generates a QR Code for `content`, overlays a logo if one is available, and saves a PNG.
///
/// `logo` is used when given and must exist. Otherwise `config.default_logo` is used if that
/// file exists, and without either the plain code is written.
///
/// # Arguments
///
/// * `content` - The text or URL to encode. Must not be empty.
/// * `logo` - Optional. Path of the logo image.
/// * `output` - The PNG file to write.
/// * `config` - Rendering and logo parameters.
///
/// # Example
///
/// ```no_run
/// use qrlogo::config::QrConfig;
/// use qrlogo::helper::generate_qr;
/// use std::path::Path;
///
/// let report = generate_qr(
///     "https://example.com",
///     Some(Path::new("logo.png")),
///     Path::new("output/qr.png"),
///     &QrConfig::default(),
/// ).unwrap();
/// println!("{}x{}", report.width, report.height);
/// ```
pub fn generate_qr(
    content: &str,
    logo: Option<&Path>,
    output: &Path,
    config: &QrConfig,
) -> QrLogoResult<GenerateReport> {
    if content.is_empty() {
        return Err(QrLogoError::invalid_input("payload must not be empty"));
    }
    config.validate()?;

    let render = &config.render;
    let qr = QrMatrix::encode_text(content, render.ecl, render.min_version)?;
    let mut img = render_matrix(&qr, render);

    let logo_path = overlay::resolve_logo(logo, config.default_logo.as_deref())?;
    if let Some(path) = &logo_path {
        let logo_img = overlay::load_logo(path)?;
        img = overlay::overlay_logo(&img, &logo_img, &config.logo);
    }

    save_png(&img, output)?;
    tracing::info!(
        output = %output.display(),
        version = qr.version(),
        width = img.width(),
        logo = ?logo_path,
        "saved QR code"
    );

    Ok(GenerateReport {
        output: output.to_path_buf(),
        payload: content.to_string(),
        width: img.width(),
        height: img.height(),
        version: qr.version(),
        matrix: qr,
        logo: logo_path,
    })
}
