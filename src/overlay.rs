//! Logo overlay: a scaled logo on a rounded backing plate, centered on the QR image.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbImage, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use crate::config::LogoStyle;
use crate::error::{QrLogoError, QrLogoResult};

/// Decide which logo file, if any, to composite.
///
/// An explicit path must exist. Without one, `default_logo` is used only when it exists on disk.
pub fn resolve_logo(
    explicit: Option<&Path>,
    default_logo: Option<&Path>,
) -> QrLogoResult<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(QrLogoError::file_not_found(path));
        }
        return Ok(Some(path.to_path_buf()));
    }
    match default_logo {
        Some(path) if path.is_file() => {
            tracing::debug!(path = %path.display(), "using default logo");
            Ok(Some(path.to_path_buf()))
        }
        _ => Ok(None),
    }
}

/// Open a logo and convert it to RGBA.
pub fn load_logo(path: &Path) -> QrLogoResult<RgbaImage> {
    let logo = image::open(path).map_err(|e| QrLogoError::image_decode(path, e))?;
    tracing::debug!(
        path = %path.display(),
        width = logo.width(),
        height = logo.height(),
        "loaded logo"
    );
    Ok(logo.to_rgba8())
}

/// Target logo size: at most `ratio` of the QR width, aspect ratio preserved.
///
/// Logos taller than the QR image are shrunk further so the height never exceeds `qr_width`.
pub fn scaled_logo_size(
    qr_width: u32,
    logo_width: u32,
    logo_height: u32,
    ratio: f64,
) -> (u32, u32) {
    let max_width = f64::from(qr_width) * ratio;
    let width = (max_width.min(f64::from(qr_width)).floor() as u32).max(1);
    let aspect = f64::from(logo_height) / f64::from(logo_width.max(1));
    let height = f64::from(width) * aspect;
    if height > f64::from(qr_width) {
        let width = (f64::from(qr_width) / aspect).floor() as u32;
        return (width.max(1), qr_width.max(1));
    }
    (width, (height.floor() as u32).max(1))
}

/// A transparent canvas covered by a filled rounded rectangle.
///
/// The radius is clamped to half the shorter side.
pub fn rounded_backing(width: u32, height: u32, radius: u32, color: Rgba<u8>) -> RgbaImage {
    let mut plate = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]));
    let r = radius.min(width / 2).min(height / 2);

    if r == 0 {
        draw_filled_rect_mut(&mut plate, Rect::at(0, 0).of_size(width, height), color);
        return plate;
    }

    if width > 2 * r {
        let band = Rect::at(r as i32, 0).of_size(width - 2 * r, height);
        draw_filled_rect_mut(&mut plate, band, color);
    }
    if height > 2 * r {
        let band = Rect::at(0, r as i32).of_size(width, height - 2 * r);
        draw_filled_rect_mut(&mut plate, band, color);
    }

    let r = r as i32;
    let (right, bottom) = (width as i32 - 1 - r, height as i32 - 1 - r);
    for center in [(r, r), (right, r), (r, bottom), (right, bottom)] {
        draw_filled_circle_mut(&mut plate, center, r, color);
    }
    plate
}

/// Resize the logo for a QR image of `qr_width` pixels and composite it onto its backing plate.
pub fn build_badge(logo: &RgbaImage, qr_width: u32, style: &LogoStyle) -> RgbaImage {
    let (width, height) =
        scaled_logo_size(qr_width, logo.width(), logo.height(), style.max_width_ratio);
    let logo = imageops::resize(logo, width, height, FilterType::Lanczos3);

    let mut badge = rounded_backing(
        width + style.padding * 2,
        height + style.padding * 2,
        style.corner_radius,
        Rgba(style.backing),
    );
    imageops::overlay(&mut badge, &logo, i64::from(style.padding), i64::from(style.padding));
    tracing::debug!(
        logo_width = width,
        logo_height = height,
        badge_width = badge.width(),
        badge_height = badge.height(),
        "built logo badge"
    );
    badge
}

/// Top-left corner that centers a badge on the QR image. Negative when the badge is larger.
pub fn badge_origin(
    qr_width: u32,
    qr_height: u32,
    badge_width: u32,
    badge_height: u32,
) -> (i64, i64) {
    let x = (i64::from(qr_width) - i64::from(badge_width)).div_euclid(2);
    let y = (i64::from(qr_height) - i64::from(badge_height)).div_euclid(2);
    (x, y)
}

/// Composite a logo badge onto the center of a rendered QR image.
///
/// The result always has the dimensions of `qr`; parts of an oversized badge are clipped.
pub fn overlay_logo(qr: &RgbImage, logo: &RgbaImage, style: &LogoStyle) -> RgbImage {
    let badge = build_badge(logo, qr.width(), style);
    let (x, y) = badge_origin(qr.width(), qr.height(), badge.width(), badge.height());

    let mut canvas = DynamicImage::ImageRgb8(qr.clone()).to_rgba8();
    imageops::overlay(&mut canvas, &badge, x, y);
    DynamicImage::ImageRgba8(canvas).to_rgb8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn test_scaled_logo_size_caps_width() {
        assert_eq!(scaled_logo_size(330, 200, 100, 0.3), (99, 49));
        assert_eq!(scaled_logo_size(370, 50, 50, 0.3), (111, 111));
        // Small logos are scaled up to the cap.
        assert_eq!(scaled_logo_size(1000, 10, 20, 0.3), (300, 600));
    }

    #[test]
    fn test_scaled_logo_size_caps_height() {
        assert_eq!(scaled_logo_size(330, 1, 10_000, 0.3), (1, 330));
        assert_eq!(scaled_logo_size(330, 100, 1_000, 0.3), (33, 330));
    }

    #[test]
    fn test_overlay_tall_logo_stays_bounded() {
        let qr = RgbImage::from_pixel(330, 330, image::Rgb([0, 0, 0]));
        let logo = solid(1, 10_000, [0, 255, 0, 255]);
        let badge = build_badge(&logo, qr.width(), &LogoStyle::default());
        assert_eq!(badge.dimensions(), (1 + 60, 330 + 60));
        let out = overlay_logo(&qr, &logo, &LogoStyle::default());
        assert_eq!(out.dimensions(), (330, 330));
    }

    #[test]
    fn test_scaled_logo_size_never_zero() {
        assert_eq!(scaled_logo_size(2, 1000, 1, 0.3), (1, 1));
    }

    #[test]
    fn test_rounded_backing_corners_transparent() {
        let plate = rounded_backing(100, 60, 15, Rgba([255, 255, 255, 255]));
        assert_eq!(plate.dimensions(), (100, 60));
        assert_eq!(plate.get_pixel(0, 0)[3], 0);
        assert_eq!(plate.get_pixel(99, 0)[3], 0);
        assert_eq!(plate.get_pixel(0, 59)[3], 0);
        assert_eq!(plate.get_pixel(99, 59)[3], 0);
        assert_eq!(*plate.get_pixel(50, 30), Rgba([255, 255, 255, 255]));
        // Straight edges are filled.
        assert_eq!(plate.get_pixel(50, 0)[3], 255);
        assert_eq!(plate.get_pixel(0, 30)[3], 255);
    }

    #[test]
    fn test_rounded_backing_zero_radius_is_full_rect() {
        let plate = rounded_backing(10, 8, 0, Rgba([255, 255, 255, 255]));
        assert!(plate.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_rounded_backing_radius_clamped() {
        let plate = rounded_backing(20, 10, 100, Rgba([255, 255, 255, 255]));
        assert_eq!(plate.dimensions(), (20, 10));
        assert_eq!(plate.get_pixel(10, 5)[3], 255);
    }

    #[test]
    fn test_badge_adds_padding() {
        let style = LogoStyle::default();
        let badge = build_badge(&solid(200, 100, [255, 0, 0, 255]), 330, &style);
        assert_eq!(badge.dimensions(), (99 + 60, 49 + 60));

        let center = badge.get_pixel(badge.width() / 2, badge.height() / 2);
        assert!(center[0] > 200 && center[1] < 60 && center[2] < 60);
        // Inside the padding the plate shows through.
        assert_eq!(*badge.get_pixel(15, badge.height() / 2), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_badge_origin_centers_and_floors() {
        assert_eq!(badge_origin(330, 330, 159, 109), (85, 110));
        assert_eq!(badge_origin(10, 10, 15, 15), (-3, -3));
    }

    #[test]
    fn test_overlay_keeps_size_and_centers_logo() {
        let qr = RgbImage::from_pixel(330, 330, image::Rgb([0, 0, 0]));
        let out = overlay_logo(&qr, &solid(200, 100, [0, 0, 255, 255]), &LogoStyle::default());
        assert_eq!(out.dimensions(), qr.dimensions());

        let center = out.get_pixel(165, 165);
        assert!(center[2] > 200 && center[0] < 60);
        // Backing plate between logo and QR.
        assert_eq!(*out.get_pixel(85 + 15, 165), image::Rgb([255, 255, 255]));
        // Untouched outside the badge.
        assert_eq!(*out.get_pixel(5, 5), image::Rgb([0, 0, 0]));
    }

    #[test]
    fn test_transparent_logo_shows_plate() {
        let qr = RgbImage::from_pixel(200, 200, image::Rgb([0, 0, 0]));
        let out = overlay_logo(&qr, &solid(40, 40, [255, 0, 0, 0]), &LogoStyle::default());
        assert_eq!(*out.get_pixel(100, 100), image::Rgb([255, 255, 255]));
    }

    #[test]
    fn test_resolve_logo() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        solid(4, 4, [0, 0, 0, 255]).save(&logo).unwrap();
        let missing = dir.path().join("missing.png");

        let (logo, missing) = (logo.as_path(), missing.as_path());

        assert_eq!(resolve_logo(Some(logo), None).unwrap(), Some(logo.to_path_buf()));
        assert_eq!(resolve_logo(None, Some(logo)).unwrap(), Some(logo.to_path_buf()));
        assert_eq!(resolve_logo(None, Some(missing)).unwrap(), None);
        assert_eq!(resolve_logo(None, None).unwrap(), None);
        assert!(matches!(
            resolve_logo(Some(missing), Some(logo)),
            Err(QrLogoError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_load_logo_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(matches!(load_logo(&path), Err(QrLogoError::ImageDecode { .. })));
    }

    proptest! {
        #[test]
        fn prop_overlay_never_grows_image(
            qr_side in 21u32..400,
            logo_w in 1u32..300,
            logo_h in 1u32..300,
        ) {
            let qr = RgbImage::from_pixel(qr_side, qr_side, image::Rgb([0, 0, 0]));
            let logo = solid(logo_w, logo_h, [10, 20, 30, 255]);
            let out = overlay_logo(&qr, &logo, &LogoStyle::default());
            prop_assert_eq!(out.dimensions(), (qr_side, qr_side));
        }

        #[test]
        fn prop_logo_width_within_ratio(
            qr_width in 1u32..2000,
            logo_w in 1u32..2000,
            logo_h in 1u32..2000,
        ) {
            let (w, h) = scaled_logo_size(qr_width, logo_w, logo_h, 0.3);
            prop_assert!(f64::from(w) <= (f64::from(qr_width) * 0.3).max(1.0));
            prop_assert!(h >= 1 && h <= qr_width);
        }
    }
}
