//! Order number banner rendering
//!
//! Renders the "Your order number is NNN" badge that is appended to the
//! customer receipt: white text on a solid black field, so the printed
//! result is an inverted block the customer can spot from across the bar.

use image::{GrayImage, Luma};
use spleen_font::{FONT_12X24, PSF2Font};
use tracing::debug;

const BANNER_WIDTH: u32 = 400;
const BANNER_HEIGHT: u32 = 100;
const HEADER_TEXT: &str = "Your order number is";

const GLYPH_WIDTH: u32 = 12;

/// Render the order number banner as a grayscale image
///
/// The header line is drawn at native glyph size, the number itself at
/// triple scale underneath.
pub fn order_number_banner(number: &str) -> GrayImage {
    debug!(number = %number, "rendering order number banner");

    let mut canvas = GrayImage::from_pixel(BANNER_WIDTH, BANNER_HEIGHT, Luma([0u8]));
    draw_text(&mut canvas, HEADER_TEXT, 1, 2);
    draw_text(&mut canvas, number, 3, 26);

    canvas
}

/// Draw text horizontally centered at the given baseline, scaled by `scale`
fn draw_text(canvas: &mut GrayImage, text: &str, scale: u32, y0: u32) {
    let mut font = PSF2Font::new(FONT_12X24).unwrap();

    let glyph_w = GLYPH_WIDTH * scale;
    let total_w = text.chars().count() as u32 * glyph_w;
    let mut x0 = canvas.width().saturating_sub(total_w) / 2;

    for ch in text.chars() {
        let utf8 = ch.to_string();
        if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
            for (row_y, row) in glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if !on {
                        continue;
                    }
                    // Nearest-neighbor upscale of the bitmap glyph
                    for dy in 0..scale {
                        for dx in 0..scale {
                            let px = x0 + col_x as u32 * scale + dx;
                            let py = y0 + row_y as u32 * scale + dy;
                            if px < canvas.width() && py < canvas.height() {
                                canvas.put_pixel(px, py, Luma([255u8]));
                            }
                        }
                    }
                }
            }
        }
        x0 += glyph_w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_dimensions() {
        let banner = order_number_banner("007");
        assert_eq!(banner.dimensions(), (BANNER_WIDTH, BANNER_HEIGHT));
    }

    #[test]
    fn test_banner_has_text_pixels() {
        let banner = order_number_banner("123");
        let white = banner.pixels().filter(|p| p[0] == 255).count();
        let black = banner.pixels().filter(|p| p[0] == 0).count();
        // Mostly black field with some white glyph pixels
        assert!(white > 100);
        assert!(black > white);
    }

    #[test]
    fn test_number_area_is_scaled_up() {
        // The big digits occupy rows below the header band
        let banner = order_number_banner("888");
        let lower_white = banner
            .enumerate_pixels()
            .filter(|(_, y, p)| *y >= 26 && p[0] == 255)
            .count();
        let upper_white = banner
            .enumerate_pixels()
            .filter(|(_, y, p)| *y < 26 && p[0] == 255)
            .count();
        assert!(lower_white > upper_white);
    }
}
