//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

use crate::encoding::{SELECT_LATIN9, encode_latin9};
use image::GrayImage;

/// Maximum raster width in dots (80mm paper at 203 dpi)
const MAX_RASTER_WIDTH: u32 = 576;

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers. Text is Latin-9
/// encoded as it is inserted; command and raster bytes go into the
/// buffer verbatim, so a raster payload is byte-exact in the output.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(4096);
        // Initialize printer (ESC @), then select the code page
        // (INIT resets the printer to its default page)
        buf.extend_from_slice(&[0x1B, 0x40]);
        buf.extend_from_slice(&SELECT_LATIN9);
        Self { buf, width }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write text, Latin-9 encoded
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(&encode_latin9(s));
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self
    }

    /// Write multiple empty lines
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        // ESC d n - Print and feed n lines
        self.buf.extend_from_slice(&[0x1B, 0x64, lines]);
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    /// Align text to left (default)
    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    /// Reset to normal size
    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === Separators ===

    /// Print a line of '=' characters
    pub fn sep_double(&mut self) -> &mut Self {
        self.line(&"=".repeat(self.width))
    }

    // === Raster Graphics ===

    /// Embed a grayscale image as GS v 0 raster graphics
    ///
    /// Pixels darker than mid-gray print black. Images wider than the
    /// print head are downscaled to fit. The payload goes into the
    /// buffer verbatim; it must never be re-encoded, or the declared
    /// `xL xH yL yH` window would no longer match the data.
    pub fn raster(&mut self, img: &GrayImage) -> &mut Self {
        let (w, h) = img.dimensions();

        let resized;
        let img = if w > MAX_RASTER_WIDTH {
            let ratio = MAX_RASTER_WIDTH as f64 / w as f64;
            let new_h = (h as f64 * ratio) as u32;
            resized = image::imageops::resize(
                img,
                MAX_RASTER_WIDTH,
                new_h,
                image::imageops::FilterType::Nearest,
            );
            &resized
        } else {
            img
        };

        let (w, h) = img.dimensions();
        let x_bytes = w.div_ceil(8);

        // Center align for image
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);

        // GS v 0 m xL xH yL yH
        self.buf.extend_from_slice(&[0x1D, 0x76, 0x30, 0x00]);
        self.buf.push(x_bytes as u8);
        self.buf.push((x_bytes >> 8) as u8);
        self.buf.push(h as u8);
        self.buf.push((h >> 8) as u8);

        for y in 0..h {
            for x_byte in 0..x_bytes {
                let mut byte = 0u8;
                for bit in 0..8 {
                    let x = x_byte * 8 + bit;
                    if x < w {
                        let luma = img.get_pixel(x, y)[0];
                        // Dark enough = print black (1)
                        if luma < 128 {
                            byte |= 1 << (7 - bit);
                        }
                    }
                }
                self.buf.push(byte);
            }
        }

        // Newline after image, back to left alignment
        self.buf.push(0x0A);
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);

        self
    }

    // === Paper Control ===

    /// Cut paper (full cut)
    pub fn cut(&mut self) -> &mut Self {
        // GS V 0 - Full cut
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x00]);
        self
    }

    // === Build ===

    /// Consume the builder and return the print data
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_builder_basic() {
        let mut b = EscPosBuilder::new(32);
        b.center()
            .bold()
            .line("Studentpuben Villan")
            .bold_off()
            .left()
            .line("2x Burger");

        let data = b.build();
        // INIT then code page select
        assert_eq!(&data[..5], &[0x1B, 0x40, 0x1B, 0x74, 40]);
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("Studentpuben Villan"));
        assert!(s.contains("2x Burger"));
    }

    #[test]
    fn test_text_is_latin9_encoded() {
        let mut b = EscPosBuilder::new(48);
        b.line("Köket");

        let data = b.build();
        assert!(data.windows(5).any(|w| w == [b'K', 0xF6, b'k', b'e', b't']));
    }

    #[test]
    fn test_separators() {
        let mut b = EscPosBuilder::new(10);
        b.sep_double();

        let data = b.build();
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains("=========="));
    }

    #[test]
    fn test_cut_command() {
        let mut b = EscPosBuilder::new(48);
        b.cut();

        let data = b.build();
        assert!(data.windows(3).any(|w| w == [0x1D, 0x56, 0x00]));
    }

    #[test]
    fn test_raster_header() {
        // 16x2 all-black image: 2 bytes per row
        let img = GrayImage::from_pixel(16, 2, Luma([0u8]));
        let mut b = EscPosBuilder::new(48);
        b.raster(&img);

        let data = b.build();
        let pos = data
            .windows(4)
            .position(|w| w == [0x1D, 0x76, 0x30, 0x00])
            .expect("raster command present");
        // xL xH yL yH
        assert_eq!(&data[pos + 4..pos + 8], &[2, 0, 2, 0]);
        // All-black rows
        assert_eq!(&data[pos + 8..pos + 12], &[0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_raster_payload_survives_build() {
        // All-black payload bytes are 0xFF, outside ASCII; they must
        // reach the output untouched even with non-ASCII text around them
        let img = GrayImage::from_pixel(400, 100, Luma([0u8]));
        let mut b = EscPosBuilder::new(48);
        b.line("Köket");
        b.raster(&img);
        b.cut();

        let data = b.build();
        let pos = data
            .windows(4)
            .position(|w| w == [0x1D, 0x76, 0x30, 0x00])
            .expect("raster command present");

        let x_bytes = data[pos + 4] as usize | ((data[pos + 5] as usize) << 8);
        let h = data[pos + 6] as usize | ((data[pos + 7] as usize) << 8);
        assert_eq!(x_bytes, 50);
        assert_eq!(h, 100);

        let payload_start = pos + 8;
        let payload_end = payload_start + x_bytes * h;
        assert!(data.len() > payload_end);
        assert!(data[payload_start..payload_end].iter().all(|&b| b == 0xFF));

        // The cut command sits after the full payload window
        assert!(
            data[payload_end..]
                .windows(3)
                .any(|w| w == [0x1D, 0x56, 0x00])
        );
    }

    #[test]
    fn test_raster_downscales_wide_images() {
        let img = GrayImage::from_pixel(1200, 10, Luma([0u8]));
        let mut b = EscPosBuilder::new(48);
        b.raster(&img);

        let data = b.build();
        let pos = data
            .windows(4)
            .position(|w| w == [0x1D, 0x76, 0x30, 0x00])
            .expect("raster command present");
        let x_bytes = data[pos + 4] as u32 | ((data[pos + 5] as u32) << 8);
        assert!(x_bytes * 8 <= 576);
    }
}
