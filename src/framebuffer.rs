//! Logical framebuffer: compositing and page serialization
//!
//! The buffer stores one byte per pixel in row-major order (`0` = off,
//! nonzero = on). Both compositors clip against all four buffer edges, so
//! callers may pass any signed coordinates, including fully off-buffer ones,
//! without pre-validating bounds; animated content legitimately scrolls
//! across the edges.

use display_interface::DisplayError;

use crate::config::Config;
use crate::font;
use crate::{Error, PAGE_HEIGHT};

/// Receiver for serialized display pages.
///
/// One implementation drives the real I2C bus
/// ([`DisplayInterface`](crate::interface::DisplayInterface)); tests use an
/// in-memory double so serialization is checkable without hardware.
pub trait PageSink {
    /// Transmit one page. `data` holds one byte per display column, bit `k`
    /// of each byte being the pixel `k` rows below the top of the page.
    ///
    /// Errors are surfaced to the render loop unchanged; the serializer
    /// does not retry.
    fn send_page(&mut self, index: usize, data: &[u8]) -> Result<(), DisplayError>;
}

/// In-memory pixel grid composited before transmission.
///
/// Dimensions are fixed at creation. The buffer is exclusively owned by its
/// creator and assumed to have a single writer for the duration of a frame.
#[derive(Debug)]
pub struct Framebuffer {
    rows: usize,
    cols: usize,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Allocate a zero-filled buffer of `rows` x `cols` pixels.
    ///
    /// `rows` must be a positive multiple of [`PAGE_HEIGHT`] so that pages
    /// cover the buffer exactly; there is no truncation or padding policy
    /// for trailing rows.
    pub fn new(rows: usize, cols: usize) -> Result<Self, Error> {
        if rows == 0 || rows % PAGE_HEIGHT != 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let len = rows * cols;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| Error::Allocation)?;
        pixels.resize(len, 0);
        Ok(Framebuffer { rows, cols, pixels })
    }

    /// Allocate a buffer matching a display configuration.
    pub fn with_config(config: &Config) -> Result<Self, Error> {
        Self::new(config.rows, config.cols)
    }

    /// Buffer height in pixels.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Buffer width in pixels.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Raw row-major pixel storage, one byte per pixel.
    pub fn buffer(&self) -> &[u8] {
        &self.pixels
    }

    /// Storage index of the pixel at (`row`, `col`).
    ///
    /// Every component goes through this one function; the serializer's
    /// bit/row mapping silently corrupts the visible image if any caller
    /// computes offsets on its own.
    #[inline]
    fn pixel_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Read the pixel at (`row`, `col`); out-of-range reads as off.
    pub fn pixel(&self, row: usize, col: usize) -> u8 {
        if row >= self.rows || col >= self.cols {
            return 0;
        }
        self.pixels[self.pixel_index(row, col)]
    }

    /// Set or clear a single pixel; out of range is a silent no-op.
    pub fn set_pixel(&mut self, row: usize, col: usize, on: bool) {
        if row >= self.rows || col >= self.cols {
            return;
        }
        let index = self.pixel_index(row, col);
        self.pixels[index] = u8::from(on);
    }

    /// Copy a byte-per-pixel bitmap into the buffer with its top-left
    /// corner at (`x`, `y`), clipped against the buffer edges.
    ///
    /// `bitmap` is `src_rows` x `src_cols`, row-major, same on/off
    /// convention as the buffer. Copied bytes overwrite destination bytes
    /// verbatim; there is no blending. An empty intersection with the
    /// buffer is a no-op, not an error.
    pub fn blit_bitmap(&mut self, x: i32, y: i32, bitmap: &[u8], src_rows: usize, src_cols: usize) {
        debug_assert_eq!(bitmap.len(), src_rows * src_cols);

        // Visible bounding box plus the read offset into the source for
        // whatever part of its left/top edge fell outside the buffer.
        let (dst_x, src_x) = if x >= 0 { (x, 0) } else { (0, -x) };
        let width = (self.cols as i32).min(x + src_cols as i32) - dst_x;
        if width <= 0 {
            return;
        }
        let (dst_y, src_y) = if y >= 0 { (y, 0) } else { (0, -y) };
        let height = (self.rows as i32).min(y + src_rows as i32) - dst_y;
        if height <= 0 {
            return;
        }

        let (dst_x, src_x, width) = (dst_x as usize, src_x as usize, width as usize);
        let (dst_y, src_y) = (dst_y as usize, src_y as usize);
        for i in 0..height as usize {
            let dst = self.pixel_index(dst_y + i, dst_x);
            let src = (src_y + i) * src_cols + src_x;
            self.pixels[dst..dst + width].copy_from_slice(&bitmap[src..src + width]);
        }
    }

    /// Render a string of 8x8 glyphs with its top-left corner at
    /// (`x`, `y`), clipped against the buffer edges.
    ///
    /// `\n` moves the cursor to the start of the next 8-pixel line; once a
    /// newline advances past the bottom of the buffer the remainder of the
    /// string is dropped. Every other byte is looked up in the glyph table
    /// ([`font::glyph`]) and advances the cursor by 8 columns whether or
    /// not it was visible, so horizontal spacing survives partial scrolls.
    pub fn blit_text(&mut self, x: i32, y: i32, text: &str) {
        let rows = self.rows as i32;
        let cols = self.cols as i32;
        let glyph_w = font::GLYPH_WIDTH as i32;
        let glyph_h = font::GLYPH_HEIGHT as i32;

        let mut col = x;
        let mut row = y;
        for byte in text.bytes() {
            if byte == b'\n' {
                row += glyph_h;
                if row > rows {
                    return;
                }
                col = x;
                continue;
            }
            // Coarse visibility test before touching the glyph table;
            // callers draw dozens of characters per frame, many of them
            // scrolled fully off-screen.
            if col < cols && col + glyph_w > 0 && row < rows && row + glyph_h > 0 {
                let glyph = font::glyph(byte);
                self.blit_bitmap(col, row, &glyph, font::GLYPH_HEIGHT, font::GLYPH_WIDTH);
            }
            col += glyph_w;
        }
    }

    /// Transpose the buffer into bit-packed pages and hand each one to
    /// `sink`, in ascending page order.
    ///
    /// Page `p` covers buffer rows `p*8 .. p*8+8`; bit `k` of page byte `c`
    /// is set when the pixel at (`p*8 + k`, `c`) is on. The first send
    /// failure is returned as-is; already transmitted pages stay on the
    /// device.
    pub fn serialize_to<S: PageSink>(&self, sink: &mut S) -> Result<(), DisplayError> {
        let mut page = vec![0u8; self.cols];
        for p in 0..self.rows / PAGE_HEIGHT {
            for (c, byte) in page.iter_mut().enumerate() {
                *byte = 0;
                for k in 0..PAGE_HEIGHT {
                    if self.pixels[self.pixel_index(p * PAGE_HEIGHT + k, c)] != 0 {
                        *byte |= 1 << k;
                    }
                }
            }
            sink.send_page(p, &page)?;
        }
        Ok(())
    }
}
