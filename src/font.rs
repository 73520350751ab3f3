//! Glyph source glue over the `font8x8` basic table
//!
//! The compositor wants glyphs in the same representation as the
//! framebuffer (row-major, byte per pixel), while `font8x8` stores one
//! packed row byte per glyph row with bit `k` holding column `k`. This
//! module owns that expansion so the text compositor never touches bit
//! arithmetic.

use font8x8::legacy::BASIC_LEGACY;

/// Glyph width in pixels.
pub const GLYPH_WIDTH: usize = 8;

/// Glyph height in pixels.
pub const GLYPH_HEIGHT: usize = 8;

/// Look up the 8x8 pattern for a character code, expanded to one byte per
/// pixel in row-major order.
///
/// The basic table covers codes 0..128; anything above deliberately
/// renders as a blank glyph rather than failing, so arbitrary byte input
/// stays drawable.
pub fn glyph(code: u8) -> [u8; GLYPH_WIDTH * GLYPH_HEIGHT] {
    let mut out = [0u8; GLYPH_WIDTH * GLYPH_HEIGHT];
    if let Some(packed) = BASIC_LEGACY.get(code as usize) {
        for (j, bits) in packed.iter().enumerate() {
            for k in 0..GLYPH_WIDTH {
                out[j * GLYPH_WIDTH + k] = (bits >> k) & 1;
            }
        }
    }
    out
}
