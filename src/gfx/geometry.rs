use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Bit position of each color channel inside a packed pixel.
pub struct ChannelOffsets {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// The layout of a linear framebuffer, as reported by the device.
///
/// Only `[0, xres) x [0, yres)` is visible; the rest of the virtual
/// area and any per-line padding are never written.
pub struct Geometry {
    // Visible resolution.
    pub xres: u32,
    pub yres: u32,
    // Virtual (backing) resolution. `yres_virtual` lines are mapped.
    pub xres_virtual: u32,
    pub yres_virtual: u32,
    // Position of the visible area inside the virtual one.
    pub xoffset: u32,
    pub yoffset: u32,
    pub bits_per_pixel: u32,
    // Bytes per scan line, including padding.
    pub line_length: u32,
    pub channels: ChannelOffsets,
}

impl Geometry {
    /// A padding-free 32 bpp layout with red in the high byte,
    /// which is what most fbdev drivers hand out.
    ///
    /// # Panics
    ///
    /// Panics if a line of `width` pixels doesn't fit in `u32` bytes.
    pub fn xrgb8888(width: u32, height: u32) -> Geometry {
        Geometry {
            xres: width,
            yres: height,
            xres_virtual: width,
            yres_virtual: height,
            xoffset: 0,
            yoffset: 0,
            bits_per_pixel: 32,
            line_length: line_length(width, 4),
            channels: ChannelOffsets {
                red: 16,
                green: 8,
                blue: 0,
            },
        }
    }

    /// A padding-free 16 bpp RGB565 layout.
    ///
    /// # Panics
    ///
    /// Panics if a line of `width` pixels doesn't fit in `u32` bytes.
    pub fn rgb565(width: u32, height: u32) -> Geometry {
        Geometry {
            bits_per_pixel: 16,
            line_length: line_length(width, 2),
            channels: ChannelOffsets {
                red: 11,
                green: 5,
                blue: 0,
            },
            ..Geometry::xrgb8888(width, height)
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel / 8) as usize
    }

    /// Number of bytes backing the whole virtual area.
    pub fn mapped_len(&self) -> usize {
        self.yres_virtual as usize * self.line_length as usize
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        (0..i64::from(self.xres)).contains(&x) && (0..i64::from(self.yres)).contains(&y)
    }

    /// Byte offset of the visible pixel at (x, y).
    ///
    /// Returns `None` for anything outside the visible area;
    /// callers skip those writes.
    pub fn offset_of(&self, x: i64, y: i64) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }

        // Both coordinates are non-negative here.
        let column = (x as usize).checked_add(self.xoffset as usize)?;
        let row = (y as usize).checked_add(self.yoffset as usize)?;
        column
            .checked_mul(self.bytes_per_pixel())?
            .checked_add(row.checked_mul(self.line_length as usize)?)
    }

    /// Check that pixels in this layout can be stored as packed RGB.
    pub fn validate(&self) -> Result<()> {
        match self.bits_per_pixel {
            8 | 16 | 24 | 32 => Ok(()),
            bits_per_pixel => Err(Error::UnsupportedPixelFormat { bits_per_pixel }),
        }
    }
}

fn line_length(width: u32, bytes_per_pixel: u32) -> u32 {
    match width.checked_mul(bytes_per_pixel) {
        Some(line_length) => line_length,
        None => panic!("Screen width {width} is too large for {bytes_per_pixel} bytes per pixel"),
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}x{} ({}x{} virtual, offset {},{}), {} bpp, stride {}",
            self.xres,
            self.yres,
            self.xres_virtual,
            self.yres_virtual,
            self.xoffset,
            self.yoffset,
            self.bits_per_pixel,
            self.line_length,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        let geometry = Geometry::xrgb8888(8, 4);
        assert_eq!(geometry.mapped_len(), 8 * 4 * 4);
        assert_eq!(geometry.offset_of(0, 0), Some(0));
        assert_eq!(geometry.offset_of(1, 0), Some(4));
        assert_eq!(geometry.offset_of(0, 1), Some(32));
        assert_eq!(geometry.offset_of(7, 3), Some(3 * 32 + 7 * 4));
    }

    #[test]
    fn offsets_with_padding_and_panning() {
        let geometry = Geometry {
            xres: 4,
            yres: 2,
            xres_virtual: 6,
            yres_virtual: 6,
            xoffset: 1,
            yoffset: 2,
            bits_per_pixel: 32,
            line_length: 32, // 6 pixels plus 8 bytes of padding
            channels: ChannelOffsets::default(),
        };
        assert_eq!(geometry.mapped_len(), 6 * 32);
        assert_eq!(geometry.offset_of(0, 0), Some(4 + 2 * 32));
        assert_eq!(geometry.offset_of(3, 1), Some(4 * 4 + 3 * 32));

        // With 16 bpp, the same coordinates land at half the column width.
        let narrow = Geometry {
            bits_per_pixel: 16,
            ..geometry
        };
        assert_eq!(narrow.offset_of(3, 1), Some(4 * 2 + 3 * 32));
    }

    #[test]
    fn out_of_bounds() {
        let geometry = Geometry::xrgb8888(8, 4);
        assert_eq!(geometry.offset_of(-1, 0), None);
        assert_eq!(geometry.offset_of(0, -1), None);
        assert_eq!(geometry.offset_of(8, 0), None);
        assert_eq!(geometry.offset_of(0, 4), None);
        assert_eq!(geometry.offset_of(i64::MIN, i64::MAX), None);
        assert!(geometry.contains(7, 3));
        assert!(!geometry.contains(8, 3));
    }

    #[test]
    fn validate() {
        for bits in [8, 16, 24, 32] {
            let geometry = Geometry {
                bits_per_pixel: bits,
                ..Geometry::xrgb8888(2, 2)
            };
            assert!(geometry.validate().is_ok(), "{bits} bpp was rejected");
        }

        for bits in [0, 1, 4, 12, 64] {
            let geometry = Geometry {
                bits_per_pixel: bits,
                ..Geometry::xrgb8888(2, 2)
            };
            match geometry.validate() {
                Err(Error::UnsupportedPixelFormat { bits_per_pixel }) => {
                    assert_eq!(bits_per_pixel, bits)
                }
                other => panic!("{bits} bpp was not rejected: {other:?}"),
            }
        }
    }

    #[test]
    fn widest_constructed_lines() {
        assert_eq!(Geometry::xrgb8888(u32::MAX / 4, 1).line_length, u32::MAX / 4 * 4);
        assert_eq!(Geometry::rgb565(u32::MAX / 2, 1).line_length, u32::MAX / 2 * 2);
    }

    #[test]
    #[should_panic(expected = "too large")]
    fn too_wide_xrgb8888() {
        Geometry::xrgb8888(u32::MAX / 4 + 1, 1);
    }

    #[test]
    #[should_panic(expected = "too large")]
    fn too_wide_rgb565() {
        Geometry::rgb565(u32::MAX / 2 + 1, 1);
    }

    #[test]
    fn serde_round_trip() {
        let geometry = Geometry::rgb565(320, 240);
        let json = serde_json::to_string(&geometry).unwrap();
        let back: Geometry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, geometry);
    }
}
