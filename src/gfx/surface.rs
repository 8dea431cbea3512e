use super::buffer::{MemoryBuffer, PixelBuffer};
use super::color::{color_by_name, Color, ColorLookup, PackedColor};
use super::device::Framebuffer;
use super::geometry::Geometry;
use super::raster::{Disc, Line};
use crate::error::Result;

use std::path::Path;


/// A drawable pixel grid: some pixel memory, its layout, and the
/// color the next shape will be drawn in.
///
/// Every drawing call clips silently. Coordinates outside
/// `[0, xres) x [0, yres)` are skipped, never wrapped or clamped.
pub struct Surface<B: PixelBuffer> {
    buffer: B,
    geometry: Geometry,
    // The selected draw color, already packed for `geometry`.
    color: PackedColor,
    // Bytes written per pixel.
    store_width: usize,
}

impl Surface<Framebuffer> {
    /// Bind the framebuffer device at `path` and draw on it.
    pub fn bind(path: impl AsRef<Path>) -> Result<Surface<Framebuffer>> {
        let framebuffer = Framebuffer::bind(path)?;
        let geometry = *framebuffer.geometry();
        Surface::new(geometry, framebuffer)
    }

    /// Release the device. The surface can't be used afterwards.
    pub fn unbind(self) {
        self.buffer.unbind();
    }
}

impl Surface<MemoryBuffer> {
    /// A surface backed by zeroed memory instead of a device.
    pub fn in_memory(geometry: Geometry) -> Result<Surface<MemoryBuffer>> {
        Surface::new(geometry, MemoryBuffer::for_geometry(&geometry))
    }
}

impl<B: PixelBuffer> Surface<B> {
    pub fn new(geometry: Geometry, buffer: B) -> Result<Surface<B>> {
        geometry.validate()?;
        Ok(Surface {
            buffer,
            geometry,
            color: PackedColor::default(),
            store_width: geometry.bytes_per_pixel(),
        })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    pub fn into_buffer(self) -> B {
        self.buffer
    }

    /// Pack `color` for this surface's pixel format.
    pub fn pack(&self, color: Color) -> PackedColor {
        color.pack(self.geometry.channels)
    }

    pub fn active_color(&self) -> PackedColor {
        self.color
    }

    /// Select the color used by subsequent drawing calls.
    pub fn set_active_color(&mut self, color: Color) {
        self.color = self.pack(color);
    }

    /// Select a palette color by name. Unknown names select black;
    /// the returned lookup says which happened.
    pub fn set_active_color_by_name(&mut self, name: &str) -> ColorLookup {
        let lookup = color_by_name(name);
        self.set_active_color(lookup.color());
        lookup
    }

    /// The packed value at a visible pixel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<PackedColor> {
        let offset = self.geometry.offset_of(x.into(), y.into())?;
        self.buffer.load(offset, self.store_width).map(PackedColor)
    }

    pub fn plot(&mut self, x: i32, y: i32) {
        self.put(x.into(), y.into(), self.color);
    }

    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        for (x, y) in Line::new((x0, y0), (x1, y1)) {
            self.put(x, y, self.color);
        }
    }

    /// Fill `[x, x + width) x [y, y + height)`. Rectangles are always solid.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let (x, y) = (i64::from(x), i64::from(y));
        let top = y.max(0);
        let bottom = (y + i64::from(height)).min(i64::from(self.geometry.yres));
        for row in top..bottom {
            self.span(x, x + i64::from(width) - 1, row, self.color);
        }
    }

    /// Fill the disc of `radius` around (cx, cy). A negative radius draws nothing.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32) {
        for span in Disc::new((cx, cy), radius) {
            self.span(span.x0, span.x1, span.y, self.color);
        }
    }

    /// Paint the whole visible area black.
    pub fn clear(&mut self) {
        self.clear_with(Color::BLACK);
    }

    /// Paint the whole visible area with `color`.
    /// The selected draw color is left alone.
    pub fn clear_with(&mut self, color: Color) {
        let packed = self.pack(color);
        let width = i64::from(self.geometry.xres);
        for row in 0..i64::from(self.geometry.yres) {
            self.span(0, width - 1, row, packed);
        }
    }

    // Pixels from x0 to x1 (inclusive) on one row, clipped to the visible area.
    fn span(&mut self, x0: i64, x1: i64, y: i64, packed: PackedColor) {
        if !(0..i64::from(self.geometry.yres)).contains(&y) {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(i64::from(self.geometry.xres) - 1);
        for x in x0..=x1 {
            self.put(x, y, packed);
        }
    }

    fn put(&mut self, x: i64, y: i64, packed: PackedColor) {
        if let Some(offset) = self.geometry.offset_of(x, y) {
            self.buffer.store(offset, self.store_width, packed.0);
        }
    }
}
