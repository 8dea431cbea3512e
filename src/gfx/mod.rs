mod buffer;
mod color;
mod device;
mod geometry;
pub mod raster;
mod surface;

pub use buffer::{MemoryBuffer, PixelBuffer};
pub use color::{color_by_name, Color, ColorLookup, PackedColor, ParseColorError, PALETTE};
pub use device::Framebuffer;
pub use geometry::{ChannelOffsets, Geometry};
pub use surface::Surface;
