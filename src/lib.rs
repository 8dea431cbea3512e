//! A small raster drawing runtime for Linux framebuffer devices.
//!
//! Bind a [`gfx::Surface`] to `/dev/fb0` (or back one with plain memory),
//! pick a color, and draw pixels, lines, filled rectangles and filled
//! circles. [`program`] runs serialized lists of those calls.

pub mod error;
pub mod gfx;
pub mod program;

pub use error::{Error, Result};
