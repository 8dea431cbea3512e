use super::buffer::PixelBuffer;
use super::geometry::{ChannelOffsets, Geometry};
use crate::error::{Error, Result};

use memmap::{MmapMut, MmapOptions};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// From <linux/fb.h>.
const FBIOGET_VSCREENINFO: u32 = 0x4600;
const FBIOGET_FSCREENINFO: u32 = 0x4602;

#[repr(C)]
#[derive(Default)]
#[allow(dead_code)]
struct FbBitfield {
    offset: u32,
    length: u32,
    msb_right: u32,
}

#[repr(C)]
#[derive(Default)]
#[allow(dead_code)]
struct FbFixScreeninfo {
    id: [u8; 16],
    smem_start: libc::c_ulong,
    smem_len: u32,
    type_: u32,
    type_aux: u32,
    visual: u32,
    xpanstep: u16,
    ypanstep: u16,
    ywrapstep: u16,
    line_length: u32,
    mmio_start: libc::c_ulong,
    mmio_len: u32,
    accel: u32,
    capabilities: u16,
    reserved: [u16; 2],
}

#[repr(C)]
#[derive(Default)]
#[allow(dead_code)]
struct FbVarScreeninfo {
    xres: u32,
    yres: u32,
    xres_virtual: u32,
    yres_virtual: u32,
    xoffset: u32,
    yoffset: u32,
    bits_per_pixel: u32,
    grayscale: u32,
    red: FbBitfield,
    green: FbBitfield,
    blue: FbBitfield,
    transp: FbBitfield,
    nonstd: u32,
    activate: u32,
    height: u32,
    width: u32,
    accel_flags: u32,
    pixclock: u32,
    left_margin: u32,
    right_margin: u32,
    upper_margin: u32,
    lower_margin: u32,
    hsync_len: u32,
    vsync_len: u32,
    sync: u32,
    vmode: u32,
    rotate: u32,
    colorspace: u32,
    reserved: [u32; 4],
}

/// Ask the driver to fill in one of its screen info structs.
///
/// `T` must be the `#[repr(C)]` mirror of the struct `request` writes.
fn query<T: Default>(file: &File, request: u32, name: &'static str) -> Result<T> {
    let mut info = T::default();
    // SAFETY: `info` is a live, writable value of the exact layout the
    // kernel copies out for `request`.
    let rc = unsafe { libc::ioctl(file.as_raw_fd(), request as _, &mut info as *mut T) };
    if rc == -1 {
        return Err(Error::GeometryQueryFailed {
            query: name,
            source: io::Error::last_os_error(),
        });
    }
    Ok(info)
}

/// An open framebuffer device with its memory mapped into the process.
///
/// Dropping (or [`unbind`](Framebuffer::unbind)ing) a `Framebuffer`
/// unmaps the memory and then closes the device.
pub struct Framebuffer {
    path: PathBuf,
    geometry: Geometry,
    // Declared before `file`: fields drop in order, so the mapping
    // goes away before the handle is closed.
    map: MmapMut,
    file: File,
}

impl Framebuffer {
    /// Open `path` (usually `/dev/fb0`), read its geometry and map it.
    ///
    /// Nothing stays open if any step fails.
    pub fn bind(path: impl AsRef<Path>) -> Result<Framebuffer> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| Error::DeviceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        let fix: FbFixScreeninfo = query(&file, FBIOGET_FSCREENINFO, "fixed")?;
        let var: FbVarScreeninfo = query(&file, FBIOGET_VSCREENINFO, "variable")?;
        let geometry = Geometry {
            xres: var.xres,
            yres: var.yres,
            xres_virtual: var.xres_virtual,
            yres_virtual: var.yres_virtual,
            xoffset: var.xoffset,
            yoffset: var.yoffset,
            bits_per_pixel: var.bits_per_pixel,
            line_length: fix.line_length,
            channels: ChannelOffsets {
                red: var.red.offset,
                green: var.green.offset,
                blue: var.blue.offset,
            },
        };
        debug!("{}: {geometry}", path.display());
        geometry.validate()?;

        let len = geometry.mapped_len();
        if len == 0 {
            return Err(Error::MappingFailed {
                source: io::Error::new(io::ErrorKind::InvalidData, "device reports no memory"),
            });
        }

        // SAFETY: the mapping is shared device memory; nothing in this
        // process truncates or remaps the device while it is held.
        let map = unsafe { MmapOptions::new().len(len).map_mut(&file) }
            .map_err(|source| Error::MappingFailed { source })?;

        info!(
            "Resolution: {}x{}, {} bpp",
            geometry.xres, geometry.yres, geometry.bits_per_pixel
        );

        Ok(Framebuffer {
            path: path.to_path_buf(),
            geometry,
            map,
            file,
        })
    }

    /// Release the mapping and close the device.
    pub fn unbind(self) {
        let Framebuffer {
            path, map, file, ..
        } = self;
        drop(map);
        drop(file);
        info!("released {}", path.display());
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

impl PixelBuffer for Framebuffer {
    fn bytes(&self) -> &[u8] {
        &self.map
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.map
    }
}
