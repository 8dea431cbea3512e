use super::geometry::Geometry;

/// Raw pixel memory a [`Surface`](super::Surface) draws into.
///
/// Implemented by the mapped device and by [`MemoryBuffer`].
pub trait PixelBuffer {
    fn bytes(&self) -> &[u8];
    fn bytes_mut(&mut self) -> &mut [u8];

    /// Store the low `width` bytes of `value` at `offset`, in native byte order.
    ///
    /// A store that does not fit entirely inside the buffer is dropped.
    /// Returns whether anything was written.
    fn store(&mut self, offset: usize, width: usize, value: u32) -> bool {
        let Some(range) = store_range(offset, width) else {
            return false;
        };
        match self.bytes_mut().get_mut(range) {
            Some(dst) => {
                let raw = value.to_ne_bytes();
                dst.copy_from_slice(low_bytes(&raw, width));
                true
            }
            None => false,
        }
    }

    /// Read back a value written by [`PixelBuffer::store`].
    fn load(&self, offset: usize, width: usize) -> Option<u32> {
        let src = self.bytes().get(store_range(offset, width)?)?;
        let mut raw = [0; 4];
        low_bytes_mut(&mut raw, width).copy_from_slice(src);
        Some(u32::from_ne_bytes(raw))
    }
}

fn store_range(offset: usize, width: usize) -> Option<std::ops::Range<usize>> {
    if width == 0 || width > 4 {
        return None;
    }
    Some(offset..offset.checked_add(width)?)
}

// The least significant `width` bytes of a native-endian word.
fn low_bytes(raw: &[u8; 4], width: usize) -> &[u8] {
    if cfg!(target_endian = "little") {
        &raw[..width]
    } else {
        &raw[4 - width..]
    }
}

fn low_bytes_mut(raw: &mut [u8; 4], width: usize) -> &mut [u8] {
    if cfg!(target_endian = "little") {
        &mut raw[..width]
    } else {
        &mut raw[4 - width..]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Plain heap memory standing in for a framebuffer device.
/// Useful for tests and for rendering without a display.
pub struct MemoryBuffer {
    bytes: Vec<u8>,
}

impl MemoryBuffer {
    pub fn new(len: usize) -> MemoryBuffer {
        MemoryBuffer {
            bytes: vec![0; len],
        }
    }

    /// A zeroed buffer as large as a device with this geometry would map.
    pub fn for_geometry(geometry: &Geometry) -> MemoryBuffer {
        MemoryBuffer::new(geometry.mapped_len())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl PixelBuffer for MemoryBuffer {
    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}
