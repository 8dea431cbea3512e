use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
/// Everything that can go wrong while setting up a surface or loading a program.
///
/// Drawing itself never fails: off-screen coordinates are skipped.
pub enum Error {
    // The device node could not be opened for reading and writing.
    DeviceUnavailable { path: PathBuf, source: io::Error },
    // One of the two screen info ioctls was rejected ("fixed" or "variable").
    GeometryQueryFailed {
        query: &'static str,
        source: io::Error,
    },
    // The device memory could not be mapped into the process.
    MappingFailed { source: io::Error },
    // The device uses a depth we can't store packed RGB into.
    UnsupportedPixelFormat { bits_per_pixel: u32 },
    Io(io::Error),
    Program(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DeviceUnavailable { path, source } => {
                write!(f, "error opening framebuffer device {}: {source}", path.display())
            }
            Error::GeometryQueryFailed { query, source } => {
                write!(f, "error reading {query} screen info: {source}")
            }
            Error::MappingFailed { source } => write!(f, "error mapping frame buffer: {source}"),
            Error::UnsupportedPixelFormat { bits_per_pixel } => {
                write!(f, "unsupported pixel format: {bits_per_pixel} bpp")
            }
            Error::Io(err) => write!(f, "{err}"),
            Error::Program(err) => write!(f, "invalid drawing program: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::DeviceUnavailable { source, .. }
            | Error::GeometryQueryFailed { source, .. }
            | Error::MappingFailed { source } => Some(source),
            Error::Io(err) => Some(err),
            Error::Program(err) => Some(err),
            Error::UnsupportedPixelFormat { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Program(err)
    }
}
