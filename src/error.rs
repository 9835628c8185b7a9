//! Error types for pixel buffer construction and access.

use core::fmt;

/// Broad category of a [`PixelBufError`].
///
/// Useful when callers only care which class of mistake was made, not the
/// exact numbers involved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Unknown byte order or an invalid parameter combination.
    Config,
    /// Pixel geometry does not fit in the backing buffer.
    Capacity,
    /// A length did not match what the layout or range expects.
    Shape,
    /// Pixel index or range outside `[0, len)`.
    Index,
    /// Raw-byte range bounds not aligned to the pixel step.
    Alignment,
    /// Operation the buffer does not implement, e.g. stepped ranges.
    Unsupported,
}

/// Errors from pixel buffer operations.
///
/// Every error is detected before any byte is written, so a failed call
/// leaves both regions untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum PixelBufError {
    /// Byte order name is not in the registry.
    UnknownByteOrder,
    /// Bytes per pixel must be 3 or 4.
    InvalidBpp(usize),
    /// A white layout was requested with `bpp == 3`.
    ConflictingBpp {
        /// Channels implied by the byte order name.
        order: usize,
        /// Channels requested by the caller.
        requested: usize,
    },
    /// `offset + len * step` does not fit in the backing buffer.
    Capacity {
        /// Bytes the geometry needs.
        required: usize,
        /// Bytes the buffer has.
        available: usize,
    },
    /// Raw and output regions differ in length.
    RegionMismatch {
        /// Raw region length.
        raw: usize,
        /// Output region length.
        output: usize,
    },
    /// Pixel value does not carry the channels the layout expects.
    ValueShape {
        /// Channels the layout expects.
        expected: usize,
        /// Channels the value carries.
        actual: usize,
    },
    /// Per-pixel brightness supplied for a layout without a frame byte.
    UnexpectedBrightness,
    /// Range values do not cover the range exactly.
    LengthMismatch {
        /// Items (bytes or pixels) the range expects.
        expected: usize,
        /// Items supplied.
        actual: usize,
    },
    /// Single pixel index out of bounds.
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Pixel count.
        len: usize,
    },
    /// Range does not satisfy `start <= stop <= len`.
    RangeOutOfBounds {
        /// Range start.
        start: usize,
        /// Range stop (exclusive).
        stop: usize,
        /// Pixel count.
        len: usize,
    },
    /// Raw-byte range bounds are not multiples of the pixel step.
    Misaligned {
        /// Range start.
        start: usize,
        /// Range stop (exclusive).
        stop: usize,
        /// Bytes per pixel slot.
        step: usize,
    },
    /// Only contiguous (`step == 1`) ranges are supported.
    NonUnitStep(usize),
}

impl PixelBufError {
    /// Category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownByteOrder | Self::InvalidBpp(_) | Self::ConflictingBpp { .. } => {
                ErrorKind::Config
            }
            Self::Capacity { .. } => ErrorKind::Capacity,
            Self::RegionMismatch { .. }
            | Self::ValueShape { .. }
            | Self::UnexpectedBrightness
            | Self::LengthMismatch { .. } => ErrorKind::Shape,
            Self::IndexOutOfBounds { .. } | Self::RangeOutOfBounds { .. } => ErrorKind::Index,
            Self::Misaligned { .. } => ErrorKind::Alignment,
            Self::NonUnitStep(_) => ErrorKind::Unsupported,
        }
    }
}

impl fmt::Display for PixelBufError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownByteOrder => write!(f, "unknown byte order"),
            Self::InvalidBpp(bpp) => write!(f, "bpp must be 3 or 4, got {bpp}"),
            Self::ConflictingBpp { order, requested } => write!(
                f,
                "byte order has {order} channels but bpp {requested} was requested"
            ),
            Self::Capacity {
                required,
                available,
            } => write!(
                f,
                "buffer too small: need {required} bytes, have {available}"
            ),
            Self::RegionMismatch { raw, output } => write!(
                f,
                "raw buffer length {raw} does not match output buffer length {output}"
            ),
            Self::ValueShape { expected, actual } => {
                write!(f, "expected a pixel of {expected} channels, got {actual}")
            }
            Self::UnexpectedBrightness => {
                write!(f, "per-pixel brightness needs a framed byte order")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "range expects {expected} items, got {actual}")
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "pixel index {index} out of bounds (len: {len})")
            }
            Self::RangeOutOfBounds { start, stop, len } => {
                write!(f, "range {start}..{stop} out of bounds (len: {len})")
            }
            Self::Misaligned { start, stop, step } => write!(
                f,
                "range {start}..{stop} is not aligned to the {step}-byte pixel step"
            ),
            Self::NonUnitStep(step) => {
                write!(f, "only ranges with step 1 are supported, got {step}")
            }
        }
    }
}

impl core::error::Error for PixelBufError {}
