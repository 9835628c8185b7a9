//! Fixed-capacity LED pixel buffer over caller-owned memory.
//!
//! A [`PixelBuf`] borrows one output region (the bytes handed to the
//! transport) and, optionally, a raw region of the same length. With a raw
//! region, writes land in raw and the output slot is re-derived at the
//! current brightness. Without one, brightness is applied once at write
//! time.

use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use crate::brightness::{self, Brightness};
use crate::codec::{self, FRAME_FULL};
use crate::error::PixelBufError;
use crate::pixel::{Channels, PixelValue};
use crate::ByteOrder;

// ---------------------------------------------------------------------------
// PixelBufConfig
// ---------------------------------------------------------------------------

/// Construction parameters for a [`PixelBuf`].
///
/// # Example
///
/// ```
/// use pixelbuf::{PixelBuf, PixelBufConfig, PixelValue};
///
/// let mut strip = [0u8; 4 * 4];
/// let config = PixelBufConfig::new(4).with_byte_order("GRBW").with_brightness(0.5);
/// let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
/// buf.set(0, PixelValue::Packed24(0x7F7F7F)).unwrap();
/// assert_eq!(buf.get(0).unwrap(), [0, 0, 0, 63]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct PixelBufConfig<'n> {
    /// Number of pixels.
    pub size: usize,
    /// Registry name of the byte order (default `"BGR"`).
    pub byte_order: &'n str,
    /// Bytes per pixel, 3 or 4. `None` takes the byte order's own count.
    pub bpp: Option<usize>,
    /// Initial global brightness, clamped into `0.0..=1.0`.
    pub brightness: f32,
    /// Byte offset of pixel 0 inside the backing buffer.
    pub offset: usize,
    /// Reserve a leading frame byte in every slot (DotStar-style).
    pub framed: bool,
}

impl<'n> PixelBufConfig<'n> {
    /// Defaults for `size` pixels: BGR, full brightness, no offset, unframed.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            byte_order: ByteOrder::BGR.name(),
            bpp: None,
            brightness: 1.0,
            offset: 0,
            framed: false,
        }
    }

    /// Set the byte order by registry name.
    pub fn with_byte_order(mut self, name: &'n str) -> Self {
        self.byte_order = name;
        self
    }

    /// Set bytes per pixel.
    pub fn with_bpp(mut self, bpp: usize) -> Self {
        self.bpp = Some(bpp);
        self
    }

    /// Set the initial brightness.
    pub fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self
    }

    /// Set the byte offset of pixel 0.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Enable or disable the leading frame byte.
    pub fn with_framed(mut self, framed: bool) -> Self {
        self.framed = framed;
        self
    }

    /// Byte order after applying `bpp` and `framed`.
    ///
    /// # Errors
    ///
    /// Unknown names and invalid `bpp` combinations are config errors.
    pub fn resolve_byte_order(&self) -> Result<ByteOrder, PixelBufError> {
        ByteOrder::lookup(self.byte_order)?.resolve(self.bpp, self.framed)
    }

    /// Backing buffer bytes needed: `offset + size * step`.
    ///
    /// # Errors
    ///
    /// Config errors from [`resolve_byte_order`](Self::resolve_byte_order),
    /// or [`PixelBufError::Capacity`] if the size overflows `usize`.
    pub fn required_bytes(&self) -> Result<usize, PixelBufError> {
        let step = self.resolve_byte_order()?.step();
        self.size
            .checked_mul(step)
            .and_then(|bytes| bytes.checked_add(self.offset))
            .ok_or(PixelBufError::Capacity {
                required: usize::MAX,
                available: 0,
            })
    }
}

// ---------------------------------------------------------------------------
// PixelRange / RangeValues
// ---------------------------------------------------------------------------

/// Half-open pixel range `start..stop` with a step.
///
/// Only `step == 1` is supported by the buffer; the step exists so stepped
/// requests are rejected explicitly instead of silently read contiguously.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRange {
    /// First pixel.
    pub start: usize,
    /// One past the last pixel.
    pub stop: usize,
    /// Stride in pixels.
    pub step: usize,
}

impl PixelRange {
    /// Contiguous range `start..stop`.
    pub const fn new(start: usize, stop: usize) -> Self {
        Self {
            start,
            stop,
            step: 1,
        }
    }

    /// Same bounds with a different step.
    pub const fn with_step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// Number of pixels covered, zero for inverted bounds.
    pub const fn len(&self) -> usize {
        self.stop.saturating_sub(self.start)
    }

    /// Whether the range covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Range<usize>> for PixelRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Right-hand side of a range write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RangeValues<'v> {
    /// Raw slot bytes, `pixel_step()` per pixel, copied without reordering.
    Bytes(&'v [u8]),
    /// One value per pixel, encoded through the byte order.
    Pixels(&'v [PixelValue]),
}

impl<'v> From<&'v [u8]> for RangeValues<'v> {
    fn from(bytes: &'v [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'v, const N: usize> From<&'v [u8; N]> for RangeValues<'v> {
    fn from(bytes: &'v [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'v> From<&'v [PixelValue]> for RangeValues<'v> {
    fn from(pixels: &'v [PixelValue]) -> Self {
        Self::Pixels(pixels)
    }
}

impl<'v, const N: usize> From<&'v [PixelValue; N]> for RangeValues<'v> {
    fn from(pixels: &'v [PixelValue; N]) -> Self {
        Self::Pixels(pixels)
    }
}

// ---------------------------------------------------------------------------
// PixelBuf
// ---------------------------------------------------------------------------

/// Pixel-addressable view over caller-owned LED strip memory.
///
/// Geometry is fixed at construction; the buffer never allocates or resizes
/// the regions it borrows. Every mutator validates fully before writing,
/// so a failed call leaves both regions unchanged.
pub struct PixelBuf<'a> {
    output: &'a mut [u8],
    raw: Option<&'a mut [u8]>,
    len: usize,
    order: ByteOrder,
    offset: usize,
    brightness: Brightness,
}

impl<'a> PixelBuf<'a> {
    /// Single-buffer pixel buffer over `buffer`.
    ///
    /// Brightness is applied as pixels are written and is not reapplied to
    /// earlier pixels when it changes.
    ///
    /// # Errors
    ///
    /// Config errors for the byte order, or [`PixelBufError::Capacity`] if
    /// the geometry does not fit in `buffer`.
    pub fn new(buffer: &'a mut [u8], config: &PixelBufConfig<'_>) -> Result<Self, PixelBufError> {
        Self::build(buffer, None, config)
    }

    /// Dual-buffer pixel buffer: unscaled values live in `raw`, scaled
    /// values in `buffer`.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new), plus [`PixelBufError::RegionMismatch`] if the
    /// two regions differ in length.
    pub fn with_raw(
        buffer: &'a mut [u8],
        raw: &'a mut [u8],
        config: &PixelBufConfig<'_>,
    ) -> Result<Self, PixelBufError> {
        Self::build(buffer, Some(raw), config)
    }

    fn build(
        output: &'a mut [u8],
        raw: Option<&'a mut [u8]>,
        config: &PixelBufConfig<'_>,
    ) -> Result<Self, PixelBufError> {
        let order = config.resolve_byte_order()?;
        let required = config.required_bytes().map_err(|_| PixelBufError::Capacity {
            required: usize::MAX,
            available: output.len(),
        })?;
        if required > output.len() {
            return Err(PixelBufError::Capacity {
                required,
                available: output.len(),
            });
        }
        if let Some(raw) = raw.as_deref()
            && raw.len() != output.len()
        {
            return Err(PixelBufError::RegionMismatch {
                raw: raw.len(),
                output: output.len(),
            });
        }

        let mut buf = Self {
            output,
            raw,
            len: config.size,
            order,
            offset: config.offset,
            brightness: Brightness::new(config.brightness),
        };
        if order.is_framed() {
            let region = buf.region();
            mark_frames(&mut buf.output[region.clone()], order);
            if let Some(raw) = buf.raw.as_deref_mut() {
                mark_frames(&mut raw[region], order);
            }
        }
        pixelbuf_debug!(
            "pixelbuf: {} pixels, order {}, step {}, offset {}, dual {}",
            buf.len,
            order.name(),
            order.step(),
            buf.offset,
            buf.raw.is_some()
        );
        Ok(buf)
    }

    // Attributes ----------------------------------------------------------------

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Colour channels per pixel (3 or 4). Frame bytes are not counted.
    #[inline]
    pub fn bpp(&self) -> usize {
        self.order.channels()
    }

    /// Bytes per pixel slot, including any frame byte.
    #[inline]
    pub fn pixel_step(&self) -> usize {
        self.order.step()
    }

    /// Bytes covered by the pixel slots.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.len * self.order.step()
    }

    /// Byte offset of pixel 0 in the backing buffers.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Resolved byte order.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Current global brightness.
    #[inline]
    pub fn brightness(&self) -> f32 {
        self.brightness.get()
    }

    /// Whether a separate raw region is tracked.
    #[inline]
    pub fn is_dual(&self) -> bool {
        self.raw.is_some()
    }

    /// Whether every slot starts with a protocol frame byte.
    #[inline]
    pub fn is_framed(&self) -> bool {
        self.order.is_framed()
    }

    /// Output bytes of the pixel slots, ready for the transport.
    pub fn output(&self) -> &[u8] {
        &self.output[self.region()]
    }

    /// Unscaled bytes of the pixel slots, in dual-buffer mode.
    pub fn raw(&self) -> Option<&[u8]> {
        let region = self.region();
        self.raw.as_deref().map(|raw| &raw[region])
    }

    // Brightness ----------------------------------------------------------------

    /// Set the global brightness, clamped into `0.0..=1.0`.
    ///
    /// In dual-buffer mode every output slot is re-derived from raw. In
    /// single-buffer mode only later writes see the new value.
    pub fn set_brightness(&mut self, value: f32) {
        self.brightness = Brightness::new(value);
        let region = self.region();
        if let Some(raw) = self.raw.as_deref() {
            brightness::recompute_all(
                &raw[region.clone()],
                &mut self.output[region],
                self.order,
                self.brightness,
            );
        }
    }

    // Single-pixel access -------------------------------------------------------

    /// Read pixel `index`.
    ///
    /// # Errors
    ///
    /// [`PixelBufError::IndexOutOfBounds`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<Channels, PixelBufError> {
        self.check_index(index)?;
        let slot = self.slot(index);
        Ok(codec::decode_pixel(&self.source()[slot], self.order))
    }

    /// Write pixel `index`.
    ///
    /// # Errors
    ///
    /// [`PixelBufError::IndexOutOfBounds`] if `index >= len()`, or a shape
    /// error if `value` does not fit the byte order.
    pub fn set(&mut self, index: usize, value: PixelValue) -> Result<(), PixelBufError> {
        self.check_index(index)?;
        self.write_slot(index, value)
    }

    /// Write `value` to every pixel.
    ///
    /// # Errors
    ///
    /// A shape error if `value` does not fit the byte order.
    pub fn fill(&mut self, value: PixelValue) -> Result<(), PixelBufError> {
        codec::check_value(&value, self.order)?;
        for index in 0..self.len {
            self.write_slot(index, value)?;
        }
        Ok(())
    }

    // Range access --------------------------------------------------------------

    /// Read pixels `range.start..range.stop`.
    ///
    /// # Errors
    ///
    /// [`PixelBufError::NonUnitStep`] for stepped ranges,
    /// [`PixelBufError::RangeOutOfBounds`] unless `start <= stop <= len()`.
    pub fn get_range(&self, range: impl Into<PixelRange>) -> Result<Vec<Channels>, PixelBufError> {
        let range = self.check_range(range.into())?;
        let bytes = self.bytes(range.clone());
        Ok(codec::decode_range(
            &self.source()[bytes],
            range.len(),
            self.order,
            self.order.step(),
        ))
    }

    /// Write pixels `range.start..range.stop`.
    ///
    /// [`RangeValues::Bytes`] copies raw slot bytes without reordering. Its
    /// bounds must be multiples of [`pixel_step`](Self::pixel_step) and it
    /// must hold exactly `pixel_step()` bytes per pixel. Frame bytes are
    /// copied as given. [`RangeValues::Pixels`] needs one value per pixel.
    ///
    /// # Errors
    ///
    /// Range errors as for [`get_range`](Self::get_range), then
    /// [`PixelBufError::Misaligned`] or [`PixelBufError::LengthMismatch`],
    /// or a shape error for any value. Nothing is written on error.
    pub fn set_range<'v>(
        &mut self,
        range: impl Into<PixelRange>,
        values: impl Into<RangeValues<'v>>,
    ) -> Result<(), PixelBufError> {
        let range = self.check_range(range.into())?;
        match values.into() {
            RangeValues::Bytes(bytes) => self.copy_bytes(range, bytes),
            RangeValues::Pixels(pixels) => {
                if pixels.len() != range.len() {
                    return Err(PixelBufError::LengthMismatch {
                        expected: range.len(),
                        actual: pixels.len(),
                    });
                }
                for value in pixels {
                    codec::check_value(value, self.order)?;
                }
                for (index, value) in range.zip(pixels) {
                    self.write_slot(index, *value)?;
                }
                Ok(())
            }
        }
    }

    fn copy_bytes(&mut self, range: Range<usize>, bytes: &[u8]) -> Result<(), PixelBufError> {
        let step = self.order.step();
        if range.start % step != 0 || range.end % step != 0 {
            return Err(PixelBufError::Misaligned {
                start: range.start,
                stop: range.end,
                step,
            });
        }
        let span = self.bytes(range);
        if bytes.len() != span.len() {
            return Err(PixelBufError::LengthMismatch {
                expected: span.len(),
                actual: bytes.len(),
            });
        }
        match self.raw.as_deref_mut() {
            Some(raw) => {
                raw[span.clone()].copy_from_slice(bytes);
                brightness::recompute_all(
                    &raw[span.clone()],
                    &mut self.output[span],
                    self.order,
                    self.brightness,
                );
            }
            None => self.output[span].copy_from_slice(bytes),
        }
        Ok(())
    }

    // Private helpers -----------------------------------------------------------

    /// Region holding the values callers see: raw if tracked, else output.
    fn source(&self) -> &[u8] {
        match self.raw.as_deref() {
            Some(raw) => raw,
            None => &self.output[..],
        }
    }

    /// Encode into the source region and bring the output slot in sync.
    /// `index` must already be in bounds.
    fn write_slot(&mut self, index: usize, value: PixelValue) -> Result<(), PixelBufError> {
        let slot = self.slot(index);
        let order = self.order;
        match self.raw.as_deref_mut() {
            Some(raw) => {
                codec::encode_pixel(&mut raw[slot.clone()], value, order)?;
                brightness::rescale_slot(
                    &raw[slot.clone()],
                    &mut self.output[slot],
                    order,
                    self.brightness,
                );
            }
            None => {
                codec::encode_pixel_scaled(&mut self.output[slot], value, order, self.brightness)?;
            }
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), PixelBufError> {
        if index < self.len {
            Ok(())
        } else {
            Err(PixelBufError::IndexOutOfBounds {
                index,
                len: self.len,
            })
        }
    }

    fn check_range(&self, range: PixelRange) -> Result<Range<usize>, PixelBufError> {
        if range.step != 1 {
            return Err(PixelBufError::NonUnitStep(range.step));
        }
        if range.start > range.stop || range.stop > self.len {
            return Err(PixelBufError::RangeOutOfBounds {
                start: range.start,
                stop: range.stop,
                len: self.len,
            });
        }
        Ok(range.start..range.stop)
    }

    /// Byte range of all pixel slots.
    fn region(&self) -> Range<usize> {
        self.offset..self.offset + self.byte_len()
    }

    /// Byte range of the slots for `pixels`.
    fn bytes(&self, pixels: Range<usize>) -> Range<usize> {
        let step = self.order.step();
        self.offset + pixels.start * step..self.offset + pixels.end * step
    }

    /// Byte range of one slot.
    fn slot(&self, index: usize) -> Range<usize> {
        self.bytes(index..index + 1)
    }
}

impl fmt::Debug for PixelBuf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PixelBuf({} px, {:?}, brightness {}, {})",
            self.len,
            self.order,
            self.brightness.get(),
            if self.is_dual() { "dual" } else { "plain" }
        )
    }
}

/// Write the full-brightness frame byte at the start of every slot.
fn mark_frames(region: &mut [u8], order: ByteOrder) {
    for slot in region.chunks_exact_mut(order.step()) {
        slot[0] = FRAME_FULL;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::FRAME_START;
    use crate::error::ErrorKind;
    use alloc::format;
    use alloc::vec;

    // --- Construction ---

    #[test]
    fn defaults() {
        let mut strip = [0u8; 30];
        let buf = PixelBuf::new(&mut strip, &PixelBufConfig::new(10)).unwrap();
        assert_eq!(buf.len(), 10);
        assert!(!buf.is_empty());
        assert_eq!(buf.bpp(), 3);
        assert_eq!(buf.pixel_step(), 3);
        assert_eq!(buf.byte_len(), 30);
        assert_eq!(buf.byte_order(), ByteOrder::BGR);
        assert_eq!(buf.brightness(), 1.0);
        assert!(!buf.is_dual());
        assert!(!buf.is_framed());
        assert_eq!(buf.raw(), None);
    }

    #[test]
    fn capacity_checked() {
        let mut strip = [0u8; 20];
        let err = PixelBuf::new(&mut strip, &PixelBufConfig::new(10).with_bpp(3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capacity);
        assert_eq!(
            err,
            PixelBufError::Capacity {
                required: 30,
                available: 20
            }
        );
    }

    #[test]
    fn capacity_counts_offset_and_frame() {
        let mut strip = [0u8; 12];
        let config = PixelBufConfig::new(3).with_framed(true);
        assert!(PixelBuf::new(&mut strip, &config).is_ok());
        let config = config.with_offset(1);
        assert_eq!(
            PixelBuf::new(&mut strip, &config).unwrap_err(),
            PixelBufError::Capacity {
                required: 13,
                available: 12
            }
        );
    }

    #[test]
    fn capacity_overflow() {
        let mut strip = [0u8; 4];
        let err = PixelBuf::new(&mut strip, &PixelBufConfig::new(usize::MAX)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capacity);
    }

    #[test]
    fn config_errors() {
        let mut strip = [0u8; 40];
        let err = PixelBuf::new(&mut strip, &PixelBufConfig::new(1).with_byte_order("XYZ"));
        assert_eq!(err.unwrap_err(), PixelBufError::UnknownByteOrder);
        let err = PixelBuf::new(&mut strip, &PixelBufConfig::new(1).with_bpp(5));
        assert_eq!(err.unwrap_err().kind(), ErrorKind::Config);
        let err = PixelBuf::new(
            &mut strip,
            &PixelBufConfig::new(1).with_byte_order("RGBW").with_bpp(3),
        );
        assert_eq!(err.unwrap_err().kind(), ErrorKind::Config);
    }

    #[test]
    fn raw_length_must_match() {
        let mut out = [0u8; 30];
        let mut raw = [0u8; 33];
        let err = PixelBuf::with_raw(&mut out, &mut raw, &PixelBufConfig::new(10)).unwrap_err();
        assert_eq!(err, PixelBufError::RegionMismatch { raw: 33, output: 30 });
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn brightness_clamped_at_construction() {
        let mut strip = [0u8; 3];
        let buf = PixelBuf::new(&mut strip, &PixelBufConfig::new(1).with_brightness(3.0)).unwrap();
        assert_eq!(buf.brightness(), 1.0);
        let mut strip = [0u8; 3];
        let buf =
            PixelBuf::new(&mut strip, &PixelBufConfig::new(1).with_brightness(-1.0)).unwrap();
        assert_eq!(buf.brightness(), 0.0);
    }

    #[test]
    fn bpp4_promotes_byte_order() {
        let mut strip = [0u8; 8];
        let config = PixelBufConfig::new(2).with_byte_order("GRB").with_bpp(4);
        let buf = PixelBuf::new(&mut strip, &config).unwrap();
        assert_eq!(buf.byte_order(), ByteOrder::GRBW);
        assert_eq!(buf.bpp(), 4);
    }

    #[test]
    fn empty_buffer() {
        let mut strip = [0u8; 0];
        let buf = PixelBuf::new(&mut strip, &PixelBufConfig::new(0)).unwrap();
        assert!(buf.is_empty());
        assert!(buf.get_range(0..0).unwrap().is_empty());
        assert_eq!(buf.output(), &[] as &[u8]);
    }

    // --- Single pixel access ---

    #[test]
    fn set_get_roundtrip() {
        let mut strip = [0u8; 9];
        let mut buf = PixelBuf::new(&mut strip, &PixelBufConfig::new(3)).unwrap();
        buf.set(1, PixelValue::Channels3([10, 20, 30])).unwrap();
        assert_eq!(buf.get(1).unwrap(), [10, 20, 30]);
        assert_eq!(buf.get(0).unwrap(), [0, 0, 0]);
        // BGR on the wire.
        assert_eq!(buf.output(), &[0, 0, 0, 30, 20, 10, 0, 0, 0]);
    }

    #[test]
    fn index_out_of_bounds() {
        let mut strip = [0u8; 9];
        let mut buf = PixelBuf::new(&mut strip, &PixelBufConfig::new(3)).unwrap();
        assert_eq!(
            buf.get(3).unwrap_err(),
            PixelBufError::IndexOutOfBounds { index: 3, len: 3 }
        );
        assert_eq!(
            buf.set(7, PixelValue::Packed24(0xFFFFFF)).unwrap_err().kind(),
            ErrorKind::Index
        );
        assert_eq!(buf.output(), &[0; 9]);
    }

    #[test]
    fn white_inference() {
        let mut strip = [0u8; 4];
        let config = PixelBufConfig::new(1).with_byte_order("RGBW");
        let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
        buf.set(0, PixelValue::Packed24(0x7F7F7F)).unwrap();
        assert_eq!(buf.get(0).unwrap(), Channels::rgbw(0, 0, 0, 127));
    }

    #[test]
    fn shape_error_on_set() {
        let mut strip = [0u8; 4];
        let config = PixelBufConfig::new(1).with_byte_order("RGBW");
        let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
        let err = buf.set(0, PixelValue::Channels3([1, 2, 3])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn sub_buffer_offset() {
        let mut strip = [0xAAu8; 10];
        {
            let config = PixelBufConfig::new(2).with_byte_order("RGB").with_offset(2);
            let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
            buf.set(0, PixelValue::Channels3([1, 2, 3])).unwrap();
            buf.set(1, PixelValue::Channels3([4, 5, 6])).unwrap();
            assert_eq!(buf.output(), &[1, 2, 3, 4, 5, 6]);
        }
        assert_eq!(strip, [0xAA, 0xAA, 1, 2, 3, 4, 5, 6, 0xAA, 0xAA]);
    }

    #[test]
    fn fill_all() {
        let mut strip = [0u8; 9];
        let config = PixelBufConfig::new(3).with_byte_order("GRB");
        let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
        buf.fill(PixelValue::Packed24(0x102030)).unwrap();
        assert_eq!(buf.output(), &[0x20u8, 0x10, 0x30].repeat(3)[..]);
        assert_eq!(
            buf.fill(PixelValue::Channels4([1, 2, 3, 4])).unwrap_err().kind(),
            ErrorKind::Shape
        );
    }

    // --- Brightness ---

    #[test]
    fn dual_buffer_scaling() {
        let mut out = [0u8; 3];
        let mut raw = [0u8; 3];
        let config = PixelBufConfig::new(1)
            .with_byte_order("RGB")
            .with_brightness(0.5);
        let mut buf = PixelBuf::with_raw(&mut out, &mut raw, &config).unwrap();
        buf.set(0, PixelValue::Channels3([200, 200, 200])).unwrap();
        assert_eq!(buf.output(), &[100, 100, 100]);
        assert_eq!(buf.raw(), Some(&[200u8, 200, 200][..]));
        assert_eq!(buf.get(0).unwrap(), [200, 200, 200]);

        buf.set_brightness(0.25);
        assert_eq!(buf.output(), &[50, 50, 50]);
        assert_eq!(buf.get(0).unwrap(), [200, 200, 200]);

        buf.set_brightness(1.0);
        assert_eq!(buf.output(), &[200, 200, 200]);
    }

    #[test]
    fn plain_brightness_not_retroactive() {
        let mut strip = [0u8; 6];
        let config = PixelBufConfig::new(2).with_byte_order("RGB");
        let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
        buf.set(0, PixelValue::Channels3([200, 200, 200])).unwrap();
        buf.set_brightness(0.5);
        assert_eq!(&buf.output()[..3], &[200, 200, 200]);
        buf.set(1, PixelValue::Channels3([200, 200, 200])).unwrap();
        assert_eq!(&buf.output()[3..], &[100, 100, 100]);
        assert_eq!(buf.get(1).unwrap(), [100, 100, 100]);
    }

    #[test]
    fn plain_packed24_leaves_white_alone() {
        let mut strip = [0u8; 4];
        let config = PixelBufConfig::new(1)
            .with_byte_order("RGBW")
            .with_brightness(0.5);
        let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
        buf.set(0, PixelValue::Channels4([0, 0, 0, 200])).unwrap();
        assert_eq!(buf.get(0).unwrap().white(), Some(100));
        for _ in 0..2 {
            buf.set(0, PixelValue::Packed24(0x102030)).unwrap();
            assert_eq!(buf.get(0).unwrap(), [0x08, 0x10, 0x18, 100]);
        }
        buf.set_brightness(0.25);
        buf.set(0, PixelValue::Packed24(0x102030)).unwrap();
        assert_eq!(buf.get(0).unwrap(), [0x04, 0x08, 0x0C, 100]);
    }

    #[test]
    fn plain_packed24_leaves_frame_byte() {
        let mut strip = [0u8; 4];
        let config = PixelBufConfig::new(1)
            .with_byte_order("ARGB")
            .with_brightness(0.5);
        let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
        buf.set(0, PixelValue::ChannelsWithBrightness([0, 0, 0], 0.5))
            .unwrap();
        buf.set(0, PixelValue::Packed24(0x204060)).unwrap();
        assert_eq!(buf.output(), &[FRAME_START | 15, 0x10, 0x20, 0x30]);
    }

    #[test]
    fn wire_order_matches_name() {
        for order in ByteOrder::ALL {
            let mut strip = [0u8; 4];
            let config = PixelBufConfig::new(1).with_byte_order(order.name());
            let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
            let value = if order.has_white() {
                PixelValue::Channels4([0x11, 0x22, 0x33, 0x44])
            } else {
                PixelValue::Channels3([0x11, 0x22, 0x33])
            };
            buf.set(0, value).unwrap();
            let wire: Vec<u8> = order
                .name()
                .bytes()
                .map(|c| match c {
                    b'R' => 0x11,
                    b'G' => 0x22,
                    b'B' => 0x33,
                    b'W' => 0x44,
                    _ => FRAME_FULL,
                })
                .collect();
            assert_eq!(buf.output(), &wire[..], "{order:?}");
        }
    }

    #[test]
    fn dual_recompute_stays_in_region() {
        let mut out = [0xEEu8; 8];
        let mut raw = [0x10u8; 8];
        let config = PixelBufConfig::new(2).with_byte_order("RGB").with_offset(1);
        let mut buf = PixelBuf::with_raw(&mut out, &mut raw, &config).unwrap();
        buf.set_brightness(0.5);
        assert_eq!(buf.output(), &[8; 6]);
        drop(buf);
        assert_eq!(out[0], 0xEE);
        assert_eq!(out[7], 0xEE);
    }

    // --- Framed protocol ---

    #[test]
    fn framed_marks_every_slot() {
        let mut out = [0u8; 12];
        let mut raw = [0u8; 12];
        let config = PixelBufConfig::new(3).with_framed(true);
        let buf = PixelBuf::with_raw(&mut out, &mut raw, &config).unwrap();
        assert!(buf.is_framed());
        assert_eq!(buf.bpp(), 3);
        assert_eq!(buf.pixel_step(), 4);
        assert_eq!(buf.byte_order(), ByteOrder::ABGR);
        for slot in buf.output().chunks(4) {
            assert_eq!(slot[0], FRAME_FULL);
        }
        for slot in buf.raw().unwrap().chunks(4) {
            assert_eq!(slot[0], FRAME_FULL);
        }
        assert_eq!(buf.get(0).unwrap(), [0, 0, 0]);
    }

    #[test]
    fn framed_brightness_per_pixel() {
        let mut out = [0u8; 8];
        let mut raw = [0u8; 8];
        let config = PixelBufConfig::new(2)
            .with_byte_order("BGR")
            .with_framed(true)
            .with_brightness(0.5);
        let mut buf = PixelBuf::with_raw(&mut out, &mut raw, &config).unwrap();
        buf.set(0, PixelValue::ChannelsWithBrightness([10, 20, 30], 0.0))
            .unwrap();
        // Frame byte copied unscaled, colour bytes halved.
        assert_eq!(&buf.output()[..4], &[FRAME_START, 15, 10, 5]);
        assert_eq!(buf.get(0).unwrap(), [10, 20, 30]);

        buf.set_brightness(0.0);
        assert_eq!(&buf.output()[..4], &[FRAME_START, 0, 0, 0]);
        assert_eq!(&buf.output()[4..], &[FRAME_FULL, 0, 0, 0]);
    }

    #[test]
    fn framed_plain_leaves_frame_unscaled() {
        let mut strip = [0u8; 4];
        let config = PixelBufConfig::new(1)
            .with_byte_order("ARGB")
            .with_brightness(0.5);
        let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
        buf.set(0, PixelValue::Channels3([100, 50, 20])).unwrap();
        assert_eq!(buf.output(), &[FRAME_FULL, 50, 25, 10]);
    }

    // --- Ranges ---

    #[test]
    fn get_range_bulk() {
        let mut strip = [0u8; 12];
        let config = PixelBufConfig::new(4).with_byte_order("RGB");
        let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
        for i in 0..4 {
            buf.set(i, [i as u8; 3].into()).unwrap();
        }
        let px = buf.get_range(1..3).unwrap();
        assert_eq!(px, vec![Channels::rgb(1, 1, 1), Channels::rgb(2, 2, 2)]);
        assert!(buf.get_range(2..2).unwrap().is_empty());
    }

    #[test]
    fn range_bounds_and_step() {
        let mut strip = [0u8; 12];
        let mut buf = PixelBuf::new(&mut strip, &PixelBufConfig::new(4)).unwrap();
        assert_eq!(
            buf.get_range(2..5).unwrap_err(),
            PixelBufError::RangeOutOfBounds {
                start: 2,
                stop: 5,
                len: 4
            }
        );
        assert_eq!(
            buf.get_range(3..1).unwrap_err().kind(),
            ErrorKind::Index
        );
        assert_eq!(
            buf.get_range(PixelRange::new(0, 4).with_step(2)).unwrap_err(),
            PixelBufError::NonUnitStep(2)
        );
        assert_eq!(
            buf.set_range(PixelRange::new(0, 4).with_step(2), &[0u8; 6])
                .unwrap_err()
                .kind(),
            ErrorKind::Unsupported
        );
    }

    #[test]
    fn set_range_pixels() {
        let mut strip = [0u8; 12];
        let config = PixelBufConfig::new(4).with_byte_order("GRB");
        let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
        let values = [PixelValue::Packed24(0x010203), PixelValue::Channels3([4, 5, 6])];
        buf.set_range(1..3, &values).unwrap();
        assert_eq!(buf.get(1).unwrap(), [1, 2, 3]);
        assert_eq!(buf.get(2).unwrap(), [4, 5, 6]);
        assert_eq!(&buf.output()[3..9], &[2, 1, 3, 5, 4, 6]);
    }

    #[test]
    fn set_range_pixels_validates_first() {
        let mut strip = [0u8; 16];
        let config = PixelBufConfig::new(4).with_byte_order("RGBW");
        let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
        let values = [
            PixelValue::Channels4([1, 2, 3, 4]),
            PixelValue::Channels3([1, 2, 3]),
        ];
        assert_eq!(
            buf.set_range(0..2, &values).unwrap_err().kind(),
            ErrorKind::Shape
        );
        assert_eq!(buf.output(), &[0; 16]);

        let err = buf.set_range(0..3, &values).unwrap_err();
        assert_eq!(
            err,
            PixelBufError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn set_range_bytes_verbatim() {
        let mut strip = [0u8; 18];
        let config = PixelBufConfig::new(6).with_byte_order("GRB");
        let mut buf = PixelBuf::new(&mut strip, &config).unwrap();
        let bytes: Vec<u8> = (1..=9).collect();
        buf.set_range(0..3, &bytes[..]).unwrap();
        // No reordering: bytes land as given.
        assert_eq!(&buf.output()[..9], &bytes[..]);
        assert_eq!(buf.get(0).unwrap(), [2, 1, 3]);
    }

    #[test]
    fn set_range_bytes_alignment() {
        let mut strip = [7u8; 18];
        let mut buf = PixelBuf::new(&mut strip, &PixelBufConfig::new(6)).unwrap();
        let err = buf.set_range(1..3, &[0u8; 6]).unwrap_err();
        assert_eq!(
            err,
            PixelBufError::Misaligned {
                start: 1,
                stop: 3,
                step: 3
            }
        );
        assert_eq!(err.kind(), ErrorKind::Alignment);
        assert_eq!(buf.output(), &[7; 18]);

        let err = buf.set_range(0..3, &[0u8; 8]).unwrap_err();
        assert_eq!(
            err,
            PixelBufError::LengthMismatch {
                expected: 9,
                actual: 8
            }
        );
        assert_eq!(buf.output(), &[7; 18]);
    }

    #[test]
    fn set_range_bytes_dual_framed() {
        let mut out = [0u8; 16];
        let mut raw = [0u8; 16];
        let config = PixelBufConfig::new(4)
            .with_byte_order("RGB")
            .with_framed(true)
            .with_brightness(0.5);
        let mut buf = PixelBuf::with_raw(&mut out, &mut raw, &config).unwrap();
        buf.set_range(0..4, &[0xE1u8, 100, 100, 100].repeat(4)[..])
            .unwrap();
        assert_eq!(buf.raw().unwrap(), &[0xE1u8, 100, 100, 100].repeat(4)[..]);
        assert_eq!(buf.output(), &[0xE1u8, 50, 50, 50].repeat(4)[..]);
        assert_eq!(buf.get(3).unwrap(), [100, 100, 100]);
    }

    #[test]
    fn debug_summary() {
        let mut strip = [0u8; 6];
        let buf = PixelBuf::new(&mut strip, &PixelBufConfig::new(2)).unwrap();
        assert_eq!(
            format!("{buf:?}"),
            "PixelBuf(2 px, ByteOrder(BGR), brightness 1, plain)"
        );
    }
}
