//! Pixel values written to and read from a [`PixelBuf`](crate::PixelBuf).
//!
//! Writes take a [`PixelValue`], which says explicitly which channels the
//! caller supplies. Reads return [`Channels`], one byte per colour channel
//! of the buffer's byte order.

use core::fmt;

use rgb::RGB8;

// ---------------------------------------------------------------------------
// PixelValue
// ---------------------------------------------------------------------------

/// A pixel value as supplied by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PixelValue {
    /// `0xRRGGBB`. Bits above 23 are ignored. On white layouts, equal
    /// R, G and B are collapsed into the white channel.
    Packed24(u32),
    /// Explicit red, green, blue.
    Channels3([u8; 3]),
    /// Explicit red, green, blue, white.
    Channels4([u8; 4]),
    /// Red, green, blue plus a per-pixel brightness in `0.0..=1.0`,
    /// carried in the frame byte of framed layouts.
    ChannelsWithBrightness([u8; 3], f32),
}

impl PixelValue {
    /// Number of channels the caller supplied, counting a per-pixel
    /// brightness as a channel. `Packed24` fits any layout and reports 3.
    pub const fn channel_count(&self) -> usize {
        match self {
            Self::Packed24(_) | Self::Channels3(_) => 3,
            Self::Channels4(_) | Self::ChannelsWithBrightness(..) => 4,
        }
    }

    /// Split `0xRRGGBB` into `[r, g, b]`.
    #[inline]
    pub const fn unpack(packed: u32) -> [u8; 3] {
        [(packed >> 16) as u8, (packed >> 8) as u8, packed as u8]
    }
}

impl From<u32> for PixelValue {
    fn from(packed: u32) -> Self {
        Self::Packed24(packed)
    }
}

impl From<[u8; 3]> for PixelValue {
    fn from(rgb: [u8; 3]) -> Self {
        Self::Channels3(rgb)
    }
}

impl From<[u8; 4]> for PixelValue {
    fn from(rgbw: [u8; 4]) -> Self {
        Self::Channels4(rgbw)
    }
}

impl From<([u8; 3], f32)> for PixelValue {
    fn from((rgb, brightness): ([u8; 3], f32)) -> Self {
        Self::ChannelsWithBrightness(rgb, brightness)
    }
}

impl From<RGB8> for PixelValue {
    fn from(px: RGB8) -> Self {
        Self::Channels3([px.r, px.g, px.b])
    }
}

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

/// A decoded pixel: R, G, B and, on white layouts, W.
///
/// Frame bytes are never part of a decoded pixel.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Channels {
    bytes: [u8; 4],
    len: u8,
}

impl Channels {
    /// Three-channel pixel.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            bytes: [r, g, b, 0],
            len: 3,
        }
    }

    /// Four-channel pixel.
    pub const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self {
            bytes: [r, g, b, w],
            len: 4,
        }
    }

    /// Channel values in R, G, B\[, W\] order.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// Number of channels (3 or 4).
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Colour part as an [`RGB8`].
    #[inline]
    pub const fn to_rgb8(&self) -> RGB8 {
        RGB8 {
            r: self.bytes[0],
            g: self.bytes[1],
            b: self.bytes[2],
        }
    }

    /// White channel, if the layout has one.
    #[inline]
    pub const fn white(&self) -> Option<u8> {
        if self.len == 4 {
            Some(self.bytes[3])
        } else {
            None
        }
    }
}

impl fmt::Debug for Channels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl From<Channels> for PixelValue {
    fn from(px: Channels) -> Self {
        let [r, g, b, w] = px.bytes;
        match px.white() {
            Some(_) => Self::Channels4([r, g, b, w]),
            None => Self::Channels3([r, g, b]),
        }
    }
}

impl PartialEq<[u8; 3]> for Channels {
    fn eq(&self, other: &[u8; 3]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<[u8; 4]> for Channels {
    fn eq(&self, other: &[u8; 4]) -> bool {
        self.as_slice() == other
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Channels {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[u8]}", self.as_slice())
    }
}
