//! Static registry of LED channel byte orders.
//!
//! Every supported strip layout is a [`ByteOrder`] constant. An entry maps
//! the logical channels R, G, B (and W, if present) to byte offsets inside
//! one pixel slot. Framed entries (`A*`) reserve slot byte 0 for the
//! per-pixel frame byte used by DotStar-style protocols.

use core::fmt;
use core::str::FromStr;

use crate::error::PixelBufError;

/// Byte positions of R, G and B for each of the six colour permutations,
/// indexed by [`ByteOrder::permutation`]. Each row is the inverse of the
/// name: `GBR` stores R at byte 2, so its row starts with 2.
const PERMUTATIONS: [[u8; 3]; 6] = [
    [0, 1, 2], // RGB
    [0, 2, 1], // RBG
    [1, 0, 2], // GRB
    [2, 0, 1], // GBR
    [1, 2, 0], // BRG
    [2, 1, 0], // BGR
];

// ---------------------------------------------------------------------------
// SlotLayout
// ---------------------------------------------------------------------------

/// Shape of one pixel slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum SlotLayout {
    /// Three colour bytes.
    Rgb = 0,
    /// Three colour bytes followed by a white byte.
    Rgbw = 1,
    /// A leading frame byte followed by three colour bytes.
    Framed = 2,
}

impl SlotLayout {
    /// Bytes per slot.
    #[inline]
    pub const fn step(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgbw | Self::Framed => 4,
        }
    }

    /// Colour channels addressable through pixel values (3 or 4).
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb | Self::Framed => 3,
            Self::Rgbw => 4,
        }
    }

    /// Offset added to every colour channel position.
    #[inline]
    const fn color_shift(self) -> u8 {
        match self {
            Self::Rgb | Self::Rgbw => 0,
            Self::Framed => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// ByteOrder
// ---------------------------------------------------------------------------

/// One entry of the byte order registry.
///
/// Entries are immutable and only obtainable from the registry, so the
/// channel offsets are always a permutation of `[0, step)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ByteOrder {
    name: &'static str,
    layout: SlotLayout,
    permutation: u8,
}

impl ByteOrder {
    const fn entry(name: &'static str, layout: SlotLayout, permutation: u8) -> Self {
        Self {
            name,
            layout,
            permutation,
        }
    }

    // Named constants ---------------------------------------------------------

    pub const RGB: Self = Self::entry("RGB", SlotLayout::Rgb, 0);
    pub const RBG: Self = Self::entry("RBG", SlotLayout::Rgb, 1);
    pub const GRB: Self = Self::entry("GRB", SlotLayout::Rgb, 2);
    pub const GBR: Self = Self::entry("GBR", SlotLayout::Rgb, 3);
    pub const BRG: Self = Self::entry("BRG", SlotLayout::Rgb, 4);
    pub const BGR: Self = Self::entry("BGR", SlotLayout::Rgb, 5);

    pub const RGBW: Self = Self::entry("RGBW", SlotLayout::Rgbw, 0);
    pub const RBGW: Self = Self::entry("RBGW", SlotLayout::Rgbw, 1);
    pub const GRBW: Self = Self::entry("GRBW", SlotLayout::Rgbw, 2);
    pub const GBRW: Self = Self::entry("GBRW", SlotLayout::Rgbw, 3);
    pub const BRGW: Self = Self::entry("BRGW", SlotLayout::Rgbw, 4);
    pub const BGRW: Self = Self::entry("BGRW", SlotLayout::Rgbw, 5);

    pub const ARGB: Self = Self::entry("ARGB", SlotLayout::Framed, 0);
    pub const ARBG: Self = Self::entry("ARBG", SlotLayout::Framed, 1);
    pub const AGRB: Self = Self::entry("AGRB", SlotLayout::Framed, 2);
    pub const AGBR: Self = Self::entry("AGBR", SlotLayout::Framed, 3);
    pub const ABRG: Self = Self::entry("ABRG", SlotLayout::Framed, 4);
    pub const ABGR: Self = Self::entry("ABGR", SlotLayout::Framed, 5);

    /// Every registered byte order, grouped by layout in permutation order.
    pub const ALL: [Self; 18] = [
        Self::RGB,
        Self::RBG,
        Self::GRB,
        Self::GBR,
        Self::BRG,
        Self::BGR,
        Self::RGBW,
        Self::RBGW,
        Self::GRBW,
        Self::GBRW,
        Self::BRGW,
        Self::BGRW,
        Self::ARGB,
        Self::ARBG,
        Self::AGRB,
        Self::AGBR,
        Self::ABRG,
        Self::ABGR,
    ];

    /// Look up a byte order by name (ASCII case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`PixelBufError::UnknownByteOrder`] for unregistered names.
    pub fn lookup(name: &str) -> Result<Self, PixelBufError> {
        Self::ALL
            .iter()
            .find(|order| order.name.eq_ignore_ascii_case(name))
            .copied()
            .ok_or(PixelBufError::UnknownByteOrder)
    }

    /// Combine this order with an explicit bytes-per-pixel request and the
    /// framed protocol flag.
    ///
    /// Framing always wins: the result is the `A*` entry with the same
    /// colour permutation, and any white channel is dropped. A 3-channel
    /// order with `bpp == 4` is promoted to its `*W` sibling. `None` keeps
    /// the order's own channel count.
    ///
    /// # Errors
    ///
    /// Returns [`PixelBufError::InvalidBpp`] unless `bpp` is 3 or 4, and
    /// [`PixelBufError::ConflictingBpp`] for a white order with `bpp == 3`.
    pub fn resolve(self, bpp: Option<usize>, framed: bool) -> Result<Self, PixelBufError> {
        if let Some(bpp) = bpp
            && bpp != 3
            && bpp != 4
        {
            return Err(PixelBufError::InvalidBpp(bpp));
        }
        if framed || self.is_framed() {
            return Ok(self.sibling(SlotLayout::Framed));
        }
        match (self.layout, bpp) {
            (SlotLayout::Rgb, Some(4)) => Ok(self.sibling(SlotLayout::Rgbw)),
            (SlotLayout::Rgbw, Some(3)) => Err(PixelBufError::ConflictingBpp {
                order: 4,
                requested: 3,
            }),
            _ => Ok(self),
        }
    }

    /// Entry with the same colour permutation but a different slot layout.
    const fn sibling(self, layout: SlotLayout) -> Self {
        Self::ALL[layout as usize * PERMUTATIONS.len() + self.permutation as usize]
    }

    /// Registry name, e.g. `"GRBW"`.
    #[inline]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Slot layout.
    #[inline]
    pub const fn layout(self) -> SlotLayout {
        self.layout
    }

    /// Colour channels carried by a pixel value (3 or 4).
    #[inline]
    pub const fn channels(self) -> usize {
        self.layout.channels()
    }

    /// Bytes per pixel slot, including any frame byte.
    #[inline]
    pub const fn step(self) -> usize {
        self.layout.step()
    }

    /// Whether the slot carries a white byte.
    #[inline]
    pub const fn has_white(self) -> bool {
        matches!(self.layout, SlotLayout::Rgbw)
    }

    /// Whether slot byte 0 is a protocol frame byte.
    #[inline]
    pub const fn is_framed(self) -> bool {
        matches!(self.layout, SlotLayout::Framed)
    }

    /// Index into the six R/G/B permutations.
    #[inline]
    pub const fn permutation(self) -> usize {
        self.permutation as usize
    }

    #[inline]
    const fn color_offset(self, channel: usize) -> usize {
        (PERMUTATIONS[self.permutation as usize][channel] + self.layout.color_shift()) as usize
    }

    /// Slot offset of the red byte.
    #[inline]
    pub const fn r(self) -> usize {
        self.color_offset(0)
    }

    /// Slot offset of the green byte.
    #[inline]
    pub const fn g(self) -> usize {
        self.color_offset(1)
    }

    /// Slot offset of the blue byte.
    #[inline]
    pub const fn b(self) -> usize {
        self.color_offset(2)
    }

    /// Slot offset of the white byte, if any. White is always last.
    #[inline]
    pub const fn w(self) -> Option<usize> {
        if self.has_white() { Some(3) } else { None }
    }

    /// Slot offset of the frame byte, if any. The frame byte is always first.
    #[inline]
    pub const fn frame(self) -> Option<usize> {
        if self.is_framed() { Some(0) } else { None }
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        Self::BGR
    }
}

impl FromStr for ByteOrder {
    type Err = PixelBufError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}

impl fmt::Debug for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteOrder({})", self.name)
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ByteOrder {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ByteOrder({=str})", self.name)
    }
}
