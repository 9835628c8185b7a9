//! Global brightness scaling.
//!
//! [`Brightness`] is a clamped scalar. The free functions derive output
//! bytes from raw bytes one slot at a time ([`rescale_slot`]) or for a
//! whole region ([`recompute_all`]). Frame bytes are never scaled; they
//! carry their own brightness field.

use crate::ByteOrder;

/// Global brightness in `0.0..=1.0`.
///
/// Construction clamps instead of rejecting. NaN becomes `0.0`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Brightness(f32);

impl Brightness {
    /// Full brightness: scaling is the identity.
    pub const FULL: Self = Self(1.0);
    /// All colour bytes scale to zero.
    pub const OFF: Self = Self(0.0);

    /// Clamp `value` into `0.0..=1.0`.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            Self::OFF
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// The clamped value.
    #[inline]
    pub const fn get(self) -> f32 {
        self.0
    }

    /// Whether scaling is the identity.
    #[inline]
    pub fn is_full(self) -> bool {
        self.0 >= 1.0
    }

    /// `floor(value * brightness)`.
    #[inline]
    pub fn scale(self, value: u8) -> u8 {
        (f32::from(value) * self.0) as u8
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<f32> for Brightness {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// Derive one output slot from its raw slot.
///
/// Colour bytes are scaled, the frame byte (if any) is copied verbatim.
pub fn rescale_slot(raw: &[u8], out: &mut [u8], order: ByteOrder, brightness: Brightness) {
    let frame = order.frame();
    for (i, (o, &r)) in out.iter_mut().zip(raw).take(order.step()).enumerate() {
        *o = if frame == Some(i) {
            r
        } else {
            brightness.scale(r)
        };
    }
}

/// Re-derive every output slot from the raw region.
///
/// `raw` and `out` cover exactly the pixel slots of one buffer: same
/// length, a whole number of `order.step()` slots.
pub fn recompute_all(raw: &[u8], out: &mut [u8], order: ByteOrder, brightness: Brightness) {
    debug_assert_eq!(raw.len(), out.len());
    pixelbuf_trace!("recomputing {} bytes at brightness {}", out.len(), brightness.get());
    if brightness.is_full() {
        out.copy_from_slice(raw);
        return;
    }
    let step = order.step();
    for (r, o) in raw.chunks_exact(step).zip(out.chunks_exact_mut(step)) {
        rescale_slot(r, o, order, brightness);
    }
}
