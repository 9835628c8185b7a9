//! Single-pixel encode/decode against a [`ByteOrder`].
//!
//! All functions operate on one pixel slot: a byte slice starting at the
//! slot's first byte (the frame byte, for framed orders) and at least
//! `order.step()` bytes long. Only [`encode_pixel_scaled`] applies a
//! global brightness, and only to the bytes it writes.

use alloc::vec::Vec;

use crate::brightness::Brightness;
use crate::error::PixelBufError;
use crate::pixel::{Channels, PixelValue};
use crate::ByteOrder;

/// Fixed start marker in the top three bits of every frame byte.
pub const FRAME_START: u8 = 0b1110_0000;

/// Frame byte for full per-pixel brightness.
pub const FRAME_FULL: u8 = 0xFF;

/// Largest value of the 5-bit brightness field.
const FRAME_LEVELS: f32 = 31.0;

/// Frame byte for a per-pixel brightness: start marker plus
/// `floor(brightness * 31)` in the low five bits.
pub fn frame_byte(brightness: f32) -> u8 {
    FRAME_START | (Brightness::new(brightness).get() * FRAME_LEVELS) as u8
}

/// Check that `value` can be written to a slot of `order`.
///
/// # Errors
///
/// - [`PixelBufError::ValueShape`] when explicit channels do not match the
///   order's channel count.
/// - [`PixelBufError::UnexpectedBrightness`] for a per-pixel brightness on
///   an order without a frame byte.
pub fn check_value(value: &PixelValue, order: ByteOrder) -> Result<(), PixelBufError> {
    let shape = |actual| PixelBufError::ValueShape {
        expected: order.channels(),
        actual,
    };
    match value {
        PixelValue::Packed24(_) => Ok(()),
        PixelValue::Channels3(_) if order.has_white() => Err(shape(3)),
        PixelValue::Channels4(_) if !order.has_white() => Err(shape(4)),
        PixelValue::ChannelsWithBrightness(..) if !order.is_framed() => {
            Err(PixelBufError::UnexpectedBrightness)
        }
        _ => Ok(()),
    }
}

/// Encode `value` into `slot`.
///
/// - `Packed24` writes R, G, B. On white orders, exactly equal R, G and B
///   are moved into the white byte and the colour bytes zeroed; otherwise
///   the white byte is left alone. The frame byte is never touched.
/// - `Channels3` writes R, G, B, and on framed orders a full-brightness
///   frame byte.
/// - `Channels4` writes R, G, B, W.
/// - `ChannelsWithBrightness` writes R, G, B and encodes the brightness
///   into the frame byte.
///
/// # Errors
///
/// Same as [`check_value`]. Nothing is written on error.
///
/// # Panics
///
/// Panics if `slot` is shorter than `order.step()`.
pub fn encode_pixel(
    slot: &mut [u8],
    value: PixelValue,
    order: ByteOrder,
) -> Result<(), PixelBufError> {
    encode_pixel_scaled(slot, value, order, Brightness::FULL)
}

/// [`encode_pixel`] with the colour and white bytes it writes scaled by
/// `brightness`.
///
/// White inference looks at the unscaled value. Bytes the value does not
/// write keep their stored value, and the frame byte is never scaled.
///
/// # Errors
///
/// Same as [`check_value`]. Nothing is written on error.
///
/// # Panics
///
/// Panics if `slot` is shorter than `order.step()`.
pub fn encode_pixel_scaled(
    slot: &mut [u8],
    value: PixelValue,
    order: ByteOrder,
    brightness: Brightness,
) -> Result<(), PixelBufError> {
    check_value(&value, order)?;
    assert!(
        slot.len() >= order.step(),
        "slot of {} bytes is too short for {order:?}",
        slot.len()
    );
    let scale = |c: [u8; 3]| c.map(|v| brightness.scale(v));
    match value {
        PixelValue::Packed24(packed) => {
            let [r, g, b] = PixelValue::unpack(packed);
            if let Some(w) = order.w()
                && r == g
                && g == b
            {
                slot[w] = brightness.scale(r);
                write_rgb(slot, order, [0, 0, 0]);
            } else {
                write_rgb(slot, order, scale([r, g, b]));
            }
        }
        PixelValue::Channels3(rgb) => {
            write_rgb(slot, order, scale(rgb));
            if let Some(frame) = order.frame() {
                slot[frame] = FRAME_FULL;
            }
        }
        PixelValue::Channels4([r, g, b, w]) => {
            write_rgb(slot, order, scale([r, g, b]));
            if let Some(offset) = order.w() {
                slot[offset] = brightness.scale(w);
            }
        }
        PixelValue::ChannelsWithBrightness(rgb, level) => {
            write_rgb(slot, order, scale(rgb));
            if let Some(frame) = order.frame() {
                slot[frame] = frame_byte(level);
            }
        }
    }
    Ok(())
}

#[inline]
fn write_rgb(slot: &mut [u8], order: ByteOrder, [r, g, b]: [u8; 3]) {
    slot[order.r()] = r;
    slot[order.g()] = g;
    slot[order.b()] = b;
}

/// Read the colour channels of one slot. The frame byte is never returned.
///
/// # Panics
///
/// Panics if `slot` is shorter than `order.step()`.
pub fn decode_pixel(slot: &[u8], order: ByteOrder) -> Channels {
    let (r, g, b) = (slot[order.r()], slot[order.g()], slot[order.b()]);
    match order.w() {
        Some(w) => Channels::rgbw(r, g, b, slot[w]),
        None => Channels::rgb(r, g, b),
    }
}

/// Decode `count` consecutive slots spaced `step` bytes apart.
///
/// # Panics
///
/// Panics if `src` does not hold `count` slots.
pub fn decode_range(src: &[u8], count: usize, order: ByteOrder, step: usize) -> Vec<Channels> {
    (0..count)
        .map(|i| decode_pixel(&src[i * step..], order))
        .collect()
}
