//! Byte-order aware pixel buffers for addressable LED strips.
//!
//! This crate turns a caller-owned byte buffer into a strip of pixels
//! (NeoPixel, DotStar and similar):
//!
//! - [`ByteOrder`] - static registry of channel layouts (`GRB`, `RGBW`, `ABGR`, …)
//! - [`PixelValue`] / [`Channels`] - what callers write and read
//! - [`PixelBuf`] - indexed and range access with brightness scaling
//! - [`codec`] - single-slot encode/decode, usable without a buffer
//! - [`brightness`] - global brightness scaling
//!
//! The buffer never allocates or resizes the memory it is given. The output
//! bytes are handed to a transport verbatim; transmission is out of scope.

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod brightness;
mod buffer;
mod byteorder;
pub mod codec;
mod error;
mod pixel;
mod wheel;

pub use brightness::Brightness;
pub use buffer::{PixelBuf, PixelBufConfig, PixelRange, RangeValues};
pub use byteorder::{ByteOrder, SlotLayout};
pub use error::{ErrorKind, PixelBufError};
pub use pixel::{Channels, PixelValue};
pub use wheel::wheel;

// Re-export for callers building values from `rgb` types.
pub use rgb;
pub use rgb::RGB8;
