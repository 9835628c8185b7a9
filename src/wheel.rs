//! Colour wheel helper for rainbow effects.

use rgb::RGB8;

/// Colour at position `pos` on a 256-step wheel.
///
/// The wheel runs red → green → blue → red. Positions wrap modulo 256;
/// negative positions wrap from the end.
pub fn wheel(pos: f32) -> RGB8 {
    let mut pos = pos % 256.0;
    if pos < 0.0 {
        pos += 256.0;
    }
    let ramp = |p: f32| (p * 3.0) as u8;
    let fall = |p: f32| (255.0 - p * 3.0) as u8;
    if pos < 85.0 {
        RGB8::new(fall(pos), ramp(pos), 0)
    } else if pos < 170.0 {
        let pos = pos - 85.0;
        RGB8::new(0, fall(pos), ramp(pos))
    } else {
        let pos = pos - 170.0;
        RGB8::new(ramp(pos), 0, fall(pos))
    }
}
