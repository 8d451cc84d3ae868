//! Pure per-sample arithmetic.
//!
//! All functions here are pure and testable without any buffers or codecs.
//! Every result is saturated into `0..=255`; nothing wraps.

/// Default cut-off for [`to_binary`](super::color_space::to_binary).
pub const BINARY_THRESHOLD: u8 = 127;

// Rec.601 luma weights in 2.14 fixed point: 0.299, 0.587, 0.114.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Clamp an integer into the sample range.
pub fn saturate(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Round a float to the nearest integer and clamp it into the sample range.
///
/// NaN maps to 0.
pub fn saturate_f32(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

/// `clamp(sample + delta, 0, 255)`.
pub fn offset_sample(sample: u8, delta: i32) -> u8 {
    saturate(i32::from(sample) + delta)
}

/// `clamp(round(sample * gain), 0, 255)`.
pub fn scale_sample(sample: u8, gain: f32) -> u8 {
    saturate_f32(f32::from(sample) * gain)
}

/// Perceptual luma of an RGB triple, `0.299 R + 0.587 G + 0.114 B`, rounded.
///
/// Equal channels map to themselves, so reducing an already-gray pixel is a
/// no-op.
///
/// # Examples
/// ```
/// # use imgtweak::imaging::calculations::luma;
/// assert_eq!(luma(255, 255, 255), 255);
/// assert_eq!(luma(128, 128, 128), 128);
/// assert_eq!(luma(255, 0, 0), 76);
/// ```
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted =
        u32::from(r) * LUMA_R + u32::from(g) * LUMA_G + u32::from(b) * LUMA_B;
    ((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// `255` if `sample >= threshold`, else `0`.
pub fn threshold(sample: u8, threshold: u8) -> u8 {
    if sample >= threshold { 255 } else { 0 }
}

/// Map a contrast slider level to a multiplicative gain: `level / 127 + 1`.
///
/// The slider spans `-100..=100`, so the gain spans roughly `0.21..=1.79`.
pub fn gain_for_level(level: i32) -> f32 {
    level as f32 / 127.0 + 1.0
}
