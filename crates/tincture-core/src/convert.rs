//! Scalar conversions between the float, byte and hex channel encodings.
//!
//! Every conversion that rounds goes through a [`Context`], which carries the
//! number of decimal digits kept when a byte is turned into a float. Values
//! built under different contexts never share state.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Decimal digits kept by [`Context::byte_to_float`] unless configured otherwise.
pub const DEFAULT_PRECISION: u32 = 4;

/// Smallest precision accepted from configuration. Coarser contexts cannot
/// hold every byte, so their float-to-byte conversion is plain truncation.
pub const MIN_PRECISION: u32 = 3;

/// Largest precision accepted from configuration.
pub const MAX_PRECISION: u32 = 15;

/// Rounding context threaded through every precision-sensitive conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context {
    /// Decimal digits kept when converting bytes to floats
    pub precision: u32,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Context {
    #[must_use]
    pub const fn new(precision: u32) -> Self {
        Self { precision }
    }

    /// Bytes converted to floats drift by at most half a unit in the last kept
    /// digit; scaled back to byte space that drift must not cross an integer.
    /// Below [`MIN_PRECISION`] the drift exceeds a byte and is not absorbed.
    fn byte_tolerance(self) -> f64 {
        if self.precision < MIN_PRECISION {
            return 1e-9;
        }
        0.5 * 10f64.powi(-(self.precision as i32)) * 255.0 + 1e-9
    }

    /// `f * 255` truncated toward zero.
    #[must_use]
    pub fn float_to_byte(self, f: f64) -> i32 {
        let scaled = f * 255.0;
        (scaled + self.byte_tolerance().copysign(scaled)).trunc() as i32
    }

    /// `b / 255` rounded to the context precision.
    #[must_use]
    pub fn byte_to_float(self, b: f64) -> f64 {
        self.round(b / 255.0)
    }

    /// Round half away from zero to the context precision.
    #[must_use]
    pub fn round(self, value: f64) -> f64 {
        let factor = 10f64.powi(self.precision as i32);
        (value * factor).round() / factor
    }

    #[must_use]
    pub fn float_to_hex(self, f: f64) -> String {
        byte_to_hex(self.float_to_byte(f), 2)
    }

    pub fn hex_to_float(self, hex: &str) -> Result<f64> {
        Ok(self.byte_to_float(f64::from(hex_to_byte(hex)?)))
    }
}

/// Fold a hue into the unit turn.
///
/// Values above one lose their integer part. Negative values are reflected
/// once through `1 - |x|`, so inputs at or below `-1` are not fully folded.
#[must_use]
pub fn normalize_hue(x: f64) -> f64 {
    if (0.0..=1.0).contains(&x) {
        x
    } else if x > 1.0 {
        x - x.trunc()
    } else {
        normalize_hue(1.0 - x.abs())
    }
}

/// Lowercase hex, zero padded to `width`. Negative bytes render as zero.
#[must_use]
pub fn byte_to_hex(b: i32, width: usize) -> String {
    format!("{:0width$x}", b.max(0), width = width)
}

pub fn hex_to_byte(hex: &str) -> Result<i32> {
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::malformed(format!("invalid hexadecimal channel: {hex:?}")));
    }
    i32::from_str_radix(hex, 16)
        .map_err(|_| Error::malformed(format!("invalid hexadecimal channel: {hex}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── hue ──

    #[test]
    fn hue_in_range_is_unchanged() {
        assert_eq!(normalize_hue(0.0), 0.0);
        assert_eq!(normalize_hue(0.25), 0.25);
        assert_eq!(normalize_hue(1.0), 1.0);
    }

    #[test]
    fn hue_above_one_drops_integer_part() {
        assert!((normalize_hue(1.25) - 0.25).abs() < 1e-12);
        assert!((normalize_hue(3.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn hue_below_zero_reflects() {
        assert!((normalize_hue(-0.25) - 0.75).abs() < 1e-12);
        // -1.5 -> 1 - 1.5 = -0.5 -> 1 - 0.5
        assert!((normalize_hue(-1.5) - 0.5).abs() < 1e-12);
    }

    // ── bytes ──

    #[test]
    fn byte_to_float_rounds_to_precision() {
        let ctx = Context::default();
        assert_eq!(ctx.byte_to_float(170.0), 0.6667);
        assert_eq!(ctx.byte_to_float(255.0), 1.0);
        assert_eq!(ctx.byte_to_float(0.0), 0.0);
        assert_eq!(Context::new(2).byte_to_float(170.0), 0.67);
    }

    #[test]
    fn float_to_byte_truncates() {
        let ctx = Context::default();
        assert_eq!(ctx.float_to_byte(1.0), 255);
        assert_eq!(ctx.float_to_byte(0.5), 127);
        assert_eq!(ctx.float_to_byte(0.0), 0);
        assert_eq!(ctx.float_to_byte(0.999), 254);
    }

    #[test]
    fn caller_floats_truncate_at_every_precision() {
        for precision in 0..=MAX_PRECISION {
            let ctx = Context::new(precision);
            assert_eq!(ctx.float_to_byte(0.5), 127, "precision {precision}");
            assert_eq!(ctx.float_to_byte(0.01), 2, "precision {precision}");
            assert_eq!(ctx.float_to_byte(1.0), 255, "precision {precision}");
        }
    }

    #[test]
    fn every_byte_survives_float_round_trip() {
        let ctx = Context::default();
        for b in 0..=255 {
            assert_eq!(ctx.float_to_byte(ctx.byte_to_float(f64::from(b))), b, "byte {b}");
        }
    }

    #[test]
    fn negative_floats_truncate_toward_zero() {
        let ctx = Context::default();
        assert_eq!(ctx.float_to_byte(-0.5), -127);
    }

    // ── hex ──

    #[test]
    fn byte_to_hex_pads_and_lowercases() {
        assert_eq!(byte_to_hex(10, 2), "0a");
        assert_eq!(byte_to_hex(255, 2), "ff");
        assert_eq!(byte_to_hex(5, 4), "0005");
        assert_eq!(byte_to_hex(-3, 2), "00");
    }

    #[test]
    fn hex_to_byte_accepts_either_case() {
        assert_eq!(hex_to_byte("ff").unwrap(), 255);
        assert_eq!(hex_to_byte("AB").unwrap(), 171);
        assert!(matches!(hex_to_byte("zz"), Err(Error::MalformedFormat(_))));
        assert!(hex_to_byte("").is_err());
    }

    #[test]
    fn float_hex_compositions() {
        let ctx = Context::default();
        assert_eq!(ctx.float_to_hex(1.0), "ff");
        assert_eq!(ctx.hex_to_float("aa").unwrap(), 0.6667);
    }
}
