//! Color space conversions over labelled channel sets.
//!
//! Byte channels live in `[0, 255]`, float channels in `[0, 1]`. CMYK, HSV and
//! LAB channels are floats. Alpha follows the encoding of the side it is on,
//! so a conversion between a byte space and a float space converts alpha once.

use serde::{Deserialize, Serialize};

use crate::convert::{Context, byte_to_hex, hex_to_byte};
use crate::error::{Error, Result};

/// Byte RGBA channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteRgba {
    pub r: i32,
    pub g: i32,
    pub b: i32,
    pub a: i32,
}

impl Default for ByteRgba {
    fn default() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        }
    }
}

impl ByteRgba {
    #[must_use]
    pub const fn new(r: i32, g: i32, b: i32, a: i32) -> Self {
        Self { r, g, b, a }
    }

    pub(crate) const fn channels(self) -> [i32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Normalized float RGBA channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for FloatRgba {
    fn default() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }
    }
}

/// Two-digit lowercase hex RGBA channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexRgba {
    pub r: String,
    pub g: String,
    pub b: String,
    pub a: String,
}

impl Default for HexRgba {
    fn default() -> Self {
        Self {
            r: "00".to_string(),
            g: "00".to_string(),
            b: "00".to_string(),
            a: "ff".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cmyka {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
    pub a: f64,
}

impl Default for Cmyka {
    fn default() -> Self {
        Self {
            c: 0.0,
            m: 0.0,
            y: 0.0,
            k: 0.0,
            a: 1.0,
        }
    }
}

/// Hue is a fraction of a full turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsva {
    pub h: f64,
    pub s: f64,
    pub v: f64,
    pub a: f64,
}

impl Default for Hsva {
    fn default() -> Self {
        Self {
            h: 0.0,
            s: 0.0,
            v: 0.0,
            a: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Laba {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

#[must_use]
pub fn rgb_to_float(ctx: Context, rgb: ByteRgba) -> FloatRgba {
    FloatRgba {
        r: ctx.byte_to_float(f64::from(rgb.r)),
        g: ctx.byte_to_float(f64::from(rgb.g)),
        b: ctx.byte_to_float(f64::from(rgb.b)),
        a: ctx.byte_to_float(f64::from(rgb.a)),
    }
}

#[must_use]
pub fn float_to_rgb(ctx: Context, float: FloatRgba) -> ByteRgba {
    ByteRgba {
        r: ctx.float_to_byte(float.r),
        g: ctx.float_to_byte(float.g),
        b: ctx.float_to_byte(float.b),
        a: ctx.float_to_byte(float.a),
    }
}

#[must_use]
pub fn rgb_to_hex(rgb: ByteRgba) -> HexRgba {
    HexRgba {
        r: byte_to_hex(rgb.r, 2),
        g: byte_to_hex(rgb.g, 2),
        b: byte_to_hex(rgb.b, 2),
        a: byte_to_hex(rgb.a, 2),
    }
}

pub fn hex_to_rgb(hex: &HexRgba) -> Result<ByteRgba> {
    Ok(ByteRgba {
        r: hex_to_byte(&hex.r)?,
        g: hex_to_byte(&hex.g)?,
        b: hex_to_byte(&hex.b)?,
        a: hex_to_byte(&hex.a)?,
    })
}

/// Subtractive to additive. Full key ignores `k` and scales by the inks alone.
#[must_use]
pub fn cmyk_to_rgb(ctx: Context, cmyk: Cmyka) -> ByteRgba {
    let channel = |ink: f64| {
        if cmyk.k < 1.0 {
            (255.0 * ((1.0 - ink) * (1.0 - cmyk.k))).trunc() as i32
        } else {
            (255.0 * (1.0 - ink)).trunc() as i32
        }
    };
    ByteRgba {
        r: channel(cmyk.c),
        g: channel(cmyk.m),
        b: channel(cmyk.y),
        a: ctx.float_to_byte(cmyk.a),
    }
}

#[must_use]
pub fn rgb_to_cmyk(ctx: Context, rgb: ByteRgba) -> Cmyka {
    let c = 1.0 - ctx.byte_to_float(f64::from(rgb.r));
    let m = 1.0 - ctx.byte_to_float(f64::from(rgb.g));
    let y = 1.0 - ctx.byte_to_float(f64::from(rgb.b));
    let k = [c, m, y].into_iter().fold(1.0, f64::min);
    let a = ctx.byte_to_float(f64::from(rgb.a));

    if k >= 1.0 {
        Cmyka {
            c: 0.0,
            m: 0.0,
            y: 0.0,
            k,
            a,
        }
    } else {
        Cmyka {
            c: (c - k) / (1.0 - k),
            m: (m - k) / (1.0 - k),
            y: (y - k) / (1.0 - k),
            k,
            a,
        }
    }
}

#[must_use]
pub fn hsv_to_rgb(ctx: Context, hsv: Hsva) -> ByteRgba {
    let Hsva { h, s, v, a } = hsv;
    let h = h * 6.0;
    let sextant = h.floor();
    let f = h - sextant;

    let m = v * (1.0 - s);
    let n = v * (1.0 - s * f);
    let k = v * (1.0 - s * (1.0 - f));

    // Sextant 6 is reached at h == 1 and wraps to sextant 0.
    let (r, g, b) = match (sextant as i64).rem_euclid(6) {
        0 => (v, k, m),
        1 => (n, v, m),
        2 => (m, v, k),
        3 => (m, n, v),
        4 => (k, m, v),
        _ => (v, m, n),
    };

    ByteRgba {
        r: ctx.float_to_byte(r),
        g: ctx.float_to_byte(g),
        b: ctx.float_to_byte(b),
        a: ctx.float_to_byte(a),
    }
}

#[must_use]
pub fn rgb_to_hsv(ctx: Context, rgb: ByteRgba) -> Hsva {
    let r = ctx.byte_to_float(f64::from(rgb.r));
    let g = ctx.byte_to_float(f64::from(rgb.g));
    let b = ctx.byte_to_float(f64::from(rgb.b));
    let a = ctx.byte_to_float(f64::from(rgb.a));

    let min = r.min(g).min(b);
    let max = r.max(g).max(b);
    let delta = max - min;

    if delta == 0.0 {
        return Hsva {
            h: 0.0,
            s: 0.0,
            v: max,
            a,
        };
    }

    let s = delta / max;
    let spread = |channel: f64| ((max - channel) / 6.0 + delta / 2.0) / delta;
    let (dr, dg, db) = (spread(r), spread(g), spread(b));

    let mut h = if r == max {
        db - dg
    } else if g == max {
        1.0 / 3.0 + dr - db
    } else {
        2.0 / 3.0 + dg - dr
    };
    if h < 0.0 {
        h += 1.0;
    }
    if h > 1.0 {
        h -= 1.0;
    }

    Hsva { h, s, v: max, a }
}

pub fn rgb_to_lab(_rgb: ByteRgba) -> Result<Laba> {
    Err(Error::not_implemented("LAB conversion (RGB -> LAB)"))
}

pub fn lab_to_rgb(_lab: Laba) -> Result<ByteRgba> {
    Err(Error::not_implemented("LAB conversion (LAB -> RGB)"))
}
