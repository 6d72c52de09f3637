//! The color value: four float channels plus the context they were built in.
//!
//! Channels are stored unclamped so arithmetic can overshoot and come back.
//! Every derived view (bytes, hex, HSV, CMYK) reads the clamped channels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::convert::{Context, normalize_hue};
use crate::error::{Error, Result};
use crate::format::Template;
use crate::space::{
    self, ByteRgba, Cmyka, FloatRgba, HexRgba, Hsva, Laba, cmyk_to_rgb, float_to_rgb, hsv_to_rgb,
    lab_to_rgb, rgb_to_cmyk, rgb_to_float, rgb_to_hex, rgb_to_hsv, rgb_to_lab,
};

/// A scalar whose kind matters: floats are normalized, integers are bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Float(f64),
    Int(i64),
}

impl Number {
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Float(v) => v,
            Self::Int(v) => v as f64,
        }
    }

    #[must_use]
    pub fn kind(self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Int(_) => "integer",
        }
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

/// Recoverable condition raised while building a color from components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionWarning {
    /// Integer channels were read as bytes and converted to floats.
    ByteChannels,
}

impl fmt::Display for ConstructionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByteChannels => {
                f.write_str("input format should be float; got integers, converted from bytes")
            }
        }
    }
}

/// A color together with any warning raised while it was built.
#[derive(Debug, Clone)]
pub struct Constructed {
    pub color: Color,
    pub warning: Option<ConstructionWarning>,
}

/// Tuning for [`Color::contrast_color`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastOptions {
    /// Saturation of the produced color
    pub saturation: f64,
    /// Brightness used when the source is light
    pub min_brightness: f64,
    /// Added to the source hue
    pub hue_offset: f64,
    /// Brightness difference below which the result falls back to black or white
    pub limit: f64,
}

impl Default for ContrastOptions {
    fn default() -> Self {
        Self {
            saturation: 0.0,
            min_brightness: 0.0,
            hue_offset: 0.0,
            limit: 140.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
    #[serde(skip)]
    ctx: Context,
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

/// Equal when every clamped channel matches.
impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.to_float() == other.to_float()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "#{}{}{}", hex.r, hex.g, hex.b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::from_rgb(Context::default(), r.into(), g.into(), b.into(), 255.0)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::from_rgb(Context::default(), r.into(), g.into(), b.into(), a.into())
    }
}

impl Color {
    // ── construction ──

    /// Float channels in the default context.
    #[must_use]
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a,
            ctx: Context::default(),
        }
    }

    #[must_use]
    pub fn from_float(ctx: Context, r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a, ctx }
    }

    /// Byte-scale channels. Fractional bytes are allowed.
    #[must_use]
    pub fn from_rgb(ctx: Context, r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::from_float(
            ctx,
            ctx.byte_to_float(r),
            ctx.byte_to_float(g),
            ctx.byte_to_float(b),
            ctx.byte_to_float(a),
        )
    }

    fn from_bytes(ctx: Context, rgb: ByteRgba) -> Self {
        let float = rgb_to_float(ctx, rgb);
        Self::from_float(ctx, float.r, float.g, float.b, float.a)
    }

    /// `#rgb`, `#rrggbb` or either without the `#`. Alpha is opaque.
    pub fn from_hex(ctx: Context, text: &str) -> Result<Self> {
        let digits: Vec<char> = text
            .chars()
            .filter(|c| *c != ' ' && *c != '#')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let pairs: [String; 3] = match digits.as_slice() {
            [r, g, b] => [
                [*r, *r].iter().collect(),
                [*g, *g].iter().collect(),
                [*b, *b].iter().collect(),
            ],
            [r1, r2, g1, g2, b1, b2] => [
                [*r1, *r2].iter().collect(),
                [*g1, *g2].iter().collect(),
                [*b1, *b2].iter().collect(),
            ],
            _ => {
                return Err(Error::malformed(format!(
                    "Hex format must be 6 or 3 hexadecimal characters. Expected format XXX or XXXXXX. Got: {text}"
                )));
            }
        };
        let [r, g, b] = pairs;
        let rgb = space::hex_to_rgb(&HexRgba {
            r,
            g,
            b,
            a: "ff".to_string(),
        })?;
        Ok(Self::from_bytes(ctx, rgb))
    }

    #[must_use]
    pub fn from_cmyk(ctx: Context, cmyk: Cmyka) -> Self {
        Self::from_bytes(ctx, cmyk_to_rgb(ctx, cmyk))
    }

    #[must_use]
    pub fn from_hsv(ctx: Context, hsv: Hsva) -> Self {
        Self::from_bytes(ctx, hsv_to_rgb(ctx, hsv))
    }

    pub fn from_lab(ctx: Context, lab: Laba) -> Result<Self> {
        Ok(Self::from_bytes(ctx, lab_to_rgb(lab)?))
    }

    /// `color` with its HSV value replaced.
    #[must_use]
    pub fn from_val(color: &Self, value: f64) -> Self {
        let mut hsv = color.to_hsv();
        hsv.v = value;
        Self::from_hsv(color.ctx, hsv)
    }

    /// Build from four channels that must share one numeric kind.
    ///
    /// Floats are taken as-is. Integers are read as bytes and the result
    /// carries [`ConstructionWarning::ByteChannels`]. Mixed kinds are rejected.
    pub fn from_components(ctx: Context, channels: [Number; 4]) -> Result<Constructed> {
        match channels {
            [
                Number::Float(r),
                Number::Float(g),
                Number::Float(b),
                Number::Float(a),
            ] => Ok(Constructed {
                color: Self::from_float(ctx, r, g, b, a),
                warning: None,
            }),
            [Number::Int(r), Number::Int(g), Number::Int(b), Number::Int(a)] => {
                tracing::warn!(
                    r,
                    g,
                    b,
                    a,
                    "input format should be float; converting integer channels from bytes"
                );
                Ok(Constructed {
                    color: Self::from_rgb(ctx, r as f64, g as f64, b as f64, a as f64),
                    warning: Some(ConstructionWarning::ByteChannels),
                })
            }
            mixed => {
                let kinds: Vec<&str> = mixed.iter().map(|n| n.kind()).collect();
                Err(Error::malformed(format!(
                    "Input format should be float. Got mixed channel kinds: {}",
                    kinds.join(", ")
                )))
            }
        }
    }

    /// Rebind this color to another rounding context.
    #[must_use]
    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    #[must_use]
    pub fn context(&self) -> Context {
        self.ctx
    }

    // ── channels ──

    #[must_use]
    pub fn r(&self) -> f64 {
        self.r.clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn g(&self) -> f64 {
        self.g.clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn b(&self) -> f64 {
        self.b.clamp(0.0, 1.0)
    }

    /// Alpha is only bounded above.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.a.min(1.0)
    }

    #[must_use]
    pub fn r_raw(&self) -> f64 {
        self.r
    }

    #[must_use]
    pub fn g_raw(&self) -> f64 {
        self.g
    }

    #[must_use]
    pub fn b_raw(&self) -> f64 {
        self.b
    }

    #[must_use]
    pub fn a_raw(&self) -> f64 {
        self.a
    }

    pub fn set_r(&mut self, r: f64) -> &mut Self {
        self.r = r;
        self
    }

    pub fn set_g(&mut self, g: f64) -> &mut Self {
        self.g = g;
        self
    }

    pub fn set_b(&mut self, b: f64) -> &mut Self {
        self.b = b;
        self
    }

    pub fn set_a(&mut self, a: f64) -> &mut Self {
        self.a = a;
        self
    }

    pub fn set_float(&mut self, float: FloatRgba) -> &mut Self {
        self.r = float.r;
        self.g = float.g;
        self.b = float.b;
        self.a = float.a;
        self
    }

    pub fn set_rgb(&mut self, rgb: ByteRgba) -> &mut Self {
        self.set_float(rgb_to_float(self.ctx, rgb))
    }

    pub fn set_hsv(&mut self, hsv: Hsva) -> &mut Self {
        self.set_rgb(hsv_to_rgb(self.ctx, hsv))
    }

    // ── views ──

    #[must_use]
    pub fn to_float(&self) -> FloatRgba {
        FloatRgba {
            r: self.r(),
            g: self.g(),
            b: self.b(),
            a: self.a(),
        }
    }

    #[must_use]
    pub fn to_rgb(&self) -> ByteRgba {
        float_to_rgb(self.ctx, self.to_float())
    }

    #[must_use]
    pub fn to_hex(&self) -> HexRgba {
        rgb_to_hex(self.to_rgb())
    }

    #[must_use]
    pub fn to_hsv(&self) -> Hsva {
        rgb_to_hsv(self.ctx, self.to_rgb())
    }

    #[must_use]
    pub fn to_cmyk(&self) -> Cmyka {
        rgb_to_cmyk(self.ctx, self.to_rgb())
    }

    pub fn to_lab(&self) -> Result<Laba> {
        rgb_to_lab(self.to_rgb())
    }

    /// Render through a template of format codes, e.g. `rgb(RR, GR, BR)`.
    pub fn render(&self, template: &str) -> Result<String> {
        Template::parse(template).render(self)
    }

    // ── arithmetic ──

    fn zip_raw(&mut self, other: &Self, op: impl Fn(f64, f64) -> f64) -> &mut Self {
        self.r = op(self.r, other.r);
        self.g = op(self.g, other.g);
        self.b = op(self.b, other.b);
        self.a = op(self.a, other.a);
        self
    }

    pub fn add_color(&mut self, other: &Self) -> &mut Self {
        self.zip_raw(other, |x, y| x + y)
    }

    pub fn subtract_color(&mut self, other: &Self) -> &mut Self {
        self.zip_raw(other, |x, y| x - y)
    }

    pub fn multiply_color(&mut self, other: &Self) -> &mut Self {
        self.zip_raw(other, |x, y| x * y)
    }

    /// A zero divisor channel yields `1.0` for that channel.
    pub fn divide_color(&mut self, other: &Self) -> &mut Self {
        self.zip_raw(other, |x, y| if y == 0.0 { 1.0 } else { x / y })
    }

    /// Dot product of the clamped r, g, b channels.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.r() * other.r() + self.g() * other.g() + self.b() * other.b()
    }

    /// Cross product of the clamped r, g, b channels. Alpha resets to opaque.
    pub fn cross(&mut self, other: &Self) -> &mut Self {
        let (r, g, b) = (self.r(), self.g(), self.b());
        self.set_float(FloatRgba {
            r: g * other.b() - b * other.g(),
            g: b * other.r() - r * other.b(),
            b: r * other.g() - g * other.r(),
            a: 1.0,
        })
    }

    /// Midpoint with `other`, alpha included.
    pub fn average(&mut self, other: &Self) -> &mut Self {
        let two = Self::from_float(self.ctx, 2.0, 2.0, 2.0, 2.0);
        self.add_color(other).divide_color(&two)
    }

    /// Add every peer, then divide by the number of peers.
    /// An empty slice leaves the color unchanged.
    pub fn average_all(&mut self, peers: &[Self]) -> &mut Self {
        if peers.is_empty() {
            return self;
        }
        for peer in peers {
            self.add_color(peer);
        }
        let n = peers.len() as f64;
        self.divide_color(&Self::from_float(self.ctx, n, n, n, n))
    }

    /// Componentwise mean of `colors`, in the context of the first one.
    #[must_use]
    pub fn mean(colors: &[Self]) -> Option<Self> {
        let ctx = colors.first()?.ctx;
        let mut acc = Self::from_float(ctx, 0.0, 0.0, 0.0, 0.0);
        acc.average_all(colors);
        Some(acc)
    }

    pub fn inverse(&mut self) -> &mut Self {
        self.set_float(FloatRgba {
            r: 1.0 - self.r(),
            g: 1.0 - self.g(),
            b: 1.0 - self.b(),
            a: 1.0 - self.a(),
        })
    }

    pub fn inverse_hue(&mut self) -> &mut Self {
        let hue = self.hue();
        self.set_hue(hue + 0.5)
    }

    // ── HSV adjustments ──

    fn adjust_hsv(&mut self, adjust: impl FnOnce(&mut Hsva)) -> &mut Self {
        let mut hsv = self.to_hsv();
        adjust(&mut hsv);
        self.set_hsv(hsv)
    }

    #[must_use]
    pub fn hue(&self) -> f64 {
        self.to_hsv().h
    }

    #[must_use]
    pub fn saturation(&self) -> f64 {
        self.to_hsv().s
    }

    #[must_use]
    pub fn brightness(&self) -> f64 {
        self.to_hsv().v
    }

    pub fn set_hue(&mut self, hue: f64) -> &mut Self {
        self.adjust_hsv(|hsv| hsv.h = normalize_hue(hue))
    }

    pub fn set_saturation(&mut self, saturation: f64) -> &mut Self {
        self.adjust_hsv(|hsv| hsv.s = saturation)
    }

    pub fn set_brightness(&mut self, brightness: f64) -> &mut Self {
        self.adjust_hsv(|hsv| hsv.v = brightness)
    }

    pub fn set_min_brightness(&mut self, floor: f64) -> &mut Self {
        self.adjust_hsv(|hsv| hsv.v = hsv.v.max(floor))
    }

    pub fn set_max_brightness(&mut self, ceiling: f64) -> &mut Self {
        self.adjust_hsv(|hsv| hsv.v = hsv.v.min(ceiling))
    }

    pub fn set_min_saturation(&mut self, floor: f64) -> &mut Self {
        self.adjust_hsv(|hsv| hsv.s = hsv.s.max(floor))
    }

    pub fn set_max_saturation(&mut self, ceiling: f64) -> &mut Self {
        self.adjust_hsv(|hsv| hsv.s = hsv.s.min(ceiling))
    }

    // ── derived colors ──

    /// Weighted gray of this color, opaque. Leaves `self` untouched.
    #[must_use]
    pub fn gray_color(&self, wr: f64, wg: f64, wb: f64) -> Self {
        let v = (wr * self.r() + wg * self.g() + wb * self.b()) / (wr + wg + wb);
        Self::from_float(self.ctx, v, v, v, 1.0)
    }

    /// A color readable on top of this one. Leaves `self` untouched.
    ///
    /// Starts from the luma gray, applies the requested saturation and hue
    /// offset, then pushes brightness away from the source. When the result
    /// still falls under `limit`, or the source is gray, saturation drops to
    /// zero so the answer is plain black or white.
    #[must_use]
    pub fn contrast_color(&self, options: ContrastOptions) -> Self {
        let mut color = self.gray_color(299.0, 587.0, 114.0);
        color.set_saturation(options.saturation);
        color.set_hue(options.hue_offset + self.hue());

        if color.brightness() > 0.5 {
            color.set_brightness(options.min_brightness);
            if self.contrast(&color) < options.limit {
                color.set_brightness(0.0);
            }
        } else {
            color.set_brightness(1.0);
        }

        if self.contrast(&color) < options.limit || self.is_gray() {
            color.set_saturation(0.0);
        }
        color
    }

    // ── metrics ──

    /// Euclidean length of the clamped r, g, b vector.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.r().powi(2) + self.g().powi(2) + self.b().powi(2)).sqrt()
    }

    /// Length weighted 299/587/114 per channel.
    #[must_use]
    pub fn weight_length(&self) -> f64 {
        (299.0 * self.r().powi(2) + 587.0 * self.g().powi(2) + 114.0 * self.b().powi(2)).sqrt()
    }

    #[must_use]
    pub fn is_gray(&self) -> bool {
        self.r() == self.g() && self.g() == self.b()
    }

    /// Absolute difference of the per-mille luma of both colors, in bytes.
    #[must_use]
    pub fn brightness_difference(&self, other: &Self) -> f64 {
        let luma = |rgb: ByteRgba| {
            (299.0 * f64::from(rgb.r) + 587.0 * f64::from(rgb.g) + 114.0 * f64::from(rgb.b))
                / 1000.0
        };
        (luma(other.to_rgb()) - luma(self.to_rgb())).abs()
    }

    /// Same as [`Color::brightness_difference`].
    #[must_use]
    pub fn contrast(&self, other: &Self) -> f64 {
        self.brightness_difference(other)
    }

    /// Ratio of relative luminances, lighter over darker. Always `>= 1`.
    #[must_use]
    pub fn luminosity_difference(&self, other: &Self) -> f64 {
        let luminance = |rgb: ByteRgba| {
            let lin = |c: i32| (f64::from(c) / 255.0).powf(2.2);
            0.2126 * lin(rgb.r) + 0.7152 * lin(rgb.g) + 0.0722 * lin(rgb.b)
        };
        let l1 = luminance(other.to_rgb());
        let l2 = luminance(self.to_rgb());
        if l1 > l2 {
            (l1 + 0.05) / (l2 + 0.05)
        } else {
            (l2 + 0.05) / (l1 + 0.05)
        }
    }

    /// Sum over r, g, b of the byte distance between both colors.
    #[must_use]
    pub fn color_difference(&self, other: &Self) -> i32 {
        let (c1, c2) = (other.to_rgb(), self.to_rgb());
        (c1.r - c2.r).abs() + (c1.g - c2.g).abs() + (c1.b - c2.b).abs()
    }
}
