//! Resolve descriptors into colors.
//!
//! [`ColorFactory`] owns the rounding [`Context`] new colors are built in and
//! the random source used by the `random*` forms. Seed it with
//! [`ColorFactory::seeded`] for reproducible output.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::color::{Color, Number};
use crate::convert::Context;
use crate::descriptor::{Descriptor, Resolved};
use crate::error::{Error, Result};
use crate::parse::{self, TextForm};
use crate::sort::{SortKey, sort_colors};
use crate::space::{Cmyka, Hsva, Laba};

/// Deepest descriptor nesting [`ColorFactory::resolve`] follows, counting
/// quoted arguments of the text forms as well as list and map members.
pub const MAX_NESTING: usize = 32;

pub struct ColorFactory<R = ThreadRng> {
    ctx: Context,
    rng: R,
}

impl ColorFactory<ThreadRng> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_context(Context::default())
    }

    #[must_use]
    pub fn with_context(ctx: Context) -> Self {
        Self::with_rng(ctx, rand::rng())
    }
}

impl Default for ColorFactory<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorFactory<StdRng> {
    /// Deterministic random forms.
    #[must_use]
    pub fn seeded(ctx: Context, seed: u64) -> Self {
        Self::with_rng(ctx, StdRng::seed_from_u64(seed))
    }

    /// Seeded from the operating system.
    #[must_use]
    pub fn from_os_rng(ctx: Context) -> Self {
        Self::with_rng(ctx, StdRng::from_os_rng())
    }
}

impl<R: Rng> ColorFactory<R> {
    pub fn with_rng(ctx: Context, rng: R) -> Self {
        Self { ctx, rng }
    }

    pub fn context(&self) -> Context {
        self.ctx
    }

    /// Resolve any descriptor. Collections keep their shape.
    pub fn resolve(&mut self, descriptor: impl Into<Descriptor>) -> Result<Resolved> {
        self.resolve_nested(descriptor.into(), 0)
    }

    fn resolve_nested(&mut self, descriptor: Descriptor, depth: usize) -> Result<Resolved> {
        if depth > MAX_NESTING {
            return Err(Error::malformed(format!(
                "nesting too deep (more than {MAX_NESTING} levels)"
            )));
        }
        let ctx = self.ctx;
        match descriptor {
            Descriptor::Color(color) => Ok(Resolved::Color(color)),
            Descriptor::Number(Number::Float(v)) => {
                Ok(Resolved::Color(Color::from_float(ctx, v, v, v, v)))
            }
            Descriptor::Number(Number::Int(v)) => {
                let v = v as f64;
                Ok(Resolved::Color(Color::from_rgb(ctx, v, v, v, 255.0)))
            }
            Descriptor::Text(text) => self.parse_nested(&text, depth).map(Resolved::Color),
            Descriptor::Map(entries) => self.resolve_map(entries, depth),
            Descriptor::List(items) => {
                if items.is_empty() {
                    return Err(Error::malformed("an empty list does not describe a color"));
                }
                items
                    .into_iter()
                    .map(|item| self.resolve_nested(item, depth + 1))
                    .collect::<Result<Vec<_>>>()
                    .map(Resolved::List)
            }
        }
    }

    /// Resolve a descriptor that must describe exactly one color.
    pub fn color(&mut self, descriptor: impl Into<Descriptor>) -> Result<Color> {
        self.resolve(descriptor)?.into_color()
    }

    fn color_nested(&mut self, text: String, depth: usize) -> Result<Color> {
        self.resolve_nested(Descriptor::Text(text), depth)?.into_color()
    }

    fn resolve_map(
        &mut self,
        entries: BTreeMap<String, Descriptor>,
        depth: usize,
    ) -> Result<Resolved> {
        if entries.is_empty() {
            return Err(Error::malformed("an empty map does not describe a color"));
        }
        let ctx = self.ctx;
        let has = |keys: &[&str]| keys.iter().all(|key| entries.contains_key(*key));

        if has(&["r", "g", "b"]) {
            let [r, g, b] = channels(&entries, ["r", "g", "b"])?;
            let a = optional_channel(&entries, "a")?.unwrap_or(255.0);
            tracing::debug!(space = "rgb", "resolved labelled map");
            return Ok(Resolved::Color(Color::from_rgb(ctx, r, g, b, a)));
        }
        if has(&["c", "m", "y", "k"]) {
            let [c, m, y, k] = channels(&entries, ["c", "m", "y", "k"])?;
            let a = optional_channel(&entries, "a")?.unwrap_or(1.0);
            tracing::debug!(space = "cmyk", "resolved labelled map");
            return Ok(Resolved::Color(Color::from_cmyk(
                ctx,
                Cmyka { c, m, y, k, a },
            )));
        }
        if has(&["h", "s", "v"]) {
            let [h, s, v] = channels(&entries, ["h", "s", "v"])?;
            let a = optional_channel(&entries, "a")?.unwrap_or(1.0);
            tracing::debug!(space = "hsv", "resolved labelled map");
            return Ok(Resolved::Color(Color::from_hsv(ctx, Hsva { h, s, v, a })));
        }
        if has(&["l", "a", "b"]) {
            let [l, a, b] = channels(&entries, ["l", "a", "b"])?;
            return Color::from_lab(ctx, Laba { l, a, b }).map(Resolved::Color);
        }

        entries
            .into_iter()
            .map(|(key, value)| Ok((key, self.resolve_nested(value, depth + 1)?)))
            .collect::<Result<BTreeMap<_, _>>>()
            .map(Resolved::Map)
    }

    /// Parse color text. See [`crate::parse`] for the accepted forms.
    pub fn parse(&mut self, text: &str) -> Result<Color> {
        self.parse_nested(text, 0)
    }

    fn parse_nested(&mut self, text: &str, depth: usize) -> Result<Color> {
        let ctx = self.ctx;
        let form = parse::classify(text)?;
        tracing::debug!(?form, "classified color text");

        let pct = |p: f64| 255.0 * (p / 100.0);
        match form {
            TextForm::Hex(hex) => Color::from_hex(ctx, &hex),
            TextForm::RgbPercent([r, g, b]) => {
                Ok(Color::from_rgb(ctx, pct(r), pct(g), pct(b), 255.0))
            }
            TextForm::Rgb([r, g, b]) => Ok(Color::from_rgb(ctx, r, g, b, 255.0)),
            TextForm::RgbaPercent([r, g, b, a]) => {
                Ok(Color::from_rgb(ctx, pct(r), pct(g), pct(b), pct(a)))
            }
            TextForm::Rgba([r, g, b, a]) => Ok(Color::from_rgb(ctx, r, g, b, a)),
            TextForm::Cmyk([c, m, y, k]) => Ok(Color::from_cmyk(
                ctx,
                Cmyka { c, m, y, k, a: 1.0 },
            )),
            TextForm::CmykPercent([c, m, y, k]) => Ok(Color::from_cmyk(
                ctx,
                Cmyka {
                    c: c / 100.0,
                    m: m / 100.0,
                    y: y / 100.0,
                    k: k / 100.0,
                    a: 1.0,
                },
            )),
            TextForm::Float([r, g, b]) => Ok(Color::from_float(ctx, r, g, b, 1.0)),
            TextForm::FloatAlpha([r, g, b, a]) => Ok(Color::from_float(ctx, r, g, b, a)),
            TextForm::Hsv([h, s, v]) => Ok(Color::from_hsv(ctx, Hsva { h, s, v, a: 1.0 })),
            TextForm::Lab([l, a, b]) => Color::from_lab(ctx, Laba { l, a, b }),
            TextForm::RandomBetween(min, max) => {
                let min = self.color_nested(min, depth + 1)?;
                let max = self.color_nested(max, depth + 1)?;
                Ok(self.random_between(&min, &max))
            }
            TextForm::RandomVar(mean, variance) => {
                let mean = self.color_nested(mean, depth + 1)?;
                let variance = self.color_nested(variance, depth + 1)?;
                Ok(self.random_var(&mean, &variance))
            }
            TextForm::RandomVal(color) => {
                let color = self.color_nested(color, depth + 1)?;
                Ok(self.random_val(&color))
            }
            TextForm::RandomSat(color) => {
                let color = self.color_nested(color, depth + 1)?;
                Ok(self.random_sat(&color))
            }
            TextForm::RandomFull => Ok(self.random_full()),
            TextForm::Val(color, value) => {
                let color = self.color_nested(color, depth + 1)?;
                let value: f64 = value
                    .parse()
                    .map_err(|_| Error::malformed(format!("val expects a number, got {value:?}")))?;
                Ok(Color::from_val(&color, value))
            }
            TextForm::Random => Ok(self.random()),
        }
    }

    // ── random constructors ──

    fn draw(&mut self, a: i32, b: i32) -> f64 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        f64::from(self.rng.random_range(lo..=hi))
    }

    fn draw_unit(&mut self) -> f64 {
        f64::from(self.rng.random_range(0..=1000)) / 1000.0
    }

    /// Uniform random byte channels, opaque.
    pub fn random(&mut self) -> Color {
        let r = self.draw(0, 255);
        let g = self.draw(0, 255);
        let b = self.draw(0, 255);
        Color::from_rgb(self.ctx, r, g, b, 255.0)
    }

    /// Each byte channel, alpha included, drawn between the two colors.
    /// Bounds given in the wrong order are swapped.
    pub fn random_between(&mut self, min: &Color, max: &Color) -> Color {
        let (lo, hi) = (min.to_rgb().channels(), max.to_rgb().channels());
        let [r, g, b, a] = [0, 1, 2, 3].map(|i| self.draw(lo[i], hi[i]));
        Color::from_rgb(self.ctx, r, g, b, a)
    }

    /// With no minimum the color is fully random. A minimum without a maximum
    /// is rejected.
    pub fn random_bounds(&mut self, min: Option<&Color>, max: Option<&Color>) -> Result<Color> {
        match (min, max) {
            (None, _) => Ok(self.random()),
            (Some(min), Some(max)) => Ok(self.random_between(min, max)),
            (Some(_), None) => Err(Error::malformed(
                "random needs a maximum color when a minimum is given",
            )),
        }
    }

    /// Each byte channel drawn within `mean ± variance`.
    pub fn random_var(&mut self, mean: &Color, variance: &Color) -> Color {
        let (mean, variance) = (mean.to_rgb().channels(), variance.to_rgb().channels());
        let [r, g, b, a] =
            [0, 1, 2, 3].map(|i| self.draw(mean[i] - variance[i], mean[i] + variance[i]));
        Color::from_rgb(self.ctx, r, g, b, a)
    }

    /// `color` with a random HSV value.
    pub fn random_val(&mut self, color: &Color) -> Color {
        let mut hsv = color.to_hsv();
        hsv.v = self.draw_unit();
        Color::from_hsv(self.ctx, hsv)
    }

    /// `color` with a random saturation.
    pub fn random_sat(&mut self, color: &Color) -> Color {
        let mut hsv = color.to_hsv();
        hsv.s = self.draw_unit();
        Color::from_hsv(self.ctx, hsv)
    }

    /// A random hue at full saturation and brightness.
    pub fn random_full(&mut self) -> Color {
        let mut color = self.random();
        color.set_brightness(1.0).set_saturation(1.0);
        color
    }

    // ── comparison over descriptors ──

    pub fn equals(
        &mut self,
        a: impl Into<Descriptor>,
        b: impl Into<Descriptor>,
    ) -> Result<bool> {
        Ok(self.color(a)? == self.color(b)?)
    }

    pub fn compare(
        &mut self,
        a: impl Into<Descriptor>,
        b: impl Into<Descriptor>,
        key: SortKey,
    ) -> Result<Ordering> {
        let a = self.color(a)?;
        let b = self.color(b)?;
        Ok(key.compare(&a, &b))
    }

    /// Resolve every item to a single color, then sort by `key`.
    pub fn sort<I>(&mut self, items: I, key: SortKey) -> Result<Vec<Color>>
    where
        I: IntoIterator,
        I::Item: Into<Descriptor>,
    {
        let mut colors = items
            .into_iter()
            .map(|item| self.color(item))
            .collect::<Result<Vec<_>>>()?;
        sort_colors(&mut colors, key);
        Ok(colors)
    }
}

fn channel(entries: &BTreeMap<String, Descriptor>, key: &str) -> Result<f64> {
    let value = &entries[key];
    value.coerce_float().ok_or_else(|| {
        Error::malformed(format!(
            "channel {key:?} must be numeric, got {}",
            value.variant_name()
        ))
    })
}

fn channels<const N: usize>(
    entries: &BTreeMap<String, Descriptor>,
    keys: [&str; N],
) -> Result<[f64; N]> {
    let mut out = [0.0; N];
    for (slot, key) in out.iter_mut().zip(keys) {
        *slot = channel(entries, key)?;
    }
    Ok(out)
}

fn optional_channel(entries: &BTreeMap<String, Descriptor>, key: &str) -> Result<Option<f64>> {
    if entries.contains_key(key) {
        channel(entries, key).map(Some)
    } else {
        Ok(None)
    }
}
