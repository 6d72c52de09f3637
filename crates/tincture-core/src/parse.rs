//! The text grammar.
//!
//! Input is normalized (whitespace removed, runs of surrounding quotes
//! trimmed) and then tried against an ordered table of anchored patterns. The
//! first pattern that matches decides the form; later patterns are never
//! consulted. Function names accept the spellings listed in each pattern
//! only, so `Rgb(...)` is not a color while `rgb(...)` and `RGB(...)` are.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Error, Result};

/// A recognized text form with its arguments extracted.
///
/// Quoted arguments of the random and value forms are themselves color
/// descriptors and are kept as text for the factory to resolve.
#[derive(Debug, Clone, PartialEq)]
pub enum TextForm {
    Hex(String),
    /// Percentages of full scale
    RgbPercent([f64; 3]),
    /// Byte values
    Rgb([f64; 3]),
    RgbaPercent([f64; 4]),
    Rgba([f64; 4]),
    Cmyk([f64; 4]),
    CmykPercent([f64; 4]),
    Float([f64; 3]),
    FloatAlpha([f64; 4]),
    Hsv([f64; 3]),
    Lab([f64; 3]),
    RandomBetween(String, String),
    RandomVar(String, String),
    RandomVal(String),
    RandomSat(String),
    RandomFull,
    Val(String, String),
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormKind {
    HashHex,
    BareHex,
    RgbPercent,
    Rgb,
    RgbaPercent,
    Rgba,
    Cmyk,
    CmykPercent,
    Float,
    FloatAlpha,
    Hsv,
    Lab,
    RandomBetween,
    RandomVar,
    RandomVal,
    RandomSat,
    RandomFull,
    Val,
    Random,
}

struct Rule {
    kind: FormKind,
    pattern: &'static LazyLock<Regex>,
}

static HASH_HEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#(.*)$").unwrap());
static BARE_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{3,6}$").unwrap());
static RGB_PERCENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:RGB|rgb)\(([0-9]+)%,([0-9]+)%,([0-9]+)%\)$").unwrap()
});
static RGB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:RGB|rgb)\(([0-9]+),([0-9]+),([0-9]+)\)$").unwrap());
static RGBA_PERCENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:RGBA|rgba)\(([0-9]+)%,([0-9]+)%,([0-9]+)%,([0-9]+)%\)$").unwrap()
});
static RGBA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:RGBA|rgba)\(([0-9]+),([0-9]+),([0-9]+),([0-9]+)\)$").unwrap()
});
static CMYK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:CMYK|cmyk)\(([0-9.]+),([0-9.]+),([0-9.]+),([0-9.]+)\)$").unwrap()
});
static CMYK_PERCENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:CMYK|cmyk)\(([0-9]+)%,([0-9]+)%,([0-9]+)%,([0-9]+)%\)$").unwrap()
});
static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:F|f)\(([0-9.]+)f?,([0-9.]+)f?,([0-9.]+)f?\)$").unwrap()
});
static FLOAT_ALPHA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:FA|fa)\(([0-9.]+)f?,([0-9.]+)f?,([0-9.]+)f?,([0-9.]+)f?\)$").unwrap()
});
static HSV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:HSV|hsv)\(([0-9.]+),([0-9.]+),([0-9.]+)\)$").unwrap()
});
static LAB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:LAB|lab)\(([0-9.]+),([0-9.]+),([0-9.]+)\)$").unwrap()
});
static RANDOM_BETWEEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(?:random|RANDOM)\("(.*",".*)"\)$"#).unwrap());
static RANDOM_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:randomvar|randomVar|RANDOMVAR)\("(.*",".*)"\)$"#).unwrap()
});
static RANDOM_VAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:randomval|randomVal|RANDOMVAL)\("(.*)"\)$"#).unwrap()
});
static RANDOM_SAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:randomsat|randomSat|RANDOMSAT)\("(.*)"\)$"#).unwrap()
});
static RANDOM_FULL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:randomFull|randomfull|RANDOMFULL)$").unwrap());
static VAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(?:val|VAL)\("(.*",".*)"\)$"#).unwrap());
static RANDOM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:random|RANDOM)$").unwrap());

/// Priority order. Earlier rules shadow later ones.
static RULES: &[Rule] = &[
    Rule { kind: FormKind::HashHex, pattern: &HASH_HEX },
    Rule { kind: FormKind::BareHex, pattern: &BARE_HEX },
    Rule { kind: FormKind::RgbPercent, pattern: &RGB_PERCENT },
    Rule { kind: FormKind::Rgb, pattern: &RGB },
    Rule { kind: FormKind::RgbaPercent, pattern: &RGBA_PERCENT },
    Rule { kind: FormKind::Rgba, pattern: &RGBA },
    Rule { kind: FormKind::Cmyk, pattern: &CMYK },
    Rule { kind: FormKind::CmykPercent, pattern: &CMYK_PERCENT },
    Rule { kind: FormKind::Float, pattern: &FLOAT },
    Rule { kind: FormKind::FloatAlpha, pattern: &FLOAT_ALPHA },
    Rule { kind: FormKind::Hsv, pattern: &HSV },
    Rule { kind: FormKind::Lab, pattern: &LAB },
    Rule { kind: FormKind::RandomBetween, pattern: &RANDOM_BETWEEN },
    Rule { kind: FormKind::RandomVar, pattern: &RANDOM_VAR },
    Rule { kind: FormKind::RandomVal, pattern: &RANDOM_VAL },
    Rule { kind: FormKind::RandomSat, pattern: &RANDOM_SAT },
    Rule { kind: FormKind::RandomFull, pattern: &RANDOM_FULL },
    Rule { kind: FormKind::Val, pattern: &VAL },
    Rule { kind: FormKind::Random, pattern: &RANDOM },
];

/// Drop spaces, tabs and line breaks, then strip every leading and trailing
/// `"`, then every leading and trailing `'`.
#[must_use]
pub fn normalize(input: &str) -> String {
    let compact: String = input
        .chars()
        .filter(|c| !matches!(c, ' ' | '\n' | '\t' | '\r'))
        .collect();
    compact
        .trim_matches('"')
        .trim_matches('\'')
        .to_string()
}

/// Classify color text into a [`TextForm`].
pub fn classify(input: &str) -> Result<TextForm> {
    let text = normalize(input);
    for rule in RULES {
        if let Some(caps) = rule.pattern.captures(&text) {
            tracing::trace!(form = ?rule.kind, input = %text, "matched color text");
            return build(rule.kind, &text, &caps);
        }
    }
    Err(Error::malformed(format!(
        "Format was not recognized. Input: {input}"
    )))
}

fn build(kind: FormKind, text: &str, caps: &Captures<'_>) -> Result<TextForm> {
    let form = match kind {
        FormKind::HashHex | FormKind::BareHex => TextForm::Hex(text.to_string()),
        FormKind::RgbPercent => TextForm::RgbPercent(numbers(caps)?),
        FormKind::Rgb => TextForm::Rgb(numbers(caps)?),
        FormKind::RgbaPercent => TextForm::RgbaPercent(numbers(caps)?),
        FormKind::Rgba => TextForm::Rgba(numbers(caps)?),
        FormKind::Cmyk => TextForm::Cmyk(numbers(caps)?),
        FormKind::CmykPercent => TextForm::CmykPercent(numbers(caps)?),
        FormKind::Float => TextForm::Float(numbers(caps)?),
        FormKind::FloatAlpha => TextForm::FloatAlpha(numbers(caps)?),
        FormKind::Hsv => TextForm::Hsv(numbers(caps)?),
        FormKind::Lab => TextForm::Lab(numbers(caps)?),
        FormKind::RandomBetween => {
            let (min, max) = two_quoted(caps)?;
            TextForm::RandomBetween(min, max)
        }
        FormKind::RandomVar => {
            let (mean, variance) = two_quoted(caps)?;
            TextForm::RandomVar(mean, variance)
        }
        FormKind::RandomVal => TextForm::RandomVal(one_quoted(caps)),
        FormKind::RandomSat => TextForm::RandomSat(one_quoted(caps)),
        FormKind::RandomFull => TextForm::RandomFull,
        FormKind::Val => {
            let (color, value) = two_quoted(caps)?;
            TextForm::Val(color, value)
        }
        FormKind::Random => TextForm::Random,
    };
    Ok(form)
}

fn numbers<const N: usize>(caps: &Captures<'_>) -> Result<[f64; N]> {
    let mut out = [0.0; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let raw = caps.get(i + 1).map_or("", |m| m.as_str());
        *slot = raw
            .parse()
            .map_err(|_| Error::malformed(format!("not a number: {raw:?}")))?;
    }
    Ok(out)
}

/// Split the captured argument list on `","`; the first two pieces are used.
fn two_quoted(caps: &Captures<'_>) -> Result<(String, String)> {
    let inner = caps.get(1).map_or("", |m| m.as_str());
    let mut parts = inner.split("\",\"").map(|p| p.trim_matches('"').to_string());
    match (parts.next(), parts.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(Error::malformed(format!(
            "expected two quoted arguments, got: {inner}"
        ))),
    }
}

fn one_quoted(caps: &Captures<'_>) -> String {
    caps.get(1)
        .map_or("", |m| m.as_str())
        .trim_matches('"')
        .to_string()
}
