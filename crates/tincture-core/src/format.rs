//! Output templates.
//!
//! A template is plain text with two-letter format codes embedded in it.
//! `rgb(RR, GR, BR)` renders the byte channels of a color, `#RHGHBH` its hex
//! form. Text that is not a code is copied through unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::Result;

pub const HEX: &str = "#RHGHBH";
pub const CSS_OPACITY: &str = "AF";
pub const CSS_BACKGROUND_OPACITY: &str = "background: #RHGHBH; opacity: AF;";
pub const CSS_BACKGROUND: &str = "background: #RHGHBH;";
pub const CSS_COLOR_OPACITY: &str = "color: #RHGHBH; opacity: AF;";
pub const CSS_COLOR: &str = "color: #RHGHBH;";
pub const RGB: &str = "rgb(RR, GR, BR)";
pub const RGBA: &str = "rgba(RR, GR, BR, AR)";
pub const HSV: &str = "hsv(HS, SS, VS)";

/// A two-letter code and the channel it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCode {
    RedHex,
    GreenHex,
    BlueHex,
    AlphaHex,
    RedFloat,
    GreenFloat,
    BlueFloat,
    AlphaFloat,
    RedByte,
    GreenByte,
    BlueByte,
    AlphaByte,
    Cyan,
    Magenta,
    Yellow,
    Key,
    AlphaCmyk,
    Hue,
    Saturation,
    Value,
    AlphaHsv,
    Lightness,
    LabA,
    LabB,
}

impl FormatCode {
    pub const ALL: [Self; 24] = [
        Self::RedHex,
        Self::GreenHex,
        Self::BlueHex,
        Self::AlphaHex,
        Self::RedFloat,
        Self::GreenFloat,
        Self::BlueFloat,
        Self::AlphaFloat,
        Self::RedByte,
        Self::GreenByte,
        Self::BlueByte,
        Self::AlphaByte,
        Self::Cyan,
        Self::Magenta,
        Self::Yellow,
        Self::Key,
        Self::AlphaCmyk,
        Self::Hue,
        Self::Saturation,
        Self::Value,
        Self::AlphaHsv,
        Self::Lightness,
        Self::LabA,
        Self::LabB,
    ];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::RedHex => "RH",
            Self::GreenHex => "GH",
            Self::BlueHex => "BH",
            Self::AlphaHex => "AH",
            Self::RedFloat => "RF",
            Self::GreenFloat => "GF",
            Self::BlueFloat => "BF",
            Self::AlphaFloat => "AF",
            Self::RedByte => "RR",
            Self::GreenByte => "GR",
            Self::BlueByte => "BR",
            Self::AlphaByte => "AR",
            Self::Cyan => "CC",
            Self::Magenta => "MC",
            Self::Yellow => "YC",
            Self::Key => "KC",
            Self::AlphaCmyk => "AC",
            Self::Hue => "HS",
            Self::Saturation => "SS",
            Self::Value => "VS",
            Self::AlphaHsv => "AS",
            Self::Lightness => "LL",
            Self::LabA => "AL",
            Self::LabB => "BL",
        }
    }

    #[must_use]
    pub fn from_code(code: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.code().as_bytes() == code)
    }

    fn render(self, color: &Color) -> Result<String> {
        let ctx = color.context();
        let text = match self {
            Self::RedHex => ctx.float_to_hex(color.r()),
            Self::GreenHex => ctx.float_to_hex(color.g()),
            Self::BlueHex => ctx.float_to_hex(color.b()),
            Self::AlphaHex => ctx.float_to_hex(color.a()),
            Self::RedFloat => color.r().to_string(),
            Self::GreenFloat => color.g().to_string(),
            Self::BlueFloat => color.b().to_string(),
            Self::AlphaFloat => color.a().to_string(),
            Self::RedByte => ctx.float_to_byte(color.r()).to_string(),
            Self::GreenByte => ctx.float_to_byte(color.g()).to_string(),
            Self::BlueByte => ctx.float_to_byte(color.b()).to_string(),
            Self::AlphaByte => ctx.float_to_byte(color.a()).to_string(),
            Self::Cyan => color.to_cmyk().c.to_string(),
            Self::Magenta => color.to_cmyk().m.to_string(),
            Self::Yellow => color.to_cmyk().y.to_string(),
            Self::Key => color.to_cmyk().k.to_string(),
            Self::AlphaCmyk => color.to_cmyk().a.to_string(),
            Self::Hue => color.to_hsv().h.to_string(),
            Self::Saturation => color.to_hsv().s.to_string(),
            Self::Value => color.to_hsv().v.to_string(),
            Self::AlphaHsv => color.to_hsv().a.to_string(),
            Self::Lightness => color.to_lab()?.l.to_string(),
            Self::LabA => color.to_lab()?.a.to_string(),
            Self::LabB => color.to_lab()?.b.to_string(),
        };
        Ok(text)
    }
}

impl fmt::Display for FormatCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Code(FormatCode),
    Literal(String),
}

/// A tokenized output template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    tokens: Vec<Token>,
}

impl Template {
    /// Scan left to right. Any two-byte window that spells a code becomes a
    /// code token and scanning resumes after it; everything else accumulates
    /// into literals.
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let bytes = template.as_bytes();
        let mut tokens = Vec::new();
        let mut literal_start = 0;
        let mut i = 0;

        while i + 1 < bytes.len() {
            if let Some(code) = FormatCode::from_code(&bytes[i..i + 2]) {
                if literal_start < i {
                    tokens.push(Token::Literal(template[literal_start..i].to_string()));
                }
                tokens.push(Token::Code(code));
                i += 2;
                literal_start = i;
            } else {
                i += 1;
            }
        }
        if literal_start < bytes.len() {
            tokens.push(Token::Literal(template[literal_start..].to_string()));
        }

        Self { tokens }
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Substitute every code with the matching view of `color`.
    ///
    /// Fails only when the template asks for LAB channels.
    pub fn render(&self, color: &Color) -> Result<String> {
        let mut out = String::new();
        for token in &self.tokens {
            let piece = match token {
                Token::Code(code) => code.render(color)?,
                Token::Literal(text) => text.clone(),
            };
            out.push_str(blank_as_zero(&piece));
        }
        Ok(out)
    }
}

impl FromStr for Template {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

fn blank_as_zero(piece: &str) -> &str {
    match piece {
        "" | "0" | "-0" => "0",
        other => other,
    }
}

/// Named templates, selectable from configuration and the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    #[default]
    Hex,
    CssOpacity,
    CssBackgroundOpacity,
    CssBackground,
    CssColorOpacity,
    CssColor,
    Rgb,
    Rgba,
    Hsv,
}

impl Preset {
    pub const ALL: [Self; 9] = [
        Self::Hex,
        Self::CssOpacity,
        Self::CssBackgroundOpacity,
        Self::CssBackground,
        Self::CssColorOpacity,
        Self::CssColor,
        Self::Rgb,
        Self::Rgba,
        Self::Hsv,
    ];

    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Hex => HEX,
            Self::CssOpacity => CSS_OPACITY,
            Self::CssBackgroundOpacity => CSS_BACKGROUND_OPACITY,
            Self::CssBackground => CSS_BACKGROUND,
            Self::CssColorOpacity => CSS_COLOR_OPACITY,
            Self::CssColor => CSS_COLOR,
            Self::Rgb => RGB,
            Self::Rgba => RGBA,
            Self::Hsv => HSV,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::CssOpacity => "css-opacity",
            Self::CssBackgroundOpacity => "css-background-opacity",
            Self::CssBackground => "css-background",
            Self::CssColorOpacity => "css-color-opacity",
            Self::CssColor => "css-color",
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
            Self::Hsv => "hsv",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
                format!("unknown preset: {s}. Expected one of: {}", names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    // ── tokenizer ──

    #[test]
    fn tokenizes_hex_template() {
        let template = Template::parse(HEX);
        assert_eq!(
            template.tokens(),
            &[
                Token::Literal("#".to_string()),
                Token::Code(FormatCode::RedHex),
                Token::Code(FormatCode::GreenHex),
                Token::Code(FormatCode::BlueHex),
            ]
        );
    }

    #[test]
    fn resumes_after_a_code() {
        // "RRR" is one code followed by a literal R, not two overlapping codes.
        let template = Template::parse("RRR");
        assert_eq!(
            template.tokens(),
            &[
                Token::Code(FormatCode::RedByte),
                Token::Literal("R".to_string()),
            ]
        );
    }

    #[test]
    fn plain_text_is_one_literal() {
        let template = Template::parse("no codes here");
        assert_eq!(
            template.tokens(),
            &[Token::Literal("no codes here".to_string())]
        );
        assert!(Template::parse("").tokens().is_empty());
    }

    #[test]
    fn multibyte_literals_survive() {
        let template = Template::parse("färg RR ✓");
        assert_eq!(template.tokens().len(), 3);
        assert_eq!(
            template.render(&Color::from((12, 0, 0))).unwrap(),
            "färg 12 ✓"
        );
    }

    // ── rendering ──

    #[test]
    fn named_templates_render() {
        let color = Color::from((0, 10, 100));
        assert_eq!(color.render(HEX).unwrap(), "#000a64");
        assert_eq!(color.render(RGB).unwrap(), "rgb(0, 10, 100)");
        assert_eq!(color.render(RGBA).unwrap(), "rgba(0, 10, 100, 255)");
        assert_eq!(color.render(CSS_COLOR).unwrap(), "color: #000a64;");
        assert_eq!(
            color.render(CSS_BACKGROUND_OPACITY).unwrap(),
            "background: #000a64; opacity: 1;"
        );
        assert_eq!(color.render(CSS_OPACITY).unwrap(), "1");
    }

    #[test]
    fn float_and_hsv_codes() {
        let color = Color::new(1.0, 0.0, 0.0, 0.5);
        assert_eq!(color.render("RF/GF/BF/AF").unwrap(), "1/0/0/0.5");
        assert_eq!(color.render(HSV).unwrap(), "hsv(0, 1, 1)");
        assert_eq!(color.render("AH").unwrap(), "7f");
    }

    #[test]
    fn cmyk_codes() {
        let color = Color::from((255, 0, 0));
        assert_eq!(color.render("CC MC YC KC AC").unwrap(), "0 1 1 0 1");
    }

    #[test]
    fn lab_codes_fail() {
        let color = Color::default();
        assert!(matches!(color.render("LL"), Err(Error::NotImplemented(_))));
        assert!(matches!(color.render("x BL"), Err(Error::NotImplemented(_))));
    }

    // ── presets ──

    #[test]
    fn preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert_eq!("CSS_COLOR".parse::<Preset>().unwrap(), Preset::CssColor);
        assert!("mauve".parse::<Preset>().is_err());
        assert_eq!(Preset::Rgba.template(), RGBA);
    }
}
