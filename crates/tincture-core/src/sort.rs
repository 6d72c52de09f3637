//! Orderings over colors.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// What to order colors by. Every key sorts ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Hue,
    Saturation,
    Brightness,
    WeightedLength,
    Length,
    /// Length first; equal lengths fall back to the channels themselves.
    Combined,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::Hue,
        Self::Saturation,
        Self::Brightness,
        Self::WeightedLength,
        Self::Length,
        Self::Combined,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Hue => "hue",
            Self::Saturation => "saturation",
            Self::Brightness => "brightness",
            Self::WeightedLength => "weighted-length",
            Self::Length => "length",
            Self::Combined => "combined",
        }
    }

    #[must_use]
    pub fn compare(self, a: &Color, b: &Color) -> Ordering {
        match self {
            Self::Hue => a.hue().total_cmp(&b.hue()),
            Self::Saturation => a.saturation().total_cmp(&b.saturation()),
            Self::Brightness => a.brightness().total_cmp(&b.brightness()),
            Self::WeightedLength => a.weight_length().total_cmp(&b.weight_length()),
            Self::Length => a.length().total_cmp(&b.length()),
            Self::Combined => a
                .length()
                .total_cmp(&b.length())
                .then_with(|| if a == b { Ordering::Equal } else { by_channels(a, b) }),
        }
    }
}

fn by_channels(a: &Color, b: &Color) -> Ordering {
    let (a, b) = (a.to_float(), b.to_float());
    a.r.total_cmp(&b.r)
        .then(a.g.total_cmp(&b.g))
        .then(a.b.total_cmp(&b.b))
        .then(a.a.total_cmp(&b.a))
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "hue" => Ok(Self::Hue),
            "saturation" | "sat" => Ok(Self::Saturation),
            "brightness" | "value" | "val" => Ok(Self::Brightness),
            "weighted-length" | "weight" => Ok(Self::WeightedLength),
            "length" | "len" => Ok(Self::Length),
            "combined" => Ok(Self::Combined),
            _ => Err(format!(
                "unknown sort key {s:?}; expected one of: {}",
                SortKey::ALL.map(SortKey::name).join(", ")
            )),
        }
    }
}

/// Sort in place by `key`.
pub fn sort_colors(colors: &mut [Color], key: SortKey) {
    colors.sort_by(|a, b| key.compare(a, b));
}

/// Same clamped channels.
#[must_use]
pub fn equals(a: &Color, b: &Color) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::from((r, g, b))
    }

    // ── keys ──

    #[test]
    fn sort_key_from_str() {
        assert_eq!("hue".parse::<SortKey>().unwrap(), SortKey::Hue);
        assert_eq!("SAT".parse::<SortKey>().unwrap(), SortKey::Saturation);
        assert_eq!("value".parse::<SortKey>().unwrap(), SortKey::Brightness);
        assert_eq!(
            "weighted_length".parse::<SortKey>().unwrap(),
            SortKey::WeightedLength
        );
        assert_eq!("len".parse::<SortKey>().unwrap(), SortKey::Length);
        assert!("chroma".parse::<SortKey>().is_err());
    }

    #[test]
    fn sort_key_display_round_trips() {
        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
    }

    // ── comparators ──

    #[test]
    fn hue_orders_around_the_wheel() {
        let red = rgb(255, 0, 0);
        let green = rgb(0, 255, 0);
        assert_eq!(SortKey::Hue.compare(&red, &green), Ordering::Less);
        assert_eq!(SortKey::Hue.compare(&green, &red), Ordering::Greater);
        assert_eq!(SortKey::Hue.compare(&red, &red), Ordering::Equal);
    }

    #[test]
    fn saturation_and_brightness() {
        let pale = rgb(200, 180, 180);
        let vivid = rgb(200, 0, 0);
        assert_eq!(SortKey::Saturation.compare(&pale, &vivid), Ordering::Less);
        let dark = rgb(20, 0, 0);
        assert_eq!(SortKey::Brightness.compare(&dark, &vivid), Ordering::Less);
    }

    #[test]
    fn weighted_length_favors_green() {
        let green = rgb(0, 255, 0);
        let blue = rgb(0, 0, 255);
        assert_eq!(SortKey::Length.compare(&green, &blue), Ordering::Equal);
        assert_eq!(
            SortKey::WeightedLength.compare(&blue, &green),
            Ordering::Less
        );
    }

    #[test]
    fn combined_breaks_length_ties() {
        let green = rgb(0, 255, 0);
        let blue = rgb(0, 0, 255);
        assert_eq!(SortKey::Combined.compare(&blue, &green), Ordering::Less);
        assert_eq!(SortKey::Combined.compare(&green, &blue), Ordering::Greater);
        assert_eq!(
            SortKey::Combined.compare(&blue, &blue.clone()),
            Ordering::Equal
        );
    }

    // ── sorting ──

    #[test]
    fn sort_by_brightness() {
        let mut colors = vec![rgb(200, 0, 0), rgb(10, 10, 10), rgb(100, 0, 0)];
        sort_colors(&mut colors, SortKey::Brightness);
        let hex: Vec<String> = colors.iter().map(ToString::to_string).collect();
        assert_eq!(hex, ["#0a0a0a", "#640000", "#c80000"]);
    }

    #[test]
    fn equals_ignores_out_of_range_excess() {
        let a = Color::new(1.5, 0.0, 0.0, 1.0);
        let b = Color::new(1.0, 0.0, 0.0, 1.0);
        assert!(equals(&a, &b));
        assert!(!equals(&a, &rgb(0, 0, 0)));
    }
}
