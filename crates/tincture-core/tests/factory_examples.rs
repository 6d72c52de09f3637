//! End-to-end resolution of the documented color notations.

use tincture_core::convert::{Context, MAX_PRECISION};
use tincture_core::descriptor::{Descriptor, Resolved};
use tincture_core::format::Preset;
use tincture_core::space::ByteRgba;
use tincture_core::{Color, ColorFactory, Error, Number, SortKey};

fn factory() -> ColorFactory<rand::rngs::StdRng> {
    ColorFactory::seeded(Context::default(), 2024)
}

fn json(text: &str) -> Descriptor {
    Descriptor::from_json_str(text).unwrap()
}

// ── text notations ──

#[test]
fn short_and_long_hex_agree() {
    let mut f = factory();
    for text in ["#aaa", "aaa", "#AAAAAA", " '#aaaaaa' "] {
        let color = f.color(text).unwrap();
        let float = color.to_float();
        assert!((float.r - 0.6667).abs() < 1e-4, "{text}: {}", float.r);
        assert_eq!(float.r, float.g);
        assert_eq!(float.g, float.b);
        assert_eq!(color.a(), 1.0);
    }
}

#[test]
fn rgb_text_keeps_bytes() {
    let color = factory().color("rgb(0, 10, 100)").unwrap();
    assert_eq!(color.to_rgb(), ByteRgba::new(0, 10, 100, 255));
    assert_eq!(color.render(Preset::Rgb.template()).unwrap(), "rgb(0, 10, 100)");
}

#[test]
fn cmyk_text_uses_key_branch() {
    let color = factory().color("cmyk(0, 0.2, 0.1, 0.8)").unwrap();
    let rgb = color.to_rgb();
    // 255 * (1 - 0.8) is just below 51 in floating point.
    assert_eq!((rgb.r, rgb.g, rgb.b), (50, 40, 45));
}

#[test]
fn unknown_text_is_malformed_with_remediation() {
    let err = factory().color("not-a-color").unwrap_err();
    assert!(matches!(err, Error::MalformedFormat(_)));
    assert!(err.to_string().contains("not-a-color"));
    let remediation = err.remediation().unwrap();
    assert!(!remediation.examples.is_empty());
}

#[test]
fn bad_hex_length_is_malformed() {
    assert!(matches!(
        factory().color("#abcd"),
        Err(Error::MalformedFormat(_))
    ));
    assert!(matches!(factory().color("#ggg"), Err(Error::MalformedFormat(_))));
}

#[test]
fn lab_is_not_implemented_everywhere() {
    let mut f = factory();
    assert!(matches!(f.color("lab(0.5, 0.1, 0.1)"), Err(Error::NotImplemented(_))));
    let color = f.color("#123456").unwrap();
    assert!(matches!(color.to_lab(), Err(Error::NotImplemented(_))));
    assert!(matches!(color.render("LL"), Err(Error::NotImplemented(_))));
}

#[test]
fn val_text() {
    let color = factory().color(r##"val("#a00", "1")"##).unwrap();
    assert_eq!(color.to_rgb(), ByteRgba::new(255, 0, 0, 255));
}

#[test]
fn seeded_random_text_is_reproducible_and_bounded() {
    let text = r##"random("#100", "#f80")"##;
    let a = factory().color(text).unwrap();
    let b = factory().color(text).unwrap();
    assert_eq!(a, b);
    let rgb = a.to_rgb();
    assert!((0x11..=0xff).contains(&rgb.r));
    assert!((0..=0x88).contains(&rgb.g));
    assert_eq!(rgb.b, 0);
}

#[test]
fn reversed_random_bounds_are_swapped() {
    let mut f = factory();
    for _ in 0..20 {
        let rgb = f.color(r##"random("#fff", "#eee")"##).unwrap().to_rgb();
        assert!((0xee..=0xff).contains(&rgb.r));
    }
}

// ── structured input ──

#[test]
fn json_rgb_map() {
    let color = factory().color(json(r#"{"r": 0, "g": 10, "b": 100}"#)).unwrap();
    assert_eq!(color.to_rgb(), ByteRgba::new(0, 10, 100, 255));
}

#[test]
fn json_hsv_map_is_read_as_hsv() {
    let color = factory()
        .color(json(r#"{"h": 0.0, "s": 1.0, "v": 1.0}"#))
        .unwrap();
    assert_eq!(color.to_rgb(), ByteRgba::new(255, 0, 0, 255));
}

#[test]
fn json_numbers() {
    let mut f = factory();
    let byte_gray = f.color(json("51")).unwrap();
    assert_eq!(byte_gray.to_rgb(), ByteRgba::new(51, 51, 51, 255));
    let float_gray = f.color(json("0.2")).unwrap();
    assert_eq!(float_gray.a(), 0.2);
}

#[test]
fn json_nested_collections_keep_shape() {
    let resolved = factory()
        .resolve(json(r##"{"palette": ["#f00", {"r": 0, "g": 255, "b": 0}], "accent": "#00f"}"##))
        .unwrap();
    let Resolved::Map(entries) = &resolved else {
        panic!("expected map, got {}", resolved.variant_name());
    };
    assert!(matches!(entries["palette"], Resolved::List(_)));
    let hex: Vec<String> = resolved.into_colors().iter().map(ToString::to_string).collect();
    assert_eq!(hex, ["#0000ff", "#ff0000", "#00ff00"]);
}

#[test]
fn json_null_is_rejected() {
    assert!(matches!(
        Descriptor::from_json_str("null"),
        Err(Error::MalformedFormat(_))
    ));
}

// ── construction by numeric kind ──

#[test]
fn float_components_are_taken_as_is() {
    let built = Color::from_components(
        Context::default(),
        [
            Number::Float(0.1),
            Number::Float(0.2),
            Number::Float(0.3),
            Number::Float(1.0),
        ],
    )
    .unwrap();
    assert!(built.warning.is_none());
    assert_eq!(built.color.to_float().g, 0.2);
}

#[test]
fn integer_components_warn_and_read_as_bytes() {
    let built = Color::from_components(
        Context::default(),
        [Number::Int(255), Number::Int(0), Number::Int(0), Number::Int(255)],
    )
    .unwrap();
    assert!(built.warning.is_some());
    assert_eq!(built.color.to_rgb(), ByteRgba::new(255, 0, 0, 255));
}

#[test]
fn mixed_components_are_malformed() {
    let err = Color::from_components(
        Context::default(),
        [Number::Int(255), Number::Float(0.0), Number::Int(0), Number::Int(255)],
    )
    .unwrap_err();
    assert!(matches!(err, Error::MalformedFormat(_)));
}

// ── precision ──

#[test]
fn context_precision_controls_float_rounding() {
    let mut coarse = ColorFactory::seeded(Context::new(3), 0);
    let mut fine = ColorFactory::seeded(Context::new(6), 0);
    assert_eq!(coarse.color("#aaa").unwrap().r(), 0.667);
    assert_eq!(fine.color("#aaa").unwrap().r(), 0.666667);
}

#[test]
fn float_input_renders_the_same_bytes_at_any_precision() {
    for precision in 0..=MAX_PRECISION {
        let color = Color::from_float(Context::new(precision), 0.5, 0.01, 0.0, 1.0);
        assert_eq!(color.render("RR,GR").unwrap(), "127,2", "precision {precision}");
    }
}

// ── sorting mixed input ──

#[test]
fn sort_accepts_any_notation() {
    let sorted = factory()
        .sort(
            [
                Descriptor::from("#ffffff"),
                Descriptor::from(0_i64),
                json(r#"{"r": 128, "g": 128, "b": 128}"#),
            ],
            SortKey::Brightness,
        )
        .unwrap();
    let hex: Vec<String> = sorted.iter().map(ToString::to_string).collect();
    assert_eq!(hex, ["#000000", "#808080", "#ffffff"]);
}
