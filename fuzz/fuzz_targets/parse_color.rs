#![no_main]

use libfuzzer_sys::fuzz_target;
use tincture_core::convert::Context;
use tincture_core::{ColorFactory, Error};

// Arbitrary text either resolves to a color that renders as `#rrggbb` or
// fails with one of the two documented errors. It never panics.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut factory = ColorFactory::seeded(Context::default(), 0);
    match factory.color(text) {
        Ok(color) => {
            let hex = color.to_string();
            assert_eq!(hex.len(), 7, "{text:?} rendered as {hex:?}");
            assert!(hex.starts_with('#'));
            let reparsed = factory.color(hex.as_str()).expect("rendered hex parses");
            assert_eq!(reparsed.to_string(), hex);
        }
        Err(Error::MalformedFormat(_) | Error::NotImplemented(_)) => {}
        Err(other) => panic!("unexpected error for {text:?}: {other}"),
    }
});
