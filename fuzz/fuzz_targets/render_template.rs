#![no_main]

use libfuzzer_sys::fuzz_target;
use tincture_core::format::{Template, Token};
use tincture_core::{Color, Error};

// Tokenizing is lossless, and rendering only fails on LAB codes.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let template = Template::parse(text);
    let rebuilt: String = template
        .tokens()
        .iter()
        .map(|token| match token {
            Token::Code(code) => code.code().to_string(),
            Token::Literal(literal) => literal.clone(),
        })
        .collect();
    assert_eq!(rebuilt, text);

    let color = Color::from((18, 52, 86, 120));
    match template.render(&color) {
        Ok(_) | Err(Error::NotImplemented(_)) => {}
        Err(other) => panic!("unexpected render error for {text:?}: {other}"),
    }
});
