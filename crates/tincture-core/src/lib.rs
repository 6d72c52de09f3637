//! tincture-core: color values, conversions and a text grammar for colors
//!
//! A [`Color`] stores four float channels. Every other representation (bytes,
//! hex, CMYK, HSV) is a view computed on demand. The [`ColorFactory`] turns
//! loosely shaped input (text like `rgb(0, 10, 100)`, numbers, labelled maps,
//! nested collections) into colors, and a [`Template`] writes them back out.
//!
//! # Architecture
//!
//! ```text
//! convert → space → color → { factory, format, sort }
//!                     ↑
//!        descriptor + parse
//! ```
//!
//! # Modules
//!
//! - `convert`: scalar float/byte/hex conversions and the rounding `Context`
//! - `space`: channel structs and whole-color space conversions
//! - `color`: the `Color` value, arithmetic, HSV adjustments, metrics
//! - `descriptor`: factory inputs and resolved outputs
//! - `parse`: the ordered text grammar
//! - `factory`: descriptor resolution and random colors
//! - `format`: output templates and presets
//! - `sort`: comparators and sorting
//! - `config`: TOML configuration
//! - `logging`: `tracing` subscriber setup for binaries
//!
//! # Safety
//!
//! This crate forbids unsafe code.

#![forbid(unsafe_code)]

pub mod color;
pub mod config;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod format;
pub mod logging;
pub mod parse;
pub mod sort;
pub mod space;

pub use color::{Color, Constructed, ConstructionWarning, ContrastOptions, Number};
pub use config::Config;
pub use convert::Context;
pub use descriptor::{Descriptor, Resolved};
pub use error::{ConfigError, Error, Remediation, Result};
pub use factory::ColorFactory;
pub use format::{Preset, Template};
pub use sort::{SortKey, equals, sort_colors};
