//! Inputs the factory accepts, and the shapes it resolves them into.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::color::{Color, Number};
use crate::error::{Error, Result};

/// Anything that can describe one color or a collection of colors.
///
/// Maps with `r,g,b`, `c,m,y,k`, `h,s,v` or `l,a,b` keys describe a single
/// color in that space. Any other map, and every list, is a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    Color(Color),
    Number(Number),
    Text(String),
    Map(BTreeMap<String, Descriptor>),
    List(Vec<Descriptor>),
}

impl Descriptor {
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Color(_) => "Color",
            Self::Number(_) => "Number",
            Self::Text(_) => "Text",
            Self::Map(_) => "Map",
            Self::List(_) => "List",
        }
    }

    /// Numbers and numeric strings read as floats; anything else is `None`.
    #[must_use]
    pub fn coerce_float(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(n.as_f64()),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Convert parsed JSON. Integers stay integers, so `12` is a byte gray
    /// while `0.5` is a float gray.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(Error::malformed("null does not describe a color")),
            Value::Bool(b) => Err(Error::malformed(format!(
                "boolean {b} does not describe a color"
            ))),
            Value::Number(n) => {
                let number = match n.as_i64() {
                    Some(i) => Number::Int(i),
                    None => Number::Float(n.as_f64().unwrap_or_default()),
                };
                Ok(Self::Number(number))
            }
            Value::String(s) => Ok(Self::Text(s)),
            Value::Array(items) => items
                .into_iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>>>()
                .map(Self::List),
            Value::Object(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok((k, Self::from_json(v)?)))
                .collect::<Result<BTreeMap<_, _>>>()
                .map(Self::Map),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_json(serde_json::from_str(json)?)
    }
}

impl From<Color> for Descriptor {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<&Color> for Descriptor {
    fn from(color: &Color) -> Self {
        Self::Color(color.clone())
    }
}

impl From<Number> for Descriptor {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<f64> for Descriptor {
    fn from(v: f64) -> Self {
        Self::Number(Number::Float(v))
    }
}

impl From<i64> for Descriptor {
    fn from(v: i64) -> Self {
        Self::Number(Number::Int(v))
    }
}

impl From<&str> for Descriptor {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Descriptor {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Descriptor>> for Descriptor {
    fn from(items: Vec<Descriptor>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeMap<String, Descriptor>> for Descriptor {
    fn from(entries: BTreeMap<String, Descriptor>) -> Self {
        Self::Map(entries)
    }
}

/// What a descriptor resolves to: one color, or a collection mirroring the
/// shape of the input.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Color(Color),
    Map(BTreeMap<String, Resolved>),
    List(Vec<Resolved>),
}

impl Resolved {
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Color(_) => "Color",
            Self::Map(_) => "Map",
            Self::List(_) => "List",
        }
    }

    #[must_use]
    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Self::Color(color) => Some(color),
            _ => None,
        }
    }

    /// The single color, or MalformedFormat for a collection.
    pub fn into_color(self) -> Result<Color> {
        match self {
            Self::Color(color) => Ok(color),
            other => Err(Error::malformed(format!(
                "expected a single color, got a {}",
                other.variant_name()
            ))),
        }
    }

    /// Every color in depth-first order. Map entries follow key order.
    #[must_use]
    pub fn into_colors(self) -> Vec<Color> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into(self, out: &mut Vec<Color>) {
        match self {
            Self::Color(color) => out.push(color),
            Self::Map(entries) => {
                for value in entries.into_values() {
                    value.collect_into(out);
                }
            }
            Self::List(items) => {
                for item in items {
                    item.collect_into(out);
                }
            }
        }
    }
}
