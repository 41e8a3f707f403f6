//! FILENAME: core/descriptor/src/value.rs
//! PURPOSE: Defines the scalar values a header cell can hold.
//! CONTEXT: Categorical headers store one `Value` per (row, column). The
//! array data itself is always `f64` and never goes through this type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XdataError};

/// Placeholder color returned as the default value of color columns.
/// It differs from the usual black or white backgrounds.
pub const PLACEHOLDER_COLOR: Color = Color { rgb: [0, 149, 182] };

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub rgb: [u8; 3],
}

impl Color {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Color { rgb: [red, green, blue] }
    }

    /// Builds a color from one of the predefined names
    /// (black, white, red, green, blue, yellow, cyan, magenta).
    pub fn named(name: &str) -> Result<Self> {
        let rgb = match name {
            "black" => [0, 0, 0],
            "white" => [255, 255, 255],
            "red" => [255, 0, 0],
            "green" => [0, 255, 0],
            "blue" => [0, 0, 255],
            "yellow" => [255, 255, 0],
            "cyan" => [0, 255, 255],
            "magenta" => [255, 0, 255],
            _ => {
                return Err(XdataError::InvalidArgumentType(format!(
                    "'{}' is not a recognized color name",
                    name
                )))
            }
        };
        Ok(Color { rgb })
    }

    /// Builds a color from integer channels, each of which must lie in 0..=255.
    pub fn from_channels(channels: &[i64]) -> Result<Self> {
        if channels.len() != 3 {
            return Err(XdataError::InvalidArgumentType(format!(
                "a color needs 3 channels, got {}",
                channels.len()
            )));
        }
        let mut rgb = [0u8; 3];
        for (slot, &c) in rgb.iter_mut().zip(channels) {
            *slot = u8::try_from(c).map_err(|_| {
                XdataError::InvalidArgumentType(format!("color channel {} not in 0..=255", c))
            })?;
        }
        Ok(Color { rgb })
    }

    /// Channel-wise average, truncated towards zero. Returns None for an empty input.
    pub fn average<'a>(colors: impl IntoIterator<Item = &'a Color>) -> Option<Color> {
        let mut sums = [0u64; 3];
        let mut count = 0u64;
        for color in colors {
            for (sum, &c) in sums.iter_mut().zip(&color.rgb) {
                *sum += u64::from(c);
            }
            count += 1;
        }
        if count == 0 {
            return None;
        }
        // The mean of u8 values always fits back into a u8.
        let channel = |sum: u64| (sum / count) as u8;
        Some(Color::new(channel(sums[0]), channel(sums[1]), channel(sums[2])))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

/// The content of one header cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    Logical(bool),
    Text(String),
    Color(Color),
    /// Several values gathered together, e.g. by merging rows.
    List(Vec<Value>),
    Empty,
}

impl Value {
    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Value::Color(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Logical(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "{}", s),
            Value::Color(c) => write!(f, "{}", c),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Empty => Ok(()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Logical(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}
