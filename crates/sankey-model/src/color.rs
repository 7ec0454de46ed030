use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fully opaque alpha, in thousandths.
pub const ALPHA_OPAQUE: u16 = 1000;

/// Default accent applied to nodes without an explicit or pattern color.
pub const ACCENT_COLOR: ChartColor = ChartColor::Rgba(Rgba::opaque(0x1E, 0x74, 0xFF));

/// An RGBA color with alpha stored in thousandths (0 = transparent,
/// 1000 = opaque), keeping the type `Eq`/`Hash`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha_1000: u16,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, alpha_1000: u16) -> Self {
        let alpha_1000 = if alpha_1000 > ALPHA_OPAQUE {
            ALPHA_OPAQUE
        } else {
            alpha_1000
        };
        Self { r, g, b, alpha_1000 }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, ALPHA_OPAQUE)
    }

    /// Same color with the alpha channel replaced outright.
    pub const fn with_alpha_1000(self, alpha_1000: u16) -> Self {
        Self::new(self.r, self.g, self.b, alpha_1000)
    }

    pub fn is_opaque(self) -> bool {
        self.alpha_1000 == ALPHA_OPAQUE
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            let alpha = f64::from(self.alpha_1000) / 1000.0;
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }
}

/// A chart color: either a parsed RGBA value or an unrecognized color string
/// carried through verbatim.
///
/// Stored configurations may hold color text this crate does not parse (CSS
/// named colors, `hsl(...)`, ...). Those still have to reach the renderer
/// unchanged, so parsing never fails; it falls back to
/// [`ChartColor::Unknown`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChartColor {
    Rgba(Rgba),
    /// Unrecognized color text, passed through untouched.
    Unknown(String),
}

impl ChartColor {
    /// Parses `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)` and
    /// `rgba(r, g, b, a)` forms; anything else becomes
    /// [`ChartColor::Unknown`] with the input preserved.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            if let Some(rgba) = parse_hex(hex) {
                return ChartColor::Rgba(rgba);
            }
        } else if let Some(rgba) = parse_rgb_function(trimmed) {
            return ChartColor::Rgba(rgba);
        }
        ChartColor::Unknown(text.to_string())
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ChartColor::Rgba(Rgba::opaque(r, g, b))
    }

    /// Replaces the alpha channel. Unknown colors cannot carry an alpha and
    /// come back unchanged.
    pub fn with_alpha_1000(&self, alpha_1000: u16) -> Self {
        match self {
            ChartColor::Rgba(rgba) => ChartColor::Rgba(rgba.with_alpha_1000(alpha_1000)),
            ChartColor::Unknown(_) => self.clone(),
        }
    }

    pub fn as_rgba(&self) -> Option<Rgba> {
        match self {
            ChartColor::Rgba(rgba) => Some(*rgba),
            ChartColor::Unknown(_) => None,
        }
    }
}

impl fmt::Display for ChartColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartColor::Rgba(rgba) => rgba.fmt(f),
            ChartColor::Unknown(text) => f.write_str(text),
        }
    }
}

impl From<Rgba> for ChartColor {
    fn from(value: Rgba) -> Self {
        ChartColor::Rgba(value)
    }
}

impl Serialize for ChartColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ChartColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        if text.trim().is_empty() {
            return Err(D::Error::custom("color string must not be empty"));
        }
        Ok(ChartColor::parse(&text))
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();
    match hex.len() {
        // #RGB shorthand: each digit doubles (0xF -> 0xFF).
        3 => {
            let digit = |at: usize| u8::from_str_radix(&hex[at..at + 1], 16).ok();
            Some(Rgba::opaque(
                digit(0)? * 0x11,
                digit(1)? * 0x11,
                digit(2)? * 0x11,
            ))
        }
        6 => Some(Rgba::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => {
            let alpha_1000 = (f64::from(byte(6)?) / 255.0 * 1000.0).round() as u16;
            Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, alpha_1000))
        }
        _ => None,
    }
}

fn parse_rgb_function(text: &str) -> Option<Rgba> {
    let lower = text.to_ascii_lowercase();
    let (body, expect_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest.strip_suffix(')')?, true)
    } else if let Some(rest) = lower.strip_prefix("rgb(") {
        (rest.strip_suffix(')')?, false)
    } else {
        return None;
    };

    let mut parts = body.split(',').map(str::trim);
    let r = parts.next()?.parse::<u8>().ok()?;
    let g = parts.next()?.parse::<u8>().ok()?;
    let b = parts.next()?.parse::<u8>().ok()?;
    let alpha_1000 = if expect_alpha {
        let alpha = parts.next()?.parse::<f64>().ok()?;
        if !alpha.is_finite() {
            return None;
        }
        (alpha.clamp(0.0, 1.0) * 1000.0).round() as u16
    } else {
        ALPHA_OPAQUE
    };
    if parts.next().is_some() {
        return None;
    }
    Some(Rgba::new(r, g, b, alpha_1000))
}
