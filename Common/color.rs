use hex::ToHex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color {
    /// The original name of the color.
    /// Is either the name of a color, like "red", or the Hex Color code for that color
    pub name: String,
    /// Represents a Hex color value
    /// contains values for (red, green, blue).
    pub code: (u8, u8, u8),
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color {
            name: [r, g, b].encode_hex_upper::<String>(),
            code: (r, g, b),
        }
    }
}

/// Convenience Enum for making named colors
pub enum ColorName {
    Purple,
    Orange,
    Pink,
    Red,
    Green,
    Blue,
    Yellow,
    White,
    Black,
}

/// Converts from a `ColorName` enum to the corresponding `Color`
impl From<ColorName> for Color {
    fn from(cn: ColorName) -> Self {
        match cn {
            ColorName::Purple => Color {
                name: "purple".to_string(),
                code: (128, 0, 128),
            },
            ColorName::Orange => Color {
                name: "orange".to_string(),
                code: (255, 165, 0),
            },
            ColorName::Pink => Color {
                name: "pink".to_string(),
                code: (255, 192, 203),
            },
            ColorName::Red => Color {
                name: "red".to_string(),
                code: (255, 0, 0),
            },
            ColorName::Green => Color {
                name: "green".to_string(),
                code: (0, 255, 0),
            },
            ColorName::Blue => Color {
                name: "blue".to_string(),
                code: (0, 0, 255),
            },
            ColorName::Yellow => Color {
                name: "yellow".to_string(),
                code: (255, 255, 0),
            },
            ColorName::White => Color {
                name: "white".to_string(),
                code: (255, 255, 255),
            },
            ColorName::Black => Color {
                name: "black".to_string(),
                code: (0, 0, 0),
            },
        }
    }
}

/// The closed palette consulted before falling back to a generated hex code.
pub const ALL_NAMED_COLORS: [ColorName; 9] = [
    ColorName::Purple,
    ColorName::Orange,
    ColorName::Pink,
    ColorName::Red,
    ColorName::Green,
    ColorName::Blue,
    ColorName::Yellow,
    ColorName::White,
    ColorName::Black,
];

impl Color {
    /// Assigns the `idx`-th distinct color: a named palette entry while `idx` is in range,
    /// otherwise a deterministic, zero-padded-looking hex code derived from `idx`.
    pub fn for_player_index(idx: usize) -> Color {
        if idx < ALL_NAMED_COLORS.len() {
            let name = match idx {
                0 => ColorName::Purple,
                1 => ColorName::Orange,
                2 => ColorName::Pink,
                3 => ColorName::Red,
                4 => ColorName::Green,
                5 => ColorName::Blue,
                6 => ColorName::Yellow,
                7 => ColorName::White,
                _ => ColorName::Black,
            };
            name.into()
        } else {
            let shade = ((idx - ALL_NAMED_COLORS.len()) * 37 % 256) as u8;
            (shade, shade, shade).into()
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("color must be a known color name or a 6-digit hex code")]
pub struct ColorParseError;

impl Color {
    fn named_lookup(s: &str) -> Option<Color> {
        match s {
            "purple" => Some(ColorName::Purple.into()),
            "orange" => Some(ColorName::Orange.into()),
            "pink" => Some(ColorName::Pink.into()),
            "red" => Some(ColorName::Red.into()),
            "green" => Some(ColorName::Green.into()),
            "blue" => Some(ColorName::Blue.into()),
            "yellow" => Some(ColorName::Yellow.into()),
            "white" => Some(ColorName::White.into()),
            "black" => Some(ColorName::Black.into()),
            _ => None,
        }
    }

    /// Parses the wire representation of a color: one of the nine named colors, or a bare
    /// 6-digit hex code.
    pub fn from_wire_str(s: &str) -> Result<Color, ColorParseError> {
        if let Some(named) = Self::named_lookup(s) {
            return Ok(named);
        }
        let bytes = hex::decode(s).map_err(|_| ColorParseError)?;
        let [r, g, b]: [u8; 3] = bytes.try_into().map_err(|_| ColorParseError)?;
        Ok((r, g, b).into())
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.name)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_wire_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_exhaust_before_hex_fallback() {
        assert_eq!(Color::for_player_index(0), ColorName::Purple.into());
        assert_eq!(Color::for_player_index(8), ColorName::Black.into());
        let fallback = Color::for_player_index(9);
        assert_eq!(fallback.code, (37, 37, 37));
    }

    #[test]
    fn wire_roundtrip_for_named_and_hex() {
        assert_eq!(Color::from_wire_str("red").unwrap(), ColorName::Red.into());
        let hex = Color::from_wire_str("2a2a2a").unwrap();
        assert_eq!(hex.code, (0x2a, 0x2a, 0x2a));
        assert!(Color::from_wire_str("not-a-color").is_err());
    }
}
