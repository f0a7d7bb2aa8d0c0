use serde::{Deserialize, Serialize};

/// An sRGB color with alpha, as produced by `<color>` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Parse a `<color>` token: hex notation (`#rgb`, `#rgba`, `#rrggbb`,
    /// `#rrggbbaa`), the `rgb()`/`rgba()` functional forms, or a color name.
    pub fn parse(input: &str) -> Option<Color> {
        let input = input.trim();

        if let Some(hex) = input.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        let lower = input.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            return Self::parse_rgb_function(args.strip_suffix(')')?);
        }

        Self::from_name(&lower)
    }

    fn parse_hex(hex: &str) -> Option<Color> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 | 4 => {
                let r = nibble(0)?;
                let g = nibble(1)?;
                let b = nibble(2)?;
                let a = if hex.len() == 4 { nibble(3)? } else { 0xf };
                Some(Color::rgba(r * 17, g * 17, b * 17, a * 17))
            }
            6 | 8 => {
                let r = byte(0)?;
                let g = byte(2)?;
                let b = byte(4)?;
                let a = if hex.len() == 8 { byte(6)? } else { 255 };
                Some(Color::rgba(r, g, b, a))
            }
            _ => None,
        }
    }

    fn parse_rgb_function(args: &str) -> Option<Color> {
        let mut channels = [0u8; 3];
        let mut alpha = 255u8;
        let mut count = 0;

        for (i, part) in args.split(',').enumerate() {
            let part = part.trim();
            match i {
                0..=2 => {
                    let value: f32 = if let Some(pct) = part.strip_suffix('%') {
                        pct.trim().parse::<f32>().ok()? * 255.0 / 100.0
                    } else {
                        part.parse().ok()?
                    };
                    channels[i] = value.round().clamp(0.0, 255.0) as u8;
                }
                3 => {
                    let value: f32 = part.parse().ok()?;
                    alpha = (value * 255.0).round().clamp(0.0, 255.0) as u8;
                }
                _ => return None,
            }
            count = i + 1;
        }

        if count < 3 {
            return None;
        }

        Some(Color::rgba(channels[0], channels[1], channels[2], alpha))
    }

    /// The CSS named colors the engine resolves, plus `transparent`.
    fn from_name(name: &str) -> Option<Color> {
        let color = match name {
            "transparent" => Color::TRANSPARENT,
            "black" => Color::rgb(0, 0, 0),
            "silver" => Color::rgb(192, 192, 192),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "white" => Color::rgb(255, 255, 255),
            "maroon" => Color::rgb(128, 0, 0),
            "red" => Color::rgb(255, 0, 0),
            "purple" => Color::rgb(128, 0, 128),
            "fuchsia" | "magenta" => Color::rgb(255, 0, 255),
            "green" => Color::rgb(0, 128, 0),
            "lime" => Color::rgb(0, 255, 0),
            "olive" => Color::rgb(128, 128, 0),
            "yellow" => Color::rgb(255, 255, 0),
            "navy" => Color::rgb(0, 0, 128),
            "blue" => Color::rgb(0, 0, 255),
            "teal" => Color::rgb(0, 128, 128),
            "aqua" | "cyan" => Color::rgb(0, 255, 255),
            "orange" => Color::rgb(255, 165, 0),
            "pink" => Color::rgb(255, 192, 203),
            "brown" => Color::rgb(165, 42, 42),
            "gold" => Color::rgb(255, 215, 0),
            _ => return None,
        };

        Some(color)
    }
}
