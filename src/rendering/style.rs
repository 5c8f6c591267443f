use serde::{Deserialize, Serialize};

/// RGBA color, serializable and parseable from `#RRGGBB` / `#RRGGBBAA`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Style for polygon shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    /// Fill color
    pub fill_color: Color,
    /// Border color
    pub stroke_color: Color,
    /// Border width
    pub stroke_width: f32,
    /// Fill opacity (0.0 to 1.0)
    pub fill_opacity: f32,
    /// Stroke opacity (0.0 to 1.0)
    pub stroke_opacity: f32,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill_color: Color::rgb(0x40, 0xE0, 0xD0),
            stroke_color: Color::rgb(255, 255, 255),
            stroke_width: 1.0,
            fill_opacity: 0.5,
            stroke_opacity: 1.0,
        }
    }
}

impl PolygonStyle {
    /// Transient style while the pointer is over a shape
    pub fn hover() -> Self {
        Self {
            fill_color: Color::rgb(0x7F, 0xFF, 0xD4),
            fill_opacity: 0.7,
            ..Self::default()
        }
    }

    /// Style of the currently selected shape
    pub fn selected() -> Self {
        Self {
            fill_color: Color::rgb(0xFF, 0xB3, 0x00),
            stroke_color: Color::rgb(0xFF, 0xFF, 0xFF),
            stroke_width: 2.0,
            fill_opacity: 0.8,
            stroke_opacity: 1.0,
        }
    }
}

/// The three styles a region shape can be in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerStyles {
    pub default: PolygonStyle,
    pub hover: PolygonStyle,
    pub selected: PolygonStyle,
}

impl Default for LayerStyles {
    fn default() -> Self {
        Self {
            default: PolygonStyle::default(),
            hover: PolygonStyle::hover(),
            selected: PolygonStyle::selected(),
        }
    }
}
