// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::LazyLock;

use peniko::Color;
use peniko::color::palette::css;

/// A solid paint: a color plus an opacity factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    color: Color,
    opacity: f64,
}

impl Brush {
    /// A fully transparent brush.
    pub const TRANSPARENT: Self = Self::solid(Color::TRANSPARENT);

    /// An opaque brush of the given color.
    pub const fn solid(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    /// The same brush with a different opacity factor.
    ///
    /// Opacity multiplies on top of the color's own alpha when painting.
    pub const fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// The brush color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// The opacity factor.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Parses a brush from a string.
    ///
    /// Strings starting with `#` are hex colors: `#rgb`, `#argb`, `#rrggbb`
    /// or `#aarrggbb`, with alpha leading as in XAML; the 3- and 6-digit
    /// forms are opaque. Anything else is looked up in `palette`, case
    /// insensitively.
    pub fn parse(s: &str, palette: &BrushPalette) -> Result<Self, ParseBrushError> {
        if let Some(hex) = s.strip_prefix('#') {
            return match parse_hex(hex) {
                Some(color) => Ok(Self::solid(color)),
                None => Err(ParseBrushError::InvalidColor {
                    input: s.to_owned(),
                }),
            };
        }
        match palette.get(s) {
            Some(color) => Ok(Self::solid(color)),
            None => Err(ParseBrushError::UnknownName {
                input: s.to_owned(),
            }),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    fn nibble(c: char) -> Option<u8> {
        u8::try_from(c.to_digit(16)?).ok()
    }
    fn pair(hi: char, lo: char) -> Option<u8> {
        Some(nibble(hi)? * 16 + nibble(lo)?)
    }

    let digits: Vec<char> = hex.chars().collect();
    let (a, r, g, b) = match digits[..] {
        [r, g, b] => (0xFF, nibble(r)? * 0x11, nibble(g)? * 0x11, nibble(b)? * 0x11),
        [a, r, g, b] => (
            nibble(a)? * 0x11,
            nibble(r)? * 0x11,
            nibble(g)? * 0x11,
            nibble(b)? * 0x11,
        ),
        [r1, r0, g1, g0, b1, b0] => (0xFF, pair(r1, r0)?, pair(g1, g0)?, pair(b1, b0)?),
        [a1, a0, r1, r0, g1, g0, b1, b0] => (
            pair(a1, a0)?,
            pair(r1, r0)?,
            pair(g1, g0)?,
            pair(b1, b0)?,
        ),
        _ => return None,
    };
    Some(Color::from_rgba8(r, g, b, a))
}

/// Error returned by [`Brush::parse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseBrushError {
    /// A `#` string that is not a well-formed hex color.
    InvalidColor {
        /// The offending input.
        input: String,
    },
    /// A name the palette does not know.
    UnknownName {
        /// The offending input.
        input: String,
    },
}

impl fmt::Display for ParseBrushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor { input } => write!(f, "invalid brush string: `{input}`"),
            Self::UnknownName { input } => write!(f, "unknown brush name: `{input}`"),
        }
    }
}

impl Error for ParseBrushError {}

/// A case-insensitive name-to-color registry, consumed by [`Brush::parse`].
///
/// Palettes are plain values built where they are needed;
/// [`standard`](Self::standard) is the built-in table of common CSS names.
#[derive(Clone, Debug, Default)]
pub struct BrushPalette {
    colors: HashMap<String, Color>,
}

impl BrushPalette {
    /// Creates an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named color, replacing any previous entry of that name.
    pub fn insert(&mut self, name: &str, color: Color) {
        self.colors.insert(name.to_ascii_lowercase(), color);
    }

    /// Looks a name up, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(&name.to_ascii_lowercase()).copied()
    }

    /// Number of named colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The built-in table of standard color names.
    pub fn standard() -> &'static Self {
        static STANDARD: LazyLock<BrushPalette> = LazyLock::new(|| {
            let mut palette = BrushPalette::new();
            for (name, color) in STANDARD_COLORS {
                palette.insert(name, *color);
            }
            palette
        });
        &STANDARD
    }
}

const STANDARD_COLORS: &[(&str, Color)] = &[
    ("aqua", css::AQUA),
    ("azure", css::AZURE),
    ("black", css::BLACK),
    ("blue", css::BLUE),
    ("brown", css::BROWN),
    ("coral", css::CORAL),
    ("crimson", css::CRIMSON),
    ("cyan", css::CYAN),
    ("darkgray", css::DARK_GRAY),
    ("dimgray", css::DIM_GRAY),
    ("fuchsia", css::FUCHSIA),
    ("gold", css::GOLD),
    ("gray", css::GRAY),
    ("green", css::GREEN),
    ("hotpink", css::HOT_PINK),
    ("indigo", css::INDIGO),
    ("ivory", css::IVORY),
    ("khaki", css::KHAKI),
    ("lavender", css::LAVENDER),
    ("lightblue", css::LIGHT_BLUE),
    ("lightgray", css::LIGHT_GRAY),
    ("lime", css::LIME),
    ("magenta", css::MAGENTA),
    ("maroon", css::MAROON),
    ("navy", css::NAVY),
    ("olive", css::OLIVE),
    ("orange", css::ORANGE),
    ("orangered", css::ORANGE_RED),
    ("pink", css::PINK),
    ("plum", css::PLUM),
    ("purple", css::PURPLE),
    ("red", css::RED),
    ("royalblue", css::ROYAL_BLUE),
    ("salmon", css::SALMON),
    ("seashell", css::SEASHELL),
    ("silver", css::SILVER),
    ("snow", css::SNOW),
    ("steelblue", css::STEEL_BLUE),
    ("teal", css::TEAL),
    ("transparent", Color::TRANSPARENT),
    ("turquoise", css::TURQUOISE),
    ("violet", css::VIOLET),
    ("white", css::WHITE),
    ("yellow", css::YELLOW),
];
