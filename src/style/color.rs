//! Color resolution: named HTML colors, hex and `rgb()` notation.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    const fn hex(value: u32) -> Self {
        Self::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Uppercase `RRGGBB` form used by WordprocessingML.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// The 141 recognized color names.
static NAMED_COLORS: [(&str, Rgb); 141] = [
    ("aliceblue", Rgb::hex(0xF0F8FF)),
    ("antiquewhite", Rgb::hex(0xFAEBD7)),
    ("aqua", Rgb::hex(0x00FFFF)),
    ("aquamarine", Rgb::hex(0x7FFFD4)),
    ("azure", Rgb::hex(0xF0FFFF)),
    ("beige", Rgb::hex(0xF5F5DC)),
    ("bisque", Rgb::hex(0xFFE4C4)),
    ("black", Rgb::hex(0x000000)),
    ("blanchedalmond", Rgb::hex(0xFFEBCD)),
    ("blue", Rgb::hex(0x0000FF)),
    ("blueviolet", Rgb::hex(0x8A2BE2)),
    ("brown", Rgb::hex(0xA52A2A)),
    ("burlywood", Rgb::hex(0xDEB887)),
    ("cadetblue", Rgb::hex(0x5F9EA0)),
    ("chartreuse", Rgb::hex(0x7FFF00)),
    ("chocolate", Rgb::hex(0xD2691E)),
    ("coral", Rgb::hex(0xFF7F50)),
    ("cornflowerblue", Rgb::hex(0x6495ED)),
    ("cornsilk", Rgb::hex(0xFFF8DC)),
    ("crimson", Rgb::hex(0xDC143C)),
    ("cyan", Rgb::hex(0x00FFFF)),
    ("darkblue", Rgb::hex(0x00008B)),
    ("darkcyan", Rgb::hex(0x008B8B)),
    ("darkgoldenrod", Rgb::hex(0xB8860B)),
    ("darkgray", Rgb::hex(0xA9A9A9)),
    ("darkgreen", Rgb::hex(0x006400)),
    ("darkkhaki", Rgb::hex(0xBDB76B)),
    ("darkmagenta", Rgb::hex(0x8B008B)),
    ("darkolivegreen", Rgb::hex(0x556B2F)),
    ("darkorange", Rgb::hex(0xFF8C00)),
    ("darkorchid", Rgb::hex(0x9932CC)),
    ("darkred", Rgb::hex(0x8B0000)),
    ("darksalmon", Rgb::hex(0xE9967A)),
    ("darkseagreen", Rgb::hex(0x8FBC8F)),
    ("darkslateblue", Rgb::hex(0x483D8B)),
    ("darkslategray", Rgb::hex(0x2F4F4F)),
    ("darkturquoise", Rgb::hex(0x00CED1)),
    ("darkviolet", Rgb::hex(0x9400D3)),
    ("deeppink", Rgb::hex(0xFF1493)),
    ("deepskyblue", Rgb::hex(0x00BFFF)),
    ("dimgray", Rgb::hex(0x696969)),
    ("dodgerblue", Rgb::hex(0x1E90FF)),
    ("firebrick", Rgb::hex(0xB22222)),
    ("floralwhite", Rgb::hex(0xFFFAF0)),
    ("forestgreen", Rgb::hex(0x228B22)),
    ("fuchsia", Rgb::hex(0xFF00FF)),
    ("gainsboro", Rgb::hex(0xDCDCDC)),
    ("ghostwhite", Rgb::hex(0xF8F8FF)),
    ("gold", Rgb::hex(0xFFD700)),
    ("goldenrod", Rgb::hex(0xDAA520)),
    ("gray", Rgb::hex(0x808080)),
    ("green", Rgb::hex(0x008000)),
    ("greenyellow", Rgb::hex(0xADFF2F)),
    ("honeydew", Rgb::hex(0xF0FFF0)),
    ("hotpink", Rgb::hex(0xFF69B4)),
    ("indianred", Rgb::hex(0xCD5C5C)),
    ("indigo", Rgb::hex(0x4B0082)),
    ("ivory", Rgb::hex(0xFFFFF0)),
    ("khaki", Rgb::hex(0xF0E68C)),
    ("lavender", Rgb::hex(0xE6E6FA)),
    ("lavenderblush", Rgb::hex(0xFFF0F5)),
    ("lawngreen", Rgb::hex(0x7CFC00)),
    ("lemonchiffon", Rgb::hex(0xFFFACD)),
    ("lightblue", Rgb::hex(0xADD8E6)),
    ("lightcoral", Rgb::hex(0xF08080)),
    ("lightcyan", Rgb::hex(0xE0FFFF)),
    ("lightgoldenrodyellow", Rgb::hex(0xFAFAD2)),
    ("lightgray", Rgb::hex(0xD3D3D3)),
    ("lightgreen", Rgb::hex(0x90EE90)),
    ("lightpink", Rgb::hex(0xFFB6C1)),
    ("lightsalmon", Rgb::hex(0xFFA07A)),
    ("lightseagreen", Rgb::hex(0x20B2AA)),
    ("lightskyblue", Rgb::hex(0x87CEFA)),
    ("lightslategray", Rgb::hex(0x778899)),
    ("lightsteelblue", Rgb::hex(0xB0C4DE)),
    ("lightyellow", Rgb::hex(0xFFFFE0)),
    ("lime", Rgb::hex(0x00FF00)),
    ("limegreen", Rgb::hex(0x32CD32)),
    ("linen", Rgb::hex(0xFAF0E6)),
    ("magenta", Rgb::hex(0xFF00FF)),
    ("maroon", Rgb::hex(0x800000)),
    ("mediumaquamarine", Rgb::hex(0x66CDAA)),
    ("mediumblue", Rgb::hex(0x0000CD)),
    ("mediumorchid", Rgb::hex(0xBA55D3)),
    ("mediumpurple", Rgb::hex(0x9370DB)),
    ("mediumseagreen", Rgb::hex(0x3CB371)),
    ("mediumslateblue", Rgb::hex(0x7B68EE)),
    ("mediumspringgreen", Rgb::hex(0x00FA9A)),
    ("mediumturquoise", Rgb::hex(0x48D1CC)),
    ("mediumvioletred", Rgb::hex(0xC71585)),
    ("midnightblue", Rgb::hex(0x191970)),
    ("mintcream", Rgb::hex(0xF5FFFA)),
    ("mistyrose", Rgb::hex(0xFFE4E1)),
    ("moccasin", Rgb::hex(0xFFE4B5)),
    ("navajowhite", Rgb::hex(0xFFDEAD)),
    ("navy", Rgb::hex(0x000080)),
    ("oldlace", Rgb::hex(0xFDF5E6)),
    ("olive", Rgb::hex(0x808000)),
    ("olivedrab", Rgb::hex(0x6B8E23)),
    ("orange", Rgb::hex(0xFFA500)),
    ("orangered", Rgb::hex(0xFF4500)),
    ("orchid", Rgb::hex(0xDA70D6)),
    ("palegoldenrod", Rgb::hex(0xEEE8AA)),
    ("palegreen", Rgb::hex(0x98FB98)),
    ("paleturquoise", Rgb::hex(0xAFEEEE)),
    ("palevioletred", Rgb::hex(0xDB7093)),
    ("papayawhip", Rgb::hex(0xFFEFD5)),
    ("peachpuff", Rgb::hex(0xFFDAB9)),
    ("peru", Rgb::hex(0xCD853F)),
    ("pink", Rgb::hex(0xFFC0CB)),
    ("plum", Rgb::hex(0xDDA0DD)),
    ("powderblue", Rgb::hex(0xB0E0E6)),
    ("purple", Rgb::hex(0x800080)),
    ("rebeccapurple", Rgb::hex(0x663399)),
    ("red", Rgb::hex(0xFF0000)),
    ("rosybrown", Rgb::hex(0xBC8F8F)),
    ("royalblue", Rgb::hex(0x4169E1)),
    ("saddlebrown", Rgb::hex(0x8B4513)),
    ("salmon", Rgb::hex(0xFA8072)),
    ("sandybrown", Rgb::hex(0xF4A460)),
    ("seagreen", Rgb::hex(0x2E8B57)),
    ("seashell", Rgb::hex(0xFFF5EE)),
    ("sienna", Rgb::hex(0xA0522D)),
    ("silver", Rgb::hex(0xC0C0C0)),
    ("skyblue", Rgb::hex(0x87CEEB)),
    ("slateblue", Rgb::hex(0x6A5ACD)),
    ("slategray", Rgb::hex(0x708090)),
    ("snow", Rgb::hex(0xFFFAFA)),
    ("springgreen", Rgb::hex(0x00FF7F)),
    ("steelblue", Rgb::hex(0x4682B4)),
    ("tan", Rgb::hex(0xD2B48C)),
    ("teal", Rgb::hex(0x008080)),
    ("thistle", Rgb::hex(0xD8BFD8)),
    ("tomato", Rgb::hex(0xFF6347)),
    ("turquoise", Rgb::hex(0x40E0D0)),
    ("violet", Rgb::hex(0xEE82EE)),
    ("wheat", Rgb::hex(0xF5DEB3)),
    ("white", Rgb::hex(0xFFFFFF)),
    ("whitesmoke", Rgb::hex(0xF5F5F5)),
    ("yellow", Rgb::hex(0xFFFF00)),
    ("yellowgreen", Rgb::hex(0x9ACD32)),
];

static COLOR_INDEX: Lazy<HashMap<&'static str, Rgb>> =
    Lazy::new(|| NAMED_COLORS.iter().copied().collect());

/// All recognized color names with their values, in alphabetical order.
pub fn named_colors() -> &'static [(&'static str, Rgb)] {
    &NAMED_COLORS
}

/// Look up a color name (case-insensitive).
pub fn lookup_named(name: &str) -> Option<Rgb> {
    COLOR_INDEX.get(name.trim().to_ascii_lowercase().as_str()).copied()
}

/// Resolve a CSS color token to RGB.
///
/// Accepts one of the 141 color names, `#rgb`, `#rrggbb`, `rgb(r, g, b)` and
/// `rgba(r, g, b, a)` (alpha is dropped). Anything else is
/// [`Error::UnknownColor`]; no fallback color is substituted here.
pub fn resolve_color(token: &str) -> Result<Rgb> {
    let trimmed = token.trim();
    let lower = trimmed.to_ascii_lowercase();

    let resolved = if let Some(hex) = lower.strip_prefix('#') {
        parse_hex(hex)
    } else if lower.starts_with("rgb") {
        parse_rgb_function(&lower)
    } else {
        lookup_named(&lower)
    };

    resolved.ok_or_else(|| Error::UnknownColor(trimmed.to_string()))
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Rgb::new(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Rgb::new(pair(0)?, pair(2)?, pair(4)?))
        }
        _ => None,
    }
}

fn parse_rgb_function(s: &str) -> Option<Rgb> {
    let (args, arity) = if let Some(rest) = s.strip_prefix("rgba") {
        (rest, 4)
    } else {
        (s.strip_prefix("rgb")?, 3)
    };
    let inner = args.trim().strip_prefix('(')?.strip_suffix(')')?;
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != arity {
        return None;
    }

    let channel = |p: &str| p.parse::<u8>().ok();
    if arity == 4 && parts[3].parse::<f32>().is_err() {
        return None;
    }
    Some(Rgb::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?))
}
