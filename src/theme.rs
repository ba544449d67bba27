use std::path::Path;

use rand::Rng;
use serde::Deserialize;

use crate::types::Rgb;

const DEFAULT_PRIMARY: Rgb = Rgb::new(0x7f, 0x5a, 0xf0);
const DEFAULT_PRIMARY_DARK: Rgb = Rgb::new(0x5a, 0x3e, 0xc8);
const DEFAULT_GRAY_DARK: Rgb = Rgb::new(0x72, 0x75, 0x7e);

/// The three named colors the field bodies draw from. Mirrors the custom
/// properties a page theme would expose: `primary`, `primary-dark`,
/// `gray-dark`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub primary: Rgb,
    pub primary_dark: Rgb,
    pub gray_dark: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY,
            primary_dark: DEFAULT_PRIMARY_DARK,
            gray_dark: DEFAULT_GRAY_DARK,
        }
    }
}

/// On-disk form of a theme. Every entry is optional; missing or malformed
/// values fall back to the defaults rather than failing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThemeFile {
    primary: Option<String>,
    primary_dark: Option<String>,
    gray_dark: Option<String>,
}

impl Theme {
    /// Loads a theme from a YAML file. Any failure (missing file, bad YAML,
    /// unparsable color) degrades silently to the default for that slot —
    /// a decorative scene must never refuse to start over a color.
    pub fn load(path: &Path) -> Theme {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return Theme::default(),
        };
        let file: ThemeFile = match serde_yaml::from_str(&text) {
            Ok(file) => file,
            Err(_) => return Theme::default(),
        };
        Theme::from_file(file)
    }

    fn from_file(file: ThemeFile) -> Theme {
        let defaults = Theme::default();
        Theme {
            primary: resolve(file.primary, defaults.primary),
            primary_dark: resolve(file.primary_dark, defaults.primary_dark),
            gray_dark: resolve(file.gray_dark, defaults.gray_dark),
        }
    }

    /// Picks one of the three theme colors uniformly at random.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Rgb {
        match rng.gen_range(0..3) {
            0 => self.primary,
            1 => self.primary_dark,
            _ => self.gray_dark,
        }
    }
}

fn resolve(value: Option<String>, default: Rgb) -> Rgb {
    value.as_deref().and_then(parse_hex).unwrap_or(default)
}

/// Parses `#rgb` or `#rrggbb`. Returns `None` for anything else.
pub fn parse_hex(s: &str) -> Option<Rgb> {
    let s = s.trim().strip_prefix('#')?;
    // Byte-indexed slicing below; multibyte input must bail out, not panic.
    if !s.is_ascii() {
        return None;
    }
    match s.len() {
        3 => {
            let r = u8::from_str_radix(&s[0..1], 16).ok()?;
            let g = u8::from_str_radix(&s[1..2], 16).ok()?;
            let b = u8::from_str_radix(&s[2..3], 16).ok()?;
            Some(Rgb::new(r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}
