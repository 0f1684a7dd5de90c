// src/graph/color.rs
// =============================================================================
// Group coloring.
//
// Files are grouped (by directory, or one group per file) and every group gets
// a dark, random-hue color. Within one assignment no two groups share a color.
//
// Colors are rejection sampled: draw a random dark color, redraw if it is
// already taken. The number of random draws per group is capped; past the cap
// the palette is walked in a fixed order and the first unused color is taken.
// The palette is finite (hue x saturation x lightness steps), so assignment
// always terminates. Only once every palette color is in use does a group
// have to share one, which needs more groups than there are dark colors.
// =============================================================================

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use rand::Rng;
use serde::{Serialize, Serializer};
use tracing::warn;

// Random draws allowed per group before falling back to the palette walk
pub const MAX_COLOR_DRAWS: usize = 64;

// Dark luminosity band (HSL, percent)
const SATURATION: std::ops::RangeInclusive<u16> = 55..=90;
const LIGHTNESS: std::ops::RangeInclusive<u16> = 20..=35;

// Hue stride for the fallback walk; coprime with 360 so every hue is visited
const HUE_STRIDE: u16 = 137;

// How files are grouped for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingMode {
    /// One group per directory (path before the final '/')
    #[default]
    Directory,
    /// One group per file (keyed by the full path)
    File,
}

impl GroupingMode {
    // Group key for a path
    //
    // Directory mode: "src/components/App.js" -> "src/components".
    // A path with no '/' is its own singleton group keyed by the path itself.
    pub fn group_key(self, path: &str) -> &str {
        match self {
            GroupingMode::Directory => match path.rfind('/') {
                Some(slash) => &path[..slash],
                None => path,
            },
            GroupingMode::File => path,
        }
    }
}

// An sRGB color, displayed and serialized as "#rrggbb"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    // Converts HSL (hue in degrees, saturation and lightness in percent)
    pub fn from_hsl(hue: u16, saturation: u16, lightness: u16) -> Self {
        let h = f64::from(hue % 360) / 60.0;
        let s = f64::from(saturation.min(100)) / 100.0;
        let l = f64::from(lightness.min(100)) / 100.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u8 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// One random dark color
pub fn draw_dark_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::from_hsl(
        rng.gen_range(0..360),
        rng.gen_range(SATURATION),
        rng.gen_range(LIGHTNESS),
    )
}

// Every dark palette color in a fixed order, hues spread out first
fn palette_walk() -> impl Iterator<Item = Color> {
    LIGHTNESS.rev().flat_map(|lightness| {
        SATURATION.rev().flat_map(move |saturation| {
            (0..360u16).map(move |step| {
                let hue = (step * HUE_STRIDE) % 360;
                Color::from_hsl(hue, saturation, lightness)
            })
        })
    })
}

// Mapping from group key to color for one build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColorAssignment {
    colors: BTreeMap<String, Color>,
}

impl ColorAssignment {
    // Assigns a distinct color to every distinct key
    //
    // Duplicate keys keep the color of their first occurrence.
    pub fn assign<'k, I, R>(keys: I, rng: &mut R) -> Self
    where
        I: IntoIterator<Item = &'k str>,
        R: Rng + ?Sized,
    {
        let mut colors = BTreeMap::new();
        let mut used = HashSet::new();

        for key in keys {
            if colors.contains_key(key) {
                continue;
            }
            let color = pick_unused(rng, &used);
            used.insert(color);
            colors.insert(key.to_string(), color);
        }

        Self { colors }
    }

    pub fn get(&self, key: &str) -> Option<&Color> {
        self.colors.get(key)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    // (key, color) pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Color)> {
        self.colors.iter().map(|(key, color)| (key.as_str(), color))
    }
}

fn pick_unused<R: Rng + ?Sized>(rng: &mut R, used: &HashSet<Color>) -> Color {
    for _ in 0..MAX_COLOR_DRAWS {
        let color = draw_dark_color(rng);
        if !used.contains(&color) {
            return color;
        }
    }

    if let Some(color) = palette_walk().find(|color| !used.contains(color)) {
        return color;
    }

    warn!(groups = used.len(), "dark palette exhausted, reusing a color");
    draw_dark_color(rng)
}
