//! Built-in stroke font for text annotations.
//!
//! Glyphs are polylines on a small grid and are drawn with a pen, so stroke
//! width acts as font weight and every size stays sharp. The grid has the cap
//! line at `y = 0`, the x-height at `y = 2`, the baseline at `y = 6` and
//! descenders down to `y = 8`; most glyphs are 4 units wide.
//!
//! A cap height of 6 units is 21 px at scale 1.0.
//!
//! Four families change how the same outlines are laid down:
//!
//! | Family | Effect |
//! |---|---|
//! | [`StrokeFamily::SansSimplex`] | single stroke, proportional |
//! | [`StrokeFamily::SerifTriplex`] | triple stroke, serifs on cap line and baseline |
//! | [`StrokeFamily::MonoDuplex`] | double stroke, fixed advance |
//! | [`StrokeFamily::ScriptComplex`] | double stroke, slanted |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Font face offered by the annotation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontFace {
    #[default]
    Arial,
    TimesNewRoman,
    Courier,
    Cursive,
}

/// Stroke style a [`FontFace`] is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrokeFamily {
    SansSimplex,
    SerifTriplex,
    MonoDuplex,
    ScriptComplex,
}

/// Normalized face names: lowercase ASCII alphanumerics only.
const FACE_NAMES: &[(&str, FontFace)] = &[
    ("arial", FontFace::Arial),
    ("timesnewroman", FontFace::TimesNewRoman),
    ("courier", FontFace::Courier),
    ("cursive", FontFace::Cursive),
];

const FACE_FAMILIES: &[(FontFace, StrokeFamily)] = &[
    (FontFace::Arial, StrokeFamily::SansSimplex),
    (FontFace::TimesNewRoman, StrokeFamily::SerifTriplex),
    (FontFace::Courier, StrokeFamily::MonoDuplex),
    (FontFace::Cursive, StrokeFamily::ScriptComplex),
];

const DEFAULT_FAMILY: StrokeFamily = StrokeFamily::SansSimplex;

impl FontFace {
    pub const ALL: [FontFace; 4] = [
        FontFace::Arial,
        FontFace::TimesNewRoman,
        FontFace::Courier,
        FontFace::Cursive,
    ];

    /// Look up a face by name, ignoring case, spaces and punctuation.
    /// Unknown names fall back to [`FontFace::Arial`].
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        FACE_NAMES
            .iter()
            .find(|(known, _)| *known == key)
            .map(|(_, face)| *face)
            .unwrap_or_else(|| {
                log::debug!("unknown font face {name:?}, using Arial");
                FontFace::default()
            })
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FontFace::Arial => "Arial",
            FontFace::TimesNewRoman => "Times New Roman",
            FontFace::Courier => "Courier",
            FontFace::Cursive => "Cursive",
        }
    }

    pub fn family(self) -> StrokeFamily {
        FACE_FAMILIES
            .iter()
            .find(|(face, _)| *face == self)
            .map(|(_, family)| *family)
            .unwrap_or(DEFAULT_FAMILY)
    }
}

impl fmt::Display for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl From<String> for FontFace {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<FontFace> for String {
    fn from(face: FontFace) -> Self {
        face.display_name().to_string()
    }
}

struct FamilyStyle {
    /// Horizontal shear per unit of height above the baseline.
    slant: f32,
    serifs: bool,
    /// Horizontal offsets, in grid units, of each pass of the pen.
    passes: &'static [f32],
    /// Fixed advance in grid units, for monospace.
    fixed_advance: Option<f32>,
}

impl StrokeFamily {
    fn style(self) -> FamilyStyle {
        match self {
            StrokeFamily::SansSimplex => FamilyStyle {
                slant: 0.0,
                serifs: false,
                passes: &[0.0],
                fixed_advance: None,
            },
            StrokeFamily::SerifTriplex => FamilyStyle {
                slant: 0.0,
                serifs: true,
                passes: &[-0.12, 0.0, 0.12],
                fixed_advance: None,
            },
            StrokeFamily::MonoDuplex => FamilyStyle {
                slant: 0.0,
                serifs: false,
                passes: &[0.0, 0.18],
                fixed_advance: Some(6.0),
            },
            StrokeFamily::ScriptComplex => FamilyStyle {
                slant: 0.3,
                serifs: false,
                passes: &[0.0, 0.12],
                fixed_advance: None,
            },
        }
    }
}

/// Pixel size of one grid unit at scale 1.0.
const UNIT_PX: f32 = 3.5;
const CAP_LINE: i8 = 0;
const BASELINE: i8 = 6;
const DESCENT_UNITS: f32 = 2.0;
const LETTER_SPACING: f32 = 2.0;
const SERIF_HALF_WIDTH: f32 = 0.6;

type Stroke = &'static [(i8, i8)];

struct Glyph {
    ch: char,
    width: i8,
    strokes: &'static [Stroke],
}

const fn g(ch: char, width: i8, strokes: &'static [Stroke]) -> Glyph {
    Glyph { ch, width, strokes }
}

#[rustfmt::skip]
const GLYPHS: &[Glyph] = &[
    g(' ', 3, &[]),
    g('A', 4, &[&[(0, 6), (2, 0), (4, 6)], &[(1, 3), (3, 3)]]),
    g('B', 4, &[&[(0, 6), (0, 0), (3, 0), (4, 1), (4, 2), (3, 3), (0, 3)], &[(3, 3), (4, 4), (4, 5), (3, 6), (0, 6)]]),
    g('C', 4, &[&[(4, 1), (3, 0), (1, 0), (0, 1), (0, 5), (1, 6), (3, 6), (4, 5)]]),
    g('D', 4, &[&[(0, 0), (0, 6), (2, 6), (4, 4), (4, 2), (2, 0), (0, 0)]]),
    g('E', 4, &[&[(4, 0), (0, 0), (0, 6), (4, 6)], &[(0, 3), (3, 3)]]),
    g('F', 4, &[&[(4, 0), (0, 0), (0, 6)], &[(0, 3), (3, 3)]]),
    g('G', 4, &[&[(4, 1), (3, 0), (1, 0), (0, 1), (0, 5), (1, 6), (3, 6), (4, 5), (4, 3), (2, 3)]]),
    g('H', 4, &[&[(0, 0), (0, 6)], &[(4, 0), (4, 6)], &[(0, 3), (4, 3)]]),
    g('I', 2, &[&[(0, 0), (2, 0)], &[(1, 0), (1, 6)], &[(0, 6), (2, 6)]]),
    g('J', 4, &[&[(4, 0), (4, 5), (3, 6), (1, 6), (0, 5)]]),
    g('K', 4, &[&[(0, 0), (0, 6)], &[(4, 0), (0, 4)], &[(1, 3), (4, 6)]]),
    g('L', 4, &[&[(0, 0), (0, 6), (4, 6)]]),
    g('M', 4, &[&[(0, 6), (0, 0), (2, 3), (4, 0), (4, 6)]]),
    g('N', 4, &[&[(0, 6), (0, 0), (4, 6), (4, 0)]]),
    g('O', 4, &[&[(1, 0), (3, 0), (4, 1), (4, 5), (3, 6), (1, 6), (0, 5), (0, 1), (1, 0)]]),
    g('P', 4, &[&[(0, 6), (0, 0), (3, 0), (4, 1), (4, 2), (3, 3), (0, 3)]]),
    g('Q', 4, &[&[(1, 0), (3, 0), (4, 1), (4, 5), (3, 6), (1, 6), (0, 5), (0, 1), (1, 0)], &[(2, 4), (4, 6)]]),
    g('R', 4, &[&[(0, 6), (0, 0), (3, 0), (4, 1), (4, 2), (3, 3), (0, 3)], &[(2, 3), (4, 6)]]),
    g('S', 4, &[&[(4, 1), (3, 0), (1, 0), (0, 1), (0, 2), (1, 3), (3, 3), (4, 4), (4, 5), (3, 6), (1, 6), (0, 5)]]),
    g('T', 4, &[&[(0, 0), (4, 0)], &[(2, 0), (2, 6)]]),
    g('U', 4, &[&[(0, 0), (0, 5), (1, 6), (3, 6), (4, 5), (4, 0)]]),
    g('V', 4, &[&[(0, 0), (2, 6), (4, 0)]]),
    g('W', 4, &[&[(0, 0), (1, 6), (2, 3), (3, 6), (4, 0)]]),
    g('X', 4, &[&[(0, 0), (4, 6)], &[(4, 0), (0, 6)]]),
    g('Y', 4, &[&[(0, 0), (2, 3), (4, 0)], &[(2, 3), (2, 6)]]),
    g('Z', 4, &[&[(0, 0), (4, 0), (0, 6), (4, 6)]]),
    g('a', 4, &[&[(1, 2), (3, 2), (4, 3), (4, 6)], &[(4, 4), (1, 4), (0, 5), (1, 6), (3, 6), (4, 5)]]),
    g('b', 4, &[&[(0, 0), (0, 6)], &[(0, 3), (1, 2), (3, 2), (4, 3), (4, 5), (3, 6), (1, 6), (0, 5)]]),
    g('c', 4, &[&[(4, 3), (3, 2), (1, 2), (0, 3), (0, 5), (1, 6), (3, 6), (4, 5)]]),
    g('d', 4, &[&[(4, 0), (4, 6)], &[(4, 3), (3, 2), (1, 2), (0, 3), (0, 5), (1, 6), (3, 6), (4, 5)]]),
    g('e', 4, &[&[(0, 4), (4, 4), (4, 3), (3, 2), (1, 2), (0, 3), (0, 5), (1, 6), (3, 6), (4, 5)]]),
    g('f', 3, &[&[(3, 0), (2, 0), (1, 1), (1, 6)], &[(0, 2), (3, 2)]]),
    g('g', 4, &[&[(4, 2), (4, 7), (3, 8), (1, 8), (0, 7)], &[(4, 3), (3, 2), (1, 2), (0, 3), (0, 5), (1, 6), (3, 6), (4, 5)]]),
    g('h', 4, &[&[(0, 0), (0, 6)], &[(0, 3), (1, 2), (3, 2), (4, 3), (4, 6)]]),
    g('i', 0, &[&[(0, 2), (0, 6)], &[(0, 0), (0, 1)]]),
    g('j', 3, &[&[(3, 2), (3, 7), (2, 8), (1, 8), (0, 7)], &[(3, 0), (3, 1)]]),
    g('k', 4, &[&[(0, 0), (0, 6)], &[(4, 2), (0, 5)], &[(1, 4), (4, 6)]]),
    g('l', 2, &[&[(0, 0), (1, 0), (1, 6)], &[(0, 6), (2, 6)]]),
    g('m', 4, &[&[(0, 6), (0, 2)], &[(0, 3), (1, 2), (2, 3), (2, 6)], &[(2, 3), (3, 2), (4, 3), (4, 6)]]),
    g('n', 4, &[&[(0, 6), (0, 2)], &[(0, 3), (1, 2), (3, 2), (4, 3), (4, 6)]]),
    g('o', 4, &[&[(1, 2), (3, 2), (4, 3), (4, 5), (3, 6), (1, 6), (0, 5), (0, 3), (1, 2)]]),
    g('p', 4, &[&[(0, 2), (0, 8)], &[(0, 3), (1, 2), (3, 2), (4, 3), (4, 5), (3, 6), (1, 6), (0, 5)]]),
    g('q', 4, &[&[(4, 2), (4, 8)], &[(4, 3), (3, 2), (1, 2), (0, 3), (0, 5), (1, 6), (3, 6), (4, 5)]]),
    g('r', 4, &[&[(0, 2), (0, 6)], &[(0, 4), (2, 2), (4, 2)]]),
    g('s', 4, &[&[(4, 2), (1, 2), (0, 3), (1, 4), (3, 4), (4, 5), (3, 6), (0, 6)]]),
    g('t', 3, &[&[(1, 0), (1, 5), (2, 6), (3, 6)], &[(0, 2), (3, 2)]]),
    g('u', 4, &[&[(0, 2), (0, 5), (1, 6), (3, 6), (4, 5)], &[(4, 2), (4, 6)]]),
    g('v', 4, &[&[(0, 2), (2, 6), (4, 2)]]),
    g('w', 4, &[&[(0, 2), (1, 6), (2, 4), (3, 6), (4, 2)]]),
    g('x', 4, &[&[(0, 2), (4, 6)], &[(4, 2), (0, 6)]]),
    g('y', 4, &[&[(0, 2), (2, 6)], &[(4, 2), (2, 6), (1, 8), (0, 8)]]),
    g('z', 4, &[&[(0, 2), (4, 2), (0, 6), (4, 6)]]),
    g('0', 4, &[&[(1, 0), (3, 0), (4, 1), (4, 5), (3, 6), (1, 6), (0, 5), (0, 1), (1, 0)], &[(0, 5), (4, 1)]]),
    g('1', 2, &[&[(0, 1), (1, 0), (1, 6)], &[(0, 6), (2, 6)]]),
    g('2', 4, &[&[(0, 1), (1, 0), (3, 0), (4, 1), (4, 2), (0, 6), (4, 6)]]),
    g('3', 4, &[&[(0, 1), (1, 0), (3, 0), (4, 1), (4, 2), (3, 3), (1, 3)], &[(3, 3), (4, 4), (4, 5), (3, 6), (1, 6), (0, 5)]]),
    g('4', 4, &[&[(3, 6), (3, 0), (0, 4), (4, 4)]]),
    g('5', 4, &[&[(4, 0), (0, 0), (0, 3), (3, 3), (4, 4), (4, 5), (3, 6), (1, 6), (0, 5)]]),
    g('6', 4, &[&[(3, 0), (1, 0), (0, 1), (0, 5), (1, 6), (3, 6), (4, 5), (4, 4), (3, 3), (0, 3)]]),
    g('7', 4, &[&[(0, 0), (4, 0), (1, 6)]]),
    g('8', 4, &[&[(1, 3), (0, 2), (0, 1), (1, 0), (3, 0), (4, 1), (4, 2), (3, 3), (1, 3), (0, 4), (0, 5), (1, 6), (3, 6), (4, 5), (4, 4), (3, 3)]]),
    g('9', 4, &[&[(4, 3), (1, 3), (0, 2), (0, 1), (1, 0), (3, 0), (4, 1), (4, 5), (3, 6), (1, 6)]]),
    g('.', 0, &[&[(0, 5), (0, 6)]]),
    g(',', 1, &[&[(1, 5), (1, 6), (0, 7)]]),
    g(':', 0, &[&[(0, 2), (0, 3)], &[(0, 5), (0, 6)]]),
    g(';', 1, &[&[(1, 2), (1, 3)], &[(1, 5), (1, 6), (0, 7)]]),
    g('!', 0, &[&[(0, 0), (0, 4)], &[(0, 5), (0, 6)]]),
    g('?', 4, &[&[(0, 1), (1, 0), (3, 0), (4, 1), (4, 2), (2, 3), (2, 4)], &[(2, 5), (2, 6)]]),
    g('\'', 0, &[&[(0, 0), (0, 2)]]),
    g('"', 2, &[&[(0, 0), (0, 2)], &[(2, 0), (2, 2)]]),
    g('-', 4, &[&[(0, 3), (4, 3)]]),
    g('+', 4, &[&[(0, 3), (4, 3)], &[(2, 1), (2, 5)]]),
    g('=', 4, &[&[(0, 2), (4, 2)], &[(0, 4), (4, 4)]]),
    g('_', 4, &[&[(0, 7), (4, 7)]]),
    g('/', 4, &[&[(0, 6), (4, 0)]]),
    g('\\', 4, &[&[(0, 0), (4, 6)]]),
    g('|', 0, &[&[(0, -1), (0, 7)]]),
    g('(', 2, &[&[(2, -1), (0, 2), (0, 4), (2, 7)]]),
    g(')', 2, &[&[(0, -1), (2, 2), (2, 4), (0, 7)]]),
    g('[', 2, &[&[(2, -1), (0, -1), (0, 7), (2, 7)]]),
    g(']', 2, &[&[(0, -1), (2, -1), (2, 7), (0, 7)]]),
    g('<', 4, &[&[(4, 1), (0, 3), (4, 5)]]),
    g('>', 4, &[&[(0, 1), (4, 3), (0, 5)]]),
    g('#', 4, &[&[(1, 0), (1, 6)], &[(3, 0), (3, 6)], &[(0, 2), (4, 2)], &[(0, 4), (4, 4)]]),
    g('*', 4, &[&[(2, 1), (2, 5)], &[(0, 2), (4, 4)], &[(4, 2), (0, 4)]]),
    g('%', 4, &[&[(0, 6), (4, 0)], &[(0, 0), (1, 0), (1, 1), (0, 1), (0, 0)], &[(3, 5), (4, 5), (4, 6), (3, 6), (3, 5)]]),
];

const FALLBACK: char = '?';

fn glyph(ch: char) -> &'static Glyph {
    GLYPHS
        .iter()
        .find(|glyph| glyph.ch == ch)
        .or_else(|| GLYPHS.iter().find(|glyph| glyph.ch == FALLBACK))
        .unwrap_or(&GLYPHS[0])
}

/// A polyline in image pixel coordinates.
pub type Polyline = Vec<(f32, f32)>;

/// Size of a rendered string, in pixels, excluding the pen width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    /// Cap height: from the cap line down to the baseline.
    pub height: f32,
    /// Depth of descenders below the baseline.
    pub baseline: f32,
}

fn advance(glyph: &Glyph, style: &FamilyStyle) -> f32 {
    style
        .fixed_advance
        .unwrap_or(f32::from(glyph.width) + LETTER_SPACING)
}

/// Measure `content` as [`layout`] would draw it.
pub fn measure_text(content: &str, family: StrokeFamily, scale: f32) -> TextExtent {
    let style = family.style();
    let unit = UNIT_PX * scale;
    let total: f32 = content.chars().map(|ch| advance(glyph(ch), &style)).sum();
    // The last glyph needs no trailing spacing.
    let width = if content.is_empty() || style.fixed_advance.is_some() {
        total
    } else {
        total - LETTER_SPACING
    };
    TextExtent {
        width: width * unit,
        height: f32::from(BASELINE - CAP_LINE) * unit,
        baseline: DESCENT_UNITS * unit,
    }
}

/// Lay out `content` with its baseline starting at `origin` (bottom-left of
/// the first glyph), returning the pen strokes in pixel coordinates.
pub fn layout(content: &str, family: StrokeFamily, origin: (f32, f32), scale: f32) -> Vec<Polyline> {
    let style = family.style();
    let unit = UNIT_PX * scale;
    let (ox, oy) = origin;
    let to_px = |pen_x: f32, gx: f32, gy: f32| {
        let above_baseline = f32::from(BASELINE) - gy;
        (
            ox + (pen_x + gx + style.slant * above_baseline) * unit,
            oy - above_baseline * unit,
        )
    };

    let mut lines = Vec::new();
    let mut pen_x = 0.0;
    for ch in content.chars() {
        let glyph = glyph(ch);
        let mut outlines: Vec<Vec<(f32, f32)>> = glyph
            .strokes
            .iter()
            .map(|stroke| {
                stroke
                    .iter()
                    .map(|&(x, y)| (f32::from(x), f32::from(y)))
                    .collect()
            })
            .collect();
        if style.serifs {
            outlines.extend(serifs(glyph.strokes));
        }
        for &offset in style.passes {
            for outline in &outlines {
                lines.push(
                    outline
                        .iter()
                        .map(|&(gx, gy)| to_px(pen_x + offset, gx, gy))
                        .collect(),
                );
            }
        }
        pen_x += advance(glyph, &style);
    }
    lines
}

/// Short horizontal ticks where a vertical stroke ends on the cap line or
/// the baseline.
fn serifs(strokes: &[Stroke]) -> Vec<Vec<(f32, f32)>> {
    let mut ticks = Vec::new();
    for stroke in strokes {
        let ends = [
            stroke.first().zip(stroke.get(1)),
            stroke.last().zip(stroke.len().checked_sub(2).and_then(|i| stroke.get(i))),
        ];
        for (&(x, y), &(nx, _)) in ends.into_iter().flatten() {
            if x == nx && (y == CAP_LINE || y == BASELINE) {
                let (x, y) = (f32::from(x), f32::from(y));
                ticks.push(vec![(x - SERIF_HALF_WIDTH, y), (x + SERIF_HALF_WIDTH, y)]);
            }
        }
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_lookup_ignores_case_and_spacing() {
        assert_eq!(FontFace::from_name("Times New Roman"), FontFace::TimesNewRoman);
        assert_eq!(FontFace::from_name("times_new_roman"), FontFace::TimesNewRoman);
        assert_eq!(FontFace::from_name("COURIER"), FontFace::Courier);
        assert_eq!(FontFace::from_name("cursive"), FontFace::Cursive);
    }

    #[test]
    fn unknown_face_defaults_to_arial() {
        assert_eq!(FontFace::from_name("Comic Sans"), FontFace::Arial);
        assert_eq!(FontFace::from_name(""), FontFace::Arial);
        assert_eq!(FontFace::from_name("Comic Sans").family(), StrokeFamily::SansSimplex);
    }

    #[test]
    fn faces_map_to_families() {
        assert_eq!(FontFace::Arial.family(), StrokeFamily::SansSimplex);
        assert_eq!(FontFace::TimesNewRoman.family(), StrokeFamily::SerifTriplex);
        assert_eq!(FontFace::Courier.family(), StrokeFamily::MonoDuplex);
        assert_eq!(FontFace::Cursive.family(), StrokeFamily::ScriptComplex);
    }

    #[test]
    fn display_names_round_trip() {
        for face in FontFace::ALL {
            assert_eq!(FontFace::from_name(face.display_name()), face);
        }
    }

    #[test]
    fn glyph_table_has_no_duplicates_and_stays_on_grid() {
        for (i, a) in GLYPHS.iter().enumerate() {
            assert!(
                GLYPHS[i + 1..].iter().all(|b| b.ch != a.ch),
                "duplicate glyph {:?}",
                a.ch
            );
            for stroke in a.strokes {
                assert!(stroke.len() >= 2, "glyph {:?} has a one-point stroke", a.ch);
                for &(x, y) in *stroke {
                    assert!((0..=a.width).contains(&x), "glyph {:?} x={x}", a.ch);
                    assert!((-1..=8).contains(&y), "glyph {:?} y={y}", a.ch);
                }
            }
        }
    }

    #[test]
    fn covers_printable_letters_and_digits() {
        for ch in ('A'..='Z').chain('a'..='z').chain('0'..='9') {
            assert_eq!(glyph(ch).ch, ch);
        }
    }

    #[test]
    fn unknown_characters_render_as_question_mark() {
        assert_eq!(glyph('€').ch, '?');
        assert_eq!(glyph('\n').ch, '?');
    }

    #[test]
    fn cap_height_is_21px_at_scale_one() {
        let extent = measure_text("H", StrokeFamily::SansSimplex, 1.0);
        assert!((extent.height - 21.0).abs() < 1e-4);
        assert!((extent.width - 14.0).abs() < 1e-4);
    }

    #[test]
    fn extent_scales_linearly() {
        let one = measure_text("Hello", StrokeFamily::SansSimplex, 1.0);
        let two = measure_text("Hello", StrokeFamily::SansSimplex, 2.0);
        assert!((two.width - 2.0 * one.width).abs() < 1e-3);
        assert!((two.height - 2.0 * one.height).abs() < 1e-3);
    }

    #[test]
    fn monospace_advance_is_fixed() {
        let narrow = measure_text("iii", StrokeFamily::MonoDuplex, 1.0);
        let wide = measure_text("MMM", StrokeFamily::MonoDuplex, 1.0);
        assert_eq!(narrow.width, wide.width);
    }

    #[test]
    fn empty_text_has_no_strokes() {
        assert!(layout("", StrokeFamily::SansSimplex, (0.0, 0.0), 1.0).is_empty());
        assert_eq!(measure_text("", StrokeFamily::SansSimplex, 1.0).width, 0.0);
    }

    #[test]
    fn layout_sits_on_the_baseline() {
        let lines = layout("L", StrokeFamily::SansSimplex, (10.0, 50.0), 1.0);
        assert_eq!(lines, vec![vec![(10.0, 29.0), (10.0, 50.0), (24.0, 50.0)]]);
    }

    #[test]
    fn script_slants_to_the_right() {
        let upright = layout("l", StrokeFamily::SansSimplex, (0.0, 30.0), 1.0);
        let slanted = layout("l", StrokeFamily::ScriptComplex, (0.0, 30.0), 1.0);
        // Top of the stem moves right, foot stays put.
        assert!(slanted[0][0].0 > upright[0][0].0);
        assert_eq!(slanted[0][2].1, upright[0][2].1);
    }

    #[test]
    fn families_differ_in_pass_count() {
        let count = |family| layout("T", family, (0.0, 30.0), 1.0).len();
        assert_eq!(count(StrokeFamily::SansSimplex), 2);
        assert_eq!(count(StrokeFamily::MonoDuplex), 4);
        // Two strokes plus a serif at each end of the stem, three passes.
        assert_eq!(count(StrokeFamily::SerifTriplex), 12);
    }

    #[test]
    fn serifs_only_on_vertical_ends() {
        let h = serifs(glyph('H').strokes);
        assert_eq!(h.len(), 4);
        assert!(serifs(glyph('X').strokes).is_empty());
    }
}
