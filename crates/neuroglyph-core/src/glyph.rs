//! Bitmap glyphs and glyph tables.
//!
//! A glyph is a small grid of cells. Pattern strings use `1` for a filled
//! cell, `0` for a hollow (outline-only) cell and `.` or a space for an
//! implicit blank that produces no primitive at all. Rows may be ragged; the
//! glyph is as wide as its widest row.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;
use strum_macros::{Display, IntoStaticStr};

use crate::{Error, Result};

/// Drawable state of one glyph cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum Cell {
    Filled,
    Hollow,
}

/// One character's bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    rows: Vec<Vec<Option<Cell>>>,
    width: usize,
}

impl Glyph {
    /// Parse pattern rows, rejecting anything but `1`, `0`, `.` and space.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::config_invalid("glyph has no rows"));
        }
        for (row_idx, row) in rows.iter().enumerate() {
            if let Some(bad) = row
                .as_ref()
                .chars()
                .find(|c| !matches!(c, '1' | '0' | '.' | ' '))
            {
                return Err(Error::config_invalid(format!(
                    "unexpected cell marker {bad:?} in row {row_idx}"
                )));
            }
        }
        Ok(Self::from_pattern(rows))
    }

    fn from_pattern<S: AsRef<str>>(rows: &[S]) -> Self {
        let rows: Vec<Vec<Option<Cell>>> = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .map(|c| match c {
                        '1' => Some(Cell::Filled),
                        '0' => Some(Cell::Hollow),
                        _ => None,
                    })
                    .collect()
            })
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    /// Width in cells (widest row).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells (row count).
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Declared cells as `(row, col, cell)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|cell| (row, col, cell)))
        })
    }
}

/// Case that table keys are stored in; input text is folded to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCase {
    #[default]
    Upper,
    Lower,
    Preserve,
}

impl KeyCase {
    fn fold(&self, text: &str) -> String {
        match self {
            KeyCase::Upper => text.to_uppercase(),
            KeyCase::Lower => text.to_lowercase(),
            KeyCase::Preserve => text.to_string(),
        }
    }
}

/// Immutable character-to-glyph map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
    glyphs: BTreeMap<char, Glyph>,
    key_case: KeyCase,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct FontFile {
    #[serde(default)]
    key_case: KeyCase,
    glyphs: BTreeMap<String, Vec<String>>,
}

impl GlyphTable {
    /// The built-in 3x5 upper-case font, built once per process.
    pub fn builtin() -> &'static GlyphTable {
        static TABLE: OnceLock<GlyphTable> = OnceLock::new();
        TABLE.get_or_init(|| GlyphTable {
            glyphs: BUILTIN_FONT
                .iter()
                .map(|(ch, rows)| (*ch, Glyph::from_pattern(rows)))
                .collect(),
            key_case: KeyCase::Upper,
        })
    }

    /// Build a table from in-memory patterns; keys are folded to `key_case`.
    pub fn from_patterns<S: AsRef<str>>(
        key_case: KeyCase,
        patterns: &[(char, &[S])],
    ) -> Result<Self> {
        let mut glyphs = BTreeMap::new();
        for (ch, rows) in patterns {
            let glyph = Glyph::parse(rows).map_err(|e| e.with_context("char", ch.to_string()))?;
            insert_folded(&mut glyphs, key_case, *ch, glyph)?;
        }
        Ok(Self { glyphs, key_case })
    }

    /// Load a font file:
    ///
    /// ```toml
    /// key_case = "upper"
    /// [glyphs]
    /// A = ["010", "101", "111", "101", "101"]
    /// ```
    pub fn from_toml(source: &str) -> Result<Self> {
        let font: FontFile = toml::from_str(source).map_err(|e| {
            Error::config_invalid(e.message().to_string())
                .with_operation("glyph::from_toml")
                .set_source(e)
        })?;

        let mut glyphs = BTreeMap::new();
        for (key, rows) in &font.glyphs {
            let mut chars = key.chars();
            let ch = match (chars.next(), chars.next()) {
                (Some(ch), None) => ch,
                _ => {
                    return Err(Error::config_invalid(format!(
                        "glyph key {key:?} must be exactly one character"
                    ))
                    .with_operation("glyph::from_toml"));
                }
            };
            let glyph = Glyph::parse(rows).map_err(|e| {
                e.with_operation("glyph::from_toml")
                    .with_context("char", key.clone())
            })?;
            insert_folded(&mut glyphs, font.key_case, ch, glyph)
                .map_err(|e| e.with_operation("glyph::from_toml"))?;
        }

        Ok(Self {
            glyphs,
            key_case: font.key_case,
        })
    }

    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    /// Fold text to the table's key case.
    pub fn normalize(&self, text: &str) -> String {
        self.key_case.fold(text)
    }

    pub fn key_case(&self) -> KeyCase {
        self.key_case
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Characters with a glyph, in ascending order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.keys().copied()
    }
}

fn insert_folded(
    glyphs: &mut BTreeMap<char, Glyph>,
    key_case: KeyCase,
    ch: char,
    glyph: Glyph,
) -> Result<()> {
    let folded = key_case.fold(&ch.to_string());
    let mut chars = folded.chars();
    let key = match (chars.next(), chars.next()) {
        (Some(key), None) => key,
        _ => ch,
    };
    if glyphs.insert(key, glyph).is_some() {
        return Err(
            Error::config_invalid(format!("glyph {key:?} is defined more than once"))
                .with_context("char", key.to_string()),
        );
    }
    Ok(())
}

/// 3x5 pixel font: upper-case letters, digits and a few symbols.
const BUILTIN_FONT: &[(char, [&str; 5])] = &[
    ('A', ["010", "101", "111", "101", "101"]),
    ('B', ["110", "101", "110", "101", "110"]),
    ('C', ["011", "100", "100", "100", "011"]),
    ('D', ["110", "101", "101", "101", "110"]),
    ('E', ["111", "100", "110", "100", "111"]),
    ('F', ["111", "100", "110", "100", "100"]),
    ('G', ["011", "100", "101", "101", "011"]),
    ('H', ["101", "101", "111", "101", "101"]),
    ('I', ["111", "010", "010", "010", "111"]),
    ('J', ["001", "001", "001", "101", "010"]),
    ('K', ["101", "101", "110", "101", "101"]),
    ('L', ["100", "100", "100", "100", "111"]),
    ('M', ["101", "111", "101", "101", "101"]),
    ('N', ["101", "111", "101", "101", "101"]),
    ('O', ["010", "101", "101", "101", "010"]),
    ('P', ["110", "101", "110", "100", "100"]),
    ('Q', ["010", "101", "101", "011", "001"]),
    ('R', ["110", "101", "110", "101", "101"]),
    ('S', ["011", "100", "010", "001", "110"]),
    ('T', ["111", "010", "010", "010", "010"]),
    ('U', ["101", "101", "101", "101", "010"]),
    ('V', ["101", "101", "101", "010", "010"]),
    ('W', ["101", "101", "101", "010", "010"]),
    ('X', ["101", "010", "010", "010", "101"]),
    ('Y', ["101", "010", "010", "010", "010"]),
    ('Z', ["111", "001", "010", "100", "111"]),
    ('0', ["111", "101", "101", "101", "111"]),
    ('1', ["010", "110", "010", "010", "111"]),
    ('2', ["111", "001", "010", "100", "111"]),
    ('3', ["111", "001", "011", "001", "111"]),
    ('4', ["101", "101", "111", "001", "001"]),
    ('5', ["111", "100", "111", "001", "111"]),
    ('6', ["111", "100", "111", "101", "111"]),
    ('7', ["111", "001", "001", "001", "001"]),
    ('8', ["111", "101", "111", "101", "111"]),
    ('9', ["111", "101", "111", "001", "111"]),
    (' ', ["000", "000", "000", "000", "000"]),
    ('-', ["000", "000", "111", "000", "000"]),
    ('/', ["000", "001", "010", "100", "000"]),
    ('.', ["000", "000", "000", "000", "010"]),
    (':', ["000", "010", "000", "010", "000"]),
    ('@', ["010", "101", "111", "101", "010"]),
    ('#', ["010", "111", "010", "111", "010"]),
];
