// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph selection and top-level configuration.

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use crate::atlas::{AtlasConfig, SLOTS_PER_TEXEL};
use crate::error::Error;
use crate::grid::GridConfig;

/// An inclusive range of Unicode code points.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CodepointRange {
    /// First code point in the range.
    pub start: u32,
    /// Last code point in the range.
    pub end: u32,
}

impl CodepointRange {
    /// Creates a range covering `start..=end`.
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns `true` if the range contains the code point.
    pub fn contains(&self, codepoint: u32) -> bool {
        (self.start..=self.end).contains(&codepoint)
    }
}

impl From<RangeInclusive<u32>> for CodepointRange {
    fn from(range: RangeInclusive<u32>) -> Self {
        Self::new(*range.start(), *range.end())
    }
}

const LATIN: &[CodepointRange] = &[CodepointRange::new(0x20, 0xFF)];

const CHINESE: &[CodepointRange] = &[
    // Punctuation, Hiragana and Katakana.
    CodepointRange::new(0x3000, 0x30FF),
    // Katakana phonetic extensions.
    CodepointRange::new(0x31F0, 0x31FF),
    // Half-width and full-width forms.
    CodepointRange::new(0xFF00, 0xFFEF),
    // CJK unified ideographs.
    CodepointRange::new(0x4E00, 0x9FAF),
];

const CYRILLIC: &[CodepointRange] = &[
    CodepointRange::new(0x0400, 0x052F),
    CodepointRange::new(0x2DE0, 0x2DFF),
    CodepointRange::new(0xA640, 0xA69F),
];

const KOREAN: &[CodepointRange] = &[
    // Hangul compatibility jamo.
    CodepointRange::new(0x3131, 0x3163),
    // Hangul syllables.
    CodepointRange::new(0xAC00, 0xD79D),
];

/// The set of code points whose glyphs are processed.
///
/// Ranges may overlap; a code point is selected if any range contains it.
/// The default covers Basic Latin and Latin-1 (`U+0020..=U+00FF`); the presets
/// add a script's blocks on top of that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodepointRanges {
    ranges: Vec<CodepointRange>,
}

impl CodepointRanges {
    /// An empty set that selects nothing.
    pub fn empty() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Latin plus CJK punctuation, kana, full-width forms and unified
    /// ideographs.
    pub fn chinese() -> Self {
        Self::with_preset(CHINESE)
    }

    /// Latin plus Cyrillic and its supplement and extension blocks.
    pub fn cyrillic() -> Self {
        Self::with_preset(CYRILLIC)
    }

    /// Latin plus Hangul compatibility jamo and syllables.
    pub fn korean() -> Self {
        Self::with_preset(KOREAN)
    }

    fn with_preset(preset: &[CodepointRange]) -> Self {
        let mut ranges = Self::default();
        ranges.ranges.extend_from_slice(preset);
        ranges
    }

    /// Adds a range.
    #[must_use]
    pub fn with(mut self, range: impl Into<CodepointRange>) -> Self {
        self.push(range);
        self
    }

    /// Adds a range.
    pub fn push(&mut self, range: impl Into<CodepointRange>) {
        self.ranges.push(range.into());
    }

    /// The ranges in insertion order.
    pub fn ranges(&self) -> &[CodepointRange] {
        &self.ranges
    }

    /// Returns `true` if any range contains the code point.
    pub fn contains(&self, codepoint: u32) -> bool {
        self.ranges.iter().any(|range| range.contains(codepoint))
    }

    /// Checks that every range has `start <= end`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.ranges.iter().any(|range| range.start > range.end) {
            return Err(Error::invalid_config(
                "code point range starts after it ends",
            ));
        }
        Ok(())
    }
}

impl Default for CodepointRanges {
    fn default() -> Self {
        Self {
            ranges: LATIN.to_vec(),
        }
    }
}

impl FromIterator<CodepointRange> for CodepointRanges {
    fn from_iter<T: IntoIterator<Item = CodepointRange>>(iter: T) -> Self {
        Self {
            ranges: iter.into_iter().collect(),
        }
    }
}

/// What to do with a selected glyph that has no simple quadratic outline.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum UnsupportedGlyphPolicy {
    /// Leave the glyph out of the atlas and log a warning.
    Skip,
    /// Fail the whole batch.
    #[default]
    Fail,
}

/// Settings for building a curve atlas from a font.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Grid construction settings.
    pub grid: GridConfig,
    /// Atlas packing settings.
    pub atlas: AtlasConfig,
    /// The code points whose glyphs are included.
    pub ranges: CodepointRanges,
    /// Handling of glyphs that are not simple outlines.
    pub unsupported: UnsupportedGlyphPolicy,
}

impl Config {
    /// Checks every part of the configuration, including that grids built with
    /// it can be packed.
    pub fn validate(&self) -> Result<(), Error> {
        self.grid.validate()?;
        if self.grid.cell_capacity % SLOTS_PER_TEXEL != 0 {
            return Err(Error::invalid_config(
                "cell capacity must be a multiple of 4 to pack grids",
            ));
        }
        self.atlas.validate()?;
        self.ranges.validate()
    }
}
