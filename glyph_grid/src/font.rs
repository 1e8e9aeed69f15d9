// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Access to glyph outlines.

use skrifa::raw::tables::glyf::{Glyf, Glyph};
use skrifa::raw::tables::loca::Loca;
use skrifa::raw::{ReadError, TableProvider};
use skrifa::{FontRef, GlyphId, MetadataProvider};

use crate::error::Error;
use crate::outline::{Outline, OutlinePoint};

/// A provider of character mappings and quadratic glyph outlines.
pub trait OutlineSource {
    /// Every `(code point, glyph id)` pair the source maps, in code point
    /// order.
    fn mappings(&self) -> impl Iterator<Item = (u32, u32)> + '_;

    /// Replaces the contents of `outline` with the outline of a glyph.
    ///
    /// A glyph without contours, such as a space, loads as an empty outline.
    fn load_outline(&self, glyph_id: u32, outline: &mut Outline) -> Result<(), Error>;
}

/// Outlines read from the `glyf` table of a TrueType font.
///
/// Only simple glyphs are supported. Composite glyphs fail with
/// [`ErrorKind::UnsupportedFormat`].
///
/// [`ErrorKind::UnsupportedFormat`]: crate::ErrorKind::UnsupportedFormat
#[derive(Clone)]
pub struct SkrifaOutlines<'a> {
    font: FontRef<'a>,
    loca: Loca<'a>,
    glyf: Glyf<'a>,
}

impl<'a> SkrifaOutlines<'a> {
    /// Creates a source for a font.
    ///
    /// Fails with [`ErrorKind::UnsupportedFormat`] if the font has no `glyf`
    /// table, for example a CFF or bitmap-only font.
    ///
    /// [`ErrorKind::UnsupportedFormat`]: crate::ErrorKind::UnsupportedFormat
    pub fn new(font: FontRef<'a>) -> Result<Self, Error> {
        let glyf = font.glyf().map_err(|error| match error {
            ReadError::TableIsMissing(_) => {
                Error::unsupported_format("font has no TrueType glyph outlines")
            }
            error => Error::font(error),
        })?;
        let loca = font.loca(None).map_err(Error::font)?;
        Ok(Self { font, loca, glyf })
    }

    /// Creates a source for the font at `index` in a font file or collection.
    pub fn from_data(data: &'a [u8], index: u32) -> Result<Self, Error> {
        Self::new(FontRef::from_index(data, index).map_err(Error::font)?)
    }

    /// The underlying font.
    pub fn font(&self) -> &FontRef<'a> {
        &self.font
    }
}

impl OutlineSource for SkrifaOutlines<'_> {
    fn mappings(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.font
            .charmap()
            .mappings()
            .map(|(codepoint, glyph_id)| (codepoint, glyph_id.to_u32()))
    }

    fn load_outline(&self, glyph_id: u32, outline: &mut Outline) -> Result<(), Error> {
        outline.clear();
        let glyph = self
            .loca
            .get_glyf(GlyphId::new(glyph_id), &self.glyf)
            .map_err(Error::font)?;
        match glyph {
            None => Ok(()),
            Some(Glyph::Simple(simple)) => {
                let points = simple.points().map(|point| {
                    OutlinePoint::new(point.x.into(), point.y.into(), point.on_curve)
                });
                let ends = simple
                    .end_pts_of_contours()
                    .iter()
                    .map(|end| usize::from(end.get()));
                outline.extend_from_parts(points, ends);
                Ok(())
            }
            Some(Glyph::Composite(_)) => Err(Error::unsupported_format(
                "composite glyphs are not supported",
            )),
        }
    }
}

impl core::fmt::Debug for SkrifaOutlines<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SkrifaOutlines")
            .field("glyphs", &self.loca.len().saturating_sub(1))
            .finish_non_exhaustive()
    }
}
